/*
 *  bounded.rs
 *
 *  StockFace - worth the glance
 *  (c) 2020-26 Stuart Hunter
 *
 *  Fixed capacity text used by every on-screen region
 *
 *  This program is free software: you can redistribute it and/or modify
 *  it under the terms of the GNU General Public License as published by
 *  the Free Software Foundation, either version 3 of the License, or
 *  (at your option) any later version.
 *
 *  This program is distributed in the hope that it will be useful,
 *  but WITHOUT ANY WARRANTY; without even the implied warranty of
 *  MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
 *  GNU General Public License for more details.
 *
 *  See <http://www.gnu.org/licenses/> to get a copy of the GNU General
 *  Public License.
 *
 */

use arrayvec::ArrayString;
use core::fmt::{self, Write};
use core::ops::Deref;

/// Stack allocated text holding at most `N` bytes.
///
/// Writes that do not fit are cut at the last whole character that does,
/// the same way a `snprintf` into an `N + 1` byte buffer keeps `N` bytes
/// and the terminator.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct BoundedText<const N: usize>(ArrayString<N>);

impl<const N: usize> BoundedText<N> {
    pub const CAPACITY: usize = N;

    pub fn new() -> Self {
        Self(ArrayString::new())
    }

    /// Build from `text`, dropping whatever does not fit.
    pub fn from_truncated(text: &str) -> Self {
        let mut out = Self::new();
        out.set(text);
        out
    }

    /// Build from format arguments, dropping whatever does not fit.
    pub fn from_fmt(args: fmt::Arguments<'_>) -> Self {
        let mut out = Self::new();
        let mut sink = Truncating { buf: &mut out.0, truncated: false };
        // Truncating never reports an error, overflow is recorded instead
        let _ = sink.write_fmt(args);
        out
    }

    /// Replace the contents. Returns true when the input had to be cut.
    pub fn set(&mut self, text: &str) -> bool {
        self.0.clear();
        let mut sink = Truncating { buf: &mut self.0, truncated: false };
        let _ = sink.write_str(text);
        sink.truncated
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }
}

impl<const N: usize> Deref for BoundedText<N> {
    type Target = str;

    fn deref(&self) -> &str {
        self.0.as_str()
    }
}

impl<const N: usize> fmt::Display for BoundedText<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0.as_str())
    }
}

impl<const N: usize> fmt::Debug for BoundedText<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self.0.as_str(), f)
    }
}

impl<const N: usize> PartialEq<str> for BoundedText<N> {
    fn eq(&self, other: &str) -> bool {
        self.0.as_str() == other
    }
}

impl<const N: usize> PartialEq<&str> for BoundedText<N> {
    fn eq(&self, other: &&str) -> bool {
        self.0.as_str() == *other
    }
}

struct Truncating<'a, const N: usize> {
    buf: &'a mut ArrayString<N>,
    truncated: bool,
}

impl<const N: usize> Write for Truncating<'_, N> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        if self.truncated {
            return Ok(());
        }
        if self.buf.try_push_str(s).is_ok() {
            return Ok(());
        }
        for c in s.chars() {
            if self.buf.try_push(c).is_err() {
                self.truncated = true;
                break;
            }
        }
        Ok(())
    }
}
