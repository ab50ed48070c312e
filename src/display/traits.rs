/*
 *  display/traits.rs
 *
 *  StockFace - worth the glance
 *  (c) 2020-26 Stuart Hunter
 *
 *  Core trait definitions for display driver abstraction
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

use crate::display::error::DisplayError;

/// Display capabilities and metadata
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayCapabilities {
    /// Display width in pixels
    pub width: u32,

    /// Display height in pixels
    pub height: u32,

    /// Short driver name for logging
    pub name: &'static str,
}

impl DisplayCapabilities {
    /// Bytes in a packed 1bpp frame for this display
    pub fn frame_bytes(&self) -> usize {
        (self.width as usize * self.height as usize).div_ceil(8)
    }
}

/// Minimal output abstraction, every display sink implements this trait
///
/// The face renders into its own framebuffer and hands the packed result
/// over with `write_buffer` followed by `flush`.
pub trait DisplayDriver {
    /// Returns the capabilities of this display
    fn capabilities(&self) -> &DisplayCapabilities;

    /// Returns the display dimensions as (width, height)
    fn dimensions(&self) -> (u32, u32) {
        let caps = self.capabilities();
        (caps.width, caps.height)
    }

    /// Prepare the display for rendering
    fn init(&mut self) -> Result<(), DisplayError>;

    /// Push the last written frame out
    fn flush(&mut self) -> Result<(), DisplayError>;

    /// Clear the display to blank/off state
    fn clear(&mut self) -> Result<(), DisplayError>;

    /// Write a packed frame, 8 pixels per byte LSB first, row major.
    fn write_buffer(&mut self, buffer: &[u8]) -> Result<(), DisplayError>;
}
