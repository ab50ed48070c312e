/*
 *  clock.rs
 *
 *  StockFace - worth the glance
 *  (c) 2020-26 Stuart Hunter
 *
 *  HH:MM formatting and the 12h/24h preference
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

use chrono::Timelike;
use serde::{Deserialize, Serialize};
use std::env;

use crate::bounded::BoundedText;
use crate::constants::TIME_LEN;

/// "HH:MM", always five characters.
pub type TimeText = BoundedText<TIME_LEN>;

/// Clock style selection as configured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ClockStyle {
    /// Follow the host locale
    #[default]
    #[serde(rename = "auto")]
    Auto,
    #[serde(rename = "12h")]
    TwelveHour,
    #[serde(rename = "24h")]
    TwentyFourHour,
}

impl std::str::FromStr for ClockStyle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "auto" => Ok(ClockStyle::Auto),
            "12h" | "12" => Ok(ClockStyle::TwelveHour),
            "24h" | "24" => Ok(ClockStyle::TwentyFourHour),
            other => Err(format!("unknown clock style '{other}' (auto|12h|24h)")),
        }
    }
}

/// Source of the 12h/24h system setting, asked on every clock refresh.
pub trait ClockPreference {
    fn is_24h_style(&self) -> bool;
}

/// Fixed preference, handy for tests and forced styles.
#[derive(Debug, Clone, Copy)]
pub struct FixedClockPreference(pub bool);

impl ClockPreference for FixedClockPreference {
    fn is_24h_style(&self) -> bool {
        self.0
    }
}

/// Preference backed by configuration, falling back to the host locale.
#[derive(Debug, Clone, Copy)]
pub struct SystemClockPreference {
    style: ClockStyle,
}

impl SystemClockPreference {
    pub fn new(style: ClockStyle) -> Self {
        Self { style }
    }
}

impl ClockPreference for SystemClockPreference {
    fn is_24h_style(&self) -> bool {
        match self.style {
            ClockStyle::TwelveHour => false,
            ClockStyle::TwentyFourHour => true,
            ClockStyle::Auto => !locale_prefers_12h(&host_locale()),
        }
    }
}

/// First non-empty of LC_ALL, LC_TIME, LANG.
fn host_locale() -> String {
    ["LC_ALL", "LC_TIME", "LANG"]
        .iter()
        .filter_map(|var| env::var(var).ok())
        .find(|value| !value.is_empty())
        .unwrap_or_default()
}

/// Locales whose conventional clock is 12 hour.
pub fn locale_prefers_12h(locale: &str) -> bool {
    const TWELVE_HOUR: [&str; 5] = ["en_US", "en_CA", "en_AU", "en_PH", "en_IN"];
    TWELVE_HOUR.iter().any(|prefix| locale.starts_with(prefix))
}

/// Format `time` as "HH:MM". 12 hour style pads 1-9 to "01".."09", like `%I`.
pub fn format_clock<T: Timelike>(time: &T, is_24h: bool) -> TimeText {
    let hour = if is_24h { time.hour() } else { time.hour12().1 };
    TimeText::from_fmt(format_args!("{:02}:{:02}", hour, time.minute()))
}
