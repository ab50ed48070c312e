/*
 *  display/state.rs
 *
 *  StockFace - worth the glance
 *  (c) 2020-26 Stuart Hunter
 *
 *  Snapshot of what the face currently shows
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

use crate::assets::ResourceId;
use crate::bounded::BoundedText;
use crate::clock::TimeText;
use crate::constants::{
    ALARM_PLACEHOLDER, STATUS_LINE_LEN, STOCK_PLACEHOLDER, TIME_PLACEHOLDER, WEATHER_PLACEHOLDER,
};
use crate::message::decoder::{StockLine, WeatherLine};

pub type StatusLine = BoundedText<STATUS_LINE_LEN>;

/// Text and icon currently on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayState {
    pub time_text: TimeText,
    pub weather_text: WeatherLine,
    pub stock_text: StockLine,
    pub status_text: StatusLine,
    pub mood_icon: ResourceId,
}

impl Default for DisplayState {
    /// What a freshly loaded face shows before any update.
    fn default() -> Self {
        Self {
            time_text: TimeText::from_truncated(TIME_PLACEHOLDER),
            weather_text: WeatherLine::from_truncated(WEATHER_PLACEHOLDER),
            stock_text: StockLine::from_truncated(STOCK_PLACEHOLDER),
            status_text: StatusLine::from_truncated(ALARM_PLACEHOLDER),
            mood_icon: ResourceId::ImageHappy,
        }
    }
}
