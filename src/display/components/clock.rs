/*
 *  display/components/clock.rs
 *
 *  StockFace - worth the glance
 *  (c) 2020-26 Stuart Hunter
 *
 *  Clock display component
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

use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;

use crate::clock::TimeText;
use crate::constants::TIME_PLACEHOLDER;
use crate::display::error::DisplayError;
use crate::display::region::Region;

/// Clock display component, black digits on the background's white panel
pub struct ClockDisplay {
    region: Region,
    text: TimeText,
}

impl ClockDisplay {
    pub fn new(region: Region) -> Self {
        Self {
            region,
            text: TimeText::from_truncated(TIME_PLACEHOLDER),
        }
    }

    /// Update the shown time. Returns true when it changed.
    pub fn update(&mut self, text: TimeText) -> bool {
        let changed = self.text != text;
        self.text = text;
        changed
    }

    pub fn text(&self) -> &TimeText {
        &self.text
    }

    pub fn render<D>(&self, target: &mut D) -> Result<(), DisplayError>
    where
        D: DrawTarget<Color = BinaryColor>,
    {
        self.region.draw_text(target, &self.text)
    }
}
