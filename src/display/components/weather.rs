/*
 *  display/components/weather.rs
 *
 *  StockFace - worth the glance
 *  (c) 2020-26 Stuart Hunter
 *
 *  Weather line display component
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

use crate::constants::WEATHER_PLACEHOLDER;
use crate::display::error::DisplayError;
use crate::display::region::Region;
use crate::message::decoder::WeatherLine;

/// Weather display component
pub struct WeatherDisplay {
    region: Region,
    line: WeatherLine,
}

impl WeatherDisplay {
    /// Create a new weather display component
    pub fn new(region: Region) -> Self {
        Self {
            region,
            line: WeatherLine::from_truncated(WEATHER_PLACEHOLDER),
        }
    }

    /// Update the weather line. Returns true when it changed.
    pub fn update(&mut self, line: WeatherLine) -> bool {
        let changed = self.line != line;
        self.line = line;
        changed
    }

    pub fn line(&self) -> &WeatherLine {
        &self.line
    }

    /// Render the weather display
    pub fn render<D>(&self, target: &mut D) -> Result<(), DisplayError>
    where
        D: DrawTarget<Color = BinaryColor>,
    {
        self.region.draw_text(target, &self.line)
    }
}
