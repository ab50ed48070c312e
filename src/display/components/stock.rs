/*
 *  display/components/stock.rs
 *
 *  StockFace - worth the glance
 *  (c) 2020-26 Stuart Hunter
 *
 *  Stock quote display component
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

use crate::constants::STOCK_PLACEHOLDER;
use crate::display::error::DisplayError;
use crate::display::region::Region;
use crate::message::decoder::StockLine;

/// Two line quote, "SYMBOL CHANGE" over the price.
pub struct StockDisplay {
    region: Region,
    line: StockLine,
}

impl StockDisplay {
    pub fn new(region: Region) -> Self {
        Self {
            region,
            line: StockLine::from_truncated(STOCK_PLACEHOLDER),
        }
    }

    pub fn update(&mut self, line: StockLine) -> bool {
        let changed = self.line != line;
        self.line = line;
        changed
    }

    pub fn line(&self) -> &StockLine {
        &self.line
    }

    pub fn render<D>(&self, target: &mut D) -> Result<(), DisplayError>
    where
        D: DrawTarget<Color = BinaryColor>,
    {
        self.region.draw_text(target, &self.line)
    }
}
