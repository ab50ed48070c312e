/*
 *  display/color.rs
 *
 *  StockFace - worth the glance
 *  (c) 2020-26 Stuart Hunter
 *
 *  Region colors for the two tone face
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

/// Text and background colors a region may use.
///
/// The screen is black with white ink, so White maps to an On pixel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Color {
    Black,
    White,
}

impl Color {
    /// Convert to BinaryColor for the framebuffer
    pub fn to_binary(&self) -> BinaryColor {
        match self {
            Color::Black => BinaryColor::Off,
            Color::White => BinaryColor::On,
        }
    }
}
