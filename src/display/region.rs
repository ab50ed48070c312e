/*
 *  display/region.rs
 *
 *  StockFace - worth the glance
 *  (c) 2020-26 Stuart Hunter
 *
 *  Rectangular regions of the face and their text rendering
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

use embedded_graphics::mono_font::MonoTextStyle;
use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{PrimitiveStyle, Rectangle};
use embedded_text::alignment::{HorizontalAlignment, VerticalAlignment};
use embedded_text::style::TextBoxStyleBuilder;
use embedded_text::TextBox;

use super::color::Color;
use super::error::DisplayError;
use super::layout::FontSize;

/// A rectangular region of the face.
///
/// Text regions carry a font. Glyph regions hold a bitmap and only use
/// their background color.
#[derive(Debug, Clone, PartialEq)]
pub struct Region {
    /// Region identifier (e.g. "time", "mood_icon")
    pub name: &'static str,

    /// Bounding rectangle
    pub bounds: Rectangle,

    /// Font for text rendering (None for glyph regions)
    pub font: Option<FontSize>,

    /// Text color
    pub fg: Color,

    /// Background color, None for clear
    pub bg: Option<Color>,

    /// Text alignment within the region
    pub alignment: HorizontalAlignment,

    pub vertical_alignment: VerticalAlignment,
}

impl Region {
    /// Create a new text region, white on clear, left aligned
    pub fn new_text(name: &'static str, bounds: Rectangle, font: FontSize) -> Self {
        Self {
            name,
            bounds,
            font: Some(font),
            fg: Color::White,
            bg: None,
            alignment: HorizontalAlignment::Left,
            vertical_alignment: VerticalAlignment::Top,
        }
    }

    /// Create a new glyph region
    pub fn new_glyph(name: &'static str, bounds: Rectangle) -> Self {
        Self {
            name,
            bounds,
            font: None,
            fg: Color::White,
            bg: None,
            alignment: HorizontalAlignment::Left,
            vertical_alignment: VerticalAlignment::Top,
        }
    }

    /// Builder: set alignment
    pub fn align(mut self, alignment: HorizontalAlignment) -> Self {
        self.alignment = alignment;
        self
    }

    /// Builder: set colors
    pub fn colors(mut self, fg: Color, bg: Option<Color>) -> Self {
        self.fg = fg;
        self.bg = bg;
        self
    }

    pub fn position(&self) -> Point {
        self.bounds.top_left
    }

    /// Paint the background, if the region has one.
    pub fn fill_background<D>(&self, target: &mut D) -> Result<(), DisplayError>
    where
        D: DrawTarget<Color = BinaryColor>,
    {
        let Some(bg) = self.bg else {
            return Ok(());
        };
        self.bounds
            .into_styled(PrimitiveStyle::with_fill(bg.to_binary()))
            .draw(target)
            .map_err(|_| DisplayError::DrawingError(format!("Failed to fill {}", self.name)))
    }

    /// Draw `text` inside the region with its font and alignment.
    /// Text that does not fit is clipped to the bounds.
    pub fn draw_text<D>(&self, target: &mut D, text: &str) -> Result<(), DisplayError>
    where
        D: DrawTarget<Color = BinaryColor>,
    {
        let font = self
            .font
            .ok_or_else(|| DisplayError::Other(format!("{} has no font", self.name)))?;
        self.fill_background(target)?;

        let style = MonoTextStyle::new(font.font(), self.fg.to_binary());
        let textbox_style = TextBoxStyleBuilder::new()
            .alignment(self.alignment)
            .vertical_alignment(self.vertical_alignment)
            .build();

        TextBox::with_textbox_style(text, self.bounds, style, textbox_style)
            .draw(&mut target.clipped(&self.bounds))
            .map(|_| ()) // TextBox::draw returns the unconsumed text
            .map_err(|_| DisplayError::DrawingError(format!("Failed to draw {}", self.name)))
    }
}
