/*
 *  display/framebuffer.rs
 *
 *  StockFace - worth the glance
 *  (c) 2020-26 Stuart Hunter
 *
 *  Runtime sized monochrome framebuffer
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

use core::convert::Infallible;
use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;
use std::io::{self, Write};

/// A runtime-sized 1bpp framebuffer for embedded-graphics.
///
/// Used both as the screen backing store and as the pixel store of each
/// loaded bitmap resource.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameBuffer {
    buf: Vec<BinaryColor>,
    w: usize,
    h: usize,
}

impl FrameBuffer {
    pub fn new(width: u32, height: u32) -> Self {
        let (w, h) = (width as usize, height as usize);
        Self { buf: vec![BinaryColor::Off; w * h], w, h }
    }

    /// Get dimensions as (width, height)
    pub fn dimensions(&self) -> (u32, u32) {
        (self.w as u32, self.h as u32)
    }

    pub fn as_slice(&self) -> &[BinaryColor] {
        &self.buf
    }

    pub fn clear_color(&mut self, color: BinaryColor) {
        self.buf.fill(color);
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<BinaryColor> {
        self.idx(Point::new(x as i32, y as i32)).map(|i| self.buf[i])
    }

    /// Count pixels set to On
    pub fn count_on(&self) -> usize {
        self.buf.iter().filter(|p| p.is_on()).count()
    }

    /// Count On pixels inside `area`, clipped to the buffer.
    pub fn count_on_in(&self, area: &Rectangle) -> usize {
        area.points()
            .filter_map(|p| self.idx(p))
            .filter(|&i| self.buf[i].is_on())
            .count()
    }

    /// Pack pixels 8 per byte, LSB first, row major.
    pub fn to_packed_bytes(&self) -> Vec<u8> {
        let mut bytes = vec![0u8; self.buf.len().div_ceil(8)];
        for (i, pixel) in self.buf.iter().enumerate() {
            if pixel.is_on() {
                bytes[i / 8] |= 1 << (i % 8);
            }
        }
        bytes
    }

    /// Replace the contents from a buffer packed by `to_packed_bytes`.
    pub fn load_packed_bytes(&mut self, bytes: &[u8]) {
        for (i, pixel) in self.buf.iter_mut().enumerate() {
            let on = bytes.get(i / 8).is_some_and(|b| b & (1 << (i % 8)) != 0);
            *pixel = BinaryColor::from(on);
        }
    }

    /// Write as a plain PBM (P1). PBM marks ink with 1, so black pixels,
    /// which are Off, are written as 1.
    pub fn write_pbm<W: Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(out, "P1")?;
        writeln!(out, "{} {}", self.w, self.h)?;
        for row in self.buf.chunks(self.w.max(1)) {
            let line: Vec<&str> = row
                .iter()
                .map(|p| if p.is_off() { "1" } else { "0" })
                .collect();
            writeln!(out, "{}", line.join(" "))?;
        }
        Ok(())
    }

    /// Map (x,y) to linear index; returns None if out of bounds
    #[inline]
    fn idx(&self, p: Point) -> Option<usize> {
        if p.x >= 0 && p.y >= 0 {
            let (x, y) = (p.x as usize, p.y as usize);
            if x < self.w && y < self.h {
                return Some(y * self.w + x);
            }
        }
        None
    }
}

impl OriginDimensions for FrameBuffer {
    fn size(&self) -> Size {
        Size::new(self.w as u32, self.h as u32)
    }
}

impl DrawTarget for FrameBuffer {
    type Color = BinaryColor;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(p, c) in pixels {
            if let Some(i) = self.idx(p) {
                self.buf[i] = c;
            }
        }
        Ok(())
    }

    fn clear(&mut self, color: Self::Color) -> Result<(), Self::Error> {
        self.clear_color(color);
        Ok(())
    }

    fn fill_contiguous<I>(&mut self, area: &Rectangle, colors: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Self::Color>,
    {
        // colors arrive row major over the whole area, clip per pixel
        for (p, c) in area.points().zip(colors) {
            if let Some(i) = self.idx(p) {
                self.buf[i] = c;
            }
        }
        Ok(())
    }

    fn fill_solid(&mut self, area: &Rectangle, color: Self::Color) -> Result<(), Self::Error> {
        let clipped = area.intersection(&self.bounding_box());
        let Some(bottom_right) = clipped.bottom_right() else {
            return Ok(());
        };
        let (x0, x1) = (clipped.top_left.x as usize, bottom_right.x as usize);
        for y in clipped.top_left.y as usize..=bottom_right.y as usize {
            let base = y * self.w;
            self.buf[base + x0..=base + x1].fill(color);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_graphics::primitives::{Line, PrimitiveStyle};

    #[test]
    fn test_new_is_blank() {
        let fb = FrameBuffer::new(144, 168);
        assert_eq!(fb.dimensions(), (144, 168));
        assert_eq!(fb.count_on(), 0);
    }

    #[test]
    fn test_fill_solid_clips() {
        let mut fb = FrameBuffer::new(10, 10);
        fb.fill_solid(&Rectangle::new(Point::new(-5, 8), Size::new(20, 20)), BinaryColor::On)
            .unwrap();
        assert_eq!(fb.count_on(), 20);
        assert_eq!(fb.pixel(0, 8), Some(BinaryColor::On));
        assert_eq!(fb.pixel(0, 7), Some(BinaryColor::Off));
    }

    #[test]
    fn test_fill_contiguous_clips_negative_origin() {
        let mut fb = FrameBuffer::new(4, 4);
        let area = Rectangle::new(Point::new(-1, -1), Size::new(2, 2));
        let colors = [BinaryColor::Off, BinaryColor::Off, BinaryColor::Off, BinaryColor::On];
        fb.fill_contiguous(&area, colors).unwrap();
        assert_eq!(fb.count_on(), 1);
        assert_eq!(fb.pixel(0, 0), Some(BinaryColor::On));
    }

    #[test]
    fn test_packed_bytes_round_trip() {
        let mut fb = FrameBuffer::new(16, 4);
        Line::new(Point::new(0, 0), Point::new(15, 3))
            .into_styled(PrimitiveStyle::with_stroke(BinaryColor::On, 1))
            .draw(&mut fb)
            .unwrap();
        let packed = fb.to_packed_bytes();
        assert_eq!(packed.len(), 8);

        let mut copy = FrameBuffer::new(16, 4);
        copy.load_packed_bytes(&packed);
        assert_eq!(copy, fb);
    }

    #[test]
    fn test_pbm_output() {
        let mut fb = FrameBuffer::new(3, 2);
        fb.draw_iter([Pixel(Point::new(1, 0), BinaryColor::On)]).unwrap();
        let mut out = Vec::new();
        fb.write_pbm(&mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "P1\n3 2\n1 0 1\n1 1 1\n");
    }
}
