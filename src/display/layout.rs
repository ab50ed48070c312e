/*
 *  display/layout.rs
 *
 *  StockFace - worth the glance
 *  (c) 2020-26 Stuart Hunter
 *
 *  Face layout: region geometry, fonts and colors
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

use embedded_graphics::mono_font::ascii::{FONT_10X20, FONT_6X13, FONT_9X15};
use embedded_graphics::mono_font::MonoFont;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;
use embedded_text::alignment::HorizontalAlignment;

use crate::constants::{
    ALARM_RECT, FACE_HEIGHT, FACE_WIDTH, MOOD_ICON_RECT, STOCK_RECT, TIME_RECT, WEATHER_RECT,
};
use crate::display::color::Color;
use crate::display::region::Region;

/// Font roles on the face, largest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontSize {
    /// Clock digits
    Time,
    /// Weather line, 20px
    Weather,
    /// Stock quote, 16px class
    Stock,
    /// Alarm/status caption, 16px class
    Alarm,
}

impl FontSize {
    pub fn font(&self) -> &'static MonoFont<'static> {
        match self {
            FontSize::Time => &profont::PROFONT_24_POINT,
            FontSize::Weather => &FONT_10X20,
            FontSize::Stock => &FONT_6X13,
            FontSize::Alarm => &FONT_9X15,
        }
    }
}

/// Every region of the face, resolved for one display size.
#[derive(Debug, Clone)]
pub struct FaceLayout {
    pub width: u32,
    pub height: u32,
    pub mood_icon: Region,
    pub time: Region,
    pub weather: Region,
    pub stock: Region,
    pub alarm: Region,
}

impl Default for FaceLayout {
    fn default() -> Self {
        Self::for_display(FACE_WIDTH, FACE_HEIGHT)
    }
}

impl FaceLayout {
    /// Layout for a `width` x `height` screen. Rectangles are scaled from
    /// the 144x168 design, the icon keeps its bitmap size.
    pub fn for_display(width: u32, height: u32) -> Self {
        let scale = |(x, y, w, h): (i32, i32, u32, u32)| {
            Rectangle::new(
                Point::new(scale_coord(x, width, FACE_WIDTH), scale_coord(y, height, FACE_HEIGHT)),
                Size::new(scale_len(w, width, FACE_WIDTH), scale_len(h, height, FACE_HEIGHT)),
            )
        };

        let icon = scale(MOOD_ICON_RECT);
        let icon = Rectangle::new(icon.top_left, Size::new(MOOD_ICON_RECT.2, MOOD_ICON_RECT.3));

        Self {
            width,
            height,
            mood_icon: Region::new_glyph("mood_icon", icon)
                .colors(Color::Black, Some(Color::White)),
            time: Region::new_text("time", scale(TIME_RECT), FontSize::Time)
                .colors(Color::Black, None)
                .align(HorizontalAlignment::Center),
            weather: Region::new_text("weather", scale(WEATHER_RECT), FontSize::Weather)
                .align(HorizontalAlignment::Center),
            stock: Region::new_text("stock", scale(STOCK_RECT), FontSize::Stock)
                .align(HorizontalAlignment::Left),
            alarm: Region::new_text("alarm", scale(ALARM_RECT), FontSize::Alarm)
                .align(HorizontalAlignment::Right),
        }
    }

    /// Regions in drawing order, the icon sits above the stock text.
    pub fn regions(&self) -> [&Region; 5] {
        [&self.time, &self.weather, &self.stock, &self.alarm, &self.mood_icon]
    }

    pub fn bounds(&self) -> Rectangle {
        Rectangle::new(Point::zero(), Size::new(self.width, self.height))
    }

    /// White panel behind the clock, a little wider than the time region.
    pub fn time_panel(&self) -> Rectangle {
        let Rectangle { top_left, size } = self.time.bounds;
        Rectangle::new(
            top_left - Point::new(3, 2),
            Size::new(size.width.saturating_sub(2), size.height + 4),
        )
    }
}

// Scaling runs in 64 bits, design rects are never larger than the face.
fn scale_coord(v: i32, actual: u32, design: u32) -> i32 {
    let scaled = i64::from(v) * i64::from(actual) / i64::from(design);
    i32::try_from(scaled).unwrap_or(i32::MAX)
}

fn scale_len(v: u32, actual: u32, design: u32) -> u32 {
    let scaled = u64::from(v) * u64::from(actual) / u64::from(design);
    u32::try_from(scaled).unwrap_or(u32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_geometry() {
        let layout = FaceLayout::default();
        assert_eq!(layout.time.bounds, Rectangle::new(Point::new(5, 56), Size::new(139, 50)));
        assert_eq!(layout.weather.bounds, Rectangle::new(Point::new(0, 115), Size::new(144, 25)));
        assert_eq!(layout.stock.bounds, Rectangle::new(Point::new(0, 5), Size::new(100, 50)));
        assert_eq!(layout.alarm.bounds, Rectangle::new(Point::new(0, 140), Size::new(144, 25)));
        assert_eq!(layout.mood_icon.bounds, Rectangle::new(Point::new(100, 5), Size::new(42, 42)));
    }

    #[test]
    fn test_region_styles() {
        let layout = FaceLayout::default();
        assert_eq!(layout.time.fg, Color::Black);
        assert_eq!(layout.time.alignment, HorizontalAlignment::Center);
        assert_eq!(layout.weather.fg, Color::White);
        assert_eq!(layout.stock.alignment, HorizontalAlignment::Left);
        assert_eq!(layout.alarm.alignment, HorizontalAlignment::Right);
        assert_eq!(layout.mood_icon.bg, Some(Color::White));
        assert!(layout.mood_icon.font.is_none());
    }

    #[test]
    fn test_regions_fit_default_screen() {
        let layout = FaceLayout::default();
        let screen = layout.bounds();
        for region in layout.regions() {
            let inside = screen.intersection(&region.bounds);
            assert_eq!(inside, region.bounds, "{}", region.name);
        }
    }

    #[test]
    fn test_scaled_layout() {
        let layout = FaceLayout::for_display(288, 336);
        assert_eq!(layout.time.bounds, Rectangle::new(Point::new(10, 112), Size::new(278, 100)));
        assert_eq!(layout.mood_icon.bounds.size, Size::new(42, 42));
        assert_eq!(layout.mood_icon.bounds.top_left, Point::new(200, 10));
    }

    #[test]
    fn test_huge_display_does_not_overflow() {
        let layout = FaceLayout::for_display(40_000_000, 40_000_000);
        assert_eq!(layout.weather.bounds.size.width, 40_000_000);
        assert_eq!(layout.time.bounds.top_left.x, 5 * 40_000_000 / 144);
        assert_eq!(layout.alarm.bounds.top_left.y, (140i64 * 40_000_000 / 168) as i32);
    }

    #[test]
    fn test_time_panel_follows_time_region() {
        let layout = FaceLayout::default();
        assert_eq!(layout.time_panel(), Rectangle::new(Point::new(2, 54), Size::new(137, 54)));

        let big = FaceLayout::for_display(288, 336);
        let panel = big.time_panel();
        assert_eq!(panel.intersection(&big.time.bounds).size.height, big.time.bounds.size.height);
        assert!(panel.top_left.x < big.time.bounds.top_left.x);
    }

    #[test]
    fn test_alarm_font_fits_sixteen_chars() {
        let font = FontSize::Alarm.font();
        let layout = FaceLayout::default();
        assert!(font.character_size.width * 16 <= layout.alarm.bounds.size.width);
    }
}
