/*
 *  constants.rs
 *
 *  StockFace - worth the glance
 *  (c) 2020-26 Stuart Hunter
 *
 *  Face geometry, text capacities and message keys
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

/// The width of the watch screen in pixels.
pub const FACE_WIDTH: u32 = 144;
/// The height of the watch screen in pixels.
pub const FACE_HEIGHT: u32 = 168;
/// Largest accepted display side for scaled layouts.
pub const MAX_DISPLAY_SIDE: u32 = 4096;

// Region rectangles (x, y, width, height)
pub const MOOD_ICON_RECT: (i32, i32, u32, u32) = (100, 5, 42, 42);
pub const TIME_RECT: (i32, i32, u32, u32) = (5, 56, 139, 50);
pub const WEATHER_RECT: (i32, i32, u32, u32) = (0, 115, 144, 25);
pub const STOCK_RECT: (i32, i32, u32, u32) = (0, 5, 100, 50);
pub const ALARM_RECT: (i32, i32, u32, u32) = (0, 140, 144, 25);

/// Size of the mood icons, square.
pub const MOOD_ICON_SIZE: u32 = 42;

// Placeholder text shown until the first update lands
pub const TIME_PLACEHOLDER: &str = "00:00";
pub const WEATHER_PLACEHOLDER: &str = "Loading...";
pub const STOCK_PLACEHOLDER: &str = "Loading.^.";
pub const ALARM_PLACEHOLDER: &str = "...";

// Text capacities in bytes, one less than the buffers the watch used
// so the terminator is accounted for
pub const TIME_LEN: usize = 5;
pub const TEMPERATURE_LEN: usize = 7;
pub const CONDITIONS_LEN: usize = 31;
pub const SYMBOL_LEN: usize = 7;
pub const PRICE_LEN: usize = 7;
pub const CHANGE_LEN: usize = 9;
pub const WEATHER_LINE_LEN: usize = 31;
pub const STOCK_LINE_LEN: usize = 31;
pub const STATUS_LINE_LEN: usize = 31;

// Message keys shared with the companion
pub const KEY_TEMPERATURE: u32 = 0;
pub const KEY_CONDITIONS: u32 = 1;
pub const KEY_SYMBOL: u32 = 2;
pub const KEY_CURRENT: u32 = 3;
pub const KEY_CHANGE: u32 = 4;
pub const KEY_FACE: u32 = 5;

/// Key and value of the refresh request sent to the companion.
pub const KEY_REFRESH_REQUEST: u32 = 0;
pub const REFRESH_REQUEST_VALUE: u8 = 0;

/// Minutes between refresh requests.
pub const DEFAULT_REFRESH_INTERVAL_MINS: u32 = 20;
