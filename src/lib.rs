/*
 *  lib.rs
 *
 *  StockFace - worth the glance
 *  (c) 2020-26 Stuart Hunter
 *
 *  Clock, weather, stock quote and mood on one small monochrome face
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

pub mod app;
pub mod assets;
pub mod bounded;
pub mod clock;
pub mod config;
pub mod constants;
pub mod display;
pub mod message;
pub mod mood;
pub mod tick;

pub use app::{AppStats, WatchFaceApp};
pub use display::WatchFace;
pub use mood::Mood;
