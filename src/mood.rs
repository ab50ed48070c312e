/*
 *  mood.rs
 *
 *  StockFace - worth the glance
 *  (c) 2020-26 Stuart Hunter
 *
 *  Mood selection from the companion's face flag
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
use std::fmt;

/// Stock mood shown by the icon in the top right corner.
///
/// The companion sends a small integer flag:
/// - `0` price moved up a little, happy face, "Keep up!"
/// - `1` price moved down a little, sad face, "God bless"
/// - `2` price rose 5% or more, stock-up face, sixteen dollar signs
/// - anything else, including `3` and negatives, price fell 5% or more,
///   stock-down face, "TAT, farewell"
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mood {
    NeutralUp,
    NeutralDown,
    BigUp,
    BigDown,
}

impl Mood {
    pub const ALL: [Mood; 4] = [Mood::NeutralUp, Mood::NeutralDown, Mood::BigUp, Mood::BigDown];

    pub fn from_flag(flag: i32) -> Self {
        match flag {
            0 => Mood::NeutralUp,
            1 => Mood::NeutralDown,
            2 => Mood::BigUp,
            _ => Mood::BigDown,
        }
    }

    /// Flag the companion uses for this mood.
    pub fn flag(&self) -> i32 {
        match self {
            Mood::NeutralUp => 0,
            Mood::NeutralDown => 1,
            Mood::BigUp => 2,
            Mood::BigDown => 3,
        }
    }

    pub fn icon(&self) -> ResourceId {
        match self {
            Mood::NeutralUp => ResourceId::ImageHappy,
            Mood::NeutralDown => ResourceId::ImageSad,
            Mood::BigUp => ResourceId::ImageStockUp,
            Mood::BigDown => ResourceId::ImageStockDown,
        }
    }

    pub fn caption(&self) -> &'static str {
        match self {
            Mood::NeutralUp => "Keep up!",
            Mood::NeutralDown => "God bless",
            Mood::BigUp => "$$$$$$$$$$$$$$$$",
            Mood::BigDown => "TAT, farewell",
        }
    }
}

impl fmt::Display for Mood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Mood::NeutralUp => "neutral-up",
            Mood::NeutralDown => "neutral-down",
            Mood::BigUp => "big-up",
            Mood::BigDown => "big-down",
        };
        f.write_str(name)
    }
}
