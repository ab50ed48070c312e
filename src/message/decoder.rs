/*
 *  message/decoder.rs
 *
 *  StockFace - worth the glance
 *  (c) 2020-26 Stuart Hunter
 *
 *  Inbound payload decoding into display lines
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

use log::{debug, error, info, warn};

use crate::bounded::BoundedText;
use crate::constants::{
    CHANGE_LEN, CONDITIONS_LEN, PRICE_LEN, STOCK_LINE_LEN, SYMBOL_LEN, TEMPERATURE_LEN,
    WEATHER_LINE_LEN,
};
use crate::message::payload::{InboundField, InboundPayload};
use crate::mood::Mood;

pub type WeatherLine = BoundedText<WEATHER_LINE_LEN>;
pub type StockLine = BoundedText<STOCK_LINE_LEN>;

/// Result of decoding one payload.
///
/// Lines are `None` while none of their fields has ever been received,
/// so the placeholder stays up. `mood` is only set when the payload
/// carried a usable flag.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InboxUpdate {
    pub weather_line: Option<WeatherLine>,
    pub stock_line: Option<StockLine>,
    pub mood: Option<Mood>,
    pub unrecognized: usize,
    pub mismatched: usize,
}

/// Holds the last value of every field so partial payloads only
/// overwrite what they carry.
#[derive(Debug, Clone, Default)]
pub struct InboxDecoder {
    temperature: Option<BoundedText<TEMPERATURE_LEN>>,
    conditions: Option<BoundedText<CONDITIONS_LEN>>,
    symbol: Option<BoundedText<SYMBOL_LEN>>,
    current: Option<BoundedText<PRICE_LEN>>,
    change: Option<BoundedText<CHANGE_LEN>>,
}

impl InboxDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply every pair of `payload` in order, then compose both lines.
    pub fn decode(&mut self, payload: &InboundPayload) -> InboxUpdate {
        let mut update = InboxUpdate::default();

        for tuple in payload {
            match InboundField::from(tuple) {
                InboundField::Temperature(degrees) => {
                    self.temperature = Some(BoundedText::from_fmt(format_args!("{}C", degrees)));
                }
                InboundField::Conditions(text) => {
                    self.conditions = Some(BoundedText::from_truncated(&text));
                }
                InboundField::Symbol(text) => {
                    self.symbol = Some(BoundedText::from_truncated(&text));
                }
                InboundField::CurrentPrice(text) => {
                    self.current = Some(BoundedText::from_truncated(&text));
                }
                InboundField::Change(text) => {
                    self.change = Some(BoundedText::from_truncated(&text));
                }
                InboundField::Mood(flag) => {
                    info!("flag received: {}", flag);
                    update.mood = Some(Mood::from_flag(flag));
                }
                InboundField::Unknown { key } => {
                    error!("Key {} not recognized!", key);
                    update.unrecognized += 1;
                }
                InboundField::Mismatch { key, found } => {
                    warn!("{} carried an unusable {} value, ignored", key, found);
                    update.mismatched += 1;
                }
            }
        }

        update.weather_line = self.weather_line();
        update.stock_line = self.stock_line();
        debug!("decoded {} tuples: {:?}", payload.len(), update);
        update
    }

    /// "<temperature>, <conditions>"
    pub fn weather_line(&self) -> Option<WeatherLine> {
        if self.temperature.is_none() && self.conditions.is_none() {
            return None;
        }
        Some(WeatherLine::from_fmt(format_args!(
            "{}, {}",
            text_or_empty(&self.temperature),
            text_or_empty(&self.conditions),
        )))
    }

    /// "<symbol> <change>\n<price>"
    pub fn stock_line(&self) -> Option<StockLine> {
        if self.symbol.is_none() && self.change.is_none() && self.current.is_none() {
            return None;
        }
        Some(StockLine::from_fmt(format_args!(
            "{} {}\n{}",
            text_or_empty(&self.symbol),
            text_or_empty(&self.change),
            text_or_empty(&self.current),
        )))
    }
}

fn text_or_empty<const N: usize>(field: &Option<BoundedText<N>>) -> &str {
    field.as_ref().map(|t| t.as_str()).unwrap_or("")
}
