/*
 *  message/payload.rs
 *
 *  StockFace - worth the glance
 *  (c) 2020-26 Stuart Hunter
 *
 *  Key tagged payloads exchanged with the companion
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

use std::fmt;

use crate::constants::{
    KEY_CHANGE, KEY_CONDITIONS, KEY_CURRENT, KEY_FACE, KEY_REFRESH_REQUEST, KEY_SYMBOL,
    KEY_TEMPERATURE, REFRESH_REQUEST_VALUE,
};

/// Keys the companion may send, plus whatever else shows up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MessageKey {
    Temperature,
    Conditions,
    Symbol,
    CurrentPrice,
    Change,
    Face,
    Unknown(u32),
}

impl MessageKey {
    pub fn from_id(id: u32) -> Self {
        match id {
            KEY_TEMPERATURE => MessageKey::Temperature,
            KEY_CONDITIONS => MessageKey::Conditions,
            KEY_SYMBOL => MessageKey::Symbol,
            KEY_CURRENT => MessageKey::CurrentPrice,
            KEY_CHANGE => MessageKey::Change,
            KEY_FACE => MessageKey::Face,
            other => MessageKey::Unknown(other),
        }
    }

    /// Companion side name, `None` for unknown keys.
    pub fn from_name(name: &str) -> Option<Self> {
        let key = match name {
            "KEY_TEMPERATURE" => MessageKey::Temperature,
            "KEY_CONDITIONS" => MessageKey::Conditions,
            "KEY_SYMBOL" => MessageKey::Symbol,
            "KEY_CURRENT" => MessageKey::CurrentPrice,
            "KEY_CHANGE" => MessageKey::Change,
            "KEY_FACE" => MessageKey::Face,
            _ => return None,
        };
        Some(key)
    }

    pub fn id(&self) -> u32 {
        match self {
            MessageKey::Temperature => KEY_TEMPERATURE,
            MessageKey::Conditions => KEY_CONDITIONS,
            MessageKey::Symbol => KEY_SYMBOL,
            MessageKey::CurrentPrice => KEY_CURRENT,
            MessageKey::Change => KEY_CHANGE,
            MessageKey::Face => KEY_FACE,
            MessageKey::Unknown(id) => *id,
        }
    }

    /// Integer keys carry numbers, the rest carry text.
    pub fn expects_int(&self) -> bool {
        matches!(self, MessageKey::Temperature | MessageKey::Face)
    }
}

impl fmt::Display for MessageKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MessageKey::Temperature => f.write_str("KEY_TEMPERATURE"),
            MessageKey::Conditions => f.write_str("KEY_CONDITIONS"),
            MessageKey::Symbol => f.write_str("KEY_SYMBOL"),
            MessageKey::CurrentPrice => f.write_str("KEY_CURRENT"),
            MessageKey::Change => f.write_str("KEY_CHANGE"),
            MessageKey::Face => f.write_str("KEY_FACE"),
            MessageKey::Unknown(id) => write!(f, "key {}", id),
        }
    }
}

/// Value carried by one tuple.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TupleValue {
    Int(i32),
    Text(String),
    Bytes(Vec<u8>),
}

impl TupleValue {
    /// Integer view, parsing text as decimal.
    pub fn as_int(&self) -> Option<i32> {
        match self {
            TupleValue::Int(v) => Some(*v),
            TupleValue::Text(s) => s.trim().parse().ok(),
            TupleValue::Bytes(_) => None,
        }
    }

    /// Text view, rendering integers in decimal.
    pub fn as_text(&self) -> Option<String> {
        match self {
            TupleValue::Int(v) => Some(v.to_string()),
            TupleValue::Text(s) => Some(s.clone()),
            TupleValue::Bytes(_) => None,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            TupleValue::Int(_) => "int",
            TupleValue::Text(_) => "text",
            TupleValue::Bytes(_) => "bytes",
        }
    }
}

impl From<i32> for TupleValue {
    fn from(v: i32) -> Self {
        TupleValue::Int(v)
    }
}

impl From<&str> for TupleValue {
    fn from(v: &str) -> Self {
        TupleValue::Text(v.to_string())
    }
}

impl From<String> for TupleValue {
    fn from(v: String) -> Self {
        TupleValue::Text(v)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tuple {
    pub key: MessageKey,
    pub value: TupleValue,
}

impl Tuple {
    pub fn new(key: MessageKey, value: impl Into<TupleValue>) -> Self {
        Self { key, value: value.into() }
    }
}

/// Typed view of one inbound tuple, after coercion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InboundField {
    Temperature(i32),
    Conditions(String),
    Symbol(String),
    CurrentPrice(String),
    Change(String),
    Mood(i32),
    Unknown { key: u32 },
    Mismatch { key: MessageKey, found: &'static str },
}

impl From<&Tuple> for InboundField {
    fn from(tuple: &Tuple) -> Self {
        let key = tuple.key;
        let mismatch = || InboundField::Mismatch { key, found: tuple.value.kind() };
        let text = |make: fn(String) -> InboundField| {
            tuple.value.as_text().map(make).unwrap_or_else(mismatch)
        };

        match key {
            MessageKey::Temperature => tuple
                .value
                .as_int()
                .map(InboundField::Temperature)
                .unwrap_or_else(mismatch),
            MessageKey::Face => tuple
                .value
                .as_int()
                .map(InboundField::Mood)
                .unwrap_or_else(mismatch),
            MessageKey::Conditions => text(InboundField::Conditions),
            MessageKey::Symbol => text(InboundField::Symbol),
            MessageKey::CurrentPrice => text(InboundField::CurrentPrice),
            MessageKey::Change => text(InboundField::Change),
            MessageKey::Unknown(id) => InboundField::Unknown { key: id },
        }
    }
}

/// Inbound payload, tuples in the order they arrived.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InboundPayload {
    tuples: Vec<Tuple>,
}

impl InboundPayload {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: append a tuple
    pub fn with(mut self, key: MessageKey, value: impl Into<TupleValue>) -> Self {
        self.push(Tuple::new(key, value));
        self
    }

    pub fn push(&mut self, tuple: Tuple) {
        self.tuples.push(tuple);
    }

    pub fn iter(&self) -> impl Iterator<Item = &Tuple> {
        self.tuples.iter()
    }

    pub fn len(&self) -> usize {
        self.tuples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tuples.is_empty()
    }

    pub fn tuples(&self) -> &[Tuple] {
        &self.tuples
    }
}

impl FromIterator<Tuple> for InboundPayload {
    fn from_iter<I: IntoIterator<Item = Tuple>>(iter: I) -> Self {
        Self { tuples: iter.into_iter().collect() }
    }
}

impl<'a> IntoIterator for &'a InboundPayload {
    type Item = &'a Tuple;
    type IntoIter = std::slice::Iter<'a, Tuple>;

    fn into_iter(self) -> Self::IntoIter {
        self.tuples.iter()
    }
}

/// The refresh request, a single `uint8` tuple.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutboundPayload {
    pub key: u32,
    pub value: u8,
}

impl OutboundPayload {
    pub fn refresh_request() -> Self {
        Self {
            key: KEY_REFRESH_REQUEST,
            value: REFRESH_REQUEST_VALUE,
        }
    }
}

impl Default for OutboundPayload {
    fn default() -> Self {
        Self::refresh_request()
    }
}
