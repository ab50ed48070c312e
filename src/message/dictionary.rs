/*
 *  message/dictionary.rs
 *
 *  StockFace - worth the glance
 *  (c) 2020-26 Stuart Hunter
 *
 *  Byte dictionary wire codec used by the watch message transport
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

//! Layout: `count:u8` then `count` tuples of
//! `key:u32 LE, type:u8, length:u16 LE, data[length]`.
//!
//! | type | data                                   |
//! |------|----------------------------------------|
//! | 0    | byte array                             |
//! | 1    | c-string, NUL terminated, NUL counted  |
//! | 2    | unsigned int, 1/2/4 bytes LE           |
//! | 3    | signed int, 1/2/4 bytes LE             |

use thiserror::Error;

use crate::message::payload::{InboundPayload, MessageKey, OutboundPayload, Tuple, TupleValue};

const TYPE_BYTES: u8 = 0;
const TYPE_CSTRING: u8 = 1;
const TYPE_UINT: u8 = 2;
const TYPE_INT: u8 = 3;

const TUPLE_HEADER_LEN: usize = 7;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DictionaryError {
    #[error("empty buffer")]
    Empty,

    #[error("tuple {index} truncated: needs {needed} bytes, {available} left")]
    Truncated { index: usize, needed: usize, available: usize },

    #[error("tuple {index} has unknown type {kind}")]
    UnknownType { index: usize, kind: u8 },

    #[error("tuple {index} has integer width {width}, expected 1, 2 or 4")]
    BadIntWidth { index: usize, width: usize },

    #[error("{0} trailing bytes after the last tuple")]
    TrailingBytes(usize),

    #[error("too many tuples to encode: {0}")]
    TooManyTuples(usize),

    #[error("tuple for {key} too long: {len} bytes")]
    ValueTooLong { key: MessageKey, len: usize },
}

/// Decode a whole buffer. Any framing problem fails the lot.
pub fn decode(buf: &[u8]) -> Result<InboundPayload, DictionaryError> {
    let (&count, mut rest) = buf.split_first().ok_or(DictionaryError::Empty)?;
    let mut payload = InboundPayload::new();

    for index in 0..count as usize {
        if rest.len() < TUPLE_HEADER_LEN {
            return Err(DictionaryError::Truncated {
                index,
                needed: TUPLE_HEADER_LEN,
                available: rest.len(),
            });
        }
        let key = u32::from_le_bytes([rest[0], rest[1], rest[2], rest[3]]);
        let kind = rest[4];
        let len = u16::from_le_bytes([rest[5], rest[6]]) as usize;
        rest = &rest[TUPLE_HEADER_LEN..];

        if rest.len() < len {
            return Err(DictionaryError::Truncated { index, needed: len, available: rest.len() });
        }
        let (data, tail) = rest.split_at(len);
        rest = tail;

        let value = match kind {
            TYPE_BYTES => TupleValue::Bytes(data.to_vec()),
            TYPE_CSTRING => {
                let text = data.split(|&b| b == 0).next().unwrap_or(&[]);
                TupleValue::Text(String::from_utf8_lossy(text).into_owned())
            }
            TYPE_UINT => TupleValue::Int(read_uint(data, index)? as i32),
            TYPE_INT => TupleValue::Int(read_int(data, index)?),
            kind => return Err(DictionaryError::UnknownType { index, kind }),
        };
        payload.push(Tuple { key: MessageKey::from_id(key), value });
    }

    if !rest.is_empty() {
        return Err(DictionaryError::TrailingBytes(rest.len()));
    }
    Ok(payload)
}

fn read_uint(data: &[u8], index: usize) -> Result<u32, DictionaryError> {
    match *data {
        [a] => Ok(a as u32),
        [a, b] => Ok(u16::from_le_bytes([a, b]) as u32),
        [a, b, c, d] => Ok(u32::from_le_bytes([a, b, c, d])),
        _ => Err(DictionaryError::BadIntWidth { index, width: data.len() }),
    }
}

fn read_int(data: &[u8], index: usize) -> Result<i32, DictionaryError> {
    match *data {
        [a] => Ok(a as i8 as i32),
        [a, b] => Ok(i16::from_le_bytes([a, b]) as i32),
        [a, b, c, d] => Ok(i32::from_le_bytes([a, b, c, d])),
        _ => Err(DictionaryError::BadIntWidth { index, width: data.len() }),
    }
}

/// Encode tuples. Integers go out as 4 byte signed, text as c-strings.
pub fn encode(tuples: &[Tuple]) -> Result<Vec<u8>, DictionaryError> {
    let count = u8::try_from(tuples.len())
        .map_err(|_| DictionaryError::TooManyTuples(tuples.len()))?;
    let mut out = vec![count];

    for tuple in tuples {
        let (kind, data) = match &tuple.value {
            TupleValue::Int(v) => (TYPE_INT, v.to_le_bytes().to_vec()),
            TupleValue::Text(s) => {
                let mut bytes = s.as_bytes().to_vec();
                bytes.push(0);
                (TYPE_CSTRING, bytes)
            }
            TupleValue::Bytes(b) => (TYPE_BYTES, b.clone()),
        };
        let len = u16::try_from(data.len())
            .map_err(|_| DictionaryError::ValueTooLong { key: tuple.key, len: data.len() })?;
        write_header(&mut out, tuple.key.id(), kind, len);
        out.extend_from_slice(&data);
    }
    Ok(out)
}

/// The refresh request as a single `uint8` tuple.
pub fn encode_outbound(payload: &OutboundPayload) -> Vec<u8> {
    let mut out = vec![1];
    write_header(&mut out, payload.key, TYPE_UINT, 1);
    out.push(payload.value);
    out
}

fn write_header(out: &mut Vec<u8>, key: u32, kind: u8, len: u16) {
    out.extend_from_slice(&key.to_le_bytes());
    out.push(kind);
    out.extend_from_slice(&len.to_le_bytes());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outbound_bytes() {
        let bytes = encode_outbound(&OutboundPayload::refresh_request());
        assert_eq!(bytes, vec![1, 0, 0, 0, 0, 2, 1, 0, 0]);
    }

    #[test]
    fn test_decode_weather() {
        let buf = [
            2, //
            0, 0, 0, 0, 3, 1, 0, 0xF6, // temperature -10 as int8
            1, 0, 0, 0, 1, 5, 0, b'F', b'o', b'g', b'!', 0,
        ];
        let payload = decode(&buf).unwrap();
        let tuples = payload.tuples();
        assert_eq!(tuples[0], Tuple::new(MessageKey::Temperature, -10));
        assert_eq!(tuples[1], Tuple::new(MessageKey::Conditions, "Fog!"));
    }

    #[test]
    fn test_uint_widths() {
        let buf = [1, 5, 0, 0, 0, 2, 2, 0, 0x02, 0x01];
        let payload = decode(&buf).unwrap();
        assert_eq!(payload.tuples()[0], Tuple::new(MessageKey::Face, 258));

        let buf = [1, 5, 0, 0, 0, 2, 3, 0, 1, 2, 3];
        assert_eq!(
            decode(&buf),
            Err(DictionaryError::BadIntWidth { index: 0, width: 3 })
        );
    }

    #[test]
    fn test_unknown_key_survives_decoding() {
        let buf = [1, 99, 0, 0, 0, 3, 4, 0, 7, 0, 0, 0];
        let payload = decode(&buf).unwrap();
        assert_eq!(payload.tuples()[0].key, MessageKey::Unknown(99));
    }

    #[test]
    fn test_framing_errors() {
        assert_eq!(decode(&[]), Err(DictionaryError::Empty));
        assert!(matches!(
            decode(&[1, 0, 0, 0]),
            Err(DictionaryError::Truncated { index: 0, .. })
        ));
        assert!(matches!(
            decode(&[1, 2, 0, 0, 0, 1, 9, 0, b'a']),
            Err(DictionaryError::Truncated { index: 0, needed: 9, available: 1 })
        ));
        assert_eq!(
            decode(&[1, 2, 0, 0, 0, 7, 0, 0]),
            Err(DictionaryError::UnknownType { index: 0, kind: 7 })
        );
        assert_eq!(decode(&[0, 1, 2]), Err(DictionaryError::TrailingBytes(2)));
    }

    #[test]
    fn test_encode_then_decode() {
        let tuples = vec![
            Tuple::new(MessageKey::Symbol, "ABC"),
            Tuple::new(MessageKey::CurrentPrice, "101.5"),
            Tuple::new(MessageKey::Face, 2),
        ];
        let bytes = encode(&tuples).unwrap();
        let payload = decode(&bytes).unwrap();
        assert_eq!(payload.tuples(), tuples.as_slice());
    }

    #[test]
    fn test_lossy_text() {
        let buf = [1, 1, 0, 0, 0, 1, 3, 0, 0xff, b'a', 0];
        let payload = decode(&buf).unwrap();
        assert_eq!(payload.tuples()[0].value, TupleValue::Text("\u{fffd}a".into()));
    }
}
