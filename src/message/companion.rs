/*
 *  message/companion.rs
 *
 *  StockFace - worth the glance
 *  (c) 2020-26 Stuart Hunter
 *
 *  JSON lines bridge to the companion process for desktop runs
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

use log::{debug, warn};
use serde_json::{Map, Value};
use std::collections::VecDeque;
use std::io::Write;
use thiserror::Error;

use crate::message::dictionary;
use crate::message::payload::{InboundPayload, MessageKey, OutboundPayload, Tuple, TupleValue};
use crate::message::transport::{AppMessageResult, MessageTransport, SendError, TransportEvent};

/// Id given to key names the face does not know.
pub const UNNAMED_KEY: u32 = u32::MAX;

#[derive(Debug, Error)]
pub enum CompanionError {
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("expected a JSON object, got {0}")]
    NotAnObject(&'static str),
}

/// Parse one inbox line: `{"0": 72, "KEY_CONDITIONS": "Cloudy"}`.
///
/// Keys are numeric ids or `KEY_*` names. Numbers that fit an i32 become
/// integers, other numbers and strings become text. Any other JSON value
/// is kept as raw bytes so the decoder rejects that pair alone.
pub fn parse_inbox_line(line: &str) -> Result<InboundPayload, CompanionError> {
    let value: Value = serde_json::from_str(line)?;
    let map = match value {
        Value::Object(map) => map,
        other => return Err(CompanionError::NotAnObject(json_kind(&other))),
    };

    Ok(map
        .into_iter()
        .map(|(name, value)| Tuple {
            key: parse_key(&name),
            value: to_tuple_value(value),
        })
        .collect())
}

fn parse_key(name: &str) -> MessageKey {
    let name = name.trim();
    if let Ok(id) = name.parse::<u32>() {
        return MessageKey::from_id(id);
    }
    MessageKey::from_name(name).unwrap_or_else(|| {
        warn!("inbox key name {:?} not recognized", name);
        MessageKey::Unknown(UNNAMED_KEY)
    })
}

fn to_tuple_value(value: Value) -> TupleValue {
    match value {
        Value::Number(n) => match n.as_i64().and_then(|v| i32::try_from(v).ok()) {
            Some(v) => TupleValue::Int(v),
            None => TupleValue::Text(n.to_string()),
        },
        Value::String(s) => TupleValue::Text(s),
        other => TupleValue::Bytes(other.to_string().into_bytes()),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Line oriented transport to the companion.
///
/// Inbound lines are queued as transport events. Outbound requests are
/// written as one JSON line each. The outbox holds a single message: it
/// stays busy until the `Sent` acknowledgement has been drained.
pub struct CompanionBridge<W: Write> {
    outbox: W,
    busy: bool,
    pending: VecDeque<TransportEvent>,
    lines_in: u64,
    lines_out: u64,
}

impl<W: Write> CompanionBridge<W> {
    pub fn new(outbox: W) -> Self {
        Self {
            outbox,
            busy: false,
            pending: VecDeque::new(),
            lines_in: 0,
            lines_out: 0,
        }
    }

    /// Queue the event for one inbox line. Blank lines are skipped.
    pub fn push_inbox_line(&mut self, line: &str) {
        let line = line.trim();
        if line.is_empty() {
            return;
        }
        self.lines_in += 1;
        let event = match parse_inbox_line(line) {
            Ok(payload) => TransportEvent::Received(payload),
            Err(e) => {
                debug!("inbox line {} rejected: {}", self.lines_in, e);
                TransportEvent::Dropped(AppMessageResult::InvalidArgs)
            }
        };
        self.pending.push_back(event);
    }

    /// Queue the event for one raw dictionary buffer. Broken framing drops
    /// the whole message.
    pub fn push_inbox_bytes(&mut self, buf: &[u8]) {
        self.lines_in += 1;
        let event = match dictionary::decode(buf) {
            Ok(payload) => TransportEvent::Received(payload),
            Err(e) => {
                debug!("inbox buffer {} rejected: {}", self.lines_in, e);
                TransportEvent::Dropped(AppMessageResult::InvalidArgs)
            }
        };
        self.pending.push_back(event);
    }

    /// The inbox went away, report it like the watch would.
    pub fn inbox_closed(&mut self) {
        self.pending.push_back(TransportEvent::Dropped(AppMessageResult::Closed));
    }

    /// Take every queued event in arrival order. Draining the send
    /// acknowledgement frees the outbox.
    pub fn drain_events(&mut self) -> Vec<TransportEvent> {
        let events: Vec<TransportEvent> = self.pending.drain(..).collect();
        if events
            .iter()
            .any(|e| matches!(e, TransportEvent::Sent | TransportEvent::SendFailed(_)))
        {
            self.busy = false;
        }
        events
    }

    pub fn is_busy(&self) -> bool {
        self.busy
    }

    pub fn lines_out(&self) -> u64 {
        self.lines_out
    }

    pub fn outbox(&self) -> &W {
        &self.outbox
    }

    fn write_line(&mut self, payload: &OutboundPayload) -> std::io::Result<()> {
        let mut map = Map::new();
        map.insert(payload.key.to_string(), Value::from(payload.value));
        serde_json::to_writer(&mut self.outbox, &Value::Object(map))?;
        self.outbox.write_all(b"\n")?;
        self.outbox.flush()
    }
}

impl<W: Write> MessageTransport for CompanionBridge<W> {
    fn outbox_send(&mut self, payload: &OutboundPayload) -> Result<(), SendError> {
        if self.busy {
            return Err(SendError::new(AppMessageResult::Busy));
        }
        self.busy = true;
        match self.write_line(payload) {
            Ok(()) => {
                self.lines_out += 1;
                self.pending.push_back(TransportEvent::Sent);
            }
            Err(e) => {
                warn!("companion outbox write failed: {}", e);
                self.pending.push_back(TransportEvent::SendFailed(AppMessageResult::NotConnected));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_numeric_and_named_keys() {
        let payload = parse_inbox_line(r#"{"0": 72, "KEY_CONDITIONS": "Cloudy"}"#).unwrap();
        assert_eq!(payload.len(), 2);
        assert!(payload.iter().any(|t| *t == Tuple::new(MessageKey::Temperature, 72)));
        assert!(payload.iter().any(|t| *t == Tuple::new(MessageKey::Conditions, "Cloudy")));
    }

    #[test]
    fn test_unknown_keys() {
        let payload = parse_inbox_line(r#"{"99": 1, "KEY_VOLUME": 2}"#).unwrap();
        let keys: Vec<_> = payload.iter().map(|t| t.key).collect();
        assert!(keys.contains(&MessageKey::Unknown(99)));
        assert!(keys.contains(&MessageKey::Unknown(UNNAMED_KEY)));
    }

    #[test]
    fn test_odd_values() {
        let payload = parse_inbox_line(r#"{"3": 101.5, "5": true}"#).unwrap();
        let price = payload.iter().find(|t| t.key == MessageKey::CurrentPrice).unwrap();
        assert_eq!(price.value, TupleValue::Text("101.5".into()));
        let face = payload.iter().find(|t| t.key == MessageKey::Face).unwrap();
        assert_eq!(face.value, TupleValue::Bytes(b"true".to_vec()));
    }

    #[test]
    fn test_bad_lines_are_dropped() {
        assert!(matches!(parse_inbox_line("[1, 2]"), Err(CompanionError::NotAnObject("an array"))));
        assert!(matches!(parse_inbox_line("{nope"), Err(CompanionError::Json(_))));

        let mut bridge = CompanionBridge::new(Vec::new());
        bridge.push_inbox_line("not json");
        bridge.push_inbox_line("   ");
        bridge.push_inbox_line(r#"{"5": 2}"#);
        let events = bridge.drain_events();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0], TransportEvent::Dropped(AppMessageResult::InvalidArgs));
        assert!(matches!(events[1], TransportEvent::Received(_)));
    }

    #[test]
    fn test_dictionary_buffers() {
        let good = dictionary::encode(&[Tuple::new(MessageKey::Face, 2)]).unwrap();
        let mut bridge = CompanionBridge::new(Vec::new());
        bridge.push_inbox_bytes(&[1, 0, 0, 0]);
        bridge.push_inbox_bytes(&[]);
        bridge.push_inbox_bytes(&good);
        let events = bridge.drain_events();
        assert_eq!(events.len(), 3);
        assert_eq!(events[0], TransportEvent::Dropped(AppMessageResult::InvalidArgs));
        assert_eq!(events[1], TransportEvent::Dropped(AppMessageResult::InvalidArgs));
        assert_eq!(
            events[2],
            TransportEvent::Received(InboundPayload::new().with(MessageKey::Face, 2))
        );
    }

    #[test]
    fn test_outbound_line() {
        let mut bridge = CompanionBridge::new(Vec::new());
        bridge.outbox_send(&OutboundPayload::refresh_request()).unwrap();
        assert_eq!(bridge.outbox().as_slice(), b"{\"0\":0}\n");
        assert_eq!(bridge.drain_events(), vec![TransportEvent::Sent]);
    }

    #[test]
    fn test_busy_until_acknowledged() {
        let mut bridge = CompanionBridge::new(Vec::new());
        let request = OutboundPayload::refresh_request();
        bridge.outbox_send(&request).unwrap();
        assert!(bridge.is_busy());
        assert_eq!(
            bridge.outbox_send(&request),
            Err(SendError::new(AppMessageResult::Busy))
        );

        bridge.drain_events();
        assert!(!bridge.is_busy());
        bridge.outbox_send(&request).unwrap();
        assert_eq!(bridge.lines_out(), 2);
    }

    struct BrokenPipe;

    impl Write for BrokenPipe {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "gone"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_write_failure_reported_as_event() {
        let mut bridge = CompanionBridge::new(BrokenPipe);
        bridge.outbox_send(&OutboundPayload::refresh_request()).unwrap();
        assert_eq!(
            bridge.drain_events(),
            vec![TransportEvent::SendFailed(AppMessageResult::NotConnected)]
        );
        assert!(!bridge.is_busy());
    }
}
