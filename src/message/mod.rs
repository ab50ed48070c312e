/*
 *  message/mod.rs
 *
 *  StockFace - worth the glance
 *  (c) 2020-26 Stuart Hunter
 *
 *  Messaging with the companion: payloads, wire codec and transport
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

pub mod payload;
pub mod decoder;
pub mod dictionary;
pub mod transport;
pub mod companion;

// Re-exports for convenience
pub use payload::{InboundField, InboundPayload, MessageKey, OutboundPayload, Tuple, TupleValue};
pub use decoder::{InboxDecoder, InboxUpdate};
pub use dictionary::DictionaryError;
pub use transport::{AppMessageResult, MessageTransport, SendError, TransportEvent};
pub use companion::{CompanionBridge, CompanionError};
