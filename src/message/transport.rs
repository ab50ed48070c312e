/*
 *  message/transport.rs
 *
 *  StockFace - worth the glance
 *  (c) 2020-26 Stuart Hunter
 *
 *  Transport seam, reason codes and transport events
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
use thiserror::Error;

use crate::message::payload::{InboundPayload, OutboundPayload};

/// Reason codes reported by the message transport.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AppMessageResult {
    Ok,
    SendTimeout,
    SendRejected,
    NotConnected,
    AppNotRunning,
    InvalidArgs,
    Busy,
    BufferOverflow,
    AlreadyReleased,
    CallbackAlreadyRegistered,
    CallbackNotRegistered,
    OutOfMemory,
    Closed,
    InternalError,
    InvalidState,
}

impl AppMessageResult {
    /// Unknown codes read as `InternalError`.
    pub fn from_code(code: u32) -> Self {
        match code {
            0 => AppMessageResult::Ok,
            2 => AppMessageResult::SendTimeout,
            4 => AppMessageResult::SendRejected,
            8 => AppMessageResult::NotConnected,
            16 => AppMessageResult::AppNotRunning,
            32 => AppMessageResult::InvalidArgs,
            64 => AppMessageResult::Busy,
            128 => AppMessageResult::BufferOverflow,
            512 => AppMessageResult::AlreadyReleased,
            1024 => AppMessageResult::CallbackAlreadyRegistered,
            2048 => AppMessageResult::CallbackNotRegistered,
            4096 => AppMessageResult::OutOfMemory,
            8192 => AppMessageResult::Closed,
            32768 => AppMessageResult::InvalidState,
            _ => AppMessageResult::InternalError,
        }
    }

    pub fn code(&self) -> u32 {
        match self {
            AppMessageResult::Ok => 0,
            AppMessageResult::SendTimeout => 2,
            AppMessageResult::SendRejected => 4,
            AppMessageResult::NotConnected => 8,
            AppMessageResult::AppNotRunning => 16,
            AppMessageResult::InvalidArgs => 32,
            AppMessageResult::Busy => 64,
            AppMessageResult::BufferOverflow => 128,
            AppMessageResult::AlreadyReleased => 512,
            AppMessageResult::CallbackAlreadyRegistered => 1024,
            AppMessageResult::CallbackNotRegistered => 2048,
            AppMessageResult::OutOfMemory => 4096,
            AppMessageResult::Closed => 8192,
            AppMessageResult::InternalError => 16384,
            AppMessageResult::InvalidState => 32768,
        }
    }
}

impl fmt::Display for AppMessageResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            AppMessageResult::Ok => "ok",
            AppMessageResult::SendTimeout => "send timeout",
            AppMessageResult::SendRejected => "send rejected",
            AppMessageResult::NotConnected => "not connected",
            AppMessageResult::AppNotRunning => "app not running",
            AppMessageResult::InvalidArgs => "invalid arguments",
            AppMessageResult::Busy => "busy",
            AppMessageResult::BufferOverflow => "buffer overflow",
            AppMessageResult::AlreadyReleased => "already released",
            AppMessageResult::CallbackAlreadyRegistered => "callback already registered",
            AppMessageResult::CallbackNotRegistered => "callback not registered",
            AppMessageResult::OutOfMemory => "out of memory",
            AppMessageResult::Closed => "closed",
            AppMessageResult::InternalError => "internal error",
            AppMessageResult::InvalidState => "invalid state",
        };
        write!(f, "{} ({})", name, self.code())
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("outbox send failed: {reason}")]
pub struct SendError {
    pub reason: AppMessageResult,
}

impl SendError {
    pub fn new(reason: AppMessageResult) -> Self {
        Self { reason }
    }
}

/// Callbacks the transport delivers to the face, in arrival order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransportEvent {
    Received(InboundPayload),
    Dropped(AppMessageResult),
    SendFailed(AppMessageResult),
    Sent,
}

/// Outbound half of the message transport.
pub trait MessageTransport {
    /// Queue one payload. Delivery outcome arrives later as a
    /// `Sent` or `SendFailed` event.
    fn outbox_send(&mut self, payload: &OutboundPayload) -> Result<(), SendError>;
}

/// Ask the companion for fresh data. Failure is the caller's to log.
pub fn send_refresh_request<T: MessageTransport + ?Sized>(transport: &mut T) -> Result<(), SendError> {
    transport.outbox_send(&OutboundPayload::refresh_request())
}
