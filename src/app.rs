/*
 *  app.rs
 *
 *  StockFace - worth the glance
 *  (c) 2020-26 Stuart Hunter
 *
 *  Event handlers tying ticks and transport events to the face
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

use chrono::Timelike;
use log::{debug, error, info};

use crate::clock::{format_clock, ClockPreference};
use crate::display::manager::WatchFace;
use crate::message::decoder::InboxDecoder;
use crate::message::transport::{send_refresh_request, MessageTransport, TransportEvent};
use crate::tick::{TickDriver, TickOutcome};

/// Counters kept for logging and tests
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AppStats {
    pub received: u64,
    pub dropped: u64,
    pub requests: u64,
    pub send_failed: u64,
    pub sent: u64,
}

/// The watch face application
///
/// One owned struct holds all UI state. Every handler runs to completion
/// on the caller's thread, in the order events are delivered.
pub struct WatchFaceApp<T: MessageTransport, P: ClockPreference> {
    face: WatchFace,
    decoder: InboxDecoder,
    ticks: TickDriver,
    transport: T,
    preference: P,
    stats: AppStats,
}

impl<T: MessageTransport, P: ClockPreference> WatchFaceApp<T, P> {
    pub fn new(face: WatchFace, transport: T, preference: P, refresh_interval_mins: u32) -> Self {
        Self {
            face,
            decoder: InboxDecoder::new(),
            ticks: TickDriver::new(refresh_interval_mins),
            transport,
            preference,
            stats: AppStats::default(),
        }
    }

    /// Load the face, subscribe to ticks and show the time right away.
    pub fn start<Tm: Timelike>(&mut self, now: &Tm) {
        self.face.load();
        self.ticks.subscribe();
        self.refresh_clock(now);
        info!(
            "watch face started, refresh every {} minutes",
            self.ticks.interval_mins()
        );
    }

    /// Minute tick handler
    pub fn on_tick<Tm: Timelike>(&mut self, now: &Tm) -> TickOutcome {
        let outcome = self.ticks.on_minute(now);
        if outcome.refresh_clock {
            self.refresh_clock(now);
        }
        if outcome.request_refresh {
            self.request_refresh();
        }
        outcome
    }

    pub fn on_transport_event(&mut self, event: TransportEvent) {
        match event {
            TransportEvent::Received(payload) => {
                self.stats.received += 1;
                let update = self.decoder.decode(&payload);
                self.face.apply_inbox(&update);
            }
            TransportEvent::Dropped(reason) => {
                self.stats.dropped += 1;
                error!("Message dropped! ({})", reason);
            }
            TransportEvent::SendFailed(reason) => {
                self.stats.send_failed += 1;
                error!("Outbox send failed! ({})", reason);
            }
            TransportEvent::Sent => {
                self.stats.sent += 1;
                info!("Outbox send success!");
            }
        }
    }

    /// Ask the companion for fresh weather and quote. Failures are only logged.
    pub fn request_refresh(&mut self) {
        self.stats.requests += 1;
        match send_refresh_request(&mut self.transport) {
            Ok(()) => debug!("refresh request queued"),
            Err(e) => {
                self.stats.send_failed += 1;
                error!("Outbox send failed! ({})", e.reason);
            }
        }
    }

    /// Cancel the tick subscription and release the face.
    pub fn stop(&mut self) {
        self.ticks.unsubscribe();
        self.face.unload();
        info!("watch face stopped after {} ticks, {:?}", self.ticks.ticks(), self.stats);
    }

    pub fn is_running(&self) -> bool {
        self.ticks.is_subscribed()
    }

    pub fn face(&self) -> &WatchFace {
        &self.face
    }

    pub fn face_mut(&mut self) -> &mut WatchFace {
        &mut self.face
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }

    pub fn stats(&self) -> AppStats {
        self.stats
    }

    fn refresh_clock<Tm: Timelike>(&mut self, now: &Tm) {
        let text = format_clock(now, self.preference.is_24h_style());
        self.face.set_time(text);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::ResourceId;
    use crate::clock::FixedClockPreference;
    use crate::display::layout::FaceLayout;
    use crate::message::payload::{InboundPayload, MessageKey, OutboundPayload};
    use crate::message::transport::{AppMessageResult, SendError};
    use chrono::NaiveTime;

    #[derive(Default)]
    struct RecordingTransport {
        sent: Vec<OutboundPayload>,
        fail_with: Option<AppMessageResult>,
    }

    impl MessageTransport for RecordingTransport {
        fn outbox_send(&mut self, payload: &OutboundPayload) -> Result<(), SendError> {
            if let Some(reason) = self.fail_with {
                return Err(SendError::new(reason));
            }
            self.sent.push(*payload);
            Ok(())
        }
    }

    fn app(is_24h: bool) -> WatchFaceApp<RecordingTransport, FixedClockPreference> {
        WatchFaceApp::new(
            WatchFace::new(FaceLayout::default()),
            RecordingTransport::default(),
            FixedClockPreference(is_24h),
            20,
        )
    }

    fn at(hour: u32, minute: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(hour, minute, 0).unwrap()
    }

    #[test]
    fn test_start_shows_time_immediately() {
        let mut app = app(true);
        app.start(&at(14, 7));
        assert!(app.is_running());
        assert_eq!(app.face().state().unwrap().time_text, "14:07");
        assert!(app.transport().sent.is_empty());
    }

    #[test]
    fn test_twelve_hour_preference() {
        let mut app = app(false);
        app.start(&at(14, 7));
        assert_eq!(app.face().state().unwrap().time_text, "02:07");
    }

    #[test]
    fn test_refresh_requests_on_schedule() {
        let mut app = app(true);
        app.start(&at(9, 0));

        for minute in [5, 19, 21] {
            app.on_tick(&at(9, minute));
        }
        assert!(app.transport().sent.is_empty());

        for (n, minute) in [20, 40, 0].into_iter().enumerate() {
            app.on_tick(&at(10, minute));
            assert_eq!(app.transport().sent.len(), n + 1);
        }
        assert!(app.transport().sent.iter().all(|p| *p == OutboundPayload { key: 0, value: 0 }));
        assert_eq!(app.face().state().unwrap().time_text, "10:00");
    }

    #[test]
    fn test_send_failure_is_only_logged() {
        let mut app = app(true);
        app.start(&at(9, 0));
        app.transport_mut().fail_with = Some(AppMessageResult::Busy);
        app.on_tick(&at(9, 20));
        assert_eq!(app.stats().send_failed, 1);
        assert!(app.is_running());
        assert_eq!(app.face().state().unwrap().time_text, "09:20");
    }

    #[test]
    fn test_received_payload_updates_face() {
        let mut app = app(true);
        app.start(&at(9, 0));
        app.on_transport_event(TransportEvent::Received(
            InboundPayload::new()
                .with(MessageKey::Temperature, 72)
                .with(MessageKey::Conditions, "Cloudy")
                .with(MessageKey::Face, 2),
        ));
        let state = app.face().state().unwrap();
        assert_eq!(state.weather_text, "72C, Cloudy");
        assert_eq!(state.stock_text, "Loading.^.");
        assert_eq!(state.mood_icon, ResourceId::ImageStockUp);
        assert_eq!(state.status_text, "$$$$$$$$$$$$$$$$");
    }

    #[test]
    fn test_dropped_and_send_events_leave_state() {
        let mut app = app(true);
        app.start(&at(9, 0));
        let before = app.face().state();
        app.on_transport_event(TransportEvent::Dropped(AppMessageResult::BufferOverflow));
        app.on_transport_event(TransportEvent::SendFailed(AppMessageResult::NotConnected));
        app.on_transport_event(TransportEvent::Sent);
        assert_eq!(app.face().state(), before);
        let stats = app.stats();
        assert_eq!((stats.dropped, stats.send_failed, stats.sent), (1, 1, 1));
    }

    #[test]
    fn test_stop_cancels_ticks_and_releases() {
        let mut app = app(true);
        app.start(&at(9, 0));
        app.stop();
        assert!(!app.is_running());
        assert_eq!(app.face().resources().live_count(), 0);

        let outcome = app.on_tick(&at(9, 20));
        assert_eq!(outcome, TickOutcome::default());
        assert!(app.transport().sent.is_empty());
    }
}
