/*
 *  tick.rs
 *
 *  StockFace - worth the glance
 *  (c) 2020-26 Stuart Hunter
 *
 *  Minute tick subscription and refresh scheduling
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

use chrono::{DateTime, TimeZone, Timelike};
use std::time::Duration;

use crate::constants::DEFAULT_REFRESH_INTERVAL_MINS;

/// What a minute tick asks the face to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TickOutcome {
    pub refresh_clock: bool,
    pub request_refresh: bool,
}

/// Minute tick driver
///
/// Every delivered tick refreshes the clock. Ticks landing on a multiple
/// of the refresh interval also ask the companion for fresh data. Missed
/// ticks are not replayed, the next tick simply uses the time it is given.
#[derive(Debug, Clone)]
pub struct TickDriver {
    interval_mins: u32,
    subscribed: bool,
    ticks: u64,
}

impl Default for TickDriver {
    fn default() -> Self {
        Self::new(DEFAULT_REFRESH_INTERVAL_MINS)
    }
}

impl TickDriver {
    pub fn new(interval_mins: u32) -> Self {
        Self {
            interval_mins,
            subscribed: false,
            ticks: 0,
        }
    }

    pub fn subscribe(&mut self) {
        self.subscribed = true;
    }

    pub fn unsubscribe(&mut self) {
        self.subscribed = false;
    }

    pub fn is_subscribed(&self) -> bool {
        self.subscribed
    }

    /// Ticks handled since creation
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn interval_mins(&self) -> u32 {
        self.interval_mins
    }

    /// Handle one minute tick. A cancelled subscription does nothing.
    pub fn on_minute<T: Timelike>(&mut self, now: &T) -> TickOutcome {
        if !self.subscribed {
            return TickOutcome::default();
        }
        self.ticks += 1;
        TickOutcome {
            refresh_clock: true,
            request_refresh: self.is_refresh_minute(now.minute()),
        }
    }

    /// e.g. interval=20 -> minutes [0, 20, 40]
    pub fn is_refresh_minute(&self, minute: u32) -> bool {
        if self.interval_mins == 0 {
            return false;
        }
        minute % self.interval_mins == 0
    }
}

/// Time left until the next wall clock minute boundary.
pub fn until_next_minute<Tz: TimeZone>(now: &DateTime<Tz>) -> Duration {
    let into_minute = Duration::new(now.second() as u64, now.nanosecond() % 1_000_000_000);
    let remaining = Duration::from_secs(60).saturating_sub(into_minute);
    if remaining.is_zero() {
        Duration::from_secs(60)
    } else {
        remaining
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveTime, Utc};

    fn at(minute: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(9, minute, 0).unwrap()
    }

    #[test]
    fn test_refresh_minutes() {
        let mut driver = TickDriver::new(20);
        driver.subscribe();

        for minute in [0, 20, 40] {
            let outcome = driver.on_minute(&at(minute));
            assert!(outcome.refresh_clock);
            assert!(outcome.request_refresh, "minute {minute}");
        }
        for minute in [5, 19, 21, 59] {
            let outcome = driver.on_minute(&at(minute));
            assert!(outcome.refresh_clock);
            assert!(!outcome.request_refresh, "minute {minute}");
        }
        assert_eq!(driver.ticks(), 7);
    }

    #[test]
    fn test_unsubscribed_does_nothing() {
        let mut driver = TickDriver::new(20);
        assert_eq!(driver.on_minute(&at(20)), TickOutcome::default());

        driver.subscribe();
        assert!(driver.on_minute(&at(20)).request_refresh);

        driver.unsubscribe();
        assert_eq!(driver.on_minute(&at(40)), TickOutcome::default());
        assert_eq!(driver.ticks(), 1);
    }

    #[test]
    fn test_zero_interval_never_requests() {
        let driver = TickDriver::new(0);
        assert!(!driver.is_refresh_minute(0));
        assert!(!driver.is_refresh_minute(20));
    }

    #[test]
    fn test_until_next_minute() {
        let now = Utc.with_ymd_and_hms(2024, 5, 1, 10, 30, 45).unwrap();
        assert_eq!(until_next_minute(&now), Duration::from_secs(15));

        let on_boundary = Utc.with_ymd_and_hms(2024, 5, 1, 10, 31, 0).unwrap();
        assert_eq!(until_next_minute(&on_boundary), Duration::from_secs(60));
    }
}
