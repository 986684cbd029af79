//! Core runtime configuration.
//!
//! Configuration is resolved once at process startup and then passed into the
//! store. Nothing in this crate reads environment variables or the wall clock
//! during request handling; in particular the booking window is anchored to
//! the date resolved here, which keeps the window stable for the lifetime of
//! the process and lets tests pin a fixed date.

use std::path::{Path, PathBuf};
use std::time::Duration;

use chrono::{Days, NaiveDate, Utc};

use crate::constants::{
    AUTH_LATENCY_MS, BOOKING_LATENCY_MS, BOOKING_WINDOW_DAYS, DEFAULT_DATA_DIR, SESSION_FILENAME,
};

/// The date range inside which new appointments may be booked.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BookingWindow {
    opens: NaiveDate,
    closes: NaiveDate,
}

impl BookingWindow {
    /// Returns the window starting at `today` and spanning the configured
    /// number of days.
    pub fn starting(today: NaiveDate) -> Self {
        let closes = today
            .checked_add_days(Days::new(BOOKING_WINDOW_DAYS))
            .unwrap_or(NaiveDate::MAX);
        Self {
            opens: today,
            closes,
        }
    }

    /// First bookable date (inclusive).
    pub fn opens(&self) -> NaiveDate {
        self.opens
    }

    /// Last bookable date (inclusive).
    pub fn closes(&self) -> NaiveDate {
        self.closes
    }

    /// Returns true if `date` falls inside the window.
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.opens && date <= self.closes
    }
}

/// Core configuration resolved at startup.
#[derive(Clone, Debug)]
pub struct CoreConfig {
    session_file: PathBuf,
    auth_latency: Duration,
    booking_latency: Duration,
    today: NaiveDate,
}

impl CoreConfig {
    /// Create a new `CoreConfig` with explicit values.
    pub fn new(
        session_file: PathBuf,
        auth_latency: Duration,
        booking_latency: Duration,
        today: NaiveDate,
    ) -> Self {
        Self {
            session_file,
            auth_latency,
            booking_latency,
            today,
        }
    }

    /// Resolve configuration for a normal process start.
    ///
    /// The session document lives under `data_dir` (or [`DEFAULT_DATA_DIR`]
    /// when none is given), the simulated latencies take their production
    /// values, and the booking window is anchored to the current UTC date.
    pub fn resolve(data_dir: Option<PathBuf>) -> Self {
        let dir = data_dir.unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_DIR));
        Self::new(
            dir.join(SESSION_FILENAME),
            Duration::from_millis(AUTH_LATENCY_MS),
            Duration::from_millis(BOOKING_LATENCY_MS),
            Utc::now().date_naive(),
        )
    }

    /// A configuration with zero simulated latency and a pinned date.
    ///
    /// Intended for tests and local tooling where waiting on the simulated
    /// network delay is pure noise.
    pub fn immediate(session_file: PathBuf, today: NaiveDate) -> Self {
        Self::new(session_file, Duration::ZERO, Duration::ZERO, today)
    }

    /// Path of the persisted session document.
    pub fn session_file(&self) -> &Path {
        &self.session_file
    }

    /// Simulated latency applied to sign-in and registration.
    pub fn auth_latency(&self) -> Duration {
        self.auth_latency
    }

    /// Simulated latency applied to booking submission.
    pub fn booking_latency(&self) -> Duration {
        self.booking_latency
    }

    /// The date the process considers "today".
    pub fn today(&self) -> NaiveDate {
        self.today
    }

    /// The booking window anchored to [`CoreConfig::today`].
    pub fn booking_window(&self) -> BookingWindow {
        BookingWindow::starting(self.today)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        s.parse().expect("valid test date")
    }

    #[test]
    fn window_spans_thirty_days_inclusive() {
        let window = BookingWindow::starting(date("2024-01-15"));
        assert!(window.contains(date("2024-01-15")));
        assert!(window.contains(date("2024-02-01")));
        assert!(window.contains(date("2024-02-14")));
        assert!(!window.contains(date("2024-01-14")));
        assert!(!window.contains(date("2024-02-15")));
    }

    #[test]
    fn resolve_places_session_file_under_data_dir() {
        let config = CoreConfig::resolve(Some(PathBuf::from("/tmp/docspot")));
        assert_eq!(
            config.session_file(),
            Path::new("/tmp/docspot/docspot_user.json")
        );
    }
}
