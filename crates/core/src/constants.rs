//! Constants used throughout the DocSpot core crate.
//!
//! Collected here so the session namespace, booking rules, and registration
//! defaults stay consistent across the codebase.

/// Storage key under which the active session identity is persisted.
///
/// The original marketplace kept one serialized identity in browser-local
/// storage under this name; the file-backed storage reuses it as a filename
/// stem so the on-disk layout is recognisable.
pub const SESSION_STORAGE_KEY: &str = "docspot_user";

/// Filename for the persisted session document.
pub const SESSION_FILENAME: &str = "docspot_user.json";

/// Default directory for session data when no explicit directory is
/// configured.
pub const DEFAULT_DATA_DIR: &str = "docspot_data";

/// How many days ahead of today an appointment may be booked.
pub const BOOKING_WINDOW_DAYS: u64 = 30;

/// The fixed set of bookable time-of-day slots.
///
/// Slot labels are opaque tokens, not parsed times. Bookings must use one of
/// these exact labels.
pub const TIME_SLOTS: [&str; 13] = [
    "9:00 AM", "9:30 AM", "10:00 AM", "10:30 AM", "11:00 AM", "11:30 AM", "2:00 PM", "2:30 PM",
    "3:00 PM", "3:30 PM", "4:00 PM", "4:30 PM", "5:00 PM",
];

/// Avatar assigned to newly registered identities.
pub const DEFAULT_AVATAR_URL: &str =
    "https://images.unsplash.com/photo-1494790108755-2616b612b494?w=150&h=150&fit=crop&crop=face";

/// Simulated latency for sign-in and registration, in milliseconds.
pub const AUTH_LATENCY_MS: u64 = 1_000;

/// Simulated latency for booking submission, in milliseconds.
pub const BOOKING_LATENCY_MS: u64 = 2_000;
