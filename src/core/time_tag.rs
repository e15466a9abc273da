// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! OSC time tags.
//!
//! A time tag is a 64-bit NTP fixed-point timestamp: the upper 32 bits count
//! seconds since 1900-01-01 00:00:00 UTC and the lower 32 bits hold the
//! fractional part of a second. The value `1` (all zero seconds, fraction 1)
//! is reserved to mean "immediately".
//!
//! Only NTP era 0 is represented: 1900-01-01 up to 2036-02-07 06:28:15 UTC.
//! Conversions from dates outside that range saturate at its ends instead
//! of wrapping into the next era.

use std::fmt;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// Seconds between the NTP epoch (1900) and the Unix epoch (1970).
pub const NTP_UNIX_OFFSET: i64 = 2_208_988_800;

const NANOS_PER_SEC: u64 = 1_000_000_000;

/// A 64-bit OSC time tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TimeTag {
    /// Seconds since 1900-01-01 00:00:00 UTC
    pub seconds: u32,
    /// Fraction of a second in units of 2^-32 s
    pub fraction: u32,
}

impl TimeTag {
    /// The special "execute immediately" time tag.
    pub const IMMEDIATELY: TimeTag = TimeTag {
        seconds: 0,
        fraction: 1,
    };

    /// The latest representable instant, 2036-02-07 06:28:16 UTC minus 2^-32 s.
    pub const MAX: TimeTag = TimeTag {
        seconds: u32::MAX,
        fraction: u32::MAX,
    };

    /// Create a time tag from its two halves.
    #[must_use]
    pub const fn new(seconds: u32, fraction: u32) -> Self {
        Self { seconds, fraction }
    }

    /// Create a time tag from its 64-bit wire representation.
    #[must_use]
    pub const fn from_bits(bits: u64) -> Self {
        Self {
            seconds: (bits >> 32) as u32,
            fraction: bits as u32,
        }
    }

    /// The 64-bit wire representation.
    #[must_use]
    pub const fn to_bits(self) -> u64 {
        ((self.seconds as u64) << 32) | self.fraction as u64
    }

    /// The current wall-clock time.
    ///
    /// Saturates at [`TimeTag::MAX`] once the clock passes the end of NTP
    /// era 0 in February 2036.
    pub fn now() -> Self {
        Self::from_datetime(Utc::now())
    }

    /// Whether this is the reserved "immediately" value.
    #[must_use]
    pub const fn is_immediate(self) -> bool {
        self.seconds == 0 && self.fraction == 1
    }

    /// Convert a UTC date-time.
    ///
    /// Dates before 1900 become `TimeTag::new(0, 0)`; dates after
    /// 2036-02-07 06:28:15 UTC become [`TimeTag::MAX`]. Neither end wraps.
    pub fn from_datetime(dt: DateTime<Utc>) -> Self {
        let ntp_seconds = dt.timestamp().saturating_add(NTP_UNIX_OFFSET);
        if ntp_seconds < 0 {
            return Self::new(0, 0);
        }
        if ntp_seconds > u32::MAX as i64 {
            return Self::MAX;
        }
        let seconds = ntp_seconds as u32;
        let nanos = (dt.timestamp_subsec_nanos() as u64).min(NANOS_PER_SEC - 1);
        Self {
            seconds,
            fraction: ((nanos << 32) / NANOS_PER_SEC) as u32,
        }
    }

    /// Convert to a UTC date-time with nanosecond resolution.
    pub fn to_datetime(self) -> Option<DateTime<Utc>> {
        let unix_seconds = self.seconds as i64 - NTP_UNIX_OFFSET;
        DateTime::<Utc>::from_timestamp(unix_seconds, self.subsec_nanos())
    }

    /// Fractional part converted to nanoseconds.
    #[must_use]
    pub const fn subsec_nanos(self) -> u32 {
        ((self.fraction as u64 * NANOS_PER_SEC) >> 32) as u32
    }
}

impl Default for TimeTag {
    fn default() -> Self {
        Self::IMMEDIATELY
    }
}

impl From<u64> for TimeTag {
    fn from(bits: u64) -> Self {
        Self::from_bits(bits)
    }
}

impl From<TimeTag> for u64 {
    fn from(tag: TimeTag) -> Self {
        tag.to_bits()
    }
}

/// Saturates outside NTP era 0, see [`TimeTag::from_datetime`].
impl From<DateTime<Utc>> for TimeTag {
    fn from(dt: DateTime<Utc>) -> Self {
        Self::from_datetime(dt)
    }
}

/// Saturates outside NTP era 0, see [`TimeTag::from_datetime`].
impl From<SystemTime> for TimeTag {
    fn from(time: SystemTime) -> Self {
        Self::from_datetime(DateTime::<Utc>::from(time))
    }
}

impl From<TimeTag> for SystemTime {
    fn from(tag: TimeTag) -> Self {
        let unix_seconds = tag.seconds as i64 - NTP_UNIX_OFFSET;
        let nanos = Duration::from_nanos(tag.subsec_nanos() as u64);
        if unix_seconds >= 0 {
            UNIX_EPOCH + Duration::from_secs(unix_seconds as u64) + nanos
        } else {
            UNIX_EPOCH - Duration::from_secs(unix_seconds.unsigned_abs()) + nanos
        }
    }
}

impl fmt::Display for TimeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_immediate() {
            return write!(f, "immediately");
        }
        match self.to_datetime() {
            Some(dt) => write!(f, "{}", dt.to_rfc3339_opts(SecondsFormat::Micros, true)),
            None => write!(f, "{}.{:010}", self.seconds, self.fraction),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_bits_round_trip() {
        let tag = TimeTag::new(0xDEAD_BEEF, 0x8000_0000);
        assert_eq!(tag.to_bits(), 0xDEAD_BEEF_8000_0000);
        assert_eq!(TimeTag::from_bits(tag.to_bits()), tag);
    }

    #[test]
    fn test_immediately() {
        assert!(TimeTag::IMMEDIATELY.is_immediate());
        assert_eq!(TimeTag::IMMEDIATELY.to_bits(), 1);
        assert_eq!(TimeTag::IMMEDIATELY.to_string(), "immediately");
        assert!(!TimeTag::new(1, 0).is_immediate());
    }

    #[test]
    fn test_unix_epoch() {
        let dt = Utc.timestamp_opt(0, 0).unwrap();
        let tag = TimeTag::from_datetime(dt);
        assert_eq!(tag.seconds as i64, NTP_UNIX_OFFSET);
        assert_eq!(tag.fraction, 0);
        assert_eq!(tag.to_datetime(), Some(dt));
    }

    #[test]
    fn test_half_second_fraction() {
        let dt = Utc.timestamp_opt(1_000_000_000, 500_000_000).unwrap();
        let tag = TimeTag::from_datetime(dt);
        assert_eq!(tag.fraction, 0x8000_0000);
        assert_eq!(tag.subsec_nanos(), 500_000_000);
    }

    #[test]
    fn test_datetime_round_trip_within_a_nanosecond() {
        let dt = Utc.timestamp_opt(1_700_000_000, 123_456_789).unwrap();
        let back = TimeTag::from_datetime(dt).to_datetime().unwrap();
        let diff = (back - dt).num_nanoseconds().unwrap().abs();
        assert!(diff <= 1, "drift of {diff} ns");
    }

    #[test]
    fn test_before_ntp_epoch_clamps_to_zero() {
        let dt = Utc.with_ymd_and_hms(1850, 1, 1, 0, 0, 0).unwrap();
        let tag = TimeTag::from_datetime(dt);
        assert_eq!(tag, TimeTag::new(0, 0));
        assert!(!tag.is_immediate());
    }

    #[test]
    fn test_era_zero_end() {
        let last = Utc.with_ymd_and_hms(2036, 2, 7, 6, 28, 15).unwrap();
        assert_eq!(TimeTag::from_datetime(last).seconds, u32::MAX);

        let after = Utc.with_ymd_and_hms(2036, 2, 7, 6, 28, 16).unwrap();
        assert_eq!(TimeTag::from_datetime(after), TimeTag::MAX);

        let far = Utc.with_ymd_and_hms(2100, 1, 1, 0, 0, 0).unwrap();
        assert_eq!(TimeTag::from(far), TimeTag::MAX);
        assert_eq!(
            TimeTag::MAX.to_datetime().unwrap(),
            last + chrono::Duration::nanoseconds(999_999_999)
        );
    }

    #[test]
    fn test_system_time_conversion() {
        let time = UNIX_EPOCH + Duration::from_secs(86_400);
        let tag = TimeTag::from(time);
        assert_eq!(tag.seconds as i64, NTP_UNIX_OFFSET + 86_400);
        assert_eq!(SystemTime::from(tag), time);
    }

    #[test]
    fn test_now_is_after_2020() {
        let tag = TimeTag::now();
        assert!(tag.seconds as i64 > NTP_UNIX_OFFSET + 1_577_836_800);
    }

    #[test]
    fn test_display() {
        let dt = Utc.with_ymd_and_hms(2013, 8, 29, 12, 0, 0).unwrap();
        assert_eq!(
            TimeTag::from_datetime(dt).to_string(),
            "2013-08-29T12:00:00.000000Z"
        );
    }
}
