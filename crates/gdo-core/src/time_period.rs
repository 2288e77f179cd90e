//! Time periods in canonical milliseconds
//!
//! Accepted forms:
//! - integer: milliseconds (`50`)
//! - string with unit: `50ms`, `30s`, `1.5s`, `2min`, `1h`, `1d`, `500us`
//! - clock string: `HH:MM:SS` or `MM:SS`
//! - mapping: `{days, hours, minutes, seconds, milliseconds}`

use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TimePeriodError {
    #[error("invalid time period '{0}'")]
    InvalidFormat(String),

    #[error("time period must not be negative: '{0}'")]
    Negative(String),

    #[error("time period '{0}' exceeds the 32-bit millisecond range")]
    Overflow(String),
}

/// A non-negative time period, stored as whole milliseconds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize)]
#[serde(into = "u32")]
pub struct TimePeriod(u32);

fn unit_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^(-?\d+(?:\.\d+)?)\s*(us|ms|s|sec|min|h|d)?$").expect("valid time period regex")
    })
}

impl TimePeriod {
    pub const ZERO: TimePeriod = TimePeriod(0);

    pub const fn from_millis(ms: u32) -> Self {
        Self(ms)
    }

    pub const fn from_secs(secs: u32) -> Self {
        Self(secs * 1000)
    }

    pub fn total_milliseconds(self) -> u32 {
        self.0
    }

    pub fn as_duration(self) -> Duration {
        Duration::from_millis(u64::from(self.0))
    }

    fn from_millis_f64(ms: f64, source: &str) -> Result<Self, TimePeriodError> {
        if !ms.is_finite() {
            return Err(TimePeriodError::InvalidFormat(source.to_string()));
        }
        if ms < 0.0 {
            return Err(TimePeriodError::Negative(source.to_string()));
        }
        let ms = ms.floor();
        if ms > f64::from(u32::MAX) {
            return Err(TimePeriodError::Overflow(source.to_string()));
        }
        Ok(Self(ms as u32))
    }

    fn from_components(
        days: f64,
        hours: f64,
        minutes: f64,
        seconds: f64,
        milliseconds: f64,
        source: &str,
    ) -> Result<Self, TimePeriodError> {
        let parts = [days, hours, minutes, seconds, milliseconds];
        if parts.iter().any(|part| !part.is_finite()) {
            return Err(TimePeriodError::InvalidFormat(source.to_string()));
        }
        // Each component on its own, not just the sum
        if parts.iter().any(|part| *part < 0.0) {
            return Err(TimePeriodError::Negative(source.to_string()));
        }
        let total = (((days * 24.0 + hours) * 60.0 + minutes) * 60.0 + seconds) * 1000.0 + milliseconds;
        Self::from_millis_f64(total, source)
    }

    fn parse_clock(s: &str) -> Result<Self, TimePeriodError> {
        let parts = s
            .split(':')
            .map(|p| p.trim().parse::<f64>())
            .collect::<Result<Vec<_>, _>>()
            .map_err(|_| TimePeriodError::InvalidFormat(s.to_string()))?;
        match parts.as_slice() {
            [m, sec] => Self::from_components(0.0, 0.0, *m, *sec, 0.0, s),
            [h, m, sec] => Self::from_components(0.0, *h, *m, *sec, 0.0, s),
            _ => Err(TimePeriodError::InvalidFormat(s.to_string())),
        }
    }
}

impl FromStr for TimePeriod {
    type Err = TimePeriodError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.contains(':') {
            return Self::parse_clock(trimmed);
        }

        let caps = unit_regex()
            .captures(trimmed)
            .ok_or_else(|| TimePeriodError::InvalidFormat(s.to_string()))?;
        let value: f64 = caps[1]
            .parse()
            .map_err(|_| TimePeriodError::InvalidFormat(s.to_string()))?;
        let factor = match caps.get(2).map(|m| m.as_str()) {
            Some("us") => 0.001,
            None | Some("ms") => 1.0,
            Some("s") | Some("sec") => 1_000.0,
            Some("min") => 60_000.0,
            Some("h") => 3_600_000.0,
            Some("d") => 86_400_000.0,
            Some(_) => return Err(TimePeriodError::InvalidFormat(s.to_string())),
        };

        Self::from_millis_f64(value * factor, s)
    }
}

impl From<TimePeriod> for u32 {
    fn from(period: TimePeriod) -> u32 {
        period.0
    }
}

impl<'de> Deserialize<'de> for TimePeriod {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum PeriodSpec {
            Millis(i64),
            Text(String),
            Components {
                #[serde(default)]
                days: f64,
                #[serde(default)]
                hours: f64,
                #[serde(default)]
                minutes: f64,
                #[serde(default)]
                seconds: f64,
                #[serde(default)]
                milliseconds: f64,
            },
        }

        match PeriodSpec::deserialize(deserializer)? {
            PeriodSpec::Millis(ms) => {
                let source = ms.to_string();
                if ms < 0 {
                    Err(TimePeriodError::Negative(source))
                } else {
                    u32::try_from(ms)
                        .map(TimePeriod)
                        .map_err(|_| TimePeriodError::Overflow(source))
                }
            }
            PeriodSpec::Text(s) => s.parse(),
            PeriodSpec::Components {
                days,
                hours,
                minutes,
                seconds,
                milliseconds,
            } => TimePeriod::from_components(days, hours, minutes, seconds, milliseconds, "mapping"),
        }
        .map_err(serde::de::Error::custom)
    }
}

impl fmt::Display for TimePeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}ms", self.0)
    }
}
