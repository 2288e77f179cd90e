//! GPIO pin numbers

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Highest internal GPIO number accepted (ESP32-S3 has GPIO0..GPIO48)
pub const MAX_GPIO: u8 = 48;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PinError {
    #[error("pin '{0}' is not a GPIO number (expected an integer or 'GPIO<n>')")]
    InvalidFormat(String),

    #[error("GPIO{0} is out of range (0..={MAX_GPIO})")]
    OutOfRange(i64),
}

/// An internal GPIO pin number
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(into = "u8")]
pub struct GpioPin(u8);

impl GpioPin {
    pub fn new(number: i64) -> Result<Self, PinError> {
        u8::try_from(number)
            .ok()
            .filter(|n| *n <= MAX_GPIO)
            .map(Self)
            .ok_or(PinError::OutOfRange(number))
    }

    pub fn number(self) -> u8 {
        self.0
    }
}

impl FromStr for GpioPin {
    type Err = PinError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let digits = match trimmed.get(..4) {
            Some(prefix) if prefix.eq_ignore_ascii_case("gpio") => &trimmed[4..],
            _ => trimmed,
        };
        let number: i64 = digits
            .parse()
            .map_err(|_| PinError::InvalidFormat(s.to_string()))?;
        Self::new(number)
    }
}

impl From<GpioPin> for u8 {
    fn from(pin: GpioPin) -> u8 {
        pin.0
    }
}

impl<'de> Deserialize<'de> for GpioPin {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum NumberOrName {
            Number(i64),
            Name(String),
        }

        match NumberOrName::deserialize(deserializer)? {
            NumberOrName::Number(n) => GpioPin::new(n),
            NumberOrName::Name(s) => s.parse(),
        }
        .map_err(serde::de::Error::custom)
    }
}

impl fmt::Display for GpioPin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "GPIO{}", self.0)
    }
}
