//! Core types for the secplus_gdo configuration resolver
//!
//! This crate provides the value types shared by the document loader and the
//! resolver: ComponentId, Platform, EntityCategory, GpioPin and TimePeriod.

mod component_id;
mod pin;
mod platform;
mod time_period;

pub use component_id::{ComponentId, ComponentIdError};
pub use pin::{GpioPin, PinError, MAX_GPIO};
pub use platform::{EntityCategory, Platform};
pub use time_period::{TimePeriod, TimePeriodError};

/// Name of the root component in configuration documents
pub const DOMAIN: &str = "secplus_gdo";

/// Key that references the owning root from an entity declaration
pub const CONF_SECPLUS_GDO_ID: &str = "secplus_gdo_id";
