//! Root driver binding
//!
//! A `secplus_gdo` declaration becomes a [`GdoComponent`] carrying the
//! constructor arguments of the opener driver as [`DriverSettings`].

use crate::component::GdoComponent;
use crate::defaults::{resolve_defaults, AttributeDefault};
use crate::error::ResolveResult;
use crate::pins::{
    normalize_pins, CONF_INPUT_GDO_PIN, CONF_OUTPUT_GDO_PIN, CONF_UART_RX_PIN, CONF_UART_TX_PIN,
};
use crate::schema::{Fields, CONF_ID};
use gdo_config::Declaration;
use gdo_core::{ComponentId, GpioPin, TimePeriod};
use serde::Serialize;
use tracing::debug;

pub const CONF_OBSTRUCTION_FROM_STATUS: &str = "obstruction_from_status";
pub const CONF_INVERT_UART: &str = "invert_uart";
pub const CONF_OBSTRUCTION_INPUT_PIN: &str = "obstruction_input_pin";
pub const CONF_MIN_COMMAND_INTERVAL: &str = "min_command_interval";
pub const CONF_SYNC_RETRY_INTERVAL: &str = "sync_retry_interval";
pub const CONF_AUTO_START: &str = "auto_start";

const ROOT_SCHEMA: &[&str] = &[
    CONF_ID,
    CONF_UART_TX_PIN,
    CONF_UART_RX_PIN,
    CONF_OUTPUT_GDO_PIN,
    CONF_INPUT_GDO_PIN,
    CONF_OBSTRUCTION_FROM_STATUS,
    CONF_INVERT_UART,
    CONF_OBSTRUCTION_INPUT_PIN,
    CONF_MIN_COMMAND_INTERVAL,
    CONF_SYNC_RETRY_INTERVAL,
    CONF_AUTO_START,
];

const ROOT_DEFAULTS: &[AttributeDefault] = &[
    AttributeDefault::flag(CONF_OBSTRUCTION_FROM_STATUS, true),
    AttributeDefault::flag(CONF_INVERT_UART, true),
    AttributeDefault::flag(CONF_AUTO_START, true),
    AttributeDefault::text(CONF_MIN_COMMAND_INTERVAL, "50ms"),
    AttributeDefault::text(CONF_SYNC_RETRY_INTERVAL, "30s"),
];

/// Constructor arguments of the opener driver
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DriverSettings {
    pub uart_tx_pin: GpioPin,
    pub uart_rx_pin: GpioPin,
    pub obstruction_from_status: bool,
    pub invert_uart: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub obstruction_input_pin: Option<GpioPin>,
    pub min_command_interval: TimePeriod,
    pub sync_retry_interval: TimePeriod,
    pub auto_start: bool,
}

impl DriverSettings {
    fn from_fields(fields: &Fields<'_>) -> ResolveResult<Self> {
        let pin = |key: &str| -> ResolveResult<GpioPin> {
            fields.parse(key)?.ok_or_else(|| fields.required(key))
        };
        let flag = |key: &str| -> ResolveResult<bool> {
            fields.boolean(key)?.ok_or_else(|| fields.required(key))
        };
        let period = |key: &str| -> ResolveResult<TimePeriod> {
            fields.parse(key)?.ok_or_else(|| fields.required(key))
        };

        Ok(Self {
            uart_tx_pin: pin(CONF_UART_TX_PIN)?,
            uart_rx_pin: pin(CONF_UART_RX_PIN)?,
            obstruction_from_status: flag(CONF_OBSTRUCTION_FROM_STATUS)?,
            invert_uart: flag(CONF_INVERT_UART)?,
            obstruction_input_pin: fields.parse(CONF_OBSTRUCTION_INPUT_PIN)?,
            min_command_interval: period(CONF_MIN_COMMAND_INTERVAL)?,
            sync_retry_interval: period(CONF_SYNC_RETRY_INTERVAL)?,
            auto_start: flag(CONF_AUTO_START)?,
        })
    }
}

/// Bind one root declaration; `fallback_id` names it when `id` is absent
pub fn bind_root(
    declaration: &Declaration,
    fallback_id: ComponentId,
) -> ResolveResult<GdoComponent> {
    let raw = Fields::new(&declaration.config, &declaration.path);
    raw.check_keys(&[ROOT_SCHEMA])?;

    let normalized = normalize_pins(&declaration.config, &declaration.path)?;
    let merged = resolve_defaults(&normalized, ROOT_DEFAULTS);
    let fields = Fields::new(&merged, &declaration.path);

    let settings = DriverSettings::from_fields(&fields)?;

    let id = fields.id(CONF_ID)?.unwrap_or(fallback_id);

    debug!(
        "Bound root {}: tx={}, rx={}, min_command_interval={}, sync_retry_interval={}",
        id,
        settings.uart_tx_pin,
        settings.uart_rx_pin,
        settings.min_command_interval,
        settings.sync_retry_interval
    );

    Ok(GdoComponent::new(id, settings))
}
