//! UART pin normalization for root declarations
//!
//! Each pin role accepts a current key and a legacy alias. The normalized map
//! carries only the current keys, always set, with the pin number as value.

use crate::error::{ResolveError, ResolveResult};
use crate::schema::Fields;
use gdo_core::GpioPin;
use serde_yaml::{Mapping, Value};
use tracing::debug;

pub const CONF_UART_TX_PIN: &str = "uart_tx_pin";
pub const CONF_UART_RX_PIN: &str = "uart_rx_pin";
pub const CONF_OUTPUT_GDO_PIN: &str = "output_gdo_pin";
pub const CONF_INPUT_GDO_PIN: &str = "input_gdo_pin";

/// One communication pin role with its keys and fallback
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PinRole {
    pub current: &'static str,
    pub legacy: &'static str,
    pub fallback: u8,
}

pub const TX_ROLE: PinRole = PinRole {
    current: CONF_UART_TX_PIN,
    legacy: CONF_OUTPUT_GDO_PIN,
    fallback: 1,
};

pub const RX_ROLE: PinRole = PinRole {
    current: CONF_UART_RX_PIN,
    legacy: CONF_INPUT_GDO_PIN,
    fallback: 2,
};

impl PinRole {
    fn resolve(&self, fields: &Fields<'_>) -> ResolveResult<GpioPin> {
        let current = fields.parse::<GpioPin>(self.current)?;
        let legacy = fields.parse::<GpioPin>(self.legacy)?;

        match (current, legacy) {
            (Some(_), Some(_)) => Err(ResolveError::conflict(
                fields.key_path(self.current),
                fields.key_path(self.legacy),
                "only one of the two keys may be set",
            )),
            (Some(pin), None) | (None, Some(pin)) => Ok(pin),
            (None, None) => GpioPin::new(i64::from(self.fallback))
                .map_err(|e| ResolveError::schema(fields.key_path(self.current), e.to_string())),
        }
    }
}

/// Normalize the tx/rx pin keys of a root declaration into a new map
pub fn normalize_pins(config: &Mapping, path: &str) -> ResolveResult<Mapping> {
    let fields = Fields::new(config, path);
    let tx = TX_ROLE.resolve(&fields)?;
    let rx = RX_ROLE.resolve(&fields)?;

    if tx == rx {
        return Err(ResolveError::conflict(
            fields.key_path(CONF_UART_TX_PIN),
            fields.key_path(CONF_UART_RX_PIN),
            format!("{} cannot be used for both tx and rx", tx),
        ));
    }

    let mut normalized = config.clone();
    normalized.remove(CONF_OUTPUT_GDO_PIN);
    normalized.remove(CONF_INPUT_GDO_PIN);
    normalized.insert(Value::from(CONF_UART_TX_PIN), Value::from(tx.number()));
    normalized.insert(Value::from(CONF_UART_RX_PIN), Value::from(rx.number()));

    debug!("Normalized pins at {}: tx={}, rx={}", path, tx, rx);
    Ok(normalized)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mapping(yaml: &str) -> Mapping {
        serde_yaml::from_str(yaml).unwrap()
    }

    fn pins(normalized: &Mapping) -> (u64, u64) {
        (
            normalized.get(CONF_UART_TX_PIN).and_then(Value::as_u64).unwrap(),
            normalized.get(CONF_UART_RX_PIN).and_then(Value::as_u64).unwrap(),
        )
    }

    #[test]
    fn test_fallback_pins() {
        let normalized = normalize_pins(&Mapping::new(), "secplus_gdo").unwrap();
        assert_eq!(pins(&normalized), (1, 2));
    }

    #[test]
    fn test_legacy_keys_are_renamed() {
        let config = mapping("output_gdo_pin: GPIO17\ninput_gdo_pin: 18\n");
        let normalized = normalize_pins(&config, "secplus_gdo").unwrap();
        assert_eq!(pins(&normalized), (17, 18));
        assert!(!normalized.contains_key(CONF_OUTPUT_GDO_PIN));
        assert!(!normalized.contains_key(CONF_INPUT_GDO_PIN));
        assert!(config.contains_key(CONF_OUTPUT_GDO_PIN));
    }

    #[test]
    fn test_mixed_roles() {
        let config = mapping("uart_tx_pin: 21\ninput_gdo_pin: 22\n");
        let normalized = normalize_pins(&config, "secplus_gdo").unwrap();
        assert_eq!(pins(&normalized), (21, 22));
    }

    #[test]
    fn test_both_keys_for_one_role_conflict_in_any_order() {
        for yaml in [
            "uart_tx_pin: 4\noutput_gdo_pin: 5\n",
            "output_gdo_pin: 5\nuart_tx_pin: 4\n",
        ] {
            let err = normalize_pins(&mapping(yaml), "secplus_gdo").unwrap_err();
            match err {
                ResolveError::ConfigConflict { first, second, .. } => {
                    assert_eq!(first, "secplus_gdo.uart_tx_pin");
                    assert_eq!(second, "secplus_gdo.output_gdo_pin");
                }
                other => panic!("unexpected error: {other}"),
            }
        }
    }

    #[test]
    fn test_same_pin_for_both_roles() {
        let err = normalize_pins(&mapping("uart_tx_pin: 3\nuart_rx_pin: 3\n"), "secplus_gdo")
            .unwrap_err();
        assert!(matches!(err, ResolveError::ConfigConflict { .. }));

        // the fallback of one role can collide with an explicit pin of the other
        let err = normalize_pins(&mapping("uart_rx_pin: 1\n"), "secplus_gdo").unwrap_err();
        assert!(matches!(err, ResolveError::ConfigConflict { .. }));
    }

    #[test]
    fn test_invalid_pin() {
        let err = normalize_pins(&mapping("uart_tx_pin: GPIO99\n"), "secplus_gdo[1]")
            .unwrap_err();
        assert!(matches!(
            err,
            ResolveError::SchemaValidation { path, .. } if path == "secplus_gdo[1].uart_tx_pin"
        ));
    }
}
