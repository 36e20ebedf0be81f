//! Error types for instrument input and configuration

use thiserror::Error;

/// Errors surfaced at the boundary between a host and the instruments
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GaugeError {
    #[error("non-finite {quantity} rejected: {value}")]
    NonFinite { quantity: &'static str, value: f64 },

    #[error("invalid instrument configuration: {0}")]
    Config(String),
}

impl From<serde_json::Error> for GaugeError {
    fn from(err: serde_json::Error) -> Self {
        GaugeError::Config(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, GaugeError>;

/// Reject NaN and infinities before they reach scale or calibration state.
pub(crate) fn ensure_finite(quantity: &'static str, value: f64) -> Result<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        tracing::warn!(quantity, value, "rejecting non-finite input");
        Err(GaugeError::NonFinite { quantity, value })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finite_values_pass_through() {
        assert_eq!(ensure_finite("speed", 42.5), Ok(42.5));
    }

    #[test]
    fn nan_and_infinity_are_rejected() {
        assert!(matches!(
            ensure_finite("speed", f64::NAN),
            Err(GaugeError::NonFinite { quantity: "speed", .. })
        ));
        assert_eq!(
            ensure_finite("altitude", f64::NEG_INFINITY),
            Err(GaugeError::NonFinite {
                quantity: "altitude",
                value: f64::NEG_INFINITY
            })
        );
    }

    #[test]
    fn json_errors_become_config_errors() {
        let err: GaugeError = serde_json::from_str::<u32>("not json").unwrap_err().into();
        assert!(matches!(err, GaugeError::Config(_)));
    }
}
