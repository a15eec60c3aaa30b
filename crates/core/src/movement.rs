//! Stock movement and channel enumerations.

use core::str::FromStr;
use serde::{Deserialize, Serialize};

use crate::error::LedgerError;

/// Direction of a stock movement.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MovementKind {
    /// Stock enters the pool (restock, return, correction).
    In,
    /// Stock leaves the pool (sale, shipment, damage write-off).
    Out,
}

/// Which independent stock pool a movement affects.
///
/// A product/variant keeps separate counts for the online store and the
/// physical shop; movements in one channel never touch the other.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StockChannel {
    Online,
    Offline,
}

impl MovementKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            MovementKind::In => "in",
            MovementKind::Out => "out",
        }
    }
}

impl StockChannel {
    pub fn as_str(&self) -> &'static str {
        match self {
            StockChannel::Online => "online",
            StockChannel::Offline => "offline",
        }
    }
}

impl FromStr for MovementKind {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "in" => Ok(MovementKind::In),
            "out" => Ok(MovementKind::Out),
            other => Err(LedgerError::validation(format!(
                "movement must be 'in' or 'out', got '{other}'"
            ))),
        }
    }
}

impl FromStr for StockChannel {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "online" => Ok(StockChannel::Online),
            "offline" => Ok(StockChannel::Offline),
            other => Err(LedgerError::validation(format!(
                "channel must be 'online' or 'offline', got '{other}'"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn movement_parses_case_insensitive() {
        assert_eq!("IN".parse::<MovementKind>().unwrap(), MovementKind::In);
        assert_eq!("out".parse::<MovementKind>().unwrap(), MovementKind::Out);
    }

    #[test]
    fn unknown_movement_is_validation_error() {
        let err = "transfer".parse::<MovementKind>().unwrap_err();
        match err {
            LedgerError::Validation(_) => {}
            _ => panic!("expected Validation error"),
        }
    }

    #[test]
    fn channel_round_trips_through_serde() {
        let json = serde_json::to_string(&StockChannel::Offline).unwrap();
        assert_eq!(json, "\"offline\"");
        let back: StockChannel = serde_json::from_str(&json).unwrap();
        assert_eq!(back, StockChannel::Offline);
    }
}
