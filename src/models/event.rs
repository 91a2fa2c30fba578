//! Stock events
//!
//! Append-only audit records for inventory movements.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::units::Unit;

/// What happened to a stock row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventAction {
    /// Stock added on purchase
    Purchase,
    /// Stock consumed by cooking a recipe
    Cook,
    /// Manual withdrawal outside a recipe
    Withdrawal,
    /// Quantity or price edited in place
    Update,
    /// Row removed
    Delete,
}

impl EventAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventAction::Purchase => "purchase",
            EventAction::Cook => "cook",
            EventAction::Withdrawal => "withdrawal",
            EventAction::Update => "update",
            EventAction::Delete => "delete",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "purchase" => Some(EventAction::Purchase),
            "cook" => Some(EventAction::Cook),
            "withdrawal" => Some(EventAction::Withdrawal),
            "update" => Some(EventAction::Update),
            "delete" => Some(EventAction::Delete),
            _ => None,
        }
    }
}

/// One audit record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockEvent {
    pub timestamp: DateTime<Utc>,
    pub action: EventAction,
    pub name: String,
    pub brand: Option<String>,
    /// Signed quantity change, expressed in `unit`
    pub delta_quantity: f64,
    pub unit: Unit,
    /// Signed price change
    pub price: f64,
}

impl StockEvent {
    /// Stamp a new event at the current time
    pub fn now(
        action: EventAction,
        name: impl Into<String>,
        brand: Option<String>,
        delta_quantity: f64,
        unit: Unit,
        price: f64,
    ) -> Self {
        Self {
            timestamp: Utc::now(),
            action,
            name: name.into(),
            brand,
            delta_quantity,
            unit,
            price,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_string_round_trip() {
        for action in [
            EventAction::Purchase,
            EventAction::Cook,
            EventAction::Withdrawal,
            EventAction::Update,
            EventAction::Delete,
        ] {
            assert_eq!(EventAction::from_str(action.as_str()), Some(action));
        }
        assert_eq!(EventAction::from_str("unknown"), None);
    }
}
