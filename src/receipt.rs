// 🧾 Receipt Model - What a customer submits
// Plain values: no identity, no validation beyond shape

use serde::{Deserialize, Serialize};

// ============================================================================
// ITEM
// ============================================================================

/// One line entry on a receipt
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    pub short_description: String,

    /// Decimal amount as sent by the client, e.g. "12.25"
    pub price: String,
}

impl Item {
    pub fn new(short_description: impl Into<String>, price: impl Into<String>) -> Self {
        Item {
            short_description: short_description.into(),
            price: price.into(),
        }
    }
}

// ============================================================================
// RECEIPT
// ============================================================================

/// A submitted purchase receipt
///
/// Numeric and temporal fields stay as the raw strings the client sent.
/// Each scoring rule parses only what it needs and degrades to zero points
/// when its field is malformed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Receipt {
    pub retailer: String,

    /// Calendar date, "YYYY-MM-DD"
    pub purchase_date: String,

    /// 24-hour clock, "HH:MM"
    pub purchase_time: String,

    pub items: Vec<Item>,

    /// Decimal amount, e.g. "35.35"
    pub total: String,
}

impl Receipt {
    /// Parse a receipt from its JSON wire form
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

// ============================================================================
// TESTS
// ============================================================================
