// 🏆 Points Engine - Rules as an enum
// Seven independent scoring rules, evaluated and summed

use crate::receipt::{Item, Receipt};
use chrono::{Datelike, NaiveDate, NaiveTime, Timelike};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Serialize;
use std::str::FromStr;
use unicode_general_category::{get_general_category, GeneralCategory};

const ROUND_DOLLAR_POINTS: i64 = 50;
const QUARTER_MULTIPLE_POINTS: i64 = 25;
const POINTS_PER_ITEM_PAIR: i64 = 5;
const ODD_DAY_POINTS: i64 = 6;
const AFTERNOON_POINTS: i64 = 10;

/// 14:00 and 16:00 as minutes since midnight, both exclusive
const AFTERNOON_START: u32 = 14 * 60;
const AFTERNOON_END: u32 = 16 * 60;

// ============================================================================
// RULE DEFINITION
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Rule {
    /// One point per letter or digit in the retailer name
    RetailerName,

    /// 50 points if the total ends in ".00"
    RoundDollarTotal,

    /// 25 points if the total is a multiple of 0.25
    QuarterMultipleTotal,

    /// 5 points for every two items
    ItemPairs,

    /// ceil(price * 0.2) for each item whose trimmed description length is a multiple of 3
    DescriptionLength,

    /// 6 points if the purchase day of month is odd
    OddPurchaseDay,

    /// 10 points if purchased strictly between 14:00 and 16:00
    AfternoonPurchase,
}

impl Rule {
    /// Every rule, in evaluation order
    pub const ALL: [Rule; 7] = [
        Rule::RetailerName,
        Rule::RoundDollarTotal,
        Rule::QuarterMultipleTotal,
        Rule::ItemPairs,
        Rule::DescriptionLength,
        Rule::OddPurchaseDay,
        Rule::AfternoonPurchase,
    ];

    pub fn id(&self) -> &'static str {
        match self {
            Rule::RetailerName => "retailer_name",
            Rule::RoundDollarTotal => "round_dollar_total",
            Rule::QuarterMultipleTotal => "quarter_multiple_total",
            Rule::ItemPairs => "item_pairs",
            Rule::DescriptionLength => "description_length",
            Rule::OddPurchaseDay => "odd_purchase_day",
            Rule::AfternoonPurchase => "afternoon_purchase",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Rule::RetailerName => "alphanumeric characters in retailer name",
            Rule::RoundDollarTotal => "total is a round dollar amount",
            Rule::QuarterMultipleTotal => "total is a multiple of 0.25",
            Rule::ItemPairs => "every two items",
            Rule::DescriptionLength => "item descriptions with length divisible by 3",
            Rule::OddPurchaseDay => "purchase day is odd",
            Rule::AfternoonPurchase => "purchased between 2pm and 4pm",
        }
    }

    /// Points this rule awards the receipt
    ///
    /// Never fails: a malformed field makes this rule contribute 0.
    pub fn evaluate(&self, receipt: &Receipt) -> i64 {
        match self {
            Rule::RetailerName => receipt
                .retailer
                .chars()
                .filter(|c| is_letter_or_digit(*c))
                .count() as i64,

            Rule::RoundDollarTotal => {
                if receipt.total.ends_with(".00") {
                    ROUND_DOLLAR_POINTS
                } else {
                    0
                }
            }

            Rule::QuarterMultipleTotal => {
                let is_multiple = parse_amount(&receipt.total)
                    .and_then(|total| total.checked_rem(dec!(0.25)))
                    .map_or(false, |rem| rem.is_zero());

                if is_multiple {
                    QUARTER_MULTIPLE_POINTS
                } else {
                    0
                }
            }

            Rule::ItemPairs => (receipt.items.len() / 2) as i64 * POINTS_PER_ITEM_PAIR,

            Rule::DescriptionLength => receipt.items.iter().map(description_points).sum(),

            Rule::OddPurchaseDay => {
                match parse_purchase_date(&receipt.purchase_date) {
                    Some(date) if date.day() % 2 == 1 => ODD_DAY_POINTS,
                    _ => 0,
                }
            }

            Rule::AfternoonPurchase => {
                match parse_purchase_time(&receipt.purchase_time) {
                    Some(time) => {
                        let minutes = time.hour() * 60 + time.minute();
                        if minutes > AFTERNOON_START && minutes < AFTERNOON_END {
                            AFTERNOON_POINTS
                        } else {
                            0
                        }
                    }
                    None => 0,
                }
            }
        }
    }
}

/// General_Category L* or Nd; excludes superscripts, fractions and combining marks
fn is_letter_or_digit(c: char) -> bool {
    matches!(
        get_general_category(c),
        GeneralCategory::UppercaseLetter
            | GeneralCategory::LowercaseLetter
            | GeneralCategory::TitlecaseLetter
            | GeneralCategory::ModifierLetter
            | GeneralCategory::OtherLetter
            | GeneralCategory::DecimalNumber
    )
}

/// True if `raw` has exactly the given shape: '9' is an ASCII digit, anything else literal
fn has_shape(raw: &str, shape: &str) -> bool {
    raw.len() == shape.len()
        && raw.bytes().zip(shape.bytes()).all(|(b, s)| match s {
            b'9' => b.is_ascii_digit(),
            literal => b == literal,
        })
}

/// Strict "YYYY-MM-DD": two-digit month and day, no sign, no padding
fn parse_purchase_date(raw: &str) -> Option<NaiveDate> {
    if !has_shape(raw, "9999-99-99") {
        return None;
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()
}

/// Strict 24-hour "HH:MM"
fn parse_purchase_time(raw: &str) -> Option<NaiveTime> {
    if !has_shape(raw, "99:99") {
        return None;
    }
    NaiveTime::parse_from_str(raw, "%H:%M").ok()
}

/// Exact base-10 parse; None for anything that is not a plain decimal
fn parse_amount(raw: &str) -> Option<Decimal> {
    Decimal::from_str(raw).ok()
}

fn description_points(item: &Item) -> i64 {
    // Length in UTF-8 bytes
    let trimmed_len = item.short_description.trim().len();
    if trimmed_len % 3 != 0 {
        return 0;
    }

    parse_amount(&item.price)
        .and_then(|price| price.checked_mul(dec!(0.2)))
        .and_then(|scaled| scaled.ceil().to_i64())
        .unwrap_or(0)
}

// ============================================================================
// BREAKDOWN
// ============================================================================

/// Per-rule contributions for a single receipt, in evaluation order
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PointsBreakdown {
    pub contributions: Vec<(Rule, i64)>,
}

impl PointsBreakdown {
    /// Evaluate every rule against the receipt
    pub fn for_receipt(receipt: &Receipt) -> Self {
        PointsBreakdown {
            contributions: Rule::ALL
                .iter()
                .map(|rule| (*rule, rule.evaluate(receipt)))
                .collect(),
        }
    }

    /// Sum of all contributions
    pub fn total(&self) -> i64 {
        self.contributions.iter().map(|(_, points)| points).sum()
    }

    /// Points awarded by one rule
    pub fn contribution(&self, rule: Rule) -> i64 {
        self.contributions
            .iter()
            .find(|(r, _)| *r == rule)
            .map(|(_, points)| *points)
            .unwrap_or(0)
    }
}

/// Score a receipt under all seven rules
pub fn compute_points(receipt: &Receipt) -> i64 {
    PointsBreakdown::for_receipt(receipt).total()
}

// ============================================================================
// TESTS
// ============================================================================
