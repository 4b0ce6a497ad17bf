use serde_json::json;

use tabulon::format::{
    format_cell, format_date, format_money, format_money2, format_number, format_percent,
};
use tabulon::spec::ColumnKind;

// ============================================================================
// Money
// ============================================================================

#[test]
fn test_money_indian_grouping() {
    assert_eq!(format_money(120000.0, 0, "INR"), "₹1,20,000");
    assert_eq!(format_money(145000.0, 0, "INR"), "₹1,45,000");
    assert_eq!(format_money(265000.0, 0, "INR"), "₹2,65,000");
    // One group of three, then groups of two.
    assert_eq!(format_money(12345678.0, 0, "INR"), "₹1,23,45,678");
    assert_eq!(format_money(999.0, 0, "INR"), "₹999");
}

#[test]
fn test_money_thousands_grouping() {
    assert_eq!(format_money(1234567.5, 2, "USD"), "$1,234,567.50");
    assert_eq!(format_money(1000.0, 0, "EUR"), "€1,000");
    assert_eq!(format_money(42.0, 0, "GBP"), "£42");
}

#[test]
fn test_money_unknown_currency_falls_back_to_code() {
    assert_eq!(format_money(1234.0, 0, "SEK"), "SEK 1,234");
}

#[test]
fn test_money2_one_line_per_slot() {
    let amounts = [100.0, 200.0];
    let precisions = [0, 2];
    let currencies = ["USD".to_string(), "EUR".to_string()];
    assert_eq!(
        format_money2(&amounts, &precisions, &currencies),
        "$100\n€200.00"
    );
}

#[test]
fn test_money2_mixed_currencies() {
    let amounts = [12000.0, 145.50];
    let precisions = [0, 2];
    let currencies = ["INR".to_string(), "USD".to_string()];
    assert_eq!(
        format_money2(&amounts, &precisions, &currencies),
        "₹12,000\n$145.50"
    );
}

#[test]
fn test_money2_clamps_to_last_entry() {
    let amounts = [1.0, 2.0, 3.0];
    let precisions = [0];
    let currencies = ["USD".to_string()];
    assert_eq!(format_money2(&amounts, &precisions, &currencies), "$1\n$2\n$3");
}

// ============================================================================
// Numbers, percentages, dates
// ============================================================================

#[test]
fn test_number_grouped_with_fixed_precision() {
    assert_eq!(format_number(1234.5, 2), "1,234.50");
    assert_eq!(format_number(-1234.5, 2), "-1,234.50");
    assert_eq!(format_number(0.0, 0), "0");
}

#[test]
fn test_percent_multiplies_by_hundred() {
    assert_eq!(format_percent(0.2083, 1), "20.8%");
    assert_eq!(format_percent(0.041, 1), "4.1%");
    assert_eq!(format_percent(1.0, 0), "100%");
    assert_eq!(format_percent(-0.012, 1), "-1.2%");
}

#[test]
fn test_date_accepts_rfc3339_and_prefix() {
    assert_eq!(format_date(&json!("2025-01-15T10:30:00+05:30")), "2025-01-15");
    assert_eq!(format_date(&json!("2025-02-03 10:00")), "2025-02-03");
    assert_eq!(format_date(&json!("2025-02-03")), "2025-02-03");
}

#[test]
fn test_date_invalid_formats_empty() {
    assert_eq!(format_date(&json!("not a date")), "");
    assert_eq!(format_date(&json!(20250203)), "");
    assert_eq!(format_date(&json!(null)), "");
}

// ============================================================================
// Cell dispatch
// ============================================================================

#[test]
fn test_cell_money_accepts_numeric_strings() {
    let kind = ColumnKind::Money {
        precision: 0,
        currency: "INR".to_string(),
    };
    assert_eq!(format_cell(&kind, &json!("120000")), "₹1,20,000");
    assert_eq!(format_cell(&kind, &json!(120000)), "₹1,20,000");
}

#[test]
fn test_cell_type_mismatch_degrades() {
    let money = ColumnKind::Money {
        precision: 0,
        currency: "USD".to_string(),
    };
    // Non-numeric money degrades to a zero amount, not a failure.
    assert_eq!(format_cell(&money, &json!("n/a")), "$0");

    let pair = ColumnKind::MoneyPair {
        precisions: vec![0],
        currencies: vec!["USD".to_string()],
    };
    assert_eq!(format_cell(&pair, &json!("not an array")), "");
}

#[test]
fn test_cell_float5_uses_five_fraction_digits() {
    assert_eq!(format_cell(&ColumnKind::ScaledFloat, &json!(1.5)), "1.50000");
}

#[test]
fn test_cell_text_passthrough() {
    assert_eq!(format_cell(&ColumnKind::Text, &json!("hello")), "hello");
    assert_eq!(format_cell(&ColumnKind::Text, &json!(null)), "");
    assert_eq!(format_cell(&ColumnKind::Text, &json!(7)), "7");
}
