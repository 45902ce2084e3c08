//! Price and rating normalization over the shapes seen in scraped listings

use serde_json::{json, Value};

use lapview::normalize::{format_price, normalize_price, normalize_rating};
use lapview::record::{RawField, Record};

fn raw(value: Value) -> RawField {
    RawField::from_value(value)
}

#[test]
fn test_documented_examples() {
    assert_eq!(normalize_price(&raw(json!({"Current Price": "$1,234.56"}))), 1234.56);
    assert_eq!(normalize_rating(&raw(json!("4.2 out of 5 stars, 48 reviews."))), 4.2);
    assert_eq!(
        normalize_rating(&raw(json!({"Overall Rating": "4.5/5 (116 reviews)"}))),
        4.5
    );
    assert_eq!(normalize_rating(&raw(json!("-"))), 0.0);
    assert_eq!(normalize_rating(&raw(json!("{}"))), 0.0);
}

#[test]
fn test_wrapped_sentinels_yield_zero() {
    let shapes = [
        json!("Not Available"),
        json!({"Current Price": "Not Available"}),
        json!("{\"Current Price\": \"Not Available\"}"),
        json!({"Current Price": "N/A"}),
        json!("{\"Current Price\": \"N/A\"}"),
        json!({"Current Price": ""}),
        json!("{\"Current Price\": \"\"}"),
    ];

    for shape in shapes {
        assert_eq!(normalize_price(&raw(shape.clone())), 0.0, "{}", shape);
    }
}

#[test]
fn test_normalizers_never_fail() {
    let shapes = [
        json!(null),
        json!(true),
        json!(0),
        json!(-3.5),
        json!(1e308),
        json!(""),
        json!("   "),
        json!("{"),
        json!("[]"),
        json!("\"$500\""),
        json!([{"Current Price": "$10"}]),
        json!({"Current Price": null}),
        json!({"Current Price": {"amount": 5}}),
        json!({"Overall Rating": ["4.5/5"]}),
        json!({"Overall Rating": "/5"}),
        json!("out of 5 stars"),
        json!("NaN out of 5 stars"),
    ];

    for shape in shapes {
        let price = normalize_price(&raw(shape.clone()));
        let rating = normalize_rating(&raw(shape.clone()));
        assert!(price.is_finite() && price >= 0.0, "price of {}", shape);
        assert!((0.0..=5.0).contains(&rating), "rating of {}", shape);
    }
}

#[test]
fn test_record_values_are_computed_from_raw_fields() {
    let record = Record::from_value(&json!({
        "laptop_id": 12,
        "price_details": "{\"Current Price\": \"$3,499.00\"}",
        "Review Details": "{\"Overall Rating\": \"3.8/5 (9 reviews)\"}"
    }));

    assert_eq!(record.price(), 3499.0);
    assert_eq!(record.rating(), 3.8);
    assert_eq!(format_price(record.price()), "$3,499");
}

#[test]
fn test_zero_price_is_indistinguishable_from_missing() {
    let free = Record::from_value(&json!({"price_details": {"Current Price": "$0.00"}}));
    let missing = Record::from_value(&json!({}));

    assert_eq!(free.price(), missing.price());
    assert_eq!(format_price(free.price()), "Price Not Available");
}
