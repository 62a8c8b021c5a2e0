use crate::{CoreError, Order, OrderItem};

use googletest::prelude::*;

#[test]
fn test_compute_total_sums_line_items() {
    let items = vec![
        OrderItem {
            product_id: 1,
            quantity: 2,
            unit_price_cents: 1250,
        },
        OrderItem {
            product_id: 2,
            quantity: 1,
            unit_price_cents: 99,
        },
    ];

    assert_that!(Order::compute_total(&items).unwrap(), eq(2599));
}

#[test]
fn test_compute_total_empty_is_zero() {
    assert_that!(Order::compute_total(&[]).unwrap(), eq(0));
}

#[test]
fn test_compute_total_overflow_is_validation_error() {
    let items = vec![OrderItem {
        product_id: 1,
        quantity: i64::MAX,
        unit_price_cents: 2,
    }];

    assert!(matches!(
        Order::compute_total(&items),
        Err(CoreError::Validation { .. })
    ));
}
