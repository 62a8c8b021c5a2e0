use crate::OrderStatus;

use std::str::FromStr;

use googletest::prelude::*;

#[test]
fn test_order_status_as_str() {
    assert_that!(OrderStatus::Pending.as_str(), eq("pending"));
    assert_that!(OrderStatus::Paid.as_str(), eq("paid"));
    assert_that!(OrderStatus::Shipped.as_str(), eq("shipped"));
    assert_that!(OrderStatus::Cancelled.as_str(), eq("cancelled"));
}

#[test]
fn test_order_status_from_str() {
    assert_that!(OrderStatus::from_str("paid").unwrap(), eq(OrderStatus::Paid));
    assert_that!(
        OrderStatus::from_str("cancelled").unwrap(),
        eq(OrderStatus::Cancelled)
    );
    assert_that!(OrderStatus::from_str("PAID"), err(anything()));
    assert_that!(OrderStatus::from_str("refunded"), err(anything()));
}

#[test]
fn test_order_status_default() {
    assert_that!(OrderStatus::default(), eq(OrderStatus::Pending));
}
