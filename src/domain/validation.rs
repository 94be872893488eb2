/// Order Validator - Business Rule Validation
///
/// This module provides the stateless per-order checks for the auction
/// engine: price band, size range, and side. The stateful checks (auction
/// closed, capacity, price-level overflow) live in the engine's submission
/// path, which consults this validator between them so the documented
/// rejection precedence holds.
///
/// ## Validation Rules
/// - Price must be inside the instrument's configured band (inclusive)
/// - Size must be in `1..=max_order_size`
/// - Side must be exactly `'B'` or `'S'`, case-sensitive

use serde::{Deserialize, Serialize};

use crate::shared::protocol::Side;

/// Reject reasons returned to the caller
///
/// Rejections are ordinary business outcomes, never faults: engine state is
/// untouched when one is returned, and the caller decides whether to log,
/// correct, or drop the order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
pub enum RejectReason {
    /// The order line is not three single-space-separated tokens
    /// `<side> <size> <price>`
    #[error("invalid order string format")]
    InvalidOrderFormat,

    /// Size is outside `1..=max_order_size`
    #[error("invalid order size")]
    InvalidSize,

    /// Price is outside the instrument's configured band
    #[error("invalid order price")]
    InvalidPrice,

    /// Side is not exactly 'B' or 'S'
    #[error("invalid order side")]
    InvalidSide,

    /// The engine already accepted `orders_limit` orders
    #[error("auction orders limit reached")]
    OrdersLimitReached,

    /// The cumulative quantity at the price level would exceed `i32::MAX`
    #[error("aggregated quantity limit reached at price level")]
    QuantityOverflow,

    /// The auction result was already requested
    #[error("auction no longer accepts orders")]
    AuctionClosed,
}

/// Order validator
///
/// Holds the per-instrument bounds and validates order fields against them.
#[derive(Debug, Clone)]
pub struct OrderValidator {
    /// 价格下限（主货币单位，含）
    min_price: f64,
    /// 价格上限（主货币单位，含）
    max_price: f64,
    /// 单笔订单最大数量
    max_order_size: i32,
}

impl OrderValidator {
    /// Creates a validator for the given instrument bounds
    pub fn new(min_price: u32, max_price: u32, max_order_size: i32) -> Self {
        Self {
            min_price: f64::from(min_price),
            max_price: f64::from(max_price),
            max_order_size,
        }
    }

    /// Validates the price band (inclusive, major currency units).
    ///
    /// Written as range containment so a NaN price fails the check instead
    /// of slipping through two false comparisons.
    pub fn validate_price(&self, price: f64) -> Result<(), RejectReason> {
        if !(self.min_price..=self.max_price).contains(&price) {
            return Err(RejectReason::InvalidPrice);
        }
        Ok(())
    }

    /// Validates the order size
    pub fn validate_size(&self, size: i32) -> Result<(), RejectReason> {
        if size < 1 || size > self.max_order_size {
            return Err(RejectReason::InvalidSize);
        }
        Ok(())
    }

    /// Validates the side character and resolves it to a [`Side`]
    pub fn validate_side(&self, side: char) -> Result<Side, RejectReason> {
        Side::from_char(side).ok_or(RejectReason::InvalidSide)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn validator() -> OrderValidator {
        OrderValidator::new(1, 100, 1000)
    }

    #[test]
    fn test_price_inside_band() {
        assert!(validator().validate_price(15.5).is_ok());
        // 边界含
        assert!(validator().validate_price(1.0).is_ok());
        assert!(validator().validate_price(100.0).is_ok());
    }

    #[test]
    fn test_price_outside_band() {
        let result = validator().validate_price(0.0);
        assert_eq!(result, Err(RejectReason::InvalidPrice));

        let result = validator().validate_price(-10.0);
        assert_eq!(result, Err(RejectReason::InvalidPrice));

        let result = validator().validate_price(100.01);
        assert_eq!(result, Err(RejectReason::InvalidPrice));
    }

    #[test]
    fn test_nan_price_is_rejected() {
        let result = validator().validate_price(f64::NAN);
        assert_eq!(result, Err(RejectReason::InvalidPrice));
    }

    #[test]
    fn test_size_range() {
        assert!(validator().validate_size(1).is_ok());
        assert!(validator().validate_size(1000).is_ok());

        assert_eq!(validator().validate_size(0), Err(RejectReason::InvalidSize));
        assert_eq!(validator().validate_size(-10), Err(RejectReason::InvalidSize));
        assert_eq!(validator().validate_size(1001), Err(RejectReason::InvalidSize));
    }

    #[test]
    fn test_side_characters() {
        assert_eq!(validator().validate_side('B'), Ok(Side::Buy));
        assert_eq!(validator().validate_side('S'), Ok(Side::Sell));

        assert_eq!(validator().validate_side('V'), Err(RejectReason::InvalidSide));
        // 小写不接受
        assert_eq!(validator().validate_side('b'), Err(RejectReason::InvalidSide));
        assert_eq!(validator().validate_side('s'), Err(RejectReason::InvalidSide));
    }
}
