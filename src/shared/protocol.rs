/// Protocol definitions for order submission
///
/// The text form of an order is a single line `"<side> <size> <price>"`
/// with tokens separated by single spaces, e.g. `B 120 10.15`. Parsing is
/// purely structural: it produces a typed request without touching any
/// engine state, so a malformed line is rejected the same way before and
/// after the auction is triggered.

use serde::{Deserialize, Serialize};

use crate::domain::validation::RejectReason;

/// 订单方向
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Side {
    Buy,
    Sell,
}

impl Side {
    /// Maps the wire character to a side: `'B'` buy, `'S'` sell,
    /// case-sensitive. Anything else is not a side.
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            'B' => Some(Side::Buy),
            'S' => Some(Side::Sell),
            _ => None,
        }
    }
}

/// 新订单请求（已解析，未验证）
///
/// The side is kept as the raw input character: whether it names a valid
/// side is a business rule checked after price and size, not a parse rule.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OrderRequest {
    pub side: char,
    pub price: f64,
    pub size: i32,
}

impl OrderRequest {
    /// Parses a single order line.
    ///
    /// Structural failures (wrong token count, multi-character side token,
    /// unparseable size or price) all map to
    /// [`RejectReason::InvalidOrderFormat`].
    pub fn parse(line: &str) -> Result<Self, RejectReason> {
        // split(' ')而非split_whitespace：连续空格产生空token，按格式错误拒绝
        let mut tokens = line.split(' ');
        let (side_tok, size_tok, price_tok) =
            match (tokens.next(), tokens.next(), tokens.next(), tokens.next()) {
                (Some(side), Some(size), Some(price), None) => (side, size, price),
                _ => return Err(RejectReason::InvalidOrderFormat),
            };

        let mut side_chars = side_tok.chars();
        let side = match (side_chars.next(), side_chars.next()) {
            (Some(c), None) => c,
            _ => return Err(RejectReason::InvalidOrderFormat),
        };

        let size = size_tok
            .parse::<i32>()
            .map_err(|_| RejectReason::InvalidOrderFormat)?;
        let price = price_tok
            .parse::<f64>()
            .map_err(|_| RejectReason::InvalidOrderFormat)?;

        Ok(Self { side, price, size })
    }
}
