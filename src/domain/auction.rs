/// 离散集合竞价引擎 - 单标的一次性价格发现
///
/// 核心设计理念（与连续撮合不同）：
/// 1. **价格离散化** - 价格按固定tick（0.01主货币单位）离散到数组索引
/// 2. **预分配数组** - 整个价格范围预分配，提交订单只做O(1)累加
/// 3. **单次扫描** - 触发时一次O(价格区间)扫描完成撮合，与订单数量无关
/// 4. **一次性结果** - 结果冻结后实例不再接受订单
///
/// 性能特性：
/// - 订单提交: O(1)（数组累加 + 极值更新）
/// - 撮合扫描: O((max_price - min_price) * 100)

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

use crate::domain::validation::{OrderValidator, RejectReason};
use crate::shared::protocol::{OrderRequest, Side};

/// 价格tick：0.01个主货币单位
const PRICE_TICK: f64 = 0.01;

/// 标的竞价配置
#[derive(Debug, Clone)]
pub struct AuctionSpec {
    /// 标的代码
    pub ticker: String,
    /// 最大接受订单数
    pub orders_limit: u32,
    /// 价格下限（主货币单位，含）
    pub min_price: u32,
    /// 价格上限（主货币单位，含）
    pub max_price: u32,
    /// 单笔订单最大数量
    pub max_order_size: i32,
}

impl AuctionSpec {
    /// 创建标准竞价配置
    ///
    /// # Panics
    /// Dies fast on invalid construction parameters - there is no valid
    /// partially-constructed auction instance.
    pub fn new(
        ticker: &str,
        orders_limit: u32,
        min_price: u32,
        max_price: u32,
        max_order_size: i32,
    ) -> Self {
        assert!(orders_limit > 0, "Invalid orders limit for ticker: {}", ticker);
        assert!(
            min_price > 0 && min_price <= max_price,
            "Invalid price limits for ticker: {}",
            ticker
        );
        assert!(max_order_size > 0, "Invalid size limits for ticker: {}", ticker);

        Self {
            ticker: ticker.to_string(),
            orders_limit,
            min_price,
            max_price,
            max_order_size,
        }
    }
}

/// Auction result lifecycle
///
/// One-shot: once the value leaves `NotTriggered` it is frozen for the rest
/// of the instance's life.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AuctionOutcome {
    /// 撮合尚未触发
    NotTriggered,
    /// 已触发，无成交
    NoMatch,
    /// 已触发并成交：清算价tick索引 + 总成交量
    Matched { price_idx: usize, size: u64 },
}

/// Mutable book state, guarded as a whole by the engine mutex
#[derive(Debug)]
struct BookState {
    /// 买方每个tick的累计数量（索引 0..=max_price*100）
    buy_qty_by_tick: Vec<i32>,
    /// 卖方每个tick的累计数量
    sell_qty_by_tick: Vec<i32>,
    /// 最高有买方兴趣的tick（只增）
    max_buy_idx: Option<usize>,
    /// 最低有卖方兴趣的tick（只减）
    min_sell_idx: Option<usize>,
    /// 已接受订单数
    orders_accepted: u32,
    /// 一次性结果槽
    outcome: AuctionOutcome,
}

impl BookState {
    /// Adds `size` to the side's level and extends that side's extreme.
    ///
    /// The overflow pre-check and the mutation are one step under the engine
    /// lock: on `QuantityOverflow` nothing is written.
    fn accept(&mut self, side: Side, price_idx: usize, size: i32) -> Result<(), RejectReason> {
        let level = match side {
            Side::Buy => &mut self.buy_qty_by_tick[price_idx],
            Side::Sell => &mut self.sell_qty_by_tick[price_idx],
        };
        *level = level
            .checked_add(size)
            .ok_or(RejectReason::QuantityOverflow)?;

        match side {
            Side::Buy => {
                if self.max_buy_idx.map_or(true, |idx| price_idx > idx) {
                    self.max_buy_idx = Some(price_idx);
                }
            }
            Side::Sell => {
                if self.min_sell_idx.map_or(true, |idx| price_idx < idx) {
                    self.min_sell_idx = Some(price_idx);
                }
            }
        }
        Ok(())
    }
}

/// 离散集合竞价引擎（每标的一个实例）
///
/// All public operations serialize on one coarse `parking_lot::Mutex` held
/// for their full duration; nothing suspends or performs I/O under the
/// lock. Instances for different instruments are fully independent and may
/// be driven from separate threads.
pub struct DiscreteAuction {
    spec: AuctionSpec,
    validator: OrderValidator,
    state: Mutex<BookState>,
}

impl DiscreteAuction {
    /// Creates the engine with zeroed level tables sized from the price band
    pub fn new(spec: AuctionSpec) -> Self {
        // 每个元素索引代表一个离散价格，例如索引173 = 1.73
        let levels = spec.max_price as usize * 100 + 1;
        let state = BookState {
            buy_qty_by_tick: vec![0; levels],
            sell_qty_by_tick: vec![0; levels],
            max_buy_idx: None,
            min_sell_idx: None,
            orders_accepted: 0,
            outcome: AuctionOutcome::NotTriggered,
        };

        tracing::info!(
            "Created new discrete auction instance, ticker: {} orders limit: {}",
            spec.ticker,
            spec.orders_limit
        );

        Self {
            validator: OrderValidator::new(spec.min_price, spec.max_price, spec.max_order_size),
            spec,
            state: Mutex::new(state),
        }
    }

    /// 提交一条原始订单行（`"<side> <size> <price>"`）
    ///
    /// Parse failures map to `InvalidOrderFormat`. The format check needs no
    /// state, so it short-circuits even the auction-closed check.
    pub fn submit_line(&self, line: &str) -> Result<(), RejectReason> {
        let request = OrderRequest::parse(line).map_err(|reason| {
            tracing::debug!("Can't parse order line: {:?}", line);
            reason
        })?;
        self.submit_order(request.side, request.price, request.size)
    }

    /// 提交结构化订单
    ///
    /// Checks run in fixed precedence, first failing check wins: auction
    /// closed → capacity → price → size → side → level overflow. Nothing is
    /// mutated on rejection.
    pub fn submit_order(&self, side: char, price: f64, size: i32) -> Result<(), RejectReason> {
        let mut state = self.state.lock();

        if state.outcome != AuctionOutcome::NotTriggered {
            return Err(RejectReason::AuctionClosed);
        }
        if state.orders_accepted == self.spec.orders_limit {
            return Err(RejectReason::OrdersLimitReached);
        }
        self.validator.validate_price(price)?;
        self.validator.validate_size(size)?;
        let side = self.validator.validate_side(side)?;

        let price_idx = (price / PRICE_TICK).round() as usize;
        state.accept(side, price_idx, size)?;
        state.orders_accepted += 1;
        Ok(())
    }

    /// Returns the auction report: `"<size> <price>"` on a match (price
    /// with two decimals, e.g. `"250 15.60"`), or `"0 n/a"` otherwise.
    ///
    /// The first call runs the uncrossing scan and freezes the outcome;
    /// every later call returns the identical frozen value.
    pub fn auction_result(&self) -> String {
        let mut state = self.state.lock();
        if state.outcome == AuctionOutcome::NotTriggered {
            state.outcome = Self::uncross(&state);
            tracing::info!(
                "Auction uncrossed, ticker: {} outcome: {:?}",
                self.spec.ticker,
                state.outcome
            );
        }

        match state.outcome {
            AuctionOutcome::Matched { price_idx, size } => {
                format!("{} {:.2}", size, PRICE_TICK * price_idx as f64)
            }
            _ => "0 n/a".to_string(),
        }
    }

    /// Snapshot of the current outcome without triggering the scan
    pub fn outcome(&self) -> AuctionOutcome {
        self.state.lock().outcome
    }

    /// Count of orders accepted so far
    pub fn orders_accepted(&self) -> u32 {
        self.state.lock().orders_accepted
    }

    /// One-shot uncrossing scan over the accumulated levels.
    ///
    /// 从 min_sell_idx 向上扫描到 max_buy_idx：聚合扫描过的卖量
    /// （aggressive sell），在每个有买量的tick上撮合。
    ///
    /// The clearing tick moves only at matching points that price
    /// newly-contributed sell quantity: the current tick if the fresh sell
    /// sits on the matching tick, otherwise the ceiling of the midpoint
    /// between the two. Leftover sell drained at a later buy tick keeps the
    /// price where that sell interest was first priced, which makes the
    /// result independent of the sub-tick arrival order of same-priced
    /// orders.
    fn uncross(book: &BookState) -> AuctionOutcome {
        let (max_buy_idx, min_sell_idx) = match (book.max_buy_idx, book.min_sell_idx) {
            (Some(buy_idx), Some(sell_idx)) => (buy_idx, sell_idx),
            // 一侧没有兴趣
            _ => return AuctionOutcome::NoMatch,
        };

        if max_buy_idx < min_sell_idx {
            // 买卖价格区间不相交
            return AuctionOutcome::NoMatch;
        }

        let mut sell_to_fill: i64 = 0;
        let mut matched_size: u64 = 0;
        let mut fresh_sell_idx: Option<usize> = None;
        let mut clearing_idx: Option<usize> = None;

        for idx in min_sell_idx..=max_buy_idx {
            let sell_qty = i64::from(book.sell_qty_by_tick[idx]);
            if sell_qty > 0 {
                sell_to_fill += sell_qty;
                fresh_sell_idx = Some(idx);
            }

            let buy_qty = i64::from(book.buy_qty_by_tick[idx]);
            if buy_qty == 0 || sell_to_fill == 0 {
                continue;
            }

            let fill = buy_qty.min(sell_to_fill);
            matched_size += fill as u64;
            sell_to_fill -= fill;

            if let Some(sell_idx) = fresh_sell_idx.take() {
                clearing_idx = Some(if sell_idx == idx {
                    idx
                } else {
                    // 平均价向上取整到tick
                    (sell_idx + idx + 1) / 2
                });
            }
        }

        match clearing_idx {
            Some(price_idx) if matched_size > 0 => AuctionOutcome::Matched {
                price_idx,
                size: matched_size,
            },
            _ => AuctionOutcome::NoMatch,
        }
    }
}
