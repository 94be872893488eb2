/// CLI Interface Module
///
/// This module provides the line-oriented console front end for the auction
/// engine. It serves as the primary entry point for the application when
/// run as a standalone binary for manual testing.
///
/// ## Responsibilities
/// - Parse command-line arguments
/// - Initialize the logging system
/// - Construct one engine instance and feed it stdin order lines
/// - Trigger the auction and report the result on an empty line

use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::domain::auction::{AuctionSpec, DiscreteAuction};

/// 离散竞价引擎命令行配置
#[derive(Parser, Debug, Clone)]
#[command(name = "auction-engine")]
#[command(version = "0.1.0")]
#[command(about = "Discrete call-auction price-discovery engine", long_about = None)]
pub struct CliConfig {
    /// 标的代码
    #[arg(short, long, default_value = "SBER")]
    pub ticker: String,

    /// 最大接受订单数
    #[arg(short = 'n', long, default_value_t = 1_000_000)]
    pub orders_limit: u32,

    /// 价格下限（主货币单位）
    #[arg(long, default_value_t = 1)]
    pub min_price: u32,

    /// 价格上限（主货币单位）
    #[arg(long, default_value_t = 100)]
    pub max_price: u32,

    /// 单笔订单最大数量
    #[arg(short = 's', long, default_value_t = 1000)]
    pub max_order_size: i32,

    /// 日志级别
    #[arg(short = 'l', long, default_value = "info", value_parser = ["trace", "debug", "info", "warn", "error"])]
    pub log_level: String,
}

/// Runs the CLI application
///
/// This is the main entry point for the CLI interface: builds one engine
/// instance from the arguments and drives it from stdin until an empty
/// line triggers the auction.
pub async fn run() {
    // 解析命令行参数
    let config = CliConfig::parse();

    // 初始化日志系统
    init_logging(&config.log_level);

    tracing::info!("Discrete auction starting");
    tracing::info!("配置: {:?}", config);

    let auction = DiscreteAuction::new(AuctionSpec::new(
        &config.ticker,
        config.orders_limit,
        config.min_price,
        config.max_price,
        config.max_order_size,
    ));

    show_usage();

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        match lines.next_line().await {
            Ok(Some(line)) => {
                if line.is_empty() {
                    tracing::info!("Auction result: {}", auction.auction_result());
                    break;
                }

                if let Err(reason) = auction.submit_line(&line) {
                    tracing::error!("Can't handle: {} reason: {}", line.to_uppercase(), reason);
                }
            }
            // stdin关闭而未触发撮合
            Ok(None) => break,
            Err(e) => {
                tracing::error!("stdin read failed: {}", e);
                break;
            }
        }
    }
}

/// 打印使用说明
fn show_usage() {
    tracing::info!("Please enter orders in format: side (B|S) qty price");
    tracing::info!("example: B 120 10.15");
    tracing::info!("or empty line for starting auction matching");
}

/// 初始化日志系统
fn init_logging(level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_config_default() {
        // 测试默认配置
        let config = CliConfig::parse_from(["auction-engine"]);
        assert_eq!(config.ticker, "SBER");
        assert_eq!(config.orders_limit, 1_000_000);
        assert_eq!(config.min_price, 1);
        assert_eq!(config.max_price, 100);
        assert_eq!(config.max_order_size, 1000);
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn test_cli_config_custom() {
        // 测试自定义配置
        let config = CliConfig::parse_from([
            "auction-engine",
            "--ticker", "GAZP",
            "--orders-limit", "5000",
            "--min-price", "10",
            "--max-price", "500",
            "--max-order-size", "250",
            "--log-level", "debug",
        ]);

        assert_eq!(config.ticker, "GAZP");
        assert_eq!(config.orders_limit, 5000);
        assert_eq!(config.min_price, 10);
        assert_eq!(config.max_price, 500);
        assert_eq!(config.max_order_size, 250);
        assert_eq!(config.log_level, "debug");
    }

    #[test]
    fn test_cli_config_short_flags() {
        // 测试短参数
        let config = CliConfig::parse_from([
            "auction-engine",
            "-t", "LKOH",
            "-n", "100",
            "-s", "50",
            "-l", "warn",
        ]);

        assert_eq!(config.ticker, "LKOH");
        assert_eq!(config.orders_limit, 100);
        assert_eq!(config.max_order_size, 50);
        assert_eq!(config.log_level, "warn");
    }
}
