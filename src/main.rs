/// Main entry point for the auction engine application
///
/// This serves as a thin wrapper that delegates to the interfaces layer.
/// The actual application logic is implemented in `interfaces::cli`.

use auction_engine::interfaces::cli;

#[tokio::main]
async fn main() {
    cli::run().await;
}
