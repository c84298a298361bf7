//! Utils

use clap::Parser;

/// Arguments for the price board binary
#[derive(Debug, Parser)]
pub struct PriceBoardArgs {
    /// Fixture set to use for the catalogue & promotions
    #[clap(short, long, default_value = "storefront")]
    pub fixture: String,

    /// Instant to price at (RFC 3339); defaults to now
    #[clap(short, long)]
    pub at: Option<String>,
}
