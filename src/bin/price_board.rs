//! Price Board
//!
//! Loads a fixture catalogue, resolves every product's price at a chosen
//! instant and prints the storefront price board.
//!
//! Use `-f` to load a fixture set by name
//! Use `-a` to price at a fixed RFC 3339 instant instead of now

use std::{io, time::Instant};

use anyhow::Result;
use clap::Parser;
use humanize_duration::{Truncate, prelude::DurationExt};
use jiff::Timestamp;

use tindahan::{board::PriceBoard, fixtures::Fixture, utils::PriceBoardArgs};

/// Price Board
#[expect(clippy::print_stdout, reason = "Demo binary")]
pub fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = PriceBoardArgs::parse();

    let now = args
        .at
        .as_deref()
        .map(str::parse::<Timestamp>)
        .transpose()?
        .unwrap_or_else(Timestamp::now);

    let fixture = Fixture::from_set(&args.fixture)?;

    let start = Instant::now();

    let rows = fixture.resolve_all(now)?;

    let elapsed = start.elapsed();

    let board = PriceBoard::with_rows(rows);

    let stdout = io::stdout();
    let mut handle = stdout.lock();

    board.write_to(
        &mut handle,
        fixture.product_meta_map(),
        fixture.category_meta_map(),
        fixture.promotion_meta_map(),
        fixture.promotions(),
        now,
    )?;

    println!("\nResolved at {now} in {}", elapsed.human(Truncate::Micro));

    Ok(())
}
