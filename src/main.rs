//! Fund Matcher - Binary Entry Point
//!
//! Runs a sample reservation lifecycle against three funds and prints the
//! resulting allocation listing as JSON.

use anyhow::{Context, Result};
use rust_decimal::Decimal;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use fund_matcher::types::amount::format_amount;
use fund_matcher::{Donation, FundMatcher, MatchFund, Ratio, Settings};

fn main() -> Result<()> {
    let settings = Settings::new().context("failed to load settings")?;

    // Prefer RUST_LOG, fall back to the configured level
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&settings.log.level)))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let limits = settings.donation_limits()?;
    info!(min = %limits.min(), max = %limits.max(), "donation limits loaded");

    let funds = vec![
        MatchFund::new("fund_1", Decimal::from(100), 3)?,
        MatchFund::new("fund_2", Decimal::from(100), 7)?.with_ratio(Ratio::new(2, 1)?),
        MatchFund::new("fund_3", Decimal::from(100), 1)?,
    ];
    let mut matcher = FundMatcher::new(funds)?;

    let donations = [
        Donation::with_limits("donation_1", Decimal::from(130), &limits)?,
        Donation::with_limits("donation_2", Decimal::from(50), &limits)?,
        Donation::with_limits("donation_3", Decimal::from(120), &limits)?,
    ];
    for donation in &donations {
        matcher.reserve(donation)?;
    }

    matcher.collect(donations[0].id())?;
    matcher.expire(donations[1].id())?;

    let report = serde_json::to_string_pretty(&matcher.list_allocations())?;
    println!("{report}");

    for fund in matcher.funds() {
        info!(fund_id = %fund.id(), balance = %format_amount(fund.balance()), "fund balance");
    }
    info!(state_root = %matcher.state_root_hex(), "done");

    Ok(())
}
