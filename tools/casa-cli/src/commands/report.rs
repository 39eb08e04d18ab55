//! Print best sellers and order volume.

use anyhow::Result;
use casa_db::Store;
use chrono::{Duration, Utc};
use clap::Args;
use console::style;

use casa_commerce::reports;

use crate::config::CliConfig;

#[derive(Args)]
pub struct ReportArgs {
    /// How many days back to report over, ending today
    #[arg(long, default_value_t = 7)]
    days: i64,
}

pub fn report(config: &CliConfig, args: &ReportArgs) -> Result<()> {
    let store = Store::open(&config.store.path)?;
    let end = Utc::now().date_naive();
    let start = end - Duration::days(args.days.max(1) - 1);

    println!(
        "{}",
        style(format!("Best sellers {start} .. {end}")).bold().underlined()
    );
    let sellers = reports::best_sellers(&store, start, end)?;
    if sellers.is_empty() {
        println!("  no sales in this window");
    }
    for (rank, seller) in sellers.iter().enumerate() {
        let label = seller
            .label
            .as_ref()
            .map(|l| l.name.as_str())
            .unwrap_or("-");
        println!(
            "  {:>2}. {} ({label}) - {} sold",
            rank + 1,
            seller.book.name,
            seller.total_quantity
        );
    }

    println!();
    println!(
        "{}",
        style(format!("Orders per day {start} .. {end}")).bold().underlined()
    );
    for day in reports::order_volume(&store, start, end)? {
        println!("  {}  {}", day.date, "#".repeat(day.count as usize));
    }

    Ok(())
}
