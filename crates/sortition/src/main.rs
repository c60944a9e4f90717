use anyhow::Context;
use clap::Parser;
use rand::SeedableRng;
use rand::rngs::SmallRng;
use sortition::pool::DrawPool;
use sortition::roster::Roster;
use sortition::source::{RosterSource, SheetSource, SheetUrl};
use tokio::runtime::Runtime;

#[derive(Parser, Debug)]
#[command(name = "sortition", version, about, long_about = None)]
struct Cli {
    /// Draw from a fixed pool of numbers 1..=COUNT
    #[arg(short = 'n', long, default_value_t = 500, conflicts_with = "url")]
    count: u32,

    /// Fetch a roster (JSON array of rows) and size the pool to its rows
    #[arg(short, long)]
    url: Option<String>,

    /// How many numbers to draw
    #[arg(short, long, default_value_t = 1)]
    draws: u32,

    /// Seed the generator for reproducible draws
    #[arg(short, long)]
    seed: Option<u64>,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let roster = cli
        .url
        .map(|url| fetch_roster(SheetUrl::new(url)))
        .transpose()?;

    let mut pool = match &roster {
        Some(roster) => DrawPool::new(roster.len() as u32),
        None => DrawPool::new(cli.count),
    };

    if pool.is_empty() {
        anyhow::bail!("nothing to draw from");
    }

    let mut rng = match cli.seed {
        Some(seed) => SmallRng::seed_from_u64(seed),
        None => SmallRng::from_os_rng(),
    };

    let draws = cli.draws.min(pool.capacity());
    if draws < cli.draws {
        log::warn!("Only {} numbers in the pool, drawing them all", draws);
    }

    for _ in 0..draws {
        let value = pool.draw(&mut rng)?;
        match roster.as_ref().and_then(|r| r.row(value)) {
            Some(row) => println!(
                "{}\t{}\t{}",
                value,
                row.entrant().map(|e| e.to_string()).unwrap_or_default(),
                row.prize().map(|p| p.to_string()).unwrap_or_default(),
            ),
            None => println!("{}", value),
        }
    }

    Ok(())
}

fn fetch_roster(url: SheetUrl) -> anyhow::Result<Roster> {
    let rt = Runtime::new().context("Failed to create Tokio runtime")?;
    rt.block_on(SheetSource::new(url.clone()).load())
        .with_context(|| format!("Failed to load roster from {}", url))
}
