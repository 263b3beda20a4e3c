//! arena-sim：
//! - 以示範隊伍執行一場戰鬥。
//! - 預設雙方都由 AI 操作，輸出戰鬥紀錄或 JSON 報告。
//! - `--interactive` 時由標準輸入操作 team 0。
mod interactive;
mod render;

use anyhow::{Context, Result};
use arena_core::{Battle, BattleConfig};
use clap::{Parser, ValueEnum};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::PathBuf;

/// 超過此行動數仍未分出勝負時停止
const TURN_LIMIT: u32 = 10_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

/// Turn-based arena battle simulator
#[derive(Parser, Debug)]
#[command(name = "arena-sim")]
#[command(about = "Run a 3v3 arena battle between the demo teams")]
struct Args {
    /// Random seed for deterministic runs
    #[arg(long)]
    seed: Option<u64>,

    /// Battle config file (TOML): class stats, AI thresholds, rewards
    #[arg(long)]
    config: Option<PathBuf>,

    /// Output format for headless runs
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Control team 0 from stdin
    #[arg(long, short = 'i')]
    interactive: bool,

    /// Log every action at debug level
    #[arg(long, short = 'v')]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose)?;

    let config = match &args.config {
        Some(path) => BattleConfig::load(path)
            .with_context(|| format!("loading battle config {}", path.display()))?,
        None => BattleConfig::default(),
    };

    let seed = args.seed.unwrap_or_else(rand::random);
    let mut rng = StdRng::seed_from_u64(seed);
    tracing::info!(seed, interactive = args.interactive, "starting battle");

    let mut battle = Battle::demo_with_config(config);

    if args.interactive {
        let stdin = std::io::stdin();
        let stdout = std::io::stdout();
        interactive::run(&mut battle, &mut rng, stdin.lock(), stdout.lock())?;
        return Ok(());
    }

    let report = battle.run_to_end(&mut rng, TURN_LIMIT)?;
    match args.format {
        OutputFormat::Text => {
            print!("{}", render::battle_log(&battle, &report, seed));
        }
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&report).context("serializing report")?;
            println!("{json}");
        }
    }
    Ok(())
}

/// 預設 info，`--verbose` 提高到 debug；RUST_LOG 可再追加其他 directive
fn init_tracing(verbose: bool) -> Result<()> {
    let level = if verbose { "debug" } else { "info" };
    let mut filter = tracing_subscriber::EnvFilter::from_default_env();
    for krate in ["arena_core", "arena_sim"] {
        filter = filter.add_directive(
            format!("{krate}={level}")
                .parse::<tracing_subscriber::filter::Directive>()
                .context("building log filter")?,
        );
    }
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .init();
    Ok(())
}
