//! Headless engagement runner.
//!
//! Loads a scenario, fights the attacker against every enemy in order, and
//! prints the war reports with their replay digests.

mod scenario;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::Serialize;
use std::fs;
use std::path::PathBuf;

use warfront_core::progression::LevelCurve;
use warfront_core::{engage, hash_war_result, Battle, BattleConfig, Formation, Outcome, WarReport};

use crate::scenario::Scenario;

/// Warfront engagement runner
#[derive(Parser, Debug)]
#[command(name = "warfront")]
#[command(about = "Resolve an army's arrival against the formations stationed there")]
struct Args {
    /// Scenario file (JSON)
    #[arg(long)]
    scenario: PathBuf,

    /// Battle config file (TOML). Defaults reproduce live balance.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Random seed for deterministic runs
    #[arg(long)]
    seed: Option<u64>,

    /// Output format
    #[arg(long, value_enum, default_value_t = Format::Json)]
    format: Format,

    /// Log every round and strike to stderr
    #[arg(long, short = 'v')]
    verbose: bool,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum Format {
    Json,
    Text,
}

/// JSON output structure
#[derive(Serialize)]
struct RunOutput<'a> {
    seed: u64,
    last_outcome: Option<Outcome>,
    digests: Vec<u64>,
    reports: &'a [WarReport],
    attacker: &'a Formation,
    enemies: &'a [Formation],
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);

    let mut scenario = Scenario::load(&args.scenario)?;
    let config = match &args.config {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("reading config {}", path.display()))?;
            BattleConfig::from_toml_str(&text)
                .with_context(|| format!("loading config {}", path.display()))?
        }
        None => BattleConfig::default(),
    };

    let seed = args.seed.unwrap_or_else(rand::random);
    tracing::info!(seed, enemies = scenario.enemies.len(), "starting engagement");

    let battle = Battle::new(config)?.with_bonuses(scenario.bonus_table());
    let levels = scenario.level_table();
    let curve = levels.as_ref().map(|table| table as &dyn LevelCurve);
    let mut rng = ChaCha8Rng::seed_from_u64(seed);

    let engagement = engage(
        &battle,
        &mut scenario.attacker,
        &mut scenario.enemies,
        curve,
        &mut rng,
    )
    .context("engagement failed")?;

    let digests: Vec<u64> = engagement
        .reports
        .iter()
        .map(|report| hash_war_result(&report.result))
        .collect();

    match args.format {
        Format::Json => {
            let output = RunOutput {
                seed,
                last_outcome: engagement.last_outcome,
                digests,
                reports: &engagement.reports,
                attacker: &scenario.attacker,
                enemies: &scenario.enemies,
            };
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        Format::Text => print_text(seed, &engagement.reports, &digests),
    }

    Ok(())
}

fn init_tracing(verbose: bool) {
    let level = if verbose {
        tracing::Level::TRACE
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()),
        )
        .init();
}

fn print_text(seed: u64, reports: &[WarReport], digests: &[u64]) {
    println!("seed {seed}");
    for (index, (report, digest)) in reports.iter().zip(digests).enumerate() {
        let opponent = report
            .defense_before
            .as_ref()
            .map_or_else(|| "nobody".to_string(), |d| format!("formation {}", d.formation));
        let events: usize = report.result.rounds().iter().map(|r| r.len()).sum();
        println!(
            "battle {}: vs {opponent}: {} after {} rounds ({events} strikes) digest {digest:016x}",
            index + 1,
            report.result.outcome(),
            report.result.rounds().len(),
        );
        if let (Some(before), Some(after)) = (&report.defense_before, &report.defense_after) {
            println!(
                "  attacker soldiers {:?} -> {:?}",
                report.attack_before.soldiers, report.attack_after.soldiers
            );
            println!("  defender soldiers {:?} -> {:?}", before.soldiers, after.soldiers);
        }
    }
}
