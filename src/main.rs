use clap::Parser;
use hex_skirmish::config::AppConfig;
use hex_skirmish::game::run_matches;
use hex_skirmish::logging::setup_logging;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "hex_skirmish", version, about)]
struct Config {
    /// JSON configuration file; flags below override its values
    #[arg(short = 'c', long)]
    config: Option<PathBuf>,

    /// Number of AI-vs-AI matches to play
    #[arg(short = 'm', long, default_value_t = 1)]
    matches: usize,

    /// Seed of the first match
    #[arg(long)]
    seed: Option<u64>,

    /// Seconds of planning per turn
    #[arg(short = 't', long)]
    time_budget: Option<f64>,

    /// Cap on search iterations per turn
    #[arg(short = 'i', long)]
    iterations: Option<usize>,

    /// Map radius in hexes
    #[arg(long)]
    radius: Option<u32>,

    /// Number of players
    #[arg(short = 'p', long)]
    players: Option<usize>,

    /// Rounds before a match is scored on material
    #[arg(long)]
    max_turns: Option<u32>,

    /// Write the match reports to this JSON file
    #[arg(short = 'r', long)]
    report: Option<PathBuf>,

    /// Log level used when RUST_LOG is not set
    #[arg(long, default_value = "info")]
    log_level: String,

    /// Directory for rotating log files
    #[arg(long)]
    log_dir: Option<PathBuf>,
}

impl Config {
    fn app_config(&self) -> hex_skirmish::Result<AppConfig> {
        let mut app = match &self.config {
            Some(path) => AppConfig::load(path)?,
            None => AppConfig::default(),
        };
        if let Some(seed) = self.seed {
            app.seed = seed;
        }
        if let Some(seconds) = self.time_budget {
            app.planner.time_budget_secs = seconds;
        }
        if let Some(iterations) = self.iterations {
            app.planner.max_iterations = Some(iterations);
        }
        if let Some(radius) = self.radius {
            app.world.radius = radius;
        }
        if let Some(players) = self.players {
            app.world.players = players;
        }
        if let Some(max_turns) = self.max_turns {
            app.max_turns = max_turns;
        }
        app.validate()?;
        Ok(app)
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Config::parse();
    let _logger = setup_logging(&cli.log_level, cli.log_dir.as_deref())?;

    let app = cli.app_config()?;
    log::info!(
        "{} v{}: {} match(es), radius {}, {} players, {:.2}s per turn",
        hex_skirmish::NAME,
        hex_skirmish::VERSION,
        cli.matches,
        app.world.radius,
        app.world.players,
        app.planner.time_budget_secs
    );

    let batch = run_matches(&app, cli.matches);
    let reports = &batch.reports;

    let mut wins = vec![0usize; app.world.players];
    let mut draws = 0;
    for report in reports {
        match report.winner {
            Some(player) if player < wins.len() => wins[player] += 1,
            _ => draws += 1,
        }
    }
    log::info!(
        "{} match(es) played: wins per player {:?}, {} undecided",
        reports.len(),
        wins,
        draws
    );

    if let Some(path) = &cli.report {
        std::fs::write(path, serde_json::to_string_pretty(reports)?)?;
        log::info!("reports written to {}", path.display());
    }

    if !batch.is_success() {
        let seeds: Vec<u64> = batch.failures.iter().map(|(seed, _)| *seed).collect();
        return Err(format!(
            "{} of {} match(es) failed (seeds {:?})",
            batch.failures.len(),
            cli.matches,
            seeds
        )
        .into());
    }
    Ok(())
}
