use clap::Parser;
use eyre::Result;
use tranquil_app::{cli::Cli, config, state::AppState, telemetry};

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();

    let config = config::load_config()?;
    telemetry::init_tracing(&config)?;

    let state = AppState::open(config)?;
    let report = state.status_report().await?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    if report.pending.is_empty() {
        println!("No unfinished flows.");
    }
    for flow in &report.pending {
        println!(
            "Unfinished {} flow at {} (saved {})",
            flow.flow_type, flow.current_screen, flow.saved_at
        );
    }

    for latest in &report.latest {
        println!(
            "{}: {} ({}) on {}",
            latest.kind, latest.score, latest.severity, latest.completed_at
        );
        if latest.needs_crisis_follow_up {
            println!("  Review the crisis resource plan.");
        }
    }

    Ok(())
}
