use log::{error, info};
use tokio::io::BufReader;

use streakcircle_infrastructure::logging::init_logger;
use streakcircle_lib::application::services::{ConfigService, LogLevel};
use streakcircle_lib::presentation::error::ErrorResponse;
use streakcircle_lib::presentation::state::AppState;
use streakcircle_lib::presentation::trigger_intake::run_intake;

const USAGE: &str =
    "usage: streakcircle [status <group-id>... | member <member-id> | log-level <level>]";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let mut config = ConfigService::load()?;
    init_logger(config.log_dir()?, config.get_log_level().as_str())?;

    info!("StreakCircle starting (config: {:?})", config.config_path());

    let args: Vec<String> = std::env::args().skip(1).collect();

    // Config-only command, no database needed
    if args.first().map(String::as_str) == Some("log-level") {
        let Some(level) = args.get(1) else {
            anyhow::bail!(USAGE);
        };
        config.set_log_level(level.parse::<LogLevel>()?)?;
        println!("{}", config.get_log_level().as_str());
        return Ok(());
    }

    let state = AppState::new(&config.database_path()?).await?;

    match args.first().map(String::as_str) {
        // Default: read trigger envelopes from stdin until EOF
        None => {
            let stdin = BufReader::new(tokio::io::stdin());
            let summary = run_intake(stdin, state.runtime.event_bus.as_ref()).await?;
            info!(
                "Processed {} trigger(s), skipped {}",
                summary.published, summary.skipped
            );
        }
        Some("status") => {
            for group_id in &args[1..] {
                match state.queries.group_streak.get_group_streak(group_id).await {
                    Ok(dto) => println!("{}", serde_json::to_string(&dto)?),
                    Err(e) => print_error(ErrorResponse::from(e))?,
                }
            }
        }
        Some("member") => {
            let Some(member_id) = args.get(1) else {
                anyhow::bail!(USAGE);
            };
            match state.queries.group_streak.get_member_streaks(member_id).await {
                Ok(streaks) => println!("{}", serde_json::to_string(&streaks)?),
                Err(e) => print_error(ErrorResponse::from(e))?,
            }
        }
        Some(other) => {
            error!("Unknown command: {}", other);
            anyhow::bail!(USAGE);
        }
    }

    Ok(())
}

fn print_error(response: ErrorResponse) -> anyhow::Result<()> {
    error!("{}", response);
    println!("{}", serde_json::to_string(&response)?);
    Ok(())
}
