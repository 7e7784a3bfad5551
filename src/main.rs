use std::io::Write;
use std::time::Duration;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use tally::config::{AppConfig, InputBackend};
use tally::sim::{SimBoard, service};

#[tokio::main]
async fn main() -> Result<(), String> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = AppConfig::load();
    let board = SimBoard::new();

    // Fatal by design: without the input peripheral the device is unusable,
    // so report once and stop.
    let session = match service::spawn(config.clone(), board.clone()) {
        Ok(handle) => handle,
        Err(err) => {
            tracing::error!(%err, "input peripheral failed to initialize");
            std::process::exit(1);
        }
    };

    loop {
        let line = readline()?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        match respond(line, &board, &config).await {
            Ok(quit) => {
                if quit {
                    break;
                }
            }
            Err(err) => {
                write!(std::io::stdout(), "{err}").map_err(|e| e.to_string())?;
                std::io::stdout().flush().map_err(|e| e.to_string())?;
            }
        }
    }

    session.abort();
    Ok(())
}

#[derive(Parser)]
#[command(version, about = "simulated counter device")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Turn the knob clockwise
    Cw {
        #[arg(default_value_t = 1)]
        detents: u32,
    },
    /// Turn the knob counter-clockwise
    Ccw {
        #[arg(default_value_t = 1)]
        detents: u32,
    },
    /// Hold the button down
    Press,
    /// Let go of the button
    Release,
    /// Press and release, held long enough to debounce
    Click,
    /// Show the loaded configuration
    Config,
    /// Persist a different input backend ("pins" or "breakout"); takes
    /// effect on the next start
    SetBackend { backend: String },
    Exit,
}

async fn respond(line: &str, board: &SimBoard, config: &AppConfig) -> Result<bool, String> {
    let mut args = shlex::split(line).ok_or("error: Invalid quoting")?;
    args.insert(0, "tally".to_string());
    let cli = Cli::try_parse_from(args).map_err(|e| e.to_string())?;

    match &cli.command {
        Some(Commands::Cw { detents }) => {
            for _ in 0..*detents {
                board.turn_cw();
                // Give the poll loop a chance to observe each detent.
                tokio::time::sleep(config.poll_interval() * 2).await;
            }
        }
        Some(Commands::Ccw { detents }) => {
            for _ in 0..*detents {
                board.turn_ccw();
                tokio::time::sleep(config.poll_interval() * 2).await;
            }
        }
        Some(Commands::Press) => board.press(),
        Some(Commands::Release) => board.release(),
        Some(Commands::Click) => {
            board.press();
            tokio::time::sleep(config.debounce() + Duration::from_millis(50)).await;
            board.release();
            tokio::time::sleep(config.debounce() + Duration::from_millis(50)).await;
        }
        Some(Commands::Config) => {
            println!("{config:#?}");
        }
        Some(Commands::SetBackend { backend }) => {
            let mut updated = config.clone();
            updated.backend = match backend.as_str() {
                "pins" => InputBackend::Pins,
                "breakout" => InputBackend::Breakout,
                other => return Err(format!("error: unknown backend '{other}'\n")),
            };
            updated.save();
            println!("backend set to {backend}; restart to apply");
        }
        Some(Commands::Exit) => {
            write!(std::io::stdout(), "quitting...").map_err(|e| e.to_string())?;
            std::io::stdout().flush().map_err(|e| e.to_string())?;
            return Ok(true);
        }
        None => {}
    }

    Ok(false)
}

fn readline() -> Result<String, String> {
    write!(std::io::stdout(), "> ").map_err(|e| e.to_string())?;
    std::io::stdout().flush().map_err(|e| e.to_string())?;
    let mut buffer = String::new();
    std::io::stdin()
        .read_line(&mut buffer)
        .map_err(|e| e.to_string())?;
    Ok(buffer)
}
