//! Entry point. Wires console -> parser -> session (ledger, checks, export).

mod config;
mod console;
mod error;
mod export;
mod ledger;
mod parser;
mod session;
mod types;
mod utils;
mod validate;
mod view;

use chrono::Local;
use dotenvy::dotenv;
use tokio::sync::mpsc;
use tracing::{error, info, Level};
use tracing_subscriber::EnvFilter;

use crate::parser::Command;
use crate::session::{Reply, Session};

const DEFAULT_CONFIG_PATH: &str = "config.yaml";

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::from_default_env().add_directive(Level::INFO.into()))
        .init();

    // Load config
    let cfg_path =
        std::env::var("COVERED_CALLS_CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
    let cfg = config::AppConfig::load_or_default(&cfg_path)?;

    // One ledger per session, owned by this loop only
    let mut session = Session::new(&cfg);
    let style = session.style();
    info!(
        "Tracker started. Config={}, Theme={:?}, DefaultTicker={}",
        cfg_path,
        cfg.ui.theme,
        cfg.default_ticker()
    );

    println!("{}", style.paint("Covered Calls Tracker"));
    println!("{}", view::HELP);

    // Console thread -> internal MPSC
    let (tx, mut rx) = mpsc::channel::<Command>(64);
    let _console = console::spawn(tx);

    loop {
        tokio::select! {
            maybe = rx.recv() => {
                let Some(cmd) = maybe else { break; };
                let today = Local::now().date_naive();
                match session.handle(cmd, today) {
                    Ok(reply) => {
                        println!("{}", reply.message(style));
                        if matches!(reply, Reply::Quit) {
                            break;
                        }
                    }
                    Err(e) => {
                        error!("command failed: {:#}", e);
                        println!("error: {:#}", e);
                    }
                }
            }

            _ = tokio::signal::ctrl_c() => {
                info!("Interrupted");
                break;
            }
        }
    }

    if !session.ledger().is_empty() {
        info!(calls = session.ledger().len(), "Session ended, ledger discarded");
    }
    Ok(())
}
