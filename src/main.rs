mod config;
mod ids;
mod ipc;
mod model;
mod query;
mod report;
mod seed;
mod stats;
mod store;

use clap::Parser;
use std::io::{self, BufRead, Write};
use tracing::{info, warn};

use config::Config;
use store::Store;

fn init_logging(cfg: &Config) {
    // stdout carries the protocol; logs go to stderr.
    let filter = tracing_subscriber::EnvFilter::try_new(&cfg.log_level)
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_ansi(false);
    if cfg.log_json {
        builder.json().init();
    } else {
        builder.with_target(false).init();
    }
}

fn main() -> anyhow::Result<()> {
    let cfg = Config::parse();
    init_logging(&cfg);

    let mut store = if cfg.empty {
        Store::new(cfg.id_generator())
    } else {
        seed::seeded_store(cfg.id_generator())
    };
    store.set_duplicate_policy(cfg.on_duplicate_mark.into());

    let mut state = ipc::AppState {
        store,
        today: cfg.today,
    };
    info!(
        version = env!("CARGO_PKG_VERSION"),
        students = state.store.students().len(),
        classes = state.store.classes().len(),
        records = state.store.attendance().len(),
        today = %state.today(),
        "edutrackd ready"
    );

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    for line in stdin.lock().lines() {
        let line = match line {
            Ok(v) => v,
            Err(e) => {
                warn!(error = %e, "stdin read failed");
                break;
            }
        };
        if line.trim().is_empty() {
            continue;
        }

        let req: ipc::Request = match serde_json::from_str(&line) {
            Ok(v) => v,
            Err(e) => {
                // No id to echo back.
                warn!(error = %e, "unparseable request");
                let resp = serde_json::json!({
                    "ok": false,
                    "error": { "code": "bad_json", "message": e.to_string() }
                });
                writeln!(stdout, "{}", resp)?;
                stdout.flush()?;
                continue;
            }
        };

        let resp = ipc::handle_request(&mut state, req);
        writeln!(stdout, "{}", resp)?;
        stdout.flush()?;
    }

    info!("stdin closed; exiting");
    Ok(())
}
