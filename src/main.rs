use anyhow::Context;
use clap::Parser;
use std::io::{self, BufRead};
use std::path::Path;
use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use bolt_builder::catalog::Catalog;
use bolt_builder::cli::{self, Flow, Repl};
use bolt_builder::config::Config;
use bolt_builder::debounce::SystemClock;
use bolt_builder::log;
use bolt_builder::persist::PersistedRecord;
use bolt_builder::session::Session;
use bolt_builder::ux;

/// How long the loop waits for input before ticking the session timers.
const INPUT_POLL: Duration = Duration::from_millis(100);

fn load_config(args: &cli::Args) -> anyhow::Result<Config> {
    let mut cfg = match &args.config {
        Some(path) => Config::load(Path::new(path)).with_context(|| format!("loading config {path}"))?,
        None => Config::default(),
    };
    if let Some(backend) = args.backend {
        cfg.backend = backend;
    }
    if let Some(path) = &args.data_path {
        cfg.data_path = path.clone();
    }
    if let Some(key) = &args.key {
        cfg.key = key.clone();
    }
    if let Some(catalog) = &args.catalog {
        cfg.catalog = Some(catalog.clone());
    }
    cfg.check()?;
    Ok(cfg)
}

fn main() -> anyhow::Result<()> {
    let args = cli::Args::parse();
    log::init_tracing(args.debug);

    let cfg = load_config(&args)?;
    let catalog = match &cfg.catalog {
        Some(path) => Catalog::load(Path::new(path)).with_context(|| format!("loading catalog {path}"))?,
        None => Catalog::builtin(),
    };

    let mut session = Session::from_config(&cfg, Arc::new(SystemClock)).context("opening project storage")?;

    if args.debug {
        let record = PersistedRecord::capture(session.store(), chrono::Utc::now());
        log::print_record_debug("startup", &record)?;
    }

    if let Some(variant) = args.render {
        println!("{}", session.render_prompt(Some(variant)));
        session.shutdown();
        return Ok(());
    }

    ux::print_load_outcome(session.startup_outcome());
    ux::info("type `help` for commands");

    let mut repl = Repl::new(session, catalog);
    let (tx, rx) = mpsc::channel::<String>();
    thread::Builder::new()
        .name("stdin".into())
        .spawn(move || {
            for line in io::stdin().lock().lines() {
                let Ok(line) = line else { break };
                if tx.send(line).is_err() {
                    break;
                }
            }
        })
        .context("starting input reader")?;

    ux::prompt_line();
    while repl.pump(&rx, INPUT_POLL) == Flow::Continue {}
    Ok(())
}
