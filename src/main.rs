// filepath: src/main.rs

use clap::Parser;
use log::{info, warn, LevelFilter};
use std::process;
use xbanish::{snoop, BanishConfig, Banisher, XConnection};

const USAGE: &str = "usage: xbanish [-d]";

/// Hide the X11 mouse pointer while typing, show it again when the mouse moves.
#[derive(Parser)]
#[command(name = "xbanish", disable_help_flag = true)]
struct Args {
    /// Log every event and what it did to the cursor
    #[arg(short, long)]
    debug: bool,
}

fn main() {
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(_) => {
            eprintln!("{}", USAGE);
            process::exit(1);
        }
    };

    let (config, config_err) = match BanishConfig::load_from_file() {
        Ok(config) => (config, None),
        Err(e) => (BanishConfig::default(), Some(e)),
    };

    let mut builder = env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(config.log_filter(args.debug)),
    );
    if config.debug_enabled(args.debug) {
        // RUST_LOG must not silence -d
        builder.filter_module("xbanish", LevelFilter::Debug);
    }
    builder.init();
    if let Some(e) = config_err {
        warn!("Ignoring configuration: {}", e);
    }

    if let Err(e) = run(&config) {
        eprintln!("xbanish: {}", e);
        process::exit(1);
    }
}

fn run(config: &BanishConfig) -> xbanish::Result<()> {
    let conn = XConnection::connect(config.display.as_deref())?;

    info!("Snooping on the window tree");
    snoop(&conn, conn.root())?;

    Banisher::new(&conn).run()?;
    Ok(())
}
