mod args;
mod config;
mod error;
mod input;
mod output;
mod session;

use args::{usage, Args};
use config::Config;
use error::RunError;
use log::LevelFilter;
use session::Session;
use simplelog::{
    ColorChoice, CombinedLogger, Config as LogConfig, TermLogger, TerminalMode, WriteLogger,
};
use splitter::Splitter;
use std::fs::File;
use std::process;

fn main() {
    let args = match Args::parse_normalized(std::env::args_os()) {
        Ok(args) => args,
        Err(e) if !e.use_stderr() => e.exit(),
        Err(e) => {
            let _ = e.print();
            process::exit(1);
        }
    };

    if let Err(e) = init(&args) {
        eprintln!("[sptt] {}", e);
        process::exit(1);
    }

    let configured = Config::from_args(&args).and_then(|config| {
        let splitter = config.splitter()?;
        Ok((config, splitter))
    });

    let (config, splitter) = match configured {
        Ok(configured) => configured,
        Err(e) => {
            log::error!("{}", e);
            eprintln!("{}", usage());
            process::exit(1);
        }
    };

    if let Err(e) = run(config, splitter) {
        log::error!("{}", e);
        process::exit(1);
    }
}

fn init(args: &Args) -> Result<(), RunError> {
    let level = if args.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    match &args.log_file {
        Some(path) => {
            let file = File::create(path).map_err(|source| RunError::Create {
                path: path.clone(),
                source,
            })?;
            // Errors still reach the terminal when everything else goes to the file.
            CombinedLogger::init(vec![
                WriteLogger::new(level, LogConfig::default(), file),
                TermLogger::new(
                    LevelFilter::Error,
                    LogConfig::default(),
                    TerminalMode::Stderr,
                    ColorChoice::Auto,
                ),
            ])?;
        }
        None => {
            TermLogger::init(
                level,
                LogConfig::default(),
                TerminalMode::Stderr,
                ColorChoice::Auto,
            )?;
        }
    }

    Ok(())
}

fn run(config: Config, splitter: Splitter) -> Result<(), RunError> {
    let reader = input::open(&config.input)?;
    let session = Session::new(splitter, config.destination());

    // Ctrl-C ends input early: whatever was read so far is split and written.
    let handler_session = session.clone();
    ctrlc::set_handler(move || {
        log::info!("Received SIGINT, splitting the lines read so far...");
        match handler_session.finish() {
            Ok(Some(_)) => process::exit(0),
            Ok(None) => {}
            Err(e) => {
                log::error!("{}", e);
                process::exit(1);
            }
        }
    })?;

    log::info!(
        "Splitting {} with {}% training",
        config.base_name,
        config.train_percent
    );

    let progress = input::progress_bar(config.progress);
    let count = input::ingest(reader, session.splitter(), &progress)?;
    progress.finish_and_clear();

    log::info!("Read {} lines", count);

    session.finish()?;

    Ok(())
}
