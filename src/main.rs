use anyhow::{Result, bail};
use file_combiner::{
    CombineEvent, CombinerEngine, Session, config::Config, gather, ui::select_files_tui,
};
use std::io::Write;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

fn init_tracing(default_level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    let config = Config::from_cli()?;
    init_tracing(config.log_level());

    let mut session = Session::new();
    session.set_root(&config.root)?;
    session.set_output(&config.output);

    // Seed the selection; bad entries are reported and skipped
    for path in gather::expand_paths(&config.root, &config.seed_paths())? {
        match session.add_path(&path) {
            Ok(outcome) => info!("{:?}: {} files added", path, outcome.added()),
            Err(e) => warn!("{e}"),
        }
    }

    if config.interactive && !select_files_tui(&mut session)? {
        eprintln!("Cancelled");
        return Ok(());
    }

    if session.exclude_output() {
        warn!("Skipping output file {:?} found in the selection", config.output);
    }
    let handle = CombinerEngine::new().spawn(session.job())?;
    let mut stderr = std::io::stderr();
    let mut outcome = None;
    for event in handle.events.iter() {
        match event {
            CombineEvent::Progress(p) => {
                let _ = write!(stderr, "\r[{:>3}%] {:<20}", p.percent, p.status);
                let _ = stderr.flush();
            }
            CombineEvent::Done(result) => outcome = Some(result),
        }
    }
    let _ = writeln!(stderr);
    if handle.join().is_err() {
        bail!("combiner thread panicked");
    }

    match outcome {
        Some(Ok(summary)) => {
            eprintln!("{}", summary.message());
            if summary.unreadable > 0 {
                warn!("{} files could not be read", summary.unreadable);
            }
            Ok(())
        }
        Some(Err(e)) => Err(e.into()),
        None => bail!("combiner finished without reporting a result"),
    }
}
