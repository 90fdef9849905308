// Reads job requests as JSON lines on stdin and prints each accepted job as a
// JSON line on stdout for the execution engine to pick up.
use std::io::{self, BufRead, Write};

use log::{debug, error, info, warn};

use encode_jobs::{FrameDimensionCatalog, JobRegistry, Settings, process_request};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let catalog = FrameDimensionCatalog::global().map_err(|e| {
        error!("Invalid frame dimension catalog: {}", e);
        e
    })?;
    let settings = Settings::load().map_err(|e| {
        error!("Failed to load settings: {}", e);
        e
    })?;

    let mut registry = JobRegistry::new();
    let mut accepted = 0usize;
    let mut rejected = 0usize;
    let stdout = io::stdout();
    let mut out = stdout.lock();

    for (index, line) in io::stdin().lock().lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            debug!("Skipping blank line {}", index + 1);
            continue;
        }

        match process_request(&line, &settings, catalog, &mut registry) {
            Ok(json) => {
                writeln!(out, "{}", json)?;
                accepted += 1;
            }
            Err(e) => {
                warn!("Request on line {} rejected: {}", index + 1, e);
                rejected += 1;
            }
        }
    }

    out.flush()?;
    info!("Finished: {} job(s) accepted, {} rejected.", accepted, rejected);
    Ok(())
}
