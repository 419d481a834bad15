use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use clap::Parser;
use recoflow::{
    config::Config,
    display::JsonDisplay,
    event::{store::EventStore, types::EventFile},
    logging,
    pipeline::Pipeline,
};
use tracing::info;

/// Run reconstruction content algorithms over an event fixture.
#[derive(Debug, Parser)]
#[command(name = "recoflow", version)]
struct Args {
    /// Pipeline configuration file
    #[arg(long)]
    config: PathBuf,

    /// Event fixture to process
    #[arg(long)]
    event: PathBuf,

    /// Where to write display records (defaults to stdout)
    #[arg(long)]
    output: Option<PathBuf>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    logging::init_logging();
    let args = Args::parse();

    let config = Config::from_path(&args.config)?;
    let pipeline = Pipeline::from_config(&config)?;

    let event: EventFile = serde_json::from_str(&fs::read_to_string(&args.event)?)?;
    let mut store = EventStore::from_event(event);

    let writer: Box<dyn Write + Send> = match &args.output {
        Some(path) => Box::new(BufWriter::new(File::create(path)?)),
        None => Box::new(io::stdout()),
    };
    let display = JsonDisplay::new(writer);

    info!(algorithms = pipeline.len(), "processing event");
    pipeline.run_event(&mut store, &display)?;
    info!("event processed");

    Ok(())
}
