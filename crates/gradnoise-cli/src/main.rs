mod config;
mod output;

use std::io;

use config::SamplerConfig;
use tracing::{error, info};

const DEFAULT_CONFIG: &str = "gradnoise.toml";

fn main() {
    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_CONFIG.to_string());

    let config = match SamplerConfig::load(&path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load {path}: {e}");
            std::process::exit(1);
        }
    };

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.logging.level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(io::stderr)
        .init();

    if let Err(e) = run(&config) {
        error!("{e}");
        std::process::exit(1);
    }
}

fn run(config: &SamplerConfig) -> Result<(), Box<dyn std::error::Error>> {
    info!("gradnoise v{} sampling", env!("CARGO_PKG_VERSION"));
    match config.engine.seed {
        Some(seed) => info!("Permutation: seeded ({seed})"),
        None => info!("Permutation: reference"),
    }

    let request = config.request()?;
    info!(
        "Noise: repeat {}, octaves {}, persistence {}",
        request.options.repeat,
        request.options.octaves.octaves(),
        request.options.octaves.persistence()
    );
    info!(
        "Sequence: start {:?}, delta {:?}, count {}",
        request.start(),
        request.delta(),
        request.count()
    );

    let engine = config.engine();
    let values = if config.sample.parallel {
        engine.sample_sequence_par(&request, config.sample.chunk_len)?
    } else {
        engine.sample_sequence_vec(&request)
    };

    let stdout = io::stdout();
    let mut out = io::BufWriter::new(stdout.lock());
    output::write_values(&mut out, &values, config.output.format)?;
    info!("Wrote {} samples", values.len());
    Ok(())
}
