#![warn(clippy::pedantic, clippy::style, clippy::nursery)]

use std::{path::PathBuf, time::Instant};

use clap::Parser;
use heredity::{data, infer, Probabilities};

#[derive(Parser, Debug)]
struct Args {
    /// Pedigree CSV with the columns `name,mother,father,trait`
    #[arg(long)]
    data: PathBuf,
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    let population = match data::load(&args.data) {
        Ok(population) => population,
        Err(err) => {
            log::error!("could not load {}: {err}", args.data.display());
            return;
        }
    };
    log::info!("loaded {} people", population.len());

    let start = Instant::now();
    let posterior = infer(&population, &Probabilities::default());
    log::info!("inference took {:?}", start.elapsed());

    print!("{posterior}");
}
