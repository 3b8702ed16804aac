// Copyright 2025 John Brosnihan
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//! Write a file of randomly generated planets
//!
//! ```text
//! generate-planets 25 --output planets.toml --seed 7
//! ```
//!
//! A negative count is rejected before anything is written.

use anyhow::{bail, Context, Result};
use clap::Parser;
use planet_engine::storage::DEFAULT_FILE_NAME;
use planet_engine::{PlanetSystem, SimulationConfig};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(about = "Generate random planets and save them for the simulation")]
struct Args {
    /// Number of planets to generate
    #[arg(allow_negative_numbers = true)]
    count: i64,

    /// Destination file
    #[arg(short, long, default_value = DEFAULT_FILE_NAME)]
    output: PathBuf,

    /// Seed for reproducible output
    #[arg(short, long)]
    seed: Option<u64>,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let count = match usize::try_from(args.count) {
        Ok(count) => count,
        Err(_) => bail!("planet count must be non-negative, got {}", args.count),
    };

    let mut config = SimulationConfig::new();
    config.seed = args.seed;
    let mut system = PlanetSystem::new(config);
    for _ in 0..count {
        system.add_random_body();
    }

    system
        .save(&args.output)
        .with_context(|| format!("failed to write {}", args.output.display()))?;

    println!(
        "{} planet(s) have been generated, the result is written to {}.",
        count,
        args.output.display()
    );
    Ok(())
}
