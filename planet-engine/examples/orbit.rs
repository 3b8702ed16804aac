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
//! Run the three-planet start scene headless
//!
//! ```text
//! cargo run --example orbit -- [ticks] [config.toml]
//! ```
//!
//! Destruction is switched on regardless of the config file, so `p2`, which
//! starts at the origin, is removed on the first tick.

use anyhow::{Context, Result};
use planet_engine::{PlanetSystem, SimulationConfig};

const DEFAULT_TICKS: u64 = 600;
const REPORT_EVERY: u64 = 100;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut args = std::env::args().skip(1);
    let ticks = match args.next() {
        Some(text) => text
            .parse()
            .with_context(|| format!("tick count `{}` is not a number", text))?,
        None => DEFAULT_TICKS,
    };
    let config = match args.next() {
        Some(path) => SimulationConfig::load(&path)?,
        None => SimulationConfig::default(),
    };

    let mut system = PlanetSystem::with_default_scene(config.with_destruction());
    for tick in 1..=ticks {
        for body in system.tick()? {
            log::info!("Tick {}: lost {}", tick, body.id());
        }
        if tick % REPORT_EVERY == 0 {
            for body in system.bodies() {
                let p = body.position();
                log::info!(
                    "Tick {}: {} at ({:.2}, {:.2}, {:.2})",
                    tick,
                    body.id(),
                    p.x(),
                    p.y(),
                    p.z()
                );
            }
        }
        if system.is_empty() {
            break;
        }
    }

    let survivors: Vec<&str> = system.bodies().iter().map(|b| b.id()).collect();
    log::info!("Survivors after {} ticks: {:?}", system.ticks(), survivors);
    Ok(())
}
