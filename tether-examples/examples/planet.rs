//! # Planet
//!
//! Bounds the mass and density of a small body from a loose estimate of its
//! radius and surface gravity.
//!
//! The seeds in `data/planet.toml` give the radius as a range in kilometers and
//! the surface gravity as a range in g. The solver derives a mass range from
//! the surface gravity equation, then a density range from the spherical
//! density equation, and stops once neither equation can narrow anything.
//!
//! ## Running the Example
//!
//! ```sh
//! cargo run --example planet
//! ```
//!
//! Set `RUST_LOG=tether=trace` to see every evaluation.

use std::error::Error;

use tracing_subscriber::EnvFilter;

use tether_core::Store;
use tether_examples::planetary::{self, Constants};
use tether_solve::fixed_point::{self, Action, Config, Event};

const SEEDS: &str = include_str!("../data/planet.toml");

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("tether=debug")),
        )
        .init();

    let catalog = planetary::catalog(Constants::default())?;
    let mut store = Store::seeded(planetary::load_seeds(SEEDS)?)?;

    let observer = |event: &Event<'_>| -> Option<Action> {
        if let Event::CycleCompleted { cycle, updates, .. } = event {
            for update in *updates {
                let verdict = if update.changed { "narrowed" } else { "unchanged" };
                println!(
                    "cycle {cycle}: {} -> {} = {} ({verdict})",
                    update.equation, update.target, update.value
                );
            }
        }
        None
    };

    let solution = fixed_point::solve(&catalog, &mut store, &Config::default(), observer)?;

    println!(
        "\n{:?} after {} cycle(s), {} change(s)\n",
        solution.status, solution.cycles, solution.changes
    );
    for variable in store.all() {
        println!(
            "{:<8} {:<16} {:<18} {}",
            variable.name(),
            format!("{:?}", variable.precision()),
            variable.unit(),
            variable.value()
        );
    }

    Ok(())
}
