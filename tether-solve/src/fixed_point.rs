//! Fixed-point constraint propagation over an equation catalog.
//!
//! # Algorithm
//!
//! Each cycle selects the viable equations (those that apply to the store and
//! have not been excluded), evaluates every one of them against the store as
//! it stood at the start of the cycle, and then applies the resulting values in
//! catalog order. An equation whose value did not narrow its target is
//! excluded for the rest of the run. The loop stops when nothing is viable,
//! when a cycle changes nothing, or when the cycle cap is reached.
//!
//! Variables only ever narrow, so a run that is not stopped by the cap is
//! guaranteed to reach a fixed point.
//!
//! # Limitations
//!
//! - **Corner sampling**: ranged inputs are propagated by evaluating each form
//!   at the endpoints of its inputs. Bounds are exact only for forms that are
//!   monotonic in each ranged input.
//! - **One unknown per equation**: an equation with two or more unknown
//!   members waits until other equations have resolved all but one of them.
//! - **Permanent exclusion**: an equation that stops making progress is not
//!   retried, even if later updates would let it narrow something again.
//!
//! # Observer Events
//!
//! - [`Event::CycleStarted`]: the viable equations of a cycle
//! - [`Event::Evaluated`]: one per viable equation, before any update is applied
//! - [`Event::CycleCompleted`]: the cycle's updates and the excluded set
//!
//! Observers can return [`Action::StopEarly`] to end the run with
//! [`Status::StoppedByObserver`].

mod action;
mod apply;
mod config;
mod error;
mod event;
mod solution;

#[cfg(test)]
mod tests;

pub use action::Action;
pub use config::{Config, ConfigError};
pub use error::Error;
pub use event::{Event, Update};
pub use solution::{Solution, Status};

use std::collections::BTreeSet;

use tether_core::{Catalog, Observer, Store};

/// Runs constraint propagation until a fixed point or the cycle cap.
///
/// Values are written into `store`, which holds the solved state afterwards
/// whether or not the run converged.
///
/// # Errors
///
/// Returns an error if an equation is misconfigured or produces an invalid
/// value, or if an update violates a variable's narrowing rules. The store
/// may hold partial results of the failing cycle.
pub fn solve<Obs>(
    catalog: &Catalog,
    store: &mut Store,
    config: &Config,
    mut observer: Obs,
) -> Result<Solution, Error>
where
    Obs: for<'a> Observer<Event<'a>, Action>,
{
    let mut excluded = BTreeSet::new();
    let mut changes = 0;

    for cycle in 1..=config.max_cycles() {
        let viable: Vec<_> = catalog
            .iter()
            .filter(|equation| !excluded.contains(equation.name()) && equation.applies(store))
            .collect();
        let names: Vec<&str> = viable.iter().map(|equation| equation.name()).collect();

        tracing::debug!(
            target: "tether::solve",
            cycle,
            viable = ?names,
            "cycle_start"
        );

        if viable.is_empty() {
            return finish(Status::ConvergedEmpty, cycle, changes, excluded);
        }

        let event = Event::CycleStarted {
            cycle,
            viable: &names,
        };
        if let Some(Action::StopEarly) = observer.observe(&event) {
            return finish(Status::StoppedByObserver, cycle, changes, excluded);
        }

        let mut evaluations = Vec::with_capacity(viable.len());
        for equation in viable {
            let evaluation = equation.evaluate(store)?;

            tracing::trace!(
                target: "tether::solve",
                cycle,
                equation = equation.name(),
                variable = %evaluation.target,
                value = %evaluation.value,
                candidates = evaluation.candidates,
                "evaluated"
            );

            let event = Event::Evaluated {
                cycle,
                equation: equation.name(),
                evaluation: &evaluation,
            };
            if let Some(Action::StopEarly) = observer.observe(&event) {
                return finish(Status::StoppedByObserver, cycle, changes, excluded);
            }

            evaluations.push((equation.name(), evaluation));
        }

        let updates = apply::apply_all(store, evaluations)?;

        let changed = updates.iter().filter(|update| update.changed).count();
        changes += changed;
        for update in updates.iter().filter(|update| !update.changed) {
            excluded.insert(update.equation.clone());
        }

        tracing::debug!(
            target: "tether::solve",
            cycle,
            changed,
            excluded = excluded.len(),
            "cycle_complete"
        );

        let event = Event::CycleCompleted {
            cycle,
            updates: &updates,
            excluded: &excluded,
            store,
        };
        if let Some(Action::StopEarly) = observer.observe(&event) {
            return finish(Status::StoppedByObserver, cycle, changes, excluded);
        }

        if changed == 0 {
            return finish(Status::ConvergedStable, cycle, changes, excluded);
        }
    }

    finish(Status::CapReached, config.max_cycles(), changes, excluded)
}

fn finish(
    status: Status,
    cycles: usize,
    changes: usize,
    excluded: BTreeSet<String>,
) -> Result<Solution, Error> {
    tracing::info!(
        target: "tether::solve",
        ?status,
        cycles,
        changes,
        excluded = excluded.len(),
        "solve_complete"
    );
    Ok(Solution {
        status,
        cycles,
        changes,
        excluded,
    })
}

/// Runs constraint propagation without observation.
///
/// # Errors
///
/// Returns an error under the same conditions as [`solve`].
pub fn solve_unobserved(
    catalog: &Catalog,
    store: &mut Store,
    config: &Config,
) -> Result<Solution, Error> {
    solve(catalog, store, config, ())
}
