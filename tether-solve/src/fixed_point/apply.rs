use std::collections::BTreeSet;

use tether_core::{Evaluation, Precision, Provenance, Store, Value, Variable, VariableError};

use super::{Error, Update};

/// Unit label given to variables the solver creates.
pub(super) const DERIVED_UNIT: &str = "unknown";

/// Writes one cycle's evaluations into the store, in the order given.
///
/// A target that an earlier update in the same cycle already made finite is
/// left alone. A later update that agrees with it (an equal scalar or a range
/// containing it) is reported as unchanged, and any other is an error.
pub(super) fn apply_all(
    store: &mut Store,
    evaluations: Vec<(&str, Evaluation)>,
) -> Result<Vec<Update>, Error> {
    let mut finalized = BTreeSet::new();
    let mut updates = Vec::with_capacity(evaluations.len());

    for (equation, Evaluation { target, value, .. }) in evaluations {
        let changed = if finalized.contains(&target) {
            confirm(store, equation, &target, value)?;
            false
        } else {
            let changed = apply(store, equation, &target, value)?;
            if value.precision() == Precision::Finite {
                finalized.insert(target.clone());
            }
            changed
        };

        updates.push(Update {
            equation: equation.to_owned(),
            target,
            value,
            changed,
        });
    }

    Ok(updates)
}

fn confirm(store: &Store, equation: &str, target: &str, proposed: Value) -> Result<(), Error> {
    let current = store
        .get(target)
        .map_err(|source| Error::Store {
            equation: equation.to_owned(),
            target: target.to_owned(),
            source,
        })?
        .value()
        .bounds();

    if proposed.bounds().contains(current.lo()) {
        return Ok(());
    }

    let source = match proposed {
        Value::Scalar(_) => VariableError::AlreadyFinite {
            name: target.to_owned(),
        },
        Value::Interval(range) => VariableError::Disjoint {
            name: target.to_owned(),
            current,
            proposed: range,
        },
    };
    Err(Error::Update {
        equation: equation.to_owned(),
        target: target.to_owned(),
        source,
    })
}

fn apply(
    store: &mut Store,
    equation: &str,
    target: &str,
    value: Value,
) -> Result<bool, Error> {
    if !store.contains(target) {
        tracing::debug!(target: "tether::solve", equation, variable = target, "derived_variable");
        store
            .add(Variable::new(Provenance::Derived, DERIVED_UNIT, target))
            .map_err(|source| Error::Store {
                equation: equation.to_owned(),
                target: target.to_owned(),
                source,
            })?;
    }

    let variable = store.get_mut(target).map_err(|source| Error::Store {
        equation: equation.to_owned(),
        target: target.to_owned(),
        source,
    })?;

    variable.update(value).map_err(|source| Error::Update {
        equation: equation.to_owned(),
        target: target.to_owned(),
        source,
    })
}
