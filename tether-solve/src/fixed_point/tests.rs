use std::{cell::Cell, collections::BTreeSet, f64::consts::PI, rc::Rc};

use approx::assert_relative_eq;

use tether_core::{Catalog, Equation, Precision, Provenance, Seed, Store, Value, VariableError};

use super::{Action, Config, Error, Event, Status, solve, solve_unobserved};

fn spherical_density() -> Equation {
    Equation::new("sphericalDensity", ["radius", "mass", "density"])
        .with_form("density", |v| {
            Ok(v.get("mass")? / (4.0 / 3.0 * PI * v.get("radius")?.powi(3)))
        })
        .with_form("radius", |v| {
            Ok((v.get("mass")? / v.get("density")? * 3.0 / 4.0 / PI).cbrt())
        })
        .with_form("mass", |v| {
            Ok(v.get("density")? * 4.0 / 3.0 * PI * v.get("radius")?.powi(3))
        })
}

/// An equation `a = b` that can solve in either direction.
fn copy(name: &str, a: &str, b: &str) -> Equation {
    let (from_b, from_a) = (b.to_owned(), a.to_owned());
    Equation::new(name, [a, b])
        .with_form(a, move |v| v.get(&from_b))
        .with_form(b, move |v| v.get(&from_a))
}

fn given(name: &str, value: impl Into<Value>) -> Seed {
    Seed::new(name, Provenance::Given, "").with_value(value)
}

fn range(lo: f64, hi: f64) -> Value {
    Value::range(lo, hi).unwrap()
}

#[test]
fn solves_for_a_missing_variable() {
    let catalog = Catalog::from_equations([spherical_density()]).unwrap();
    let mut store = Store::seeded([given("radius", 2.0), given("mass", 33.51)]).unwrap();

    let solution = solve_unobserved(&catalog, &mut store, &Config::default()).unwrap();

    // Cycle 1 derives the density, cycle 2 finds nothing left to do.
    assert_eq!(solution.status, Status::ConvergedEmpty);
    assert_eq!(solution.cycles, 2);
    assert_eq!(solution.changes, 1);

    let density = store.get("density").unwrap();
    assert_eq!(density.provenance(), Provenance::Derived);
    assert_eq!(density.unit(), "unknown");
    assert_relative_eq!(
        density.value().as_scalar().unwrap(),
        33.51 / (4.0 / 3.0 * PI * 8.0)
    );
}

#[test]
fn fully_known_system_converges_immediately() {
    let catalog = Catalog::from_equations([spherical_density()]).unwrap();
    let mut store = Store::seeded([
        given("radius", 2.0),
        given("mass", 33.51),
        given("density", 1.0),
    ])
    .unwrap();
    let before = store.clone();

    let solution = solve_unobserved(&catalog, &mut store, &Config::default()).unwrap();

    assert_eq!(solution.status, Status::ConvergedEmpty);
    assert_eq!(solution.cycles, 1);
    assert_eq!(solution.changes, 0);
    assert_eq!(store, before);
}

#[test]
fn propagates_ranges_and_stops_when_stable() {
    let catalog = Catalog::from_equations([spherical_density()]).unwrap();
    let mut store =
        Store::seeded([given("radius", range(1.0, 2.0)), given("mass", range(10.0, 20.0))])
            .unwrap();

    let solution = solve_unobserved(&catalog, &mut store, &Config::default()).unwrap();

    // Cycle 2 recomputes the radius from the derived density, which cannot
    // narrow [1, 2], so the equation is excluded and the run is stable.
    assert_eq!(solution.status, Status::ConvergedStable);
    assert_eq!(solution.cycles, 2);
    assert_eq!(solution.excluded, BTreeSet::from(["sphericalDensity".to_owned()]));

    let density = |m: f64, r: f64| m / (4.0 / 3.0 * PI * r.powi(3));
    let value = store.get("density").unwrap().value();
    assert_eq!(value.precision(), Precision::ConstrainedRange);
    assert_relative_eq!(value.bounds().lo(), density(10.0, 2.0));
    assert_relative_eq!(value.bounds().hi(), density(20.0, 1.0));
    assert_eq!(store.get("radius").unwrap().value(), range(1.0, 2.0));
}

#[test]
fn excluded_equations_never_return() {
    // `x_eq_y` cannot narrow x in cycle 1 and is excluded, while `z_eq_y`
    // derives z. In cycle 2 `x_eq_y` still applies but must not be retried.
    let catalog = Catalog::from_equations([
        copy("x_eq_y", "x", "y"),
        Equation::new("z_eq_y", ["z", "y"])
            .with_form("z", |v| Ok(2.0 * v.get("y")?))
            .with_form("y", |v| Ok(v.get("z")? / 2.0)),
    ])
    .unwrap();
    let mut store =
        Store::seeded([given("x", range(0.0, 10.0)), given("y", range(0.0, 10.0))]).unwrap();

    let mut viable_by_cycle = Vec::new();
    let observer = |event: &Event<'_>| -> Option<Action> {
        if let Event::CycleStarted { viable, .. } = event {
            viable_by_cycle.push(viable.iter().map(|&name| name.to_owned()).collect::<Vec<_>>());
        }
        None
    };

    let solution = solve(&catalog, &mut store, &Config::default(), observer).unwrap();

    assert_eq!(solution.status, Status::ConvergedStable);
    assert_eq!(solution.cycles, 2);
    assert_eq!(viable_by_cycle, [vec!["x_eq_y", "z_eq_y"], vec!["z_eq_y"]]);
    assert_eq!(
        solution.excluded,
        BTreeSet::from(["x_eq_y".to_owned(), "z_eq_y".to_owned()])
    );
    assert_eq!(store.get("z").unwrap().value(), range(0.0, 20.0));
}

#[test]
fn stops_at_the_cycle_cap() {
    // Each call lowers the upper corner a little, so x narrows every cycle
    // and the run can only end at the cap.
    let calls = Rc::new(Cell::new(0.0));
    let counter = Rc::clone(&calls);
    let shrinking = Equation::new("shrinking", ["x", "y"])
        .with_form("x", move |v| {
            counter.set(counter.get() + 1.0);
            Ok(v.get("y")? / 10.0 - counter.get())
        })
        .with_form("y", |v| Ok(v.get("x")? * 10.0));

    let catalog = Catalog::from_equations([shrinking]).unwrap();
    let mut store =
        Store::seeded([given("x", range(0.0, 1000.0)), given("y", range(0.0, 10000.0))])
            .unwrap();

    let mut completed = Vec::new();
    let observer = |event: &Event<'_>| -> Option<Action> {
        if let Event::CycleCompleted { .. } = event {
            completed.push(event.cycle());
        }
        None
    };

    let config = Config::new(5).unwrap();
    let solution = solve(&catalog, &mut store, &config, observer).unwrap();

    assert_eq!(solution.status, Status::CapReached);
    assert_eq!(solution.cycles, 5);
    assert_eq!(solution.changes, 5);
    assert_eq!(completed, [1, 2, 3, 4, 5]);
    assert!(solution.excluded.is_empty());
    assert_eq!(calls.get(), 10.0);
    assert_eq!(store.get("x").unwrap().value(), range(0.0, 990.0));
}

#[test]
fn later_update_agreeing_with_a_value_finalized_this_cycle_is_unchanged() {
    let catalog = Catalog::from_equations([
        copy("first", "z", "a"),
        copy("second", "z", "b"),
        copy("third", "z", "c"),
    ])
    .unwrap();
    let mut store =
        Store::seeded([given("a", 1.0), given("b", 1.0), given("c", range(0.0, 2.0))]).unwrap();

    let mut updates = Vec::new();
    let observer = |event: &Event<'_>| -> Option<Action> {
        if let Event::CycleCompleted { updates: applied, .. } = event {
            updates.extend(applied.iter().cloned());
        }
        None
    };

    let solution = solve(&catalog, &mut store, &Config::default(), observer).unwrap();

    assert_eq!(solution.status, Status::ConvergedEmpty);
    assert_eq!(solution.cycles, 2);
    assert_eq!(
        solution.excluded,
        BTreeSet::from(["second".to_owned(), "third".to_owned()])
    );
    assert_eq!(store.get("z").unwrap().value(), Value::Scalar(1.0));

    let changed: Vec<_> = updates.iter().map(|update| update.changed).collect();
    assert_eq!(changed, [true, false, false]);
}

#[test]
fn later_update_contradicting_a_value_finalized_this_cycle_fails() {
    let catalog = Catalog::from_equations([copy("first", "z", "a"), copy("second", "z", "b")])
        .unwrap();

    let mut store = Store::seeded([given("a", 1.0), given("b", 2.0)]).unwrap();
    let err = solve_unobserved(&catalog, &mut store, &Config::default()).unwrap_err();
    assert!(matches!(
        err,
        Error::Update {
            ref equation,
            ref target,
            source: VariableError::AlreadyFinite { .. },
        } if equation == "second" && target == "z"
    ));

    let mut store = Store::seeded([given("a", 1.0), given("b", range(5.0, 6.0))]).unwrap();
    let err = solve_unobserved(&catalog, &mut store, &Config::default()).unwrap_err();
    assert!(matches!(
        err,
        Error::Update {
            ref equation,
            source: VariableError::Disjoint { .. },
            ..
        } if equation == "second"
    ));
}

#[test]
fn same_cycle_ranges_intersect() {
    let catalog = Catalog::from_equations([copy("first", "z", "a"), copy("second", "z", "b")])
        .unwrap();
    let mut store =
        Store::seeded([given("a", range(0.0, 5.0)), given("b", range(3.0, 8.0))]).unwrap();

    let config = Config::new(1).unwrap();
    let solution = solve_unobserved(&catalog, &mut store, &config).unwrap();

    assert_eq!(solution.status, Status::CapReached);
    assert_eq!(solution.changes, 2);
    assert_eq!(store.get("z").unwrap().value(), range(3.0, 5.0));
}

#[test]
fn contradictions_abort_the_run() {
    let catalog = Catalog::from_equations([copy("copy", "x", "y")]).unwrap();
    let mut store =
        Store::seeded([given("x", range(0.0, 1.0)), given("y", range(5.0, 6.0))]).unwrap();

    let err = solve_unobserved(&catalog, &mut store, &Config::default()).unwrap_err();

    assert!(matches!(
        err,
        Error::Update {
            ref equation,
            ref target,
            source: VariableError::Disjoint { .. },
        } if equation == "copy" && target == "x"
    ));
}

#[test]
fn observer_can_stop_before_updates_apply() {
    let catalog = Catalog::from_equations([spherical_density()]).unwrap();
    let mut store = Store::seeded([given("radius", 2.0), given("mass", 33.51)]).unwrap();

    let observer = |event: &Event<'_>| match event {
        Event::Evaluated { .. } => Some(Action::StopEarly),
        _ => None,
    };

    let solution = solve(&catalog, &mut store, &Config::default(), observer).unwrap();

    assert_eq!(solution.status, Status::StoppedByObserver);
    assert_eq!(solution.cycles, 1);
    assert_eq!(solution.changes, 0);
    assert!(!store.contains("density"));
}

#[test]
fn config_rejects_zero_cycles() {
    assert!(Config::new(0).is_err());
    assert_eq!(Config::default().max_cycles(), 10);
}
