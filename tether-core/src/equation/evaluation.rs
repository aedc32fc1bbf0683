use crate::{
    store::Store,
    value::{Interval, Value},
};

use super::{EquationError, Form, Inputs};

/// The candidate value an equation produced for its target.
#[derive(Debug, Clone, PartialEq)]
pub struct Evaluation {
    /// Name of the member that was computed.
    pub target: String,
    /// A scalar if every corner agreed, otherwise `[min, max]` over the corners.
    pub value: Value,
    /// Number of corner assignments the form was evaluated at.
    pub candidates: usize,
}

/// Expands the non-target members into every combination of their endpoints.
///
/// A finite member contributes its value to every assignment. A ranged member
/// doubles the set: half the assignments take its lower bound and half its
/// upper bound.
fn corners<'a>(
    equation: &str,
    members: impl Iterator<Item = &'a str>,
    store: &Store,
) -> Result<Vec<Inputs<'a>>, EquationError> {
    let mut assignments = vec![Inputs::default()];

    for member in members {
        let variable = store.get(member).map_err(|source| EquationError::Store {
            equation: equation.to_owned(),
            source,
        })?;

        match variable.value() {
            Value::Scalar(x) => {
                for inputs in &mut assignments {
                    inputs.bind(member, x);
                }
            }
            Value::Interval(range) if range.is_unbounded() => {
                return Err(EquationError::UnconstrainedInput {
                    equation: equation.to_owned(),
                    member: member.to_owned(),
                });
            }
            Value::Interval(range) => {
                let mut upper = assignments.clone();
                for inputs in &mut assignments {
                    inputs.bind(member, range.lo());
                }
                for inputs in &mut upper {
                    inputs.bind(member, range.hi());
                }
                assignments.append(&mut upper);
            }
        }
    }

    Ok(assignments)
}

/// Evaluates `form` at every corner and collapses the outputs.
///
/// Corner sampling is exact only when the form is monotonic in each ranged
/// input over its interval. A form with an interior extremum gets a range
/// narrower than its true image.
pub(super) fn evaluate<'a>(
    equation: &str,
    members: impl Iterator<Item = &'a str>,
    form: &Form<'_>,
    store: &Store,
) -> Result<Evaluation, EquationError> {
    let target = form.target();
    let non_finite = || EquationError::NonFinite {
        equation: equation.to_owned(),
        target: target.to_owned(),
    };

    let assignments = corners(equation, members.filter(|m| *m != target), store)?;

    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for inputs in &assignments {
        let output = form
            .call(inputs)
            .map_err(|source| EquationError::Unbound {
                equation: equation.to_owned(),
                target: target.to_owned(),
                source,
            })?;
        if output.is_nan() {
            return Err(non_finite());
        }
        min = min.min(output);
        max = max.max(output);
    }

    #[allow(clippy::float_cmp)]
    let value = if min == max {
        if !min.is_finite() {
            return Err(non_finite());
        }
        Value::Scalar(min)
    } else {
        Value::Interval(Interval::new(min, max).map_err(|_| non_finite())?)
    };

    Ok(Evaluation {
        target: target.to_owned(),
        value,
        candidates: assignments.len(),
    })
}
