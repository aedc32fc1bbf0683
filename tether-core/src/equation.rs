//! Equations relating named quantities.
//!
//! An [`Equation`] holds one closed-form function (a [`Form`]) per member.
//! Each solving step asks three questions of an equation:
//!
//! - [`Equation::applies`]: is there anything it can tell us right now?
//! - [`Equation::choose_form`]: which member should it solve for?
//! - [`Equation::compute`]: what value does that form produce, given that some
//!   inputs may only be known as intervals?

mod error;
mod evaluation;
mod form;

use std::{collections::BTreeMap, collections::BTreeSet, fmt};

pub use error::EquationError;
pub use evaluation::Evaluation;
pub use form::{Form, Inputs, UnboundInput};

use form::FormFn;

use crate::{store::Store, value::Precision};

/// A named relation over a fixed set of quantities.
pub struct Equation {
    name: String,
    members: Vec<String>,
    forms: BTreeMap<String, Box<FormFn>>,
}

impl Equation {
    /// Declares an equation over `members`, with no forms yet.
    pub fn new<I>(name: impl Into<String>, members: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        Self {
            name: name.into(),
            members: members.into_iter().map(Into::into).collect(),
            forms: BTreeMap::new(),
        }
    }

    /// Attaches the form that computes `member` from the other members.
    ///
    /// A later form for the same member replaces the earlier one.
    #[must_use]
    pub fn with_form<F>(mut self, member: impl Into<String>, form: F) -> Self
    where
        F: Fn(&Inputs<'_>) -> Result<f64, UnboundInput> + 'static,
    {
        self.forms.insert(member.into(), Box::new(form));
        self
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the member names in declaration order.
    #[must_use]
    pub fn members(&self) -> &[String] {
        &self.members
    }

    /// Checks that every member has exactly one form and vice versa.
    ///
    /// # Errors
    ///
    /// Returns the first configuration defect found.
    pub fn validate(&self) -> Result<(), EquationError> {
        if self.members.is_empty() {
            return Err(EquationError::NoMembers {
                equation: self.name.clone(),
            });
        }

        let mut seen = BTreeSet::new();
        for member in &self.members {
            if !seen.insert(member.as_str()) {
                return Err(EquationError::DuplicateMember {
                    equation: self.name.clone(),
                    member: member.clone(),
                });
            }
            if !self.forms.contains_key(member) {
                return Err(EquationError::MissingForm {
                    equation: self.name.clone(),
                    member: member.clone(),
                });
            }
        }

        if let Some(stray) = self.forms.keys().find(|name| !seen.contains(name.as_str())) {
            return Err(EquationError::StrayForm {
                equation: self.name.clone(),
                member: stray.clone(),
            });
        }

        Ok(())
    }

    /// Returns the members that are absent from the store or unconstrained.
    #[must_use]
    pub fn unknowns(&self, store: &Store) -> Vec<&str> {
        self.members
            .iter()
            .map(String::as_str)
            .filter(|name| {
                store
                    .find(name)
                    .is_none_or(|var| var.precision() == Precision::Unconstrained)
            })
            .collect()
    }

    /// Returns `true` if this equation can contribute something.
    ///
    /// That requires at most one unknown member and at least one member that
    /// is not yet finite.
    #[must_use]
    pub fn applies(&self, store: &Store) -> bool {
        let not_finite = self.members.iter().any(|name| {
            store
                .find(name)
                .is_none_or(|var| var.precision() != Precision::Finite)
        });
        not_finite && self.unknowns(store).len() <= 1
    }

    /// Picks the member to solve for and returns its form.
    ///
    /// With one unknown member, that member is the target. With none, the
    /// target is the least precise member, ties going to the narrowest range
    /// and then to declaration order.
    ///
    /// # Errors
    ///
    /// Returns an error if more than one member is unknown, if the target has
    /// no form, or if every member is already finite.
    pub fn choose_form(&self, store: &Store) -> Result<Form<'_>, EquationError> {
        let target = match self.unknowns(store).as_slice() {
            [] => self.least_known(store)?,
            [unknown] => *unknown,
            unknowns => {
                return Err(EquationError::TooManyUnknown {
                    equation: self.name.clone(),
                    unknowns: unknowns.iter().map(|&name| name.to_owned()).collect(),
                });
            }
        };

        self.form(target)
    }

    /// Evaluates `form` against the store using corner-point sampling.
    ///
    /// Every non-target member must be present and at least range-constrained.
    ///
    /// # Errors
    ///
    /// Returns an error if an input is missing or unconstrained, the form
    /// reads an unbound input, or the form produces a NaN or an infinite exact
    /// value.
    pub fn compute(&self, form: &Form<'_>, store: &Store) -> Result<Evaluation, EquationError> {
        evaluation::evaluate(
            &self.name,
            self.members.iter().map(String::as_str),
            form,
            store,
        )
    }

    /// Chooses a form and computes it in one step.
    ///
    /// # Errors
    ///
    /// Returns any error from [`Equation::choose_form`] or [`Equation::compute`].
    pub fn evaluate(&self, store: &Store) -> Result<Evaluation, EquationError> {
        let form = self.choose_form(store)?;
        self.compute(&form, store)
    }

    /// Returns the form for `member`.
    ///
    /// # Errors
    ///
    /// Returns an error if the member has no form.
    pub fn form(&self, member: &str) -> Result<Form<'_>, EquationError> {
        self.forms
            .get_key_value(member)
            .map(|(target, func)| Form {
                target: target.as_str(),
                func: func.as_ref(),
            })
            .ok_or_else(|| EquationError::MissingForm {
                equation: self.name.clone(),
                member: member.to_owned(),
            })
    }

    fn least_known(&self, store: &Store) -> Result<&str, EquationError> {
        let mut ranked = Vec::with_capacity(self.members.len());
        for member in &self.members {
            let variable = store.get(member).map_err(|source| EquationError::Store {
                equation: self.name.clone(),
                source,
            })?;
            ranked.push((member.as_str(), variable.precision(), variable.value().width()));
        }

        let (target, precision, _) = ranked
            .into_iter()
            .min_by(|a, b| a.1.cmp(&b.1).then(a.2.total_cmp(&b.2)))
            .ok_or_else(|| EquationError::NoMembers {
                equation: self.name.clone(),
            })?;

        if precision == Precision::Finite {
            return Err(EquationError::TargetFinite {
                equation: self.name.clone(),
                member: target.to_owned(),
            });
        }

        Ok(target)
    }
}

impl fmt::Debug for Equation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Equation")
            .field("name", &self.name)
            .field("members", &self.members)
            .field("forms", &self.forms.keys().collect::<Vec<_>>())
            .finish()
    }
}
