use crate::error::Result;

/// The right-hand side of an autonomous ODE `ds/dt = f(s)`.
///
/// A dynamics model closes over its fixed physical parameters (masses,
/// lengths, gravity) at construction time, so evaluating it needs nothing but
/// the state vector. Implementations must be pure: the same state always
/// yields the same derivative, and nothing is mutated.
pub trait Dynamics {
    /// Human readable name, used in logs.
    fn name(&self) -> &str;

    /// Number of components this model expects in a state vector.
    fn dimension(&self) -> usize;

    /// Evaluates `f(state)`.
    ///
    /// The returned vector is expected to have the same length as `state`;
    /// the integrator checks this on every call.
    fn derivative(&self, state: &[f64]) -> Result<Vec<f64>>;
}

impl<D: Dynamics + ?Sized> Dynamics for &D {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn dimension(&self) -> usize {
        (**self).dimension()
    }

    fn derivative(&self, state: &[f64]) -> Result<Vec<f64>> {
        (**self).derivative(state)
    }
}

impl<D: Dynamics + ?Sized> Dynamics for Box<D> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn dimension(&self) -> usize {
        (**self).dimension()
    }

    fn derivative(&self, state: &[f64]) -> Result<Vec<f64>> {
        (**self).derivative(state)
    }
}

/// Adapts a plain closure into a [`Dynamics`] model.
///
/// Handy for ad hoc systems (and tests) that do not warrant a dedicated type.
pub struct RhsFn<F> {
    name: String,
    dimension: usize,
    f: F,
}

impl<F> RhsFn<F>
where
    F: Fn(&[f64]) -> Vec<f64>,
{
    pub fn new(name: impl Into<String>, dimension: usize, f: F) -> Self {
        Self {
            name: name.into(),
            dimension,
            f,
        }
    }
}

impl<F> Dynamics for RhsFn<F>
where
    F: Fn(&[f64]) -> Vec<f64>,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn dimension(&self) -> usize {
        self.dimension
    }

    fn derivative(&self, state: &[f64]) -> Result<Vec<f64>> {
        Ok((self.f)(state))
    }
}
