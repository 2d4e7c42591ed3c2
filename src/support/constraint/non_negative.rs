use std::{cmp::Ordering, marker::PhantomData};

use num_traits::Zero;

use super::{Constrained, Constraint, ConstraintError};

/// Marker type enforcing that a value is zero or greater.
///
/// Used for quantities where zero is meaningful, such as a rooftop clearance
/// (a raceway lying directly on the roof) or the neutral current of a
/// balanced load.
///
/// # Examples
///
/// ```
/// use twine_electrical::support::constraint::NonNegative;
/// use uom::si::{electric_current::ampere, f64::ElectricCurrent};
///
/// assert!(NonNegative::new(ElectricCurrent::new::<ampere>(0.0)).is_ok());
/// assert!(NonNegative::new(ElectricCurrent::new::<ampere>(-1.0)).is_err());
/// assert!(NonNegative::new(f64::NAN).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct NonNegative;

impl NonNegative {
    /// Constructs a [`Constrained<T, NonNegative>`] if the value is non-negative.
    ///
    /// # Errors
    ///
    /// Returns an error if the value is negative or not a number (`NaN`).
    pub fn new<T: PartialOrd + Zero>(
        value: T,
    ) -> Result<Constrained<T, NonNegative>, ConstraintError> {
        Constrained::<T, NonNegative>::new(value)
    }

    /// Returns zero as a non-negative constrained value.
    #[must_use]
    pub fn zero<T: PartialOrd + Zero>() -> Constrained<T, NonNegative> {
        Constrained {
            value: T::zero(),
            _marker: PhantomData,
        }
    }
}

impl<T: PartialOrd + Zero> Constraint<T> for NonNegative {
    fn check(value: &T) -> Result<(), ConstraintError> {
        match value.partial_cmp(&T::zero()) {
            Some(Ordering::Greater | Ordering::Equal) => Ok(()),
            Some(Ordering::Less) => Err(ConstraintError::Negative),
            None => Err(ConstraintError::NotANumber),
        }
    }
}
