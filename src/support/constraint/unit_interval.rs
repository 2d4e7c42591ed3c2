use std::cmp::Ordering;

use uom::si::{f64::Ratio, ratio::ratio};

use super::{Constrained, Constraint, ConstraintError};

/// Supplies 0 and 1 for types used with [`UnitIntervalLowerOpen`].
pub trait UnitBounds: PartialOrd {
    fn zero() -> Self;
    fn one() -> Self;
}

impl UnitBounds for f64 {
    fn zero() -> Self {
        0.0
    }
    fn one() -> Self {
        1.0
    }
}

impl UnitBounds for Ratio {
    fn zero() -> Self {
        Ratio::new::<ratio>(0.0)
    }
    fn one() -> Self {
        Ratio::new::<ratio>(1.0)
    }
}

/// Marker type enforcing that a value lies in the left-open unit interval: `0 < x ≤ 1`.
///
/// Power factors and voltage-drop limits use this interval.
///
/// # Examples
///
/// ```
/// use twine_electrical::support::constraint::UnitIntervalLowerOpen;
/// use uom::si::{f64::Ratio, ratio::percent};
///
/// assert!(UnitIntervalLowerOpen::new(0.85).is_ok());
/// assert!(UnitIntervalLowerOpen::new(Ratio::new::<percent>(3.0)).is_ok());
/// assert!(UnitIntervalLowerOpen::new(0.0).is_err());
/// assert!(UnitIntervalLowerOpen::new(Ratio::new::<percent>(120.0)).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct UnitIntervalLowerOpen;

impl UnitIntervalLowerOpen {
    /// Constructs `Constrained<T, UnitIntervalLowerOpen>` if 0 < value ≤ 1.
    ///
    /// # Errors
    ///
    /// - [`ConstraintError::BelowMinimum`] if less than or equal to zero.
    /// - [`ConstraintError::AboveMaximum`] if greater than one.
    /// - [`ConstraintError::NotANumber`] if comparison is undefined (e.g., NaN).
    pub fn new<T: UnitBounds>(
        value: T,
    ) -> Result<Constrained<T, UnitIntervalLowerOpen>, ConstraintError> {
        Constrained::<T, UnitIntervalLowerOpen>::new(value)
    }
}

impl<T: UnitBounds> Constraint<T> for UnitIntervalLowerOpen {
    fn check(value: &T) -> Result<(), ConstraintError> {
        match (value.partial_cmp(&T::zero()), value.partial_cmp(&T::one())) {
            (None, _) | (_, None) => Err(ConstraintError::NotANumber),
            (Some(Ordering::Less | Ordering::Equal), _) => Err(ConstraintError::BelowMinimum),
            (_, Some(Ordering::Greater)) => Err(ConstraintError::AboveMaximum),
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use uom::si::ratio::percent;

    #[test]
    fn power_factors() {
        assert!(UnitIntervalLowerOpen::new(1.0).is_ok());
        assert!(UnitIntervalLowerOpen::new(0.8).is_ok());
        assert_eq!(
            UnitIntervalLowerOpen::new(0.0),
            Err(ConstraintError::BelowMinimum)
        );
        assert_eq!(
            UnitIntervalLowerOpen::new(1.05),
            Err(ConstraintError::AboveMaximum)
        );
        assert_eq!(
            UnitIntervalLowerOpen::new(f64::NAN),
            Err(ConstraintError::NotANumber)
        );
    }

    #[test]
    fn drop_limits() {
        assert!(UnitIntervalLowerOpen::new(Ratio::new::<percent>(5.0)).is_ok());
        assert!(UnitIntervalLowerOpen::new(Ratio::new::<percent>(100.0)).is_ok());
        assert!(UnitIntervalLowerOpen::new(Ratio::new::<percent>(0.0)).is_err());
    }
}
