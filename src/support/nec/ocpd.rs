use std::fmt;

use uom::si::{electric_current::ampere, f64::ElectricCurrent};

/// Largest current for which 240.4(B) allows rounding up to the next
/// standard rating.
const NEXT_HIGHER_LIMIT_AMPS: f64 = 800.0;

/// Standard ampere ratings of fuses and inverse time circuit breakers, 240.6(A).
const STANDARD: [u32; 37] = [
    15, 20, 25, 30, 35, 40, 45, 50, 60, 70, 80, 90, 100, 110, 125, 150, 175, 200, 225, 250, 300,
    350, 400, 450, 500, 600, 700, 800, 1000, 1200, 1600, 2000, 2500, 3000, 4000, 5000, 6000,
];

/// Direction used when a current falls between standard ratings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rounding {
    /// Smallest standard rating at or above the current.
    Up,
    /// Largest standard rating at or below the current.
    Down,
}

/// A standard overcurrent protective device rating.
///
/// Values of this type are always one of the 240.6(A) standard ratings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct OcpdRating(u32);

impl OcpdRating {
    /// Every standard rating, smallest first.
    pub fn all() -> impl Iterator<Item = OcpdRating> {
        STANDARD.iter().copied().map(OcpdRating)
    }

    /// Returns the rating if `amperes` is a standard rating.
    #[must_use]
    pub fn new(amperes: u32) -> Option<Self> {
        STANDARD.binary_search(&amperes).ok().map(|_| Self(amperes))
    }

    /// Standardizes a current in the given direction.
    ///
    /// Returns `None` if the current is below 15 A when rounding down,
    /// above 6000 A when rounding up, or not a number.
    #[must_use]
    pub fn standardize(current: ElectricCurrent, rounding: Rounding) -> Option<Self> {
        let amps = current.get::<ampere>();
        if amps.is_nan() {
            return None;
        }
        let mut ratings = Self::all();
        match rounding {
            Rounding::Up => ratings.find(|rating| f64::from(rating.0) >= amps),
            Rounding::Down => ratings.take_while(|rating| f64::from(rating.0) <= amps).last(),
        }
    }

    /// Standard rating for a current, honoring the 240.4(B) next-higher rule.
    ///
    /// When `next_higher_allowed` is set and the current does not exceed 800 A
    /// the current is rounded up; otherwise it is rounded down.
    #[must_use]
    pub fn for_current(current: ElectricCurrent, next_higher_allowed: bool) -> Option<Self> {
        let rounding = if next_higher_allowed && current.get::<ampere>() <= NEXT_HIGHER_LIMIT_AMPS
        {
            Rounding::Up
        } else {
            Rounding::Down
        };
        Self::standardize(current, rounding)
    }

    /// The next larger standard rating.
    #[must_use]
    pub fn next_higher(self) -> Option<Self> {
        Self::all().find(|rating| rating.0 > self.0)
    }

    /// The next smaller standard rating.
    #[must_use]
    pub fn next_lower(self) -> Option<Self> {
        Self::all().take_while(|rating| rating.0 < self.0).last()
    }

    /// Rating in amperes.
    #[must_use]
    pub fn amperes(self) -> u32 {
        self.0
    }

    /// Rating as a current.
    #[must_use]
    pub fn current(self) -> ElectricCurrent {
        ElectricCurrent::new::<ampere>(f64::from(self.0))
    }
}

impl fmt::Display for OcpdRating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} A", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn amps(value: f64) -> ElectricCurrent {
        ElectricCurrent::new::<ampere>(value)
    }

    fn rating(value: u32) -> Option<OcpdRating> {
        OcpdRating::new(value)
    }

    #[test]
    fn only_standard_values_are_ratings() {
        assert!(rating(110).is_some());
        assert!(rating(115).is_none());
        assert!(rating(6000).is_some());
        assert!(rating(10).is_none());
    }

    #[test]
    fn standardize_in_both_directions() {
        assert_eq!(OcpdRating::standardize(amps(104.0), Rounding::Up), rating(110));
        assert_eq!(OcpdRating::standardize(amps(104.0), Rounding::Down), rating(100));
        assert_eq!(OcpdRating::standardize(amps(100.0), Rounding::Down), rating(100));
        assert_eq!(OcpdRating::standardize(amps(10.0), Rounding::Up), rating(15));
        assert_eq!(OcpdRating::standardize(amps(10.0), Rounding::Down), None);
        assert_eq!(OcpdRating::standardize(amps(7000.0), Rounding::Up), None);
    }

    #[test]
    fn next_higher_rule_stops_at_800_amps() {
        assert_eq!(OcpdRating::for_current(amps(130.0), true), rating(150));
        assert_eq!(OcpdRating::for_current(amps(130.0), false), rating(125));
        assert_eq!(OcpdRating::for_current(amps(760.0), true), rating(800));
        assert_eq!(OcpdRating::for_current(amps(900.0), true), rating(800));
    }

    #[test]
    fn stepping_between_ratings() {
        let thirty = rating(30).unwrap();
        assert_eq!(thirty.next_higher(), rating(35));
        assert_eq!(thirty.next_lower(), rating(25));
        assert_eq!(rating(15).unwrap().next_lower(), None);
        assert_eq!(rating(6000).unwrap().next_higher(), None);
    }
}
