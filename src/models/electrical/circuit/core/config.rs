use uom::si::{
    electric_current::ampere,
    f64::{ElectricCurrent, Length, Ratio},
    length::foot,
    ratio::percent,
};

use crate::support::{
    constraint::{StrictlyPositive, UnitIntervalLowerOpen},
    nec::{Insulation, TempRating},
    wiring::ParameterError,
};

use super::CircuitError;

/// Terminations up to this current default to the 60 °C column, 110.14(C)(1)(a).
const SMALL_TERMINATION_AMPS: f64 = 100.0;

/// Temperature rating of the equipment terminals the conductors land on.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Termination {
    /// Not marked: 60 °C for circuits up to 100 A, 75 °C above.
    #[default]
    Unknown,
    /// Marked with a rating.
    Known(TempRating),
}

impl Termination {
    /// Ampacity column the conductors must be checked against.
    ///
    /// `design_current` is the current of the whole circuit, all parallel
    /// sets together.
    #[must_use]
    pub fn rating(self, design_current: ElectricCurrent, insulation: Insulation) -> TempRating {
        match self {
            Termination::Unknown => {
                if design_current.get::<ampere>() <= SMALL_TERMINATION_AMPS {
                    TempRating::T60
                } else {
                    TempRating::T75
                }
            }
            Termination::Known(rating) => rating.min(insulation.temp_rating()),
        }
    }
}

/// Sizing options of a circuit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CircuitConfig {
    /// One-way length of the run.
    pub length: Length,

    /// Allowed voltage drop as a fraction of the line voltage.
    pub max_voltage_drop: Ratio,

    /// Number of parallel sets of conductors.
    pub sets: usize,

    pub termination: Termination,

    /// Whether the OCPD is listed for 100 % of its rating, so the conductors
    /// are sized for the nominal current rather than the MCA.
    pub fully_rated: bool,

    /// Run one equipment grounding conductor per conduit or bundle instead of
    /// one per set, 250.122(F).
    pub single_egc: bool,
}

impl Default for CircuitConfig {
    fn default() -> Self {
        Self {
            length: Length::new::<foot>(100.0),
            max_voltage_drop: Ratio::new::<percent>(5.0),
            sets: 1,
            termination: Termination::Unknown,
            fully_rated: false,
            single_egc: false,
        }
    }
}

impl CircuitConfig {
    /// Checks every field.
    ///
    /// # Errors
    ///
    /// Returns a [`CircuitError`] if the length is not positive, the drop
    /// limit is outside `(0, 1]`, or there are no sets.
    pub(super) fn validate(&self) -> Result<(), CircuitError> {
        StrictlyPositive::new(self.length).map_err(ParameterError::constraint("circuit length"))?;
        UnitIntervalLowerOpen::new(self.max_voltage_drop)
            .map_err(ParameterError::constraint("maximum voltage drop"))?;
        if self.sets == 0 {
            return Err(CircuitError::NoSets);
        }
        Ok(())
    }
}
