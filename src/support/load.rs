//! The load side of a circuit.
//!
//! A circuit is sized for whatever implements [`Load`].
//! [`GenericLoad`] covers the common case of a load described by its current,
//! voltage system and a handful of flags.

use std::fmt;

use uom::si::{electric_current::ampere, f64::ElectricCurrent};

use crate::support::{
    constraint::{NonNegative, UnitIntervalLowerOpen},
    nec::Size,
    wiring::{NeutralKind, ParameterError, VoltageSystem},
};

/// Continuous loads are sized at 125 % of their current, 210.19(A) and 215.2(A).
const CONTINUOUS_MULTIPLIER: f64 = 1.25;

/// Which part of the distribution system the circuit belongs to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum CircuitType {
    /// Branch circuit serving a single piece of equipment.
    #[default]
    DedicatedBranch,
    /// Branch circuit with two or more receptacles or outlets, 210.3.
    MultiOutletBranch,
    Feeder,
    Service,
}

impl fmt::Display for CircuitType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            CircuitType::DedicatedBranch => "dedicated branch",
            CircuitType::MultiOutletBranch => "multi-outlet branch",
            CircuitType::Feeder => "feeder",
            CircuitType::Service => "service",
        })
    }
}

/// What a circuit needs to know about the load it serves.
pub trait Load {
    fn system(&self) -> VoltageSystem;

    /// Current drawn by the load.
    fn nominal_current(&self) -> ElectricCurrent;

    /// Current on the neutral, zero when the system has none.
    fn neutral_current(&self) -> ElectricCurrent;

    /// Minimum circuit ampacity the conductors must carry.
    fn mca(&self) -> ElectricCurrent;

    /// Power factor in `(0, 1]`.
    fn power_factor(&self) -> f64;

    fn is_lagging(&self) -> bool;

    /// Whether the neutral counts as a current-carrying conductor.
    fn is_neutral_current_carrying(&self) -> bool;

    /// Whether most of the load is non-linear (electronic ballasts, drives,
    /// computers), which can load a wye neutral with harmonics.
    fn is_non_linear(&self) -> bool;

    fn circuit_type(&self) -> CircuitType;

    /// Largest overcurrent device the equipment is listed for, if marked.
    ///
    /// The value need not be a standard rating; sizing rounds it down to one.
    fn max_ocpd_rating(&self) -> Option<ElectricCurrent>;

    /// Whether 240.4(B) allows the next higher standard rating.
    fn next_higher_rule_applies(&self) -> bool;

    /// Minimum conductor size marked on the equipment, if any.
    fn marked_conductor_size(&self) -> Option<Size>;
}

/// A load described by its current and a few flags.
///
/// Defaults: 120 V, 10 A, not continuous, linear, unity power factor,
/// lagging, dedicated branch circuit, next higher rating allowed, nothing
/// marked on the equipment.
///
/// # Example
///
/// ```
/// use twine_electrical::support::{
///     load::{GenericLoad, Load},
///     wiring::VoltageSystem,
/// };
/// use uom::si::{electric_current::ampere, f64::ElectricCurrent};
///
/// let load = GenericLoad::new(VoltageSystem::Wye480, ElectricCurrent::new::<ampere>(40.0))
///     .unwrap()
///     .with_continuous(true)
///     .with_non_linear(true);
///
/// assert_eq!(load.mca().get::<ampere>(), 50.0);
/// assert!(load.is_neutral_current_carrying());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct GenericLoad {
    system: VoltageSystem,
    current: ElectricCurrent,
    neutral_current: Option<ElectricCurrent>,
    continuous: bool,
    power_factor: f64,
    lagging: bool,
    non_linear: bool,
    circuit_type: CircuitType,
    max_ocpd_rating: Option<ElectricCurrent>,
    next_higher: bool,
    marked_size: Option<Size>,
}

impl Default for GenericLoad {
    fn default() -> Self {
        Self {
            system: VoltageSystem::default(),
            current: ElectricCurrent::new::<ampere>(10.0),
            neutral_current: None,
            continuous: false,
            power_factor: 1.0,
            lagging: true,
            non_linear: false,
            circuit_type: CircuitType::default(),
            max_ocpd_rating: None,
            next_higher: true,
            marked_size: None,
        }
    }
}

impl GenericLoad {
    /// Creates a load drawing `current` from `system`.
    ///
    /// # Errors
    ///
    /// Returns a [`ParameterError`] if the current is negative.
    pub fn new(system: VoltageSystem, current: ElectricCurrent) -> Result<Self, ParameterError> {
        Ok(Self {
            system,
            current: validate_current(current, "load current")?,
            ..Self::default()
        })
    }

    /// Marks the load as continuous (three hours or more).
    #[must_use]
    pub fn with_continuous(mut self, continuous: bool) -> Self {
        self.continuous = continuous;
        self
    }

    /// # Errors
    ///
    /// Returns a [`ParameterError`] unless `0 < power_factor ≤ 1`.
    pub fn with_power_factor(
        mut self,
        power_factor: f64,
        lagging: bool,
    ) -> Result<Self, ParameterError> {
        self.power_factor = UnitIntervalLowerOpen::new(power_factor)
            .map_err(ParameterError::constraint("power factor"))?
            .into_inner();
        self.lagging = lagging;
        Ok(self)
    }

    #[must_use]
    pub fn with_non_linear(mut self, non_linear: bool) -> Self {
        self.non_linear = non_linear;
        self
    }

    #[must_use]
    pub fn with_circuit_type(mut self, circuit_type: CircuitType) -> Self {
        self.circuit_type = circuit_type;
        self
    }

    /// Overrides the neutral current, which otherwise equals the load current.
    ///
    /// # Errors
    ///
    /// Returns a [`ParameterError`] if the current is negative.
    pub fn with_neutral_current(
        mut self,
        current: ElectricCurrent,
    ) -> Result<Self, ParameterError> {
        self.neutral_current = Some(validate_current(current, "neutral current")?);
        Ok(self)
    }

    /// Sets the largest overcurrent device marked on the equipment.
    ///
    /// Zero removes the limit.
    ///
    /// # Errors
    ///
    /// Returns a [`ParameterError`] if the current is negative.
    pub fn with_max_ocpd_rating(
        mut self,
        current: ElectricCurrent,
    ) -> Result<Self, ParameterError> {
        let current = validate_current(current, "maximum OCPD rating")?;
        self.max_ocpd_rating = (current.get::<ampere>() > 0.0).then_some(current);
        Ok(self)
    }

    #[must_use]
    pub fn with_next_higher_rule(mut self, applies: bool) -> Self {
        self.next_higher = applies;
        self
    }

    #[must_use]
    pub fn with_marked_conductor_size(mut self, size: Size) -> Self {
        self.marked_size = Some(size);
        self
    }

    #[must_use]
    pub fn is_continuous(&self) -> bool {
        self.continuous
    }
}

impl Load for GenericLoad {
    fn system(&self) -> VoltageSystem {
        self.system
    }

    fn nominal_current(&self) -> ElectricCurrent {
        self.current
    }

    fn neutral_current(&self) -> ElectricCurrent {
        if self.system.has_neutral() {
            self.neutral_current.unwrap_or(self.current)
        } else {
            ElectricCurrent::new::<ampere>(0.0)
        }
    }

    fn mca(&self) -> ElectricCurrent {
        if self.continuous {
            self.current * CONTINUOUS_MULTIPLIER
        } else {
            self.current
        }
    }

    fn power_factor(&self) -> f64 {
        self.power_factor
    }

    fn is_lagging(&self) -> bool {
        self.lagging
    }

    fn is_neutral_current_carrying(&self) -> bool {
        match self.system.neutral_kind() {
            NeutralKind::AlwaysCurrentCarrying => true,
            NeutralKind::PossiblyCurrentCarrying => self.non_linear,
            NeutralKind::NonCurrentCarrying | NeutralKind::None => false,
        }
    }

    fn is_non_linear(&self) -> bool {
        self.non_linear
    }

    fn circuit_type(&self) -> CircuitType {
        self.circuit_type
    }

    fn max_ocpd_rating(&self) -> Option<ElectricCurrent> {
        self.max_ocpd_rating
    }

    fn next_higher_rule_applies(&self) -> bool {
        self.next_higher
    }

    fn marked_conductor_size(&self) -> Option<Size> {
        self.marked_size
    }
}

fn validate_current(
    current: ElectricCurrent,
    name: &'static str,
) -> Result<ElectricCurrent, ParameterError> {
    NonNegative::new(current)
        .map(|c| c.into_inner())
        .map_err(ParameterError::constraint(name))
}
