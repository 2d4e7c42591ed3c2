//! Voltage drop along a circuit run.
//!
//! Sizing asks a [`VoltageDropSolver`] for the smallest conductor that keeps
//! the drop within a limit.
//! [`ImpedanceMethod`] is the usual Chapter 9, Table 9 calculation; any other
//! method can be plugged in by implementing the trait.

use uom::si::{
    f64::{ElectricCurrent, ElectricPotential, Length, Ratio},
    ratio::ratio,
};

use crate::support::nec::{Metal, OuterMaterial, Size, impedance};

/// Everything a solver needs to compute the drop of one run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VoltageDropQuery {
    /// Line voltage of the system.
    pub voltage: ElectricPotential,
    /// Whether the load is served by three phases.
    pub three_phase: bool,
    /// Total load current, split evenly across the parallel sets.
    pub current: ElectricCurrent,
    pub power_factor: f64,
    pub lagging: bool,
    /// Allowed drop as a fraction of the line voltage.
    pub max_drop: Ratio,
    /// One-way length of the run.
    pub length: Length,
    /// Number of parallel sets, at least one.
    pub sets: usize,
    pub metal: Metal,
    /// Enclosure the conductors run in.
    pub outer_material: OuterMaterial,
}

impl VoltageDropQuery {
    /// Largest drop the query allows.
    #[must_use]
    pub fn allowed_drop(&self) -> ElectricPotential {
        self.voltage * self.max_drop.get::<ratio>()
    }

    /// Current carried by each parallel set.
    #[must_use]
    pub fn current_per_set(&self) -> ElectricCurrent {
        // Lossless: set counts are tiny.
        #[allow(clippy::cast_precision_loss)]
        let sets = self.sets.max(1) as f64;
        self.current / sets
    }
}

/// A voltage drop calculation.
pub trait VoltageDropSolver {
    /// Drop along the run with conductors of `size`, or `None` if the
    /// solver has no data for that size.
    fn voltage_drop(&self, query: &VoltageDropQuery, size: Size) -> Option<ElectricPotential>;

    /// Smallest size whose drop does not exceed the allowed drop.
    ///
    /// Returns `None` when even 2000 kcmil drops too much.
    fn minimum_size(&self, query: &VoltageDropQuery) -> Option<Size> {
        let allowed = query.allowed_drop();
        Size::ALL.into_iter().find(|&size| {
            self.voltage_drop(query, size)
                .is_some_and(|drop| drop <= allowed)
        })
    }
}

/// Approximate drop from the effective impedance of Chapter 9, Table 9.
///
/// `Vd = k · L · I · Z`, where `Z = R·cosθ ± X·sinθ`, `I` is the current per
/// set and `k` is 2 for single-phase and √3 for three-phase circuits.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImpedanceMethod;

impl VoltageDropSolver for ImpedanceMethod {
    fn voltage_drop(&self, query: &VoltageDropQuery, size: Size) -> Option<ElectricPotential> {
        let z = impedance::effective_impedance(
            size,
            query.metal,
            query.outer_material,
            query.power_factor,
            query.lagging,
        )?;
        let k = if query.three_phase { 3.0_f64.sqrt() } else { 2.0 };
        let drop: ElectricPotential = z * query.length * query.current_per_set() * k;
        tracing::trace!(%size, volts = drop.value, "voltage drop");
        Some(drop)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use uom::si::{
        electric_current::ampere, electric_potential::volt, length::foot, ratio::percent,
    };

    fn query(volts: f64, amps: f64, three_phase: bool) -> VoltageDropQuery {
        VoltageDropQuery {
            voltage: ElectricPotential::new::<volt>(volts),
            three_phase,
            current: ElectricCurrent::new::<ampere>(amps),
            power_factor: 1.0,
            lagging: true,
            max_drop: Ratio::new::<percent>(5.0),
            length: Length::new::<foot>(100.0),
            sets: 1,
            metal: Metal::Copper,
            outer_material: OuterMaterial::Pvc,
        }
    }

    fn volts(drop: Option<ElectricPotential>) -> f64 {
        drop.map_or(f64::NAN, |v| v.get::<volt>())
    }

    #[test]
    fn single_phase_drop() {
        let q = query(120.0, 10.0, false);
        assert_relative_eq!(
            volts(ImpedanceMethod.voltage_drop(&q, Size::Awg14)),
            6.2,
            epsilon = 1e-9
        );
        assert_relative_eq!(
            volts(ImpedanceMethod.voltage_drop(&q, Size::Awg12)),
            4.0,
            epsilon = 1e-9
        );
        assert_eq!(ImpedanceMethod.minimum_size(&q), Some(Size::Awg12));
    }

    #[test]
    fn three_phase_uses_root_three() {
        let q = query(208.0, 100.0, true);
        let expected = 3.0_f64.sqrt() * 0.1 * 100.0 * 0.49;
        assert_relative_eq!(
            volts(ImpedanceMethod.voltage_drop(&q, Size::Awg6)),
            expected,
            epsilon = 1e-9
        );
        assert_eq!(ImpedanceMethod.minimum_size(&q), Some(Size::Awg6));
    }

    #[test]
    fn parallel_sets_share_the_current() {
        let one = query(120.0, 100.0, false);
        let two = VoltageDropQuery { sets: 2, ..one };
        let d1 = volts(ImpedanceMethod.voltage_drop(&one, Size::Awg1_0));
        let d2 = volts(ImpedanceMethod.voltage_drop(&two, Size::Awg1_0));
        assert_relative_eq!(d2, d1 / 2.0, epsilon = 1e-12);
    }

    #[test]
    fn lagging_reactance_adds() {
        let unity = query(480.0, 200.0, true);
        let lagging = VoltageDropQuery {
            power_factor: 0.8,
            ..unity
        };
        let leading = VoltageDropQuery {
            lagging: false,
            ..lagging
        };
        let lag = volts(ImpedanceMethod.voltage_drop(&lagging, Size::Awg3_0));
        let lead = volts(ImpedanceMethod.voltage_drop(&leading, Size::Awg3_0));
        assert!(lag > lead);
    }

    #[test]
    fn impossible_limits_have_no_size() {
        let q = VoltageDropQuery {
            max_drop: Ratio::new::<percent>(0.01),
            length: Length::new::<foot>(5000.0),
            ..query(120.0, 400.0, false)
        };
        assert_eq!(ImpedanceMethod.minimum_size(&q), None);

        let aluminum = VoltageDropQuery {
            metal: Metal::Aluminum,
            ..query(120.0, 1.0, false)
        };
        assert_eq!(ImpedanceMethod.voltage_drop(&aluminum, Size::Awg14), None);
        assert_eq!(ImpedanceMethod.minimum_size(&aluminum), Some(Size::Awg12));
    }
}
