//! Conductor, OCPD and EGC sizing for one circuit.
//!
//! A [`Circuit`] owns everything that affects its sizes: the load, the
//! sizing options, a template conductor or cable, and how the conductors are
//! installed. Its members live in an [`Installation`] (or, in free air, in
//! the circuit itself) so they derate against everything they share a
//! conduit or bundle with.
//!
//! [`Circuit::calculate`] runs the sizing steps in order:
//!
//! 1. Phase size from ampacity, voltage drop and any marked size
//! 2. Circuit ampacity
//! 3. Neutral size
//! 4. OCPD rating, upsizing the phase conductors when needed
//! 5. EGC size
//! 6. Conduit trade size and final voltage drop
//!
//! A step that cannot be met records a [`ComplianceError`] and stops the pass.

mod config;
mod egc;
mod error;
mod messages;
mod ocpd;
mod results;
mod wiring_mode;

#[cfg(test)]
mod test_support;

pub use config::{CircuitConfig, Termination};
pub use error::CircuitError;
pub use messages::{ComplianceError, Messages, Warning};
pub use results::Sizing;
pub use wiring_mode::WiringMode;

use uom::si::{electric_current::ampere, f64::ElectricCurrent};

use crate::support::{
    load::Load,
    nec::{Insulation, Metal, OuterMaterial, Size, TempRating, TradeSize, standard_ampacity},
    voltage_drop::{ImpedanceMethod, VoltageDropQuery, VoltageDropSolver},
    wiring::{
        AnyConduitable, Cable, Conductor, Conduitable, Installation, MemberId, NeutralKind,
        Owner, ParameterError, Role, WiringError,
    },
};

use ocpd::OcpdRequest;

/// Which conductors of a set a wire provides.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Part {
    Phase,
    Neutral,
    Ground,
    /// A cable carries all of them.
    Cable,
}

impl Part {
    fn provides(self, wanted: Part) -> bool {
        self == wanted || self == Part::Cable
    }
}

#[derive(Debug, Clone, PartialEq)]
enum Slot {
    Installed(MemberId),
    Free(AnyConduitable),
}

#[derive(Debug, Clone, PartialEq)]
struct Wire {
    part: Part,
    slot: Slot,
}

/// A circuit sized against its installation.
///
/// # Example
///
/// ```
/// use twine_electrical::{
///     models::electrical::circuit::Circuit,
///     support::{
///         load::GenericLoad,
///         nec::{OcpdRating, Size, TradeSize},
///         wiring::{Installation, VoltageSystem},
///     },
/// };
/// use uom::si::{electric_current::ampere, f64::ElectricCurrent};
///
/// let mut install = Installation::default();
/// let load = GenericLoad::new(VoltageSystem::ThreePhase208, ElectricCurrent::new::<ampere>(100.0))
///     .unwrap();
///
/// let mut circuit = Circuit::builder(load).build(&mut install).unwrap();
/// let sizing = circuit.calculate(&mut install).unwrap();
///
/// assert!(sizing.is_valid());
/// assert_eq!(sizing.phase, Some(Size::Awg1));
/// assert_eq!(sizing.ocpd, OcpdRating::new(110));
/// assert_eq!(sizing.ground, Some(Size::Awg6));
/// assert_eq!(sizing.trade_size, Some(TradeSize::OneAndOneHalf));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Circuit<L, S = ImpedanceMethod> {
    load: L,
    solver: S,
    config: CircuitConfig,
    template: AnyConduitable,
    wiring: WiringMode,
    /// Containers created for this circuit alone.
    private: Vec<Owner>,
    wires: Vec<Wire>,
}

/// Builder for a [`Circuit`].
///
/// Defaults to the default [`CircuitConfig`], a 12 AWG copper THW
/// [`Conductor`] template, one private PVC-40 conduit, and the
/// [`ImpedanceMethod`] voltage drop.
#[derive(Debug, Clone)]
pub struct CircuitBuilder<L, S = ImpedanceMethod> {
    load: L,
    solver: S,
    config: CircuitConfig,
    template: AnyConduitable,
    wiring: WiringMode,
}

impl<L: Load> Circuit<L> {
    #[must_use]
    pub fn builder(load: L) -> CircuitBuilder<L> {
        CircuitBuilder {
            load,
            solver: ImpedanceMethod,
            config: CircuitConfig::default(),
            template: Conductor::default().into(),
            wiring: WiringMode::default(),
        }
    }
}

impl<L: Load, S: VoltageDropSolver> CircuitBuilder<L, S> {
    #[must_use]
    pub fn config(mut self, config: CircuitConfig) -> Self {
        self.config = config;
        self
    }

    /// Runs the circuit as single conductors copied from `conductor`.
    ///
    /// Only the size, metal and insulation of the template matter; roles are
    /// assigned per conductor.
    #[must_use]
    pub fn conductor(self, conductor: &Conductor) -> Self {
        self.template(conductor)
    }

    /// Runs the circuit as cables copied from `cable`, one per set.
    #[must_use]
    pub fn cable(self, cable: &Cable) -> Self {
        self.template(cable)
    }

    #[must_use]
    pub fn template<T>(mut self, template: &T) -> Self
    where
        T: Conduitable + Into<AnyConduitable>,
    {
        self.template = template.copy().into();
        self
    }

    #[must_use]
    pub fn wiring(mut self, wiring: WiringMode) -> Self {
        self.wiring = wiring;
        self
    }

    /// Replaces the voltage drop calculation.
    #[must_use]
    pub fn solver<T: VoltageDropSolver>(self, solver: T) -> CircuitBuilder<L, T> {
        CircuitBuilder {
            load: self.load,
            solver,
            config: self.config,
            template: self.template,
            wiring: self.wiring,
        }
    }

    /// Validates the setup and installs the circuit's members.
    ///
    /// # Errors
    ///
    /// Returns a [`CircuitError`] if the configuration is invalid, the sets
    /// do not fit the wiring mode, a cable template is built for another
    /// voltage system, or the members cannot be installed.
    pub fn build(self, install: &mut Installation) -> Result<Circuit<L, S>, CircuitError> {
        self.config.validate()?;
        check_layout(&self.wiring, self.config.sets)?;
        if let Some(cable) = self.template.as_cable()
            && cable.system() != self.load.system()
        {
            return Err(CircuitError::SystemMismatch {
                cable: cable.system(),
                load: self.load.system(),
            });
        }

        let mut circuit = Circuit {
            load: self.load,
            solver: self.solver,
            config: self.config,
            template: self.template,
            wiring: self.wiring,
            private: Vec::new(),
            wires: Vec::new(),
        };
        circuit.lay_out(install)?;
        Ok(circuit)
    }
}

impl<L: Load, S: VoltageDropSolver> Circuit<L, S> {
    #[must_use]
    pub fn load(&self) -> &L {
        &self.load
    }

    #[must_use]
    pub fn config(&self) -> &CircuitConfig {
        &self.config
    }

    #[must_use]
    pub fn wiring(&self) -> &WiringMode {
        &self.wiring
    }

    #[must_use]
    pub fn template(&self) -> &AnyConduitable {
        &self.template
    }

    /// Conduits and bundles created for this circuit alone.
    #[must_use]
    pub fn private_containers(&self) -> &[Owner] {
        &self.private
    }

    /// Members this circuit placed in the installation.
    pub fn members(&self) -> impl Iterator<Item = MemberId> + '_ {
        self.wires.iter().filter_map(|wire| match wire.slot {
            Slot::Installed(id) => Some(id),
            Slot::Free(_) => None,
        })
    }

    /// Changes the number of parallel sets.
    ///
    /// # Errors
    ///
    /// Fails if there are no sets, if more than one set would share a
    /// conduit with other circuits, or if the sets cannot be split evenly
    /// across private conduits.
    pub fn set_sets(
        &mut self,
        sets: usize,
        install: &mut Installation,
    ) -> Result<(), CircuitError> {
        if sets == 0 {
            return Err(CircuitError::NoSets);
        }
        check_layout(&self.wiring, sets)?;
        self.config.sets = sets;
        self.relay(install)
    }

    /// Changes how many private conduits the sets are split across.
    ///
    /// # Errors
    ///
    /// Fails unless the circuit runs in private conduits and `count`
    /// divides the number of sets.
    pub fn set_private_conduits(
        &mut self,
        count: usize,
        install: &mut Installation,
    ) -> Result<(), CircuitError> {
        let WiringMode::PrivateConduit { conduit, .. } = self.wiring else {
            return Err(CircuitError::NotPrivateConduit);
        };
        let wiring = WiringMode::PrivateConduit { conduit, count };
        check_layout(&wiring, self.config.sets)?;
        self.wiring = wiring;
        self.relay(install)
    }

    /// Reinstalls the circuit with another wiring mode.
    ///
    /// # Errors
    ///
    /// Fails if the current sets do not fit the new mode or a shared
    /// container does not exist.
    pub fn set_wiring(
        &mut self,
        wiring: WiringMode,
        install: &mut Installation,
    ) -> Result<(), CircuitError> {
        check_layout(&wiring, self.config.sets)?;
        self.wiring = wiring;
        self.relay(install)
    }

    /// Replaces the sizing options.
    ///
    /// # Errors
    ///
    /// Fails if the configuration is invalid or its sets do not fit the
    /// wiring mode.
    pub fn set_config(
        &mut self,
        config: CircuitConfig,
        install: &mut Installation,
    ) -> Result<(), CircuitError> {
        config.validate()?;
        check_layout(&self.wiring, config.sets)?;
        self.config = config;
        self.relay(install)
    }

    /// Takes the circuit's members and private containers out of the installation.
    pub fn uninstall(mut self, install: &mut Installation) {
        self.clear(install);
    }

    /// Sizes the circuit and writes the sizes into its members.
    ///
    /// Compliance problems are reported in the returned [`Sizing`]. When the
    /// circuit cannot be fully sized, its members go back to the sizes they
    /// had before the call, so circuits sharing a container are unaffected.
    ///
    /// # Errors
    ///
    /// Returns a [`CircuitError`] if the circuit's members or containers were
    /// removed from the installation behind its back.
    pub fn calculate(&mut self, install: &mut Installation) -> Result<Sizing, CircuitError> {
        let saved = self.items(install)?;
        let result = self.size_circuit(install);
        if result.as_ref().is_ok_and(Sizing::is_valid) {
            return result;
        }

        let restored = self.restore(install, &saved);
        let sizing = result?;
        restored?;
        tracing::debug!(codes = ?sizing.messages.codes(), "sizes restored");
        Ok(sizing)
    }

    fn size_circuit(&mut self, install: &mut Installation) -> Result<Sizing, CircuitError> {
        let mut sizing = Sizing::default();
        self.warn(&mut sizing.messages);
        self.sync_edition(install)?;

        let sets = self.sets_factor();
        let design = self.design_current();
        let per_set = design / sets;
        let metal = self.template.metal();
        let insulation = self.template.insulation();
        let termination = self.config.termination.rating(design, insulation);
        tracing::debug!(
            design = design.get::<ampere>(),
            sets = self.config.sets,
            ?termination,
            "sizing circuit"
        );

        // 1. Phase size.
        if self
            .min_factor(install, Part::Phase)?
            .is_none_or(|factor| factor <= 0.0)
        {
            sizing.messages.error(ComplianceError::AmbientExceedsRating);
            return Ok(sizing);
        }

        let Some(per_ampacity) = self.size_for(install, Part::Phase, per_set, termination)? else {
            sizing.messages.error(ComplianceError::NoSizeForAmpacity {
                amperes: per_set.get::<ampere>(),
            });
            return Ok(sizing);
        };
        sizing.size_per_ampacity = Some(per_ampacity);

        let query = self.query(install, self.load.nominal_current())?;
        let Some(per_voltage_drop) = self.solver.minimum_size(&query) else {
            sizing.messages.error(ComplianceError::NoSizeForVoltageDrop);
            return Ok(sizing);
        };
        sizing.size_per_voltage_drop = Some(per_voltage_drop);

        let mut phase = per_ampacity.max(per_voltage_drop);
        if let Some(marked) = self.load.marked_conductor_size() {
            phase = phase.max(marked);
        }
        tracing::debug!(%per_ampacity, %per_voltage_drop, %phase, "phase size");

        if self.config.sets > 1 && phase < Size::MIN_PARALLEL {
            sizing
                .messages
                .error(ComplianceError::ParallelTooSmall { size: phase });
            return Ok(sizing);
        }
        if !self.resize(install, Part::Phase, phase)? {
            sizing.messages.error(unlisted(phase, insulation));
            return Ok(sizing);
        }

        // 2. Circuit ampacity.
        let Some(ampacity) = self.circuit_ampacity(install, termination)? else {
            sizing.messages.error(ComplianceError::AmbientExceedsRating);
            return Ok(sizing);
        };

        // 3. Neutral.
        let system = self.load.system();
        let independent_neutral = self.load.is_non_linear() && system.is_wye();
        let neutral = if !system.has_neutral() {
            None
        } else if independent_neutral {
            let current = self.load.neutral_current();
            let by_ampacity = self.size_for(install, Part::Neutral, current / sets, termination)?;
            let by_voltage_drop = self.solver.minimum_size(&self.query(install, current)?);
            match (by_ampacity, by_voltage_drop) {
                (Some(a), Some(v)) => Some(a.max(v)),
                (None, _) => {
                    sizing.messages.error(ComplianceError::NoSizeForAmpacity {
                        amperes: (current / sets).get::<ampere>(),
                    });
                    return Ok(sizing);
                }
                (Some(_), None) => {
                    sizing.messages.error(ComplianceError::NoSizeForVoltageDrop);
                    return Ok(sizing);
                }
            }
        } else {
            Some(phase)
        };

        // 4. OCPD.
        let request = OcpdRequest {
            ampacity,
            design_current: design,
            max_rating: self.load.max_ocpd_rating(),
            next_higher: self.load.next_higher_rule_applies(),
            circuit_type: self.load.circuit_type(),
            metal,
            phase,
        };
        let resolved = ocpd::resolve(&request, |size| {
            match self.resize(install, Part::Phase, size) {
                Ok(true) => self.circuit_ampacity(install, termination).ok().flatten(),
                _ => None,
            }
        });
        let protection = match resolved {
            Ok(protection) => protection,
            Err(error) => {
                sizing.messages.error(error);
                return Ok(sizing);
            }
        };

        let phase = protection.phase;
        if !self.resize(install, Part::Phase, phase)? {
            sizing.messages.error(unlisted(phase, insulation));
            return Ok(sizing);
        }
        let neutral = if independent_neutral {
            neutral
        } else {
            neutral.map(|_| phase)
        };
        if let Some(neutral) = neutral
            && !self.resize(install, Part::Neutral, neutral)?
        {
            sizing.messages.error(unlisted(neutral, insulation));
            return Ok(sizing);
        }
        sizing.ampacity = self.circuit_ampacity(install, termination)?;

        // 5. EGC.
        let ground = match egc::size(
            protection.rating,
            metal,
            phase,
            per_ampacity,
            per_voltage_drop,
        ) {
            Ok(ground) => ground,
            Err(error) => {
                sizing.messages.error(error);
                return Ok(sizing);
            }
        };
        if !self.resize(install, Part::Ground, ground)? {
            sizing.messages.error(unlisted(ground, insulation));
            return Ok(sizing);
        }
        tracing::debug!(%phase, ?neutral, %ground, ocpd = %protection.rating, "circuit sized");

        sizing.phase = Some(phase);
        sizing.neutral = neutral;
        sizing.ground = Some(ground);
        sizing.ocpd = Some(protection.rating);

        // 6. Trade size and final voltage drop.
        match self.trade_size(install)? {
            Ok(trade_size) => sizing.trade_size = trade_size,
            Err(error) => sizing.messages.error(ComplianceError::NoTradeSize(error)),
        }
        sizing.voltage_drop = self.solver.voltage_drop(&query, phase);

        Ok(sizing)
    }

    /// Copies of every wire's item, in wire order.
    fn items(&self, install: &Installation) -> Result<Vec<AnyConduitable>, CircuitError> {
        self.wires
            .iter()
            .map(|wire| match &wire.slot {
                Slot::Installed(id) => Ok(install.member(*id)?.clone()),
                Slot::Free(item) => Ok(item.clone()),
            })
            .collect()
    }

    /// Puts back the sizes of items taken with [`Circuit::items`].
    fn restore(
        &mut self,
        install: &mut Installation,
        saved: &[AnyConduitable],
    ) -> Result<(), CircuitError> {
        for (wire, old) in self.wires.iter_mut().zip(saved) {
            match &mut wire.slot {
                Slot::Installed(id) => install.edit(*id, |item| copy_sizes(item, old))?,
                Slot::Free(item) => copy_sizes(item, old),
            }
        }
        Ok(())
    }

    fn design_current(&self) -> ElectricCurrent {
        if self.config.fully_rated {
            self.load.nominal_current()
        } else {
            self.load.mca()
        }
    }

    // Set counts are small enough to be exact.
    #[allow(clippy::cast_precision_loss)]
    fn sets_factor(&self) -> f64 {
        self.config.sets as f64
    }

    fn warn(&self, messages: &mut Messages) {
        let cable = self.template.is_cable();
        if cable && self.wiring.is_conduit() {
            messages.warning(Warning::CableInConduit);
        } else if !cable && self.wiring == WiringMode::FreeAir {
            messages.warning(Warning::InsulatedConductorsInFreeAir);
        } else if !cable && self.wiring.is_bundle() {
            messages.warning(Warning::InsulatedConductorsInBundle);
        }
    }

    /// Free-air members carry their own edition; keep it in step with the installation.
    fn sync_edition(&mut self, install: &Installation) -> Result<(), CircuitError> {
        let edition = install.edition();
        for wire in &mut self.wires {
            match &mut wire.slot {
                Slot::Free(AnyConduitable::Conductor(conductor)) => conductor.set_edition(edition)?,
                Slot::Free(AnyConduitable::Cable(cable)) => cable.set_edition(edition)?,
                Slot::Installed(_) => {}
            }
        }
        Ok(())
    }

    fn query(
        &self,
        install: &Installation,
        current: ElectricCurrent,
    ) -> Result<VoltageDropQuery, CircuitError> {
        let system = self.load.system();
        Ok(VoltageDropQuery {
            voltage: system.voltage(),
            three_phase: system.is_three_phase(),
            current,
            power_factor: self.load.power_factor(),
            lagging: self.load.is_lagging(),
            max_drop: self.config.max_voltage_drop,
            length: self.config.length,
            sets: self.config.sets,
            metal: self.template.metal(),
            outer_material: self.outer_material(install)?,
        })
    }

    fn outer_material(&self, install: &Installation) -> Result<OuterMaterial, CircuitError> {
        Ok(match self.wiring {
            WiringMode::PrivateConduit { conduit, .. } => conduit.conduit_type().outer_material(),
            WiringMode::SharedConduit(id) => install
                .conduit(id)?
                .settings()
                .conduit_type()
                .outer_material(),
            _ => match &self.template {
                AnyConduitable::Cable(cable) if cable.cable_type().is_armored() => {
                    OuterMaterial::Steel
                }
                _ => OuterMaterial::Pvc,
            },
        })
    }

    /// Applies a closure to every wire providing `part`.
    fn for_each_item(
        &self,
        install: &Installation,
        part: Part,
        mut f: impl FnMut(&AnyConduitable),
    ) -> Result<(), CircuitError> {
        for wire in self.wires.iter().filter(|wire| wire.part.provides(part)) {
            match &wire.slot {
                Slot::Installed(id) => f(install.member(*id)?),
                Slot::Free(item) => f(item),
            }
        }
        Ok(())
    }

    /// Smallest compound factor among the wires providing `part`.
    fn min_factor(&self, install: &Installation, part: Part) -> Result<Option<f64>, CircuitError> {
        let mut min: Option<f64> = None;
        self.for_each_item(install, part, |item| {
            let factor = item.compound_factor();
            min = Some(min.map_or(factor, |m| m.min(factor)));
        })?;
        Ok(min)
    }

    /// Sets the size of `part` on every wire providing it.
    ///
    /// Returns `false` if the size cannot be installed, leaving the
    /// installed wires unchanged.
    fn resize(
        &mut self,
        install: &mut Installation,
        part: Part,
        size: Size,
    ) -> Result<bool, CircuitError> {
        for wire in self.wires.iter_mut().filter(|wire| wire.part.provides(part)) {
            match &mut wire.slot {
                Slot::Installed(id) => match install.edit(*id, |item| set_size(item, part, size)) {
                    Ok(()) => {}
                    Err(WiringError::Parameter(_)) => return Ok(false),
                    Err(error) => return Err(error.into()),
                },
                Slot::Free(item) => set_size(item, part, size),
            }
        }
        Ok(true)
    }

    /// Smallest size of `part` that carries `current` per set.
    ///
    /// Leaves the wires at the returned size.
    fn size_for(
        &mut self,
        install: &mut Installation,
        part: Part,
        current: ElectricCurrent,
        termination: TempRating,
    ) -> Result<Option<Size>, CircuitError> {
        let metal = self.template.metal();
        let insulation = self.template.insulation();
        for size in Size::ALL {
            if !self.resize(install, part, size)? {
                continue;
            }
            let Some(factor) = self.min_factor(install, part)? else {
                return Ok(None);
            };
            if per_set_ampacity(size, metal, insulation, factor, termination)
                .is_some_and(|ampacity| ampacity >= current)
            {
                return Ok(Some(size));
            }
        }
        Ok(None)
    }

    /// Ampacity of all sets at the current phase size.
    fn circuit_ampacity(
        &self,
        install: &Installation,
        termination: TempRating,
    ) -> Result<Option<ElectricCurrent>, CircuitError> {
        let Some(factor) = self.min_factor(install, Part::Phase)? else {
            return Ok(None);
        };
        let mut size = None;
        self.for_each_item(install, Part::Phase, |item| size = Some(item.size()))?;
        Ok(size
            .and_then(|size| {
                per_set_ampacity(
                    size,
                    self.template.metal(),
                    self.template.insulation(),
                    factor,
                    termination,
                )
            })
            .filter(|ampacity| ampacity.get::<ampere>() > 0.0)
            .map(|ampacity| ampacity * self.sets_factor()))
    }

    /// Trade size of the conduits the circuit runs in, if any.
    fn trade_size(
        &self,
        install: &Installation,
    ) -> Result<Result<Option<TradeSize>, ParameterError>, CircuitError> {
        let conduits: Vec<_> = match self.wiring {
            WiringMode::PrivateConduit { .. } => self
                .private
                .iter()
                .filter_map(|owner| match owner {
                    Owner::Conduit(id) => Some(*id),
                    Owner::Bundle(_) => None,
                })
                .collect(),
            WiringMode::SharedConduit(id) => vec![id],
            _ => return Ok(Ok(None)),
        };

        let mut largest = None;
        for id in conduits {
            match install.conduit(id)?.trade_size() {
                Ok(trade_size) => largest = largest.max(Some(trade_size)),
                Err(error) => return Ok(Err(error)),
            }
        }
        Ok(Ok(largest))
    }

    fn relay(&mut self, install: &mut Installation) -> Result<(), CircuitError> {
        self.clear(install);
        self.lay_out(install)
    }

    fn lay_out(&mut self, install: &mut Installation) -> Result<(), CircuitError> {
        let result = self.try_lay_out(install);
        if result.is_err() {
            self.clear(install);
        }
        result
    }

    fn try_lay_out(&mut self, install: &mut Installation) -> Result<(), CircuitError> {
        let targets: Vec<Option<Owner>> = match self.wiring {
            WiringMode::PrivateConduit { conduit, count } => (0..count)
                .map(|_| {
                    let owner = Owner::from(install.add_conduit(conduit));
                    self.private.push(owner);
                    Some(owner)
                })
                .collect(),
            WiringMode::SharedConduit(id) => {
                install.conduit(id)?;
                vec![Some(id.into())]
            }
            WiringMode::PrivateBundle(bundle) => {
                let owner = Owner::from(install.add_bundle(bundle));
                self.private.push(owner);
                vec![Some(owner)]
            }
            WiringMode::SharedBundle(id) => {
                install.bundle(id)?;
                vec![Some(id.into())]
            }
            WiringMode::FreeAir => vec![None],
        };

        let sets_per_target = self.config.sets / targets.len();
        for target in targets {
            for set in 0..sets_per_target {
                let with_ground = !self.config.single_egc || set == 0;
                for (part, item) in self.set_items(with_ground, install)? {
                    let slot = match target {
                        Some(owner) => Slot::Installed(install.add(owner, &item)?),
                        None => Slot::Free(item),
                    };
                    self.wires.push(Wire { part, slot });
                }
            }
        }
        tracing::debug!(wires = self.wires.len(), wiring = ?self.wiring, "circuit installed");
        Ok(())
    }

    /// The conductors or cable of one set.
    fn set_items(
        &self,
        with_ground: bool,
        install: &Installation,
    ) -> Result<Vec<(Part, AnyConduitable)>, CircuitError> {
        let system = self.load.system();
        let carrying = self.load.is_neutral_current_carrying();

        let mut items = Vec::new();
        match &self.template {
            AnyConduitable::Cable(template) => {
                let mut cable = template.copy();
                cable.set_length(self.config.length)?;
                cable.set_edition(install.edition())?;
                if system.neutral_kind() == NeutralKind::PossiblyCurrentCarrying {
                    cable.set_neutral_current_carrying(carrying)?;
                }
                items.push((Part::Cable, cable.into()));
            }
            AnyConduitable::Conductor(template) => {
                let mut conductor = template.copy();
                conductor.set_length(self.config.length)?;
                conductor.set_edition(install.edition())?;

                let with_role = |role| AnyConduitable::from(conductor.clone().with_role(role));
                for _ in 0..system.hot_count() {
                    items.push((Part::Phase, with_role(Role::Hot)));
                }
                if system.has_neutral() {
                    let role = if carrying {
                        Role::CurrentCarryingNeutral
                    } else {
                        Role::NonCurrentCarryingNeutral
                    };
                    items.push((Part::Neutral, with_role(role)));
                }
                if with_ground {
                    items.push((Part::Ground, with_role(Role::Ground)));
                }
            }
        }
        Ok(items)
    }

    /// Removes every member and private container; errors mean the item is
    /// already gone.
    fn clear(&mut self, install: &mut Installation) {
        for wire in self.wires.drain(..) {
            if let Slot::Installed(id) = wire.slot {
                let _ = install.remove(id);
            }
        }
        for owner in self.private.drain(..) {
            let _ = match owner {
                Owner::Conduit(id) => install.remove_conduit(id),
                Owner::Bundle(id) => install.remove_bundle(id),
            };
        }
    }
}

/// Checks that `sets` fit the wiring mode.
fn check_layout(wiring: &WiringMode, sets: usize) -> Result<(), CircuitError> {
    match *wiring {
        WiringMode::SharedConduit(_) if sets > 1 => Err(CircuitError::SetsInSharedConduit { sets }),
        WiringMode::PrivateConduit { count, .. } if count == 0 || sets % count != 0 => {
            Err(CircuitError::UnevenConduits {
                sets,
                conduits: count,
            })
        }
        _ => Ok(()),
    }
}

fn set_size(item: &mut AnyConduitable, part: Part, size: Size) {
    match item {
        AnyConduitable::Conductor(conductor) => conductor.set_size(size),
        AnyConduitable::Cable(cable) => match part {
            Part::Phase | Part::Cable => cable.set_phase_size(size),
            Part::Neutral => cable.set_neutral_size(size),
            Part::Ground => cable.set_ground_size(size),
        },
    }
}

fn copy_sizes(item: &mut AnyConduitable, from: &AnyConduitable) {
    match (item, from) {
        (AnyConduitable::Conductor(conductor), AnyConduitable::Conductor(old)) => {
            conductor.set_size(old.size());
        }
        (AnyConduitable::Cable(cable), AnyConduitable::Cable(old)) => {
            if let Some(phase) = old.phases().first() {
                cable.set_phase_size(phase.size());
            }
            if let Some(neutral) = old.neutral() {
                cable.set_neutral_size(neutral.size());
            }
            cable.set_ground_size(old.ground().size());
        }
        _ => {}
    }
}

/// Ampacity of one set: the derated table value, limited by the
/// termination column, 110.14(C).
fn per_set_ampacity(
    size: Size,
    metal: Metal,
    insulation: Insulation,
    factor: f64,
    termination: TempRating,
) -> Option<ElectricCurrent> {
    let derated = standard_ampacity(size, metal, insulation.temp_rating())? * factor;
    let terminal = standard_ampacity(size, metal, termination)?;
    Some(if derated < terminal { derated } else { terminal })
}

fn unlisted(size: Size, insulation: Insulation) -> ComplianceError {
    ComplianceError::NoTradeSize(ParameterError::NoListedArea { size, insulation })
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use uom::si::{electric_potential::volt, f64::Length, length::foot};

    use crate::support::{
        load::{CircuitType, GenericLoad},
        nec::OcpdRating,
        wiring::{Bundle, CableType, Conduit, ConduitId, VoltageSystem},
    };

    use super::test_support::{amps, deg_f, load, size_default};

    fn rating(amperes: u32) -> Option<OcpdRating> {
        OcpdRating::new(amperes)
    }

    fn first_conduit<L: Load>(circuit: &Circuit<L>) -> ConduitId {
        match circuit.private_containers()[0] {
            Owner::Conduit(id) => id,
            Owner::Bundle(_) => panic!("expected a conduit"),
        }
    }

    #[test]
    fn small_branch_upsized_for_voltage_drop() {
        let sizing = size_default(load(VoltageSystem::OnePhase120, 10.0));

        assert!(sizing.is_valid());
        assert_eq!(sizing.size_per_ampacity, Some(Size::Awg14));
        assert_eq!(sizing.size_per_voltage_drop, Some(Size::Awg12));
        assert_eq!(sizing.phase, Some(Size::Awg12));
        assert_eq!(sizing.neutral, Some(Size::Awg12));
        assert_eq!(sizing.ocpd, rating(20));
        assert_eq!(sizing.ground, Some(Size::Awg12));
        assert_eq!(sizing.trade_size, Some(TradeSize::Half));
        assert_relative_eq!(sizing.ampacity.unwrap().get::<ampere>(), 20.0);
        assert_relative_eq!(
            sizing.voltage_drop.unwrap().get::<volt>(),
            4.0,
            epsilon = 1e-9
        );
        assert!(sizing.messages.codes().is_empty());
    }

    #[test]
    fn sixty_degree_terminations_set_the_size() {
        let sizing = size_default(load(VoltageSystem::OnePhase120, 100.0));

        assert!(sizing.is_valid());
        assert_eq!(sizing.size_per_ampacity, Some(Size::Awg1));
        assert_eq!(sizing.size_per_voltage_drop, Some(Size::Awg3));
        assert_eq!(sizing.phase, Some(Size::Awg1));
        assert_eq!(sizing.neutral, Some(Size::Awg1));
        assert_eq!(sizing.ocpd, rating(110));
        assert_eq!(sizing.ground, Some(Size::Awg6));
        assert_relative_eq!(sizing.ampacity.unwrap().get::<ampere>(), 110.0);
    }

    #[test]
    fn three_phase_feeder_without_neutral() {
        let sizing = size_default(load(VoltageSystem::ThreePhase208, 100.0));

        assert!(sizing.is_valid());
        assert_eq!(sizing.phase, Some(Size::Awg1));
        assert_eq!(sizing.size_per_voltage_drop, Some(Size::Awg6));
        assert_eq!(sizing.neutral, None);
        assert_eq!(sizing.ocpd, rating(110));
        assert_eq!(sizing.ground, Some(Size::Awg6));
        assert_eq!(sizing.trade_size, Some(TradeSize::OneAndOneHalf));
    }

    #[test]
    fn sizes_are_written_to_the_members() {
        let mut install = Installation::default();
        let mut circuit = Circuit::builder(load(VoltageSystem::OnePhase120, 100.0))
            .build(&mut install)
            .unwrap();
        circuit.calculate(&mut install).unwrap();

        let conduit = install.conduit(first_conduit(&circuit)).unwrap();
        for (_, item) in conduit.members() {
            let conductor = item.as_conductor().unwrap();
            let expected = match conductor.role() {
                Role::Ground => Size::Awg6,
                _ => Size::Awg1,
            };
            assert_eq!(conductor.size(), expected, "{:?}", conductor.role());
        }
    }

    #[test]
    fn non_linear_wye_load_sizes_its_own_neutral() {
        let load = load(VoltageSystem::Wye208, 10.0)
            .with_non_linear(true)
            .with_marked_conductor_size(Size::Awg12);
        let conduit = Conduit::default().with_ambient(deg_f(100.0)).unwrap();
        let config = CircuitConfig {
            termination: Termination::Known(TempRating::T90),
            ..CircuitConfig::default()
        };

        let mut install = Installation::default();
        let mut circuit = Circuit::builder(load)
            .config(config)
            .conductor(&Conductor::default().with_insulation(Insulation::Thhn))
            .wiring(WiringMode::PrivateConduit { conduit, count: 1 })
            .build(&mut install)
            .unwrap();
        let sizing = circuit.calculate(&mut install).unwrap();

        // Four current-carrying conductors at 100 °F: 30 A × 0.91 × 0.8.
        assert_relative_eq!(
            sizing.ampacity.unwrap().get::<ampere>(),
            21.84,
            epsilon = 1e-9
        );
        assert_eq!(sizing.phase, Some(Size::Awg12));
        assert_eq!(sizing.neutral, Some(Size::Awg14));
        assert_eq!(sizing.ocpd, rating(20));
        assert_eq!(sizing.ground, Some(Size::Awg12));
    }

    #[test]
    fn long_run_keeps_the_egc_within_the_phase() {
        let config = CircuitConfig {
            length: Length::new::<foot>(300.0),
            ..CircuitConfig::default()
        };
        let mut install = Installation::default();
        let mut circuit = Circuit::builder(load(VoltageSystem::OnePhase120, 20.0))
            .config(config)
            .build(&mut install)
            .unwrap();
        let sizing = circuit.calculate(&mut install).unwrap();

        assert!(sizing.is_valid());
        assert_eq!(sizing.size_per_ampacity, Some(Size::Awg12));
        assert_eq!(sizing.size_per_voltage_drop, Some(Size::Awg6));
        assert_eq!(sizing.phase, Some(Size::Awg6));
        assert_eq!(sizing.ocpd, rating(60));
        assert_eq!(sizing.ground, Some(Size::Awg6));
    }

    #[test]
    fn parallel_sets_below_1_0_are_rejected() {
        let config = CircuitConfig {
            sets: 2,
            ..CircuitConfig::default()
        };
        let mut install = Installation::default();
        let mut circuit = Circuit::builder(load(VoltageSystem::OnePhase120, 100.0))
            .config(config)
            .build(&mut install)
            .unwrap();
        let sizing = circuit.calculate(&mut install).unwrap();

        assert!(!sizing.is_valid());
        assert_eq!(sizing.messages.codes(), vec![-1]);
        assert_eq!(
            sizing.messages.errors(),
            [ComplianceError::ParallelTooSmall { size: Size::Awg6 }]
        );
        assert_eq!(sizing.phase, None);
    }

    #[test]
    fn ambient_above_the_insulation_rating() {
        let conduit = Conduit::default().with_ambient(deg_f(170.0)).unwrap();
        let mut install = Installation::default();
        let mut circuit = Circuit::builder(load(VoltageSystem::OnePhase120, 10.0))
            .wiring(WiringMode::PrivateConduit { conduit, count: 1 })
            .build(&mut install)
            .unwrap();
        let sizing = circuit.calculate(&mut install).unwrap();

        assert_eq!(sizing.messages.codes(), vec![-2]);
        assert!(!sizing.is_valid());
    }

    #[test]
    fn warnings_flag_unusual_installations() {
        let warnings = |builder: CircuitBuilder<GenericLoad>| {
            let mut install = Installation::default();
            let mut circuit = builder.build(&mut install).unwrap();
            circuit.calculate(&mut install).unwrap().messages.codes()
        };
        let base = || Circuit::builder(load(VoltageSystem::OnePhase120, 10.0));
        let nm = Cable::new(CableType::Nm, VoltageSystem::OnePhase120);

        assert_eq!(warnings(base()), Vec::<i32>::new());
        assert_eq!(warnings(base().cable(&nm)), vec![1]);
        assert_eq!(warnings(base().wiring(WiringMode::FreeAir)), vec![2]);
        assert_eq!(
            warnings(base().wiring(WiringMode::PrivateBundle(Bundle::default()))),
            vec![3]
        );
        assert_eq!(
            warnings(base().cable(&nm).wiring(WiringMode::FreeAir)),
            Vec::<i32>::new()
        );
    }

    #[test]
    fn cable_in_free_air() {
        let nm = Cable::new(CableType::Nm, VoltageSystem::OnePhase120);
        let mut install = Installation::default();
        let mut circuit = Circuit::builder(load(VoltageSystem::OnePhase120, 10.0))
            .cable(&nm)
            .wiring(WiringMode::FreeAir)
            .build(&mut install)
            .unwrap();
        let sizing = circuit.calculate(&mut install).unwrap();

        assert!(sizing.is_valid());
        assert_eq!(sizing.phase, Some(Size::Awg12));
        assert_eq!(sizing.ocpd, rating(20));
        assert_eq!(sizing.trade_size, None);
        assert_eq!(circuit.members().count(), 0);
    }

    #[test]
    fn cable_must_match_the_load_system() {
        let cable = Cable::new(CableType::Nm, VoltageSystem::OnePhase240);
        let mut install = Installation::default();
        let result = Circuit::builder(load(VoltageSystem::OnePhase120, 10.0))
            .cable(&cable)
            .build(&mut install);

        assert_eq!(
            result.unwrap_err(),
            CircuitError::SystemMismatch {
                cable: VoltageSystem::OnePhase240,
                load: VoltageSystem::OnePhase120,
            }
        );
    }

    #[test]
    fn layout_follows_sets_and_conduits() {
        let mut install = Installation::default();
        let mut circuit = Circuit::builder(load(VoltageSystem::OnePhase120, 300.0))
            .build(&mut install)
            .unwrap();
        let count = |install: &Installation, id: ConduitId| {
            install.conduit(id).unwrap().member_count()
        };

        assert_eq!(count(&install, first_conduit(&circuit)), 3);

        circuit.set_sets(2, &mut install).unwrap();
        assert_eq!(circuit.private_containers().len(), 1);
        assert_eq!(count(&install, first_conduit(&circuit)), 6);

        circuit.set_private_conduits(2, &mut install).unwrap();
        assert_eq!(circuit.private_containers().len(), 2);
        for owner in circuit.private_containers() {
            let Owner::Conduit(id) = *owner else {
                panic!("expected a conduit");
            };
            assert_eq!(count(&install, id), 3);
        }

        assert_eq!(
            circuit.set_sets(3, &mut install),
            Err(CircuitError::UnevenConduits {
                sets: 3,
                conduits: 2
            })
        );

        circuit.set_private_conduits(1, &mut install).unwrap();
        let config = CircuitConfig {
            single_egc: true,
            ..*circuit.config()
        };
        circuit.set_config(config, &mut install).unwrap();
        assert_eq!(count(&install, first_conduit(&circuit)), 5);
    }

    #[test]
    fn shared_conduit_derates_every_circuit() {
        let mut install = Installation::default();
        let shared = install.add_conduit(Conduit::default());
        let wiring = WiringMode::SharedConduit(shared);

        let mut a = Circuit::builder(load(VoltageSystem::OnePhase120, 10.0))
            .wiring(wiring)
            .build(&mut install)
            .unwrap();
        let mut b = Circuit::builder(load(VoltageSystem::OnePhase120, 20.0))
            .wiring(wiring)
            .build(&mut install)
            .unwrap();

        let conduit = install.conduit(shared).unwrap();
        assert_eq!(conduit.member_count(), 6);
        assert_eq!(conduit.current_carrying_count(), 4);

        assert_eq!(
            a.set_sets(2, &mut install),
            Err(CircuitError::SetsInSharedConduit { sets: 2 })
        );
        assert_eq!(
            a.set_private_conduits(2, &mut install),
            Err(CircuitError::NotPrivateConduit)
        );

        assert!(a.calculate(&mut install).unwrap().is_valid());
        assert!(b.calculate(&mut install).unwrap().is_valid());

        a.uninstall(&mut install);
        assert_eq!(install.conduit(shared).unwrap().member_count(), 3);
    }

    #[test]
    fn rewiring_removes_private_containers() {
        let mut install = Installation::default();
        let mut circuit = Circuit::builder(load(VoltageSystem::OnePhase120, 10.0))
            .build(&mut install)
            .unwrap();
        let conduit = first_conduit(&circuit);

        circuit.set_wiring(WiringMode::FreeAir, &mut install).unwrap();

        assert!(install.conduit(conduit).is_err());
        assert!(circuit.private_containers().is_empty());
        assert_eq!(circuit.members().count(), 0);

        let sizing = circuit.calculate(&mut install).unwrap();
        assert_eq!(sizing.messages.warnings(), [Warning::InsulatedConductorsInFreeAir]);
        assert_eq!(sizing.phase, Some(Size::Awg12));
    }

    #[test]
    fn design_current_is_per_set() {
        let continuous = load(VoltageSystem::OnePhase120, 14.0).with_continuous(true);
        let sizing = size_default(continuous.clone());
        // 14 A × 1.25 = 17.5 A, too much for 14 AWG on 60 °C terminals.
        assert_eq!(sizing.size_per_ampacity, Some(Size::Awg12));

        let config = CircuitConfig {
            fully_rated: true,
            ..CircuitConfig::default()
        };
        let mut install = Installation::default();
        let mut circuit = Circuit::builder(continuous)
            .config(config)
            .build(&mut install)
            .unwrap();
        let sizing = circuit.calculate(&mut install).unwrap();
        assert_eq!(sizing.size_per_ampacity, Some(Size::Awg14));
        assert!(amps(14.0) <= sizing.ampacity.unwrap());
    }

    #[test]
    fn failed_sizing_keeps_shared_conduit_sizes() {
        let mut install = Installation::default();
        let shared = install.add_conduit(Conduit::default());
        let wiring = WiringMode::SharedConduit(shared);

        let mut oversized = Circuit::builder(load(VoltageSystem::OnePhase120, 5000.0))
            .wiring(wiring)
            .build(&mut install)
            .unwrap();
        let mut branch = Circuit::builder(load(VoltageSystem::OnePhase120, 10.0))
            .wiring(wiring)
            .build(&mut install)
            .unwrap();

        let before = branch.calculate(&mut install).unwrap();
        assert!(before.is_valid());

        // The search walks the oversized circuit through every size.
        let failed = oversized.calculate(&mut install).unwrap();
        assert_eq!(failed.messages.codes(), vec![-3]);
        for id in oversized.members() {
            assert_eq!(install.member(id).unwrap().size(), Size::Awg12);
        }

        assert_eq!(branch.calculate(&mut install).unwrap(), before);
    }

    #[test]
    fn multi_outlet_rating_is_raised_past_45_amps() {
        let load = load(VoltageSystem::OnePhase120, 40.0)
            .with_circuit_type(CircuitType::MultiOutletBranch);
        let config = CircuitConfig {
            length: Length::new::<foot>(50.0),
            termination: Termination::Known(TempRating::T75),
            ..CircuitConfig::default()
        };
        let conduit = Conduit::default().with_ambient(deg_f(104.0)).unwrap();

        let mut install = Installation::default();
        let mut circuit = Circuit::builder(load)
            .config(config)
            .wiring(WiringMode::PrivateConduit { conduit, count: 1 })
            .build(&mut install)
            .unwrap();
        let sizing = circuit.calculate(&mut install).unwrap();

        // 8 AWG carries 50 A × 0.88 = 44 A, which calls for a 45 A device.
        // 40 A would not protect it, so the rating goes to 50 A on 6 AWG.
        assert!(sizing.is_valid());
        assert_eq!(sizing.size_per_ampacity, Some(Size::Awg8));
        assert_eq!(sizing.ocpd, rating(50));
        assert_eq!(sizing.phase, Some(Size::Awg6));
        assert_eq!(sizing.neutral, Some(Size::Awg6));
        assert_eq!(sizing.ground, Some(Size::Awg10));
        assert_relative_eq!(
            sizing.ampacity.unwrap().get::<ampere>(),
            57.2,
            epsilon = 1e-9
        );

        let conduit = install.conduit(first_conduit(&circuit)).unwrap();
        for (_, item) in conduit.members() {
            let conductor = item.as_conductor().unwrap();
            let expected = match conductor.role() {
                Role::Ground => Size::Awg10,
                _ => Size::Awg6,
            };
            assert_eq!(conductor.size(), expected, "{:?}", conductor.role());
        }
    }

    #[test]
    fn small_conductor_limit_below_the_load_upsizes_the_phase() {
        let config = CircuitConfig {
            length: Length::new::<foot>(25.0),
            termination: Termination::Known(TempRating::T90),
            ..CircuitConfig::default()
        };
        let mut install = Installation::default();
        let mut circuit = Circuit::builder(load(VoltageSystem::OnePhase120, 24.0))
            .config(config)
            .conductor(&Conductor::default().with_insulation(Insulation::Thhn))
            .build(&mut install)
            .unwrap();
        let sizing = circuit.calculate(&mut install).unwrap();

        // 14 AWG carries 25 A at 90 °C but stops at 15 A, and 12 AWG at 20 A.
        assert!(sizing.is_valid());
        assert_eq!(sizing.size_per_ampacity, Some(Size::Awg14));
        assert_eq!(sizing.ocpd, rating(25));
        assert_eq!(sizing.phase, Some(Size::Awg10));
        assert_eq!(sizing.neutral, Some(Size::Awg10));
        assert_eq!(sizing.ground, Some(Size::Awg10));
        assert_relative_eq!(sizing.ampacity.unwrap().get::<ampere>(), 40.0);
    }

    #[test]
    fn aluminum_multi_outlet_avoids_25_amps() {
        let load = load(VoltageSystem::OnePhase120, 22.0)
            .with_circuit_type(CircuitType::MultiOutletBranch);
        let config = CircuitConfig {
            length: Length::new::<foot>(25.0),
            ..CircuitConfig::default()
        };
        let conduit = Conduit::default().with_ambient(deg_f(122.0)).unwrap();

        let mut install = Installation::default();
        let mut circuit = Circuit::builder(load)
            .config(config)
            .conductor(&Conductor::default().with_metal(Metal::Aluminum))
            .wiring(WiringMode::PrivateConduit { conduit, count: 1 })
            .build(&mut install)
            .unwrap();
        let sizing = circuit.calculate(&mut install).unwrap();

        // 10 AWG carries 30 A × 0.75 = 22.5 A but is limited to 20 A. 8 AWG
        // supports 25 A, which a multi-outlet circuit cannot use, so 30 A.
        assert!(sizing.is_valid());
        assert_eq!(sizing.size_per_ampacity, Some(Size::Awg10));
        assert_eq!(sizing.ocpd, rating(30));
        assert_eq!(sizing.phase, Some(Size::Awg8));
        assert_eq!(sizing.ground, Some(Size::Awg8));
        assert_relative_eq!(
            sizing.ampacity.unwrap().get::<ampere>(),
            30.0,
            epsilon = 1e-9
        );
    }

    #[test]
    fn parallel_sets_use_the_circuit_current_for_terminations() {
        // 90 A per set, 180 A for the circuit: the 75 °C column applies.
        let config = CircuitConfig {
            sets: 2,
            ..CircuitConfig::default()
        };
        let conduit = Conduit::default();
        let mut install = Installation::default();
        let mut circuit = Circuit::builder(load(VoltageSystem::OnePhase120, 180.0))
            .config(config)
            .wiring(WiringMode::PrivateConduit { conduit, count: 2 })
            .build(&mut install)
            .unwrap();
        let sizing = circuit.calculate(&mut install).unwrap();

        assert_eq!(sizing.size_per_ampacity, Some(Size::Awg3));
        assert_eq!(
            sizing.messages.errors(),
            [ComplianceError::ParallelTooSmall { size: Size::Awg3 }]
        );
    }

    #[test]
    fn load_maximum_ocpd_is_rounded_down() {
        let load = load(VoltageSystem::OnePhase120, 10.0)
            .with_max_ocpd_rating(amps(17.0))
            .unwrap();
        let sizing = size_default(load);

        assert!(sizing.is_valid());
        assert_eq!(sizing.phase, Some(Size::Awg12));
        assert_eq!(sizing.ocpd, rating(15));
    }
}
