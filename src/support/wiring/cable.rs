use std::{f64::consts::PI, fmt};

use uom::si::{
    f64::{Area, Length, ThermodynamicTemperature},
    length::inch,
};

use crate::support::{
    constraint::StrictlyPositive,
    derating::{BundledCable, Housing},
    nec::{Edition, Insulation, Metal, Size},
};

use super::{
    Conductor, Conduitable, NeutralKind, OwnershipError, ParameterError, Role, VoltageSystem,
    WiringError,
    conduitable::{Placement, Surroundings},
};

/// Cable types recognized by the sizing rules.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum CableType {
    /// Armored cable.
    Ac,
    /// Metal-clad cable.
    #[default]
    Mc,
    /// Nonmetallic-sheathed cable.
    Nm,
    Nmc,
    Nms,
    /// Underground feeder and branch-circuit cable.
    Uf,
    /// Service-entrance cable.
    Se,
    /// Underground service-entrance cable.
    Use,
    /// Power and control tray cable.
    Tc,
}

impl CableType {
    /// Whether the cable has a metallic armor (types AC and MC).
    #[must_use]
    pub fn is_armored(self) -> bool {
        matches!(self, CableType::Ac | CableType::Mc)
    }
}

impl fmt::Display for CableType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            CableType::Ac => "AC",
            CableType::Mc => "MC",
            CableType::Nm => "NM",
            CableType::Nmc => "NMC",
            CableType::Nms => "NMS",
            CableType::Uf => "UF",
            CableType::Se => "SE",
            CableType::Use => "USE",
            CableType::Tc => "TC",
        })
    }
}

/// A multi-conductor cable.
///
/// A cable owns its phase conductors (one per ungrounded conductor of the
/// voltage system), a neutral when the system has one, and a ground.
/// Armored types (AC and MC) start without an outer jacket; every other type
/// is jacketed.
///
/// For fill calculations a cable counts as one item with the area of a
/// circle of its outer diameter (0.5 in unless set).
#[derive(Debug, Clone, PartialEq)]
pub struct Cable {
    cable_type: CableType,
    system: VoltageSystem,
    jacketed: bool,
    outer_diameter: Length,
    phases: Vec<Conductor>,
    neutral: Option<Conductor>,
    ground: Conductor,
    surroundings: Surroundings,
}

impl Default for Cable {
    fn default() -> Self {
        Self::new(CableType::default(), VoltageSystem::default())
    }
}

impl Cable {
    /// Creates a 12 AWG copper THHN cable for the given system.
    #[must_use]
    pub fn new(cable_type: CableType, system: VoltageSystem) -> Self {
        let template = Conductor::default().with_insulation(Insulation::Thhn);

        let phases = vec![template.clone(); system.hot_count()];
        let neutral = match system.neutral_kind() {
            NeutralKind::None => None,
            NeutralKind::AlwaysCurrentCarrying => {
                Some(template.clone().with_role(Role::CurrentCarryingNeutral))
            }
            NeutralKind::PossiblyCurrentCarrying | NeutralKind::NonCurrentCarrying => {
                Some(template.clone().with_role(Role::NonCurrentCarryingNeutral))
            }
        };
        let ground = template.with_role(Role::Ground);

        Self {
            cable_type,
            system,
            jacketed: !cable_type.is_armored(),
            outer_diameter: Length::new::<inch>(0.5),
            phases,
            neutral,
            ground,
            surroundings: Surroundings::default(),
        }
    }

    #[must_use]
    pub fn with_jacket(mut self, jacketed: bool) -> Self {
        self.jacketed = jacketed;
        self
    }

    #[must_use]
    pub fn with_metal(mut self, metal: Metal) -> Self {
        self.set_metal(metal);
        self
    }

    #[must_use]
    pub fn with_insulation(mut self, insulation: Insulation) -> Self {
        self.set_insulation(insulation);
        self
    }

    #[must_use]
    pub fn with_phase_size(mut self, size: Size) -> Self {
        self.set_phase_size(size);
        self
    }

    #[must_use]
    pub fn with_edition(mut self, edition: Edition) -> Self {
        self.surroundings.edition = edition;
        self
    }

    /// # Errors
    ///
    /// Returns a [`ParameterError`] if the diameter is not strictly positive.
    pub fn with_outer_diameter(mut self, diameter: Length) -> Result<Self, ParameterError> {
        self.set_outer_diameter(diameter)?;
        Ok(self)
    }

    /// # Errors
    ///
    /// Returns a [`ParameterError`] if the length is not strictly positive.
    pub fn with_length(mut self, length: Length) -> Result<Self, ParameterError> {
        self.set_length(length)?;
        Ok(self)
    }

    /// # Errors
    ///
    /// Returns a [`ParameterError`] if the temperature is outside -40 °F to 185 °F.
    pub fn with_ambient(mut self, ambient: ThermodynamicTemperature) -> Result<Self, WiringError> {
        self.set_ambient_temperature(ambient)?;
        Ok(self)
    }

    #[must_use]
    pub fn cable_type(&self) -> CableType {
        self.cable_type
    }

    #[must_use]
    pub fn system(&self) -> VoltageSystem {
        self.system
    }

    #[must_use]
    pub fn is_jacketed(&self) -> bool {
        self.jacketed
    }

    #[must_use]
    pub fn outer_diameter(&self) -> Length {
        self.outer_diameter
    }

    #[must_use]
    pub fn phases(&self) -> &[Conductor] {
        &self.phases
    }

    #[must_use]
    pub fn neutral(&self) -> Option<&Conductor> {
        self.neutral.as_ref()
    }

    #[must_use]
    pub fn ground(&self) -> &Conductor {
        &self.ground
    }

    /// Whether the neutral is counted as current-carrying.
    #[must_use]
    pub fn is_neutral_current_carrying(&self) -> bool {
        self.neutral
            .as_ref()
            .is_some_and(|neutral| neutral.role().is_current_carrying())
    }

    pub fn set_cable_type(&mut self, cable_type: CableType) {
        self.cable_type = cable_type;
    }

    pub fn set_jacketed(&mut self, jacketed: bool) {
        self.jacketed = jacketed;
    }

    /// Sets the metal of every conductor in the cable.
    pub fn set_metal(&mut self, metal: Metal) {
        self.conductors_mut().for_each(|c| c.set_metal(metal));
    }

    /// Sets the insulation of every conductor in the cable.
    pub fn set_insulation(&mut self, insulation: Insulation) {
        self.conductors_mut().for_each(|c| c.set_insulation(insulation));
    }

    pub fn set_phase_size(&mut self, size: Size) {
        self.phases.iter_mut().for_each(|c| c.set_size(size));
    }

    /// Sets the neutral size; ignored when the system has no neutral.
    pub fn set_neutral_size(&mut self, size: Size) {
        if let Some(neutral) = self.neutral.as_mut() {
            neutral.set_size(size);
        }
    }

    pub fn set_ground_size(&mut self, size: Size) {
        self.ground.set_size(size);
    }

    /// Marks a wye neutral as current-carrying or not.
    ///
    /// # Errors
    ///
    /// Returns [`ParameterError::NeutralFixed`] unless the system's neutral is
    /// possibly current-carrying.
    pub fn set_neutral_current_carrying(
        &mut self,
        current_carrying: bool,
    ) -> Result<(), ParameterError> {
        let neutral = match (self.system.neutral_kind(), self.neutral.as_mut()) {
            (NeutralKind::PossiblyCurrentCarrying, Some(neutral)) => neutral,
            _ => {
                return Err(ParameterError::NeutralFixed {
                    system: self.system,
                });
            }
        };
        neutral.set_role(if current_carrying {
            Role::CurrentCarryingNeutral
        } else {
            Role::NonCurrentCarryingNeutral
        });
        Ok(())
    }

    /// # Errors
    ///
    /// Returns a [`ParameterError`] if the diameter is not strictly positive.
    pub fn set_outer_diameter(&mut self, diameter: Length) -> Result<(), ParameterError> {
        let diameter =
            StrictlyPositive::new(diameter).map_err(ParameterError::constraint("outer diameter"))?;
        self.outer_diameter = diameter.into_inner();
        Ok(())
    }

    /// # Errors
    ///
    /// Returns a [`ParameterError`] if the length is not strictly positive.
    pub fn set_length(&mut self, length: Length) -> Result<(), ParameterError> {
        self.surroundings.set_length(length)?;
        self.conductors_mut().try_for_each(|c| c.set_length(length))
    }

    /// # Errors
    ///
    /// Fails with an [`OwnershipError`] while attached, or a
    /// [`ParameterError`] if the temperature is out of range.
    pub fn set_ambient_temperature(
        &mut self,
        ambient: ThermodynamicTemperature,
    ) -> Result<(), WiringError> {
        self.surroundings.set_ambient(ambient)
    }

    /// # Errors
    ///
    /// Fails with an [`OwnershipError`] while attached, or a
    /// [`ParameterError`] if the distance is negative.
    pub fn set_rooftop_distance(&mut self, distance: Length) -> Result<(), WiringError> {
        self.surroundings.set_rooftop(distance)
    }

    /// # Errors
    ///
    /// Fails with an [`OwnershipError`] while attached.
    pub fn reset_rooftop(&mut self) -> Result<(), OwnershipError> {
        self.surroundings.reset_rooftop()
    }

    /// # Errors
    ///
    /// Fails with an [`OwnershipError`] while attached.
    pub fn set_edition(&mut self, edition: Edition) -> Result<(), OwnershipError> {
        self.surroundings.set_edition(edition)
    }

    /// Properties that decide the AC/MC bundling exceptions.
    #[must_use]
    pub fn bundled(&self) -> BundledCable {
        BundledCable {
            armored: self.cable_type.is_armored(),
            jacketed: self.jacketed,
            current_carrying: self.current_carrying_count(),
            metal: self.metal(),
            size: self.size(),
        }
    }

    pub(crate) fn place(&mut self, placement: Placement) {
        self.surroundings.place(placement);
    }

    pub(crate) fn detach(&mut self) {
        self.surroundings.detach();
    }

    fn conductors(&self) -> impl Iterator<Item = &Conductor> {
        self.phases
            .iter()
            .chain(self.neutral.iter())
            .chain(std::iter::once(&self.ground))
    }

    fn conductors_mut(&mut self) -> impl Iterator<Item = &mut Conductor> {
        self.phases
            .iter_mut()
            .chain(self.neutral.iter_mut())
            .chain(std::iter::once(&mut self.ground))
    }
}

impl Conduitable for Cable {
    /// Size of the phase conductors.
    fn size(&self) -> Size {
        self.phases
            .first()
            .map_or(self.ground.size(), Conduitable::size)
    }

    fn metal(&self) -> Metal {
        self.ground.metal()
    }

    fn insulation(&self) -> Insulation {
        self.ground.insulation()
    }

    fn ambient_temperature(&self) -> ThermodynamicTemperature {
        self.surroundings.ambient
    }

    fn rooftop_distance(&self) -> Option<Length> {
        self.surroundings.rooftop
    }

    fn length(&self) -> Length {
        self.surroundings.length
    }

    fn edition(&self) -> Edition {
        self.surroundings.edition
    }

    fn current_carrying_count(&self) -> usize {
        self.conductors().map(Conduitable::current_carrying_count).sum()
    }

    fn insulated_area(&self) -> Option<Area> {
        let d = self.outer_diameter;
        Some(d * d * (PI / 4.0))
    }

    fn housing(&self) -> &Housing {
        &self.surroundings.housing
    }

    fn is_cable(&self) -> bool {
        true
    }

    fn copy(&self) -> Self {
        let mut copy = self.clone();
        copy.detach();
        copy
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use uom::si::{area::square_inch, length::foot};

    #[test]
    fn composition_follows_voltage_system() {
        let cable = Cable::new(CableType::Nm, VoltageSystem::SplitPhase240);
        assert_eq!(cable.phases().len(), 2);
        assert_eq!(
            cable.neutral().map(Conductor::role),
            Some(Role::NonCurrentCarryingNeutral)
        );
        assert_eq!(cable.ground().role(), Role::Ground);
        assert_eq!(cable.current_carrying_count(), 2);

        let cable = Cable::new(CableType::Mc, VoltageSystem::OnePhase120);
        assert_eq!(cable.current_carrying_count(), 2);

        let cable = Cable::new(CableType::Mc, VoltageSystem::ThreePhase480);
        assert!(cable.neutral().is_none());
        assert_eq!(cable.current_carrying_count(), 3);
    }

    #[test]
    fn armored_types_start_unjacketed() {
        assert!(!Cable::new(CableType::Ac, VoltageSystem::OnePhase120).is_jacketed());
        assert!(!Cable::new(CableType::Mc, VoltageSystem::OnePhase120).is_jacketed());
        assert!(Cable::new(CableType::Nm, VoltageSystem::OnePhase120).is_jacketed());
        assert!(Cable::new(CableType::Tc, VoltageSystem::OnePhase120).is_jacketed());
    }

    #[test]
    fn neutral_role_only_changes_on_wye_systems() {
        let mut wye = Cable::new(CableType::Mc, VoltageSystem::Wye208);
        assert_eq!(wye.current_carrying_count(), 3);
        wye.set_neutral_current_carrying(true).unwrap();
        assert!(wye.is_neutral_current_carrying());
        assert_eq!(wye.current_carrying_count(), 4);

        let mut split = Cable::new(CableType::Mc, VoltageSystem::SplitPhase240);
        assert_eq!(
            split.set_neutral_current_carrying(true),
            Err(ParameterError::NeutralFixed {
                system: VoltageSystem::SplitPhase240
            })
        );

        let mut delta = Cable::new(CableType::Mc, VoltageSystem::ThreePhase208);
        assert!(delta.set_neutral_current_carrying(false).is_err());
    }

    #[test]
    fn area_of_outer_circle() {
        let cable = Cable::default()
            .with_outer_diameter(Length::new::<inch>(0.8))
            .unwrap();
        assert_relative_eq!(
            cable.insulated_area().unwrap().get::<square_inch>(),
            PI / 4.0 * 0.64,
            epsilon = 1e-9
        );
        assert!(
            Cable::default()
                .with_outer_diameter(Length::new::<inch>(0.0))
                .is_err()
        );
    }

    #[test]
    fn free_cable_adjusts_on_its_own_count() {
        let mut cable = Cable::new(CableType::Mc, VoltageSystem::Wye480);
        assert_eq!(cable.adjustment_factor(), 1.0);
        cable.set_neutral_current_carrying(true).unwrap();
        assert_eq!(cable.adjustment_factor(), 0.8);
    }

    #[test]
    fn sizes_and_materials_apply_to_members() {
        let mut cable = Cable::new(CableType::Mc, VoltageSystem::Wye208)
            .with_metal(Metal::Aluminum)
            .with_phase_size(Size::Awg2);
        cable.set_neutral_size(Size::Awg1);
        cable.set_ground_size(Size::Awg6);
        cable.set_length(Length::new::<foot>(40.0)).unwrap();

        assert_eq!(cable.size(), Size::Awg2);
        assert_eq!(cable.metal(), Metal::Aluminum);
        assert_eq!(cable.neutral().map(Conduitable::size), Some(Size::Awg1));
        assert_eq!(cable.ground().size(), Size::Awg6);
        assert!(cable.phases().iter().all(|c| c.metal() == Metal::Aluminum));
        assert_relative_eq!(cable.ground().length().get::<foot>(), 40.0, epsilon = 1e-9);
    }

    #[test]
    fn bundled_properties() {
        let cable = Cable::new(CableType::Ac, VoltageSystem::OnePhase120);
        assert_eq!(
            cable.bundled(),
            BundledCable {
                armored: true,
                jacketed: false,
                current_carrying: 2,
                metal: Metal::Copper,
                size: Size::Awg12,
            }
        );
    }
}
