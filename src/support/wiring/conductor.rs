use uom::si::f64::{Area, Length, ThermodynamicTemperature};

use crate::support::{
    derating::Housing,
    nec::{Edition, Insulation, Metal, Size},
};

use super::{
    Conduitable, OwnershipError, ParameterError, Role, WiringError,
    conduitable::{Placement, Surroundings},
};

/// A single insulated conductor.
///
/// Defaults to a 100 ft run of 12 AWG copper THW at 86 °F, not on a rooftop,
/// under NEC 2017.
///
/// While the conductor is attached to a conduit or bundle its ambient
/// temperature, rooftop distance and edition come from the container, and
/// the setters for those values return an [`OwnershipError`].
///
/// # Example
///
/// ```
/// use twine_electrical::support::{
///     nec::{Insulation, Size},
///     wiring::{Conductor, Conduitable},
/// };
/// use uom::si::{
///     electric_current::ampere, f64::ThermodynamicTemperature,
///     thermodynamic_temperature::degree_fahrenheit,
/// };
///
/// let conductor = Conductor::default()
///     .with_size(Size::Awg10)
///     .with_insulation(Insulation::Thhn)
///     .with_ambient(ThermodynamicTemperature::new::<degree_fahrenheit>(100.0))
///     .unwrap();
///
/// let ampacity = conductor.corrected_and_adjusted_ampacity().unwrap();
/// assert!((ampacity.get::<ampere>() - 40.0 * 0.91).abs() < 1e-9);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Conductor {
    size: Size,
    metal: Metal,
    insulation: Insulation,
    role: Role,
    surroundings: Surroundings,
}

impl Default for Conductor {
    fn default() -> Self {
        Self {
            size: Size::Awg12,
            metal: Metal::Copper,
            insulation: Insulation::Thw,
            role: Role::Hot,
            surroundings: Surroundings::default(),
        }
    }
}

impl Conductor {
    /// Creates a free-standing conductor with default surroundings.
    #[must_use]
    pub fn new(size: Size, metal: Metal, insulation: Insulation, role: Role) -> Self {
        Self {
            size,
            metal,
            insulation,
            role,
            surroundings: Surroundings::default(),
        }
    }

    #[must_use]
    pub fn with_size(mut self, size: Size) -> Self {
        self.size = size;
        self
    }

    #[must_use]
    pub fn with_metal(mut self, metal: Metal) -> Self {
        self.metal = metal;
        self
    }

    #[must_use]
    pub fn with_insulation(mut self, insulation: Insulation) -> Self {
        self.insulation = insulation;
        self
    }

    #[must_use]
    pub fn with_role(mut self, role: Role) -> Self {
        self.role = role;
        self
    }

    /// Sets the run length.
    ///
    /// # Errors
    ///
    /// Returns a [`ParameterError`] if the length is not strictly positive.
    pub fn with_length(mut self, length: Length) -> Result<Self, ParameterError> {
        self.set_length(length)?;
        Ok(self)
    }

    /// Sets the ambient temperature.
    ///
    /// # Errors
    ///
    /// Returns a [`ParameterError`] if the temperature is outside -40 °F to 185 °F.
    pub fn with_ambient(mut self, ambient: ThermodynamicTemperature) -> Result<Self, WiringError> {
        self.set_ambient_temperature(ambient)?;
        Ok(self)
    }

    /// Places the conductor `distance` above a rooftop.
    ///
    /// # Errors
    ///
    /// Returns a [`ParameterError`] if the distance is negative.
    pub fn with_rooftop(mut self, distance: Length) -> Result<Self, WiringError> {
        self.set_rooftop_distance(distance)?;
        Ok(self)
    }

    #[must_use]
    pub fn with_edition(mut self, edition: Edition) -> Self {
        self.surroundings.edition = edition;
        self
    }

    #[must_use]
    pub fn role(&self) -> Role {
        self.role
    }

    pub fn set_size(&mut self, size: Size) {
        self.size = size;
    }

    pub fn set_metal(&mut self, metal: Metal) {
        self.metal = metal;
    }

    pub fn set_insulation(&mut self, insulation: Insulation) {
        self.insulation = insulation;
    }

    pub fn set_role(&mut self, role: Role) {
        self.role = role;
    }

    /// # Errors
    ///
    /// Returns a [`ParameterError`] if the length is not strictly positive.
    pub fn set_length(&mut self, length: Length) -> Result<(), ParameterError> {
        self.surroundings.set_length(length)
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

    /// Removes the rooftop condition.
    ///
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

    pub(crate) fn place(&mut self, placement: Placement) {
        self.surroundings.place(placement);
    }

    pub(crate) fn detach(&mut self) {
        self.surroundings.detach();
    }
}

impl Conduitable for Conductor {
    fn size(&self) -> Size {
        self.size
    }

    fn metal(&self) -> Metal {
        self.metal
    }

    fn insulation(&self) -> Insulation {
        self.insulation
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
        usize::from(self.role.is_current_carrying())
    }

    fn insulated_area(&self) -> Option<Area> {
        self.insulation.insulated_area(self.size)
    }

    fn housing(&self) -> &Housing {
        &self.surroundings.housing
    }

    fn is_cable(&self) -> bool {
        false
    }

    fn copy(&self) -> Self {
        let mut copy = self.clone();
        copy.detach();
        copy
    }
}
