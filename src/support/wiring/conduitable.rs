use uom::si::{
    f64::{Area, ElectricCurrent, Length, ThermodynamicTemperature},
    length::foot,
    thermodynamic_temperature::degree_fahrenheit,
};

use crate::support::{
    constraint::{NonNegative, StrictlyPositive},
    derating::{self, Housing},
    nec::{Edition, Insulation, Metal, Size, TempRating, standard_ampacity},
    units::fahrenheit,
};

use super::{Cable, Conductor, OwnershipError, ParameterError, WiringError};

/// Lowest ambient temperature accepted, in °F.
pub const MIN_AMBIENT_F: f64 = -40.0;

/// Highest ambient temperature accepted, in °F.
pub const MAX_AMBIENT_F: f64 = 185.0;

/// What a conductor does in its circuit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Role {
    /// Ungrounded conductor.
    #[default]
    Hot,
    CurrentCarryingNeutral,
    NonCurrentCarryingNeutral,
    /// Equipment grounding conductor.
    Ground,
    /// Any other conductor that does not carry load current.
    NonCurrentCarrying,
}

impl Role {
    /// Whether the role counts toward the adjustment factor.
    #[must_use]
    pub fn is_current_carrying(self) -> bool {
        matches!(self, Role::Hot | Role::CurrentCarryingNeutral)
    }
}

/// Context a container writes into each of its members.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Placement {
    pub ambient: ThermodynamicTemperature,
    pub rooftop: Option<Length>,
    pub edition: Edition,
    pub housing: Housing,
}

/// Anything that can be installed in a conduit or bundle.
///
/// Factors are computed from the member's own state, which includes the
/// context last written by its container.
/// A detached item is in free air.
pub trait Conduitable {
    fn size(&self) -> Size;

    fn metal(&self) -> Metal;

    fn insulation(&self) -> Insulation;

    fn ambient_temperature(&self) -> ThermodynamicTemperature;

    /// Clearance above a rooftop, or `None` when not on a rooftop.
    fn rooftop_distance(&self) -> Option<Length>;

    fn length(&self) -> Length;

    fn edition(&self) -> Edition;

    /// Current-carrying conductors contributed to a container.
    fn current_carrying_count(&self) -> usize;

    /// Cross-sectional area for conduit fill, if listed.
    fn insulated_area(&self) -> Option<Area>;

    /// Container context as seen by the factor engine.
    fn housing(&self) -> &Housing;

    fn is_cable(&self) -> bool;

    /// A detached deep copy.
    #[must_use]
    fn copy(&self) -> Self
    where
        Self: Sized;

    fn temp_rating(&self) -> TempRating {
        self.insulation().temp_rating()
    }

    /// Whether the item belongs to a conduit or bundle.
    fn is_attached(&self) -> bool {
        !matches!(self.housing(), Housing::FreeAir)
    }

    fn correction_factor(&self) -> f64 {
        self.correction_factor_at(self.temp_rating())
    }

    /// Correction factor read from another temperature column.
    fn correction_factor_at(&self, rating: TempRating) -> f64 {
        derating::correction_factor_at(
            self.ambient_temperature(),
            self.rooftop_distance(),
            self.insulation(),
            self.edition(),
            rating,
        )
    }

    fn adjustment_factor(&self) -> f64 {
        derating::adjustment_factor(self.housing(), self.current_carrying_count(), self.is_cable())
    }

    fn compound_factor(&self) -> f64 {
        self.compound_factor_at(self.temp_rating())
    }

    /// Compound factor read from another temperature column, as needed to
    /// check a conductor against the rating of its terminations.
    fn compound_factor_at(&self, rating: TempRating) -> f64 {
        self.correction_factor_at(rating) * self.adjustment_factor()
    }

    /// Table 310.15(B)(16) ampacity, or `None` when not listed.
    fn standard_ampacity(&self) -> Option<ElectricCurrent> {
        standard_ampacity(self.size(), self.metal(), self.temp_rating())
    }

    /// Table ampacity times the compound factor.
    fn corrected_and_adjusted_ampacity(&self) -> Option<ElectricCurrent> {
        self.standard_ampacity()
            .map(|ampacity| ampacity * self.compound_factor())
    }
}

/// A stored conduitable item.
#[derive(Debug, Clone, PartialEq)]
pub enum AnyConduitable {
    Conductor(Conductor),
    Cable(Cable),
}

impl AnyConduitable {
    #[must_use]
    pub fn as_conductor(&self) -> Option<&Conductor> {
        match self {
            AnyConduitable::Conductor(conductor) => Some(conductor),
            AnyConduitable::Cable(_) => None,
        }
    }

    #[must_use]
    pub fn as_cable(&self) -> Option<&Cable> {
        match self {
            AnyConduitable::Cable(cable) => Some(cable),
            AnyConduitable::Conductor(_) => None,
        }
    }

    pub fn as_conductor_mut(&mut self) -> Option<&mut Conductor> {
        match self {
            AnyConduitable::Conductor(conductor) => Some(conductor),
            AnyConduitable::Cable(_) => None,
        }
    }

    pub fn as_cable_mut(&mut self) -> Option<&mut Cable> {
        match self {
            AnyConduitable::Cable(cable) => Some(cable),
            AnyConduitable::Conductor(_) => None,
        }
    }

    /// Sets the size of the item, or of a cable's phase conductors.
    pub fn set_size(&mut self, size: Size) {
        match self {
            AnyConduitable::Conductor(conductor) => conductor.set_size(size),
            AnyConduitable::Cable(cable) => cable.set_phase_size(size),
        }
    }

    pub(crate) fn place(&mut self, placement: Placement) {
        match self {
            AnyConduitable::Conductor(conductor) => conductor.place(placement),
            AnyConduitable::Cable(cable) => cable.place(placement),
        }
    }

    pub(crate) fn detach(&mut self) {
        match self {
            AnyConduitable::Conductor(conductor) => conductor.detach(),
            AnyConduitable::Cable(cable) => cable.detach(),
        }
    }
}

impl From<Conductor> for AnyConduitable {
    fn from(conductor: Conductor) -> Self {
        AnyConduitable::Conductor(conductor)
    }
}

impl From<Cable> for AnyConduitable {
    fn from(cable: Cable) -> Self {
        AnyConduitable::Cable(cable)
    }
}

macro_rules! delegate {
    ($self:ident, $item:ident => $body:expr) => {
        match $self {
            AnyConduitable::Conductor($item) => $body,
            AnyConduitable::Cable($item) => $body,
        }
    };
}

impl Conduitable for AnyConduitable {
    fn size(&self) -> Size {
        delegate!(self, item => item.size())
    }

    fn metal(&self) -> Metal {
        delegate!(self, item => item.metal())
    }

    fn insulation(&self) -> Insulation {
        delegate!(self, item => item.insulation())
    }

    fn ambient_temperature(&self) -> ThermodynamicTemperature {
        delegate!(self, item => item.ambient_temperature())
    }

    fn rooftop_distance(&self) -> Option<Length> {
        delegate!(self, item => item.rooftop_distance())
    }

    fn length(&self) -> Length {
        delegate!(self, item => item.length())
    }

    fn edition(&self) -> Edition {
        delegate!(self, item => item.edition())
    }

    fn current_carrying_count(&self) -> usize {
        delegate!(self, item => item.current_carrying_count())
    }

    fn insulated_area(&self) -> Option<Area> {
        delegate!(self, item => item.insulated_area())
    }

    fn housing(&self) -> &Housing {
        delegate!(self, item => item.housing())
    }

    fn is_cable(&self) -> bool {
        matches!(self, AnyConduitable::Cable(_))
    }

    fn copy(&self) -> Self {
        match self {
            AnyConduitable::Conductor(conductor) => AnyConduitable::Conductor(conductor.copy()),
            AnyConduitable::Cable(cable) => AnyConduitable::Cable(cable.copy()),
        }
    }
}

/// Environment shared by conductors and cables: the values a container
/// overrides while the item is attached.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Surroundings {
    pub length: Length,
    pub ambient: ThermodynamicTemperature,
    pub rooftop: Option<Length>,
    pub edition: Edition,
    pub housing: Housing,
}

impl Default for Surroundings {
    fn default() -> Self {
        Self {
            length: Length::new::<foot>(100.0),
            ambient: ThermodynamicTemperature::new::<degree_fahrenheit>(86.0),
            rooftop: None,
            edition: Edition::default(),
            housing: Housing::FreeAir,
        }
    }
}

impl Surroundings {
    pub fn place(&mut self, placement: Placement) {
        self.ambient = placement.ambient;
        self.rooftop = placement.rooftop;
        self.edition = placement.edition;
        self.housing = placement.housing;
    }

    pub fn detach(&mut self) {
        self.housing = Housing::FreeAir;
    }

    fn ensure_detached(&self, what: &'static str) -> Result<(), OwnershipError> {
        if matches!(self.housing, Housing::FreeAir) {
            Ok(())
        } else {
            Err(OwnershipError::Attached { what })
        }
    }

    pub fn set_length(&mut self, length: Length) -> Result<(), ParameterError> {
        let length = StrictlyPositive::new(length).map_err(ParameterError::constraint("length"))?;
        self.length = length.into_inner();
        Ok(())
    }

    pub fn set_ambient(&mut self, ambient: ThermodynamicTemperature) -> Result<(), WiringError> {
        self.ensure_detached("ambient temperature")?;
        self.ambient = validate_ambient(ambient)?;
        Ok(())
    }

    pub fn set_rooftop(&mut self, distance: Length) -> Result<(), WiringError> {
        self.ensure_detached("rooftop distance")?;
        self.rooftop = Some(validate_rooftop(distance)?);
        Ok(())
    }

    pub fn reset_rooftop(&mut self) -> Result<(), OwnershipError> {
        self.ensure_detached("rooftop distance")?;
        self.rooftop = None;
        Ok(())
    }

    pub fn set_edition(&mut self, edition: Edition) -> Result<(), OwnershipError> {
        self.ensure_detached("edition")?;
        self.edition = edition;
        Ok(())
    }
}

/// Checks an ambient temperature against the range of Table 310.15(B)(2)(a).
pub(crate) fn validate_ambient(
    ambient: ThermodynamicTemperature,
) -> Result<ThermodynamicTemperature, ParameterError> {
    let f = fahrenheit(ambient);
    if (MIN_AMBIENT_F..=MAX_AMBIENT_F).contains(&f) {
        Ok(ambient)
    } else {
        Err(ParameterError::AmbientOutOfRange { fahrenheit: f })
    }
}

pub(crate) fn validate_rooftop(distance: Length) -> Result<Length, ParameterError> {
    NonNegative::new(distance)
        .map(|d| d.into_inner())
        .map_err(ParameterError::constraint("rooftop distance"))
}
