use uom::si::{
    f64::{Length, ThermodynamicTemperature},
    thermodynamic_temperature::degree_fahrenheit,
};

use crate::support::nec::{ConduitType, TradeSize};

use super::{
    ParameterError,
    conduitable::{validate_ambient, validate_rooftop},
};

/// Settings of a raceway.
///
/// A `Conduit` on its own holds no members; add it to an
/// [`Installation`](super::Installation) to place conductors and cables in it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Conduit {
    conduit_type: ConduitType,
    ambient: ThermodynamicTemperature,
    rooftop: Option<Length>,
    nipple: bool,
    minimum_trade_size: TradeSize,
}

impl Default for Conduit {
    fn default() -> Self {
        Self {
            conduit_type: ConduitType::default(),
            ambient: ThermodynamicTemperature::new::<degree_fahrenheit>(86.0),
            rooftop: None,
            nipple: false,
            minimum_trade_size: TradeSize::default(),
        }
    }
}

impl Conduit {
    #[must_use]
    pub fn new(conduit_type: ConduitType) -> Self {
        Self {
            conduit_type,
            ..Self::default()
        }
    }

    /// # Errors
    ///
    /// Returns a [`ParameterError`] if the temperature is outside -40 °F to 185 °F.
    pub fn with_ambient(
        mut self,
        ambient: ThermodynamicTemperature,
    ) -> Result<Self, ParameterError> {
        self.set_ambient_temperature(ambient)?;
        Ok(self)
    }

    /// # Errors
    ///
    /// Returns a [`ParameterError`] if the distance is negative.
    pub fn with_rooftop(mut self, distance: Length) -> Result<Self, ParameterError> {
        self.set_rooftop_distance(distance)?;
        Ok(self)
    }

    /// Marks the conduit as a nipple, 24 in or shorter.
    #[must_use]
    pub fn with_nipple(mut self, nipple: bool) -> Self {
        self.nipple = nipple;
        self
    }

    #[must_use]
    pub fn with_minimum_trade_size(mut self, trade_size: TradeSize) -> Self {
        self.minimum_trade_size = trade_size;
        self
    }

    #[must_use]
    pub fn conduit_type(&self) -> ConduitType {
        self.conduit_type
    }

    #[must_use]
    pub fn ambient_temperature(&self) -> ThermodynamicTemperature {
        self.ambient
    }

    #[must_use]
    pub fn rooftop_distance(&self) -> Option<Length> {
        self.rooftop
    }

    #[must_use]
    pub fn is_nipple(&self) -> bool {
        self.nipple
    }

    #[must_use]
    pub fn minimum_trade_size(&self) -> TradeSize {
        self.minimum_trade_size
    }

    pub(crate) fn set_ambient_temperature(
        &mut self,
        ambient: ThermodynamicTemperature,
    ) -> Result<(), ParameterError> {
        self.ambient = validate_ambient(ambient)?;
        Ok(())
    }

    pub(crate) fn set_rooftop_distance(&mut self, distance: Length) -> Result<(), ParameterError> {
        self.rooftop = Some(validate_rooftop(distance)?);
        Ok(())
    }

    pub(crate) fn reset_rooftop(&mut self) {
        self.rooftop = None;
    }

    pub(crate) fn set_nipple(&mut self, nipple: bool) {
        self.nipple = nipple;
    }

    pub(crate) fn set_conduit_type(&mut self, conduit_type: ConduitType) {
        self.conduit_type = conduit_type;
    }

    pub(crate) fn set_minimum_trade_size(&mut self, trade_size: TradeSize) {
        self.minimum_trade_size = trade_size;
    }
}
