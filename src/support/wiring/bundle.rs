use uom::si::{
    f64::{Length, ThermodynamicTemperature},
    length::inch,
    thermodynamic_temperature::degree_fahrenheit,
};

use crate::support::{constraint::StrictlyPositive, derating::BUNDLING_THRESHOLD_INCHES};

use super::{
    ParameterError,
    conduitable::{validate_ambient, validate_rooftop},
};

/// Settings of a group of conductors or cables run together outside a raceway.
///
/// Bundles of 24 in or less are treated as free air.
/// Add it to an [`Installation`](super::Installation) to place members in it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bundle {
    ambient: ThermodynamicTemperature,
    rooftop: Option<Length>,
    length: Length,
}

impl Default for Bundle {
    fn default() -> Self {
        Self {
            ambient: ThermodynamicTemperature::new::<degree_fahrenheit>(86.0),
            rooftop: None,
            length: Length::new::<inch>(BUNDLING_THRESHOLD_INCHES),
        }
    }
}

impl Bundle {
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

    #[must_use]
    pub fn ambient_temperature(&self) -> ThermodynamicTemperature {
        self.ambient
    }

    #[must_use]
    pub fn rooftop_distance(&self) -> Option<Length> {
        self.rooftop
    }

    /// Length over which the members run together.
    #[must_use]
    pub fn length(&self) -> Length {
        self.length
    }

    pub(crate) fn set_length(&mut self, length: Length) -> Result<(), ParameterError> {
        let length =
            StrictlyPositive::new(length).map_err(ParameterError::constraint("bundling length"))?;
        self.length = length.into_inner();
        Ok(())
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
}
