use uom::si::{
    area::square_inch,
    f64::{Area, Length, Ratio, ThermodynamicTemperature},
    ratio::{percent, ratio},
};

use crate::support::{
    derating::{CableException, Housing, cable_exception},
    nec::{ConduitType, Edition, TradeSize},
};

use super::{
    AnyConduitable, Bundle, Cable, Conduit, Conduitable, OwnershipError, ParameterError,
    WiringError, conduitable::Placement,
};

/// Handle to a conduit in an [`Installation`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ConduitId(usize);

/// Handle to a bundle in an [`Installation`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BundleId(usize);

/// Handle to a conductor or cable stored in an [`Installation`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MemberId(usize);

/// The container that owns a member.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Owner {
    Conduit(ConduitId),
    Bundle(BundleId),
}

impl From<ConduitId> for Owner {
    fn from(id: ConduitId) -> Self {
        Owner::Conduit(id)
    }
}

impl From<BundleId> for Owner {
    fn from(id: BundleId) -> Self {
        Owner::Bundle(id)
    }
}

#[derive(Debug, Clone, PartialEq)]
struct Member {
    owner: Owner,
    item: AnyConduitable,
}

/// Owner of every conduit, bundle and installed conductor or cable.
///
/// Each member belongs to exactly one container for as long as it is stored.
/// Adding an item stores a detached copy, so the caller's value is never
/// shared with the installation.
/// After every change the owning container's ambient temperature, rooftop
/// distance, current-carrying count and the installation's edition are
/// written into all of its members, so their derating factors are always
/// current.
///
/// # Example
///
/// ```
/// use twine_electrical::support::{
///     nec::{Edition, Insulation},
///     wiring::{Conduit, Conductor, Conduitable, Installation},
/// };
/// use uom::si::{
///     electric_current::ampere, f64::ThermodynamicTemperature,
///     thermodynamic_temperature::degree_fahrenheit,
/// };
///
/// let mut install = Installation::new(Edition::Nec2017);
/// let conduit = install.add_conduit(
///     Conduit::default()
///         .with_ambient(ThermodynamicTemperature::new::<degree_fahrenheit>(100.0))
///         .unwrap(),
/// );
///
/// let thhn = Conductor::default().with_insulation(Insulation::Thhn);
/// let ids: Vec<_> = (0..4).map(|_| install.add(conduit, &thhn).unwrap()).collect();
///
/// let member = install.member(ids[0]).unwrap();
/// let ampacity = member.corrected_and_adjusted_ampacity().unwrap().get::<ampere>();
/// assert!((ampacity - 30.0 * 0.91 * 0.8).abs() < 1e-9);
/// assert!(!thhn.is_attached());
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Installation {
    edition: Edition,
    conduits: Vec<Option<Conduit>>,
    bundles: Vec<Option<Bundle>>,
    members: Vec<Option<Member>>,
}

impl Installation {
    #[must_use]
    pub fn new(edition: Edition) -> Self {
        Self {
            edition,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn edition(&self) -> Edition {
        self.edition
    }

    /// Changes the edition and rewrites every member.
    pub fn set_edition(&mut self, edition: Edition) {
        self.edition = edition;
        for owner in self.owners() {
            self.refresh(owner);
        }
    }

    pub fn add_conduit(&mut self, conduit: Conduit) -> ConduitId {
        self.conduits.push(Some(conduit));
        ConduitId(self.conduits.len() - 1)
    }

    pub fn add_bundle(&mut self, bundle: Bundle) -> BundleId {
        self.bundles.push(Some(bundle));
        BundleId(self.bundles.len() - 1)
    }

    /// Removes a conduit, returning its members detached.
    ///
    /// # Errors
    ///
    /// Returns an [`OwnershipError`] if the conduit does not exist.
    pub fn remove_conduit(&mut self, id: ConduitId) -> Result<Vec<AnyConduitable>, OwnershipError> {
        self.conduits
            .get_mut(id.0)
            .and_then(Option::take)
            .ok_or(OwnershipError::UnknownConduit(id))?;
        Ok(self.evict(Owner::Conduit(id)))
    }

    /// Removes a bundle, returning its members detached.
    ///
    /// # Errors
    ///
    /// Returns an [`OwnershipError`] if the bundle does not exist.
    pub fn remove_bundle(&mut self, id: BundleId) -> Result<Vec<AnyConduitable>, OwnershipError> {
        self.bundles
            .get_mut(id.0)
            .and_then(Option::take)
            .ok_or(OwnershipError::UnknownBundle(id))?;
        Ok(self.evict(Owner::Bundle(id)))
    }

    /// # Errors
    ///
    /// Returns an [`OwnershipError`] if the conduit does not exist.
    pub fn conduit(&self, id: ConduitId) -> Result<ConduitRef<'_>, OwnershipError> {
        let conduit = self.conduit_settings(id)?;
        Ok(ConduitRef {
            id,
            conduit,
            installation: self,
        })
    }

    /// # Errors
    ///
    /// Returns an [`OwnershipError`] if the bundle does not exist.
    pub fn bundle(&self, id: BundleId) -> Result<BundleRef<'_>, OwnershipError> {
        let bundle = self.bundle_settings(id)?;
        Ok(BundleRef {
            id,
            bundle,
            installation: self,
        })
    }

    /// Stores a detached copy of `item` in a container.
    ///
    /// # Errors
    ///
    /// - [`OwnershipError`] if the container does not exist.
    /// - [`ParameterError::NoListedArea`] if the item goes in a conduit but
    ///   has no listed insulated area.
    pub fn add<T>(&mut self, owner: impl Into<Owner>, item: &T) -> Result<MemberId, WiringError>
    where
        T: Conduitable + Into<AnyConduitable>,
    {
        let owner = owner.into();
        let item: AnyConduitable = item.copy().into();
        self.check_owner(owner)?;
        check_housable(owner, &item)?;

        self.members.push(Some(Member { owner, item }));
        let id = MemberId(self.members.len() - 1);
        tracing::debug!(?id, ?owner, "member added");

        self.refresh(owner);
        Ok(id)
    }

    /// Moves a member to another container in one step.
    ///
    /// # Errors
    ///
    /// Fails without changing anything if the member or target does not
    /// exist, or if the member cannot be housed by the target.
    pub fn transfer(&mut self, id: MemberId, to: impl Into<Owner>) -> Result<(), WiringError> {
        let to = to.into();
        self.check_owner(to)?;
        let member = self.slot(id)?;
        check_housable(to, &member.item)?;

        let from = member.owner;
        self.slot_mut(id)?.owner = to;
        tracing::debug!(?id, ?from, ?to, "member transferred");

        self.refresh(from);
        self.refresh(to);
        Ok(())
    }

    /// Removes a member, returning it detached.
    ///
    /// # Errors
    ///
    /// Returns an [`OwnershipError`] if the member does not exist.
    pub fn remove(&mut self, id: MemberId) -> Result<AnyConduitable, OwnershipError> {
        let Member { owner, mut item } = self
            .members
            .get_mut(id.0)
            .and_then(Option::take)
            .ok_or(OwnershipError::UnknownMember(id))?;
        item.detach();
        tracing::debug!(?id, ?owner, "member removed");

        self.refresh(owner);
        Ok(item)
    }

    /// Edits a member in place.
    ///
    /// Only the member's own properties can change; values propagated from
    /// the container are rewritten afterwards.
    /// If the edited member can no longer be housed by its container the
    /// edit is rolled back.
    ///
    /// # Errors
    ///
    /// Returns an [`OwnershipError`] if the member does not exist, or a
    /// [`ParameterError`] if the edit was rolled back.
    pub fn edit<R>(
        &mut self,
        id: MemberId,
        f: impl FnOnce(&mut AnyConduitable) -> R,
    ) -> Result<R, WiringError> {
        let member = self.slot_mut(id)?;
        let backup = member.item.clone();
        let result = f(&mut member.item);

        let owner = member.owner;
        if let Err(error) = check_housable(owner, &member.item) {
            member.item = backup;
            return Err(error.into());
        }

        self.refresh(owner);
        Ok(result)
    }

    /// # Errors
    ///
    /// Returns an [`OwnershipError`] if the member does not exist.
    pub fn member(&self, id: MemberId) -> Result<&AnyConduitable, OwnershipError> {
        self.slot(id).map(|member| &member.item)
    }

    /// # Errors
    ///
    /// Returns an [`OwnershipError`] if the member does not exist.
    pub fn owner_of(&self, id: MemberId) -> Result<Owner, OwnershipError> {
        self.slot(id).map(|member| member.owner)
    }

    /// Whether `owner` currently holds the member.
    #[must_use]
    pub fn contains(&self, owner: impl Into<Owner>, id: MemberId) -> bool {
        self.owner_of(id).is_ok_and(|actual| actual == owner.into())
    }

    /// Members of a container, in the order they were added.
    pub fn members_of(
        &self,
        owner: impl Into<Owner>,
    ) -> impl Iterator<Item = (MemberId, &AnyConduitable)> {
        let owner = owner.into();
        self.members
            .iter()
            .enumerate()
            .filter_map(move |(i, slot)| match slot {
                Some(member) if member.owner == owner => Some((MemberId(i), &member.item)),
                _ => None,
            })
    }

    /// Sets a container's ambient temperature and propagates it.
    ///
    /// # Errors
    ///
    /// Fails if the container does not exist or the temperature is out of range.
    pub fn set_ambient_temperature(
        &mut self,
        owner: impl Into<Owner>,
        ambient: ThermodynamicTemperature,
    ) -> Result<(), WiringError> {
        let owner = owner.into();
        match owner {
            Owner::Conduit(id) => self.conduit_mut(id)?.set_ambient_temperature(ambient)?,
            Owner::Bundle(id) => self.bundle_mut(id)?.set_ambient_temperature(ambient)?,
        }
        self.refresh(owner);
        Ok(())
    }

    /// Places a container `distance` above a rooftop and propagates it.
    ///
    /// # Errors
    ///
    /// Fails if the container does not exist or the distance is negative.
    pub fn set_rooftop_distance(
        &mut self,
        owner: impl Into<Owner>,
        distance: Length,
    ) -> Result<(), WiringError> {
        let owner = owner.into();
        match owner {
            Owner::Conduit(id) => self.conduit_mut(id)?.set_rooftop_distance(distance)?,
            Owner::Bundle(id) => self.bundle_mut(id)?.set_rooftop_distance(distance)?,
        }
        self.refresh(owner);
        Ok(())
    }

    /// Removes a container's rooftop condition and propagates it.
    ///
    /// # Errors
    ///
    /// Returns an [`OwnershipError`] if the container does not exist.
    pub fn reset_rooftop(&mut self, owner: impl Into<Owner>) -> Result<(), OwnershipError> {
        let owner = owner.into();
        match owner {
            Owner::Conduit(id) => self.conduit_mut(id)?.reset_rooftop(),
            Owner::Bundle(id) => self.bundle_mut(id)?.reset_rooftop(),
        }
        self.refresh(owner);
        Ok(())
    }

    /// # Errors
    ///
    /// Fails if the bundle does not exist or the length is not strictly positive.
    pub fn set_bundling_length(&mut self, id: BundleId, length: Length) -> Result<(), WiringError> {
        self.bundle_mut(id)?.set_length(length)?;
        self.refresh(Owner::Bundle(id));
        Ok(())
    }

    /// # Errors
    ///
    /// Returns an [`OwnershipError`] if the conduit does not exist.
    pub fn set_nipple(&mut self, id: ConduitId, nipple: bool) -> Result<(), OwnershipError> {
        self.conduit_mut(id)?.set_nipple(nipple);
        self.refresh(Owner::Conduit(id));
        Ok(())
    }

    /// # Errors
    ///
    /// Returns an [`OwnershipError`] if the conduit does not exist.
    pub fn set_conduit_type(
        &mut self,
        id: ConduitId,
        conduit_type: ConduitType,
    ) -> Result<(), OwnershipError> {
        self.conduit_mut(id)?.set_conduit_type(conduit_type);
        Ok(())
    }

    /// # Errors
    ///
    /// Returns an [`OwnershipError`] if the conduit does not exist.
    pub fn set_minimum_trade_size(
        &mut self,
        id: ConduitId,
        trade_size: TradeSize,
    ) -> Result<(), OwnershipError> {
        self.conduit_mut(id)?.set_minimum_trade_size(trade_size);
        Ok(())
    }

    fn owners(&self) -> Vec<Owner> {
        let conduits = self
            .conduits
            .iter()
            .enumerate()
            .filter(|(_, slot)| slot.is_some())
            .map(|(i, _)| Owner::Conduit(ConduitId(i)));
        let bundles = self
            .bundles
            .iter()
            .enumerate()
            .filter(|(_, slot)| slot.is_some())
            .map(|(i, _)| Owner::Bundle(BundleId(i)));
        conduits.chain(bundles).collect()
    }

    fn check_owner(&self, owner: Owner) -> Result<(), OwnershipError> {
        match owner {
            Owner::Conduit(id) => self.conduit_settings(id).map(|_| ()),
            Owner::Bundle(id) => self.bundle_settings(id).map(|_| ()),
        }
    }

    fn conduit_settings(&self, id: ConduitId) -> Result<&Conduit, OwnershipError> {
        self.conduits
            .get(id.0)
            .and_then(Option::as_ref)
            .ok_or(OwnershipError::UnknownConduit(id))
    }

    fn bundle_settings(&self, id: BundleId) -> Result<&Bundle, OwnershipError> {
        self.bundles
            .get(id.0)
            .and_then(Option::as_ref)
            .ok_or(OwnershipError::UnknownBundle(id))
    }

    fn conduit_mut(&mut self, id: ConduitId) -> Result<&mut Conduit, OwnershipError> {
        self.conduits
            .get_mut(id.0)
            .and_then(Option::as_mut)
            .ok_or(OwnershipError::UnknownConduit(id))
    }

    fn bundle_mut(&mut self, id: BundleId) -> Result<&mut Bundle, OwnershipError> {
        self.bundles
            .get_mut(id.0)
            .and_then(Option::as_mut)
            .ok_or(OwnershipError::UnknownBundle(id))
    }

    fn slot(&self, id: MemberId) -> Result<&Member, OwnershipError> {
        self.members
            .get(id.0)
            .and_then(Option::as_ref)
            .ok_or(OwnershipError::UnknownMember(id))
    }

    fn slot_mut(&mut self, id: MemberId) -> Result<&mut Member, OwnershipError> {
        self.members
            .get_mut(id.0)
            .and_then(Option::as_mut)
            .ok_or(OwnershipError::UnknownMember(id))
    }

    /// Takes every member of a removed container out of the arena.
    fn evict(&mut self, owner: Owner) -> Vec<AnyConduitable> {
        self.members
            .iter_mut()
            .filter(|slot| slot.as_ref().is_some_and(|member| member.owner == owner))
            .filter_map(Option::take)
            .map(|Member { mut item, .. }| {
                item.detach();
                item
            })
            .collect()
    }

    fn current_carrying_count(&self, owner: Owner) -> usize {
        self.members_of(owner)
            .map(|(_, item)| item.current_carrying_count())
            .sum()
    }

    fn cable_exception(&self, id: BundleId) -> Option<CableException> {
        let owner = Owner::Bundle(id);
        let cables = self
            .members_of(owner)
            .filter_map(|(_, item)| item.as_cable())
            .map(Cable::bundled);
        cable_exception(cables, self.current_carrying_count(owner), self.edition)
    }

    /// Context the container writes into its members.
    fn placement(&self, owner: Owner) -> Option<Placement> {
        let current_carrying = self.current_carrying_count(owner);
        match owner {
            Owner::Conduit(id) => {
                let conduit = self.conduit_settings(id).ok()?;
                Some(Placement {
                    ambient: conduit.ambient_temperature(),
                    rooftop: conduit.rooftop_distance(),
                    edition: self.edition,
                    housing: Housing::Conduit {
                        current_carrying,
                        nipple: conduit.is_nipple(),
                    },
                })
            }
            Owner::Bundle(id) => {
                let bundle = self.bundle_settings(id).ok()?;
                Some(Placement {
                    ambient: bundle.ambient_temperature(),
                    rooftop: bundle.rooftop_distance(),
                    edition: self.edition,
                    housing: Housing::Bundle {
                        current_carrying,
                        length: bundle.length(),
                        cable_exception: self.cable_exception(id),
                    },
                })
            }
        }
    }

    /// Writes the container's current context into all of its members.
    fn refresh(&mut self, owner: Owner) {
        let Some(placement) = self.placement(owner) else {
            return;
        };
        self.members
            .iter_mut()
            .flatten()
            .filter(|member| member.owner == owner)
            .for_each(|member| member.item.place(placement));
    }
}

/// Items without a listed insulated area cannot be sized into a conduit.
fn check_housable(owner: Owner, item: &AnyConduitable) -> Result<(), ParameterError> {
    if matches!(owner, Owner::Conduit(_)) && item.insulated_area().is_none() {
        return Err(ParameterError::NoListedArea {
            size: item.size(),
            insulation: item.insulation(),
        });
    }
    Ok(())
}

/// Read-only view of a conduit and its members.
#[derive(Debug, Clone, Copy)]
pub struct ConduitRef<'a> {
    id: ConduitId,
    conduit: &'a Conduit,
    installation: &'a Installation,
}

impl<'a> ConduitRef<'a> {
    #[must_use]
    pub fn id(&self) -> ConduitId {
        self.id
    }

    #[must_use]
    pub fn settings(&self) -> &'a Conduit {
        self.conduit
    }

    pub fn members(&self) -> impl Iterator<Item = (MemberId, &'a AnyConduitable)> + use<'a> {
        self.installation.members_of(self.id)
    }

    #[must_use]
    pub fn member_count(&self) -> usize {
        self.members().count()
    }

    /// Current-carrying conductors in the conduit, including those inside cables.
    #[must_use]
    pub fn current_carrying_count(&self) -> usize {
        self.installation
            .current_carrying_count(Owner::Conduit(self.id))
    }

    /// Total area of the members.
    #[must_use]
    pub fn conduitables_area(&self) -> Area {
        self.members()
            .filter_map(|(_, item)| item.insulated_area())
            .fold(Area::new::<square_inch>(0.0), |total, area| total + area)
    }

    /// Allowable fill from Chapter 9, Table 1.
    ///
    /// One member may fill 53 %, two 31 %, three or more 40 %.
    /// A nipple may fill 60 % regardless of count.
    #[must_use]
    pub fn fill_percentage(&self) -> Ratio {
        let percentage = if self.conduit.is_nipple() {
            60.0
        } else {
            match self.member_count() {
                0 | 1 => 53.0,
                2 => 31.0,
                _ => 40.0,
            }
        };
        Ratio::new::<percent>(percentage)
    }

    /// Smallest trade size, at or above the conduit's minimum, that holds
    /// the members at the allowable fill.
    ///
    /// # Errors
    ///
    /// - [`ParameterError::TradeSizeNotOffered`] if the conduit type is not
    ///   made in the minimum trade size.
    /// - [`ParameterError::NoTradeSize`] if no trade size is large enough.
    pub fn trade_size(&self) -> Result<TradeSize, ParameterError> {
        let conduit_type = self.conduit.conduit_type();
        let minimum = self.conduit.minimum_trade_size();
        if !conduit_type.offers(minimum) {
            return Err(ParameterError::TradeSizeNotOffered {
                conduit_type,
                trade_size: minimum,
            });
        }

        let area = self.conduitables_area();
        let fill = self.fill_percentage().get::<ratio>();
        conduit_type
            .smallest_fitting(area, fill, minimum)
            .ok_or(ParameterError::NoTradeSize {
                conduit_type,
                square_inches: area.get::<square_inch>(),
            })
    }
}

/// Read-only view of a bundle and its members.
#[derive(Debug, Clone, Copy)]
pub struct BundleRef<'a> {
    id: BundleId,
    bundle: &'a Bundle,
    installation: &'a Installation,
}

impl<'a> BundleRef<'a> {
    #[must_use]
    pub fn id(&self) -> BundleId {
        self.id
    }

    #[must_use]
    pub fn settings(&self) -> &'a Bundle {
        self.bundle
    }

    pub fn members(&self) -> impl Iterator<Item = (MemberId, &'a AnyConduitable)> + use<'a> {
        self.installation.members_of(self.id)
    }

    /// Current-carrying conductors in the bundle, including those inside cables.
    #[must_use]
    pub fn current_carrying_count(&self) -> usize {
        self.installation.current_carrying_count(Owner::Bundle(self.id))
    }

    /// The AC/MC cable exception the bundle's cables qualify for, if any.
    #[must_use]
    pub fn cable_exception(&self) -> Option<CableException> {
        self.installation.cable_exception(self.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use uom::si::{
        electric_current::ampere,
        length::{foot, inch},
        thermodynamic_temperature::degree_fahrenheit,
    };

    use crate::support::{
        nec::{Insulation, Size},
        wiring::{CableType, Conductor, Role, VoltageSystem},
    };

    fn deg_f(value: f64) -> ThermodynamicTemperature {
        ThermodynamicTemperature::new::<degree_fahrenheit>(value)
    }

    fn amps(item: &AnyConduitable) -> f64 {
        item.corrected_and_adjusted_ampacity()
            .map_or(0.0, |a| a.get::<ampere>())
    }

    #[test]
    fn ampacity_in_a_shared_conduit() {
        let mut install = Installation::default();
        let conduit = install.add_conduit(Conduit::default().with_ambient(deg_f(100.0)).unwrap());
        let thhn = Conductor::default().with_insulation(Insulation::Thhn);

        let ids: Vec<MemberId> = (0..4).map(|_| install.add(conduit, &thhn).unwrap()).collect();

        assert_eq!(install.conduit(conduit).unwrap().current_carrying_count(), 4);
        for id in ids {
            let member = install.member(id).unwrap();
            assert!(member.is_attached());
            assert_relative_eq!(amps(member), 30.0 * 0.91 * 0.8);
        }
    }

    #[test]
    fn add_stores_a_copy() {
        let mut install = Installation::default();
        let conduit = install.add_conduit(Conduit::default());
        let mut original = Conductor::default();
        let id = install.add(conduit, &original).unwrap();

        original.set_size(Size::Awg2);
        original.set_ambient_temperature(deg_f(120.0)).unwrap();

        let stored = install.member(id).unwrap();
        assert_eq!(stored.size(), Size::Awg12);
        assert_relative_eq!(
            stored.ambient_temperature().get::<degree_fahrenheit>(),
            86.0,
            epsilon = 1e-9
        );
        assert!(!original.is_attached());
    }

    #[test]
    fn transfer_is_exclusive() {
        let mut install = Installation::default();
        let a = install.add_conduit(Conduit::default());
        let b = install.add_bundle(Bundle::default());
        let id = install.add(a, &Conductor::default()).unwrap();

        assert!(install.contains(a, id));
        install.transfer(id, b).unwrap();
        assert!(!install.contains(a, id));
        assert!(install.contains(b, id));
        assert_eq!(install.conduit(a).unwrap().member_count(), 0);
        assert_eq!(install.bundle(b).unwrap().current_carrying_count(), 1);
        assert!(matches!(
            install.member(id).unwrap().housing(),
            Housing::Bundle { .. }
        ));
    }

    #[test]
    fn failed_transfer_changes_nothing() {
        let mut install = Installation::default();
        let bundle = install.add_bundle(Bundle::default());
        let conduit = install.add_conduit(Conduit::default());
        let thhn_1250 = Conductor::default()
            .with_insulation(Insulation::Thhn)
            .with_size(Size::Kcmil1250);
        let id = install.add(bundle, &thhn_1250).unwrap();

        assert!(matches!(
            install.transfer(id, conduit),
            Err(WiringError::Parameter(ParameterError::NoListedArea { .. }))
        ));
        assert!(install.contains(bundle, id));
        assert!(install.add(conduit, &thhn_1250).is_err());
    }

    #[test]
    fn removed_members_are_detached() {
        let mut install = Installation::default();
        let conduit = install.add_conduit(Conduit::default());
        let id = install.add(conduit, &Conductor::default()).unwrap();
        let other = install.add(conduit, &Conductor::default()).unwrap();

        let removed = install.remove(id).unwrap();
        assert!(!removed.is_attached());
        assert!(install.member(id).is_err());
        assert_eq!(install.conduit(conduit).unwrap().current_carrying_count(), 1);
        assert!(install.contains(conduit, other));
    }

    #[test]
    fn container_settings_propagate() {
        let mut install = Installation::new(Edition::Nec2014);
        let conduit = install.add_conduit(Conduit::default());
        let id = install.add(conduit, &Conductor::default()).unwrap();

        install.set_ambient_temperature(conduit, deg_f(104.0)).unwrap();
        install
            .set_rooftop_distance(conduit, Length::new::<inch>(2.0))
            .unwrap();

        let member = install.member(id).unwrap();
        assert_eq!(member.edition(), Edition::Nec2014);
        // 104 °F + 40 °F adder = 144 °F: 0.47 in the 75 °C column.
        assert_eq!(member.correction_factor(), 0.47);

        install.set_edition(Edition::Nec2017);
        install.reset_rooftop(conduit).unwrap();
        let member = install.member(id).unwrap();
        assert_eq!(member.edition(), Edition::Nec2017);
        assert_eq!(member.rooftop_distance(), None);
        assert_eq!(member.correction_factor(), 0.88);

        assert!(install.set_ambient_temperature(conduit, deg_f(200.0)).is_err());
    }

    #[test]
    fn attached_members_reject_context_setters() {
        let mut install = Installation::default();
        let conduit = install.add_conduit(Conduit::default());
        let id = install.add(conduit, &Conductor::default()).unwrap();

        let result = install
            .edit(id, |item| {
                item.as_conductor_mut()
                    .map(|c| c.set_ambient_temperature(deg_f(100.0)))
            })
            .unwrap();
        assert!(matches!(
            result,
            Some(Err(WiringError::Ownership(OwnershipError::Attached { .. })))
        ));

        let result = install
            .edit(id, |item| item.as_conductor_mut().map(|c| c.set_edition(Edition::Nec2014)))
            .unwrap();
        assert!(matches!(result, Some(Err(OwnershipError::Attached { .. }))));
    }

    #[test]
    fn edit_rolls_back_unhousable_items() {
        let mut install = Installation::default();
        let conduit = install.add_conduit(Conduit::default());
        let thhn = Conductor::default().with_insulation(Insulation::Thhn);
        let id = install.add(conduit, &thhn).unwrap();

        assert!(install.edit(id, |item| item.set_size(Size::Kcmil1500)).is_err());
        assert_eq!(install.member(id).unwrap().size(), Size::Awg12);

        install.edit(id, |item| item.set_size(Size::Awg8)).unwrap();
        assert_eq!(install.member(id).unwrap().size(), Size::Awg8);
    }

    #[test]
    fn edits_update_the_count_of_every_member() {
        let mut install = Installation::default();
        let conduit = install.add_conduit(Conduit::default());
        let ids: Vec<MemberId> = (0..4)
            .map(|_| install.add(conduit, &Conductor::default()).unwrap())
            .collect();
        assert_eq!(install.member(ids[0]).unwrap().adjustment_factor(), 0.8);

        install
            .edit(ids[3], |item| {
                if let Some(c) = item.as_conductor_mut() {
                    c.set_role(Role::Ground);
                }
            })
            .unwrap();
        assert_eq!(install.member(ids[0]).unwrap().adjustment_factor(), 1.0);
    }

    #[test]
    fn removing_a_container_detaches_its_members() {
        let mut install = Installation::default();
        let bundle = install.add_bundle(Bundle::default());
        let id = install.add(bundle, &Conductor::default()).unwrap();

        let members = install.remove_bundle(bundle).unwrap();
        assert_eq!(members.len(), 1);
        assert!(!members[0].is_attached());
        assert!(install.member(id).is_err());
        assert!(install.bundle(bundle).is_err());
        assert!(install.add(bundle, &Conductor::default()).is_err());
    }

    #[test]
    fn cable_exception_is_scoped_to_cables() {
        let mut install = Installation::default();
        let bundle = install.add_bundle(
            Bundle::default()
                .with_length(Length::new::<foot>(3.0))
                .unwrap(),
        );

        let conductor_ids: Vec<MemberId> = (0..3)
            .map(|_| install.add(bundle, &Conductor::default()).unwrap())
            .collect();
        let ac = Cable::new(CableType::Ac, VoltageSystem::OnePhase120);
        let cable_ids: Vec<MemberId> = (0..3).map(|_| install.add(bundle, &ac).unwrap()).collect();

        let view = install.bundle(bundle).unwrap();
        assert_eq!(view.current_carrying_count(), 9);
        assert_eq!(view.cable_exception(), Some(CableException::Exempt));
        for &id in &conductor_ids {
            assert_eq!(install.member(id).unwrap().adjustment_factor(), 0.7);
        }
        for &id in &cable_ids {
            assert_eq!(install.member(id).unwrap().adjustment_factor(), 1.0);
        }

        install
            .edit(cable_ids[1], |item| {
                if let Some(cable) = item.as_cable_mut() {
                    cable.set_jacketed(true);
                }
            })
            .unwrap();

        assert_eq!(install.bundle(bundle).unwrap().cable_exception(), None);
        for &id in &cable_ids {
            assert_eq!(install.member(id).unwrap().adjustment_factor(), 0.7);
        }
    }

    #[test]
    fn short_bundle_is_free_air() {
        let mut install = Installation::default();
        let bundle = install.add_bundle(Bundle::default());
        let ids: Vec<MemberId> = (0..12)
            .map(|_| install.add(bundle, &Conductor::default()).unwrap())
            .collect();
        assert_eq!(install.member(ids[0]).unwrap().adjustment_factor(), 1.0);

        install
            .set_bundling_length(bundle, Length::new::<inch>(25.0))
            .unwrap();
        assert_eq!(install.member(ids[0]).unwrap().adjustment_factor(), 0.5);
        assert!(
            install
                .set_bundling_length(bundle, Length::new::<inch>(0.0))
                .is_err()
        );
    }

    #[test]
    fn trade_size_and_fill() {
        let mut install = Installation::default();
        let conduit = install.add_conduit(Conduit::default());
        let phase = Conductor::default().with_size(Size::Awg1);
        let ground = Conductor::default()
            .with_size(Size::Awg6)
            .with_role(Role::Ground);

        let first = install.add(conduit, &phase).unwrap();
        assert_relative_eq!(
            install.conduit(conduit).unwrap().fill_percentage().get::<percent>(),
            53.0
        );
        install.add(conduit, &phase).unwrap();
        assert_relative_eq!(
            install.conduit(conduit).unwrap().fill_percentage().get::<percent>(),
            31.0
        );
        install.add(conduit, &phase).unwrap();
        install.add(conduit, &ground).unwrap();

        let view = install.conduit(conduit).unwrap();
        assert_relative_eq!(
            view.conduitables_area().get::<square_inch>(),
            0.6429,
            epsilon = 1e-9
        );
        assert_eq!(view.trade_size(), Ok(TradeSize::OneAndOneHalf));

        install.set_nipple(conduit, true).unwrap();
        assert_eq!(
            install.conduit(conduit).unwrap().trade_size(),
            Ok(TradeSize::OneAndOneQuarter)
        );
        assert_eq!(install.member(first).unwrap().adjustment_factor(), 1.0);
    }

    #[test]
    fn trade_size_errors() {
        let mut install = Installation::default();
        let conduit = install.add_conduit(
            Conduit::new(ConduitType::Emt).with_minimum_trade_size(TradeSize::ThreeEighths),
        );
        assert!(matches!(
            install.conduit(conduit).unwrap().trade_size(),
            Err(ParameterError::TradeSizeNotOffered { .. })
        ));

        install.set_conduit_type(conduit, ConduitType::Ent).unwrap();
        install
            .set_minimum_trade_size(conduit, TradeSize::Half)
            .unwrap();
        let big = Conductor::default().with_size(Size::Kcmil500);
        for _ in 0..6 {
            install.add(conduit, &big).unwrap();
        }
        assert!(matches!(
            install.conduit(conduit).unwrap().trade_size(),
            Err(ParameterError::NoTradeSize { .. })
        ));
    }
}
