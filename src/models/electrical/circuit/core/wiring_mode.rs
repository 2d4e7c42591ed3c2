use crate::support::wiring::{Bundle, BundleId, Conduit, ConduitId};

/// How the conductors of a circuit are installed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WiringMode {
    /// In `count` conduits of their own, built from `conduit`, with the sets
    /// split evenly among them.
    PrivateConduit { conduit: Conduit, count: usize },

    /// In a conduit shared with other circuits. Only one set is allowed.
    SharedConduit(ConduitId),

    /// Bundled together, away from other circuits.
    PrivateBundle(Bundle),

    /// In a bundle shared with other circuits.
    SharedBundle(BundleId),

    /// Not in any raceway or bundle.
    FreeAir,
}

impl Default for WiringMode {
    fn default() -> Self {
        WiringMode::PrivateConduit {
            conduit: Conduit::default(),
            count: 1,
        }
    }
}

impl WiringMode {
    #[must_use]
    pub fn is_conduit(&self) -> bool {
        matches!(
            self,
            WiringMode::PrivateConduit { .. } | WiringMode::SharedConduit(_)
        )
    }

    #[must_use]
    pub fn is_bundle(&self) -> bool {
        matches!(
            self,
            WiringMode::PrivateBundle(_) | WiringMode::SharedBundle(_)
        )
    }
}
