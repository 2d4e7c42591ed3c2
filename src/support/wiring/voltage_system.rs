use std::fmt;

use uom::si::{electric_potential::volt, f64::ElectricPotential};

/// How the neutral of a voltage system counts toward derating, 310.15(B)(5).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NeutralKind {
    /// The system has no neutral.
    None,
    /// The neutral always carries load current (two-wire line-to-neutral,
    /// or two phases and the neutral of a wye).
    AlwaysCurrentCarrying,
    /// A wye neutral, current-carrying when the load is mostly non-linear.
    PossiblyCurrentCarrying,
    /// A 120/240 V neutral that carries only the imbalance.
    NonCurrentCarrying,
}

/// Supply voltage and wiring configuration of a circuit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum VoltageSystem {
    /// 120 V, one phase and neutral.
    #[default]
    OnePhase120,
    /// 208 V, two phases.
    OnePhase208,
    /// 240 V, two phases.
    OnePhase240,
    /// 277 V, one phase and neutral.
    OnePhase277,
    /// 480 V, two phases.
    OnePhase480,
    /// 120/240 V single-phase three-wire.
    SplitPhase240,
    /// Two phases and the neutral of a 208Y/120 V system.
    TwoLegs208,
    /// 208 V three-phase three-wire.
    ThreePhase208,
    /// 240 V three-phase three-wire.
    ThreePhase240,
    /// 480 V three-phase three-wire.
    ThreePhase480,
    /// 208Y/120 V three-phase four-wire.
    Wye208,
    /// 480Y/277 V three-phase four-wire.
    Wye480,
}

impl VoltageSystem {
    /// Line voltage used for voltage-drop limits.
    #[must_use]
    pub fn voltage(self) -> ElectricPotential {
        let volts = match self {
            VoltageSystem::OnePhase120 => 120.0,
            VoltageSystem::OnePhase208
            | VoltageSystem::TwoLegs208
            | VoltageSystem::ThreePhase208
            | VoltageSystem::Wye208 => 208.0,
            VoltageSystem::OnePhase240
            | VoltageSystem::SplitPhase240
            | VoltageSystem::ThreePhase240 => 240.0,
            VoltageSystem::OnePhase277 => 277.0,
            VoltageSystem::OnePhase480 | VoltageSystem::ThreePhase480 | VoltageSystem::Wye480 => {
                480.0
            }
        };
        ElectricPotential::new::<volt>(volts)
    }

    /// Number of phases seen by the load: 1 or 3.
    #[must_use]
    pub fn phases(self) -> u8 {
        if self.is_three_phase() { 3 } else { 1 }
    }

    /// Whether the load is served by all three phases.
    #[must_use]
    pub fn is_three_phase(self) -> bool {
        matches!(
            self,
            VoltageSystem::ThreePhase208
                | VoltageSystem::ThreePhase240
                | VoltageSystem::ThreePhase480
                | VoltageSystem::Wye208
                | VoltageSystem::Wye480
        )
    }

    /// Whether this is a three-phase four-wire wye system.
    #[must_use]
    pub fn is_wye(self) -> bool {
        matches!(self, VoltageSystem::Wye208 | VoltageSystem::Wye480)
    }

    /// Number of ungrounded (hot) conductors.
    #[must_use]
    pub fn hot_count(self) -> usize {
        match self {
            VoltageSystem::OnePhase120 | VoltageSystem::OnePhase277 => 1,
            VoltageSystem::OnePhase208
            | VoltageSystem::OnePhase240
            | VoltageSystem::OnePhase480
            | VoltageSystem::SplitPhase240
            | VoltageSystem::TwoLegs208 => 2,
            VoltageSystem::ThreePhase208
            | VoltageSystem::ThreePhase240
            | VoltageSystem::ThreePhase480
            | VoltageSystem::Wye208
            | VoltageSystem::Wye480 => 3,
        }
    }

    /// How the neutral, if any, counts toward derating.
    #[must_use]
    pub fn neutral_kind(self) -> NeutralKind {
        match self {
            VoltageSystem::OnePhase120 | VoltageSystem::OnePhase277 | VoltageSystem::TwoLegs208 => {
                NeutralKind::AlwaysCurrentCarrying
            }
            VoltageSystem::SplitPhase240 => NeutralKind::NonCurrentCarrying,
            VoltageSystem::Wye208 | VoltageSystem::Wye480 => NeutralKind::PossiblyCurrentCarrying,
            VoltageSystem::OnePhase208
            | VoltageSystem::OnePhase240
            | VoltageSystem::OnePhase480
            | VoltageSystem::ThreePhase208
            | VoltageSystem::ThreePhase240
            | VoltageSystem::ThreePhase480 => NeutralKind::None,
        }
    }

    /// Whether the system has a neutral conductor.
    #[must_use]
    pub fn has_neutral(self) -> bool {
        self.neutral_kind() != NeutralKind::None
    }
}

impl fmt::Display for VoltageSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            VoltageSystem::OnePhase120 => "120 V 1φ2w",
            VoltageSystem::OnePhase208 => "208 V 1φ2w",
            VoltageSystem::OnePhase240 => "240 V 1φ2w",
            VoltageSystem::OnePhase277 => "277 V 1φ2w",
            VoltageSystem::OnePhase480 => "480 V 1φ2w",
            VoltageSystem::SplitPhase240 => "120/240 V 1φ3w",
            VoltageSystem::TwoLegs208 => "208Y/120 V 2φ3w",
            VoltageSystem::ThreePhase208 => "208 V 3φ3w",
            VoltageSystem::ThreePhase240 => "240 V 3φ3w",
            VoltageSystem::ThreePhase480 => "480 V 3φ3w",
            VoltageSystem::Wye208 => "208Y/120 V 3φ4w",
            VoltageSystem::Wye480 => "480Y/277 V 3φ4w",
        })
    }
}
