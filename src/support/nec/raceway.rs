use std::fmt;

use uom::si::{area::square_inch, f64::Area};

use super::OuterMaterial;

/// Raceway types listed in Chapter 9, Table 4.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ConduitType {
    /// Electrical metallic tubing.
    Emt,
    /// Electrical nonmetallic tubing.
    Ent,
    /// Flexible metal conduit.
    Fmc,
    /// Intermediate metal conduit.
    Imc,
    /// Liquidtight flexible nonmetallic conduit, type A.
    LfncA,
    /// Liquidtight flexible nonmetallic conduit, type B.
    LfncB,
    /// Liquidtight flexible metal conduit.
    Lfmc,
    /// Rigid metal conduit.
    Rmc,
    Pvc80,
    #[default]
    Pvc40,
    PvcA,
    PvcEb,
    /// High density polyethylene conduit.
    Hdpe,
}

/// Standard trade sizes, 3/8 in through 6 in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TradeSize {
    ThreeEighths,
    #[default]
    Half,
    ThreeQuarters,
    One,
    OneAndOneQuarter,
    OneAndOneHalf,
    Two,
    TwoAndOneHalf,
    Three,
    ThreeAndOneHalf,
    Four,
    Five,
    Six,
}

impl TradeSize {
    /// Every trade size, smallest first.
    pub const ALL: [TradeSize; 13] = [
        TradeSize::ThreeEighths,
        TradeSize::Half,
        TradeSize::ThreeQuarters,
        TradeSize::One,
        TradeSize::OneAndOneQuarter,
        TradeSize::OneAndOneHalf,
        TradeSize::Two,
        TradeSize::TwoAndOneHalf,
        TradeSize::Three,
        TradeSize::ThreeAndOneHalf,
        TradeSize::Four,
        TradeSize::Five,
        TradeSize::Six,
    ];

    fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for TradeSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            TradeSize::ThreeEighths => "3/8 in",
            TradeSize::Half => "1/2 in",
            TradeSize::ThreeQuarters => "3/4 in",
            TradeSize::One => "1 in",
            TradeSize::OneAndOneQuarter => "1-1/4 in",
            TradeSize::OneAndOneHalf => "1-1/2 in",
            TradeSize::Two => "2 in",
            TradeSize::TwoAndOneHalf => "2-1/2 in",
            TradeSize::Three => "3 in",
            TradeSize::ThreeAndOneHalf => "3-1/2 in",
            TradeSize::Four => "4 in",
            TradeSize::Five => "5 in",
            TradeSize::Six => "6 in",
        })
    }
}

impl ConduitType {
    /// Total internal area of a trade size (100 % column of Table 4).
    ///
    /// Returns `None` when the type is not made in that trade size.
    #[must_use]
    pub fn area(self, trade_size: TradeSize) -> Option<Area> {
        self.areas()[trade_size.index()].map(Area::new::<square_inch>)
    }

    /// Whether the type is made in the given trade size.
    #[must_use]
    pub fn offers(self, trade_size: TradeSize) -> bool {
        self.area(trade_size).is_some()
    }

    /// Smallest trade size, at or above `minimum`, whose allowable fill
    /// holds `required` at the given fill fraction.
    ///
    /// Returns `None` when even the largest trade size is too small.
    #[must_use]
    pub fn smallest_fitting(
        self,
        required: Area,
        fill_fraction: f64,
        minimum: TradeSize,
    ) -> Option<TradeSize> {
        let required = crate::support::units::square_inches(required);
        TradeSize::ALL
            .iter()
            .copied()
            .filter(|&trade_size| trade_size >= minimum)
            .find(|&trade_size| {
                self.areas()[trade_size.index()]
                    .is_some_and(|total| total * fill_fraction >= required)
            })
    }

    /// Material class used for the Table 9 impedance columns.
    #[must_use]
    pub fn outer_material(self) -> OuterMaterial {
        match self {
            ConduitType::Emt
            | ConduitType::Imc
            | ConduitType::Rmc
            | ConduitType::Fmc
            | ConduitType::Lfmc => OuterMaterial::Steel,
            _ => OuterMaterial::Pvc,
        }
    }

    fn areas(self) -> &'static [Option<f64>; 13] {
        match self {
            ConduitType::Emt => &EMT,
            ConduitType::Ent => &ENT,
            ConduitType::Fmc => &FMC,
            ConduitType::Imc => &IMC,
            ConduitType::LfncA => &LFNC_A,
            ConduitType::LfncB => &LFNC_B,
            ConduitType::Lfmc => &LFMC,
            ConduitType::Rmc => &RMC,
            ConduitType::Pvc80 => &PVC_80,
            ConduitType::Pvc40 | ConduitType::Hdpe => &PVC_40,
            ConduitType::PvcA => &PVC_A,
            ConduitType::PvcEb => &PVC_EB,
        }
    }
}

impl fmt::Display for ConduitType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ConduitType::Emt => "EMT",
            ConduitType::Ent => "ENT",
            ConduitType::Fmc => "FMC",
            ConduitType::Imc => "IMC",
            ConduitType::LfncA => "LFNC-A",
            ConduitType::LfncB => "LFNC-B",
            ConduitType::Lfmc => "LFMC",
            ConduitType::Rmc => "RMC",
            ConduitType::Pvc80 => "PVC-80",
            ConduitType::Pvc40 => "PVC-40",
            ConduitType::PvcA => "PVC-A",
            ConduitType::PvcEb => "PVC-EB",
            ConduitType::Hdpe => "HDPE",
        })
    }
}

// Total areas in square inches, indexed by `TradeSize`.

const EMT: [Option<f64>; 13] = [
    None,
    Some(0.304),
    Some(0.533),
    Some(0.864),
    Some(1.496),
    Some(2.036),
    Some(3.356),
    Some(5.858),
    Some(8.846),
    Some(11.545),
    Some(14.753),
    None,
    None,
];

const ENT: [Option<f64>; 13] = [
    None,
    Some(0.285),
    Some(0.508),
    Some(0.832),
    Some(1.453),
    Some(1.986),
    Some(3.291),
    None,
    None,
    None,
    None,
    None,
    None,
];

const FMC: [Option<f64>; 13] = [
    Some(0.116),
    Some(0.317),
    Some(0.533),
    Some(0.817),
    Some(1.277),
    Some(1.858),
    Some(3.269),
    Some(4.909),
    Some(7.069),
    Some(9.621),
    Some(12.566),
    None,
    None,
];

const IMC: [Option<f64>; 13] = [
    None,
    Some(0.342),
    Some(0.586),
    Some(0.959),
    Some(1.647),
    Some(2.225),
    Some(3.630),
    Some(5.135),
    Some(7.922),
    Some(10.584),
    Some(13.631),
    None,
    None,
];

const LFNC_A: [Option<f64>; 13] = [
    Some(0.192),
    Some(0.312),
    Some(0.535),
    Some(0.854),
    Some(1.502),
    Some(2.018),
    Some(3.343),
    None,
    None,
    None,
    None,
    None,
    None,
];

const LFNC_B: [Option<f64>; 13] = [
    Some(0.192),
    Some(0.314),
    Some(0.541),
    Some(0.873),
    Some(1.528),
    Some(1.981),
    Some(3.246),
    None,
    None,
    None,
    None,
    None,
    None,
];

const LFMC: [Option<f64>; 13] = [
    Some(0.192),
    Some(0.314),
    Some(0.541),
    Some(0.873),
    Some(1.277),
    Some(1.858),
    Some(3.269),
    Some(4.909),
    Some(7.069),
    Some(9.621),
    Some(12.566),
    None,
    None,
];

const RMC: [Option<f64>; 13] = [
    None,
    Some(0.314),
    Some(0.549),
    Some(0.887),
    Some(1.526),
    Some(2.071),
    Some(3.408),
    Some(4.866),
    Some(7.499),
    Some(10.010),
    Some(12.882),
    Some(20.212),
    Some(29.158),
];

const PVC_80: [Option<f64>; 13] = [
    None,
    Some(0.217),
    Some(0.409),
    Some(0.688),
    Some(1.237),
    Some(1.711),
    Some(2.874),
    Some(4.119),
    Some(6.442),
    Some(8.688),
    Some(11.258),
    Some(17.855),
    Some(25.598),
];

const PVC_40: [Option<f64>; 13] = [
    None,
    Some(0.285),
    Some(0.508),
    Some(0.832),
    Some(1.453),
    Some(1.986),
    Some(3.291),
    Some(4.695),
    Some(7.268),
    Some(9.737),
    Some(12.554),
    Some(19.761),
    Some(28.567),
];

const PVC_A: [Option<f64>; 13] = [
    None,
    Some(0.385),
    Some(0.650),
    Some(1.084),
    Some(1.767),
    Some(2.324),
    Some(3.647),
    Some(5.453),
    Some(8.194),
    Some(10.694),
    Some(13.723),
    Some(21.135),
    Some(30.261),
];

const PVC_EB: [Option<f64>; 13] = [
    None,
    None,
    None,
    None,
    None,
    None,
    Some(3.874),
    None,
    Some(8.709),
    Some(11.365),
    Some(14.448),
    Some(22.195),
    Some(31.530),
];
