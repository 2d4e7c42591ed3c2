use std::fmt;

use uom::si::{area::square_inch, f64::Area};

use super::Size;

/// Temperature rating of a conductor's insulation (column of Table 310.15(B)(16)).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TempRating {
    T60,
    T75,
    T90,
}

impl TempRating {
    /// Rating in degrees Celsius.
    #[must_use]
    pub fn celsius(self) -> u8 {
        match self {
            TempRating::T60 => 60,
            TempRating::T75 => 75,
            TempRating::T90 => 90,
        }
    }
}

impl fmt::Display for TempRating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} °C", self.celsius())
    }
}

/// Conductor insulation types with dimensions listed in Chapter 9, Table 5.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Insulation {
    Tw,
    #[default]
    Thw,
    Thwn,
    Thhw,
    Xhhw,
    Rhw,
    Thw2,
    Thwn2,
    Thhn,
    Xhh,
    Xhhw2,
    Rhh,
    Rhw2,
}

impl Insulation {
    /// Every insulation type.
    pub const ALL: [Insulation; 13] = [
        Insulation::Tw,
        Insulation::Thw,
        Insulation::Thwn,
        Insulation::Thhw,
        Insulation::Xhhw,
        Insulation::Rhw,
        Insulation::Thw2,
        Insulation::Thwn2,
        Insulation::Thhn,
        Insulation::Xhh,
        Insulation::Xhhw2,
        Insulation::Rhh,
        Insulation::Rhw2,
    ];

    /// Temperature rating of the insulation in a wet or dry location,
    /// whichever Table 310.104(A) lists as the general rating.
    #[must_use]
    pub fn temp_rating(self) -> TempRating {
        match self {
            Insulation::Tw => TempRating::T60,
            Insulation::Thw
            | Insulation::Thwn
            | Insulation::Thhw
            | Insulation::Xhhw
            | Insulation::Rhw => TempRating::T75,
            Insulation::Thw2
            | Insulation::Thwn2
            | Insulation::Thhn
            | Insulation::Xhh
            | Insulation::Xhhw2
            | Insulation::Rhh
            | Insulation::Rhw2 => TempRating::T90,
        }
    }

    /// Approximate area of one insulated conductor (Chapter 9, Table 5).
    ///
    /// Returns `None` when Table 5 does not list the size for this insulation,
    /// such as THHN above 1000 kcmil.
    #[must_use]
    pub fn insulated_area(self, size: Size) -> Option<Area> {
        let column = match self {
            Insulation::Thhn | Insulation::Thwn | Insulation::Thwn2 => &THHN,
            Insulation::Thw
            | Insulation::Thhw
            | Insulation::Thw2
            | Insulation::Rhh
            | Insulation::Rhw
            | Insulation::Rhw2 => &THW,
            Insulation::Xhhw | Insulation::Xhhw2 | Insulation::Xhh => &XHHW,
            Insulation::Tw => {
                return TW_SMALL
                    .get(size.index())
                    .or_else(|| THW.get(size.index()).and_then(Option::as_ref))
                    .map(|&area| Area::new::<square_inch>(area));
            }
        };
        column[size.index()].map(Area::new::<square_inch>)
    }
}

impl fmt::Display for Insulation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Insulation::Tw => "TW",
            Insulation::Thw => "THW",
            Insulation::Thwn => "THWN",
            Insulation::Thhw => "THHW",
            Insulation::Xhhw => "XHHW",
            Insulation::Rhw => "RHW",
            Insulation::Thw2 => "THW-2",
            Insulation::Thwn2 => "THWN-2",
            Insulation::Thhn => "THHN",
            Insulation::Xhh => "XHH",
            Insulation::Xhhw2 => "XHHW-2",
            Insulation::Rhh => "RHH",
            Insulation::Rhw2 => "RHW-2",
        })
    }
}

// Areas in square inches, indexed by `Size::index`.

const THHN: [Option<f64>; 28] = [
    Some(0.0097),
    Some(0.0133),
    Some(0.0211),
    Some(0.0366),
    Some(0.0507),
    Some(0.0824),
    Some(0.0973),
    Some(0.1158),
    Some(0.1562),
    Some(0.1855),
    Some(0.2223),
    Some(0.2679),
    Some(0.3237),
    Some(0.3970),
    Some(0.4608),
    Some(0.5242),
    Some(0.5863),
    Some(0.7073),
    Some(0.8676),
    Some(0.9887),
    Some(1.0496),
    Some(1.1085),
    Some(1.2311),
    Some(1.3478),
    None,
    None,
    None,
    None,
];

const THW: [Option<f64>; 28] = [
    Some(0.0209),
    Some(0.0260),
    Some(0.0333),
    Some(0.0556),
    Some(0.0726),
    Some(0.0973),
    Some(0.1134),
    Some(0.1333),
    Some(0.1901),
    Some(0.2223),
    Some(0.2624),
    Some(0.3117),
    Some(0.3718),
    Some(0.4596),
    Some(0.5281),
    Some(0.5958),
    Some(0.6619),
    Some(0.7901),
    Some(0.9729),
    Some(1.1010),
    Some(1.1652),
    Some(1.2272),
    Some(1.3561),
    Some(1.4784),
    Some(1.8602),
    Some(2.1695),
    Some(2.4773),
    Some(2.7818),
];

/// TW differs from THW only for 14 through 8 AWG.
const TW_SMALL: [f64; 4] = [0.0139, 0.0181, 0.0243, 0.0437];

const XHHW: [Option<f64>; 28] = [
    Some(0.0139),
    Some(0.0181),
    Some(0.0243),
    Some(0.0437),
    Some(0.0590),
    Some(0.0814),
    Some(0.0962),
    Some(0.1146),
    Some(0.1534),
    Some(0.1825),
    Some(0.2190),
    Some(0.2642),
    Some(0.3197),
    Some(0.3904),
    Some(0.4536),
    Some(0.5166),
    Some(0.5782),
    Some(0.6984),
    Some(0.8709),
    Some(0.9923),
    Some(1.0532),
    Some(1.1122),
    Some(1.2351),
    Some(1.3519),
    Some(1.7180),
    Some(2.0157),
    Some(2.3127),
    Some(2.6073),
];
