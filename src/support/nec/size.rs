use std::fmt;

/// Conductor size, from 14 AWG to 2000 kcmil.
///
/// Variants are declared from smallest to largest, so the derived ordering
/// is the physical ordering.
/// Stepping past either end of the table yields `None`, never a wrapped value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Size {
    Awg14,
    Awg12,
    Awg10,
    Awg8,
    Awg6,
    Awg4,
    Awg3,
    Awg2,
    Awg1,
    Awg1_0,
    Awg2_0,
    Awg3_0,
    Awg4_0,
    Kcmil250,
    Kcmil300,
    Kcmil350,
    Kcmil400,
    Kcmil500,
    Kcmil600,
    Kcmil700,
    Kcmil750,
    Kcmil800,
    Kcmil900,
    Kcmil1000,
    Kcmil1250,
    Kcmil1500,
    Kcmil1750,
    Kcmil2000,
}

impl Size {
    /// Every size, smallest first.
    pub const ALL: [Size; 28] = [
        Size::Awg14,
        Size::Awg12,
        Size::Awg10,
        Size::Awg8,
        Size::Awg6,
        Size::Awg4,
        Size::Awg3,
        Size::Awg2,
        Size::Awg1,
        Size::Awg1_0,
        Size::Awg2_0,
        Size::Awg3_0,
        Size::Awg4_0,
        Size::Kcmil250,
        Size::Kcmil300,
        Size::Kcmil350,
        Size::Kcmil400,
        Size::Kcmil500,
        Size::Kcmil600,
        Size::Kcmil700,
        Size::Kcmil750,
        Size::Kcmil800,
        Size::Kcmil900,
        Size::Kcmil1000,
        Size::Kcmil1250,
        Size::Kcmil1500,
        Size::Kcmil1750,
        Size::Kcmil2000,
    ];

    /// Smallest size allowed for conductors in parallel (310.10(H)).
    pub const MIN_PARALLEL: Size = Size::Awg1_0;

    /// Position of this size in [`Size::ALL`].
    #[must_use]
    pub fn index(self) -> usize {
        self as usize
    }

    /// The next larger size, or `None` for 2000 kcmil.
    #[must_use]
    pub fn next_up(self) -> Option<Size> {
        Size::ALL.get(self.index() + 1).copied()
    }

    /// The next smaller size, or `None` for 14 AWG.
    #[must_use]
    pub fn next_down(self) -> Option<Size> {
        self.index().checked_sub(1).map(|i| Size::ALL[i])
    }

    /// Iterates over this size and every larger one.
    pub fn and_larger(self) -> impl Iterator<Item = Size> {
        Size::ALL[self.index()..].iter().copied()
    }

    /// Conductor area in circular mils (Chapter 9, Table 8).
    #[must_use]
    pub fn circular_mils(self) -> f64 {
        match self {
            Size::Awg14 => 4_110.0,
            Size::Awg12 => 6_530.0,
            Size::Awg10 => 10_380.0,
            Size::Awg8 => 16_510.0,
            Size::Awg6 => 26_240.0,
            Size::Awg4 => 41_740.0,
            Size::Awg3 => 52_620.0,
            Size::Awg2 => 66_360.0,
            Size::Awg1 => 83_690.0,
            Size::Awg1_0 => 105_600.0,
            Size::Awg2_0 => 133_100.0,
            Size::Awg3_0 => 167_800.0,
            Size::Awg4_0 => 211_600.0,
            Size::Kcmil250 => 250_000.0,
            Size::Kcmil300 => 300_000.0,
            Size::Kcmil350 => 350_000.0,
            Size::Kcmil400 => 400_000.0,
            Size::Kcmil500 => 500_000.0,
            Size::Kcmil600 => 600_000.0,
            Size::Kcmil700 => 700_000.0,
            Size::Kcmil750 => 750_000.0,
            Size::Kcmil800 => 800_000.0,
            Size::Kcmil900 => 900_000.0,
            Size::Kcmil1000 => 1_000_000.0,
            Size::Kcmil1250 => 1_250_000.0,
            Size::Kcmil1500 => 1_500_000.0,
            Size::Kcmil1750 => 1_750_000.0,
            Size::Kcmil2000 => 2_000_000.0,
        }
    }

    /// Smallest size whose area is at least `circular_mils`, if any.
    #[must_use]
    pub fn with_at_least(circular_mils: f64) -> Option<Size> {
        Size::ALL
            .iter()
            .copied()
            .find(|size| size.circular_mils() >= circular_mils)
    }
}

impl fmt::Display for Size {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Size::Awg14 => "14 AWG",
            Size::Awg12 => "12 AWG",
            Size::Awg10 => "10 AWG",
            Size::Awg8 => "8 AWG",
            Size::Awg6 => "6 AWG",
            Size::Awg4 => "4 AWG",
            Size::Awg3 => "3 AWG",
            Size::Awg2 => "2 AWG",
            Size::Awg1 => "1 AWG",
            Size::Awg1_0 => "1/0 AWG",
            Size::Awg2_0 => "2/0 AWG",
            Size::Awg3_0 => "3/0 AWG",
            Size::Awg4_0 => "4/0 AWG",
            Size::Kcmil250 => "250 kcmil",
            Size::Kcmil300 => "300 kcmil",
            Size::Kcmil350 => "350 kcmil",
            Size::Kcmil400 => "400 kcmil",
            Size::Kcmil500 => "500 kcmil",
            Size::Kcmil600 => "600 kcmil",
            Size::Kcmil700 => "700 kcmil",
            Size::Kcmil750 => "750 kcmil",
            Size::Kcmil800 => "800 kcmil",
            Size::Kcmil900 => "900 kcmil",
            Size::Kcmil1000 => "1000 kcmil",
            Size::Kcmil1250 => "1250 kcmil",
            Size::Kcmil1500 => "1500 kcmil",
            Size::Kcmil1750 => "1750 kcmil",
            Size::Kcmil2000 => "2000 kcmil",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ordering_follows_physical_size() {
        assert!(Size::Awg14 < Size::Awg12);
        assert!(Size::Awg1 < Size::Awg1_0);
        assert!(Size::Awg4_0 < Size::Kcmil250);
        assert_eq!(Size::Awg10.max(Size::Awg12), Size::Awg10);
        assert!(
            Size::ALL
                .windows(2)
                .all(|pair| pair[0] < pair[1] && pair[0].circular_mils() < pair[1].circular_mils())
        );
    }

    #[test]
    fn stepping_stops_at_the_table_ends() {
        assert_eq!(Size::Awg14.next_down(), None);
        assert_eq!(Size::Awg14.next_up(), Some(Size::Awg12));
        assert_eq!(Size::Awg1.next_up(), Some(Size::Awg1_0));
        assert_eq!(Size::Kcmil2000.next_up(), None);
        assert_eq!(Size::Kcmil2000.next_down(), Some(Size::Kcmil1750));
    }

    #[test]
    fn smallest_size_with_area() {
        assert_eq!(Size::with_at_least(10_375.0), Some(Size::Awg10));
        assert_eq!(Size::with_at_least(4_110.0), Some(Size::Awg14));
        assert_eq!(Size::with_at_least(2_000_001.0), None);
    }

    #[test]
    fn display_uses_trade_names() {
        assert_eq!(Size::Awg2_0.to_string(), "2/0 AWG");
        assert_eq!(Size::Kcmil500.to_string(), "500 kcmil");
    }
}
