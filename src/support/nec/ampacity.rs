use uom::si::{electric_current::ampere, f64::ElectricCurrent};

use super::{Metal, Size, TempRating};

/// Allowable ampacity from Table 310.15(B)(16).
///
/// The table covers not more than three current-carrying conductors in a
/// raceway, cable or earth at a 30 °C (86 °F) ambient.
/// Aluminum and copper-clad aluminum share the aluminum columns.
///
/// Returns `None` for 14 AWG aluminum, which the table does not list.
#[must_use]
pub fn standard_ampacity(size: Size, metal: Metal, rating: TempRating) -> Option<ElectricCurrent> {
    let row = if metal.uses_aluminum_tables() {
        ALUMINUM[size.index()]?
    } else {
        COPPER[size.index()]
    };

    let amps = match rating {
        TempRating::T60 => row.0,
        TempRating::T75 => row.1,
        TempRating::T90 => row.2,
    };

    Some(ElectricCurrent::new::<ampere>(amps))
}

/// Copper rows as (60 °C, 75 °C, 90 °C), indexed by `Size::index`.
const COPPER: [(f64, f64, f64); 28] = [
    (15.0, 20.0, 25.0),
    (20.0, 25.0, 30.0),
    (30.0, 35.0, 40.0),
    (40.0, 50.0, 55.0),
    (55.0, 65.0, 75.0),
    (70.0, 85.0, 95.0),
    (85.0, 100.0, 115.0),
    (95.0, 115.0, 130.0),
    (110.0, 130.0, 145.0),
    (125.0, 150.0, 170.0),
    (145.0, 175.0, 195.0),
    (165.0, 200.0, 225.0),
    (195.0, 230.0, 260.0),
    (215.0, 255.0, 290.0),
    (240.0, 285.0, 320.0),
    (260.0, 310.0, 350.0),
    (280.0, 335.0, 380.0),
    (320.0, 380.0, 430.0),
    (350.0, 420.0, 475.0),
    (385.0, 460.0, 520.0),
    (400.0, 475.0, 535.0),
    (410.0, 490.0, 555.0),
    (435.0, 520.0, 585.0),
    (455.0, 545.0, 615.0),
    (495.0, 590.0, 665.0),
    (525.0, 625.0, 705.0),
    (545.0, 650.0, 735.0),
    (555.0, 665.0, 750.0),
];

const ALUMINUM: [Option<(f64, f64, f64)>; 28] = [
    None,
    Some((15.0, 20.0, 25.0)),
    Some((25.0, 30.0, 35.0)),
    Some((35.0, 40.0, 45.0)),
    Some((40.0, 50.0, 55.0)),
    Some((55.0, 65.0, 75.0)),
    Some((65.0, 75.0, 85.0)),
    Some((75.0, 90.0, 100.0)),
    Some((85.0, 100.0, 115.0)),
    Some((100.0, 120.0, 135.0)),
    Some((115.0, 135.0, 150.0)),
    Some((130.0, 155.0, 175.0)),
    Some((150.0, 180.0, 205.0)),
    Some((170.0, 205.0, 230.0)),
    Some((195.0, 230.0, 260.0)),
    Some((210.0, 250.0, 280.0)),
    Some((225.0, 270.0, 305.0)),
    Some((260.0, 310.0, 350.0)),
    Some((285.0, 340.0, 385.0)),
    Some((315.0, 375.0, 425.0)),
    Some((320.0, 385.0, 435.0)),
    Some((330.0, 395.0, 445.0)),
    Some((355.0, 425.0, 480.0)),
    Some((375.0, 445.0, 500.0)),
    Some((405.0, 485.0, 545.0)),
    Some((435.0, 520.0, 585.0)),
    Some((455.0, 545.0, 615.0)),
    Some((470.0, 560.0, 630.0)),
];

#[cfg(test)]
mod tests {
    use super::*;

    fn amps(size: Size, metal: Metal, rating: TempRating) -> Option<f64> {
        standard_ampacity(size, metal, rating).map(|i| i.get::<ampere>())
    }

    #[test]
    fn copper_rows() {
        assert_eq!(amps(Size::Awg14, Metal::Copper, TempRating::T60), Some(15.0));
        assert_eq!(amps(Size::Awg1, Metal::Copper, TempRating::T75), Some(130.0));
        assert_eq!(amps(Size::Kcmil500, Metal::Copper, TempRating::T90), Some(430.0));
    }

    #[test]
    fn aluminum_rows_and_gap() {
        assert_eq!(amps(Size::Awg14, Metal::Aluminum, TempRating::T90), None);
        assert_eq!(amps(Size::Awg12, Metal::Aluminum, TempRating::T60), Some(15.0));
        assert_eq!(amps(Size::Kcmil2000, Metal::Aluminum, TempRating::T75), Some(560.0));
    }

    #[test]
    fn copper_clad_aluminum_uses_aluminum_columns() {
        for size in Size::ALL {
            assert_eq!(
                amps(size, Metal::CopperCoatedAluminum, TempRating::T75),
                amps(size, Metal::Aluminum, TempRating::T75),
            );
        }
    }

    #[test]
    fn ampacity_grows_with_size_and_rating() {
        for metal in [Metal::Copper, Metal::Aluminum] {
            for rating in [TempRating::T60, TempRating::T75, TempRating::T90] {
                let column: Vec<f64> = Size::ALL
                    .iter()
                    .filter_map(|&size| amps(size, metal, rating))
                    .collect();
                assert!(column.windows(2).all(|pair| pair[0] < pair[1]));
            }
            for size in Size::ALL {
                if let (Some(a60), Some(a75), Some(a90)) = (
                    amps(size, metal, TempRating::T60),
                    amps(size, metal, TempRating::T75),
                    amps(size, metal, TempRating::T90),
                ) {
                    assert!(a60 < a75 && a75 < a90);
                }
            }
        }
    }
}
