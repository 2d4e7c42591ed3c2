use super::{Metal, OcpdRating, Size};

/// Breakpoints of Table 250.122 as (rating not exceeding, copper, aluminum).
const TABLE: [(u32, Size, Size); 19] = [
    (15, Size::Awg14, Size::Awg12),
    (20, Size::Awg12, Size::Awg10),
    (60, Size::Awg10, Size::Awg8),
    (100, Size::Awg8, Size::Awg6),
    (200, Size::Awg6, Size::Awg4),
    (300, Size::Awg4, Size::Awg2),
    (400, Size::Awg3, Size::Awg1),
    (500, Size::Awg2, Size::Awg1_0),
    (600, Size::Awg1, Size::Awg2_0),
    (800, Size::Awg1_0, Size::Awg3_0),
    (1000, Size::Awg2_0, Size::Awg4_0),
    (1200, Size::Awg3_0, Size::Kcmil250),
    (1600, Size::Awg4_0, Size::Kcmil350),
    (2000, Size::Kcmil250, Size::Kcmil400),
    (2500, Size::Kcmil350, Size::Kcmil600),
    (3000, Size::Kcmil400, Size::Kcmil600),
    (4000, Size::Kcmil500, Size::Kcmil750),
    // The table lists 1200 kcmil aluminum for 5000 A, which is not a
    // standard size; the next standard size up is used.
    (5000, Size::Kcmil700, Size::Kcmil1250),
    (6000, Size::Kcmil800, Size::Kcmil1250),
];

/// Minimum equipment grounding conductor size for an OCPD rating (Table 250.122).
///
/// Copper-clad aluminum uses the aluminum column.
#[must_use]
pub fn egc_size(rating: OcpdRating, metal: Metal) -> Option<Size> {
    TABLE
        .iter()
        .find(|(limit, _, _)| rating.amperes() <= *limit)
        .map(|&(_, copper, aluminum)| {
            if metal.uses_aluminum_tables() {
                aluminum
            } else {
                copper
            }
        })
}
