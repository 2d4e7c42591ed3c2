use std::fmt;

/// NEC edition whose rules apply to a calculation.
///
/// The edition is plain data passed to every rule that depends on it, so the
/// same inputs always produce the same outputs.
/// It currently selects:
///
/// - the rooftop temperature adder (a distance ladder up to 36 in for 2014,
///   a single 60 °F adder below 7/8 in for 2017 and 2020), and
/// - the eligibility table for the AC/MC cable bundling exceptions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Edition {
    Nec2014,
    #[default]
    Nec2017,
    Nec2020,
}

impl Edition {
    /// Publication year of the edition.
    #[must_use]
    pub fn year(self) -> u16 {
        match self {
            Edition::Nec2014 => 2014,
            Edition::Nec2017 => 2017,
            Edition::Nec2020 => 2020,
        }
    }
}

impl fmt::Display for Edition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NEC {}", self.year())
    }
}
