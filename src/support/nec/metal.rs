use std::fmt;

/// Conductor metal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Metal {
    #[default]
    Copper,
    Aluminum,
    /// Copper-clad aluminum.
    CopperCoatedAluminum,
}

impl Metal {
    /// Whether the aluminum columns of the code tables apply.
    ///
    /// Copper-clad aluminum is rated with the aluminum columns of
    /// Tables 310.15(B)(16), 250.122 and Chapter 9 Table 9, and with the
    /// aluminum limits of 240.4(D).
    #[must_use]
    pub fn uses_aluminum_tables(self) -> bool {
        !matches!(self, Metal::Copper)
    }
}

impl fmt::Display for Metal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Metal::Copper => "copper",
            Metal::Aluminum => "aluminum",
            Metal::CopperCoatedAluminum => "copper-clad aluminum",
        })
    }
}
