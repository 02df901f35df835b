use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ColourMapKind {
    #[default]
    HsvCycle,
    FireGradient,
}

impl ColourMapKind {
    pub const ALL: &'static [Self] = &[Self::HsvCycle, Self::FireGradient];

    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::HsvCycle => "HSV cycle",
            Self::FireGradient => "Fire gradient",
        }
    }
}

impl fmt::Display for ColourMapKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str((*self).display_name())
    }
}
