#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ColourMapKind {
    #[default]
    White,
    Fire,
    BlueWhite,
    Viridis,
}

impl ColourMapKind {
    pub const ALL: &'static [Self] = &[Self::White, Self::Fire, Self::BlueWhite, Self::Viridis];

    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::White => "White",
            Self::Fire => "Fire",
            Self::BlueWhite => "Blue-white",
            Self::Viridis => "Viridis",
        }
    }

    /// Case-insensitive lookup by display name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|kind| kind.display_name().eq_ignore_ascii_case(name))
    }
}

impl std::fmt::Display for ColourMapKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str((*self).display_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_name_ignores_case_and_whitespace() {
        assert_eq!(ColourMapKind::from_name("fire"), Some(ColourMapKind::Fire));
        assert_eq!(ColourMapKind::from_name(" BLUE-WHITE "), Some(ColourMapKind::BlueWhite));
        assert_eq!(ColourMapKind::from_name("magma"), None);
    }

    #[test]
    fn display_matches_display_name() {
        for &kind in ColourMapKind::ALL {
            assert_eq!(kind.to_string(), kind.display_name());
        }
    }
}
