//! Palette entries with an optional display name.

use std::fmt;

use super::rgb::Rgb;

/// An [`Rgb`] value optionally tagged with a human-readable name.
///
/// The name is only used for display (palette listings, logs). Matching and
/// equality checks during palette construction look at [`rgb`](Self::rgb)
/// alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NamedColor {
    name: Option<&'static str>,
    rgb: Rgb,
}

impl NamedColor {
    /// A named color, usable in `const` and `static` tables.
    #[inline]
    pub const fn named(name: &'static str, rgb: Rgb) -> Self {
        Self {
            name: Some(name),
            rgb,
        }
    }

    /// A color without a name.
    #[inline]
    pub const fn unnamed(rgb: Rgb) -> Self {
        Self { name: None, rgb }
    }

    #[inline]
    pub fn name(&self) -> Option<&'static str> {
        self.name
    }

    #[inline]
    pub fn rgb(&self) -> Rgb {
        self.rgb
    }
}

impl From<Rgb> for NamedColor {
    fn from(rgb: Rgb) -> Self {
        Self::unnamed(rgb)
    }
}

impl fmt::Display for NamedColor {
    /// Formats as `Name - RGB(r, g, b)`, or just `RGB(r, g, b)` when unnamed.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name {
            Some(name) => write!(f, "{} - {}", name, self.rgb),
            None => write!(f, "{}", self.rgb),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_with_name() {
        let c = NamedColor::named("Dark Red", Rgb::new(185, 94, 74));
        assert_eq!(c.to_string(), "Dark Red - RGB(185, 94, 74)");
    }

    #[test]
    fn test_display_without_name() {
        let c: NamedColor = Rgb::new(1, 2, 3).into();
        assert_eq!(c.name(), None);
        assert_eq!(c.to_string(), "RGB(1, 2, 3)");
    }
}
