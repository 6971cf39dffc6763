//! Theme set and color palettes.

use std::fmt;

/// 24-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// Terminal color scheme. Closed set, fixed order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Theme {
    /// Green phosphor.
    #[default]
    Matrix,
    /// Amber monochrome.
    Amber,
    /// Cyan on navy.
    Blue,
    /// Dark text on a light background.
    White,
}

impl Theme {
    /// All themes in cycle order.
    pub const ALL: [Theme; 4] = [Theme::Matrix, Theme::Amber, Theme::Blue, Theme::White];

    /// Token used by `theme <name>` and in persisted state.
    pub fn name(self) -> &'static str {
        match self {
            Self::Matrix => "matrix",
            Self::Amber => "amber",
            Self::Blue => "blue",
            Self::White => "white",
        }
    }

    /// Label shown in the status line.
    pub fn display_name(self) -> &'static str {
        match self {
            Self::Matrix => "Matrix",
            Self::Amber => "Amber",
            Self::Blue => "Blue",
            Self::White => "Light",
        }
    }

    /// Exact (lower-case) name lookup.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.name() == name)
    }

    /// Next theme in cycle order, wrapping.
    pub fn next(self) -> Self {
        let idx = Self::ALL.iter().position(|&t| t == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }

    /// Comma-separated list of every theme name.
    pub fn names() -> String {
        Self::ALL.map(Theme::name).join(", ")
    }

    /// Colors for this theme.
    pub fn palette(self) -> Palette {
        match self {
            Self::Matrix => Palette {
                background: Color::rgb(0, 0, 0),
                text: Color::rgb(0, 255, 0),
                accent: Color::rgb(0, 255, 65),
                muted: Color::rgb(0, 143, 17),
                success: Color::rgb(57, 255, 20),
                warning: Color::rgb(255, 255, 0),
                error: Color::rgb(255, 51, 51),
            },
            Self::Amber => Palette {
                background: Color::rgb(26, 15, 0),
                text: Color::rgb(255, 176, 0),
                accent: Color::rgb(255, 191, 0),
                muted: Color::rgb(166, 124, 0),
                success: Color::rgb(255, 217, 102),
                warning: Color::rgb(255, 234, 0),
                error: Color::rgb(255, 95, 31),
            },
            Self::Blue => Palette {
                background: Color::rgb(0, 16, 32),
                text: Color::rgb(135, 206, 250),
                accent: Color::rgb(0, 191, 255),
                muted: Color::rgb(70, 130, 180),
                success: Color::rgb(0, 250, 154),
                warning: Color::rgb(255, 215, 0),
                error: Color::rgb(255, 107, 107),
            },
            Self::White => Palette {
                background: Color::rgb(245, 245, 245),
                text: Color::rgb(26, 26, 26),
                accent: Color::rgb(51, 51, 51),
                muted: Color::rgb(119, 119, 119),
                success: Color::rgb(30, 123, 52),
                warning: Color::rgb(184, 134, 11),
                error: Color::rgb(192, 57, 43),
            },
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Semantic colors a theme supplies to the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub background: Color,
    pub text: Color,
    pub accent: Color,
    pub muted: Color,
    pub success: Color,
    pub warning: Color,
    pub error: Color,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_matrix() {
        assert_eq!(Theme::default(), Theme::Matrix);
    }

    #[test]
    fn names_round_trip() {
        for t in Theme::ALL {
            assert_eq!(Theme::from_name(t.name()), Some(t));
        }
    }

    #[test]
    fn from_name_is_exact() {
        assert_eq!(Theme::from_name("xyz"), None);
        assert_eq!(Theme::from_name(""), None);
        assert_eq!(Theme::from_name("Amber"), None);
        assert_eq!(Theme::from_name(" amber"), None);
    }

    #[test]
    fn next_wraps() {
        assert_eq!(Theme::Matrix.next(), Theme::Amber);
        assert_eq!(Theme::Amber.next(), Theme::Blue);
        assert_eq!(Theme::Blue.next(), Theme::White);
        assert_eq!(Theme::White.next(), Theme::Matrix);
    }

    #[test]
    fn names_list() {
        assert_eq!(Theme::names(), "matrix, amber, blue, white");
    }

    #[test]
    fn white_displays_as_light() {
        assert_eq!(Theme::White.display_name(), "Light");
        assert_eq!(Theme::White.to_string(), "white");
    }

    #[test]
    fn palettes_are_distinct() {
        let accents: Vec<Color> = Theme::ALL.iter().map(|t| t.palette().accent).collect();
        for (i, a) in accents.iter().enumerate() {
            for b in &accents[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn light_theme_has_light_background() {
        let p = Theme::White.palette();
        assert!(p.background.r > 200 && p.text.r < 100);
    }
}
