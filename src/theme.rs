//! Light and dark color palettes
//!
//! The palettes are fixed tables keyed by [`ThemeMode`]; the settings
//! screen flips the mode at runtime and every widget picks its colors
//! through the active [`Theme`] on the next draw.

use ratatui::style::Color;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ThemeMode {
    Light,
    #[default]
    Dark,
}

impl ThemeMode {
    pub fn as_str(&self) -> &str {
        match self {
            ThemeMode::Light => "light",
            ThemeMode::Dark => "dark",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            ThemeMode::Light => ThemeMode::Dark,
            ThemeMode::Dark => ThemeMode::Light,
        }
    }
}

impl std::str::FromStr for ThemeMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "light" => Ok(ThemeMode::Light),
            "dark" => Ok(ThemeMode::Dark),
            other => Err(format!("unknown theme mode: {}", other)),
        }
    }
}

/// Semantic color role, resolved against the active theme at draw time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tone {
    #[default]
    Default,
    Muted,
    Primary,
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    pub primary: Color,
    pub secondary: Color,
    pub accent: Color,
    pub text: Color,
    pub text_secondary: Color,
    pub border: Color,
    pub error: Color,
    pub warning: Color,
    pub success: Color,
}

impl Theme {
    pub fn for_mode(mode: ThemeMode) -> Self {
        match mode {
            ThemeMode::Light => Self::light(),
            ThemeMode::Dark => Self::dark(),
        }
    }

    pub fn light() -> Self {
        Self {
            primary: Color::Rgb(37, 99, 235),
            secondary: Color::Rgb(99, 102, 241),
            accent: Color::Rgb(139, 92, 246),
            text: Color::Rgb(31, 41, 55),
            text_secondary: Color::Rgb(107, 114, 128),
            border: Color::Rgb(229, 231, 235),
            error: Color::Rgb(239, 68, 68),
            warning: Color::Rgb(245, 158, 11),
            success: Color::Rgb(16, 185, 129),
        }
    }

    pub fn dark() -> Self {
        Self {
            primary: Color::Rgb(59, 130, 246),
            secondary: Color::Rgb(129, 140, 248),
            accent: Color::Rgb(167, 139, 250),
            text: Color::Rgb(249, 250, 251),
            text_secondary: Color::Rgb(209, 213, 219),
            border: Color::Rgb(55, 65, 81),
            error: Color::Rgb(248, 113, 113),
            warning: Color::Rgb(251, 191, 36),
            success: Color::Rgb(52, 211, 153),
        }
    }

    pub fn color(&self, tone: Tone) -> Color {
        match tone {
            Tone::Default => self.text,
            Tone::Muted => self.text_secondary,
            Tone::Primary => self.primary,
            Tone::Info => self.secondary,
            Tone::Success => self.success,
            Tone::Warning => self.warning,
            Tone::Error => self.error,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_parsing() {
        assert_eq!("light".parse::<ThemeMode>().unwrap(), ThemeMode::Light);
        assert_eq!("DARK".parse::<ThemeMode>().unwrap(), ThemeMode::Dark);
        assert!("solarized".parse::<ThemeMode>().is_err());
    }

    #[test]
    fn test_palettes_differ_per_mode() {
        let light = Theme::for_mode(ThemeMode::Light);
        let dark = Theme::for_mode(ThemeMode::Dark);
        assert_ne!(light.text, dark.text);
        assert_ne!(light.border, dark.border);
    }

    #[test]
    fn test_toggle_round_trips() {
        assert_eq!(ThemeMode::Light.toggled().toggled(), ThemeMode::Light);
    }
}
