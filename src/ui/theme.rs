use anyhow::{Context, Result};
use ratatui::style::Color;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Serializable color representation
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
enum ColorDef {
    /// RGB color as [r, g, b]
    Rgb(u8, u8, u8),
    /// Named color
    Named(String),
}

impl From<ColorDef> for Color {
    fn from(def: ColorDef) -> Self {
        match def {
            ColorDef::Rgb(r, g, b) => Color::Rgb(r, g, b),
            ColorDef::Named(name) => match name.as_str() {
                "Black" => Color::Black,
                "Red" => Color::Red,
                "Green" => Color::Green,
                "Yellow" => Color::Yellow,
                "Blue" => Color::Blue,
                "Magenta" => Color::Magenta,
                "Cyan" => Color::Cyan,
                "Gray" => Color::Gray,
                "DarkGray" => Color::DarkGray,
                "LightRed" => Color::LightRed,
                "LightGreen" => Color::LightGreen,
                "LightYellow" => Color::LightYellow,
                "LightBlue" => Color::LightBlue,
                "LightMagenta" => Color::LightMagenta,
                "LightCyan" => Color::LightCyan,
                "White" => Color::White,
                // Default/Reset uses the terminal's default color
                "Default" | "Reset" => Color::Reset,
                _ => Color::White,
            },
        }
    }
}

/// Serializable theme definition (matches the JSON file structure)
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ThemeFile {
    name: String,
    bg: ColorDef,
    fg: ColorDef,
    accent: ColorDef,
    selection_bg: ColorDef,
    #[serde(default = "default_muted")]
    muted: ColorDef,
    #[serde(default = "default_border")]
    border: ColorDef,
    #[serde(default = "default_selection_fg")]
    selection_fg: ColorDef,
    #[serde(default = "default_status_fg")]
    status_fg: ColorDef,
    #[serde(default = "default_status_bg")]
    status_bg: ColorDef,
    #[serde(default = "default_popup_bg")]
    popup_bg: ColorDef,
    #[serde(default = "default_popup_border")]
    popup_border: ColorDef,
}

fn default_muted() -> ColorDef {
    ColorDef::Named("DarkGray".to_string())
}

fn default_border() -> ColorDef {
    ColorDef::Named("DarkGray".to_string())
}

fn default_selection_fg() -> ColorDef {
    ColorDef::Named("White".to_string())
}

fn default_status_fg() -> ColorDef {
    ColorDef::Named("Gray".to_string())
}

fn default_status_bg() -> ColorDef {
    ColorDef::Named("Reset".to_string())
}

fn default_popup_bg() -> ColorDef {
    ColorDef::Named("Reset".to_string())
}

fn default_popup_border() -> ColorDef {
    ColorDef::Named("Gray".to_string())
}

impl From<ThemeFile> for Theme {
    fn from(file: ThemeFile) -> Self {
        Theme {
            name: file.name,
            bg: file.bg.into(),
            fg: file.fg.into(),
            muted: file.muted.into(),
            border: file.border.into(),
            accent: file.accent.into(),
            selection_bg: file.selection_bg.into(),
            selection_fg: file.selection_fg.into(),
            status_fg: file.status_fg.into(),
            status_bg: file.status_bg.into(),
            popup_bg: file.popup_bg.into(),
            popup_border: file.popup_border.into(),
        }
    }
}

/// Colors for the browser chrome
#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    /// Theme name for display and selection
    pub name: String,
    /// Screen background
    pub bg: Color,
    /// Regular text
    pub fg: Color,
    /// De-emphasized text: placeholders, separators, hints
    pub muted: Color,
    /// Panel borders
    pub border: Color,
    /// Titles, active toggles, the current breadcrumb
    pub accent: Color,
    /// Selected entry background
    pub selection_bg: Color,
    /// Selected entry text
    pub selection_fg: Color,
    /// Status bar text
    pub status_fg: Color,
    /// Status bar background
    pub status_bg: Color,
    /// Popup menu background
    pub popup_bg: Color,
    /// Popup menu border
    pub popup_border: Color,
}

impl Theme {
    pub fn dark() -> Self {
        Self {
            name: "dark".to_string(),
            bg: Color::Rgb(24, 24, 28),
            fg: Color::Rgb(220, 220, 220),
            muted: Color::Rgb(130, 130, 140),
            border: Color::Rgb(60, 60, 70),
            accent: Color::Rgb(110, 170, 250),
            selection_bg: Color::Rgb(45, 60, 90),
            selection_fg: Color::White,
            status_fg: Color::Rgb(170, 170, 180),
            status_bg: Color::Rgb(35, 35, 42),
            popup_bg: Color::Rgb(32, 32, 38),
            popup_border: Color::Rgb(110, 170, 250),
        }
    }

    pub fn light() -> Self {
        Self {
            name: "light".to_string(),
            bg: Color::Rgb(250, 250, 250),
            fg: Color::Rgb(32, 33, 36),
            muted: Color::Rgb(128, 134, 139),
            border: Color::Rgb(200, 200, 205),
            accent: Color::Rgb(26, 115, 232),
            selection_bg: Color::Rgb(205, 225, 255),
            selection_fg: Color::Black,
            status_fg: Color::Rgb(95, 99, 104),
            status_bg: Color::Rgb(235, 235, 238),
            popup_bg: Color::Rgb(255, 255, 255),
            popup_border: Color::Rgb(26, 115, 232),
        }
    }

    pub fn high_contrast() -> Self {
        Self {
            name: "high-contrast".to_string(),
            bg: Color::Black,
            fg: Color::White,
            muted: Color::Gray,
            border: Color::White,
            accent: Color::Yellow,
            selection_bg: Color::White,
            selection_fg: Color::Black,
            status_fg: Color::White,
            status_bg: Color::Black,
            popup_bg: Color::Black,
            popup_border: Color::Yellow,
        }
    }

    pub fn nostalgia() -> Self {
        Self {
            name: "nostalgia".to_string(),
            bg: Color::Rgb(0, 0, 170),
            fg: Color::Rgb(190, 190, 190),
            muted: Color::Rgb(85, 85, 255),
            border: Color::Rgb(85, 255, 255),
            accent: Color::Rgb(255, 255, 85),
            selection_bg: Color::Rgb(0, 170, 170),
            selection_fg: Color::Black,
            status_fg: Color::Black,
            status_bg: Color::Rgb(170, 170, 170),
            popup_bg: Color::Rgb(0, 0, 170),
            popup_border: Color::Rgb(255, 255, 85),
        }
    }

    /// Resolve a theme by name, falling back to dark for unknown names
    pub fn from_name(name: &str) -> Self {
        let normalized_name = name.to_lowercase().replace('_', "-");

        match normalized_name.as_str() {
            "light" => Self::light(),
            "high-contrast" => Self::high_contrast(),
            "nostalgia" => Self::nostalgia(),
            _ => Self::dark(),
        }
    }

    /// Names of the built-in themes
    pub fn available_themes() -> Vec<String> {
        vec![
            "dark".to_string(),
            "light".to_string(),
            "high-contrast".to_string(),
            "nostalgia".to_string(),
        ]
    }

    /// The built-in theme after this one, wrapping around
    pub fn next(&self) -> Self {
        let names = Self::available_themes();
        let index = names.iter().position(|name| name == &self.name).unwrap_or(0);
        Self::from_name(&names[(index + 1) % names.len()])
    }

    /// Load a custom theme from a JSON file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or does not parse as a
    /// theme definition.
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read theme file {}", path.display()))?;
        let file: ThemeFile = serde_json::from_str(&raw)
            .with_context(|| format!("failed to parse theme file {}", path.display()))?;
        Ok(file.into())
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_theme_creation() {
        assert_eq!(Theme::dark().name, "dark");
        assert_eq!(Theme::light().name, "light");
        assert_eq!(Theme::high_contrast().name, "high-contrast");
        assert_eq!(Theme::nostalgia().name, "nostalgia");
    }

    #[test]
    fn test_theme_from_name() {
        assert_eq!(Theme::from_name("light").name, "light");
        assert_eq!(Theme::from_name("HIGH_CONTRAST").name, "high-contrast");
        assert_eq!(Theme::from_name("unknown").name, "dark");
    }

    #[test]
    fn test_available_themes() {
        let themes = Theme::available_themes();
        assert_eq!(themes.len(), 4);
        assert!(themes.contains(&"dark".to_string()));
        assert!(themes.contains(&"nostalgia".to_string()));
    }

    #[test]
    fn test_default_theme() {
        assert_eq!(Theme::default().name, "dark");
    }

    #[test]
    fn test_next_cycles_through_all_themes() {
        let mut theme = Theme::dark();
        let mut seen = Vec::new();
        for _ in 0..4 {
            seen.push(theme.name.clone());
            theme = theme.next();
        }

        assert_eq!(theme.name, "dark");
        assert_eq!(seen, Theme::available_themes());
    }

    #[test]
    fn test_default_reset_color() {
        let color: Color = ColorDef::Named("Default".to_string()).into();
        assert_eq!(color, Color::Reset);

        let color: Color = ColorDef::Named("Reset".to_string()).into();
        assert_eq!(color, Color::Reset);
    }

    #[test]
    fn test_load_theme_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{
                "name": "custom",
                "bg": [10, 20, 30],
                "fg": "White",
                "accent": [255, 128, 0],
                "selection_bg": "Blue"
            }}"#
        )
        .unwrap();

        let theme = Theme::load_from_file(file.path()).unwrap();

        assert_eq!(theme.name, "custom");
        assert_eq!(theme.bg, Color::Rgb(10, 20, 30));
        assert_eq!(theme.fg, Color::White);
        assert_eq!(theme.accent, Color::Rgb(255, 128, 0));
        assert_eq!(theme.selection_bg, Color::Blue);
        // Omitted fields take their defaults.
        assert_eq!(theme.muted, Color::DarkGray);
        assert_eq!(theme.status_bg, Color::Reset);
    }

    #[test]
    fn test_load_theme_file_rejects_malformed_json() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();

        assert!(Theme::load_from_file(file.path()).is_err());
    }

    #[test]
    fn test_load_theme_file_missing_path() {
        assert!(Theme::load_from_file(Path::new("/nonexistent/theme.json")).is_err());
    }
}
