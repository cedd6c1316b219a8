use std::fs;
use std::path::Path;

use ratatui::style::Color;
use serde::Deserialize;
use tracing::warn;

use crate::highlight::TokenKind;

#[derive(Debug, Clone)]
pub struct Theme {
    pub editor_bg: Color,
    pub sidebar_bg: Color,
    pub panel_bg: Color,
    pub input_bg: Color,
    pub status_bg: Color,
    pub title_bg: Color,
    pub current_line_bg: Color,
    pub text_fg: Color,
    pub muted_fg: Color,
    pub accent_fg: Color,
    pub comment_fg: Color,
    pub string_fg: Color,
    pub keyword_fg: Color,
    pub call_fg: Color,
    pub type_fg: Color,
    pub toast_bg: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            editor_bg: Color::Rgb(30, 30, 30),
            sidebar_bg: Color::Rgb(37, 37, 38),
            panel_bg: Color::Rgb(37, 37, 38),
            input_bg: Color::Rgb(60, 60, 60),
            status_bg: Color::Rgb(0, 122, 204),
            title_bg: Color::Rgb(50, 50, 51),
            current_line_bg: Color::Rgb(42, 45, 46),
            text_fg: Color::Rgb(212, 212, 212),
            muted_fg: Color::Rgb(133, 133, 133),
            accent_fg: Color::Rgb(255, 255, 255),
            comment_fg: Color::Rgb(106, 153, 85),
            string_fg: Color::Rgb(206, 145, 120),
            keyword_fg: Color::Rgb(86, 156, 214),
            call_fg: Color::Rgb(220, 220, 170),
            type_fg: Color::Rgb(78, 201, 176),
            toast_bg: Color::Rgb(20, 20, 20),
        }
    }
}

impl Theme {
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        let path_ref = path.as_ref();
        match fs::read_to_string(path_ref) {
            Ok(contents) => match Self::from_toml_str(&contents) {
                Ok(theme) => theme,
                Err(err) => {
                    warn!(
                        path = %path_ref.display(),
                        "failed to parse theme file: {err}; using defaults"
                    );
                    Self::default()
                }
            },
            Err(err) => {
                warn!(
                    path = %path_ref.display(),
                    "failed to read theme file: {err}; using defaults"
                );
                Self::default()
            }
        }
    }

    pub fn from_toml_str(s: &str) -> Result<Self, toml::de::Error> {
        let cfg: ThemeToml = toml::from_str(s)?;
        let base = Self::default();
        let colors = cfg.colors;
        let pick = |value: Option<RgbToml>, fallback: Color| {
            value.map(|rgb| rgb.to_color()).unwrap_or(fallback)
        };
        Ok(Self {
            editor_bg: pick(colors.editor_bg, base.editor_bg),
            sidebar_bg: pick(colors.sidebar_bg, base.sidebar_bg),
            panel_bg: pick(colors.panel_bg, base.panel_bg),
            input_bg: pick(colors.input_bg, base.input_bg),
            status_bg: pick(colors.status_bg, base.status_bg),
            title_bg: pick(colors.title_bg, base.title_bg),
            current_line_bg: pick(colors.current_line_bg, base.current_line_bg),
            text_fg: pick(colors.text_fg, base.text_fg),
            muted_fg: pick(colors.muted_fg, base.muted_fg),
            accent_fg: pick(colors.accent_fg, base.accent_fg),
            comment_fg: pick(colors.comment_fg, base.comment_fg),
            string_fg: pick(colors.string_fg, base.string_fg),
            keyword_fg: pick(colors.keyword_fg, base.keyword_fg),
            call_fg: pick(colors.call_fg, base.call_fg),
            type_fg: pick(colors.type_fg, base.type_fg),
            toast_bg: pick(colors.toast_bg, base.toast_bg),
        })
    }

    pub fn token_fg(&self, kind: Option<TokenKind>) -> Color {
        match kind {
            None => self.text_fg,
            Some(TokenKind::Comment) => self.comment_fg,
            Some(TokenKind::String) => self.string_fg,
            Some(TokenKind::Keyword) => self.keyword_fg,
            Some(TokenKind::Call) => self.call_fg,
            Some(TokenKind::Type) => self.type_fg,
        }
    }
}

#[derive(Debug, Deserialize)]
struct ThemeToml {
    colors: ThemeColorsToml,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ThemeColorsToml {
    editor_bg: Option<RgbToml>,
    sidebar_bg: Option<RgbToml>,
    panel_bg: Option<RgbToml>,
    input_bg: Option<RgbToml>,
    status_bg: Option<RgbToml>,
    title_bg: Option<RgbToml>,
    current_line_bg: Option<RgbToml>,
    text_fg: Option<RgbToml>,
    muted_fg: Option<RgbToml>,
    accent_fg: Option<RgbToml>,
    comment_fg: Option<RgbToml>,
    string_fg: Option<RgbToml>,
    keyword_fg: Option<RgbToml>,
    call_fg: Option<RgbToml>,
    type_fg: Option<RgbToml>,
    toast_bg: Option<RgbToml>,
}

#[derive(Debug, Clone, Copy, Deserialize)]
struct RgbToml {
    r: u8,
    g: u8,
    b: u8,
}

impl RgbToml {
    fn to_color(self) -> Color {
        Color::Rgb(self.r, self.g, self.b)
    }
}
