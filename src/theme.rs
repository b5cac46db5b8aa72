use ratatui::style::{Color, Modifier, Style};

/// Two-level emphasis the fields ask the surface for. The theme decides how
/// each level actually looks.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub enum Emphasis {
    #[default]
    Normal,
    Reversed,
}

impl Emphasis {
    pub fn when(reversed: bool) -> Self {
        if reversed {
            Emphasis::Reversed
        } else {
            Emphasis::Normal
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ThemeMode {
    Light,
    Dark,
    /// Terminal default colors, reverse video for emphasis.
    Plain,
}

#[derive(Clone, Debug)]
pub struct Theme {
    pub mode: ThemeMode,
    pub bg: Color,
    pub fg: Color,
    pub selected: Color,
}

impl Theme {
    pub fn synthwave_dark() -> Self {
        Self {
            mode: ThemeMode::Dark,
            bg: Color::Rgb(24, 24, 26),
            fg: Color::White,
            selected: Color::Rgb(255, 120, 0),
        }
    }

    pub fn synthwave_light() -> Self {
        Self {
            mode: ThemeMode::Light,
            bg: Color::Rgb(245, 245, 247),
            fg: Color::Rgb(20, 20, 22),
            selected: Color::Rgb(220, 100, 0),
        }
    }

    pub fn plain() -> Self {
        Self {
            mode: ThemeMode::Plain,
            bg: Color::Reset,
            fg: Color::Reset,
            selected: Color::Reset,
        }
    }

    pub fn from_mode(mode: ThemeMode) -> Self {
        match mode {
            ThemeMode::Dark => Self::synthwave_dark(),
            ThemeMode::Light => Self::synthwave_light(),
            ThemeMode::Plain => Self::plain(),
        }
    }

    /// Resolve `BUFFET_THEME` (`dark`, `light`, anything else is plain).
    pub fn from_env() -> Self {
        match std::env::var("BUFFET_THEME")
            .ok()
            .map(|s| s.to_ascii_lowercase())
            .as_deref()
        {
            Some("dark") => Self::synthwave_dark(),
            Some("light") => Self::synthwave_light(),
            _ => Self::plain(),
        }
    }

    pub fn base_style(&self) -> Style {
        Style::default().bg(self.bg).fg(self.fg)
    }

    pub fn reversed_style(&self) -> Style {
        match self.mode {
            ThemeMode::Plain => Style::default().add_modifier(Modifier::REVERSED),
            _ => Style::default()
                .fg(self.bg)
                .bg(self.selected)
                .add_modifier(Modifier::BOLD),
        }
    }

    pub fn style_for(&self, emphasis: Emphasis) -> Style {
        match emphasis {
            Emphasis::Normal => self.base_style(),
            Emphasis::Reversed => self.reversed_style(),
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::plain()
    }
}
