use ratatui::style::{Color, Modifier, Style};

use crate::config::Theme;

// Shared accents
pub const ACCENT: Color = Color::Rgb(6, 182, 212);
pub const ERROR: Color = Color::Rgb(220, 80, 80);
pub const SUCCESS: Color = Color::Rgb(96, 176, 96);

/// Colours for one theme
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub background: Color,
    pub surface: Color,
    pub border: Color,
    pub text: Color,
    pub muted: Color,
}

impl Palette {
    pub fn for_theme(theme: Theme) -> Self {
        match theme {
            Theme::Dark => Self {
                background: Color::Rgb(15, 23, 42),
                surface: Color::Rgb(30, 41, 59),
                border: Color::Rgb(51, 65, 85),
                text: Color::White,
                muted: Color::Rgb(148, 163, 184),
            },
            Theme::Light => Self {
                background: Color::Rgb(248, 250, 252),
                surface: Color::Rgb(226, 232, 240),
                border: Color::Rgb(148, 163, 184),
                text: Color::Rgb(15, 23, 42),
                muted: Color::Rgb(71, 85, 105),
            },
        }
    }

    pub fn base_style(&self) -> Style {
        Style::default().bg(self.background).fg(self.text)
    }

    pub fn surface_style(&self) -> Style {
        Style::default().bg(self.surface).fg(self.text)
    }

    pub fn text_style(&self) -> Style {
        Style::default().fg(self.text)
    }

    pub fn muted_style(&self) -> Style {
        Style::default().fg(self.muted)
    }

    pub fn border_style(&self, focused: bool) -> Style {
        if focused {
            Style::default().fg(ACCENT)
        } else {
            Style::default().fg(self.border)
        }
    }

    pub fn tab_style(&self, selected: bool) -> Style {
        if selected {
            Style::default()
                .bg(ACCENT)
                .fg(Color::White)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(self.muted)
        }
    }

    pub fn field_style(&self, focused: bool) -> Style {
        if focused {
            Style::default()
                .bg(self.border)
                .fg(self.text)
                .add_modifier(Modifier::BOLD)
        } else {
            self.text_style()
        }
    }

    pub fn button_style(&self, focused: bool, enabled: bool) -> Style {
        if !enabled {
            Style::default().fg(self.muted).add_modifier(Modifier::DIM)
        } else if focused {
            Style::default()
                .bg(ACCENT)
                .fg(Color::White)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(ACCENT)
        }
    }
}

pub fn title_style() -> Style {
    Style::default().fg(ACCENT).add_modifier(Modifier::BOLD)
}

pub fn highlight_style() -> Style {
    Style::default().fg(ACCENT)
}

pub fn success_style() -> Style {
    Style::default().fg(SUCCESS)
}

pub fn error_style() -> Style {
    Style::default().fg(ERROR)
}
