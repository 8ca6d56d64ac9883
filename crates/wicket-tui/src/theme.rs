//! Terminal color palettes for the light and dark themes.

use ratatui::style::{Color, Modifier, Style};
use wicket_core::config::Theme;
use wicket_core::strength::StrengthTier;

use crate::common::ToastLevel;

#[derive(Clone, Copy)]
pub struct Palette {
    pub bg: Color,
    pub panel: Color,
    pub border: Color,
    pub text: Color,
    pub muted: Color,
    pub accent: Color,
    pub highlight: Color,
    pub success: Color,
    pub warning: Color,
    pub error: Color,
}

impl Palette {
    pub fn panel_style(&self) -> Style {
        Style::default().bg(self.panel).fg(self.text)
    }

    pub fn border_style(&self) -> Style {
        Style::default().fg(self.border)
    }

    pub fn title_style(&self) -> Style {
        Style::default().fg(self.accent).add_modifier(Modifier::BOLD)
    }

    pub fn muted_style(&self) -> Style {
        Style::default().fg(self.muted)
    }

    pub fn focus_border_style(&self) -> Style {
        Style::default().fg(self.accent)
    }

    pub fn strength_color(&self, tier: StrengthTier) -> Color {
        match tier {
            StrengthTier::Weak => self.error,
            StrengthTier::Medium => self.warning,
            StrengthTier::Strong => self.success,
        }
    }

    pub fn toast_color(&self, level: ToastLevel) -> Color {
        match level {
            ToastLevel::Info => self.accent,
            ToastLevel::Success => self.success,
            ToastLevel::Error => self.error,
        }
    }
}

pub fn palette(theme: Theme) -> Palette {
    match theme {
        Theme::Dark => Palette {
            bg: Color::Rgb(24, 24, 32),
            panel: Color::Rgb(32, 33, 44),
            border: Color::Rgb(68, 71, 90),
            text: Color::Rgb(230, 230, 240),
            muted: Color::Rgb(140, 145, 165),
            accent: Color::Rgb(140, 158, 255),
            highlight: Color::Rgb(176, 140, 224),
            success: Color::Rgb(76, 175, 80),
            warning: Color::Rgb(255, 167, 38),
            error: Color::Rgb(244, 67, 54),
        },
        Theme::Light => Palette {
            bg: Color::Rgb(240, 240, 246),
            panel: Color::Rgb(255, 255, 255),
            border: Color::Rgb(205, 205, 220),
            text: Color::Rgb(30, 32, 40),
            muted: Color::Rgb(110, 115, 135),
            accent: Color::Rgb(102, 126, 234),
            highlight: Color::Rgb(118, 75, 162),
            success: Color::Rgb(76, 175, 80),
            warning: Color::Rgb(255, 167, 38),
            error: Color::Rgb(244, 67, 54),
        },
    }
}
