//! Shared rendering helpers for overlays.
//!
//! Every overlay draws the same chrome: a cleared, bordered popup with
//! a bold title, a body, and a one-line hint footer. The helpers here
//! keep the dialogs visually consistent.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use unicode_width::UnicodeWidthStr;

use crate::common::text::truncate_start_with_ellipsis;
use crate::theme::Palette;

/// Static configuration for an overlay's chrome.
pub struct OverlayConfig {
    pub title: String,
    pub width: u16,
    pub height: u16,
    pub hints: Vec<InputHint>,
}

/// Areas produced by `render_overlay`.
pub struct OverlayLayout {
    /// Full popup rect, including the border.
    pub popup: Rect,
    /// Rect inside the border.
    pub inner: Rect,
    /// Inner rect minus the footer line.
    pub body: Rect,
    /// Bottom line reserved for hints.
    pub footer: Rect,
}

/// A key binding displayed in the overlay footer.
pub struct InputHint {
    pub key: &'static str,
    pub action: &'static str,
}

impl InputHint {
    pub fn new(key: &'static str, action: &'static str) -> Self {
        Self { key, action }
    }
}

/// Draws the popup chrome and returns the layout for the caller's body.
pub fn render_overlay(
    frame: &mut Frame,
    area: Rect,
    config: &OverlayConfig,
    palette: &Palette,
) -> OverlayLayout {
    let popup = calculate_overlay_area(area, config.width, config.height);

    frame.render_widget(Clear, popup);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(palette.border_style())
        .title(format!(" {} ", config.title))
        .title_style(palette.title_style())
        .style(palette.panel_style());
    let inner = block.inner(popup);
    frame.render_widget(block, popup);

    let body = Rect {
        height: inner.height.saturating_sub(1),
        ..inner
    };
    let footer = Rect {
        y: inner.y + inner.height.saturating_sub(1),
        height: inner.height.min(1),
        ..inner
    };
    if !config.hints.is_empty() {
        render_hints(frame, footer, &config.hints, palette);
    }

    OverlayLayout {
        popup,
        inner,
        body,
        footer,
    }
}

/// Centers a popup of the requested size, clamped to the frame.
pub fn calculate_overlay_area(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    let x = area.x + (area.width - width) / 2;
    let y = area.y + (area.height - height) / 2;
    Rect::new(x, y, width, height)
}

/// A single-line input with prompt, placeholder, and block cursor.
pub struct InputLine<'a> {
    pub value: &'a str,
    pub placeholder: &'a str,
}

/// Renders the input line as `> value█`, scrolling long values so the
/// end stays visible.
pub fn render_input_line(frame: &mut Frame, area: Rect, input: &InputLine<'_>, palette: &Palette) {
    let prompt = "> ";
    let budget = usize::from(area.width).saturating_sub(prompt.width() + 1);

    let line = if input.value.is_empty() {
        Line::from(vec![
            Span::styled(prompt, palette.focus_border_style()),
            Span::styled(
                "█",
                Style::default().fg(palette.accent),
            ),
            Span::styled(format!(" {}", input.placeholder), palette.muted_style()),
        ])
    } else {
        Line::from(vec![
            Span::styled(prompt, palette.focus_border_style()),
            Span::styled(
                truncate_start_with_ellipsis(input.value, budget),
                Style::default().fg(palette.text),
            ),
            Span::styled("█", Style::default().fg(palette.accent)),
        ])
    };

    frame.render_widget(Paragraph::new(line), area);
}

/// Renders key hints centered, separated by bullets.
pub fn render_hints(frame: &mut Frame, area: Rect, hints: &[InputHint], palette: &Palette) {
    let mut spans = Vec::new();
    for (i, hint) in hints.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled(" • ", palette.muted_style()));
        }
        spans.push(Span::styled(
            hint.key,
            palette.muted_style().add_modifier(Modifier::BOLD),
        ));
        spans.push(Span::styled(format!(" {}", hint.action), palette.muted_style()));
    }

    let paragraph = Paragraph::new(Line::from(spans)).centered();
    frame.render_widget(paragraph, area);
}

/// Renders a horizontal rule across the given area.
pub fn render_separator(frame: &mut Frame, area: Rect, palette: &Palette) {
    let rule = "─".repeat(usize::from(area.width));
    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(rule, palette.border_style()))),
        area,
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_calculate_overlay_area_centers() {
        let area = Rect::new(0, 0, 80, 24);
        let popup = calculate_overlay_area(area, 50, 7);
        assert_eq!(popup, Rect::new(15, 8, 50, 7));
    }

    /// Requested sizes larger than the frame are clamped, not clipped.
    #[test]
    fn test_calculate_overlay_area_clamps_to_frame() {
        let area = Rect::new(0, 0, 40, 5);
        let popup = calculate_overlay_area(area, 50, 7);
        assert_eq!(popup, Rect::new(0, 0, 40, 5));
    }
}
