//! Pure view/render functions for the TUI.
//!
//! This module contains all rendering logic. Functions here:
//! - Take `&AppState` by immutable reference
//! - Draw to a ratatui Frame
//! - Never mutate state or return effects
//!
//! The one exception to "never mutate" is the overlay rect, which is
//! stored through a `Cell` so the reducer can hit-test outside clicks
//! without the render pass taking `&mut`.

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use unicode_width::UnicodeWidthStr;

use crate::common::{Toast, ToastLevel};
use crate::features::form;
use crate::overlays::OverlayExt;
use crate::state::{AppState, LoginFlow, TuiState};
use crate::theme::{self, Palette};

/// Height of the status line at the bottom.
const STATUS_HEIGHT: u16 = 1;

/// Height of one toast box, border included.
const TOAST_HEIGHT: u16 = 3;

/// Narrowest a toast box will shrink to.
const TOAST_MIN_WIDTH: u16 = 20;

/// Spinner frames for the submit button and status line animation.
pub const SPINNER_FRAMES: &[&str] = &["◐", "◓", "◑", "◒"];

/// Renders the entire TUI to the frame.
///
/// This is a pure render function - it only reads state and draws to frame.
pub fn render(app: &AppState, frame: &mut Frame) {
    let area = frame.area();
    let state = &app.tui;
    let palette = theme::palette(state.theme);

    // Paint the themed background before anything else
    frame.render_widget(
        Block::default().style(Style::default().bg(palette.bg).fg(palette.text)),
        area,
    );

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(STATUS_HEIGHT)])
        .split(area);

    form::render_card(state, frame, chunks[0], &palette);
    render_status_line(state, frame, chunks[1], &palette);
    render_toasts(state, frame, area, &palette);

    // Render overlay (last, so it appears on top) and remember where it
    // landed for outside-click dismissal
    let overlay_rect = app.overlay.render(frame, area, &palette);
    state.overlay_area.set(overlay_rect);
}

/// Formats a duration for the status line display.
pub fn format_elapsed(d: std::time::Duration) -> String {
    let secs = d.as_secs();
    if secs >= 60 {
        let mins = secs / 60;
        let remaining_secs = secs % 60;
        format!("{}m{:02}s", mins, remaining_secs)
    } else {
        format!("{}s", secs)
    }
}

/// Renders the status line below the card.
///
/// The content follows the flow: shortcut hints while idle, progress
/// while a request is in flight, the reopen hint while a code entry is
/// pending.
fn render_status_line(state: &TuiState, frame: &mut Frame, area: Rect, palette: &Palette) {
    let spans: Vec<Span> = match &state.flow {
        LoginFlow::Submitting { started, .. } => {
            let spinner = SPINNER_FRAMES[state.spinner_frame % SPINNER_FRAMES.len()];
            let accent = Style::default().fg(palette.accent);
            vec![
                Span::styled(spinner, accent),
                Span::raw(" "),
                Span::styled("Signing in...", accent),
                Span::styled(
                    format!(" ({})", format_elapsed(started.elapsed())),
                    palette.muted_style(),
                ),
                Span::raw("  "),
                hint_key("Esc", palette),
                hint_label("cancel", palette),
            ]
        }
        LoginFlow::AwaitingTwoFactor => hint_spans(
            &[("Ctrl+O", "reopen code entry"), ("Ctrl+C", "quit")],
            palette,
        ),
        LoginFlow::Idle => hint_spans(
            &[
                ("Tab", "fields"),
                ("Ctrl+R", "show password"),
                ("Ctrl+T", "theme"),
                ("Ctrl+F", "forgot"),
                ("Ctrl+C", "quit"),
            ],
            palette,
        ),
    };

    frame.render_widget(
        Paragraph::new(Line::from(spans)).style(Style::default().bg(palette.bg)),
        area,
    );
}

fn hint_spans(hints: &[(&'static str, &'static str)], palette: &Palette) -> Vec<Span<'static>> {
    let mut spans = Vec::with_capacity(hints.len() * 2);
    for (key, label) in hints {
        spans.push(hint_key(key, palette));
        spans.push(hint_label(label, palette));
    }
    spans
}

fn hint_key(key: &'static str, palette: &Palette) -> Span<'static> {
    Span::styled(
        format!(" {key}"),
        palette.muted_style().add_modifier(Modifier::BOLD),
    )
}

fn hint_label(label: &'static str, palette: &Palette) -> Span<'static> {
    Span::styled(format!(" {label} "), palette.muted_style())
}

/// Renders the toast stack in the bottom-right corner, newest at the
/// bottom, growing upward.
fn render_toasts(state: &TuiState, frame: &mut Frame, area: Rect, palette: &Palette) {
    if state.toasts.is_empty() {
        return;
    }

    let toasts: Vec<&Toast> = state.toasts.iter().collect();
    let count = toasts.len() as u16;

    for (i, toast) in toasts.iter().enumerate() {
        let offset_from_bottom = (count - i as u16) * TOAST_HEIGHT;
        let Some(y) = (area.y + area.height)
            .checked_sub(STATUS_HEIGHT + offset_from_bottom)
            .filter(|y| *y >= area.y)
        else {
            // Older toasts that no longer fit just wait off-screen
            continue;
        };

        let text = format!("{} {}", level_icon(toast.level), toast.message);
        let width = (text.width() as u16 + 4).clamp(TOAST_MIN_WIDTH, area.width.saturating_sub(2));
        let x = area.x + area.width.saturating_sub(width + 1);
        let rect = Rect::new(x, y, width, TOAST_HEIGHT);

        let color = palette.toast_color(toast.level);
        frame.render_widget(Clear, rect);
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(color))
            .style(Style::default().bg(palette.panel));
        let inner = block.inner(rect);
        frame.render_widget(block, rect);
        frame.render_widget(
            Paragraph::new(Line::from(Span::styled(
                text,
                Style::default().fg(palette.text),
            )))
            .centered(),
            inner,
        );
    }
}

fn level_icon(level: ToastLevel) -> &'static str {
    match level {
        ToastLevel::Info => "ℹ",
        ToastLevel::Success => "✓",
        ToastLevel::Error => "✗",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_format_elapsed() {
        assert_eq!(format_elapsed(Duration::from_secs(0)), "0s");
        assert_eq!(format_elapsed(Duration::from_secs(59)), "59s");
        assert_eq!(format_elapsed(Duration::from_secs(60)), "1m00s");
        assert_eq!(format_elapsed(Duration::from_secs(125)), "2m05s");
    }

    #[test]
    fn test_level_icons_are_distinct() {
        assert_ne!(level_icon(ToastLevel::Info), level_icon(ToastLevel::Error));
        assert_ne!(
            level_icon(ToastLevel::Success),
            level_icon(ToastLevel::Error)
        );
    }
}
