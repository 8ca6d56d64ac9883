//! Sign-in card view.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use unicode_segmentation::UnicodeSegmentation;
use wicket_core::strength::{self, StrengthTier};

use crate::common::text::truncate_start_with_ellipsis;
use crate::render::{SPINNER_FRAMES, format_elapsed};
use crate::state::{LoginFlow, TuiState};
use crate::theme::Palette;

use super::editor::LineEditor;
use super::state::Field;

const CARD_WIDTH: u16 = 46;
const CARD_HEIGHT: u16 = 18;

/// Display columns available for a field value inside the card.
const VALUE_BUDGET: usize = 38;

/// Columns in the strength meter bar.
const METER_WIDTH: usize = 10;

/// Draws the centered sign-in card.
pub fn render_card(tui: &TuiState, frame: &mut Frame, area: Rect, palette: &Palette) {
    let card = card_area(area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(palette.border_style())
        .title(" Sign in ")
        .title_style(palette.title_style())
        .style(palette.panel_style());
    let inner = block.inner(card);
    frame.render_widget(block, card);

    let form = &tui.form;
    let mut lines = vec![
        Line::default(),
        Line::from(Span::styled(
            "  Welcome back!",
            Style::default()
                .fg(palette.highlight)
                .add_modifier(Modifier::BOLD),
        )),
        Line::default(),
    ];

    lines.push(label_line("Email", form.focus == Field::Username, palette));
    lines.push(input_line(
        &form.username,
        None,
        "you@example.com",
        form.focus == Field::Username,
        palette,
    ));
    lines.push(error_line(form.username_error, palette));

    lines.push(label_line(
        "Password",
        form.focus == Field::Password,
        palette,
    ));
    lines.push(input_line(
        &form.password,
        (!form.show_password).then_some('•'),
        "password",
        form.focus == Field::Password,
        palette,
    ));
    lines.push(error_line(form.password_error, palette));
    lines.push(strength_line(form.password.text(), palette));

    lines.push(Line::default());
    lines.push(checkbox_line(
        form.remember_me,
        form.focus == Field::RememberMe,
        palette,
    ));
    lines.push(Line::default());
    lines.push(submit_line(tui, palette));
    lines.push(Line::default());
    lines.push(social_line(palette));

    frame.render_widget(Paragraph::new(lines), inner);
}

/// Centers the card in the available area.
fn card_area(area: Rect) -> Rect {
    let width = CARD_WIDTH.min(area.width);
    let height = CARD_HEIGHT.min(area.height);
    let x = area.x + (area.width - width) / 2;
    let y = area.y + (area.height - height) / 2;
    Rect::new(x, y, width, height)
}

fn label_line(text: &str, focused: bool, palette: &Palette) -> Line<'static> {
    let style = if focused {
        Style::default()
            .fg(palette.accent)
            .add_modifier(Modifier::BOLD)
    } else {
        palette.muted_style()
    };
    Line::from(Span::styled(format!("  {text}"), style))
}

/// One input row: prompt, value (masked for passwords), block cursor.
fn input_line(
    editor: &LineEditor,
    mask: Option<char>,
    placeholder: &str,
    focused: bool,
    palette: &Palette,
) -> Line<'static> {
    let prompt_style = if focused {
        palette.focus_border_style()
    } else {
        palette.muted_style()
    };
    let mut spans = vec![Span::styled("  > ".to_string(), prompt_style)];

    if editor.is_empty() && !focused {
        spans.push(Span::styled(placeholder.to_string(), palette.muted_style()));
        return Line::from(spans);
    }

    let text_style = Style::default().fg(palette.text);
    if !focused {
        spans.push(Span::styled(
            truncate_start_with_ellipsis(&display(editor.text(), mask), VALUE_BUDGET),
            text_style,
        ));
        return Line::from(spans);
    }

    // Focused: split at the cursor so it stays visible while editing
    let (left, right) = editor.split_at_cursor();
    let under = right.graphemes(true).next();
    let after = under.map_or("", |g| &right[g.len()..]);

    let left_budget = VALUE_BUDGET.saturating_sub(1);
    spans.push(Span::styled(
        truncate_start_with_ellipsis(&display(left, mask), left_budget),
        text_style,
    ));
    spans.push(Span::styled(
        under.map_or_else(|| " ".to_string(), |g| display(g, mask)),
        text_style.add_modifier(Modifier::REVERSED),
    ));
    if !after.is_empty() {
        spans.push(Span::styled(display(after, mask), text_style));
    }
    Line::from(spans)
}

/// Applies the password mask, one mask char per input char.
fn display(text: &str, mask: Option<char>) -> String {
    match mask {
        Some(mask) => mask.to_string().repeat(text.chars().count()),
        None => text.to_string(),
    }
}

fn error_line(error: Option<&'static str>, palette: &Palette) -> Line<'static> {
    match error {
        Some(error) => Line::from(Span::styled(
            format!("  {error}"),
            Style::default().fg(palette.error),
        )),
        None => Line::default(),
    }
}

/// Strength meter: filled bar plus tier label, hidden while empty.
fn strength_line(password: &str, palette: &Palette) -> Line<'static> {
    let prefix = Span::styled("  Strength: ".to_string(), palette.muted_style());
    if password.is_empty() {
        return Line::from(vec![
            prefix,
            Span::styled("░".repeat(METER_WIDTH), palette.muted_style()),
        ]);
    }

    let score = strength::score(password);
    let tier = StrengthTier::for_score(score);
    let filled = usize::from(score) * METER_WIDTH / usize::from(strength::MAX_SCORE);
    let color = palette.strength_color(tier);

    Line::from(vec![
        prefix,
        Span::styled("█".repeat(filled), Style::default().fg(color)),
        Span::styled("░".repeat(METER_WIDTH - filled), palette.muted_style()),
        Span::styled(format!(" {}", tier.label()), Style::default().fg(color)),
    ])
}

fn checkbox_line(checked: bool, focused: bool, palette: &Palette) -> Line<'static> {
    let mark = if checked { "[x]" } else { "[ ]" };
    let style = if focused {
        Style::default()
            .fg(palette.accent)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(palette.text)
    };
    Line::from(Span::styled(format!("  {mark} Remember me"), style))
}

/// Social sign-in row, wired to the Alt+G / Alt+B bindings.
fn social_line(palette: &Palette) -> Line<'static> {
    let key_style = palette.muted_style().add_modifier(Modifier::BOLD);
    Line::from(vec![
        Span::styled("  Or: ".to_string(), palette.muted_style()),
        Span::styled("Alt+G".to_string(), key_style),
        Span::styled(" Google  ".to_string(), palette.muted_style()),
        Span::styled("Alt+B".to_string(), key_style),
        Span::styled(" Facebook".to_string(), palette.muted_style()),
    ])
}

/// Submit row: a button when idle, spinner and elapsed time in flight.
fn submit_line(tui: &TuiState, palette: &Palette) -> Line<'static> {
    match &tui.flow {
        LoginFlow::Submitting { started, .. } => {
            let spinner = SPINNER_FRAMES[tui.spinner_frame % SPINNER_FRAMES.len()];
            Line::from(vec![
                Span::styled(
                    format!("  {spinner} Signing in... "),
                    Style::default().fg(palette.accent),
                ),
                Span::styled(
                    format!("({})", format_elapsed(started.elapsed())),
                    palette.muted_style(),
                ),
            ])
        }
        _ => Line::from(Span::styled(
            "  [ Sign in ]".to_string(),
            Style::default()
                .fg(palette.accent)
                .add_modifier(Modifier::BOLD),
        )),
    }
}
