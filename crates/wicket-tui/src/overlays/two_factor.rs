//! One-time-code entry overlay.
//!
//! Shown after the backend accepts the credentials. The overlay only
//! manages cell focus; there is no verify action to wire the code to.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::mutations::{FlowMutation, StateMutation};
use crate::theme::Palette;

use super::OverlayUpdate;
use super::render_utils::{InputHint, OverlayConfig, render_overlay};

#[derive(Debug)]
pub struct TwoFactorState {
    /// One slot per code character; None renders as an empty cell.
    pub(crate) cells: Vec<Option<char>>,
    /// Cell that receives the next character.
    pub(crate) focus: usize,
}

impl TwoFactorState {
    /// Opens the overlay with `digits` empty cells, focusing the first.
    pub fn open(digits: usize) -> Self {
        Self {
            cells: vec![None; digits.max(1)],
            focus: 0,
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> OverlayUpdate {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

        match key.code {
            // Abandoning the code entry resets the whole sign-in
            KeyCode::Esc => OverlayUpdate::close()
                .with_mutations(vec![StateMutation::Flow(FlowMutation::Reset)]),
            KeyCode::Char('c') if ctrl => OverlayUpdate::close()
                .with_mutations(vec![StateMutation::Flow(FlowMutation::Reset)]),

            KeyCode::Char(c) if c.is_ascii_alphanumeric() && !ctrl => {
                self.cells[self.focus] = Some(c);
                // The last cell keeps focus so a correction stays local
                if self.focus + 1 < self.cells.len() {
                    self.focus += 1;
                }
                OverlayUpdate::stay()
            }

            KeyCode::Backspace => {
                if self.cells[self.focus].is_some() {
                    self.cells[self.focus] = None;
                } else if self.focus > 0 {
                    self.focus -= 1;
                    self.cells[self.focus] = None;
                }
                OverlayUpdate::stay()
            }

            KeyCode::Left => {
                self.focus = self.focus.saturating_sub(1);
                OverlayUpdate::stay()
            }
            KeyCode::Right => {
                if self.focus + 1 < self.cells.len() {
                    self.focus += 1;
                }
                OverlayUpdate::stay()
            }

            _ => OverlayUpdate::stay(),
        }
    }

    /// Distributes pasted characters across the cells, starting at the
    /// focused one.
    pub fn handle_paste(&mut self, text: &str) -> OverlayUpdate {
        for c in text.chars().filter(char::is_ascii_alphanumeric) {
            self.cells[self.focus] = Some(c);
            if self.focus + 1 < self.cells.len() {
                self.focus += 1;
            } else {
                break;
            }
        }
        OverlayUpdate::stay()
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, palette: &Palette) -> Rect {
        let config = OverlayConfig {
            title: "Two-factor authentication".to_string(),
            width: self.popup_width(),
            height: 9,
            hints: vec![
                InputHint::new("Backspace", "erase"),
                InputHint::new("Esc", "cancel"),
            ],
        };
        let layout = render_overlay(frame, area, &config, palette);
        let body = layout.body;

        let message = format!("Enter the {}-digit code we just sent you.", self.cells.len());
        frame.render_widget(
            Paragraph::new(Line::from(Span::styled(message, palette.muted_style()))).centered(),
            Rect {
                height: body.height.min(1),
                ..body
            },
        );

        self.render_cells(frame, body, palette);
        layout.popup
    }

    /// Draws one bordered box per cell, highlighting the focused one.
    fn render_cells(&self, frame: &mut Frame, body: Rect, palette: &Palette) {
        let count = self.cells.len() as u16;
        let total = count * 4 - 1;
        let start_x = body.x + body.width.saturating_sub(total) / 2;
        let y = body.y + 2;
        if y + 3 > body.y + body.height {
            return;
        }

        for (i, cell) in self.cells.iter().enumerate() {
            let rect = Rect::new(start_x + i as u16 * 4, y, 3, 3);
            let focused = i == self.focus;

            let border_style = if focused {
                palette.focus_border_style()
            } else {
                palette.border_style()
            };
            let block = Block::default().borders(Borders::ALL).border_style(border_style);
            let inner = block.inner(rect);
            frame.render_widget(block, rect);

            let value_style = if focused {
                Style::default()
                    .fg(palette.accent)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(palette.text)
            };
            let value = cell.map_or_else(String::new, |c| c.to_string());
            frame.render_widget(Paragraph::new(value).style(value_style).centered(), inner);
        }
    }

    fn popup_width(&self) -> u16 {
        let cells = self.cells.len() as u16 * 4 + 5;
        cells.max(46)
    }
}
