//! Modal overlays.
//!
//! An overlay is a dialog drawn over the login card that captures all
//! keyboard input while open. At most one is active; it lives in
//! `AppState::overlay` and each variant bundles its own state, key
//! handling, and rendering.
//!
//! - `two_factor.rs`: one-time-code entry, opened when the backend
//!   accepts the credentials
//! - `forgot.rs`: forgot-password email dialog (Ctrl+F)
//! - `render_utils.rs`: the chrome shared by every dialog
//! - `update.rs`: key/paste routing into the active overlay

pub mod forgot;
pub mod render_utils;
pub mod two_factor;
mod update;

use crossterm::event::KeyEvent;
pub use forgot::ForgotPasswordState;
use ratatui::Frame;
use ratatui::layout::Rect;
pub use two_factor::TwoFactorState;
pub use update::{handle_overlay_key, handle_overlay_paste};

use crate::mutations::StateMutation;
use crate::theme::Palette;

/// Which overlay a reducer arm wants opened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlayRequest {
    TwoFactor,
    ForgotPassword,
}

/// Whether the overlay stays open after handling a key.
#[derive(Debug)]
pub enum OverlayTransition {
    Stay,
    Close,
}

/// What an overlay key handler produced: the transition plus any state
/// mutations the reducer should apply on the way out.
#[derive(Debug)]
pub struct OverlayUpdate {
    pub transition: OverlayTransition,
    pub mutations: Vec<StateMutation>,
}

impl OverlayUpdate {
    fn new(transition: OverlayTransition) -> Self {
        Self {
            transition,
            mutations: Vec::new(),
        }
    }

    pub fn stay() -> Self {
        Self::new(OverlayTransition::Stay)
    }

    pub fn close() -> Self {
        Self::new(OverlayTransition::Close)
    }

    #[must_use]
    pub fn with_mutations(mut self, mutations: Vec<StateMutation>) -> Self {
        self.mutations = mutations;
        self
    }
}

/// The active modal dialog.
#[derive(Debug)]
pub enum Overlay {
    TwoFactor(TwoFactorState),
    ForgotPassword(ForgotPasswordState),
}

impl Overlay {
    /// Renders the overlay and returns the popup rect it covered, so the
    /// reducer can hit-test outside clicks against it.
    pub fn render(&self, frame: &mut Frame, area: Rect, palette: &Palette) -> Rect {
        match self {
            Overlay::TwoFactor(t) => t.render(frame, area, palette),
            Overlay::ForgotPassword(f) => f.render(frame, area, palette),
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> OverlayUpdate {
        match self {
            Overlay::TwoFactor(t) => t.handle_key(key),
            Overlay::ForgotPassword(f) => f.handle_key(key),
        }
    }

    pub fn handle_paste(&mut self, text: &str) -> OverlayUpdate {
        match self {
            Overlay::TwoFactor(t) => t.handle_paste(text),
            Overlay::ForgotPassword(f) => f.handle_paste(text),
        }
    }
}

/// Render helper on `Option<Overlay>`, saving the top-level render pass
/// an unwrap-and-match of its own.
pub trait OverlayExt {
    /// Renders the overlay if one is active, returning the rect it covered.
    fn render(&self, frame: &mut Frame, area: Rect, palette: &Palette) -> Rect;
}

impl OverlayExt for Option<Overlay> {
    fn render(&self, frame: &mut Frame, area: Rect, palette: &Palette) -> Rect {
        match self {
            Some(overlay) => overlay.render(frame, area, palette),
            None => Rect::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overlay_is_some() {
        let none: Option<Overlay> = None;
        assert!(none.is_none());

        let overlay: Option<Overlay> = Some(Overlay::TwoFactor(TwoFactorState::open(6)));
        assert!(overlay.is_some());

        let overlay: Option<Overlay> =
            Some(Overlay::ForgotPassword(ForgotPasswordState::open("user@example.com")));
        assert!(overlay.is_some());
    }
}
