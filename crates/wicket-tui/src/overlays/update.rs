//! Overlay key handling and update logic.

use crossterm::event::KeyEvent;

use super::{Overlay, OverlayUpdate};

/// Routes a key press to the active overlay, if any.
///
/// Returns `None` when no overlay is open, so the caller can fall
/// through to the global and form handlers.
pub fn handle_overlay_key(overlay: &mut Option<Overlay>, key: KeyEvent) -> Option<OverlayUpdate> {
    overlay.as_mut().map(|active| active.handle_key(key))
}

/// Routes pasted text to the active overlay, if any.
pub fn handle_overlay_paste(overlay: &mut Option<Overlay>, text: &str) -> Option<OverlayUpdate> {
    overlay.as_mut().map(|active| active.handle_paste(text))
}

#[cfg(test)]
mod tests {
    use crossterm::event::{KeyCode, KeyModifiers};

    use super::*;
    use crate::overlays::{OverlayTransition, TwoFactorState};

    #[test]
    fn test_no_overlay_returns_none() {
        let mut overlay: Option<Overlay> = None;
        let key = KeyEvent::new(KeyCode::Char('1'), KeyModifiers::NONE);
        assert!(handle_overlay_key(&mut overlay, key).is_none());
    }

    #[test]
    fn test_open_overlay_receives_key() {
        let mut overlay = Some(Overlay::TwoFactor(TwoFactorState::open(6)));
        let key = KeyEvent::new(KeyCode::Char('1'), KeyModifiers::NONE);

        let update = handle_overlay_key(&mut overlay, key);
        assert!(matches!(
            update,
            Some(OverlayUpdate {
                transition: OverlayTransition::Stay,
                ..
            })
        ));

        let Some(Overlay::TwoFactor(state)) = &overlay else {
            panic!("overlay should still be open");
        };
        assert_eq!(state.cells[0], Some('1'));
    }

    #[test]
    fn test_paste_reaches_overlay() {
        let mut overlay = Some(Overlay::TwoFactor(TwoFactorState::open(4)));
        handle_overlay_paste(&mut overlay, "9876");

        let Some(Overlay::TwoFactor(state)) = &overlay else {
            panic!("overlay should still be open");
        };
        assert_eq!(
            state.cells,
            vec![Some('9'), Some('8'), Some('7'), Some('6')]
        );
    }
}
