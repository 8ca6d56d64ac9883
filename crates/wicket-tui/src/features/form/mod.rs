//! Sign-in form feature (state, key handling, view).

pub mod editor;
pub mod render;
pub mod state;
pub mod update;

pub use editor::LineEditor;
pub use render::render_card;
pub use state::{Field, FormState};
pub use update::{FormContext, KeyResult, handle_form_key, handle_form_paste};
