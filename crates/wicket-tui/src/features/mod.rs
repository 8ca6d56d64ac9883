//! Feature slices for the TUI (state/update/render per slice).

pub mod form;
