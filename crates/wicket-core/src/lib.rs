//! Core wicket library (config, validation, strength scoring, mock auth).

pub mod auth;
pub mod config;
pub mod strength;
pub mod validate;
