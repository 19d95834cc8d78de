//! Prompt-to-image studio - generate an image from a text prompt, then
//! refine it with a follow-up edit instruction against a hosted model.
//!
//! The core is a pair of dependent flows (generate, then edit) over a shared
//! in-memory session, fronted by a presentation trait so any UI can drive it.

pub mod ai;
pub mod app;
pub mod download;
pub mod error;
pub mod gate;
pub mod models;
pub mod session;
pub mod ui;

pub use error::{Error, Result};
