//! Presentation layer abstraction
//!
//! The flows render through this trait only, so the core stays independent
//! of any concrete UI. The shipped binary uses the terminal presenter; tests
//! use the recording presenter.

pub mod mock;
pub mod terminal;

pub use mock::RecordingPresenter;
pub use terminal::TerminalPresenter;

use crate::models::ImageArtifact;

/// Output region a command targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Region {
    Original,
    Edited,
}

/// User-facing trigger whose enablement the flows control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Generate,
    Edit,
}

/// Rendering commands the flows may issue.
///
/// Ordering contract within a region: `render_image` inserts at the top,
/// `render_text` appends at the bottom, `render_loading` and `render_error`
/// replace the region's content wholesale.
pub trait Presenter: Send {
    fn render_loading(&mut self, region: Region);
    fn render_image(&mut self, region: Region, artifact: &ImageArtifact, caption: &str);
    fn render_text(&mut self, region: Region, text: &str);
    fn render_error(&mut self, region: Region, message: &str);
    /// Validation warning, not tied to a region.
    fn render_warning(&mut self, message: &str);
    fn clear(&mut self, region: Region);
    fn set_control_enabled(&mut self, control: Control, enabled: bool);
    /// Announces that `artifact` can be saved under `prefix`; repeated calls
    /// for the same region replace the previous offer.
    fn expose_save_action(&mut self, region: Region, artifact: &ImageArtifact, prefix: &str);
}
