use super::{Control, Presenter, Region};
use crate::models::ImageArtifact;

/// Line-oriented presenter for the REPL front-end. Regions map to labelled
/// stdout lines; image bytes are summarized rather than drawn.
#[derive(Debug, Default)]
pub struct TerminalPresenter;

impl TerminalPresenter {
    pub fn new() -> Self {
        Self
    }

    fn label(region: Region) -> &'static str {
        match region {
            Region::Original => "original",
            Region::Edited => "edited",
        }
    }

    fn save_command(region: Region) -> &'static str {
        match region {
            Region::Original => "save original",
            Region::Edited => "save edited",
        }
    }
}

impl Presenter for TerminalPresenter {
    fn render_loading(&mut self, region: Region) {
        println!("[{}] working...", Self::label(region));
    }

    fn render_image(&mut self, region: Region, artifact: &ImageArtifact, caption: &str) {
        if caption.is_empty() {
            println!(
                "[{}] image ready ({} bytes, {})",
                Self::label(region),
                artifact.data.len(),
                artifact.mime_type
            );
        } else {
            println!(
                "[{}] image ready ({} bytes, {}): {}",
                Self::label(region),
                artifact.data.len(),
                artifact.mime_type,
                caption
            );
        }
    }

    fn render_text(&mut self, region: Region, text: &str) {
        println!("[{}] {}", Self::label(region), text);
    }

    fn render_error(&mut self, region: Region, message: &str) {
        println!("[{}] error: {}", Self::label(region), message);
    }

    fn render_warning(&mut self, message: &str) {
        println!("! {}", message);
    }

    fn clear(&mut self, _region: Region) {
        // Nothing to erase on an append-only terminal.
    }

    fn set_control_enabled(&mut self, control: Control, enabled: bool) {
        // The REPL has no buttons to grey out; surface transitions for
        // debugging only.
        tracing::debug!(?control, enabled, "control enablement changed");
    }

    fn expose_save_action(&mut self, region: Region, artifact: &ImageArtifact, _prefix: &str) {
        println!(
            "[{}] type '{}' to write the {} image to disk",
            Self::label(region),
            Self::save_command(region),
            artifact.mime_type
        );
    }
}
