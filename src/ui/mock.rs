use super::{Control, Presenter, Region};
use crate::models::ImageArtifact;
use std::sync::{Arc, Mutex};

/// One rendered entry within a region, in display order (top first).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegionEntry {
    Loading,
    Image { artifact: ImageArtifact, caption: String },
    Text(String),
    Error(String),
}

/// Non-region event observed by the presenter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PresenterEvent {
    Warning(String),
    ControlEnabled(Control, bool),
    SaveExposed {
        region: Region,
        artifact: ImageArtifact,
        prefix: String,
    },
}

#[derive(Debug, Default)]
struct Recorded {
    original: Vec<RegionEntry>,
    edited: Vec<RegionEntry>,
    events: Vec<PresenterEvent>,
}

impl Recorded {
    fn region_mut(&mut self, region: Region) -> &mut Vec<RegionEntry> {
        match region {
            Region::Original => &mut self.original,
            Region::Edited => &mut self.edited,
        }
    }
}

/// Presenter that records every command for assertions. Clones share the
/// same recording, so tests keep a probe while the app owns the presenter.
#[derive(Clone, Default)]
pub struct RecordingPresenter {
    recorded: Arc<Mutex<Recorded>>,
}

impl RecordingPresenter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn region_content(&self, region: Region) -> Vec<RegionEntry> {
        let recorded = self.recorded.lock().unwrap();
        match region {
            Region::Original => recorded.original.clone(),
            Region::Edited => recorded.edited.clone(),
        }
    }

    pub fn events(&self) -> Vec<PresenterEvent> {
        self.recorded.lock().unwrap().events.clone()
    }

    pub fn warnings(&self) -> Vec<String> {
        self.events()
            .into_iter()
            .filter_map(|event| match event {
                PresenterEvent::Warning(message) => Some(message),
                _ => None,
            })
            .collect()
    }

    /// The most recent enablement command for `control`, if any.
    pub fn last_enablement(&self, control: Control) -> Option<bool> {
        self.events()
            .into_iter()
            .rev()
            .find_map(|event| match event {
                PresenterEvent::ControlEnabled(c, enabled) if c == control => Some(enabled),
                _ => None,
            })
    }

    pub fn exposed_saves(&self, region: Region) -> Vec<(ImageArtifact, String)> {
        self.events()
            .into_iter()
            .filter_map(|event| match event {
                PresenterEvent::SaveExposed {
                    region: r,
                    artifact,
                    prefix,
                } if r == region => Some((artifact, prefix)),
                _ => None,
            })
            .collect()
    }
}

impl Presenter for RecordingPresenter {
    fn render_loading(&mut self, region: Region) {
        let mut recorded = self.recorded.lock().unwrap();
        let content = recorded.region_mut(region);
        content.clear();
        content.push(RegionEntry::Loading);
    }

    fn render_image(&mut self, region: Region, artifact: &ImageArtifact, caption: &str) {
        let mut recorded = self.recorded.lock().unwrap();
        recorded.region_mut(region).insert(
            0,
            RegionEntry::Image {
                artifact: artifact.clone(),
                caption: caption.to_string(),
            },
        );
    }

    fn render_text(&mut self, region: Region, text: &str) {
        let mut recorded = self.recorded.lock().unwrap();
        recorded
            .region_mut(region)
            .push(RegionEntry::Text(text.to_string()));
    }

    fn render_error(&mut self, region: Region, message: &str) {
        let mut recorded = self.recorded.lock().unwrap();
        let content = recorded.region_mut(region);
        content.clear();
        content.push(RegionEntry::Error(message.to_string()));
    }

    fn render_warning(&mut self, message: &str) {
        self.recorded
            .lock()
            .unwrap()
            .events
            .push(PresenterEvent::Warning(message.to_string()));
    }

    fn clear(&mut self, region: Region) {
        self.recorded.lock().unwrap().region_mut(region).clear();
    }

    fn set_control_enabled(&mut self, control: Control, enabled: bool) {
        self.recorded
            .lock()
            .unwrap()
            .events
            .push(PresenterEvent::ControlEnabled(control, enabled));
    }

    fn expose_save_action(&mut self, region: Region, artifact: &ImageArtifact, prefix: &str) {
        self.recorded
            .lock()
            .unwrap()
            .events
            .push(PresenterEvent::SaveExposed {
                region,
                artifact: artifact.clone(),
                prefix: prefix.to_string(),
            });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn artifact(byte: u8) -> ImageArtifact {
        ImageArtifact::new(vec![byte], "image/png")
    }

    #[test]
    fn test_images_insert_above_text() {
        let probe = RecordingPresenter::new();
        let mut presenter = probe.clone();

        presenter.render_text(Region::Edited, "A");
        presenter.render_image(Region::Edited, &artifact(1), "");
        presenter.render_text(Region::Edited, "B");
        presenter.render_image(Region::Edited, &artifact(2), "");

        let content = probe.region_content(Region::Edited);
        assert!(matches!(content[0], RegionEntry::Image { .. }));
        assert!(matches!(content[1], RegionEntry::Image { .. }));
        assert_eq!(content[2], RegionEntry::Text("A".to_string()));
        assert_eq!(content[3], RegionEntry::Text("B".to_string()));
    }

    #[test]
    fn test_error_replaces_region_content() {
        let probe = RecordingPresenter::new();
        let mut presenter = probe.clone();

        presenter.render_text(Region::Edited, "partial");
        presenter.render_error(Region::Edited, "it broke");

        assert_eq!(
            probe.region_content(Region::Edited),
            vec![RegionEntry::Error("it broke".to_string())]
        );
    }

    #[test]
    fn test_loading_replaces_region_content() {
        let probe = RecordingPresenter::new();
        let mut presenter = probe.clone();

        presenter.render_image(Region::Original, &artifact(1), "old");
        presenter.render_loading(Region::Original);

        assert_eq!(
            probe.region_content(Region::Original),
            vec![RegionEntry::Loading]
        );
    }

    #[test]
    fn test_last_enablement_reflects_latest_command() {
        let probe = RecordingPresenter::new();
        let mut presenter = probe.clone();

        assert_eq!(probe.last_enablement(Control::Edit), None);
        presenter.set_control_enabled(Control::Edit, true);
        presenter.set_control_enabled(Control::Edit, false);
        presenter.set_control_enabled(Control::Generate, true);

        assert_eq!(probe.last_enablement(Control::Edit), Some(false));
        assert_eq!(probe.last_enablement(Control::Generate), Some(true));
    }
}
