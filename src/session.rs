//! In-memory session state shared by the generate and edit flows.

use crate::models::ImageArtifact;

/// Two independent slots holding the most recent results.
///
/// `original` is written only by the generate flow; `edited` only by the
/// edit flow. Both are cleared when a new generation starts so `edited` can
/// never outlive the original it was derived from.
#[derive(Debug, Default)]
pub struct SessionState {
    original: Option<ImageArtifact>,
    edited: Option<ImageArtifact>,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn original(&self) -> Option<&ImageArtifact> {
        self.original.as_ref()
    }

    pub fn edited(&self) -> Option<&ImageArtifact> {
        self.edited.as_ref()
    }

    pub fn set_original(&mut self, artifact: ImageArtifact) {
        self.original = Some(artifact);
    }

    pub fn set_edited(&mut self, artifact: ImageArtifact) {
        self.edited = Some(artifact);
    }

    pub fn clear_edited(&mut self) {
        self.edited = None;
    }

    /// Clears both slots; a stale edit must not survive a regeneration.
    pub fn clear(&mut self) {
        self.original = None;
        self.edited = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn artifact(byte: u8) -> ImageArtifact {
        ImageArtifact::new(vec![byte], "image/png")
    }

    #[test]
    fn test_slots_start_empty() {
        let session = SessionState::new();
        assert!(session.original().is_none());
        assert!(session.edited().is_none());
    }

    #[test]
    fn test_clear_discards_both_slots() {
        let mut session = SessionState::new();
        session.set_original(artifact(1));
        session.set_edited(artifact(2));

        session.clear();
        assert!(session.original().is_none());
        assert!(session.edited().is_none());
    }

    #[test]
    fn test_clear_edited_keeps_original() {
        let mut session = SessionState::new();
        session.set_original(artifact(1));
        session.set_edited(artifact(2));

        session.clear_edited();
        assert_eq!(session.original(), Some(&artifact(1)));
        assert!(session.edited().is_none());
    }

    #[test]
    fn test_set_replaces_wholesale() {
        let mut session = SessionState::new();
        session.set_original(artifact(1));
        session.set_original(artifact(3));
        assert_eq!(session.original(), Some(&artifact(3)));
    }
}
