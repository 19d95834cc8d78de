//! Enablement gates for the generate and edit triggers.
//!
//! Each trigger is a two-state machine (idle/loading) plus an enablement
//! flag. A plain boolean is not enough: when a generation starts it must
//! disable the edit trigger even if the edit flow is mid-flight or already
//! enabled, and the edit trigger may only re-enable after its flow finishes
//! if an original image still exists. The force-override is therefore an
//! explicit operation rather than something inferred from phase.

/// Whether the gated flow is currently in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Loading,
}

#[derive(Debug)]
pub struct ControlGate {
    phase: Phase,
    enabled: bool,
}

impl ControlGate {
    pub fn new(enabled: bool) -> Self {
        Self {
            phase: Phase::Idle,
            enabled,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Whether the trigger may currently be fired.
    pub fn is_enabled(&self) -> bool {
        self.enabled && self.phase == Phase::Idle
    }

    /// Idle and enabled -> loading, disabling the trigger for the duration.
    /// Returns false (and changes nothing) if the gate refused the
    /// transition; refusal is the sole concurrency control for a flow.
    pub fn begin(&mut self) -> bool {
        if self.phase != Phase::Idle || !self.enabled {
            return false;
        }
        self.phase = Phase::Loading;
        self.enabled = false;
        true
    }

    /// Loading -> idle. The trigger re-enables only when `allow_enable`
    /// holds; the edit gate passes whether an original image still exists.
    pub fn finish(&mut self, allow_enable: bool) {
        self.phase = Phase::Idle;
        self.enabled = allow_enable;
    }

    /// Unconditionally disables the trigger, whatever the phase. Used by the
    /// generate flow at start to lock out edits, even mid-flight ones.
    pub fn force_disable(&mut self) {
        self.enabled = false;
    }

    /// Re-enables an idle trigger. No effect while loading; the pending
    /// `finish` decides enablement then.
    pub fn enable(&mut self) {
        if self.phase == Phase::Idle {
            self.enabled = true;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_begin_requires_idle_and_enabled() {
        let mut gate = ControlGate::new(true);
        assert!(gate.begin());
        assert_eq!(gate.phase(), Phase::Loading);
        assert!(!gate.is_enabled());
        // Re-entry while loading is refused
        assert!(!gate.begin());

        let mut disabled = ControlGate::new(false);
        assert!(!disabled.begin());
        assert_eq!(disabled.phase(), Phase::Idle);
    }

    #[test]
    fn test_finish_restores_idle_and_conditions_enablement() {
        let mut gate = ControlGate::new(true);
        gate.begin();

        gate.finish(true);
        assert_eq!(gate.phase(), Phase::Idle);
        assert!(gate.is_enabled());

        gate.begin();
        gate.finish(false);
        assert_eq!(gate.phase(), Phase::Idle);
        assert!(!gate.is_enabled());
    }

    #[test]
    fn test_force_disable_overrides_enabled_idle_gate() {
        let mut gate = ControlGate::new(true);
        gate.force_disable();
        assert!(!gate.is_enabled());
        assert_eq!(gate.phase(), Phase::Idle);
    }

    #[test]
    fn test_force_disable_while_loading_then_conditional_finish() {
        // Generation starting while an edit is mid-flight: the edit gate is
        // force-disabled, and its completion must not silently re-enable it
        // when the original image is gone.
        let mut gate = ControlGate::new(true);
        gate.begin();
        gate.force_disable();

        gate.finish(false);
        assert!(!gate.is_enabled());
    }

    #[test]
    fn test_enable_is_a_noop_while_loading() {
        let mut gate = ControlGate::new(true);
        gate.begin();
        gate.enable();
        assert!(!gate.is_enabled());
        assert_eq!(gate.phase(), Phase::Loading);
    }

    #[test]
    fn test_enable_after_disable() {
        let mut gate = ControlGate::new(false);
        gate.enable();
        assert!(gate.is_enabled());
    }
}
