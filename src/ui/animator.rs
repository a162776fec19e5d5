use std::collections::HashMap;
use std::time::Instant;

use crate::animation::{Animator, Pulse, PulseTarget};

/// Keeps running pulses until they finish. Scales are sampled on redraw.
#[derive(Debug, Default)]
pub struct TerminalAnimator {
    running: HashMap<PulseTarget, (Instant, Pulse)>,
}

impl TerminalAnimator {
    pub fn scale_of(&self, target: PulseTarget, now: Instant) -> Option<f64> {
        self.running
            .get(&target)
            .and_then(|(start, pulse)| pulse.scale_at(now.saturating_duration_since(*start)))
    }

    /// Drops finished pulses.
    pub fn prune(&mut self, now: Instant) {
        self.running.retain(|_, (start, pulse)| {
            pulse
                .scale_at(now.saturating_duration_since(*start))
                .is_some()
        });
    }

    pub fn is_idle(&self) -> bool {
        self.running.is_empty()
    }
}

impl Animator for TerminalAnimator {
    fn pulse(&mut self, target: PulseTarget, pulse: Pulse) {
        // restarting a running pulse replaces it
        self.running.insert(target, (Instant::now(), pulse));
    }
}
