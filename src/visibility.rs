//! Surface visibility tracking.
//!
//! The platform reports occlusion asynchronously (winit's
//! `WindowEvent::Occluded`), so [`VisibilityChecker::is_visible`] reflects
//! the most recent callback rather than a synchronous recomputation — there
//! is an inherent one-callback latency between an actual visibility change
//! and the observed value.

/// Latest-observed visibility of the render surface.
pub struct VisibilityChecker {
    visible: bool,
    detached: bool,
}

impl Default for VisibilityChecker {
    fn default() -> Self {
        Self::new()
    }
}

impl VisibilityChecker {
    /// Start observing. The surface is assumed visible until the platform
    /// reports otherwise.
    #[must_use]
    pub fn new() -> Self {
        Self {
            visible: true,
            detached: false,
        }
    }

    /// Record a platform occlusion callback. Ignored after [`cleanup`].
    ///
    /// [`cleanup`]: Self::cleanup
    pub fn observe_occluded(&mut self, occluded: bool) {
        if self.detached {
            return;
        }
        if self.visible != !occluded {
            log::debug!("surface visibility changed: visible={}", !occluded);
        }
        self.visible = !occluded;
    }

    /// The most recently observed visibility state.
    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Detach from the observation source. Idempotent: a second call is a
    /// no-op.
    pub fn cleanup(&mut self) {
        self.detached = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initially_visible() {
        assert!(VisibilityChecker::new().is_visible());
    }

    #[test]
    fn test_reflects_latest_observation() {
        let mut vis = VisibilityChecker::new();
        vis.observe_occluded(true);
        assert!(!vis.is_visible());
        vis.observe_occluded(false);
        assert!(vis.is_visible());
    }

    #[test]
    fn test_cleanup_detaches_and_is_idempotent() {
        let mut vis = VisibilityChecker::new();
        vis.observe_occluded(true);
        vis.cleanup();
        vis.cleanup();
        vis.observe_occluded(false);
        assert!(!vis.is_visible(), "observation after cleanup applied");
    }
}
