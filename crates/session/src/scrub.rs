//! Drag-to-adjust ("scrub") capture for numeric editor fields.
//!
//! A scrub is a nested, short-lived capture layered on top of (and fully
//! independent from) the inspection session: pointer-down on a field's
//! label begins it, every move maps horizontal travel to a value, and
//! pointer-up ends it. The embedder installs its temporary move/up
//! listeners for the duration and must call [`ScrubSession::finish`] from
//! the up handler even when the pointer is released outside the original
//! target; `finish` is idempotent so a defensive second call is harmless.

use loupe_dom::Document;

/// Horizontal pixels of travel per value step.
const PIXELS_PER_STEP: f32 = 2.0;

/// One active drag-to-adjust capture.
#[derive(Debug)]
pub struct ScrubSession {
    start_x: f32,
    start_value: f32,
    step: f32,
    active: bool,
}

impl ScrubSession {
    /// Begin a capture at pointer position `x`, adjusting from
    /// `start_value` in increments of `step`. Sets the horizontal-resize
    /// cursor and disables text selection on the body for the duration.
    pub fn begin(doc: &mut Document, x: f32, start_value: f32, step: f32) -> Self {
        if let Some(body) = doc.body() {
            doc.set_inline(body, "cursor", "ew-resize");
            doc.set_inline(body, "user-select", "none");
        }
        Self {
            start_x: x,
            start_value,
            step,
            active: true,
        }
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// The value for the current pointer position: one step per two pixels
    /// of travel, rounded to two decimals so stepping by 0.1 does not
    /// accumulate float noise.
    pub fn value_at(&self, x: f32) -> f32 {
        let delta = x - self.start_x;
        let raw = self.start_value + (delta / PIXELS_PER_STEP).round() * self.step;
        (raw * 100.0).round() / 100.0
    }

    /// End the capture and restore cursor and selection state. Idempotent:
    /// only the first call touches the document.
    pub fn finish(&mut self, doc: &mut Document) {
        if !self.active {
            return;
        }
        self.active = false;
        if let Some(body) = doc.body() {
            doc.clear_inline(body, "cursor");
            doc.clear_inline(body, "user-select");
        }
    }
}
