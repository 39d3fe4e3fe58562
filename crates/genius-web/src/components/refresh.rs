use genius_chat::{AfterAttempt, AttemptOutcome};
use leptos::prelude::*;

/// Page-level refresh signal, provided through context by [`App`](crate::App).
///
/// Bumped after every generation attempt. The code page has no server-backed
/// resources yet; one added later (a usage quota, say) subscribes by reading
/// [`generation`](PageRefresh::generation) in its source closure.
#[derive(Clone, Copy)]
pub struct PageRefresh {
    generation: RwSignal<u64>,
}

impl PageRefresh {
    pub fn new() -> Self {
        Self {
            generation: RwSignal::new(0),
        }
    }

    /// The refresh from context, or a detached one when rendered outside `App`.
    pub fn from_context() -> Self {
        use_context::<Self>().unwrap_or_else(Self::new)
    }

    pub fn refresh(&self) {
        self.generation.update(|g| *g += 1);
    }

    /// Tracked read of the attempt counter.
    pub fn generation(&self) -> u64 {
        self.generation.get()
    }
}

impl Default for PageRefresh {
    fn default() -> Self {
        Self::new()
    }
}

impl AfterAttempt for PageRefresh {
    fn after_attempt(&self, outcome: &AttemptOutcome) {
        tracing::debug!(success = outcome.is_success(), "refreshing page data");
        self.refresh();
    }
}
