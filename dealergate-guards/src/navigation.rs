//! Navigation service used by redirect guards

use dealergate_core::redirect::RedirectTarget;
use parking_lot::Mutex;

/// Replaces the current location with a target route.
pub trait Navigator: Send + Sync {
    fn replace(&self, target: &RedirectTarget);
}

impl<F> Navigator for F
where
    F: Fn(&RedirectTarget) + Send + Sync,
{
    fn replace(&self, target: &RedirectTarget) {
        self(target)
    }
}

/// Navigator that records targets instead of navigating.
///
/// Server-rendered pages use it to collect the redirect and answer with a
/// `Location` header after rendering.
#[derive(Debug, Default)]
pub struct RecordingNavigator {
    history: Mutex<Vec<RedirectTarget>>,
}

impl RecordingNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every target replaced so far, oldest first
    pub fn history(&self) -> Vec<RedirectTarget> {
        self.history.lock().clone()
    }

    /// Most recent target
    pub fn last(&self) -> Option<RedirectTarget> {
        self.history.lock().last().cloned()
    }

    pub fn count(&self) -> usize {
        self.history.lock().len()
    }
}

impl Navigator for RecordingNavigator {
    fn replace(&self, target: &RedirectTarget) {
        self.history.lock().push(target.clone());
    }
}
