//! Access states and what each one renders

use dealergate_core::access::Decision;
use serde::Serialize;
use std::fmt;

/// The three states every guard moves through.
///
/// Denial is a state, not an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AccessState {
    /// Principal not yet resolved
    #[default]
    Loading,
    /// Resolved with insufficient privilege
    Denied,
    /// Resolved and allowed
    Granted,
}

impl AccessState {
    pub fn is_loading(&self) -> bool {
        matches!(self, AccessState::Loading)
    }

    pub fn is_settled(&self) -> bool {
        !self.is_loading()
    }
}

impl From<&Decision> for AccessState {
    fn from(decision: &Decision) -> Self {
        if decision.is_granted() {
            AccessState::Granted
        } else {
            AccessState::Denied
        }
    }
}

impl fmt::Display for AccessState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AccessState::Loading => write!(f, "loading"),
            AccessState::Denied => write!(f, "denied"),
            AccessState::Granted => write!(f, "granted"),
        }
    }
}

/// Output of a guard for one render pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rendered<V> {
    /// Protected children, or caller-supplied loading/fallback content
    Content(V),
    /// Default loading placeholder; the adapter picks the markup
    Spinner,
    /// Render nothing
    Nothing,
}

impl<V> Rendered<V> {
    pub fn is_nothing(&self) -> bool {
        matches!(self, Rendered::Nothing)
    }

    pub fn content(self) -> Option<V> {
        match self {
            Rendered::Content(v) => Some(v),
            _ => None,
        }
    }

    pub fn map<U>(self, f: impl FnOnce(V) -> U) -> Rendered<U> {
        match self {
            Rendered::Content(v) => Rendered::Content(f(v)),
            Rendered::Spinner => Rendered::Spinner,
            Rendered::Nothing => Rendered::Nothing,
        }
    }

    /// Collapse into content, substituting `spinner` for the placeholder.
    pub fn or_spinner(self, spinner: impl FnOnce() -> V) -> Option<V> {
        match self {
            Rendered::Content(v) => Some(v),
            Rendered::Spinner => Some(spinner()),
            Rendered::Nothing => None,
        }
    }
}
