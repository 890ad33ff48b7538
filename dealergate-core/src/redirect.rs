//! Redirect targets for denied navigation
//!
//! Only same-origin absolute paths are accepted, so a configured or
//! caller-supplied target can never send a user to another host.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use url::Url;

/// Route used when a guard is not given an explicit target.
pub const DEFAULT_REDIRECT: &str = "/dashboard";

const ORIGIN_PROBE: &str = "http://dealergate.invalid/";

/// A validated same-origin path such as `/dashboard` or `/dealers/D1?tab=claims`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RedirectTarget(String);

impl RedirectTarget {
    /// Validate a redirect target.
    pub fn parse(target: &str) -> Result<Self> {
        let reject = |reason| Error::InvalidRedirect {
            target: target.to_string(),
            reason,
        };

        if !target.starts_with('/') {
            return Err(reject("must be an absolute path"));
        }
        if target.starts_with("//") {
            return Err(reject("protocol-relative URLs are not allowed"));
        }
        if target.contains('\\') {
            return Err(reject("backslashes are not allowed"));
        }
        if target.chars().any(char::is_control) {
            return Err(reject("control characters are not allowed"));
        }

        // Resolve against a fixed origin and make sure we never leave it.
        let base = Url::parse(ORIGIN_PROBE).map_err(|_| reject("invalid origin probe"))?;
        let resolved = base.join(target).map_err(|_| reject("not a valid path"))?;
        if resolved.origin() != base.origin() {
            return Err(reject("target leaves the portal origin"));
        }

        Ok(Self(target.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for RedirectTarget {
    fn default() -> Self {
        Self(DEFAULT_REDIRECT.to_string())
    }
}

impl TryFrom<String> for RedirectTarget {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        Self::parse(&value)
    }
}

impl From<RedirectTarget> for String {
    fn from(target: RedirectTarget) -> Self {
        target.0
    }
}

impl fmt::Display for RedirectTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
