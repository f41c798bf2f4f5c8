//! Reference resolution against a bundle.
//!
//! A reference points from one record to another, either absolutely (the
//! target is an entry identity verbatim) or relatively (a local id that must
//! be combined with a base identity, typically the `fullUrl` of the record
//! containing the reference). Resolution is a pure function of
//! (bundle, profiles, reference): no caching, no side effects.

use crate::bundle::{Bundle, Entry, Identity};
use crate::profile::{satisfies_any, Profile};

/// A pointer from one record to another.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reference {
    target: String,
    base: Option<Identity>,
}

impl Reference {
    /// A reference whose target is already a full identity.
    pub fn absolute(target: impl Into<String>) -> Self {
        Self {
            target: target.into(),
            base: None,
        }
    }

    /// A reference relative to a base identity.
    pub fn relative(target: impl Into<String>, base: Identity) -> Self {
        Self {
            target: target.into(),
            base: Some(base),
        }
    }

    /// A reference with an optional base, as read from a record field.
    pub fn new(target: impl Into<String>, base: Option<Identity>) -> Self {
        Self {
            target: target.into(),
            base,
        }
    }

    /// The raw reference string.
    pub fn target(&self) -> &str {
        &self.target
    }

    /// The base identity, when one was propagated.
    pub fn base(&self) -> Option<&Identity> {
        self.base.as_ref()
    }

    /// True when the target carries its own scheme and needs no base.
    pub fn is_absolute(&self) -> bool {
        self.target.starts_with("urn:") || self.target.contains("://")
    }

    /// Identity strings to try against the bundle, in order.
    ///
    /// Absolute targets are tried verbatim. Relative targets only exist in
    /// combination with a propagated base; without one they cannot resolve.
    /// Suffix guessing was deliberately rejected to keep resolution
    /// deterministic.
    fn lookup_keys(&self) -> Vec<String> {
        if self.is_absolute() {
            return vec![self.target.clone()];
        }
        match &self.base {
            Some(base) => vec![format!("{}/{}", base.as_str(), self.target)],
            None => Vec::new(),
        }
    }
}

/// Resolves a reference to an entry whose record satisfies the profile
/// filter.
///
/// Candidate keys are tried in order; within one key, entries are scanned in
/// bundle order and the first entry passing the filter wins (identity
/// uniqueness makes multiple matches unexpected; taking the first is the
/// defined tie-break, not an error). Returns `None` when nothing matches —
/// callers substitute a placeholder, they do not treat this as failure.
pub fn resolve<'a>(
    bundle: &'a Bundle,
    profiles: &[Profile],
    reference: &Reference,
) -> Option<&'a Entry> {
    for key in reference.lookup_keys() {
        let found = bundle
            .entries()
            .iter()
            .find(|entry| entry.full_url.as_str() == key && satisfies_any(profiles, &entry.resource));
        if found.is_some() {
            return found;
        }
    }
    None
}

/// Every entry whose record satisfies at least one of the profiles, in
/// bundle order.
pub fn resolve_all<'a>(bundle: &'a Bundle, profiles: &[Profile]) -> Vec<&'a Entry> {
    bundle
        .entries()
        .iter()
        .filter(|entry| satisfies_any(profiles, &entry.resource))
        .collect()
}

/// The first entry satisfying any of the profiles, in bundle order.
pub fn resolve_first<'a>(bundle: &'a Bundle, profiles: &[Profile]) -> Option<&'a Entry> {
    bundle
        .entries()
        .iter()
        .find(|entry| satisfies_any(profiles, &entry.resource))
}
