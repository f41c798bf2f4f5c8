//! Bundle and entry model.
//!
//! A bundle is the full in-memory collection of cross-referenced records
//! under display. It is immutable for the lifetime of a resolution pass and
//! indexed by entry identity (`fullUrl`), which is unique within a bundle.
//!
//! Parsing is permissive about unknown fields (the input is foreign,
//! externally validated data, not one of our own on-disk formats), strict
//! about the two invariants the engine relies on: every kept entry has an
//! identity and a resource, and identities do not repeat.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::resource::Resource;
use crate::{FhirError, FhirResult};

/// An entry identity: the `fullUrl` under which a record lives in a bundle.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Identity(String);

impl Identity {
    /// Creates an identity from its string form.
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// The identity as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True for `urn:uuid:` identities carrying a well-formed UUID.
    pub fn is_urn_uuid(&self) -> bool {
        self.0
            .strip_prefix("urn:uuid:")
            .is_some_and(|rest| uuid::Uuid::parse_str(rest).is_ok())
    }
}

impl std::fmt::Display for Identity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for Identity {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// An (identity, record) pair inside a bundle.
#[derive(Debug, Clone, PartialEq)]
pub struct Entry {
    /// Identity under which the record lives in the bundle.
    pub full_url: Identity,

    /// The record payload.
    pub resource: Resource,
}

/// An immutable collection of entries with unique identities.
#[derive(Debug, Clone)]
pub struct Bundle {
    identifier: Option<String>,
    entries: Vec<Entry>,
    index: HashMap<Identity, usize>,
}

impl Bundle {
    /// Builds a bundle from already-parsed entries.
    ///
    /// # Errors
    ///
    /// Returns [`FhirError::DuplicateIdentity`] when two entries share a
    /// `fullUrl`.
    pub fn new(identifier: Option<String>, entries: Vec<Entry>) -> FhirResult<Self> {
        let mut index = HashMap::with_capacity(entries.len());
        for (position, entry) in entries.iter().enumerate() {
            if index.insert(entry.full_url.clone(), position).is_some() {
                return Err(FhirError::DuplicateIdentity(
                    entry.full_url.as_str().to_owned(),
                ));
            }
        }
        Ok(Self {
            identifier,
            entries,
            index,
        })
    }

    /// Parses a bundle from JSON text.
    ///
    /// This uses `serde_path_to_error` to surface a best-effort "path"
    /// (e.g. `entry[3].fullUrl`) to the failing field when the JSON does not
    /// match the wire schema.
    ///
    /// # Errors
    ///
    /// Returns [`FhirError`] if:
    /// - the JSON is malformed or not a `Bundle`,
    /// - two entries share a `fullUrl`.
    ///
    /// Entries without a `fullUrl` or without a resource are logged and
    /// skipped rather than failing the parse.
    pub fn from_json_str(json_text: &str) -> FhirResult<Self> {
        let mut deserializer = serde_json::Deserializer::from_str(json_text);
        let wire = match serde_path_to_error::deserialize::<_, BundleWire>(&mut deserializer) {
            Ok(parsed) => parsed,
            Err(err) => return Err(schema_error(err)),
        };
        wire_to_bundle(wire)
    }

    /// Parses a bundle from an already-decoded JSON value.
    ///
    /// Same contract as [`Bundle::from_json_str`].
    pub fn from_json(json: Value) -> FhirResult<Self> {
        let wire = match serde_path_to_error::deserialize::<_, BundleWire>(json) {
            Ok(parsed) => parsed,
            Err(err) => return Err(schema_error(err)),
        };
        wire_to_bundle(wire)
    }

    /// The bundle identifier, when the source carried one.
    pub fn identifier(&self) -> Option<&str> {
        self.identifier.as_deref()
    }

    /// All entries in source order.
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when the bundle holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Looks up an entry by its exact identity.
    pub fn entry_by_identity(&self, identity: &str) -> Option<&Entry> {
        self.index
            .get(&Identity::new(identity))
            .map(|position| &self.entries[*position])
    }
}

// ============================================================================
// Wire types (internal)
// ============================================================================

/// Wire representation of a bundle.
///
/// Unknown fields are intentionally tolerated; the engine only consumes the
/// identifier and the entry list.
#[derive(Debug, Deserialize)]
struct BundleWire {
    #[serde(rename = "resourceType")]
    resource_type: Option<String>,

    #[serde(default)]
    identifier: Option<IdentifierWire>,

    #[serde(default)]
    entry: Vec<EntryWire>,
}

#[derive(Debug, Deserialize)]
struct IdentifierWire {
    #[serde(default)]
    value: Option<String>,
}

#[derive(Debug, Deserialize)]
struct EntryWire {
    #[serde(rename = "fullUrl")]
    full_url: Option<String>,

    #[serde(default)]
    resource: Option<Value>,
}

fn schema_error(err: serde_path_to_error::Error<serde_json::Error>) -> FhirError {
    let path = err.path().to_string();
    let path = if path.is_empty() {
        "<root>".to_owned()
    } else {
        path
    };
    FhirError::Schema {
        path,
        source: err.into_inner(),
    }
}

fn wire_to_bundle(wire: BundleWire) -> FhirResult<Bundle> {
    match wire.resource_type.as_deref() {
        Some("Bundle") => {}
        Some(other) => {
            return Err(FhirError::InvalidInput(format!(
                "Expected resourceType 'Bundle', got '{other}'"
            )));
        }
        None => {
            return Err(FhirError::InvalidInput(
                "Missing resourceType on bundle input".to_owned(),
            ));
        }
    }

    let mut entries = Vec::with_capacity(wire.entry.len());
    for (position, entry) in wire.entry.into_iter().enumerate() {
        let (Some(full_url), Some(resource)) = (entry.full_url, entry.resource) else {
            tracing::warn!("skipping bundle entry {position}: missing fullUrl or resource");
            continue;
        };
        entries.push(Entry {
            full_url: Identity::new(full_url),
            resource: Resource::from_json(resource),
        });
    }

    Bundle::new(wire.identifier.and_then(|id| id.value), entries)
}
