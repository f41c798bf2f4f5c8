//! Shared validated value types for the medview workspace.
//!
//! Display-facing crates agree on two conventions that live here:
//! - missing or unresolvable values render as [`VALUE_PLACEHOLDER`], never as
//!   an empty string,
//! - clinical dates render in `DD.MM.YYYY` form.

use chrono::NaiveDate;

/// Placeholder shown for a missing or unresolvable display value.
pub const VALUE_PLACEHOLDER: &str = "-";

/// Errors that can occur when creating validated text types.
#[derive(Debug, thiserror::Error)]
pub enum TextError {
    /// The input text was empty or contained only whitespace
    #[error("Text cannot be empty")]
    Empty,
}

/// A string type that guarantees non-empty content.
///
/// Wraps a `String` and ensures it contains at least one non-whitespace
/// character. Input is trimmed of leading and trailing whitespace during
/// construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NonEmptyText(String);

impl NonEmptyText {
    /// Creates a new `NonEmptyText` from the given input.
    ///
    /// The input is trimmed; if the trimmed result is empty,
    /// `TextError::Empty` is returned.
    pub fn new(input: impl AsRef<str>) -> Result<Self, TextError> {
        let trimmed = input.as_ref().trim();
        if trimmed.is_empty() {
            return Err(TextError::Empty);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the inner string as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for NonEmptyText {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for NonEmptyText {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl serde::Serialize for NonEmptyText {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> serde::Deserialize<'de> for NonEmptyText {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        NonEmptyText::new(&s).map_err(serde::de::Error::custom)
    }
}

/// A display value that degrades to [`VALUE_PLACEHOLDER`] when absent.
///
/// View construction never produces empty display strings; anything that
/// failed to resolve, parse, or translate becomes `DisplayText::missing()`
/// and renders as "-".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayText(Option<String>);

impl DisplayText {
    /// A present display value. Blank input degrades to missing.
    pub fn text(input: impl AsRef<str>) -> Self {
        match NonEmptyText::new(input) {
            Ok(t) => Self(Some(t.as_str().to_owned())),
            Err(_) => Self(None),
        }
    }

    /// The missing value; renders as the placeholder.
    pub fn missing() -> Self {
        Self(None)
    }

    /// True when no value is present.
    pub fn is_missing(&self) -> bool {
        self.0.is_none()
    }

    /// The display string, placeholder included.
    pub fn as_display(&self) -> &str {
        self.0.as_deref().unwrap_or(VALUE_PLACEHOLDER)
    }
}

impl From<Option<String>> for DisplayText {
    fn from(value: Option<String>) -> Self {
        match value {
            Some(s) => Self::text(s),
            None => Self::missing(),
        }
    }
}

impl std::fmt::Display for DisplayText {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_display())
    }
}

impl serde::Serialize for DisplayText {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.as_display())
    }
}

/// Formats a date string from a clinical record for display.
///
/// Accepts the date and date-time forms records carry (`YYYY-MM-DD` with an
/// optional time suffix) and renders `DD.MM.YYYY`. Partial dates (`YYYY`,
/// `YYYY-MM`) and anything unparseable are returned unchanged rather than
/// rejected; display degrades, it does not fail.
pub fn display_date(raw: &str) -> String {
    let date_part = raw.split('T').next().unwrap_or(raw);
    match NaiveDate::parse_from_str(date_part, "%Y-%m-%d") {
        Ok(date) => date.format("%d.%m.%Y").to_string(),
        Err(_) => raw.to_string(),
    }
}
