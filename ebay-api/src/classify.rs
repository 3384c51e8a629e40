//! Structured API errors and their classification.
//!
//! Every eBay reply carries a sequence of error records in its envelope. This
//! module normalizes them into [`ErrorRecord`] values and classifies the whole
//! sequence into named conditions, so callers never need to memorize numeric
//! codes.
//!
//! Classification is a membership test: a condition holds when *any* record's
//! code belongs to the condition's code set. New conditions only extend
//! [`ErrorCondition`] and its code table.
//!
//! # Examples
//!
//! ```
//! use ebay_api::classify::{ApiErrors, ErrorCategory, ErrorRecord};
//!
//! let errors = ApiErrors::from(vec![ErrorRecord { error_code: 291, ..ErrorRecord::default() }]);
//!
//! assert!(errors.listing_ended());
//! assert!(!errors.revision_conflict());
//! assert_eq!(errors.category(), ErrorCategory::ListingState);
//! ```

use std::fmt;

use serde::{Deserialize, Deserializer};

/// One structured error from a response envelope.
///
/// XML and JSON replies use the same field names. JSON replies send the code
/// as a string, so the code is always read as text and parsed; a code that
/// does not parse becomes `0`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct ErrorRecord {
    /// Short, human-readable summary.
    pub short_message: String,
    /// Detailed description.
    pub long_message: String,
    /// Numeric error code, the classification key.
    #[serde(deserialize_with = "code_from_text")]
    pub error_code: i64,
    /// `Error` or `Warning`.
    pub severity_code: String,
    /// `RequestError`, `SystemError`, ...
    pub error_classification: String,
}

fn code_from_text<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    Ok(raw.trim().parse().unwrap_or_default())
}

impl fmt::Display for ErrorRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} (code {}, severity {}, classification {}): {}",
            self.short_message,
            self.error_code,
            self.severity_code,
            self.error_classification,
            self.long_message
        )
    }
}

/// Named condition derived from error codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCondition {
    /// The listing changed underneath a revision; retrying may succeed.
    RevisionConflict,
    /// The listing has already ended.
    ListingEnded,
    /// The listing no longer exists.
    ListingDeleted,
}

impl ErrorCondition {
    /// All known conditions, in evaluation order.
    pub const ALL: [Self; 3] = [Self::RevisionConflict, Self::ListingEnded, Self::ListingDeleted];

    /// Error codes that signal this condition.
    #[must_use]
    pub const fn codes(self) -> &'static [i64] {
        match self {
            Self::RevisionConflict => &[10039, 10029, 21_916_916, 21_916_923, 21_919_028],
            Self::ListingEnded => &[291, 240],
            Self::ListingDeleted => &[17],
        }
    }

    /// Coarse category of this condition.
    #[must_use]
    pub const fn category(self) -> ErrorCategory {
        match self {
            Self::RevisionConflict => ErrorCategory::Transient,
            Self::ListingEnded | Self::ListingDeleted => ErrorCategory::ListingState,
        }
    }
}

/// Coarse decision category for an error sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// Worth retrying.
    Transient,
    /// The listing is in a state that makes the call pointless.
    ListingState,
    /// Anything not covered by a known condition.
    Fatal,
}

/// Ordered sequence of structured errors from one response.
///
/// Order is preserved from the API reply.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApiErrors(Vec<ErrorRecord>);

impl ApiErrors {
    /// Returns the records in API order.
    #[must_use]
    pub fn records(&self) -> &[ErrorRecord] {
        &self.0
    }

    /// Returns `true` if there are no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if any record's code belongs to `condition`.
    #[must_use]
    pub fn has(&self, condition: ErrorCondition) -> bool {
        let codes = condition.codes();
        self.0.iter().any(|record| codes.contains(&record.error_code))
    }

    /// Listing revision conflicted with a concurrent change.
    #[must_use]
    pub fn revision_conflict(&self) -> bool {
        self.has(ErrorCondition::RevisionConflict)
    }

    /// Listing has already ended.
    #[must_use]
    pub fn listing_ended(&self) -> bool {
        self.has(ErrorCondition::ListingEnded)
    }

    /// Listing has been deleted.
    #[must_use]
    pub fn listing_deleted(&self) -> bool {
        self.has(ErrorCondition::ListingDeleted)
    }

    /// Every condition present in this sequence.
    #[must_use]
    pub fn conditions(&self) -> Vec<ErrorCondition> {
        ErrorCondition::ALL.into_iter().filter(|condition| self.has(*condition)).collect()
    }

    /// Category of the first matching condition, or [`ErrorCategory::Fatal`].
    #[must_use]
    pub fn category(&self) -> ErrorCategory {
        self.conditions().first().map_or(ErrorCategory::Fatal, |condition| condition.category())
    }
}

impl From<Vec<ErrorRecord>> for ApiErrors {
    fn from(records: Vec<ErrorRecord>) -> Self {
        Self(records)
    }
}

impl IntoIterator for ApiErrors {
    type Item = ErrorRecord;
    type IntoIter = std::vec::IntoIter<ErrorRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl fmt::Display for ApiErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, record) in self.0.iter().enumerate() {
            if index > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{record}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ApiErrors {}
