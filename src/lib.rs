// Copyright 2026 The JsonCompare Authors
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
// http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

#![doc = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/README.md"))]

use crate::compare::path::IgnoreSet;
use crate::compare::Session;
use serde::Serialize;
use serde_json::Value;
use std::collections::hash_map::DefaultHasher;
use std::fmt;
use std::hash::{Hash, Hasher};

mod compare;

/// Semantic JSON comparer.
///
/// Compares two parsed JSON trees structurally: objects are equal when they
/// hold the same properties with equal values regardless of member order,
/// arrays are compared index by index, and numbers and strings are compared
/// by value rather than by source text. Property paths named in an ignore
/// list are excluded from the comparison entirely.
///
/// The comparer holds only configuration; every call builds its own session
/// state, so a single instance may be used concurrently.
///
/// # Examples
///
/// ```
/// use json_compare::JsonComparer;
/// use serde_json::json;
///
/// let comparer = JsonComparer::new();
///
/// let outcome = comparer
///     .compare(&json!({"a": 1}), &json!({"a": 2}), &[])
///     .unwrap();
/// assert!(!outcome.is_equal());
/// ```
#[derive(Debug, Clone)]
pub struct JsonComparer {
    max_differences: usize,
}

impl JsonComparer {
    /// Constructs a comparer that stops at the first difference.
    pub fn new() -> Self {
        Self { max_differences: 1 }
    }

    /// Sets how many differences are recorded before the comparison stops
    /// and the report is closed with a cap notice. Values below 1 are
    /// clamped to 1.
    ///
    /// # Examples
    ///
    /// ```
    /// use json_compare::JsonComparer;
    /// let comparer = JsonComparer::new().with_max_differences(10);
    /// ```
    pub fn with_max_differences(mut self, max_differences: usize) -> Self {
        self.max_differences = max_differences.max(1);
        self
    }

    /// Compares two parsed JSON values.
    ///
    /// `ignore_paths` holds dot-separated property paths (no array indices,
    /// matched case-insensitively) whose subtrees are excluded from the
    /// comparison on both sides. A malformed entry is an error, not an
    /// inequality.
    ///
    /// # Examples
    ///
    /// ```
    /// use json_compare::JsonComparer;
    /// use serde_json::json;
    ///
    /// let comparer = JsonComparer::new();
    /// let outcome = comparer
    ///     .compare(&json!({"id": 1, "name": "Bob"}), &json!({"id": 2, "name": "Bob"}), &["id"])
    ///     .unwrap();
    /// assert!(outcome.is_equal());
    /// ```
    pub fn compare(
        &self,
        left: &Value,
        right: &Value,
        ignore_paths: &[&str],
    ) -> Result<Outcome, CompareError> {
        let ignore = IgnoreSet::parse(ignore_paths.iter().copied())
            .map_err(CompareError::InvalidIgnorePath)?;

        let (found, message) = Session::new(ignore, self.max_differences, true).run(left, right);
        Ok(Outcome {
            is_equal: found == 0,
            message,
        })
    }

    /// Parses both strings and compares the resulting documents.
    ///
    /// Fails with [`CompareError::InvalidJson`] naming the offending
    /// argument when either string is not valid JSON; a parse failure is
    /// never folded into "not equal".
    pub fn compare_strings(
        &self,
        left: &str,
        right: &str,
        ignore_paths: &[&str],
    ) -> Result<Outcome, CompareError> {
        let left = parse_argument(left, "left")?;
        let right = parse_argument(right, "right")?;
        self.compare(&left, &right, ignore_paths)
    }

    /// Structural equality with no ignored paths. Stops at the first
    /// difference and builds no report.
    pub fn equals(&self, left: &Value, right: &Value) -> bool {
        let (found, _) = Session::new(IgnoreSet::empty(), 1, false).run(left, right);
        found == 0
    }

    /// [`equals`](Self::equals) over raw JSON text.
    pub fn equals_strings(&self, left: &str, right: &str) -> Result<bool, CompareError> {
        let left = parse_argument(left, "left")?;
        let right = parse_argument(right, "right")?;
        Ok(self.equals(&left, &right))
    }

    /// Hashes a JSON value consistently with [`equals`](Self::equals): two
    /// values that compare equal produce the same hash. Object member order
    /// and number formatting cannot affect the result.
    pub fn hash_code(&self, value: &Value) -> u64 {
        let mut hasher = DefaultHasher::new();
        compare::hash::write_value(value, &mut hasher);
        hasher.finish()
    }

    /// [`hash_code`](Self::hash_code) over raw JSON text.
    pub fn hash_code_string(&self, text: &str) -> Result<u64, CompareError> {
        Ok(self.hash_code(&parse_argument(text, "json")?))
    }
}

impl Default for JsonComparer {
    fn default() -> Self {
        Self::new()
    }
}

/// Result of a comparison.
///
/// Inequality is an ordinary outcome, not an error: [`message`](Self::message)
/// holds one line per recorded difference, formatted as
/// `Path '<qualified-path>' <reason>`, plus a trailing notice when the
/// difference cap cut the comparison short. Equal documents carry no message.
#[derive(Debug, Clone, Serialize)]
pub struct Outcome {
    is_equal: bool,
    message: Option<String>,
}

impl Outcome {
    pub fn is_equal(&self) -> bool {
        self.is_equal
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }
}

/// Caller-input errors. Documents that merely differ are reported through
/// [`Outcome`], never through this type.
#[derive(Debug)]
pub enum CompareError {
    /// The named argument could not be parsed as JSON.
    InvalidJson {
        argument: &'static str,
        source: serde_json::Error,
    },
    /// An ignore entry is not a dot-separated property path.
    InvalidIgnorePath(String),
}

impl fmt::Display for CompareError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CompareError::InvalidJson { argument, source } => {
                write!(f, "argument '{}' is not valid JSON: {}", argument, source)
            }
            CompareError::InvalidIgnorePath(entry) => {
                write!(
                    f,
                    "invalid ignore path '{}': expected a dot-separated property path",
                    entry
                )
            }
        }
    }
}

impl std::error::Error for CompareError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CompareError::InvalidJson { source, .. } => Some(source),
            CompareError::InvalidIgnorePath(_) => None,
        }
    }
}

/// A JSON document usable as a key in hash-based containers.
///
/// Equality and hashing follow the comparer's rules, so two documents that
/// differ only in object member order or number formatting collapse to the
/// same key.
///
/// # Examples
///
/// ```
/// use json_compare::JsonKey;
/// use serde_json::json;
/// use std::collections::HashSet;
///
/// let mut seen = HashSet::new();
/// seen.insert(JsonKey(json!({"a": 1, "b": 2})));
/// assert!(!seen.insert(JsonKey(json!({"b": 2.0, "a": 1}))));
/// ```
#[derive(Debug, Clone)]
pub struct JsonKey(pub Value);

impl PartialEq for JsonKey {
    fn eq(&self, other: &Self) -> bool {
        JsonComparer::new().equals(&self.0, &other.0)
    }
}

impl Eq for JsonKey {}

impl Hash for JsonKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        compare::hash::write_value(&self.0, state);
    }
}

fn parse_argument(text: &str, argument: &'static str) -> Result<Value, CompareError> {
    serde_json::from_str(text).map_err(|source| CompareError::InvalidJson { argument, source })
}
