pub(crate) mod hash;
pub(crate) mod path;

use path::{IgnoreSet, PathTracker};
use serde_json::{Map, Number, Value};
use std::fmt::Write;

/// State of a single comparison: the ignore set, the difference cap, the
/// running count, the report buffer (absent for pure equality checks) and
/// the path stacks. Built fresh for every call and discarded afterwards.
pub(crate) struct Session<'a> {
    ignore: IgnoreSet,
    max_differences: usize,
    found: usize,
    capped: bool,
    report: Option<String>,
    path: PathTracker<'a>,
}

impl<'a> Session<'a> {
    pub(crate) fn new(ignore: IgnoreSet, max_differences: usize, build_report: bool) -> Self {
        Self {
            ignore,
            max_differences: max_differences.max(1),
            found: 0,
            capped: false,
            report: build_report.then(String::new),
            path: PathTracker::new(),
        }
    }

    /// Walks both trees and returns the difference count with the rendered
    /// report, when one was requested and at least one difference exists.
    pub(crate) fn run(mut self, left: &'a Value, right: &'a Value) -> (usize, Option<String>) {
        self.compare_values(left, right);

        if self.capped {
            if let Some(report) = &mut self.report {
                let _ = write!(
                    report,
                    "\nMaximum difference count ({}) found; comparison stopped",
                    self.max_differences
                );
            }
        }

        let found = self.found;
        let message = self.report.filter(|_| found > 0);
        (found, message)
    }

    // Each compare_* method returns whether traversal should continue;
    // false propagates up once the difference cap is reached.
    fn compare_values(&mut self, left: &'a Value, right: &'a Value) -> bool {
        match (left, right) {
            (Value::Null, Value::Null) => true,
            (Value::Bool(l), Value::Bool(r)) => l == r || self.record_not_equal(left, right),
            (Value::Number(l), Value::Number(r)) => {
                number_eq(l, r) || self.record_not_equal(left, right)
            }
            (Value::String(l), Value::String(r)) => l == r || self.record_not_equal(left, right),
            (Value::Array(l), Value::Array(r)) => {
                if l.len() != r.len() {
                    // one difference for the whole array, elements are not visited
                    self.record_not_equal(left, right)
                } else {
                    self.compare_array_elements(l, r)
                }
            }
            (Value::Object(l), Value::Object(r)) => self.compare_objects(l, r),
            _ => self.record_not_equal(left, right),
        }
    }

    fn compare_objects(&mut self, left: &'a Map<String, Value>, right: &'a Map<String, Value>) -> bool {
        for (key, left_value) in left {
            if self.should_ignore(key) {
                continue;
            }
            let keep_going = match right.get(key) {
                Some(right_value) => {
                    self.path.push_field(key);
                    let keep_going = self.compare_values(left_value, right_value);
                    self.path.pop_field();
                    keep_going
                }
                None => self.record_missing(key, "right"),
            };
            if !keep_going {
                return false;
            }
        }

        for key in right.keys() {
            if left.contains_key(key) || self.should_ignore(key) {
                continue;
            }
            if !self.record_missing(key, "left") {
                return false;
            }
        }

        true
    }

    fn compare_array_elements(&mut self, left: &'a [Value], right: &'a [Value]) -> bool {
        for (idx, (left_value, right_value)) in left.iter().zip(right).enumerate() {
            self.path.push_index(idx);
            let keep_going = self.compare_values(left_value, right_value);
            self.path.pop_index();
            if !keep_going {
                return false;
            }
        }
        true
    }

    fn should_ignore(&self, key: &str) -> bool {
        self.ignore.contains(&self.path.plain_child(key))
    }

    fn record_not_equal(&mut self, left: &Value, right: &Value) -> bool {
        self.record(|| format!("value is not equal: {} != {}", left, right))
    }

    fn record_missing(&mut self, key: &'a str, side: &str) -> bool {
        self.path.push_field(key);
        let keep_going = self.record(|| format!("does not exist in {} JSON value", side));
        self.path.pop_field();
        keep_going
    }

    /// Counts one difference at the current qualified path. The reason is
    /// only rendered when a report is being built.
    fn record(&mut self, reason: impl FnOnce() -> String) -> bool {
        self.found += 1;

        if let Some(report) = &mut self.report {
            if !report.is_empty() {
                report.push('\n');
            }
            let _ = write!(report, "Path '{}' {}", self.path.qualified(), reason());
        }

        if self.found >= self.max_differences {
            self.capped = true;
        }
        !self.capped
    }
}

/// Numeric-value equality: `1`, `1.0` and `1.00` are the same number no
/// matter which serializer formatted them. Two integers are compared
/// exactly, so values beyond f64's 2^53 integer range never collapse into
/// each other; only comparisons involving a float go through f64.
fn number_eq(left: &Number, right: &Number) -> bool {
    match (as_integer(left), as_integer(right)) {
        (Some(l), Some(r)) => l == r,
        _ => match (left.as_f64(), right.as_f64()) {
            (Some(l), Some(r)) => l == r,
            _ => left == right,
        },
    }
}

// i128 covers the full i64 and u64 ranges, so mixed-sign integer pairs
// compare without overflow. Floats map to None and take the f64 path.
fn as_integer(n: &Number) -> Option<i128> {
    if let Some(v) = n.as_i64() {
        Some(i128::from(v))
    } else {
        n.as_u64().map(i128::from)
    }
}
