use serde_json::{Number, Value};
use std::hash::{Hash, Hasher};

/// Feeds a JSON value into a hasher so that any two values the comparer
/// reports as equal hash identically. Each variant writes a discriminant
/// byte first; object members are hashed in lexicographic key order, so
/// member order in the source document cannot affect the result.
pub(crate) fn write_value<H: Hasher>(value: &Value, state: &mut H) {
    match value {
        Value::Null => state.write_u8(0),
        Value::Bool(b) => {
            state.write_u8(1);
            b.hash(state);
        }
        Value::Number(n) => {
            state.write_u8(2);
            write_number(n, state);
        }
        Value::String(s) => {
            state.write_u8(3);
            s.hash(state);
        }
        Value::Array(items) => {
            state.write_u8(4);
            state.write_usize(items.len());
            for item in items {
                write_value(item, state);
            }
        }
        Value::Object(members) => {
            state.write_u8(5);
            state.write_usize(members.len());

            let mut sorted: Vec<(&String, &Value)> = members.iter().collect();
            sorted.sort_unstable_by(|(a, _), (b, _)| a.cmp(b));
            for (key, member) in sorted {
                key.hash(state);
                write_value(member, state);
            }
        }
    }
}

// Numbers are hashed through their f64 value, matching the equality rule
// that 1, 1.0 and 1.00 are the same number. Negative zero is folded into
// zero since -0.0 == 0.0.
fn write_number<H: Hasher>(n: &Number, state: &mut H) {
    match n.as_f64() {
        Some(f) => {
            let f = if f == 0.0 { 0.0 } else { f };
            state.write_u64(f.to_bits());
        }
        None => n.to_string().hash(state),
    }
}
