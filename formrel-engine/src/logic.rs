//! Built-in logics and the equality semantics they share.

use std::rc::Rc;

use formrel_model::{Dependency, Field, LogicFn};
use serde_json::Value;

use crate::Registry;

/// Canonical string form of a field value used for comparisons.
///
/// Strings are themselves, booleans `"true"`/`"false"`, numbers their JSON
/// text, null the empty string, arrays and objects their compact JSON text.
pub fn normalize(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::Array(_) | Value::Object(_) => value.to_string(),
    }
}

/// String-normalized equality: `"1"` equals `1`, `null` equals `""`.
pub fn values_equal(a: &Value, b: &Value) -> bool {
    normalize(a) == normalize(b)
}

/// True when the field's value equals the dependency's `value`.
pub fn equal(dependency: &Dependency, field: &dyn Field) -> bool {
    values_equal(&field.value(), &dependency.value)
}

pub(crate) fn register_builtins(logics: &mut Registry<LogicFn>) {
    logics.register("equal", Rc::new(equal));
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn normalize_scalars() {
        assert_eq!(normalize(&json!(null)), "");
        assert_eq!(normalize(&json!("x")), "x");
        assert_eq!(normalize(&json!(true)), "true");
        assert_eq!(normalize(&json!(42)), "42");
        assert_eq!(normalize(&json!(1.5)), "1.5");
    }

    #[test]
    fn normalize_compound() {
        assert_eq!(normalize(&json!(["a", 1])), r#"["a",1]"#);
        assert_eq!(normalize(&json!({"k": "v"})), r#"{"k":"v"}"#);
    }

    #[test]
    fn loose_scalar_equality() {
        assert!(values_equal(&json!("1"), &json!(1)));
        assert!(values_equal(&json!(null), &json!("")));
        assert!(values_equal(&json!("true"), &json!(true)));
        assert!(!values_equal(&json!("1"), &json!(1.0)));
        assert!(!values_equal(&json!("x"), &json!("X")));
    }
}
