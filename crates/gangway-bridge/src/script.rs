//! Script expression building for native -> JS calls.
//!
//! Arguments are rendered as JSON literals, which keeps order and type
//! fidelity for everything JSON can represent. Target names are validated as
//! identifiers before anything is rendered, so no caller-supplied text can
//! escape into expression position.

use serde_json::Value;

use gangway_common::EncodeError;

/// Validate a bare JS identifier (method names).
///
/// First char: ASCII letter, `_` or `$`; rest may add digits. Anything else
/// is rejected, which rules out expression injection wholesale.
pub fn validate_identifier(name: &str) -> Result<(), EncodeError> {
    let mut chars = name.chars();
    let leading_ok = chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_' || c == '$');

    if leading_ok && chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$') {
        Ok(())
    } else {
        Err(EncodeError::InvalidIdentifier(name.to_string()))
    }
}

/// Validate a dotted identifier path (target objects, e.g. `window.app`).
pub fn validate_identifier_path(path: &str) -> Result<(), EncodeError> {
    if path.is_empty() {
        return Err(EncodeError::InvalidIdentifier(path.to_string()));
    }

    for segment in path.split('.') {
        // report the whole path, not the segment, so the caller sees what it passed
        validate_identifier(segment)
            .map_err(|_| EncodeError::InvalidIdentifier(path.to_string()))?;
    }
    Ok(())
}

/// Build `<object>.<method>(<arg0>, <arg1>, ...)` with JSON-literal
/// arguments. Validation happens before any rendering, so a failure never
/// leaves a partial script behind.
pub fn call_expression(object: &str, method: &str, args: &[Value]) -> Result<String, EncodeError> {
    validate_identifier_path(object)?;
    validate_identifier(method)?;

    let mut rendered = Vec::with_capacity(args.len());
    for arg in args {
        rendered.push(serde_json::to_string(arg)?);
    }

    Ok(format!("{object}.{method}({})", rendered.join(", ")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    // --- Identifiers ---

    #[test]
    fn valid_identifiers() {
        assert!(validate_identifier("m").is_ok());
        assert!(validate_identifier("newMessage").is_ok());
        assert!(validate_identifier("_private").is_ok());
        assert!(validate_identifier("$jq").is_ok());
        assert!(validate_identifier("v2").is_ok());
    }

    #[test]
    fn invalid_identifiers() {
        assert!(validate_identifier("").is_err());
        assert!(validate_identifier("2fast").is_err());
        assert!(validate_identifier("with space").is_err());
        assert!(validate_identifier("semi;colon").is_err());
        assert!(validate_identifier("a.b").is_err());
        assert!(validate_identifier("naïve").is_err());
    }

    #[test]
    fn valid_identifier_paths() {
        assert!(validate_identifier_path("obj").is_ok());
        assert!(validate_identifier_path("window.app").is_ok());
        assert!(validate_identifier_path("window.app.chat").is_ok());
    }

    #[test]
    fn invalid_identifier_paths() {
        assert!(validate_identifier_path("").is_err());
        assert!(validate_identifier_path(".app").is_err());
        assert!(validate_identifier_path("app.").is_err());
        assert!(validate_identifier_path("app..chat").is_err());
        assert!(validate_identifier_path("app[0]").is_err());
    }

    // --- Injection attempts ---

    #[test]
    fn rejects_expression_injection_in_object() {
        assert!(call_expression("obj; alert(1)", "m", &[]).is_err());
        assert!(call_expression("obj)(", "m", &[]).is_err());
        assert!(call_expression("javascript:alert(1)", "m", &[]).is_err());
    }

    #[test]
    fn rejects_expression_injection_in_method() {
        assert!(call_expression("obj", "m(); evil()", &[]).is_err());
        assert!(call_expression("obj", "m//", &[]).is_err());
    }

    // --- Expression building ---

    #[test]
    fn call_expression_no_args() {
        assert_eq!(call_expression("obj", "m", &[]).unwrap(), "obj.m()");
    }

    #[test]
    fn call_expression_preserves_order_and_literals() {
        let js = call_expression("obj", "m", &[json!(1), json!("a"), json!(true)]).unwrap();
        assert_eq!(js, "obj.m(1, \"a\", true)");
    }

    #[test]
    fn call_expression_with_dotted_target() {
        let js = call_expression("window.app", "notify", &[json!("done")]).unwrap();
        assert_eq!(js, "window.app.notify(\"done\")");
    }

    #[test]
    fn call_expression_escapes_string_arguments() {
        let js = call_expression("obj", "m", &[json!("a\"b\\c")]).unwrap();
        assert_eq!(js, "obj.m(\"a\\\"b\\\\c\")");
    }

    #[test]
    fn call_expression_renders_null_and_floats() {
        let js = call_expression("obj", "m", &[json!(null), json!(1.5)]).unwrap();
        assert_eq!(js, "obj.m(null, 1.5)");
    }

    #[test]
    fn call_expression_renders_nested_values() {
        let js = call_expression("obj", "m", &[json!([1, 2]), json!({"k": "v"})]).unwrap();
        assert_eq!(js, "obj.m([1,2], {\"k\":\"v\"})");
    }
}
