use super::*;

#[test]
fn mode_usage_message_depends_on_mode() {
    let absolute = DirectiveError::InvalidModeUsage {
        keyword: "ease".to_owned(),
        absolute: true,
    };
    assert_eq!(absolute.to_string(), "'ease' cannot be used in !absolute mode");

    let plain = DirectiveError::InvalidModeUsage {
        keyword: "x".to_owned(),
        absolute: false,
    };
    assert_eq!(plain.to_string(), "'x' cannot be used without !absolute");
}

#[test]
fn curve_errors_convert() {
    let err: DirectiveError = CurveError::XOutOfRange { x1: 2.0, x2: 0.0 }.into();
    assert!(err.to_string().starts_with("invalid curve:"));
}

#[test]
fn diagnostic_keeps_rendered_message() {
    let d = Diagnostic::new("card", DirectiveError::malformed("enter", "expected a number"));
    assert_eq!(d.id, "card");
    assert_eq!(d.message, "malformed 'enter' directive: expected a number");
    assert!(matches!(d.error(), DirectiveError::MalformedDirective { .. }));
    let json = serde_json::to_value(&d).unwrap();
    assert_eq!(json["id"], "card");
    assert!(json.get("error").is_none());
}
