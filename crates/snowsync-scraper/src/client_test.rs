use super::*;

#[test]
fn render_endpoint_appends_route() {
    assert_eq!(
        render_endpoint("http://localhost:8787"),
        "http://localhost:8787/render"
    );
}

#[test]
fn render_endpoint_strips_trailing_slash() {
    assert_eq!(
        render_endpoint("http://localhost:8787/"),
        "http://localhost:8787/render"
    );
}

#[test]
fn render_response_parses_failure_envelope() {
    let body = r#"{"success": false, "html": null, "error": "render timeout", "status_code": null}"#;
    let parsed: RenderResponse = serde_json::from_str(body).expect("envelope should parse");
    assert!(!parsed.success);
    assert_eq!(parsed.error.as_deref(), Some("render timeout"));
    assert!(parsed.html.is_none());
    assert!(parsed.status_code.is_none());
}
