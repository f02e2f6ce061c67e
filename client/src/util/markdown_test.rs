use super::*;

#[test]
fn renders_basic_markdown() {
    let html = render_markdown_html("**Hukum Ohm**: `V = I * R`");
    assert!(html.contains("<strong>Hukum Ohm</strong>"));
    assert!(html.contains("<code>V = I * R</code>"));
}

#[test]
fn drops_raw_html() {
    let html = render_markdown_html("halo <script>alert(1)</script> dunia");
    assert!(!html.contains("<script>"));
    assert!(html.contains("halo"));
    assert!(html.contains("dunia"));
}

#[test]
fn renders_tables() {
    let html = render_markdown_html("| a | b |\n|---|---|\n| 1 | 2 |\n");
    assert!(html.contains("<table>"));
}
