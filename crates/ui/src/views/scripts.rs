use dioxus::document::eval;

pub(super) fn scroll_into_view_script(section_id: &str) -> String {
    let id_literal = js_string_literal(section_id);
    format!(
        r#"
        const el = document.getElementById({id_literal});
        if (el) {{
            el.scrollIntoView({{ behavior: "smooth", block: "start" }});
        }}
        "#
    )
}

pub(super) fn copy_text_script(text: &str) -> String {
    let text_literal = js_string_literal(text);
    format!(
        r#"
        const text = {text_literal};
        try {{
            if (navigator.clipboard && navigator.clipboard.writeText) {{
                await navigator.clipboard.writeText(text);
                return true;
            }}
        }} catch (_) {{}}
        return false;
        "#
    )
}

pub async fn scroll_into_view(section_id: &str) {
    let script = scroll_into_view_script(section_id);
    let _ = eval(&script).await;
}

/// Returns false when the webview refused the clipboard write.
pub async fn copy_text(text: &str) -> bool {
    let script = copy_text_script(text);
    eval(&script).join::<bool>().await.unwrap_or(false)
}

fn js_string_literal(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for ch in value.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            _ => out.push(ch),
        }
    }
    out.push('"');
    out
}
