use axum::response::Html;

use doctext_core::ACCEPTED_EXTENSIONS;

use crate::template;

pub async fn index() -> Html<String> {
    // The picker offers the three common formats; `.doc` is still accepted
    // by the server when a client sends it.
    let accept = ACCEPTED_EXTENSIONS
        .iter()
        .map(|(ext, _)| *ext)
        .filter(|ext| *ext != "doc")
        .map(|ext| format!(".{ext}"))
        .collect::<Vec<_>>()
        .join(",");
    template::render_index(&accept)
}

pub async fn health() -> &'static str {
    "ok"
}
