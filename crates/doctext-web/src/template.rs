use axum::response::Html;

const INDEX_HTML: &str = include_str!("../../../templates/index.html");

/// Render the upload page, injecting the accepted-extension list.
pub fn render_index(accept: &str) -> Html<String> {
    Html(INDEX_HTML.replace("{{ accept }}", accept))
}
