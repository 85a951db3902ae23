use scraper::Html;

/// Renders an HTML fragment to plain text: tags and attributes dropped,
/// entities decoded, whitespace kept as written.
pub fn plain_text(markup: &str) -> String {
    Html::parse_fragment(markup)
        .root_element()
        .text()
        .collect::<String>()
}

/// Length of the rendered text in characters, not bytes.
pub fn plain_text_length(markup: &str) -> usize {
    plain_text(markup).chars().count()
}
