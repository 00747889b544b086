//! Generator meta tag extraction.

use std::sync::LazyLock;

use scraper::{Html, Selector};

/// Any meta tag carrying a `name` attribute. The name itself is compared
/// case-insensitively in code, since attribute selectors are case-sensitive.
static NAMED_META_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| parse_selector_with_fallback("meta[name]", "generator extraction"));

/// Parses a CSS selector with a safe fallback.
///
/// If parsing fails, logs an error and returns a selector that matches nothing
/// (`*:not(*)`), so extraction degrades to "no generator" instead of panicking.
fn parse_selector_with_fallback(selector_str: &str, context: &str) -> Selector {
    Selector::parse(selector_str).unwrap_or_else(|e| {
        log::error!(
            "Failed to parse CSS selector '{}' in {}: {}. Using fallback selector.",
            selector_str,
            context,
            e
        );
        Selector::parse("*:not(*)").expect(
            "Fallback selector '*:not(*)' should always parse - this is a programming error",
        )
    })
}

/// Extracts the `content` attribute of the first `<meta name="generator">` tag.
///
/// Returns `None` when the document has no generator tag (or none with a
/// `content` attribute). A missing tag is not an error.
pub fn extract_generator(body: &str) -> Option<String> {
    let document = Html::parse_document(body);
    document
        .select(&NAMED_META_SELECTOR)
        .filter(|element| {
            element
                .value()
                .attr("name")
                .is_some_and(|name| name.trim().eq_ignore_ascii_case("generator"))
        })
        .find_map(|element| element.value().attr("content"))
        .map(|content| content.trim().to_string())
}
