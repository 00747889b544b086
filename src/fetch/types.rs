//! Fetch result types.

use std::collections::BTreeMap;

/// A normalized HTTP response handed from the fetcher to the matcher.
///
/// Header names are lower-cased; repeated headers are joined with `", "`.
/// Not persisted.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ProbeResponse {
    pub status_code: u16,
    pub headers: BTreeMap<String, String>,
    pub body: String,
    pub final_url: String,
}

impl ProbeResponse {
    /// Builds a header-less response, mostly useful for scripted fetchers.
    pub fn new(status_code: u16, final_url: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            status_code,
            headers: BTreeMap::new(),
            body: body.into(),
            final_url: final_url.into(),
        }
    }

    /// Adds a header, lower-casing the name and joining repeated values.
    #[must_use]
    pub fn with_header(mut self, name: &str, value: &str) -> Self {
        self.insert_header(name, value);
        self
    }

    pub(crate) fn insert_header(&mut self, name: &str, value: &str) {
        self.headers
            .entry(name.to_ascii_lowercase())
            .and_modify(|existing| {
                existing.push_str(", ");
                existing.push_str(value);
            })
            .or_insert_with(|| value.to_string());
    }

    /// Headers rendered as `name: value` lines, for marker matching.
    pub fn header_text(&self) -> String {
        self.headers
            .iter()
            .map(|(name, value)| format!("{name}: {value}"))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_header_lowercases_and_joins() {
        let response = ProbeResponse::new(200, "http://x/", "")
            .with_header("Set-Cookie", "a=1")
            .with_header("set-cookie", "b=2");
        assert_eq!(
            response.headers.get("set-cookie").map(String::as_str),
            Some("a=1, b=2")
        );
    }

    #[test]
    fn test_header_text_is_sorted_lines() {
        let response = ProbeResponse::new(200, "http://x/", "")
            .with_header("X-Powered-By", "Django")
            .with_header("Content-Type", "text/html");
        assert_eq!(
            response.header_text(),
            "content-type: text/html\nx-powered-by: Django"
        );
    }
}
