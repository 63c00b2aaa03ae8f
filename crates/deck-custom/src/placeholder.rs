//! Placeholder scanning and substitution.
//!
//! One grammar: a marker is `{{` + key + `}}`, where the key is one or more
//! ASCII alphanumerics, `_`, `-` or `.`, optionally padded with whitespace
//! inside the braces. Anything else, including an unterminated `{{`, is
//! literal text. Rendering is a single left-to-right pass, so substituted
//! values are never scanned again.

/// A piece of scanned text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment<'a> {
    /// Literal text, copied through as is.
    Literal(&'a str),
    /// A well-formed marker.
    Placeholder {
        /// The key between the braces, whitespace trimmed.
        key: &'a str,
        /// The marker exactly as written, braces included.
        raw: &'a str,
    },
}

/// Iterator over the segments of a text.
#[derive(Debug, Clone)]
pub struct Segments<'a> {
    rest: &'a str,
}

/// Split `text` into literal and placeholder segments.
pub fn segments(text: &str) -> Segments<'_> {
    Segments { rest: text }
}

impl<'a> Iterator for Segments<'a> {
    type Item = Segment<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.rest.is_empty() {
            return None;
        }

        match self.rest.find("{{") {
            None => {
                let literal = self.rest;
                self.rest = "";
                Some(Segment::Literal(literal))
            }
            Some(0) => {
                if let Some(end) = self.rest[2..].find("}}") {
                    let key = self.rest[2..2 + end].trim();
                    if is_valid_key(key) {
                        let (raw, tail) = self.rest.split_at(end + 4);
                        self.rest = tail;
                        return Some(Segment::Placeholder { key, raw });
                    }
                }
                // Not a marker: emit one brace and rescan from the next one,
                // so "{{{name}}}" still finds "{{name}}".
                let (brace, tail) = self.rest.split_at(1);
                self.rest = tail;
                Some(Segment::Literal(brace))
            }
            Some(start) => {
                let (literal, tail) = self.rest.split_at(start);
                self.rest = tail;
                Some(Segment::Literal(literal))
            }
        }
    }
}

fn is_valid_key(key: &str) -> bool {
    !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'))
}

/// Replace every marker whose key `resolve` knows; leave the rest verbatim.
pub fn render<'v>(text: &str, resolve: impl Fn(&str) -> Option<&'v str>) -> String {
    let mut out = String::with_capacity(text.len());
    for segment in segments(text) {
        match segment {
            Segment::Literal(s) => out.push_str(s),
            Segment::Placeholder { key, raw } => out.push_str(resolve(key).unwrap_or(raw)),
        }
    }
    out
}

/// Keys of all markers in `text`, in order of appearance.
pub fn keys(text: &str) -> impl Iterator<Item = &str> {
    segments(text).filter_map(|segment| match segment {
        Segment::Placeholder { key, .. } => Some(key),
        Segment::Literal(_) => None,
    })
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn values() -> HashMap<&'static str, &'static str> {
        HashMap::from([("name", "Ada"), ("link", "https://x.test"), ("loop", "{{name}}")])
    }

    fn fill(text: &str) -> String {
        let values = values();
        render(text, |key| values.get(key).copied())
    }

    #[test]
    fn replaces_known_markers() {
        assert_eq!(fill("Hi {{name}}, see {{link}}"), "Hi Ada, see https://x.test");
    }

    #[test]
    fn trims_whitespace_inside_braces() {
        assert_eq!(fill("Hi {{ name }}!"), "Hi Ada!");
    }

    #[test]
    fn unknown_markers_pass_through() {
        assert_eq!(fill("Hi {{nobody}}"), "Hi {{nobody}}");
    }

    #[test]
    fn substituted_values_are_not_rescanned() {
        assert_eq!(fill("{{loop}}"), "{{name}}");
    }

    #[test]
    fn malformed_markers_are_literal() {
        assert_eq!(fill("{{"), "{{");
        assert_eq!(fill("{{name"), "{{name");
        assert_eq!(fill("{{}}"), "{{}}");
        assert_eq!(fill("{{two words}}"), "{{two words}}");
        assert_eq!(fill("a }} b"), "a }} b");
    }

    #[test]
    fn extra_braces_around_a_marker() {
        assert_eq!(fill("{{{name}}}"), "{Ada}");
    }

    #[test]
    fn handles_non_ascii_text() {
        assert_eq!(fill("Grüße, {{name}} ✨"), "Grüße, Ada ✨");
    }

    #[test]
    fn keys_in_order() {
        let found: Vec<&str> = keys("{{a}} and {{ b.c }} and {{a}}").collect();
        assert_eq!(found, vec!["a", "b.c", "a"]);
    }

    #[test]
    fn segments_of_plain_text() {
        let segs: Vec<Segment<'_>> = segments("plain").collect();
        assert_eq!(segs, vec![Segment::Literal("plain")]);
        assert_eq!(segments("").count(), 0);
    }
}
