//! Provenance Tags
//!
//! In-band markers that carry a source identifier inside free text. A schema is
//! parametrized by a `base` name and produces the delimiter pair
//! `|base>` / `<base|`; text wrapped between them survives being stored in an
//! append-only transcript and is recovered later by pattern match.

use crate::error::TagError;
use regex::Regex;
use std::sync::{Arc, OnceLock};

/// Base name of the agent-source provenance category.
pub const SOURCE_BASE: &str = "gfem:agent:source";

/// Characters a base may not contain without making the delimiters ambiguous.
const RESERVED: [char; 5] = ['|', '<', '>', '\n', '\r'];

/// Result of [`TagSchema::extract`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extracted {
    /// Payload of the first balanced tag, if any.
    pub source: Option<String>,
    /// Input text with that tag span removed.
    pub cleaned: String,
}

/// Delimiter schema for one provenance category.
///
/// Immutable once built; share one instance (behind an `Arc`) across every
/// agent that uses the category.
#[derive(Debug, Clone)]
pub struct TagSchema {
    base: String,
    start: String,
    end: String,
    pattern: Regex,
}

impl TagSchema {
    /// Build a schema for `base`.
    pub fn new(base: impl Into<String>) -> Result<Self, TagError> {
        let base = base.into();
        if base.is_empty() {
            return Err(TagError::InvalidBase {
                base,
                reason: "base cannot be empty".to_string(),
            });
        }
        if let Some(c) = base.chars().find(|c| RESERVED.contains(c)) {
            return Err(TagError::InvalidBase {
                reason: format!("base cannot contain {:?}", c),
                base,
            });
        }

        let start = format!("|{}>", base);
        let end = format!("<{}|", base);
        let pattern = Regex::new(&format!(
            "{}(.*?){}",
            regex::escape(&start),
            regex::escape(&end)
        ))
        .map_err(|e| TagError::InvalidBase {
            base: base.clone(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            base,
            start,
            end,
            pattern,
        })
    }

    /// Schema for the agent-source category (`gfem:agent:source`).
    pub fn source() -> Self {
        Self::new(SOURCE_BASE).expect("source tag base is valid")
    }

    /// Process-wide shared instance of [`source`](Self::source).
    pub fn shared_source() -> Arc<Self> {
        static SHARED: OnceLock<Arc<TagSchema>> = OnceLock::new();
        SHARED.get_or_init(|| Arc::new(Self::source())).clone()
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    pub fn start(&self) -> &str {
        &self.start
    }

    pub fn end(&self) -> &str {
        &self.end
    }

    /// Compiled extraction pattern: non-greedy capture between the delimiters.
    pub fn pattern(&self) -> &Regex {
        &self.pattern
    }

    /// Template with a `{}` placeholder between the delimiters.
    pub fn format_template(&self) -> String {
        format!("{}{{}}{}", self.start, self.end)
    }

    /// Whether `payload` round-trips through [`format`](Self::format) and
    /// [`extract`](Self::extract).
    pub fn is_embeddable(&self, payload: &str) -> bool {
        !payload.contains(&self.start)
            && !payload.contains(&self.end)
            && !payload.contains(|c| c == '\n' || c == '\r')
    }

    /// Wrap `payload` in the delimiter pair.
    pub fn format(&self, payload: &str) -> String {
        if !self.is_embeddable(payload) {
            tracing::warn!(
                base = %self.base,
                payload,
                "tag payload will not round-trip"
            );
        }
        format!("{}{}{}", self.start, payload, self.end)
    }

    /// Find the first balanced tag in `text` and strip it.
    ///
    /// A start delimiter without a matching end does not match; the text is
    /// returned unchanged with no source.
    pub fn extract(&self, text: &str) -> Extracted {
        let found = self
            .pattern
            .captures(text)
            .and_then(|caps| Some((caps.get(0)?, caps.get(1)?)));

        match found {
            Some((whole, payload)) => {
                let mut cleaned = String::with_capacity(text.len() - whole.len());
                cleaned.push_str(&text[..whole.start()]);
                cleaned.push_str(&text[whole.end()..]);
                tracing::trace!(base = %self.base, source = payload.as_str(), "tag extracted");
                Extracted {
                    source: Some(payload.as_str().to_string()),
                    cleaned,
                }
            }
            None => Extracted {
                source: None,
                cleaned: text.to_string(),
            },
        }
    }
}

impl Default for TagSchema {
    fn default() -> Self {
        Self::source()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_source_delimiters() {
        let schema = TagSchema::source();
        assert_eq!(schema.base(), "gfem:agent:source");
        assert_eq!(schema.start(), "|gfem:agent:source>");
        assert_eq!(schema.end(), "<gfem:agent:source|");
        assert_eq!(
            schema.format_template(),
            "|gfem:agent:source>{}<gfem:agent:source|"
        );
    }

    #[test]
    fn test_format() {
        let schema = TagSchema::source();
        assert_eq!(
            schema.format("alice"),
            "|gfem:agent:source>alice<gfem:agent:source|"
        );
    }

    #[test]
    fn test_extract_tagged() {
        let schema = TagSchema::source();
        let out = schema.extract("|gfem:agent:source>alice<gfem:agent:source|Hello");
        assert_eq!(out.source.as_deref(), Some("alice"));
        assert_eq!(out.cleaned, "Hello");
    }

    #[test]
    fn test_extract_untagged() {
        let schema = TagSchema::source();
        let out = schema.extract("just text");
        assert_eq!(out.source, None);
        assert_eq!(out.cleaned, "just text");
    }

    #[test]
    fn test_extract_unbalanced_start_is_sourceless() {
        let schema = TagSchema::source();
        let text = "|gfem:agent:source>alice and no end";
        let out = schema.extract(text);
        assert_eq!(out.source, None);
        assert_eq!(out.cleaned, text);
    }

    #[test]
    fn test_extract_end_before_start_is_sourceless() {
        let schema = TagSchema::source();
        let text = "<gfem:agent:source|alice|gfem:agent:source>";
        let out = schema.extract(text);
        assert_eq!(out.source, None);
        assert_eq!(out.cleaned, text);
    }

    #[test]
    fn test_extract_mid_text_and_first_only() {
        let schema = TagSchema::source();
        let text = format!("a {} b {} c", schema.format("x"), schema.format("y"));
        let out = schema.extract(&text);
        assert_eq!(out.source.as_deref(), Some("x"));
        assert_eq!(out.cleaned, format!("a  b {} c", schema.format("y")));
    }

    #[test]
    fn test_extract_leading_tag_keeps_tagged_remainder() {
        let schema = TagSchema::source();
        let rest = format!("a|b<c\n{}d", schema.format("bob"));
        let out = schema.extract(&format!("{}{}", schema.format("alice"), rest));
        assert_eq!(out.source.as_deref(), Some("alice"));
        assert_eq!(out.cleaned, rest);
    }

    #[test]
    fn test_extract_is_non_greedy() {
        let schema = TagSchema::source();
        let text = format!("{}{}", schema.format("a"), schema.format("b"));
        assert_eq!(schema.extract(&text).source.as_deref(), Some("a"));
    }

    #[test]
    fn test_regex_metacharacters_in_base_are_literal() {
        let schema = TagSchema::new("a.b*c").unwrap();
        assert_eq!(schema.extract("|aXbc>p<aXbc|").source, None);
        assert_eq!(
            schema.extract("|a.b*c>p<a.b*c|rest").source.as_deref(),
            Some("p")
        );
    }

    #[test]
    fn test_other_bases_do_not_cross_match() {
        let source = TagSchema::source();
        let topic = TagSchema::new("gfem:agent:topic").unwrap();
        let text = topic.format("weather");
        assert_eq!(source.extract(&text).source, None);
        assert_eq!(topic.extract(&text).source.as_deref(), Some("weather"));
    }

    #[test]
    fn test_invalid_bases() {
        assert!(TagSchema::new("").is_err());
        assert!(TagSchema::new("a|b").is_err());
        assert!(TagSchema::new("a<b").is_err());
        assert!(TagSchema::new("a>b").is_err());
        assert!(TagSchema::new("a\nb").is_err());
        assert!(TagSchema::new("gfem:agent:source").is_ok());
    }

    #[test]
    fn test_is_embeddable() {
        let schema = TagSchema::source();
        assert!(schema.is_embeddable("alice"));
        assert!(!schema.is_embeddable("a<gfem:agent:source|b"));
        assert!(!schema.is_embeddable("two\nlines"));
    }

    proptest! {
        #[test]
        fn prop_round_trip(
            payload in "[^|<>\n\r]{0,24}",
            head in "[\\s\\S]{0,24}",
            inner in proptest::option::of("[^|<>\n\r]{0,12}"),
            tail in "[\\s\\S]{0,24}",
        ) {
            let schema = TagSchema::source();
            // The remainder may hold delimiters and further tags of its own.
            let inner = inner.map(|p| schema.format(&p)).unwrap_or_default();
            let rest = format!("{}{}{}", head, inner, tail);
            let out = schema.extract(&format!("{}{}", schema.format(&payload), rest));
            prop_assert_eq!(out.source, Some(payload));
            prop_assert_eq!(out.cleaned, rest);
        }

        #[test]
        fn prop_untagged_text_is_unchanged(text in "[^|]{0,64}") {
            let schema = TagSchema::source();
            let out = schema.extract(&text);
            prop_assert_eq!(out.source, None);
            prop_assert_eq!(out.cleaned, text);
        }
    }
}
