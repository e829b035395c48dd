//! Pattern-matched reply generation.
//!
//! Replies are produced by finite pattern matching over the input text, not
//! by any model inference. The rules form an ordered table evaluated
//! top-to-bottom; the first rule with a matching keyword wins, so precedence
//! is explicit and independently testable. Each rule maps to exactly one
//! canned reply, keeping `generate` deterministic for a fixed table.

use serde::{Deserialize, Serialize};

/// A single (keywords, reply) rule in the reply table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplyRule {
    /// Stable identifier of the rule (e.g. "greeting").
    pub id: String,
    /// Keywords matched case-insensitively as substrings of the input.
    pub keywords: Vec<String>,
    /// The canned reply returned when this rule matches.
    pub reply: String,
}

impl ReplyRule {
    /// Creates a new rule.
    pub fn new(
        id: impl Into<String>,
        keywords: &[&str],
        reply: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            keywords: keywords.iter().map(|k| k.to_string()).collect(),
            reply: reply.into(),
        }
    }

    /// Returns true if any keyword occurs in the lowercased input.
    fn matches(&self, lowercased_input: &str) -> bool {
        self.keywords
            .iter()
            .any(|keyword| lowercased_input.contains(keyword.as_str()))
    }
}

/// Returns the default reply rules, in priority order.
///
/// Priority: greeting → well-being question → positive sentiment →
/// negative sentiment. Anything else falls through to the generator's
/// fallback reply.
pub fn default_rules() -> Vec<ReplyRule> {
    vec![
        ReplyRule::new(
            "greeting",
            &["hello", "hi"],
            "Hi there! It's wonderful to hear from you. How's your day going?",
        ),
        ReplyRule::new(
            "well-being-question",
            &["how are you"],
            "I'm here and happy to chat with you! I've been thinking about you. How have you been feeling?",
        ),
        ReplyRule::new(
            "positive-sentiment",
            &["good", "great", "well"],
            "That's wonderful to hear! I'm glad things are going well for you. Anything exciting you'd like to share?",
        ),
        ReplyRule::new(
            "negative-sentiment",
            &["bad", "sad", "tired"],
            "I'm sorry to hear that. Remember that I'm always here for you. Would you like to talk about what's bothering you?",
        ),
    ]
}

/// Reply used when no rule matches.
pub const DEFAULT_FALLBACK: &str = "Thanks for sharing that with me! I'm always here to listen and chat whenever you need me. What else is on your mind?";

/// Deterministic reply generator over an ordered rule table.
#[derive(Debug, Clone)]
pub struct ReplyGenerator {
    rules: Vec<ReplyRule>,
    fallback: String,
}

impl Default for ReplyGenerator {
    fn default() -> Self {
        Self {
            rules: default_rules(),
            fallback: DEFAULT_FALLBACK.to_string(),
        }
    }
}

impl ReplyGenerator {
    /// Creates a generator with the default rule table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a generator with a custom rule table and fallback.
    pub fn with_rules(rules: Vec<ReplyRule>, fallback: impl Into<String>) -> Self {
        Self {
            rules,
            fallback: fallback.into(),
        }
    }

    /// Returns the first rule matching the input, if any.
    pub fn matched_rule(&self, input: &str) -> Option<&ReplyRule> {
        let lowercased = input.to_lowercase();
        self.rules.iter().find(|rule| rule.matches(&lowercased))
    }

    /// Produces the reply for the given input. Never fails; inputs matching
    /// no rule receive the fallback reply.
    pub fn generate(&self, input: &str) -> &str {
        self.matched_rule(input)
            .map(|rule| rule.reply.as_str())
            .unwrap_or(self.fallback.as_str())
    }

    /// The rule table in evaluation order.
    pub fn rules(&self) -> &[ReplyRule] {
        &self.rules
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_rules_order() {
        let rules = default_rules();
        let ids: Vec<&str> = rules.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(
            ids,
            vec![
                "greeting",
                "well-being-question",
                "positive-sentiment",
                "negative-sentiment"
            ]
        );
    }

    #[test]
    fn test_generate_is_deterministic() {
        let generator = ReplyGenerator::new();
        let first = generator.generate("Hello!").to_string();
        let second = generator.generate("Hello!").to_string();
        assert_eq!(first, second);
    }

    #[test]
    fn test_matching_is_case_insensitive() {
        let generator = ReplyGenerator::new();
        assert_eq!(
            generator.matched_rule("HELLO THERE").unwrap().id,
            "greeting"
        );
    }

    #[test]
    fn test_earlier_rule_wins() {
        let generator = ReplyGenerator::new();
        // Matches both "hi" and "tired"; greeting is evaluated first.
        let rule = generator.matched_rule("hi, I'm so tired").unwrap();
        assert_eq!(rule.id, "greeting");
    }

    #[test]
    fn test_each_rule_family_matches() {
        let generator = ReplyGenerator::new();
        assert_eq!(generator.matched_rule("hello").unwrap().id, "greeting");
        assert_eq!(
            generator.matched_rule("so, how are you?").unwrap().id,
            "well-being-question"
        );
        assert_eq!(
            generator.matched_rule("today was great").unwrap().id,
            "positive-sentiment"
        );
        assert_eq!(
            generator.matched_rule("feeling sad").unwrap().id,
            "negative-sentiment"
        );
    }

    #[test]
    fn test_unmatched_input_gets_fallback() {
        let generator = ReplyGenerator::new();
        assert!(generator.matched_rule("xyzzy").is_none());
        assert_eq!(generator.generate("xyzzy"), DEFAULT_FALLBACK);
    }

    #[test]
    fn test_custom_rule_table() {
        let generator = ReplyGenerator::with_rules(
            vec![ReplyRule::new("ping", &["ping"], "pong")],
            "default",
        );
        assert_eq!(generator.generate("ping?"), "pong");
        assert_eq!(generator.generate("hello"), "default");
    }
}
