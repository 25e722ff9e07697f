//! String matchers.

use super::{Description, Matcher, TextMatcher};
use crate::result::{UiTestError, UiTestResult};
use regex::Regex;
use std::sync::Arc;

fn describe_string_mismatch(item: &str, description: &mut Description) {
    description.append_text("was ").append_value(&item);
}

struct IsEqual(String);

impl Matcher<str> for IsEqual {
    fn matches(&self, item: &str) -> bool {
        item == self.0
    }

    fn describe_to(&self, description: &mut Description) {
        description.append_text("is ").append_value(&self.0);
    }

    fn describe_mismatch(&self, item: &str, description: &mut Description) {
        describe_string_mismatch(item, description);
    }
}

#[derive(Clone, Copy)]
enum Position {
    Start,
    End,
    Anywhere,
}

struct Substring {
    needle: String,
    position: Position,
}

impl Matcher<str> for Substring {
    fn matches(&self, item: &str) -> bool {
        match self.position {
            Position::Start => item.starts_with(&self.needle),
            Position::End => item.ends_with(&self.needle),
            Position::Anywhere => item.contains(&self.needle),
        }
    }

    fn describe_to(&self, description: &mut Description) {
        let relation = match self.position {
            Position::Start => "a string starting with ",
            Position::End => "a string ending with ",
            Position::Anywhere => "a string containing ",
        };
        description.append_text(relation).append_value(&self.needle);
    }

    fn describe_mismatch(&self, item: &str, description: &mut Description) {
        describe_string_mismatch(item, description);
    }
}

struct MatchesRegex(Regex);

impl Matcher<str> for MatchesRegex {
    fn matches(&self, item: &str) -> bool {
        self.0.is_match(item)
    }

    fn describe_to(&self, description: &mut Description) {
        description
            .append_text("a string matching the pattern /")
            .append_text(self.0.as_str())
            .append_text("/");
    }

    fn describe_mismatch(&self, item: &str, description: &mut Description) {
        describe_string_mismatch(item, description);
    }
}

/// Exact string equality
#[must_use]
pub fn equal_to(expected: impl Into<String>) -> TextMatcher {
    Arc::new(IsEqual(expected.into()))
}

/// String prefix
#[must_use]
pub fn starts_with(prefix: impl Into<String>) -> TextMatcher {
    Arc::new(Substring {
        needle: prefix.into(),
        position: Position::Start,
    })
}

/// String suffix
#[must_use]
pub fn ends_with(suffix: impl Into<String>) -> TextMatcher {
    Arc::new(Substring {
        needle: suffix.into(),
        position: Position::End,
    })
}

/// Substring anywhere
#[must_use]
pub fn contains_string(needle: impl Into<String>) -> TextMatcher {
    Arc::new(Substring {
        needle: needle.into(),
        position: Position::Anywhere,
    })
}

/// Regular expression search (unanchored; use `^`/`$` to anchor)
pub fn matches_regex(pattern: &str) -> UiTestResult<TextMatcher> {
    let regex = Regex::new(pattern).map_err(|e| UiTestError::InvalidPattern {
        pattern: pattern.to_string(),
        message: e.to_string(),
    })?;
    Ok(Arc::new(MatchesRegex(regex)))
}
