//! Matchers: named, self-describing predicates.
//!
//! A matcher answers one question about an item (a view or a string) and can
//! render a human-readable description of that question for failure
//! diagnostics. Matchers are immutable and shared through `Arc`, so they can
//! be composed freely with [`all_of`], [`any_of`] and [`not`].

mod text;
mod view;

pub use text::{contains_string, ends_with, equal_to, matches_regex, starts_with};
pub use view::{
    has_descendant, has_no_id, is_assignable_from, is_descendant_of_a, is_displayed, is_enabled,
    restricted_direct_access, toolbar_subtitle, toolbar_subtitle_res, toolbar_title,
    toolbar_title_res, with_class_name, with_content_description,
    with_content_description_matching, with_hint, with_hint_ending, with_hint_matching, with_id,
    with_parent, with_text, with_text_matching, WithHintEnding, RESTRICTED_ACCESS_MESSAGE,
};

use crate::view::ViewNode;
use std::fmt;
use std::sync::Arc;

/// Predicate over `T` with a description
pub trait Matcher<T: ?Sized>: Send + Sync {
    /// Evaluate the predicate
    fn matches(&self, item: &T) -> bool;

    /// Describe what this matcher expects
    fn describe_to(&self, description: &mut Description);

    /// Describe why `item` did not match
    fn describe_mismatch(&self, item: &T, description: &mut Description) {
        let _ = item;
        description.append_text("was not matched");
    }
}

impl<T: ?Sized> fmt::Debug for dyn Matcher<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Matcher({})", describe(self))
    }
}

/// Shared matcher over views
pub type ViewMatcher = Arc<dyn Matcher<ViewNode>>;

/// Shared matcher over strings
pub type TextMatcher = Arc<dyn Matcher<str>>;

/// Render a matcher's description
#[must_use]
pub fn describe<T: ?Sized>(matcher: &dyn Matcher<T>) -> String {
    let mut description = Description::new();
    matcher.describe_to(&mut description);
    description.into_string()
}

// =============================================================================
// DESCRIPTION
// =============================================================================

/// Text accumulator for matcher descriptions
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Description {
    text: String,
}

impl Description {
    /// Create an empty description
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append literal text
    pub fn append_text(&mut self, text: &str) -> &mut Self {
        self.text.push_str(text);
        self
    }

    /// Append a value, quoted the way `Debug` renders it
    pub fn append_value(&mut self, value: &dyn fmt::Debug) -> &mut Self {
        self.text.push_str(&format!("{value:?}"));
        self
    }

    /// Append another matcher's description
    pub fn append_description_of<T: ?Sized>(&mut self, matcher: &dyn Matcher<T>) -> &mut Self {
        matcher.describe_to(self);
        self
    }

    /// Append a separated list of matcher descriptions
    pub fn append_list<T: ?Sized>(
        &mut self,
        start: &str,
        separator: &str,
        end: &str,
        matchers: &[Arc<dyn Matcher<T>>],
    ) -> &mut Self {
        self.text.push_str(start);
        for (i, matcher) in matchers.iter().enumerate() {
            if i > 0 {
                self.text.push_str(separator);
            }
            matcher.describe_to(self);
        }
        self.text.push_str(end);
        self
    }

    /// View the text
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Take the text
    #[must_use]
    pub fn into_string(self) -> String {
        self.text
    }
}

impl fmt::Display for Description {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

// =============================================================================
// COMBINATORS
// =============================================================================

struct AllOf<T: ?Sized> {
    matchers: Vec<Arc<dyn Matcher<T>>>,
}

impl<T: ?Sized> Matcher<T> for AllOf<T> {
    fn matches(&self, item: &T) -> bool {
        self.matchers.iter().all(|m| m.matches(item))
    }

    fn describe_to(&self, description: &mut Description) {
        description.append_list("(", " and ", ")", &self.matchers);
    }

    fn describe_mismatch(&self, item: &T, description: &mut Description) {
        if let Some(failing) = self.matchers.iter().find(|m| !m.matches(item)) {
            failing.describe_to(description);
            description.append_text(" ");
            failing.describe_mismatch(item, description);
        }
    }
}

struct AnyOf<T: ?Sized> {
    matchers: Vec<Arc<dyn Matcher<T>>>,
}

impl<T: ?Sized> Matcher<T> for AnyOf<T> {
    fn matches(&self, item: &T) -> bool {
        self.matchers.iter().any(|m| m.matches(item))
    }

    fn describe_to(&self, description: &mut Description) {
        description.append_list("(", " or ", ")", &self.matchers);
    }
}

struct Not<T: ?Sized> {
    inner: Arc<dyn Matcher<T>>,
}

impl<T: ?Sized> Matcher<T> for Not<T> {
    fn matches(&self, item: &T) -> bool {
        !self.inner.matches(item)
    }

    fn describe_to(&self, description: &mut Description) {
        description
            .append_text("not ")
            .append_description_of(self.inner.as_ref());
    }
}

struct Anything;

impl<T: ?Sized> Matcher<T> for Anything {
    fn matches(&self, _item: &T) -> bool {
        true
    }

    fn describe_to(&self, description: &mut Description) {
        description.append_text("ANYTHING");
    }
}

/// Matches when every matcher matches (vacuously true when empty)
#[must_use]
pub fn all_of<T: ?Sized + 'static>(
    matchers: impl IntoIterator<Item = Arc<dyn Matcher<T>>>,
) -> Arc<dyn Matcher<T>> {
    Arc::new(AllOf {
        matchers: matchers.into_iter().collect(),
    })
}

/// Matches when at least one matcher matches
#[must_use]
pub fn any_of<T: ?Sized + 'static>(
    matchers: impl IntoIterator<Item = Arc<dyn Matcher<T>>>,
) -> Arc<dyn Matcher<T>> {
    Arc::new(AnyOf {
        matchers: matchers.into_iter().collect(),
    })
}

/// Inverts a matcher
#[must_use]
pub fn not<T: ?Sized + 'static>(matcher: Arc<dyn Matcher<T>>) -> Arc<dyn Matcher<T>> {
    Arc::new(Not { inner: matcher })
}

/// Matches everything
#[must_use]
pub fn anything<T: ?Sized + 'static>() -> Arc<dyn Matcher<T>> {
    Arc::new(Anything)
}
