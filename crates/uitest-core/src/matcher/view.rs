//! View matchers.

use super::{equal_to, Description, Matcher, TextMatcher, ViewMatcher};
use crate::view::{ViewKind, ViewNode};
use std::sync::Arc;

/// Description of the matcher behind restricted menu-item contexts
pub const RESTRICTED_ACCESS_MESSAGE: &str =
    "Use element.actions() syntax. Direct access restricted for menu items";

fn describe_view_mismatch(item: &ViewNode, description: &mut Description) {
    description.append_text("was ").append_text(&item.summary());
}

/// Generates a matcher struct that applies a [`TextMatcher`] to one optional
/// string property of a view.
macro_rules! text_property_matcher {
    ($name:ident, $label:literal, |$view:ident| $access:expr) => {
        struct $name(TextMatcher);

        impl Matcher<ViewNode> for $name {
            fn matches(&self, item: &ViewNode) -> bool {
                let $view = item;
                ($access).is_some_and(|value: &str| self.0.matches(value))
            }

            fn describe_to(&self, description: &mut Description) {
                description
                    .append_text($label)
                    .append_description_of(self.0.as_ref());
            }

            fn describe_mismatch(&self, item: &ViewNode, description: &mut Description) {
                describe_view_mismatch(item, description);
            }
        }
    };
}

text_property_matcher!(WithText, "with text: ", |node| node.view().text.as_deref());
text_property_matcher!(WithContentDescription, "with content description: ", |node| node
    .view()
    .content_description
    .as_deref());
text_property_matcher!(WithClassName, "with class name: ", |node| Some(
    node.view().class_name()
));
text_property_matcher!(WithHint, "with hint: ", |node| node
    .kind()
    .is_a(ViewKind::TextView)
    .then(|| node.view().hint.as_deref())
    .flatten());
text_property_matcher!(ToolbarTitle, "with toolbar title: ", |node| node
    .view()
    .toolbar
    .as_ref()
    .and_then(|t| t.title.as_deref()));
text_property_matcher!(ToolbarSubtitle, "with toolbar subtitle: ", |node| node
    .view()
    .toolbar
    .as_ref()
    .and_then(|t| t.subtitle.as_deref()));

/// Matches text fields whose hint ends with a suffix
#[derive(Debug, Clone)]
pub struct WithHintEnding {
    hint: String,
}

impl WithHintEnding {
    /// Create the matcher
    #[must_use]
    pub fn new(hint: impl Into<String>) -> Self {
        Self { hint: hint.into() }
    }
}

impl Matcher<ViewNode> for WithHintEnding {
    fn matches(&self, item: &ViewNode) -> bool {
        item.kind().is_a(ViewKind::TextView)
            && item
                .view()
                .hint
                .as_deref()
                .is_some_and(|hint| hint.ends_with(&self.hint))
    }

    fn describe_to(&self, description: &mut Description) {
        description.append_text("ends with hint: ").append_text(&self.hint);
    }

    fn describe_mismatch(&self, item: &ViewNode, description: &mut Description) {
        describe_view_mismatch(item, description);
    }
}

struct WithId(String);

impl Matcher<ViewNode> for WithId {
    fn matches(&self, item: &ViewNode) -> bool {
        item.view().id.as_deref() == Some(self.0.as_str())
    }

    fn describe_to(&self, description: &mut Description) {
        description.append_text("with id: ").append_value(&self.0);
    }

    fn describe_mismatch(&self, item: &ViewNode, description: &mut Description) {
        describe_view_mismatch(item, description);
    }
}

struct HasNoId;

impl Matcher<ViewNode> for HasNoId {
    fn matches(&self, item: &ViewNode) -> bool {
        item.view().id.is_none()
    }

    fn describe_to(&self, description: &mut Description) {
        description.append_text("has no id");
    }
}

struct IsAssignableFrom(ViewKind);

impl Matcher<ViewNode> for IsAssignableFrom {
    fn matches(&self, item: &ViewNode) -> bool {
        item.kind().is_a(self.0)
    }

    fn describe_to(&self, description: &mut Description) {
        description
            .append_text("is assignable from class: ")
            .append_text(self.0.class_name());
    }

    fn describe_mismatch(&self, item: &ViewNode, description: &mut Description) {
        describe_view_mismatch(item, description);
    }
}

struct IsDisplayed;

impl Matcher<ViewNode> for IsDisplayed {
    fn matches(&self, item: &ViewNode) -> bool {
        item.is_displayed()
    }

    fn describe_to(&self, description: &mut Description) {
        description.append_text("is displayed on the screen to the user");
    }

    fn describe_mismatch(&self, item: &ViewNode, description: &mut Description) {
        describe_view_mismatch(item, description);
    }
}

struct IsEnabled;

impl Matcher<ViewNode> for IsEnabled {
    fn matches(&self, item: &ViewNode) -> bool {
        item.view().enabled
    }

    fn describe_to(&self, description: &mut Description) {
        description.append_text("is enabled");
    }

    fn describe_mismatch(&self, item: &ViewNode, description: &mut Description) {
        describe_view_mismatch(item, description);
    }
}

struct IsDescendantOfA(ViewMatcher);

impl Matcher<ViewNode> for IsDescendantOfA {
    fn matches(&self, item: &ViewNode) -> bool {
        item.ancestors().any(|ancestor| self.0.matches(&ancestor))
    }

    fn describe_to(&self, description: &mut Description) {
        description
            .append_text("is descendant of a: ")
            .append_description_of(self.0.as_ref());
    }
}

struct WithParent(ViewMatcher);

impl Matcher<ViewNode> for WithParent {
    fn matches(&self, item: &ViewNode) -> bool {
        item.parent().is_some_and(|parent| self.0.matches(&parent))
    }

    fn describe_to(&self, description: &mut Description) {
        description
            .append_text("has parent matching: ")
            .append_description_of(self.0.as_ref());
    }
}

struct HasDescendant(ViewMatcher);

impl Matcher<ViewNode> for HasDescendant {
    fn matches(&self, item: &ViewNode) -> bool {
        item.descendants().any(|child| self.0.matches(&child))
    }

    fn describe_to(&self, description: &mut Description) {
        description
            .append_text("has descendant: ")
            .append_description_of(self.0.as_ref());
    }
}

#[derive(Clone, Copy)]
enum ToolbarLine {
    Title,
    Subtitle,
}

/// Toolbar title/subtitle compared against a string resource of the app
struct ToolbarTextRes {
    line: ToolbarLine,
    res_id: u32,
}

impl Matcher<ViewNode> for ToolbarTextRes {
    fn matches(&self, item: &ViewNode) -> bool {
        let Some(expected) = item.resources().string(self.res_id) else {
            return false;
        };
        let actual = item.view().toolbar.as_ref().and_then(|t| match self.line {
            ToolbarLine::Title => t.title.as_deref(),
            ToolbarLine::Subtitle => t.subtitle.as_deref(),
        });
        actual == Some(expected)
    }

    fn describe_to(&self, description: &mut Description) {
        let line = match self.line {
            ToolbarLine::Title => "title",
            ToolbarLine::Subtitle => "subtitle",
        };
        description.append_text(&format!(
            "with toolbar {line} from resource id: {}",
            self.res_id
        ));
    }

    fn describe_mismatch(&self, item: &ViewNode, description: &mut Description) {
        if item.resources().string(self.res_id).is_none() {
            description.append_text(&format!("resource id {} is unknown", self.res_id));
        } else {
            describe_view_mismatch(item, description);
        }
    }
}

struct RestrictedDirectAccess;

impl Matcher<ViewNode> for RestrictedDirectAccess {
    fn matches(&self, _item: &ViewNode) -> bool {
        false
    }

    fn describe_to(&self, description: &mut Description) {
        description.append_text(RESTRICTED_ACCESS_MESSAGE);
    }
}

/// View with resource id `id`
#[must_use]
pub fn with_id(id: impl Into<String>) -> ViewMatcher {
    Arc::new(WithId(id.into()))
}

/// View without a resource id
#[must_use]
pub fn has_no_id() -> ViewMatcher {
    Arc::new(HasNoId)
}

/// View whose text equals `text`
#[must_use]
pub fn with_text(text: impl Into<String>) -> ViewMatcher {
    with_text_matching(equal_to(text))
}

/// View whose text satisfies `matcher`
#[must_use]
pub fn with_text_matching(matcher: TextMatcher) -> ViewMatcher {
    Arc::new(WithText(matcher))
}

/// Text field whose hint equals `hint`
#[must_use]
pub fn with_hint(hint: impl Into<String>) -> ViewMatcher {
    with_hint_matching(equal_to(hint))
}

/// Text field whose hint satisfies `matcher`
#[must_use]
pub fn with_hint_matching(matcher: TextMatcher) -> ViewMatcher {
    Arc::new(WithHint(matcher))
}

/// Text field whose hint ends with `hint`
#[must_use]
pub fn with_hint_ending(hint: impl Into<String>) -> ViewMatcher {
    Arc::new(WithHintEnding::new(hint))
}

/// View whose content description equals `description`
#[must_use]
pub fn with_content_description(description: impl Into<String>) -> ViewMatcher {
    with_content_description_matching(equal_to(description))
}

/// View whose content description satisfies `matcher`
#[must_use]
pub fn with_content_description_matching(matcher: TextMatcher) -> ViewMatcher {
    Arc::new(WithContentDescription(matcher))
}

/// View whose class name satisfies `matcher`
#[must_use]
pub fn with_class_name(matcher: TextMatcher) -> ViewMatcher {
    Arc::new(WithClassName(matcher))
}

/// View of kind `kind` or one of its subclasses
#[must_use]
pub fn is_assignable_from(kind: ViewKind) -> ViewMatcher {
    Arc::new(IsAssignableFrom(kind))
}

/// View visible together with all of its ancestors
#[must_use]
pub fn is_displayed() -> ViewMatcher {
    Arc::new(IsDisplayed)
}

/// Enabled view
#[must_use]
pub fn is_enabled() -> ViewMatcher {
    Arc::new(IsEnabled)
}

/// View with some ancestor matching `ancestor`
#[must_use]
pub fn is_descendant_of_a(ancestor: ViewMatcher) -> ViewMatcher {
    Arc::new(IsDescendantOfA(ancestor))
}

/// Direct child of a view matching `parent`
#[must_use]
pub fn with_parent(parent: ViewMatcher) -> ViewMatcher {
    Arc::new(WithParent(parent))
}

/// View with some descendant matching `descendant`
#[must_use]
pub fn has_descendant(descendant: ViewMatcher) -> ViewMatcher {
    Arc::new(HasDescendant(descendant))
}

/// Toolbar whose title satisfies `matcher`
#[must_use]
pub fn toolbar_title(matcher: TextMatcher) -> ViewMatcher {
    Arc::new(ToolbarTitle(matcher))
}

/// Toolbar whose subtitle satisfies `matcher`
#[must_use]
pub fn toolbar_subtitle(matcher: TextMatcher) -> ViewMatcher {
    Arc::new(ToolbarSubtitle(matcher))
}

/// Toolbar whose title equals string resource `res_id`
#[must_use]
pub fn toolbar_title_res(res_id: u32) -> ViewMatcher {
    Arc::new(ToolbarTextRes {
        line: ToolbarLine::Title,
        res_id,
    })
}

/// Toolbar whose subtitle equals string resource `res_id`
#[must_use]
pub fn toolbar_subtitle_res(res_id: u32) -> ViewMatcher {
    Arc::new(ToolbarTextRes {
        line: ToolbarLine::Subtitle,
        res_id,
    })
}

/// Matches nothing; its description tells the caller to go through
/// `actions()` / `checks()` instead
#[must_use]
pub fn restricted_direct_access() -> ViewMatcher {
    Arc::new(RestrictedDirectAccess)
}
