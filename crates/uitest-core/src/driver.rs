//! UiDriver - the seam to the UI automation backend
//!
//! Everything above this module (interaction contexts, page objects, the
//! toolbar overflow routing) talks to the screen only through [`UiDriver`].
//! A backend supplies three primitives: a hierarchy snapshot, raw dispatch of
//! an action onto one view, and back navigation. Locating, action
//! constraints, assertion evaluation and reading toolbar menus are provided
//! on top of those.

use crate::matcher::{describe, Matcher, ViewMatcher};
use crate::result::{UiTestError, UiTestResult};
use crate::view::{MenuEntry, ToolbarState, ViewKind, ViewNode, ViewTree};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

// =============================================================================
// LOCATOR
// =============================================================================

/// Resolved form of an interaction context
///
/// A matcher, optionally restricted to descendants of the views found by a
/// scope locator, optionally picking the n-th match in hierarchy order
/// instead of requiring a unique one.
#[derive(Debug, Clone)]
pub struct Locator {
    matcher: ViewMatcher,
    scope: Option<Box<Locator>>,
    position: Option<usize>,
}

impl Locator {
    /// Locate views matching `matcher` anywhere in the hierarchy
    #[must_use]
    pub fn new(matcher: ViewMatcher) -> Self {
        Self {
            matcher,
            scope: None,
            position: None,
        }
    }

    /// Restrict to descendants of views found by `scope`
    #[must_use]
    pub fn within(mut self, scope: Locator) -> Self {
        self.scope = Some(Box::new(scope));
        self
    }

    /// Pick the `position`-th match instead of requiring a unique one
    #[must_use]
    pub const fn at_position(mut self, position: usize) -> Self {
        self.position = Some(position);
        self
    }

    /// The view matcher
    #[must_use]
    pub const fn matcher(&self) -> &ViewMatcher {
        &self.matcher
    }

    /// The scope locator, if any
    #[must_use]
    pub fn scope(&self) -> Option<&Locator> {
        self.scope.as_deref()
    }

    /// The position, if any
    #[must_use]
    pub const fn position(&self) -> Option<usize> {
        self.position
    }

    /// Human readable description of the whole chain
    #[must_use]
    pub fn description(&self) -> String {
        let mut text = describe(self.matcher.as_ref());
        if let Some(scope) = &self.scope {
            text.push_str(&format!(", descendant of ({})", scope.description()));
        }
        if let Some(position) = self.position {
            text.push_str(&format!(", at position {position}"));
        }
        text
    }

    /// All views located in `tree`, in hierarchy order
    #[must_use]
    pub fn resolve(&self, tree: &ViewTree) -> Vec<ViewNode> {
        let scopes = self.scope.as_ref().map(|scope| scope.resolve(tree));
        let candidates = tree.nodes().filter(|node| {
            let in_scope = scopes
                .as_ref()
                .map_or(true, |scopes| scopes.iter().any(|s| node.is_descendant_of(s)));
            in_scope && self.matcher.matches(node)
        });
        match self.position {
            Some(position) => candidates.skip(position).take(1).collect(),
            None => candidates.collect(),
        }
    }

    /// The single located view
    pub fn find_unique(&self, tree: &ViewTree) -> UiTestResult<ViewNode> {
        let mut found = self.resolve(tree);
        match found.len() {
            0 => {
                debug!(hierarchy = %tree.render(), "no matching view");
                Err(UiTestError::NoMatchingView {
                    description: self.description(),
                })
            }
            1 => Ok(found.remove(0)),
            count => Err(UiTestError::AmbiguousMatch {
                description: self.description(),
                count,
            }),
        }
    }
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.description())
    }
}

// =============================================================================
// ACTIONS
// =============================================================================

/// An action performed on a single view
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewAction {
    /// Single tap
    Click,
    /// Long press
    LongClick,
    /// Append text
    TypeText(String),
    /// Replace the whole text
    ReplaceText(String),
    /// Clear the text
    ClearText,
    /// Scroll the view into the visible area
    ScrollTo,
    /// Press the IME action button
    PressImeAction,
}

impl ViewAction {
    /// Description used in logs and errors
    #[must_use]
    pub fn description(&self) -> String {
        match self {
            Self::Click => "single click".to_string(),
            Self::LongClick => "long click".to_string(),
            Self::TypeText(text) => format!("type text({text})"),
            Self::ReplaceText(text) => format!("replace text({text})"),
            Self::ClearText => "clear text".to_string(),
            Self::ScrollTo => "scroll to".to_string(),
            Self::PressImeAction => "press IME action".to_string(),
        }
    }

    const fn needs_text_input(&self) -> bool {
        matches!(
            self,
            Self::TypeText(_) | Self::ReplaceText(_) | Self::ClearText | Self::PressImeAction
        )
    }

    /// Check the target satisfies this action's constraints
    pub fn validate(&self, target: &ViewNode) -> UiTestResult<()> {
        let reject = |reason: &str| UiTestError::ActionRejected {
            action: self.description(),
            view: target.summary(),
            reason: reason.to_string(),
        };

        if !matches!(self, Self::ScrollTo) && !target.is_displayed() {
            return Err(reject("view is not displayed on the screen"));
        }
        if self.needs_text_input() && !target.kind().is_a(ViewKind::EditText) {
            return Err(reject("view does not support input methods"));
        }
        Ok(())
    }
}

impl fmt::Display for ViewAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.description())
    }
}

// =============================================================================
// ASSERTIONS
// =============================================================================

/// An assertion evaluated against the located view
#[derive(Debug, Clone)]
pub enum ViewAssertion {
    /// Exactly one view is located
    Exists,
    /// No view is located
    DoesNotExist,
    /// Exactly one view is located and it satisfies the matcher
    Matches(ViewMatcher),
}

impl ViewAssertion {
    /// Shorthand for [`ViewAssertion::Matches`]
    #[must_use]
    pub fn matches(matcher: ViewMatcher) -> Self {
        Self::Matches(matcher)
    }

    /// Description used in logs and errors
    #[must_use]
    pub fn description(&self) -> String {
        match self {
            Self::Exists => "exists".to_string(),
            Self::DoesNotExist => "does not exist".to_string(),
            Self::Matches(matcher) => format!("matches {}", describe(matcher.as_ref())),
        }
    }

    /// Evaluate against the views `locator` finds in `tree`
    pub fn evaluate(&self, tree: &ViewTree, locator: &Locator) -> UiTestResult<()> {
        match self {
            Self::Exists => locator.find_unique(tree).map(|_| ()),
            Self::DoesNotExist => match locator.resolve(tree).first() {
                None => Ok(()),
                Some(node) => Err(UiTestError::assertion(format!(
                    "View is present in the hierarchy: {}",
                    node.summary()
                ))),
            },
            Self::Matches(matcher) => {
                let node = locator.find_unique(tree)?;
                if matcher.matches(&node) {
                    return Ok(());
                }
                let mut mismatch = crate::matcher::Description::new();
                matcher.describe_mismatch(&node, &mut mismatch);
                let expected = describe(matcher.as_ref());
                Err(UiTestError::assertion(format!(
                    "'{expected}' doesn't match the selected view.\nExpected: {expected}\n     Got: {}\n    ({mismatch})",
                    node.summary()
                )))
            }
        }
    }
}

impl fmt::Display for ViewAssertion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.description())
    }
}

// =============================================================================
// TOOLBAR MENU
// =============================================================================

/// Snapshot of a toolbar's visible menu items
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolbarMenu {
    /// Visible items in declaration order
    pub items: Vec<MenuEntry>,
}

impl ToolbarMenu {
    /// Collect the visible items of a toolbar
    #[must_use]
    pub fn from_state(state: &ToolbarState) -> Self {
        Self {
            items: state.menu.iter().filter(|e| e.visible).cloned().collect(),
        }
    }

    /// Read the menu of the unique toolbar `toolbar` locates in `tree`
    pub fn read(tree: &ViewTree, toolbar: &Locator) -> UiTestResult<Self> {
        let node = toolbar.find_unique(tree)?;
        node.view()
            .toolbar
            .as_ref()
            .map(Self::from_state)
            .ok_or_else(|| UiTestError::ActionRejected {
                action: "read toolbar menu items".to_string(),
                view: node.summary(),
                reason: "view is not a toolbar".to_string(),
            })
    }

    /// Items currently shown on the toolbar
    pub fn shown_items(&self) -> impl Iterator<Item = &MenuEntry> {
        self.items.iter().filter(|e| !e.is_hidden())
    }

    /// Items currently hidden in the overflow menu
    pub fn hidden_items(&self) -> impl Iterator<Item = &MenuEntry> {
        self.items.iter().filter(|e| e.is_hidden())
    }

    /// Whether an overflow item's title satisfies `title`
    #[must_use]
    pub fn has_hidden_item(&self, title: &dyn Matcher<str>) -> bool {
        self.hidden_items().any(|e| title.matches(&e.title))
    }
}

// =============================================================================
// DRIVER TRAIT
// =============================================================================

/// UI automation backend
pub trait UiDriver {
    /// Snapshot of the current hierarchy
    fn hierarchy(&self) -> UiTestResult<ViewTree>;

    /// Deliver `action` to `target`; constraints are already checked
    fn dispatch(&mut self, target: &ViewNode, action: &ViewAction) -> UiTestResult<()>;

    /// Simulated device back button
    fn press_back(&mut self) -> UiTestResult<()>;

    /// Locate the unique target and perform `action` on it
    fn perform(&mut self, locator: &Locator, action: &ViewAction) -> UiTestResult<()> {
        let tree = self.hierarchy()?;
        let target = locator.find_unique(&tree)?;
        action.validate(&target)?;
        debug!(action = %action, target = %target.summary(), "performing action");
        self.dispatch(&target, action)
    }

    /// Evaluate `assertion` against the views `locator` finds
    fn check(&mut self, locator: &Locator, assertion: &ViewAssertion) -> UiTestResult<()> {
        let tree = self.hierarchy()?;
        assertion.evaluate(&tree, locator)
    }

    /// Read the menu items of the unique toolbar `toolbar` locates
    fn read_toolbar_menu(&mut self, toolbar: &Locator) -> UiTestResult<ToolbarMenu> {
        let tree = self.hierarchy()?;
        ToolbarMenu::read(&tree, toolbar)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::matcher::{equal_to, is_displayed, not, with_id, with_text};
    use crate::view::View;

    fn tree() -> ViewTree {
        ViewTree::from_root(
            View::group([
                View::group([View::text_view("Row").with_id("label")]).with_id("first"),
                View::group([View::text_view("Row").with_id("label")]).with_id("second"),
                View::new(ViewKind::EditText).with_id("query").hidden(),
                View::toolbar(
                    ToolbarState::titled("Inbox")
                        .with_action("Search")
                        .with_overflow_item("Archive")
                        .with_entry(MenuEntry::overflow("Debug").invisible()),
                )
                .with_id("toolbar"),
            ]),
        )
    }

    mod locator_tests {
        use super::*;

        #[test]
        fn test_unique_match() {
            let tree = tree();
            let node = Locator::new(with_id("first")).find_unique(&tree).unwrap();
            assert_eq!(node.view().id.as_deref(), Some("first"));
        }

        #[test]
        fn test_ambiguous_match() {
            let tree = tree();
            let err = Locator::new(with_text("Row")).find_unique(&tree).unwrap_err();
            assert!(matches!(err, UiTestError::AmbiguousMatch { count: 2, .. }));
        }

        #[test]
        fn test_scope_disambiguates() {
            let tree = tree();
            let locator = Locator::new(with_text("Row")).within(Locator::new(with_id("second")));
            let node = locator.find_unique(&tree).unwrap();
            assert_eq!(node.path(), &[0, 1, 0]);
        }

        #[test]
        fn test_position_picks_nth() {
            let tree = tree();
            let locator = Locator::new(with_text("Row")).at_position(1);
            assert_eq!(locator.find_unique(&tree).unwrap().path(), &[0, 1, 0]);
            let past_end = Locator::new(with_text("Row")).at_position(5);
            assert!(past_end.resolve(&tree).is_empty());
        }

        #[test]
        fn test_no_match_describes_chain() {
            let tree = tree();
            let locator = Locator::new(with_text("Missing"))
                .within(Locator::new(with_id("first")))
                .at_position(0);
            let err = locator.find_unique(&tree).unwrap_err();
            assert_eq!(
                err.to_string(),
                "No views in hierarchy found matching: with text: is \"Missing\", descendant of (with id: \"first\"), at position 0"
            );
        }
    }

    mod action_tests {
        use super::*;

        #[test]
        fn test_text_actions_need_edit_text() {
            let tree = tree();
            let label = Locator::new(with_id("first")).find_unique(&tree).unwrap();
            let err = ViewAction::TypeText("x".into()).validate(&label).unwrap_err();
            assert!(err.to_string().contains("does not support input methods"));
            assert!(ViewAction::Click.validate(&label).is_ok());
        }

        #[test]
        fn test_hidden_view_rejected_except_scroll() {
            let tree = tree();
            let query = Locator::new(with_id("query")).find_unique(&tree).unwrap();
            assert!(ViewAction::Click.validate(&query).is_err());
            assert!(ViewAction::ScrollTo.validate(&query).is_ok());
        }

        #[test]
        fn test_descriptions() {
            assert_eq!(ViewAction::Click.to_string(), "single click");
            assert_eq!(
                ViewAction::TypeText("hello".into()).to_string(),
                "type text(hello)"
            );
        }
    }

    mod assertion_tests {
        use super::*;

        #[test]
        fn test_exists_and_does_not_exist() {
            let tree = tree();
            assert!(ViewAssertion::Exists
                .evaluate(&tree, &Locator::new(with_id("first")))
                .is_ok());
            assert!(ViewAssertion::DoesNotExist
                .evaluate(&tree, &Locator::new(with_id("nope")))
                .is_ok());
            let err = ViewAssertion::DoesNotExist
                .evaluate(&tree, &Locator::new(with_id("first")))
                .unwrap_err();
            assert!(err.to_string().contains("View is present in the hierarchy"));
        }

        #[test]
        fn test_matches_failure_message() {
            let tree = tree();
            let err = ViewAssertion::matches(is_displayed())
                .evaluate(&tree, &Locator::new(with_id("query")))
                .unwrap_err();
            let message = err.to_string();
            assert!(message.contains("Expected: is displayed on the screen to the user"));
            assert!(message.contains("Got: EditText{id=query, visible=false}"));
        }

        #[test]
        fn test_matches_success() {
            let tree = tree();
            assert!(ViewAssertion::matches(not(is_displayed()))
                .evaluate(&tree, &Locator::new(with_id("query")))
                .is_ok());
        }
    }

    mod toolbar_menu_tests {
        use super::*;

        #[test]
        fn test_read_menu_skips_invisible_items() {
            let tree = tree();
            let menu = ToolbarMenu::read(&tree, &Locator::new(with_id("toolbar"))).unwrap();
            assert_eq!(menu.items.len(), 2);
            assert_eq!(menu.shown_items().count(), 1);
            assert!(menu.has_hidden_item(equal_to("Archive").as_ref()));
            assert!(!menu.has_hidden_item(equal_to("Search").as_ref()));
            assert!(!menu.has_hidden_item(equal_to("Debug").as_ref()));
        }

        #[test]
        fn test_read_menu_on_non_toolbar() {
            let tree = tree();
            let err = ToolbarMenu::read(&tree, &Locator::new(with_id("first"))).unwrap_err();
            assert!(matches!(err, UiTestError::ActionRejected { .. }));
        }
    }
}
