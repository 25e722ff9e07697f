//! Page Object Model support
//!
//! Elements bundle an [`InteractionContext`] with the [`Actionable`] and
//! [`Checkable`] capabilities. A [`PageObject`] groups the elements of one
//! screen under a root matcher, so every element it hands out is scoped to
//! that screen.
//!
//! # Example
//!
//! ```ignore
//! struct LoginPage;
//!
//! impl PageObject for LoginPage {
//!     fn root_matcher(&self) -> ViewMatcher {
//!         with_id("login_root")
//!     }
//! }
//!
//! impl LoginPage {
//!     fn username(&self) -> InputElement {
//!         InputElement::from_context(self.root_context().provide_child_context(with_id("username")))
//!     }
//! }
//!
//! let page = LoginPage;
//! page.wait_until_loaded(&mut device)?;
//! page.username().write(&mut device, "ferris")?;
//! ```

use crate::action::{Actionable, Actions, ActionsDriver, ActionsImpl};
use crate::checks::{Checkable, Checks, ChecksDriver, ChecksImpl};
use crate::context::{InteractionContext, Locatable};
use crate::driver::{Locator, UiDriver, ViewAction, ViewAssertion};
use crate::matcher::{self, ViewMatcher};
use crate::result::UiTestResult;
use crate::wait::{wait_for, WaitOptions};
use std::sync::Arc;
use tracing::debug;

// =============================================================================
// GENERIC ELEMENT
// =============================================================================

/// Any element of a page
#[derive(Debug, Clone)]
pub struct PageObjectElement {
    context: InteractionContext,
}

impl PageObjectElement {
    /// Element located by `matcher` anywhere in the hierarchy
    #[must_use]
    pub fn new(matcher: ViewMatcher) -> Self {
        Self::from_context(InteractionContext::new(matcher))
    }

    /// Element located by an existing context
    #[must_use]
    pub const fn from_context(context: InteractionContext) -> Self {
        Self { context }
    }

    /// Descendant element located by `matcher`
    #[must_use]
    pub fn child(&self, matcher: ViewMatcher) -> Self {
        Self::from_context(self.context.provide_child_context(matcher))
    }

    /// Shorthand for `actions().click(ui)`
    pub fn click(&self, ui: &mut dyn UiDriver) -> UiTestResult<()> {
        self.actions().click(ui)
    }
}

impl Locatable for PageObjectElement {
    fn interaction_context(&self) -> &InteractionContext {
        &self.context
    }
}

impl Actionable for PageObjectElement {
    type Actions = ActionsImpl<InteractionContext>;

    fn actions(&self) -> Self::Actions {
        ActionsImpl::new(self.context.clone())
    }
}

impl Checkable for PageObjectElement {
    type Checks = ChecksImpl<InteractionContext>;

    fn checks(&self) -> Self::Checks {
        ChecksImpl::new(self.context.clone())
    }
}

// =============================================================================
// INPUT ELEMENT
// =============================================================================

/// Editable text field
#[derive(Debug, Clone)]
pub struct InputElement {
    context: InteractionContext,
}

impl InputElement {
    /// Input located by `matcher`
    #[must_use]
    pub fn new(matcher: ViewMatcher) -> Self {
        Self::from_context(InteractionContext::new(matcher))
    }

    /// Input located by an existing context
    #[must_use]
    pub const fn from_context(context: InteractionContext) -> Self {
        Self { context }
    }

    /// Replace the field's content by clearing then typing
    pub fn write(&self, ui: &mut dyn UiDriver, text: &str) -> UiTestResult<()> {
        let actions = self.actions();
        actions.clear_text(ui)?;
        actions.type_text(ui, text)
    }
}

impl Locatable for InputElement {
    fn interaction_context(&self) -> &InteractionContext {
        &self.context
    }
}

impl Actionable for InputElement {
    type Actions = ActionsImpl<InteractionContext>;

    fn actions(&self) -> Self::Actions {
        ActionsImpl::new(self.context.clone())
    }
}

impl Checkable for InputElement {
    type Checks = InputChecks;

    fn checks(&self) -> Self::Checks {
        InputChecks {
            inner: ChecksImpl::new(self.context.clone()),
        }
    }
}

/// Checks of an [`InputElement`], adding hint assertions
#[derive(Debug, Clone)]
pub struct InputChecks {
    inner: ChecksImpl<InteractionContext>,
}

impl InputChecks {
    /// The hint equals `hint`
    pub fn with_hint(&self, ui: &mut dyn UiDriver, hint: &str) -> UiTestResult<()> {
        self.matches(ui, matcher::with_hint(hint))
    }

    /// The hint ends with `suffix`
    pub fn with_hint_ending(&self, ui: &mut dyn UiDriver, suffix: &str) -> UiTestResult<()> {
        self.matches(ui, matcher::with_hint_ending(suffix))
    }
}

impl Checks for InputChecks {
    fn check(&self, ui: &mut dyn UiDriver, assertion: ViewAssertion) -> UiTestResult<()> {
        self.inner.check(ui, assertion)
    }
}

// =============================================================================
// LIST ELEMENT
// =============================================================================

/// List or recycler view
#[derive(Debug, Clone)]
pub struct ListElement {
    context: InteractionContext,
}

impl ListElement {
    /// List located by `matcher`
    #[must_use]
    pub fn new(matcher: ViewMatcher) -> Self {
        Self::from_context(InteractionContext::new(matcher))
    }

    /// List located by an existing context
    #[must_use]
    pub const fn from_context(context: InteractionContext) -> Self {
        Self { context }
    }

    /// Checks on the `child` view of the first item matching `item`
    #[must_use]
    pub fn item_checks(&self, item: ViewMatcher, child: ViewMatcher) -> ChecksImpl<ListItemDriver> {
        ChecksImpl::new(self.item_driver(item, child))
    }

    /// Actions on the `child` view of the first item matching `item`
    #[must_use]
    pub fn item_actions(&self, item: ViewMatcher, child: ViewMatcher) -> ActionsImpl<ListItemDriver> {
        ActionsImpl::new(self.item_driver(item, child))
    }

    fn item_driver(&self, item: ViewMatcher, child: ViewMatcher) -> ListItemDriver {
        ListItemDriver {
            list: self.context.clone(),
            item,
            child,
        }
    }
}

impl Locatable for ListElement {
    fn interaction_context(&self) -> &InteractionContext {
        &self.context
    }
}

impl Actionable for ListElement {
    type Actions = ActionsImpl<InteractionContext>;

    fn actions(&self) -> Self::Actions {
        ActionsImpl::new(self.context.clone())
    }
}

impl Checkable for ListElement {
    type Checks = ChecksImpl<InteractionContext>;

    fn checks(&self) -> Self::Checks {
        ChecksImpl::new(self.context.clone())
    }
}

/// Routes to a view inside the first matching list item
///
/// Items are direct children of the list; nested views matching the item
/// matcher are not items.
#[derive(Debug, Clone)]
pub struct ListItemDriver {
    list: InteractionContext,
    item: ViewMatcher,
    child: ViewMatcher,
}

impl ListItemDriver {
    /// Locator of the child view
    #[must_use]
    pub fn locator(&self) -> Locator {
        let item = Locator::new(matcher::all_of([
            matcher::with_parent(Arc::clone(self.list.matcher())),
            Arc::clone(&self.item),
        ]))
        .within(self.list.locator())
            .at_position(0);
        Locator::new(Arc::clone(&self.child)).within(item)
    }
}

impl ActionsDriver for ListItemDriver {
    fn perform_action(&self, ui: &mut dyn UiDriver, action: &ViewAction) -> UiTestResult<()> {
        ui.perform(&self.locator(), action)
    }
}

impl ChecksDriver for ListItemDriver {
    fn check_assertion(&self, ui: &mut dyn UiDriver, assertion: &ViewAssertion) -> UiTestResult<()> {
        ui.check(&self.locator(), assertion)
    }
}

// =============================================================================
// PAGE OBJECT
// =============================================================================

/// A screen of the app under test
pub trait PageObject {
    /// Matcher for the screen's root view
    fn root_matcher(&self) -> ViewMatcher;

    /// Page name for logging
    fn page_name(&self) -> &str {
        std::any::type_name::<Self>()
    }

    /// Budget for [`Self::wait_until_loaded`]
    fn load_options(&self) -> WaitOptions {
        WaitOptions::default()
    }

    /// Context of the root view
    fn root_context(&self) -> InteractionContext {
        InteractionContext::new(self.root_matcher())
    }

    /// Element inside this page
    fn element(&self, matcher: ViewMatcher) -> PageObjectElement {
        PageObjectElement::from_context(self.root_context().provide_child_context(matcher))
    }

    /// Whether the root view is displayed right now
    fn is_loaded(&self, ui: &mut dyn UiDriver) -> bool {
        ui.check(
            &self.root_context().locator(),
            &ViewAssertion::matches(matcher::is_displayed()),
        )
        .is_ok()
    }

    /// Poll until the root view is displayed
    fn wait_until_loaded(&self, ui: &mut dyn UiDriver) -> UiTestResult<()> {
        let locator = self.root_context().locator();
        let displayed = ViewAssertion::matches(matcher::is_displayed());
        wait_for(&self.load_options(), || ui.check(&locator, &displayed))?;
        debug!(page = self.page_name(), "page loaded");
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::device::MockDevice;
    use crate::matcher::{with_id, with_text};
    use crate::view::{View, ViewKind};

    fn login_screen() -> View {
        View::group([
            View::new(ViewKind::EditText)
                .with_id("username")
                .with_hint("Enter your username"),
            View::new(ViewKind::Button).with_id("submit").with_text("Sign in"),
            View::new(ViewKind::ListView).with_id("accounts").with_children([
                View::group([View::text_view("alice"), View::text_view("admin")]),
                View::group([View::text_view("bob"), View::text_view("guest")]),
            ]),
        ])
        .with_id("login_root")
    }

    struct LoginPage;

    impl PageObject for LoginPage {
        fn root_matcher(&self) -> ViewMatcher {
            with_id("login_root")
        }

        fn load_options(&self) -> WaitOptions {
            WaitOptions::new().with_frequency(5).with_timeout(20)
        }
    }

    mod element_tests {
        use super::*;

        #[test]
        fn test_child_element_click() {
            let mut ui = MockDevice::new(login_screen());
            let submit = LoginPage.element(with_id("submit"));
            submit.click(&mut ui).unwrap();
            submit.checks().with_text(&mut ui, "Sign in").unwrap();
            assert_eq!(
                submit.locator().description(),
                "with id: \"submit\", descendant of (with id: \"login_root\")"
            );
        }

        #[test]
        fn test_input_write_and_hint() {
            let mut ui = MockDevice::new(login_screen());
            let username = InputElement::new(with_id("username"));
            username.write(&mut ui, "ferris").unwrap();
            username.write(&mut ui, "crab").unwrap();
            username.checks().with_text(&mut ui, "crab").unwrap();
            username.checks().with_hint_ending(&mut ui, "username").unwrap();
            assert!(username.checks().with_hint(&mut ui, "Password").is_err());
        }

        #[test]
        fn test_list_item_checks_use_first_matching_item() {
            let mut ui = MockDevice::new(login_screen());
            let accounts = ListElement::new(with_id("accounts"));
            let any_row = matcher::anything();
            accounts
                .item_checks(Arc::clone(&any_row), with_text("admin"))
                .exists(&mut ui)
                .unwrap();
            let bob_row = matcher::has_descendant(with_text("bob"));
            accounts
                .item_checks(bob_row, with_text("guest"))
                .is_displayed(&mut ui)
                .unwrap();
            assert!(accounts
                .item_checks(any_row, with_text("guest"))
                .exists(&mut ui)
                .is_err());
        }

        #[test]
        fn test_list_items_are_direct_children() {
            let on_sale = || matcher::with_content_description("Sale");
            let mut ui = MockDevice::new(View::group([View::new(ViewKind::RecyclerView)
                .with_id("offers")
                .with_children([
                    View::group([
                        View::new(ViewKind::ImageView).with_content_description("Sale"),
                        View::text_view("Kettle").with_id("label"),
                    ]),
                    View::group([View::text_view("Mug").with_id("label")])
                        .with_content_description("Sale"),
                ])]));
            let offers = ListElement::new(with_id("offers"));
            offers
                .item_checks(on_sale(), with_id("label"))
                .with_text(&mut ui, "Mug")
                .unwrap();
        }
    }

    mod page_tests {
        use super::*;

        #[test]
        fn test_loaded_page() {
            let mut ui = MockDevice::new(login_screen());
            assert!(LoginPage.is_loaded(&mut ui));
            LoginPage.wait_until_loaded(&mut ui).unwrap();
            assert!(LoginPage.page_name().ends_with("LoginPage"));
        }

        #[test]
        fn test_wait_until_loaded_times_out() {
            let mut ui = MockDevice::new(View::text_view("Splash"));
            let err = LoginPage.wait_until_loaded(&mut ui).unwrap_err();
            assert!(err.to_string().contains("login_root"));
        }
    }
}
