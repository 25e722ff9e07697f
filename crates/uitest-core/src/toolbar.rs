//! Toolbar page object and overflow-menu routing.
//!
//! A toolbar menu item is rendered either as an action view on the toolbar
//! or, when it does not fit, inside the overflow popup that only exists while
//! the overflow button is expanded. [`classify`] decides which from a menu
//! snapshot; [`OverflowMenuDriver`] reads that snapshot fresh on every call
//! and routes actions and checks accordingly:
//!
//! - on the toolbar: act or assert on the action view inside the toolbar
//! - in the overflow: click the overflow button (unless auto-open is
//!   disabled), act or assert on the popup row, and for checks press back to
//!   collapse the popup again

use crate::action::{Actionable, ActionsDriver, ActionsImpl};
use crate::checks::{Checkable, Checks, ChecksDriver, ChecksImpl};
use crate::context::{InteractionContext, Locatable};
use crate::driver::{Locator, ToolbarMenu, UiDriver, ViewAction, ViewAssertion};
use crate::matcher::{
    all_of, any_of, describe, ends_with, equal_to, has_no_id, is_assignable_from, is_displayed,
    restricted_direct_access, toolbar_subtitle, toolbar_subtitle_res, toolbar_title,
    toolbar_title_res, with_class_name, with_content_description,
    with_content_description_matching, with_text_matching, Matcher, TextMatcher, ViewMatcher,
};
use crate::page_object::PageObjectElement;
use crate::result::{UiTestError, UiTestResult};
use crate::view::{MenuItemPlacement, ViewKind};
use std::sync::Arc;
use tracing::debug;

/// Where the item titled by `title` currently sits
///
/// `InOverflow` only when the menu holds a hidden item whose title matches;
/// unknown titles classify as `OnToolbar`.
#[must_use]
pub fn classify(menu: &ToolbarMenu, title: &dyn Matcher<str>) -> MenuItemPlacement {
    if menu.has_hidden_item(title) {
        MenuItemPlacement::InOverflow
    } else {
        MenuItemPlacement::OnToolbar
    }
}

/// Matcher for the button that expands the overflow menu
///
/// Some toolbar implementations ship the button without a content
/// description, so the class name is accepted as a fallback.
#[must_use]
pub fn overflow_button_matcher() -> ViewMatcher {
    any_of([
        all_of([is_displayed(), with_content_description("More options")]),
        all_of([is_displayed(), with_class_name(ends_with("OverflowMenuButton"))]),
    ])
}

// =============================================================================
// TOOLBAR ELEMENT
// =============================================================================

/// App bar toolbar
#[derive(Debug, Clone)]
pub struct ToolbarElement {
    context: InteractionContext,
}

impl Default for ToolbarElement {
    fn default() -> Self {
        Self::new(is_assignable_from(ViewKind::Toolbar))
    }
}

impl ToolbarElement {
    /// Toolbar located by `matcher`
    #[must_use]
    pub fn new(matcher: ViewMatcher) -> Self {
        Self::from_context(InteractionContext::new(matcher))
    }

    /// Toolbar located by an existing context
    #[must_use]
    pub const fn from_context(context: InteractionContext) -> Self {
        Self { context }
    }

    /// Navigation button (image button without id)
    #[must_use]
    pub fn up_button(&self) -> PageObjectElement {
        PageObjectElement::from_context(self.context.provide_child_context(all_of([
            is_assignable_from(ViewKind::ImageButton),
            has_no_id(),
        ])))
    }

    /// Button expanding the overflow menu
    #[must_use]
    pub fn overflow_menu_button(&self) -> PageObjectElement {
        PageObjectElement::from_context(
            self.context
                .provide_child_context(overflow_button_matcher()),
        )
    }

    /// Menu item expected in the overflow menu, by exact title
    #[must_use]
    pub fn overflow_menu_item(&self, title: &str) -> MenuItem {
        self.overflow_menu_item_matching(equal_to(title))
    }

    /// Menu item expected in the overflow menu
    #[must_use]
    pub fn overflow_menu_item_matching(&self, title: TextMatcher) -> MenuItem {
        self.menu_item(title)
    }

    /// Menu item expected on the toolbar, by exact title
    #[must_use]
    pub fn action_menu_item(&self, title: &str) -> MenuItem {
        self.action_menu_item_matching(equal_to(title))
    }

    /// Menu item expected on the toolbar
    ///
    /// Routing is decided by the live menu, so this behaves exactly like
    /// [`Self::overflow_menu_item_matching`] once the item moves.
    #[must_use]
    pub fn action_menu_item_matching(&self, title: TextMatcher) -> MenuItem {
        self.menu_item(title)
    }

    fn menu_item(&self, title: TextMatcher) -> MenuItem {
        MenuItem {
            context: InteractionContext::new(restricted_direct_access()),
            toolbar: self.context.locator(),
            title,
            overflow_menu_button: Some(self.overflow_menu_button()),
        }
    }
}

impl Locatable for ToolbarElement {
    fn interaction_context(&self) -> &InteractionContext {
        &self.context
    }
}

impl Actionable for ToolbarElement {
    type Actions = ActionsImpl<InteractionContext>;

    fn actions(&self) -> Self::Actions {
        ActionsImpl::new(self.context.clone())
    }
}

impl Checkable for ToolbarElement {
    type Checks = ToolbarChecks;

    fn checks(&self) -> Self::Checks {
        ToolbarChecks {
            inner: ChecksImpl::new(self.context.clone()),
        }
    }
}

/// Checks of a [`ToolbarElement`]
#[derive(Debug, Clone)]
pub struct ToolbarChecks {
    inner: ChecksImpl<InteractionContext>,
}

impl ToolbarChecks {
    /// Title equals `title`
    pub fn with_title(&self, ui: &mut dyn UiDriver, title: &str) -> UiTestResult<()> {
        self.matches(ui, toolbar_title(equal_to(title)))
    }

    /// Title equals the string resource `res_id`
    pub fn with_title_res(&self, ui: &mut dyn UiDriver, res_id: u32) -> UiTestResult<()> {
        self.matches(ui, toolbar_title_res(res_id))
    }

    /// Subtitle equals `subtitle`
    pub fn with_subtitle(&self, ui: &mut dyn UiDriver, subtitle: &str) -> UiTestResult<()> {
        self.matches(ui, toolbar_subtitle(equal_to(subtitle)))
    }

    /// Subtitle equals the string resource `res_id`
    pub fn with_subtitle_res(&self, ui: &mut dyn UiDriver, res_id: u32) -> UiTestResult<()> {
        self.matches(ui, toolbar_subtitle_res(res_id))
    }
}

impl Checks for ToolbarChecks {
    fn check(&self, ui: &mut dyn UiDriver, assertion: ViewAssertion) -> UiTestResult<()> {
        self.inner.check(ui, assertion)
    }
}

// =============================================================================
// MENU ITEM
// =============================================================================

/// A toolbar menu item, reachable only through `actions()` and `checks()`
///
/// Its own interaction context matches nothing, so locating it directly
/// fails with [`crate::matcher::RESTRICTED_ACCESS_MESSAGE`].
#[derive(Debug, Clone)]
pub struct MenuItem {
    context: InteractionContext,
    toolbar: Locator,
    title: TextMatcher,
    overflow_menu_button: Option<PageObjectElement>,
}

impl MenuItem {
    /// Never click the overflow button before acting or checking
    ///
    /// For apps that keep the overflow popup open on their own, or tests that
    /// open it explicitly.
    #[must_use]
    pub fn disable_overflow_menu_auto_open(mut self) -> Self {
        self.overflow_menu_button = None;
        self
    }

    /// Whether the overflow button is clicked automatically
    #[must_use]
    pub const fn auto_opens_overflow(&self) -> bool {
        self.overflow_menu_button.is_some()
    }

    /// Current placement, read from the live toolbar
    pub fn placement(&self, ui: &mut dyn UiDriver) -> UiTestResult<MenuItemPlacement> {
        self.driver().placement(ui)
    }

    fn driver(&self) -> OverflowMenuDriver {
        OverflowMenuDriver {
            toolbar: self.toolbar.clone(),
            title: Arc::clone(&self.title),
            overflow_menu_button: self.overflow_menu_button.clone(),
        }
    }
}

impl Locatable for MenuItem {
    fn interaction_context(&self) -> &InteractionContext {
        &self.context
    }
}

impl Actionable for MenuItem {
    type Actions = ActionsImpl<OverflowMenuDriver>;

    fn actions(&self) -> Self::Actions {
        ActionsImpl::new(self.driver())
    }
}

impl Checkable for MenuItem {
    type Checks = OverflowMenuChecks;

    fn checks(&self) -> Self::Checks {
        OverflowMenuChecks {
            driver: self.driver(),
        }
    }
}

// =============================================================================
// ROUTING
// =============================================================================

/// Routes actions and checks to wherever a menu item currently lives
#[derive(Debug, Clone)]
pub struct OverflowMenuDriver {
    toolbar: Locator,
    title: TextMatcher,
    overflow_menu_button: Option<PageObjectElement>,
}

impl OverflowMenuDriver {
    /// Read the toolbar menu and classify the item
    pub fn placement(&self, ui: &mut dyn UiDriver) -> UiTestResult<MenuItemPlacement> {
        let menu = ui.read_toolbar_menu(&self.toolbar)?;
        let placement = classify(&menu, self.title.as_ref());
        debug!(
            item = %describe(self.title.as_ref()),
            ?placement,
            "classified toolbar menu item"
        );
        Ok(placement)
    }

    fn found_hidden(&self, ui: &mut dyn UiDriver) -> UiTestResult<bool> {
        Ok(self.placement(ui)? == MenuItemPlacement::InOverflow)
    }

    /// Popup row showing the item
    fn overflow_locator(&self) -> Locator {
        Locator::new(with_text_matching(Arc::clone(&self.title)))
    }

    /// Action view showing the item inside the toolbar
    fn action_locator(&self) -> Locator {
        Locator::new(any_of([
            with_text_matching(Arc::clone(&self.title)),
            with_content_description_matching(Arc::clone(&self.title)),
        ]))
        .within(self.toolbar.clone())
    }

    /// Click the overflow button if auto-open is enabled
    fn expand(&self, ui: &mut dyn UiDriver) -> UiTestResult<()> {
        match &self.overflow_menu_button {
            Some(button) => button.click(ui),
            None => Ok(()),
        }
    }
}

impl ActionsDriver for OverflowMenuDriver {
    fn perform_action(&self, ui: &mut dyn UiDriver, action: &ViewAction) -> UiTestResult<()> {
        match self.placement(ui)? {
            MenuItemPlacement::InOverflow => {
                self.expand(ui)?;
                ui.perform(&self.overflow_locator(), action)
            }
            MenuItemPlacement::OnToolbar => ui.perform(&self.action_locator(), action),
        }
    }
}

impl ChecksDriver for OverflowMenuDriver {
    fn check_assertion(&self, ui: &mut dyn UiDriver, assertion: &ViewAssertion) -> UiTestResult<()> {
        match self.placement(ui)? {
            MenuItemPlacement::InOverflow => {
                self.expand(ui)?;
                let result = ui.check(&self.overflow_locator(), assertion);
                // collapse even when the assertion failed; its error wins
                let dismissed = ui.press_back();
                result.and(dismissed)
            }
            MenuItemPlacement::OnToolbar => ui.check(&self.action_locator(), assertion),
        }
    }
}

/// Checks of a [`MenuItem`]
#[derive(Debug, Clone)]
pub struct OverflowMenuChecks {
    driver: OverflowMenuDriver,
}

impl OverflowMenuChecks {
    /// The item currently sits in the collapsed overflow menu
    ///
    /// Reads the toolbar menu only; never expands or dismisses anything.
    pub fn exists_as_hidden(&self, ui: &mut dyn UiDriver) -> UiTestResult<()> {
        if self.driver.found_hidden(ui)? {
            return Ok(());
        }
        Err(UiTestError::assertion(format!(
            "Overflow menu element {} is not hidden",
            describe(self.driver.title.as_ref())
        )))
    }
}

impl Checks for OverflowMenuChecks {
    fn check(&self, ui: &mut dyn UiDriver, assertion: ViewAssertion) -> UiTestResult<()> {
        self.driver.check_assertion(ui, &assertion)
    }

    /// The item exists, shown or hidden
    ///
    /// Without auto-open the collapsed popup renders no row, so a hidden item
    /// counts as existing without a view check.
    fn exists(&self, ui: &mut dyn UiDriver) -> UiTestResult<()> {
        if self.driver.overflow_menu_button.is_none() && self.driver.found_hidden(ui)? {
            return Ok(());
        }
        self.check(ui, ViewAssertion::Exists)
    }
}
