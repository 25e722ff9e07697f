//! In-memory UI backend for tests.
//!
//! [`MockDevice`] keeps a back stack of screens and renders them the way a
//! device would: toolbars grow their title, subtitle and action menu views,
//! hidden menu items collapse behind an overflow button, and clicking that
//! button opens a popup window listing them. Every interaction is recorded
//! so tests can assert on call order.

use crate::driver::{Locator, ToolbarMenu, UiDriver, ViewAction, ViewAssertion};
use crate::result::{UiTestError, UiTestResult};
use crate::view::{HierarchyDump, Resources, ToolbarState, View, ViewKind, ViewNode, ViewTree};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Content description of the synthesized overflow button
pub const OVERFLOW_BUTTON_DESCRIPTION: &str = "More options";

/// Id of the synthesized overflow popup list
pub const OVERFLOW_POPUP_ID: &str = "overflow_popup";

const ACTION_MENU_VIEW_CLASS: &str = "androidx.appcompat.widget.ActionMenuView";

/// One recorded interaction with a [`MockDevice`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Interaction {
    /// An action was dispatched to a view
    Performed {
        /// Action description
        action: String,
        /// Target view summary
        target: String,
    },
    /// An assertion was evaluated
    Checked {
        /// Assertion description
        assertion: String,
        /// Locator description
        locator: String,
        /// Whether it held
        passed: bool,
    },
    /// A toolbar's menu was read
    MenuRead {
        /// Toolbar locator description
        toolbar: String,
    },
    /// The overflow popup opened
    OverflowExpanded,
    /// The overflow popup closed through back navigation
    OverflowDismissed,
    /// A menu item was selected, from the toolbar or the popup
    MenuItemSelected(String),
    /// A screen was popped from the back stack
    Back,
}

/// Scripted UI backend
#[derive(Debug, Clone)]
pub struct MockDevice {
    screens: Vec<View>,
    resources: Resources,
    /// Child-index path (from the screen root) of the toolbar whose overflow is open
    overflow: Option<Vec<usize>>,
    history: Vec<Interaction>,
}

impl MockDevice {
    /// Create a device showing `root`
    #[must_use]
    pub fn new(root: View) -> Self {
        Self {
            screens: vec![root],
            resources: Resources::default(),
            overflow: None,
            history: Vec::new(),
        }
    }

    /// Create a device from a hierarchy dump (first root is the screen)
    pub fn from_dump(dump: HierarchyDump) -> UiTestResult<Self> {
        let mut roots = dump.roots.into_iter();
        let root = roots.next().ok_or_else(|| UiTestError::Config {
            message: "hierarchy dump has no root view".to_string(),
        })?;
        Ok(Self::new(root).with_resources(dump.resources))
    }

    /// Create a device from a YAML hierarchy dump
    pub fn from_yaml(yaml: &str) -> UiTestResult<Self> {
        Self::from_dump(serde_yaml_ng::from_str(yaml)?)
    }

    /// Set the string resources
    #[must_use]
    pub fn with_resources(mut self, resources: Resources) -> Self {
        self.resources = resources;
        self
    }

    /// Navigate to a new screen
    pub fn push_screen(&mut self, root: View) {
        self.overflow = None;
        self.screens.push(root);
    }

    /// Number of screens on the back stack
    #[must_use]
    pub fn screen_depth(&self) -> usize {
        self.screens.len()
    }

    /// The screen on top of the back stack
    #[must_use]
    pub fn current_screen(&self) -> &View {
        // the stack never empties: the last screen is never popped
        &self.screens[self.screens.len() - 1]
    }

    /// Mutable access to the top screen
    pub fn current_screen_mut(&mut self) -> &mut View {
        let last = self.screens.len() - 1;
        &mut self.screens[last]
    }

    /// Whether an overflow popup is open
    #[must_use]
    pub fn is_overflow_open(&self) -> bool {
        self.overflow.is_some()
    }

    /// Recorded interactions, oldest first
    #[must_use]
    pub fn history(&self) -> &[Interaction] {
        &self.history
    }

    /// Forget recorded interactions
    pub fn clear_history(&mut self) {
        self.history.clear();
    }

    /// Titles of selected menu items, oldest first
    #[must_use]
    pub fn selected_menu_items(&self) -> Vec<&str> {
        self.history
            .iter()
            .filter_map(|i| match i {
                Interaction::MenuItemSelected(title) => Some(title.as_str()),
                _ => None,
            })
            .collect()
    }

    fn record(&mut self, interaction: Interaction) {
        debug!(?interaction, "mock device");
        self.history.push(interaction);
    }

    fn open_toolbar(&self) -> Option<&ToolbarState> {
        let path = self.overflow.as_ref()?;
        self.current_screen().at_path(path)?.toolbar.as_ref()
    }

    fn overflow_popup(&self) -> Option<View> {
        let state = self.open_toolbar()?;
        let items = ToolbarMenu::from_state(state)
            .hidden_items()
            .map(|entry| View::text_view(entry.title.clone()))
            .collect::<Vec<_>>();
        Some(
            View::new(ViewKind::ListView)
                .with_id(OVERFLOW_POPUP_ID)
                .with_children(items),
        )
    }

    fn dispatch_popup(&mut self, target: &ViewNode, action: &ViewAction) {
        if *action != ViewAction::Click {
            return;
        }
        if let Some(title) = target.view().text.clone() {
            self.overflow = None;
            self.record(Interaction::MenuItemSelected(title));
        }
    }

    fn dispatch_screen(&mut self, target: &ViewNode, action: &ViewAction) -> UiTestResult<()> {
        match (target.kind(), action) {
            (ViewKind::OverflowMenuButton, ViewAction::Click) => {
                let toolbar = target
                    .ancestors()
                    .find(|a| a.view().toolbar.is_some())
                    .ok_or_else(|| UiTestError::ActionRejected {
                        action: action.description(),
                        view: target.summary(),
                        reason: "overflow button outside of a toolbar".to_string(),
                    })?;
                self.overflow = Some(toolbar.path()[1..].to_vec());
                self.record(Interaction::OverflowExpanded);
            }
            (ViewKind::ActionMenuItem, ViewAction::Click) => {
                let title = target
                    .view()
                    .content_description
                    .clone()
                    .unwrap_or_default();
                self.record(Interaction::MenuItemSelected(title));
            }
            (_, ViewAction::TypeText(_) | ViewAction::ReplaceText(_) | ViewAction::ClearText) => {
                let view = self
                    .current_screen_mut()
                    .at_path_mut(&target.path()[1..])
                    .ok_or_else(|| UiTestError::ActionRejected {
                        action: action.description(),
                        view: target.summary(),
                        reason: "view is no longer attached".to_string(),
                    })?;
                let text = view.text.get_or_insert_with(String::new);
                match action {
                    ViewAction::TypeText(typed) => text.push_str(typed),
                    ViewAction::ReplaceText(replacement) => *text = replacement.clone(),
                    _ => text.clear(),
                }
            }
            _ => {}
        }
        Ok(())
    }
}

/// Append the views a toolbar renders for its own state
fn decorate(view: &mut View) {
    for child in &mut view.children {
        decorate(child);
    }
    let Some(state) = view.toolbar.clone() else {
        return;
    };
    if let Some(title) = &state.title {
        view.children.push(View::text_view(title.clone()));
    }
    if let Some(subtitle) = &state.subtitle {
        view.children.push(View::text_view(subtitle.clone()));
    }

    let menu = ToolbarMenu::from_state(&state);
    let mut menu_view = View::new(ViewKind::ViewGroup).with_class_name(ACTION_MENU_VIEW_CLASS);
    for entry in menu.shown_items() {
        let mut item =
            View::new(ViewKind::ActionMenuItem).with_content_description(entry.title.clone());
        if !entry.icon_only {
            item = item.with_text(entry.title.clone());
        }
        menu_view.children.push(item);
    }
    if menu.hidden_items().next().is_some() {
        menu_view.children.push(
            View::new(ViewKind::OverflowMenuButton)
                .with_content_description(OVERFLOW_BUTTON_DESCRIPTION),
        );
    }
    if !menu_view.children.is_empty() {
        view.children.push(menu_view);
    }
}

impl UiDriver for MockDevice {
    fn hierarchy(&self) -> UiTestResult<ViewTree> {
        let mut screen = self.current_screen().clone();
        decorate(&mut screen);
        let mut roots = vec![screen];
        roots.extend(self.overflow_popup());
        Ok(ViewTree::new(roots, self.resources.clone()))
    }

    fn dispatch(&mut self, target: &ViewNode, action: &ViewAction) -> UiTestResult<()> {
        self.record(Interaction::Performed {
            action: action.description(),
            target: target.summary(),
        });
        if target.path()[0] > 0 {
            self.dispatch_popup(target, action);
            return Ok(());
        }
        self.dispatch_screen(target, action)
    }

    fn press_back(&mut self) -> UiTestResult<()> {
        if self.overflow.take().is_some() {
            self.record(Interaction::OverflowDismissed);
            return Ok(());
        }
        if self.screens.len() > 1 {
            self.screens.pop();
            self.record(Interaction::Back);
            return Ok(());
        }
        Err(UiTestError::assertion("Pressed back and killed the app"))
    }

    fn check(&mut self, locator: &Locator, assertion: &ViewAssertion) -> UiTestResult<()> {
        let result = assertion.evaluate(&self.hierarchy()?, locator);
        self.record(Interaction::Checked {
            assertion: assertion.description(),
            locator: locator.description(),
            passed: result.is_ok(),
        });
        result
    }

    fn read_toolbar_menu(&mut self, toolbar: &Locator) -> UiTestResult<ToolbarMenu> {
        self.record(Interaction::MenuRead {
            toolbar: toolbar.description(),
        });
        ToolbarMenu::read(&self.hierarchy()?, toolbar)
    }
}
