//! Actions capability.

use crate::driver::{UiDriver, ViewAction};
use crate::result::UiTestResult;

/// Delivers actions to whatever an element resolves to
pub trait ActionsDriver {
    /// Perform `action` on the element
    fn perform_action(&self, ui: &mut dyn UiDriver, action: &ViewAction) -> UiTestResult<()>;
}

/// Action vocabulary of an element
pub trait Actions {
    /// Perform an arbitrary action
    fn perform(&self, ui: &mut dyn UiDriver, action: ViewAction) -> UiTestResult<()>;

    /// Single tap
    fn click(&self, ui: &mut dyn UiDriver) -> UiTestResult<()> {
        self.perform(ui, ViewAction::Click)
    }

    /// Long press
    fn long_click(&self, ui: &mut dyn UiDriver) -> UiTestResult<()> {
        self.perform(ui, ViewAction::LongClick)
    }

    /// Append text
    fn type_text(&self, ui: &mut dyn UiDriver, text: &str) -> UiTestResult<()> {
        self.perform(ui, ViewAction::TypeText(text.to_string()))
    }

    /// Replace the whole text
    fn replace_text(&self, ui: &mut dyn UiDriver, text: &str) -> UiTestResult<()> {
        self.perform(ui, ViewAction::ReplaceText(text.to_string()))
    }

    /// Clear the text
    fn clear_text(&self, ui: &mut dyn UiDriver) -> UiTestResult<()> {
        self.perform(ui, ViewAction::ClearText)
    }

    /// Scroll into view
    fn scroll_to(&self, ui: &mut dyn UiDriver) -> UiTestResult<()> {
        self.perform(ui, ViewAction::ScrollTo)
    }

    /// Press the IME action button
    fn press_ime_action(&self, ui: &mut dyn UiDriver) -> UiTestResult<()> {
        self.perform(ui, ViewAction::PressImeAction)
    }
}

/// [`Actions`] backed by an [`ActionsDriver`]
#[derive(Debug, Clone)]
pub struct ActionsImpl<D> {
    driver: D,
}

impl<D: ActionsDriver> ActionsImpl<D> {
    /// Wrap a driver
    #[must_use]
    pub const fn new(driver: D) -> Self {
        Self { driver }
    }

    /// The wrapped driver
    #[must_use]
    pub const fn driver(&self) -> &D {
        &self.driver
    }
}

impl<D: ActionsDriver> Actions for ActionsImpl<D> {
    fn perform(&self, ui: &mut dyn UiDriver, action: ViewAction) -> UiTestResult<()> {
        self.driver.perform_action(ui, &action)
    }
}

/// Something that can be acted upon
pub trait Actionable {
    /// Concrete actions type
    type Actions: Actions;

    /// Actions accessor
    fn actions(&self) -> Self::Actions;
}
