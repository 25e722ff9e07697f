//! Checks capability.

use crate::driver::{UiDriver, ViewAssertion};
use crate::matcher::{self, TextMatcher, ViewMatcher};
use crate::result::UiTestResult;

/// Evaluates assertions against whatever an element resolves to
pub trait ChecksDriver {
    /// Evaluate `assertion` against the element
    fn check_assertion(&self, ui: &mut dyn UiDriver, assertion: &ViewAssertion) -> UiTestResult<()>;
}

/// Assertion vocabulary of an element
pub trait Checks {
    /// Evaluate an arbitrary assertion
    fn check(&self, ui: &mut dyn UiDriver, assertion: ViewAssertion) -> UiTestResult<()>;

    /// Exactly one view is located
    fn exists(&self, ui: &mut dyn UiDriver) -> UiTestResult<()> {
        self.check(ui, ViewAssertion::Exists)
    }

    /// No view is located
    fn does_not_exist(&self, ui: &mut dyn UiDriver) -> UiTestResult<()> {
        self.check(ui, ViewAssertion::DoesNotExist)
    }

    /// The view satisfies `matcher`
    fn matches(&self, ui: &mut dyn UiDriver, matcher: ViewMatcher) -> UiTestResult<()> {
        self.check(ui, ViewAssertion::Matches(matcher))
    }

    /// The view is displayed
    fn is_displayed(&self, ui: &mut dyn UiDriver) -> UiTestResult<()> {
        self.matches(ui, matcher::is_displayed())
    }

    /// The view exists but is not displayed
    fn is_not_displayed(&self, ui: &mut dyn UiDriver) -> UiTestResult<()> {
        self.matches(ui, matcher::not(matcher::is_displayed()))
    }

    /// The view is enabled
    fn is_enabled(&self, ui: &mut dyn UiDriver) -> UiTestResult<()> {
        self.matches(ui, matcher::is_enabled())
    }

    /// The view is disabled
    fn is_not_enabled(&self, ui: &mut dyn UiDriver) -> UiTestResult<()> {
        self.matches(ui, matcher::not(matcher::is_enabled()))
    }

    /// The view's text equals `text`
    fn with_text(&self, ui: &mut dyn UiDriver, text: &str) -> UiTestResult<()> {
        self.matches(ui, matcher::with_text(text))
    }

    /// The view's text satisfies `text`
    fn with_text_matching(&self, ui: &mut dyn UiDriver, text: TextMatcher) -> UiTestResult<()> {
        self.matches(ui, matcher::with_text_matching(text))
    }

    /// The view's content description equals `description`
    fn with_content_description(&self, ui: &mut dyn UiDriver, description: &str) -> UiTestResult<()> {
        self.matches(ui, matcher::with_content_description(description))
    }
}

/// [`Checks`] backed by a [`ChecksDriver`]
#[derive(Debug, Clone)]
pub struct ChecksImpl<D> {
    driver: D,
}

impl<D: ChecksDriver> ChecksImpl<D> {
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

impl<D: ChecksDriver> Checks for ChecksImpl<D> {
    fn check(&self, ui: &mut dyn UiDriver, assertion: ViewAssertion) -> UiTestResult<()> {
        self.driver.check_assertion(ui, &assertion)
    }
}

/// Something that can be checked
pub trait Checkable {
    /// Concrete checks type
    type Checks: Checks;

    /// Checks accessor
    fn checks(&self) -> Self::Checks;
}
