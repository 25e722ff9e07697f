//! Interaction contexts: locator chains for page-object elements.

use crate::action::ActionsDriver;
use crate::checks::ChecksDriver;
use crate::driver::{Locator, UiDriver, ViewAction, ViewAssertion};
use crate::matcher::ViewMatcher;
use crate::result::UiTestResult;
use std::sync::Arc;

/// A view matcher, optionally scoped to the view a parent context locates
#[derive(Debug, Clone)]
pub struct InteractionContext {
    matcher: ViewMatcher,
    parent: Option<Arc<InteractionContext>>,
}

impl InteractionContext {
    /// Root context locating views anywhere in the hierarchy
    #[must_use]
    pub fn new(matcher: ViewMatcher) -> Self {
        Self {
            matcher,
            parent: None,
        }
    }

    /// Context locating descendants of this context's view
    #[must_use]
    pub fn provide_child_context(&self, matcher: ViewMatcher) -> Self {
        Self {
            matcher,
            parent: Some(Arc::new(self.clone())),
        }
    }

    /// Own matcher
    #[must_use]
    pub const fn matcher(&self) -> &ViewMatcher {
        &self.matcher
    }

    /// Parent context
    #[must_use]
    pub fn parent(&self) -> Option<&InteractionContext> {
        self.parent.as_deref()
    }

    /// Resolve the chain into a locator
    #[must_use]
    pub fn locator(&self) -> Locator {
        let locator = Locator::new(Arc::clone(&self.matcher));
        match &self.parent {
            Some(parent) => locator.within(parent.locator()),
            None => locator,
        }
    }
}

impl ActionsDriver for InteractionContext {
    fn perform_action(&self, ui: &mut dyn UiDriver, action: &ViewAction) -> UiTestResult<()> {
        ui.perform(&self.locator(), action)
    }
}

impl ChecksDriver for InteractionContext {
    fn check_assertion(&self, ui: &mut dyn UiDriver, assertion: &ViewAssertion) -> UiTestResult<()> {
        ui.check(&self.locator(), assertion)
    }
}

/// Something that can be located in the hierarchy
pub trait Locatable {
    /// The element's interaction context
    fn interaction_context(&self) -> &InteractionContext;

    /// The element's locator
    fn locator(&self) -> Locator {
        self.interaction_context().locator()
    }
}
