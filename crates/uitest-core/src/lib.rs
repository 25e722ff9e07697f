//! uitest-core: page objects for Android-style UI tests
//!
//! A small page-object layer over a UI automation backend. Elements are
//! described by matchers, grouped into pages, and act or assert through a
//! [`UiDriver`]. Toolbar menu items transparently route through the overflow
//! menu when they do not fit on the toolbar.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐    ┌──────────────┐    ┌──────────────┐
//! │ Page objects │───►│ Interaction  │───►│   UiDriver   │
//! │ (elements,   │    │ contexts /   │    │ (device or   │
//! │  toolbar)    │    │ locators     │    │  MockDevice) │
//! └──────────────┘    └──────────────┘    └──────────────┘
//!        │                   │
//!        ▼                   ▼
//!   ┌─────────┐        ┌──────────┐        ┌──────────────┐
//!   │  wait   │        │ matchers │        │ cache (fs)   │
//!   └─────────┘        └──────────┘        └──────────────┘
//! ```
//!
//! # Example
//!
//! ```ignore
//! use uitest_core::prelude::*;
//!
//! let mut device = MockDevice::new(View::toolbar(
//!     ToolbarState::titled("Settings").with_overflow_item("Delete"),
//! ));
//! let toolbar = ToolbarElement::default();
//! toolbar.overflow_menu_item("Delete").checks().exists(&mut device)?;
//! toolbar.checks().with_title(&mut device, "Settings")?;
//! ```

#![warn(missing_docs)]

mod action;
mod cache;
mod checks;
mod config;
mod context;
mod device;
mod driver;
pub mod logging;
pub mod matcher;
mod page_object;
mod result;
mod toolbar;
mod view;
mod wait;

pub use action::{Actionable, Actions, ActionsDriver, ActionsImpl};
pub use cache::{AppContext, Cache, CacheClearReport, CacheConfig, StaticAppContext};
pub use checks::{Checkable, Checks, ChecksDriver, ChecksImpl};
pub use config::{UiTestConfig, CONFIG_ENV};
pub use context::{InteractionContext, Locatable};
pub use device::{Interaction, MockDevice, OVERFLOW_BUTTON_DESCRIPTION, OVERFLOW_POPUP_ID};
pub use driver::{Locator, ToolbarMenu, UiDriver, ViewAction, ViewAssertion};
pub use logging::LoggingConfig;
pub use matcher::{Description, Matcher, TextMatcher, ViewMatcher};
pub use page_object::{
    InputChecks, InputElement, ListElement, ListItemDriver, PageObject, PageObjectElement,
};
pub use result::{UiTestError, UiTestResult};
pub use toolbar::{
    classify, overflow_button_matcher, MenuItem, OverflowMenuChecks, OverflowMenuDriver,
    ToolbarChecks, ToolbarElement,
};
pub use view::{
    HierarchyDump, MenuEntry, MenuItemPlacement, Resources, ToolbarState, View, ViewKind,
    ViewNode, ViewTree,
};
pub use wait::{wait_for, wait_until, WaitOptions, DEFAULT_FREQUENCY_MS, DEFAULT_TIMEOUT_MS};

/// Prelude for convenient imports
pub mod prelude {
    pub use super::matcher::*;
    pub use super::{
        classify, wait_for, wait_until, Actionable, Actions, AppContext, Cache, CacheConfig,
        Checkable, Checks, InputElement, InteractionContext, ListElement, Locatable, Locator,
        MenuEntry, MenuItem, MenuItemPlacement, MockDevice, PageObject, PageObjectElement,
        Resources, StaticAppContext, ToolbarElement, ToolbarState, UiDriver, UiTestConfig,
        UiTestError, UiTestResult, View, ViewAction, ViewAssertion, ViewKind, ViewNode, ViewTree,
        WaitOptions,
    };
}
