//! View hierarchy model.
//!
//! A [`View`] is an owned, serde-friendly description of one on-screen view
//! and its children. Backends hand the engine a [`ViewTree`]: an immutable
//! pre-order arena snapshot of one or more roots plus the app's string
//! resources. Matchers receive [`ViewNode`] handles into that snapshot, which
//! can walk to parents and children.

use crate::result::UiTestResult;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

// =============================================================================
// VIEW KIND
// =============================================================================

/// Widget class of a view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewKind {
    /// Plain view
    #[default]
    View,
    /// Container
    ViewGroup,
    /// Text label
    TextView,
    /// Editable text field
    EditText,
    /// Button
    Button,
    /// Image
    ImageView,
    /// Clickable image
    ImageButton,
    /// App bar toolbar
    Toolbar,
    /// Menu item rendered directly on a toolbar
    ActionMenuItem,
    /// The "more options" button that expands the overflow menu
    OverflowMenuButton,
    /// Classic list
    ListView,
    /// Recycler list
    RecyclerView,
}

impl ViewKind {
    /// Superclass in the widget hierarchy, `None` for [`ViewKind::View`]
    #[must_use]
    pub const fn parent_kind(self) -> Option<Self> {
        match self {
            Self::View => None,
            Self::ViewGroup | Self::TextView | Self::ImageView => Some(Self::View),
            Self::EditText | Self::Button | Self::ActionMenuItem => Some(Self::TextView),
            Self::ImageButton | Self::OverflowMenuButton => Some(Self::ImageView),
            Self::Toolbar | Self::ListView | Self::RecyclerView => Some(Self::ViewGroup),
        }
    }

    /// Whether a view of this kind can be used where `other` is expected
    #[must_use]
    pub fn is_a(self, other: Self) -> bool {
        let mut current = Some(self);
        while let Some(kind) = current {
            if kind == other {
                return true;
            }
            current = kind.parent_kind();
        }
        false
    }

    /// Fully qualified class name reported for this kind
    #[must_use]
    pub const fn class_name(self) -> &'static str {
        match self {
            Self::View => "android.view.View",
            Self::ViewGroup => "android.view.ViewGroup",
            Self::TextView => "android.widget.TextView",
            Self::EditText => "android.widget.EditText",
            Self::Button => "android.widget.Button",
            Self::ImageView => "android.widget.ImageView",
            Self::ImageButton => "android.widget.ImageButton",
            Self::Toolbar => "androidx.appcompat.widget.Toolbar",
            Self::ActionMenuItem => "androidx.appcompat.view.menu.ActionMenuItemView",
            Self::OverflowMenuButton => {
                "androidx.appcompat.widget.ActionMenuPresenter$OverflowMenuButton"
            }
            Self::ListView => "android.widget.ListView",
            Self::RecyclerView => "androidx.recyclerview.widget.RecyclerView",
        }
    }

    /// Short class name (after the last `.`)
    #[must_use]
    pub fn simple_name(self) -> &'static str {
        let name = self.class_name();
        name.rsplit('.').next().unwrap_or(name)
    }
}

impl fmt::Display for ViewKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.class_name())
    }
}

// =============================================================================
// TOOLBAR STATE
// =============================================================================

/// Where a toolbar menu item is currently rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MenuItemPlacement {
    /// Shown as an action view on the toolbar itself
    #[default]
    OnToolbar,
    /// Hidden in the overflow menu until it is expanded
    InOverflow,
}

/// One entry of a toolbar menu
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuEntry {
    /// Item title
    pub title: String,
    /// Current placement
    #[serde(default)]
    pub placement: MenuItemPlacement,
    /// Rendered as an icon only (title exposed as content description)
    #[serde(default)]
    pub icon_only: bool,
    /// Item visibility; invisible items are neither on the toolbar nor in
    /// the overflow menu
    #[serde(default = "default_true")]
    pub visible: bool,
}

impl MenuEntry {
    /// Create an entry shown on the toolbar
    #[must_use]
    pub fn action(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            placement: MenuItemPlacement::OnToolbar,
            icon_only: false,
            visible: true,
        }
    }

    /// Create an entry hidden in the overflow menu
    #[must_use]
    pub fn overflow(title: impl Into<String>) -> Self {
        Self {
            placement: MenuItemPlacement::InOverflow,
            ..Self::action(title)
        }
    }

    /// Render as icon only
    #[must_use]
    pub const fn icon_only(mut self) -> Self {
        self.icon_only = true;
        self
    }

    /// Mark the item invisible
    #[must_use]
    pub const fn invisible(mut self) -> Self {
        self.visible = false;
        self
    }

    /// Whether this item sits (visibly) in the overflow menu
    #[must_use]
    pub fn is_hidden(&self) -> bool {
        self.visible && self.placement == MenuItemPlacement::InOverflow
    }
}

/// Toolbar-specific state of a view
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolbarState {
    /// Title text
    pub title: Option<String>,
    /// Subtitle text
    pub subtitle: Option<String>,
    /// Menu entries in declaration order
    pub menu: Vec<MenuEntry>,
}

impl ToolbarState {
    /// Create a toolbar state with a title
    #[must_use]
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            ..Self::default()
        }
    }

    /// Set the subtitle
    #[must_use]
    pub fn with_subtitle(mut self, subtitle: impl Into<String>) -> Self {
        self.subtitle = Some(subtitle.into());
        self
    }

    /// Add a menu entry shown on the toolbar
    #[must_use]
    pub fn with_action(self, title: impl Into<String>) -> Self {
        self.with_entry(MenuEntry::action(title))
    }

    /// Add a menu entry hidden in the overflow menu
    #[must_use]
    pub fn with_overflow_item(self, title: impl Into<String>) -> Self {
        self.with_entry(MenuEntry::overflow(title))
    }

    /// Add an arbitrary menu entry
    #[must_use]
    pub fn with_entry(mut self, entry: MenuEntry) -> Self {
        self.menu.push(entry);
        self
    }

    /// Find a menu entry by exact title
    pub fn entry_mut(&mut self, title: &str) -> Option<&mut MenuEntry> {
        self.menu.iter_mut().find(|e| e.title == title)
    }
}

// =============================================================================
// VIEW
// =============================================================================

const fn default_true() -> bool {
    true
}

/// Owned description of one view and its subtree
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct View {
    /// Widget class
    pub kind: ViewKind,
    /// Resource id name (e.g. `toolbar`), `None` for `View.NO_ID`
    pub id: Option<String>,
    /// Text content
    pub text: Option<String>,
    /// Hint text (text fields)
    pub hint: Option<String>,
    /// Accessibility content description
    pub content_description: Option<String>,
    /// Class name override, for custom widgets
    pub class_name: Option<String>,
    /// Visibility flag of this view alone
    pub visible: bool,
    /// Enabled flag
    pub enabled: bool,
    /// Toolbar state, for toolbars
    pub toolbar: Option<ToolbarState>,
    /// Child views in drawing order
    pub children: Vec<View>,
}

impl Default for View {
    fn default() -> Self {
        Self {
            kind: ViewKind::View,
            id: None,
            text: None,
            hint: None,
            content_description: None,
            class_name: None,
            visible: true,
            enabled: true,
            toolbar: None,
            children: Vec::new(),
        }
    }
}

impl View {
    /// Create a view of the given kind
    #[must_use]
    pub fn new(kind: ViewKind) -> Self {
        Self {
            kind,
            ..Self::default()
        }
    }

    /// Create a text view
    #[must_use]
    pub fn text_view(text: impl Into<String>) -> Self {
        Self::new(ViewKind::TextView).with_text(text)
    }

    /// Create a container with children
    #[must_use]
    pub fn group(children: impl IntoIterator<Item = View>) -> Self {
        Self::new(ViewKind::ViewGroup).with_children(children)
    }

    /// Create a toolbar view
    #[must_use]
    pub fn toolbar(state: ToolbarState) -> Self {
        Self::new(ViewKind::Toolbar).with_toolbar(state)
    }

    /// Set the resource id
    #[must_use]
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Set the text
    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Set the hint
    #[must_use]
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }

    /// Set the content description
    #[must_use]
    pub fn with_content_description(mut self, description: impl Into<String>) -> Self {
        self.content_description = Some(description.into());
        self
    }

    /// Override the class name
    #[must_use]
    pub fn with_class_name(mut self, class_name: impl Into<String>) -> Self {
        self.class_name = Some(class_name.into());
        self
    }

    /// Attach toolbar state
    #[must_use]
    pub fn with_toolbar(mut self, state: ToolbarState) -> Self {
        self.toolbar = Some(state);
        self
    }

    /// Mark the view as not visible
    #[must_use]
    pub const fn hidden(mut self) -> Self {
        self.visible = false;
        self
    }

    /// Mark the view as disabled
    #[must_use]
    pub const fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }

    /// Append a child
    #[must_use]
    pub fn with_child(mut self, child: View) -> Self {
        self.children.push(child);
        self
    }

    /// Append several children
    #[must_use]
    pub fn with_children(mut self, children: impl IntoIterator<Item = View>) -> Self {
        self.children.extend(children);
        self
    }

    /// Class name, honouring the override
    #[must_use]
    pub fn class_name(&self) -> &str {
        self.class_name
            .as_deref()
            .unwrap_or_else(|| self.kind.class_name())
    }

    /// Descendant at a child-index path (empty path is `self`)
    #[must_use]
    pub fn at_path(&self, path: &[usize]) -> Option<&View> {
        path.iter()
            .try_fold(self, |view, &index| view.children.get(index))
    }

    /// Mutable descendant at a child-index path
    pub fn at_path_mut(&mut self, path: &[usize]) -> Option<&mut View> {
        path.iter()
            .try_fold(self, |view, &index| view.children.get_mut(index))
    }
}

// =============================================================================
// RESOURCES
// =============================================================================

/// String resources of the app under test, keyed by resource id
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Resources {
    /// String table
    pub strings: BTreeMap<u32, String>,
}

impl Resources {
    /// Create an empty resource table
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a string resource
    #[must_use]
    pub fn with_string(mut self, id: u32, value: impl Into<String>) -> Self {
        let _ = self.strings.insert(id, value.into());
        self
    }

    /// Resolve a string resource
    #[must_use]
    pub fn string(&self, id: u32) -> Option<&str> {
        self.strings.get(&id).map(String::as_str)
    }
}

// =============================================================================
// HIERARCHY DUMP
// =============================================================================

/// Serialized form of a hierarchy snapshot
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HierarchyDump {
    /// Root views (windows)
    pub roots: Vec<View>,
    /// String resources
    pub resources: Resources,
}

// =============================================================================
// VIEW TREE
// =============================================================================

#[derive(Debug)]
struct NodeData {
    view: View,
    parent: Option<usize>,
    children: Vec<usize>,
    path: Vec<usize>,
}

#[derive(Debug, Default)]
struct TreeData {
    nodes: Vec<NodeData>,
    roots: Vec<usize>,
    resources: Resources,
}

/// Immutable snapshot of a view hierarchy
///
/// Cheap to clone. Nodes are stored in pre-order, so iteration order is
/// hierarchy order.
#[derive(Debug, Clone, Default)]
pub struct ViewTree {
    data: Arc<TreeData>,
}

impl ViewTree {
    /// Build a snapshot from root views and resources
    #[must_use]
    pub fn new(roots: Vec<View>, resources: Resources) -> Self {
        let mut data = TreeData {
            nodes: Vec::new(),
            roots: Vec::with_capacity(roots.len()),
            resources,
        };
        for (index, root) in roots.into_iter().enumerate() {
            let id = push_node(&mut data.nodes, root, None, vec![index]);
            data.roots.push(id);
        }
        Self {
            data: Arc::new(data),
        }
    }

    /// Build a snapshot from a single root
    #[must_use]
    pub fn from_root(root: View) -> Self {
        Self::new(vec![root], Resources::default())
    }

    /// Build a snapshot from a dump
    #[must_use]
    pub fn from_dump(dump: HierarchyDump) -> Self {
        Self::new(dump.roots, dump.resources)
    }

    /// Parse a JSON hierarchy dump
    pub fn from_json(json: &str) -> UiTestResult<Self> {
        let dump: HierarchyDump = serde_json::from_str(json)?;
        Ok(Self::from_dump(dump))
    }

    /// Parse a YAML hierarchy dump
    pub fn from_yaml(yaml: &str) -> UiTestResult<Self> {
        let dump: HierarchyDump = serde_yaml_ng::from_str(yaml)?;
        Ok(Self::from_dump(dump))
    }

    /// Number of views in the snapshot
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.nodes.len()
    }

    /// Whether the snapshot holds no views
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.nodes.is_empty()
    }

    /// String resources
    #[must_use]
    pub fn resources(&self) -> &Resources {
        &self.data.resources
    }

    /// Node by pre-order index
    #[must_use]
    pub fn node(&self, index: usize) -> Option<ViewNode> {
        (index < self.data.nodes.len()).then(|| ViewNode {
            tree: self.clone(),
            index,
        })
    }

    /// Root nodes
    pub fn roots(&self) -> impl Iterator<Item = ViewNode> + '_ {
        self.data.roots.iter().map(move |&index| ViewNode {
            tree: self.clone(),
            index,
        })
    }

    /// All nodes in hierarchy order
    pub fn nodes(&self) -> impl Iterator<Item = ViewNode> + '_ {
        (0..self.data.nodes.len()).map(move |index| ViewNode {
            tree: self.clone(),
            index,
        })
    }

    /// Indented rendering of the whole hierarchy, for diagnostics
    #[must_use]
    pub fn render(&self) -> String {
        let mut out = String::new();
        for node in self.nodes() {
            let depth = node.data().path.len().saturating_sub(1);
            out.push_str(&"+".repeat(depth));
            out.push('>');
            out.push_str(&node.summary());
            out.push('\n');
        }
        out
    }
}

fn push_node(nodes: &mut Vec<NodeData>, mut view: View, parent: Option<usize>, path: Vec<usize>) -> usize {
    let children = std::mem::take(&mut view.children);
    let index = nodes.len();
    nodes.push(NodeData {
        view,
        parent,
        children: Vec::with_capacity(children.len()),
        path: path.clone(),
    });
    for (position, child) in children.into_iter().enumerate() {
        let mut child_path = path.clone();
        child_path.push(position);
        let child_index = push_node(nodes, child, Some(index), child_path);
        nodes[index].children.push(child_index);
    }
    index
}

// =============================================================================
// VIEW NODE
// =============================================================================

/// Handle to one view inside a [`ViewTree`]
#[derive(Clone)]
pub struct ViewNode {
    tree: ViewTree,
    index: usize,
}

impl ViewNode {
    fn data(&self) -> &NodeData {
        &self.tree.data.nodes[self.index]
    }

    /// Pre-order index in the snapshot
    #[must_use]
    pub const fn index(&self) -> usize {
        self.index
    }

    /// The snapshot this node belongs to
    #[must_use]
    pub const fn tree(&self) -> &ViewTree {
        &self.tree
    }

    /// View properties (children are reachable through [`Self::children`])
    #[must_use]
    pub fn view(&self) -> &View {
        &self.data().view
    }

    /// Widget class
    #[must_use]
    pub fn kind(&self) -> ViewKind {
        self.view().kind
    }

    /// Root index followed by child indices from that root
    #[must_use]
    pub fn path(&self) -> &[usize] {
        &self.data().path
    }

    /// String resources of the snapshot
    #[must_use]
    pub fn resources(&self) -> &Resources {
        self.tree.resources()
    }

    /// Parent node
    #[must_use]
    pub fn parent(&self) -> Option<ViewNode> {
        self.data().parent.map(|index| ViewNode {
            tree: self.tree.clone(),
            index,
        })
    }

    /// Direct children
    pub fn children(&self) -> impl Iterator<Item = ViewNode> + '_ {
        self.data().children.iter().map(move |&index| ViewNode {
            tree: self.tree.clone(),
            index,
        })
    }

    /// Ancestors, nearest first
    pub fn ancestors(&self) -> impl Iterator<Item = ViewNode> {
        std::iter::successors(self.parent(), ViewNode::parent)
    }

    /// All descendants in hierarchy order
    pub fn descendants(&self) -> impl Iterator<Item = ViewNode> + '_ {
        let depth = self.path().len();
        let root = self.path().to_vec();
        self.tree
            .nodes()
            .skip(self.index + 1)
            .take_while(move |node| {
                let path = node.path();
                path.len() > depth && path[..depth] == root[..]
            })
    }

    /// Whether `self` is a (strict) descendant of `other`
    #[must_use]
    pub fn is_descendant_of(&self, other: &ViewNode) -> bool {
        self.ancestors().any(|a| a.index == other.index)
    }

    /// Visible to the user: this view and every ancestor are visible
    #[must_use]
    pub fn is_displayed(&self) -> bool {
        self.view().visible && self.ancestors().all(|a| a.view().visible)
    }

    /// One-line human readable description
    #[must_use]
    pub fn summary(&self) -> String {
        let view = self.view();
        let mut out = format!("{}{{", view.kind.simple_name());
        let mut fields: Vec<String> = Vec::new();
        if let Some(id) = &view.id {
            fields.push(format!("id={id}"));
        }
        if view.class_name.is_some() {
            fields.push(format!("class={}", view.class_name()));
        }
        if let Some(text) = &view.text {
            fields.push(format!("text={text}"));
        }
        if let Some(hint) = &view.hint {
            fields.push(format!("hint={hint}"));
        }
        if let Some(desc) = &view.content_description {
            fields.push(format!("desc={desc}"));
        }
        if let Some(toolbar) = &view.toolbar {
            if let Some(title) = &toolbar.title {
                fields.push(format!("title={title}"));
            }
            if let Some(subtitle) = &toolbar.subtitle {
                fields.push(format!("subtitle={subtitle}"));
            }
        }
        fields.push(format!("visible={}", view.visible));
        if !view.enabled {
            fields.push("enabled=false".to_string());
        }
        out.push_str(&fields.join(", "));
        out.push('}');
        out
    }
}

impl fmt::Debug for ViewNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ViewNode")
            .field("index", &self.index)
            .field("view", &self.summary())
            .finish()
    }
}

impl fmt::Display for ViewNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.summary())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    fn sample_tree() -> ViewTree {
        ViewTree::from_root(
            View::group([
                View::toolbar(ToolbarState::titled("Settings")).with_id("toolbar"),
                View::group([
                    View::text_view("Name"),
                    View::new(ViewKind::EditText).with_hint("Your name").hidden(),
                ])
                .with_id("form"),
            ])
            .with_id("root"),
        )
    }

    mod view_kind_tests {
        use super::*;

        #[test]
        fn test_is_a_chain() {
            assert!(ViewKind::EditText.is_a(ViewKind::TextView));
            assert!(ViewKind::EditText.is_a(ViewKind::View));
            assert!(ViewKind::OverflowMenuButton.is_a(ViewKind::ImageView));
            assert!(ViewKind::Toolbar.is_a(ViewKind::ViewGroup));
            assert!(!ViewKind::TextView.is_a(ViewKind::EditText));
            assert!(!ViewKind::ImageButton.is_a(ViewKind::TextView));
        }

        #[test]
        fn test_simple_name() {
            assert_eq!(ViewKind::Toolbar.simple_name(), "Toolbar");
            assert_eq!(
                ViewKind::OverflowMenuButton.simple_name(),
                "ActionMenuPresenter$OverflowMenuButton"
            );
        }

        #[test]
        fn test_serde_snake_case() {
            let json = serde_json::to_string(&ViewKind::EditText).unwrap();
            assert_eq!(json, "\"edit_text\"");
        }
    }

    mod view_tests {
        use super::*;

        #[test]
        fn test_defaults_visible_and_enabled() {
            let view = View::default();
            assert!(view.visible);
            assert!(view.enabled);
        }

        #[test]
        fn test_class_name_override() {
            let view = View::new(ViewKind::TextView).with_class_name("com.app.BadgeView");
            assert_eq!(view.class_name(), "com.app.BadgeView");
            assert_eq!(View::new(ViewKind::Button).class_name(), "android.widget.Button");
        }

        #[test]
        fn test_at_path() {
            let root = View::group([View::group([View::text_view("deep")])]);
            assert_eq!(
                root.at_path(&[0, 0]).and_then(|v| v.text.as_deref()),
                Some("deep")
            );
            assert!(root.at_path(&[3]).is_none());
        }

        #[test]
        fn test_menu_entry_hidden() {
            assert!(MenuEntry::overflow("Delete").is_hidden());
            assert!(!MenuEntry::action("Search").is_hidden());
            assert!(!MenuEntry::overflow("Gone").invisible().is_hidden());
        }
    }

    mod view_tree_tests {
        use super::*;

        #[test]
        fn test_preorder_layout() {
            let tree = sample_tree();
            assert_eq!(tree.len(), 5);
            let ids: Vec<Option<String>> = tree.nodes().map(|n| n.view().id.clone()).collect();
            assert_eq!(ids[0].as_deref(), Some("root"));
            assert_eq!(ids[1].as_deref(), Some("toolbar"));
            assert_eq!(ids[2].as_deref(), Some("form"));
        }

        #[test]
        fn test_parent_and_ancestors() {
            let tree = sample_tree();
            let edit = tree.node(4).unwrap();
            assert_eq!(edit.kind(), ViewKind::EditText);
            assert_eq!(edit.parent().unwrap().view().id.as_deref(), Some("form"));
            assert_eq!(edit.ancestors().count(), 2);
            assert_eq!(edit.path(), &[0, 1, 1]);
        }

        #[test]
        fn test_descendants() {
            let tree = sample_tree();
            let form = tree.node(2).unwrap();
            let texts: Vec<ViewKind> = form.descendants().map(|n| n.kind()).collect();
            assert_eq!(texts, vec![ViewKind::TextView, ViewKind::EditText]);
            let root = tree.node(0).unwrap();
            assert_eq!(root.descendants().count(), 4);
        }

        #[test]
        fn test_is_displayed_respects_ancestors() {
            let tree = ViewTree::from_root(View::group([View::text_view("inner")]).hidden());
            let inner = tree.node(1).unwrap();
            assert!(inner.view().visible);
            assert!(!inner.is_displayed());
        }

        #[test]
        fn test_summary() {
            let tree = sample_tree();
            let toolbar = tree.node(1).unwrap();
            assert_eq!(
                toolbar.summary(),
                "Toolbar{id=toolbar, title=Settings, visible=true}"
            );
        }

        #[test]
        fn test_from_json_dump() {
            let json = r#"{
                "roots": [
                    {"kind": "toolbar", "toolbar": {"title": "Inbox", "menu": [
                        {"title": "Archive", "placement": "in_overflow"}
                    ]}}
                ],
                "resources": {"strings": {"7": "Inbox"}}
            }"#;
            let tree = ViewTree::from_json(json).unwrap();
            let toolbar = tree.roots().next().unwrap();
            let state = toolbar.view().toolbar.clone().unwrap();
            assert_eq!(state.title.as_deref(), Some("Inbox"));
            assert!(state.menu[0].is_hidden());
            assert_eq!(tree.resources().string(7), Some("Inbox"));
        }

        #[test]
        fn test_from_yaml_dump() {
            let yaml = "roots:\n  - kind: edit_text\n    hint: Search products\n";
            let tree = ViewTree::from_yaml(yaml).unwrap();
            let node = tree.node(0).unwrap();
            assert_eq!(node.view().hint.as_deref(), Some("Search products"));
            assert!(node.view().visible);
        }

        #[test]
        fn test_render_indents_children() {
            let rendered = sample_tree().render();
            assert!(rendered.starts_with(">ViewGroup{id=root"));
            assert!(rendered.contains("++>EditText{hint=Your name, visible=false}"));
        }
    }
}
