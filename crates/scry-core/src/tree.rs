//! The mirrored hierarchy tree: project -> snapshot -> analysis.

use std::collections::HashMap;

/// A labeled node with label-indexed children.
///
/// Labels are unique among one node's children; re-adding an existing
/// label keeps the existing node (and its subtree), it never silently
/// merges. Replacing a node requires an explicit remove-then-add.
#[derive(Debug, Default)]
pub struct HierarchyNode {
    label: String,
    children: Vec<HierarchyNode>,
    by_label: HashMap<String, usize>,
}

impl HierarchyNode {
    fn new(label: String) -> Self {
        Self {
            label,
            children: Vec::new(),
            by_label: HashMap::new(),
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// Children in display order (ascending by label).
    pub fn children(&self) -> &[HierarchyNode] {
        &self.children
    }

    /// O(1) child lookup by label.
    pub fn child(&self, label: &str) -> Option<&HierarchyNode> {
        self.by_label.get(label).map(|&i| &self.children[i])
    }

    fn child_mut(&mut self, label: &str) -> Option<&mut HierarchyNode> {
        self.by_label.get(label).map(|&i| &mut self.children[i])
    }

    /// Add children for `names` and re-sort the whole level.
    ///
    /// The level is rebuilt rather than insertion-sorted: O(n log n) per
    /// level, fine since n is typically tens of items.
    fn add_sorted_children(&mut self, names: Vec<String>) {
        for name in names {
            if self.by_label.contains_key(&name) {
                continue;
            }
            self.by_label.insert(name.clone(), self.children.len());
            self.children.push(HierarchyNode::new(name));
        }
        self.children.sort_by(|a, b| a.label.cmp(&b.label));
        self.rebuild_index();
    }

    /// Remove the child with `label`, returning whether it existed.
    fn remove_child(&mut self, label: &str) -> bool {
        match self.by_label.remove(label) {
            Some(i) => {
                self.children.remove(i);
                self.rebuild_index();
                true
            }
            None => false,
        }
    }

    fn clear_children(&mut self) {
        self.children.clear();
        self.by_label.clear();
    }

    fn rebuild_index(&mut self) {
        self.by_label = self
            .children
            .iter()
            .enumerate()
            .map(|(i, c)| (c.label.clone(), i))
            .collect();
    }
}

/// The mirrored hierarchy. The root node is synthetic and invisible to
/// presentation; its children are the project nodes.
///
/// The tree is rebuilt wholesale on every full sync: the root's children
/// are cleared before repopulating so stale nodes cannot leak into a
/// half-updated tree. It is never queried concurrently with a rebuild.
#[derive(Debug, Default)]
pub struct HierarchyTree {
    root: HierarchyNode,
}

impl HierarchyTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// The project nodes, in display order.
    pub fn projects(&self) -> &[HierarchyNode] {
        self.root.children()
    }

    /// Create a project node if one with `name` does not exist yet.
    pub fn upsert_project(&mut self, name: &str) {
        self.root.add_sorted_children(vec![name.to_string()]);
    }

    /// Drop every node below the synthetic root.
    pub fn clear(&mut self) {
        self.root.clear_children();
    }

    /// Add children under the node at `parent_path` (labels from the
    /// project level down; the empty path addresses the root) and re-sort
    /// that level. Returns false when the parent does not exist.
    pub fn add_sorted_children(&mut self, parent_path: &[&str], names: Vec<String>) -> bool {
        let mut node = &mut self.root;
        for label in parent_path {
            match node.child_mut(label) {
                Some(child) => node = child,
                None => return false,
            }
        }
        node.add_sorted_children(names);
        true
    }

    /// Remove the node at the end of `path`. Returns false when absent.
    pub fn remove(&mut self, path: &[&str]) -> bool {
        let Some((last, parents)) = path.split_last() else {
            return false;
        };
        let mut node = &mut self.root;
        for label in parents {
            match node.child_mut(label) {
                Some(child) => node = child,
                None => return false,
            }
        }
        node.remove_child(last)
    }

    /// Walk `labels` down from the project level.
    pub fn find_by_path(&self, labels: &[&str]) -> Option<&HierarchyNode> {
        let mut node = &self.root;
        for label in labels {
            node = node.child(label)?;
        }
        Some(node)
    }
}

/// A (project, snapshot, analysis) selection resolved from a widget
/// selection path.
///
/// Resolution is positional: in the widget's path the synthetic root sits
/// at index 0, so index 1 is the project label, 2 the snapshot, 3 the
/// analysis. A missing index yields `None` for that component, not an
/// error, because the user may have selected a non-leaf node.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    pub project: Option<String>,
    pub snapshot: Option<String>,
    pub analysis: Option<String>,
}

impl Selection {
    pub fn new(
        project: impl Into<String>,
        snapshot: impl Into<String>,
        analysis: impl Into<String>,
    ) -> Self {
        Self {
            project: Some(project.into()),
            snapshot: Some(snapshot.into()),
            analysis: Some(analysis.into()),
        }
    }

    /// Resolve a widget selection path (root at index 0).
    pub fn from_widget_path(path: &[String]) -> Self {
        Self {
            project: path.get(1).cloned(),
            snapshot: path.get(2).cloned(),
            analysis: path.get(3).cloned(),
        }
    }
}
