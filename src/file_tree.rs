use std::collections::{BTreeSet, HashMap};

use serde::Serialize;

/// A node of the explorer tree. Only folders carry children.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum FileItem {
    File { name: String },
    Folder { name: String, children: Vec<FileItem> },
}

impl FileItem {
    pub fn file(name: impl Into<String>) -> Self {
        Self::File { name: name.into() }
    }

    pub fn folder(name: impl Into<String>, children: Vec<FileItem>) -> Self {
        Self::Folder {
            name: name.into(),
            children,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Self::File { name } | Self::Folder { name, .. } => name,
        }
    }

    pub fn is_folder(&self) -> bool {
        matches!(self, Self::Folder { .. })
    }

    pub fn children(&self) -> &[FileItem] {
        match self {
            Self::File { .. } => &[],
            Self::Folder { children, .. } => children,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilteredTree {
    pub items: Vec<FileItem>,
    /// Folder names kept by the filter; these open automatically.
    pub auto_expanded: BTreeSet<String>,
}

/// Case-insensitive substring filter. A folder survives when its own name matches or
/// when any descendant survives; files survive only on their own name. A blank query
/// returns the tree untouched.
pub fn filter_tree(items: &[FileItem], query: &str) -> FilteredTree {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return FilteredTree {
            items: items.to_vec(),
            auto_expanded: BTreeSet::new(),
        };
    }

    let mut auto_expanded = BTreeSet::new();
    let items = items
        .iter()
        .filter_map(|item| filter_item(item, &needle, &mut auto_expanded))
        .collect();
    FilteredTree {
        items,
        auto_expanded,
    }
}

fn filter_item(
    item: &FileItem,
    needle: &str,
    auto_expanded: &mut BTreeSet<String>,
) -> Option<FileItem> {
    let name_matches = item.name().to_lowercase().contains(needle);
    match item {
        FileItem::File { .. } => name_matches.then(|| item.clone()),
        FileItem::Folder { name, children } => {
            let kept: Vec<FileItem> = children
                .iter()
                .filter_map(|child| filter_item(child, needle, auto_expanded))
                .collect();
            if !name_matches && kept.is_empty() {
                return None;
            }
            auto_expanded.insert(name.clone());
            Some(FileItem::folder(name.clone(), kept))
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeRow {
    pub depth: usize,
    pub name: String,
    pub path: String,
    pub is_folder: bool,
    pub expanded: bool,
}

/// Short type label shown before a file name in the explorer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileBadge {
    Script,
    Stylesheet,
    Markup,
    Data,
    Other,
}

impl FileBadge {
    /// Picks a badge from the last extension of `name`, ignoring case.
    pub fn for_name(name: &str) -> Self {
        let extension = name
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_ascii_lowercase())
            .unwrap_or_default();
        match extension.as_str() {
            "js" => Self::Script,
            "css" => Self::Stylesheet,
            "html" => Self::Markup,
            "json" => Self::Data,
            _ => Self::Other,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Script => "JS",
            Self::Stylesheet => "CSS",
            Self::Markup => "HTML",
            Self::Data => "{ }",
            Self::Other => "*",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TreeActivation {
    Toggled { folder: String, expanded: bool },
    OpenFile(String),
}

/// Explorer view state over the static tree.
///
/// Expansion is keyed by folder name rather than path, so two folders sharing a
/// name open and close together.
#[derive(Debug, Clone)]
pub struct FileTree {
    items: Vec<FileItem>,
    query: String,
    expanded: HashMap<String, bool>,
    selected: usize,
}

impl FileTree {
    pub fn new(items: Vec<FileItem>) -> Self {
        Self {
            items,
            query: String::new(),
            expanded: HashMap::new(),
            selected: 0,
        }
    }

    /// Opens every folder on the way to `path`.
    pub fn expand_path(&mut self, path: &str) {
        let mut segments: Vec<&str> = path.split('/').collect();
        segments.pop();
        for folder in segments {
            self.expanded.insert(folder.to_string(), true);
        }
    }

    pub fn items(&self) -> &[FileItem] {
        &self.items
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
        self.apply_auto_expansion();
        self.clamp_selection();
    }

    pub fn push_query_char(&mut self, ch: char) {
        let mut query = std::mem::take(&mut self.query);
        query.push(ch);
        self.set_query(query);
    }

    pub fn pop_query_char(&mut self) {
        let mut query = std::mem::take(&mut self.query);
        query.pop();
        self.set_query(query);
    }

    pub fn clear_query(&mut self) {
        self.set_query(String::new());
    }

    pub fn is_expanded(&self, folder_name: &str) -> bool {
        self.expanded.get(folder_name).copied().unwrap_or(false)
    }

    pub fn toggle(&mut self, folder_name: &str) -> bool {
        let next = !self.is_expanded(folder_name);
        self.expanded.insert(folder_name.to_string(), next);
        self.clamp_selection();
        next
    }

    pub fn filtered(&self) -> FilteredTree {
        filter_tree(&self.items, &self.query)
    }

    pub fn visible_rows(&self) -> Vec<TreeRow> {
        let filtered = self.filtered();
        let mut rows = Vec::new();
        self.collect_rows(&filtered.items, 0, "", &mut rows);
        rows
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn select_next(&mut self) {
        let count = self.visible_rows().len();
        if count > 0 {
            self.selected = (self.selected + 1).min(count - 1);
        }
    }

    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn activate_selected(&mut self) -> Option<TreeActivation> {
        self.activate_row(self.selected)
    }

    /// Folders toggle; files report their full slash-joined path.
    pub fn activate_row(&mut self, row_index: usize) -> Option<TreeActivation> {
        let row = self.visible_rows().into_iter().nth(row_index)?;
        self.selected = row_index;
        if row.is_folder {
            let expanded = self.toggle(&row.name);
            Some(TreeActivation::Toggled {
                folder: row.name,
                expanded,
            })
        } else {
            Some(TreeActivation::OpenFile(row.path))
        }
    }

    /// Moves the row cursor onto `path` when it is visible.
    pub fn reveal(&mut self, path: &str) {
        if let Some(index) = self.visible_rows().iter().position(|row| row.path == path) {
            self.selected = index;
        }
    }

    fn collect_rows(&self, items: &[FileItem], depth: usize, prefix: &str, rows: &mut Vec<TreeRow>) {
        for item in items {
            let path = if prefix.is_empty() {
                item.name().to_string()
            } else {
                format!("{prefix}/{}", item.name())
            };
            let expanded = item.is_folder() && self.is_expanded(item.name());
            rows.push(TreeRow {
                depth,
                name: item.name().to_string(),
                path: path.clone(),
                is_folder: item.is_folder(),
                expanded,
            });
            if expanded {
                self.collect_rows(item.children(), depth + 1, &path, rows);
            }
        }
    }

    fn apply_auto_expansion(&mut self) {
        for name in self.filtered().auto_expanded {
            self.expanded.insert(name, true);
        }
    }

    fn clamp_selection(&mut self) {
        let count = self.visible_rows().len();
        self.selected = self.selected.min(count.saturating_sub(1));
    }
}

#[cfg(test)]
#[path = "../tests/unit/file_tree_tests.rs"]
mod tests;
