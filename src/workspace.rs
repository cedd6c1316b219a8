use std::collections::HashMap;
use std::time::Duration;

use tracing::{debug, info};

use crate::error::ContextError;
use crate::file_tree::FileItem;
use crate::notify::Toasts;
use crate::recent::RecentFiles;
use crate::samples::{self, DEFAULT_CONTENT};

/// Shell state shared by every pane: which file is open, the per-file content cache,
/// recent files, pane visibility and pending notifications.
#[derive(Debug, Clone)]
pub struct Workspace {
    tree: Vec<FileItem>,
    active_file: String,
    contents: HashMap<String, String>,
    recent: RecentFiles,
    sidebar_visible: bool,
    panel_visible: bool,
    toasts: Toasts,
}

impl Workspace {
    pub fn new(
        tree: Vec<FileItem>,
        contents: HashMap<String, String>,
        active_file: &str,
        toast_duration: Duration,
    ) -> Self {
        let mut recent = RecentFiles::default();
        recent.touch(active_file);
        Self {
            tree,
            active_file: active_file.to_string(),
            contents,
            recent,
            sidebar_visible: true,
            panel_visible: true,
            toasts: Toasts::new(toast_duration),
        }
    }

    pub fn sample(active_file: &str, toast_duration: Duration) -> Self {
        Self::new(
            samples::sample_tree(),
            samples::sample_contents(),
            active_file,
            toast_duration,
        )
    }

    pub fn tree(&self) -> &[FileItem] {
        &self.tree
    }

    pub fn active_file(&self) -> &str {
        &self.active_file
    }

    /// Returns `true` when the active file actually changed.
    pub fn select_file(&mut self, path: &str) -> bool {
        if self.active_file == path {
            return false;
        }
        info!(from = %self.active_file, to = %path, "active file changed");
        self.active_file = path.to_string();
        self.recent.touch(path);
        true
    }

    pub fn content(&self, path: &str) -> &str {
        self.contents
            .get(path)
            .map(String::as_str)
            .unwrap_or(DEFAULT_CONTENT)
    }

    pub fn active_content(&self) -> &str {
        self.content(&self.active_file)
    }

    /// Replaces the cached text of the active file only.
    pub fn update_content(&mut self, text: String) {
        debug!(file = %self.active_file, bytes = text.len(), "content updated");
        self.contents.insert(self.active_file.clone(), text);
        self.toasts.push(
            "Changes saved",
            format!("{} was updated", self.active_file),
        );
    }

    pub fn recent_files(&self) -> &[String] {
        self.recent.entries()
    }

    pub fn sidebar_visible(&self) -> bool {
        self.sidebar_visible
    }

    pub fn panel_visible(&self) -> bool {
        self.panel_visible
    }

    pub fn toggle_sidebar(&mut self) -> bool {
        self.sidebar_visible = !self.sidebar_visible;
        self.sidebar_visible
    }

    pub fn toggle_panel(&mut self) -> bool {
        self.panel_visible = !self.panel_visible;
        self.panel_visible
    }

    pub fn save(&mut self) {
        self.toasts.push(
            "File saved",
            format!("{} saved to the session", self.active_file),
        );
    }

    pub fn share(&mut self) {
        self.toasts.push(
            "Link copied",
            format!("A share link for {} is ready", self.active_file),
        );
    }

    pub fn download(&mut self) {
        self.toasts.push(
            "Download started",
            format!("Preparing {} for download", self.active_file),
        );
    }

    pub fn toasts(&self) -> &Toasts {
        &self.toasts
    }

    pub fn toasts_mut(&mut self) -> &mut Toasts {
        &mut self.toasts
    }
}

/// Explicit owner of the workspace. Components borrow the workspace through it and
/// fail fast once it has been torn down or before it is provided.
#[derive(Debug, Default)]
pub struct EditorContext {
    workspace: Option<Workspace>,
}

impl EditorContext {
    pub fn provide(workspace: Workspace) -> Self {
        info!(active_file = %workspace.active_file(), "editor context provisioned");
        Self {
            workspace: Some(workspace),
        }
    }

    pub fn is_provisioned(&self) -> bool {
        self.workspace.is_some()
    }

    pub fn workspace(&self) -> Result<&Workspace, ContextError> {
        self.workspace.as_ref().ok_or(ContextError::NotProvisioned {
            operation: "read the workspace",
        })
    }

    pub fn workspace_mut(&mut self) -> Result<&mut Workspace, ContextError> {
        self.workspace.as_mut().ok_or(ContextError::NotProvisioned {
            operation: "modify the workspace",
        })
    }

    pub fn teardown(&mut self) -> Option<Workspace> {
        let workspace = self.workspace.take();
        if workspace.is_some() {
            info!("editor context torn down");
        }
        workspace
    }
}
