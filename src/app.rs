use std::sync::Arc;
use std::time::Instant;

use ratatui::layout::Rect;
use tracing::debug;

use crate::copilot::{CopilotPanel, CopilotTiming, SuggestionEngine};
use crate::editor::EditorSurface;
use crate::error::ContextError;
use crate::events::AppEvent;
use crate::file_tree::{FileTree, TreeActivation};
use crate::suggestions::SuggestionCatalog;
use crate::ui::{self, HitTarget};
use crate::workspace::{EditorContext, Workspace};

pub const MAX_SUGGESTION_EVENTS_PER_TICK: usize = 32;
const PAGE_SCROLL_LINES: isize = 10;
const WHEEL_SCROLL_LINES: isize = 3;
const DEFAULT_SCREEN: Rect = Rect {
    x: 0,
    y: 0,
    width: 120,
    height: 40,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Explorer,
    Editor,
    Copilot,
}

impl Focus {
    fn next(self) -> Self {
        match self {
            Self::Explorer => Self::Editor,
            Self::Editor => Self::Copilot,
            Self::Copilot => Self::Explorer,
        }
    }
}

#[derive(Debug)]
pub struct App {
    pub running: bool,
    pub ticks: u64,
    pub focus: Focus,
    context: EditorContext,
    tree: FileTree,
    editor: EditorSurface,
    copilot: CopilotPanel,
    screen: Rect,
}

impl App {
    /// Provides `workspace` to every pane and kicks off analysis of the active file.
    pub fn new(workspace: Workspace, catalog: Arc<SuggestionCatalog>, timing: CopilotTiming) -> Self {
        let active = workspace.active_file().to_string();
        let mut tree = FileTree::new(workspace.tree().to_vec());
        tree.expand_path(&active);
        tree.reveal(&active);
        let mut copilot = CopilotPanel::new(SuggestionEngine::new(catalog, timing));
        copilot.request_for_file(&active);
        Self {
            running: true,
            ticks: 0,
            focus: Focus::Editor,
            context: EditorContext::provide(workspace),
            tree,
            editor: EditorSurface::new(&active),
            copilot,
            screen: DEFAULT_SCREEN,
        }
    }

    pub fn workspace(&self) -> Result<&Workspace, ContextError> {
        self.context.workspace()
    }

    pub fn tree(&self) -> &FileTree {
        &self.tree
    }

    pub fn editor(&self) -> &EditorSurface {
        &self.editor
    }

    pub fn copilot(&self) -> &CopilotPanel {
        &self.copilot
    }

    pub fn screen(&self) -> Rect {
        self.screen
    }

    pub fn set_screen(&mut self, screen: Rect) {
        self.screen = screen;
    }

    pub fn quit(&mut self) {
        self.running = false;
    }

    /// Cancels in-flight suggestion work and releases the workspace.
    pub fn shutdown(&mut self) -> Option<Workspace> {
        self.running = false;
        self.copilot.teardown();
        self.context.teardown()
    }

    pub fn on_tick(&mut self) -> Result<(), ContextError> {
        self.ticks = self.ticks.wrapping_add(1);
        self.copilot.poll(MAX_SUGGESTION_EVENTS_PER_TICK);
        self.context
            .workspace_mut()?
            .toasts_mut()
            .prune(Instant::now());
        Ok(())
    }

    pub fn handle_event(&mut self, event: AppEvent) -> Result<(), ContextError> {
        match event {
            AppEvent::Tick => self.on_tick(),
            AppEvent::Quit => {
                self.quit();
                Ok(())
            }
            AppEvent::Tab if self.focus == Focus::Editor => self.indent_active_file(),
            AppEvent::Tab | AppEvent::FocusNext => self.focus_next(),
            AppEvent::MoveUp => self.move_up(),
            AppEvent::MoveDown => self.move_down(),
            AppEvent::PageUp => self.scroll_editor(-PAGE_SCROLL_LINES),
            AppEvent::PageDown => self.scroll_editor(PAGE_SCROLL_LINES),
            AppEvent::MouseScrollUp => self.scroll_editor(-WHEEL_SCROLL_LINES),
            AppEvent::MouseScrollDown => self.scroll_editor(WHEEL_SCROLL_LINES),
            AppEvent::InputChar(ch) => {
                match self.focus {
                    Focus::Explorer => self.tree.push_query_char(ch),
                    Focus::Copilot => self.copilot.input_char(ch),
                    Focus::Editor => {}
                }
                Ok(())
            }
            AppEvent::Backspace => {
                match self.focus {
                    Focus::Explorer => self.tree.pop_query_char(),
                    Focus::Copilot => self.copilot.backspace_input(),
                    Focus::Editor => {}
                }
                Ok(())
            }
            AppEvent::Cancel => {
                match self.focus {
                    Focus::Explorer => self.tree.clear_query(),
                    Focus::Copilot => self.copilot.clear_input(),
                    Focus::Editor => {}
                }
                Ok(())
            }
            AppEvent::Submit => self.submit(),
            AppEvent::ToggleSidebar => {
                let visible = self.context.workspace_mut()?.toggle_sidebar();
                if !visible && self.focus == Focus::Explorer {
                    self.focus = Focus::Editor;
                }
                Ok(())
            }
            AppEvent::TogglePanel => {
                let workspace = self.context.workspace_mut()?;
                let visible = workspace.toggle_panel();
                if visible {
                    // a remounted panel analyzes the active file again
                    let active = workspace.active_file().to_string();
                    self.copilot.request_for_file(&active);
                } else {
                    self.copilot.teardown();
                    if self.focus == Focus::Copilot {
                        self.focus = Focus::Editor;
                    }
                }
                Ok(())
            }
            AppEvent::Save => {
                self.context.workspace_mut()?.save();
                Ok(())
            }
            AppEvent::Share => {
                self.context.workspace_mut()?.share();
                Ok(())
            }
            AppEvent::Download => {
                self.context.workspace_mut()?.download();
                Ok(())
            }
            AppEvent::MouseLeftClick(x, y) => self.click(x, y),
        }
    }

    /// Switches the active file. Content and suggestions only reset on an actual change.
    pub fn open_file(&mut self, path: &str) -> Result<(), ContextError> {
        if !self.context.workspace_mut()?.select_file(path) {
            return Ok(());
        }
        self.editor.set_file(path);
        self.tree.reveal(path);
        self.copilot.request_for_file(path);
        Ok(())
    }

    /// Replaces the active file's cached text, as a typing edit would.
    pub fn edit_active_content(&mut self, text: String) -> Result<(), ContextError> {
        self.context.workspace_mut()?.update_content(text);
        Ok(())
    }

    fn indent_active_file(&mut self) -> Result<(), ContextError> {
        let workspace = self.context.workspace_mut()?;
        let indented = EditorSurface::indent(workspace.active_content());
        workspace.update_content(indented);
        Ok(())
    }

    fn focus_next(&mut self) -> Result<(), ContextError> {
        let workspace = self.context.workspace()?;
        let mut next = self.focus.next();
        loop {
            let visible = match next {
                Focus::Explorer => workspace.sidebar_visible(),
                Focus::Copilot => workspace.panel_visible(),
                Focus::Editor => true,
            };
            if visible {
                break;
            }
            next = next.next();
        }
        self.focus = next;
        Ok(())
    }

    fn move_up(&mut self) -> Result<(), ContextError> {
        match self.focus {
            Focus::Explorer => self.tree.select_prev(),
            Focus::Copilot => self.copilot.select_prev(),
            Focus::Editor => {
                self.editor.move_up();
                self.keep_current_line_visible()?;
            }
        }
        Ok(())
    }

    fn move_down(&mut self) -> Result<(), ContextError> {
        match self.focus {
            Focus::Explorer => self.tree.select_next(),
            Focus::Copilot => self.copilot.select_next(),
            Focus::Editor => {
                let content = self.context.workspace()?.active_content();
                self.editor.move_down(content);
                self.keep_current_line_visible()?;
            }
        }
        Ok(())
    }

    fn keep_current_line_visible(&mut self) -> Result<(), ContextError> {
        let workspace = self.context.workspace()?;
        let height = ui::editor_viewport_height(
            self.screen,
            workspace.sidebar_visible(),
            workspace.panel_visible(),
        );
        self.editor.ensure_current_visible(height);
        Ok(())
    }

    fn scroll_editor(&mut self, delta: isize) -> Result<(), ContextError> {
        let content = self.context.workspace()?.active_content();
        self.editor.scroll_by(delta, content);
        Ok(())
    }

    fn submit(&mut self) -> Result<(), ContextError> {
        match self.focus {
            Focus::Explorer => {
                if let Some(TreeActivation::OpenFile(path)) = self.tree.activate_selected() {
                    self.open_file(&path)?;
                }
            }
            Focus::Copilot => {
                if !self.copilot.submit_input() {
                    self.copilot.toggle_selected();
                }
            }
            Focus::Editor => {}
        }
        Ok(())
    }

    fn click(&mut self, x: u16, y: u16) -> Result<(), ContextError> {
        let Some(target) = ui::hit_test(self.screen, self, x, y) else {
            return Ok(());
        };
        debug!(?target, x, y, "mouse click");
        match target {
            HitTarget::ExplorerRow(row) => {
                self.focus = Focus::Explorer;
                if let Some(TreeActivation::OpenFile(path)) = self.tree.activate_row(row) {
                    self.open_file(&path)?;
                }
            }
            HitTarget::RecentFile(index) => {
                self.focus = Focus::Explorer;
                let path = self
                    .context
                    .workspace()?
                    .recent_files()
                    .get(index)
                    .cloned();
                if let Some(path) = path {
                    self.open_file(&path)?;
                }
            }
            HitTarget::Explorer => self.focus = Focus::Explorer,
            HitTarget::EditorLine(line) => {
                self.focus = Focus::Editor;
                let content = self.context.workspace()?.active_content();
                self.editor.click_line(line, content);
            }
            HitTarget::Editor => self.focus = Focus::Editor,
            HitTarget::Suggestion(index) => {
                self.focus = Focus::Copilot;
                self.copilot.toggle(index);
            }
            HitTarget::Copilot => self.focus = Focus::Copilot,
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../tests/unit/app_tests.rs"]
mod tests;
