use ratatui::prelude::*;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::app::{App, Focus};
use crate::copilot::{PanelRow, PanelRowKind};
use crate::editor::line_count;
use crate::file_tree::FileBadge;
use crate::text_layout::{max_line_width, wrap_words};
use crate::theme::Theme;
use crate::workspace::Workspace;

const TITLE_HEIGHT: u16 = 1;
const STATUS_HEIGHT: u16 = 1;
const SIDEBAR_WIDTH: u16 = 30;
const PANEL_WIDTH: u16 = 44;
const SEARCH_HEIGHT: u16 = 1;
const RECENT_HEIGHT: u16 = 6;
const INPUT_HEIGHT: u16 = 3;
const TOAST_WIDTH: u16 = 40;
const MIN_GUTTER_DIGITS: usize = 3;
const STATUS_HELP_TEXT: &str =
    "Shift+Tab focus | Ctrl+B sidebar | Ctrl+J copilot | Ctrl+S save | Ctrl+E share | Ctrl+D download | Ctrl+C quit";
const INPUT_PLACEHOLDER: &str = "Ask about this file...";
const READY_FOOTER: &str = "Copilot is ready to assist";
const BUSY_FOOTER: &str = "Copilot is thinking";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShellLayout {
    pub title: Rect,
    pub sidebar: Option<Rect>,
    pub editor: Rect,
    pub panel: Option<Rect>,
    pub status: Rect,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ExplorerLayout {
    search: Rect,
    tree: Rect,
    recent: Rect,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct PanelLayout {
    status: Rect,
    list: Rect,
    footer: Rect,
    input: Rect,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitTarget {
    ExplorerRow(usize),
    RecentFile(usize),
    Explorer,
    EditorLine(usize),
    Editor,
    Suggestion(usize),
    Copilot,
}

pub fn shell_layout(screen: Rect, sidebar_visible: bool, panel_visible: bool) -> ShellLayout {
    let [title, body, status] = Layout::vertical([
        Constraint::Length(TITLE_HEIGHT),
        Constraint::Min(0),
        Constraint::Length(STATUS_HEIGHT),
    ])
    .areas(screen);
    let sidebar_width = if sidebar_visible { SIDEBAR_WIDTH } else { 0 };
    let panel_width = if panel_visible { PANEL_WIDTH } else { 0 };
    let [sidebar, editor, panel] = Layout::horizontal([
        Constraint::Length(sidebar_width),
        Constraint::Min(0),
        Constraint::Length(panel_width),
    ])
    .areas(body);
    ShellLayout {
        title,
        sidebar: sidebar_visible.then_some(sidebar),
        editor,
        panel: panel_visible.then_some(panel),
        status,
    }
}

fn workspace_layout(screen: Rect, workspace: &Workspace) -> ShellLayout {
    shell_layout(
        screen,
        workspace.sidebar_visible(),
        workspace.panel_visible(),
    )
}

fn pane_inner(area: Rect) -> Rect {
    Block::default().borders(Borders::ALL).inner(area)
}

fn explorer_layout(sidebar: Rect) -> ExplorerLayout {
    let [search, tree, recent] = Layout::vertical([
        Constraint::Length(SEARCH_HEIGHT),
        Constraint::Min(0),
        Constraint::Length(RECENT_HEIGHT),
    ])
    .areas(pane_inner(sidebar));
    ExplorerLayout {
        search,
        tree,
        recent,
    }
}

fn panel_layout(panel: Rect) -> PanelLayout {
    let [status, list, footer, input] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Min(0),
        Constraint::Length(1),
        Constraint::Length(INPUT_HEIGHT),
    ])
    .areas(pane_inner(panel));
    PanelLayout {
        status,
        list,
        footer,
        input,
    }
}

/// Number of document rows the editor pane can show.
pub fn editor_viewport_height(screen: Rect, sidebar_visible: bool, panel_visible: bool) -> usize {
    let layout = shell_layout(screen, sidebar_visible, panel_visible);
    usize::from(pane_inner(layout.editor).height)
}

fn tree_scroll(selected: usize, height: u16) -> usize {
    let height = usize::from(height);
    if height == 0 {
        return 0;
    }
    selected.saturating_sub(height - 1)
}

fn panel_scroll(rows: &[PanelRow], selected: usize, height: u16) -> usize {
    let first_row = rows
        .iter()
        .position(|row| row.owner == Some(selected))
        .unwrap_or(0);
    if first_row < usize::from(height) {
        0
    } else {
        first_row
    }
}

fn editor_scroll(app: &App, content: &str) -> usize {
    app.editor()
        .scroll()
        .min(line_count(content).saturating_sub(1))
}

fn gutter_width(content: &str) -> usize {
    line_count(content).to_string().len().max(MIN_GUTTER_DIGITS) + 1
}

fn contains(area: Rect, x: u16, y: u16) -> bool {
    x >= area.x && x < area.x.saturating_add(area.width) && y >= area.y && y < area.y.saturating_add(area.height)
}

pub fn hit_test(screen: Rect, app: &App, x: u16, y: u16) -> Option<HitTarget> {
    let workspace = app.workspace().ok()?;
    let layout = workspace_layout(screen, workspace);

    if let Some(sidebar) = layout.sidebar
        && contains(sidebar, x, y)
    {
        let explorer = explorer_layout(sidebar);
        if contains(explorer.tree, x, y) {
            let offset = usize::from(y - explorer.tree.y);
            let row = tree_scroll(app.tree().selected(), explorer.tree.height) + offset;
            if row < app.tree().visible_rows().len() {
                return Some(HitTarget::ExplorerRow(row));
            }
        }
        if contains(explorer.recent, x, y) && y > explorer.recent.y {
            let index = usize::from(y - explorer.recent.y - 1);
            if index < workspace.recent_files().len() {
                return Some(HitTarget::RecentFile(index));
            }
        }
        return Some(HitTarget::Explorer);
    }

    if let Some(panel) = layout.panel
        && contains(panel, x, y)
    {
        let areas = panel_layout(panel);
        if contains(areas.list, x, y) {
            let rows = app.copilot().rows(areas.list.width);
            let scroll = panel_scroll(&rows, app.copilot().selected(), areas.list.height);
            let index = scroll + usize::from(y - areas.list.y);
            if let Some(owner) = rows.get(index).and_then(|row| row.owner) {
                return Some(HitTarget::Suggestion(owner));
            }
        }
        return Some(HitTarget::Copilot);
    }

    if contains(layout.editor, x, y) {
        let inner = pane_inner(layout.editor);
        if contains(inner, x, y) {
            let content = workspace.active_content();
            let line = editor_scroll(app, content) + usize::from(y - inner.y) + 1;
            if line <= line_count(content) {
                return Some(HitTarget::EditorLine(line));
            }
        }
        return Some(HitTarget::Editor);
    }
    None
}

pub fn render(frame: &mut Frame, app: &App, theme: &Theme) {
    let Ok(workspace) = app.workspace() else {
        frame.render_widget(
            Paragraph::new("Editor context closed.")
                .style(Style::default().bg(theme.editor_bg).fg(theme.muted_fg)),
            frame.area(),
        );
        return;
    };
    let layout = workspace_layout(frame.area(), workspace);

    render_title_bar(frame, layout.title, app, workspace, theme);
    if let Some(sidebar) = layout.sidebar {
        render_explorer(frame, sidebar, app, workspace, theme);
    }
    render_editor(frame, layout.editor, app, workspace, theme);
    if let Some(panel) = layout.panel {
        render_copilot(frame, panel, app, theme);
    }
    render_status_bar(frame, layout.status, app, workspace, theme);
    render_toasts(frame, layout.editor, workspace, theme);
}

fn pane_block<'a>(title: &'a str, focused: bool, bg: Color, theme: &Theme) -> Block<'a> {
    let border_fg = if focused {
        theme.status_bg
    } else {
        theme.muted_fg
    };
    Block::default()
        .borders(Borders::ALL)
        .title(title)
        .border_style(Style::default().fg(border_fg))
        .style(Style::default().bg(bg).fg(theme.text_fg))
}

fn render_title_bar(frame: &mut Frame, area: Rect, app: &App, workspace: &Workspace, theme: &Theme) {
    let mut title = format!(" pilotpad | {}", workspace.active_file());
    if app.copilot().is_loading() {
        title.push_str(" | copilot working");
    }
    frame.render_widget(
        Paragraph::new(title).style(Style::default().bg(theme.title_bg).fg(theme.text_fg)),
        area,
    );
}

fn render_explorer(frame: &mut Frame, area: Rect, app: &App, workspace: &Workspace, theme: &Theme) {
    let focused = app.focus == Focus::Explorer;
    frame.render_widget(pane_block(" EXPLORER ", focused, theme.sidebar_bg, theme), area);
    let layout = explorer_layout(area);

    let query = app.tree().query();
    let search = if query.is_empty() {
        Line::from(Span::styled("Search files", Style::default().fg(theme.muted_fg)))
    } else {
        Line::from(vec![
            Span::styled("Search: ", Style::default().fg(theme.muted_fg)),
            Span::raw(query.to_string()),
        ])
    };
    frame.render_widget(
        Paragraph::new(search).style(Style::default().bg(theme.input_bg).fg(theme.text_fg)),
        layout.search,
    );

    let rows = app.tree().visible_rows();
    let scroll = tree_scroll(app.tree().selected(), layout.tree.height);
    let lines: Vec<Line> = rows
        .iter()
        .enumerate()
        .skip(scroll)
        .take(usize::from(layout.tree.height))
        .map(|(index, row)| {
            let icon = match (row.is_folder, row.expanded) {
                (true, true) => "v ",
                (true, false) => "> ",
                (false, _) => "  ",
            };
            let mut style = Style::default().fg(theme.text_fg);
            if row.path == workspace.active_file() {
                style = style.fg(theme.accent_fg).add_modifier(Modifier::BOLD);
            }
            let mut spans = vec![Span::raw(format!("{}{icon}", "  ".repeat(row.depth)))];
            if !row.is_folder {
                let badge = FileBadge::for_name(&row.name);
                spans.push(Span::styled(
                    format!("{} ", badge.label()),
                    Style::default().fg(badge_fg(badge, theme)),
                ));
            }
            spans.push(Span::styled(row.name.clone(), style));
            let line = Line::from(spans);
            if focused && index == app.tree().selected() {
                line.style(Style::default().bg(theme.current_line_bg))
            } else {
                line
            }
        })
        .collect();
    let tree_text = if lines.is_empty() {
        Text::from(Line::from(Span::styled(
            "No matching files",
            Style::default().fg(theme.muted_fg),
        )))
    } else {
        Text::from(lines)
    };
    frame.render_widget(Paragraph::new(tree_text), layout.tree);

    let mut recent_lines = vec![Line::from(Span::styled(
        "RECENT",
        Style::default().fg(theme.muted_fg).add_modifier(Modifier::BOLD),
    ))];
    recent_lines.extend(
        workspace
            .recent_files()
            .iter()
            .map(|path| Line::from(format!("  {path}"))),
    );
    frame.render_widget(Paragraph::new(recent_lines), layout.recent);
}

fn render_editor(frame: &mut Frame, area: Rect, app: &App, workspace: &Workspace, theme: &Theme) {
    let editor = app.editor();
    let title = format!(" {} ", editor.file_name());
    frame.render_widget(
        pane_block(&title, app.focus == Focus::Editor, theme.editor_bg, theme),
        area,
    );
    let inner = pane_inner(area);
    let content = workspace.active_content();
    let gutter = gutter_width(content);
    let scroll = editor_scroll(app, content);

    let lines: Vec<Line> = editor
        .rows(content)
        .into_iter()
        .skip(scroll)
        .take(usize::from(inner.height))
        .map(|row| {
            let current = row.number == editor.current_line();
            let number_fg = if current { theme.text_fg } else { theme.muted_fg };
            let mut spans = vec![Span::styled(
                format!("{:>width$} ", row.number, width = gutter - 1),
                Style::default().fg(number_fg),
            )];
            spans.extend(row.spans.into_iter().map(|span| {
                Span::styled(span.text, Style::default().fg(theme.token_fg(span.kind)))
            }));
            let line = Line::from(spans);
            if current {
                line.style(Style::default().bg(theme.current_line_bg))
            } else {
                line
            }
        })
        .collect();
    frame.render_widget(Paragraph::new(lines), inner);
}

fn render_copilot(frame: &mut Frame, area: Rect, app: &App, theme: &Theme) {
    let focused = app.focus == Focus::Copilot;
    frame.render_widget(pane_block(" COPILOT ", focused, theme.panel_bg, theme), area);
    let layout = panel_layout(area);
    let copilot = app.copilot();

    let (status, footer) = if copilot.is_loading() {
        (
            format!("Analyzing {}{}", copilot.file(), working_dots(app.ticks)),
            BUSY_FOOTER,
        )
    } else {
        (
            format!("{} suggestions for {}", copilot.suggestions().len(), copilot.file()),
            READY_FOOTER,
        )
    };
    frame.render_widget(
        Paragraph::new(status).style(Style::default().fg(theme.muted_fg)),
        layout.status,
    );
    frame.render_widget(
        Paragraph::new(footer).style(Style::default().fg(theme.accent_fg)),
        layout.footer,
    );

    let rows = copilot.rows(layout.list.width);
    let scroll = panel_scroll(&rows, copilot.selected(), layout.list.height);
    let lines: Vec<Line> = rows
        .into_iter()
        .skip(scroll)
        .take(usize::from(layout.list.height))
        .map(|row| {
            let style = match row.kind {
                PanelRowKind::Header { selected, expanded } => {
                    let mut style = Style::default().fg(theme.text_fg);
                    if expanded {
                        style = style.add_modifier(Modifier::BOLD);
                    }
                    if selected && focused {
                        style = style.bg(theme.current_line_bg);
                    }
                    style
                }
                PanelRowKind::Details => Style::default().fg(theme.muted_fg),
                PanelRowKind::Code => Style::default().fg(theme.string_fg).bg(theme.editor_bg),
                PanelRowKind::Spacer => Style::default(),
            };
            Line::from(Span::styled(row.text, style))
        })
        .collect();
    frame.render_widget(Paragraph::new(lines), layout.list);

    let input_block = Block::default()
        .borders(Borders::ALL)
        .title(" Ask Copilot ")
        .border_style(Style::default().fg(theme.muted_fg))
        .style(Style::default().bg(theme.input_bg));
    let input_inner = input_block.inner(layout.input);
    frame.render_widget(input_block, layout.input);
    let input_width = usize::from(input_inner.width.max(1));
    let input_line = if copilot.input().is_empty() {
        Line::from(Span::styled(
            INPUT_PLACEHOLDER,
            Style::default().fg(theme.muted_fg),
        ))
    } else {
        let visible: String = tail_chars(copilot.input(), input_width.saturating_sub(1));
        Line::from(Span::styled(visible, Style::default().fg(theme.text_fg)))
    };
    frame.render_widget(Paragraph::new(input_line), input_inner);

    if focused && input_inner.width > 0 && input_inner.height > 0 {
        let typed = copilot.input().chars().count().min(input_width.saturating_sub(1));
        frame.set_cursor_position((
            input_inner.x.saturating_add(typed as u16),
            input_inner.y,
        ));
    }
}

fn render_status_bar(frame: &mut Frame, area: Rect, app: &App, workspace: &Workspace, theme: &Theme) {
    let editor = app.editor();
    let text = format!(
        " {} | Ln {}/{} | {} | {}",
        editor.language(),
        editor.current_line(),
        line_count(workspace.active_content()),
        focus_label(app.focus),
        STATUS_HELP_TEXT
    );
    frame.render_widget(
        Paragraph::new(text).style(Style::default().bg(theme.status_bg).fg(theme.accent_fg)),
        area,
    );
}

fn render_toasts(frame: &mut Frame, editor_area: Rect, workspace: &Workspace, theme: &Theme) {
    let width = TOAST_WIDTH.min(editor_area.width);
    if width < 4 {
        return;
    }
    let text_width = usize::from(width - 2);
    let mut y = editor_area.y.saturating_add(1);
    for toast in workspace.toasts().visible() {
        let mut lines = vec![toast.title.clone()];
        lines.extend(wrap_words(&toast.description, text_width));
        let height = lines.len() as u16 + 2;
        if y.saturating_add(height) > editor_area.y.saturating_add(editor_area.height) {
            break;
        }
        let box_width = (max_line_width(lines.iter().map(String::as_str)) as u16 + 2)
            .clamp(width.min(20), width);
        let x = editor_area.x + editor_area.width - box_width;
        let rect = Rect::new(x, y, box_width, height);
        let mut text_lines = vec![Line::from(Span::styled(
            lines[0].clone(),
            Style::default().fg(theme.accent_fg).add_modifier(Modifier::BOLD),
        ))];
        text_lines.extend(lines[1..].iter().map(|line| Line::from(line.clone())));
        frame.render_widget(Clear, rect);
        frame.render_widget(
            Paragraph::new(text_lines).block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(theme.status_bg))
                    .style(Style::default().bg(theme.toast_bg).fg(theme.text_fg)),
            ),
            rect,
        );
        y = y.saturating_add(height);
    }
}

fn badge_fg(badge: FileBadge, theme: &Theme) -> Color {
    match badge {
        FileBadge::Script | FileBadge::Data => theme.call_fg,
        FileBadge::Stylesheet => theme.keyword_fg,
        FileBadge::Markup => theme.string_fg,
        FileBadge::Other => theme.muted_fg,
    }
}

fn focus_label(focus: Focus) -> &'static str {
    match focus {
        Focus::Explorer => "Explorer",
        Focus::Editor => "Editor",
        Focus::Copilot => "Copilot",
    }
}

fn working_dots(ticks: u64) -> &'static str {
    const FRAMES: [&str; 4] = ["", ".", "..", "..."];
    FRAMES[((ticks / 8) as usize) % FRAMES.len()]
}

fn tail_chars(text: &str, max_chars: usize) -> String {
    let count = text.chars().count();
    text.chars().skip(count.saturating_sub(max_chars)).collect()
}
