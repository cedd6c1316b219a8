use super::*;
use std::thread;
use std::time::Duration;

use crate::copilot::PanelStatus;
use crate::recent::MAX_RECENT_FILES;
use crate::samples::DEFAULT_ACTIVE_FILE;
use crate::suggestions::{FileProfile, SuggestionCatalog};

fn app_with(timing: CopilotTiming) -> App {
    let catalog = Arc::new(SuggestionCatalog::builtin().expect("builtin catalog should parse"));
    App::new(
        Workspace::sample(DEFAULT_ACTIVE_FILE, Duration::from_secs(30)),
        catalog,
        timing,
    )
}

fn instant_app() -> App {
    app_with(CopilotTiming {
        analysis_delay: Duration::ZERO,
        answer_delay: Duration::ZERO,
    })
}

fn slow_app() -> App {
    app_with(CopilotTiming {
        analysis_delay: Duration::from_secs(60),
        answer_delay: Duration::from_secs(60),
    })
}

fn tick_until_ready(app: &mut App) {
    let deadline = Instant::now() + Duration::from_secs(5);
    while app.copilot().is_loading() && Instant::now() < deadline {
        app.handle_event(AppEvent::Tick).expect("tick");
        thread::sleep(Duration::from_millis(5));
    }
    assert!(!app.copilot().is_loading(), "copilot should settle");
}

fn active_content(app: &App) -> String {
    app.workspace()
        .expect("workspace provided")
        .active_content()
        .to_string()
}

#[test]
fn new_app_focuses_editor_and_starts_analysis() {
    let app = slow_app();
    assert_eq!(app.focus, Focus::Editor);
    assert_eq!(app.copilot().status(), PanelStatus::Loading);
    assert_eq!(app.copilot().file(), DEFAULT_ACTIVE_FILE);
    assert_eq!(app.editor().file_name(), DEFAULT_ACTIVE_FILE);
    assert_eq!(app.editor().language(), "javascript");
    let workspace = app.workspace().expect("workspace provided");
    assert_eq!(workspace.recent_files(), [DEFAULT_ACTIVE_FILE.to_string()]);
    assert!(app.tree().is_expanded("src"));
}

#[test]
fn edits_survive_switching_files() {
    let mut app = slow_app();
    app.edit_active_content("let edited = true;\n".to_string())
        .expect("edit");
    app.open_file("src/index.js").expect("open index");
    assert!(active_content(&app).starts_with("import React from 'react';"));
    app.open_file(DEFAULT_ACTIVE_FILE).expect("reopen app");
    assert_eq!(active_content(&app), "let edited = true;\n");
}

#[test]
fn unknown_path_opens_placeholder_content() {
    let mut app = slow_app();
    app.open_file("src/new.rs").expect("open");
    assert_eq!(active_content(&app), "// Start coding here\n");
    assert_eq!(app.editor().language(), "rust");
}

#[test]
fn reopening_active_file_keeps_panel_state() {
    let mut app = instant_app();
    tick_until_ready(&mut app);
    app.copilot.toggle(0);
    let expanded = app.copilot().expanded_id().map(str::to_string);
    assert!(expanded.is_some());
    app.open_file(DEFAULT_ACTIVE_FILE).expect("same file");
    assert!(!app.copilot().is_loading());
    assert_eq!(app.copilot().expanded_id().map(str::to_string), expanded);
}

#[test]
fn tab_in_editor_appends_indent_and_notifies() {
    let mut app = slow_app();
    let before = active_content(&app);
    app.handle_event(AppEvent::Tab).expect("tab");
    assert_eq!(active_content(&app), format!("{before}  "));
    let workspace = app.workspace().expect("workspace provided");
    let titles: Vec<&str> = workspace
        .toasts()
        .visible()
        .map(|toast| toast.title.as_str())
        .collect();
    assert_eq!(titles, ["Changes saved"]);
    assert_eq!(app.focus, Focus::Editor);
}

#[test]
fn tab_outside_editor_cycles_focus() {
    let mut app = slow_app();
    app.focus = Focus::Explorer;
    let before = active_content(&app);
    app.handle_event(AppEvent::Tab).expect("tab");
    assert_eq!(app.focus, Focus::Editor);
    assert_eq!(active_content(&app), before);
}

#[test]
fn focus_cycle_skips_hidden_panes() {
    let mut app = slow_app();
    app.handle_event(AppEvent::FocusNext).expect("focus");
    assert_eq!(app.focus, Focus::Copilot);
    app.handle_event(AppEvent::FocusNext).expect("focus");
    assert_eq!(app.focus, Focus::Explorer);

    app.handle_event(AppEvent::ToggleSidebar).expect("hide sidebar");
    assert_eq!(app.focus, Focus::Editor);
    app.handle_event(AppEvent::FocusNext).expect("focus");
    assert_eq!(app.focus, Focus::Copilot);
    app.handle_event(AppEvent::FocusNext).expect("focus");
    assert_eq!(app.focus, Focus::Editor);

    app.handle_event(AppEvent::TogglePanel).expect("hide panel");
    app.handle_event(AppEvent::FocusNext).expect("focus");
    assert_eq!(app.focus, Focus::Editor);
}

#[test]
fn hiding_focused_panel_returns_focus_to_editor() {
    let mut app = slow_app();
    app.focus = Focus::Copilot;
    app.handle_event(AppEvent::TogglePanel).expect("hide panel");
    assert_eq!(app.focus, Focus::Editor);
    assert!(!app.workspace().expect("workspace").panel_visible());
    app.handle_event(AppEvent::TogglePanel).expect("show panel");
    assert!(app.workspace().expect("workspace").panel_visible());
}

#[test]
fn reshowing_panel_reanalyzes_active_file() {
    let mut app = instant_app();
    tick_until_ready(&mut app);
    app.copilot.toggle(0);

    app.handle_event(AppEvent::TogglePanel).expect("hide panel");
    assert!(!app.copilot().is_loading());
    app.handle_event(AppEvent::TogglePanel).expect("show panel");
    assert_eq!(app.copilot().status(), PanelStatus::Loading);
    assert_eq!(app.copilot().file(), DEFAULT_ACTIVE_FILE);
    assert_eq!(app.copilot().expanded_id(), None);

    tick_until_ready(&mut app);
    let catalog = SuggestionCatalog::builtin().expect("catalog");
    assert_eq!(
        app.copilot().suggestions(),
        catalog.for_profile(FileProfile::JavaScript)
    );
}

#[test]
fn hiding_panel_cancels_pending_analysis() {
    let mut app = slow_app();
    assert!(app.copilot().is_loading());
    app.handle_event(AppEvent::TogglePanel).expect("hide panel");
    assert!(!app.copilot().is_loading());
}

#[test]
fn stylesheet_suggestions_arrive_after_delay() {
    let mut app = instant_app();
    app.open_file("src/styles/main.css").expect("open css");
    tick_until_ready(&mut app);
    let catalog = SuggestionCatalog::builtin().expect("catalog");
    assert_eq!(app.copilot().file(), "src/styles/main.css");
    assert_eq!(
        app.copilot().suggestions(),
        catalog.for_profile(FileProfile::Stylesheet)
    );
}

#[test]
fn rapid_switches_only_show_latest_file() {
    let mut app = instant_app();
    app.open_file("src/utils/helpers.ts").expect("open ts");
    app.open_file("package.json").expect("open json");
    tick_until_ready(&mut app);
    let catalog = SuggestionCatalog::builtin().expect("catalog");
    assert_eq!(
        app.copilot().suggestions(),
        catalog.for_profile(FileProfile::General)
    );
}

#[test]
fn copilot_question_inserts_expanded_answer() {
    let mut app = instant_app();
    tick_until_ready(&mut app);
    let before = app.copilot().suggestions().len();
    app.focus = Focus::Copilot;
    for ch in "why memo?".chars() {
        app.handle_event(AppEvent::InputChar(ch)).expect("type");
    }
    app.handle_event(AppEvent::Submit).expect("submit");
    assert!(app.copilot().is_loading());
    tick_until_ready(&mut app);

    let suggestions = app.copilot().suggestions();
    assert_eq!(suggestions.len(), before + 1);
    assert!(suggestions[0].text.contains("why memo?"));
    assert_eq!(app.copilot().expanded_id(), Some(suggestions[0].id.as_str()));
    assert!(app.copilot().input().is_empty());
}

#[test]
fn enter_with_blank_input_toggles_selected_suggestion() {
    let mut app = instant_app();
    tick_until_ready(&mut app);
    app.focus = Focus::Copilot;
    app.handle_event(AppEvent::MoveDown).expect("down");
    app.handle_event(AppEvent::Submit).expect("submit");
    let second = app.copilot().suggestions()[1].id.clone();
    assert_eq!(app.copilot().expanded_id(), Some(second.as_str()));
    app.handle_event(AppEvent::Submit).expect("submit");
    assert_eq!(app.copilot().expanded_id(), None);
    assert!(!app.copilot().is_loading());
}

#[test]
fn recent_files_keep_five_newest() {
    let mut app = slow_app();
    for path in [
        "src/index.js",
        "src/components/Button.js",
        "src/components/Header.tsx",
        "src/styles/main.css",
        "src/utils/helpers.ts",
        "README.md",
    ] {
        app.open_file(path).expect("open");
    }
    let recent = app.workspace().expect("workspace").recent_files();
    assert_eq!(recent.len(), MAX_RECENT_FILES);
    assert_eq!(recent[0], "README.md");
    assert!(!recent.iter().any(|path| path == DEFAULT_ACTIVE_FILE));
}

#[test]
fn explorer_search_opens_matching_file() {
    let mut app = slow_app();
    app.focus = Focus::Explorer;
    for ch in "button".chars() {
        app.handle_event(AppEvent::InputChar(ch)).expect("type");
    }
    let rows = app.tree().visible_rows();
    let names: Vec<&str> = rows.iter().map(|row| row.name.as_str()).collect();
    assert_eq!(names, ["src", "components", "Button.js"]);

    while app.tree().selected() < 2 {
        app.handle_event(AppEvent::MoveDown).expect("down");
    }
    app.handle_event(AppEvent::Submit).expect("open");
    let workspace = app.workspace().expect("workspace");
    assert_eq!(workspace.active_file(), "src/components/Button.js");
    assert_eq!(app.editor().file_name(), "src/components/Button.js");

    app.handle_event(AppEvent::Backspace).expect("backspace");
    assert_eq!(app.tree().query(), "butto");
    app.handle_event(AppEvent::Cancel).expect("clear");
    assert_eq!(app.tree().query(), "");
}

#[test]
fn editor_keys_move_current_line_and_scroll() {
    let mut app = slow_app();
    app.handle_event(AppEvent::MoveDown).expect("down");
    app.handle_event(AppEvent::MoveDown).expect("down");
    assert_eq!(app.editor().current_line(), 3);
    app.handle_event(AppEvent::MoveUp).expect("up");
    assert_eq!(app.editor().current_line(), 2);
    app.handle_event(AppEvent::PageDown).expect("page");
    assert_eq!(app.editor().scroll(), 10);
    app.handle_event(AppEvent::MouseScrollUp).expect("wheel");
    assert_eq!(app.editor().scroll(), 7);
}

#[test]
fn clicking_editor_row_sets_current_line() {
    let mut app = slow_app();
    let screen = Rect::new(0, 0, 140, 40);
    app.set_screen(screen);
    let layout = ui::shell_layout(screen, true, true);
    app.handle_event(AppEvent::MouseLeftClick(
        layout.editor.x + 6,
        layout.editor.y + 5,
    ))
    .expect("click");
    assert_eq!(app.focus, Focus::Editor);
    assert_eq!(app.editor().current_line(), 5);
}

#[test]
fn clicking_tree_row_opens_file() {
    let mut app = slow_app();
    let screen = Rect::new(0, 0, 140, 40);
    app.set_screen(screen);
    let layout = ui::shell_layout(screen, true, true);
    let sidebar = layout.sidebar.expect("sidebar visible");
    let index_row = app
        .tree()
        .visible_rows()
        .iter()
        .position(|row| row.path == "src/index.js")
        .expect("index.js visible");
    // border row plus the search line sit above the tree
    let y = sidebar.y + 2 + index_row as u16;
    app.handle_event(AppEvent::MouseLeftClick(sidebar.x + 3, y))
        .expect("click");
    assert_eq!(app.focus, Focus::Explorer);
    assert_eq!(
        app.workspace().expect("workspace").active_file(),
        "src/index.js"
    );
}

#[test]
fn stub_actions_raise_toasts() {
    let mut app = slow_app();
    app.handle_event(AppEvent::Save).expect("save");
    app.handle_event(AppEvent::Share).expect("share");
    app.handle_event(AppEvent::Download).expect("download");
    let workspace = app.workspace().expect("workspace");
    let titles: Vec<&str> = workspace
        .toasts()
        .visible()
        .map(|toast| toast.title.as_str())
        .collect();
    assert_eq!(titles, ["Download started", "Link copied", "File saved"]);
}

#[test]
fn shutdown_releases_workspace_and_guards_access() {
    let mut app = slow_app();
    let workspace = app.shutdown();
    assert!(workspace.is_some());
    assert!(!app.running);
    assert!(!app.copilot().is_loading());
    assert_eq!(
        app.handle_event(AppEvent::Save),
        Err(ContextError::NotProvisioned {
            operation: "modify the workspace"
        })
    );
    assert!(app.workspace().is_err());
}

#[test]
fn quit_stops_the_loop() {
    let mut app = slow_app();
    app.handle_event(AppEvent::Quit).expect("quit");
    assert!(!app.running);
}
