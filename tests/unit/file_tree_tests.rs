use super::*;

fn small_tree() -> Vec<FileItem> {
    vec![
        FileItem::file("index.js"),
        FileItem::folder("components", vec![FileItem::file("Button.js")]),
    ]
}

fn nested_tree() -> Vec<FileItem> {
    vec![
        FileItem::folder(
            "src",
            vec![
                FileItem::file("index.js"),
                FileItem::folder(
                    "components",
                    vec![FileItem::file("Button.js"), FileItem::file("Header.tsx")],
                ),
                FileItem::folder("styles", vec![FileItem::file("main.css")]),
            ],
        ),
        FileItem::folder(
            "docs",
            vec![FileItem::folder("components", vec![FileItem::file("guide.md")])],
        ),
        FileItem::file("README.md"),
    ]
}

fn leaf_names(items: &[FileItem], out: &mut Vec<String>) {
    for item in items {
        match item {
            FileItem::File { name } => out.push(name.clone()),
            FileItem::Folder { children, .. } => leaf_names(children, out),
        }
    }
}

#[test]
fn searching_but_keeps_only_components_with_button() {
    let filtered = filter_tree(&small_tree(), "but");
    assert_eq!(
        filtered.items,
        vec![FileItem::folder(
            "components",
            vec![FileItem::file("Button.js")]
        )]
    );
    assert!(filtered.auto_expanded.contains("components"));
    assert_eq!(filtered.auto_expanded.len(), 1);
}

#[test]
fn empty_query_returns_full_tree_without_auto_expansion() {
    let filtered = filter_tree(&nested_tree(), "   ");
    assert_eq!(filtered.items, nested_tree());
    assert!(filtered.auto_expanded.is_empty());
}

#[test]
fn every_kept_leaf_matches_query_case_insensitively() {
    for query in ["js", "MD", "head", "css", "zzz", "i"] {
        let filtered = filter_tree(&nested_tree(), query);
        let mut leaves = Vec::new();
        leaf_names(&filtered.items, &mut leaves);
        for leaf in leaves {
            assert!(
                leaf.to_lowercase().contains(&query.to_lowercase()),
                "leaf {leaf} should match {query}"
            );
        }
    }
}

#[test]
fn folder_matching_by_name_is_kept_even_without_matching_children() {
    let filtered = filter_tree(&nested_tree(), "styles");
    assert_eq!(
        filtered.items,
        vec![FileItem::folder(
            "src",
            vec![FileItem::folder("styles", Vec::new())]
        )]
    );
    assert!(filtered.auto_expanded.contains("src"));
    assert!(filtered.auto_expanded.contains("styles"));
}

#[test]
fn no_match_yields_empty_tree() {
    let filtered = filter_tree(&nested_tree(), "nothing-here");
    assert!(filtered.items.is_empty());
}

#[test]
fn collapsed_tree_shows_top_level_rows_only() {
    let tree = FileTree::new(nested_tree());
    let names: Vec<String> = tree.visible_rows().into_iter().map(|row| row.name).collect();
    assert_eq!(names, vec!["src", "docs", "README.md"]);
}

#[test]
fn search_auto_expands_matching_folders_in_view() {
    let mut tree = FileTree::new(small_tree());
    tree.set_query("but");
    let rows = tree.visible_rows();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].name, "components");
    assert!(rows[0].expanded);
    assert_eq!(rows[1].path, "components/Button.js");
    assert_eq!(rows[1].depth, 1);
}

#[test]
fn selecting_file_reports_full_slash_joined_path() {
    let mut tree = FileTree::new(nested_tree());
    tree.expand_path("src/components/Button.js");
    tree.reveal("src/components/Button.js");
    assert_eq!(
        tree.activate_selected(),
        Some(TreeActivation::OpenFile(
            "src/components/Button.js".to_string()
        ))
    );
}

#[test]
fn activating_folder_toggles_expansion() {
    let mut tree = FileTree::new(nested_tree());
    assert_eq!(
        tree.activate_row(0),
        Some(TreeActivation::Toggled {
            folder: "src".to_string(),
            expanded: true,
        })
    );
    assert_eq!(tree.visible_rows().len(), 6);
    assert_eq!(
        tree.activate_row(0),
        Some(TreeActivation::Toggled {
            folder: "src".to_string(),
            expanded: false,
        })
    );
    assert_eq!(tree.visible_rows().len(), 3);
}

#[test]
fn folders_with_the_same_name_share_expansion_state() {
    let mut tree = FileTree::new(nested_tree());
    tree.toggle("src");
    tree.toggle("docs");
    tree.toggle("components");
    let rows = tree.visible_rows();
    let components: Vec<&TreeRow> = rows.iter().filter(|row| row.name == "components").collect();
    assert_eq!(components.len(), 2);
    assert!(components.iter().all(|row| row.expanded));
    assert!(rows.iter().any(|row| row.path == "docs/components/guide.md"));
    assert!(rows.iter().any(|row| row.path == "src/components/Button.js"));
}

#[test]
fn selection_is_clamped_when_rows_shrink() {
    let mut tree = FileTree::new(nested_tree());
    tree.toggle("src");
    for _ in 0..10 {
        tree.select_next();
    }
    assert_eq!(tree.selected(), tree.visible_rows().len() - 1);
    tree.push_query_char('r');
    tree.push_query_char('e');
    tree.push_query_char('a');
    assert!(tree.selected() < tree.visible_rows().len().max(1));
    tree.pop_query_char();
    assert_eq!(tree.query(), "re");
    tree.clear_query();
    assert!(tree.query().is_empty());
}

#[test]
fn activating_out_of_range_row_is_ignored() {
    let mut tree = FileTree::new(small_tree());
    assert_eq!(tree.activate_row(42), None);
}

#[test]
fn badges_follow_the_last_extension() {
    assert_eq!(FileBadge::for_name("App.js"), FileBadge::Script);
    assert_eq!(FileBadge::for_name("MAIN.CSS"), FileBadge::Stylesheet);
    assert_eq!(FileBadge::for_name("index.html"), FileBadge::Markup);
    assert_eq!(FileBadge::for_name("package.json"), FileBadge::Data);
    assert_eq!(FileBadge::for_name("Header.tsx"), FileBadge::Other);
    assert_eq!(FileBadge::for_name("Makefile"), FileBadge::Other);
    assert_eq!(FileBadge::Data.label(), "{ }");
    assert_eq!(FileBadge::Script.label(), "JS");
}
