use serde::Serialize;

use crate::highlight::{HighlightSpan, HighlightVariant, highlight_spans};

/// Appended to the end of the document by the indent key.
pub const INDENT_TEXT: &str = "  ";

const LANGUAGE_TABLE: [(&str, &str); 11] = [
    ("js", "javascript"),
    ("jsx", "javascript"),
    ("ts", "typescript"),
    ("tsx", "typescript"),
    ("css", "css"),
    ("scss", "scss"),
    ("html", "html"),
    ("json", "json"),
    ("md", "markdown"),
    ("py", "python"),
    ("rs", "rust"),
];

pub fn language_for(file_name: &str) -> &'static str {
    let base = file_name.rsplit('/').next().unwrap_or(file_name);
    let Some((_, extension)) = base.rsplit_once('.') else {
        return "plaintext";
    };
    let extension = extension.to_ascii_lowercase();
    LANGUAGE_TABLE
        .iter()
        .find(|(ext, _)| *ext == extension)
        .map(|(_, language)| *language)
        .unwrap_or("plaintext")
}

pub fn variant_for_language(language: &str) -> HighlightVariant {
    if language == "typescript" {
        HighlightVariant::Typed
    } else {
        HighlightVariant::Basic
    }
}

pub fn document_lines(content: &str) -> impl Iterator<Item = &str> {
    content
        .split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
}

pub fn line_count(content: &str) -> usize {
    content.split('\n').count()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EditorRow {
    pub number: usize,
    pub spans: Vec<HighlightSpan>,
}

/// Display state of the editor pane. The document itself lives in the workspace cache.
#[derive(Debug, Clone)]
pub struct EditorSurface {
    file_name: String,
    language: &'static str,
    current_line: usize,
    scroll: usize,
}

impl EditorSurface {
    pub fn new(file_name: &str) -> Self {
        Self {
            file_name: file_name.to_string(),
            language: language_for(file_name),
            current_line: 1,
            scroll: 0,
        }
    }

    pub fn set_file(&mut self, file_name: &str) {
        if self.file_name == file_name {
            return;
        }
        self.file_name = file_name.to_string();
        self.language = language_for(file_name);
        self.current_line = 1;
        self.scroll = 0;
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn language(&self) -> &'static str {
        self.language
    }

    pub fn variant(&self) -> HighlightVariant {
        variant_for_language(self.language)
    }

    pub fn current_line(&self) -> usize {
        self.current_line
    }

    pub fn scroll(&self) -> usize {
        self.scroll
    }

    /// Sets the informational line marker. This is not a text cursor.
    pub fn click_line(&mut self, line: usize, content: &str) {
        self.current_line = line.clamp(1, line_count(content));
    }

    pub fn move_up(&mut self) {
        self.current_line = self.current_line.saturating_sub(1).max(1);
    }

    pub fn move_down(&mut self, content: &str) {
        self.current_line = (self.current_line + 1).min(line_count(content));
    }

    pub fn scroll_by(&mut self, delta: isize, content: &str) {
        let max_scroll = line_count(content).saturating_sub(1);
        self.scroll = self.scroll.saturating_add_signed(delta).min(max_scroll);
    }

    /// Keeps the current line inside a viewport of `height` rows.
    pub fn ensure_current_visible(&mut self, height: usize) {
        if height == 0 {
            return;
        }
        let index = self.current_line.saturating_sub(1);
        if index < self.scroll {
            self.scroll = index;
        } else if index >= self.scroll + height {
            self.scroll = index + 1 - height;
        }
    }

    pub fn rows(&self, content: &str) -> Vec<EditorRow> {
        let variant = self.variant();
        document_lines(content)
            .enumerate()
            .map(|(index, line)| EditorRow {
                number: index + 1,
                spans: highlight_spans(line, variant),
            })
            .collect()
    }

    /// Appends the indent to the end of the whole document.
    pub fn indent(content: &str) -> String {
        format!("{content}{INDENT_TEXT}")
    }
}
