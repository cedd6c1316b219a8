use std::sync::LazyLock;

use regex::{Captures, Regex};
use serde::Serialize;

/// Placeholder for an empty line so the row keeps its height.
pub const EMPTY_LINE_PLACEHOLDER: &str = "\u{00A0}";

const CLOSE_MARKER: char = '\u{E00F}';

const KEYWORDS: [&str; 36] = [
    "async",
    "await",
    "break",
    "case",
    "catch",
    "class",
    "const",
    "continue",
    "default",
    "do",
    "else",
    "export",
    "extends",
    "false",
    "finally",
    "for",
    "from",
    "function",
    "if",
    "import",
    "interface",
    "let",
    "new",
    "null",
    "return",
    "switch",
    "this",
    "throw",
    "true",
    "try",
    "type",
    "typeof",
    "undefined",
    "var",
    "while",
    "yield",
];

static COMMENT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"//.*$|/\*.*?(?:\*/|$)").expect("comment pattern"));
static STRING_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#""(?:[^"\\]|\\.)*"|'(?:[^'\\]|\\.)*'|`(?:[^`\\]|\\.)*`"#).expect("string pattern")
});
static KEYWORD_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"\b(?:{})\b", KEYWORDS.join("|"))).expect("keyword pattern")
});
static CALL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b([A-Za-z_][A-Za-z0-9_]*)\(").expect("call pattern"));
static TYPE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r":(\s*)([A-Za-z_][A-Za-z0-9_]*)").expect("type pattern"));

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenKind {
    Comment,
    String,
    Keyword,
    Call,
    Type,
}

impl TokenKind {
    fn open_marker(self) -> char {
        match self {
            Self::Comment => '\u{E000}',
            Self::String => '\u{E001}',
            Self::Keyword => '\u{E002}',
            Self::Call => '\u{E003}',
            Self::Type => '\u{E004}',
        }
    }

    fn from_open_marker(marker: char) -> Option<Self> {
        match marker {
            '\u{E000}' => Some(Self::Comment),
            '\u{E001}' => Some(Self::String),
            '\u{E002}' => Some(Self::Keyword),
            '\u{E003}' => Some(Self::Call),
            '\u{E004}' => Some(Self::Type),
            _ => None,
        }
    }

    fn wrap(self, text: &str) -> String {
        format!("{}{text}{CLOSE_MARKER}", self.open_marker())
    }
}

/// Which pass set to run. `Typed` adds the annotation pass after `:`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HighlightVariant {
    #[default]
    Basic,
    Typed,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HighlightSpan {
    pub kind: Option<TokenKind>,
    pub text: String,
}

/// Runs the marker passes over a single line. Each pass sees the previous pass's
/// output, so later passes can nest markers inside earlier ones.
pub fn highlight_line(line: &str, variant: HighlightVariant) -> String {
    if line.is_empty() {
        return EMPTY_LINE_PLACEHOLDER.to_string();
    }

    let marked = COMMENT_RE.replace_all(line, |caps: &Captures| {
        TokenKind::Comment.wrap(&caps[0])
    });
    let marked = STRING_RE.replace_all(&marked, |caps: &Captures| {
        TokenKind::String.wrap(&caps[0])
    });
    let marked = KEYWORD_RE.replace_all(&marked, |caps: &Captures| {
        TokenKind::Keyword.wrap(&caps[0])
    });
    let marked = CALL_RE.replace_all(&marked, |caps: &Captures| {
        format!("{}(", TokenKind::Call.wrap(&caps[1]))
    });
    match variant {
        HighlightVariant::Basic => marked.into_owned(),
        HighlightVariant::Typed => TYPE_RE
            .replace_all(&marked, |caps: &Captures| {
                format!(":{}{}", &caps[1], TokenKind::Type.wrap(&caps[2]))
            })
            .into_owned(),
    }
}

/// Splits marked text into spans. Nested markers resolve to the innermost kind;
/// stray close markers are dropped.
pub fn parse_markup(marked: &str) -> Vec<HighlightSpan> {
    let mut spans = Vec::new();
    let mut stack: Vec<TokenKind> = Vec::new();
    let mut buffer = String::new();

    for ch in marked.chars() {
        if let Some(kind) = TokenKind::from_open_marker(ch) {
            flush_span(&mut spans, &mut buffer, stack.last().copied());
            stack.push(kind);
        } else if ch == CLOSE_MARKER {
            flush_span(&mut spans, &mut buffer, stack.last().copied());
            stack.pop();
        } else {
            buffer.push(ch);
        }
    }
    flush_span(&mut spans, &mut buffer, stack.last().copied());
    spans
}

pub fn highlight_spans(line: &str, variant: HighlightVariant) -> Vec<HighlightSpan> {
    parse_markup(&highlight_line(line, variant))
}

fn flush_span(spans: &mut Vec<HighlightSpan>, buffer: &mut String, kind: Option<TokenKind>) {
    if buffer.is_empty() {
        return;
    }
    spans.push(HighlightSpan {
        kind,
        text: std::mem::take(buffer),
    });
}

#[cfg(test)]
#[path = "../tests/unit/highlight_tests.rs"]
mod tests;
