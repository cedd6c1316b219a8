use super::*;

fn kinds_and_text(spans: &[HighlightSpan]) -> Vec<(Option<TokenKind>, &str)> {
    spans
        .iter()
        .map(|span| (span.kind, span.text.as_str()))
        .collect()
}

#[test]
fn plain_line_passes_through_unchanged() {
    let line = "hello world + 42";
    assert_eq!(highlight_line(line, HighlightVariant::Basic), line);
    assert_eq!(
        kinds_and_text(&highlight_spans(line, HighlightVariant::Basic)),
        vec![(None, line)]
    );
}

#[test]
fn plain_line_with_call_only_gets_call_markers() {
    let marked = highlight_line("render(view)", HighlightVariant::Basic);
    assert_eq!(marked, "\u{E003}render\u{E00F}(view)");
    let stripped: String = marked
        .chars()
        .filter(|ch| !('\u{E000}'..='\u{E00F}').contains(ch))
        .collect();
    assert_eq!(stripped, "render(view)");
}

#[test]
fn empty_line_renders_placeholder() {
    assert_eq!(highlight_line("", HighlightVariant::Basic), "\u{00A0}");
    let spans = highlight_spans("", HighlightVariant::Typed);
    assert_eq!(kinds_and_text(&spans), vec![(None, "\u{00A0}")]);
}

#[test]
fn keywords_match_whole_words_only() {
    let spans = highlight_spans("const constant = documents;", HighlightVariant::Basic);
    assert_eq!(
        kinds_and_text(&spans),
        vec![
            (Some(TokenKind::Keyword), "const"),
            (None, " constant = documents;"),
        ]
    );
}

#[test]
fn strings_honor_backslash_escapes() {
    let spans = highlight_spans(r#"x = "a\"b" + 'c';"#, HighlightVariant::Basic);
    assert_eq!(
        kinds_and_text(&spans),
        vec![
            (None, "x = "),
            (Some(TokenKind::String), r#""a\"b""#),
            (None, " + "),
            (Some(TokenKind::String), "'c'"),
            (None, ";"),
        ]
    );
}

#[test]
fn keyword_inside_comment_nests_and_innermost_wins() {
    let marked = highlight_line("// return early", HighlightVariant::Basic);
    assert_eq!(
        marked,
        "\u{E000}// \u{E002}return\u{E00F} early\u{E00F}"
    );
    assert_eq!(
        kinds_and_text(&parse_markup(&marked)),
        vec![
            (Some(TokenKind::Comment), "// "),
            (Some(TokenKind::Keyword), "return"),
            (Some(TokenKind::Comment), " early"),
        ]
    );
}

#[test]
fn trailing_line_comment_follows_code() {
    let spans = highlight_spans("let a = 1; // one", HighlightVariant::Basic);
    assert_eq!(
        kinds_and_text(&spans),
        vec![
            (Some(TokenKind::Keyword), "let"),
            (None, " a = 1; "),
            (Some(TokenKind::Comment), "// one"),
        ]
    );
}

#[test]
fn unterminated_block_comment_runs_to_end_of_line() {
    let spans = highlight_spans("a /* still open", HighlightVariant::Basic);
    assert_eq!(
        kinds_and_text(&spans),
        vec![(None, "a "), (Some(TokenKind::Comment), "/* still open")]
    );
}

#[test]
fn keyword_before_paren_is_not_a_call() {
    let spans = highlight_spans("if(ready) go()", HighlightVariant::Basic);
    assert_eq!(
        kinds_and_text(&spans),
        vec![
            (Some(TokenKind::Keyword), "if"),
            (None, "(ready) "),
            (Some(TokenKind::Call), "go"),
            (None, "()"),
        ]
    );
}

#[test]
fn type_annotations_only_in_typed_variant() {
    let basic = highlight_spans("count: number", HighlightVariant::Basic);
    assert_eq!(kinds_and_text(&basic), vec![(None, "count: number")]);

    let typed = highlight_spans("count: number", HighlightVariant::Typed);
    assert_eq!(
        kinds_and_text(&typed),
        vec![(None, "count: "), (Some(TokenKind::Type), "number")]
    );
}

#[test]
fn parse_markup_tolerates_unbalanced_markers() {
    let spans = parse_markup("\u{E00F}abc\u{E002}def");
    assert_eq!(
        kinds_and_text(&spans),
        vec![(None, "abc"), (Some(TokenKind::Keyword), "def")]
    );
}

#[test]
fn lines_are_highlighted_without_block_comment_state() {
    let first = highlight_spans("/* opened here", HighlightVariant::Basic);
    assert_eq!(
        kinds_and_text(&first),
        vec![(Some(TokenKind::Comment), "/* opened here")]
    );

    let second = highlight_spans("still */ code()", HighlightVariant::Basic);
    assert!(second.iter().all(|span| span.kind != Some(TokenKind::Comment)));
    assert_eq!(
        kinds_and_text(&second),
        vec![
            (None, "still */ "),
            (Some(TokenKind::Call), "code"),
            (None, "()"),
        ]
    );
}
