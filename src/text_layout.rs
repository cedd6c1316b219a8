/// Greedy word wrap. Words longer than `width` are broken across lines; explicit
/// newlines always start a new line.
pub fn wrap_words(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();

    for paragraph in text.split('\n') {
        let mut line = String::new();
        let mut line_len = 0usize;

        for word in paragraph.split_whitespace() {
            let word_len = word.chars().count();
            let needed = if line_len == 0 { word_len } else { word_len + 1 };

            if line_len > 0 && line_len + needed > width {
                lines.push(std::mem::take(&mut line));
                line_len = 0;
            }

            if word_len > width {
                for ch in word.chars() {
                    if line_len > 0 && line_len + 1 > width {
                        lines.push(std::mem::take(&mut line));
                        line_len = 0;
                    }
                    line.push(ch);
                    line_len += 1;
                }
                continue;
            }

            if line_len > 0 {
                line.push(' ');
                line_len += 1;
            }
            line.push_str(word);
            line_len += word_len;
        }

        lines.push(line);
    }

    lines
}

/// Display width of the widest line in `lines`.
pub fn max_line_width<'a>(lines: impl IntoIterator<Item = &'a str>) -> usize {
    lines
        .into_iter()
        .map(|line| line.chars().count())
        .max()
        .unwrap_or(0)
}
