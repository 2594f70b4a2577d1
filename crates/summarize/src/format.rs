/// Re-flow a summary into paragraphs wrapped at `width` columns.
///
/// Paragraphs are separated by blank lines; empty ones are dropped. Words
/// wider than `width` are broken across lines.
pub fn format_summary(summary: &str, width: usize) -> String {
    let width = width.max(1);
    summary
        .split("\n\n")
        .filter(|p| !p.trim().is_empty())
        .map(|p| wrap_paragraph(p, width))
        .collect::<Vec<_>>()
        .join("\n\n")
}

fn wrap_paragraph(paragraph: &str, width: usize) -> String {
    let mut lines: Vec<String> = Vec::new();
    let mut line = String::new();
    let mut line_len = 0;

    for word in paragraph.split_whitespace() {
        let mut word = word;
        let mut word_len = word.chars().count();

        while word_len > width {
            if line_len > 0 {
                lines.push(std::mem::take(&mut line));
                line_len = 0;
            }
            let cut = word
                .char_indices()
                .nth(width)
                .map(|(i, _)| i)
                .unwrap_or(word.len());
            lines.push(word[..cut].to_string());
            word = &word[cut..];
            word_len -= width;
        }
        if word_len == 0 {
            continue;
        }

        if line_len == 0 {
            line.push_str(word);
            line_len = word_len;
        } else if line_len + 1 + word_len <= width {
            line.push(' ');
            line.push_str(word);
            line_len += 1 + word_len;
        } else {
            lines.push(std::mem::replace(&mut line, word.to_string()));
            line_len = word_len;
        }
    }

    if line_len > 0 {
        lines.push(line);
    }
    lines.join("\n")
}
