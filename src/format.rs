//! Text formatting utilities for console output.

/// Normalize a multiline block: strip surrounding whitespace, unwrap
/// adjacent lines into paragraphs, collapse blank-line runs to a single
/// paragraph break, and optionally re-wrap to a column width.
pub fn format_multiline_block(text: &str, width: Option<usize>) -> String {
    let text = text.trim();
    if text.is_empty() {
        return String::new();
    }

    let mut paragraphs: Vec<String> = Vec::new();
    let mut current = String::new();
    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() {
            if !current.is_empty() {
                paragraphs.push(std::mem::take(&mut current));
            }
        } else {
            if !current.is_empty() {
                current.push(' ');
            }
            current.push_str(line);
        }
    }
    if !current.is_empty() {
        paragraphs.push(current);
    }

    let block = paragraphs.join("\n\n");

    match width {
        Some(width) => block
            .lines()
            .map(|line| word_wrap(line, width))
            .collect::<Vec<_>>()
            .join("\n"),
        None => block,
    }
}

/// Render rows as a table with left-aligned columns padded to the widest
/// cell in each column.
pub fn format_table(rows: &[Vec<String>], gutter: &str) -> String {
    if rows.is_empty() {
        return String::new();
    }

    let cell_count = rows.iter().map(Vec::len).max().unwrap_or(0);
    let mut widths = vec![0; cell_count];
    for row in rows {
        for (index, cell) in row.iter().enumerate() {
            widths[index] = widths[index].max(cell.chars().count());
        }
    }

    let mut buffer = String::new();
    for row in rows {
        for (index, cell) in row.iter().enumerate() {
            if index > 0 {
                buffer.push_str(gutter);
            }
            buffer.push_str(cell);
            let padding = widths[index] - cell.chars().count();
            for _ in 0..padding {
                buffer.push(' ');
            }
        }
        buffer.push('\n');
    }

    buffer
}

/// Greedy word wrap. A word longer than the width gets its own line.
fn word_wrap(text: &str, width: usize) -> String {
    let mut buffer = String::new();
    let mut line = String::new();

    for word in text.split_whitespace() {
        if line.is_empty() {
            line.push_str(word);
        } else if line.chars().count() + word.chars().count() + 1 > width {
            buffer.push_str(&line);
            buffer.push('\n');
            line.clear();
            line.push_str(word);
        } else {
            line.push(' ');
            line.push_str(word);
        }
    }

    buffer.push_str(&line);
    buffer
}
