pub const DEFAULT_PREVIEW_CHARS: usize = 50;

const METADATA_DELIMITER: &str = "---";

/// Returns the prompt body of a markdown file: leading `---` metadata block
/// (blank lines before it allowed) and the first level-1 heading (indent
/// allowed) removed, surrounding whitespace trimmed.
pub fn extract_prompt_text(markdown: &str) -> String {
    let body = strip_metadata_block(markdown);
    strip_first_heading(body).trim().to_string()
}

pub fn preview(text: &str, limit: usize) -> String {
    let mut chars = text.chars();
    let head: String = chars.by_ref().take(limit).collect();
    if chars.next().is_some() {
        format!("{head}...")
    } else {
        head
    }
}

fn strip_metadata_block(text: &str) -> &str {
    let mut lines = text.split_inclusive('\n');
    let mut consumed = 0;
    let opening = loop {
        let Some(line) = lines.next() else {
            return text;
        };
        consumed += line.len();
        if !line.trim().is_empty() {
            break line;
        }
    };
    if !is_metadata_delimiter(opening) {
        return text;
    }
    for line in lines {
        consumed += line.len();
        if is_metadata_delimiter(line) {
            return &text[consumed..];
        }
    }
    // unclosed block: treat as ordinary text
    text
}

fn is_metadata_delimiter(line: &str) -> bool {
    line.trim_end() == METADATA_DELIMITER
}

fn strip_first_heading(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut removed = false;
    for line in text.split_inclusive('\n') {
        if !removed && is_level_one_heading(line) {
            removed = true;
            out.push_str(line_ending(line));
            continue;
        }
        out.push_str(line);
    }
    out
}

fn is_level_one_heading(line: &str) -> bool {
    let mut chars = line.trim_start_matches([' ', '\t']).chars();
    chars.next() == Some('#')
        && chars
            .next()
            .is_some_and(|c| c.is_whitespace() && c != '\n' && c != '\r')
}

fn line_ending(line: &str) -> &str {
    if line.ends_with("\r\n") {
        "\r\n"
    } else if line.ends_with('\n') {
        "\n"
    } else {
        ""
    }
}

#[cfg(test)]
#[path = "../tests/unit/prompt_text_tests.rs"]
mod tests;
