use crate::typeset::error::Result;

/// Granularity used to break a paragraph into lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WrapMode {
    /// Break between whitespace-separated words.
    Word,
    /// Break between characters, for scripts written without spaces.
    Character,
}

pub fn classify(paragraph: &str) -> WrapMode {
    if paragraph.chars().any(char::is_whitespace) {
        WrapMode::Word
    } else {
        WrapMode::Character
    }
}

/// Greedily wraps `text` so every line measures at most `max_width`.
///
/// Explicit line breaks are hard paragraph boundaries and each paragraph is
/// wrapped on its own; an empty paragraph becomes an empty line. A unit that
/// is wider than `max_width` on its own is never dropped or truncated, it just
/// gets a line to itself.
pub fn wrap<F>(text: &str, max_width: u32, mut width_of: F) -> Result<Vec<String>>
where
    F: FnMut(&str) -> Result<u32>,
{
    if text.is_empty() {
        return Ok(vec![String::new()]);
    }

    let mut lines = Vec::new();
    for paragraph in split_paragraphs(text) {
        if paragraph.is_empty() {
            lines.push(String::new());
            continue;
        }
        match classify(paragraph) {
            WrapMode::Word => wrap_words(paragraph, max_width, &mut width_of, &mut lines)?,
            WrapMode::Character => {
                let mut line = String::new();
                wrap_chars(paragraph, max_width, &mut line, &mut width_of, &mut lines)?;
                if !line.is_empty() {
                    lines.push(line);
                }
            }
        }
    }

    if lines.is_empty() {
        lines.push(String::new());
    }
    Ok(lines)
}

fn wrap_words<F>(
    paragraph: &str,
    max_width: u32,
    width_of: &mut F,
    lines: &mut Vec<String>,
) -> Result<()>
where
    F: FnMut(&str) -> Result<u32>,
{
    let mut line = String::new();
    for word in paragraph.split_whitespace() {
        let candidate = if line.is_empty() {
            word.to_string()
        } else {
            format!("{} {}", line, word)
        };
        if width_of(&candidate)? <= max_width {
            line = candidate;
            continue;
        }
        if line.is_empty() {
            // the word alone is too wide: break it by characters, the tail
            // stays open so the next word can join it
            wrap_chars(word, max_width, &mut line, width_of, lines)?;
        } else {
            lines.push(std::mem::replace(&mut line, word.to_string()));
        }
    }
    if !line.is_empty() {
        lines.push(line);
    }
    Ok(())
}

/// Appends `chars` one at a time onto `line`, flushing finished lines into
/// `lines`. Whatever is left in `line` is the caller's to finish.
fn wrap_chars<F>(
    chars: &str,
    max_width: u32,
    line: &mut String,
    width_of: &mut F,
    lines: &mut Vec<String>,
) -> Result<()>
where
    F: FnMut(&str) -> Result<u32>,
{
    for ch in chars.chars() {
        let mut candidate = String::with_capacity(line.len() + ch.len_utf8());
        candidate.push_str(line);
        candidate.push(ch);
        if width_of(&candidate)? <= max_width {
            *line = candidate;
        } else {
            if !line.is_empty() {
                lines.push(std::mem::take(line));
            }
            line.push(ch);
        }
    }
    Ok(())
}

fn is_line_break(ch: char) -> bool {
    matches!(
        ch,
        '\n' | '\r' | '\u{0b}' | '\u{0c}' | '\u{1c}'..='\u{1e}' | '\u{85}' | '\u{2028}' | '\u{2029}'
    )
}

/// Splits on line breaks (`\r\n` counts once). A trailing break does not open
/// a new paragraph.
fn split_paragraphs(text: &str) -> Vec<&str> {
    let mut paragraphs = Vec::new();
    let mut start = 0;
    let mut iter = text.char_indices().peekable();
    while let Some((idx, ch)) = iter.next() {
        if !is_line_break(ch) {
            continue;
        }
        paragraphs.push(&text[start..idx]);
        start = idx + ch.len_utf8();
        if ch == '\r' {
            if let Some(&(next_idx, '\n')) = iter.peek() {
                start = next_idx + 1;
                iter.next();
            }
        }
    }
    if start < text.len() {
        paragraphs.push(&text[start..]);
    }
    paragraphs
}
