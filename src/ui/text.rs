use crate::ui::constants::ELLIPSIS;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

// Text wrapper utility
pub struct TextWrapper;

impl TextWrapper {
    pub fn wrap(text: &str, max_width: usize) -> Vec<String> {
        let mut lines = Vec::new();
        let mut current_line = String::new();
        let mut current_width = 0;

        for word in text.split_whitespace() {
            let word_width = UnicodeWidthStr::width(word);

            if current_width > 0 && current_width + 1 + word_width > max_width {
                lines.push(std::mem::take(&mut current_line));
                current_line.push_str(word);
                current_width = word_width;
            } else {
                if !current_line.is_empty() {
                    current_line.push(' ');
                    current_width += 1;
                }
                current_line.push_str(word);
                current_width += word_width;
            }
        }

        if !current_line.is_empty() {
            lines.push(current_line);
        }

        lines
    }

    /// Cuts `text` to `max_width` display columns, ending in an ellipsis
    /// when anything was dropped.
    pub fn truncate(text: &str, max_width: usize) -> String {
        if UnicodeWidthStr::width(text) <= max_width {
            return text.to_string();
        }
        if max_width == 0 {
            return String::new();
        }

        let mut out = String::new();
        let mut width = 0;
        for c in text.chars() {
            let char_width = UnicodeWidthChar::width(c).unwrap_or(0);
            if width + char_width + 1 > max_width {
                break;
            }
            out.push(c);
            width += char_width;
        }
        out.push(ELLIPSIS);
        out
    }
}
