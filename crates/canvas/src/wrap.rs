//! Greedy line breaking for multi-line cells.

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct WrappedLine {
    pub text: String,
    /// The line ends a paragraph (explicit newline or end of text).
    pub hard_break: bool,
}

/// Breaks `text` into lines no wider than `max`. Explicit newlines always
/// break; words wider than a whole line are split between characters.
pub(crate) fn wrap_lines(text: &str, max: f64, width: impl Fn(&str) -> f64) -> Vec<WrappedLine> {
    let mut lines = Vec::new();
    for paragraph in text.split('\n') {
        let paragraph = paragraph.strip_suffix('\r').unwrap_or(paragraph);
        if max <= 0.0 {
            lines.push(WrappedLine { text: paragraph.to_string(), hard_break: true });
            continue;
        }

        let mut current = String::new();
        for word in paragraph.split(' ').filter(|w| !w.is_empty()) {
            let candidate = if current.is_empty() {
                word.to_string()
            } else {
                format!("{} {}", current, word)
            };
            if width(&candidate) <= max {
                current = candidate;
                continue;
            }
            if !current.is_empty() {
                lines.push(WrappedLine { text: std::mem::take(&mut current), hard_break: false });
            }
            if width(word) <= max {
                current = word.to_string();
                continue;
            }
            for c in word.chars() {
                let mut next = current.clone();
                next.push(c);
                if width(&next) > max && !current.is_empty() {
                    lines.push(WrappedLine { text: std::mem::take(&mut current), hard_break: false });
                    current.push(c);
                } else {
                    current = next;
                }
            }
        }
        lines.push(WrappedLine { text: current, hard_break: true });
    }
    lines
}
