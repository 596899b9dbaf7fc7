//! Splits a text fragment into literal runs and `{{ ... }}` actions.
use super::ast::Pipeline;
use super::parser::parse_action;
use crate::error::BindingError;

pub const OPEN: &str = "{{";
pub const CLOSE: &str = "}}";

#[derive(Debug, Clone, PartialEq)]
pub enum Segment<'a> {
    Text(&'a str),
    Action(Pipeline),
    /// `{{/* ... */}}`
    Comment,
}

/// `{{- ` trims whitespace before the action and ` -}}` trims it after.
pub fn split(fragment: &str) -> Result<Vec<Segment<'_>>, BindingError> {
    let mut segments = Vec::new();
    let mut rest = fragment;
    let mut trim_next = false;

    while let Some(start) = rest.find(OPEN) {
        let mut text = &rest[..start];
        if trim_next {
            text = text.trim_start();
        }

        let after_open = &rest[start + OPEN.len()..];
        let end = find_close(after_open).ok_or_else(|| BindingError::Unclosed(fragment.to_string()))?;
        let mut body = &after_open[..end];

        if let Some(stripped) = body.strip_prefix("- ") {
            text = text.trim_end();
            body = stripped;
        }
        trim_next = false;
        if let Some(stripped) = body.strip_suffix(" -") {
            trim_next = true;
            body = stripped;
        }

        if !text.is_empty() {
            segments.push(Segment::Text(text));
        }
        let trimmed = body.trim();
        if trimmed.starts_with("/*") && trimmed.ends_with("*/") {
            segments.push(Segment::Comment);
        } else {
            segments.push(Segment::Action(parse_action(body)?));
        }
        rest = &after_open[end + CLOSE.len()..];
    }

    let tail = if trim_next { rest.trim_start() } else { rest };
    if !tail.is_empty() {
        segments.push(Segment::Text(tail));
    }
    Ok(segments)
}

/// Byte offset of the first `}}` outside a quoted or backtick string.
fn find_close(body: &str) -> Option<usize> {
    let bytes = body.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'"' => {
                i += 1;
                while i < bytes.len() && bytes[i] != b'"' {
                    if bytes[i] == b'\\' {
                        i += 1;
                    }
                    i += 1;
                }
            }
            b'`' => {
                i += 1;
                while i < bytes.len() && bytes[i] != b'`' {
                    i += 1;
                }
            }
            _ if bytes[i..].starts_with(CLOSE.as_bytes()) => return Some(i),
            _ => {}
        }
        i += 1;
    }
    None
}
