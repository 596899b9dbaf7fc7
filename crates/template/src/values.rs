//! Decoding of attribute and character-data values.
//!
//! Absent or blank numeric and boolean values decode to zero and `false`.
//! Anything else that fails to decode is an error carrying the location of the
//! owning element.
use crate::error::{Location, TemplateError};
use quire_types::{Align, Rgb};
use roxmltree::Node;

pub(crate) fn location(node: Node) -> Location {
    node.document().text_pos_at(node.range().start).into()
}

pub(crate) fn invalid(node: Node, name: &str, value: &str, message: impl ToString) -> TemplateError {
    TemplateError::InvalidValue {
        name: name.to_string(),
        value: value.to_string(),
        message: message.to_string(),
        location: location(node),
    }
}

/// The character data directly inside `node`, untrimmed.
pub(crate) fn chardata(node: Node) -> String {
    node.children()
        .filter(|c| c.is_text())
        .filter_map(|c| c.text())
        .collect()
}

pub(crate) fn string(node: Node, name: &str) -> String {
    node.attribute(name).unwrap_or_default().to_string()
}

/// `None` when the attribute is absent or empty.
pub(crate) fn opt_string(node: Node, name: &str) -> Option<String> {
    node.attribute(name)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

pub(crate) fn decode_f64(node: Node, name: &str, raw: &str) -> Result<f64, TemplateError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(0.0);
    }
    trimmed.parse::<f64>().map_err(|e| invalid(node, name, raw, e))
}

pub(crate) fn f64_attr(node: Node, name: &str) -> Result<f64, TemplateError> {
    decode_f64(node, name, node.attribute(name).unwrap_or_default())
}

pub(crate) fn opt_f64_attr(node: Node, name: &str) -> Result<Option<f64>, TemplateError> {
    match node.attribute(name) {
        Some(raw) if !raw.trim().is_empty() => decode_f64(node, name, raw).map(Some),
        _ => Ok(None),
    }
}

fn i64_attr(node: Node, name: &str) -> Result<i64, TemplateError> {
    let raw = node.attribute(name).unwrap_or_default();
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(0);
    }
    trimmed.parse::<i64>().map_err(|e| invalid(node, name, raw, e))
}

/// Accepts `1 t T TRUE true True` and `0 f F FALSE false False`.
pub(crate) fn bool_attr(node: Node, name: &str) -> Result<bool, TemplateError> {
    let raw = node.attribute(name).unwrap_or_default();
    match raw.trim() {
        "" => Ok(false),
        "1" | "t" | "T" | "TRUE" | "true" | "True" => Ok(true),
        "0" | "f" | "F" | "FALSE" | "false" | "False" => Ok(false),
        _ => Err(invalid(node, name, raw, "expected a boolean")),
    }
}

pub(crate) fn decode_align(node: Node, name: &str, raw: &str) -> Result<Option<Align>, TemplateError> {
    if raw.trim().is_empty() {
        return Ok(None);
    }
    Align::parse(raw)
        .map(Some)
        .ok_or_else(|| invalid(node, name, raw, "expected one of L, C, R, J"))
}

pub(crate) fn align_attr(node: Node, name: &str) -> Result<Option<Align>, TemplateError> {
    decode_align(node, name, node.attribute(name).unwrap_or_default())
}

/// An `<x r=".." g=".." b=".."/>` color element. Components are clamped.
pub(crate) fn rgb_element(node: Node) -> Result<Rgb, TemplateError> {
    let (rgb, clamped) = Rgb::from_components(
        i64_attr(node, "r")?,
        i64_attr(node, "g")?,
        i64_attr(node, "b")?,
    );
    if clamped {
        log::warn!(
            "Color <{}> at {} has components outside 0..=255, clamped to ({}, {}, {})",
            node.tag_name().name(),
            location(node),
            rgb.r,
            rgb.g,
            rgb.b
        );
    }
    Ok(rgb)
}
