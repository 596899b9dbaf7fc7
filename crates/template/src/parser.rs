//! Walks the XML tree in document order and builds the report model.
use crate::error::TemplateError;
use crate::values::{
    align_attr, bool_attr, chardata, decode_align, decode_f64, f64_attr, invalid, location,
    opt_f64_attr, opt_string, rgb_element, string,
};
use quire_types::{
    Band, Column, Common, DEFAULT_BAND_HEIGHT, Document, Element, Font, Image, KeyValueItem,
    KeyValueList, Line, List, Margins, Metadata, PageBreak, PageSize, Rectangle, Report, Rgb,
    Section, Style, Table, Text,
};
use roxmltree::Node;
use std::str::FromStr;

pub fn parse_report_str(xml: &str) -> Result<Report, TemplateError> {
    let doc = roxmltree::Document::parse(xml)?;
    let root = doc.root_element();

    let mut report = Report {
        version: string(root, "version"),
        ..Default::default()
    };

    for child in elements(root) {
        match child.tag_name().name() {
            "metadata" => report.metadata = Some(parse_metadata(child)),
            "document" => report.document = parse_document(child)?,
            "fonts" => {
                report.fonts = elements_named(child, "font").map(parse_font).collect();
            }
            "styles" => {
                report.styles = elements_named(child, "style")
                    .map(parse_style)
                    .collect::<Result<_, _>>()?;
            }
            "header" => report.header = Some(parse_band(child)?),
            "footer" => report.footer = Some(parse_band(child)?),
            "sections" => {
                report.sections = elements_named(child, "section")
                    .map(parse_section)
                    .collect::<Result<_, _>>()?;
            }
            other => skip(child, other),
        }
    }

    log::debug!(
        "Parsed template version '{}': {} section(s), {} style(s), {} font(s)",
        report.version,
        report.sections.len(),
        report.styles.len(),
        report.fonts.len()
    );
    Ok(report)
}

// --- Tree helpers ---

fn elements<'a, 'input: 'a>(node: Node<'a, 'input>) -> impl Iterator<Item = Node<'a, 'input>> {
    node.children().filter(|c| c.is_element())
}

fn elements_named<'a, 'input: 'a>(
    node: Node<'a, 'input>,
    name: &'static str,
) -> impl Iterator<Item = Node<'a, 'input>> {
    elements(node).filter(move |c| c.tag_name().name() == name)
}

fn skip(node: Node, name: &str) {
    log::debug!("Skipping unknown element <{}> at {}", name, location(node));
}

// --- Document-level configuration ---

fn parse_metadata(node: Node) -> Metadata {
    let mut metadata = Metadata::default();
    for child in elements(node) {
        let text = chardata(child);
        match child.tag_name().name() {
            "name" => metadata.name = text,
            "description" => metadata.description = text,
            "author" => metadata.author = text,
            "created" => metadata.created = text,
            "modified" => metadata.modified = text,
            other => skip(child, other),
        }
    }
    metadata
}

fn enum_attr<T>(node: Node, name: &str) -> Result<Option<T>, TemplateError>
where
    T: FromStr,
    T::Err: ToString,
{
    match node.attribute(name).map(str::trim) {
        None | Some("") => Ok(None),
        Some(raw) => T::from_str(raw).map(Some).map_err(|e| invalid(node, name, raw, e)),
    }
}

fn parse_document(node: Node) -> Result<Document, TemplateError> {
    let mut document = Document::default();
    if let Some(orientation) = enum_attr(node, "orientation")? {
        document.orientation = orientation;
    }
    if let Some(unit) = enum_attr(node, "unit")? {
        document.unit = unit;
    }
    if let Some(format) = enum_attr(node, "format")? {
        document.format = format;
    }

    for child in elements(node) {
        match child.tag_name().name() {
            // A present block leaves undeclared sides at zero.
            "margins" => {
                document.margins = Margins {
                    top: f64_attr(child, "top")?,
                    right: f64_attr(child, "right")?,
                    bottom: f64_attr(child, "bottom")?,
                    left: f64_attr(child, "left")?,
                };
            }
            "customSize" => {
                let size = PageSize::new(f64_attr(child, "width")?, f64_attr(child, "height")?);
                if size.width > 0.0 && size.height > 0.0 {
                    document.custom_size = Some(size);
                } else {
                    log::warn!("Ignoring <customSize> without a positive width and height");
                }
            }
            other => skip(child, other),
        }
    }
    Ok(document)
}

fn parse_font(node: Node) -> Font {
    Font {
        name: string(node, "name"),
        family: string(node, "family"),
        style: string(node, "style"),
        file: string(node, "file"),
    }
}

fn parse_style(node: Node) -> Result<Style, TemplateError> {
    let mut style = Style {
        name: string(node, "name"),
        ..Default::default()
    };
    for child in elements(node) {
        let name = child.tag_name().name();
        match name {
            "fontFamily" => {
                let family = chardata(child).trim().to_string();
                style.font_family = (!family.is_empty()).then_some(family);
            }
            "fontStyle" => style.font_style = chardata(child).trim().to_string(),
            "fontSize" => style.font_size = decode_f64(child, name, &chardata(child))?,
            "textColor" => style.text_color = Some(rgb_element(child)?),
            "fillColor" => style.fill_color = Some(rgb_element(child)?),
            "align" => style.align = decode_align(child, name, &chardata(child))?,
            "lineHeight" => style.line_height = decode_f64(child, name, &chardata(child))?,
            other => skip(child, other),
        }
    }
    Ok(style)
}

fn parse_band(node: Node) -> Result<Band, TemplateError> {
    let mut height = f64_attr(node, "height")?;
    if height == 0.0 {
        height = DEFAULT_BAND_HEIGHT;
    }

    let mut elements_in_order = Vec::new();
    for child in elements(node) {
        match child.tag_name().name() {
            "text" => elements_in_order.push(Element::Text(parse_text(child)?)),
            "image" => elements_in_order.push(Element::Image(parse_image(child)?)),
            "line" => elements_in_order.push(Element::Line(parse_line(child)?)),
            other => skip(child, other),
        }
    }

    Ok(Band {
        enabled: bool_attr(node, "enabled")?,
        height,
        elements: elements_in_order,
    })
}

// --- Sections and elements ---

fn parse_section(node: Node) -> Result<Section, TemplateError> {
    let mut section = Section {
        name: string(node, "name"),
        page_break_before: bool_attr(node, "pageBreakBefore")?,
        page_break_after: bool_attr(node, "pageBreakAfter")?,
        condition: opt_string(node, "condition"),
        loop_source: opt_string(node, "loop"),
        loop_variable: opt_string(node, "loopVariable"),
        elements: Vec::new(),
    };
    for child in elements(node) {
        if let Some(element) = parse_element(child)? {
            section.elements.push(element);
        }
    }
    Ok(section)
}

/// Decodes one section child. Unknown tags yield `None`.
pub(crate) fn parse_element(node: Node) -> Result<Option<Element>, TemplateError> {
    let element = match node.tag_name().name() {
        "text" => Element::Text(parse_text(node)?),
        "image" => Element::Image(parse_image(node)?),
        "table" => Element::Table(parse_table(node)?),
        "list" => Element::List(parse_list(node)?),
        "keyValueList" => Element::KeyValueList(parse_key_value_list(node)?),
        "line" => Element::Line(parse_line(node)?),
        "rectangle" => Element::Rectangle(parse_rectangle(node)?),
        "pageBreak" => Element::PageBreak(PageBreak {
            condition: opt_string(node, "condition"),
        }),
        other => {
            skip(node, other);
            return Ok(None);
        }
    };
    Ok(Some(element))
}

fn parse_common(node: Node) -> Result<Common, TemplateError> {
    Ok(Common {
        condition: opt_string(node, "condition"),
        spacing_after: f64_attr(node, "spacingAfter")?,
    })
}

fn parse_text(node: Node) -> Result<Text, TemplateError> {
    Ok(Text {
        common: parse_common(node)?,
        content: chardata(node),
        style: opt_string(node, "style"),
        x: opt_f64_attr(node, "x")?,
        y: opt_f64_attr(node, "y")?,
        width: f64_attr(node, "width")?,
        align: align_attr(node, "align")?,
        wrap: bool_attr(node, "wrap")?,
    })
}

fn parse_image(node: Node) -> Result<Image, TemplateError> {
    Ok(Image {
        common: parse_common(node)?,
        path: string(node, "path"),
        x: f64_attr(node, "x")?,
        y: f64_attr(node, "y")?,
        width: f64_attr(node, "width")?,
        height: f64_attr(node, "height")?,
        align: align_attr(node, "align")?,
    })
}

fn parse_table(node: Node) -> Result<Table, TemplateError> {
    let mut table = Table {
        common: parse_common(node)?,
        data_source: string(node, "dataSource"),
        header_style: opt_string(node, "headerStyle"),
        cell_style: opt_string(node, "cellStyle"),
        border: bool_attr(node, "border")?,
        alternate_row_color: None,
        columns: Vec::new(),
    };
    for child in elements(node) {
        match child.tag_name().name() {
            "alternateRowColor" => table.alternate_row_color = Some(rgb_element(child)?),
            "columns" => {
                table.columns = elements_named(child, "column")
                    .map(parse_column)
                    .collect::<Result<_, _>>()?;
            }
            other => skip(child, other),
        }
    }
    Ok(table)
}

fn parse_column(node: Node) -> Result<Column, TemplateError> {
    Ok(Column {
        header: string(node, "header"),
        field: string(node, "field"),
        width: f64_attr(node, "width")?,
        align: align_attr(node, "align")?,
        format: string(node, "format"),
    })
}

fn parse_list(node: Node) -> Result<List, TemplateError> {
    Ok(List {
        common: parse_common(node)?,
        items: string(node, "items"),
        style: opt_string(node, "style"),
        bullet: opt_string(node, "bullet"),
        indent: f64_attr(node, "indent")?,
    })
}

fn parse_key_value_list(node: Node) -> Result<KeyValueList, TemplateError> {
    Ok(KeyValueList {
        common: parse_common(node)?,
        style: opt_string(node, "style"),
        key_width: f64_attr(node, "keyWidth")?,
        value_width: f64_attr(node, "valueWidth")?,
        value_align: align_attr(node, "valueAlign")?,
        items: elements_named(node, "item")
            .map(|item| KeyValueItem {
                key: string(item, "key"),
                value: string(item, "value"),
            })
            .collect(),
    })
}

fn parse_line(node: Node) -> Result<Line, TemplateError> {
    Ok(Line {
        common: parse_common(node)?,
        x1: f64_attr(node, "x1")?,
        y1: f64_attr(node, "y1")?,
        x2: f64_attr(node, "x2")?,
        y2: f64_attr(node, "y2")?,
        color: opt_string(node, "color").map(|c| Rgb::from_attribute(&c)),
        width: f64_attr(node, "width")?,
    })
}

fn parse_rectangle(node: Node) -> Result<Rectangle, TemplateError> {
    let mut rect = Rectangle {
        common: parse_common(node)?,
        x: f64_attr(node, "x")?,
        y: f64_attr(node, "y")?,
        width: f64_attr(node, "width")?,
        height: f64_attr(node, "height")?,
        radius: f64_attr(node, "radius")?,
        fill_color: None,
        border_color: None,
        border_width: f64_attr(node, "borderWidth")?,
    };
    for child in elements(node) {
        let name = child.tag_name().name();
        match name {
            "fillColor" => rect.fill_color = Some(rgb_element(child)?),
            "borderColor" => rect.border_color = Some(rgb_element(child)?),
            "borderWidth" => rect.border_width = decode_f64(child, name, &chardata(child))?,
            other => skip(child, other),
        }
    }
    Ok(rect)
}
