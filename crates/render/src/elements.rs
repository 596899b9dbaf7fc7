//! One renderer per element kind.
//!
//! Renderers never fail directly. Canvas problems (a missing image, say) land
//! in the canvas's sticky error, which the pipeline checks after every element.
use crate::context::RenderContext;
use quire_canvas::{Advance, Border, Canvas, Cell, RectStyle};
use quire_format::{FormatKind, format_value};
use quire_types::{
    Align, Element, Image, KeyValueList, Line, List, Rectangle, Table, Text,
};
use serde_json::Value;

/// Height of table header and data rows.
pub const TABLE_ROW_HEIGHT: f64 = 7.0;
/// Height of list and key-value rows.
pub const LIST_ROW_HEIGHT: f64 = 6.0;
pub const DEFAULT_BULLET: &str = "\u{2022}";
pub const DEFAULT_INDENT: f64 = 10.0;
pub const BULLET_WIDTH: f64 = 10.0;
pub const DEFAULT_KEY_WIDTH: f64 = 50.0;

/// Negative coordinates are measured back from the far edge of the page.
pub fn edge_relative(value: f64, extent: f64) -> f64 {
    if value < 0.0 { extent + value } else { value }
}

pub fn render_element(element: &Element, ctx: &RenderContext, canvas: &mut dyn Canvas) {
    match element {
        Element::Text(text) => render_text(text, ctx, canvas),
        Element::Image(image) => render_image(image, ctx, canvas),
        Element::Table(table) => render_table(table, ctx, canvas),
        Element::List(list) => render_list(list, ctx, canvas),
        Element::KeyValueList(list) => render_key_value_list(list, ctx, canvas),
        Element::Line(line) => render_line(line, canvas),
        Element::Rectangle(rect) => render_rectangle(rect, canvas),
        Element::PageBreak(_) => canvas.add_page(),
    }
}

fn spacing(canvas: &mut dyn Canvas, spacing_after: f64) {
    if spacing_after > 0.0 {
        canvas.ln(Some(spacing_after));
    }
}

pub fn render_text(text: &Text, ctx: &RenderContext, canvas: &mut dyn Canvas) {
    let style = text.style.as_deref();
    if let Some(name) = style {
        ctx.styles.apply(name, canvas);
    }
    let content = ctx.resolve(&text.content);

    if let Some(y) = text.y {
        canvas.set_y(y);
    }
    if let Some(x) = text.x {
        canvas.set_x(x);
    }

    let align = text.align.or_else(|| ctx.styles.align(style)).unwrap_or_default();
    let line_height = ctx.styles.line_height(style);
    if text.width > 0.0 {
        canvas.multi_cell(&Cell::new(text.width, line_height, &content).align(align));
    } else if text.wrap {
        canvas.multi_cell(&Cell::new(0.0, line_height, &content).align(align));
    } else {
        canvas.cell(&Cell::new(0.0, line_height, &content).align(align).advance(Advance::NextLine));
    }

    spacing(canvas, text.common.spacing_after);
}

pub fn render_image(image: &Image, ctx: &RenderContext, canvas: &mut dyn Canvas) {
    let path = ctx.image_path(&ctx.resolve(&image.path));
    let margins = canvas.margins();
    let page_width = canvas.page_size().width;

    let x = match image.align {
        Some(align @ (Align::Center | Align::Right)) => {
            let Some((width, _)) = canvas.image_extent(&path, image.width, image.height) else {
                return;
            };
            if align == Align::Center {
                let content_width = page_width - margins.left - margins.right;
                margins.left + (content_width - width) / 2.0
            } else {
                page_width - margins.right - width
            }
        }
        _ => image.x,
    };
    let y = if image.y == 0.0 { canvas.y() } else { image.y };

    if let Some((_, height)) = canvas.image(&path, x, y, image.width, image.height) {
        if height > 0.0 {
            canvas.set_y(y + height);
        }
        spacing(canvas, image.common.spacing_after);
    }
}

pub fn render_table(table: &Table, ctx: &RenderContext, canvas: &mut dyn Canvas) {
    let header_style = table.header_style.as_deref();
    if let Some(name) = header_style {
        ctx.styles.apply(name, canvas);
    }
    for column in &table.columns {
        canvas.cell(
            &Cell::new(column.width, TABLE_ROW_HEIGHT, &column.header)
                .border(Border::ALL)
                .align(Align::Center)
                .fill(header_style.is_some()),
        );
    }
    canvas.ln(None);

    let rows = match ctx.data_source(&table.data_source) {
        Some(Value::Array(rows)) => rows,
        Some(other) => {
            log::warn!(
                "Table data source '{}' is not a list (found {}), rendering the header only",
                table.data_source,
                value_kind(other)
            );
            return;
        }
        None => {
            log::warn!("Table data source '{}' not found, rendering the header only", table.data_source);
            return;
        }
    };

    let border = if table.border { Border::ALL } else { Border::NONE };
    let formats: Vec<FormatKind> = table.columns.iter().map(|c| FormatKind::from_name(&c.format)).collect();
    for (i, row) in rows.iter().enumerate() {
        if let Some(name) = &table.cell_style {
            ctx.styles.apply(name, canvas);
        }
        let Value::Object(record) = row else {
            log::debug!("Skipping table row {} of '{}': not an object", i, table.data_source);
            continue;
        };

        let mut fill = false;
        if let Some(color) = table.alternate_row_color
            && i % 2 == 0
        {
            canvas.set_fill_color(color);
            fill = true;
        }

        for (column, format) in table.columns.iter().zip(&formats) {
            let value = format_value(record.get(&column.field).unwrap_or(&Value::Null), *format);
            canvas.cell(
                &Cell::new(column.width, TABLE_ROW_HEIGHT, &value)
                    .border(border)
                    .align(column.align.unwrap_or_default())
                    .fill(fill),
            );
        }
        canvas.ln(None);
    }

    spacing(canvas, table.common.spacing_after);
}

pub fn render_list(list: &List, ctx: &RenderContext, canvas: &mut dyn Canvas) {
    if let Some(name) = &list.style {
        ctx.styles.apply(name, canvas);
    }
    let Some(Value::Array(items)) = ctx.data_source(&list.items) else {
        log::warn!("List items '{}' not found or not a list", list.items);
        return;
    };

    let bullet = list.bullet.as_deref().filter(|b| !b.is_empty()).unwrap_or(DEFAULT_BULLET);
    let indent = if list.indent == 0.0 { DEFAULT_INDENT } else { list.indent };
    let left = canvas.margins().left;

    for item in items {
        let Value::String(item) = item else {
            continue;
        };
        canvas.set_x(left + indent);
        canvas.cell(&Cell::new(BULLET_WIDTH, LIST_ROW_HEIGHT, bullet));
        canvas.cell(&Cell::new(0.0, LIST_ROW_HEIGHT, item).advance(Advance::NextLine));
    }

    spacing(canvas, list.common.spacing_after);
}

pub fn render_key_value_list(list: &KeyValueList, ctx: &RenderContext, canvas: &mut dyn Canvas) {
    if let Some(name) = &list.style {
        ctx.styles.apply(name, canvas);
    }
    let key_width = if list.key_width == 0.0 { DEFAULT_KEY_WIDTH } else { list.key_width };
    let value_align = list.value_align.unwrap_or_default();

    for item in &list.items {
        let value = ctx.resolve(&item.value);
        let label = format!("{}:", item.key);
        canvas.cell(&Cell::new(key_width, LIST_ROW_HEIGHT, &label));
        canvas.cell(
            &Cell::new(list.value_width, LIST_ROW_HEIGHT, &value)
                .align(value_align)
                .advance(Advance::NextLine),
        );
    }

    spacing(canvas, list.common.spacing_after);
}

pub fn render_line(line: &Line, canvas: &mut dyn Canvas) {
    let size = canvas.page_size();
    let x1 = edge_relative(line.x1, size.width);
    let y1 = edge_relative(line.y1, size.height);
    let x2 = edge_relative(line.x2, size.width);
    let y2 = edge_relative(line.y2, size.height);

    if let Some(color) = line.color {
        canvas.set_draw_color(color);
    }
    if line.width > 0.0 {
        canvas.set_line_width(line.width);
    }
    canvas.line(x1, y1, x2, y2);
}

pub fn render_rectangle(rect: &Rectangle, canvas: &mut dyn Canvas) {
    let size = canvas.page_size();
    let x = edge_relative(rect.x, size.width);
    let y = edge_relative(rect.y, size.height);

    if let Some(color) = rect.fill_color {
        canvas.set_fill_color(color);
    }
    if let Some(color) = rect.border_color {
        canvas.set_draw_color(color);
    }
    if rect.border_width > 0.0 {
        canvas.set_line_width(rect.border_width);
    }

    let style = RectStyle::from_flags(rect.fill_color.is_some(), rect.border_color.is_some());
    if rect.radius > 0.0 {
        canvas.rounded_rect(x, y, rect.width, rect.height, rect.radius, style);
    } else {
        canvas.rect(x, y, rect.width, rect.height, style);
    }

    if rect.common.spacing_after > 0.0 {
        canvas.set_y(y + rect.height + rect.common.spacing_after);
    }
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "an object",
    }
}
