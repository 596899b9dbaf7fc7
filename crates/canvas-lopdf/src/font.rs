//! Embedded TrueType fonts: metrics through ttf-parser, written as Type0 /
//! CIDFontType2 with Identity-H encoding so any glyph in the program is
//! addressable.
use lopdf::{Dictionary, Document, Object, ObjectId, Stream, StringFormat, dictionary};
use quire_canvas::{CanvasError, FontKey};
use std::collections::BTreeMap;
use std::fmt::Write as _;

#[derive(Debug, Clone)]
pub(crate) struct TrueTypeFont {
    base_font: String,
    data: Vec<u8>,
    units_per_em: f64,
    ascent: i64,
    descent: i64,
    cap_height: i64,
    bbox: [i64; 4],
    /// Glyphs drawn so far, with the character each one stands for.
    used: BTreeMap<u16, char>,
}

impl TrueTypeFont {
    pub(crate) fn parse(key: &FontKey, data: &[u8]) -> Result<Self, CanvasError> {
        let face = ttf_parser::Face::parse(data, 0).map_err(|e| {
            CanvasError::Font(format!("invalid font data for '{}': {}", key.family, e))
        })?;
        let units_per_em = f64::from(face.units_per_em().max(1));
        let scale = |v: i16| (f64::from(v) * 1000.0 / units_per_em).round() as i64;
        let bbox = face.global_bounding_box();
        let ascent = scale(face.ascender());

        Ok(Self {
            base_font: base_font_name(key),
            data: data.to_vec(),
            units_per_em,
            ascent,
            descent: scale(face.descender()),
            cap_height: face.capital_height().map(scale).unwrap_or(ascent),
            bbox: [scale(bbox.x_min), scale(bbox.y_min), scale(bbox.x_max), scale(bbox.y_max)],
            used: BTreeMap::new(),
        })
    }

    fn face(&self) -> Option<ttf_parser::Face<'_>> {
        ttf_parser::Face::parse(&self.data, 0).ok()
    }

    /// Width of `text` in thousandths of an em. Characters without a glyph
    /// measure as the missing glyph.
    pub(crate) fn text_width(&self, text: &str) -> f64 {
        let Some(face) = self.face() else { return 0.0 };
        let units: f64 = text
            .chars()
            .map(|c| {
                let glyph = face.glyph_index(c).unwrap_or(ttf_parser::GlyphId(0));
                f64::from(face.glyph_hor_advance(glyph).unwrap_or(0))
            })
            .sum();
        units * 1000.0 / self.units_per_em
    }

    /// Encodes `text` as big-endian glyph ids and records the glyphs used.
    pub(crate) fn encode(&mut self, text: &str) -> Vec<u8> {
        let glyphs: Vec<(u16, char)> = match self.face() {
            Some(face) => text
                .chars()
                .map(|c| (face.glyph_index(c).map(|g| g.0).unwrap_or(0), c))
                .collect(),
            None => Vec::new(),
        };
        let mut bytes = Vec::with_capacity(glyphs.len() * 2);
        for (gid, c) in glyphs {
            if gid != 0 {
                self.used.entry(gid).or_insert(c);
            }
            bytes.extend_from_slice(&gid.to_be_bytes());
        }
        bytes
    }

    fn widths(&self) -> Vec<Object> {
        let Some(face) = self.face() else { return Vec::new() };
        let mut entries = Vec::with_capacity(self.used.len() * 2);
        for gid in self.used.keys() {
            let advance = face.glyph_hor_advance(ttf_parser::GlyphId(*gid)).unwrap_or(0);
            let width = (f64::from(advance) * 1000.0 / self.units_per_em).round() as i64;
            entries.push(Object::Integer(i64::from(*gid)));
            entries.push(Object::Array(vec![Object::Integer(width)]));
        }
        entries
    }

    /// Adds the font program, descriptor, descendant font and ToUnicode map
    /// to `doc`, returning the id of the Type0 font dictionary.
    pub(crate) fn write(&self, doc: &mut Document) -> ObjectId {
        let file = Stream::new(
            dictionary! { "Length1" => self.data.len() as i64 },
            self.data.clone(),
        );
        let file_id = doc.add_object(file);

        let descriptor_id = doc.add_object(dictionary! {
            "Type" => "FontDescriptor",
            "FontName" => Object::Name(self.base_font.clone().into_bytes()),
            "Flags" => 32,
            "FontBBox" => self.bbox.iter().map(|v| Object::Integer(*v)).collect::<Vec<_>>(),
            "ItalicAngle" => 0,
            "Ascent" => self.ascent,
            "Descent" => self.descent,
            "CapHeight" => self.cap_height,
            "StemV" => 80,
            "FontFile2" => file_id,
        });

        let cid_font_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "CIDFontType2",
            "BaseFont" => Object::Name(self.base_font.clone().into_bytes()),
            "CIDSystemInfo" => dictionary! {
                "Registry" => Object::String(b"Adobe".to_vec(), StringFormat::Literal),
                "Ordering" => Object::String(b"Identity".to_vec(), StringFormat::Literal),
                "Supplement" => 0,
            },
            "FontDescriptor" => descriptor_id,
            "W" => self.widths(),
            "CIDToGIDMap" => "Identity",
        });

        let to_unicode_id = doc.add_object(Stream::new(
            Dictionary::new(),
            to_unicode_cmap(&self.used).into_bytes(),
        ));

        doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type0",
            "BaseFont" => Object::Name(self.base_font.clone().into_bytes()),
            "Encoding" => "Identity-H",
            "DescendantFonts" => vec![Object::Reference(cid_font_id)],
            "ToUnicode" => to_unicode_id,
        })
    }
}

fn base_font_name(key: &FontKey) -> String {
    let family: String = key.family.chars().filter(|c| c.is_ascii_alphanumeric()).collect();
    let family = if family.is_empty() { "Embedded".to_string() } else { family };
    match key.style.as_str() {
        "" => family,
        style => format!("{}-{}", family, style),
    }
}

/// A ToUnicode CMap for the glyphs in `glyphs`, in bfchar blocks of 100.
fn to_unicode_cmap(glyphs: &BTreeMap<u16, char>) -> String {
    let mut out = String::new();
    out.push_str("/CIDInit /ProcSet findresource begin\n12 dict begin\nbegincmap\n");
    out.push_str("/CIDSystemInfo << /Registry (Adobe) /Ordering (UCS) /Supplement 0 >> def\n");
    out.push_str("/CMapName /Adobe-Identity-UCS def\n/CMapType 2 def\n");
    out.push_str("1 begincodespacerange\n<0000> <FFFF>\nendcodespacerange\n");

    let entries: Vec<(&u16, &char)> = glyphs.iter().collect();
    for block in entries.chunks(100) {
        let _ = writeln!(out, "{} beginbfchar", block.len());
        for (gid, c) in block {
            let mut units = [0u16; 2];
            let hex: String = c
                .encode_utf16(&mut units)
                .iter()
                .map(|u| format!("{:04X}", u))
                .collect();
            let _ = writeln!(out, "<{:04X}> <{}>", gid, hex);
        }
        out.push_str("endbfchar\n");
    }

    out.push_str("endcmap\nCMapName currentdict /CMap defineresource pop\nend\nend\n");
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_font_names_are_pdf_names() {
        assert_eq!(base_font_name(&FontKey::new("Open Sans", "B")), "opensans-B");
        assert_eq!(base_font_name(&FontKey::new("---", "")), "Embedded");
    }

    #[test]
    fn cmap_maps_glyphs_to_utf16() {
        let glyphs = BTreeMap::from([(3u16, 'A'), (7u16, '😀')]);
        let cmap = to_unicode_cmap(&glyphs);
        assert!(cmap.contains("2 beginbfchar"));
        assert!(cmap.contains("<0003> <0041>"));
        assert!(cmap.contains("<0007> <D83DDE00>"));
    }

    #[test]
    fn rejects_non_font_data() {
        let err = TrueTypeFont::parse(&FontKey::new("Broken", ""), b"not a font").unwrap_err();
        assert!(matches!(err, CanvasError::Font(_)));
    }
}
