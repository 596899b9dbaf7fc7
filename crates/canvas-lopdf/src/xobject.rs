//! Image XObjects. JPEG files are embedded as-is, everything else is decoded
//! to 8-bit RGB with a soft mask when any pixel is not opaque.
use image::{ColorType, GenericImageView, ImageFormat};
use lopdf::{Document, Object, ObjectId, Stream, dictionary};
use quire_canvas::CanvasError;
use std::path::Path;

#[derive(Debug, Clone)]
pub(crate) struct ImageXObject {
    pub width: u32,
    pub height: u32,
    color_space: &'static str,
    /// `DCTDecode` for pass-through JPEG data.
    filter: Option<&'static str>,
    data: Vec<u8>,
    alpha: Option<Vec<u8>>,
}

impl ImageXObject {
    pub(crate) fn load(path: &Path) -> Result<Self, CanvasError> {
        let error = |message: String| CanvasError::Image { path: path.display().to_string(), message };
        let bytes = std::fs::read(path).map_err(|e| error(e.to_string()))?;
        Self::decode(&bytes).map_err(error)
    }

    pub(crate) fn decode(bytes: &[u8]) -> Result<Self, String> {
        let format = image::guess_format(bytes).map_err(|e| e.to_string())?;
        let decoded = image::load_from_memory_with_format(bytes, format).map_err(|e| e.to_string())?;
        let (width, height) = decoded.dimensions();

        if format == ImageFormat::Jpeg {
            let color_space = match decoded.color() {
                ColorType::L8 | ColorType::La8 => "DeviceGray",
                _ => "DeviceRGB",
            };
            return Ok(Self {
                width,
                height,
                color_space,
                filter: Some("DCTDecode"),
                data: bytes.to_vec(),
                alpha: None,
            });
        }

        let rgba = decoded.to_rgba8();
        let mut rgb = Vec::with_capacity(rgba.len() / 4 * 3);
        let mut alpha = Vec::with_capacity(rgba.len() / 4);
        for pixel in rgba.pixels() {
            let [r, g, b, a] = pixel.0;
            rgb.extend_from_slice(&[r, g, b]);
            alpha.push(a);
        }
        let has_alpha = alpha.iter().any(|a| *a != 255);

        Ok(Self {
            width,
            height,
            color_space: "DeviceRGB",
            filter: None,
            data: rgb,
            alpha: has_alpha.then_some(alpha),
        })
    }

    pub(crate) fn write(&self, doc: &mut Document) -> ObjectId {
        let mut dict = dictionary! {
            "Type" => "XObject",
            "Subtype" => "Image",
            "Width" => self.width as i64,
            "Height" => self.height as i64,
            "ColorSpace" => self.color_space,
            "BitsPerComponent" => 8,
        };
        if let Some(alpha) = &self.alpha {
            let mask = Stream::new(
                dictionary! {
                    "Type" => "XObject",
                    "Subtype" => "Image",
                    "Width" => self.width as i64,
                    "Height" => self.height as i64,
                    "ColorSpace" => "DeviceGray",
                    "BitsPerComponent" => 8,
                },
                alpha.clone(),
            );
            dict.set("SMask", Object::Reference(doc.add_object(mask)));
        }

        let stream = match self.filter {
            Some(filter) => {
                dict.set("Filter", filter);
                Stream::new(dict, self.data.clone()).with_compression(false)
            }
            None => Stream::new(dict, self.data.clone()),
        };
        doc.add_object(stream)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageBuffer, Rgba};
    use std::io::Cursor;

    fn png(pixel: Rgba<u8>) -> Vec<u8> {
        let img = ImageBuffer::from_pixel(3, 2, pixel);
        let mut out = Cursor::new(Vec::new());
        img.write_to(&mut out, ImageFormat::Png).unwrap();
        out.into_inner()
    }

    #[test]
    fn opaque_png_has_no_mask() {
        let img = ImageXObject::decode(&png(Rgba([10, 20, 30, 255]))).unwrap();
        assert_eq!((img.width, img.height), (3, 2));
        assert_eq!(img.data.len(), 18);
        assert!(img.alpha.is_none());
        assert!(img.filter.is_none());
    }

    #[test]
    fn translucent_png_keeps_alpha() {
        let img = ImageXObject::decode(&png(Rgba([10, 20, 30, 128]))).unwrap();
        assert_eq!(img.alpha.as_deref(), Some(&[128u8; 6][..]));
    }

    #[test]
    fn garbage_is_rejected() {
        assert!(ImageXObject::decode(b"definitely not an image").is_err());
        let err = ImageXObject::load(Path::new("/no/such/file.png")).unwrap_err();
        assert!(matches!(err, CanvasError::Image { .. }));
    }
}
