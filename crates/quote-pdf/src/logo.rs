//! PNG logo decoding and conversion to a PDF image XObject

use std::io::{Cursor, Write};

use flate2::write::ZlibEncoder;
use flate2::Compression;
use lopdf::{Dictionary, Document, Object, ObjectId, Stream};
use png::{ColorType, Transformations};

use crate::error::RenderError;

/// Decoded logo as 8-bit RGB with an optional alpha plane
#[derive(Debug, Clone)]
pub struct LogoImage {
    pub width: u32,
    pub height: u32,
    rgb: Vec<u8>,
    alpha: Option<Vec<u8>>,
}

impl LogoImage {
    pub fn decode_png(bytes: &[u8]) -> Result<Self, RenderError> {
        let mut decoder = png::Decoder::new(Cursor::new(bytes));
        decoder.set_transformations(Transformations::EXPAND | Transformations::STRIP_16);
        let mut reader = decoder
            .read_info()
            .map_err(|e| RenderError::Logo(e.to_string()))?;

        let mut buf = vec![0; reader.output_buffer_size()];
        let info = reader
            .next_frame(&mut buf)
            .map_err(|e| RenderError::Logo(e.to_string()))?;
        buf.truncate(info.buffer_size());

        let pixels = (info.width as usize) * (info.height as usize);
        let (rgb, alpha) = match info.color_type {
            ColorType::Rgb => (buf, None),
            ColorType::Rgba => {
                let mut rgb = Vec::with_capacity(pixels * 3);
                let mut alpha = Vec::with_capacity(pixels);
                for px in buf.chunks_exact(4) {
                    rgb.extend_from_slice(&px[..3]);
                    alpha.push(px[3]);
                }
                (rgb, Some(alpha))
            }
            ColorType::Grayscale => (buf.iter().flat_map(|&g| [g, g, g]).collect(), None),
            ColorType::GrayscaleAlpha => {
                let mut rgb = Vec::with_capacity(pixels * 3);
                let mut alpha = Vec::with_capacity(pixels);
                for px in buf.chunks_exact(2) {
                    rgb.extend_from_slice(&[px[0], px[0], px[0]]);
                    alpha.push(px[1]);
                }
                (rgb, Some(alpha))
            }
            ColorType::Indexed => {
                return Err(RenderError::Logo("palette was not expanded".into()));
            }
        };

        if rgb.len() != pixels * 3 {
            return Err(RenderError::Logo(format!(
                "expected {} bytes of pixel data, got {}",
                pixels * 3,
                rgb.len()
            )));
        }

        Ok(Self {
            width: info.width,
            height: info.height,
            rgb,
            alpha,
        })
    }

    pub fn has_alpha(&self) -> bool {
        self.alpha.is_some()
    }

    /// Width over height
    pub fn aspect_ratio(&self) -> f32 {
        if self.height == 0 {
            return 1.0;
        }
        self.width as f32 / self.height as f32
    }

    /// Largest `(width, height)` with this aspect ratio that fits the box
    pub fn fit_within(&self, max_width: f32, max_height: f32) -> (f32, f32) {
        let ratio = self.aspect_ratio();
        if max_width / max_height > ratio {
            (max_height * ratio, max_height)
        } else {
            (max_width, max_width / ratio)
        }
    }

    /// Add the image (and its soft mask) to `doc`, returning the image id
    pub fn add_to_document(&self, doc: &mut Document) -> Result<ObjectId, RenderError> {
        let mut image = self.image_dict(b"DeviceRGB");

        if let Some(alpha) = &self.alpha {
            let mask = self.image_dict(b"DeviceGray");
            let mask_id = doc.add_object(Stream::new(mask, deflate(alpha)?).with_compression(false));
            image.set("SMask", Object::Reference(mask_id));
        }

        Ok(doc.add_object(Stream::new(image, deflate(&self.rgb)?).with_compression(false)))
    }

    fn image_dict(&self, color_space: &[u8]) -> Dictionary {
        let mut dict = Dictionary::new();
        dict.set("Type", Object::Name(b"XObject".to_vec()));
        dict.set("Subtype", Object::Name(b"Image".to_vec()));
        dict.set("Width", Object::Integer(i64::from(self.width)));
        dict.set("Height", Object::Integer(i64::from(self.height)));
        dict.set("ColorSpace", Object::Name(color_space.to_vec()));
        dict.set("BitsPerComponent", Object::Integer(8));
        dict.set("Filter", Object::Name(b"FlateDecode".to_vec()));
        dict
    }
}

fn deflate(data: &[u8]) -> Result<Vec<u8>, RenderError> {
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder
        .write_all(data)
        .map_err(|e| RenderError::OperationError(format!("Failed to compress image: {}", e)))?;
    encoder
        .finish()
        .map_err(|e| RenderError::OperationError(format!("Failed to compress image: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encode_png(width: u32, height: u32, color: ColorType, data: &[u8]) -> Vec<u8> {
        let mut out = Vec::new();
        {
            let mut encoder = png::Encoder::new(&mut out, width, height);
            encoder.set_color(color);
            encoder.set_depth(png::BitDepth::Eight);
            let mut writer = encoder.write_header().unwrap();
            writer.write_image_data(data).unwrap();
        }
        out
    }

    #[test]
    fn test_decode_rgba_splits_alpha() {
        let data = [255, 0, 0, 128, 0, 255, 0, 255];
        let png = encode_png(2, 1, ColorType::Rgba, &data);
        let logo = LogoImage::decode_png(&png).unwrap();
        assert_eq!((logo.width, logo.height), (2, 1));
        assert!(logo.has_alpha());
        assert_eq!(logo.rgb, vec![255, 0, 0, 0, 255, 0]);
        assert_eq!(logo.alpha, Some(vec![128, 255]));
    }

    #[test]
    fn test_decode_grayscale_expands_to_rgb() {
        let png = encode_png(2, 1, ColorType::Grayscale, &[10, 200]);
        let logo = LogoImage::decode_png(&png).unwrap();
        assert!(!logo.has_alpha());
        assert_eq!(logo.rgb, vec![10, 10, 10, 200, 200, 200]);
    }

    #[test]
    fn test_invalid_png_is_logo_error() {
        let err = LogoImage::decode_png(b"not a png").unwrap_err();
        assert!(matches!(err, RenderError::Logo(_)));
        assert!(err.is_configuration_error());
    }

    #[test]
    fn test_fit_within_keeps_aspect() {
        let png = encode_png(4, 1, ColorType::Rgb, &[0; 12]);
        let logo = LogoImage::decode_png(&png).unwrap();
        assert_eq!(logo.fit_within(90.0, 40.0), (90.0, 22.5));
        assert_eq!(logo.fit_within(40.0, 5.0), (20.0, 5.0));
    }

    #[test]
    fn test_add_to_document_with_smask() {
        let png = encode_png(1, 1, ColorType::Rgba, &[1, 2, 3, 4]);
        let logo = LogoImage::decode_png(&png).unwrap();
        let mut doc = Document::with_version("1.5");
        let id = logo.add_to_document(&mut doc).unwrap();
        let image = doc.get_object(id).unwrap().as_stream().unwrap();
        assert_eq!(image.dict.get(b"Subtype").unwrap().as_name().unwrap(), b"Image");
        assert!(image.dict.get(b"SMask").is_ok());
        assert_eq!(doc.objects.len(), 2);
    }
}
