//! Image handling for PDF embedding

use crate::{PdfError, Result};
use image::{DynamicImage, ImageDecoder, ImageReader};
use lopdf::{Dictionary, Stream};
use std::io::Cursor;

impl From<image::ImageError> for PdfError {
    fn from(err: image::ImageError) -> Self {
        PdfError::ImageError(err.to_string())
    }
}

/// Detected image format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    Jpeg,
    Png,
}

/// Detect image format from magic bytes
pub fn detect_format(data: &[u8]) -> Result<ImageFormat> {
    if data.len() < 8 {
        return Err(PdfError::ImageError("Image data too short".to_string()));
    }

    // Check for JPEG (starts with FF D8 FF)
    if data[0] == 0xFF && data[1] == 0xD8 && data[2] == 0xFF {
        return Ok(ImageFormat::Jpeg);
    }

    // Check for PNG (starts with 89 50 4E 47 0D 0A 1A 0A)
    if data[0..8] == [0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A] {
        return Ok(ImageFormat::Png);
    }

    Err(PdfError::ImageError("Unknown image format".to_string()))
}

/// JPEG info including dimensions and color components
#[derive(Debug, Clone, Copy)]
struct JpegInfo {
    width: u32,
    height: u32,
    num_components: u8,
}

/// Get JPEG info from the SOF marker
fn get_jpeg_info(data: &[u8]) -> Result<JpegInfo> {
    // Simple JPEG dimension parser
    // Look for SOF0 (0xFFC0) or SOF2 (0xFFC2) marker
    // SOF segment structure:
    // - 2 bytes: marker (0xFF, 0xC0-0xCF)
    // - 2 bytes: segment length
    // - 1 byte: precision
    // - 2 bytes: height
    // - 2 bytes: width
    // - 1 byte: number of components (1=grayscale, 3=RGB/YCbCr)
    let mut i = 2;
    while i + 10 < data.len() {
        if data[i] != 0xFF {
            i += 1;
            continue;
        }

        let marker = data[i + 1];

        // SOF markers (baseline, progressive, etc.)
        if (0xC0..=0xCF).contains(&marker) && marker != 0xC4 && marker != 0xC8 && marker != 0xCC {
            let height = u16::from_be_bytes([data[i + 5], data[i + 6]]) as u32;
            let width = u16::from_be_bytes([data[i + 7], data[i + 8]]) as u32;
            let num_components = data[i + 9];
            return Ok(JpegInfo {
                width,
                height,
                num_components,
            });
        }

        // Skip to next marker
        if i + 4 < data.len() {
            let length = u16::from_be_bytes([data[i + 2], data[i + 3]]) as usize;
            if length < 2 {
                break;
            }
            i += 2 + length;
        } else {
            break;
        }
    }

    Err(PdfError::ImageError(
        "Could not parse JPEG info".to_string(),
    ))
}

/// Image XObject for PDF embedding
#[derive(Debug, Clone)]
pub struct ImageXObject {
    /// Image width
    pub width: u32,
    /// Image height
    pub height: u32,
    /// Color space ("DeviceRGB", "DeviceGray")
    pub color_space: String,
    /// Bits per component
    pub bits_per_component: u8,
    /// PDF filter ("DCTDecode" for JPEG, "FlateDecode" for PNG)
    pub filter: String,
    /// Raw image data (compressed)
    pub data: Vec<u8>,
}

impl ImageXObject {
    /// Create XObject from JPEG or PNG file bytes
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        match detect_format(data)? {
            ImageFormat::Jpeg => Self::from_jpeg(data),
            ImageFormat::Png => Self::from_png(data),
        }
    }

    /// Create XObject from JPEG data
    ///
    /// JPEG images can be embedded directly with DCTDecode filter.
    pub fn from_jpeg(data: &[u8]) -> Result<Self> {
        let info = get_jpeg_info(data)?;

        let color_space = if info.num_components == 1 {
            "DeviceGray".to_string()
        } else {
            "DeviceRGB".to_string()
        };

        Ok(Self {
            width: info.width,
            height: info.height,
            color_space,
            bits_per_component: 8,
            filter: "DCTDecode".to_string(),
            data: data.to_vec(),
        })
    }

    /// Create XObject from PNG data
    ///
    /// PNG images need to be decoded and re-encoded as raw samples with
    /// FlateDecode. Alpha channels are blended with a white background.
    pub fn from_png(data: &[u8]) -> Result<Self> {
        let cursor = Cursor::new(data);
        let reader = ImageReader::new(cursor).with_guessed_format()?;
        let decoder = reader.into_decoder()?;

        let dims = decoder.dimensions();
        let color_type = decoder.color_type();

        // Decode the image
        let image = DynamicImage::from_decoder(decoder)?;

        // Process based on color type, handling alpha properly
        let (raw_data, color_space) = match color_type {
            // Pure grayscale - keep as grayscale for smaller size
            image::ColorType::L8 | image::ColorType::L16 => {
                let gray = image.to_luma8();
                (gray.into_raw(), "DeviceGray".to_string())
            }
            // Grayscale with alpha - blend with white, output grayscale
            image::ColorType::La8 | image::ColorType::La16 => {
                let la = image.to_luma_alpha8();
                let mut gray_data = Vec::with_capacity((dims.0 * dims.1) as usize);
                for pixel in la.pixels() {
                    let alpha = pixel[1] as f32 / 255.0;
                    let gray = (pixel[0] as f32 * alpha + 255.0 * (1.0 - alpha)) as u8;
                    gray_data.push(gray);
                }
                (gray_data, "DeviceGray".to_string())
            }
            // RGBA - blend with white background, output RGB
            image::ColorType::Rgba8 | image::ColorType::Rgba16 => {
                let rgba = image.to_rgba8();
                let mut rgb_data = Vec::with_capacity((dims.0 * dims.1 * 3) as usize);
                for pixel in rgba.pixels() {
                    let alpha = pixel[3] as f32 / 255.0;
                    let r = (pixel[0] as f32 * alpha + 255.0 * (1.0 - alpha)) as u8;
                    let g = (pixel[1] as f32 * alpha + 255.0 * (1.0 - alpha)) as u8;
                    let b = (pixel[2] as f32 * alpha + 255.0 * (1.0 - alpha)) as u8;
                    rgb_data.push(r);
                    rgb_data.push(g);
                    rgb_data.push(b);
                }
                (rgb_data, "DeviceRGB".to_string())
            }
            // RGB and other types - convert to RGB
            _ => {
                let rgb = image.to_rgb8();
                (rgb.into_raw(), "DeviceRGB".to_string())
            }
        };

        // Compress with FlateDecode (zlib)
        let compressed =
            flate2::write::ZlibEncoder::new(Vec::new(), flate2::Compression::default());
        let mut encoder = compressed;
        std::io::Write::write_all(&mut encoder, &raw_data)?;
        let data = encoder.finish()?;

        Ok(Self {
            width: dims.0,
            height: dims.1,
            color_space,
            bits_per_component: 8,
            filter: "FlateDecode".to_string(),
            data,
        })
    }

    /// Convert to lopdf Stream object
    pub fn to_pdf_stream(&self) -> Stream {
        let mut dict = Dictionary::new();

        dict.set("Type", lopdf::Object::Name(b"XObject".to_vec()));
        dict.set("Subtype", lopdf::Object::Name(b"Image".to_vec()));
        dict.set("Width", self.width as i64);
        dict.set("Height", self.height as i64);
        dict.set(
            "ColorSpace",
            lopdf::Object::Name(self.color_space.as_bytes().to_vec()),
        );
        dict.set("BitsPerComponent", self.bits_per_component as i64);
        dict.set(
            "Filter",
            lopdf::Object::Name(self.filter.as_bytes().to_vec()),
        );
        dict.set("Length", self.data.len() as i64);

        Stream::new(dict, self.data.clone())
    }
}

/// Generate operators to draw image at position
///
/// # Arguments
/// * `image_name` - Image resource name (e.g., "Im1")
/// * `x` - X coordinate in points
/// * `y` - Y coordinate in points (from bottom, PDF coordinates)
/// * `width` - Image width in points
/// * `height` - Image height in points
///
/// # Returns
/// PDF content stream operators as bytes
pub fn generate_image_operators(
    image_name: &str,
    x: f64,
    y: f64,
    width: f64,
    height: f64,
) -> Vec<u8> {
    // PDF image drawing operators:
    // q                    - Save graphics state
    // width 0 0 height x y cm  - Concatenate transformation matrix
    // /Im1 Do             - Draw image
    // Q                    - Restore graphics state

    format!("q\n{width} 0 0 {height} {x} {y} cm\n/{image_name} Do\nQ\n").into_bytes()
}
