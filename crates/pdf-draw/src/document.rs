//! Single-page document builder

use crate::font::{encode_text_hex, Font};
use crate::image::{generate_image_operators, ImageXObject};
use crate::shapes::{
    generate_line_operators, generate_rect_operators, generate_round_rect_operators, RectStyle,
};
use crate::text::{generate_text_operators, TextRenderContext};
use crate::{Align, PdfError, Result, A4_HEIGHT, A4_WIDTH};
use lopdf::{dictionary, Dictionary, Document, Object, ObjectId, Stream};
use std::collections::hash_map::DefaultHasher;
use std::collections::HashMap;
use std::hash::{Hash, Hasher};
use std::path::Path;

/// RGB Color (values 0.0 - 1.0)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Color {
    /// Create a new RGB color (values 0.0 - 1.0)
    pub fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Create color from RGB values (0-255)
    pub fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        Self {
            r: r as f32 / 255.0,
            g: g as f32 / 255.0,
            b: b as f32 / 255.0,
        }
    }

    /// Black color
    pub fn black() -> Self {
        Self::rgb(0.0, 0.0, 0.0)
    }

    /// White color
    pub fn white() -> Self {
        Self::rgb(1.0, 1.0, 1.0)
    }

    /// Medium gray, used for separator rules
    pub fn gray(level: f32) -> Self {
        Self::rgb(level, level, level)
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::black()
    }
}

/// A single A4 page built from scratch
///
/// Drawing calls buffer content stream operators; the page dictionary,
/// resources and the content stream are only written out on save.
pub struct Page {
    /// The underlying lopdf document
    inner: Document,
    /// Object id of the page dictionary
    page_id: ObjectId,
    /// Buffered content operators (flushed at save time)
    content: Vec<u8>,
    /// Font resources used on the page (font -> resource name)
    font_resources: HashMap<Font, String>,
    /// Embedded font dictionaries (font -> PDF object id)
    embedded_fonts: HashMap<Font, ObjectId>,
    /// Next font resource number
    next_font_resource: u32,
    /// Embedded images by data hash (resource name, PDF object id)
    embedded_images: HashMap<u64, (String, ObjectId)>,
    /// Next image resource number
    next_image_resource: u32,
    /// Current font
    font: Font,
    /// Current font size
    font_size: f32,
    /// Current fill color (also used for text)
    fill_color: Color,
    /// Current stroke color
    stroke_color: Color,
    /// Current stroke width
    line_width: f64,
}

impl Page {
    /// Create a blank A4 page (595.28 x 841.89 points)
    pub fn a4() -> Self {
        let mut inner = Document::with_version("1.5");

        let pages_id = inner.new_object_id();
        let page_id = inner.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "MediaBox" => vec![
                Object::Real(0.0),
                Object::Real(0.0),
                Object::Real(A4_WIDTH as f32),
                Object::Real(A4_HEIGHT as f32),
            ],
        });
        inner.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => vec![Object::Reference(page_id)],
                "Count" => 1,
            }),
        );
        let catalog_id = inner.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        inner.trailer.set("Root", catalog_id);

        Self {
            inner,
            page_id,
            content: Vec::new(),
            font_resources: HashMap::new(),
            embedded_fonts: HashMap::new(),
            next_font_resource: 1,
            embedded_images: HashMap::new(),
            next_image_resource: 1,
            font: Font::Helvetica,
            font_size: 10.0,
            fill_color: Color::black(),
            stroke_color: Color::black(),
            line_width: 1.0,
        }
    }

    /// Set the current font and size
    pub fn set_font(&mut self, font: Font, size: f32) {
        self.font = font;
        self.font_size = size;
    }

    /// Set the fill color (used for text and filled shapes)
    pub fn set_fill_color(&mut self, color: Color) {
        self.fill_color = color;
    }

    /// Set the stroke color (used for lines and outlined shapes)
    pub fn set_stroke_color(&mut self, color: Color) {
        self.stroke_color = color;
    }

    /// Set the stroke width in points
    pub fn set_line_width(&mut self, width: f64) {
        self.line_width = width;
    }

    /// Measure text in the current font and size, in points
    pub fn text_width(&self, text: &str) -> f64 {
        self.font.text_width(text, self.font_size)
    }

    /// Draw text at a baseline position
    ///
    /// # Arguments
    /// * `text` - Text to draw
    /// * `x` - X coordinate in points
    /// * `y` - Baseline Y coordinate in points (from the page bottom)
    /// * `align` - Which side of `x` the text extends from
    pub fn draw_text(&mut self, text: &str, x: f64, y: f64, align: Align) {
        // Skip empty text - nothing to render
        if text.is_empty() {
            return;
        }

        let font_name = self.font_ref(self.font);
        let text_hex = encode_text_hex(text);
        let ctx = TextRenderContext {
            font_name,
            font_size: self.font_size,
            text_width: self.font.text_width(text, self.font_size),
            color: self.fill_color,
        };

        let operators = generate_text_operators(&text_hex, x, y, align, &ctx);
        self.content.extend_from_slice(&operators);
    }

    /// Draw a straight line with the current stroke color and width
    pub fn line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64) {
        let operators =
            generate_line_operators(x1, y1, x2, y2, self.stroke_color, self.line_width);
        self.content.extend_from_slice(&operators);
    }

    /// Fill a rectangle with the current fill color
    pub fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        let operators = generate_rect_operators(
            x,
            y,
            width,
            height,
            RectStyle::Fill,
            self.fill_color,
            self.line_width,
        );
        self.content.extend_from_slice(&operators);
    }

    /// Outline a rectangle with the current stroke color and width
    pub fn stroke_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        let operators = generate_rect_operators(
            x,
            y,
            width,
            height,
            RectStyle::Stroke,
            self.stroke_color,
            self.line_width,
        );
        self.content.extend_from_slice(&operators);
    }

    /// Fill a rounded rectangle with the current fill color
    pub fn fill_round_rect(&mut self, x: f64, y: f64, width: f64, height: f64, radius: f64) {
        let operators = generate_round_rect_operators(
            x,
            y,
            width,
            height,
            radius,
            RectStyle::Fill,
            self.fill_color,
            self.line_width,
        );
        self.content.extend_from_slice(&operators);
    }

    /// Outline a rounded rectangle with the current stroke color and width
    pub fn stroke_round_rect(&mut self, x: f64, y: f64, width: f64, height: f64, radius: f64) {
        let operators = generate_round_rect_operators(
            x,
            y,
            width,
            height,
            radius,
            RectStyle::Stroke,
            self.stroke_color,
            self.line_width,
        );
        self.content.extend_from_slice(&operators);
    }

    /// Draw an image stretched to the given box
    ///
    /// # Arguments
    /// * `data` - Image file bytes (JPEG or PNG)
    /// * `x` - X coordinate of the left edge in points
    /// * `y` - Y coordinate of the bottom edge in points
    /// * `width` - Display width in points
    /// * `height` - Display height in points
    pub fn draw_image(&mut self, data: &[u8], x: f64, y: f64, width: f64, height: f64) -> Result<()> {
        let resource_name = self.image_ref(data)?;
        let operators = generate_image_operators(&resource_name, x, y, width, height);
        self.content.extend_from_slice(&operators);
        Ok(())
    }

    /// Save the page to a file
    pub fn save<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        self.finalize()?;
        self.inner
            .save(path)
            .map_err(|e| PdfError::SaveError(e.to_string()))?;
        Ok(())
    }

    /// Save the page to bytes
    pub fn to_bytes(&mut self) -> Result<Vec<u8>> {
        self.finalize()?;
        let mut buffer = Vec::new();
        self.inner
            .save_to(&mut buffer)
            .map_err(|e| PdfError::SaveError(e.to_string()))?;
        Ok(buffer)
    }

    /// Get or create the resource name ("F1", "F2", ...) for a font
    fn font_ref(&mut self, font: Font) -> String {
        if let Some(name) = self.font_resources.get(&font) {
            return name.clone();
        }

        let name = format!("F{}", self.next_font_resource);
        self.next_font_resource += 1;
        self.font_resources.insert(font, name.clone());
        name
    }

    /// Get or create the resource name ("Im1", "Im2", ...) for an image
    ///
    /// Images are deduplicated by hash of their data.
    fn image_ref(&mut self, data: &[u8]) -> Result<String> {
        let mut hasher = DefaultHasher::new();
        data.hash(&mut hasher);
        let data_hash = hasher.finish();

        if let Some((name, _)) = self.embedded_images.get(&data_hash) {
            return Ok(name.clone());
        }

        let xobject = ImageXObject::from_bytes(data)?;
        let object_id = self.inner.add_object(xobject.to_pdf_stream());

        let resource_name = format!("Im{}", self.next_image_resource);
        self.next_image_resource += 1;
        self.embedded_images
            .insert(data_hash, (resource_name.clone(), object_id));

        Ok(resource_name)
    }

    /// Flush buffered content and attach resources to the page dictionary
    fn finalize(&mut self) -> Result<()> {
        self.flush_content()?;
        self.attach_resources()
    }

    /// Write buffered operators into the page's content stream
    fn flush_content(&mut self) -> Result<()> {
        if self.content.is_empty() {
            return Ok(());
        }

        // Concatenate with anything flushed by an earlier save
        let mut combined = match self.page_dict()?.get(b"Contents") {
            Ok(Object::Reference(ref_id)) => match self.inner.get_object(*ref_id) {
                Ok(Object::Stream(stream)) => stream.content.clone(),
                _ => Vec::new(),
            },
            _ => Vec::new(),
        };
        combined.extend(std::mem::take(&mut self.content));

        let stream_id = self
            .inner
            .add_object(Stream::new(Dictionary::new(), combined));
        self.page_dict_mut()?
            .set("Contents", Object::Reference(stream_id));

        Ok(())
    }

    /// Build the Resources dictionary from the fonts and images in use
    fn attach_resources(&mut self) -> Result<()> {
        let used_fonts: Vec<(Font, String)> = self
            .font_resources
            .iter()
            .map(|(&font, name)| (font, name.clone()))
            .collect();

        let mut font_dict = Dictionary::new();
        for (font, resource_name) in used_fonts {
            let font_id = match self.embedded_fonts.get(&font) {
                Some(&id) => id,
                None => {
                    let id = self.inner.add_object(dictionary! {
                        "Type" => "Font",
                        "Subtype" => "Type1",
                        "BaseFont" => font.base_name(),
                        "Encoding" => "WinAnsiEncoding",
                    });
                    self.embedded_fonts.insert(font, id);
                    id
                }
            };
            font_dict.set(resource_name.as_bytes(), Object::Reference(font_id));
        }

        let mut xobject_dict = Dictionary::new();
        for (name, id) in self.embedded_images.values() {
            xobject_dict.set(name.as_bytes(), Object::Reference(*id));
        }

        let mut resources = Dictionary::new();
        if !font_dict.is_empty() {
            resources.set("Font", Object::Dictionary(font_dict));
        }
        if !xobject_dict.is_empty() {
            resources.set("XObject", Object::Dictionary(xobject_dict));
        }
        self.page_dict_mut()?
            .set("Resources", Object::Dictionary(resources));

        Ok(())
    }

    fn page_dict(&self) -> Result<&Dictionary> {
        self.inner
            .get_object(self.page_id)
            .and_then(Object::as_dict)
            .map_err(|_| PdfError::SaveError("Page object is not a dictionary".to_string()))
    }

    fn page_dict_mut(&mut self) -> Result<&mut Dictionary> {
        self.inner
            .get_object_mut(self.page_id)
            .and_then(Object::as_dict_mut)
            .map_err(|_| PdfError::SaveError("Page object is not a dictionary".to_string()))
    }
}
