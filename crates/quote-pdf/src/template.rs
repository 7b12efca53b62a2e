//! Template embedding
//!
//! Each page of the base PDF becomes a Form XObject in a fresh document.
//! Output pages draw that form first and their overlay on top, so the
//! template's own content is never edited in place.

use std::collections::BTreeMap;

use lopdf::{Dictionary, Document, Object, ObjectId, Stream};
use tracing::debug;

use crate::canvas::{PageCanvas, BACKGROUND_RESOURCE, LOGO_RESOURCE};
use crate::error::RenderError;
use crate::font::StandardFont;
use crate::logo::LogoImage;
use crate::TEMPLATE_PAGE_COUNT;

/// A4 portrait, used when a page carries no MediaBox
const DEFAULT_MEDIA_BOX: [f32; 4] = [0.0, 0.0, 595.0, 842.0];

/// Guard against cyclic Parent chains
const MAX_INHERITANCE_DEPTH: usize = 32;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageGeometry {
    pub width: f32,
    pub height: f32,
}

#[derive(Debug)]
struct BackgroundPage {
    form_id: ObjectId,
    geometry: PageGeometry,
}

/// Output document under construction
#[derive(Debug)]
pub struct EmbeddedTemplate {
    doc: Document,
    pages_id: ObjectId,
    backgrounds: Vec<BackgroundPage>,
    logo_id: Option<ObjectId>,
    overlays: BTreeMap<u32, PageCanvas>,
}

impl EmbeddedTemplate {
    /// Parse the template and wrap every page as a Form XObject
    ///
    /// Fails unless the template has exactly [`TEMPLATE_PAGE_COUNT`] pages.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, RenderError> {
        let source =
            Document::load_mem(bytes).map_err(|e| RenderError::TemplateParse(e.to_string()))?;

        let source_pages = source.get_pages();
        if source_pages.len() != TEMPLATE_PAGE_COUNT {
            return Err(RenderError::TemplatePageCount {
                expected: TEMPLATE_PAGE_COUNT,
                found: source_pages.len(),
            });
        }

        // Capture everything needed from the source pages before the move
        let mut captured = Vec::with_capacity(source_pages.len());
        for (&number, &page_id) in &source_pages {
            let media_box = media_box(&source, page_id);
            let resources = inherited(&source, page_id, b"Resources");
            let content = page_content(&source, page_id).map_err(|e| {
                RenderError::TemplateParse(format!("Failed to read page {} content: {}", number, e))
            })?;
            captured.push((media_box, resources, content));
        }

        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();

        // Import all template objects above our own ids
        let id_offset = doc.max_id;
        for (old_id, object) in source.objects.into_iter() {
            let new_id = (old_id.0 + id_offset, old_id.1);
            doc.objects.insert(new_id, remap_object_refs(object, id_offset));
        }
        doc.max_id = source.max_id + id_offset;

        let mut backgrounds = Vec::with_capacity(captured.len());
        for (media_box, resources, content) in captured {
            let [x0, y0, x1, y1] = media_box;
            let geometry = PageGeometry {
                width: (x1 - x0).abs(),
                height: (y1 - y0).abs(),
            };

            let mut form = Dictionary::new();
            form.set("Type", Object::Name(b"XObject".to_vec()));
            form.set("Subtype", Object::Name(b"Form".to_vec()));
            form.set("FormType", Object::Integer(1));
            form.set("BBox", real_array(&media_box));
            // Shift a non-zero origin back onto the output page
            form.set("Matrix", real_array(&[1.0, 0.0, 0.0, 1.0, -x0.min(x1), -y0.min(y1)]));
            form.set(
                "Resources",
                resources
                    .map(|r| remap_object_refs(r, id_offset))
                    .unwrap_or_else(|| Object::Dictionary(Dictionary::new())),
            );

            let form_id = doc.add_object(Stream::new(form, content));
            backgrounds.push(BackgroundPage { form_id, geometry });
        }

        debug!(pages = backgrounds.len(), "Embedded template pages");

        Ok(Self {
            doc,
            pages_id,
            backgrounds,
            logo_id: None,
            overlays: BTreeMap::new(),
        })
    }

    pub fn page_count(&self) -> usize {
        self.backgrounds.len()
    }

    /// Size of 1-based page `number`
    pub fn page_geometry(&self, number: u32) -> Option<PageGeometry> {
        let index = (number as usize).checked_sub(1)?;
        self.backgrounds.get(index).map(|b| b.geometry)
    }

    /// Embed the logo once; every page drawing it shares the same image
    pub fn add_logo(&mut self, logo: &LogoImage) -> Result<(), RenderError> {
        self.logo_id = Some(logo.add_to_document(&mut self.doc)?);
        Ok(())
    }

    /// Set the overlay drawn on top of 1-based page `number`
    pub fn set_overlay(&mut self, number: u32, canvas: PageCanvas) -> Result<(), RenderError> {
        if self.page_geometry(number).is_none() {
            return Err(RenderError::OperationError(format!(
                "Page {} out of range (1-{})",
                number,
                self.backgrounds.len()
            )));
        }
        self.overlays.insert(number, canvas);
        Ok(())
    }

    /// Build the page tree and serialize
    pub fn finish(mut self) -> Result<Vec<u8>, RenderError> {
        let mut fonts = Dictionary::new();
        for font in StandardFont::ALL {
            let mut font_dict = Dictionary::new();
            font_dict.set("Type", Object::Name(b"Font".to_vec()));
            font_dict.set("Subtype", Object::Name(b"Type1".to_vec()));
            font_dict.set("BaseFont", Object::Name(font.base_font().as_bytes().to_vec()));
            font_dict.set("Encoding", Object::Name(b"WinAnsiEncoding".to_vec()));
            let font_id = self.doc.add_object(font_dict);
            fonts.set(font.resource_name(), Object::Reference(font_id));
        }

        let mut kids = Vec::with_capacity(self.backgrounds.len());
        for (index, background) in self.backgrounds.iter().enumerate() {
            let number = index as u32 + 1;
            let PageGeometry { width, height } = background.geometry;

            let mut page = PageCanvas::new(width, height);
            page.background();
            let mut content = page.into_content();

            let mut xobjects = Dictionary::new();
            xobjects.set(BACKGROUND_RESOURCE, Object::Reference(background.form_id));

            if let Some(overlay) = self.overlays.remove(&number) {
                if overlay.uses_logo() {
                    let logo_id = self.logo_id.ok_or_else(|| {
                        RenderError::OperationError(format!(
                            "Page {} draws the logo but none was embedded",
                            number
                        ))
                    })?;
                    xobjects.set(LOGO_RESOURCE, Object::Reference(logo_id));
                }
                content.extend(overlay.into_content());
            }

            let content_id = self.doc.add_object(Stream::new(Dictionary::new(), content));

            let mut resources = Dictionary::new();
            resources.set("XObject", Object::Dictionary(xobjects));
            resources.set("Font", Object::Dictionary(fonts.clone()));

            let mut page_dict = Dictionary::new();
            page_dict.set("Type", Object::Name(b"Page".to_vec()));
            page_dict.set("Parent", Object::Reference(self.pages_id));
            page_dict.set("MediaBox", real_array(&[0.0, 0.0, width, height]));
            page_dict.set("Contents", Object::Reference(content_id));
            page_dict.set("Resources", Object::Dictionary(resources));

            kids.push(Object::Reference(self.doc.add_object(page_dict)));
        }

        let mut pages_dict = Dictionary::new();
        pages_dict.set("Type", Object::Name(b"Pages".to_vec()));
        pages_dict.set("Count", Object::Integer(kids.len() as i64));
        pages_dict.set("Kids", Object::Array(kids));
        self.doc
            .objects
            .insert(self.pages_id, Object::Dictionary(pages_dict));

        let mut catalog = Dictionary::new();
        catalog.set("Type", Object::Name(b"Catalog".to_vec()));
        catalog.set("Pages", Object::Reference(self.pages_id));
        let catalog_id = self.doc.add_object(catalog);
        self.doc.trailer.set("Root", Object::Reference(catalog_id));

        // Drops the template's own page tree and anything only it referenced
        let pruned = self.doc.prune_objects();
        debug!(pruned = pruned.len(), "Pruned unreferenced template objects");

        self.doc.compress();

        let mut buffer = Vec::new();
        self.doc.save_to(&mut buffer).map_err(|e| {
            RenderError::SerializationError(format!("Failed to save quotation PDF: {}", e))
        })?;
        Ok(buffer)
    }
}

/// Decoded page content, one content stream after another
///
/// Streams may split anywhere between tokens, so each one is followed by a
/// newline before the next is appended.
fn page_content(doc: &Document, page_id: ObjectId) -> lopdf::Result<Vec<u8>> {
    let mut content = Vec::new();
    for stream_id in doc.get_page_contents(page_id) {
        let stream = doc.get_object(stream_id).and_then(Object::as_stream)?;
        match stream.decompressed_content() {
            Ok(data) => content.extend_from_slice(&data),
            Err(_) => content.extend_from_slice(&stream.content),
        }
        content.push(b'\n');
    }
    Ok(content)
}

/// Look up `key` on the page, then up its Parent chain
fn inherited(doc: &Document, page_id: ObjectId, key: &[u8]) -> Option<Object> {
    let mut current = page_id;
    for _ in 0..MAX_INHERITANCE_DEPTH {
        let dict = doc.get_dictionary(current).ok()?;
        if let Ok(value) = dict.get(key) {
            return Some(value.clone());
        }
        current = dict.get(b"Parent").and_then(Object::as_reference).ok()?;
    }
    None
}

fn media_box(doc: &Document, page_id: ObjectId) -> [f32; 4] {
    let array = match inherited(doc, page_id, b"MediaBox") {
        Some(Object::Array(array)) => array,
        Some(Object::Reference(id)) => match doc.get_object(id) {
            Ok(Object::Array(array)) => array.clone(),
            _ => return DEFAULT_MEDIA_BOX,
        },
        _ => return DEFAULT_MEDIA_BOX,
    };

    let numbers: Vec<f32> = array.iter().filter_map(number).collect();
    match numbers.as_slice() {
        [x0, y0, x1, y1] if x1 != x0 && y1 != y0 => [*x0, *y0, *x1, *y1],
        _ => DEFAULT_MEDIA_BOX,
    }
}

fn number(object: &Object) -> Option<f32> {
    match object {
        Object::Integer(i) => Some(*i as f32),
        Object::Real(r) => Some(*r),
        _ => None,
    }
}

fn real_array(values: &[f32]) -> Object {
    Object::Array(values.iter().map(|&v| Object::Real(v)).collect())
}

/// Recursively shift object references by `offset`
fn remap_object_refs(obj: Object, offset: u32) -> Object {
    match obj {
        Object::Reference(id) => Object::Reference((id.0 + offset, id.1)),
        Object::Array(arr) => Object::Array(
            arr.into_iter()
                .map(|o| remap_object_refs(o, offset))
                .collect(),
        ),
        Object::Dictionary(mut dict) => {
            for (_, value) in dict.iter_mut() {
                *value = remap_object_refs(value.clone(), offset);
            }
            Object::Dictionary(dict)
        }
        Object::Stream(mut stream) => {
            for (_, value) in stream.dict.iter_mut() {
                *value = remap_object_refs(value.clone(), offset);
            }
            Object::Stream(stream)
        }
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::Color;

    fn create_test_template(num_pages: u32) -> Vec<u8> {
        template_with_contents(num_pages, |page_num| {
            vec![format!("BT /TF 24 Tf 72 720 Td (Template-Page-{}) Tj ET", page_num)]
        })
    }

    /// Template whose pages share a Resources dict inherited from the page tree
    ///
    /// `streams` gives each page's content streams; more than one becomes a
    /// `/Contents` array.
    fn template_with_contents(num_pages: u32, streams: impl Fn(u32) -> Vec<String>) -> Vec<u8> {
        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();

        let mut font = Dictionary::new();
        font.set("Type", Object::Name(b"Font".to_vec()));
        font.set("Subtype", Object::Name(b"Type1".to_vec()));
        font.set("BaseFont", Object::Name(b"Times-Roman".to_vec()));
        let font_id = doc.add_object(font);
        let mut font_resources = Dictionary::new();
        font_resources.set("TF", Object::Reference(font_id));
        let mut resources = Dictionary::new();
        resources.set("Font", Object::Dictionary(font_resources));

        let mut kids = Vec::new();
        for page_num in 1..=num_pages {
            let mut content_refs: Vec<Object> = streams(page_num)
                .into_iter()
                .map(|content| {
                    let id = doc.add_object(Stream::new(Dictionary::new(), content.into_bytes()));
                    Object::Reference(id)
                })
                .collect();
            let contents = if content_refs.len() == 1 {
                content_refs.remove(0)
            } else {
                Object::Array(content_refs)
            };

            let mut page = Dictionary::new();
            page.set("Type", Object::Name(b"Page".to_vec()));
            page.set("Parent", Object::Reference(pages_id));
            page.set("Contents", contents);
            kids.push(Object::Reference(doc.add_object(page)));
        }

        let mut pages = Dictionary::new();
        pages.set("Type", Object::Name(b"Pages".to_vec()));
        pages.set("Count", Object::Integer(num_pages as i64));
        pages.set("Kids", Object::Array(kids));
        pages.set("Resources", Object::Dictionary(resources));
        pages.set(
            "MediaBox",
            Object::Array(vec![
                Object::Integer(0),
                Object::Integer(0),
                Object::Integer(612),
                Object::Integer(792),
            ]),
        );
        doc.objects.insert(pages_id, Object::Dictionary(pages));

        let mut catalog = Dictionary::new();
        catalog.set("Type", Object::Name(b"Catalog".to_vec()));
        catalog.set("Pages", Object::Reference(pages_id));
        let catalog_id = doc.add_object(catalog);
        doc.trailer.set("Root", Object::Reference(catalog_id));

        let mut buffer = Vec::new();
        doc.save_to(&mut buffer).unwrap();
        buffer
    }

    #[test]
    fn test_wrong_page_count_rejected() {
        let err = EmbeddedTemplate::from_bytes(&create_test_template(3)).unwrap_err();
        assert!(matches!(
            err,
            RenderError::TemplatePageCount {
                expected: 9,
                found: 3
            }
        ));
        assert!(err.is_configuration_error());
    }

    #[test]
    fn test_garbage_is_parse_error() {
        let err = EmbeddedTemplate::from_bytes(b"not a pdf").unwrap_err();
        assert!(matches!(err, RenderError::TemplateParse(_)));
    }

    #[test]
    fn test_inherited_media_box_becomes_geometry() {
        let template = EmbeddedTemplate::from_bytes(&create_test_template(9)).unwrap();
        assert_eq!(template.page_count(), 9);
        assert_eq!(
            template.page_geometry(1),
            Some(PageGeometry {
                width: 612.0,
                height: 792.0
            })
        );
        assert_eq!(template.page_geometry(0), None);
        assert_eq!(template.page_geometry(10), None);
    }

    #[test]
    fn test_overlay_out_of_range() {
        let mut template = EmbeddedTemplate::from_bytes(&create_test_template(9)).unwrap();
        assert!(template.set_overlay(10, PageCanvas::new(612.0, 792.0)).is_err());
    }

    #[test]
    fn test_logo_without_embedding_fails() {
        let mut template = EmbeddedTemplate::from_bytes(&create_test_template(9)).unwrap();
        let mut canvas = PageCanvas::new(612.0, 792.0);
        canvas.logo(0.0, 0.0, 10.0, 10.0);
        template.set_overlay(1, canvas).unwrap();
        assert!(matches!(
            template.finish(),
            Err(RenderError::OperationError(_))
        ));
    }

    #[test]
    fn test_finish_wraps_each_page_as_form() {
        let mut template = EmbeddedTemplate::from_bytes(&create_test_template(9)).unwrap();
        let mut canvas = PageCanvas::new(612.0, 792.0);
        canvas.text(
            40.0,
            40.0,
            "Overlay",
            StandardFont::Helvetica,
            10.0,
            Color::BLACK,
        );
        template.set_overlay(2, canvas).unwrap();
        let bytes = template.finish().unwrap();

        let doc = Document::load_mem(&bytes).unwrap();
        let pages = doc.get_pages();
        assert_eq!(pages.len(), 9);

        for (&number, &page_id) in &pages {
            let content = String::from_utf8_lossy(&doc.get_page_content(page_id).unwrap()).to_string();
            assert!(content.starts_with("q\n/Bg Do\nQ\n"));
            assert_eq!(content.contains("(Overlay) Tj"), number == 2);

            let page = doc.get_dictionary(page_id).unwrap();
            let resources = page.get(b"Resources").unwrap().as_dict().unwrap();
            let xobjects = resources.get(b"XObject").unwrap().as_dict().unwrap();
            let form_id = xobjects.get(b"Bg").unwrap().as_reference().unwrap();
            let form = doc.get_object(form_id).unwrap().as_stream().unwrap();
            assert_eq!(form.dict.get(b"Subtype").unwrap().as_name().unwrap(), b"Form");

            let form_content = form.decompressed_content().unwrap_or_else(|_| form.content.clone());
            let expected = format!("(Template-Page-{}) Tj", number);
            assert!(String::from_utf8_lossy(&form_content).contains(&expected));

            // Inherited template resources travel with the form
            let form_resources = form.dict.get(b"Resources").unwrap().as_dict().unwrap();
            assert!(form_resources.get(b"Font").unwrap().as_dict().unwrap().has(b"TF"));
        }
    }

    #[test]
    fn test_split_content_streams_stay_separate_tokens() {
        let bytes = template_with_contents(9, |_| {
            vec![
                "BT /TF 24 Tf 72 760 Td (A) Tj ET".to_string(),
                "0 0 1 rg 10 10 50 50 re f".to_string(),
            ]
        });
        let template = EmbeddedTemplate::from_bytes(&bytes).unwrap();
        let form_id = template.backgrounds[0].form_id;
        let form = template.doc.get_object(form_id).unwrap().as_stream().unwrap();
        let content = String::from_utf8_lossy(&form.content).to_string();

        assert!(!content.contains("ET0"));
        assert!(content.contains("(A) Tj ET\n0 0 1 rg 10 10 50 50 re f"));
    }
}
