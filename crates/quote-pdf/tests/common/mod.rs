//! In-memory fixtures: template PDF, logo PNG and sample records

#![allow(dead_code)]

use lopdf::{Dictionary, Document, Object, Stream};
use quote_pdf::{Branding, QuotationRenderer, TemplateAssets};
use quote_types::{BankDetails, PricingLineItem, QuotationRecord, TechnicalSpecs};

/// Build a template with `num_pages` A4 pages, each carrying identifiable text
pub fn template_pdf(num_pages: u32) -> Vec<u8> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let mut kids = Vec::new();
    for page_num in 1..=num_pages {
        let content = format!("BT /F1 24 Tf 72 760 Td (Template-Page-{}) Tj ET", page_num);
        let content_id = doc.add_object(Stream::new(Dictionary::new(), content.into_bytes()));

        let mut page = Dictionary::new();
        page.set("Type", Object::Name(b"Page".to_vec()));
        page.set("Parent", Object::Reference(pages_id));
        page.set("Contents", Object::Reference(content_id));
        page.set(
            "MediaBox",
            Object::Array(vec![
                Object::Integer(0),
                Object::Integer(0),
                Object::Integer(595),
                Object::Integer(842),
            ]),
        );
        kids.push(Object::Reference(doc.add_object(page)));
    }

    let mut pages = Dictionary::new();
    pages.set("Type", Object::Name(b"Pages".to_vec()));
    pages.set("Count", Object::Integer(num_pages as i64));
    pages.set("Kids", Object::Array(kids));
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

/// 4x2 RGBA logo
pub fn logo_png() -> Vec<u8> {
    let mut out = Vec::new();
    {
        let mut encoder = png::Encoder::new(&mut out, 4, 2);
        encoder.set_color(png::ColorType::Rgba);
        encoder.set_depth(png::BitDepth::Eight);
        let mut writer = encoder.write_header().unwrap();
        let data: Vec<u8> = (0..8).flat_map(|i| [200, 160, 60, 30 * i as u8]).collect();
        writer.write_image_data(&data).unwrap();
    }
    out
}

pub fn renderer() -> QuotationRenderer {
    QuotationRenderer::new(
        TemplateAssets::new(template_pdf(9), logo_png()),
        Branding::default(),
    )
}

/// Acme sample: three canonical items and two the schedule does not know
pub fn acme_record() -> QuotationRecord {
    QuotationRecord {
        quote_number: "QT-2025-014".to_string(),
        customer_name: "Acme Pvt Ltd".to_string(),
        company_name: "Acme Industries".to_string(),
        email: "purchase@acme.example".to_string(),
        phone: "+91 98100 00000".to_string(),
        address: "Plot 12, Sector 5, Industrial Area Phase II, Near Metro Station, Gurugram, Haryana 122001".to_string(),
        quote_date: chrono::NaiveDate::from_ymd_opt(2025, 3, 5),
        valid_until: chrono::NaiveDate::from_ymd_opt(2025, 4, 4),
        pricing_items: vec![
            PricingLineItem::new("Basic Cost", 450000.0, 399000.0),
            PricingLineItem::new("installation ", 50000.0, 45000.0),
            PricingLineItem::new("Extended Warranty", 30000.0, 20000.0),
            PricingLineItem::new("Annual Maintenance", 12000.0, 10000.0),
            PricingLineItem::new("Civil Work", 80000.0, 80000.0),
        ],
        technical: TechnicalSpecs {
            model: Some("SkyLift 630".to_string()),
            stop_count: Some("G+4".to_string()),
            rated_load: Some("630 kg / 8 persons".to_string()),
            cabin_walls: Some(
                "Stainless steel hairline finish with mirror panel on rear wall and powder coated side panels"
                    .to_string(),
            ),
            ..Default::default()
        },
        ..Default::default()
    }
}

pub fn bank_details() -> BankDetails {
    BankDetails {
        account_number: Some("50200012345678".to_string()),
        ifsc: Some("HDFC0001234".to_string()),
        bank_name: Some("HDFC Bank".to_string()),
        gstin: Some("06AABCS1234F1Z5".to_string()),
        account_name: Some("Skyline Elevators Pvt Ltd".to_string()),
        ..Default::default()
    }
}

/// Decompressed content of 1-based page `number`
pub fn page_text(pdf: &[u8], number: u32) -> String {
    let doc = Document::load_mem(pdf).unwrap();
    let page_id = doc.get_pages()[&number];
    String::from_utf8_lossy(&doc.get_page_content(page_id).unwrap()).into_owned()
}

/// Names in the page's `/XObject` resources
pub fn page_xobjects(pdf: &[u8], number: u32) -> Vec<String> {
    let doc = Document::load_mem(pdf).unwrap();
    let page_id = doc.get_pages()[&number];
    let page = doc.get_dictionary(page_id).unwrap();
    let resources = page.get(b"Resources").unwrap().as_dict().unwrap();
    resources
        .get(b"XObject")
        .unwrap()
        .as_dict()
        .unwrap()
        .iter()
        .map(|(name, _)| String::from_utf8_lossy(name).into_owned())
        .collect()
}
