//! Integration tests for document composition
//!
//! These tests compose complete documents and re-open the bytes with
//! lopdf to check what actually lands on the page.

use chrono::NaiveDate;
use devis::{compose, compose_bytes, DocumentKind, DocumentRequest};
use lopdf::Document;
use registre::ClientPreferences;
use std::io::Cursor;
use std::path::PathBuf;

fn sample_request() -> DocumentRequest {
    DocumentRequest {
        kind: DocumentKind::Devis,
        number: "2024-001".to_string(),
        client_name: "ACME".to_string(),
        nif: "12345678".to_string(),
        rc: "98765".to_string(),
        address: "Nouakchott".to_string(),
        purchase_order: None,
        product: "Ciment 42.5".to_string(),
        quantity: 10.0,
        unit_price: 100.0,
        date: NaiveDate::from_ymd_opt(2024, 6, 15).unwrap(),
        preferences: ClientPreferences::default(),
        logo_path: PathBuf::from("no-such-logo.png"),
    }
}

/// Bare hex of `text` as it appears inside a Tj literal
fn hex(text: &str) -> String {
    pdf_draw::encode_win_ansi(text)
        .iter()
        .map(|b| format!("{b:02X}"))
        .collect()
}

fn tj(text: &str) -> String {
    format!("<{}> Tj", hex(text))
}

fn load(bytes: &[u8]) -> Document {
    Document::load_mem(bytes).expect("Failed to re-open PDF")
}

fn page_content(doc: &Document) -> String {
    let pages = doc.get_pages();
    let content = doc.get_page_content(pages[&1]).expect("Missing content");
    String::from_utf8_lossy(&content).into_owned()
}

fn xobject_count(doc: &Document) -> usize {
    let pages = doc.get_pages();
    let page = doc
        .get_object(pages[&1])
        .expect("Missing page object")
        .as_dict()
        .expect("Page is not a dictionary");
    let resources = page
        .get(b"Resources")
        .expect("Missing Resources")
        .as_dict()
        .expect("Resources is not a dictionary");
    match resources.get(b"XObject") {
        Ok(xobjects) => xobjects.as_dict().expect("XObject is not a dictionary").len(),
        Err(_) => 0,
    }
}

#[test]
fn test_single_a4_page() {
    let bytes = compose_bytes(&sample_request()).unwrap();
    let doc = load(&bytes);

    let pages = doc.get_pages();
    assert_eq!(pages.len(), 1);

    let page = doc.get_object(pages[&1]).unwrap().as_dict().unwrap();
    let media_box = page.get(b"MediaBox").unwrap().as_array().unwrap();
    assert!((media_box[2].as_f32().unwrap() - 595.28).abs() < 0.01);
    assert!((media_box[3].as_f32().unwrap() - 841.89).abs() < 0.01);
}

#[test]
fn test_letterhead_and_banner() {
    let bytes = compose_bytes(&sample_request()).unwrap();
    let content = page_content(&load(&bytes));

    assert!(content.contains(&tj("Société Mauritano-Française des ciments")));
    assert!(content.contains(&tj("RC: 200721 / NIF: 30400224")));
    assert!(content.contains(&tj("DEVIS")));
    assert!(content.contains(&tj("N° 2024-001")));
    // Banner background
    assert!(content.contains("0.19 0.44 0.72 rg"));
}

#[test]
fn test_facture_title() {
    let mut request = sample_request();
    request.kind = DocumentKind::Facture;
    let bytes = compose_bytes(&request).unwrap();
    let content = page_content(&load(&bytes));

    assert!(content.contains(&tj("FACTURE")));
    assert!(!content.contains(&tj("DEVIS")));
}

#[test]
fn test_info_box_fields() {
    let bytes = compose_bytes(&sample_request()).unwrap();
    let content = page_content(&load(&bytes));

    assert!(content.contains(&tj("Date : 2024-06-15")));
    assert!(content.contains(&tj("Client : ACME")));
    assert!(content.contains(&tj("Adresse : Nouakchott")));
    assert!(content.contains(&tj("RC : 98765")));
    assert!(content.contains(&tj("NIF : 12345678")));
}

#[test]
fn test_item_line_and_totals() {
    let bytes = compose_bytes(&sample_request()).unwrap();
    let content = page_content(&load(&bytes));

    assert!(content.contains(&tj("Ciment 42.5")));
    assert!(content.contains(&tj("10.00")));
    assert!(content.contains(&tj("100.00")));
    assert!(content.contains(&tj("1,000.00")));
    assert!(content.contains(&tj("160.00")));
    assert!(content.contains(&tj("1,160.00")));
    assert!(content.contains(&tj("Montant HT :")));
    assert!(content.contains(&tj("TVA (16%) :")));
    assert!(content.contains(&tj("TTC :")));
}

#[test]
fn test_purchase_order_only_when_present() {
    let mut request = sample_request();
    request.purchase_order = Some("BC-42".to_string());
    let bytes = compose_bytes(&request).unwrap();
    let content = page_content(&load(&bytes));
    assert!(content.contains(&tj("Bon de commande : BC-42")));

    request.purchase_order = Some(String::new());
    let bytes = compose_bytes(&request).unwrap();
    let content = page_content(&load(&bytes));
    assert!(!content.contains(&hex("Bon de commande")));

    request.purchase_order = None;
    let bytes = compose_bytes(&request).unwrap();
    let content = page_content(&load(&bytes));
    assert!(!content.contains(&hex("Bon de commande")));
}

#[test]
fn test_footer_follows_preferences() {
    let mut request = sample_request();
    request.preferences.footer_text = "Merci de votre confiance".to_string();
    let bytes = compose_bytes(&request).unwrap();
    let content = page_content(&load(&bytes));
    assert!(content.contains(&tj("Merci de votre confiance")));
    // Separator line above the footer
    assert!(content.contains("0.7 0.7 0.7 RG"));

    request.preferences.show_footer = false;
    let bytes = compose_bytes(&request).unwrap();
    let content = page_content(&load(&bytes));
    assert!(!content.contains(&hex("Merci de votre confiance")));

    // Footer enabled but no text configured
    request.preferences.show_footer = true;
    request.preferences.footer_text = String::new();
    let bytes = compose_bytes(&request).unwrap();
    let content = page_content(&load(&bytes));
    assert!(!content.contains("0.7 0.7 0.7 RG"));
}

#[test]
fn test_missing_logo_is_tolerated() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("devis_ACME_2024-001_2024-06-15.pdf");

    compose(&sample_request(), &path).unwrap();

    let bytes = std::fs::read(&path).unwrap();
    let doc = load(&bytes);
    // The payment QR code is the only embedded image
    assert_eq!(xobject_count(&doc), 1);
    assert!(page_content(&doc).contains(&tj("Paiement par virement bancaire uniquement :")));
}

#[test]
fn test_logo_embedded_when_readable() {
    let dir = tempfile::tempdir().unwrap();
    let logo_path = dir.path().join("logo.png");

    let mut png = Vec::new();
    let img = image::RgbImage::from_pixel(8, 8, image::Rgb([220, 230, 240]));
    img.write_to(&mut Cursor::new(&mut png), image::ImageFormat::Png)
        .unwrap();
    std::fs::write(&logo_path, &png).unwrap();

    let mut request = sample_request();
    request.logo_path = logo_path;
    let bytes = compose_bytes(&request).unwrap();
    let doc = load(&bytes);

    // Logo plus payment QR code
    assert_eq!(xobject_count(&doc), 2);
}

#[test]
fn test_payment_block() {
    let bytes = compose_bytes(&sample_request()).unwrap();
    let content = page_content(&load(&bytes));

    assert!(content.contains(&tj("Banque : BAMIS")));
    assert!(content.contains(&tj("IBAN : MR130030000101006313901-73")));
    assert!(content.contains(&tj("Devise : MRU")));
}
