//! Single-page composition with the fixed A4 layout

use crate::company;
use crate::document::{DocumentRequest, Totals, DATE_FORMAT};
use crate::{DevisError, Result};
use pdf_draw::{Align, Color, Font, Page, A4_HEIGHT, A4_WIDTH};
use std::fs;
use std::path::Path;
use tarif::format_amount;

const MARGIN: f64 = 36.0;
const SECTION_GAP: f64 = 18.0;
const LOGO_WIDTH: f64 = 120.0;
const LOGO_HEIGHT: f64 = 60.0;
const ROW_HEIGHT: f64 = 22.0;
const COL_WIDTHS: [f64; 4] = [170.0, 90.0, 110.0, 110.0];

/// Compose the document and write it to `path`
pub fn compose<P: AsRef<Path>>(request: &DocumentRequest, path: P) -> Result<()> {
    let mut page = build_page(request);
    page.save(path)?;
    Ok(())
}

/// Compose the document in memory
pub fn compose_bytes(request: &DocumentRequest) -> Result<Vec<u8>> {
    let mut page = build_page(request);
    Ok(page.to_bytes()?)
}

fn build_page(request: &DocumentRequest) -> Page {
    let mut page = Page::a4();
    let totals = Totals::compute(request.quantity, request.unit_price);

    let logo_y = A4_HEIGHT - MARGIN - LOGO_HEIGHT;
    let box_top = logo_y - LOGO_HEIGHT - 35.0;
    let table_y = box_top - 72.0 - SECTION_GAP;

    draw_letterhead(&mut page, request, logo_y);
    draw_banner(&mut page, request);
    draw_info_box(&mut page, request, box_top);
    draw_table(&mut page, request, totals, table_y);
    draw_totals(&mut page, totals, table_y);
    draw_payment(&mut page);
    draw_footer(&mut page, request);

    page
}

fn draw_letterhead(page: &mut Page, request: &DocumentRequest, logo_y: f64) {
    match fs::read(&request.logo_path) {
        Ok(data) => {
            if let Err(e) = page.draw_image(&data, MARGIN, logo_y, LOGO_WIDTH, LOGO_HEIGHT) {
                log::warn!("Skipping logo {}: {e}", request.logo_path.display());
            }
        }
        Err(e) => {
            log::warn!("Skipping logo {}: {e}", request.logo_path.display());
        }
    }

    page.set_font(Font::Helvetica, 10.0);
    let mut line_y = logo_y - 18.0;
    for line in company::COMPANY_LINES {
        page.draw_text(line, MARGIN, line_y, Align::Left);
        line_y -= 13.0;
    }
}

fn draw_banner(page: &mut Page, request: &DocumentRequest) {
    let bar_height = 36.0;
    let bar_y = A4_HEIGHT - MARGIN - 10.0;

    page.set_fill_color(company::banner_color());
    page.fill_round_rect(
        A4_WIDTH - 260.0 - MARGIN,
        bar_y - bar_height,
        250.0,
        bar_height,
        8.0,
    );

    page.set_fill_color(Color::white());
    page.set_font(Font::HelveticaBold, 16.0);
    page.draw_text(
        &request.kind.title(),
        A4_WIDTH - 250.0 - MARGIN,
        bar_y - bar_height + 22.0,
        Align::Left,
    );
    page.set_font(Font::HelveticaBold, 11.0);
    page.draw_text(
        &format!("N° {}", request.number),
        A4_WIDTH - MARGIN - 18.0,
        bar_y - bar_height + 22.0,
        Align::Right,
    );
    page.set_fill_color(Color::black());
}

fn draw_info_box(page: &mut Page, request: &DocumentRequest, box_top: f64) {
    let box_width = A4_WIDTH - 2.0 * MARGIN;
    page.stroke_round_rect(MARGIN, box_top - 72.0, box_width, 72.0, 7.0);

    page.set_font(Font::Helvetica, 10.0);
    let left_x = MARGIN + 16.0;
    let date = request.date.format(DATE_FORMAT);
    page.draw_text(&format!("Date : {date}"), left_x, box_top - 18.0, Align::Left);
    page.draw_text(
        &format!("Client : {}", request.client_name),
        left_x,
        box_top - 34.0,
        Align::Left,
    );
    page.draw_text(
        &format!("Adresse : {}", request.address),
        left_x,
        box_top - 50.0,
        Align::Left,
    );

    let right_x = MARGIN + box_width / 2.0 + 16.0;
    page.draw_text(
        &format!("RC : {}", request.rc),
        right_x,
        box_top - 18.0,
        Align::Left,
    );
    page.draw_text(
        &format!("NIF : {}", request.nif),
        right_x,
        box_top - 34.0,
        Align::Left,
    );
    if let Some(po) = request.purchase_order.as_deref().filter(|po| !po.is_empty()) {
        page.draw_text(
            &format!("Bon de commande : {po}"),
            right_x,
            box_top - 50.0,
            Align::Left,
        );
    }
}

fn draw_table(page: &mut Page, request: &DocumentRequest, totals: Totals, table_y: f64) {
    let table_width: f64 = COL_WIDTHS.iter().sum();
    let mut x_positions = [0.0; 4];
    let mut x = MARGIN;
    for (position, width) in x_positions.iter_mut().zip(COL_WIDTHS) {
        *position = x;
        x += width;
    }

    page.set_fill_color(company::header_background());
    page.fill_rect(MARGIN, table_y - ROW_HEIGHT, table_width, ROW_HEIGHT);
    page.set_fill_color(Color::black());

    page.set_font(Font::HelveticaBold, 10.0);
    let headers = ["DÉSIGNATION", "Quantité (T)", "P.U. HT (MRU)", "MONTANT (MRU)"];
    for (header, column_x) in headers.iter().zip(x_positions) {
        page.draw_text(header, column_x + 8.0, table_y - ROW_HEIGHT + 7.0, Align::Left);
    }
    page.set_line_width(0.5);
    page.stroke_rect(MARGIN, table_y - ROW_HEIGHT, table_width, ROW_HEIGHT);

    page.set_font(Font::Helvetica, 10.0);
    let row_y = table_y - 2.0 * ROW_HEIGHT + 6.0;
    page.draw_text(&request.product, x_positions[0] + 8.0, row_y, Align::Left);
    page.draw_text(
        &format_amount(request.quantity),
        x_positions[1] + COL_WIDTHS[1] - 10.0,
        row_y,
        Align::Right,
    );
    page.draw_text(
        &format_amount(request.unit_price),
        x_positions[2] + COL_WIDTHS[2] - 10.0,
        row_y,
        Align::Right,
    );
    page.draw_text(
        &format_amount(totals.ht),
        x_positions[3] + COL_WIDTHS[3] - 10.0,
        row_y,
        Align::Right,
    );

    // Column rules extend one empty row below the item line
    let mut rule_x = MARGIN;
    for width in COL_WIDTHS {
        page.line(rule_x, table_y - ROW_HEIGHT, rule_x, table_y - 3.0 * ROW_HEIGHT);
        rule_x += width;
    }
    page.line(rule_x, table_y - ROW_HEIGHT, rule_x, table_y - 3.0 * ROW_HEIGHT);
    page.line(
        MARGIN,
        table_y - 2.0 * ROW_HEIGHT,
        MARGIN + table_width,
        table_y - 2.0 * ROW_HEIGHT,
    );
    page.stroke_rect(MARGIN, table_y - 2.0 * ROW_HEIGHT, table_width, ROW_HEIGHT);
}

fn draw_totals(page: &mut Page, totals: Totals, table_y: f64) {
    let summary_height = 54.0;
    let summary_x = A4_WIDTH - MARGIN - 260.0;
    let summary_y = table_y - 3.0 * ROW_HEIGHT - SECTION_GAP - 40.0;

    page.stroke_round_rect(summary_x, summary_y, 260.0, summary_height, 7.0);

    page.set_font(Font::Helvetica, 10.0);
    let label_x = summary_x + 14.0;
    page.draw_text("Montant HT :", label_x, summary_y + 38.0, Align::Left);
    page.draw_text("TVA (16%) :", label_x, summary_y + 22.0, Align::Left);
    page.draw_text("TTC :", label_x, summary_y + 6.0, Align::Left);

    page.set_font(Font::HelveticaBold, 10.0);
    let value_x = summary_x + 244.0;
    page.draw_text(&format_amount(totals.ht), value_x, summary_y + 38.0, Align::Right);
    page.draw_text(&format_amount(totals.tva), value_x, summary_y + 22.0, Align::Right);
    page.draw_text(&format_amount(totals.ttc), value_x, summary_y + 6.0, Align::Right);
}

fn draw_payment(page: &mut Page) {
    let pay_y = MARGIN + 70.0;

    match payment_qr_image() {
        Ok(jpeg) => {
            let qr_x = A4_WIDTH - MARGIN - 60.0;
            if let Err(e) = page.draw_image(&jpeg, qr_x, pay_y - 5.0, 52.0, 52.0) {
                log::warn!("Skipping payment QR code: {e}");
            }
        }
        Err(e) => log::warn!("Skipping payment QR code: {e}"),
    }

    page.set_font(Font::HelveticaBold, 10.0);
    page.draw_text(company::PAYMENT_HEADING, MARGIN, pay_y + 40.0, Align::Left);

    page.set_font(Font::Helvetica, 9.0);
    let mut line_y = pay_y + 28.0;
    for line in company::PAYMENT_LINES {
        page.draw_text(line, MARGIN, line_y, Align::Left);
        line_y -= 12.0;
    }
}

fn draw_footer(page: &mut Page, request: &DocumentRequest) {
    let preferences = &request.preferences;
    if !preferences.show_footer || preferences.footer_text.is_empty() {
        return;
    }

    page.set_stroke_color(Color::gray(0.7));
    page.set_line_width(0.5);
    page.line(MARGIN, 35.0, A4_WIDTH - MARGIN, 35.0);

    page.set_font(Font::HelveticaOblique, 9.0);
    page.draw_text(&preferences.footer_text, A4_WIDTH / 2.0, 25.0, Align::Center);
}

/// Render the bank account QR code as JPEG bytes
fn payment_qr_image() -> Result<Vec<u8>> {
    use image::Luma;
    use qrcode::{EcLevel, QrCode};

    let code = QrCode::with_error_correction_level(company::IBAN.as_bytes(), EcLevel::M)
        .map_err(|e| DevisError::QrError(e.to_string()))?;

    // Render at larger size (200x200 pixels minimum)
    let image = code.render::<Luma<u8>>().min_dimensions(200, 200).build();

    let mut bytes: Vec<u8> = Vec::new();
    let mut cursor = std::io::Cursor::new(&mut bytes);
    image::DynamicImage::ImageLuma8(image)
        .write_to(&mut cursor, image::ImageFormat::Jpeg)
        .map_err(|e| DevisError::QrError(e.to_string()))?;

    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payment_qr_is_jpeg() {
        let bytes = payment_qr_image().unwrap();
        // JPEG start-of-image marker
        assert_eq!(&bytes[..2], &[0xFF, 0xD8]);
    }

    #[test]
    fn test_column_widths_fill_the_table() {
        let total: f64 = COL_WIDTHS.iter().sum();
        assert_eq!(total, 480.0);
    }
}
