//! Vector drawing operators
//!
//! Generates content stream fragments for the lines, boxes and rounded
//! boxes the composer lays out. Rounded corners are cubic Bezier
//! quarter-arc approximations.

use crate::document::Color;

/// Circle-arc approximation constant for cubic Beziers
const KAPPA: f64 = 0.552_284_749_831;

/// How a closed path is painted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RectStyle {
    Fill,
    Stroke,
}

/// Generate operators for a straight line
///
/// # Arguments
/// * `x1`, `y1` - Start point in points (PDF coordinates, from bottom-left)
/// * `x2`, `y2` - End point in points
/// * `color` - Stroke color
/// * `line_width` - Stroke width in points
pub fn generate_line_operators(
    x1: f64,
    y1: f64,
    x2: f64,
    y2: f64,
    color: Color,
    line_width: f64,
) -> Vec<u8> {
    format!(
        "q\n{} {} {} RG\n{line_width} w\n{x1} {y1} m\n{x2} {y2} l\nS\nQ\n",
        color.r, color.g, color.b
    )
    .into_bytes()
}

/// Generate operators for a rectangle
///
/// `line_width` only applies to the stroked style.
pub fn generate_rect_operators(
    x: f64,
    y: f64,
    width: f64,
    height: f64,
    style: RectStyle,
    color: Color,
    line_width: f64,
) -> Vec<u8> {
    match style {
        RectStyle::Fill => format!(
            "q\n{} {} {} rg\n{x} {y} {width} {height} re\nf\nQ\n",
            color.r, color.g, color.b
        ),
        RectStyle::Stroke => format!(
            "q\n{} {} {} RG\n{line_width} w\n{x} {y} {width} {height} re\nS\nQ\n",
            color.r, color.g, color.b
        ),
    }
    .into_bytes()
}

/// Generate operators for a rectangle with rounded corners
///
/// The path starts after the bottom-left corner and runs clockwise as
/// seen on the page: bottom edge, right edge, top edge, left edge, with
/// a quarter-arc Bezier at each corner.
pub fn generate_round_rect_operators(
    x: f64,
    y: f64,
    width: f64,
    height: f64,
    radius: f64,
    style: RectStyle,
    color: Color,
    line_width: f64,
) -> Vec<u8> {
    let r = radius.min(width / 2.0).min(height / 2.0);
    let k = KAPPA * r;

    let mut ops = String::new();
    match style {
        RectStyle::Fill => {
            ops.push_str(&format!("q\n{} {} {} rg\n", color.r, color.g, color.b));
        }
        RectStyle::Stroke => {
            ops.push_str(&format!(
                "q\n{} {} {} RG\n{line_width} w\n",
                color.r, color.g, color.b
            ));
        }
    }

    // Bottom edge, then bottom-right corner
    ops.push_str(&format!("{} {y} m\n", x + r));
    ops.push_str(&format!("{} {y} l\n", x + width - r));
    ops.push_str(&format!(
        "{} {y} {} {} {} {} c\n",
        x + width - r + k,
        x + width,
        y + r - k,
        x + width,
        y + r
    ));

    // Right edge, then top-right corner
    ops.push_str(&format!("{} {} l\n", x + width, y + height - r));
    ops.push_str(&format!(
        "{} {} {} {} {} {} c\n",
        x + width,
        y + height - r + k,
        x + width - r + k,
        y + height,
        x + width - r,
        y + height
    ));

    // Top edge, then top-left corner
    ops.push_str(&format!("{} {} l\n", x + r, y + height));
    ops.push_str(&format!(
        "{} {} {x} {} {x} {} c\n",
        x + r - k,
        y + height,
        y + height - r + k,
        y + height - r
    ));

    // Left edge, then bottom-left corner
    ops.push_str(&format!("{x} {} l\n", y + r));
    ops.push_str(&format!("{x} {} {} {y} {} {y} c\n", y + r - k, x + r - k, x + r));

    ops.push_str("h\n");
    match style {
        RectStyle::Fill => ops.push_str("f\nQ\n"),
        RectStyle::Stroke => ops.push_str("S\nQ\n"),
    }

    ops.into_bytes()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_line_operators() {
        let ops = generate_line_operators(36.0, 35.0, 559.28, 35.0, Color::rgb(0.7, 0.7, 0.7), 0.5);
        let ops_str = String::from_utf8(ops).unwrap();

        assert!(ops_str.contains("0.7 0.7 0.7 RG"));
        assert!(ops_str.contains("0.5 w"));
        assert!(ops_str.contains("36 35 m"));
        assert!(ops_str.contains("559.28 35 l"));
        assert!(ops_str.contains("S"));
    }

    #[test]
    fn test_generate_rect_operators_fill() {
        let ops = generate_rect_operators(
            36.0,
            100.0,
            480.0,
            22.0,
            RectStyle::Fill,
            Color::rgb(0.0, 0.0, 1.0),
            1.0,
        );
        let ops_str = String::from_utf8(ops).unwrap();

        assert!(ops_str.contains("0 0 1 rg"));
        assert!(ops_str.contains("36 100 480 22 re"));
        assert!(ops_str.contains("f\n"));
        assert!(!ops_str.contains(" w\n")); // No line width for fills
    }

    #[test]
    fn test_generate_rect_operators_stroke() {
        let ops =
            generate_rect_operators(36.0, 100.0, 480.0, 22.0, RectStyle::Stroke, Color::black(), 0.5);
        let ops_str = String::from_utf8(ops).unwrap();

        assert!(ops_str.contains("0 0 0 RG"));
        assert!(ops_str.contains("0.5 w"));
        assert!(ops_str.contains("36 100 480 22 re"));
        assert!(ops_str.contains("S\n"));
    }

    #[test]
    fn test_generate_round_rect_operators_has_four_corners() {
        let ops = generate_round_rect_operators(
            299.28,
            759.89,
            250.0,
            36.0,
            8.0,
            RectStyle::Fill,
            Color::rgb(0.19, 0.44, 0.72),
            1.0,
        );
        let ops_str = String::from_utf8(ops).unwrap();

        assert_eq!(ops_str.matches(" c\n").count(), 4);
        assert!(ops_str.contains("0.19 0.44 0.72 rg"));
        assert!(ops_str.starts_with("q\n"));
        assert!(ops_str.ends_with("f\nQ\n"));
    }

    #[test]
    fn test_generate_round_rect_operators_stroke() {
        let ops = generate_round_rect_operators(
            36.0,
            578.89,
            523.28,
            72.0,
            7.0,
            RectStyle::Stroke,
            Color::black(),
            1.0,
        );
        let ops_str = String::from_utf8(ops).unwrap();

        assert!(ops_str.contains("1 w"));
        assert!(ops_str.contains("h\n"));
        assert!(ops_str.ends_with("S\nQ\n"));
    }

    #[test]
    fn test_round_rect_radius_clamped_to_half_extent() {
        // A radius larger than half the height must not fold the path
        let ops = generate_round_rect_operators(
            0.0,
            0.0,
            100.0,
            10.0,
            8.0,
            RectStyle::Stroke,
            Color::black(),
            1.0,
        );
        let ops_str = String::from_utf8(ops).unwrap();

        // Clamped to 5.0: bottom edge runs from x=5 to x=95
        assert!(ops_str.contains("5 0 m"));
        assert!(ops_str.contains("95 0 l"));
    }
}
