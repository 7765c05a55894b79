//! Text rendering utilities

use crate::document::Color;
use crate::Align;

/// Context for rendering text
pub struct TextRenderContext {
    /// PDF font resource name (e.g., "F1")
    pub font_name: String,
    /// Font size in points
    pub font_size: f32,
    /// Text width in points (for alignment)
    pub text_width: f64,
    /// Text color (RGB)
    pub color: Color,
}

/// Generate PDF operators for text insertion
///
/// Creates the proper PDF text operators (BT, Tf, Td, Tj, ET) to render text
/// at a specific position with alignment support.
///
/// # Arguments
/// * `text_hex` - Hex-encoded WinAnsi text (e.g., "<4445564953>")
/// * `x` - X coordinate in points (PDF coordinates, from left)
/// * `y` - Baseline Y coordinate in points (PDF coordinates, from bottom)
/// * `align` - Text alignment
/// * `ctx` - Text rendering context
///
/// # Returns
/// Vector of bytes containing the PDF operators
pub fn generate_text_operators(
    text_hex: &str,
    x: f64,
    y: f64,
    align: Align,
    ctx: &TextRenderContext,
) -> Vec<u8> {
    let mut ops = String::new();

    // Calculate X offset for alignment
    let x_offset = match align {
        Align::Left => 0.0,
        Align::Center => -ctx.text_width / 2.0,
        Align::Right => -ctx.text_width,
    };

    let final_x = x + x_offset;

    // Begin Text
    ops.push_str("BT\n");

    // Set text color (rg operator for non-stroking color)
    ops.push_str(&format!(
        "{} {} {} rg\n",
        ctx.color.r, ctx.color.g, ctx.color.b
    ));

    // Set font and size: /F1 12 Tf
    ops.push_str(&format!("/{} {} Tf\n", ctx.font_name, ctx.font_size));

    // Move to position: x y Td
    ops.push_str(&format!("{final_x} {y} Td\n"));

    // Show text: <hex> Tj
    ops.push_str(&format!("{text_hex} Tj\n"));

    // End Text
    ops.push_str("ET\n");

    ops.into_bytes()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_text_operators_left() {
        let ctx = TextRenderContext {
            font_name: "F1".to_string(),
            font_size: 12.0,
            text_width: 100.0,
            color: Color::black(),
        };

        let ops = generate_text_operators("<48656C6C6F>", 100.0, 700.0, Align::Left, &ctx);
        let ops_str = String::from_utf8(ops).unwrap();

        assert!(ops_str.contains("BT"));
        assert!(ops_str.contains("/F1 12 Tf"));
        assert!(ops_str.contains("100 700 Td")); // No offset for left align
        assert!(ops_str.contains("<48656C6C6F> Tj"));
        assert!(ops_str.contains("ET"));
    }

    #[test]
    fn test_generate_text_operators_center() {
        let ctx = TextRenderContext {
            font_name: "F2".to_string(),
            font_size: 14.0,
            text_width: 100.0,
            color: Color::black(),
        };

        let ops = generate_text_operators("<54657374>", 200.0, 600.0, Align::Center, &ctx);
        let ops_str = String::from_utf8(ops).unwrap();

        assert!(ops_str.contains("/F2 14 Tf"));
        assert!(ops_str.contains("150 600 Td")); // 200 - 50 (half of 100)
    }

    #[test]
    fn test_generate_text_operators_right() {
        let ctx = TextRenderContext {
            font_name: "F3".to_string(),
            font_size: 16.0,
            text_width: 80.0,
            color: Color::black(),
        };

        let ops = generate_text_operators("<5269676874>", 300.0, 500.0, Align::Right, &ctx);
        let ops_str = String::from_utf8(ops).unwrap();

        assert!(ops_str.contains("/F3 16 Tf"));
        assert!(ops_str.contains("220 500 Td")); // 300 - 80
    }

    #[test]
    fn test_generate_text_operators_zero_width() {
        let ctx = TextRenderContext {
            font_name: "F1".to_string(),
            font_size: 12.0,
            text_width: 0.0,
            color: Color::black(),
        };

        let ops = generate_text_operators("<41>", 100.0, 700.0, Align::Center, &ctx);
        let ops_str = String::from_utf8(ops).unwrap();

        // With zero width, center alignment should not change X position
        assert!(ops_str.contains("100 700 Td"));
    }

    #[test]
    fn test_generate_text_operators_with_color() {
        let ctx = TextRenderContext {
            font_name: "F1".to_string(),
            font_size: 10.0,
            text_width: 100.0,
            color: Color::rgb(0.19, 0.44, 0.72),
        };

        let ops = generate_text_operators("<41>", 100.0, 700.0, Align::Left, &ctx);
        let ops_str = String::from_utf8(ops).unwrap();

        assert!(ops_str.contains("0.19 0.44 0.72 rg"));
    }

    #[test]
    fn test_generate_text_operators_white() {
        let ctx = TextRenderContext {
            font_name: "F1".to_string(),
            font_size: 16.0,
            text_width: 50.0,
            color: Color::white(),
        };

        let ops = generate_text_operators("<4445564953>", 309.28, 791.89, Align::Left, &ctx);
        let ops_str = String::from_utf8(ops).unwrap();

        assert!(ops_str.contains("1 1 1 rg"));
        assert!(ops_str.contains("<4445564953> Tj"));
    }
}
