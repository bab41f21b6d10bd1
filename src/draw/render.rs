//! Cairo-based rendering primitives for the annotation tools.
//!
//! Every function draws onto the context it is given and nothing else.
//! Tools compose these primitives; the gesture machine calls [`clear_surface`]
//! before each provisional redraw so repeated calls with the same inputs
//! always produce the same raster.

use super::color::Color;
use super::font::FontDescriptor;
use crate::util;

/// Padding around the measured text box for text callouts, in pixels.
const TEXT_BLOCK_PADDING: f64 = 6.0;

/// Extra radius around the measured digits for number badges, in pixels.
const NUMBER_BADGE_MARGIN: f64 = 2.0;

/// Erases the entire surface behind the context to full transparency.
///
/// Provisional layers are redrawn from scratch on every gesture update;
/// this reset is what keeps the tool draw functions idempotent.
pub fn clear_surface(ctx: &cairo::Context) {
    ctx.save().ok();
    ctx.set_operator(cairo::Operator::Clear);
    let _ = ctx.paint();
    ctx.restore().ok();
}

/// Render a straight line
pub fn render_line(
    ctx: &cairo::Context,
    x1: f64,
    y1: f64,
    x2: f64,
    y2: f64,
    color: Color,
    thick: f64,
) {
    ctx.set_source_rgba(color.r, color.g, color.b, color.a);
    ctx.set_line_width(thick);
    ctx.set_line_cap(cairo::LineCap::Round);

    ctx.move_to(x1, y1);
    ctx.line_to(x2, y2);
    let _ = ctx.stroke();
}

/// Render an arrow: a shaft from start to end plus two arrowhead strokes
/// swept back from the end point.
pub fn render_arrow(
    ctx: &cairo::Context,
    x1: f64,
    y1: f64,
    x2: f64,
    y2: f64,
    color: Color,
    thick: f64,
    head_length: f64,
) {
    // Draw the shaft
    render_line(ctx, x1, y1, x2, y2, color, thick);

    // Arrowhead at (x2, y2); returns [left_point, right_point]
    let head_points = util::arrowhead_points(x1, y1, x2, y2, head_length);

    ctx.set_source_rgba(color.r, color.g, color.b, color.a);
    ctx.set_line_width(thick);
    ctx.set_line_cap(cairo::LineCap::Round);

    ctx.move_to(x2, y2);
    ctx.line_to(head_points[0].0, head_points[0].1);
    let _ = ctx.stroke();

    ctx.move_to(x2, y2);
    ctx.line_to(head_points[1].0, head_points[1].1);
    let _ = ctx.stroke();
}

/// Render a rectangle outline between two drag corners.
pub fn render_rect_outline(
    ctx: &cairo::Context,
    x1: f64,
    y1: f64,
    x2: f64,
    y2: f64,
    color: Color,
    thick: f64,
) {
    let (x, y, w, h) = util::normalized_rect(x1, y1, x2, y2);

    ctx.set_source_rgba(color.r, color.g, color.b, color.a);
    ctx.set_line_width(thick);
    ctx.set_line_join(cairo::LineJoin::Miter);

    ctx.rectangle(x, y, w, h);
    let _ = ctx.stroke();
}

/// Render a filled rectangle between two drag corners.
pub fn render_rect_filled(ctx: &cairo::Context, x1: f64, y1: f64, x2: f64, y2: f64, color: Color) {
    let (x, y, w, h) = util::normalized_rect(x1, y1, x2, y2);

    ctx.set_source_rgba(color.r, color.g, color.b, color.a);
    ctx.rectangle(x, y, w, h);
    let _ = ctx.fill();
}

/// Ink bounding box of a measured piece of text, in pixels.
///
/// `x`/`y` are the ink offsets from the Pango layout origin; placing the
/// layout origin at `(cx - x - width / 2, cy - y - height / 2)` centers the
/// visible glyphs on `(cx, cy)`.
#[derive(Debug, Clone, Copy)]
pub struct InkExtents {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// Builds a Pango layout for the given text and font settings.
fn create_layout(
    ctx: &cairo::Context,
    text: &str,
    size: f64,
    font: &FontDescriptor,
) -> pango::Layout {
    let layout = pangocairo::functions::create_layout(ctx);
    let font_desc = pango::FontDescription::from_string(&font.to_pango_string(size));
    layout.set_font_description(Some(&font_desc));
    layout.set_text(text);
    layout
}

/// Converts a layout's ink rectangle from Pango units to pixels.
fn ink_extents(layout: &pango::Layout) -> InkExtents {
    let (ink_rect, _logical_rect) = layout.extents();
    let scale = pango::SCALE as f64;
    InkExtents {
        x: ink_rect.x() as f64 / scale,
        y: ink_rect.y() as f64 / scale,
        width: ink_rect.width() as f64 / scale,
        height: ink_rect.height() as f64 / scale,
    }
}

/// Measures the ink extents of `text` at the given size and font.
pub fn measure_text(
    ctx: &cairo::Context,
    text: &str,
    size: f64,
    font: &FontDescriptor,
) -> InkExtents {
    ink_extents(&create_layout(ctx, text, size, font))
}

/// Draws a layout with its ink box centered on `(cx, cy)`.
fn show_centered(ctx: &cairo::Context, layout: &pango::Layout, ink: InkExtents, cx: f64, cy: f64) {
    ctx.move_to(cx - ink.x - ink.width / 2.0, cy - ink.y - ink.height / 2.0);
    pangocairo::functions::show_layout(ctx, layout);
}

/// Renders a numbered step marker: a filled circle sized to the digits
/// plus a fixed margin, with the digits centered inside.
///
/// # Arguments
/// * `ctx` - Cairo drawing context to render to
/// * `cx` - Marker center X coordinate
/// * `cy` - Marker center Y coordinate
/// * `label` - Digits to display (the current counter value)
/// * `size` - Font size in points
/// * `font` - Font configuration (family, weight, style)
/// * `fill_color` - Circle fill color
/// * `text_color` - Digit color
#[allow(clippy::too_many_arguments)]
pub fn render_number_badge(
    ctx: &cairo::Context,
    cx: f64,
    cy: f64,
    label: &str,
    size: f64,
    font: &FontDescriptor,
    fill_color: Color,
    text_color: Color,
) {
    ctx.save().ok();
    ctx.set_antialias(cairo::Antialias::Best);

    let layout = create_layout(ctx, label, size, font);
    let ink = ink_extents(&layout);

    // Wide labels are bounded by their half width, short ones by their
    // height; either way the digits stay inside the circle.
    let radius = (ink.width / 2.0).max(ink.height) + NUMBER_BADGE_MARGIN;

    ctx.set_source_rgba(fill_color.r, fill_color.g, fill_color.b, fill_color.a);
    ctx.arc(cx, cy, radius, 0.0, std::f64::consts::PI * 2.0);
    let _ = ctx.fill();

    ctx.set_source_rgba(text_color.r, text_color.g, text_color.b, text_color.a);
    show_centered(ctx, &layout, ink, cx, cy);

    ctx.restore().ok();
}

/// Renders a text callout: a filled rectangle behind the measured text,
/// centered on `(cx, cy)`, with the text centered inside.
///
/// The backing rectangle is the ink box inflated by a fixed padding on
/// every side. An empty string still produces the small padded rectangle.
#[allow(clippy::too_many_arguments)]
pub fn render_text_block(
    ctx: &cairo::Context,
    cx: f64,
    cy: f64,
    text: &str,
    size: f64,
    font: &FontDescriptor,
    fill_color: Color,
    text_color: Color,
) {
    ctx.save().ok();
    ctx.set_antialias(cairo::Antialias::Best);

    let layout = create_layout(ctx, text, size, font);
    let ink = ink_extents(&layout);

    ctx.set_source_rgba(fill_color.r, fill_color.g, fill_color.b, fill_color.a);
    ctx.rectangle(
        cx - ink.width / 2.0 - TEXT_BLOCK_PADDING,
        cy - ink.height / 2.0 - TEXT_BLOCK_PADDING,
        ink.width + TEXT_BLOCK_PADDING * 2.0,
        ink.height + TEXT_BLOCK_PADDING * 2.0,
    );
    let _ = ctx.fill();

    ctx.set_source_rgba(text_color.r, text_color.g, text_color.b, text_color.a);
    show_centered(ctx, &layout, ink, cx, cy);

    ctx.restore().ok();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::color::{BLACK, RED, WHITE};

    fn test_surface() -> (cairo::ImageSurface, cairo::Context) {
        let surface = cairo::ImageSurface::create(cairo::Format::ARgb32, 64, 64).unwrap();
        let ctx = cairo::Context::new(&surface).unwrap();
        (surface, ctx)
    }

    fn surface_bytes(surface: &mut cairo::ImageSurface) -> Vec<u8> {
        surface.flush();
        surface.data().unwrap().to_vec()
    }

    #[test]
    fn clear_surface_resets_all_pixels() {
        let (mut surface, ctx) = test_surface();
        render_rect_filled(&ctx, 4.0, 4.0, 60.0, 60.0, RED);
        clear_surface(&ctx);
        drop(ctx);

        let data = surface_bytes(&mut surface);
        assert!(data.iter().all(|&b| b == 0));
    }

    #[test]
    fn line_rendering_is_deterministic() {
        let (mut a_surface, a_ctx) = test_surface();
        let (mut b_surface, b_ctx) = test_surface();

        render_line(&a_ctx, 3.0, 3.0, 58.2, 41.7, RED, 2.0);
        render_line(&b_ctx, 3.0, 3.0, 58.2, 41.7, RED, 2.0);
        drop(a_ctx);
        drop(b_ctx);

        assert_eq!(surface_bytes(&mut a_surface), surface_bytes(&mut b_surface));
    }

    #[test]
    fn filled_rect_covers_normalized_area() {
        let (mut surface, ctx) = test_surface();
        // Drag from bottom-right to top-left
        render_rect_filled(&ctx, 40.0, 40.0, 8.0, 8.0, BLACK);
        drop(ctx);

        surface.flush();
        let stride = surface.stride() as usize;
        let data = surface.data().unwrap();
        // Center of the normalized rectangle is painted
        let offset = 24 * stride + 24 * 4;
        assert_eq!(data[offset + 3], 255);
        // Outside the rectangle stays transparent
        let outside = 2 * stride + 2 * 4;
        assert_eq!(data[outside + 3], 0);
    }

    #[test]
    fn measure_text_reports_positive_extents() {
        let (_surface, ctx) = test_surface();
        let ink = measure_text(&ctx, "42", 16.0, &FontDescriptor::default());
        assert!(ink.width > 0.0);
        assert!(ink.height > 0.0);
    }

    #[test]
    fn number_badge_paints_fill_at_center() {
        let (mut surface, ctx) = test_surface();
        render_number_badge(&ctx, 32.0, 32.0, "7", 16.0, &FontDescriptor::default(), RED, WHITE);
        drop(ctx);

        surface.flush();
        let stride = surface.stride() as usize;
        let data = surface.data().unwrap();
        // Some pixel of the badge circle lands on the center row
        let row = &data[32 * stride..32 * stride + 64 * 4];
        assert!(row.chunks_exact(4).any(|px| px[3] > 0));
    }
}
