//! Compositor: flattens the base image and layer stack into one raster.

use super::stack::LayerStack;

/// Flattens the base image and every layer into a freshly allocated surface.
///
/// The base image paints first, then each layer surface bottom to top, so
/// the result matches what the stacked canvases show on screen - including
/// a provisional layer if a gesture is mid-flight. Neither the base image
/// nor any layer surface is mutated.
///
/// # Arguments
/// * `base` - The loaded base image; defines the output dimensions
/// * `stack` - Layers to draw over it, in z-order
///
/// # Errors
/// Returns a Cairo error if the output surface cannot be allocated or a
/// paint operation fails.
pub fn compose(
    base: &cairo::ImageSurface,
    stack: &LayerStack,
) -> Result<cairo::ImageSurface, cairo::Error> {
    let target = cairo::ImageSurface::create(cairo::Format::ARgb32, base.width(), base.height())?;
    let ctx = cairo::Context::new(&target)?;

    ctx.set_source_surface(base, 0.0, 0.0)?;
    ctx.paint()?;

    for layer in stack.iter() {
        ctx.set_source_surface(layer.surface(), 0.0, 0.0)?;
        ctx.paint()?;
    }

    drop(ctx);
    target.flush();
    Ok(target)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw;
    use crate::draw::color::{RED, WHITE};
    use crate::tools::ToolKind;

    fn solid_base(width: i32, height: i32) -> cairo::ImageSurface {
        let surface = cairo::ImageSurface::create(cairo::Format::ARgb32, width, height).unwrap();
        let ctx = cairo::Context::new(&surface).unwrap();
        ctx.set_source_rgba(WHITE.r, WHITE.g, WHITE.b, WHITE.a);
        ctx.paint().unwrap();
        surface
    }

    fn pixel(surface: &mut cairo::ImageSurface, x: usize, y: usize) -> [u8; 4] {
        surface.flush();
        let stride = surface.stride() as usize;
        let data = surface.data().unwrap();
        let offset = y * stride + x * 4;
        [data[offset], data[offset + 1], data[offset + 2], data[offset + 3]]
    }

    #[test]
    fn output_matches_base_dimensions() {
        let base = solid_base(120, 80);
        let stack = LayerStack::new(120, 80);
        let composed = compose(&base, &stack).unwrap();
        assert_eq!(composed.width(), 120);
        assert_eq!(composed.height(), 80);
    }

    #[test]
    fn layers_paint_over_the_base_in_stack_order() {
        let base = solid_base(40, 40);
        let mut stack = LayerStack::new(40, 40);

        // Bottom layer: red square; top layer: white square overlapping it
        let bottom = stack.append(ToolKind::FilledRect).unwrap();
        let ctx = cairo::Context::new(stack.get(bottom).unwrap().surface()).unwrap();
        draw::render_rect_filled(&ctx, 0.0, 0.0, 40.0, 40.0, RED);
        drop(ctx);

        let top = stack.append(ToolKind::FilledRect).unwrap();
        let ctx = cairo::Context::new(stack.get(top).unwrap().surface()).unwrap();
        draw::render_rect_filled(&ctx, 10.0, 10.0, 30.0, 30.0, WHITE);
        drop(ctx);

        let mut composed = compose(&base, &stack).unwrap();
        // Overlap region shows the top layer (white), pre-multiplied BGRA
        assert_eq!(pixel(&mut composed, 20, 20), [255, 255, 255, 255]);
        // Non-overlapping region shows the bottom layer (red)
        assert_eq!(pixel(&mut composed, 5, 5), [0, 0, 255, 255]);
    }

    #[test]
    fn composing_does_not_mutate_inputs() {
        let mut base = solid_base(16, 16);
        let before = {
            base.flush();
            base.data().unwrap().to_vec()
        };

        let mut stack = LayerStack::new(16, 16);
        let id = stack.append(ToolKind::FilledRect).unwrap();
        let ctx = cairo::Context::new(stack.get(id).unwrap().surface()).unwrap();
        draw::render_rect_filled(&ctx, 0.0, 0.0, 16.0, 16.0, RED);
        drop(ctx);

        let _ = compose(&base, &stack).unwrap();

        let after = {
            base.flush();
            base.data().unwrap().to_vec()
        };
        assert_eq!(before, after);
    }
}
