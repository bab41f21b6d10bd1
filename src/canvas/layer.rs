//! A single annotation layer and its owned raster surface.

use crate::tools::ToolKind;

/// One committed (or in-flight provisional) annotation.
///
/// Every layer owns a raster surface with the base image's exact pixel
/// dimensions. The id is stable for the lifetime of the stack; removing a
/// layer never renumbers the others.
#[derive(Debug)]
pub struct Layer {
    id: u32,
    tool: ToolKind,
    surface: cairo::ImageSurface,
}

impl Layer {
    /// Creates a layer with a fresh transparent surface of the given size.
    pub(crate) fn new(
        id: u32,
        tool: ToolKind,
        width: i32,
        height: i32,
    ) -> Result<Self, cairo::Error> {
        let surface = cairo::ImageSurface::create(cairo::Format::ARgb32, width, height)?;
        Ok(Self { id, tool, surface })
    }

    /// Stable layer identity, assigned at append time.
    pub fn id(&self) -> u32 {
        self.id
    }

    /// Which tool produced this layer.
    pub fn tool(&self) -> ToolKind {
        self.tool
    }

    /// The layer's raster surface.
    ///
    /// Drawing happens through a Cairo context over this surface; the stack
    /// remains the sole owner.
    pub fn surface(&self) -> &cairo::ImageSurface {
        &self.surface
    }
}
