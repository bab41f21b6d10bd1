//! Export sinks for the flattened composite.
//!
//! The editor hands a finished raster to this module synchronously; what
//! happens next (PNG encoding, clipboard hand-off, file save) is the
//! collaborators' business and reports success or failure distinctly from
//! the composite itself.

pub mod clipboard;
pub mod file;
pub mod types;

// Re-export commonly used types at module level
pub use file::FileSaveConfig;
pub use types::ExportError;

/// Encodes a composed surface as PNG bytes.
pub fn encode_png(surface: &cairo::ImageSurface) -> Result<Vec<u8>, ExportError> {
    let mut bytes = Vec::new();
    surface
        .write_to_png(&mut bytes)
        .map_err(|e| ExportError::Encode(e.to_string()))?;
    Ok(bytes)
}
