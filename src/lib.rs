//! Library exports for the rastermark annotation engine.
//!
//! Exposes the editor core alongside the supporting modules it relies on so
//! that host shells (GUI frontends, the bundled CLI) can drive gestures,
//! manage layers, and export composites through one API.

pub mod canvas;
pub mod config;
pub mod draw;
pub mod editor;
pub mod export;
pub mod input;
pub mod style;
pub mod tools;
pub mod util;

pub use config::Config;
pub use editor::Editor;
pub use tools::ToolKind;
