//! The fixed, ordered set of drawing tools.
//!
//! Tools are a closed enum rather than a runtime registry: every tool's
//! draw and commit behavior is dispatched through exhaustive matches, and
//! the identifier/shortcut mappings cannot drift from the variants.

use crate::draw::{self, FontDescriptor};
use crate::input::DragGeometry;
use crate::style::StyleConfig;

/// Drawing tool selection.
///
/// The active tool determines what a gesture paints onto its provisional
/// layer. Rectangle, arrow and line tools span the drag from start to end;
/// number and text markers render at the current end point only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolKind {
    /// Numbered step marker that auto-increments on commit
    Number,
    /// Text callout over a filled backing box
    Text,
    /// Filled rectangle from corner to corner
    FilledRect,
    /// Rectangle outline from corner to corner
    OutlinedRect,
    /// Arrow with a fixed-angle head at the drag end
    Arrow,
    /// Straight line between start and end
    Line,
}

impl ToolKind {
    /// Every tool, in presentation order.
    pub const ALL: [ToolKind; 6] = [
        ToolKind::Number,
        ToolKind::Text,
        ToolKind::FilledRect,
        ToolKind::OutlinedRect,
        ToolKind::Arrow,
        ToolKind::Line,
    ];

    /// Stable string identifier.
    pub fn id(self) -> &'static str {
        match self {
            ToolKind::Number => "number",
            ToolKind::Text => "text",
            ToolKind::FilledRect => "fill",
            ToolKind::OutlinedRect => "outline",
            ToolKind::Arrow => "arrow",
            ToolKind::Line => "line",
        }
    }

    /// Single-character keyboard shortcut.
    pub fn shortcut(self) -> char {
        match self {
            ToolKind::Number => 'n',
            ToolKind::Text => 't',
            ToolKind::FilledRect => 'f',
            ToolKind::OutlinedRect => 'r',
            ToolKind::Arrow => 'a',
            ToolKind::Line => 'l',
        }
    }

    /// Human-readable name for layer listings and tool pickers.
    pub fn title(self) -> &'static str {
        match self {
            ToolKind::Number => "Numbering tool",
            ToolKind::Text => "Text tool",
            ToolKind::FilledRect => "Filled rectangle",
            ToolKind::OutlinedRect => "Outlined rectangle",
            ToolKind::Arrow => "Arrow",
            ToolKind::Line => "Line",
        }
    }

    /// One-line description for tool pickers.
    pub fn description(self) -> &'static str {
        match self {
            ToolKind::Number => "Insert step number (auto-increments each use).",
            ToolKind::Text => "Insert text block (set the text value first).",
            ToolKind::FilledRect => "Draw a filled rectangle.",
            ToolKind::OutlinedRect => "Draw an outlined rectangle.",
            ToolKind::Arrow => "Draw an arrow (arrowhead length is configurable).",
            ToolKind::Line => "Draw a line.",
        }
    }

    /// Looks up a tool by its stable identifier.
    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|tool| tool.id() == id)
    }

    /// Looks up a tool by its keyboard shortcut (case-insensitive).
    pub fn from_shortcut(key: char) -> Option<Self> {
        let key = key.to_ascii_lowercase();
        Self::ALL.into_iter().find(|tool| tool.shortcut() == key)
    }

    /// Renders this tool's mark for the given drag geometry.
    ///
    /// Writes pixels to the context's target and nothing else; repeated
    /// calls with the same geometry and style on a cleared surface produce
    /// identical rasters.
    pub fn draw(
        self,
        ctx: &cairo::Context,
        geom: &DragGeometry,
        style: &StyleConfig,
        font: &FontDescriptor,
    ) {
        match self {
            ToolKind::Number => {
                draw::render_number_badge(
                    ctx,
                    geom.end_x,
                    geom.end_y,
                    &style.number_label(),
                    style.font_size(),
                    font,
                    style.fill_color(),
                    style.text_color(),
                );
            }
            ToolKind::Text => {
                draw::render_text_block(
                    ctx,
                    geom.end_x,
                    geom.end_y,
                    style.text_value(),
                    style.font_size(),
                    font,
                    style.fill_color(),
                    style.text_color(),
                );
            }
            ToolKind::FilledRect => {
                draw::render_rect_filled(
                    ctx,
                    geom.start_x,
                    geom.start_y,
                    geom.end_x,
                    geom.end_y,
                    style.fill_color(),
                );
            }
            ToolKind::OutlinedRect => {
                draw::render_rect_outline(
                    ctx,
                    geom.start_x,
                    geom.start_y,
                    geom.end_x,
                    geom.end_y,
                    style.line_color(),
                    style.line_width(),
                );
            }
            ToolKind::Arrow => {
                draw::render_arrow(
                    ctx,
                    geom.start_x,
                    geom.start_y,
                    geom.end_x,
                    geom.end_y,
                    style.line_color(),
                    style.line_width(),
                    style.arrowhead_length(),
                );
            }
            ToolKind::Line => {
                draw::render_line(
                    ctx,
                    geom.start_x,
                    geom.start_y,
                    geom.end_x,
                    geom.end_y,
                    style.line_color(),
                    style.line_width(),
                );
            }
        }
    }

    /// Runs this tool's commit hook after its gesture finishes.
    ///
    /// Only the number tool mutates the style: each committed marker
    /// advances the counter by one.
    pub fn on_commit(self, style: &mut StyleConfig) {
        match self {
            ToolKind::Number => style.increment_number(),
            ToolKind::Text
            | ToolKind::FilledRect
            | ToolKind::OutlinedRect
            | ToolKind::Arrow
            | ToolKind::Line => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{SettingsStore, StyleDefaults};

    fn test_style() -> StyleConfig {
        StyleConfig::load(StyleDefaults::default(), SettingsStore::in_memory())
    }

    fn rendered_bytes(tool: ToolKind, geom: &DragGeometry, style: &StyleConfig) -> Vec<u8> {
        let mut surface = cairo::ImageSurface::create(cairo::Format::ARgb32, 100, 100).unwrap();
        {
            let ctx = cairo::Context::new(&surface).unwrap();
            tool.draw(&ctx, geom, style, &FontDescriptor::default());
        }
        surface.flush();
        surface.data().unwrap().to_vec()
    }

    #[test]
    fn ids_and_shortcuts_round_trip_for_every_tool() {
        for tool in ToolKind::ALL {
            assert_eq!(ToolKind::from_id(tool.id()), Some(tool));
            assert_eq!(ToolKind::from_shortcut(tool.shortcut()), Some(tool));
            assert_eq!(
                ToolKind::from_shortcut(tool.shortcut().to_ascii_uppercase()),
                Some(tool)
            );
        }
        assert_eq!(ToolKind::from_id("pen"), None);
        assert_eq!(ToolKind::from_shortcut('z'), None);
    }

    #[test]
    fn every_tool_draws_deterministically() {
        let style = test_style();
        let geom = DragGeometry::with_endpoints(20.0, 25.0, 70.5, 60.1);

        for tool in ToolKind::ALL {
            let first = rendered_bytes(tool, &geom, &style);
            let second = rendered_bytes(tool, &geom, &style);
            assert_eq!(first, second, "{} draw is not deterministic", tool.id());
            assert!(
                first.iter().any(|&b| b != 0),
                "{} drew nothing",
                tool.id()
            );
        }
    }

    #[test]
    fn rect_tools_accept_reversed_drags() {
        let style = test_style();
        let forward = DragGeometry::with_endpoints(10.0, 10.0, 60.0, 40.0);
        let backward = DragGeometry::with_endpoints(60.0, 40.0, 10.0, 10.0);

        for tool in [ToolKind::FilledRect, ToolKind::OutlinedRect] {
            assert_eq!(
                rendered_bytes(tool, &forward, &style),
                rendered_bytes(tool, &backward, &style),
                "{} differs for flipped drag",
                tool.id()
            );
        }
    }

    #[test]
    fn point_tools_ignore_the_start_point() {
        let style = test_style();
        let near = DragGeometry::with_endpoints(5.0, 5.0, 50.0, 50.0);
        let far = DragGeometry::with_endpoints(90.0, 12.0, 50.0, 50.0);

        for tool in [ToolKind::Number, ToolKind::Text] {
            assert_eq!(
                rendered_bytes(tool, &near, &style),
                rendered_bytes(tool, &far, &style),
                "{} depends on the start point",
                tool.id()
            );
        }
    }

    #[test]
    fn only_the_number_tool_commits_a_style_change() {
        let mut style = test_style();
        for tool in ToolKind::ALL {
            if tool != ToolKind::Number {
                tool.on_commit(&mut style);
            }
        }
        assert_eq!(style.number_value(), 1);

        ToolKind::Number.on_commit(&mut style);
        assert_eq!(style.number_value(), 2);
    }
}
