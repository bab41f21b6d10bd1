use anyhow::{Context, Result, bail};
use clap::{ArgAction, Parser};
use serde::Deserialize;
use std::fs::File;
use std::path::PathBuf;

use rastermark::config::{Config, SettingsStore};
use rastermark::draw::Color;
use rastermark::editor::Editor;
use rastermark::export;
use rastermark::input::PointerButton;
use rastermark::style::StyleUpdate;
use rastermark::tools::ToolKind;

#[derive(Parser, Debug)]
#[command(name = "rastermark")]
#[command(version, about = "Gesture-driven raster annotation editor for images")]
struct Cli {
    /// Base image to annotate (PNG)
    #[arg(long, short = 'i', value_name = "FILE")]
    input: PathBuf,

    /// Markup script to replay (TOML; see `markup.example.toml`)
    #[arg(long, short = 'm', value_name = "FILE")]
    markup: Option<PathBuf>,

    /// Write the flattened composite to this path
    #[arg(long, short = 'o', value_name = "FILE")]
    output: Option<PathBuf>,

    /// Copy the flattened composite to the Wayland clipboard
    #[arg(long, short = 'c', action = ArgAction::SetTrue)]
    clipboard: bool,
}

/// One annotation step of a markup script.
///
/// Drag tools take `start` and `end`; marker tools (number, text) take
/// `at`. Coordinates are logical pixels of the base image.
#[derive(Debug, Deserialize)]
struct MarkupStep {
    tool: String,
    #[serde(default)]
    start: Option<[f64; 2]>,
    #[serde(default)]
    end: Option<[f64; 2]>,
    #[serde(default)]
    at: Option<[f64; 2]>,
}

/// Optional style overrides applied before the steps replay.
#[derive(Debug, Default, Deserialize)]
struct MarkupStyle {
    text_value: Option<String>,
    number_value: Option<u32>,
    line_width: Option<f64>,
    arrowhead_length: Option<f64>,
    font_size: Option<f64>,
    line_color: Option<String>,
    fill_color: Option<String>,
    text_color: Option<String>,
}

#[derive(Debug, Deserialize)]
struct MarkupScript {
    #[serde(default)]
    style: MarkupStyle,
    #[serde(default, rename = "step")]
    steps: Vec<MarkupStep>,
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    let config = Config::load()?;
    let store = if config.style.persist_settings {
        SettingsStore::open_default()
    } else {
        SettingsStore::in_memory()
    };
    let mut editor = Editor::new(&config, store);

    // Load the base image; the CLI drives the editor at 1:1 scale, so
    // logical and display coordinates coincide.
    let mut reader = File::open(&cli.input)
        .with_context(|| format!("Failed to open {}", cli.input.display()))?;
    let base = cairo::ImageSurface::create_from_png(&mut reader)
        .with_context(|| format!("Failed to decode {} as PNG", cli.input.display()))?;
    editor.load_base_image(base);

    if let Some(markup_path) = &cli.markup {
        let script_str = std::fs::read_to_string(markup_path)
            .with_context(|| format!("Failed to read {}", markup_path.display()))?;
        let script: MarkupScript = toml::from_str(&script_str)
            .with_context(|| format!("Failed to parse {}", markup_path.display()))?;

        editor.update_style(style_update(&script.style)?);
        replay_steps(&mut editor, &script.steps)?;
        log::info!("Replayed {} markup steps", script.steps.len());
    }

    let composite = editor
        .export_composite()
        .context("Nothing to export: no base image loaded")?;
    let png = export::encode_png(&composite)?;

    if cli.clipboard {
        export::clipboard::copy_to_clipboard(&png)?;
        println!("Copied composite to clipboard");
    }

    match &cli.output {
        Some(path) => {
            std::fs::write(path, &png)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            println!("Saved composite to {}", path.display());
        }
        None if !cli.clipboard => {
            // No sink requested: save into the default pictures directory
            let saved = export::file::save_composite(&png, &export::FileSaveConfig::default())?;
            println!("Saved composite to {}", saved.display());
        }
        None => {}
    }

    Ok(())
}

/// Converts the script's style table into an engine style update.
fn style_update(style: &MarkupStyle) -> Result<StyleUpdate> {
    let parse_color = |name: &str, value: &Option<String>| -> Result<Option<Color>> {
        match value {
            Some(hex) => Color::from_hex(hex)
                .map(Some)
                .with_context(|| format!("Invalid {} '{}', expected #rrggbb", name, hex)),
            None => Ok(None),
        }
    };

    Ok(StyleUpdate {
        text_value: style.text_value.clone(),
        number_value: style.number_value,
        line_width: style.line_width,
        arrowhead_length: style.arrowhead_length,
        font_size: style.font_size,
        line_color: parse_color("line_color", &style.line_color)?,
        fill_color: parse_color("fill_color", &style.fill_color)?,
        text_color: parse_color("text_color", &style.text_color)?,
    })
}

/// Replays each step through the real gesture path.
fn replay_steps(editor: &mut Editor, steps: &[MarkupStep]) -> Result<()> {
    for (index, step) in steps.iter().enumerate() {
        let Some(tool) = ToolKind::from_id(&step.tool) else {
            bail!(
                "Step {}: unknown tool '{}' (expected one of: {})",
                index + 1,
                step.tool,
                ToolKind::ALL.map(|t| t.id()).join(", ")
            );
        };

        let (start, end) = match (step.at, step.start, step.end) {
            (Some(at), None, None) => (at, at),
            (None, Some(start), Some(end)) => (start, end),
            _ => bail!(
                "Step {}: give either `at` or both `start` and `end`",
                index + 1
            ),
        };

        editor.set_active_tool(tool);
        editor.pointer_down(PointerButton::Primary, start[0], start[1]);
        editor.pointer_move(end[0], end[1]);
        editor.pointer_up(PointerButton::Primary);
    }
    Ok(())
}
