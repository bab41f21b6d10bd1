//! End-to-end engine scenarios driven through the public editor API.

use rastermark::draw::color::WHITE;
use rastermark::editor::Editor;
use rastermark::input::{PointerButton, TouchPoint, ZoomDirection};
use rastermark::style::StyleUpdate;
use rastermark::tools::ToolKind;

/// Builds an editor over a solid white base image.
fn editor_with_white_base(width: i32, height: i32) -> Editor {
    let surface = cairo::ImageSurface::create(cairo::Format::ARgb32, width, height).unwrap();
    let ctx = cairo::Context::new(&surface).unwrap();
    ctx.set_source_rgba(WHITE.r, WHITE.g, WHITE.b, WHITE.a);
    ctx.paint().unwrap();
    drop(ctx);

    let mut editor = Editor::with_defaults();
    editor.load_base_image(surface);
    editor
}

fn drag(editor: &mut Editor, from: (f64, f64), to: (f64, f64)) {
    editor.pointer_down(PointerButton::Primary, from.0, from.1);
    editor.pointer_move(to.0, to.1);
    editor.pointer_up(PointerButton::Primary);
}

/// BGRA pixel of a composed surface.
fn pixel(surface: &mut cairo::ImageSurface, x: usize, y: usize) -> [u8; 4] {
    surface.flush();
    let stride = surface.stride() as usize;
    let data = surface.data().unwrap();
    let offset = y * stride + x * 4;
    [
        data[offset],
        data[offset + 1],
        data[offset + 2],
        data[offset + 3],
    ]
}

#[test]
fn diagonal_line_on_a_small_image() {
    let mut editor = editor_with_white_base(100, 100);
    editor.set_active_tool(ToolKind::Line);
    drag(&mut editor, (10.0, 10.0), (90.0, 90.0));

    assert_eq!(editor.layers().len(), 1);

    let mut composed = editor.export_composite().unwrap();
    assert_eq!(composed.width(), 100);
    assert_eq!(composed.height(), 100);

    // The diagonal midpoint carries the default red stroke
    let [b, _g, r, a] = pixel(&mut composed, 50, 50);
    assert_eq!(a, 255);
    assert!(r > 200 && b < 60);

    // Far off the diagonal the base image shows through untouched
    assert_eq!(pixel(&mut composed, 80, 20), [255, 255, 255, 255]);
    assert_eq!(pixel(&mut composed, 20, 80), [255, 255, 255, 255]);
}

#[test]
fn three_number_markers_advance_the_counter() {
    let mut editor = editor_with_white_base(200, 200);
    editor.set_active_tool(ToolKind::Number);

    drag(&mut editor, (40.0, 40.0), (40.0, 40.0));
    drag(&mut editor, (100.0, 100.0), (100.0, 100.0));

    // The third marker renders the initial value + 2
    assert_eq!(editor.style().number_label(), "3");
    drag(&mut editor, (160.0, 160.0), (160.0, 160.0));

    assert_eq!(editor.layers().len(), 3);
    assert_eq!(editor.style().number_value(), 4);
}

#[test]
fn interrupted_rect_drag_leaves_exactly_two_layers() {
    let mut editor = editor_with_white_base(100, 100);
    editor.set_active_tool(ToolKind::OutlinedRect);

    editor.pointer_down(PointerButton::Primary, 10.0, 10.0);
    editor.pointer_move(40.0, 40.0);
    // Second press before the first release
    editor.pointer_down(PointerButton::Primary, 60.0, 60.0);
    editor.pointer_move(80.0, 80.0);
    editor.pointer_up(PointerButton::Primary);

    let layers = editor.layers();
    assert_eq!(layers.len(), 2);
    assert_eq!(layers[0].id, 1);
    assert_eq!(layers[1].id, 2);

    // Nothing is left dangling: another release changes nothing
    editor.pointer_up(PointerButton::Primary);
    assert_eq!(editor.layers().len(), 2);
}

#[test]
fn removing_the_middle_layer_preserves_the_others() {
    let mut editor = editor_with_white_base(100, 100);
    editor.set_active_tool(ToolKind::Line);

    drag(&mut editor, (10.0, 10.0), (20.0, 20.0));
    drag(&mut editor, (30.0, 30.0), (40.0, 40.0));
    drag(&mut editor, (50.0, 50.0), (60.0, 60.0));

    editor.remove_layer(2);

    let layers = editor.layers();
    assert_eq!(layers.len(), 2);
    assert_eq!(layers[0].id, 1);
    assert_eq!(layers[1].id, 3);
}

#[test]
fn zoomed_and_unzoomed_drags_export_identically() {
    let mut plain = editor_with_white_base(100, 100);
    plain.set_active_tool(ToolKind::FilledRect);
    drag(&mut plain, (25.0, 25.0), (75.0, 75.0));

    let mut zoomed = editor_with_white_base(100, 100);
    zoomed.set_active_tool(ToolKind::FilledRect);
    zoomed.zoom(ZoomDirection::In);
    zoomed.zoom(ZoomDirection::In);
    zoomed.zoom(ZoomDirection::In);
    let scale = zoomed.display_size().unwrap().0 / 100.0;
    drag(
        &mut zoomed,
        (25.0 * scale, 25.0 * scale),
        (75.0 * scale, 75.0 * scale),
    );

    let mut a = plain.export_composite().unwrap();
    let mut b = zoomed.export_composite().unwrap();
    a.flush();
    b.flush();
    assert_eq!(a.data().unwrap().to_vec(), b.data().unwrap().to_vec());
}

#[test]
fn two_finger_touch_commits_on_contact_drop() {
    let mut editor = editor_with_white_base(100, 100);
    editor.set_active_tool(ToolKind::Arrow);

    editor.touch_start(&[TouchPoint::new(20.0, 20.0), TouchPoint::new(80.0, 80.0)]);
    editor.touch_move(&[TouchPoint::new(20.0, 22.0), TouchPoint::new(82.0, 80.0)]);
    editor.touch_end(&[TouchPoint::new(20.0, 22.0)]);

    assert_eq!(editor.layers().len(), 1);
    assert_eq!(editor.layers()[0].tool, ToolKind::Arrow);

    // The committed layer is final: further touches start a new one
    editor.touch_start(&[TouchPoint::new(10.0, 10.0), TouchPoint::new(30.0, 30.0)]);
    editor.touch_end(&[]);
    assert_eq!(editor.layers().len(), 2);
}

#[test]
fn style_updates_change_subsequent_layers_only() {
    let mut editor = editor_with_white_base(100, 100);
    editor.set_active_tool(ToolKind::FilledRect);

    drag(&mut editor, (10.0, 10.0), (30.0, 30.0));

    editor.update_style(StyleUpdate {
        fill_color: Some(rastermark::draw::color::RED),
        ..StyleUpdate::default()
    });
    drag(&mut editor, (60.0, 60.0), (90.0, 90.0));

    let mut composed = editor.export_composite().unwrap();
    // First rectangle keeps the fill color it was committed with
    assert_eq!(pixel(&mut composed, 20, 20), [0, 0, 0, 255]);
    // Second rectangle uses the updated fill
    assert_eq!(pixel(&mut composed, 75, 75), [0, 0, 255, 255]);
}

#[test]
fn export_mid_gesture_includes_the_provisional_layer_without_committing() {
    let mut editor = editor_with_white_base(100, 100);
    editor.set_active_tool(ToolKind::FilledRect);

    editor.pointer_down(PointerButton::Primary, 10.0, 10.0);
    editor.pointer_move(60.0, 60.0);

    let mut during = editor.export_composite().unwrap();
    assert_eq!(pixel(&mut during, 30, 30), [0, 0, 0, 255]);
    assert_eq!(pixel(&mut during, 70, 70), [255, 255, 255, 255]);

    // The gesture is still live after exporting: it keeps tracking moves
    editor.pointer_move(80.0, 80.0);
    let mut grown = editor.export_composite().unwrap();
    assert_eq!(pixel(&mut grown, 70, 70), [0, 0, 0, 255]);

    editor.pointer_up(PointerButton::Primary);
    assert_eq!(editor.layers().len(), 1);
}
