use juxta_core::crop::CropColor;

use super::helpers::crop_color32;
use crate::state::EditorUi;

/// Smallest selection side, in display pixels.
const MIN_SELECTION: f32 = 2.0;

/// Convert screen coordinates to reference display coordinates.
pub fn screen_to_image(
    pos: egui::Pos2,
    img_rect: egui::Rect,
    image_size: egui::Vec2,
) -> egui::Pos2 {
    egui::pos2(
        (pos.x - img_rect.left()) / img_rect.width() * image_size.x,
        (pos.y - img_rect.top()) / img_rect.height() * image_size.y,
    )
}

/// Convert reference display coordinates to screen coordinates.
fn image_to_screen(
    pos: egui::Pos2,
    img_rect: egui::Rect,
    image_size: egui::Vec2,
) -> egui::Pos2 {
    egui::pos2(
        pos.x / image_size.x * img_rect.width() + img_rect.left(),
        pos.y / image_size.y * img_rect.height() + img_rect.top(),
    )
}

/// Handle selection input: drag to create or move, and set cursor icons.
/// Returns true when a drag finished and the selection may have changed.
pub fn handle_crop_interaction(
    ctx: &egui::Context,
    response: &egui::Response,
    ui: &egui::Ui,
    editor: &mut EditorUi,
    image_size: egui::Vec2,
) -> bool {
    let finished = handle_crop_drag(response, ui, editor, image_size);
    update_crop_cursor(ctx, response, ui, editor, image_size);
    finished
}

fn handle_crop_drag(
    response: &egui::Response,
    ui: &egui::Ui,
    editor: &mut EditorUi,
    image_size: egui::Vec2,
) -> bool {
    let img_rect = response.rect;

    if response.dragged_by(egui::PointerButton::Primary) {
        if editor.drag_start.is_none() && !editor.moving {
            detect_drag_start(response, editor, img_rect, image_size);
        }

        if editor.moving {
            move_existing_selection(ui, editor, img_rect, image_size);
        } else if editor.drag_start.is_some() {
            create_new_selection(ui, editor, img_rect, image_size);
        }
    }

    if response.drag_stopped_by(egui::PointerButton::Primary) {
        editor.drag_start = None;
        editor.moving = false;
        editor.move_offset = None;
        return true;
    }
    false
}

fn detect_drag_start(
    response: &egui::Response,
    editor: &mut EditorUi,
    img_rect: egui::Rect,
    image_size: egui::Vec2,
) {
    let Some(pos) = response.interact_pointer_pos() else {
        return;
    };
    let img_pos = screen_to_image(pos, img_rect, image_size);

    match editor.selection {
        Some(sel) if sel.contains(img_pos) => {
            editor.moving = true;
            editor.move_offset = Some(img_pos - sel.min);
        }
        _ => editor.drag_start = Some(img_pos),
    }
}

fn move_existing_selection(
    ui: &egui::Ui,
    editor: &mut EditorUi,
    img_rect: egui::Rect,
    image_size: egui::Vec2,
) {
    let (Some(offset), Some(current)) = (editor.move_offset, ui.input(|i| i.pointer.hover_pos())) else {
        return;
    };
    let img_pos = screen_to_image(current, img_rect, image_size);
    if let Some(ref mut sel) = editor.selection {
        let size = sel.size();
        let x = (img_pos.x - offset.x).max(0.0).min(image_size.x - size.x);
        let y = (img_pos.y - offset.y).max(0.0).min(image_size.y - size.y);
        *sel = egui::Rect::from_min_size(egui::pos2(x, y), size);
    }
}

fn create_new_selection(
    ui: &egui::Ui,
    editor: &mut EditorUi,
    img_rect: egui::Rect,
    image_size: egui::Vec2,
) {
    let (Some(start), Some(current)) = (editor.drag_start, ui.input(|i| i.pointer.hover_pos())) else {
        return;
    };
    let img_current = screen_to_image(current, img_rect, image_size);

    if let Some(r) = compute_free_rect(start, img_current, image_size) {
        editor.selection = Some(r);
    }
}

fn compute_free_rect(
    img_start: egui::Pos2,
    img_current: egui::Pos2,
    image_size: egui::Vec2,
) -> Option<egui::Rect> {
    let x_min = img_start.x.min(img_current.x).max(0.0);
    let y_min = img_start.y.min(img_current.y).max(0.0);
    let x_max = img_start.x.max(img_current.x).min(image_size.x);
    let y_max = img_start.y.max(img_current.y).min(image_size.y);

    if x_max - x_min >= MIN_SELECTION && y_max - y_min >= MIN_SELECTION {
        Some(egui::Rect::from_min_max(
            egui::pos2(x_min, y_min),
            egui::pos2(x_max, y_max),
        ))
    } else {
        None
    }
}

fn update_crop_cursor(
    ctx: &egui::Context,
    response: &egui::Response,
    ui: &egui::Ui,
    editor: &EditorUi,
    image_size: egui::Vec2,
) {
    if editor.moving {
        ctx.set_cursor_icon(egui::CursorIcon::Grabbing);
        return;
    }

    if let Some(hover) = ui.input(|i| i.pointer.hover_pos()) {
        if response.rect.contains(hover) {
            let img_pos = screen_to_image(hover, response.rect, image_size);
            let inside = editor.selection.is_some_and(|sel| sel.contains(img_pos));
            if inside {
                ctx.set_cursor_icon(egui::CursorIcon::Grab);
            } else {
                ctx.set_cursor_icon(egui::CursorIcon::Crosshair);
            }
        }
    }
}

/// Draw the selection overlay (dim regions, border in the crop colour, size label).
pub fn draw_crop_overlay(
    ui: &egui::Ui,
    selection: egui::Rect,
    color: CropColor,
    img_rect: egui::Rect,
    image_size: egui::Vec2,
    original_size: (u32, u32),
) {
    let crop_screen = egui::Rect::from_min_max(
        image_to_screen(selection.min, img_rect, image_size),
        image_to_screen(selection.max, img_rect, image_size),
    );

    draw_dim_regions(ui, img_rect, crop_screen);
    draw_crop_border(ui, crop_screen, crop_color32(color));
    draw_dimensions_label(ui, selection, crop_screen, image_size, original_size);
}

fn draw_dim_regions(ui: &egui::Ui, img_rect: egui::Rect, crop_screen: egui::Rect) {
    let dim_color = egui::Color32::from_black_alpha(140);
    let painter = ui.painter();

    // Top
    painter.rect_filled(
        egui::Rect::from_min_max(img_rect.left_top(), egui::pos2(img_rect.right(), crop_screen.top())),
        0.0,
        dim_color,
    );
    // Bottom
    painter.rect_filled(
        egui::Rect::from_min_max(egui::pos2(img_rect.left(), crop_screen.bottom()), img_rect.right_bottom()),
        0.0,
        dim_color,
    );
    // Left
    painter.rect_filled(
        egui::Rect::from_min_max(
            egui::pos2(img_rect.left(), crop_screen.top()),
            egui::pos2(crop_screen.left(), crop_screen.bottom()),
        ),
        0.0,
        dim_color,
    );
    // Right
    painter.rect_filled(
        egui::Rect::from_min_max(
            egui::pos2(crop_screen.right(), crop_screen.top()),
            egui::pos2(img_rect.right(), crop_screen.bottom()),
        ),
        0.0,
        dim_color,
    );
}

fn draw_crop_border(ui: &egui::Ui, crop_screen: egui::Rect, color: egui::Color32) {
    ui.painter().rect_stroke(
        crop_screen,
        0.0,
        egui::Stroke::new(2.0, color),
        egui::epaint::StrokeKind::Outside,
    );
}

/// Label the selection with its size in original image pixels.
fn draw_dimensions_label(
    ui: &egui::Ui,
    selection: egui::Rect,
    crop_screen: egui::Rect,
    image_size: egui::Vec2,
    original_size: (u32, u32),
) {
    let sx = original_size.0 as f32 / image_size.x;
    let sy = original_size.1 as f32 / image_size.y;
    let label = format!(
        "{}x{}",
        (selection.width() * sx).round() as u32,
        (selection.height() * sy).round() as u32
    );
    let label_pos = egui::pos2(crop_screen.right() - 4.0, crop_screen.bottom() + 4.0);
    ui.painter().text(
        label_pos,
        egui::Align2::RIGHT_TOP,
        label,
        egui::FontId::proportional(12.0),
        egui::Color32::WHITE,
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_free_rect_is_clamped_to_image() {
        let r = compute_free_rect(
            egui::pos2(-10.0, 50.0),
            egui::pos2(100.0, 500.0),
            egui::vec2(420.0, 210.0),
        )
        .unwrap();
        assert_eq!(r.min, egui::pos2(0.0, 50.0));
        assert_eq!(r.max, egui::pos2(100.0, 210.0));
    }

    #[test]
    fn test_free_rect_rejects_tiny_drag() {
        assert!(compute_free_rect(egui::pos2(5.0, 5.0), egui::pos2(6.0, 30.0), egui::vec2(420.0, 420.0)).is_none());
    }

    #[test]
    fn test_screen_to_image_scales_into_display_space() {
        let img_rect = egui::Rect::from_min_size(egui::pos2(100.0, 50.0), egui::vec2(210.0, 105.0));
        let p = screen_to_image(egui::pos2(205.0, 102.5), img_rect, egui::vec2(420.0, 210.0));
        assert_eq!(p, egui::pos2(210.0, 105.0));
    }
}
