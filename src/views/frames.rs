use eframe::egui::{self, Align2, Color32, FontId, Rect, Rounding, Sense, Stroke, Vec2};

use super::PickerEvent;
use crate::app::ImageCache;
use crate::ui_constants::{frame, EMPTY_FRAME_LABEL};

const FRAME_FILL: Color32 = Color32::from_rgb(36, 36, 36);
const FRAME_HOVER_FILL: Color32 = Color32::from_rgb(48, 48, 48);
const FRAME_STROKE: Color32 = Color32::from_rgb(64, 64, 64);
const ACTIVE_STROKE: Color32 = Color32::from_rgb(90, 160, 255);

/// Largest rect with the image's aspect ratio that fits centred inside `bounds`.
pub(crate) fn fit_rect(bounds: Rect, image_size: Vec2) -> Rect {
    if image_size.x <= 0.0 || image_size.y <= 0.0 {
        return bounds;
    }
    let scale = (bounds.width() / image_size.x).min(bounds.height() / image_size.y);
    Rect::from_center_size(bounds.center(), image_size * scale)
}

/// Row of frame slots. Clicking a slot emits `ActivateSlot`.
pub fn draw_frames(
    ui: &mut egui::Ui,
    slots: &[Option<String>],
    active: Option<usize>,
    images: &ImageCache,
    events: &mut Vec<PickerEvent>,
) {
    ui.horizontal_wrapped(|ui| {
        ui.spacing_mut().item_spacing.x = frame::GAP;
        for (idx, slot) in slots.iter().enumerate() {
            let is_active = active == Some(idx);
            if draw_frame(ui, slot.as_deref(), is_active, images).clicked() {
                events.push(PickerEvent::ActivateSlot(idx));
            }
        }
    });
}

fn draw_frame(
    ui: &mut egui::Ui,
    url: Option<&str>,
    is_active: bool,
    images: &ImageCache,
) -> egui::Response {
    let (rect, resp) =
        ui.allocate_exact_size(Vec2::new(frame::WIDTH, frame::HEIGHT), Sense::click());
    let resp = resp.on_hover_cursor(egui::CursorIcon::PointingHand);
    let rounding = Rounding::same(frame::ROUNDING);
    let painter = ui.painter_at(rect);

    let fill = if resp.hovered() { FRAME_HOVER_FILL } else { FRAME_FILL };
    painter.rect_filled(rect, rounding, fill);

    let inner = rect.shrink(crate::ui_constants::spacing::SMALL);
    let text_color = ui.visuals().text_color();
    match url {
        Some(url) => {
            if let Some(tex) = images.get(url) {
                let uv = Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0));
                painter.image(tex.id(), fit_rect(inner, tex.size_vec2()), uv, Color32::WHITE);
            } else {
                let label = if images.has_failed(url) {
                    "Image unavailable"
                } else if images.is_loading(url) {
                    "Loading..."
                } else {
                    ""
                };
                painter.text(
                    rect.center(),
                    Align2::CENTER_CENTER,
                    label,
                    FontId::proportional(13.0),
                    text_color,
                );
            }
        }
        None => {
            painter.text(
                rect.center(),
                Align2::CENTER_CENTER,
                EMPTY_FRAME_LABEL,
                FontId::proportional(14.0),
                text_color,
            );
        }
    }

    let stroke = if is_active {
        Stroke::new(frame::ACTIVE_STROKE, ACTIVE_STROKE)
    } else {
        Stroke::new(1.0, FRAME_STROKE)
    };
    painter.rect_stroke(rect.shrink(stroke.width / 2.0), rounding, stroke);
    resp
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bounds() -> Rect {
        Rect::from_min_size(egui::pos2(0.0, 0.0), Vec2::new(100.0, 200.0))
    }

    #[test]
    fn wide_image_fills_width() {
        let r = fit_rect(bounds(), Vec2::new(400.0, 100.0));
        assert_eq!(r.width(), 100.0);
        assert_eq!(r.height(), 25.0);
        assert_eq!(r.center(), bounds().center());
    }

    #[test]
    fn tall_image_fills_height() {
        let r = fit_rect(bounds(), Vec2::new(50.0, 400.0));
        assert_eq!(r.height(), 200.0);
        assert_eq!(r.width(), 25.0);
    }

    #[test]
    fn degenerate_size_uses_bounds() {
        assert_eq!(fit_rect(bounds(), Vec2::ZERO), bounds());
    }
}
