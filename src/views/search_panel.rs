use eframe::egui::{self, Align2, Color32, FontId, RichText, Rounding, Sense, TextEdit, Vec2};

use super::PickerEvent;
use crate::app::ImageCache;
use crate::picker::SearchSession;
use crate::search::SearchResult;
use crate::ui_constants::{results, spacing, SEARCH_HINT};

const ROW_HOVER_FILL: Color32 = Color32::from_rgb(48, 48, 48);
const THUMB_PLACEHOLDER: Color32 = Color32::from_rgb(58, 58, 58);

/// Search box, status line and clickable result list of the active slot.
/// - `focus`: move keyboard focus into the box this frame
/// - `reveal_results`: scroll the result area into view (new results arrived)
pub fn draw_search_panel(
    ui: &mut egui::Ui,
    session: &SearchSession,
    images: &ImageCache,
    focus: bool,
    reveal_results: bool,
    events: &mut Vec<PickerEvent>,
) {
    ui.add_space(spacing::LARGE);

    let mut text = session.query.clone();
    let w = ui.available_width().min(480.0);
    let resp = ui.add_sized(
        [w, 0.0],
        TextEdit::singleline(&mut text)
            .id(egui::Id::new("frame_search_input"))
            .hint_text(SEARCH_HINT),
    );
    if focus {
        resp.request_focus();
    }
    if resp.changed() {
        events.push(PickerEvent::QueryChanged(text));
    }
    // Singleline edits drop focus when Enter is pressed; take it back so the
    // query can be refined right away.
    if resp.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
        events.push(PickerEvent::Submit);
        resp.request_focus();
    }

    ui.add_space(spacing::MEDIUM);
    let status = ui.label(RichText::new(session.status.label()).small().strong());
    if reveal_results {
        status.scroll_to_me(Some(egui::Align::TOP));
    }

    ui.add_space(spacing::SMALL);
    for result in &session.results {
        if draw_result_row(ui, result, images, w).clicked() {
            events.push(PickerEvent::Select(result.clone()));
        }
    }
}

fn draw_result_row(
    ui: &mut egui::Ui,
    result: &SearchResult,
    images: &ImageCache,
    width: f32,
) -> egui::Response {
    let row_h = results::THUMB_SIZE + spacing::SMALL * 2.0;
    let (rect, resp) = ui.allocate_exact_size(Vec2::new(width, row_h), Sense::click());
    let resp = resp
        .on_hover_cursor(egui::CursorIcon::PointingHand)
        .on_hover_text(result.name.as_str());
    let painter = ui.painter_at(rect);

    if resp.hovered() {
        painter.rect_filled(rect, Rounding::same(results::ROUNDING), ROW_HOVER_FILL);
    }

    let thumb_rect = egui::Rect::from_min_size(
        rect.min + Vec2::splat(spacing::SMALL),
        Vec2::splat(results::THUMB_SIZE),
    );
    match images.get(&result.icon_url) {
        Some(tex) => {
            let uv = egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0));
            let fitted = super::frames::fit_rect(thumb_rect, tex.size_vec2());
            painter.image(tex.id(), fitted, uv, Color32::WHITE);
        }
        None => {
            painter.rect_filled(
                thumb_rect,
                Rounding::same(results::ROUNDING),
                THUMB_PLACEHOLDER,
            );
        }
    }

    painter.text(
        egui::pos2(thumb_rect.max.x + spacing::MEDIUM, rect.center().y),
        Align2::LEFT_CENTER,
        &result.name,
        FontId::proportional(14.0),
        ui.visuals().text_color(),
    );
    resp
}
