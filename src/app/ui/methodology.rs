use eframe::egui::{Frame, RichText, Sense, Stroke, Ui};

use crate::content::Methodology;
use crate::theme::Palette;

use super::super::render_utils::with_alpha;
use super::super::signals::SignalPort;
use super::section_heading;

const CARD_MIN_HEIGHT: f32 = 150.0;

pub(super) fn draw_methodology(
    ui: &mut Ui,
    cards: &[Methodology],
    hovered: &mut [bool],
    port: &mut SignalPort<'_>,
    palette: &Palette,
) {
    section_heading(ui, "Methodology", "// plan, constrain, close coverage", palette);
    if cards.is_empty() {
        return;
    }

    ui.columns(cards.len(), |columns| {
        for ((column, card), was_hovered) in columns.iter_mut().zip(cards).zip(hovered.iter_mut()) {
            let response = Frame::group(column.style())
                .stroke(Stroke::new(1.0, with_alpha(card.color, 0.7)))
                .show(column, |ui| {
                    ui.set_min_height(CARD_MIN_HEIGHT);
                    ui.label(
                        RichText::new(card.title.as_str())
                            .size(18.0)
                            .strong()
                            .color(card.color),
                    );
                    ui.add_space(6.0);
                    ui.label(card.body.as_str());
                })
                .response
                .interact(Sense::click());

            let hovered_now = response.hovered();
            if (hovered_now && !*was_hovered) || response.clicked() {
                port.emit(response.rect, card.color);
            }
            *was_hovered = hovered_now;
        }
    });
}
