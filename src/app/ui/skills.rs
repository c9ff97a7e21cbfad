use eframe::egui::{Align2, FontId, Rect, RichText, Sense, Stroke, StrokeKind, Ui, pos2, vec2};

use crate::content::{Skill, SkillGroup};
use crate::signal::TargetCategory;
use crate::theme::Palette;

use super::super::render_utils::with_alpha;
use super::super::signals::SignalPort;
use super::section_heading;

const ROW_HEIGHT: f32 = 26.0;
const NODE_RADIUS: f32 = 5.0;

pub(super) fn draw_skills(
    ui: &mut Ui,
    groups: &[SkillGroup],
    port: &mut SignalPort<'_>,
    palette: &Palette,
) {
    section_heading(ui, "Skills", "// coverage report", palette);

    let column_count = groups.len().clamp(1, 2);
    let mut slot = 0;
    ui.columns(column_count, |columns| {
        for (group_index, group) in groups.iter().enumerate() {
            let ui = &mut columns[group_index % column_count];
            ui.label(RichText::new(group.name.as_str()).strong().color(palette.muted));
            ui.add_space(4.0);
            for skill in &group.skills {
                draw_skill_row(ui, skill, slot, port, palette);
                slot += 1;
            }
            ui.add_space(18.0);
        }
    });
}

fn draw_skill_row(ui: &mut Ui, skill: &Skill, slot: usize, port: &mut SignalPort<'_>, palette: &Palette) {
    let (rect, _) = ui.allocate_exact_size(vec2(ui.available_width(), ROW_HEIGHT), Sense::hover());
    let node = pos2(rect.left() + 10.0, rect.center().y);
    let lit = port.mount(
        TargetCategory::Skills,
        slot,
        Rect::from_center_size(node, vec2(NODE_RADIUS * 2.0, NODE_RADIUS * 2.0)),
    );

    let painter = ui.painter();
    let ink = if lit { palette.highlight } else { palette.accent };
    if lit {
        painter.rect_filled(rect, 4.0, with_alpha(palette.highlight, 0.12));
        painter.rect_stroke(rect, 4.0, Stroke::new(1.0, palette.highlight), StrokeKind::Inside);
        painter.circle_filled(node, NODE_RADIUS * 1.5, ink);
    } else {
        painter.circle_stroke(node, NODE_RADIUS, Stroke::new(1.2, ink));
    }

    painter.text(
        pos2(rect.left() + 24.0, rect.center().y),
        Align2::LEFT_CENTER,
        skill.name.as_str(),
        FontId::proportional(14.0),
        if lit { palette.highlight } else { palette.text },
    );

    let bar_left = rect.left() + rect.width() * 0.55;
    let bar_right = rect.right() - 44.0;
    if bar_right > bar_left {
        let track = Rect::from_min_max(
            pos2(bar_left, rect.center().y - 3.0),
            pos2(bar_right, rect.center().y + 3.0),
        );
        painter.rect_filled(track, 3.0, with_alpha(palette.muted, 0.25));
        let filled = track.left() + track.width() * f32::from(skill.level) / 100.0;
        painter.rect_filled(
            Rect::from_min_max(track.min, pos2(filled, track.max.y)),
            3.0,
            ink,
        );
    }
    painter.text(
        pos2(rect.right() - 4.0, rect.center().y),
        Align2::RIGHT_CENTER,
        format!("{}%", skill.level),
        FontId::monospace(12.0),
        palette.muted,
    );
}
