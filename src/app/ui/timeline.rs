use eframe::egui::{Align2, Color32, FontId, Pos2, Rect, RichText, Sense, Shape, Stroke, Ui, pos2, vec2};

use crate::commands::CommandEffect;
use crate::content::{CareerEntry, PortfolioContent};
use crate::signal::TargetCategory;
use crate::theme::Palette;
use crate::util::current_year;

use super::super::render_utils::with_alpha;
use super::super::signals::SignalPort;
use super::section_heading;

const MARKER_SIZE: f32 = 28.0;
const LANE_HEIGHT: f32 = 46.0;
const LANE_PADDING: f32 = 10.0;
const AXIS_HEIGHT: f32 = 24.0;
const LABEL_WIDTH: f32 = 190.0;

pub(super) fn draw_timeline(
    ui: &mut Ui,
    content: &PortfolioContent,
    waveform: bool,
    port: &mut SignalPort<'_>,
    palette: &Palette,
) -> Option<CommandEffect> {
    section_heading(ui, "Timeline", "// career trace", palette);

    let mut effect = None;
    ui.horizontal(|ui| {
        if ui.selectable_label(!waveform, "List").clicked() && waveform {
            effect = Some(CommandEffect::ToggleWaveform);
        }
        if ui.selectable_label(waveform, "Waveform").clicked() && !waveform {
            effect = Some(CommandEffect::ToggleWaveform);
        }
    });
    ui.add_space(12.0);

    if waveform {
        draw_waveform(ui, content, port, palette);
    } else {
        draw_entries(ui, &content.career, port, palette);
    }
    effect
}

fn draw_entries(ui: &mut Ui, career: &[CareerEntry], port: &mut SignalPort<'_>, palette: &Palette) {
    let mut previous: Option<Pos2> = None;

    for (slot, entry) in career.iter().enumerate() {
        ui.horizontal_top(|ui| {
            let (marker, _) = ui.allocate_exact_size(vec2(MARKER_SIZE, MARKER_SIZE), Sense::hover());
            let lit = port.mount(TargetCategory::Trace, slot, marker);

            let painter = ui.painter();
            let center = marker.center();
            if let Some(above) = previous {
                painter.line_segment(
                    [above + vec2(0.0, 8.0), center - vec2(0.0, 8.0)],
                    Stroke::new(1.5, with_alpha(palette.muted, 0.5)),
                );
            }
            if lit {
                painter.circle_filled(center, 8.0, palette.highlight);
            } else {
                painter.circle(center, 5.0, palette.background, Stroke::new(1.5, palette.accent));
            }
            previous = Some(center);

            ui.vertical(|ui| {
                ui.label(
                    RichText::new(entry.span_label())
                        .monospace()
                        .color(palette.muted),
                );
                ui.label(
                    RichText::new(format!("{} @ {}", entry.role, entry.company))
                        .size(17.0)
                        .strong()
                        .color(if lit { palette.highlight } else { palette.text }),
                );
                ui.label(entry.summary.as_str());
                for highlight in &entry.highlights {
                    ui.label(format!("- {highlight}"));
                }
            });
        });
        ui.add_space(18.0);
    }
}

fn year_to_x(year: u16, (first, last): (u16, u16), left: f32, right: f32) -> f32 {
    let span = f32::from(last.saturating_sub(first).max(1));
    let t = (f32::from(year.clamp(first, last)) - f32::from(first)) / span;
    left + t * (right - left)
}

fn draw_waveform(ui: &mut Ui, content: &PortfolioContent, port: &mut SignalPort<'_>, palette: &Palette) {
    let Some(span) = content.career_span(current_year()) else {
        ui.label(RichText::new("no trace data").weak());
        return;
    };

    let lanes = content.career.len() as f32;
    let size = vec2(ui.available_width(), AXIS_HEIGHT + LANE_HEIGHT * lanes);
    let (rect, _) = ui.allocate_exact_size(size, Sense::hover());
    let painter = ui.painter_at(rect);

    let plot_left = rect.left() + LABEL_WIDTH;
    let plot_right = (rect.right() - 12.0).max(plot_left + 1.0);
    let grid = Stroke::new(1.0, with_alpha(palette.muted, 0.25));
    let year_step = usize::from((span.1 - span.0) / 10).max(1);

    for year in (span.0..=span.1).step_by(year_step) {
        let x = year_to_x(year, span, plot_left, plot_right);
        painter.line_segment([pos2(x, rect.top() + AXIS_HEIGHT - 4.0), pos2(x, rect.bottom())], grid);
        painter.text(
            pos2(x, rect.top()),
            Align2::CENTER_TOP,
            format!("'{:02}", year % 100),
            FontId::monospace(11.0),
            palette.muted,
        );
    }

    for (slot, entry) in content.career.iter().enumerate() {
        let lane_top = rect.top() + AXIS_HEIGHT + LANE_HEIGHT * slot as f32;
        let high = lane_top + LANE_PADDING;
        let low = lane_top + LANE_HEIGHT - LANE_PADDING;
        let rise = year_to_x(entry.start_year, span, plot_left, plot_right);
        let fall = year_to_x(entry.end_year.unwrap_or(span.1), span, plot_left, plot_right).max(rise + 4.0);

        let pulse = Rect::from_min_max(pos2(rise, high), pos2(fall, low));
        let lit = port.mount(TargetCategory::Trace, slot, pulse);
        let (color, width) = if lit {
            (palette.highlight, 2.5)
        } else {
            (palette.accent, 1.5)
        };
        if lit {
            painter.rect_filled(pulse, 0.0, with_alpha(palette.highlight, 0.15));
        }

        painter.add(Shape::line(
            vec![
                pos2(plot_left, low),
                pos2(rise, low),
                pos2(rise, high),
                pos2(fall, high),
                pos2(fall, low),
                pos2(plot_right, low),
            ],
            Stroke::new(width, color),
        ));
        painter.text(
            pos2(rect.left(), (high + low) * 0.5),
            Align2::LEFT_CENTER,
            lane_label(entry),
            FontId::monospace(12.0),
            if lit { palette.highlight } else { palette.text },
        );
    }

    painter.line_segment(
        [pos2(plot_left, rect.top() + AXIS_HEIGHT - 4.0), pos2(plot_left, rect.bottom())],
        Stroke::new(1.0, Color32::from_gray(120)),
    );
}

fn lane_label(entry: &CareerEntry) -> String {
    let mut label = format!("{}.{}", entry.company, entry.role)
        .to_ascii_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("_");
    if label.len() > 24 {
        let cut = (0..=21).rev().find(|&index| label.is_char_boundary(index)).unwrap_or(0);
        label.truncate(cut);
        label.push_str("...");
    }
    label
}
