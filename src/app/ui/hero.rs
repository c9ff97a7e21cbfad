use eframe::egui::{Painter, Pos2, Rect, RichText, Sense, Shape, Stroke, Ui, Vec2, vec2};

use crate::content::Profile;
use crate::theme::{Palette, Theme};
use crate::util::stable_pair;

use super::super::render_utils::{blend_color, project, with_alpha};
use super::super::signals::SignalPort;

const CHIP_HEIGHT: f32 = 340.0;
const PACKAGE_HALF: f32 = 1.0;
const PACKAGE_THICKNESS: f32 = 0.14;
const DIE_HALF: f32 = 0.55;
const DIE_CELLS: usize = 6;
const PINS_PER_SIDE: usize = 8;
const PIN_LENGTH: f32 = 0.22;
const TILT_FOLLOW: f32 = 0.12;

pub(super) fn draw_hero(
    ui: &mut Ui,
    profile: &Profile,
    port: &mut SignalPort<'_>,
    palette: &Palette,
    theme: Theme,
    tilt: &mut Vec2,
    now: f64,
) {
    let width = ui.available_width();

    ui.horizontal_top(|ui| {
        ui.vertical(|ui| {
            ui.set_width(width * 0.5);
            ui.add_space(72.0);
            ui.label(
                RichText::new(profile.title.as_str())
                    .monospace()
                    .color(palette.accent),
            );
            ui.label(
                RichText::new(profile.name.as_str())
                    .size(44.0)
                    .strong()
                    .color(palette.text),
            );
            ui.add_space(8.0);
            ui.label(
                RichText::new(profile.tagline.as_str())
                    .size(18.0)
                    .color(palette.muted),
            );
            ui.add_space(16.0);
            ui.label(profile.summary.as_str());
            ui.add_space(12.0);
            ui.label(RichText::new("click the die to fire a signal").small().weak());
        });

        let size = vec2(ui.available_width(), CHIP_HEIGHT);
        let (rect, response) = ui.allocate_exact_size(size, Sense::click());

        let target_tilt = response
            .hover_pos()
            .map(|pointer| {
                let offset = (pointer - rect.center()) / (rect.size() * 0.5);
                vec2(offset.x.clamp(-1.0, 1.0) * 0.35, offset.y.clamp(-1.0, 1.0) * 0.25)
            })
            .unwrap_or(Vec2::ZERO);
        *tilt += (target_tilt - *tilt) * TILT_FOLLOW;

        let die = draw_chip(&ui.painter_at(rect), rect, now, *tilt, palette, theme);
        if response.clicked() {
            port.emit(die, palette.accent);
        }
    });
}

fn draw_chip(painter: &Painter, rect: Rect, now: f64, tilt: Vec2, palette: &Palette, theme: Theme) -> Rect {
    let yaw = (now as f32 * 0.35).sin() * 0.5 + 0.6 + tilt.x;
    let pitch = 0.65 + tilt.y;
    let center = rect.center();
    let scale = rect.width().min(rect.height()) * 0.32;
    let point = |x: f32, y: f32, z: f32| project([x, y, z], yaw, pitch, center, scale);

    let wireframe = theme == Theme::Silicon;
    let edge = Stroke::new(1.2, palette.chip_edge);
    let corners = [
        (-PACKAGE_HALF, -PACKAGE_HALF),
        (PACKAGE_HALF, -PACKAGE_HALF),
        (PACKAGE_HALF, PACKAGE_HALF),
        (-PACKAGE_HALF, PACKAGE_HALF),
    ];
    let top: Vec<Pos2> = corners
        .iter()
        .map(|&(x, z)| point(x, PACKAGE_THICKNESS, z))
        .collect();
    let bottom: Vec<Pos2> = corners
        .iter()
        .map(|&(x, z)| point(x, -PACKAGE_THICKNESS, z))
        .collect();

    if !wireframe {
        painter.add(Shape::convex_polygon(
            bottom.clone(),
            blend_color(palette.chip_body, palette.background, 0.45),
            Stroke::NONE,
        ));
    } else {
        painter.add(Shape::closed_line(bottom.clone(), Stroke::new(1.0, with_alpha(palette.chip_edge, 0.4))));
    }
    for (upper, lower) in top.iter().zip(&bottom) {
        painter.line_segment([*upper, *lower], edge);
    }

    let pin = Stroke::new(if wireframe { 1.0 } else { 2.4 }, palette.pin);
    for side in 0..4 {
        for index in 0..PINS_PER_SIDE {
            let t = ((index as f32 + 0.5) / PINS_PER_SIDE as f32 * 2.0 - 1.0) * 0.85;
            let (base, tip) = match side {
                0 => ((t, -PACKAGE_HALF), (t, -PACKAGE_HALF - PIN_LENGTH)),
                1 => ((PACKAGE_HALF, t), (PACKAGE_HALF + PIN_LENGTH, t)),
                2 => ((t, PACKAGE_HALF), (t, PACKAGE_HALF + PIN_LENGTH)),
                _ => ((-PACKAGE_HALF, t), (-PACKAGE_HALF - PIN_LENGTH, t)),
            };
            painter.line_segment(
                [point(base.0, 0.0, base.1), point(tip.0, -PACKAGE_THICKNESS, tip.1)],
                pin,
            );
        }
    }

    if wireframe {
        painter.add(Shape::closed_line(top.clone(), edge));
    } else {
        painter.add(Shape::convex_polygon(top.clone(), palette.chip_body, edge));
    }

    let surface = PACKAGE_THICKNESS + 0.001;
    let cell = DIE_HALF * 2.0 / DIE_CELLS as f32;
    let mut die_points = Vec::with_capacity(DIE_CELLS * DIE_CELLS * 4);
    for row in 0..DIE_CELLS {
        for column in 0..DIE_CELLS {
            let x0 = -DIE_HALF + column as f32 * cell;
            let z0 = -DIE_HALF + row as f32 * cell;
            let quad = vec![
                point(x0, surface, z0),
                point(x0 + cell, surface, z0),
                point(x0 + cell, surface, z0 + cell),
                point(x0, surface, z0 + cell),
            ];
            die_points.extend_from_slice(&quad);

            let (phase, density) = stable_pair(("die", row, column));
            let pulse = ((now as f32 * 2.0 + phase * 3.0).sin() + 1.0) * 0.5;
            let level = (0.25 + density.abs() * 0.5) * (0.6 + pulse * 0.4);
            if wireframe {
                painter.add(Shape::closed_line(quad, Stroke::new(0.8, with_alpha(palette.accent, level))));
            } else {
                painter.add(Shape::convex_polygon(
                    quad,
                    with_alpha(palette.accent, level * 0.55),
                    Stroke::new(0.5, with_alpha(palette.chip_edge, 0.5)),
                ));
            }
        }
    }

    Rect::from_points(&die_points)
}
