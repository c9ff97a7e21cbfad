use std::collections::HashMap;

use eframe::egui::{self, Align2, Color32, Context, Id, Key, Order, Sense, Stroke, pos2, vec2};

use crate::page::Section;
use crate::signal::ease_in_out;
use crate::theme::Palette;

const SCROLL_SECS: f64 = 0.6;
// Fraction of the viewport height below its top edge that decides the current section.
const SECTION_REFERENCE: f32 = 0.3;

#[derive(Clone, Copy, Debug, PartialEq)]
struct ScrollAnimation {
    from: f32,
    to: f32,
    started_at: f64,
}

impl ScrollAnimation {
    fn offset_at(&self, now: f64) -> f32 {
        let t = ((now - self.started_at) / SCROLL_SECS).clamp(0.0, 1.0) as f32;
        self.from + (self.to - self.from) * ease_in_out(t)
    }

    fn done(&self, now: f64) -> bool {
        now >= self.started_at + SCROLL_SECS
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(super) enum NavRequest {
    Goto(Section),
    Next,
    Previous,
    ToggleTerminal,
    OpenPalette,
    CloseOverlays,
}

#[derive(Debug, Default)]
pub(super) struct Navigator {
    section_tops: HashMap<Section, f32>,
    scroll_offset: f32,
    viewport_height: f32,
    animation: Option<ScrollAnimation>,
    pending: Option<Section>,
}

impl Navigator {
    pub(super) fn record_section(&mut self, section: Section, page_top: f32) {
        self.section_tops.insert(section, page_top);
    }

    pub(super) fn observe_scroll(&mut self, offset: f32, viewport_height: f32) {
        self.scroll_offset = offset;
        self.viewport_height = viewport_height;
    }

    pub(super) fn current_section(&self) -> Section {
        let reference = self.scroll_offset + self.viewport_height * SECTION_REFERENCE;
        Section::ALL
            .into_iter()
            .filter(|section| {
                self.section_tops
                    .get(section)
                    .is_some_and(|top| *top <= reference)
            })
            .last()
            .unwrap_or(Section::Hero)
    }

    pub(super) fn scroll_to(&mut self, section: Section, now: f64) {
        let Some(&top) = self.section_tops.get(&section) else {
            self.pending = Some(section);
            return;
        };
        self.pending = None;
        log::debug!("scrolling to #{}", section.anchor());
        self.animation = Some(ScrollAnimation {
            from: self.scroll_offset,
            to: top,
            started_at: now,
        });
    }

    pub(super) fn forced_offset(&mut self, now: f64) -> Option<f32> {
        if let Some(section) = self.pending {
            self.scroll_to(section, now);
        }
        let animation = self.animation?;
        if animation.done(now) {
            self.animation = None;
            return Some(animation.to);
        }
        Some(animation.offset_at(now))
    }

    pub(super) fn is_animating(&self) -> bool {
        self.animation.is_some() || self.pending.is_some()
    }

    pub(super) fn apply(&mut self, request: NavRequest, now: f64) {
        match request {
            NavRequest::Goto(section) => self.scroll_to(section, now),
            NavRequest::Next => self.scroll_to(self.current_section().next(), now),
            NavRequest::Previous => self.scroll_to(self.current_section().previous(), now),
            NavRequest::ToggleTerminal | NavRequest::OpenPalette | NavRequest::CloseOverlays => {}
        }
    }
}

pub(super) fn read_nav_keys(ctx: &Context, overlay_open: bool) -> Vec<NavRequest> {
    let typing = ctx.wants_keyboard_input();
    ctx.input(|input| {
        let mut requests = Vec::new();

        if input.key_pressed(Key::Escape) {
            requests.push(NavRequest::CloseOverlays);
        }
        if input.modifiers.command && input.key_pressed(Key::K) {
            requests.push(NavRequest::OpenPalette);
        }
        if typing {
            return requests;
        }
        if input.key_pressed(Key::Backtick) {
            requests.push(NavRequest::ToggleTerminal);
        }
        if overlay_open {
            return requests;
        }
        if input.key_pressed(Key::Colon) {
            requests.push(NavRequest::OpenPalette);
        }
        if input.key_pressed(Key::J) || input.key_pressed(Key::ArrowDown) || input.key_pressed(Key::PageDown) {
            requests.push(NavRequest::Next);
        }
        if (input.key_pressed(Key::K) && !input.modifiers.command)
            || input.key_pressed(Key::ArrowUp)
            || input.key_pressed(Key::PageUp)
        {
            requests.push(NavRequest::Previous);
        }
        let digits = [Key::Num1, Key::Num2, Key::Num3, Key::Num4, Key::Num5];
        for (key, section) in digits.into_iter().zip(Section::ALL) {
            if input.key_pressed(key) {
                requests.push(NavRequest::Goto(section));
            }
        }
        requests
    })
}

pub(super) fn draw_section_rail(ctx: &Context, current: Section, palette: &Palette) -> Option<Section> {
    const DOT_SPACING: f32 = 22.0;

    let mut clicked = None;
    egui::Area::new(Id::new("section_rail"))
        .order(Order::Foreground)
        .anchor(Align2::RIGHT_CENTER, vec2(-14.0, 0.0))
        .show(ctx, |ui| {
            let size = vec2(16.0, DOT_SPACING * Section::ALL.len() as f32);
            let (rect, _) = ui.allocate_exact_size(size, Sense::hover());
            for (index, section) in Section::ALL.into_iter().enumerate() {
                let center = pos2(rect.center().x, rect.top() + DOT_SPACING * (index as f32 + 0.5));
                let dot_rect = egui::Rect::from_center_size(center, vec2(14.0, 14.0));
                let response = ui
                    .interact(dot_rect, Id::new(("section_dot", index)), Sense::click())
                    .on_hover_text(section.title());
                let active = section == current;
                let radius = if active || response.hovered() { 5.0 } else { 3.5 };
                let color = if active { palette.accent } else { palette.muted };
                ui.painter().circle(
                    center,
                    radius,
                    if active { color } else { Color32::TRANSPARENT },
                    Stroke::new(1.2, color),
                );
                if response.clicked() {
                    clicked = Some(section);
                }
            }
        });
    clicked
}
