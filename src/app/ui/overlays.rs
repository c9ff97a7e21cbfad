use eframe::egui::{
    self, Align2, Color32, Context, Frame, Id, Key, Order, RichText, ScrollArea, TextEdit, TextStyle, vec2,
};

use crate::commands::{CommandEffect, LineKind};

use super::super::ViewModel;

const ERROR_COLOR: Color32 = Color32::from_rgb(248, 113, 113);
const PALETTE_WIDTH: f32 = 460.0;

impl ViewModel {
    pub(in crate::app) fn draw_overlays(&mut self, ctx: &Context, now: f64) {
        if self.terminal_open {
            self.draw_terminal(ctx, now);
        }
        if self.palette_open {
            self.draw_palette(ctx, now);
        }
    }

    fn draw_terminal(&mut self, ctx: &Context, now: f64) {
        let palette = self.theme.palette();
        let mut open = true;
        let mut submitted = None;

        egui::Window::new("terminal")
            .id(Id::new("terminal_window"))
            .open(&mut open)
            .collapsible(false)
            .default_size(vec2(620.0, 360.0))
            .show(ctx, |ui| {
                ScrollArea::vertical()
                    .id_salt("terminal_history")
                    .max_height((ui.available_height() - 32.0).max(80.0))
                    .auto_shrink([false, false])
                    .stick_to_bottom(self.terminal_stick_to_bottom)
                    .show(ui, |ui| {
                        for line in self.terminal.history() {
                            let color = match line.kind {
                                LineKind::Input => palette.accent,
                                LineKind::Output => palette.text,
                                LineKind::Error => ERROR_COLOR,
                            };
                            ui.label(RichText::new(line.text.as_str()).monospace().color(color));
                        }
                    });

                ui.separator();
                ui.horizontal(|ui| {
                    ui.label(
                        RichText::new(self.terminal.prompt())
                            .monospace()
                            .color(palette.accent),
                    );
                    let response = ui.add(
                        TextEdit::singleline(&mut self.terminal_input)
                            .id(Id::new("terminal_input"))
                            .font(TextStyle::Monospace)
                            .frame(false)
                            .desired_width(f32::INFINITY),
                    );

                    if response.lost_focus() && ui.input(|input| input.key_pressed(Key::Enter)) {
                        submitted = Some(std::mem::take(&mut self.terminal_input));
                    }
                    if response.has_focus() {
                        let (up, down) = ui.input(|input| {
                            (input.key_pressed(Key::ArrowUp), input.key_pressed(Key::ArrowDown))
                        });
                        let recalled = if up {
                            self.terminal.recall_previous()
                        } else if down {
                            self.terminal.recall_next()
                        } else {
                            None
                        };
                        if let Some(line) = recalled {
                            self.terminal_input = line.to_owned();
                        }
                    } else {
                        response.request_focus();
                    }
                });
            });

        if !open {
            self.terminal_open = false;
        }

        if let Some(input) = submitted {
            self.terminal_stick_to_bottom = true;
            if let Some(effect) = self.terminal.submit(&input, &self.content)
                && let Some((kind, text)) = self.apply_effect(effect, now)
            {
                self.terminal.report(kind, text);
            }
        }
    }

    fn draw_palette(&mut self, ctx: &Context, now: f64) {
        let palette = self.theme.palette();
        let mut submitted = false;
        let mut picked = None;

        egui::Area::new(Id::new("command_palette"))
            .order(Order::Foreground)
            .anchor(Align2::CENTER_TOP, vec2(0.0, 80.0))
            .show(ctx, |ui| {
                Frame::popup(ui.style()).show(ui, |ui| {
                    ui.set_width(PALETTE_WIDTH);
                    ui.horizontal(|ui| {
                        ui.label(RichText::new(":").monospace().strong().color(palette.accent));
                        let response = ui.add(
                            TextEdit::singleline(&mut self.palette.input)
                                .id(Id::new("palette_input"))
                                .font(TextStyle::Monospace)
                                .hint_text("command")
                                .desired_width(f32::INFINITY),
                        );
                        if response.lost_focus() && ui.input(|input| input.key_pressed(Key::Enter)) {
                            submitted = true;
                        } else if !response.has_focus() {
                            response.request_focus();
                        }
                    });

                    ui.separator();
                    for (name, description) in self.palette.suggestions() {
                        let clicked = ui
                            .horizontal(|ui| {
                                let clicked = ui
                                    .selectable_label(false, RichText::new(name).monospace())
                                    .clicked();
                                ui.label(RichText::new(description).weak());
                                clicked
                            })
                            .inner;
                        if clicked {
                            picked = Some(name);
                        }
                    }

                    if let Some(message) = self.palette.message() {
                        ui.separator();
                        ui.label(RichText::new(message).monospace().color(palette.muted));
                    }
                });
            });

        if let Some(name) = picked {
            self.palette.input = name.to_owned();
            submitted = true;
        }
        if !submitted {
            return;
        }

        let Some(effect) = self.palette.submit() else {
            return;
        };
        let closes = matches!(
            effect,
            CommandEffect::ScrollTo(_)
                | CommandEffect::CloseOverlay
                | CommandEffect::OpenTerminal
                | CommandEffect::ToggleWaveform
        );
        if let Some((_, text)) = self.apply_effect(effect, now) {
            self.palette.set_message(text);
        }
        if closes {
            self.palette_open = false;
        }
    }
}
