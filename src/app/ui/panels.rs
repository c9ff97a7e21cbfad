use std::collections::VecDeque;
use std::time::Duration;

use eframe::egui::{self, Align, Context, Frame, Layout, Rect, RichText, ScrollArea, Ui, Vec2};

use crate::commands::{CommandEffect, CommandPalette, LineKind, Terminal};
use crate::config::Config;
use crate::content::{PortfolioContent, export_resume};
use crate::page::Section;
use crate::signal::{FrameLayout, RandomSource, SignalBus};
use crate::theme::Theme;
use crate::util::format_bytes;

use super::super::ViewModel;
use super::super::nav::{NavRequest, Navigator, draw_section_rail, read_nav_keys};
use super::super::render_utils::draw_background;
use super::super::signals::{PageFrame, SignalPort, draw_signals};
use super::{contact, hero, methodology, skills, timeline};

const PAGE_MAX_WIDTH: f32 = 1080.0;
const PAGE_SIDE_MARGIN: f32 = 40.0;
const SECTION_GAP: f32 = 96.0;

impl ViewModel {
    pub(in crate::app) fn new(
        config: Config,
        content: PortfolioContent,
        random: Box<dyn RandomSource>,
    ) -> Self {
        let card_count = content.methodology.len();
        let bus = SignalBus::new(config.hit_policy, random);
        log::info!(
            "view ready: {} skills, {} roles, hit policy {:?}",
            content.skill_count(),
            content.career.len(),
            bus.hits().policy()
        );

        Self {
            theme: config.theme,
            applied_theme: None,
            bus,
            layout: FrameLayout::default(),
            signals_enabled: config.signals_enabled,
            nav: Navigator::default(),
            waveform_view: false,
            terminal: Terminal::new(),
            terminal_input: String::new(),
            terminal_open: false,
            terminal_stick_to_bottom: true,
            palette: CommandPalette::default(),
            palette_open: false,
            download_notice: None,
            card_hovered: vec![false; card_count],
            chip_tilt: Vec2::ZERO,
            fps_current: 0.0,
            fps_samples: VecDeque::new(),
            content,
            config,
        }
    }

    pub(in crate::app) fn show(&mut self, ctx: &Context) {
        let now = ctx.input(|input| input.time);
        self.update_fps_counter(ctx);
        if self.applied_theme != Some(self.theme) {
            ctx.set_visuals(self.theme.visuals());
            self.applied_theme = Some(self.theme);
        }

        self.bus.advance(now);
        self.layout.begin_frame();

        for request in read_nav_keys(ctx, self.overlay_open()) {
            self.handle_nav(request, now);
        }

        self.draw_top_bar(ctx, now);

        let palette = self.theme.palette();
        let mut page_frame = None;
        let mut effects = Vec::new();
        egui::CentralPanel::default()
            .frame(Frame::NONE)
            .show(ctx, |ui| {
                let mut area = ScrollArea::vertical()
                    .id_salt("page")
                    .auto_shrink([false, false]);
                if let Some(offset) = self.nav.forced_offset(now) {
                    area = area.vertical_scroll_offset(offset);
                }

                let output = area.show(ui, |ui| {
                    let frame = PageFrame::new(ui.clip_rect(), ui.max_rect().min);
                    draw_background(
                        ui.painter(),
                        frame.viewport,
                        frame.scroll,
                        palette.background,
                        palette.grid,
                    );
                    self.draw_page(ui, frame, now, &mut effects);
                    frame
                });

                self.nav
                    .observe_scroll(output.state.offset.y, output.inner_rect.height());
                page_frame = Some(output.inner);
            });

        if let Some(frame) = page_frame {
            draw_signals(ctx, &self.bus, &frame);
        }

        if let Some(section) = draw_section_rail(ctx, self.nav.current_section(), &palette) {
            self.nav.scroll_to(section, now);
        }

        for effect in effects {
            if let Some((_, text)) = self.apply_effect(effect, now) {
                self.download_notice = Some(text);
            }
        }

        self.draw_overlays(ctx, now);
        self.schedule_repaint(ctx, now);
    }

    fn schedule_repaint(&self, ctx: &Context, now: f64) {
        let animating = self.nav.is_animating()
            || self.bus.active_count() > 0
            || self.nav.current_section() == Section::Hero;
        if animating {
            ctx.request_repaint();
        } else if let Some(deadline) = self.bus.next_deadline() {
            ctx.request_repaint_after(Duration::from_secs_f64((deadline - now).max(0.0)));
        }
    }

    fn draw_top_bar(&mut self, ctx: &Context, now: f64) {
        egui::TopBottomPanel::top("top_bar")
            .resizable(false)
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.heading(self.content.profile.name.as_str());
                    ui.separator();

                    let current = self.nav.current_section();
                    for section in Section::ALL {
                        if ui
                            .selectable_label(section == current, section.title())
                            .clicked()
                        {
                            self.nav.scroll_to(section, now);
                        }
                    }
                    ui.separator();

                    let mut theme = self.theme;
                    for option in [Theme::Dark, Theme::Light, Theme::Silicon] {
                        ui.selectable_value(&mut theme, option, option.label());
                    }
                    if theme != self.theme {
                        self.apply_effect(CommandEffect::SetTheme(theme), now);
                    }
                    ui.separator();

                    let mut signals_enabled = self.signals_enabled;
                    if ui
                        .checkbox(&mut signals_enabled, "Signals")
                        .on_hover_text("Emit signal particles from cards and the chip.")
                        .changed()
                    {
                        self.set_signals_enabled(signals_enabled);
                    }
                    if ui.button("Terminal").on_hover_text("Toggle with `").clicked() {
                        self.handle_nav(NavRequest::ToggleTerminal, now);
                    }
                    if ui.button("Palette").on_hover_text("Open with : or Ctrl+K").clicked() {
                        self.handle_nav(NavRequest::OpenPalette, now);
                    }

                    ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                        if let Some(fps_text) = self.fps_display_text() {
                            ui.label(fps_text);
                        }
                        ui.label(RichText::new(self.signal_status_text()).weak());
                    });
                });
            });
    }

    fn draw_page(&mut self, ui: &mut Ui, frame: PageFrame, now: f64, effects: &mut Vec<CommandEffect>) {
        let palette = self.theme.palette();
        let theme = self.theme;
        let column = (ui.available_width() - 2.0 * PAGE_SIDE_MARGIN).clamp(280.0, PAGE_MAX_WIDTH);
        let side = ((ui.available_width() - column) / 2.0).max(0.0);

        let nav = &mut self.nav;
        let content = &self.content;
        let mut port = SignalPort::new(&mut self.bus, &mut self.layout, frame, self.signals_enabled);

        ui.horizontal_top(|ui| {
            ui.add_space(side);
            ui.vertical(|ui| {
                ui.set_width(column);

                mark_section(nav, ui, &frame, Section::Hero);
                hero::draw_hero(ui, &content.profile, &mut port, &palette, theme, &mut self.chip_tilt, now);
                ui.add_space(SECTION_GAP);

                mark_section(nav, ui, &frame, Section::Methodology);
                methodology::draw_methodology(
                    ui,
                    &content.methodology,
                    &mut self.card_hovered,
                    &mut port,
                    &palette,
                );
                ui.add_space(SECTION_GAP);

                mark_section(nav, ui, &frame, Section::Skills);
                skills::draw_skills(ui, &content.skill_groups, &mut port, &palette);
                ui.add_space(SECTION_GAP);

                mark_section(nav, ui, &frame, Section::Timeline);
                if let Some(effect) =
                    timeline::draw_timeline(ui, content, self.waveform_view, &mut port, &palette)
                {
                    effects.push(effect);
                }
                ui.add_space(SECTION_GAP);

                mark_section(nav, ui, &frame, Section::Contact);
                if let Some(effect) = contact::draw_contact(
                    ui,
                    &content.profile,
                    self.download_notice.as_deref(),
                    &palette,
                ) {
                    effects.push(effect);
                }
                ui.add_space(SECTION_GAP * 2.0);
            });
        });
    }

    fn overlay_open(&self) -> bool {
        self.terminal_open || self.palette_open
    }

    fn set_signals_enabled(&mut self, enabled: bool) {
        self.signals_enabled = enabled;
        if !enabled {
            self.bus.cancel_all_signals();
        }
        log::info!("signals {}", if enabled { "enabled" } else { "disabled" });
    }

    pub(in crate::app) fn handle_nav(&mut self, request: NavRequest, now: f64) {
        match request {
            NavRequest::ToggleTerminal => {
                self.terminal_open = !self.terminal_open;
                if self.terminal_open {
                    self.palette_open = false;
                    self.terminal_stick_to_bottom = true;
                }
            }
            NavRequest::OpenPalette => {
                self.terminal_open = false;
                self.palette.reset();
                self.palette_open = true;
            }
            NavRequest::CloseOverlays => {
                self.terminal_open = false;
                self.palette_open = false;
            }
            NavRequest::Goto(_) | NavRequest::Next | NavRequest::Previous => {
                self.nav.apply(request, now);
            }
        }
    }

    pub(in crate::app) fn apply_effect(
        &mut self,
        effect: CommandEffect,
        now: f64,
    ) -> Option<(LineKind, String)> {
        match effect {
            CommandEffect::SetTheme(theme) => {
                if theme != self.theme {
                    log::info!("theme changed to {}", theme.label());
                }
                self.theme = theme;
                None
            }
            CommandEffect::DownloadResume => Some(self.download_resume()),
            CommandEffect::ScrollTo(section) => {
                self.nav.scroll_to(section, now);
                None
            }
            // The terminal clears its own history.
            CommandEffect::ClearHistory => None,
            CommandEffect::CloseOverlay => {
                self.handle_nav(NavRequest::CloseOverlays, now);
                None
            }
            CommandEffect::ToggleWaveform => {
                self.waveform_view = !self.waveform_view;
                self.nav.scroll_to(Section::Timeline, now);
                None
            }
            CommandEffect::OpenTerminal => {
                self.palette_open = false;
                self.terminal_open = true;
                self.terminal_stick_to_bottom = true;
                None
            }
        }
    }

    fn download_resume(&self) -> (LineKind, String) {
        match export_resume(&self.config.download_dir) {
            Ok((path, bytes)) => {
                log::info!("resume written to {}", path.display());
                (
                    LineKind::Output,
                    format!("saved {} ({})", path.display(), format_bytes(bytes)),
                )
            }
            Err(error) => {
                log::warn!("resume download failed: {error:#}");
                (LineKind::Error, format!("download failed: {error:#}"))
            }
        }
    }
}

fn mark_section(nav: &mut Navigator, ui: &Ui, frame: &PageFrame, section: Section) {
    let anchor = Rect::from_min_size(ui.cursor().min, Vec2::ZERO);
    nav.record_section(section, frame.to_page(anchor).top());
}
