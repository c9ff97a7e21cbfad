use std::collections::VecDeque;
use std::panic::{self, AssertUnwindSafe};
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;

use eframe::egui::{self, Context};

use crate::commands::{CommandPalette, Terminal};
use crate::config::Config;
use crate::content::{PortfolioContent, load_content};
use crate::signal::{FrameLayout, RandomSource, RngSource, SignalBus};
use crate::theme::Theme;

mod boot;
mod nav;
mod render_utils;
mod signals;
mod ui;

use self::boot::BootSequence;
use self::nav::Navigator;

pub struct PortfolioApp {
    config: Config,
    state: AppState,
}

enum AppState {
    Booting {
        rx: Option<Receiver<Result<PortfolioContent, String>>>,
        sequence: BootSequence,
        content: Option<PortfolioContent>,
    },
    Ready(Box<ViewModel>),
    Failed(String),
}

struct ViewModel {
    config: Config,
    content: PortfolioContent,
    theme: Theme,
    applied_theme: Option<Theme>,
    bus: SignalBus,
    layout: FrameLayout,
    signals_enabled: bool,
    nav: Navigator,
    waveform_view: bool,
    terminal: Terminal,
    terminal_input: String,
    terminal_open: bool,
    terminal_stick_to_bottom: bool,
    palette: CommandPalette,
    palette_open: bool,
    download_notice: Option<String>,
    card_hovered: Vec<bool>,
    chip_tilt: egui::Vec2,
    fps_current: f32,
    fps_samples: VecDeque<f32>,
}

impl PortfolioApp {
    pub fn new(cc: &eframe::CreationContext<'_>, config: Config) -> Self {
        cc.egui_ctx.set_visuals(config.theme.visuals());
        let state = Self::start_boot(&config);
        Self { config, state }
    }

    fn spawn_load(config: &Config) -> Receiver<Result<PortfolioContent, String>> {
        let (tx, rx) = mpsc::channel();
        let content_path = config.content_path.clone();

        thread::spawn(move || {
            let result =
                load_content(content_path.as_deref()).map_err(|error| format!("{error:#}"));
            let _ = tx.send(result);
        });

        rx
    }

    fn start_boot(config: &Config) -> AppState {
        AppState::Booting {
            rx: Some(Self::spawn_load(config)),
            sequence: BootSequence::new(config.skip_boot),
            content: None,
        }
    }

    fn random_source(config: &Config) -> Box<dyn RandomSource> {
        match config.seed {
            Some(seed) => Box::new(RngSource::seeded(seed)),
            None => Box::new(RngSource::from_entropy()),
        }
    }
}

impl eframe::App for PortfolioApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        self.step(ctx, ViewModel::show);
    }
}

impl PortfolioApp {
    fn step(&mut self, ctx: &Context, show: fn(&mut ViewModel, &Context)) {
        let mut transition = None;

        match &mut self.state {
            AppState::Booting {
                rx,
                sequence,
                content,
            } => {
                if let Some(receiver) = rx.take() {
                    match receiver.try_recv() {
                        Ok(Ok(loaded)) => *content = Some(loaded),
                        Ok(Err(error)) => transition = Some(AppState::Failed(error)),
                        Err(TryRecvError::Empty) => *rx = Some(receiver),
                        Err(TryRecvError::Disconnected) => {
                            transition =
                                Some(AppState::Failed("Content loader disconnected".to_owned()));
                        }
                    }
                }

                let now = ctx.input(|input| input.time);
                sequence.show(ctx, now, content.is_some());
                if let Some(loaded) = content.take_if(|_| sequence.finished(now)) {
                    log::info!("boot complete");
                    transition = Some(AppState::Ready(Box::new(ViewModel::new(
                        self.config.clone(),
                        loaded,
                        Self::random_source(&self.config),
                    ))));
                }
                ctx.request_repaint();
            }
            AppState::Failed(error) => {
                egui::CentralPanel::default().show(ctx, |ui| {
                    ui.vertical_centered(|ui| {
                        ui.add_space(120.0);
                        ui.heading("Something went wrong");
                        ui.add_space(6.0);
                        ui.label(error.as_str());
                        ui.add_space(10.0);
                        if ui.button("Reload").clicked() {
                            transition = Some(Self::start_boot(&self.config));
                        }
                    });
                });
            }
            AppState::Ready(model) => {
                if let Err(message) = guarded(|| show(model, ctx)) {
                    log::error!("view failed: {message}");
                    transition = Some(AppState::Failed(message));
                }
            }
        }

        if let Some(next_state) = transition {
            if let AppState::Ready(model) = &mut self.state {
                model.bus.teardown();
            }
            self.state = next_state;
        }
    }
}

fn guarded(frame: impl FnOnce()) -> Result<(), String> {
    panic::catch_unwind(AssertUnwindSafe(frame)).map_err(|payload| {
        payload
            .downcast_ref::<&str>()
            .map(|text| (*text).to_owned())
            .or_else(|| payload.downcast_ref::<String>().cloned())
            .unwrap_or_else(|| "unknown failure".to_owned())
    })
}
