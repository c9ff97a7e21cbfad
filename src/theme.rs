use clap::ValueEnum;
use eframe::egui::{Color32, Visuals};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum Theme {
    #[default]
    #[value(alias = "default")]
    Dark,
    Light,
    Silicon,
}

#[derive(Clone, Copy, Debug)]
pub struct Palette {
    pub background: Color32,
    pub grid: Color32,
    pub text: Color32,
    pub muted: Color32,
    pub accent: Color32,
    pub highlight: Color32,
    pub chip_body: Color32,
    pub chip_edge: Color32,
    pub pin: Color32,
}

impl Theme {
    pub fn from_arg(arg: &str) -> Option<Self> {
        match arg.to_ascii_lowercase().as_str() {
            "silicon" => Some(Self::Silicon),
            "light" => Some(Self::Light),
            "dark" | "default" => Some(Self::Dark),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Dark => "dark",
            Self::Light => "light",
            Self::Silicon => "silicon",
        }
    }

    pub fn switch_message(self) -> &'static str {
        match self {
            Self::Silicon => "SWITCHING TO RTL VIEW... GATE LEVEL PRIMITIVES EXPOSED.",
            Self::Light => "SWITCHING TO LIGHT MODE... PHOTORESIST DEVELOPED.",
            Self::Dark => "RESTORING DEFAULT VIEW... PACKAGE SEALED.",
        }
    }

    pub fn visuals(self) -> Visuals {
        let palette = self.palette();
        let mut visuals = match self {
            Self::Light => Visuals::light(),
            Self::Dark | Self::Silicon => Visuals::dark(),
        };
        visuals.panel_fill = palette.background;
        visuals.window_fill = palette.background;
        visuals.extreme_bg_color = palette.grid;
        visuals.selection.bg_fill = palette.accent.gamma_multiply(0.6);
        visuals.hyperlink_color = palette.accent;
        visuals.override_text_color = Some(palette.text);
        visuals
    }

    pub fn palette(self) -> Palette {
        match self {
            Self::Dark => Palette {
                background: Color32::from_rgb(15, 18, 24),
                grid: Color32::from_rgb(28, 34, 44),
                text: Color32::from_rgb(220, 226, 235),
                muted: Color32::from_rgb(128, 140, 156),
                accent: Color32::from_rgb(34, 211, 238),
                highlight: Color32::from_rgb(250, 204, 21),
                chip_body: Color32::from_rgb(36, 42, 54),
                chip_edge: Color32::from_rgb(96, 110, 130),
                pin: Color32::from_rgb(190, 160, 90),
            },
            Self::Light => Palette {
                background: Color32::from_rgb(244, 245, 247),
                grid: Color32::from_rgb(222, 226, 232),
                text: Color32::from_rgb(24, 28, 36),
                muted: Color32::from_rgb(100, 108, 120),
                accent: Color32::from_rgb(8, 145, 178),
                highlight: Color32::from_rgb(217, 119, 6),
                chip_body: Color32::from_rgb(60, 66, 78),
                chip_edge: Color32::from_rgb(150, 160, 175),
                pin: Color32::from_rgb(170, 140, 70),
            },
            Self::Silicon => Palette {
                background: Color32::from_rgb(6, 14, 10),
                grid: Color32::from_rgb(14, 40, 26),
                text: Color32::from_rgb(160, 255, 190),
                muted: Color32::from_rgb(70, 150, 100),
                accent: Color32::from_rgb(57, 255, 20),
                highlight: Color32::from_rgb(255, 80, 200),
                chip_body: Color32::from_rgb(10, 30, 18),
                chip_edge: Color32::from_rgb(57, 255, 20),
                pin: Color32::from_rgb(120, 220, 140),
            },
        }
    }
}
