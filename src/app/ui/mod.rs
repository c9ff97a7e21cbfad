use eframe::egui::{RichText, Ui};

use crate::theme::Palette;

mod contact;
mod fps;
mod hero;
mod methodology;
mod overlays;
mod panels;
mod skills;
mod timeline;

fn section_heading(ui: &mut Ui, title: &str, subtitle: &str, palette: &Palette) {
    ui.label(
        RichText::new(title)
            .size(30.0)
            .strong()
            .color(palette.text),
    );
    ui.label(RichText::new(subtitle).monospace().color(palette.muted));
    ui.add_space(20.0);
}
