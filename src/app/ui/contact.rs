use eframe::egui::{RichText, Ui};

use crate::commands::CommandEffect;
use crate::content::Profile;
use crate::theme::Palette;

use super::section_heading;

pub(super) fn draw_contact(
    ui: &mut Ui,
    profile: &Profile,
    notice: Option<&str>,
    palette: &Palette,
) -> Option<CommandEffect> {
    section_heading(ui, "Contact", "// open a channel", palette);

    let mut effect = None;
    ui.label(RichText::new(profile.location.as_str()).color(palette.muted));
    ui.hyperlink_to(profile.email.as_str(), format!("mailto:{}", profile.email));
    for (label, url) in &profile.links {
        ui.hyperlink_to(label.as_str(), url.as_str());
    }

    ui.add_space(14.0);
    ui.horizontal(|ui| {
        if ui.button("Download resume").clicked() {
            effect = Some(CommandEffect::DownloadResume);
        }
        if ui.button("Open terminal").clicked() {
            effect = Some(CommandEffect::OpenTerminal);
        }
    });

    if let Some(notice) = notice {
        ui.add_space(6.0);
        ui.label(RichText::new(notice).monospace().small().color(palette.muted));
    }

    effect
}
