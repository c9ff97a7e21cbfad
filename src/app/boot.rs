use eframe::egui::{self, Context, RichText};

const BOOT_LINES: &[&str] = &[
    "SILICON-FOLIO POST v0.1",
    "testing scan chain ........ ok",
    "loading standard cells .... ok",
    "routing clock tree ........ ok",
    "static timing ............. slack +0.042ns",
    "mounting portfolio ........ ",
];
const LINE_INTERVAL_SECS: f64 = 0.22;
const HOLD_SECS: f64 = 0.35;

pub(super) struct BootSequence {
    started_at: Option<f64>,
    skip: bool,
}

impl BootSequence {
    pub(super) fn new(skip: bool) -> Self {
        Self {
            started_at: None,
            skip,
        }
    }

    fn total_secs() -> f64 {
        BOOT_LINES.len() as f64 * LINE_INTERVAL_SECS + HOLD_SECS
    }

    fn visible_lines(&self, now: f64) -> usize {
        let Some(started_at) = self.started_at else {
            return 0;
        };
        let elapsed = (now - started_at).max(0.0);
        ((elapsed / LINE_INTERVAL_SECS) as usize + 1).min(BOOT_LINES.len())
    }

    pub(super) fn finished(&self, now: f64) -> bool {
        self.skip
            || self
                .started_at
                .is_some_and(|started_at| now - started_at >= Self::total_secs())
    }

    pub(super) fn show(&mut self, ctx: &Context, now: f64, content_ready: bool) {
        self.started_at.get_or_insert(now);

        let pressed = ctx.input(|input| {
            input.events.iter().any(|event| {
                matches!(event, egui::Event::Key { pressed: true, .. })
                    || matches!(event, egui::Event::PointerButton { pressed: true, .. })
            })
        });
        self.skip |= pressed;

        let visible = self.visible_lines(now);
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.add_space(80.0);
            for (index, line) in BOOT_LINES.iter().take(visible).enumerate() {
                let mut text = (*line).to_owned();
                if index + 1 == BOOT_LINES.len() {
                    text.push_str(if content_ready { "ok" } else { "..." });
                }
                ui.label(RichText::new(text).monospace());
            }
            ui.add_space(16.0);
            ui.label(RichText::new("press any key to skip").weak().small());
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lines_appear_over_time() {
        let mut sequence = BootSequence::new(false);
        assert_eq!(sequence.visible_lines(0.0), 0);
        sequence.started_at = Some(10.0);
        assert_eq!(sequence.visible_lines(10.0), 1);
        assert_eq!(sequence.visible_lines(10.0 + LINE_INTERVAL_SECS * 2.5), 3);
        assert_eq!(sequence.visible_lines(100.0), BOOT_LINES.len());
    }

    #[test]
    fn finishes_after_all_lines_and_hold() {
        let mut sequence = BootSequence::new(false);
        sequence.started_at = Some(0.0);
        assert!(!sequence.finished(BootSequence::total_secs() - 0.01));
        assert!(sequence.finished(BootSequence::total_secs()));
    }

    #[test]
    fn skip_flag_finishes_immediately() {
        assert!(BootSequence::new(true).finished(0.0));
    }

    #[test]
    fn key_pressed_while_loading_is_kept() {
        let ctx = Context::default();
        let mut sequence = BootSequence::new(false);
        let input = egui::RawInput {
            events: vec![egui::Event::Key {
                key: egui::Key::Space,
                physical_key: None,
                pressed: true,
                repeat: false,
                modifiers: egui::Modifiers::NONE,
            }],
            ..Default::default()
        };
        let _ = ctx.run(input, |ctx| sequence.show(ctx, 0.0, false));
        let _ = ctx.run(egui::RawInput::default(), |ctx| sequence.show(ctx, 0.1, false));

        assert!(sequence.finished(0.1));
    }
}
