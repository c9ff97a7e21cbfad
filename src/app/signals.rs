use eframe::egui::{Color32, Context, Id, LayerId, Order, Pos2, Rect, Stroke, Vec2};

use crate::signal::{FrameLayout, HitId, SignalBus, SignalId, TargetCategory, TargetHandle};

use super::render_utils::with_alpha;

const MARKER_RADIUS: f32 = 7.0;

#[derive(Clone, Copy, Debug, PartialEq)]
pub(super) struct PageFrame {
    pub(super) viewport: Rect,
    pub(super) scroll: Vec2,
}

impl PageFrame {
    pub(super) fn new(viewport: Rect, content_min: Pos2) -> Self {
        Self {
            viewport,
            scroll: viewport.min - content_min,
        }
    }

    pub(super) fn to_viewport(&self, screen_rect: Rect) -> Rect {
        screen_rect.translate(-self.viewport.min.to_vec2())
    }

    pub(super) fn to_page(&self, screen_rect: Rect) -> Rect {
        self.to_viewport(screen_rect).translate(self.scroll)
    }

    pub(super) fn page_to_screen(&self, page: Pos2) -> Pos2 {
        page - self.scroll + self.viewport.min.to_vec2()
    }
}

pub(super) struct SignalPort<'a> {
    bus: &'a mut SignalBus,
    layout: &'a mut FrameLayout,
    frame: PageFrame,
    emit_enabled: bool,
}

impl<'a> SignalPort<'a> {
    pub(super) fn new(
        bus: &'a mut SignalBus,
        layout: &'a mut FrameLayout,
        frame: PageFrame,
        emit_enabled: bool,
    ) -> Self {
        Self {
            bus,
            layout,
            frame,
            emit_enabled,
        }
    }

    /// Registers the element in `slot` as drawn at `screen_rect` this frame.
    /// Returns `true` while its hit is lit.
    pub(super) fn mount(&mut self, category: TargetCategory, slot: usize, screen_rect: Rect) -> bool {
        let handle = TargetHandle::new(category, slot);
        let index = self.bus.register_target(category, handle);
        self.layout
            .record(handle, self.frame.to_viewport(screen_rect), self.frame.scroll);
        self.bus.is_hit(HitId::new(category, index))
    }

    pub(super) fn emit(&mut self, screen_rect: Rect, color: Color32) -> Option<SignalId> {
        if !self.emit_enabled {
            return None;
        }
        Some(self.bus.emit_signal(
            self.frame.to_viewport(screen_rect),
            self.frame.scroll,
            color,
            &*self.layout,
        ))
    }
}

pub(super) fn draw_signals(ctx: &Context, bus: &SignalBus, frame: &PageFrame) {
    let painter = ctx
        .layer_painter(LayerId::new(Order::Foreground, Id::new("signal_layer")))
        .with_clip_rect(frame.viewport);

    for (signal, sample) in bus.samples() {
        if sample.opacity <= 0.0 {
            continue;
        }
        let Some((path, _, _)) = bus.route(signal.id) else {
            continue;
        };

        let trail = Stroke::new(1.0, with_alpha(signal.color, 0.18 * sample.opacity));
        let origin = frame.page_to_screen(path.origin);
        let midpoint = frame.page_to_screen(path.midpoint);
        let endpoint = frame.page_to_screen(path.endpoint);
        painter.line_segment([origin, midpoint], trail);
        painter.line_segment([midpoint, endpoint], trail);

        let center = frame.page_to_screen(sample.position);
        let radius = MARKER_RADIUS * sample.scale;
        painter.circle_filled(center, radius * 2.4, with_alpha(signal.color, 0.15 * sample.opacity));
        painter.circle_filled(center, radius, with_alpha(signal.color, sample.opacity));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signal::{HitPolicy, ScriptedSource};
    use eframe::egui::{pos2, vec2};

    fn frame() -> PageFrame {
        let viewport = Rect::from_min_size(pos2(0.0, 40.0), vec2(800.0, 600.0));
        PageFrame::new(viewport, pos2(0.0, -60.0))
    }

    fn bus() -> SignalBus {
        SignalBus::new(HitPolicy::Independent, Box::new(ScriptedSource::new(vec![0])))
    }

    fn mount_page(port: &mut SignalPort<'_>) -> (bool, bool) {
        let skill = Rect::from_min_size(pos2(40.0, 200.0), vec2(30.0, 30.0));
        let trace = Rect::from_min_size(pos2(40.0, 500.0), vec2(28.0, 28.0));
        (
            port.mount(TargetCategory::Skills, 0, skill),
            port.mount(TargetCategory::Trace, 0, trace),
        )
    }

    #[test]
    fn mounted_targets_light_when_the_signal_arrives() {
        let mut bus = bus();
        let mut layout = FrameLayout::default();
        let chip = Rect::from_min_size(pos2(400.0, 100.0), vec2(60.0, 60.0));

        let mut port = SignalPort::new(&mut bus, &mut layout, frame(), true);
        assert_eq!(mount_page(&mut port), (false, false));
        assert!(port.emit(chip, Color32::RED).is_some());

        bus.advance(1.0);
        layout.begin_frame();
        let mut port = SignalPort::new(&mut bus, &mut layout, frame(), true);
        assert_eq!(mount_page(&mut port), (true, false));

        bus.advance(2.0);
        layout.begin_frame();
        let mut port = SignalPort::new(&mut bus, &mut layout, frame(), true);
        assert_eq!(mount_page(&mut port), (false, true));
        assert_eq!(bus.registry().len(TargetCategory::Skills), 1);
    }

    #[test]
    fn emit_is_ignored_while_signals_are_off() {
        let mut bus = bus();
        let mut layout = FrameLayout::default();
        let chip = Rect::from_min_size(pos2(400.0, 100.0), vec2(60.0, 60.0));

        let mut port = SignalPort::new(&mut bus, &mut layout, frame(), false);
        mount_page(&mut port);
        assert_eq!(port.emit(chip, Color32::RED), None);

        assert_eq!(bus.active_count(), 0);
        assert_eq!(bus.pending_timers(), 0);
    }

    #[test]
    fn page_round_trip() {
        let viewport = Rect::from_min_size(pos2(0.0, 40.0), vec2(800.0, 600.0));
        let frame = PageFrame::new(viewport, pos2(0.0, -260.0));
        assert_eq!(frame.scroll, vec2(0.0, 300.0));

        let widget = Rect::from_min_size(pos2(100.0, 140.0), vec2(20.0, 20.0));
        let viewport_rect = frame.to_viewport(widget);
        assert_eq!(viewport_rect.min, pos2(100.0, 100.0));
        let page = frame.to_page(widget);
        assert_eq!(page.center(), pos2(110.0, 410.0));
        assert_eq!(frame.page_to_screen(page.center()), widget.center());
    }
}
