use eframe::egui::{Color32, Pos2, Rect, Vec2};

mod hits;
mod path;
mod random;
mod registry;
mod timers;

pub use hits::{HitPolicy, HitState};
pub use path::{
    ENDPOINT_HIT_SECS, FLIGHT_SECS, MIDPOINT_HIT_SECS, SignalPath, SignalSample, ease_in_out,
};
pub use random::{RandomSource, RngSource};
pub use registry::{FrameLayout, HitId, TargetCategory, TargetHandle, TargetLocator, TargetRegistry};

#[cfg(test)]
pub use random::ScriptedSource;

use timers::{TimerId, TimerQueue};

pub const HIT_HIGHLIGHT_SECS: f64 = 0.5;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SignalId(u64);

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Signal {
    pub id: SignalId,
    pub origin: Pos2,
    pub color: Color32,
}

#[derive(Debug)]
struct Flight {
    signal: Signal,
    launched_at: f64,
    path: SignalPath,
    skills_index: Option<usize>,
    trace_index: Option<usize>,
    timers: Vec<TimerId>,
}

#[derive(Clone, Copy, Debug, PartialEq)]
enum BusEvent {
    Expire(SignalId),
    Reach { signal: SignalId, hit: HitId },
    ClearHit(HitId),
}

pub struct SignalBus {
    registry: TargetRegistry,
    hits: HitState,
    flights: Vec<Flight>,
    timers: TimerQueue<BusEvent>,
    random: Box<dyn RandomSource>,
    next_signal_id: u64,
    now: f64,
}

impl SignalBus {
    pub fn new(policy: HitPolicy, random: Box<dyn RandomSource>) -> Self {
        Self {
            registry: TargetRegistry::default(),
            hits: HitState::new(policy),
            flights: Vec::new(),
            timers: TimerQueue::default(),
            random,
            next_signal_id: 0,
            now: 0.0,
        }
    }

    pub fn registry(&self) -> &TargetRegistry {
        &self.registry
    }

    pub fn register_target(&mut self, category: TargetCategory, handle: TargetHandle) -> usize {
        self.registry.register(category, handle)
    }

    /// Launches a signal from the center of `origin_rect`.
    ///
    /// `origin_rect` is in viewport space; `scroll_offset` moves it into
    /// page space. Targets are picked and resolved once, here.
    pub fn emit_signal(
        &mut self,
        origin_rect: Rect,
        scroll_offset: Vec2,
        color: Color32,
        locator: &dyn TargetLocator,
    ) -> SignalId {
        let id = SignalId(self.next_signal_id);
        self.next_signal_id += 1;

        let origin = origin_rect.center() + scroll_offset;
        let (skills_index, midpoint) = self.pick_target(TargetCategory::Skills, locator);
        let (trace_index, endpoint) = self.pick_target(TargetCategory::Trace, locator);
        let path = SignalPath::resolve(origin, midpoint, endpoint);

        let launched_at = self.now;
        let mut timers = Vec::with_capacity(3);
        if let Some(index) = skills_index {
            timers.push(self.timers.schedule(
                launched_at + MIDPOINT_HIT_SECS,
                BusEvent::Reach {
                    signal: id,
                    hit: HitId::new(TargetCategory::Skills, index),
                },
            ));
        }
        if let Some(index) = trace_index {
            timers.push(self.timers.schedule(
                launched_at + ENDPOINT_HIT_SECS,
                BusEvent::Reach {
                    signal: id,
                    hit: HitId::new(TargetCategory::Trace, index),
                },
            ));
        }
        timers.push(
            self.timers
                .schedule(launched_at + FLIGHT_SECS, BusEvent::Expire(id)),
        );

        log::debug!(
            "signal {} emitted at ({:.0}, {:.0}) -> skills {:?} -> trace {:?}",
            id.0,
            origin.x,
            origin.y,
            skills_index,
            trace_index
        );

        self.flights.push(Flight {
            signal: Signal { id, origin, color },
            launched_at,
            path,
            skills_index,
            trace_index,
            timers,
        });
        id
    }

    pub fn hit_target(&mut self, hit: HitId) {
        self.hits.insert(hit);
        self.timers
            .schedule(self.now + HIT_HIGHLIGHT_SECS, BusEvent::ClearHit(hit));
        log::debug!("hit {hit}");
    }

    pub fn is_hit(&self, hit: HitId) -> bool {
        self.hits.contains(hit)
    }

    pub fn hits(&self) -> &HitState {
        &self.hits
    }

    /// Moves the clock to `now` and fires every timer due by then.
    ///
    /// Each event runs at its own deadline, so follow-up timers it schedules
    /// are relative to that deadline. Returns `true` if anything fired.
    pub fn advance(&mut self, now: f64) -> bool {
        let mut fired = false;
        while let Some((deadline, event)) = self.timers.pop_due(now) {
            self.now = self.now.max(deadline);
            fired = true;
            match event {
                BusEvent::Expire(id) => self.finish_flight(id),
                BusEvent::Reach { signal, hit } => {
                    if let Some(flight) = self.flights.iter_mut().find(|f| f.signal.id == signal) {
                        flight.timers.retain(|timer| self.timers.is_pending(*timer));
                    }
                    self.hit_target(hit);
                }
                BusEvent::ClearHit(hit) => self.hits.clear(hit),
            }
        }
        self.now = self.now.max(now);
        fired
    }

    pub fn cancel_signal(&mut self, id: SignalId) -> bool {
        let Some(position) = self.flights.iter().position(|f| f.signal.id == id) else {
            return false;
        };
        let flight = self.flights.remove(position);
        for timer in flight.timers {
            self.timers.cancel(timer);
        }
        log::debug!("signal {} cancelled", id.0);
        true
    }

    pub fn cancel_all_signals(&mut self) {
        let ids = self.flights.iter().map(|f| f.signal.id).collect::<Vec<_>>();
        for id in ids {
            self.cancel_signal(id);
        }
    }

    pub fn teardown(&mut self) {
        self.flights.clear();
        self.timers.clear();
        self.hits.reset();
    }

    #[cfg(test)]
    pub fn active_signals(&self) -> impl Iterator<Item = &Signal> {
        self.flights.iter().map(|flight| &flight.signal)
    }

    pub fn active_count(&self) -> usize {
        self.flights.len()
    }

    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }

    pub fn samples(&self) -> impl Iterator<Item = (&Signal, SignalSample)> + '_ {
        self.flights.iter().map(|flight| {
            (
                &flight.signal,
                flight.path.sample(self.now - flight.launched_at),
            )
        })
    }

    pub fn route(&self, id: SignalId) -> Option<(SignalPath, Option<usize>, Option<usize>)> {
        self.flights
            .iter()
            .find(|flight| flight.signal.id == id)
            .map(|flight| (flight.path, flight.skills_index, flight.trace_index))
    }

    pub fn next_deadline(&self) -> Option<f64> {
        self.timers.next_deadline()
    }

    fn pick_target(
        &mut self,
        category: TargetCategory,
        locator: &dyn TargetLocator,
    ) -> (Option<usize>, Option<Pos2>) {
        let handles = self.registry.handles(category);
        let Some(index) = self.random.pick_index(handles.len()) else {
            return (None, None);
        };
        (Some(index), locator.locate(handles[index]))
    }

    fn finish_flight(&mut self, id: SignalId) {
        if let Some(position) = self.flights.iter().position(|f| f.signal.id == id) {
            let flight = self.flights.remove(position);
            for timer in flight.timers {
                self.timers.cancel(timer);
            }
            log::debug!("signal {} expired", id.0);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::{HashMap, HashSet};

    use eframe::egui::{pos2, vec2};

    use super::*;

    #[derive(Default)]
    struct StaticLayout {
        points: HashMap<TargetHandle, Pos2>,
    }

    impl StaticLayout {
        fn place(&mut self, handle: TargetHandle, point: Pos2) {
            self.points.insert(handle, point);
        }
    }

    impl TargetLocator for StaticLayout {
        fn locate(&self, handle: TargetHandle) -> Option<Pos2> {
            self.points.get(&handle).copied()
        }
    }

    fn bus_with(values: Vec<u64>) -> SignalBus {
        SignalBus::new(HitPolicy::Independent, Box::new(ScriptedSource::new(values)))
    }

    fn populated(bus: &mut SignalBus, layout: &mut StaticLayout, skills: usize, trace: usize) {
        for index in 0..skills {
            let handle = TargetHandle::new(TargetCategory::Skills, index);
            bus.register_target(TargetCategory::Skills, handle);
            layout.place(handle, pos2(100.0 * index as f32, 500.0));
        }
        for index in 0..trace {
            let handle = TargetHandle::new(TargetCategory::Trace, index);
            bus.register_target(TargetCategory::Trace, handle);
            layout.place(handle, pos2(50.0, 1000.0 + 100.0 * index as f32));
        }
    }

    fn unit_rect() -> Rect {
        Rect::from_min_size(pos2(100.0, 100.0), vec2(20.0, 20.0))
    }

    #[test]
    fn origin_is_rect_center() {
        let mut bus = bus_with(vec![0]);
        let id = bus.emit_signal(unit_rect(), Vec2::ZERO, Color32::RED, &StaticLayout::default());
        let signal = bus.active_signals().next().unwrap();
        assert_eq!(signal.id, id);
        assert_eq!(signal.origin, pos2(110.0, 110.0));
    }

    #[test]
    fn origin_includes_scroll_offset() {
        let mut bus = bus_with(vec![0]);
        bus.emit_signal(unit_rect(), vec2(0.0, 240.0), Color32::RED, &StaticLayout::default());
        assert_eq!(bus.active_signals().next().unwrap().origin, pos2(110.0, 350.0));
    }

    #[test]
    fn zero_area_rect_still_emits() {
        let mut bus = bus_with(vec![0]);
        let rect = Rect::from_min_size(pos2(30.0, 40.0), Vec2::ZERO);
        bus.emit_signal(rect, Vec2::ZERO, Color32::RED, &StaticLayout::default());
        assert_eq!(bus.active_signals().next().unwrap().origin, pos2(30.0, 40.0));
    }

    #[test]
    fn ids_are_unique() {
        let mut bus = bus_with(vec![0]);
        let layout = StaticLayout::default();
        let a = bus.emit_signal(unit_rect(), Vec2::ZERO, Color32::RED, &layout);
        let b = bus.emit_signal(unit_rect(), Vec2::ZERO, Color32::RED, &layout);
        assert_ne!(a, b);
    }

    #[test]
    fn signal_removed_exactly_at_lifetime() {
        let mut bus = bus_with(vec![0]);
        bus.advance(10.0);
        bus.emit_signal(unit_rect(), Vec2::ZERO, Color32::RED, &StaticLayout::default());

        bus.advance(10.0 + FLIGHT_SECS - 0.01);
        assert_eq!(bus.active_count(), 1);

        bus.advance(10.0 + FLIGHT_SECS);
        assert_eq!(bus.active_count(), 0);
        assert_eq!(bus.pending_timers(), 0);
    }

    #[test]
    fn overlapping_signals_expire_independently() {
        let mut bus = bus_with(vec![0]);
        let layout = StaticLayout::default();
        let first = bus.emit_signal(unit_rect(), Vec2::ZERO, Color32::RED, &layout);
        bus.advance(1.0);
        let second = bus.emit_signal(unit_rect(), Vec2::ZERO, Color32::BLUE, &layout);

        bus.advance(2.5);
        let remaining = bus.active_signals().map(|s| s.id).collect::<Vec<_>>();
        assert_eq!(remaining, vec![second]);
        assert!(!remaining.contains(&first));

        bus.advance(3.5);
        assert_eq!(bus.active_count(), 0);
    }

    #[test]
    fn hits_fire_at_one_and_two_seconds() {
        let mut bus = bus_with(vec![1, 0]);
        let mut layout = StaticLayout::default();
        populated(&mut bus, &mut layout, 3, 2);
        bus.emit_signal(unit_rect(), Vec2::ZERO, Color32::RED, &layout);

        let skills = HitId::new(TargetCategory::Skills, 1);
        let trace = HitId::new(TargetCategory::Trace, 0);

        bus.advance(0.99);
        assert!(!bus.is_hit(skills));
        bus.advance(1.0);
        assert!(bus.is_hit(skills));
        assert!(!bus.is_hit(trace));
        bus.advance(1.49);
        assert!(bus.is_hit(skills));
        bus.advance(1.5);
        assert!(!bus.is_hit(skills));
        bus.advance(2.0);
        assert!(bus.is_hit(trace));
        bus.advance(2.5);
        assert!(!bus.is_hit(trace));
        assert_eq!(bus.active_count(), 0);
    }

    #[test]
    fn hit_target_expires_after_half_second() {
        let mut bus = bus_with(vec![0]);
        let hit = HitId::new(TargetCategory::Trace, 4);
        bus.advance(3.0);
        bus.hit_target(hit);
        assert!(bus.is_hit(hit));
        bus.advance(3.49);
        assert!(bus.is_hit(hit));
        bus.advance(3.5);
        assert!(!bus.is_hit(hit));
    }

    #[test]
    fn overlapping_hits_clear_on_first_timer_by_default() {
        let mut bus = bus_with(vec![0]);
        let hit = HitId::new(TargetCategory::Skills, 0);
        bus.hit_target(hit);
        bus.advance(0.3);
        bus.hit_target(hit);
        bus.advance(0.5);
        assert!(!bus.is_hit(hit));
    }

    #[test]
    fn refcounted_hits_survive_until_last_clear() {
        let mut bus = SignalBus::new(HitPolicy::RefCounted, Box::new(ScriptedSource::new(vec![0])));
        let hit = HitId::new(TargetCategory::Skills, 0);
        bus.hit_target(hit);
        bus.advance(0.3);
        bus.hit_target(hit);
        bus.advance(0.5);
        assert!(bus.is_hit(hit));
        bus.advance(0.8);
        assert!(!bus.is_hit(hit));
    }

    #[test]
    fn resolves_only_registered_combinations() {
        let mut seen = HashSet::new();
        for first in 0..6u64 {
            for second in 0..6u64 {
                let mut bus = bus_with(vec![first, second]);
                let mut layout = StaticLayout::default();
                populated(&mut bus, &mut layout, 3, 2);
                let id = bus.emit_signal(unit_rect(), Vec2::ZERO, Color32::RED, &layout);
                let (path, skills, trace) = bus.route(id).unwrap();
                let skills = skills.unwrap();
                let trace = trace.unwrap();
                assert!(skills < 3);
                assert!(trace < 2);
                assert_eq!(path.midpoint, pos2(100.0 * skills as f32, 500.0));
                assert_eq!(path.endpoint, pos2(50.0, 1000.0 + 100.0 * trace as f32));
                seen.insert((skills, trace));
            }
        }
        assert_eq!(seen.len(), 6);
    }

    #[test]
    fn empty_trace_falls_below_midpoint() {
        let mut bus = bus_with(vec![2]);
        let mut layout = StaticLayout::default();
        populated(&mut bus, &mut layout, 3, 0);
        let id = bus.emit_signal(unit_rect(), Vec2::ZERO, Color32::RED, &layout);

        let (path, skills, trace) = bus.route(id).unwrap();
        assert_eq!(skills, Some(2));
        assert_eq!(trace, None);
        assert_eq!(path.endpoint, path.midpoint + vec2(0.0, 800.0));

        bus.advance(2.0);
        assert_eq!(bus.hits().len(), 0);
        assert_eq!(bus.active_count(), 1);
        bus.advance(FLIGHT_SECS);
        assert_eq!(bus.active_count(), 0);
    }

    #[test]
    fn stale_handle_uses_fallback() {
        let mut bus = bus_with(vec![0]);
        bus.register_target(TargetCategory::Skills, TargetHandle::new(TargetCategory::Skills, 0));
        let id = bus.emit_signal(unit_rect(), Vec2::ZERO, Color32::RED, &StaticLayout::default());
        let (path, skills, _) = bus.route(id).unwrap();
        assert_eq!(skills, Some(0));
        assert_eq!(path.midpoint, pos2(110.0, 910.0));
        assert_eq!(path.endpoint, pos2(110.0, 1710.0));
    }

    #[test]
    fn cancelled_signal_never_hits() {
        let mut bus = bus_with(vec![0]);
        let mut layout = StaticLayout::default();
        populated(&mut bus, &mut layout, 1, 1);
        let id = bus.emit_signal(unit_rect(), Vec2::ZERO, Color32::RED, &layout);

        assert!(bus.cancel_signal(id));
        assert_eq!(bus.pending_timers(), 0);
        bus.advance(5.0);
        assert_eq!(bus.hits().len(), 0);
        assert!(!bus.cancel_signal(id));
    }

    #[test]
    fn cancel_after_midpoint_keeps_earlier_clear() {
        let mut bus = bus_with(vec![0]);
        let mut layout = StaticLayout::default();
        populated(&mut bus, &mut layout, 1, 1);
        let id = bus.emit_signal(unit_rect(), Vec2::ZERO, Color32::RED, &layout);

        bus.advance(1.2);
        assert!(bus.is_hit(HitId::new(TargetCategory::Skills, 0)));
        bus.cancel_signal(id);
        bus.advance(1.5);
        assert_eq!(bus.hits().len(), 0);
        bus.advance(5.0);
        assert!(!bus.is_hit(HitId::new(TargetCategory::Trace, 0)));
    }

    #[test]
    fn teardown_drops_all_pending_work() {
        let mut bus = bus_with(vec![0]);
        let mut layout = StaticLayout::default();
        populated(&mut bus, &mut layout, 2, 2);
        bus.emit_signal(unit_rect(), Vec2::ZERO, Color32::RED, &layout);
        bus.emit_signal(unit_rect(), Vec2::ZERO, Color32::RED, &layout);
        bus.advance(1.1);

        bus.teardown();
        assert_eq!(bus.active_count(), 0);
        assert_eq!(bus.pending_timers(), 0);
        assert_eq!(bus.hits().len(), 0);
        assert_eq!(bus.registry().len(TargetCategory::Skills), 2);
    }

    #[test]
    fn large_frame_step_fires_in_order() {
        let mut bus = bus_with(vec![0]);
        let mut layout = StaticLayout::default();
        populated(&mut bus, &mut layout, 1, 1);
        bus.emit_signal(unit_rect(), Vec2::ZERO, Color32::RED, &layout);

        assert!(bus.advance(10.0));
        assert_eq!(bus.hits().len(), 0);
        assert_eq!(bus.active_count(), 0);
        assert_eq!(bus.pending_timers(), 0);
    }
}
