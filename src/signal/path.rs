use eframe::egui::{Pos2, Vec2, vec2};

pub const FLIGHT_SECS: f64 = 2.5;
pub const MIDPOINT_FRACTION: f32 = 0.4;
pub const MIDPOINT_HIT_SECS: f64 = 1.0;
pub const ENDPOINT_HIT_SECS: f64 = 2.0;
pub const FALLBACK_DROP: f32 = 800.0;

pub fn ease_in_out(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    if t < 0.5 {
        2.0 * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SignalPath {
    pub origin: Pos2,
    pub midpoint: Pos2,
    pub endpoint: Pos2,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SignalSample {
    pub position: Pos2,
    pub opacity: f32,
    pub scale: f32,
}

pub fn fallback_below(previous: Pos2) -> Pos2 {
    previous + vec2(0.0, FALLBACK_DROP)
}

impl SignalPath {
    pub fn resolve(origin: Pos2, midpoint: Option<Pos2>, endpoint: Option<Pos2>) -> Self {
        let midpoint = midpoint.unwrap_or_else(|| fallback_below(origin));
        let endpoint = endpoint.unwrap_or_else(|| fallback_below(midpoint));
        Self {
            origin,
            midpoint,
            endpoint,
        }
    }

    pub fn sample(&self, elapsed: f64) -> SignalSample {
        let progress = (elapsed / FLIGHT_SECS).clamp(0.0, 1.0) as f32;

        if progress <= MIDPOINT_FRACTION {
            let local = ease_in_out(progress / MIDPOINT_FRACTION);
            return SignalSample {
                position: lerp(self.origin, self.midpoint, local),
                opacity: 1.0,
                scale: 1.0,
            };
        }

        let local = ease_in_out((progress - MIDPOINT_FRACTION) / (1.0 - MIDPOINT_FRACTION));
        let fade = 1.0 - local;
        SignalSample {
            position: lerp(self.midpoint, self.endpoint, local),
            opacity: fade,
            scale: fade,
        }
    }
}

fn lerp(from: Pos2, to: Pos2, t: f32) -> Pos2 {
    let delta: Vec2 = to - from;
    from + delta * t
}
