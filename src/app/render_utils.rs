use eframe::egui::{Color32, Painter, Pos2, Rect, Stroke, Vec2};

pub(super) fn blend_color(base: Color32, overlay: Color32, amount: f32) -> Color32 {
    let amount = amount.clamp(0.0, 1.0);
    let inverse = 1.0 - amount;

    Color32::from_rgba_unmultiplied(
        ((base.r() as f32 * inverse) + (overlay.r() as f32 * amount)) as u8,
        ((base.g() as f32 * inverse) + (overlay.g() as f32 * amount)) as u8,
        ((base.b() as f32 * inverse) + (overlay.b() as f32 * amount)) as u8,
        ((base.a() as f32 * inverse) + (overlay.a() as f32 * amount)) as u8,
    )
}

pub(super) fn with_alpha(color: Color32, alpha: f32) -> Color32 {
    Color32::from_rgba_unmultiplied(
        color.r(),
        color.g(),
        color.b(),
        (alpha.clamp(0.0, 1.0) * 255.0) as u8,
    )
}

pub(super) fn draw_background(painter: &Painter, rect: Rect, scroll: Vec2, background: Color32, grid: Color32) {
    painter.rect_filled(rect, 0.0, background);

    const STEP: f32 = 48.0;
    let stroke = Stroke::new(1.0, with_alpha(grid, 0.55));

    let mut x = rect.left() - scroll.x.rem_euclid(STEP);
    while x < rect.right() {
        painter.line_segment([Pos2::new(x, rect.top()), Pos2::new(x, rect.bottom())], stroke);
        x += STEP;
    }

    let mut y = rect.top() - scroll.y.rem_euclid(STEP);
    while y < rect.bottom() {
        painter.line_segment([Pos2::new(rect.left(), y), Pos2::new(rect.right(), y)], stroke);
        y += STEP;
    }
}

pub(super) fn project(point: [f32; 3], yaw: f32, pitch: f32, center: Pos2, scale: f32) -> Pos2 {
    const CAMERA_DISTANCE: f32 = 4.0;

    let [x, y, z] = point;
    let (sin_yaw, cos_yaw) = yaw.sin_cos();
    let (x, z) = (x * cos_yaw + z * sin_yaw, -x * sin_yaw + z * cos_yaw);
    let (sin_pitch, cos_pitch) = pitch.sin_cos();
    let (y, z) = (y * cos_pitch - z * sin_pitch, y * sin_pitch + z * cos_pitch);

    let perspective = CAMERA_DISTANCE / (CAMERA_DISTANCE + z);
    Pos2::new(center.x + x * scale * perspective, center.y - y * scale * perspective)
}
