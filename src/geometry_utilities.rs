use kurbo::Point as KurboPoint;
use lyon::geom::CubicBezierSegment;
use types::*;

pub mod types {
    #[derive(Debug, Copy, Clone)]
    pub struct CanvasSpace;
    pub type CanvasPoint = euclid::Point2D<f64, CanvasSpace>;
    pub type CanvasVector = euclid::Vector2D<f64, CanvasSpace>;
    pub type CanvasRect = euclid::Rect<f64, CanvasSpace>;
}

/// Default tolerance used when checking that consecutive segments meet.
pub const POINT_TOLERANCE: f64 = 1e-9;

pub fn evaluate_cubic_bezier<U>(
    p0: euclid::Point2D<f64, U>,
    p1: euclid::Point2D<f64, U>,
    p2: euclid::Point2D<f64, U>,
    p3: euclid::Point2D<f64, U>,
    t: f64,
) -> euclid::Point2D<f64, U> {
    CubicBezierSegment {
        from: p0.to_untyped(),
        ctrl1: p1.to_untyped(),
        ctrl2: p2.to_untyped(),
        to: p3.to_untyped(),
    }
    .sample(t)
    .cast_unit()
}

pub fn lerp_point(a: CanvasPoint, b: CanvasPoint, wa: f64, wb: f64) -> CanvasPoint {
    // Written out instead of `a.lerp(b, t)` so that the anchors reproduce their inputs bit for bit
    CanvasPoint::new(a.x * wa + b.x * wb, a.y * wa + b.y * wb)
}

pub fn points_close(a: CanvasPoint, b: CanvasPoint, tolerance: f64) -> bool {
    (a - b).square_length() <= tolerance * tolerance
}

/// Unit vector in the direction of `v`, or `None` if `v` is (almost) zero.
pub fn normalize_safe(v: CanvasVector) -> Option<CanvasVector> {
    let len = v.length();
    if len < 1e-12 || !len.is_finite() {
        None
    } else {
        Some(v / len)
    }
}

pub fn to_kurbo(p: CanvasPoint) -> KurboPoint {
    KurboPoint::new(p.x, p.y)
}

pub fn from_kurbo(p: KurboPoint) -> CanvasPoint {
    CanvasPoint::new(p.x, p.y)
}
