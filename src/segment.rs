use crate::geometry_utilities::types::*;
use crate::geometry_utilities::{evaluate_cubic_bezier, lerp_point, normalize_safe, to_kurbo};
use kurbo::{CubicBez, Line, ParamCurveArclen};
use lyon::geom::LineSegment;

/// Accuracy passed to kurbo when measuring curve lengths.
const ARCLEN_ACCURACY: f64 = 1e-6;

/// One piece of a path.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum Segment {
    Line {
        start: CanvasPoint,
        end: CanvasPoint,
    },
    CubicCurve {
        start: CanvasPoint,
        end: CanvasPoint,
        control1: CanvasPoint,
        control2: CanvasPoint,
    },
}

impl Segment {
    pub fn line(start: CanvasPoint, end: CanvasPoint) -> Segment {
        Segment::Line { start, end }
    }

    pub fn cubic(start: CanvasPoint, control1: CanvasPoint, control2: CanvasPoint, end: CanvasPoint) -> Segment {
        Segment::CubicCurve {
            start,
            end,
            control1,
            control2,
        }
    }

    /// Degree elevation of a quadratic curve to the equivalent cubic.
    pub fn quadratic(start: CanvasPoint, control: CanvasPoint, end: CanvasPoint) -> Segment {
        Segment::cubic(
            start,
            start + (control - start) * (2.0 / 3.0),
            end + (control - end) * (2.0 / 3.0),
            end,
        )
    }

    pub fn start(&self) -> CanvasPoint {
        match *self {
            Segment::Line { start, .. } | Segment::CubicCurve { start, .. } => start,
        }
    }

    pub fn end(&self) -> CanvasPoint {
        match *self {
            Segment::Line { end, .. } | Segment::CubicCurve { end, .. } => end,
        }
    }

    pub fn is_line(&self) -> bool {
        matches!(self, Segment::Line { .. })
    }

    /// The same curve traversed in the opposite direction.
    pub fn reversed(&self) -> Segment {
        match *self {
            Segment::Line { start, end } => Segment::Line { start: end, end: start },
            Segment::CubicCurve {
                start,
                end,
                control1,
                control2,
            } => Segment::CubicCurve {
                start: end,
                end: start,
                control1: control2,
                control2: control1,
            },
        }
    }

    /// Point at local parameter `t` in [0, 1].
    pub fn point(&self, t: f64) -> CanvasPoint {
        match *self {
            Segment::Line { start, end } => LineSegment {
                from: start.to_untyped(),
                to: end.to_untyped(),
            }
            .sample(t)
            .cast_unit(),
            Segment::CubicCurve {
                start,
                end,
                control1,
                control2,
            } => evaluate_cubic_bezier(start, control1, control2, end, t),
        }
    }

    /// Unit direction in which the segment leaves its start point.
    ///
    /// Curves use a finite difference over `epsilon` of the parameter.
    pub fn initial_direction(&self, epsilon: f64) -> Option<CanvasVector> {
        match *self {
            Segment::Line { start, end } => normalize_safe(end - start),
            Segment::CubicCurve { start, .. } => normalize_safe(self.point(epsilon) - start),
        }
    }

    pub fn arc_length(&self) -> f64 {
        match *self {
            Segment::Line { start, end } => Line::new(to_kurbo(start), to_kurbo(end)).arclen(ARCLEN_ACCURACY),
            Segment::CubicCurve {
                start,
                end,
                control1,
                control2,
            } => CubicBez::new(to_kurbo(start), to_kurbo(control1), to_kurbo(control2), to_kurbo(end))
                .arclen(ARCLEN_ACCURACY),
        }
    }

    pub fn blend_params(&self) -> SegmentParams {
        match *self {
            Segment::Line { start, end } => SegmentParams {
                start,
                end,
                control1: CanvasPoint::origin(),
                control2: CanvasPoint::origin(),
            },
            Segment::CubicCurve {
                start,
                end,
                control1,
                control2,
            } => SegmentParams {
                start,
                end,
                control1,
                control2,
            },
        }
    }
}

/// A segment flattened into the four points that are blended during interpolation.
///
/// Lines store the origin in both control slots.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct SegmentParams {
    pub start: CanvasPoint,
    pub end: CanvasPoint,
    pub control1: CanvasPoint,
    pub control2: CanvasPoint,
}

impl SegmentParams {
    /// `self * wa + other * wb`, component wise.
    pub fn blend(&self, other: &SegmentParams, wa: f64, wb: f64) -> SegmentParams {
        SegmentParams {
            start: lerp_point(self.start, other.start, wa, wb),
            end: lerp_point(self.end, other.end, wa, wb),
            control1: lerp_point(self.control1, other.control1, wa, wb),
            control2: lerp_point(self.control2, other.control2, wa, wb),
        }
    }

    /// Both control points exactly at the origin decode as a line.
    pub fn to_segment(&self) -> Segment {
        if self.control1 == CanvasPoint::origin() && self.control2 == CanvasPoint::origin() {
            Segment::line(self.start, self.end)
        } else {
            Segment::cubic(self.start, self.control1, self.control2, self.end)
        }
    }
}

impl From<Segment> for SegmentParams {
    fn from(segment: Segment) -> Self {
        segment.blend_params()
    }
}
