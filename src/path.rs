use crate::error::MorphError;
use crate::geometry_utilities::types::*;
use crate::geometry_utilities::{from_kurbo, points_close, to_kurbo, POINT_TOLERANCE};
use crate::segment::Segment;
use kurbo::{BezPath, PathEl, Shape};
use lyon::math::point;

/// A closed contour made of segments.
///
/// Paths are plain values: the transforms below all return a new path.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Path {
    segments: Vec<Segment>,
}

impl Path {
    pub fn new(segments: Vec<Segment>) -> Path {
        Path { segments }
    }

    /// Closed polygon through `points`.
    pub fn polygon(points: &[CanvasPoint]) -> Path {
        let count = points.len();
        Path::new(
            (0..count)
                .map(|i| Segment::line(points[i], points[(i + 1) % count]))
                .collect(),
        )
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn iter(&self) -> impl Iterator<Item = &Segment> {
        self.segments.iter()
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn first(&self) -> Option<&Segment> {
        self.segments.first()
    }

    /// Rotates the segment order so that segment `k` comes first.
    pub fn shifted(&self, k: usize) -> Result<Path, MorphError> {
        if k == 0 {
            return Ok(self.clone());
        }
        if k >= self.len() {
            return Err(MorphError::IndexOutOfRange {
                what: "shift",
                index: k,
                len: self.len(),
            });
        }
        let mut segments = Vec::with_capacity(self.len());
        segments.extend_from_slice(&self.segments[k..]);
        segments.extend_from_slice(&self.segments[..k]);
        Ok(Path { segments })
    }

    /// Same contour traversed in the opposite direction.
    pub fn reversed(&self) -> Path {
        Path {
            segments: self.segments.iter().rev().map(Segment::reversed).collect(),
        }
    }

    /// Shift followed by an optional reversal, the way path 1 is prepared for blending.
    pub fn aligned(&self, shift: usize, reverse: bool) -> Result<Path, MorphError> {
        let shifted = self.shifted(shift)?;
        Ok(if reverse { shifted.reversed() } else { shifted })
    }

    /// Point at `t` in [0, 1], giving every segment an equal slice of the parameter range.
    pub fn point(&self, t: f64) -> Option<CanvasPoint> {
        if self.is_empty() {
            return None;
        }
        let n = self.len();
        let scaled = t.clamp(0.0, 1.0) * n as f64;
        let index = (scaled.floor() as usize).min(n - 1);
        Some(self.segments[index].point(scaled - index as f64))
    }

    pub fn segment_lengths(&self) -> Vec<f64> {
        self.segments.iter().map(Segment::arc_length).collect()
    }

    pub fn is_closed(&self, tolerance: f64) -> bool {
        match (self.segments.first(), self.segments.last()) {
            (Some(first), Some(last)) => points_close(last.end(), first.start(), tolerance),
            _ => true,
        }
    }

    pub fn is_continuous(&self, tolerance: f64) -> bool {
        self.segments
            .windows(2)
            .all(|pair| points_close(pair[0].end(), pair[1].start(), tolerance))
    }

    /// Start point and unit direction of the first segment.
    pub fn start_direction(&self, epsilon: f64) -> Option<(CanvasPoint, CanvasVector)> {
        let first = self.segments.first()?;
        first.initial_direction(epsilon).map(|dir| (first.start(), dir))
    }

    pub fn bounding_box(&self) -> Option<CanvasRect> {
        if self.is_empty() {
            return None;
        }
        let bounds = self.to_bezpath().bounding_box();
        Some(CanvasRect::new(
            CanvasPoint::new(bounds.x0, bounds.y0),
            euclid::Size2D::new(bounds.width(), bounds.height()),
        ))
    }

    pub fn to_bezpath(&self) -> BezPath {
        let mut result = BezPath::new();
        if let Some(first) = self.segments.first() {
            result.move_to(to_kurbo(first.start()));
            for segment in &self.segments {
                match *segment {
                    Segment::Line { end, .. } => result.line_to(to_kurbo(end)),
                    Segment::CubicCurve {
                        end,
                        control1,
                        control2,
                        ..
                    } => result.curve_to(to_kurbo(control1), to_kurbo(control2), to_kurbo(end)),
                }
            }
            result.close_path();
        }
        result
    }

    /// Splits a kurbo path into closed paths, one per sub path.
    ///
    /// Quadratic segments are elevated to cubics and open sub paths get a closing line.
    pub fn from_bezpath(bezpath: &BezPath) -> Vec<Path> {
        fn finish(result: &mut Vec<Path>, segments: &mut Vec<Segment>, start: CanvasPoint, current: CanvasPoint) {
            if segments.is_empty() {
                return;
            }
            if !points_close(current, start, POINT_TOLERANCE) {
                segments.push(Segment::line(current, start));
            }
            result.push(Path::new(std::mem::take(segments)));
        }

        let mut result = Vec::new();
        let mut segments = Vec::new();
        let mut start = CanvasPoint::origin();
        let mut current = start;
        for el in bezpath.elements() {
            match *el {
                PathEl::MoveTo(p) => {
                    finish(&mut result, &mut segments, start, current);
                    start = from_kurbo(p);
                    current = start;
                }
                PathEl::LineTo(p) => {
                    let p = from_kurbo(p);
                    segments.push(Segment::line(current, p));
                    current = p;
                }
                PathEl::QuadTo(c, p) => {
                    let p = from_kurbo(p);
                    segments.push(Segment::quadratic(current, from_kurbo(c), p));
                    current = p;
                }
                PathEl::CurveTo(c1, c2, p) => {
                    let p = from_kurbo(p);
                    segments.push(Segment::cubic(current, from_kurbo(c1), from_kurbo(c2), p));
                    current = p;
                }
                PathEl::ClosePath => {
                    finish(&mut result, &mut segments, start, current);
                    current = start;
                }
            }
        }
        finish(&mut result, &mut segments, start, current);
        result
    }

    /// Feeds the path into a lyon builder so it can be tessellated for display.
    pub fn build(&self, builder: &mut lyon::path::path::Builder) {
        let first = match self.segments.first() {
            Some(first) => first,
            None => return,
        };
        let to_lyon = |p: CanvasPoint| point(p.x as f32, p.y as f32);

        builder.begin(to_lyon(first.start()));
        for segment in &self.segments {
            match *segment {
                Segment::Line { end, .. } => {
                    builder.line_to(to_lyon(end));
                }
                Segment::CubicCurve {
                    end,
                    control1,
                    control2,
                    ..
                } => {
                    builder.cubic_bezier_to(to_lyon(control1), to_lyon(control2), to_lyon(end));
                }
            }
        }
        builder.end(true);
    }
}

impl<'a> IntoIterator for &'a Path {
    type Item = &'a Segment;
    type IntoIter = std::slice::Iter<'a, Segment>;

    fn into_iter(self) -> Self::IntoIter {
        self.segments.iter()
    }
}
