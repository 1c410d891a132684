use crate::error::MorphError;
use crate::path::Path;
use crate::segment::SegmentParams;
use log::warn;
use serde::{Deserialize, Serialize};

/// How many extra frames to produce around the two input paths.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BlendSpec {
    /// Frames extrapolated in front of path 1
    pub before: usize,
    /// Frames strictly between path 1 and path 2
    pub between: usize,
    /// Frames extrapolated past path 2
    pub after: usize,
}

impl BlendSpec {
    pub fn new(before: usize, between: usize, after: usize) -> BlendSpec {
        BlendSpec { before, between, after }
    }

    /// Number of frames besides the two input paths.
    pub fn extra(&self) -> usize {
        self.before + self.between + self.after
    }

    pub fn total(&self) -> usize {
        self.extra() + 2
    }

    /// Position of path 1 in the output sequence.
    pub fn path1_index(&self) -> usize {
        self.before
    }

    /// Position of path 2 in the output sequence.
    pub fn path2_index(&self) -> usize {
        self.before + self.between + 1
    }

    /// Weights of path 1 and path 2 for output frame `index`.
    ///
    /// Outside the two anchors the weights leave [0, 1] and the blend extrapolates.
    pub fn weights(&self, index: usize) -> (f64, f64) {
        let span = (self.between + 1) as f64;
        let index = index as f64;
        let w1 = (self.path2_index() as f64 - index) / span;
        let w2 = (index - self.path1_index() as f64) / span;
        (w1, w2)
    }
}

/// Blends `path1` into `path2`, producing `spec.total()` paths.
///
/// `path1` must already be shifted and reversed into alignment. Each segment is
/// blended as four points; lines take part with both control points at the origin,
/// so a line matched with a curve blends towards a curve pulled to the origin.
pub fn interpolate(path1: &Path, path2: &Path, spec: &BlendSpec) -> Result<Vec<Path>, MorphError> {
    MorphError::check_lengths(path1.len(), path2.len())?;

    let params1: Vec<SegmentParams> = path1.iter().map(|s| s.blend_params()).collect();
    let params2: Vec<SegmentParams> = path2.iter().map(|s| s.blend_params()).collect();

    let frames = (0..spec.total())
        .map(|i| {
            if i == spec.path1_index() {
                path1.clone()
            } else if i == spec.path2_index() {
                path2.clone()
            } else {
                let (w1, w2) = spec.weights(i);
                Path::new(
                    params1
                        .iter()
                        .zip(&params2)
                        .map(|(a, b)| a.blend(b, w1, w2).to_segment())
                        .collect(),
                )
            }
        })
        .collect();
    Ok(frames)
}

/// Like [`interpolate`], but paths that cannot be blended yield just the two inputs.
pub fn interpolate_or_fallback(path1: &Path, path2: &Path, spec: &BlendSpec) -> Vec<Path> {
    if spec.extra() == 0 {
        return vec![path1.clone(), path2.clone()];
    }
    if path1.len() != path2.len() {
        warn!(
            "Cannot blend paths with {} and {} segments, showing only the two paths",
            path1.len(),
            path2.len()
        );
        return vec![path1.clone(), path2.clone()];
    }
    match interpolate(path1, path2, spec) {
        Ok(frames) => frames,
        Err(err) => {
            warn!("Interpolation failed: {}", err);
            vec![path1.clone(), path2.clone()]
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry_utilities::types::*;
    use crate::path::tests::quad_path;
    use crate::segment::Segment;
    use approx::assert_relative_eq;

    fn target_path() -> Path {
        let a = CanvasPoint::new(2.0, -2.0);
        let b = CanvasPoint::new(8.0, 0.0);
        let c = CanvasPoint::new(8.0, 6.0);
        let d = CanvasPoint::new(2.0, 6.0);
        Path::new(vec![
            Segment::cubic(a, CanvasPoint::new(4.0, -3.0), CanvasPoint::new(6.0, -3.0), b),
            Segment::line(b, c),
            Segment::line(c, d),
            Segment::line(d, a),
        ])
    }

    fn assert_params_eq(a: &SegmentParams, b: &SegmentParams) {
        for (p, q) in [
            (a.start, b.start),
            (a.end, b.end),
            (a.control1, b.control1),
            (a.control2, b.control2),
        ]
        .iter()
        {
            assert_relative_eq!(p.x, q.x, epsilon = 1e-9);
            assert_relative_eq!(p.y, q.y, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_weights() {
        let spec = BlendSpec::new(2, 3, 1);
        assert_eq!(spec.total(), 8);
        assert_eq!(spec.weights(2), (1.0, 0.0));
        assert_eq!(spec.weights(6), (0.0, 1.0));
        assert_eq!(spec.weights(4), (0.5, 0.5));
        assert_eq!(spec.weights(0), (1.5, -0.5));
        assert_eq!(spec.weights(7), (-0.25, 1.25));
    }

    #[test]
    fn test_anchor_frames_are_exact() {
        let path1 = quad_path();
        let path2 = target_path();
        for spec in &[BlendSpec::new(0, 0, 0), BlendSpec::new(3, 2, 4), BlendSpec::new(0, 5, 0), BlendSpec::new(1, 0, 1)] {
            let frames = interpolate(&path1, &path2, spec).unwrap();
            assert_eq!(frames.len(), spec.total());
            assert_eq!(frames[spec.path1_index()], path1);
            assert_eq!(frames[spec.path2_index()], path2);
        }
    }

    #[test]
    fn test_single_between_frame_is_mean() {
        let path1 = quad_path();
        let path2 = target_path();
        let frames = interpolate(&path1, &path2, &BlendSpec::new(0, 1, 0)).unwrap();
        assert_eq!(frames.len(), 3);
        for ((mid, a), b) in frames[1].iter().zip(path1.iter()).zip(path2.iter()) {
            let expected = a.blend_params().blend(&b.blend_params(), 0.5, 0.5);
            assert_params_eq(&mid.blend_params(), &expected);
        }
    }

    #[test]
    fn test_extrapolated_frames() {
        let path1 = quad_path();
        let path2 = target_path();
        let frames = interpolate(&path1, &path2, &BlendSpec::new(1, 0, 1)).unwrap();
        assert_eq!(frames.len(), 4);
        // One step before path 1 is path1 - (path2 - path1)
        for ((before, a), b) in frames[0].iter().zip(path1.iter()).zip(path2.iter()) {
            let expected = a.blend_params().blend(&b.blend_params(), 2.0, -1.0);
            assert_params_eq(&before.blend_params(), &expected);
        }
        for ((after, a), b) in frames[3].iter().zip(path1.iter()).zip(path2.iter()) {
            let expected = a.blend_params().blend(&b.blend_params(), -1.0, 2.0);
            assert_params_eq(&after.blend_params(), &expected);
        }
    }

    #[test]
    fn test_frames_stay_closed() {
        let frames = interpolate(&quad_path(), &target_path(), &BlendSpec::new(2, 5, 2)).unwrap();
        for frame in &frames {
            assert!(frame.is_closed(1e-9));
            assert!(frame.is_continuous(1e-9));
        }
    }

    #[test]
    fn test_segment_kinds() {
        let frames = interpolate(&quad_path(), &target_path(), &BlendSpec::new(0, 1, 0)).unwrap();
        let mid = &frames[1];
        // line + curve and curve + line blend into curves, line + line stays a line
        assert!(!mid.segments()[0].is_line());
        assert!(!mid.segments()[1].is_line());
        assert!(mid.segments()[2].is_line());
        assert!(mid.segments()[3].is_line());

        // The line side contributes origin control points with half the weight
        match mid.segments()[0] {
            Segment::CubicCurve { control1, .. } => {
                assert_eq!(control1, CanvasPoint::new(2.0, -1.5));
            }
            Segment::Line { .. } => unreachable!(),
        }
    }

    #[test]
    fn test_length_mismatch_falls_back() {
        let triangle = Path::polygon(&[
            CanvasPoint::new(0.0, 0.0),
            CanvasPoint::new(1.0, 0.0),
            CanvasPoint::new(0.0, 1.0),
        ]);
        let spec = BlendSpec::new(1, 2, 3);
        assert_eq!(
            interpolate(&quad_path(), &triangle, &spec),
            Err(MorphError::LengthMismatch { path1: 4, path2: 3 })
        );
        assert_eq!(
            interpolate_or_fallback(&quad_path(), &triangle, &spec),
            vec![quad_path(), triangle.clone()]
        );
        assert_eq!(
            interpolate_or_fallback(&quad_path(), &target_path(), &BlendSpec::default()),
            vec![quad_path(), target_path()]
        );
        assert_eq!(interpolate_or_fallback(&quad_path(), &target_path(), &spec).len(), 8);
    }
}
