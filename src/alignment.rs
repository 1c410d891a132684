use crate::error::MorphError;
use crate::geometry_utilities::types::*;
use crate::path::Path;
use log::debug;
use serde::{Deserialize, Serialize};

pub const DEFAULT_SAMPLES: usize = 200;

/// How the parameter range of a path is divided between its segments when sampling.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SampleSpacing {
    /// Every segment gets the same share, regardless of how long it is.
    #[default]
    Segment,
    /// Segments get a share proportional to their arc length.
    ArcLength,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AlignmentOptions {
    pub samples: usize,
    pub spacing: SampleSpacing,
}

impl Default for AlignmentOptions {
    fn default() -> Self {
        AlignmentOptions {
            samples: DEFAULT_SAMPLES,
            spacing: SampleSpacing::Segment,
        }
    }
}

/// Start shift and direction applied to path 1 before blending.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub struct Alignment {
    pub shift: usize,
    pub reverse: bool,
}

impl Alignment {
    pub fn new(shift: usize, reverse: bool) -> Alignment {
        Alignment { shift, reverse }
    }

    pub fn apply(&self, path: &Path) -> Result<Path, MorphError> {
        path.aligned(self.shift, self.reverse)
    }
}

/// Searches all shifts and both directions of `path1` for the best match with `path2`.
///
/// Candidates are visited with the shift ascending and, for each shift, forwards before
/// reversed. Only a strictly smaller distance replaces the current best, so ties go to the
/// lowest shift and then to the forward direction.
pub fn guess_alignment(path1: &Path, path2: &Path) -> Result<Alignment, MorphError> {
    guess_alignment_with(path1, path2, &AlignmentOptions::default())
}

pub fn guess_alignment_with(path1: &Path, path2: &Path, options: &AlignmentOptions) -> Result<Alignment, MorphError> {
    MorphError::check_lengths(path1.len(), path2.len())?;

    let target = sample_points(path2, options);
    let mut best = Alignment::default();
    let mut best_distance = std::f64::INFINITY;
    for shift in 0..path1.len() {
        for &reverse in &[false, true] {
            let candidate = path1.aligned(shift, reverse)?;
            let distance = summed_distance(&sample_points(&candidate, options), &target);
            if distance < best_distance {
                best_distance = distance;
                best = Alignment { shift, reverse };
            }
        }
    }
    debug!(
        "Alignment search over {} candidates picked shift={} reverse={} (distance {:.4})",
        2 * path1.len(),
        best.shift,
        best.reverse,
        best_distance
    );
    Ok(best)
}

fn summed_distance(a: &[CanvasPoint], b: &[CanvasPoint]) -> f64 {
    a.iter().zip(b).map(|(p, q)| (*p - *q).length()).sum()
}

/// Samples at `t = j / (samples - 1)` for `j` in `0..samples`.
pub fn sample_points(path: &Path, options: &AlignmentOptions) -> Vec<CanvasPoint> {
    if path.is_empty() {
        return Vec::new();
    }
    let count = options.samples.max(2);
    let ts = (0..count).map(|j| j as f64 / (count - 1) as f64);
    match options.spacing {
        SampleSpacing::Segment => ts.filter_map(|t| path.point(t)).collect(),
        SampleSpacing::ArcLength => {
            let sampler = ArcLengthSampler::new(path);
            ts.map(|t| sampler.point(path, t)).collect()
        }
    }
}

struct ArcLengthSampler {
    /// Cumulative length at the end of each segment
    ends: Vec<f64>,
}

impl ArcLengthSampler {
    fn new(path: &Path) -> ArcLengthSampler {
        let mut total = 0.0;
        let ends = path
            .segment_lengths()
            .into_iter()
            .map(|len| {
                total += len;
                total
            })
            .collect();
        ArcLengthSampler { ends }
    }

    fn point(&self, path: &Path, t: f64) -> CanvasPoint {
        let total = self.ends.last().copied().unwrap_or(0.0);
        let segments = path.segments();
        if total <= 0.0 {
            // Everything collapsed to a single point
            return segments[0].start();
        }

        let target = t.clamp(0.0, 1.0) * total;
        let index = self
            .ends
            .iter()
            .position(|&end| end >= target)
            .unwrap_or(segments.len() - 1);
        let start = if index == 0 { 0.0 } else { self.ends[index - 1] };
        let len = self.ends[index] - start;
        let local = if len > 0.0 { ((target - start) / len).clamp(0.0, 1.0) } else { 0.0 };
        segments[index].point(local)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::path::tests::quad_path;
    use crate::segment::Segment;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn random_blob(rng: &mut StdRng, n: usize) -> Path {
        let points: Vec<CanvasPoint> = (0..n)
            .map(|i| {
                let angle = i as f64 / n as f64 * std::f64::consts::TAU;
                let radius = rng.gen_range(5.0..10.0);
                CanvasPoint::new(radius * angle.cos(), radius * angle.sin())
            })
            .collect();
        let segments = (0..n)
            .map(|i| {
                let a = points[i];
                let b = points[(i + 1) % n];
                if rng.gen_bool(0.5) {
                    Segment::line(a, b)
                } else {
                    let bulge = CanvasVector::new(rng.gen_range(-2.0..2.0), rng.gen_range(-2.0..2.0));
                    Segment::cubic(a, a.lerp(b, 0.33) + bulge, a.lerp(b, 0.66) + bulge, b)
                }
            })
            .collect();
        Path::new(segments)
    }

    #[test]
    fn test_finds_known_alignment() {
        let path1 = quad_path();
        for shift in 0..path1.len() {
            for &reverse in &[false, true] {
                let path2 = path1.aligned(shift, reverse).unwrap();
                assert_eq!(
                    guess_alignment(&path1, &path2).unwrap(),
                    Alignment::new(shift, reverse),
                    "shift={} reverse={}",
                    shift,
                    reverse
                );
            }
        }
    }

    #[test]
    fn test_finds_known_alignment_random_shapes() {
        let mut rng = StdRng::seed_from_u64(7);
        for &n in &[3, 5, 8, 13] {
            let path1 = random_blob(&mut rng, n);
            let expected = Alignment::new(rng.gen_range(0..n), rng.gen_bool(0.5));
            let path2 = expected.apply(&path1).unwrap();
            assert_eq!(guess_alignment(&path1, &path2).unwrap(), expected);

            let options = AlignmentOptions {
                spacing: SampleSpacing::ArcLength,
                ..AlignmentOptions::default()
            };
            assert_eq!(guess_alignment_with(&path1, &path2, &options).unwrap(), expected);
        }
    }

    #[test]
    fn test_length_mismatch() {
        let triangle = Path::polygon(&[
            CanvasPoint::new(0.0, 0.0),
            CanvasPoint::new(1.0, 0.0),
            CanvasPoint::new(0.0, 1.0),
        ]);
        assert_eq!(
            guess_alignment(&quad_path(), &triangle),
            Err(MorphError::LengthMismatch { path1: 4, path2: 3 })
        );
        assert_eq!(
            guess_alignment(&quad_path(), &triangle).unwrap_err().to_string(),
            "paths do not have the same length (4 vs 3 segments)"
        );
    }

    #[test]
    fn test_ties_prefer_lowest_shift_forward() {
        // There and back again: reversing without a shift gives back the same segments
        let a = CanvasPoint::new(0.0, 0.0);
        let b = CanvasPoint::new(3.0, 1.0);
        let path = Path::new(vec![Segment::line(a, b), Segment::line(b, a)]);
        assert_eq!(path.reversed(), path);
        assert_eq!(guess_alignment(&path, &path).unwrap(), Alignment::new(0, false));
        assert_eq!(guess_alignment(&Path::default(), &Path::default()).unwrap(), Alignment::default());
    }

    #[test]
    fn test_sample_points_count() {
        let options = AlignmentOptions::default();
        let samples = sample_points(&quad_path(), &options);
        assert_eq!(samples.len(), DEFAULT_SAMPLES);
        assert_eq!(samples[0], CanvasPoint::new(0.0, 0.0));
        assert_eq!(*samples.last().unwrap(), CanvasPoint::new(0.0, 0.0));

        let arc = sample_points(
            &quad_path(),
            &AlignmentOptions {
                samples: 1,
                spacing: SampleSpacing::ArcLength,
            },
        );
        assert_eq!(arc.len(), 2);
    }
}
