use crate::geometry_utilities::types::*;
use crate::path::Path;
use palette::Srgb;

/// Start point and unit initial direction of a path, drawn as an arrow.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct DirectionMarker {
    pub position: CanvasPoint,
    pub direction: CanvasVector,
    pub color: Srgb<f64>,
}

impl DirectionMarker {
    pub fn for_path(path: &Path, color: Srgb<f64>, epsilon: f64) -> Option<DirectionMarker> {
        path.start_direction(epsilon).map(|(position, direction)| DirectionMarker {
            position,
            direction,
            color,
        })
    }

    /// Tip of an arrow of the given length.
    pub fn tip(&self, length: f64) -> CanvasPoint {
        self.position + self.direction * length
    }
}

/// Everything the renderer needs to draw the current morph sequence.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderFrame {
    pub paths: Vec<Path>,
    pub colors: Vec<Srgb<f64>>,
    pub markers: Vec<DirectionMarker>,
}

impl RenderFrame {
    pub fn iter(&self) -> impl Iterator<Item = (&Path, Srgb<f64>)> {
        self.paths.iter().zip(self.colors.iter().copied())
    }

    pub fn bounding_box(&self) -> Option<CanvasRect> {
        self.paths
            .iter()
            .filter_map(Path::bounding_box)
            .fold(None, |acc: Option<CanvasRect>, rect| Some(acc.map_or(rect, |acc| acc.union(&rect))))
    }

    /// Builds one lyon path per frame, ready for tessellation.
    pub fn to_lyon_paths(&self) -> Vec<lyon::path::Path> {
        self.paths
            .iter()
            .map(|path| {
                let mut builder = lyon::path::Path::builder();
                path.build(&mut builder);
                builder.build()
            })
            .collect()
    }
}
