use crate::alignment::{guess_alignment_with, Alignment};
use crate::colors::path_colors;
use crate::config::Config;
use crate::error::MorphError;
use crate::frame::{DirectionMarker, RenderFrame};
use crate::interpolate::{interpolate_or_fallback, BlendSpec};
use crate::path::Path;
use crate::path_collection::PathCollection;
use log::{debug, info, warn};
use palette::Srgb;

/// The loaded paths, the user's choices and the morph sequence derived from them.
///
/// Every setter recomputes the sequence before returning, so [`Session::frames`] always
/// reflects the current state.
pub struct Session {
    config: Config,
    collection: PathCollection,
    path1_index: usize,
    path2_index: usize,
    alignment: Alignment,
    blend: BlendSpec,
    /// Working copy of path 1 with the alignment applied
    path1: Path,
    path2: Path,
    frames: Vec<Path>,
}

fn clamp_logged(what: &str, value: usize, max: usize) -> usize {
    if value > max {
        warn!("{} {} is out of range, using {}", what, value, max);
        max
    } else {
        value
    }
}

impl Session {
    pub fn new(config: Config) -> Session {
        let mut session = Session {
            blend: BlendSpec::default(),
            config,
            collection: PathCollection::new(),
            path1_index: 0,
            path2_index: 0,
            alignment: Alignment::default(),
            path1: Path::default(),
            path2: Path::default(),
            frames: Vec::new(),
        };
        session.set_blend(session.config.blend.spec());
        session
    }

    /// Replaces the loaded paths and resets the selection and alignment.
    pub fn load(&mut self, collection: PathCollection) {
        info!("Loaded {} paths", collection.len());
        self.path1_index = 0;
        self.path2_index = if collection.len() > 1 { 1 } else { 0 };
        self.alignment = Alignment::default();
        self.collection = collection;
        self.recompute();
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn collection(&self) -> &PathCollection {
        &self.collection
    }

    pub fn path_count(&self) -> usize {
        self.collection.len()
    }

    pub fn path1_index(&self) -> usize {
        self.path1_index
    }

    pub fn path2_index(&self) -> usize {
        self.path2_index
    }

    pub fn alignment(&self) -> Alignment {
        self.alignment
    }

    pub fn blend(&self) -> BlendSpec {
        self.blend
    }

    /// Path 1 after shift and reversal.
    pub fn path1(&self) -> &Path {
        &self.path1
    }

    pub fn path2(&self) -> &Path {
        &self.path2
    }

    pub fn frames(&self) -> &[Path] {
        &self.frames
    }

    /// Largest valid start shift for the selected path 1.
    pub fn max_shift(&self) -> usize {
        self.collection
            .get(self.path1_index)
            .map(|path| path.len().saturating_sub(1))
            .unwrap_or(0)
    }

    fn max_path_index(&self) -> usize {
        self.collection.len().saturating_sub(1)
    }

    pub fn set_path1_index(&mut self, index: usize) {
        self.path1_index = clamp_logged("Path 1 index", index, self.max_path_index());
        // A shorter path may invalidate the current shift
        self.alignment.shift = clamp_logged("Start shift", self.alignment.shift, self.max_shift());
        self.recompute();
    }

    pub fn set_path2_index(&mut self, index: usize) {
        self.path2_index = clamp_logged("Path 2 index", index, self.max_path_index());
        self.recompute();
    }

    pub fn set_start_shift(&mut self, shift: usize) {
        self.alignment.shift = clamp_logged("Start shift", shift, self.max_shift());
        self.recompute();
    }

    pub fn set_reverse(&mut self, reverse: bool) {
        self.alignment.reverse = reverse;
        self.recompute();
    }

    pub fn set_alignment(&mut self, alignment: Alignment) {
        self.alignment = Alignment {
            shift: clamp_logged("Start shift", alignment.shift, self.max_shift()),
            reverse: alignment.reverse,
        };
        self.recompute();
    }

    pub fn set_before(&mut self, count: usize) {
        self.blend.before = clamp_logged("Frames before", count, self.config.blend.max_count);
        self.recompute();
    }

    pub fn set_between(&mut self, count: usize) {
        self.blend.between = clamp_logged("Frames between", count, self.config.blend.max_count);
        self.recompute();
    }

    pub fn set_after(&mut self, count: usize) {
        self.blend.after = clamp_logged("Frames after", count, self.config.blend.max_count);
        self.recompute();
    }

    pub fn set_blend(&mut self, blend: BlendSpec) {
        let max = self.config.blend.max_count;
        self.blend = BlendSpec {
            before: clamp_logged("Frames before", blend.before, max),
            between: clamp_logged("Frames between", blend.between, max),
            after: clamp_logged("Frames after", blend.after, max),
        };
        self.recompute();
    }

    /// Finds the best alignment of the selected paths and applies it.
    ///
    /// On error the state is left as it was.
    pub fn auto_align(&mut self) -> Result<Alignment, MorphError> {
        let path1 = self.collection.get(self.path1_index)?;
        let path2 = self.collection.get(self.path2_index)?;
        let alignment = guess_alignment_with(path1, path2, &self.config.alignment)?;
        info!(
            "Auto aligned path {} to path {}: shift {}, reverse {}",
            self.path1_index, self.path2_index, alignment.shift, alignment.reverse
        );
        self.alignment = alignment;
        self.recompute();
        Ok(alignment)
    }

    /// Rebuilds the aligned path 1, path 2 and the morph sequence from the current state.
    pub fn recompute(&mut self) {
        if self.collection.is_empty() {
            self.path1 = Path::default();
            self.path2 = Path::default();
            self.frames.clear();
            return;
        }

        match self.selected_paths() {
            Ok((path1, path2)) => {
                self.frames = interpolate_or_fallback(&path1, &path2, &self.blend);
                self.path1 = path1;
                self.path2 = path2;
            }
            Err(err) => {
                warn!("Could not prepare paths: {}", err);
                self.path1 = Path::default();
                self.path2 = Path::default();
                self.frames.clear();
            }
        }
        debug!("Recomputed {} frames", self.frames.len());
    }

    fn selected_paths(&self) -> Result<(Path, Path), MorphError> {
        let path1 = self.alignment.apply(self.collection.get(self.path1_index)?)?;
        let path2 = self.collection.get(self.path2_index)?.clone();
        Ok((path1, path2))
    }

    /// The blend used for coloring. Falls back to the plain pair when blending was not possible.
    fn effective_blend(&self) -> BlendSpec {
        if self.frames.len() == self.blend.total() {
            self.blend
        } else {
            BlendSpec::default()
        }
    }

    pub fn colors(&self) -> Vec<Srgb<f64>> {
        path_colors(&self.effective_blend(), &self.config.colors)
    }

    /// The current sequence with colors and start arrows, or `None` when nothing is loaded.
    pub fn frame(&self) -> Option<RenderFrame> {
        if self.frames.is_empty() {
            return None;
        }
        let blend = self.effective_blend();
        let colors = path_colors(&blend, &self.config.colors);
        let epsilon = self.config.arrows.epsilon;
        let markers = [
            (&self.path1, colors[blend.path1_index()]),
            (&self.path2, colors[blend.path2_index()]),
        ]
        .iter()
        .filter_map(|&(path, color)| DirectionMarker::for_path(path, color, epsilon))
        .collect();

        Some(RenderFrame {
            paths: self.frames.clone(),
            colors,
            markers,
        })
    }
}

impl Default for Session {
    fn default() -> Self {
        Session::new(Config::default())
    }
}
