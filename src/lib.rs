pub mod alignment;
pub mod colors;
pub mod config;
mod error;
pub mod frame;
pub mod geometry_utilities;
pub mod interpolate;
pub mod path;
pub mod path_collection;
pub mod segment;
pub mod session;
pub mod svg;

pub use crate::alignment::{guess_alignment, guess_alignment_with, Alignment, AlignmentOptions, SampleSpacing};
pub use crate::config::Config;
pub use crate::error::MorphError;
pub use crate::frame::{DirectionMarker, RenderFrame};
pub use crate::interpolate::{interpolate, interpolate_or_fallback, BlendSpec};
pub use crate::path::Path;
pub use crate::path_collection::{Attributes, PathCollection};
pub use crate::segment::Segment;
pub use crate::session::Session;
