use crate::error::MorphError;
use crate::path::Path;
use std::collections::BTreeMap;

/// Styling and other attributes carried along with a path. Never interpreted.
pub type Attributes = BTreeMap<String, String>;

/// All paths loaded from one document, with their attributes.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PathCollection {
    pub(crate) paths: Vec<Path>,
    pub(crate) attributes: Vec<Attributes>,
    pub document_attributes: Attributes,
}

impl PathCollection {
    pub fn new() -> PathCollection {
        PathCollection::default()
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Appends a path and returns its index.
    pub fn push(&mut self, path: Path, attributes: Attributes) -> usize {
        self.paths.push(path);
        self.attributes.push(attributes);
        self.paths.len() - 1
    }

    pub fn iter(&self) -> impl Iterator<Item = &Path> {
        self.paths.iter()
    }

    pub fn get(&self, index: usize) -> Result<&Path, MorphError> {
        self.paths.get(index).ok_or(MorphError::IndexOutOfRange {
            what: "path",
            index,
            len: self.paths.len(),
        })
    }

    pub fn attributes(&self, index: usize) -> Option<&Attributes> {
        self.attributes.get(index)
    }
}

impl FromIterator<Path> for PathCollection {
    fn from_iter<I: IntoIterator<Item = Path>>(iter: I) -> Self {
        let mut collection = PathCollection::new();
        for path in iter {
            collection.push(path, Attributes::new());
        }
        collection
    }
}
