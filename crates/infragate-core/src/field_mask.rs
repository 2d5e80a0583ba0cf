//! Field masks naming the internal fields an update may overwrite.

/// An ordered set of unique internal field paths.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FieldMask {
    paths: Vec<String>,
}

impl FieldMask {
    /// Build a mask, dropping repeated paths (first occurrence wins).
    pub fn new<I, S>(paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut unique: Vec<String> = Vec::new();
        for path in paths {
            let path = path.into();
            if !unique.contains(&path) {
                unique.push(path);
            }
        }
        Self { paths: unique }
    }

    pub fn paths(&self) -> &[String] {
        &self.paths
    }

    pub fn contains(&self, path: &str) -> bool {
        self.paths.iter().any(|p| p == path)
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }
}
