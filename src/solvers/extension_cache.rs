use std::collections::VecDeque;

/// A bounded cache of recently found extensions.
///
/// Extensions are given as boolean vectors over the argument indices.
/// When the cache is full, adding an extension evicts the oldest one.
#[derive(Debug)]
pub struct ExtensionCache {
    capacity: usize,
    extensions: VecDeque<Vec<bool>>,
}

impl ExtensionCache {
    /// Builds an empty cache able to store at most `capacity` extensions.
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            extensions: VecDeque::with_capacity(capacity),
        }
    }

    /// Adds an extension, evicting the oldest one if needed.
    ///
    /// Nothing is done if the extension is already in the cache.
    pub fn push(&mut self, extension: Vec<bool>) {
        if self.capacity == 0 || self.extensions.contains(&extension) {
            return;
        }
        if self.extensions.len() == self.capacity {
            self.extensions.pop_front();
        }
        self.extensions.push_back(extension);
    }

    /// Iterates over the extensions, most recent first.
    pub fn iter(&self) -> impl Iterator<Item = &[bool]> + '_ {
        self.extensions.iter().rev().map(|e| e.as_slice())
    }

    /// Removes all the extensions.
    pub fn clear(&mut self) {
        self.extensions.clear();
    }

    /// Returns the number of extensions in the cache.
    pub fn len(&self) -> usize {
        self.extensions.len()
    }

    /// Returns `true` iff the cache contains no extension.
    pub fn is_empty(&self) -> bool {
        self.extensions.is_empty()
    }
}
