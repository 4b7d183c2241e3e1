//! Template together with its index.

use crate::{
    error::{IndexError, LoadError},
    index::{ConfigIndex, IndexOptions, Indexer},
    loader::{Loader, Template, populate},
};

/// Configuration template together with its [index](ConfigIndex).
///
/// The template is the source of truth; the index is derived from it on each load.
#[derive(Debug)]
pub struct IndexedConfig<T> {
    template: T,
    index: ConfigIndex,
    options: IndexOptions,
}

impl<T: Template + Default> Default for IndexedConfig<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T: Template> IndexedConfig<T> {
    /// Wraps the provided template. The index is initially empty.
    pub fn new(template: T) -> Self {
        Self {
            template,
            index: ConfigIndex::new(),
            options: IndexOptions::default(),
        }
    }

    /// Sets indexing options.
    #[must_use]
    pub fn with_options(mut self, options: IndexOptions) -> Self {
        self.options = options;
        self
    }

    /// Returns the template.
    pub fn template(&self) -> &T {
        &self.template
    }

    /// Returns a mutable reference to the template. Call [`Self::reindex()`] to update the index after modifications.
    pub fn template_mut(&mut self) -> &mut T {
        &mut self.template
    }

    /// Returns the index.
    pub fn index(&self) -> &ConfigIndex {
        &self.index
    }

    /// Returns a mutable reference to the index, e.g. to override values programmatically.
    pub fn index_mut(&mut self) -> &mut ConfigIndex {
        &mut self.index
    }

    /// Returns indexing options.
    pub fn options(&self) -> &IndexOptions {
        &self.options
    }

    /// Splits this config into the template and the index.
    pub fn into_parts(self) -> (T, ConfigIndex) {
        (self.template, self.index)
    }

    /// Populates the template from a loader and rebuilds the index from scratch.
    ///
    /// # Errors
    ///
    /// If the source cannot be read or decoded, or doesn't fit the template, returns an error; in this case,
    /// both the template and the index are left untouched. If indexing fails, returns an error as well;
    /// the index will contain entries for template nodes visited before the failure.
    pub fn load(&mut self, loader: &dyn Loader) -> Result<(), LoadError> {
        self.load_all(&[loader])
    }

    /// Populates the template from multiple loaders in order. Later loaders overwrite values from earlier loaders.
    /// The index is cleared once, and is then merged with the template state after each loader.
    ///
    /// # Errors
    ///
    /// Returns an error on the first failing loader. Template population and indexing for preceding loaders
    /// are not rolled back.
    #[tracing::instrument(level = "debug", name = "IndexedConfig::load_all", skip_all)]
    pub fn load_all(&mut self, loaders: &[&dyn Loader]) -> Result<(), LoadError> {
        for (i, &loader) in loaders.iter().enumerate() {
            populate(loader, &mut self.template)?;
            if i == 0 {
                self.index.clear();
            }
            self.index_template()?;
            tracing::debug!(
                origin = %loader.origin(),
                entry_count = self.index.len(),
                "loaded configuration source"
            );
        }
        Ok(())
    }

    /// Rebuilds the index from the current template state, discarding all existing entries.
    ///
    /// # Errors
    ///
    /// Propagates indexing errors.
    pub fn reindex(&mut self) -> Result<(), IndexError> {
        self.index.clear();
        self.index_template()
    }

    fn index_template(&mut self) -> Result<(), IndexError> {
        let root = self.template.describe();
        Indexer::new(&self.options).index(&root, &mut self.index)
    }
}
