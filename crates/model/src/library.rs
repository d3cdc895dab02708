//! Cell library handle.

/// Cell library backing a model's `.gate` cells.
///
/// Library loading is not supported, so every handle is invalid. Readers check
/// [`CellLibrary::is_valid`] before accepting library-dependent statements.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CellLibrary {
    name: Option<String>,
}

impl CellLibrary {
    /// True when a library has been bound.
    pub fn is_valid(&self) -> bool {
        self.name.is_some()
    }

    /// The library name, if bound.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }
}
