use std::{collections::HashMap, fmt};

use crate::error::InterpretError;

/// An opaque reference to a value recorded in a [`HandleTable`].
///
/// Handles are only issued by [`HandleTable::allocate`] and are meaningful
/// only to the table that issued them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Handle(u64);

impl fmt::Display for Handle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "handle #{}", self.0)
    }
}

/// Maps the handles of one line back to the text they stand in for.
///
/// A table is created empty for every interpreted line and dropped when the
/// line is done, which invalidates all of its handles.
#[derive(Debug, Default)]
pub struct HandleTable {
    next:   u64,
    values: HashMap<Handle, String>,
}

impl HandleTable {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `value` and returns a handle no other entry of this table has.
    ///
    /// # Example
    /// ```
    /// use qline::interpreter::normalizer::handle::HandleTable;
    ///
    /// let mut table = HandleTable::new();
    /// let first = table.allocate("1");
    /// let second = table.allocate("1");
    ///
    /// assert_ne!(first, second);
    /// assert_eq!(table.get(first), Some("1"));
    /// ```
    pub fn allocate(&mut self, value: &str) -> Handle {
        let handle = Handle(self.next);
        self.next += 1;
        self.values.insert(handle, value.to_string());
        handle
    }

    /// Looks up the text behind a handle.
    #[must_use]
    pub fn get(&self, handle: Handle) -> Option<&str> {
        self.values.get(&handle).map(String::as_str)
    }

    /// Looks up the text behind a handle that must have been issued by this
    /// table.
    ///
    /// # Errors
    /// Returns [`InterpretError::UnresolvedHandle`] if the table has no entry
    /// for `handle`.
    pub fn resolve(&self, handle: Handle) -> Result<&str, InterpretError> {
        self.get(handle)
            .ok_or(InterpretError::UnresolvedHandle { handle })
    }

    /// The number of recorded values.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns true if nothing has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
