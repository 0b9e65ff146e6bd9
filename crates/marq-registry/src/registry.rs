//! The ordered registry itself.

use crate::{EntryId, Position, RegistryError};

/// Key-unique, order-significant collection of pipeline entries.
///
/// Iteration order is the application order of the owning stage. Entries are
/// inserted at a [`Position`] and keep their slot until explicitly
/// [`relocate`](Registry::relocate)d or [`remove`](Registry::remove)d;
/// [`set`](Registry::set) replaces a value in place without disturbing the
/// order.
///
/// Backed by a plain vector: registries hold at most a few dozen entries and
/// are scanned linearly at dispatch time anyway.
#[derive(Debug, Clone)]
pub struct Registry<V> {
    entries: Vec<(EntryId, V)>,
}

impl<V> Registry<V> {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the registry is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether an entry with this id exists.
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.index_of(id).is_some()
    }

    /// Insert a new entry at the given position.
    ///
    /// # Errors
    ///
    /// [`RegistryError::DuplicateKey`] if the id is taken,
    /// [`RegistryError::MissingAnchor`] if `Before`/`After` names an absent
    /// entry.
    pub fn insert(
        &mut self,
        id: impl Into<EntryId>,
        value: V,
        position: Position,
    ) -> Result<(), RegistryError> {
        let id = id.into();
        if self.contains(id.as_str()) {
            return Err(RegistryError::DuplicateKey(id));
        }
        let at = self.resolve(&position)?;
        self.entries.insert(at, (id, value));
        Ok(())
    }

    /// Insert a new entry at the end. Shorthand for
    /// `insert(id, value, Position::End)`.
    ///
    /// # Errors
    ///
    /// [`RegistryError::DuplicateKey`] if the id is taken.
    pub fn push(&mut self, id: impl Into<EntryId>, value: V) -> Result<(), RegistryError> {
        self.insert(id, value, Position::End)
    }

    /// Replace the value for an id in place, preserving its position.
    ///
    /// If no entry with this id exists, the entry is appended at the end.
    pub fn set(&mut self, id: impl Into<EntryId>, value: V) {
        let id = id.into();
        match self.index_of(id.as_str()) {
            Some(at) => self.entries[at].1 = value,
            None => self.entries.push((id, value)),
        }
    }

    /// Look up an entry's value.
    ///
    /// # Errors
    ///
    /// [`RegistryError::KeyNotFound`] if absent.
    pub fn get(&self, id: &str) -> Result<&V, RegistryError> {
        self.index_of(id)
            .map(|at| &self.entries[at].1)
            .ok_or_else(|| RegistryError::KeyNotFound(EntryId::new(id)))
    }

    /// Look up an entry's value mutably.
    ///
    /// # Errors
    ///
    /// [`RegistryError::KeyNotFound`] if absent.
    pub fn get_mut(&mut self, id: &str) -> Result<&mut V, RegistryError> {
        match self.index_of(id) {
            Some(at) => Ok(&mut self.entries[at].1),
            None => Err(RegistryError::KeyNotFound(EntryId::new(id))),
        }
    }

    /// Remove an entry, closing the gap. Returns the removed value.
    ///
    /// # Errors
    ///
    /// [`RegistryError::KeyNotFound`] if absent.
    pub fn remove(&mut self, id: &str) -> Result<V, RegistryError> {
        let at = self
            .index_of(id)
            .ok_or_else(|| RegistryError::KeyNotFound(EntryId::new(id)))?;
        Ok(self.entries.remove(at).1)
    }

    /// Move an existing entry to a new position.
    ///
    /// On error the registry is left unchanged. Relocating an entry relative
    /// to itself fails with `MissingAnchor`.
    ///
    /// # Errors
    ///
    /// [`RegistryError::KeyNotFound`] if the entry is absent,
    /// [`RegistryError::MissingAnchor`] if the position names an absent
    /// anchor.
    pub fn relocate(&mut self, id: &str, position: Position) -> Result<(), RegistryError> {
        let from = self
            .index_of(id)
            .ok_or_else(|| RegistryError::KeyNotFound(EntryId::new(id)))?;
        let entry = self.entries.remove(from);
        match self.resolve(&position) {
            Ok(to) => {
                self.entries.insert(to, entry);
                Ok(())
            }
            Err(err) => {
                self.entries.insert(from, entry);
                Err(err)
            }
        }
    }

    /// Remove all entries.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Iterate over `(id, value)` pairs in current order.
    pub fn iter(&self) -> impl Iterator<Item = (&EntryId, &V)> {
        self.entries.iter().map(|(id, value)| (id, value))
    }

    /// Iterate over ids in current order.
    pub fn keys(&self) -> impl Iterator<Item = &EntryId> {
        self.entries.iter().map(|(id, _)| id)
    }

    /// Iterate over values in current order.
    pub fn values(&self) -> impl Iterator<Item = &V> {
        self.entries.iter().map(|(_, value)| value)
    }

    fn index_of(&self, id: &str) -> Option<usize> {
        self.entries.iter().position(|(k, _)| k.as_str() == id)
    }

    fn resolve(&self, position: &Position) -> Result<usize, RegistryError> {
        match position {
            Position::Begin => Ok(0),
            Position::End => Ok(self.entries.len()),
            Position::Before(anchor) => self
                .index_of(anchor.as_str())
                .ok_or_else(|| RegistryError::MissingAnchor(anchor.clone())),
            Position::After(anchor) => self
                .index_of(anchor.as_str())
                .map(|at| at + 1)
                .ok_or_else(|| RegistryError::MissingAnchor(anchor.clone())),
        }
    }
}

impl<V> Default for Registry<V> {
    fn default() -> Self {
        Self::new()
    }
}
