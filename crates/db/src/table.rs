//! Append-only in-memory table with sequence ids.

use officehub_core::types::DbId;

/// Rows are stored in insertion order; the row with id `n` sits at index
/// `n - 1`. Rows are never removed, only updated in place.
#[derive(Debug, Clone)]
pub struct Table<T> {
    rows: Vec<T>,
}

impl<T> Default for Table<T> {
    fn default() -> Self {
        Self { rows: Vec::new() }
    }
}

impl<T> Table<T> {
    /// Insert a row built from its newly assigned id.
    pub fn insert_with(&mut self, build: impl FnOnce(DbId) -> T) -> &T {
        let id = self.rows.len() as DbId + 1;
        self.rows.push(build(id));
        &self.rows[self.rows.len() - 1]
    }

    pub fn get(&self, id: DbId) -> Option<&T> {
        Self::index(id).and_then(|i| self.rows.get(i))
    }

    pub fn get_mut(&mut self, id: DbId) -> Option<&mut T> {
        Self::index(id).and_then(|i| self.rows.get_mut(i))
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.rows.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, T> {
        self.rows.iter_mut()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    fn index(id: DbId) -> Option<usize> {
        usize::try_from(id).ok()?.checked_sub(1)
    }
}

impl<'a, T> IntoIterator for &'a Table<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}
