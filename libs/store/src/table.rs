use std::collections::BTreeMap;

use bestiary_types::{EnemyRecord, ProfileRecord, UserRecord};
use parking_lot::RwLock;
use tracing::debug;

use crate::error::StoreError;

/// A row that knows its own primary key
pub trait Record: Clone + Send + Sync + 'static {
    fn id(&self) -> u64;
}

impl Record for UserRecord {
    fn id(&self) -> u64 {
        self.id
    }
}

impl Record for ProfileRecord {
    fn id(&self) -> u64 {
        self.id
    }
}

impl Record for EnemyRecord {
    fn id(&self) -> u64 {
        self.id
    }
}

struct Rows<T> {
    by_id: BTreeMap<u64, T>,
    next_id: u64,
}

/// Rows keyed by id, listed in ascending id order
pub struct Table<T: Record> {
    entity: &'static str,
    rows: RwLock<Rows<T>>,
}

impl<T: Record> Table<T> {
    /// `entity` names a single row in messages, e.g. "Enemy"
    pub fn new(entity: &'static str) -> Self {
        Self {
            entity,
            rows: RwLock::new(Rows {
                by_id: BTreeMap::new(),
                next_id: 1,
            }),
        }
    }

    pub fn entity(&self) -> &'static str {
        self.entity
    }

    pub fn get(&self, id: u64) -> Result<T, StoreError> {
        self.rows
            .read()
            .by_id
            .get(&id)
            .cloned()
            .ok_or(StoreError::NotFound {
                entity: self.entity,
                id,
            })
    }

    pub fn find(&self, predicate: impl Fn(&T) -> bool) -> Option<T> {
        self.rows.read().by_id.values().find(|row| predicate(row)).cloned()
    }

    pub fn filter(&self, predicate: impl Fn(&T) -> bool) -> Vec<T> {
        self.rows
            .read()
            .by_id
            .values()
            .filter(|row| predicate(row))
            .cloned()
            .collect()
    }

    pub fn all(&self) -> Vec<T> {
        self.rows.read().by_id.values().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.rows.read().by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Insert a row built from a freshly allocated id
    pub fn insert<E>(&self, build: impl FnOnce(u64) -> Result<T, E>) -> Result<T, E> {
        self.insert_checked(|_| Ok(()), build)
    }

    /// Run `check` against every stored row, then insert
    ///
    /// The id is only consumed when the row is actually stored.
    pub fn insert_checked<E>(
        &self,
        check: impl Fn(&T) -> Result<(), E>,
        build: impl FnOnce(u64) -> Result<T, E>,
    ) -> Result<T, E> {
        let mut rows = self.rows.write();
        rows.by_id.values().try_for_each(&check)?;

        let id = rows.next_id;
        let row = build(id)?;
        rows.next_id += 1;
        rows.by_id.insert(id, row.clone());

        debug!(entity = self.entity, id, "row inserted");
        Ok(row)
    }

    /// Read-modify-write of one row
    ///
    /// `apply` sees the current row and returns its replacement; `check` then
    /// compares the replacement with every other row. Nothing is written if
    /// either step fails.
    pub fn update<E>(
        &self,
        id: u64,
        check: impl Fn(&T, &T) -> Result<(), E>,
        apply: impl FnOnce(&T) -> Result<T, E>,
    ) -> Result<T, E>
    where
        E: From<StoreError>,
    {
        let mut rows = self.rows.write();
        let current = rows.by_id.get(&id).ok_or(StoreError::NotFound {
            entity: self.entity,
            id,
        })?;

        let updated = apply(current)?;
        rows.by_id
            .values()
            .filter(|row| row.id() != id)
            .try_for_each(|other| check(other, &updated))?;
        rows.by_id.insert(id, updated.clone());

        debug!(entity = self.entity, id, "row updated");
        Ok(updated)
    }

    pub fn remove(&self, id: u64) -> Result<T, StoreError> {
        let removed = self.rows.write().by_id.remove(&id).ok_or(StoreError::NotFound {
            entity: self.entity,
            id,
        })?;
        debug!(entity = self.entity, id, "row removed");
        Ok(removed)
    }

    /// Remove every row matching `predicate`, returning how many went
    pub fn remove_where(&self, predicate: impl Fn(&T) -> bool) -> usize {
        let mut rows = self.rows.write();
        let before = rows.by_id.len();
        rows.by_id.retain(|_, row| !predicate(row));
        before - rows.by_id.len()
    }
}

impl<T: Record> std::fmt::Debug for Table<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Table")
            .field("entity", &self.entity)
            .field("rows", &self.len())
            .finish()
    }
}
