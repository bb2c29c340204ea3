use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;
use parking_lot::RwLock;

use crate::extension::error::ExtensionError;

/// Anything stored in an [`ExtensionRegistry`] exposes a stable identifier
pub trait Identified {
    fn id(&self) -> &str;
}

/// What a registry does when an identifier is registered twice
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DuplicatePolicy {
    /// Fail with [`ExtensionError::DuplicateRegistration`]
    Reject,
    /// Keep the existing entry and report that nothing was inserted
    Ignore,
}

struct Entry<T: ?Sized> {
    item: Arc<T>,
    owner: String,
}

/// Concurrency-safe map from identifiers to registered extensions.
///
/// Entries keep registration order, which is the resolution order of
/// [`ExtensionRegistry::find_first`]. Every entry records the owner that
/// registered it, and only that owner may unregister it. Registrations are
/// rare and lookups frequent, so the map sits behind a read-write lock and
/// all multi-item reads return point-in-time snapshots.
pub struct ExtensionRegistry<T: ?Sized> {
    kind: &'static str,
    policy: DuplicatePolicy,
    entries: RwLock<IndexMap<String, Entry<T>>>,
}

impl<T: ?Sized + Identified> ExtensionRegistry<T> {
    /// Create an empty registry. `kind` names the extension point in errors and logs.
    pub fn new(kind: &'static str, policy: DuplicatePolicy) -> Self {
        Self {
            kind,
            policy,
            entries: RwLock::new(IndexMap::new()),
        }
    }

    pub fn kind(&self) -> &'static str {
        self.kind
    }

    pub fn policy(&self) -> DuplicatePolicy {
        self.policy
    }

    /// Register `item` on behalf of `owner`.
    ///
    /// Returns `Ok(true)` when inserted and `Ok(false)` when an ignoring
    /// registry already holds the identifier. Existing entries are never
    /// overwritten.
    pub fn register(&self, item: Arc<T>, owner: &str) -> Result<bool, ExtensionError> {
        let id = item.id().to_string();
        let mut entries = self.entries.write();

        if let Some(existing) = entries.get(&id) {
            return match self.policy {
                DuplicatePolicy::Reject => Err(ExtensionError::DuplicateRegistration {
                    kind: self.kind,
                    id,
                    owner: owner.to_string(),
                    existing_owner: existing.owner.clone(),
                }),
                DuplicatePolicy::Ignore => {
                    log::debug!(
                        "Ignoring duplicate {} '{}' from '{}', kept the one from '{}'",
                        self.kind, id, owner, existing.owner
                    );
                    Ok(false)
                }
            };
        }

        log::debug!("Registered {} '{}' for '{}'", self.kind, id, owner);
        entries.insert(
            id,
            Entry {
                item,
                owner: owner.to_string(),
            },
        );
        Ok(true)
    }

    pub fn get(&self, id: &str) -> Option<Arc<T>> {
        self.entries.read().get(id).map(|entry| entry.item.clone())
    }

    pub fn contains(&self, id: &str) -> bool {
        self.entries.read().contains_key(id)
    }

    /// The owner that registered `id`
    pub fn owner_of(&self, id: &str) -> Option<String> {
        self.entries.read().get(id).map(|entry| entry.owner.clone())
    }

    /// Snapshot of every registered item in registration order
    pub fn all(&self) -> Vec<Arc<T>> {
        self.entries.read().values().map(|entry| entry.item.clone()).collect()
    }

    /// Identifiers registered by `owner`, in registration order
    pub fn ids_owned_by(&self, owner: &str) -> Vec<String> {
        self.entries
            .read()
            .iter()
            .filter(|(_, entry)| entry.owner == owner)
            .map(|(id, _)| id.clone())
            .collect()
    }

    /// First item, in registration order, satisfying `predicate`.
    ///
    /// The predicate runs on a snapshot, so it may call back into the registry.
    pub fn find_first<P>(&self, predicate: P) -> Option<Arc<T>>
    where
        P: Fn(&T) -> bool,
    {
        self.all().into_iter().find(|item| predicate(item))
    }

    /// Remove `id`, provided `owner` is the one that registered it
    pub fn unregister(&self, id: &str, owner: &str) -> Result<Arc<T>, ExtensionError> {
        let mut entries = self.entries.write();
        if let Some(entry) = entries.get(id) {
            if entry.owner != owner {
                return Err(ExtensionError::NotOwner {
                    kind: self.kind,
                    id: id.to_string(),
                    owner: owner.to_string(),
                    actual_owner: entry.owner.clone(),
                });
            }
        }

        // shift_remove keeps the remaining registration order intact
        let removed = entries.shift_remove(id).ok_or_else(|| ExtensionError::NotFound {
            kind: self.kind,
            id: id.to_string(),
        })?;
        log::debug!("Unregistered {} '{}' for '{}'", self.kind, id, owner);
        Ok(removed.item)
    }

    /// Remove everything `owner` registered. Returns the number of removed items.
    pub fn unregister_owned_by(&self, owner: &str) -> usize {
        let mut entries = self.entries.write();
        let before = entries.len();
        entries.retain(|_, entry| entry.owner != owner);
        let removed = before - entries.len();
        if removed > 0 {
            log::debug!("Removed {} {} registration(s) owned by '{}'", removed, self.kind, owner);
        }
        removed
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}

impl<T: ?Sized> fmt::Debug for ExtensionRegistry<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let ids: Vec<String> = self.entries.read().keys().cloned().collect();
        f.debug_struct("ExtensionRegistry")
            .field("kind", &self.kind)
            .field("policy", &self.policy)
            .field("ids", &ids)
            .finish()
    }
}
