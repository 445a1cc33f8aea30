use crate::collection::{CollectionDump, NamedCollection};
use crate::config::StoreConfig;
use crate::core::Result;
use crate::entities::{FAVORITES, INTERESTS, NamedEntity, PROFILES, Profile, ProfileCollection};
use crate::storage::{InMemoryStore, load_snapshot, save_snapshot};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;
use tracing::{info, warn};

pub const SNAPSHOT_VERSION: u32 = 1;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogSnapshot {
    pub version: u32,
    pub created_at: DateTime<Utc>,
    pub interests: CollectionDump<NamedEntity>,
    pub favorites: CollectionDump<NamedEntity>,
    pub profiles: CollectionDump<Profile>,
}

/// The set of collections an application works with.
///
/// Each collection is built here and handed out by reference; nothing is
/// process-global, so tests can run any number of isolated catalogs.
pub struct Catalog {
    config: StoreConfig,
    interests: Arc<NamedCollection<NamedEntity>>,
    favorites: Arc<NamedCollection<NamedEntity>>,
    profiles: ProfileCollection,
}

impl Catalog {
    /// Fresh, empty in-memory catalog
    pub fn in_memory(config: StoreConfig) -> Result<Self> {
        let guard = config.define_guard;
        let interests = Arc::new(NamedCollection::<NamedEntity>::new(
            INTERESTS,
            Arc::new(InMemoryStore::<NamedEntity>::new(INTERESTS)),
            guard,
        )?);
        let favorites = Arc::new(NamedCollection::<NamedEntity>::new(
            FAVORITES,
            Arc::new(InMemoryStore::<NamedEntity>::new(FAVORITES)),
            guard,
        )?);
        let profiles = ProfileCollection::new(
            Arc::new(InMemoryStore::<Profile>::new(PROFILES)),
            guard,
            interests.clone(),
            favorites.clone(),
        )?;

        Ok(Self {
            config,
            interests,
            favorites,
            profiles,
        })
    }

    /// In-memory catalog, restored from `config.data_path` when that file exists
    pub fn open(config: StoreConfig) -> Result<Self> {
        let catalog = Self::in_memory(config)?;
        if let Some(path) = catalog.config.data_path.clone()
            && path.exists()
        {
            let snapshot: CatalogSnapshot = load_snapshot(&path, catalog.config.format)?;
            catalog.restore(snapshot)?;
        }
        Ok(catalog)
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    pub fn interests(&self) -> &Arc<NamedCollection<NamedEntity>> {
        &self.interests
    }

    pub fn favorites(&self) -> &Arc<NamedCollection<NamedEntity>> {
        &self.favorites
    }

    pub fn profiles(&self) -> &ProfileCollection {
        &self.profiles
    }

    /// Vocabulary collection by case-insensitive name
    pub fn vocabulary(&self, name: &str) -> Option<&Arc<NamedCollection<NamedEntity>>> {
        if name.eq_ignore_ascii_case(INTERESTS) {
            Some(&self.interests)
        } else if name.eq_ignore_ascii_case(FAVORITES) {
            Some(&self.favorites)
        } else {
            None
        }
    }

    /// Clear profiles first, then the vocabularies they reference.
    pub fn remove_all_entities(&self) -> Result<usize> {
        let removed = self.profiles.remove_all()?
            + self.interests.remove_all()?
            + self.favorites.remove_all()?;
        warn!(removed, "all entities removed");
        Ok(removed)
    }

    pub fn snapshot(&self) -> Result<CatalogSnapshot> {
        Ok(CatalogSnapshot {
            version: SNAPSHOT_VERSION,
            created_at: Utc::now(),
            interests: self.interests.dump_all()?,
            favorites: self.favorites.dump_all()?,
            profiles: self.profiles.dump_all()?,
        })
    }

    /// Replace current contents with `snapshot`.
    ///
    /// The snapshot is first restored into a scratch catalog. Only when that
    /// succeeds are the current contents cleared and reloaded, so a snapshot
    /// that fails to restore leaves this catalog as it was. Ids are
    /// reassigned.
    pub fn restore(&self, snapshot: CatalogSnapshot) -> Result<()> {
        if snapshot.version != SNAPSHOT_VERSION {
            warn!(
                found = snapshot.version,
                expected = SNAPSHOT_VERSION,
                "restoring snapshot with a different version"
            );
        }

        let staged = Self::in_memory(self.config.clone())?;
        staged.load(snapshot)?;

        self.remove_all_entities()?;
        self.load(staged.snapshot()?)
    }

    /// Define a snapshot's contents into this catalog. Vocabularies go first
    /// so profile references are checked against them.
    fn load(&self, snapshot: CatalogSnapshot) -> Result<()> {
        let interests = self.interests.restore(snapshot.interests)?.len();
        let favorites = self.favorites.restore(snapshot.favorites)?.len();
        let profiles = self.profiles.restore(snapshot.profiles)?.len();
        info!(interests, favorites, profiles, "catalog restored");
        Ok(())
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        save_snapshot(path, &self.snapshot()?, self.config.format)
    }

    /// Save to `config.data_path`; a no-op for a purely in-memory catalog
    pub fn save(&self) -> Result<()> {
        match &self.config.data_path {
            Some(path) => self.save_to(path),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded() -> Catalog {
        let catalog = Catalog::in_memory(StoreConfig::default()).unwrap();
        catalog
            .interests()
            .define(NamedEntity::new("Databases", Some("Storage systems")))
            .unwrap();
        catalog
            .favorites()
            .define(NamedEntity::new("Coffee", None::<String>))
            .unwrap();
        catalog
            .profiles()
            .define(Profile::new("ann").with_interests(["Databases"]).with_favorites(["Coffee"]))
            .unwrap();
        catalog
    }

    #[test]
    fn test_vocabulary_lookup() {
        let catalog = seeded();
        assert!(catalog.vocabulary("interests").is_some());
        assert!(catalog.vocabulary("FAVORITES").is_some());
        assert!(catalog.vocabulary("profiles").is_none());
    }

    #[test]
    fn test_remove_all_entities() {
        let catalog = seeded();
        assert_eq!(catalog.remove_all_entities().unwrap(), 3);
        assert!(catalog.interests().find_all().unwrap().is_empty());
        assert!(catalog.favorites().find_all().unwrap().is_empty());
        assert!(catalog.profiles().find_all().unwrap().is_empty());
        assert_eq!(catalog.remove_all_entities().unwrap(), 0);
    }

    #[test]
    fn test_snapshot_restore_into_fresh_catalog() {
        let source = seeded();
        let snapshot = source.snapshot().unwrap();
        assert_eq!(snapshot.version, SNAPSHOT_VERSION);

        let target = Catalog::in_memory(StoreConfig::default()).unwrap();
        target.restore(snapshot.clone()).unwrap();

        let restored = target.snapshot().unwrap();
        assert_eq!(restored.interests, snapshot.interests);
        assert_eq!(restored.favorites, snapshot.favorites);
        assert_eq!(restored.profiles, snapshot.profiles);

        // restore replaces, it does not merge
        target.restore(snapshot).unwrap();
        assert_eq!(target.interests().count().unwrap(), 1);
    }

    #[test]
    fn test_restore_rejects_dangling_profile_reference() {
        let mut snapshot = seeded().snapshot().unwrap();
        snapshot.interests.contents.clear();

        let target = Catalog::in_memory(StoreConfig::default()).unwrap();
        target
            .interests()
            .define(NamedEntity::new("Networks", None::<String>))
            .unwrap();
        let before = target.snapshot().unwrap();

        assert!(target.restore(snapshot).unwrap_err().is_not_found());

        let after = target.snapshot().unwrap();
        assert_eq!(after.interests, before.interests);
        assert_eq!(after.favorites, before.favorites);
        assert_eq!(after.profiles, before.profiles);
    }

    #[test]
    fn test_failed_restore_keeps_existing_contents() {
        let catalog = seeded();
        let before = catalog.snapshot().unwrap();

        let mut snapshot = before.clone();
        snapshot.interests.contents = vec![NamedEntity::new("Other", None::<String>)];
        assert!(catalog.restore(snapshot).unwrap_err().is_not_found());

        let after = catalog.snapshot().unwrap();
        assert_eq!(after.interests, before.interests);
        assert_eq!(after.favorites, before.favorites);
        assert_eq!(after.profiles, before.profiles);
        assert!(catalog.profiles().find_by_username("ann").is_ok());
    }

    #[test]
    fn test_restore_with_repeated_name_keeps_existing_contents() {
        let catalog = seeded();
        let before = catalog.snapshot().unwrap();

        let mut snapshot = before.clone();
        snapshot
            .favorites
            .contents
            .push(NamedEntity::new("Coffee", Some("again")));
        assert!(catalog.restore(snapshot).unwrap_err().is_duplicate_name());

        assert_eq!(catalog.snapshot().unwrap().favorites, before.favorites);
        assert_eq!(catalog.interests().count().unwrap(), 1);
    }
}
