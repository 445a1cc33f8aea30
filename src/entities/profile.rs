use crate::collection::{CollectionDump, DefineGuard, NamedCollection};
use crate::core::schema::{clean_list, clean_optional, clean_text};
use crate::core::{
    DataType, DocId, Document, Field, IntoDocId, NamedDocument, Result, Schema, Value,
};
use crate::entities::NamedEntity;
use crate::storage::{Cursor, DocumentStore, Selector, StoredDoc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::debug;

/// A user profile. Interests and favorites are stored as names, not ids.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub username: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub picture: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub github: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub facebook: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instagram: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(default)]
    pub interests: Vec<String>,
    #[serde(default)]
    pub favorites: Vec<String>,
}

impl Profile {
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            ..Self::default()
        }
    }

    pub fn with_interests<S: Into<String>>(mut self, names: impl IntoIterator<Item = S>) -> Self {
        self.interests = names.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_favorites<S: Into<String>>(mut self, names: impl IntoIterator<Item = S>) -> Self {
        self.favorites = names.into_iter().map(Into::into).collect();
        self
    }
}

impl Document for Profile {
    fn schema() -> Schema {
        let optional_text = |name: &str| Field::new(name, DataType::Text).optional();
        Schema::new(
            "Profile",
            vec![
                Field::new("username", DataType::Text),
                optional_text("firstName"),
                optional_text("lastName"),
                optional_text("title"),
                optional_text("picture"),
                optional_text("github"),
                optional_text("facebook"),
                optional_text("instagram"),
                optional_text("bio"),
                Field::new("interests", DataType::TextList),
                Field::new("favorites", DataType::TextList),
            ],
        )
    }

    fn field(&self, name: &str) -> Value {
        match name {
            "username" => Value::from(self.username.clone()),
            "firstName" => Value::from(self.first_name.clone()),
            "lastName" => Value::from(self.last_name.clone()),
            "title" => Value::from(self.title.clone()),
            "picture" => Value::from(self.picture.clone()),
            "github" => Value::from(self.github.clone()),
            "facebook" => Value::from(self.facebook.clone()),
            "instagram" => Value::from(self.instagram.clone()),
            "bio" => Value::from(self.bio.clone()),
            "interests" => Value::from(self.interests.clone()),
            "favorites" => Value::from(self.favorites.clone()),
            _ => Value::Null,
        }
    }

    fn clean(&mut self) {
        clean_text(&mut self.username);
        for field in [
            &mut self.first_name,
            &mut self.last_name,
            &mut self.title,
            &mut self.picture,
            &mut self.github,
            &mut self.facebook,
            &mut self.instagram,
            &mut self.bio,
        ] {
            clean_optional(field);
        }
        clean_list(&mut self.interests);
        clean_list(&mut self.favorites);
    }
}

impl NamedDocument for Profile {
    const NAME_FIELD: &'static str = "username";

    fn name(&self) -> &str {
        &self.username
    }
}

/// One selectable vocabulary entry and whether a profile selects it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Choice {
    pub label: String,
    pub selected: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileChoices {
    pub interests: Vec<Choice>,
    pub favorites: Vec<Choice>,
}

/// Profiles keyed by username, with references checked against the
/// interest and favorite vocabularies on every write.
#[derive(Clone)]
pub struct ProfileCollection {
    profiles: NamedCollection<Profile>,
    interests: Arc<NamedCollection<NamedEntity>>,
    favorites: Arc<NamedCollection<NamedEntity>>,
}

impl ProfileCollection {
    pub fn new(
        store: Arc<dyn DocumentStore<Profile>>,
        guard: DefineGuard,
        interests: Arc<NamedCollection<NamedEntity>>,
        favorites: Arc<NamedCollection<NamedEntity>>,
    ) -> Result<Self> {
        Ok(Self {
            profiles: NamedCollection::new(store.name().to_string(), store, guard)?,
            interests,
            favorites,
        })
    }

    pub fn profiles(&self) -> &NamedCollection<Profile> {
        &self.profiles
    }

    pub fn schema(&self) -> &Schema {
        self.profiles.schema()
    }

    fn assert_references(&self, profile: &Profile) -> Result<()> {
        self.interests.assert_names(&profile.interests)?;
        self.favorites.assert_names(&profile.favorites)
    }

    /// Insert a profile once its username is free and every referenced
    /// interest and favorite exists.
    pub fn define(&self, profile: Profile) -> Result<DocId> {
        self.profiles.validate(&profile)?;
        self.assert_references(&profile)?;
        self.profiles.define(profile)
    }

    /// Replace the profile stored under `username`.
    ///
    /// The submitted profile is cleaned, then validated, then its references
    /// are checked; nothing is written unless all three pass. The username
    /// comes from the lookup key, not from the submitted document.
    pub fn update(&self, username: &str, submitted: Profile) -> Result<DocId> {
        let id = self.profiles.find_id(username)?;

        let mut cleaned = self.schema().clean(submitted);
        cleaned.username = username.to_string();
        self.profiles.validate(&cleaned)?;
        self.assert_references(&cleaned)?;

        self.profiles.update(id, |doc| *doc = cleaned.clone())?;
        debug!(%username, %id, "profile updated");
        Ok(id)
    }

    pub fn find_by_username(&self, username: &str) -> Result<StoredDoc<Profile>> {
        self.profiles
            .find_doc(Selector::field(Profile::NAME_FIELD, username))
    }

    pub fn find_all(&self) -> Result<Cursor<Profile>> {
        self.profiles.find_all()
    }

    pub fn interest_ids(&self, username: &str) -> Result<Vec<DocId>> {
        let profile = self.find_by_username(username)?.doc;
        self.interests.find_ids(Some(profile.interests.as_slice()))
    }

    pub fn favorite_ids(&self, username: &str) -> Result<Vec<DocId>> {
        let profile = self.find_by_username(username)?.doc;
        self.favorites.find_ids(Some(profile.favorites.as_slice()))
    }

    /// Profiles whose interests include `name`
    pub fn with_interest(&self, name: &str) -> Result<Cursor<Profile>> {
        self.profiles.find(&Selector::field("interests", name))
    }

    /// Profiles whose favorites include `name`
    pub fn with_favorite(&self, name: &str) -> Result<Cursor<Profile>> {
        self.profiles.find(&Selector::field("favorites", name))
    }

    /// Every interest and favorite, flagged with whether `username` selects it.
    pub fn choices(&self, username: &str) -> Result<ProfileChoices> {
        let profile = self.find_by_username(username)?.doc;

        let mark = |vocabulary: &NamedCollection<NamedEntity>, selected: &[String]| {
            vocabulary.find_all().map(|cursor| {
                cursor
                    .iter()
                    .map(|entry| Choice {
                        label: entry.doc.name.clone(),
                        selected: selected.contains(&entry.doc.name),
                    })
                    .collect::<Vec<_>>()
            })
        };

        Ok(ProfileChoices {
            interests: mark(self.interests.as_ref(), profile.interests.as_slice())?,
            favorites: mark(self.favorites.as_ref(), profile.favorites.as_slice())?,
        })
    }

    pub fn dump_one(&self, id: impl IntoDocId) -> Result<Profile> {
        self.profiles.dump_one(id)
    }

    pub fn dump_all(&self) -> Result<CollectionDump<Profile>> {
        self.profiles.dump_all()
    }

    /// Define every profile of `dump`. Usernames and references are all
    /// checked before the first write.
    pub fn restore(&self, dump: CollectionDump<Profile>) -> Result<Vec<DocId>> {
        self.profiles.check_dump(&dump)?;
        dump.contents
            .iter()
            .try_for_each(|profile| self.assert_references(profile))?;
        dump.contents
            .into_iter()
            .map(|profile| self.define(profile))
            .collect()
    }

    pub fn remove_all(&self) -> Result<usize> {
        self.profiles.remove_all()
    }
}
