mod named_entity;
mod profile;

pub use named_entity::NamedEntity;
pub use profile::{Choice, Profile, ProfileChoices, ProfileCollection};

pub const INTERESTS: &str = "Interests";
pub const FAVORITES: &str = "Favorites";
pub const PROFILES: &str = "Profiles";
