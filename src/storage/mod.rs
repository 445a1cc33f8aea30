pub mod cursor;
pub mod engine;
pub mod memory;
pub mod persistence;
pub mod selector;

pub use cursor::{Cursor, StoredDoc};
pub use engine::DocumentStore;
pub use memory::InMemoryStore;
pub use persistence::{SnapshotFormat, load_snapshot, save_snapshot};
pub use selector::Selector;
