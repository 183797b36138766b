pub mod error;
pub mod json_file;
pub mod memory;
pub mod snapshot;
pub mod store;

pub use error::{Result, StateStoreError};
pub use json_file::JsonFileStore;
pub use memory::InMemoryStateStore;
pub use snapshot::LotSnapshot;
pub use store::StateStore;
