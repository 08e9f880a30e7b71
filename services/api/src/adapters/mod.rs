pub mod local_storage;
pub mod memory;

pub use local_storage::FileKeyValueStore;
pub use memory::MemoryKeyValueStore;
