mod ram;

pub use ram::{Ram, RamStats, Result, StorageError};
