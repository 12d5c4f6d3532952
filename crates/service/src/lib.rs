//! Service layer running entity requests on top of models.
//! - One pipeline for every entity kind: decode, validate, store, shape.
//! - Storage is a trait object so the database backend can be swapped for memory.
//! - Reuses validation and entity definitions in `models` crate.

pub mod errors;
pub mod storage;
pub mod response;
pub mod records;

pub use errors::ServiceError;
pub use records::RecordService;
pub use storage::{MemoryStorage, SeaOrmStorage, Storage};
