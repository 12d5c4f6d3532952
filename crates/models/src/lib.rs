pub mod errors;
pub mod db;
pub mod client;
pub mod market;
pub mod record;
pub mod validation;

pub use client::Client;
pub use market::Market;
pub use record::{Action, EntityKind, Record};
pub use validation::ValidationError;

#[cfg(test)]
mod tests;
