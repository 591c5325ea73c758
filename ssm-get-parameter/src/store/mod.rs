pub mod adapters;
pub mod parameter_store;

pub use parameter_store::{ParameterStore, StoreError};
