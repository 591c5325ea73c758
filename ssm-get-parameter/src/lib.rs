pub mod audit;
pub mod configs;
pub mod domain;
pub mod error;
pub mod messages;
pub mod pipeline;
pub mod store;
pub mod task;
pub mod transform;

pub use error::TaskError;
