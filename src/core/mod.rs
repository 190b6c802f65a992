pub mod engine;
pub mod pipeline;

pub use crate::domain::model::{OrderInput, TransformResult};
pub use crate::domain::ports::{ConfigProvider, Pipeline, ProductExtractor, Storage};
pub use crate::utils::error::Result;
