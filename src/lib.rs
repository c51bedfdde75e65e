pub mod config;
pub mod image;
pub mod models;
pub mod predict;
pub mod utils;

// 重新导出主要类型
pub use config::Config;
pub use predict::{PredictPipeline, Prediction};
pub use utils::error::PredictError;

pub type Result<T> = std::result::Result<T, PredictError>;
