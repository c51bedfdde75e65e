pub mod pipeline;
pub mod types;

pub use pipeline::PredictPipeline;
pub use types::{LabelCasing, OutputFormat, Prediction};
