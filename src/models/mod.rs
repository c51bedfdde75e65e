pub mod classifier;
pub mod labels;
pub mod manager;

pub use classifier::ClassifierModel;
pub use labels::{LabelBundle, LabelSet};
pub use manager::{GarmentModels, HeadProbs};
