use crate::config::Config;
use crate::image::ImagePreprocessor;
use crate::models::GarmentModels;
use crate::predict::types::Prediction;
use crate::Result;
use std::path::Path;
use std::time::Instant;

/// 预测流水线
///
/// 模型在构造时一次性加载，之后每次调用处理一张图片。
pub struct PredictPipeline {
    models: GarmentModels,
    config: Config,
}

impl PredictPipeline {
    pub fn new(config: Config) -> Result<Self> {
        let models = GarmentModels::load(&config)?;
        Ok(Self { models, config })
    }

    /// 单张图片的完整预测：预处理 → 各模型推理 → 解码
    pub fn predict_path(&self, path: &Path) -> Result<Prediction> {
        let start_time = Instant::now();

        let tensor = ImagePreprocessor::preprocess_path(path, self.config.input_size)?;
        let probs = self.models.predict(&tensor)?;

        let labels = self.models.labels();
        let casing = self.config.casing;
        let prediction = Prediction {
            category: casing.apply(labels.category.decode(&probs.category)?),
            color: casing.apply(labels.color.decode(&probs.color)?),
            condition: casing.apply(labels.condition.decode(&probs.condition)?),
        };

        tracing::info!(
            "Prediction completed: category={}, color={}, condition={}, total_time={:.3}s",
            prediction.category,
            prediction.color,
            prediction.condition,
            start_time.elapsed().as_secs_f32()
        );

        Ok(prediction)
    }

    /// 按配置的输出格式渲染
    pub fn render(&self, prediction: &Prediction) -> Result<String> {
        prediction.render(self.config.format)
    }
}
