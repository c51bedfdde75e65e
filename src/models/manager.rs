use crate::config::{Config, ModelTopology};
use crate::models::classifier::ClassifierModel;
use crate::models::labels::LabelBundle;
use crate::utils::error::PredictError;
use crate::Result;
use ndarray::Array4;

/// 已加载的模型组合
///
/// 启动期一次性加载，之后只读。句柄显式传递，不设全局单例。
pub struct GarmentModels {
    heads: HeadModels,
    labels: LabelBundle,
}

enum HeadModels {
    /// 多输出模型（类别+颜色）加一个成色模型
    Combined {
        joint: ClassifierModel,
        condition: ClassifierModel,
    },
    /// 类别、颜色、成色三个独立模型
    Split {
        category: ClassifierModel,
        color: ClassifierModel,
        condition: ClassifierModel,
    },
}

/// 三个分类头的原始概率向量
#[derive(Debug, Clone)]
pub struct HeadProbs {
    pub category: Vec<f32>,
    pub color: Vec<f32>,
    pub condition: Vec<f32>,
}

impl GarmentModels {
    /// 按拓扑加载全部模型
    pub fn load(config: &Config) -> Result<Self> {
        let labels = LabelBundle::for_topology(config.topology);
        let onnx = &config.onnx_config;

        let heads = match config.topology {
            ModelTopology::Combined => {
                tracing::info!("Loading combined category/color model and condition model");
                HeadModels::Combined {
                    joint: ClassifierModel::load(
                        &config.multi_output_model_path(),
                        &[labels.category, labels.color],
                        onnx,
                    )?,
                    condition: ClassifierModel::load(
                        &config.condition_model_path(),
                        &[labels.condition],
                        onnx,
                    )?,
                }
            }
            ModelTopology::Split => {
                tracing::info!("Loading independent category, color and condition models");
                HeadModels::Split {
                    category: ClassifierModel::load(
                        &config.category_model_path(),
                        &[labels.category],
                        onnx,
                    )?,
                    color: ClassifierModel::load(
                        &config.color_model_path(),
                        &[labels.color],
                        onnx,
                    )?,
                    condition: ClassifierModel::load(
                        &config.condition_model_path(),
                        &[labels.condition],
                        onnx,
                    )?,
                }
            }
        };

        tracing::info!("All models loaded");

        Ok(Self { heads, labels })
    }

    /// 当前拓扑下各分类头的标签表
    pub fn labels(&self) -> &LabelBundle {
        &self.labels
    }

    /// 同一张预处理张量依次通过全部模型
    pub fn predict(&self, image: &Array4<f32>) -> Result<HeadProbs> {
        match &self.heads {
            HeadModels::Combined { joint, condition } => {
                let mut joint_outputs = joint.predict(image)?.into_iter();
                let (Some(category), Some(color)) = (joint_outputs.next(), joint_outputs.next())
                else {
                    return Err(PredictError::Inference(
                        "Combined model returned fewer than two heads".to_string(),
                    ));
                };
                let condition = Self::single_head(condition.predict(image)?, "condition")?;
                Ok(HeadProbs {
                    category,
                    color,
                    condition,
                })
            }
            HeadModels::Split {
                category,
                color,
                condition,
            } => Ok(HeadProbs {
                category: Self::single_head(category.predict(image)?, "category")?,
                color: Self::single_head(color.predict(image)?, "color")?,
                condition: Self::single_head(condition.predict(image)?, "condition")?,
            }),
        }
    }

    fn single_head(mut outputs: Vec<Vec<f32>>, head: &str) -> Result<Vec<f32>> {
        match outputs.pop() {
            Some(probs) if outputs.is_empty() => Ok(probs),
            _ => Err(PredictError::Inference(format!(
                "Expected exactly one output for head '{}'",
                head
            ))),
        }
    }
}
