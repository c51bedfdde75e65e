use crate::config::OnnxConfig;
use crate::models::labels::LabelSet;
use crate::utils::error::PredictError;
use crate::Result;
use ndarray::Array4;
use ort::{
    inputs,
    session::{builder::GraphOptimizationLevel, Session},
    value::{Tensor, ValueType},
};
use parking_lot::Mutex;
use std::path::Path;
use std::sync::Arc;

/// 单个ONNX分类模型
///
/// 一个会话可以带多个分类头（多输出模型），输出按位置与标签表配对。
pub struct ClassifierModel {
    session: Arc<Mutex<Session>>,
    input_name: String,       // 动态发现的输入名称
    output_names: Vec<String>, // 每个分类头一个输出名称
}

impl ClassifierModel {
    pub fn load(model_path: &Path, heads: &[LabelSet], config: &OnnxConfig) -> Result<Self> {
        if !model_path.exists() {
            return Err(PredictError::ModelLoad(format!(
                "Model not found: {}",
                model_path.display()
            )));
        }

        tracing::info!("Loading model from: {}", model_path.display());

        let session = Session::builder()?
            .with_optimization_level(GraphOptimizationLevel::Level3)?
            .with_intra_threads(config.intra_threads)?
            .commit_from_file(model_path)?;

        // 动态发现输入名称（Keras导出的图输入名不固定）
        let input_name = match session.inputs.first() {
            Some(input) => input.name.clone(),
            None => {
                return Err(PredictError::ModelLoad(format!(
                    "Model has no inputs: {}",
                    model_path.display()
                )));
            }
        };

        if session.outputs.len() < heads.len() {
            return Err(PredictError::ModelLoad(format!(
                "Model provides {} outputs but {} heads are configured: {}",
                session.outputs.len(),
                heads.len(),
                model_path.display()
            )));
        }

        // 按位置配对输出与分类头，静态输出宽度在加载期校验
        let mut output_names = Vec::with_capacity(heads.len());
        for (i, labels) in heads.iter().enumerate() {
            let output = &session.outputs[i];
            tracing::debug!("Output[{}] '{}' serves head '{}'", i, output.name, labels.head());

            if let ValueType::Tensor { shape, .. } = &output.output_type {
                if let Some(width) = shape.iter().copied().last() {
                    labels.validate_output_width(width)?;
                }
            }

            output_names.push(output.name.clone());
        }

        Ok(Self {
            session: Arc::new(Mutex::new(session)),
            input_name,
            output_names,
        })
    }

    /// 单张图片推理，返回每个分类头的概率向量
    pub fn predict(&self, image: &Array4<f32>) -> Result<Vec<Vec<f32>>> {
        let input_tensor = Tensor::from_array(image.clone())?;

        let mut session = self.session.lock();
        let outputs = session.run(inputs![self.input_name.as_str() => input_tensor])?;

        let mut head_probs = Vec::with_capacity(self.output_names.len());
        for name in &self.output_names {
            let predictions = match outputs.get(name.as_str()) {
                Some(output) => output.try_extract_array::<f32>()?.into_owned(),
                None => {
                    let available: Vec<String> =
                        outputs.keys().map(|s| s.to_string()).collect();
                    return Err(PredictError::Inference(format!(
                        "Output '{}' not found. Available outputs: {:?}",
                        name, available
                    )));
                }
            };
            head_probs.push(Self::probability_row(&predictions.view())?);
        }

        Ok(head_probs)
    }

    /// 提取 (1, N) 输出的概率行
    fn probability_row(predictions: &ndarray::ArrayViewD<f32>) -> Result<Vec<f32>> {
        let shape = predictions.shape();
        if shape.len() != 2 {
            return Err(PredictError::Inference(format!(
                "Expected 2D classification tensor, got {}D",
                shape.len()
            )));
        }
        if shape[0] != 1 {
            return Err(PredictError::Inference(format!(
                "Expected batch size 1, got {}",
                shape[0]
            )));
        }

        Ok((0..shape[1]).map(|i| predictions[[0, i]]).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::labels::CATEGORY_LABELS;

    #[test]
    fn test_load_missing_model_fails_fast() {
        let config = OnnxConfig { intra_threads: 1 };
        let err = ClassifierModel::load(
            Path::new("/nonexistent/category_classifier.onnx"),
            &[CATEGORY_LABELS],
            &config,
        )
        .unwrap_err();
        assert!(matches!(err, PredictError::ModelLoad(_)));
        assert_eq!(err.error_code(), "MODEL_LOAD_ERROR");
    }

    #[test]
    fn test_probability_row_rejects_bad_shapes() {
        let three_d = ndarray::ArrayD::<f32>::zeros(ndarray::IxDyn(&[1, 2, 3]));
        assert!(ClassifierModel::probability_row(&three_d.view()).is_err());

        let batched = ndarray::ArrayD::<f32>::zeros(ndarray::IxDyn(&[2, 3]));
        assert!(ClassifierModel::probability_row(&batched.view()).is_err());
    }

    #[test]
    fn test_probability_row_extracts_single_batch() {
        let mut arr = ndarray::ArrayD::<f32>::zeros(ndarray::IxDyn(&[1, 3]));
        arr[[0, 0]] = 0.1;
        arr[[0, 1]] = 0.7;
        arr[[0, 2]] = 0.2;
        let row = ClassifierModel::probability_row(&arr.view()).unwrap();
        assert_eq!(row, vec![0.1, 0.7, 0.2]);
    }
}
