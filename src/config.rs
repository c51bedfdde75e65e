use crate::predict::{LabelCasing, OutputFormat};
use crate::utils::error::PredictError;
use crate::Result;
use std::path::PathBuf;

/// 模型拓扑：决定加载几个模型文件
///
/// - Combined: 一个多输出模型（类别+颜色）加一个成色模型，共两个文件
/// - Split: 类别、颜色、成色三个独立模型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelTopology {
    Combined,
    Split,
}

impl ModelTopology {
    pub fn parse(value: &str) -> Result<Self> {
        match value {
            "combined" => Ok(ModelTopology::Combined),
            "split" => Ok(ModelTopology::Split),
            other => Err(PredictError::Config(format!(
                "Unknown topology '{}', expected 'combined' or 'split'",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    /// 模型文件目录
    pub models_dir: PathBuf,

    /// 模型拓扑
    pub topology: ModelTopology,

    /// 标签大小写策略
    pub casing: LabelCasing,

    /// 输出格式
    pub format: OutputFormat,

    /// 模型输入边长（正方形）
    pub input_size: u32,

    /// ONNX Runtime配置
    pub onnx_config: OnnxConfig,
}

#[derive(Debug, Clone)]
pub struct OnnxConfig {
    /// CPU线程数
    pub intra_threads: usize,
}

impl Config {
    pub fn new(models_dir: String, topology: &str, casing: &str, format: &str) -> Result<Self> {
        let cpu_cores = num_cpus::get();

        let onnx_config = OnnxConfig {
            intra_threads: (cpu_cores * 3 / 4).max(1), // 使用75%的CPU核心
        };

        Ok(Self {
            models_dir: PathBuf::from(models_dir),
            topology: ModelTopology::parse(topology)?,
            casing: LabelCasing::parse(casing)?,
            format: OutputFormat::parse(format)?,
            input_size: 128,
            onnx_config,
        })
    }

    /// 获取多输出模型路径（类别+颜色，Combined拓扑）
    pub fn multi_output_model_path(&self) -> PathBuf {
        self.models_dir.join("multi_output_model.onnx")
    }

    /// 获取类别模型路径（Split拓扑）
    pub fn category_model_path(&self) -> PathBuf {
        self.models_dir.join("category_classifier.onnx")
    }

    /// 获取颜色模型路径（Split拓扑）
    pub fn color_model_path(&self) -> PathBuf {
        self.models_dir.join("color_classifier.onnx")
    }

    /// 获取成色模型路径
    pub fn condition_model_path(&self) -> PathBuf {
        self.models_dir.join("clothing_condition_model.onnx")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_parses_valid_options() {
        let config = Config::new("models".to_string(), "combined", "title", "text").unwrap();
        assert_eq!(config.topology, ModelTopology::Combined);
        assert_eq!(config.casing, LabelCasing::Title);
        assert_eq!(config.format, OutputFormat::Text);
        assert_eq!(config.input_size, 128);
        assert!(config.onnx_config.intra_threads >= 1);
    }

    #[test]
    fn test_config_rejects_unknown_topology() {
        let err = Config::new("models".to_string(), "ensemble", "title", "text").unwrap_err();
        assert!(matches!(err, PredictError::Config(_)));
        assert_eq!(err.error_code(), "CONFIG_ERROR");
    }

    #[test]
    fn test_config_rejects_unknown_casing_and_format() {
        assert!(Config::new("models".to_string(), "split", "upper", "json").is_err());
        assert!(Config::new("models".to_string(), "split", "sentence", "xml").is_err());
    }

    #[test]
    fn test_model_paths_join_models_dir() {
        let config = Config::new("artifacts".to_string(), "split", "sentence", "json").unwrap();
        assert_eq!(
            config.color_model_path(),
            PathBuf::from("artifacts").join("color_classifier.onnx")
        );
        assert_eq!(
            config.condition_model_path(),
            PathBuf::from("artifacts").join("clothing_condition_model.onnx")
        );
    }
}
