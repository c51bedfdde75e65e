use thiserror::Error;

#[derive(Error, Debug)]
pub enum PredictError {
    #[error("{0}")]
    Usage(String),

    #[error("Model loading failed: {0}")]
    ModelLoad(String),

    #[error("Image preprocessing failed: {0}")]
    Preprocess(String),

    #[error("Inference failed: {0}")]
    Inference(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("ORT error: {0}")]
    Ort(#[from] ort::Error),
}

impl PredictError {
    pub fn error_code(&self) -> &'static str {
        match self {
            PredictError::Usage(_) => "USAGE_ERROR",
            PredictError::ModelLoad(_) => "MODEL_LOAD_ERROR",
            PredictError::Preprocess(_) => "PREPROCESS_ERROR",
            PredictError::Inference(_) => "INFERENCE_ERROR",
            PredictError::Config(_) => "CONFIG_ERROR",
            PredictError::Io(_) => "IO_ERROR",
            PredictError::Json(_) => "JSON_ERROR",
            PredictError::Ort(_) => "ORT_ERROR",
        }
    }

    /// 进程退出码：用法错误为2，其余失败为1
    pub fn exit_code(&self) -> i32 {
        match self {
            PredictError::Usage(_) => 2,
            _ => 1,
        }
    }
}
