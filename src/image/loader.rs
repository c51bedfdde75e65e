use crate::utils::error::PredictError;
use crate::Result;
use image::DynamicImage;
use std::path::Path;

pub struct ImageLoader;

impl ImageLoader {
    /// 从文件路径加载图像
    ///
    /// 读不到或解不开都算预处理阶段错误，错误信息带上路径。
    pub fn from_path(path: &Path) -> Result<DynamicImage> {
        let image = image::open(path).map_err(|e| {
            PredictError::Preprocess(format!("Cannot read image {}: {}", path.display(), e))
        })?;

        Ok(image)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_path_missing_file_is_preprocess_error() {
        let err = ImageLoader::from_path(Path::new("/nonexistent/shirt.jpg")).unwrap_err();
        assert!(matches!(err, PredictError::Preprocess(_)));
        assert_eq!(err.error_code(), "PREPROCESS_ERROR");
        assert_eq!(err.exit_code(), 1);
    }
}
