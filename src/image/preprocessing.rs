use crate::image::ImageLoader;
use crate::Result;
use image::{imageops::FilterType, DynamicImage};
use ndarray::{Array3, Array4, Axis};
use std::path::Path;

pub struct ImagePreprocessor;

impl ImagePreprocessor {
    /// 从文件路径到归一化输入张量
    pub fn preprocess_path(path: &Path, size: u32) -> Result<Array4<f32>> {
        let image = ImageLoader::from_path(path)?;
        Ok(Self::preprocess(&image, size))
    }

    /// 标准化到模型输入：RGB、Lanczos缩放到size×size、[0,1]归一化
    ///
    /// 输出形状 (1, size, size, 3)，NHWC排布，与Keras训练输入一致。
    /// 缩放必须用Lanczos，插值方式直接影响预测精度。
    pub fn preprocess(image: &DynamicImage, size: u32) -> Array4<f32> {
        let rgb = image.to_rgb8();
        let resized = image::imageops::resize(&rgb, size, size, FilterType::Lanczos3);

        let mut array = Array3::<f32>::zeros((size as usize, size as usize, 3));
        for (x, y, pixel) in resized.enumerate_pixels() {
            for c in 0..3 {
                array[[y as usize, x as usize, c]] = pixel.0[c] as f32 / 255.0;
            }
        }

        // 添加batch维度
        array.insert_axis(Axis(0))
    }
}
