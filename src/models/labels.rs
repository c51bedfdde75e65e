use crate::config::ModelTopology;
use crate::utils::error::PredictError;
use crate::Result;

/// 单个分类头的有序标签表
///
/// 标签顺序来自训练时的编码，索引即模型输出向量的下标。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LabelSet {
    head: &'static str,
    labels: &'static [&'static str],
}

/// 类别标签（两种拓扑一致）
pub const CATEGORY_LABELS: LabelSet = LabelSet {
    head: "category",
    labels: &["bottom", "footwear", "top"],
};

/// 成色标签（两种拓扑一致）
pub const CONDITION_LABELS: LabelSet = LabelSet {
    head: "condition",
    labels: &["good", "poor", "used"],
};

/// 颜色标签：多输出模型的训练编码（9类）
pub const COLOR_LABELS_COMBINED: LabelSet = LabelSet {
    head: "color",
    labels: &[
        "black", "blue", "brown", "green", "pink", "red", "silver", "white", "yellow",
    ],
};

/// 颜色标签：独立颜色模型的训练编码（10类）
pub const COLOR_LABELS_SPLIT: LabelSet = LabelSet {
    head: "color",
    labels: &[
        "black", "blue", "brown", "green", "grey", "orange", "pink", "red", "white", "yellow",
    ],
};

impl LabelSet {
    pub fn head(&self) -> &'static str {
        self.head
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// 按arg-max解码概率向量，并列时取最小下标
    pub fn decode(&self, probs: &[f32]) -> Result<&'static str> {
        if probs.len() != self.labels.len() {
            return Err(PredictError::Inference(format!(
                "Head '{}' expects {} probabilities, model returned {}",
                self.head,
                self.labels.len(),
                probs.len()
            )));
        }

        let mut max_idx = 0;
        let mut max_prob = probs[0];
        for (i, &prob) in probs.iter().enumerate().skip(1) {
            if prob > max_prob {
                max_prob = prob;
                max_idx = i;
            }
        }

        Ok(self.labels[max_idx])
    }

    /// 校验模型输出宽度与标签表长度一致
    ///
    /// 动态维度（-1或0）在加载期无法确定，留给解码期检查。
    pub fn validate_output_width(&self, width: i64) -> Result<()> {
        if width > 0 && width as usize != self.labels.len() {
            return Err(PredictError::ModelLoad(format!(
                "Head '{}' has {} labels but model output width is {}",
                self.head,
                self.labels.len(),
                width
            )));
        }
        Ok(())
    }
}

/// 一种拓扑下三个分类头的标签组合
#[derive(Debug, Clone, Copy)]
pub struct LabelBundle {
    pub category: LabelSet,
    pub color: LabelSet,
    pub condition: LabelSet,
}

impl LabelBundle {
    pub fn for_topology(topology: ModelTopology) -> Self {
        let color = match topology {
            ModelTopology::Combined => COLOR_LABELS_COMBINED,
            ModelTopology::Split => COLOR_LABELS_SPLIT,
        };
        Self {
            category: CATEGORY_LABELS,
            color,
            condition: CONDITION_LABELS,
        }
    }
}
