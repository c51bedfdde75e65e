use crate::utils::error::PredictError;
use crate::Result;
use serde::Serialize;

/// 标签大小写策略
///
/// 两个部署目标的行为不一致，作为配置保留：
/// - Title: 每个词首字母大写（"like new" → "Like New"）
/// - Sentence: 仅整串首字母大写，其余不变
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelCasing {
    Title,
    Sentence,
}

impl LabelCasing {
    pub fn parse(value: &str) -> Result<Self> {
        match value {
            "title" => Ok(LabelCasing::Title),
            "sentence" => Ok(LabelCasing::Sentence),
            other => Err(PredictError::Config(format!(
                "Unknown casing '{}', expected 'title' or 'sentence'",
                other
            ))),
        }
    }

    pub fn apply(&self, label: &str) -> String {
        match self {
            LabelCasing::Title => title_case(label),
            LabelCasing::Sentence => sentence_case(label),
        }
    }
}

fn sentence_case(label: &str) -> String {
    let mut chars = label.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn title_case(label: &str) -> String {
    let mut out = String::with_capacity(label.len());
    let mut at_word_start = true;
    for ch in label.chars() {
        if ch.is_whitespace() {
            at_word_start = true;
            out.push(ch);
        } else if at_word_start {
            out.extend(ch.to_uppercase());
            at_word_start = false;
        } else {
            out.push(ch);
        }
    }
    out
}

/// 输出格式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

impl OutputFormat {
    pub fn parse(value: &str) -> Result<Self> {
        match value {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            other => Err(PredictError::Config(format!(
                "Unknown format '{}', expected 'text' or 'json'",
                other
            ))),
        }
    }
}

/// 单次预测结果，字段顺序即JSON键顺序
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Prediction {
    pub category: String,
    pub color: String,
    pub condition: String,
}

impl Prediction {
    /// 三行人类可读文本
    pub fn to_text(&self) -> String {
        format!(
            "Predicted Category: {}\nPredicted Color: {}\nPredicted Condition: {}",
            self.category, self.color, self.condition
        )
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn render(&self, format: OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Text => Ok(self.to_text()),
            OutputFormat::Json => self.to_json(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Prediction {
        Prediction {
            category: "Top".to_string(),
            color: "Black".to_string(),
            condition: "Good".to_string(),
        }
    }

    #[test]
    fn test_title_case_capitalizes_every_word() {
        assert_eq!(LabelCasing::Title.apply("like new"), "Like New");
        assert_eq!(LabelCasing::Title.apply("footwear"), "Footwear");
    }

    #[test]
    fn test_sentence_case_capitalizes_first_char_only() {
        assert_eq!(LabelCasing::Sentence.apply("like new"), "Like new");
        assert_eq!(LabelCasing::Sentence.apply("footwear"), "Footwear");
    }

    #[test]
    fn test_casing_agrees_on_single_word_labels() {
        for label in ["bottom", "footwear", "top", "good", "poor", "used"] {
            assert_eq!(
                LabelCasing::Title.apply(label),
                LabelCasing::Sentence.apply(label)
            );
        }
    }

    #[test]
    fn test_casing_empty_label() {
        assert_eq!(LabelCasing::Title.apply(""), "");
        assert_eq!(LabelCasing::Sentence.apply(""), "");
    }

    #[test]
    fn test_json_output_keys_and_order() {
        let json = sample().to_json().unwrap();
        assert_eq!(
            json,
            r#"{"category":"Top","color":"Black","condition":"Good"}"#
        );
    }

    #[test]
    fn test_text_output_lines() {
        let text = sample().to_text();
        assert_eq!(
            text,
            "Predicted Category: Top\nPredicted Color: Black\nPredicted Condition: Good"
        );
    }

    #[test]
    fn test_render_selects_format() {
        let prediction = sample();
        assert!(prediction
            .render(OutputFormat::Text)
            .unwrap()
            .starts_with("Predicted Category:"));
        assert!(prediction
            .render(OutputFormat::Json)
            .unwrap()
            .starts_with('{'));
    }

    #[test]
    fn test_parse_rejects_unknown_values() {
        assert!(LabelCasing::parse("upper").is_err());
        assert!(OutputFormat::parse("yaml").is_err());
    }
}
