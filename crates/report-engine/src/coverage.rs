//! 扫描范围规范化
//!
//! 将口述中的覆盖范围描述（whole body、head to toe等）映射到固定的标准短语。

/// 未识别时的默认范围
pub const DEFAULT_COVERAGE: &str = "eyes to thighs";

/// 扫描范围规范化器
///
/// 规则按从具体到宽泛排列，保证“brain and whole body”不会被当作普通的
/// “whole body”命中。
pub struct CoverageNormalizer {
    rules: Vec<(&'static [&'static str], &'static str)>,
}

impl CoverageNormalizer {
    pub fn new() -> Self {
        let rules: Vec<(&'static [&'static str], &'static str)> = vec![
            (
                &["brain and whole body", "brain and eyes to thighs", "brain and body"],
                "brain and eyes to thighs",
            ),
            (
                &["vertex to toes", "vertex to toe", "head to toes", "head to toe", "total body"],
                "vertex to toes",
            ),
            (
                &["vertex to thighs", "vertex to thigh", "top of the head to the thighs"],
                "vertex to thighs",
            ),
            (
                &["eyes to thighs", "eyes to the thighs", "whole body", "skull base to thighs"],
                "eyes to thighs",
            ),
        ];

        Self { rules }
    }

    /// 规范化扫描范围描述，未命中任何规则时返回默认值
    pub fn normalize(&self, dictation: &str) -> String {
        let lower = dictation.to_lowercase();

        for (patterns, canonical) in &self.rules {
            if patterns.iter().any(|p| lower.contains(p)) {
                return canonical.to_string();
            }
        }

        DEFAULT_COVERAGE.to_string()
    }
}

impl Default for CoverageNormalizer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_whole_body() {
        let normalizer = CoverageNormalizer::new();
        assert_eq!(normalizer.normalize("whole body PET"), "eyes to thighs");
    }

    #[test]
    fn test_head_to_toe() {
        let normalizer = CoverageNormalizer::new();
        assert_eq!(normalizer.normalize("scanned head to toe today"), "vertex to toes");
    }

    #[test]
    fn test_brain_beats_whole_body() {
        // 更具体的规则必须优先命中
        let normalizer = CoverageNormalizer::new();
        assert_eq!(
            normalizer.normalize("brain and whole body imaging"),
            "brain and eyes to thighs"
        );
    }

    #[test]
    fn test_default_when_unrecognized() {
        let normalizer = CoverageNormalizer::new();
        assert_eq!(normalizer.normalize("no coverage mentioned"), DEFAULT_COVERAGE);
    }
}
