//! 术语与格式修正
//!
//! 按固定替换表修正口述中的常见错误与口语化表达，并统一SUV与图像引用的书写格式。

use regex::Regex;

struct Substitution {
    pattern: Regex,
    replacement: &'static str,
}

/// 术语修正器
pub struct TerminologyCorrector {
    substitutions: Vec<Substitution>,
    suv: Regex,
    image_ref: Regex,
}

impl TerminologyCorrector {
    pub fn new() -> Self {
        let table: [(&str, &str); 8] = [
            // 语音识别常见错误，保持大小写
            (r"\bSpeculated\b", "Spiculated"),
            (r"\bspeculated\b", "spiculated"),
            // 口语表达转为规范术语
            (r"(?i)\blighting up\b", "demonstrating increased uptake"),
            (r"(?i)\blights up\b", "demonstrates increased uptake"),
            (r"(?i)\blit up\b", "demonstrated increased uptake"),
            // 复数规则须排在单数之前
            (r"(?i)\bhot spots\b", "foci of increased activity"),
            (r"(?i)\bhot spot\b", "focus of increased activity"),
            (r"(?i)\bstandardized uptake value\b", "SUV"),
        ];

        let substitutions = table
            .iter()
            .map(|(pattern, replacement)| Substitution {
                pattern: Regex::new(pattern).unwrap(),
                replacement,
            })
            .collect();

        Self {
            substitutions,
            suv: Regex::new(r"(?i)\b(?:an?\s+)?SUV(?:\s?max)?\s+(?:of\s+|is\s+)?(\d+(?:\.\d+)?)\b")
                .unwrap(),
            image_ref: Regex::new(r"(?i)\(?\bimage\s+(\d+)\s+of\s+(\d+)\)?").unwrap(),
        }
    }

    /// 应用全部修正规则
    pub fn correct(&self, text: &str) -> String {
        let mut out = text.to_string();
        for sub in &self.substitutions {
            out = sub.pattern.replace_all(&out, sub.replacement).into_owned();
        }
        out = self.suv.replace_all(&out, "SUVmax ${1}").into_owned();
        out = self.image_ref.replace_all(&out, "(Image ${1} of ${2})").into_owned();
        out
    }
}

impl Default for TerminologyCorrector {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_speculated_case_preserving() {
        let corrector = TerminologyCorrector::new();
        assert_eq!(corrector.correct("Speculated mass"), "Spiculated mass");
        assert_eq!(corrector.correct("a speculated margin"), "a spiculated margin");
    }

    #[test]
    fn test_casual_uptake_phrases() {
        let corrector = TerminologyCorrector::new();
        assert_eq!(
            corrector.correct("the node is lighting up"),
            "the node is demonstrating increased uptake"
        );
        assert_eq!(
            corrector.correct("it lit up on the scan"),
            "it demonstrated increased uptake on the scan"
        );
    }

    #[test]
    fn test_hot_spot() {
        let corrector = TerminologyCorrector::new();
        assert_eq!(
            corrector.correct("a hot spot in the liver"),
            "a focus of increased activity in the liver"
        );
        assert_eq!(
            corrector.correct("two hot spots noted"),
            "two foci of increased activity noted"
        );
    }

    #[test]
    fn test_suv_normalization() {
        let corrector = TerminologyCorrector::new();
        assert_eq!(corrector.correct("with an SUV of 2.9"), "with SUVmax 2.9");
        assert_eq!(corrector.correct("SUV max of 4.1"), "SUVmax 4.1");
        // 已是标准格式时保持不变
        assert_eq!(corrector.correct("SUVmax 3.2"), "SUVmax 3.2");
    }

    #[test]
    fn test_image_reference() {
        let corrector = TerminologyCorrector::new();
        assert_eq!(corrector.correct("seen on image 7 of 12"), "seen on (Image 7 of 12)");
    }
}
