//! 测量值转换
//!
//! 将口述中的英文数词转为数字，并把所有厘米量值换算为毫米整数。
//! 最终报告中不允许出现cm单位。

use regex::{Captures, Regex};

const ONES: [(&str, u32); 9] = [
    ("one", 1),
    ("two", 2),
    ("three", 3),
    ("four", 4),
    ("five", 5),
    ("six", 6),
    ("seven", 7),
    ("eight", 8),
    ("nine", 9),
];

const TEENS: [(&str, u32); 10] = [
    ("ten", 10),
    ("eleven", 11),
    ("twelve", 12),
    ("thirteen", 13),
    ("fourteen", 14),
    ("fifteen", 15),
    ("sixteen", 16),
    ("seventeen", 17),
    ("eighteen", 18),
    ("nineteen", 19),
];

const TENS: [(&str, u32); 8] = [
    ("twenty", 20),
    ("thirty", 30),
    ("forty", 40),
    ("fifty", 50),
    ("sixty", 60),
    ("seventy", 70),
    ("eighty", 80),
    ("ninety", 90),
];

fn word_value(word: &str) -> Option<u32> {
    let w = word.to_lowercase();
    ONES.iter()
        .chain(TEENS.iter())
        .chain(TENS.iter())
        .find(|(k, _)| *k == w)
        .map(|(_, v)| *v)
}

/// 测量值转换器
pub struct MeasurementConverter {
    compound: Regex,
    single: Regex,
    spoken_point: Regex,
    spelled_year: Regex,
    cm: Regex,
    mm_spelled: Regex,
}

impl MeasurementConverter {
    pub fn new() -> Self {
        // 以下正则均为固定模式，构造失败属于程序错误
        Self {
            compound: Regex::new(
                r"(?i)\b(twenty|thirty|forty|fifty|sixty|seventy|eighty|ninety)[\s-](one|two|three|four|five|six|seven|eight|nine)\b",
            )
            .unwrap(),
            single: Regex::new(
                r"(?i)\b(one|two|three|four|five|six|seven|eight|nine|ten|eleven|twelve|thirteen|fourteen|fifteen|sixteen|seventeen|eighteen|nineteen|twenty|thirty|forty|fifty|sixty|seventy|eighty|ninety)\b",
            )
            .unwrap(),
            spoken_point: Regex::new(r"\b(\d+)\s+point\s+(\d+)\b").unwrap(),
            spelled_year: Regex::new(
                r"(?i)\btwenty\s+(ten|eleven|twelve|thirteen|fourteen|fifteen|sixteen|seventeen|eighteen|nineteen|twenty|thirty)(?:[\s-](one|two|three|four|five|six|seven|eight|nine))?\b",
            )
            .unwrap(),
            cm: Regex::new(r"(?i)\b(\d+(?:\.\d+)?)\s*(?:centimeters?|centimetres?|cm)\b").unwrap(),
            mm_spelled: Regex::new(r"(?i)\b(\d+(?:\.\d+)?)\s*(?:millimeters?|millimetres?)\b")
                .unwrap(),
        }
    }

    /// 英文数词转数字，包括“twenty five”复合数词和“two point five”口述小数
    pub fn digitize(&self, text: &str) -> String {
        let t = self.compound.replace_all(text, |c: &Captures| {
            let tens = word_value(&c[1]).unwrap_or(0);
            let ones = word_value(&c[2]).unwrap_or(0);
            (tens + ones).to_string()
        });
        let t = self.single.replace_all(&t, |c: &Captures| {
            word_value(&c[1])
                .map(|v| v.to_string())
                .unwrap_or_else(|| c[1].to_string())
        });
        let t = self.spoken_point.replace_all(&t, "${1}.${2}");
        t.into_owned()
    }

    /// 口述年份转数字（twenty twenty-three → 2023）
    ///
    /// 必须在digitize之前调用，否则“twenty twenty-three”会被拆成“twenty 23”。
    pub fn normalize_years(&self, text: &str) -> String {
        self.spelled_year
            .replace_all(text, |c: &Captures| {
                let base = word_value(&c[1]).unwrap_or(0);
                let ones = c.get(2).and_then(|m| word_value(m.as_str())).unwrap_or(0);
                (2000 + base + ones).to_string()
            })
            .into_owned()
    }

    /// 厘米量值换算为毫米（×10，四舍五入取整），返回换算次数。
    /// 同时把拼写出来的millimeters统一为mm。
    pub fn convert_units(&self, text: &str) -> (String, usize) {
        let count = self.cm.find_iter(text).count();
        let t = self.cm.replace_all(text, |c: &Captures| match c[1].parse::<f64>() {
            Ok(value) => format!("{} mm", (value * 10.0).round() as i64),
            Err(_) => c[0].to_string(),
        });
        let t = self.mm_spelled.replace_all(&t, "${1} mm");
        (t.into_owned(), count)
    }

    /// 完整的测量规范化：数词转数字，再做单位换算
    pub fn normalize(&self, text: &str) -> (String, usize) {
        let digits = self.digitize(text);
        self.convert_units(&digits)
    }
}

impl Default for MeasurementConverter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_cm_to_mm() {
        let converter = MeasurementConverter::new();
        let (out, count) = converter.normalize("a 2.5 cm lesion");
        assert_eq!(out, "a 25 mm lesion");
        assert_eq!(count, 1);
    }

    #[test]
    fn test_spelled_cm_to_mm() {
        let converter = MeasurementConverter::new();
        let (out, count) = converter.normalize("measuring two point five centimeters");
        assert_eq!(out, "measuring 25 mm");
        assert_eq!(count, 1);
    }

    #[test]
    fn test_whole_word_quantity() {
        let converter = MeasurementConverter::new();
        let (out, _) = converter.normalize("a seven centimeter mass");
        assert_eq!(out, "a 70 mm mass");
    }

    #[test]
    fn test_compound_number_words() {
        let converter = MeasurementConverter::new();
        assert_eq!(converter.digitize("twenty five millimeters"), "25 millimeters");
        assert_eq!(converter.digitize("seventy-two year old"), "72 year old");
    }

    #[test]
    fn test_spoken_decimal() {
        let converter = MeasurementConverter::new();
        assert_eq!(converter.digitize("an SUV of two point nine"), "an SUV of 2.9");
    }

    #[test]
    fn test_millimeter_spelling_normalized() {
        let converter = MeasurementConverter::new();
        let (out, count) = converter.convert_units("a 7 millimeter nodule");
        assert_eq!(out, "a 7 mm nodule");
        // 毫米不算换算次数
        assert_eq!(count, 0);
    }

    #[test]
    fn test_rounding() {
        let converter = MeasurementConverter::new();
        let (out, _) = converter.convert_units("1.25 cm");
        assert_eq!(out, "13 mm");
    }

    #[test]
    fn test_spelled_years() {
        let converter = MeasurementConverter::new();
        assert_eq!(
            converter.normalize_years("mastectomy in twenty twenty-three"),
            "mastectomy in 2023"
        );
        assert_eq!(converter.normalize_years("back in twenty nineteen"), "back in 2019");
    }

    #[test]
    fn test_no_cm_left_behind() {
        let converter = MeasurementConverter::new();
        let (out, _) = converter.normalize("nodes of 1 cm, 2 cm and three centimeters");
        assert!(!out.to_lowercase().contains("cm"));
        assert_eq!(out, "nodes of 10 mm, 20 mm and 30 mm");
    }
}
