//! 段落提取
//!
//! 依靠提示词锚点从口述文本中定位病史、对比、印象三个段落。
//! 同时支持显式标签（"History: ..."）和自然语言线索（"this is a 72-year-old..."）。
//! 找不到段落不算错误，返回占位标记。

use regex::Regex;
use report_core::utils::{capitalize_first, ensure_sentence};

use crate::measure::MeasurementConverter;
use crate::terminology::TerminologyCorrector;

/// 提取结果
#[derive(Debug, Clone)]
pub struct ExtractedSections {
    pub history: String,
    pub comparison: String,
    pub impression: String,
    /// 段落文本中发生的厘米换算次数
    pub conversions: usize,
}

/// 段落锚点规则
struct CueRule {
    pattern: Regex,
    /// 自然语言线索保留锚点文本本身，标签线索只取标签之后的内容
    keep_anchor: bool,
}

impl CueRule {
    fn label(pattern: &str) -> Self {
        Self {
            pattern: Regex::new(pattern).unwrap(),
            keep_anchor: false,
        }
    }

    fn natural(pattern: &str) -> Self {
        Self {
            pattern: Regex::new(pattern).unwrap(),
            keep_anchor: true,
        }
    }
}

/// 段落提取器
pub struct SectionExtractor {
    history_cues: Vec<CueRule>,
    comparison_cues: Vec<CueRule>,
    impression_cues: Vec<CueRule>,
    /// 任一段落或分区的起始线索，用作段落跨度的终点
    boundaries: Vec<Regex>,

    age_gender: Regex,
    cancer: Regex,
    surgery: Regex,
    year: Regex,
    marker_trend: Regex,

    converter: MeasurementConverter,
    corrector: TerminologyCorrector,

    history_placeholder: String,
    comparison_placeholder: String,
    impression_placeholder: String,
}

impl SectionExtractor {
    pub fn new() -> Self {
        let history_cues = vec![
            CueRule::label(r"(?i)\b(?:clinical\s+)?history\s*(?:is|:)\s*"),
            CueRule::natural(r"(?i)\b\d+[\s-]?years?[\s-]?old\b"),
            CueRule::natural(r"(?i)\b(?:one|two|three|four|five|six|seven|eight|nine|ten|twenty|thirty|forty|fifty|sixty|seventy|eighty|ninety)[\s-]\w+[\s-]?years?[\s-]?old\b"),
        ];
        let comparison_cues = vec![
            CueRule::label(r"(?i)\bcomparison\s*(?:is|:|to)\s*"),
            CueRule::label(r"(?i)\bcompared?\s+(?:to|with)\s+"),
        ];
        let impression_cues = vec![
            CueRule::label(r"(?i)\b(?:my\s+)?impression\s+is\s+(?:that\s+)?"),
            CueRule::label(r"(?i)\bimpression\s*:?\s*"),
        ];

        // 分区名只在标签（"Chest:"）或方位（"in his chest"）形式下才算段落边界，
        // 裸名词不算，否则"chest pain"这类病史表述会把段落截断
        let boundary_patterns: Vec<&str> = vec![
            r"(?i)\bhistory\b",
            r"(?i)\bcomparison\b",
            r"(?i)\bcompared?\s+(?:to|with)\b",
            r"(?i)\bimpression\b",
            r"(?i)\btechnique\b",
            r"(?i)\bfindings\b",
            r"(?i)\bhead\s*(?:and|&|/)\s*neck\b",
            r"(?i)\bskull\s+base\b",
            r"(?i)\b(?:chest|lungs|thorax|abdomen|pelvis|belly|bones|skeleton)\s*:",
            r"(?i)\b(?:in|at|down in|looking at)\s+(?:his|her|the)\s+(?:neck|chest|lungs|thorax|abdomen|belly|pelvis|bones|skin)\b",
            r"(?i)\bosseous\b",
            r"(?i)\bmusculoskeletal\b",
        ];
        let boundaries = boundary_patterns
            .iter()
            .map(|p| Regex::new(p).unwrap())
            .collect();

        let templates = crate::templates::ReportTemplates::new();

        Self {
            history_cues,
            comparison_cues,
            impression_cues,
            boundaries,
            age_gender: Regex::new(
                r"(?i)\b(\d+)[\s-]?years?[\s-]?old\s+(man|male|gentleman|woman|female|lady)\b",
            )
            .unwrap(),
            cancer: Regex::new(
                r"(?i)\b(?:(\w+(?:\s+cell)?)\s+)?(cancer|carcinoma|lymphoma|melanoma|myeloma|sarcoma)\b",
            )
            .unwrap(),
            surgery: Regex::new(
                r"(?i)\b(?:radical\s+)?(?:prostatectomy|mastectomy|hysterectomy|nephrectomy|colectomy|lobectomy)\b",
            )
            .unwrap(),
            year: Regex::new(r"\b(?:19|20)\d{2}\b").unwrap(),
            marker_trend: Regex::new(
                r"(?i)\b(psa|cea|ca[\s-]?19-9|ca[\s-]?125|afp|chromogranin)\b[^.]*?(\d+(?:\.\d+)?)[^.]*?\b(?:to|now)\s+(\d+(?:\.\d+)?)",
            )
            .unwrap(),
            converter: MeasurementConverter::new(),
            corrector: TerminologyCorrector::new(),
            history_placeholder: templates.history_placeholder.to_string(),
            comparison_placeholder: templates.comparison_placeholder.to_string(),
            impression_placeholder: templates.impression_placeholder.to_string(),
        }
    }

    /// 提取三个段落，缺失的段落以占位标记代替
    pub fn extract(&self, dictation: &str) -> ExtractedSections {
        let bounds = self.boundary_positions(dictation);
        let mut conversions = 0;

        let history = match self.locate(&self.history_cues, dictation, &bounds) {
            Some(raw) => {
                let (text, n) = self.normalize_history(&raw);
                conversions += n;
                text
            }
            None => self.history_placeholder.clone(),
        };

        let comparison = match self.locate(&self.comparison_cues, dictation, &bounds) {
            Some(raw) => {
                let (text, n) = self.normalize_free_text(&raw);
                conversions += n;
                text
            }
            None => self.comparison_placeholder.clone(),
        };

        let impression = match self.locate(&self.impression_cues, dictation, &bounds) {
            Some(raw) => {
                let (text, n) = self.normalize_free_text(&raw);
                conversions += n;
                text
            }
            None => self.impression_placeholder.clone(),
        };

        ExtractedSections {
            history,
            comparison,
            impression,
            conversions,
        }
    }

    /// 所有边界线索在文本中的出现位置，升序
    fn boundary_positions(&self, text: &str) -> Vec<usize> {
        let mut positions: Vec<usize> = self
            .boundaries
            .iter()
            .flat_map(|re| re.find_iter(text).map(|m| m.start()))
            .collect();
        positions.sort_unstable();
        positions
    }

    /// 按线索定位段落内容：取最早命中的锚点，内容延伸到下一个边界
    fn locate(&self, cues: &[CueRule], text: &str, bounds: &[usize]) -> Option<String> {
        let mut best: Option<(usize, usize, bool)> = None;
        for rule in cues {
            if let Some(m) = rule.pattern.find(text) {
                let better = best.map_or(true, |(start, _, _)| m.start() < start);
                if better {
                    best = Some((m.start(), m.end(), rule.keep_anchor));
                }
            }
        }

        let (anchor_start, anchor_end, keep) = best?;
        let content_start = if keep { anchor_start } else { anchor_end };
        let end = bounds
            .iter()
            .copied()
            .find(|&b| b >= anchor_end)
            .unwrap_or(text.len());
        if end <= content_start {
            return None;
        }

        let span = text[content_start..end]
            .trim_matches(|c: char| c == ':' || c == ';' || c == ',' || c.is_whitespace());
        if span.is_empty() {
            None
        } else {
            Some(span.to_string())
        }
    }

    /// 对比/印象段落的通用规范化
    fn normalize_free_text(&self, raw: &str) -> (String, usize) {
        let (text, conversions) = self.converter.normalize(raw);
        let text = self.corrector.correct(&text);
        (ensure_sentence(&capitalize_first(text.trim())), conversions)
    }

    /// 病史规范化：年龄/性别、肿瘤类型、既往手术（含年份）、肿瘤标志物趋势。
    /// 提取到足够事实时重新组句，否则返回清理后的原文。
    fn normalize_history(&self, raw: &str) -> (String, usize) {
        let text = self.converter.normalize_years(raw);
        let (text, conversions) = self.converter.normalize(&text);
        let text = self.corrector.correct(&text);

        let age_gender = self.age_gender.captures(&text).map(|c| {
            let gender = match c[2].to_lowercase().as_str() {
                "man" | "male" | "gentleman" => "male",
                _ => "female",
            };
            format!("{}-year-old {}", &c[1], gender)
        });

        let cancer = self.cancer.captures(&text).map(|c| {
            let kind = c[2].to_lowercase();
            match c.get(1).map(|m| m.as_str().to_lowercase()) {
                // 限定词是普通虚词时只保留肿瘤类型本身
                Some(q) if !matches!(q.as_str(), "of" | "with" | "a" | "the" | "has" | "had" | "and") => {
                    format!("{} {}", q, kind)
                }
                _ => kind,
            }
        });

        let surgery = self.surgery.find(&text).map(|m| {
            let procedure = m.as_str().to_lowercase();
            // 年份只在手术提及附近查找
            let tail = &text[m.end()..];
            let year = self
                .year
                .find(tail)
                .filter(|y| y.start() <= 40)
                .map(|y| y.as_str().to_string());
            match year {
                Some(y) => format!("status post {} ({})", procedure, y),
                None => format!("status post {}", procedure),
            }
        });

        let marker = self.marker_trend.captures(&text).and_then(|c| {
            let name = c[1].to_uppercase();
            let from: f64 = c[2].parse().ok()?;
            let to: f64 = c[3].parse().ok()?;
            let sentence = if to > from {
                format!("{} increased from {} to {}", name, &c[2], &c[3])
            } else if to < from {
                format!("{} decreased from {} to {}", name, &c[2], &c[3])
            } else {
                format!("{} is stable at {}", name, &c[3])
            };
            Some(sentence)
        });

        if age_gender.is_none() && cancer.is_none() {
            return (ensure_sentence(&capitalize_first(text.trim())), conversions);
        }

        let mut base = match (age_gender, cancer) {
            (Some(age), Some(kind)) => format!("{} with {}", age, kind),
            (Some(age), None) => age,
            (None, Some(kind)) => format!("Patient with {}", kind),
            (None, None) => unreachable!(),
        };
        if let Some(s) = surgery {
            base = format!("{}, {}", base, s);
        }

        let mut out = ensure_sentence(&capitalize_first(&base));
        if let Some(m) = marker {
            out = format!("{} {}", out, ensure_sentence(&m));
        }
        (out, conversions)
    }
}

impl Default for SectionExtractor {
    fn default() -> Self {
        Self::new()
    }
}
