//! 分区所见分类
//!
//! 按分区起始提示词把所见文本切成四个解剖分区的跨度，跨度内先做测量换算和
//! 术语修正，再切句并按关键词分类为阳性/阴性所见。
//! 另含前列腺切除的双向判定。

use regex::Regex;
use report_core::utils::{capitalize_first, ensure_sentence, split_sentences};
use report_core::{Finding, Region};
use std::collections::BTreeMap;

use crate::measure::MeasurementConverter;
use crate::terminology::TerminologyCorrector;

/// 短于该长度的句子碎片直接丢弃
const MIN_SENTENCE_LEN: usize = 5;

/// 各分区的起始提示词，从头到脚的顺序
///
/// 提示词取复数或限定形式，避免误伤病史中的"lung cancer"、"bone mets"等表述。
pub(crate) fn region_cue_patterns() -> Vec<(Region, &'static str)> {
    vec![
        (Region::HeadNeck, r"(?i)\bhead\s*(?:and|&|/)\s*neck\b"),
        (Region::HeadNeck, r"(?i)\b(?:in|at)\s+(?:his|her|the)\s+neck\b"),
        (Region::HeadNeck, r"(?i)\bskull\s+base\b"),
        (Region::Chest, r"(?i)\bchest\b"),
        (Region::Chest, r"(?i)\blungs\b"),
        (Region::Chest, r"(?i)\bthorax\b"),
        (Region::AbdomenPelvis, r"(?i)\babdomen\b"),
        (Region::AbdomenPelvis, r"(?i)\babdominal\b"),
        (Region::AbdomenPelvis, r"(?i)\bbelly\b"),
        (Region::AbdomenPelvis, r"(?i)\bpelvis\b"),
        (Region::Msk, r"(?i)\bbones\b"),
        (Region::Msk, r"(?i)\bosseous\b"),
        (Region::Msk, r"(?i)\bmusculoskeletal\b"),
        (Region::Msk, r"(?i)\bskeleton\b"),
        (Region::Msk, r"(?i)\b(?:his|her|the)\s+skin\b"),
    ]
}

/// 分区所见分类器
pub struct FindingsClassifier {
    cues: Vec<(Region, Regex)>,
    /// 段落标签线索，分区跨度到此为止
    stops: Vec<Regex>,
    positive: Vec<Regex>,
    negative: Vec<Regex>,
    nodule: Regex,
    converter: MeasurementConverter,
    corrector: TerminologyCorrector,
}

impl FindingsClassifier {
    pub fn new() -> Self {
        let cues = region_cue_patterns()
            .into_iter()
            .map(|(region, pattern)| (region, Regex::new(pattern).unwrap()))
            .collect();

        let stops = [
            r"(?i)\bimpression\b",
            r"(?i)\bcomparison\b",
            r"(?i)\bcompared?\s+(?:to|with)\b",
            r"(?i)\bhistory\b",
            r"(?i)\btechnique\b",
        ]
        .iter()
        .map(|p| Regex::new(p).unwrap())
        .collect();

        // 阳性指征：口语同义词已先被术语修正归一到这些词上
        let positive = [
            r"(?i)\buptake\b",
            r"(?i)\bactivity\b",
            r"(?i)\blesions?\b",
            r"(?i)\bmass(?:es)?\b",
            r"(?i)\bnodules?\b",
            r"(?i)\blymph",
            r"(?i)\bsuvmax\b",
            r"(?i)\bmeasuring\b",
            r"(?i)\bsuspicious\b",
            r"(?i)\babnormal\b",
            r"(?i)\bincreased\b",
            r"(?i)\bhypermetabolic\b",
            r"(?i)\bfoc(?:us|i|al)\b",
            r"(?i)\bavid\b",
        ]
        .iter()
        .map(|p| Regex::new(p).unwrap())
        .collect();

        // 阴性指征，命中任意一个即压过阳性
        let negative = [
            r"(?i)\bno abnormal\b",
            r"(?i)\bno suspicious\b",
            r"(?i)\bno evidence\b",
            r"(?i)\bno significant\b",
            r"(?i)\bno concerning\b",
            r"(?i)\bno focal\b",
            r"(?i)\bno bad areas?\b",
            r"(?i)\bnothing bad\b",
            r"(?i)\bdon'?t see any",
            r"(?i)\bunremarkable\b",
            r"(?i)\bnormal\b",
            r"(?i)\bclear\b",
            r"(?i)\beverything looks\b",
            r"(?i)\blooks? (?:good|fine|okay|ok)\b",
        ]
        .iter()
        .map(|p| Regex::new(p).unwrap())
        .collect();

        Self {
            cues,
            stops,
            positive,
            negative,
            nodule: Regex::new(r"(?i)\bnodules?\b").unwrap(),
            converter: MeasurementConverter::new(),
            corrector: TerminologyCorrector::new(),
        }
    }

    /// 把口述切分到四个分区并分类，返回各分区所见与厘米换算次数。
    /// 未提及的分区得到空列表。
    pub fn classify(&self, dictation: &str) -> (BTreeMap<Region, Vec<Finding>>, usize) {
        let mut by_region: BTreeMap<Region, Vec<Finding>> =
            Region::ALL.iter().map(|r| (*r, Vec::new())).collect();
        let mut conversions = 0;

        // 每个分区取最早命中的提示词作为起点
        let mut anchors: Vec<(usize, usize, Region)> = Vec::new();
        for region in Region::ALL {
            let mut best: Option<(usize, usize)> = None;
            for (r, re) in &self.cues {
                if *r != region {
                    continue;
                }
                if let Some(m) = re.find(dictation) {
                    if best.map_or(true, |(start, _)| m.start() < start) {
                        best = Some((m.start(), m.end()));
                    }
                }
            }
            if let Some((start, end)) = best {
                anchors.push((start, end, region));
            }
        }
        anchors.sort_by_key(|a| a.0);

        let stop_positions: Vec<usize> = self
            .stops
            .iter()
            .flat_map(|re| re.find_iter(dictation).map(|m| m.start()))
            .collect();

        // 跨度终点取下一个分区起点或下一个段落标签中较早者
        for (i, (_, cue_end, region)) in anchors.iter().enumerate() {
            let next_region = anchors
                .get(i + 1)
                .map(|a| a.0)
                .unwrap_or_else(|| dictation.len());
            let next_stop = stop_positions
                .iter()
                .copied()
                .filter(|&p| p >= *cue_end)
                .min()
                .unwrap_or_else(|| dictation.len());
            let end = next_region.min(next_stop);
            if end <= *cue_end {
                continue;
            }

            let span = dictation[*cue_end..end]
                .trim_matches(|c: char| c == ':' || c == ';' || c == ',' || c.is_whitespace());
            let (findings, n) = self.classify_span(span, *region);
            conversions += n;
            by_region.insert(*region, findings);
        }

        (by_region, conversions)
    }

    /// 单个分区跨度的处理：先整体换算和修正，再切句分类
    fn classify_span(&self, span: &str, region: Region) -> (Vec<Finding>, usize) {
        let digits = self.converter.digitize(span);
        let (converted, conversions) = self.converter.convert_units(&digits);
        let corrected = self.corrector.correct(&converted);

        let findings = split_sentences(&corrected, MIN_SENTENCE_LEN)
            .into_iter()
            .map(|sentence| {
                let has_positive = self.positive.iter().any(|re| re.is_match(&sentence));
                let has_negative = self.negative.iter().any(|re| re.is_match(&sentence));
                Finding {
                    is_positive: has_positive && !has_negative,
                    is_pulmonary_nodule: region == Region::Chest && self.nodule.is_match(&sentence),
                    text: ensure_sentence(&capitalize_first(&sentence)),
                }
            })
            .collect();

        (findings, conversions)
    }
}

impl Default for FindingsClassifier {
    fn default() -> Self {
        Self::new()
    }
}

/// 前列腺切除判定器
///
/// 双向检查：既要有切除线索，又不能有腺体仍在位的反证，
/// 避免报告仅描述原位腺体时误报手术床。
pub struct ProstatectomyDetector {
    surgery_cues: Vec<Regex>,
    gland_present_cues: Vec<Regex>,
}

impl ProstatectomyDetector {
    pub fn new() -> Self {
        let surgery_cues = [
            r"(?i)\bprostatectomy\b",
            r"(?i)\bprostate\s+(?:was\s+)?(?:removed|removal)\b",
            r"(?i)\bremoval of the prostate\b",
            r"(?i)\bprostate\s+(?:was\s+)?taken out\b",
            r"(?i)\bs/p\s+prostate\b",
        ]
        .iter()
        .map(|p| Regex::new(p).unwrap())
        .collect();

        let gland_present_cues = [
            r"(?i)\bintact prostate\b",
            r"(?i)\bprostate gland\b",
            r"(?i)\bprostate\s+(?:is|appears|remains|measures|demonstrates|shows)\b",
            r"(?i)\bwithin the prostate\b",
            r"(?i)\bbph\b",
            r"(?i)\bbenign prostatic\b",
            r"(?i)\b(?:peripheral|transition(?:al)?)\s+zone\b",
            r"(?i)\bprostatic\s+(?:uptake|activity|lesion)\b",
        ]
        .iter()
        .map(|p| Regex::new(p).unwrap())
        .collect();

        Self {
            surgery_cues,
            gland_present_cues,
        }
    }

    /// 是否应在腹盆分区附加手术床从句
    pub fn detect(&self, dictation: &str) -> bool {
        let removed = self.surgery_cues.iter().any(|re| re.is_match(dictation));
        let present = self.gland_present_cues.iter().any(|re| re.is_match(dictation));
        removed && !present
    }
}

impl Default for ProstatectomyDetector {
    fn default() -> Self {
        Self::new()
    }
}
