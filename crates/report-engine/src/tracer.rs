//! 显像剂识别
//!
//! 根据口述文本判断本次检查使用的显像剂，决定技术段的固定措辞。

use report_core::Tracer;

/// 单条识别规则
struct TracerRule {
    /// 命中任意一个即满足
    keywords: &'static [&'static str],
    /// 需要同时出现的关键词（任意一个），无则不限
    co_occurring: Option<&'static [&'static str]>,
    tracer: Tracer,
}

/// 显像剂识别器，规则按优先级排列，先匹配者生效
pub struct TracerDetector {
    rules: Vec<TracerRule>,
}

impl TracerDetector {
    pub fn new() -> Self {
        let rules = vec![
            TracerRule {
                keywords: &["psma"],
                co_occurring: None,
                tracer: Tracer::Ga68Psma,
            },
            TracerRule {
                keywords: &["dotatate", "octreotate"],
                co_occurring: None,
                tracer: Tracer::Ga68Dotatate,
            },
            // “cardiac”需与FDG同时出现才按心脏方案处理
            TracerRule {
                keywords: &["cardiac"],
                co_occurring: Some(&["fdg", "fluorodeoxyglucose"]),
                tracer: Tracer::FdgCardiac,
            },
        ];

        Self { rules }
    }

    /// 识别显像剂，无法识别时默认为标准FDG检查
    pub fn detect(&self, dictation: &str) -> Tracer {
        let lower = dictation.to_lowercase();

        for rule in &self.rules {
            let hit = rule.keywords.iter().any(|k| lower.contains(k));
            let co_ok = rule
                .co_occurring
                .map_or(true, |req| req.iter().any(|k| lower.contains(k)));
            if hit && co_ok {
                return rule.tracer;
            }
        }

        Tracer::Fdg
    }
}

impl Default for TracerDetector {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_psma_detection() {
        let detector = TracerDetector::new();
        assert_eq!(detector.detect("Ga-68 PSMA study for prostate cancer"), Tracer::Ga68Psma);
    }

    #[test]
    fn test_dotatate_detection() {
        let detector = TracerDetector::new();
        assert_eq!(detector.detect("DOTATATE scan, neuroendocrine tumor"), Tracer::Ga68Dotatate);
    }

    #[test]
    fn test_cardiac_requires_fdg() {
        let detector = TracerDetector::new();
        assert_eq!(detector.detect("cardiac FDG viability study"), Tracer::FdgCardiac);
        // 没有FDG线索时退回默认
        assert_eq!(detector.detect("cardiac evaluation"), Tracer::Fdg);
    }

    #[test]
    fn test_psma_wins_over_cardiac() {
        let detector = TracerDetector::new();
        assert_eq!(detector.detect("PSMA study, cardiac FDG history"), Tracer::Ga68Psma);
    }

    #[test]
    fn test_default_is_fdg() {
        let detector = TracerDetector::new();
        assert_eq!(detector.detect("routine restaging study"), Tracer::Fdg);
    }
}
