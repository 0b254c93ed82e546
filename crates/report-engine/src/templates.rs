//! 报告模板配置
//!
//! 报告的固定段落、各分区的强制措辞、结节条款与偶发所见规则，
//! 全部集中在一个不可变的配置结构中，由装配器持有。

use regex::Regex;
use report_core::Region;

/// 偶发所见规则：在整段口述中匹配，命中则把规范短语挂到对应分区
pub struct IncidentalRule {
    pub pattern: Regex,
    pub region: Region,
    pub phrase: &'static str,
}

/// 报告模板
pub struct ReportTemplates {
    /// 报告正文中的段落标题，固定6个、固定顺序
    pub section_headers: [&'static str; 6],
    /// 摘要信息中使用的段落名称
    pub section_titles: [&'static str; 6],

    /// 各分区的强制结束语：无阳性所见/有阳性所见两种变体
    head_neck_clear: &'static str,
    head_neck_residual: &'static str,
    chest_clear: &'static str,
    chest_residual: &'static str,
    abdomen_clear_stem: &'static str,
    abdomen_residual_stem: &'static str,
    msk_clear: &'static str,
    msk_residual: &'static str,

    /// 肺结节条款（三态：无结节/另有结节1-3个/超过3个不出条款）
    pub nodule_none: &'static str,
    pub nodule_no_other: &'static str,
    pub nodule_listed_max: usize,

    /// 前列腺切除术后附加的手术床从句
    pub surgical_bed_clause: &'static str,

    /// 段落缺失时的占位标记
    pub history_placeholder: &'static str,
    pub comparison_placeholder: &'static str,
    pub impression_placeholder: &'static str,

    /// 全部分区均无阳性所见时的替代印象
    pub no_positive_anywhere: &'static str,

    pub incidentals: Vec<IncidentalRule>,
}

impl ReportTemplates {
    pub fn new() -> Self {
        let incidentals = vec![
            IncidentalRule {
                pattern: Regex::new(r"(?i)\bcoronary (?:artery )?calcifications?\b").unwrap(),
                region: Region::Chest,
                phrase: "Coronary artery calcifications are noted.",
            },
            IncidentalRule {
                pattern: Regex::new(r"(?i)\bhiatal hernia\b").unwrap(),
                region: Region::Chest,
                phrase: "A hiatal hernia is noted.",
            },
            IncidentalRule {
                pattern: Regex::new(r"(?i)\batelectasis\b").unwrap(),
                region: Region::Chest,
                phrase: "Atelectasis is noted.",
            },
            IncidentalRule {
                pattern: Regex::new(r"(?i)\brenal cysts?\b").unwrap(),
                region: Region::AbdomenPelvis,
                phrase: "Renal cysts are noted.",
            },
            IncidentalRule {
                pattern: Regex::new(r"(?i)\b(?:hepatic|liver) cysts?\b").unwrap(),
                region: Region::AbdomenPelvis,
                phrase: "Hepatic cysts are noted.",
            },
            IncidentalRule {
                pattern: Regex::new(r"(?i)\bdiverticulosis\b").unwrap(),
                region: Region::AbdomenPelvis,
                phrase: "Diverticulosis is noted.",
            },
            IncidentalRule {
                pattern: Regex::new(r"(?i)\bdegenerative (?:changes?|disease)\b").unwrap(),
                region: Region::Msk,
                phrase: "Degenerative changes are noted.",
            },
            IncidentalRule {
                pattern: Regex::new(r"(?i)\bthyroid nodules?\b").unwrap(),
                region: Region::HeadNeck,
                phrase: "A thyroid nodule is noted.",
            },
        ];

        Self {
            section_headers: [
                "HISTORY:",
                "COMPARISON:",
                "TECHNIQUE:",
                "FINDINGS:",
                "IMPRESSION:",
                "ALTERNATE IMPRESSION FOR COMPARISON:",
            ],
            section_titles: [
                "History",
                "Comparison",
                "Technique",
                "Findings",
                "Impression",
                "Alternate Impression for Comparison",
            ],
            head_neck_clear: "No abnormal hypermetabolic activity in the head and neck.",
            head_neck_residual: "No other abnormal hypermetabolic activity in the head and neck.",
            chest_clear: "No abnormal hypermetabolic activity in the chest.",
            chest_residual: "No other abnormal hypermetabolic activity in the chest.",
            abdomen_clear_stem:
                "No abnormal hypermetabolic activity or lymphadenopathy in the abdomen or pelvis",
            abdomen_residual_stem:
                "No other abnormal hypermetabolic activity or lymphadenopathy in the abdomen or pelvis",
            msk_clear: "No suspicious osseous or soft tissue lesions.",
            msk_residual: "No other suspicious osseous or soft tissue lesions.",
            nodule_none: "No pulmonary nodules.",
            nodule_no_other: "No other pulmonary nodules.",
            nodule_listed_max: 3,
            surgical_bed_clause: ", including the pelvic surgical bed",
            history_placeholder: "[History not specified]",
            comparison_placeholder: "[Comparison not specified]",
            impression_placeholder: "[Impression not specified]",
            no_positive_anywhere: "No suspicious activity identified in any region examined.",
            incidentals,
        }
    }

    /// 分区的强制结束语
    ///
    /// 腹盆分区在确认前列腺切除且无腺体在位证据时附加手术床从句，且只附加一次。
    pub fn closing_phrase(&self, region: Region, has_positive: bool, surgical_bed: bool) -> String {
        match region {
            Region::HeadNeck => if has_positive {
                self.head_neck_residual
            } else {
                self.head_neck_clear
            }
            .to_string(),
            Region::Chest => if has_positive {
                self.chest_residual
            } else {
                self.chest_clear
            }
            .to_string(),
            Region::AbdomenPelvis => {
                let stem = if has_positive {
                    self.abdomen_residual_stem
                } else {
                    self.abdomen_clear_stem
                };
                if surgical_bed {
                    format!("{}{}.", stem, self.surgical_bed_clause)
                } else {
                    format!("{}.", stem)
                }
            }
            Region::Msk => if has_positive {
                self.msk_residual
            } else {
                self.msk_clear
            }
            .to_string(),
        }
    }

    /// 肺结节条款的三态取值
    pub fn nodule_clause(&self, nodule_count: usize) -> Option<&'static str> {
        if nodule_count == 0 {
            Some(self.nodule_none)
        } else if nodule_count <= self.nodule_listed_max {
            Some(self.nodule_no_other)
        } else {
            None
        }
    }
}

impl Default for ReportTemplates {
    fn default() -> Self {
        Self::new()
    }
}
