//! 报告装配
//!
//! 把ParsedScan按固定模板装配成六段式报告：
//! History、Comparison、Technique、Findings（四个分区）、Impression、
//! Alternate Impression for Comparison。

use regex::Regex;
use report_core::utils::capitalize_first;
use report_core::{Finding, ParsedScan, Region};

use crate::templates::ReportTemplates;

/// 合成替代印象时识别的病变类型词，按优先级排列
const PATHOLOGY_TERMS: [&str; 9] = [
    "lymphadenopathy",
    "lymph node",
    "nodule",
    "mass",
    "lesion",
    "focus of increased activity",
    "focal uptake",
    "uptake",
    "activity",
];

/// 报告装配器
pub struct ReportAssembler {
    templates: ReportTemplates,
    measurement: Regex,
}

impl ReportAssembler {
    pub fn new() -> Self {
        Self::with_templates(ReportTemplates::new())
    }

    /// 使用自定义模板装配，便于测试与扩展新显像剂/分区
    pub fn with_templates(templates: ReportTemplates) -> Self {
        Self {
            templates,
            measurement: Regex::new(r"\b\d+ mm\b").unwrap(),
        }
    }

    pub fn templates(&self) -> &ReportTemplates {
        &self.templates
    }

    /// 装配完整报告。偶发所见按原始口述全文匹配。
    pub fn assemble(&self, scan: &ParsedScan, dictation: &str) -> String {
        let headers = &self.templates.section_headers;
        let technique = format!(
            "{} {} with {}.",
            scan.tracer.technique_prefix(),
            scan.coverage_area,
            scan.tracer.display()
        );

        let mut out = String::new();
        out.push_str(&format!("{} {}\n\n", headers[0], scan.history));
        out.push_str(&format!("{} {}\n\n", headers[1], scan.comparison));
        out.push_str(&format!("{} {}\n\n", headers[2], technique));
        out.push_str(&format!("{}\n\n", headers[3]));
        for region in Region::ALL {
            out.push_str(&format!(
                "{}: {}\n\n",
                region.title(),
                self.region_block(scan, region, dictation)
            ));
        }
        out.push_str(&format!("{} {}\n\n", headers[4], scan.impression));
        out.push_str(&format!("{} {}", headers[5], self.alternate_impression(scan)));
        out
    }

    /// 单个分区的文本：阳性所见、（胸部）结节条款、强制结束语、偶发所见
    fn region_block(&self, scan: &ParsedScan, region: Region, dictation: &str) -> String {
        let positives = scan.positive_findings(region);
        let mut parts: Vec<String> = positives.iter().map(|f| f.text.clone()).collect();

        if region == Region::Chest {
            if let Some(clause) = self.templates.nodule_clause(scan.pulmonary_nodule_count()) {
                parts.push(clause.to_string());
            }
        }

        parts.push(self.templates.closing_phrase(
            region,
            !positives.is_empty(),
            region == Region::AbdomenPelvis && scan.has_prostatectomy_surgical_bed,
        ));

        for rule in &self.templates.incidentals {
            if rule.region == region && rule.pattern.is_match(dictation) {
                parts.push(rule.phrase.to_string());
            }
        }

        parts.join(" ")
    }

    /// 替代印象：汇总全部阳性所见的测量值+病变类型+部位，
    /// 再列出没有阳性所见的分区；全部阴性时输出固定句子。
    fn alternate_impression(&self, scan: &ParsedScan) -> String {
        let mut fragments = Vec::new();
        let mut quiet_regions = Vec::new();

        for region in Region::ALL {
            let positives = scan.positive_findings(region);
            if positives.is_empty() {
                quiet_regions.push(region.title());
            } else {
                for finding in positives {
                    fragments.push(self.summarize_finding(finding, region));
                }
            }
        }

        if fragments.is_empty() {
            return self.templates.no_positive_anywhere.to_string();
        }

        let mut out = format!("{}.", capitalize_first(&fragments.join("; ")));
        if !quiet_regions.is_empty() {
            out.push_str(&format!(
                " No suspicious activity identified in the remaining regions: {}.",
                quiet_regions.join(", ")
            ));
        }
        out
    }

    /// 单条阳性所见的摘要片段
    fn summarize_finding(&self, finding: &Finding, region: Region) -> String {
        let lower = finding.text.to_lowercase();
        let measurement = self.measurement.find(&finding.text).map(|m| m.as_str());
        let pathology = PATHOLOGY_TERMS.iter().find(|term| lower.contains(*term));

        match (measurement, pathology) {
            (Some(size), Some(term)) => format!("{} {} in {}", size, term, region.prose()),
            (None, Some(term)) => format!("{} in {}", term, region.prose()),
            _ => format!(
                "{} in {}",
                finding.text.trim_end_matches('.'),
                region.prose()
            ),
        }
    }
}

impl Default for ReportAssembler {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use report_core::Tracer;
    use std::collections::BTreeMap;

    fn empty_scan() -> ParsedScan {
        ParsedScan {
            tracer: Tracer::Fdg,
            coverage_area: "eyes to thighs".to_string(),
            history: "[History not specified]".to_string(),
            comparison: "[Comparison not specified]".to_string(),
            impression: "[Impression not specified]".to_string(),
            findings_by_region: Region::ALL.iter().map(|r| (*r, Vec::new())).collect(),
            has_prostatectomy_surgical_bed: false,
            measurements_converted: 0,
        }
    }

    fn with_chest_nodules(count: usize) -> ParsedScan {
        let mut scan = empty_scan();
        let findings: Vec<Finding> = (0..count)
            .map(|i| Finding {
                text: format!("A {} mm nodule in the right lung.", 4 + i),
                is_positive: true,
                is_pulmonary_nodule: true,
            })
            .collect();
        let mut map: BTreeMap<Region, Vec<Finding>> =
            Region::ALL.iter().map(|r| (*r, Vec::new())).collect();
        map.insert(Region::Chest, findings);
        scan.findings_by_region = map;
        scan
    }

    #[test]
    fn test_six_sections_in_order() {
        let assembler = ReportAssembler::new();
        let report = assembler.assemble(&empty_scan(), "");
        let mut last = 0;
        for header in assembler.templates().section_headers {
            let pos = report.find(header).expect("missing section header");
            assert!(pos >= last);
            last = pos;
        }
    }

    #[test]
    fn test_four_region_subsections() {
        let assembler = ReportAssembler::new();
        let report = assembler.assemble(&empty_scan(), "");
        for region in Region::ALL {
            assert!(report.contains(&format!("{}:", region.title())));
        }
    }

    #[test]
    fn test_empty_region_gets_exact_canonical_phrase() {
        let assembler = ReportAssembler::new();
        let report = assembler.assemble(&empty_scan(), "");
        assert!(report
            .contains("Head/Neck: No abnormal hypermetabolic activity in the head and neck.\n"));
        assert!(report.contains("MSK/Integument: No suspicious osseous or soft tissue lesions.\n"));
        // 胸部的规范短语包含结节条款
        assert!(report.contains(
            "Chest: No pulmonary nodules. No abnormal hypermetabolic activity in the chest.\n"
        ));
    }

    #[test]
    fn test_nodule_tri_state_boundaries() {
        let assembler = ReportAssembler::new();

        let zero = assembler.assemble(&with_chest_nodules(0), "");
        assert!(zero.contains("No pulmonary nodules."));

        let three = assembler.assemble(&with_chest_nodules(3), "");
        assert!(three.contains("No other pulmonary nodules."));
        assert!(!three.contains("Chest: No pulmonary nodules."));

        let four = assembler.assemble(&with_chest_nodules(4), "");
        assert!(!four.contains("No other pulmonary nodules."));
        assert!(!four.contains("No pulmonary nodules."));
    }

    #[test]
    fn test_technique_phrase_by_tracer() {
        let assembler = ReportAssembler::new();
        let mut scan = empty_scan();
        scan.tracer = Tracer::Ga68Psma;
        let report = assembler.assemble(&scan, "");
        assert!(report.contains("TECHNIQUE: Low dose PET/CT eyes to thighs with Ga-68-PSMA."));

        scan.tracer = Tracer::FdgCardiac;
        let report = assembler.assemble(&scan, "");
        assert!(report.contains("TECHNIQUE: Ketogenic low dose PET/CT eyes to thighs with FDG."));
    }

    #[test]
    fn test_surgical_bed_clause_once() {
        let assembler = ReportAssembler::new();
        let mut scan = empty_scan();
        scan.has_prostatectomy_surgical_bed = true;
        let report = assembler.assemble(&scan, "");
        assert_eq!(
            report.matches(", including the pelvic surgical bed").count(),
            1
        );
    }

    #[test]
    fn test_incidentals_from_whole_dictation() {
        let assembler = ReportAssembler::new();
        let report = assembler.assemble(
            &empty_scan(),
            "incidental coronary artery calcification and a renal cyst",
        );
        assert!(report.contains("Coronary artery calcifications are noted."));
        assert!(report.contains("Renal cysts are noted."));
    }

    #[test]
    fn test_alternate_impression_no_positives() {
        let assembler = ReportAssembler::new();
        let report = assembler.assemble(&empty_scan(), "");
        assert!(report.contains("No suspicious activity identified in any region examined."));
    }

    #[test]
    fn test_alternate_impression_summarizes_positives() {
        let assembler = ReportAssembler::new();
        let report = assembler.assemble(&with_chest_nodules(1), "");
        assert!(report.contains("4 mm nodule in the chest"));
        assert!(report.contains("remaining regions: Head/Neck, Abdomen/Pelvis, MSK/Integument."));
    }
}
