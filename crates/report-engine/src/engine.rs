//! 报告引擎
//!
//! 对外入口：校验输入，解析口述文本为ParsedScan，再装配为最终报告。
//! 整个流程是纯函数式的：无I/O、无共享可变状态，可并发调用。

use std::time::Instant;
use tracing::{debug, info};

use report_core::{GeneratedReport, ParsedScan, Region, ReportError, ReportMetadata, Result};

use crate::assemble::ReportAssembler;
use crate::coverage::CoverageNormalizer;
use crate::findings::{FindingsClassifier, ProstatectomyDetector};
use crate::sections::SectionExtractor;
use crate::templates::ReportTemplates;
use crate::tracer::TracerDetector;

/// 口述报告引擎
pub struct ReportEngine {
    tracer: TracerDetector,
    coverage: CoverageNormalizer,
    sections: SectionExtractor,
    findings: FindingsClassifier,
    prostatectomy: ProstatectomyDetector,
    assembler: ReportAssembler,
}

impl ReportEngine {
    pub fn new() -> Self {
        Self::with_templates(ReportTemplates::new())
    }

    pub fn with_templates(templates: ReportTemplates) -> Self {
        Self {
            tracer: TracerDetector::new(),
            coverage: CoverageNormalizer::new(),
            sections: SectionExtractor::new(),
            findings: FindingsClassifier::new(),
            prostatectomy: ProstatectomyDetector::new(),
            assembler: ReportAssembler::with_templates(templates),
        }
    }

    /// 口述文本解析为中间结构，不修改输入
    pub fn parse(&self, dictation: &str) -> Result<ParsedScan> {
        if dictation.trim().is_empty() {
            return Err(ReportError::MissingDictation(
                "dictation text is required".to_string(),
            ));
        }

        let tracer = self.tracer.detect(dictation);
        let coverage_area = self.coverage.normalize(dictation);
        let sections = self.sections.extract(dictation);
        let (findings_by_region, finding_conversions) = self.findings.classify(dictation);
        let has_prostatectomy_surgical_bed = self.prostatectomy.detect(dictation);

        Ok(ParsedScan {
            tracer,
            coverage_area,
            history: sections.history,
            comparison: sections.comparison,
            impression: sections.impression,
            findings_by_region,
            has_prostatectomy_surgical_bed,
            measurements_converted: sections.conversions + finding_conversions,
        })
    }

    /// 生成最终报告与摘要信息
    pub fn generate(&self, dictation: &str) -> Result<GeneratedReport> {
        let started = Instant::now();
        debug!("Parsing dictation ({} chars)", dictation.len());

        let scan = self.parse(dictation)?;
        let report = self.assembler.assemble(&scan, dictation);

        let templates = self.assembler.templates();
        let metadata = ReportMetadata {
            tracer_detected: scan.tracer.label().to_string(),
            coverage_area: scan.coverage_area.clone(),
            sections_generated: templates
                .section_titles
                .iter()
                .map(|s| s.to_string())
                .collect(),
            findings_subcategories: Region::ALL.iter().map(|r| r.title().to_string()).collect(),
            surgical_bed_included: scan.has_prostatectomy_surgical_bed,
            measurements_converted: scan.measurements_converted,
            processing_time: started.elapsed().as_secs_f64(),
        };

        info!(
            "Report generated: tracer={}, coverage=\"{}\", {} measurements converted",
            metadata.tracer_detected, metadata.coverage_area, metadata.measurements_converted
        );

        Ok(GeneratedReport { report, metadata })
    }
}

impl Default for ReportEngine {
    fn default() -> Self {
        Self::new()
    }
}
