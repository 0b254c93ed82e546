//! # Report Engine
//!
//! PET/CT口述文本的规则化解析与结构化报告生成引擎，包括：
//! - 显像剂识别与扫描范围规范化
//! - 病史/对比/印象段落提取
//! - 四个解剖分区的所见分类
//! - 测量值换算与术语修正
//! - 按固定模板装配最终报告

pub mod assemble;
pub mod coverage;
pub mod engine;
pub mod findings;
pub mod measure;
pub mod sections;
pub mod templates;
pub mod terminology;
pub mod tracer;

// 重新导出主要类型
pub use assemble::ReportAssembler;
pub use coverage::CoverageNormalizer;
pub use engine::ReportEngine;
pub use findings::{FindingsClassifier, ProstatectomyDetector};
pub use measure::MeasurementConverter;
pub use sections::{ExtractedSections, SectionExtractor};
pub use templates::ReportTemplates;
pub use terminology::TerminologyCorrector;
pub use tracer::TracerDetector;
