//! 核心数据模型定义

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// 显像剂类型
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Tracer {
    Fdg,         // 标准FDG检查
    Ga68Psma,    // Ga-68-PSMA（前列腺）
    Ga68Dotatate, // Ga-68-DOTATATE（神经内分泌）
    FdgCardiac,  // FDG心脏检查（生酮准备）
}

impl Tracer {
    /// 报告中使用的显像剂名称
    pub fn display(&self) -> &'static str {
        match self {
            Tracer::Fdg | Tracer::FdgCardiac => "FDG",
            Tracer::Ga68Psma => "Ga-68-PSMA",
            Tracer::Ga68Dotatate => "Ga-68-DOTATATE",
        }
    }

    /// 摘要信息中使用的识别结果名称，区分心脏FDG方案
    pub fn label(&self) -> &'static str {
        match self {
            Tracer::Fdg => "FDG",
            Tracer::FdgCardiac => "FDG-Cardiac",
            Tracer::Ga68Psma => "Ga-68-PSMA",
            Tracer::Ga68Dotatate => "Ga-68-DOTATATE",
        }
    }

    /// 技术段开头的固定措辞，由显像剂决定
    pub fn technique_prefix(&self) -> &'static str {
        match self {
            Tracer::Fdg => "Fasting low dose PET/CT",
            Tracer::FdgCardiac => "Ketogenic low dose PET/CT",
            Tracer::Ga68Psma | Tracer::Ga68Dotatate => "Low dose PET/CT",
        }
    }
}

/// 四个固定解剖分区，按从头到脚的顺序
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Region {
    HeadNeck,
    Chest,
    AbdomenPelvis,
    Msk,
}

impl Region {
    /// 固定输出顺序
    pub const ALL: [Region; 4] = [
        Region::HeadNeck,
        Region::Chest,
        Region::AbdomenPelvis,
        Region::Msk,
    ];

    /// Findings小节标题
    pub fn title(&self) -> &'static str {
        match self {
            Region::HeadNeck => "Head/Neck",
            Region::Chest => "Chest",
            Region::AbdomenPelvis => "Abdomen/Pelvis",
            Region::Msk => "MSK/Integument",
        }
    }

    /// 合成句子中使用的部位描述
    pub fn prose(&self) -> &'static str {
        match self {
            Region::HeadNeck => "the head and neck",
            Region::Chest => "the chest",
            Region::AbdomenPelvis => "the abdomen or pelvis",
            Region::Msk => "the musculoskeletal system",
        }
    }
}

/// 单条检查所见
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Finding {
    pub text: String,              // 规范化后的句子
    pub is_positive: bool,         // 是否为阳性所见
    pub is_pulmonary_nodule: bool, // 肺结节标记（仅胸部）
}

/// 从口述文本解析出的中间结构
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParsedScan {
    pub tracer: Tracer,
    pub coverage_area: String, // 规范化的扫描范围描述
    pub history: String,
    pub comparison: String,
    pub impression: String,
    pub findings_by_region: BTreeMap<Region, Vec<Finding>>,
    pub has_prostatectomy_surgical_bed: bool,
    pub measurements_converted: usize,
}

impl ParsedScan {
    /// 某一分区的阳性所见
    pub fn positive_findings(&self, region: Region) -> Vec<&Finding> {
        self.findings_by_region
            .get(&region)
            .map(|fs| fs.iter().filter(|f| f.is_positive).collect())
            .unwrap_or_default()
    }

    /// 胸部阳性肺结节数量，决定结节条款的三态取值
    pub fn pulmonary_nodule_count(&self) -> usize {
        self.findings_by_region
            .get(&Region::Chest)
            .map(|fs| {
                fs.iter()
                    .filter(|f| f.is_positive && f.is_pulmonary_nodule)
                    .count()
            })
            .unwrap_or(0)
    }
}

/// 转换过程的摘要信息
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportMetadata {
    pub tracer_detected: String,
    pub coverage_area: String,
    pub sections_generated: Vec<String>,      // 固定6个段落标题
    pub findings_subcategories: Vec<String>,  // 固定4个分区标题
    pub surgical_bed_included: bool,
    pub measurements_converted: usize,
    pub processing_time: f64, // 秒
}

/// 最终输出：报告正文 + 摘要信息
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratedReport {
    pub report: String,
    pub metadata: ReportMetadata,
}
