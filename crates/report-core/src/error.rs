//! 错误定义模块

use thiserror::Error;

/// 报告引擎统一错误类型
#[derive(Error, Debug)]
pub enum ReportError {
    #[error("缺少口述文本: {0}")]
    MissingDictation(String),

    #[error("不支持的请求方法: {0}")]
    MethodNotAllowed(String),

    #[error("解析错误: {0}")]
    Parse(String),

    #[error("模板错误: {0}")]
    Template(String),

    #[error("序列化错误: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO错误: {0}")]
    Io(#[from] std::io::Error),

    #[error("系统内部错误: {0}")]
    Internal(String),
}

impl ReportError {
    /// 对外接口使用的错误码
    pub fn error_code(&self) -> &'static str {
        match self {
            ReportError::MissingDictation(_) => "MISSING_DICTATION",
            ReportError::MethodNotAllowed(_) => "METHOD_NOT_ALLOWED",
            _ => "INTERNAL_ERROR",
        }
    }
}

/// 报告引擎统一结果类型
pub type Result<T> = std::result::Result<T, ReportError>;
