//! HTTP处理器

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use report_core::ReportError;
use report_engine::ReportEngine;
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::{info, warn};

/// 报告生成请求体。options字段保留给未来的模板定制，当前忽略。
#[derive(Debug, Deserialize)]
pub struct ReportRequest {
    pub dictation: Option<String>,
    #[allow(dead_code)]
    pub options: Option<Value>,
}

/// API根路径处理器
pub async fn api_root() -> impl IntoResponse {
    Json(json!({
        "service": "Dictation Report API",
        "version": "1.0.0",
        "status": "running",
        "endpoints": {
            "health": "/health",
            "report": "/api/v1/report"
        }
    }))
}

/// 健康检查处理器
pub async fn health() -> impl IntoResponse {
    Json(json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "version": "1.0.0"
    }))
}

/// 报告生成处理器：口述文本进，规范化报告出
///
/// 请求体解析自己处理：dictation缺失、类型不对或JSON不合法都按
/// MISSING_DICTATION回给调用方，不走框架默认的422纯文本响应。
pub async fn generate_report(
    State(engine): State<Arc<ReportEngine>>,
    payload: Result<Json<ReportRequest>, JsonRejection>,
) -> axum::response::Response {
    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => {
            warn!("Rejected report request body: {}", rejection);
            return error_response(&ReportError::MissingDictation(
                "dictation must be a non-empty string".to_string(),
            ));
        }
    };

    let dictation = request.dictation.unwrap_or_default();
    info!("Generating report from dictation ({} chars)", dictation.len());

    match engine.generate(&dictation) {
        Ok(generated) => Json(json!({
            "success": true,
            "report": generated.report,
            "metadata": generated.metadata
        }))
        .into_response(),
        Err(e) => {
            warn!("Report generation failed: {}", e);
            error_response(&e)
        }
    }
}

/// 报告路由上的非POST请求统一回405
pub async fn method_not_allowed() -> axum::response::Response {
    error_response(&ReportError::MethodNotAllowed(
        "only POST is supported on this endpoint".to_string(),
    ))
}

/// 错误转HTTP响应。错误码与状态码一一对应。
pub fn error_response(error: &ReportError) -> axum::response::Response {
    let status = match error {
        ReportError::MissingDictation(_) => StatusCode::BAD_REQUEST,
        ReportError::MethodNotAllowed(_) => StatusCode::METHOD_NOT_ALLOWED,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    };

    let body = Json(json!({
        "success": false,
        "error": error.to_string(),
        "error_code": error.error_code()
    }));

    (status, body).into_response()
}
