//! 报告服务器主程序

use clap::Parser;
use report_core::{ReportError, Result};
use report_web::WebServer;
use std::net::SocketAddr;
use tracing::{error, info};
use tracing_subscriber;

/// 报告服务器命令行参数
#[derive(Parser, Debug)]
#[command(name = "report-server")]
#[command(about = "PET/CT口述报告规范化服务器")]
struct Args {
    /// 监听地址
    #[arg(long, default_value = "0.0.0.0")]
    host: String,

    /// 服务器端口
    #[arg(short, long, default_value = "8080")]
    port: u16,

    /// 日志级别
    #[arg(short, long, default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // 初始化日志
    tracing_subscriber::fmt()
        .with_env_filter(&args.log_level)
        .init();

    info!("启动报告服务器...");
    info!("  监听地址: {}", args.host);
    info!("  监听端口: {}", args.port);

    let addr: SocketAddr = format!("{}:{}", args.host, args.port)
        .parse()
        .map_err(|e| ReportError::Parse(format!("invalid listen address: {}", e)))?;

    let server = WebServer::new(addr);
    if let Err(e) = server.run().await {
        error!("服务器启动失败: {}", e);
        return Err(e);
    }

    Ok(())
}
