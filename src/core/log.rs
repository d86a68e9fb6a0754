//! 日志系统模块
//!
//! 基于 `tracing` 提供结构化的日志记录功能。
//!
//! # 特性
//!
//! - 结构化日志：支持键值对
//! - 灵活输出：支持控制台和文件输出
//! - 日志级别：trace, debug, info, warn, error
//!
//! # 使用示例
//!
//! ```no_run
//! use mesh_strip::core::{log, config::LogLevel};
//!
//! log::init_logger(LogLevel::Info, false, None).unwrap();
//!
//! tracing::info!(faces = 1024, "Mesh loaded");
//! ```

use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    prelude::*,
    EnvFilter,
};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use std::path::Path;

use super::config::LogLevel;
use super::error::{MeshStripError, Result};

/// 初始化日志系统
///
/// 必须在程序开始时调用一次；重复初始化会返回 `MeshStripError::Log`。
///
/// # 参数
///
/// * `level` - 日志级别
/// * `file_output` - 是否输出到文件
/// * `log_file_path` - 日志文件路径（可选，默认为 "mesh_strip.log"）
pub fn init_logger(level: LogLevel, file_output: bool, log_file_path: Option<&str>) -> Result<()> {
    let filter = EnvFilter::new(filter_directive(level));

    let result = if file_output {
        // 解析日志文件路径
        let log_path = log_file_path.unwrap_or("mesh_strip.log");
        let path = Path::new(log_path);
        let directory = path.parent().unwrap_or(Path::new("."));
        let filename = path.file_name()
            .and_then(|s| s.to_str())
            .unwrap_or("mesh_strip.log");

        // 创建滚动文件 appender（每天滚动）
        let file_appender = RollingFileAppender::new(
            Rotation::DAILY,
            directory,
            filename
        );

        let console_layer = fmt::layer()
            .with_target(true)
            .with_span_events(span_events())
            .with_ansi(true);

        let file_layer = fmt::layer()
            .with_target(true)
            .with_span_events(span_events())
            .with_ansi(false)  // 文件不需要 ANSI 颜色
            .with_writer(file_appender);

        tracing_subscriber::registry()
            .with(filter)
            .with(console_layer)
            .with(file_layer)
            .try_init()
    } else {
        let fmt_layer = fmt::layer()
            .with_target(true)
            .with_span_events(span_events())
            .with_ansi(true);

        tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer)
            .try_init()
    };

    result.map_err(|e| MeshStripError::Log(e.to_string()))
}

/// 所有输出层共用的 span 事件：span 关闭时输出耗时
fn span_events() -> FmtSpan {
    FmtSpan::CLOSE
}

fn filter_directive(level: LogLevel) -> &'static str {
    match level {
        LogLevel::Trace => "trace",
        LogLevel::Debug => "debug",
        LogLevel::Info => "info",
        LogLevel::Warn => "warn",
        LogLevel::Error => "error",
    }
}

/// 条带化日志 - Info 级别
#[macro_export]
macro_rules! strip_info {
    ($($arg:tt)*) => {
        tracing::info!(target: "mesh_strip::stripper", $($arg)*)
    };
}

/// 条带化日志 - Debug 级别
#[macro_export]
macro_rules! strip_debug {
    ($($arg:tt)*) => {
        tracing::debug!(target: "mesh_strip::stripper", $($arg)*)
    };
}

/// 条带化日志 - Warn 级别
#[macro_export]
macro_rules! strip_warn {
    ($($arg:tt)*) => {
        tracing::warn!(target: "mesh_strip::stripper", $($arg)*)
    };
}

/// 性能追踪宏
///
/// 进入返回的 span 后，控制台和日志文件都会在 span 结束时记录耗时。
#[macro_export]
macro_rules! span_trace {
    ($name:expr) => {
        tracing::span!(tracing::Level::TRACE, $name)
    };
    ($name:expr, $($fields:tt)*) => {
        tracing::span!(tracing::Level::TRACE, $name, $($fields)*)
    };
}
