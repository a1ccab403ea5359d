//! 工具模块 - 日志、时间与错误类型
//!
//! - [`AppError`] / [`AppResult`] - 统一错误类型 (from shared::error)
//! - [`logger`] - tracing 初始化与日志清理
//! - [`time`] - 本地时区日界计算

pub mod logger;
pub mod time;

pub use shared::error::{AppError, AppResult, ErrorCategory, ErrorCode};
