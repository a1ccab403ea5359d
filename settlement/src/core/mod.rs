//! 核心模块 - 运行配置
//!
//! - [`Config`] - 报表工具配置 (环境变量 + 默认值)

pub mod config;

pub use config::Config;
