use crate::settlement::DateFilter;

/// 报表工具配置
///
/// # 环境变量
///
/// | 环境变量 | 默认值 | 说明 |
/// |----------|--------|------|
/// | SNAPSHOT_PATH | ./data/export.json | 数据库 JSON 导出文件 |
/// | DATE_FILTER | ALL_TIME | TODAY / YESTERDAY / LAST_7_DAYS / LAST_30_DAYS / ALL_TIME |
/// | LOG_LEVEL | info | 日志级别 |
/// | LOG_JSON | false | JSON 格式日志 |
/// | LOG_DIR | (未设置) | 滚动文件日志目录 |
/// | ENVIRONMENT | development | 运行环境 |
///
/// # 示例
///
/// ```ignore
/// SNAPSHOT_PATH=/tmp/export.json DATE_FILTER=LAST_7_DAYS cargo run --bin settlement-report
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// JSON 导出文件路径
    pub snapshot_path: String,
    /// 结算时间窗口
    pub date_filter: DateFilter,
    pub log_level: String,
    pub log_json: bool,
    /// 设置后启用文件日志
    pub log_dir: Option<String>,
    /// 运行环境: development | production
    pub environment: String,
}

impl Config {
    /// 从环境变量加载配置
    ///
    /// 如果环境变量未设置或无法解析，使用默认值
    pub fn from_env() -> Self {
        Self {
            snapshot_path: std::env::var("SNAPSHOT_PATH")
                .unwrap_or_else(|_| "./data/export.json".into()),
            date_filter: std::env::var("DATE_FILTER")
                .ok()
                .and_then(|v| match v.parse() {
                    Ok(filter) => Some(filter),
                    Err(e) => {
                        tracing::warn!(value = %v, error = %e, "Ignoring invalid DATE_FILTER");
                        None
                    }
                })
                .unwrap_or_default(),
            log_level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".into()),
            log_json: std::env::var("LOG_JSON")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(false),
            log_dir: std::env::var("LOG_DIR").ok().filter(|v| !v.is_empty()),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
        }
    }

    /// 使用自定义值覆盖部分配置
    ///
    /// 常用于测试场景
    pub fn with_overrides(snapshot_path: impl Into<String>, date_filter: DateFilter) -> Self {
        let mut config = Self::from_env();
        config.snapshot_path = snapshot_path.into();
        config.date_filter = date_filter;
        config
    }

    /// 是否生产环境
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
