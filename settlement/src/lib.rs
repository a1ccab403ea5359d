//! Settlement - 外卖平台结算与控制台后端
//!
//! # 架构概述
//!
//! - **结算** (`settlement`): 订单拆分 (餐品/税/佣金/配送费/应付) 与汇总
//! - **存储** (`store`): 层级记录存储接口、实时订阅、内存实现
//! - **监控** (`monitor`): 订阅三路输入，任一变化即全量重算
//! - **看板** (`dashboard`): 平台概览、餐厅看板、订单面板
//! - **服务** (`services`): 订单状态、餐厅/骑手审核、全局费率
//!
//! # 模块结构
//!
//! ```text
//! settlement/src/
//! ├── core/          # 配置
//! ├── settlement/    # 结算计算
//! ├── store/         # 记录存储
//! ├── monitor.rs     # 实时结算
//! ├── dashboard/     # 看板
//! ├── services/      # 写操作
//! ├── money/         # 显示取整
//! └── utils/         # 日志、时间
//! ```

pub mod core;
pub mod dashboard;
pub mod money;
pub mod monitor;
pub mod services;
pub mod settlement;
pub mod store;
pub mod utils;

// Re-export 公共类型
pub use core::Config;
pub use monitor::{Clock, SettlementMonitor};
pub use settlement::{DateFilter, SettlementReport, compute_at, compute_now};
pub use store::{MemoryStore, RecordStore, StorePath};
pub use utils::{AppError, AppResult, ErrorCode};

// Re-export logger functions
pub use utils::logger::{cleanup_old_logs, init_logger_with_file};

/// Audit log helper - records console writes
///
/// Routed to `<log_dir>/audit` when file logging is enabled; those files are
/// never pruned.
///
/// ```ignore
/// audit_log!("order_status", "orders/o1", "PLACED -> CONFIRMED");
/// audit_log!("partner_remove", "deliveryPartners/p1");
/// ```
#[macro_export]
macro_rules! audit_log {
    ($action:expr, $resource:expr) => {
        tracing::info!(
            target: "audit",
            action = $action,
            resource = $resource,
            "AUDIT"
        );
    };
    ($action:expr, $resource:expr, $details:expr) => {
        tracing::info!(
            target: "audit",
            action = $action,
            resource = $resource,
            details = %$details,
            "AUDIT"
        );
    };
}
