//! 场景筛选端到端测试
//!
//! 通过服务入口覆盖完整的业务流程：
//! - 外部目录场景的批量导入筛选
//! - 本地库场景的清理筛选
//! - 规则编辑与同步

pub mod data;
pub mod suites;
