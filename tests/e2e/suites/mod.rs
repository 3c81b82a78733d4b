//! 测试套件模块
//!
//! 按业务功能组织的测试用例集合。

pub mod catalog_import;
pub mod library_cleanup;
pub mod rule_sync;
