// ==========================================
// 季节款机会损失预测系统 - 配置层
// ==========================================
// 职责: 品牌配置文件加载、默认值回退、预测参数校验
// 红线: 配置对象启动时构建一次,显式传入各引擎,不使用全局可变状态
// ==========================================

pub mod brand_config;
pub mod config_loader;
pub mod error;
pub mod forecast_config;

// 重导出核心配置类型
pub use brand_config::{BrandConfig, DatePart, MonthDay};
pub use config_loader::{default_config_path, ConfigLoader, CONFIG_PATH_ENV};
pub use error::{ConfigError, ConfigResult};
pub use forecast_config::ForecastConfig;
