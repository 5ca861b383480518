// ==========================================
// 季节款机会损失预测系统 - 核心库
// ==========================================
// 系统定位: 识别提前售罄的款色, 预测断货后的潜在需求与机会损失,
//           并据此给出下一季订货建议
// 流程: 周度序列 → 断货识别 → 衰减预测 → 分桶汇总 → 订货建议
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 配置层 - 预测参数
pub mod config;

// 引擎层 - 预测规则
pub mod engine;

// 数据接入层 - 加载与输出
pub mod io;

// 日志系统
pub mod logging;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::types::{IneligibleReason, OutcomeBucket, StyleDiagnosis};

// 领域实体
pub use domain::{
    BatchReport, ForecastRow, LossForecast, LossSummary, OrderSuggestion, OutcomeCounts,
    SeriesKey, SeriesOutcome, StockoutEvent, StyleProfile, StyleRollup, WeeklyObservation,
    WeeklyRow, WeeklySeries,
};

// 配置
pub use config::{ConfigError, ConfigLoader, ForecastConfig};

// 引擎
pub use engine::{
    BatchOrchestrator, DecayForecastEngine, ForecastError, OrderSuggestionEngine,
    StockoutDetector, StyleDiagnosisEngine,
};

// 数据接入
pub use io::{DataError, JsonReportSink, JsonSeriesSource, LossSummarySink, SeriesSource};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "季节款机会损失预测系统";
