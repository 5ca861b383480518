// ==========================================
// 季节款机会损失预测系统 - 领域模型层
// ==========================================
// 职责: 定义周度序列、断货事件、预测行、批次报告等领域实体
// 红线: 不含文件读写逻辑,不含引擎逻辑
// ==========================================

pub mod diagnosis;
pub mod forecast;
pub mod order;
pub mod report;
pub mod series;
pub mod types;

// 重导出核心类型
pub use diagnosis::StyleProfile;
pub use forecast::{ForecastRow, LossForecast, LossSummary, SeriesOutcome, StockoutEvent};
pub use order::{OrderSuggestion, StyleRollup, StyleWeekPoint};
pub use report::{BatchReport, OutcomeCounts, SeriesRecord};
pub use series::{SeriesKey, WeeklyObservation, WeeklyRow, WeeklySeries};
pub use types::{IneligibleReason, OutcomeBucket, StyleDiagnosis};
