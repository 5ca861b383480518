// ==========================================
// 季节款机会损失预测系统 - 数据接入层
// ==========================================
// 职责: 周度数据加载与分组、批次报告输出
// 红线: 只做搬运,不含预测逻辑
// ==========================================

pub mod error;
pub mod grouping;
pub mod sink;
pub mod source;

pub use error::{DataError, DataResult};
pub use grouping::group_rows;
pub use sink::{JsonReportSink, LossSummarySink};
pub use source::{InMemorySeriesSource, JsonSeriesSource, SeriesSource};
