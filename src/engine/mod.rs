// ==========================================
// 季节款机会损失预测系统 - 引擎层
// ==========================================
// 职责: 断货识别、衰减预测、款色诊断、批次编排、订货建议与款级汇总
// 红线: 引擎不做文件读写, 所有不予预测的结论必须带原因
// ==========================================

pub mod decay;
pub mod diagnosis;
pub mod error;
pub mod orchestrator;
pub mod order_suggestion;
pub mod stockout;
pub mod style_rollup;

// 重导出核心引擎
pub use decay::{DecayDecision, DecayForecastEngine, Eligibility, BASELINE_WEEKS};
pub use diagnosis::StyleDiagnosisEngine;
pub use error::{ForecastError, ForecastResult};
pub use orchestrator::{BatchOrchestrator, SeriesEvaluation};
pub use order_suggestion::OrderSuggestionEngine;
pub use stockout::StockoutDetector;
pub use style_rollup::StyleRollupBuilder;
