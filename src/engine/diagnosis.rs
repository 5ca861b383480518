// ==========================================
// 季节款机会损失预测系统 - 款色诊断引擎
// ==========================================
// 职责: 根据断货时点与最终售罄率给出款色诊断
// 输入: 已排序的周度观测 + ForecastConfig
// 输出: StyleProfile
// ==========================================
// 诊断规则（命中即返回）:
//   有断货(售罄率 >= 阈值 且 累计到货 > 10):
//     断货日 <= 早期断货基准日        → EarlyShortage
//     断货日 <= 基准日 + 2 个月       → Shortage
//     其余                            → TimelySellOut
//   无断货:
//     最终售罄率 >= 0.80              → HighEfficiency
//     最终售罄率 <  0.55              → Risk
//     其余                            → Normal
// 红线: 无状态、无副作用、无 I/O 操作
// ==========================================

use crate::config::ForecastConfig;
use crate::domain::diagnosis::StyleProfile;
use crate::domain::series::WeeklyObservation;
use crate::domain::types::StyleDiagnosis;
use crate::engine::stockout::StockoutDetector;
use chrono::{Duration, NaiveDate};
use std::sync::Arc;

/// 诊断断货要求的最小累计到货（不含）
pub const MIN_DIAGNOSIS_INBOUND: u64 = 10;
/// 高效售罄下限
pub const HIGH_EFFICIENCY_SELL_THROUGH: f64 = 0.80;
/// 滞销风险上限（不含）
pub const RISK_SELL_THROUGH: f64 = 0.55;
/// 首次到货后超过该天数的到货视为补货
pub const REORDER_GAP_DAYS: i64 = 14;

// ==========================================
// StyleDiagnosisEngine - 款色诊断引擎
// ==========================================
pub struct StyleDiagnosisEngine {
    config: Arc<ForecastConfig>,
}

impl StyleDiagnosisEngine {
    pub fn new(config: Arc<ForecastConfig>) -> Self {
        Self { config }
    }

    /// 生成款色销售画像
    pub fn diagnose(&self, observations: &[WeeklyObservation]) -> StyleProfile {
        let curve = StockoutDetector::sell_through_curve(observations);
        let final_sell_through = curve.last().copied().unwrap_or(0.0);
        let stockout_date =
            Self::guarded_stockout_date(observations, &curve, self.config.sell_through_threshold);
        let first_inbound_date = Self::first_inbound_date(observations);

        StyleProfile {
            diagnosis: Self::classify(
                stockout_date,
                final_sell_through,
                self.config.early_stockout_date,
                self.config.shortage_cutoff_date(),
            ),
            reorder_dates: first_inbound_date
                .map(|first| Self::reorder_dates(observations, first))
                .unwrap_or_default(),
            first_inbound_date,
            stockout_date,
            total_inbound: observations.iter().map(|o| u64::from(o.inbound_qty)).sum(),
            total_sale: observations.iter().map(|o| u64::from(o.sale_qty)).sum(),
            final_sell_through,
        }
    }

    // ==========================================
    // 纯函数工具
    // ==========================================

    /// 诊断规则
    pub fn classify(
        stockout_date: Option<NaiveDate>,
        final_sell_through: f64,
        early_stockout_date: NaiveDate,
        shortage_cutoff_date: NaiveDate,
    ) -> StyleDiagnosis {
        match stockout_date {
            Some(date) if date <= early_stockout_date => StyleDiagnosis::EarlyShortage,
            Some(date) if date <= shortage_cutoff_date => StyleDiagnosis::Shortage,
            Some(_) => StyleDiagnosis::TimelySellOut,
            None if final_sell_through >= HIGH_EFFICIENCY_SELL_THROUGH => {
                StyleDiagnosis::HighEfficiency
            }
            None if final_sell_through < RISK_SELL_THROUGH => StyleDiagnosis::Risk,
            None => StyleDiagnosis::Normal,
        }
    }

    /// 首个售罄率 >= threshold 且累计到货 > 10 的周
    ///
    /// 与断货识别器不同，小批量到货不计入诊断断货
    pub fn guarded_stockout_date(
        observations: &[WeeklyObservation],
        curve: &[f64],
        threshold: f64,
    ) -> Option<NaiveDate> {
        let mut cum_inbound: u64 = 0;
        observations
            .iter()
            .zip(curve)
            .find(|(obs, st)| {
                cum_inbound += u64::from(obs.inbound_qty);
                **st >= threshold && cum_inbound > MIN_DIAGNOSIS_INBOUND
            })
            .map(|(obs, _)| obs.date)
    }

    pub fn first_inbound_date(observations: &[WeeklyObservation]) -> Option<NaiveDate> {
        observations
            .iter()
            .find(|o| o.inbound_qty > 0)
            .map(|o| o.date)
    }

    /// 首次到货 14 天之后仍有到货的周
    pub fn reorder_dates(observations: &[WeeklyObservation], first_inbound: NaiveDate) -> Vec<NaiveDate> {
        let after = first_inbound + Duration::days(REORDER_GAP_DAYS);
        observations
            .iter()
            .filter(|o| o.date > after && o.inbound_qty > 0)
            .map(|o| o.date)
            .collect()
    }
}
