// ==========================================
// 季节款机会损失预测系统 - 衰减需求预测引擎
// ==========================================
// 职责: 断货周 → 季末, 以指数衰减曲线预测潜在需求并累计机会损失
// 输入: 已排序的周度观测 + 断货位置 + ForecastConfig
// 输出: DecayDecision (预测结果 或 不予预测原因)
// ==========================================
// 准入(全部满足才预测):
//   1) stockout_index >= 4
//   2) base_velocity = 断货前 4 周平均销量 > terminal_value
//   3) stockout_date < season_end_date 且 weeks_remaining > 0
// 衰减率: r = (terminal_value / base_velocity) ^ (1 / weeks_remaining)
// 取整: 四舍六入五成双 (round half to even), 保证跨实现结果一致
// ==========================================

use crate::config::ForecastConfig;
use crate::domain::forecast::{ForecastRow, LossForecast};
use crate::domain::series::WeeklyObservation;
use crate::domain::types::IneligibleReason;
use crate::engine::error::{ForecastError, ForecastResult};
use chrono::NaiveDate;
use std::sync::Arc;
use tracing::trace;

/// 基础销速取样周数
pub const BASELINE_WEEKS: usize = 4;

// ==========================================
// Eligibility - 准入判定结果
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Eligibility {
    Eligible {
        base_velocity: f64,
        weeks_remaining: f64,
    },
    Ineligible(IneligibleReason),
}

// ==========================================
// DecayDecision - 引擎输出
// ==========================================
#[derive(Debug, Clone, PartialEq)]
pub enum DecayDecision {
    Forecast(LossForecast),
    Ineligible(IneligibleReason),
}

// ==========================================
// DecayForecastEngine - 衰减需求预测引擎
// ==========================================
pub struct DecayForecastEngine {
    config: Arc<ForecastConfig>,
}

impl DecayForecastEngine {
    /// 创建新的衰减预测引擎
    ///
    /// # 参数
    /// - config: 已校验的预测参数
    pub fn new(config: Arc<ForecastConfig>) -> Self {
        Self { config }
    }

    // ==========================================
    // 核心方法
    // ==========================================

    /// 预测机会损失
    ///
    /// # 返回
    /// - Ok(Some(LossForecast)): 满足准入，完成预测
    /// - Ok(None): 不构成损失场景（非错误）
    /// - Err: 前置条件违反或数值异常
    pub fn forecast_loss(
        &self,
        observations: &[WeeklyObservation],
        stockout_index: usize,
    ) -> ForecastResult<Option<LossForecast>> {
        match self.evaluate(observations, stockout_index)? {
            DecayDecision::Forecast(forecast) => Ok(Some(forecast)),
            DecayDecision::Ineligible(_) => Ok(None),
        }
    }

    /// 准入判定 + 预测，保留不予预测的原因
    pub fn evaluate(
        &self,
        observations: &[WeeklyObservation],
        stockout_index: usize,
    ) -> ForecastResult<DecayDecision> {
        if observations.len() < self.config.minimum_series_length {
            return Err(ForecastError::InsufficientData {
                observations: observations.len(),
                minimum: self.config.minimum_series_length,
            });
        }

        match self.check_eligibility(observations, stockout_index)? {
            Eligibility::Eligible {
                base_velocity,
                weeks_remaining,
            } => {
                let forecast =
                    self.forward_walk(observations, stockout_index, base_velocity, weeks_remaining)?;
                Ok(DecayDecision::Forecast(forecast))
            }
            Eligibility::Ineligible(reason) => Ok(DecayDecision::Ineligible(reason)),
        }
    }

    /// 准入判定
    ///
    /// 顺序（命中即返回）:
    /// 1) stockout_index < 4 → 断货日 >= season_end_date 时 PastSeasonEnd, 否则 InsufficientBaseline
    /// 2) base_velocity <= terminal_value → LowBaseVelocity
    /// 3) stockout_date >= season_end_date 或 weeks_remaining <= 0 → PastSeasonEnd
    pub fn check_eligibility(
        &self,
        observations: &[WeeklyObservation],
        stockout_index: usize,
    ) -> ForecastResult<Eligibility> {
        if stockout_index >= observations.len() {
            return Err(ForecastError::IndexOutOfRange {
                index: stockout_index,
                len: observations.len(),
            });
        }

        let stockout_date = observations[stockout_index].date;

        // 基础销速无法建立时不做销速判定，仍按季末归类
        let base_velocity = match Self::base_velocity(observations, stockout_index) {
            Some(v) => v,
            None if stockout_date >= self.config.season_end_date => {
                return Ok(Eligibility::Ineligible(IneligibleReason::PastSeasonEnd))
            }
            None => return Ok(Eligibility::Ineligible(IneligibleReason::InsufficientBaseline)),
        };
        if !base_velocity.is_finite() {
            return Err(ForecastError::NonFiniteValue {
                field: "base_velocity",
                value: base_velocity,
            });
        }

        if base_velocity <= self.config.terminal_value {
            return Ok(Eligibility::Ineligible(IneligibleReason::LowBaseVelocity));
        }

        if stockout_date >= self.config.season_end_date {
            return Ok(Eligibility::Ineligible(IneligibleReason::PastSeasonEnd));
        }

        let weeks_remaining = Self::weeks_remaining(stockout_date, self.config.season_end_date);
        if weeks_remaining <= 0.0 {
            return Ok(Eligibility::Ineligible(IneligibleReason::PastSeasonEnd));
        }

        Ok(Eligibility::Eligible {
            base_velocity,
            weeks_remaining,
        })
    }

    // ==========================================
    // 纯函数工具
    // ==========================================

    /// 断货前 BASELINE_WEEKS 周的平均销量
    ///
    /// stockout_index < BASELINE_WEEKS 时返回 None
    pub fn base_velocity(observations: &[WeeklyObservation], stockout_index: usize) -> Option<f64> {
        if stockout_index < BASELINE_WEEKS || stockout_index > observations.len() {
            return None;
        }
        let window = &observations[stockout_index - BASELINE_WEEKS..stockout_index];
        let sum: u64 = window.iter().map(|o| u64::from(o.sale_qty)).sum();
        Some(sum as f64 / BASELINE_WEEKS as f64)
    }

    /// 剩余周数（可为小数）
    pub fn weeks_remaining(stockout_date: NaiveDate, season_end_date: NaiveDate) -> f64 {
        (season_end_date - stockout_date).num_days() as f64 / 7.0
    }

    /// 反推每周衰减率
    ///
    /// base_velocity 每周乘以 r，经过 weeks_remaining 周恰好等于 terminal_value
    pub fn decay_rate(
        base_velocity: f64,
        terminal_value: f64,
        weeks_remaining: f64,
    ) -> ForecastResult<f64> {
        let rate = (terminal_value / base_velocity).powf(1.0 / weeks_remaining);
        if rate.is_finite() && rate > 0.0 {
            Ok(rate)
        } else {
            Err(ForecastError::NonFiniteValue {
                field: "decay_rate",
                value: rate,
            })
        }
    }

    /// 预测值取整（四舍六入五成双）
    pub fn round_quantity(value: f64) -> ForecastResult<u32> {
        if !value.is_finite() {
            return Err(ForecastError::NonFiniteValue {
                field: "predicted_sale",
                value,
            });
        }
        let rounded = value.max(0.0).round_ties_even();
        if rounded > f64::from(u32::MAX) {
            return Err(ForecastError::QuantityOverflow(value));
        }
        Ok(rounded as u32)
    }

    // ==========================================
    // 逐周前推
    // ==========================================

    /// 从断货周到序列末尾逐周预测
    ///
    /// 硬截止日之后的周预测与损失为 0，且不再推进衰减
    fn forward_walk(
        &self,
        observations: &[WeeklyObservation],
        stockout_index: usize,
        base_velocity: f64,
        weeks_remaining: f64,
    ) -> ForecastResult<LossForecast> {
        let decay_rate =
            Self::decay_rate(base_velocity, self.config.terminal_value, weeks_remaining)?;
        let cutoff = self.config.season_hard_cutoff_date;

        let tail = &observations[stockout_index..];
        let mut rows = Vec::with_capacity(tail.len());
        let mut total_loss: u64 = 0;
        let mut current_predicted = base_velocity;

        for obs in tail {
            let row = if obs.date > cutoff {
                ForecastRow::cut_off(obs.date, obs.sale_qty)
            } else {
                current_predicted *= decay_rate;
                let predicted = Self::round_quantity(current_predicted)?;
                ForecastRow::new(obs.date, obs.sale_qty, predicted)
            };

            trace!(
                date = %row.date,
                actual = row.actual_sale,
                predicted = row.predicted_sale,
                loss = row.loss,
                "逐周预测"
            );

            total_loss += u64::from(row.loss);
            rows.push(row);
        }

        Ok(LossForecast {
            base_velocity,
            weeks_remaining,
            decay_rate,
            rows,
            total_loss,
        })
    }
}
