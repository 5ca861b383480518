// ==========================================
// 季节款机会损失预测系统 - 预测参数
// ==========================================
// 职责: 承载一次批次运行所需的全部标量参数
// 红线: 季末日(计算衰减率)与硬截止日(强制预测归零)是两个独立参数,不得合并
// ==========================================

use crate::config::error::{ConfigError, ConfigResult};
use chrono::{Datelike, Months, NaiveDate};
use serde::{Deserialize, Serialize};
use tracing::warn;

// ==========================================
// ForecastConfig - 预测参数
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastConfig {
    /// 商业性断货判定的累计售罄率阈值，(0, 1]
    pub sell_through_threshold: f64,
    /// 季末收敛的周销量
    pub terminal_value: f64,
    /// 季末日，用于计算剩余周数与衰减率
    pub season_end_date: NaiveDate,
    /// 季节关闭硬截止日，之后的周预测强制为 0
    pub season_hard_cutoff_date: NaiveDate,
    /// 参与分析的最少观测周数
    pub minimum_series_length: usize,
    /// 订货建议使用的目标售罄率
    pub order_sell_through_target: f64,
    /// 订货建议的向上取整单位
    pub order_rounding_unit: u64,
    /// 早期断货基准日，季中断货截止日 = 该日 + 2 个月
    pub early_stockout_date: NaiveDate,
}

impl ForecastConfig {
    pub const DEFAULT_SELL_THROUGH_THRESHOLD: f64 = 0.70;
    pub const DEFAULT_TERMINAL_VALUE: f64 = 5.0;
    pub const DEFAULT_MINIMUM_SERIES_LENGTH: usize = 4;
    pub const DEFAULT_ORDER_SELL_THROUGH_TARGET: f64 = 0.75;
    pub const DEFAULT_ORDER_ROUNDING_UNIT: u64 = 10;
    pub const DEFAULT_EARLY_STOCKOUT_MONTH_DAY: (u32, u32) = (5, 30);
    pub const SHORTAGE_WINDOW_MONTHS: u32 = 2;

    /// 以默认标量参数创建配置
    ///
    /// 两个日期没有合理的默认值，必须由调用方给出
    /// 早期断货基准日取季末同年的 5 月 30 日
    pub fn new(season_end_date: NaiveDate, season_hard_cutoff_date: NaiveDate) -> Self {
        let (month, day) = Self::DEFAULT_EARLY_STOCKOUT_MONTH_DAY;
        let early_stockout_date = NaiveDate::from_ymd_opt(season_end_date.year(), month, day)
            .unwrap_or(season_end_date);
        Self {
            sell_through_threshold: Self::DEFAULT_SELL_THROUGH_THRESHOLD,
            terminal_value: Self::DEFAULT_TERMINAL_VALUE,
            season_end_date,
            season_hard_cutoff_date,
            minimum_series_length: Self::DEFAULT_MINIMUM_SERIES_LENGTH,
            order_sell_through_target: Self::DEFAULT_ORDER_SELL_THROUGH_TARGET,
            order_rounding_unit: Self::DEFAULT_ORDER_ROUNDING_UNIT,
            early_stockout_date,
        }
    }

    pub fn with_early_stockout_date(mut self, date: NaiveDate) -> Self {
        self.early_stockout_date = date;
        self
    }

    /// 季中断货截止日 = 早期断货基准日 + 2 个月（月末日自动截断）
    pub fn shortage_cutoff_date(&self) -> NaiveDate {
        self.early_stockout_date
            .checked_add_months(Months::new(Self::SHORTAGE_WINDOW_MONTHS))
            .unwrap_or(NaiveDate::MAX)
    }

    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.sell_through_threshold = threshold;
        self
    }

    pub fn with_terminal_value(mut self, terminal_value: f64) -> Self {
        self.terminal_value = terminal_value;
        self
    }

    pub fn with_minimum_series_length(mut self, length: usize) -> Self {
        self.minimum_series_length = length;
        self
    }

    /// 校验参数
    ///
    /// # 规则
    /// - sell_through_threshold ∈ (0, 1]
    /// - terminal_value 为正的有限数
    /// - minimum_series_length >= 1
    /// - order_sell_through_target ∈ (0, 1]
    /// - order_rounding_unit >= 1
    ///
    /// 硬截止日早于季末日时仅记录警告，不视为错误
    pub fn validate(&self) -> ConfigResult<()> {
        if !(self.sell_through_threshold > 0.0 && self.sell_through_threshold <= 1.0) {
            return Err(ConfigError::InvalidThreshold(self.sell_through_threshold));
        }
        if !(self.terminal_value.is_finite() && self.terminal_value > 0.0) {
            return Err(ConfigError::InvalidTerminalValue(self.terminal_value));
        }
        if self.minimum_series_length < 1 {
            return Err(ConfigError::InvalidMinimumLength(self.minimum_series_length));
        }
        if !(self.order_sell_through_target > 0.0 && self.order_sell_through_target <= 1.0) {
            return Err(ConfigError::InvalidOrderTarget(self.order_sell_through_target));
        }
        if self.order_rounding_unit == 0 {
            return Err(ConfigError::InvalidRoundingUnit);
        }

        if self.boundaries_diverge() {
            warn!(
                season_end_date = %self.season_end_date,
                season_hard_cutoff_date = %self.season_hard_cutoff_date,
                "硬截止日早于季末日: 衰减曲线未收敛前预测即被归零"
            );
        }

        Ok(())
    }

    /// 硬截止日是否早于季末日
    pub fn boundaries_diverge(&self) -> bool {
        self.season_hard_cutoff_date < self.season_end_date
    }
}
