// ==========================================
// 季节款机会损失预测系统 - 预测结果领域模型
// ==========================================
// 用途: 引擎写入,汇总层只读
// 红线: ForecastRow 生成后不可修改; loss 永不为负
// ==========================================

use crate::domain::series::SeriesKey;
use crate::domain::types::{IneligibleReason, OutcomeBucket};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ==========================================
// StockoutEvent - 商业性断货事件
// ==========================================
// 累计售罄率首次达到阈值的周
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockoutEvent {
    pub index: usize,     // 在序列中的位置
    pub date: NaiveDate,  // 该周结束日
}

// ==========================================
// ForecastRow - 断货后单周预测
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForecastRow {
    pub date: NaiveDate,
    pub actual_sale: u32,
    pub predicted_sale: u32, // 四舍六入五成双后的整数
    pub loss: u32,           // max(0, predicted - actual)
}

impl ForecastRow {
    pub fn new(date: NaiveDate, actual_sale: u32, predicted_sale: u32) -> Self {
        Self {
            date,
            actual_sale,
            predicted_sale,
            loss: predicted_sale.saturating_sub(actual_sale),
        }
    }

    /// 硬截止日之后的周: 预测与损失强制为 0
    pub fn cut_off(date: NaiveDate, actual_sale: u32) -> Self {
        Self {
            date,
            actual_sale,
            predicted_sale: 0,
            loss: 0,
        }
    }
}

// ==========================================
// LossForecast - 衰减预测引擎输出
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LossForecast {
    pub base_velocity: f64,   // 断货前 4 周平均销量
    pub weeks_remaining: f64, // (季末 - 断货日).days / 7
    pub decay_rate: f64,      // 每周衰减系数 r
    pub rows: Vec<ForecastRow>,
    pub total_loss: u64,
}

// ==========================================
// LossSummary - 单序列损失汇总
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LossSummary {
    pub key: SeriesKey,
    pub stockout: StockoutEvent,
    pub total_loss: u64,
    pub forecast: LossForecast,
}

// ==========================================
// SeriesOutcome - 单序列最终结论
// ==========================================
// 计算异常不在此枚举内，由 ForecastResult 的 Err 分支承载
#[derive(Debug, Clone, PartialEq)]
pub enum SeriesOutcome {
    TooShort {
        observations: usize,
    },
    NoStockoutDetected,
    Ineligible {
        stockout: StockoutEvent,
        reason: IneligibleReason,
    },
    ZeroTotalLoss {
        stockout: StockoutEvent,
    },
    LossFound(LossSummary),
}

impl SeriesOutcome {
    pub fn bucket(&self) -> OutcomeBucket {
        match self {
            SeriesOutcome::TooShort { .. } => OutcomeBucket::TooShort,
            SeriesOutcome::NoStockoutDetected => OutcomeBucket::NoStockoutDetected,
            SeriesOutcome::Ineligible { reason, .. } => reason.bucket(),
            SeriesOutcome::ZeroTotalLoss { .. } => OutcomeBucket::ZeroTotalLoss,
            SeriesOutcome::LossFound(_) => OutcomeBucket::LossFound,
        }
    }

    pub fn stockout(&self) -> Option<&StockoutEvent> {
        match self {
            SeriesOutcome::Ineligible { stockout, .. }
            | SeriesOutcome::ZeroTotalLoss { stockout } => Some(stockout),
            SeriesOutcome::LossFound(summary) => Some(&summary.stockout),
            _ => None,
        }
    }

    pub fn total_loss(&self) -> u64 {
        match self {
            SeriesOutcome::LossFound(summary) => summary.total_loss,
            _ => 0,
        }
    }
}
