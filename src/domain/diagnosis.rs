// ==========================================
// 季节款机会损失预测系统 - 款色诊断画像
// ==========================================

use crate::domain::types::StyleDiagnosis;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ==========================================
// StyleProfile - 单款色销售画像
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StyleProfile {
    pub diagnosis: StyleDiagnosis,
    pub first_inbound_date: Option<NaiveDate>,
    pub reorder_dates: Vec<NaiveDate>, // 首次到货 14 天之后的补货周
    pub stockout_date: Option<NaiveDate>, // 仅统计累计到货 > 10 的断货
    pub total_inbound: u64,
    pub total_sale: u64,
    pub final_sell_through: f64,
}

impl StyleProfile {
    pub fn is_loss_target(&self) -> bool {
        self.diagnosis.is_loss_target()
    }

    /// 最终售罄率百分比（保留 1 位小数）
    pub fn final_sell_through_pct(&self) -> f64 {
        (self.final_sell_through * 1000.0).round_ties_even() / 10.0
    }
}
