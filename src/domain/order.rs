// ==========================================
// 季节款机会损失预测系统 - 订货建议与款级汇总模型
// ==========================================

use crate::domain::series::SeriesKey;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ==========================================
// OrderSuggestion - 单色订货建议
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderSuggestion {
    pub key: SeriesKey,
    pub total_sale: u64,
    pub loss_qty: u64,
    pub suggested_order_qty: u64, // 按取整单位向上取整
}

// ==========================================
// StyleWeekPoint - 款级单周合计
// ==========================================
// potential_sale: 有预测的周取预测值，否则取实际销量
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StyleWeekPoint {
    pub date: NaiveDate,
    pub actual_sale: u64,
    pub potential_sale: u64,
    pub loss: u64,
}

// ==========================================
// StyleRollup - 款级汇总（跨色号）
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StyleRollup {
    pub style_code: String,
    pub color_count: usize,
    pub total_sale: u64,
    pub total_loss: u64,
    pub suggested_order_qty: u64,
    pub weeks: Vec<StyleWeekPoint>, // 按日期升序
}
