// ==========================================
// 季节款机会损失预测系统 - 订货建议引擎
// ==========================================
// 规则:
//   有机会损失 → ceil((总销售 + 损失) / 目标售罄率 / 单位) * 单位
//   无机会损失 → ceil(总销售 / 目标售罄率 / 单位) * 单位 (总销售为 0 时建议 0)
// ==========================================

use crate::config::ForecastConfig;
use crate::domain::order::OrderSuggestion;
use crate::domain::series::SeriesKey;

// ==========================================
// OrderSuggestionEngine - 订货建议
// ==========================================
#[derive(Debug, Clone, Copy)]
pub struct OrderSuggestionEngine {
    sell_through_target: f64,
    rounding_unit: u64,
}

impl OrderSuggestionEngine {
    pub fn new(sell_through_target: f64, rounding_unit: u64) -> Self {
        Self {
            sell_through_target,
            rounding_unit,
        }
    }

    pub fn from_config(config: &ForecastConfig) -> Self {
        Self::new(config.order_sell_through_target, config.order_rounding_unit)
    }

    /// 计算单色订货建议
    pub fn suggest(&self, key: &SeriesKey, total_sale: u64, loss_qty: u64) -> OrderSuggestion {
        let demand = total_sale + loss_qty;
        let suggested_order_qty = if demand == 0 {
            0
        } else {
            self.round_up(demand as f64 / self.sell_through_target)
        };

        OrderSuggestion {
            key: key.clone(),
            total_sale,
            loss_qty,
            suggested_order_qty,
        }
    }

    /// 向上取整到 rounding_unit 的整数倍
    fn round_up(&self, qty: f64) -> u64 {
        let unit = self.rounding_unit.max(1);
        (qty / unit as f64).ceil() as u64 * unit
    }
}
