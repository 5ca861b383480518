// ==========================================
// 季节款机会损失预测系统 - 款级汇总
// ==========================================
// 职责: 将同一款号下各色号的周度实际/潜在销量与损失按周合计
// 规则: 有预测行的周 potential = predicted, 否则 potential = actual 且 loss = 0
// ==========================================

use crate::domain::forecast::LossForecast;
use crate::domain::order::{OrderSuggestion, StyleRollup, StyleWeekPoint};
use crate::domain::series::WeeklySeries;
use chrono::NaiveDate;
use std::collections::{BTreeMap, HashMap};

#[derive(Default)]
struct StyleAccumulator {
    color_count: usize,
    total_sale: u64,
    total_loss: u64,
    suggested_order_qty: u64,
    weeks: BTreeMap<NaiveDate, StyleWeekPoint>,
}

// ==========================================
// StyleRollupBuilder - 款级汇总构建器
// ==========================================
#[derive(Default)]
pub struct StyleRollupBuilder {
    styles: BTreeMap<String, StyleAccumulator>,
}

impl StyleRollupBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// 累加一个色号序列
    ///
    /// # 参数
    /// - series: 原始周度序列
    /// - forecast: 有机会损失时的预测结果
    /// - suggestion: 该色号的订货建议
    pub fn add_series(
        &mut self,
        series: &WeeklySeries,
        forecast: Option<&LossForecast>,
        suggestion: &OrderSuggestion,
    ) {
        let acc = self
            .styles
            .entry(series.key.style_code.clone())
            .or_default();

        acc.color_count += 1;
        acc.total_sale += series.total_sale();
        acc.suggested_order_qty += suggestion.suggested_order_qty;

        let predicted: HashMap<NaiveDate, (u32, u32)> = forecast
            .map(|f| {
                f.rows
                    .iter()
                    .map(|r| (r.date, (r.predicted_sale, r.loss)))
                    .collect()
            })
            .unwrap_or_default();

        for obs in &series.observations {
            let point = acc.weeks.entry(obs.date).or_insert_with(|| StyleWeekPoint {
                date: obs.date,
                ..Default::default()
            });
            point.actual_sale += u64::from(obs.sale_qty);

            match predicted.get(&obs.date) {
                Some(&(predicted_sale, loss)) => {
                    point.potential_sale += u64::from(predicted_sale);
                    point.loss += u64::from(loss);
                    acc.total_loss += u64::from(loss);
                }
                None => point.potential_sale += u64::from(obs.sale_qty),
            }
        }
    }

    /// 输出款级汇总（按款号升序）
    pub fn finish(self) -> Vec<StyleRollup> {
        self.styles
            .into_iter()
            .map(|(style_code, acc)| StyleRollup {
                style_code,
                color_count: acc.color_count,
                total_sale: acc.total_sale,
                total_loss: acc.total_loss,
                suggested_order_qty: acc.suggested_order_qty,
                weeks: acc.weeks.into_values().collect(),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::forecast::ForecastRow;
    use crate::domain::series::{SeriesKey, WeeklyObservation};

    fn d(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, day).unwrap()
    }

    fn suggestion(key: &SeriesKey, qty: u64) -> OrderSuggestion {
        OrderSuggestion {
            key: key.clone(),
            total_sale: 0,
            loss_qty: 0,
            suggested_order_qty: qty,
        }
    }

    #[test]
    fn test_colors_are_summed_per_week() {
        let black = SeriesKey::new("S1", "BK");
        let white = SeriesKey::new("S1", "WH");
        let black_series = WeeklySeries::new(
            black.clone(),
            vec![
                WeeklyObservation::new(d(1), 50, 10),
                WeeklyObservation::new(d(8), 0, 3),
            ],
        );
        let white_series = WeeklySeries::new(
            white.clone(),
            vec![
                WeeklyObservation::new(d(1), 40, 4),
                WeeklyObservation::new(d(8), 0, 6),
            ],
        );
        let forecast = LossForecast {
            base_velocity: 12.0,
            weeks_remaining: 2.0,
            decay_rate: 0.9,
            rows: vec![ForecastRow::new(d(8), 3, 9)],
            total_loss: 6,
        };

        let mut builder = StyleRollupBuilder::new();
        builder.add_series(&black_series, Some(&forecast), &suggestion(&black, 30));
        builder.add_series(&white_series, None, &suggestion(&white, 20));
        let rollups = builder.finish();

        assert_eq!(rollups.len(), 1);
        let style = &rollups[0];
        assert_eq!(style.color_count, 2);
        assert_eq!(style.total_sale, 23);
        assert_eq!(style.total_loss, 6);
        assert_eq!(style.suggested_order_qty, 50);

        assert_eq!(style.weeks[0].actual_sale, 14);
        assert_eq!(style.weeks[0].potential_sale, 14);
        assert_eq!(style.weeks[0].loss, 0);
        // 第二周: 黑色取预测 9, 白色取实际 6
        assert_eq!(style.weeks[1].actual_sale, 9);
        assert_eq!(style.weeks[1].potential_sale, 15);
        assert_eq!(style.weeks[1].loss, 6);
    }
}
