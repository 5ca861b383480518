// ==========================================
// 季节款机会损失预测系统 - 批次报告模型
// ==========================================
// 红线: 各分桶计数之和 == 输入序列数
// ==========================================

use crate::domain::diagnosis::StyleProfile;
use crate::domain::forecast::LossSummary;
use crate::domain::order::{OrderSuggestion, StyleRollup};
use crate::domain::series::SeriesKey;
use crate::domain::types::{OutcomeBucket, StyleDiagnosis};
use chrono::{DateTime, NaiveDate, Utc};
use std::collections::BTreeSet;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ==========================================
// OutcomeCounts - 分桶计数
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct OutcomeCounts {
    pub too_short: usize,
    pub no_stockout_detected: usize,
    pub low_base_velocity: usize,
    pub past_season_end: usize,
    pub zero_total_loss: usize,
    pub loss_found: usize,
    pub error: usize,
}

impl OutcomeCounts {
    pub fn record(&mut self, bucket: OutcomeBucket) {
        *self.slot_mut(bucket) += 1;
    }

    pub fn get(&self, bucket: OutcomeBucket) -> usize {
        match bucket {
            OutcomeBucket::TooShort => self.too_short,
            OutcomeBucket::NoStockoutDetected => self.no_stockout_detected,
            OutcomeBucket::LowBaseVelocity => self.low_base_velocity,
            OutcomeBucket::PastSeasonEnd => self.past_season_end,
            OutcomeBucket::ZeroTotalLoss => self.zero_total_loss,
            OutcomeBucket::LossFound => self.loss_found,
            OutcomeBucket::Error => self.error,
        }
    }

    pub fn total(&self) -> usize {
        OutcomeBucket::ALL.iter().map(|b| self.get(*b)).sum()
    }

    fn slot_mut(&mut self, bucket: OutcomeBucket) -> &mut usize {
        match bucket {
            OutcomeBucket::TooShort => &mut self.too_short,
            OutcomeBucket::NoStockoutDetected => &mut self.no_stockout_detected,
            OutcomeBucket::LowBaseVelocity => &mut self.low_base_velocity,
            OutcomeBucket::PastSeasonEnd => &mut self.past_season_end,
            OutcomeBucket::ZeroTotalLoss => &mut self.zero_total_loss,
            OutcomeBucket::LossFound => &mut self.loss_found,
            OutcomeBucket::Error => &mut self.error,
        }
    }
}

// ==========================================
// SeriesRecord - 单序列结论（报告行）
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesRecord {
    pub key: SeriesKey,
    pub bucket: OutcomeBucket,
    pub observations: usize,
    pub stockout_date: Option<NaiveDate>,
    pub total_sale: u64,
    pub total_loss: u64,
    pub reason: Option<String>, // 不予预测原因或错误信息
    pub profile: StyleProfile,
}

// ==========================================
// BatchReport - 批次运行报告
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchReport {
    pub run_id: Uuid,
    pub generated_at: DateTime<Utc>,
    pub counts: OutcomeCounts,
    pub records: Vec<SeriesRecord>,
    pub loss_summaries: Vec<LossSummary>,
    pub order_suggestions: Vec<OrderSuggestion>,
    pub style_rollups: Vec<StyleRollup>,
}

impl BatchReport {
    pub fn total_loss(&self) -> u64 {
        self.loss_summaries.iter().map(|s| s.total_loss).sum()
    }

    pub fn record_for(&self, key: &SeriesKey) -> Option<&SeriesRecord> {
        self.records.iter().find(|r| &r.key == key)
    }

    pub fn diagnosis_count(&self, diagnosis: StyleDiagnosis) -> usize {
        self.records
            .iter()
            .filter(|r| r.profile.diagnosis == diagnosis)
            .count()
    }

    /// 存在断货类诊断款色的款号（去重、升序）
    pub fn loss_target_styles(&self) -> Vec<String> {
        self.records
            .iter()
            .filter(|r| r.profile.is_loss_target())
            .map(|r| r.key.style_code.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts_total_sums_all_buckets() {
        let mut counts = OutcomeCounts::default();
        for bucket in OutcomeBucket::ALL {
            counts.record(bucket);
        }
        counts.record(OutcomeBucket::LossFound);
        assert_eq!(counts.total(), 8);
        assert_eq!(counts.get(OutcomeBucket::LossFound), 2);
    }
}
