// ==========================================
// 季节款机会损失预测系统 - 批次编排器
// ==========================================
// 用途: 协调 断货识别 → 衰减预测 → 款色诊断 → 订货建议 → 款级汇总 的执行顺序
// 红线: 每条输入序列必须且只能落入一个结果分桶
//       单序列计算错误只记录并归入 error 分桶,不中断批次
// 并发: 序列之间无共享可变状态,使用 rayon 并行,结果保持输入顺序
// ==========================================

use crate::config::ForecastConfig;
use crate::domain::diagnosis::StyleProfile;
use crate::domain::forecast::{LossSummary, SeriesOutcome};
use crate::domain::report::{BatchReport, OutcomeCounts, SeriesRecord};
use crate::domain::series::{SeriesKey, WeeklySeries};
use crate::domain::types::{OutcomeBucket, StyleDiagnosis};
use crate::engine::decay::{DecayDecision, DecayForecastEngine};
use crate::engine::diagnosis::StyleDiagnosisEngine;
use crate::engine::error::{ForecastError, ForecastResult};
use crate::engine::order_suggestion::OrderSuggestionEngine;
use crate::engine::stockout::StockoutDetector;
use crate::engine::style_rollup::StyleRollupBuilder;
use chrono::Utc;
use rayon::prelude::*;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

// ==========================================
// SeriesEvaluation - 单序列评估结果
// ==========================================
#[derive(Debug)]
pub struct SeriesEvaluation {
    pub key: SeriesKey,
    pub observations: usize,
    pub total_sale: u64,
    pub profile: StyleProfile,
    pub result: ForecastResult<SeriesOutcome>,
}

impl SeriesEvaluation {
    pub fn bucket(&self) -> OutcomeBucket {
        match &self.result {
            Ok(outcome) => outcome.bucket(),
            Err(_) => OutcomeBucket::Error,
        }
    }
}

// ==========================================
// BatchOrchestrator - 批次编排器
// ==========================================
pub struct BatchOrchestrator {
    config: Arc<ForecastConfig>,
    detector: StockoutDetector,
    decay: DecayForecastEngine,
    diagnosis: StyleDiagnosisEngine,
    orders: OrderSuggestionEngine,
}

impl BatchOrchestrator {
    /// 创建新的编排器实例
    ///
    /// # 参数
    /// - config: 已校验的预测参数（启动时构建一次）
    pub fn new(config: Arc<ForecastConfig>) -> Self {
        Self {
            detector: StockoutDetector::new(config.sell_through_threshold),
            decay: DecayForecastEngine::new(config.clone()),
            diagnosis: StyleDiagnosisEngine::new(config.clone()),
            orders: OrderSuggestionEngine::from_config(&config),
            config,
        }
    }

    pub fn config(&self) -> &ForecastConfig {
        &self.config
    }

    // ==========================================
    // 单序列评估
    // ==========================================

    /// 评估单条序列
    ///
    /// 步骤:
    /// 1) 长度过滤 → TooShort
    /// 2) 日期有序校验 → Err(UnorderedSeries)
    /// 3) 断货识别 → NoStockoutDetected
    /// 4) 衰减预测 → Ineligible / ZeroTotalLoss / LossFound
    pub fn evaluate_series(&self, series: &WeeklySeries) -> ForecastResult<SeriesOutcome> {
        if series.len() < self.config.minimum_series_length {
            return Ok(SeriesOutcome::TooShort {
                observations: series.len(),
            });
        }

        if let Some(index) = series.first_unordered_index() {
            return Err(ForecastError::UnorderedSeries {
                index,
                date: series.observations[index].date,
            });
        }

        let stockout = match self.detector.detect(&series.observations) {
            Some(event) => event,
            None => return Ok(SeriesOutcome::NoStockoutDetected),
        };

        match self.decay.evaluate(&series.observations, stockout.index)? {
            DecayDecision::Ineligible(reason) => Ok(SeriesOutcome::Ineligible { stockout, reason }),
            DecayDecision::Forecast(forecast) if forecast.total_loss == 0 => {
                Ok(SeriesOutcome::ZeroTotalLoss { stockout })
            }
            DecayDecision::Forecast(forecast) => Ok(SeriesOutcome::LossFound(LossSummary {
                key: series.key.clone(),
                stockout,
                total_loss: forecast.total_loss,
                forecast,
            })),
        }
    }

    // ==========================================
    // 批次执行
    // ==========================================

    /// 并行评估全部序列（结果与输入顺序一致）
    #[instrument(skip_all, fields(series_count = batch.len()))]
    pub fn evaluate_batch(&self, batch: &[WeeklySeries]) -> Vec<SeriesEvaluation> {
        batch
            .par_iter()
            .map(|series| SeriesEvaluation {
                key: series.key.clone(),
                observations: series.len(),
                total_sale: series.total_sale(),
                profile: self.diagnosis.diagnose(&series.observations),
                result: self.evaluate_series(series),
            })
            .collect()
    }

    /// 执行完整批次并生成报告
    #[instrument(skip_all, fields(series_count = batch.len()))]
    pub fn run(&self, batch: &[WeeklySeries]) -> BatchReport {
        info!(
            series_count = batch.len(),
            sell_through_threshold = self.config.sell_through_threshold,
            season_end_date = %self.config.season_end_date,
            season_hard_cutoff_date = %self.config.season_hard_cutoff_date,
            "开始执行机会损失批次分析"
        );

        let evaluations = self.evaluate_batch(batch);

        let mut counts = OutcomeCounts::default();
        let mut records = Vec::with_capacity(evaluations.len());
        let mut loss_summaries = Vec::new();
        let mut order_suggestions = Vec::with_capacity(evaluations.len());
        let mut rollups = StyleRollupBuilder::new();

        for (series, evaluation) in batch.iter().zip(evaluations) {
            let bucket = evaluation.bucket();
            counts.record(bucket);

            let (stockout_date, total_loss, reason) = match &evaluation.result {
                Ok(outcome) => {
                    let reason = match outcome {
                        SeriesOutcome::Ineligible { reason, .. } => Some(reason.to_string()),
                        _ => None,
                    };
                    (outcome.stockout().map(|s| s.date), outcome.total_loss(), reason)
                }
                Err(e) => {
                    warn!(
                        style_code = %evaluation.key.style_code,
                        color_code = %evaluation.key.color_code,
                        error = %e,
                        "序列计算失败，已跳过"
                    );
                    (None, 0, Some(e.to_string()))
                }
            };

            if bucket != OutcomeBucket::LossFound {
                debug!(key = %evaluation.key, bucket = %bucket, "序列无机会损失");
            }

            // 仅断货类诊断的款色把机会损失计入订货需求
            let order_loss = if evaluation.profile.is_loss_target() {
                total_loss
            } else {
                0
            };
            let suggestion = self
                .orders
                .suggest(&evaluation.key, evaluation.total_sale, order_loss);

            let summary = match evaluation.result {
                Ok(SeriesOutcome::LossFound(summary)) => Some(summary),
                _ => None,
            };
            rollups.add_series(series, summary.as_ref().map(|s| &s.forecast), &suggestion);

            records.push(SeriesRecord {
                key: evaluation.key,
                bucket,
                observations: evaluation.observations,
                stockout_date,
                total_sale: evaluation.total_sale,
                total_loss,
                reason,
                profile: evaluation.profile,
            });
            order_suggestions.push(suggestion);
            loss_summaries.extend(summary);
        }

        let report = BatchReport {
            run_id: Uuid::new_v4(),
            generated_at: Utc::now(),
            counts,
            records,
            loss_summaries,
            order_suggestions,
            style_rollups: rollups.finish(),
        };

        info!(
            run_id = %report.run_id,
            total = report.counts.total(),
            loss_found = report.counts.loss_found,
            too_short = report.counts.too_short,
            no_stockout_detected = report.counts.no_stockout_detected,
            low_base_velocity = report.counts.low_base_velocity,
            past_season_end = report.counts.past_season_end,
            zero_total_loss = report.counts.zero_total_loss,
            error = report.counts.error,
            total_loss = report.total_loss(),
            "机会损失批次分析完成"
        );
        info!(
            early_shortage = report.diagnosis_count(StyleDiagnosis::EarlyShortage),
            shortage = report.diagnosis_count(StyleDiagnosis::Shortage),
            timely_sell_out = report.diagnosis_count(StyleDiagnosis::TimelySellOut),
            high_efficiency = report.diagnosis_count(StyleDiagnosis::HighEfficiency),
            normal = report.diagnosis_count(StyleDiagnosis::Normal),
            risk = report.diagnosis_count(StyleDiagnosis::Risk),
            loss_target_styles = report.loss_target_styles().len(),
            "款色诊断汇总"
        );

        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::series::WeeklyObservation;
    use chrono::{Duration, NaiveDate};

    fn series(style: &str, inbound: &[u32], sale: &[u32]) -> WeeklySeries {
        let start = NaiveDate::from_ymd_opt(2025, 3, 2).unwrap();
        WeeklySeries::new(
            SeriesKey::new(style, "BK"),
            inbound
                .iter()
                .zip(sale)
                .enumerate()
                .map(|(i, (&inb, &s))| {
                    WeeklyObservation::new(start + Duration::weeks(i as i64), inb, s)
                })
                .collect(),
        )
    }

    fn orchestrator() -> BatchOrchestrator {
        BatchOrchestrator::new(Arc::new(ForecastConfig::new(
            NaiveDate::from_ymd_opt(2025, 9, 30).unwrap(),
            NaiveDate::from_ymd_opt(2025, 10, 30).unwrap(),
        )))
    }

    #[test]
    fn test_three_weeks_is_too_short() {
        let s = series("S1", &[100, 0, 0], &[50, 30, 10]);
        assert_eq!(
            orchestrator().evaluate_series(&s).unwrap(),
            SeriesOutcome::TooShort { observations: 3 }
        );
    }

    #[test]
    fn test_unordered_series_is_error() {
        let mut s = series("S1", &[100, 0, 0, 0, 0], &[10; 5]);
        s.observations.swap(1, 2);
        assert!(matches!(
            orchestrator().evaluate_series(&s),
            Err(ForecastError::UnorderedSeries { index: 2, .. })
        ));
    }

    #[test]
    fn test_error_does_not_abort_batch() {
        let mut broken = series("S2", &[100, 0, 0, 0, 0], &[10; 5]);
        broken.observations[3].date = broken.observations[0].date;
        let batch = vec![
            series("S1", &[100, 0, 0, 0, 0], &[5; 5]),
            broken,
            series("S3", &[10, 0, 0], &[1, 1, 1]),
        ];

        let report = orchestrator().run(&batch);
        assert_eq!(report.counts.total(), 3);
        assert_eq!(report.counts.error, 1);
        assert_eq!(report.counts.no_stockout_detected, 1);
        assert_eq!(report.counts.too_short, 1);
        assert_eq!(report.records[1].bucket, OutcomeBucket::Error);
        assert!(report.records[1].reason.is_some());
        assert_eq!(report.order_suggestions.len(), 3);
    }
}
