// ==========================================
// 季节款机会损失预测系统 - 领域类型定义
// ==========================================
// 红线: 每条序列必须且只能落入一个结果分桶
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// 结果分桶 (Outcome Bucket)
// ==========================================
// 序列化格式: snake_case (与批次报告一致)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutcomeBucket {
    TooShort,           // 观测周数不足
    NoStockoutDetected, // 售罄率未达阈值
    LowBaseVelocity,    // 基础销速不高于收敛值
    PastSeasonEnd,      // 断货时点已过季末
    ZeroTotalLoss,      // 预测损失为 0
    LossFound,          // 存在机会损失
    Error,              // 计算异常
}

impl OutcomeBucket {
    /// 全部分桶（固定顺序，用于报告输出）
    pub const ALL: [OutcomeBucket; 7] = [
        OutcomeBucket::TooShort,
        OutcomeBucket::NoStockoutDetected,
        OutcomeBucket::LowBaseVelocity,
        OutcomeBucket::PastSeasonEnd,
        OutcomeBucket::ZeroTotalLoss,
        OutcomeBucket::LossFound,
        OutcomeBucket::Error,
    ];
}

impl fmt::Display for OutcomeBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutcomeBucket::TooShort => write!(f, "too_short"),
            OutcomeBucket::NoStockoutDetected => write!(f, "no_stockout_detected"),
            OutcomeBucket::LowBaseVelocity => write!(f, "low_base_velocity"),
            OutcomeBucket::PastSeasonEnd => write!(f, "past_season_end"),
            OutcomeBucket::ZeroTotalLoss => write!(f, "zero_total_loss"),
            OutcomeBucket::LossFound => write!(f, "loss_found"),
            OutcomeBucket::Error => write!(f, "error"),
        }
    }
}

// ==========================================
// 不予预测原因 (Ineligible Reason)
// ==========================================
// 非错误: 属于正常的业务结论
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum IneligibleReason {
    InsufficientBaseline, // 断货前不足 4 周，无法建立基础销速
    LowBaseVelocity,      // 基础销速 <= 收敛值
    PastSeasonEnd,        // 断货日 >= 季末，无剩余周数
}

impl IneligibleReason {
    /// 映射到结果分桶
    ///
    /// InsufficientBaseline 没有独立分桶，归入 zero_total_loss
    /// (断货日已过季末时准入判定直接给出 PastSeasonEnd)
    pub fn bucket(&self) -> OutcomeBucket {
        match self {
            IneligibleReason::InsufficientBaseline => OutcomeBucket::ZeroTotalLoss,
            IneligibleReason::LowBaseVelocity => OutcomeBucket::LowBaseVelocity,
            IneligibleReason::PastSeasonEnd => OutcomeBucket::PastSeasonEnd,
        }
    }
}

impl fmt::Display for IneligibleReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IneligibleReason::InsufficientBaseline => write!(f, "INSUFFICIENT_BASELINE"),
            IneligibleReason::LowBaseVelocity => write!(f, "LOW_BASE_VELOCITY"),
            IneligibleReason::PastSeasonEnd => write!(f, "PAST_SEASON_END"),
        }
    }
}

// ==========================================
// 款色诊断 (Style Diagnosis)
// ==========================================
// 按断货时点与最终售罄率给出的款色结论
// EarlyShortage / Shortage / TimelySellOut 为机会损失关注对象
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StyleDiagnosis {
    EarlyShortage,  // 早期断货（不晚于早期断货基准日）
    Shortage,       // 季中断货（不晚于基准日 + 2 个月）
    TimelySellOut,  // 适时售罄（季中断货截止日之后断货）
    HighEfficiency, // 未断货但最终售罄率 >= 80%
    Normal,         // 未断货, 售罄率 55% ~ 80%
    Risk,           // 未断货, 最终售罄率 < 55%
}

impl StyleDiagnosis {
    pub const ALL: [StyleDiagnosis; 6] = [
        StyleDiagnosis::EarlyShortage,
        StyleDiagnosis::Shortage,
        StyleDiagnosis::TimelySellOut,
        StyleDiagnosis::HighEfficiency,
        StyleDiagnosis::Normal,
        StyleDiagnosis::Risk,
    ];

    /// 是否为机会损失关注对象（发生过断货）
    pub fn is_loss_target(&self) -> bool {
        matches!(
            self,
            StyleDiagnosis::EarlyShortage | StyleDiagnosis::Shortage | StyleDiagnosis::TimelySellOut
        )
    }
}

impl fmt::Display for StyleDiagnosis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StyleDiagnosis::EarlyShortage => write!(f, "early_shortage"),
            StyleDiagnosis::Shortage => write!(f, "shortage"),
            StyleDiagnosis::TimelySellOut => write!(f, "timely_sell_out"),
            StyleDiagnosis::HighEfficiency => write!(f, "high_efficiency"),
            StyleDiagnosis::Normal => write!(f, "normal"),
            StyleDiagnosis::Risk => write!(f, "risk"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bucket_display_matches_serde() {
        for bucket in OutcomeBucket::ALL {
            let json = serde_json::to_string(&bucket).unwrap();
            assert_eq!(json, format!("\"{}\"", bucket));
        }
    }

    #[test]
    fn test_insufficient_baseline_maps_to_zero_loss() {
        assert_eq!(
            IneligibleReason::InsufficientBaseline.bucket(),
            OutcomeBucket::ZeroTotalLoss
        );
        assert_eq!(
            IneligibleReason::PastSeasonEnd.bucket(),
            OutcomeBucket::PastSeasonEnd
        );
    }

    #[test]
    fn test_diagnosis_display_matches_serde() {
        for diagnosis in StyleDiagnosis::ALL {
            let json = serde_json::to_string(&diagnosis).unwrap();
            assert_eq!(json, format!("\"{}\"", diagnosis));
        }
    }

    #[test]
    fn test_only_stockout_diagnoses_are_loss_targets() {
        let targets: Vec<_> = StyleDiagnosis::ALL
            .into_iter()
            .filter(StyleDiagnosis::is_loss_target)
            .collect();
        assert_eq!(
            targets,
            vec![
                StyleDiagnosis::EarlyShortage,
                StyleDiagnosis::Shortage,
                StyleDiagnosis::TimelySellOut
            ]
        );
    }
}
