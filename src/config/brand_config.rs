// ==========================================
// 季节款机会损失预测系统 - 品牌配置文件模型
// ==========================================
// 职责: brand_config.json 的反序列化与向 ForecastConfig 的解析
// 说明: 缺失字段回退默认值; 未知字段(等级阈值等)忽略
// ==========================================

use crate::config::error::{ConfigError, ConfigResult};
use crate::config::forecast_config::ForecastConfig;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// 未配置 baseSeason 时的季节年份
pub const DEFAULT_SEASON_YEAR: i32 = 2025;

// ==========================================
// DatePart - 月/日字段
// ==========================================
// 配置文件中既有 "09" 也有 9 两种写法
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DatePart {
    Number(u32),
    Text(String),
}

impl DatePart {
    fn parse(&self, field: &str) -> ConfigResult<u32> {
        match self {
            DatePart::Number(n) => Ok(*n),
            DatePart::Text(s) => s.trim().parse::<u32>().map_err(|_| ConfigError::InvalidDatePart {
                field: field.to_string(),
                value: s.clone(),
            }),
        }
    }
}

// ==========================================
// MonthDay - 不含年份的日期
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthDay {
    pub month: DatePart,
    pub day: DatePart,
}

impl MonthDay {
    pub fn new(month: u32, day: u32) -> Self {
        Self {
            month: DatePart::Number(month),
            day: DatePart::Number(day),
        }
    }

    /// 在指定年份上解析为日期
    pub fn resolve(&self, year: i32, field: &str) -> ConfigResult<NaiveDate> {
        let month = self.month.parse(field)?;
        let day = self.day.parse(field)?;
        NaiveDate::from_ymd_opt(year, month, day).ok_or_else(|| ConfigError::InvalidDate {
            field: field.to_string(),
            year,
            month,
            day,
        })
    }
}

// ==========================================
// BrandConfig - 品牌配置文件
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BrandConfig {
    /// 基准季节代码，如 "25S"
    #[serde(default)]
    pub base_season: Option<String>,
    /// 商业性断货售罄率（百分比，如 70）
    #[serde(default)]
    pub target_sell_through: Option<f64>,
    /// 季末日（默认 09-30）
    #[serde(default)]
    pub end_date: Option<MonthDay>,
    /// 季节关闭硬截止日（默认 10-30）
    #[serde(default)]
    pub season_close_date: Option<MonthDay>,
    /// 早期断货基准日（默认 05-30）
    #[serde(default)]
    pub early_stockout_date: Option<MonthDay>,
    #[serde(default)]
    pub terminal_value: Option<f64>,
    #[serde(default)]
    pub minimum_series_length: Option<usize>,
    /// 订货建议目标售罄率（比例，如 0.75）
    #[serde(default)]
    pub order_sell_through_target: Option<f64>,
    #[serde(default)]
    pub order_rounding_unit: Option<u64>,
}

impl BrandConfig {
    /// 季节年份 = 2000 + baseSeason 前两位
    ///
    /// baseSeason 缺失或为空时返回 DEFAULT_SEASON_YEAR
    pub fn season_year(&self) -> ConfigResult<i32> {
        let code = match self.base_season.as_deref().map(str::trim) {
            Some(c) if !c.is_empty() => c,
            _ => return Ok(DEFAULT_SEASON_YEAR),
        };

        code.get(..2)
            .and_then(|yy| yy.parse::<i32>().ok())
            .map(|yy| 2000 + yy)
            .ok_or_else(|| ConfigError::InvalidBaseSeason(code.to_string()))
    }

    /// 解析为预测参数并校验
    pub fn resolve(&self) -> ConfigResult<ForecastConfig> {
        let year = self.season_year()?;

        let season_end_date = self
            .end_date
            .clone()
            .unwrap_or_else(|| MonthDay::new(9, 30))
            .resolve(year, "endDate")?;
        let season_hard_cutoff_date = self
            .season_close_date
            .clone()
            .unwrap_or_else(|| MonthDay::new(10, 30))
            .resolve(year, "seasonCloseDate")?;
        let (early_month, early_day) = ForecastConfig::DEFAULT_EARLY_STOCKOUT_MONTH_DAY;
        let early_stockout_date = self
            .early_stockout_date
            .clone()
            .unwrap_or_else(|| MonthDay::new(early_month, early_day))
            .resolve(year, "earlyStockoutDate")?;

        let mut config = ForecastConfig::new(season_end_date, season_hard_cutoff_date)
            .with_early_stockout_date(early_stockout_date);
        if let Some(pct) = self.target_sell_through {
            config.sell_through_threshold = pct / 100.0;
        }
        if let Some(v) = self.terminal_value {
            config.terminal_value = v;
        }
        if let Some(n) = self.minimum_series_length {
            config.minimum_series_length = n;
        }
        if let Some(t) = self.order_sell_through_target {
            config.order_sell_through_target = t;
        }
        if let Some(u) = self.order_rounding_unit {
            config.order_rounding_unit = u;
        }

        config.validate()?;

        debug!(
            season_year = year,
            season_end_date = %config.season_end_date,
            season_hard_cutoff_date = %config.season_hard_cutoff_date,
            sell_through_threshold = config.sell_through_threshold,
            "品牌配置解析完成"
        );

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = BrandConfig::default().resolve().unwrap();
        assert_eq!(config.season_end_date, NaiveDate::from_ymd_opt(2025, 9, 30).unwrap());
        assert_eq!(
            config.season_hard_cutoff_date,
            NaiveDate::from_ymd_opt(2025, 10, 30).unwrap()
        );
        assert_eq!(config.sell_through_threshold, 0.70);
        assert_eq!(config.terminal_value, 5.0);
    }

    #[test]
    fn test_percent_threshold_and_string_date_parts() {
        let raw = r#"{
            "baseSeason": "26S",
            "targetSellThrough": 80,
            "endDate": { "month": "08", "day": "31" },
            "gradeThresholds": { "S": 75 }
        }"#;
        let brand: BrandConfig = serde_json::from_str(raw).unwrap();
        let config = brand.resolve().unwrap();
        assert_eq!(config.season_end_date, NaiveDate::from_ymd_opt(2026, 8, 31).unwrap());
        assert_eq!(
            config.season_hard_cutoff_date,
            NaiveDate::from_ymd_opt(2026, 10, 30).unwrap()
        );
        assert!((config.sell_through_threshold - 0.80).abs() < 1e-12);
        assert_eq!(config.early_stockout_date, NaiveDate::from_ymd_opt(2026, 5, 30).unwrap());
    }

    #[test]
    fn test_early_stockout_date_override() {
        let raw = r#"{ "baseSeason": "25S", "earlyStockoutDate": { "month": "06", "day": 15 } }"#;
        let brand: BrandConfig = serde_json::from_str(raw).unwrap();
        let config = brand.resolve().unwrap();
        assert_eq!(config.early_stockout_date, NaiveDate::from_ymd_opt(2025, 6, 15).unwrap());
        assert_eq!(config.shortage_cutoff_date(), NaiveDate::from_ymd_opt(2025, 8, 15).unwrap());
    }

    #[test]
    fn test_invalid_base_season() {
        let brand = BrandConfig {
            base_season: Some("S".to_string()),
            ..Default::default()
        };
        assert!(matches!(brand.resolve(), Err(ConfigError::InvalidBaseSeason(_))));
    }

    #[test]
    fn test_nonexistent_date_is_fatal() {
        let brand = BrandConfig {
            end_date: Some(MonthDay::new(2, 30)),
            ..Default::default()
        };
        assert!(matches!(brand.resolve(), Err(ConfigError::InvalidDate { .. })));
    }

    #[test]
    fn test_threshold_over_hundred_percent_rejected() {
        let brand = BrandConfig {
            target_sell_through: Some(120.0),
            ..Default::default()
        };
        assert!(matches!(brand.resolve(), Err(ConfigError::InvalidThreshold(_))));
    }
}
