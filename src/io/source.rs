// ==========================================
// 季节款机会损失预测系统 - 周度数据来源
// ==========================================
// 用途: 外部加载器契约: 提供已清洗、已按 SeriesKey 分组的周度序列
// 实现者: JsonSeriesSource（JSON 行数组）, InMemorySeriesSource（内存）
// ==========================================

use crate::domain::series::{WeeklyRow, WeeklySeries};
use crate::io::error::{DataError, DataResult};
use crate::io::grouping::group_rows;
use async_trait::async_trait;
use std::path::PathBuf;
use tracing::info;

// ==========================================
// SeriesSource Trait
// ==========================================
#[async_trait]
pub trait SeriesSource: Send + Sync {
    /// 加载全部序列（键升序、组内日期升序）
    async fn load_series(&self) -> DataResult<Vec<WeeklySeries>>;
}

// ==========================================
// JsonSeriesSource - JSON 文件来源
// ==========================================
// 文件内容: WeeklyRow 数组
#[derive(Debug, Clone)]
pub struct JsonSeriesSource {
    path: PathBuf,
}

impl JsonSeriesSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl SeriesSource for JsonSeriesSource {
    async fn load_series(&self) -> DataResult<Vec<WeeklySeries>> {
        let raw = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|e| DataError::FileRead {
                path: self.path.clone(),
                source: e,
            })?;

        let rows: Vec<WeeklyRow> = serde_json::from_str(&raw).map_err(|e| DataError::Decode {
            path: self.path.clone(),
            source: e,
        })?;

        info!(path = %self.path.display(), row_count = rows.len(), "周度数据加载完成");
        Ok(group_rows(rows))
    }
}

// ==========================================
// InMemorySeriesSource - 内存来源
// ==========================================
#[derive(Debug, Clone, Default)]
pub struct InMemorySeriesSource {
    rows: Vec<WeeklyRow>,
}

impl InMemorySeriesSource {
    pub fn new(rows: Vec<WeeklyRow>) -> Self {
        Self { rows }
    }
}

#[async_trait]
impl SeriesSource for InMemorySeriesSource {
    async fn load_series(&self) -> DataResult<Vec<WeeklySeries>> {
        Ok(group_rows(self.rows.clone()))
    }
}
