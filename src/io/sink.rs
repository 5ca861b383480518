// ==========================================
// 季节款机会损失预测系统 - 批次报告输出
// ==========================================
// 用途: 下游订货/报表更新的契约, 核心不关心具体格式
// 实现者: JsonReportSink（格式化 JSON 文件）
// ==========================================

use crate::domain::report::BatchReport;
use crate::io::error::{DataError, DataResult};
use async_trait::async_trait;
use std::path::PathBuf;
use tracing::info;

// ==========================================
// LossSummarySink Trait
// ==========================================
#[async_trait]
pub trait LossSummarySink: Send + Sync {
    /// 发布一次批次报告
    async fn publish(&self, report: &BatchReport) -> DataResult<()>;
}

// ==========================================
// JsonReportSink - JSON 文件输出
// ==========================================
#[derive(Debug, Clone)]
pub struct JsonReportSink {
    path: PathBuf,
}

impl JsonReportSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl LossSummarySink for JsonReportSink {
    async fn publish(&self, report: &BatchReport) -> DataResult<()> {
        let body = serde_json::to_string_pretty(report)?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| DataError::FileWrite {
                    path: parent.to_path_buf(),
                    source: e,
                })?;
        }

        tokio::fs::write(&self.path, body)
            .await
            .map_err(|e| DataError::FileWrite {
                path: self.path.clone(),
                source: e,
            })?;

        info!(
            path = %self.path.display(),
            run_id = %report.run_id,
            loss_found = report.counts.loss_found,
            "批次报告已写出"
        );
        Ok(())
    }
}
