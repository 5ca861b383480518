// ==========================================
// 季节款机会损失预测系统 - 配置层错误类型
// ==========================================
// 配置错误均为致命错误: 在逐序列处理开始前直接返回调用方
// 工具: thiserror 派生宏
// ==========================================

use std::path::PathBuf;
use thiserror::Error;

/// 配置层错误类型
#[derive(Error, Debug)]
pub enum ConfigError {
    // ===== 文件错误 =====
    #[error("配置文件读取失败: {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("配置文件解析失败: {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    // ===== 参数校验错误 =====
    #[error("售罄率阈值无效: {0}（必须在 (0, 1] 区间内）")]
    InvalidThreshold(f64),

    #[error("收敛值无效: {0}（必须为正的有限数）")]
    InvalidTerminalValue(f64),

    #[error("最小序列长度无效: {0}（必须 >= 1）")]
    InvalidMinimumLength(usize),

    #[error("订货售罄目标无效: {0}（必须在 (0, 1] 区间内）")]
    InvalidOrderTarget(f64),

    #[error("订货取整单位无效: 必须 >= 1")]
    InvalidRoundingUnit,

    // ===== 日期错误 =====
    #[error("基准季节代码无效: {0}（期望如 25S/25F）")]
    InvalidBaseSeason(String),

    #[error("日期字段无效 (field={field}): {value}")]
    InvalidDatePart { field: String, value: String },

    #[error("日期不存在 (field={field}): {year}-{month:02}-{day:02}")]
    InvalidDate {
        field: String,
        year: i32,
        month: u32,
        day: u32,
    },
}

/// Result 类型别名
pub type ConfigResult<T> = Result<T, ConfigError>;
