// ==========================================
// 季节款机会损失预测系统 - 数据接入层错误类型
// ==========================================
// 工具: thiserror 派生宏
// ==========================================

use std::path::PathBuf;
use thiserror::Error;

/// 数据接入层错误类型
#[derive(Error, Debug)]
pub enum DataError {
    #[error("文件读取失败: {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("文件写入失败: {path}: {source}")]
    FileWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON 解析失败: {path}: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("JSON 序列化失败: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Result 类型别名
pub type DataResult<T> = Result<T, DataError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_error_converts_to_encode() {
        let json_err = serde_json::from_str::<u32>("x").unwrap_err();
        let err: DataError = json_err.into();
        assert!(matches!(err, DataError::Encode(_)));
        assert!(err.to_string().starts_with("JSON 序列化失败"));
    }
}
