// ==========================================
// 季节款机会损失预测系统 - 配置加载器
// ==========================================
// 职责: 定位并读取 brand_config.json, 解析为 ForecastConfig
// 规则: 文件不存在 → 默认值(警告); 文件不可读或格式错误 → 致命错误
// ==========================================

use crate::config::brand_config::BrandConfig;
use crate::config::error::{ConfigError, ConfigResult};
use crate::config::forecast_config::ForecastConfig;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// 显式指定配置文件路径的环境变量
pub const CONFIG_PATH_ENV: &str = "LOSS_FORECAST_CONFIG";

const CONFIG_DIR_NAME: &str = "season-loss-forecast";
const CONFIG_FILE_NAME: &str = "brand_config.json";

/// 获取默认配置文件路径
///
/// # 顺序
/// 1. 环境变量 LOSS_FORECAST_CONFIG（便于调试/测试/CI）
/// 2. 用户配置目录/season-loss-forecast/brand_config.json
/// 3. ./brand_config.json
pub fn default_config_path() -> PathBuf {
    if let Ok(path) = std::env::var(CONFIG_PATH_ENV) {
        let trimmed = path.trim();
        if !trimmed.is_empty() {
            return PathBuf::from(trimmed);
        }
    }

    match dirs::config_dir() {
        Some(dir) => dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME),
        None => PathBuf::from(".").join(CONFIG_FILE_NAME),
    }
}

// ==========================================
// ConfigLoader - 配置加载器
// ==========================================
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    path: PathBuf,
}

impl ConfigLoader {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// 显式路径优先，否则使用 default_config_path()
    pub fn from_path_or_default(path: Option<PathBuf>) -> Self {
        Self::new(path.unwrap_or_else(default_config_path))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// 同步加载
    pub fn load(&self) -> ConfigResult<ForecastConfig> {
        let raw = match std::fs::read_to_string(&self.path) {
            Ok(raw) => Some(raw),
            Err(e) if e.kind() == ErrorKind::NotFound => None,
            Err(e) => {
                return Err(ConfigError::FileRead {
                    path: self.path.clone(),
                    source: e,
                })
            }
        };
        self.resolve(raw.as_deref())
    }

    /// 异步加载（供 CLI 与数据加载并发执行）
    pub async fn load_async(&self) -> ConfigResult<ForecastConfig> {
        let raw = match tokio::fs::read_to_string(&self.path).await {
            Ok(raw) => Some(raw),
            Err(e) if e.kind() == ErrorKind::NotFound => None,
            Err(e) => {
                return Err(ConfigError::FileRead {
                    path: self.path.clone(),
                    source: e,
                })
            }
        };
        self.resolve(raw.as_deref())
    }

    fn resolve(&self, raw: Option<&str>) -> ConfigResult<ForecastConfig> {
        let brand = match raw {
            Some(raw) => {
                let brand: BrandConfig =
                    serde_json::from_str(raw).map_err(|e| ConfigError::Parse {
                        path: self.path.clone(),
                        source: e,
                    })?;
                info!(path = %self.path.display(), "品牌配置加载完成");
                brand
            }
            None => {
                warn!(path = %self.path.display(), "品牌配置文件不存在，使用默认值");
                BrandConfig::default()
            }
        };

        brand.resolve()
    }
}
