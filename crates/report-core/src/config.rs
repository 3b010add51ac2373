//! 설정 관리.
//!
//! 기본값 → 설정 파일 → `REPORT__` 접두어 환경 변수 순으로 덮어씁니다.
//! 예: `REPORT__LOGGING__LEVEL=debug`

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::logging::{LogConfig, LogFormat};
use crate::navigation::NavigationConfig;

/// 환경 변수 접두어.
pub const ENV_PREFIX: &str = "REPORT";

/// 애플리케이션 설정.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct AppConfig {
    /// 로깅 설정
    pub logging: LoggingConfig,
    /// 페이지 이동 설정
    pub navigation: NavigationConfig,
    /// 출력 설정
    pub output: OutputConfig,
    /// 상품 데이터 설정
    pub data: DataConfig,
}

/// 로깅 설정.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// 로그 레벨
    pub level: String,
    /// 로그 형식 (pretty, json, compact)
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}

impl LoggingConfig {
    /// 알 수 없는 형식은 기본 형식으로 처리합니다.
    pub fn to_log_config(&self) -> LogConfig {
        let format: LogFormat = self.format.parse().unwrap_or_default();
        LogConfig::new(&self.level).with_format(format)
    }
}

/// 출력 설정.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct OutputConfig {
    /// 내보낸 파일을 쓰는 디렉토리
    pub directory: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("output"),
        }
    }
}

/// 상품 데이터 설정.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct DataConfig {
    /// 추가 상품 TOML 파일 디렉토리. 같은 키는 내장 상품을 대체합니다.
    pub products_dir: Option<PathBuf>,
}

impl AppConfig {
    /// 파일과 환경 변수에서 설정을 로드합니다.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, config::ConfigError> {
        let builder = config::Config::builder()
            .add_source(config::File::from(path.as_ref()))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true),
            );

        builder.build()?.try_deserialize()
    }

    /// `config/default.toml`(있으면)과 환경 변수에서 설정을 로드합니다.
    pub fn load_default() -> Result<Self, config::ConfigError> {
        let builder = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true),
            );

        builder.build()?.try_deserialize()
    }
}
