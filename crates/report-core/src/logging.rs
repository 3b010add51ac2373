//! CLI용 tracing 구독자 설정.
//!
//! `[logging]` 설정 섹션에서 [`LogConfig`]를 만들고 [`init_logging`]으로
//! 구독자를 설치합니다. stdout은 명령 결과에 쓰이므로 로그는 stderr로 나갑니다.
//! 브라우저에서는 `report-web`이 콘솔 구독자를 따로 설치합니다.

use tracing::Subscriber;
use tracing_subscriber::{
    fmt, layer::SubscriberExt, registry::LookupSpan, util::SubscriberInitExt, EnvFilter, Layer,
};

use crate::error::{ReportError, ReportResult};

/// 로그 출력 형식.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// 여러 줄 형식 (개발용)
    #[default]
    Pretty,
    /// 줄마다 JSON 객체 하나
    Json,
    /// 한 줄 형식
    Compact,
}

impl std::str::FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pretty" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            "compact" => Ok(Self::Compact),
            _ => Err(format!("Unknown log format: {}", s)),
        }
    }
}

/// 해석된 로깅 설정.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogConfig {
    /// 필터 지시어 (예: "info", "report_core=debug")
    pub level: String,
    pub format: LogFormat,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self::new("info")
    }
}

impl LogConfig {
    pub fn new(level: impl Into<String>) -> Self {
        Self {
            level: level.into(),
            format: LogFormat::default(),
        }
    }

    pub fn with_format(mut self, format: LogFormat) -> Self {
        self.format = format;
        self
    }

    /// 설정된 레벨로 필터를 만듭니다.
    pub fn filter(&self) -> ReportResult<EnvFilter> {
        EnvFilter::try_new(&self.level).map_err(|e| {
            ReportError::Config(format!("잘못된 로그 레벨 '{}': {}", self.level, e))
        })
    }
}

fn fmt_layer<S>(format: LogFormat) -> Box<dyn Layer<S> + Send + Sync>
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    let layer = fmt::layer().with_writer(std::io::stderr);
    match format {
        LogFormat::Pretty => layer.pretty().boxed(),
        LogFormat::Json => layer.json().boxed(),
        LogFormat::Compact => layer.compact().boxed(),
    }
}

/// 전역 구독자를 설치합니다.
///
/// `RUST_LOG`가 있으면 설정의 레벨보다 우선합니다. 구독자가 이미 설치되어 있으면
/// 설정 에러입니다.
pub fn init_logging(config: LogConfig) -> ReportResult<()> {
    let env_filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => config.filter()?,
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer(config.format))
        .try_init()
        .map_err(|e| ReportError::Config(format!("로깅 초기화 실패: {}", e)))?;

    tracing::debug!(format = ?config.format, level = %config.level, "Logging initialized");
    Ok(())
}

/// 상품/차트 컨텍스트 필드가 포함된 span을 생성하는 매크로.
#[macro_export]
macro_rules! chart_span {
    ($name:expr, $product:expr) => {
        tracing::info_span!($name, product = %$product)
    };
    ($name:expr, $product:expr, $chart:expr) => {
        tracing::info_span!($name, product = %$product, chart = %$chart)
    };
}
