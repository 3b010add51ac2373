//! 리포트 시스템의 에러 타입.
//!
//! 에러는 두 부류로 나뉩니다:
//! - **설정 에러**: 잘못된 정적 데이터나 정렬 지점. 해당 차트의 초기화를 중단합니다.
//! - **격리 가능한 에러**: 누락된 렌더링 대상, 렌더러 실패. 해당 기능만 건너뜁니다.

use thiserror::Error;

/// 리포트 에러.
#[derive(Debug, Error)]
pub enum ReportError {
    /// 설정 에러
    #[error("설정 에러: {0}")]
    Config(String),

    /// 정적 데이터 에러 (레이블 형식, 비연속 월, 비유한 값 등)
    #[error("데이터 에러: {0}")]
    Data(String),

    /// 벤치마크의 시작 레이블이 기준 시리즈에 없음
    #[error("정렬 에러: '{series}' 시리즈의 시작 레이블 {label}이(가) 기준 시리즈에 없습니다")]
    Alignment { series: String, label: String },

    /// 시리즈 길이가 공유 레이블 시퀀스와 맞지 않음
    #[error("길이 불일치: '{series}' 시리즈는 최대 {expected}개 값이 필요하지만 {actual}개입니다")]
    LengthMismatch {
        series: String,
        expected: usize,
        actual: usize,
    },

    /// 레이블 범위를 벗어난 리베이스 선택
    #[error("잘못된 선택: 인덱스 {index} (레이블 수 {len})")]
    InvalidSelection { index: usize, len: usize },

    /// 찾을 수 없음 (상품 키, 렌더링 대상 등)
    #[error("찾을 수 없음: {0}")]
    NotFound(String),

    /// 차트 렌더러 에러
    #[error("렌더링 에러: {0}")]
    Render(String),

    /// 직렬화 에러
    #[error("직렬화 에러: {0}")]
    Serialization(String),

    /// 입출력 에러
    #[error("입출력 에러: {0}")]
    Io(#[from] std::io::Error),
}

/// 리포트 작업을 위한 Result 타입.
pub type ReportResult<T> = Result<T, ReportError>;

impl ReportError {
    /// 잘못된 설정/데이터로 인한 에러인지 확인합니다.
    ///
    /// 이 에러는 복구할 수 없으며 해당 차트 초기화를 중단해야 합니다.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            ReportError::Config(_)
                | ReportError::Data(_)
                | ReportError::Alignment { .. }
                | ReportError::LengthMismatch { .. }
        )
    }

    /// 해당 기능만 건너뛰고 계속 진행할 수 있는 에러인지 확인합니다.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, ReportError::NotFound(_) | ReportError::Render(_))
    }
}

impl From<serde_json::Error> for ReportError {
    fn from(err: serde_json::Error) -> Self {
        ReportError::Serialization(err.to_string())
    }
}

impl From<toml::de::Error> for ReportError {
    fn from(err: toml::de::Error) -> Self {
        ReportError::Config(err.to_string())
    }
}

impl From<csv::Error> for ReportError {
    fn from(err: csv::Error) -> Self {
        ReportError::Serialization(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_configuration() {
        let err = ReportError::Alignment {
            series: "IWVL".to_string(),
            label: "10/2014".to_string(),
        };
        assert!(err.is_configuration());
        assert!(!err.is_recoverable());

        let err = ReportError::LengthMismatch {
            series: "IVE".to_string(),
            expected: 172,
            actual: 180,
        };
        assert!(err.is_configuration());
    }

    #[test]
    fn test_error_recoverable() {
        let err = ReportError::NotFound("sectorChart".to_string());
        assert!(err.is_recoverable());
        assert!(!err.is_configuration());

        let err = ReportError::InvalidSelection { index: 9, len: 3 };
        assert!(!err.is_recoverable());
        assert!(!err.is_configuration());
    }

    #[test]
    fn test_alignment_message_names_series_and_label() {
        let err = ReportError::Alignment {
            series: "IWVL".to_string(),
            label: "10/2014".to_string(),
        };
        let message = err.to_string();
        assert!(message.contains("IWVL"));
        assert!(message.contains("10/2014"));
    }
}
