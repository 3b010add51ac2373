//! 리포트 CLI 도구 모음.
//!
//! 이 crate는 다음 기능을 제공합니다:
//! - 상품 목록과 날짜 선택기 옵션 조회
//! - 리베이스된 시리즈 출력
//! - 차트 설정 JSON 생성
//! - 비교표 CSV 내보내기
//! - 상품 선택기 이동 대상 확인

pub mod commands;

pub use commands::*;
