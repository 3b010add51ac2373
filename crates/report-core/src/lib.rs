//! # Report Core
//!
//! 투자 상품 비교 리포트의 성과 차트 핵심 로직을 제공합니다.
//!
//! 이 크레이트는 다음을 제공합니다:
//! - 월별 누적 수익률 시계열과 레이블
//! - 늦게 시작하는 벤치마크의 정렬
//! - 선택한 시작 날짜 기준 리베이스
//! - 날짜 선택기 상태
//! - 차트 설정과 렌더러 경계
//! - 상품 설정과 카탈로그
//! - CSV 내보내기와 페이지 이동
//! - 설정 관리와 로깅 인프라

pub mod align;
pub mod catalog;
pub mod chart;
pub mod config;
pub mod domain;
pub mod error;
pub mod export;
pub mod logging;
pub mod navigation;
pub mod normalize;
pub mod page;
pub mod product;
pub mod selector;

pub use align::*;
pub use catalog::ProductCatalog;
pub use chart::*;
pub use self::config::*;
pub use domain::*;
pub use error::*;
pub use export::*;
pub use logging::*;
pub use navigation::*;
pub use normalize::*;
pub use page::*;
pub use product::*;
pub use selector::*;
