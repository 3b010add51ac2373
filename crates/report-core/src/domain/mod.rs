//! 리포트 차트를 위한 도메인 모델.

mod period;
mod series;

pub use period::*;
pub use series::*;
