//! 차트 설정과 렌더러 경계.

mod render;
mod spec;

pub use render::*;
pub use spec::*;
