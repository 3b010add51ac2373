//! 차트 렌더러 경계와 단일 인스턴스 슬롯.

use tracing::{debug, trace};

use super::spec::ChartSpec;
use crate::error::ReportResult;

/// 그려진 차트 인스턴스.
pub trait ChartHandle {
    /// 인스턴스를 파기합니다. 두 번 호출되지 않습니다.
    fn destroy(&mut self);
}

/// 차트 라이브러리 어댑터.
///
/// 브라우저에서는 Chart.js를 감싸고, 테스트에서는 호출을 기록하는 가짜가 구현합니다.
pub trait ChartRenderer {
    type Handle: ChartHandle;

    /// 렌더링 대상이 존재하는지 확인합니다.
    fn has_target(&self, target: &str) -> bool;

    /// 대상 위에 새 차트를 만듭니다.
    fn create(&mut self, target: &str, spec: &ChartSpec) -> ReportResult<Self::Handle>;
}

/// 대상 하나에 대한 단일 차트 슬롯.
///
/// 한 번에 최대 하나의 인스턴스만 보유하며, 새 인스턴스를 만들기 전에 항상 이전
/// 인스턴스를 파기합니다. 슬롯이 드롭되면 남은 인스턴스도 파기됩니다.
pub struct ChartSlot<H: ChartHandle> {
    target: String,
    current: Option<H>,
    generation: u64,
}

impl<H: ChartHandle> ChartSlot<H> {
    pub fn new(target: impl Into<String>) -> Self {
        Self {
            target: target.into(),
            current: None,
            generation: 0,
        }
    }

    /// 렌더링 대상 id.
    pub fn target(&self) -> &str {
        &self.target
    }

    pub fn is_occupied(&self) -> bool {
        self.current.is_some()
    }

    /// 성공한 재구성 횟수.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// 보유한 인스턴스를 파기합니다.
    pub fn clear(&mut self) {
        if let Some(mut handle) = self.current.take() {
            handle.destroy();
            trace!(target_id = %self.target, "Chart instance destroyed");
        }
    }

    /// 이전 인스턴스를 파기하고 새 인스턴스를 만듭니다.
    ///
    /// 생성이 실패하면 슬롯은 빈 상태로 남습니다.
    pub fn rebuild<R>(&mut self, renderer: &mut R, spec: &ChartSpec) -> ReportResult<()>
    where
        R: ChartRenderer<Handle = H>,
    {
        self.clear();

        let handle = renderer.create(&self.target, spec)?;
        self.current = Some(handle);
        self.generation += 1;

        debug!(
            target_id = %self.target,
            generation = self.generation,
            labels = spec.data.labels.len(),
            datasets = spec.data.datasets.len(),
            "Chart rebuilt"
        );
        Ok(())
    }
}

impl<H: ChartHandle> Drop for ChartSlot<H> {
    fn drop(&mut self) {
        self.clear();
    }
}

impl<H: ChartHandle> std::fmt::Debug for ChartSlot<H> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChartSlot")
            .field("target", &self.target)
            .field("occupied", &self.current.is_some())
            .field("generation", &self.generation)
            .finish()
    }
}
