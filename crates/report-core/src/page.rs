//! 상품 페이지 차트 구동.
//!
//! [`PerformanceChart`]는 로드 시 한 번 정렬하고, 선택기 전이마다 정확히 한 번
//! 리베이스와 재렌더링을 수행합니다. 정적 차트는 서로 독립적으로 그려지며 하나의
//! 실패가 다른 차트에 영향을 주지 않습니다.

use serde::Serialize;
use tracing::{debug, error, info};

use crate::chart::{ChartHandle, ChartRenderer, ChartSlot, ChartSpec};
use crate::chart_span;
use crate::domain::AlignedSeriesSet;
use crate::error::{ReportError, ReportResult};
use crate::normalize::{normalize_scaled, NormalizedSeriesSet};
use crate::product::ProductPage;
use crate::selector::{RebaseSelector, SelectorOption, SelectorState};

/// 리베이스 가능한 성과 차트.
pub struct PerformanceChart<R: ChartRenderer> {
    page: ProductPage,
    aligned: AlignedSeriesSet,
    selector: RebaseSelector,
    slot: ChartSlot<R::Handle>,
    renderer: R,
    last_spec: Option<ChartSpec>,
}

impl<R: ChartRenderer> PerformanceChart<R> {
    /// 시리즈를 정렬하고 초기 차트(인덱스 0)를 그립니다.
    ///
    /// # 에러
    ///
    /// - 렌더링 대상이 없으면 [`ReportError::NotFound`]
    /// - 정렬 실패 시 설정 에러
    pub fn load(page: &ProductPage, renderer: R) -> ReportResult<Self> {
        let target = page.performance.target.clone();
        let span = chart_span!("performance_chart", page.key, target);
        let _guard = span.enter();

        if !renderer.has_target(&target) {
            return Err(ReportError::NotFound(format!("렌더링 대상 '{}'", target)));
        }

        let aligned = page.aligned_series()?;
        let selector = RebaseSelector::new(aligned.labels());

        let mut chart = Self {
            page: page.clone(),
            aligned,
            selector,
            slot: ChartSlot::new(target),
            renderer,
            last_spec: None,
        };
        chart.render()?;

        info!(
            labels = chart.aligned.len(),
            series = chart.aligned.series().len(),
            "Performance chart loaded"
        );
        Ok(chart)
    }

    fn render(&mut self) -> ReportResult<()> {
        let normalized = self.normalized()?;
        let spec = self.page.performance_spec(&normalized);
        self.slot.rebuild(&mut self.renderer, &spec)?;
        self.last_spec = Some(spec);
        Ok(())
    }

    /// 현재 선택으로 리베이스한 시리즈.
    pub fn normalized(&self) -> ReportResult<NormalizedSeriesSet> {
        normalize_scaled(&self.aligned, self.selector.current_index(), self.page.scale)
    }

    /// 사용자가 시작 날짜를 고른 경우.
    ///
    /// 범위를 벗어난 선택은 상태와 차트를 바꾸지 않습니다.
    pub fn on_pick(&mut self, index: usize) -> ReportResult<SelectorState> {
        let state = self.selector.pick(index)?;
        debug!(product = %self.page.key, index, "Rebase start picked");
        self.render()?;
        Ok(state)
    }

    /// 초기화 버튼.
    pub fn on_reset(&mut self) -> ReportResult<SelectorState> {
        let state = self.selector.reset();
        debug!(product = %self.page.key, "Rebase start reset");
        self.render()?;
        Ok(state)
    }

    /// 날짜 선택기 옵션.
    pub fn options(&self) -> Vec<SelectorOption> {
        self.selector.options()
    }

    pub fn state(&self) -> SelectorState {
        self.selector.state()
    }

    pub fn page(&self) -> &ProductPage {
        &self.page
    }

    /// 정렬된 원본 시리즈.
    pub fn aligned(&self) -> &AlignedSeriesSet {
        &self.aligned
    }

    /// 마지막으로 그린 차트 설정.
    pub fn last_spec(&self) -> Option<&ChartSpec> {
        self.last_spec.as_ref()
    }

    /// 지금까지 그린 횟수.
    pub fn render_count(&self) -> u64 {
        self.slot.generation()
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }
}

/// 정적 차트 하나의 결과.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", content = "reason", rename_all = "lowercase")]
pub enum StaticChartOutcome {
    Rendered,
    /// 렌더링 대상 없음
    Skipped,
    /// 렌더러 실패
    Failed(String),
}

/// 그려진 정적 차트들.
pub struct StaticCharts<H: ChartHandle> {
    slots: Vec<ChartSlot<H>>,
    outcomes: Vec<(String, StaticChartOutcome)>,
}

impl<H: ChartHandle> StaticCharts<H> {
    /// 대상 id별 결과 (선언 순서).
    pub fn outcomes(&self) -> &[(String, StaticChartOutcome)] {
        &self.outcomes
    }

    pub fn rendered(&self) -> usize {
        self.slots.iter().filter(|s| s.is_occupied()).count()
    }

    /// 모든 정적 차트를 파기합니다.
    pub fn clear(&mut self) {
        for slot in &mut self.slots {
            slot.clear();
        }
    }
}

/// 상품의 정적 차트를 각각 독립적으로 그립니다.
pub fn render_static_charts<R: ChartRenderer>(
    page: &ProductPage,
    renderer: &mut R,
) -> StaticCharts<R::Handle> {
    let mut slots = Vec::new();
    let mut outcomes = Vec::with_capacity(page.charts.len());

    for (target, spec) in page.static_specs() {
        let span = chart_span!("static_chart", page.key, target);
        let _guard = span.enter();

        if !renderer.has_target(target) {
            debug!("Render target missing; chart skipped");
            outcomes.push((target.to_string(), StaticChartOutcome::Skipped));
            continue;
        }

        let mut slot = ChartSlot::new(target);
        match slot.rebuild(renderer, &spec) {
            Ok(()) => {
                outcomes.push((target.to_string(), StaticChartOutcome::Rendered));
                slots.push(slot);
            }
            Err(e) => {
                error!(error = %e, "Failed to create chart");
                outcomes.push((target.to_string(), StaticChartOutcome::Failed(e.to_string())));
            }
        }
    }

    StaticCharts { slots, outcomes }
}
