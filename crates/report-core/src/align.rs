//! 시리즈 정렬.
//!
//! 기준 시리즈보다 늦게 시작하는 벤치마크를 기준 시리즈의 누적 수익률 위에
//! 이어 붙여, 모든 시리즈가 하나의 레이블 시퀀스와 기준선을 공유하게 합니다.
//!
//! # 정렬 규칙
//!
//! 벤치마크 `B`가 레이블 `L`에서 시작할 때 정렬된 `B'`는:
//!
//! - `L` 이전: 기준 시리즈 `P`의 값
//! - `L`부터: `B[i] + offset`
//! - `B`가 `P`보다 먼저 끝나면 나머지는 공백(`None`)
//!
//! 정렬은 페이지 로드 시 벤치마크마다 한 번만 수행되며 리베이스마다 반복되지 않습니다.
//!
//! # 사용 예시
//!
//! ```rust
//! use report_core::{JoinMode, SeriesAligner, TimeSeries};
//!
//! let primary = TimeSeries::from_start("P", "01/2020".parse()?, &[0.10, 0.15, 0.20])?;
//! let benchmark = TimeSeries::from_start("B", "02/2020".parse()?, &[0.0, 0.02])?;
//!
//! let aligned = SeriesAligner::align(&primary, &benchmark, JoinMode::Delta)?;
//! assert_eq!(aligned.values[0], Some(0.10));
//! # Ok::<(), report_core::ReportError>(())
//! ```

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::{AlignedSeriesSet, NamedSeries, PeriodLabel, TimeSeries};
use crate::error::{ReportError, ReportResult};

/// 접합 지점에서 오프셋을 계산하는 방식.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum JoinMode {
    /// `offset = P[L] - B[0]`. 접합 지점에서 `B'`가 `P`와 정확히 일치합니다.
    #[default]
    Delta,
    /// `offset = P[L]`. 벤치마크 원시값에 기준 시리즈 값을 그대로 더합니다.
    JoinValue,
}

/// 늦게 시작하는 벤치마크에 더해지는 오프셋.
///
/// 로드 시 한 번 계산되며 이후 변경되지 않습니다.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AlignmentOffset {
    /// 벤치마크의 첫 레이블
    pub join_label: PeriodLabel,
    /// 기준 시리즈에서 접합 레이블의 인덱스
    pub join_index: usize,
    /// 벤치마크의 모든 값에 더해지는 값
    pub value: f64,
}

impl AlignmentOffset {
    /// 기준 시리즈와 벤치마크로부터 오프셋을 계산합니다.
    ///
    /// 벤치마크의 시작 레이블이 기준 시리즈에 없으면 정렬 에러를 반환합니다.
    pub fn compute(
        primary: &TimeSeries,
        benchmark: &TimeSeries,
        mode: JoinMode,
    ) -> ReportResult<Self> {
        let join_label = benchmark.first_label();
        let join_index = primary
            .index_of(join_label)
            .ok_or_else(|| ReportError::Alignment {
                series: benchmark.name().to_string(),
                label: join_label.to_string(),
            })?;

        let primary_at_join = primary.points()[join_index].cumulative_return;
        let value = match mode {
            JoinMode::Delta => primary_at_join - benchmark.points()[0].cumulative_return,
            JoinMode::JoinValue => primary_at_join,
        };

        Ok(Self {
            join_label,
            join_index,
            value,
        })
    }
}

/// 정렬된 벤치마크.
#[derive(Debug, Clone, PartialEq)]
pub struct AlignedBenchmark {
    /// 기준 시리즈의 전체 레이블 범위에 대한 값
    pub values: Vec<Option<f64>>,
    /// 적용된 오프셋 (기준 시리즈와 같은 달에 시작하면 `None`)
    pub offset: Option<AlignmentOffset>,
}

/// 정렬할 벤치마크 입력.
#[derive(Debug, Clone, Copy)]
pub struct BenchmarkInput<'a> {
    /// 시리즈 키
    pub key: &'a str,
    /// 벤치마크 시계열
    pub series: &'a TimeSeries,
    /// 접합 방식
    pub join: JoinMode,
}

/// 시리즈 정렬 유틸리티.
pub struct SeriesAligner;

impl SeriesAligner {
    /// 벤치마크 하나를 기준 시리즈의 레이블 범위에 맞춰 정렬합니다.
    ///
    /// # 에러
    ///
    /// - 벤치마크 시작 레이블이 기준 시리즈에 없음 (기준보다 먼저 시작하는 경우 포함)
    /// - 벤치마크가 기준 시리즈의 마지막 레이블 이후까지 이어짐
    pub fn align(
        primary: &TimeSeries,
        benchmark: &TimeSeries,
        mode: JoinMode,
    ) -> ReportResult<AlignedBenchmark> {
        let offset = AlignmentOffset::compute(primary, benchmark, mode)?;
        let join_index = offset.join_index;

        let available = primary.len() - join_index;
        if benchmark.len() > available {
            return Err(ReportError::LengthMismatch {
                series: benchmark.name().to_string(),
                expected: available,
                actual: benchmark.len(),
            });
        }

        // 같은 달에 시작하는 벤치마크는 이어 붙일 필요가 없다
        let offset = (join_index > 0).then_some(offset);
        let shift = offset.map_or(0.0, |o| o.value);

        let mut values: Vec<Option<f64>> = Vec::with_capacity(primary.len());
        values.extend(
            primary.points()[..join_index]
                .iter()
                .map(|p| Some(p.cumulative_return)),
        );
        values.extend(
            benchmark
                .points()
                .iter()
                .map(|p| Some(p.cumulative_return + shift)),
        );
        values.resize(primary.len(), None);

        if let Some(o) = &offset {
            debug!(
                benchmark = benchmark.name(),
                join_label = %o.join_label,
                join_index = o.join_index,
                offset = o.value,
                mode = ?mode,
                "Benchmark aligned to primary series"
            );
        }

        Ok(AlignedBenchmark { values, offset })
    }

    /// 기준 시리즈와 벤치마크들로 정렬된 시리즈 집합을 만듭니다.
    ///
    /// 결과 집합의 첫 번째 시리즈가 기준 시리즈입니다.
    pub fn align_set(
        primary_key: &str,
        primary: &TimeSeries,
        benchmarks: &[BenchmarkInput<'_>],
    ) -> ReportResult<AlignedSeriesSet> {
        let mut series = Vec::with_capacity(benchmarks.len() + 1);
        series.push(NamedSeries {
            key: primary_key.to_string(),
            name: primary.name().to_string(),
            values: primary.values().into_iter().map(Some).collect(),
        });

        for input in benchmarks {
            let aligned = Self::align(primary, input.series, input.join)?;
            series.push(NamedSeries {
                key: input.key.to_string(),
                name: input.series.name().to_string(),
                values: aligned.values,
            });
        }

        AlignedSeriesSet::new(primary.labels(), series)
    }
}
