//! 누적 수익률 시계열과 정렬된 시리즈 집합.

use serde::{Deserialize, Serialize};

use super::period::{monthly_labels, PeriodLabel};
use crate::error::{ReportError, ReportResult};

/// 시계열의 한 포인트.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SeriesPoint {
    /// 기간 레이블
    pub label: PeriodLabel,
    /// 시리즈 시작 이후 누적 수익률 (0.10 = 10%)
    pub cumulative_return: f64,
}

/// 월별 누적 수익률 시계열.
///
/// 포인트는 한 달 간격으로 연속되며 비어 있지 않습니다. 역직렬화도
/// [`TimeSeries::new`]의 검증을 거칩니다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawTimeSeries")]
pub struct TimeSeries {
    name: String,
    points: Vec<SeriesPoint>,
}

/// 검증 전 역직렬화 형태.
#[derive(Deserialize)]
struct RawTimeSeries {
    #[serde(default)]
    name: String,
    points: Vec<SeriesPoint>,
}

impl TryFrom<RawTimeSeries> for TimeSeries {
    type Error = ReportError;

    fn try_from(raw: RawTimeSeries) -> Result<Self, Self::Error> {
        Self::new(raw.name, raw.points)
    }
}

impl TimeSeries {
    /// 포인트 목록으로 시계열을 생성합니다.
    ///
    /// 비어 있거나, 월이 연속되지 않거나, 유한하지 않은 값이 있으면 실패합니다.
    pub fn new(name: impl Into<String>, points: Vec<SeriesPoint>) -> ReportResult<Self> {
        let name = name.into();

        if points.is_empty() {
            return Err(ReportError::Data(format!("'{}' 시리즈가 비어 있습니다", name)));
        }

        if let Some(point) = points.iter().find(|p| !p.cumulative_return.is_finite()) {
            return Err(ReportError::Data(format!(
                "'{}' 시리즈의 {} 값이 유한하지 않습니다",
                name, point.label
            )));
        }

        if let Some(pair) = points.windows(2).find(|w| w[0].label.next() != w[1].label) {
            return Err(ReportError::Data(format!(
                "'{}' 시리즈가 {} 다음에 {}(으)로 이어져 월이 연속되지 않습니다",
                name, pair[0].label, pair[1].label
            )));
        }

        Ok(Self { name, points })
    }

    /// 시작 월과 값 목록으로 시계열을 생성합니다.
    pub fn from_start(
        name: impl Into<String>,
        start: PeriodLabel,
        values: &[f64],
    ) -> ReportResult<Self> {
        let points = monthly_labels(start, values.len())
            .into_iter()
            .zip(values)
            .map(|(label, &cumulative_return)| SeriesPoint {
                label,
                cumulative_return,
            })
            .collect();
        Self::new(name, points)
    }

    /// 시리즈 이름.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// 포인트 수.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// 항상 `false` (생성 시 비어 있지 않음을 검증).
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// 포인트 목록.
    pub fn points(&self) -> &[SeriesPoint] {
        &self.points
    }

    /// 레이블 시퀀스.
    pub fn labels(&self) -> Vec<PeriodLabel> {
        self.points.iter().map(|p| p.label).collect()
    }

    /// 값 시퀀스.
    pub fn values(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.cumulative_return).collect()
    }

    /// 첫 번째 레이블.
    pub fn first_label(&self) -> PeriodLabel {
        self.points[0].label
    }

    /// 마지막 레이블.
    pub fn last_label(&self) -> PeriodLabel {
        self.points[self.points.len() - 1].label
    }

    /// 레이블의 인덱스. 범위 밖이면 `None`.
    pub fn index_of(&self, label: PeriodLabel) -> Option<usize> {
        // 월이 연속되므로 오프셋으로 바로 계산된다
        let offset = self.first_label().months_until(&label);
        usize::try_from(offset).ok().filter(|&i| i < self.points.len())
    }

    /// 레이블 위치의 값.
    pub fn value_at(&self, label: PeriodLabel) -> Option<f64> {
        self.index_of(label).map(|i| self.points[i].cumulative_return)
    }
}

/// 공유 레이블 시퀀스 위의 이름 붙은 시리즈.
///
/// `None`은 "값 없음" 표시이며 차트에서 공백으로 렌더링됩니다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NamedSeries {
    /// 상품 설정에서의 시리즈 키
    pub key: String,
    /// 표시 이름
    pub name: String,
    /// 레이블별 값
    pub values: Vec<Option<f64>>,
}

impl NamedSeries {
    /// 공백이 있는지 확인합니다.
    pub fn has_gaps(&self) -> bool {
        self.values.iter().any(Option::is_none)
    }
}

/// 하나의 레이블 시퀀스를 공유하는 시리즈 집합.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AlignedSeriesSet {
    labels: Vec<PeriodLabel>,
    series: Vec<NamedSeries>,
}

impl AlignedSeriesSet {
    /// 모든 시리즈 길이가 레이블 수와 같은지 검증하여 집합을 생성합니다.
    pub fn new(labels: Vec<PeriodLabel>, series: Vec<NamedSeries>) -> ReportResult<Self> {
        if let Some(bad) = series.iter().find(|s| s.values.len() != labels.len()) {
            return Err(ReportError::LengthMismatch {
                series: bad.name.clone(),
                expected: labels.len(),
                actual: bad.values.len(),
            });
        }
        Ok(Self { labels, series })
    }

    /// 공유 레이블 시퀀스.
    pub fn labels(&self) -> &[PeriodLabel] {
        &self.labels
    }

    /// 시리즈 목록 (첫 번째가 기준 시리즈).
    pub fn series(&self) -> &[NamedSeries] {
        &self.series
    }

    /// 키로 시리즈를 찾습니다.
    pub fn get(&self, key: &str) -> Option<&NamedSeries> {
        self.series.iter().find(|s| s.key == key)
    }

    /// 레이블 수.
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// 레이블의 인덱스.
    pub fn index_of(&self, label: PeriodLabel) -> Option<usize> {
        self.labels.iter().position(|l| *l == label)
    }
}
