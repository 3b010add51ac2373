//! 리베이스(정규화).
//!
//! 사용자가 고른 시작 인덱스를 기준으로 모든 시리즈를 `value - value[start]`로
//! 다시 계산하여, 선택한 날짜에서 모든 선이 0에서 출발하도록 합니다.
//!
//! 입력은 변경되지 않으며 같은 인덱스로 여러 번 호출해도 비트 단위로 같은 결과를
//! 반환합니다.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::domain::{AlignedSeriesSet, NamedSeries, PeriodLabel};
use crate::error::{ReportError, ReportResult};

/// 리베이스된 값의 표시 단위.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueScale {
    /// 소수 (0.10 = 10%)
    #[default]
    Fraction,
    /// 퍼센트 단위 (10.0 = 10%)
    Percent,
}

impl ValueScale {
    /// 리베이스된 차이에 곱하는 배율.
    pub fn factor(self) -> f64 {
        match self {
            ValueScale::Fraction => 1.0,
            ValueScale::Percent => 100.0,
        }
    }
}

/// 리베이스된 시리즈 집합.
///
/// 선택이 바뀔 때마다 새로 계산되며 렌더링 호출이 소유합니다.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NormalizedSeriesSet {
    /// 원본 레이블 시퀀스에서의 시작 인덱스
    pub start_index: usize,
    /// `[start_index..]` 레이블
    pub labels: Vec<PeriodLabel>,
    /// 리베이스된 시리즈
    pub series: Vec<NamedSeries>,
    /// 적용된 표시 단위
    pub scale: ValueScale,
}

impl NormalizedSeriesSet {
    /// 기준 레이블 (리베이스 시작 월).
    pub fn start_label(&self) -> Option<PeriodLabel> {
        self.labels.first().copied()
    }

    /// 레이블 수.
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

/// 값 시퀀스 하나를 `start_index` 기준으로 리베이스합니다.
///
/// 기준 값이 공백이면 전체가 공백이 됩니다. 호출자는 `start_index < values.len()`을
/// 보장해야 합니다.
fn rebase_values(values: &[Option<f64>], start_index: usize, factor: f64) -> Vec<Option<f64>> {
    match values[start_index] {
        Some(base) => values[start_index..]
            .iter()
            .map(|v| v.map(|v| (v - base) * factor))
            .collect(),
        None => vec![None; values.len() - start_index],
    }
}

/// 소수 단위로 집합을 리베이스합니다.
pub fn normalize(set: &AlignedSeriesSet, start_index: usize) -> ReportResult<NormalizedSeriesSet> {
    normalize_scaled(set, start_index, ValueScale::Fraction)
}

/// 지정한 표시 단위로 집합을 리베이스합니다.
///
/// # 에러
///
/// `start_index`가 레이블 범위를 벗어나면 [`ReportError::InvalidSelection`].
pub fn normalize_scaled(
    set: &AlignedSeriesSet,
    start_index: usize,
    scale: ValueScale,
) -> ReportResult<NormalizedSeriesSet> {
    if start_index >= set.len() {
        return Err(ReportError::InvalidSelection {
            index: start_index,
            len: set.len(),
        });
    }

    let factor = scale.factor();
    let series = set
        .series()
        .iter()
        .map(|s| {
            if s.values[start_index].is_none() {
                warn!(
                    series = %s.name,
                    label = %set.labels()[start_index],
                    "No value at rebase point; series rendered as gap"
                );
            }
            NamedSeries {
                key: s.key.clone(),
                name: s.name.clone(),
                values: rebase_values(&s.values, start_index, factor),
            }
        })
        .collect();

    Ok(NormalizedSeriesSet {
        start_index,
        labels: set.labels()[start_index..].to_vec(),
        series,
        scale,
    })
}

/// 레이블로 시작 지점을 지정하여 리베이스합니다.
pub fn normalize_by_label(
    set: &AlignedSeriesSet,
    label: PeriodLabel,
    scale: ValueScale,
) -> ReportResult<NormalizedSeriesSet> {
    let index = set
        .index_of(label)
        .ok_or_else(|| ReportError::NotFound(format!("레이블 {}", label)))?;
    normalize_scaled(set, index, scale)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::monthly_labels;

    fn set_of(values: &[&[Option<f64>]]) -> AlignedSeriesSet {
        let len = values[0].len();
        let labels = monthly_labels("01/2020".parse().unwrap(), len);
        let series = values
            .iter()
            .enumerate()
            .map(|(i, v)| NamedSeries {
                key: format!("s{i}"),
                name: format!("S{i}"),
                values: v.to_vec(),
            })
            .collect();
        AlignedSeriesSet::new(labels, series).unwrap()
    }

    #[test]
    fn test_normalize_example() {
        let set = set_of(&[&[Some(0.10), Some(0.15), Some(0.20)]]);
        let out = normalize(&set, 1).unwrap();

        let labels: Vec<String> = out.labels.iter().map(ToString::to_string).collect();
        assert_eq!(labels, vec!["02/2020", "03/2020"]);
        assert_eq!(out.series[0].values[0], Some(0.0));
        let second = out.series[0].values[1].unwrap();
        assert!((second - 0.05).abs() < 1e-12);
    }

    #[test]
    fn test_normalize_out_of_range() {
        let set = set_of(&[&[Some(0.10), Some(0.15)]]);
        let err = normalize(&set, 2).unwrap_err();
        assert!(matches!(err, ReportError::InvalidSelection { index: 2, len: 2 }));
    }

    #[test]
    fn test_percent_scale() {
        let set = set_of(&[&[Some(0.0096), Some(0.0366), Some(0.0681)]]);
        let out = normalize_scaled(&set, 0, ValueScale::Percent).unwrap();
        assert_eq!(out.series[0].values[0], Some(0.0));
        let last = out.series[0].values[2].unwrap();
        assert!((last - 5.85).abs() < 1e-9);
    }

    #[test]
    fn test_gap_at_start_renders_as_gap() {
        let set = set_of(&[
            &[Some(0.10), Some(0.15), Some(0.20)],
            &[None, Some(0.02), Some(0.03)],
        ]);
        let out = normalize(&set, 0).unwrap();
        assert_eq!(out.series[1].values, vec![None, None, None]);
        assert_eq!(out.series[0].values[0], Some(0.0));
    }

    #[test]
    fn test_trailing_gap_preserved() {
        let set = set_of(&[&[Some(0.10), Some(0.15), None]]);
        let out = normalize(&set, 1).unwrap();
        assert_eq!(out.series[0].values, vec![Some(0.0), None]);
    }

    #[test]
    fn test_normalize_by_label() {
        let set = set_of(&[&[Some(0.10), Some(0.15), Some(0.20)]]);
        let out = normalize_by_label(&set, "03/2020".parse().unwrap(), ValueScale::Fraction)
            .unwrap();
        assert_eq!(out.start_index, 2);
        assert_eq!(out.series[0].values, vec![Some(0.0)]);

        assert!(normalize_by_label(&set, "04/2020".parse().unwrap(), ValueScale::Fraction)
            .is_err());
    }
}
