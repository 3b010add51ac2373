//! 정렬/리베이스 속성 테스트

use proptest::prelude::*;
use report_core::{
    normalize, normalize_scaled, AlignedSeriesSet, BenchmarkInput, JoinMode, NamedSeries,
    SeriesAligner, TimeSeries, ValueScale,
};

fn start() -> report_core::PeriodLabel {
    "01/2000".parse().unwrap()
}

fn aligned_from(values: &[Vec<f64>]) -> AlignedSeriesSet {
    let primary = TimeSeries::from_start("P", start(), &values[0]).unwrap();
    let series = values
        .iter()
        .enumerate()
        .map(|(i, v)| NamedSeries {
            key: format!("s{i}"),
            name: format!("S{i}"),
            values: v.iter().copied().map(Some).collect(),
        })
        .collect();
    AlignedSeriesSet::new(primary.labels(), series).unwrap()
}

/// 길이가 같은 시리즈 1~3개와 유효한 시작 인덱스
fn set_and_index() -> impl Strategy<Value = (Vec<Vec<f64>>, usize)> {
    (1usize..60, 1usize..4)
        .prop_flat_map(|(len, count)| {
            (
                prop::collection::vec(prop::collection::vec(-1.0f64..5.0, len), count),
                0..len,
            )
        })
}

/// 기준 시리즈, 접합 인덱스, 접합 이후에 들어가는 벤치마크
fn primary_and_benchmark() -> impl Strategy<Value = (Vec<f64>, usize, Vec<f64>)> {
    (2usize..60)
        .prop_flat_map(|len| (prop::collection::vec(-1.0f64..5.0, len), 1..len))
        .prop_flat_map(|(primary, join)| {
            let room = primary.len() - join;
            (
                Just(primary),
                Just(join),
                prop::collection::vec(-1.0f64..5.0, 1..=room),
            )
        })
}

proptest! {
    #[test]
    fn rebased_series_start_at_exact_zero((values, index) in set_and_index()) {
        let set = aligned_from(&values);
        for scale in [ValueScale::Fraction, ValueScale::Percent] {
            let out = normalize_scaled(&set, index, scale).unwrap();
            for series in &out.series {
                prop_assert_eq!(series.values[0], Some(0.0));
            }
        }
    }

    #[test]
    fn rebase_at_zero_is_shift_by_first_value((values, _index) in set_and_index()) {
        let set = aligned_from(&values);
        let out = normalize(&set, 0).unwrap();

        for (series, raw) in out.series.iter().zip(&values) {
            let expected: Vec<Option<f64>> = raw.iter().map(|v| Some(v - raw[0])).collect();
            prop_assert_eq!(&series.values, &expected);
        }
    }

    #[test]
    fn rebase_is_idempotent_and_pure((values, index) in set_and_index()) {
        let set = aligned_from(&values);
        let before = set.clone();

        let first = normalize(&set, index).unwrap();
        let second = normalize(&set, index).unwrap();

        prop_assert_eq!(&set, &before);
        prop_assert_eq!(first.labels.len(), set.len() - index);
        for (a, b) in first.series.iter().zip(&second.series) {
            let a_bits: Vec<Option<u64>> = a.values.iter().map(|v| v.map(f64::to_bits)).collect();
            let b_bits: Vec<Option<u64>> = b.values.iter().map(|v| v.map(f64::to_bits)).collect();
            prop_assert_eq!(a_bits, b_bits);
        }
    }

    #[test]
    fn aligned_benchmark_is_continuous((primary, join, bench) in primary_and_benchmark()) {
        let p = TimeSeries::from_start("P", start(), &primary).unwrap();
        let b_start = p.labels()[join];
        let b = TimeSeries::from_start("B", b_start, &bench).unwrap();

        for mode in [JoinMode::Delta, JoinMode::JoinValue] {
            let aligned = SeriesAligner::align(&p, &b, mode).unwrap();
            prop_assert_eq!(aligned.values.len(), primary.len());

            // 접합 이전은 기준 시리즈와 같다
            for i in 0..join {
                prop_assert_eq!(aligned.values[i], Some(primary[i]));
            }

            // 접합 이후의 월간 변화는 벤치마크 자체의 변화와 같다
            for i in 1..bench.len() {
                let prev = aligned.values[join + i - 1].unwrap();
                let curr = aligned.values[join + i].unwrap();
                prop_assert!(((curr - prev) - (bench[i] - bench[i - 1])).abs() < 1e-9);
            }

            // 벤치마크가 끝난 뒤는 공백
            for value in &aligned.values[join + bench.len()..] {
                prop_assert_eq!(*value, None);
            }
        }

        let delta = SeriesAligner::align(&p, &b, JoinMode::Delta).unwrap();
        let at_join = delta.values[join].unwrap();
        prop_assert!((at_join - primary[join]).abs() < 1e-12);
    }

    #[test]
    fn align_set_keeps_every_series_on_shared_labels((primary, join, bench) in primary_and_benchmark()) {
        let p = TimeSeries::from_start("P", start(), &primary).unwrap();
        let b = TimeSeries::from_start("B", p.labels()[join], &bench).unwrap();

        let set = SeriesAligner::align_set(
            "p",
            &p,
            &[BenchmarkInput { key: "b", series: &b, join: JoinMode::Delta }],
        )
        .unwrap();

        prop_assert_eq!(set.len(), primary.len());
        for series in set.series() {
            prop_assert_eq!(series.values.len(), set.len());
        }
    }
}
