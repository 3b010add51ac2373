//! 상품 페이지 설정.
//!
//! 상품마다 TOML 파일 하나가 성과 차트 시리즈, 정적 차트, CSV 내보내기 내용을
//! 선언합니다. 첫 번째 `[[series]]` 항목이 기준 시리즈입니다.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::align::{BenchmarkInput, JoinMode, SeriesAligner};
use crate::chart::{
    Axis, ChartData, ChartKind, ChartOptions, ChartSpec, Dataset, Legend, LegendPlacement,
    Paint, Scales, Title, ValueFormat,
};
use crate::domain::{AlignedSeriesSet, PeriodLabel, TimeSeries};
use crate::error::{ReportError, ReportResult};
use crate::export::CsvExport;
use crate::normalize::{NormalizedSeriesSet, ValueScale};

/// 성과 차트 배치와 표시 형식.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerformanceLayout {
    /// 캔버스 요소 id
    #[serde(default = "default_performance_target")]
    pub target: String,
    /// 날짜 선택기 요소 id
    #[serde(default = "default_selector")]
    pub selector: String,
    /// 초기화 버튼 요소 id
    #[serde(default = "default_reset")]
    pub reset: String,
    /// 차트 제목 접두어. 뒤에 시작 레이블이 붙습니다.
    pub title_prefix: String,
    pub y_title: String,
    pub x_title: String,
    #[serde(default = "default_decimals")]
    pub tooltip_decimals: usize,
    #[serde(default = "default_decimals")]
    pub tick_decimals: usize,
}

fn default_performance_target() -> String {
    "performanceChart".to_string()
}

fn default_selector() -> String {
    "startDateSelector".to_string()
}

fn default_reset() -> String {
    "resetChart".to_string()
}

fn default_decimals() -> usize {
    2
}

/// 성과 차트 시리즈 하나.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesConfig {
    pub key: String,
    pub name: String,
    /// 첫 값의 레이블
    pub start: PeriodLabel,
    /// 기준 시리즈보다 늦게 시작할 때의 접합 방식
    #[serde(default)]
    pub join: JoinMode,
    /// 선 색상
    pub color: String,
    /// 채움 색상
    pub fill: String,
    #[serde(default)]
    pub point_radius: u32,
    /// 누적 수익률 (0.10 = 10%)
    pub values: Vec<f64>,
}

impl SeriesConfig {
    pub fn to_time_series(&self) -> ReportResult<TimeSeries> {
        TimeSeries::from_start(&self.name, self.start, &self.values)
    }
}

/// 정적 파이/도넛/막대 차트.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StaticChartConfig {
    /// 캔버스 요소 id
    pub target: String,
    pub kind: ChartKind,
    #[serde(default)]
    pub dataset_label: Option<String>,
    pub labels: Vec<String>,
    pub values: Vec<f64>,
    pub colors: Vec<String>,
    #[serde(default)]
    pub border_colors: Option<Vec<String>>,
    #[serde(default)]
    pub legend: LegendPlacement,
    #[serde(default)]
    pub y_max: Option<f64>,
    #[serde(default)]
    pub y_title: Option<String>,
    #[serde(default)]
    pub x_title: Option<String>,
}

impl StaticChartConfig {
    fn validate(&self) -> ReportResult<()> {
        if self.kind == ChartKind::Line {
            return Err(ReportError::Config(format!(
                "정적 차트 '{}'에는 line 유형을 쓸 수 없습니다",
                self.target
            )));
        }

        let expected = self.labels.len();
        let mismatched = self.values.len() != expected
            || self.colors.len() != expected
            || self
                .border_colors
                .as_ref()
                .is_some_and(|c| c.len() != expected);
        if mismatched {
            return Err(ReportError::Config(format!(
                "정적 차트 '{}'의 레이블/값/색상 개수가 일치하지 않습니다",
                self.target
            )));
        }

        if let Some(value) = self.values.iter().find(|v| !v.is_finite()) {
            return Err(ReportError::Data(format!(
                "정적 차트 '{}'에 유한하지 않은 값 {}이(가) 있습니다",
                self.target, value
            )));
        }
        Ok(())
    }

    /// 차트 설정을 만듭니다.
    pub fn to_spec(&self) -> ChartSpec {
        let mut options = ChartOptions::responsive(Legend::placed(self.legend));
        if self.kind == ChartKind::Bar {
            options.scales = Some(Scales {
                x: Axis {
                    title: self.x_title.as_deref().map(Title::shown),
                    ..Default::default()
                },
                y: Axis {
                    begin_at_zero: true,
                    max: self.y_max,
                    title: self.y_title.as_deref().map(Title::shown),
                },
            });
        }

        // 원형 차트는 원시값 그대로, 막대 차트는 소수 둘째 자리까지 표시
        let (tooltip, ticks) = match self.kind {
            ChartKind::Bar => (
                ValueFormat::percent(1.0, 2),
                Some(ValueFormat::percent(1.0, 2)),
            ),
            _ => (ValueFormat::raw_percent(), None),
        };

        ChartSpec {
            kind: self.kind,
            data: ChartData {
                labels: self.labels.clone(),
                datasets: vec![Dataset {
                    label: self.dataset_label.clone(),
                    data: self.values.iter().copied().map(Some).collect(),
                    background_color: Paint::PerPoint(self.colors.clone()),
                    border_color: self.border_colors.clone().map(Paint::PerPoint),
                    border_width: 1,
                    point_radius: None,
                    tension: None,
                    span_gaps: false,
                }],
            },
            options,
            tooltip,
            ticks,
        }
    }
}

/// 상품 페이지 하나의 전체 설정.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductPage {
    /// 상품 키 (예: "harris")
    pub key: String,
    pub title: String,
    /// 리베이스된 값의 표시 단위
    #[serde(default)]
    pub scale: ValueScale,
    pub performance: PerformanceLayout,
    pub series: Vec<SeriesConfig>,
    #[serde(default)]
    pub charts: Vec<StaticChartConfig>,
    pub export: CsvExport,
}

impl ProductPage {
    /// TOML 문자열에서 설정을 읽고 검증합니다.
    pub fn from_toml_str(content: &str) -> ReportResult<Self> {
        let page: ProductPage = toml::from_str(content)?;
        page.validate()?;
        Ok(page)
    }

    /// 설정을 검증합니다.
    ///
    /// 시리즈 정렬 가능 여부는 [`aligned_series`](Self::aligned_series)에서 검사합니다.
    pub fn validate(&self) -> ReportResult<()> {
        if self.key.trim().is_empty() {
            return Err(ReportError::Config("상품 키가 비어 있습니다".to_string()));
        }

        if self.series.is_empty() {
            return Err(ReportError::Config(format!(
                "상품 '{}'에 시리즈가 없습니다",
                self.key
            )));
        }

        let mut keys = HashSet::new();
        if let Some(dup) = self.series.iter().find(|s| !keys.insert(s.key.as_str())) {
            return Err(ReportError::Config(format!(
                "상품 '{}'의 시리즈 키 '{}'이(가) 중복되었습니다",
                self.key, dup.key
            )));
        }

        for chart in &self.charts {
            chart.validate()?;
        }

        self.export.validate()
    }

    /// 기준 시리즈 설정.
    pub fn primary_series(&self) -> ReportResult<&SeriesConfig> {
        self.series
            .first()
            .ok_or_else(|| ReportError::Config(format!("상품 '{}'에 시리즈가 없습니다", self.key)))
    }

    /// 모든 시리즈를 기준 시리즈에 정렬합니다.
    pub fn aligned_series(&self) -> ReportResult<AlignedSeriesSet> {
        let primary_config = self.primary_series()?;
        let primary = primary_config.to_time_series()?;

        let benchmarks = self.series[1..]
            .iter()
            .map(|s| s.to_time_series().map(|series| (s, series)))
            .collect::<ReportResult<Vec<_>>>()?;
        let inputs: Vec<BenchmarkInput<'_>> = benchmarks
            .iter()
            .map(|(config, series)| BenchmarkInput {
                key: &config.key,
                series,
                join: config.join,
            })
            .collect();

        SeriesAligner::align_set(&primary_config.key, &primary, &inputs)
    }

    /// 값에 곱해진 배율을 고려한 성과 차트 값 표기.
    fn performance_format(&self, decimals: usize) -> ValueFormat {
        // 소수 단위는 표시할 때 100을 곱해 퍼센트로 보여준다
        let multiplier = match self.scale {
            ValueScale::Fraction => 100.0,
            ValueScale::Percent => 1.0,
        };
        ValueFormat::percent(multiplier, decimals)
    }

    /// 리베이스된 시리즈로 성과 차트 설정을 만듭니다.
    pub fn performance_spec(&self, normalized: &NormalizedSeriesSet) -> ChartSpec {
        let layout = &self.performance;

        let datasets = normalized
            .series
            .iter()
            .map(|series| {
                let config = self.series.iter().find(|c| c.key == series.key);
                Dataset {
                    label: Some(series.name.clone()),
                    data: series.values.clone(),
                    background_color: Paint::Solid(
                        config.map(|c| c.fill.clone()).unwrap_or_default(),
                    ),
                    border_color: config.map(|c| Paint::Solid(c.color.clone())),
                    border_width: 2,
                    point_radius: Some(config.map_or(0, |c| c.point_radius)),
                    tension: Some(0.1),
                    span_gaps: series.has_gaps(),
                }
            })
            .collect();

        let title = normalized
            .start_label()
            .map(|label| Title::shown(format!("{} {}", layout.title_prefix, label)));

        let mut options = ChartOptions::responsive(Legend::placed(LegendPlacement::Top));
        options.plugins.title = title;
        options.scales = Some(Scales {
            x: Axis {
                title: Some(Title::shown(&layout.x_title)),
                ..Default::default()
            },
            y: Axis {
                title: Some(Title::shown(&layout.y_title)),
                ..Default::default()
            },
        });

        ChartSpec {
            kind: ChartKind::Line,
            data: ChartData {
                labels: normalized.labels.iter().map(ToString::to_string).collect(),
                datasets,
            },
            options,
            tooltip: self.performance_format(layout.tooltip_decimals),
            ticks: Some(self.performance_format(layout.tick_decimals)),
        }
    }

    /// 정적 차트 설정 목록 (대상 id, 설정).
    pub fn static_specs(&self) -> Vec<(&str, ChartSpec)> {
        self.charts
            .iter()
            .map(|c| (c.target.as_str(), c.to_spec()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalize::normalize_scaled;

    const SAMPLE: &str = r##"
key = "sample"
title = "Sample Fund"
scale = "fraction"

[performance]
title_prefix = "Retorno Acumulado desde"
y_title = "Retorno Acumulado (%)"
x_title = "Período"

[[series]]
key = "fund"
name = "Fund"
start = "01/2020"
color = "#000"
fill = "#111"
point_radius = 2
values = [0.10, 0.15, 0.20, 0.25]

[[series]]
key = "late"
name = "Late"
start = "02/2020"
color = "#222"
fill = "#333"
values = [0.0, 0.02]

[[charts]]
target = "terChart"
kind = "bar"
dataset_label = "Taxa (%)"
labels = ["A", "B"]
values = [0.5, 1.0]
colors = ["#444", "#555"]
legend = "hidden"
y_max = 2.5

[export]
file_name = "sample.csv"
header = ["Fundo", "Taxa"]
rows = [["A", "0.5"]]
"##;

    #[test]
    fn test_parse_and_defaults() {
        let page = ProductPage::from_toml_str(SAMPLE).unwrap();
        assert_eq!(page.key, "sample");
        assert_eq!(page.performance.target, "performanceChart");
        assert_eq!(page.performance.selector, "startDateSelector");
        assert_eq!(page.performance.tooltip_decimals, 2);
        assert_eq!(page.series[1].join, JoinMode::Delta);
        assert_eq!(page.series[1].point_radius, 0);
    }

    #[test]
    fn test_aligned_series() {
        let page = ProductPage::from_toml_str(SAMPLE).unwrap();
        let set = page.aligned_series().unwrap();

        assert_eq!(set.len(), 4);
        let late = set.get("late").unwrap();
        assert_eq!(late.values[0], Some(0.10));
        assert_eq!(late.values[1], Some(0.15));
        assert_eq!(late.values[3], None);
    }

    #[test]
    fn test_performance_spec() {
        let page = ProductPage::from_toml_str(SAMPLE).unwrap();
        let set = page.aligned_series().unwrap();
        let normalized = normalize_scaled(&set, 1, page.scale).unwrap();
        let spec = page.performance_spec(&normalized);

        assert_eq!(spec.kind, ChartKind::Line);
        assert_eq!(spec.data.labels, vec!["02/2020", "03/2020", "04/2020"]);
        assert_eq!(
            spec.options.plugins.title.as_ref().unwrap().text,
            "Retorno Acumulado desde 02/2020"
        );
        assert_eq!(spec.data.datasets[0].point_radius, Some(2));
        assert!(!spec.data.datasets[0].span_gaps);
        assert!(spec.data.datasets[1].span_gaps);
        assert_eq!(spec.tooltip_text("Fund", "03/2020", 0.05), "Fund: 5.00%");
    }

    #[test]
    fn test_static_bar_spec() {
        let page = ProductPage::from_toml_str(SAMPLE).unwrap();
        let specs = page.static_specs();
        assert_eq!(specs.len(), 1);

        let (target, spec) = &specs[0];
        assert_eq!(*target, "terChart");
        let json = spec.to_json().unwrap();
        assert_eq!(json["options"]["scales"]["y"]["beginAtZero"], true);
        assert_eq!(json["options"]["scales"]["y"]["max"], 2.5);
        assert_eq!(json["options"]["plugins"]["legend"]["display"], false);
        assert_eq!(spec.tick_text(1.0).unwrap(), "1.00%");
    }

    #[test]
    fn test_rejects_duplicate_series_keys() {
        let content = SAMPLE.replace("key = \"late\"", "key = \"fund\"");
        let err = ProductPage::from_toml_str(&content).unwrap_err();
        assert!(err.is_configuration());
    }

    #[test]
    fn test_rejects_mismatched_chart_lengths() {
        let content = SAMPLE.replace("values = [0.5, 1.0]", "values = [0.5]");
        assert!(ProductPage::from_toml_str(&content).is_err());
    }

    #[test]
    fn test_rejects_bad_label() {
        let content = SAMPLE.replace("start = \"02/2020\"", "start = \"2020-02\"");
        assert!(ProductPage::from_toml_str(&content).is_err());
    }
}
