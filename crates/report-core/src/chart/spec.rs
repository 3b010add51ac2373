//! 차트 라이브러리에 넘기는 설정 구조.
//!
//! 직렬화 결과는 `{type, data: {labels, datasets}, options}` 형태로
//! Chart.js 생성자에 그대로 전달됩니다. 툴팁/눈금 텍스트는 함수로만 표현할 수
//! 있으므로 직렬화하지 않고 [`ValueFormat`]으로 들고 다닙니다.

use serde::{Deserialize, Serialize};

use crate::error::ReportResult;

/// 차트 유형.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    Line,
    Bar,
    Pie,
    Doughnut,
}

impl ChartKind {
    /// 카테고리별로 색을 칠하는 원형 계열 차트인지 확인합니다.
    pub fn is_categorical(self) -> bool {
        matches!(self, ChartKind::Pie | ChartKind::Doughnut)
    }
}

/// 단색 또는 포인트별 색상.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Paint {
    Solid(String),
    PerPoint(Vec<String>),
}

/// 데이터셋.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Dataset {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// `None`은 JSON `null`로 직렬화되어 공백으로 그려집니다.
    pub data: Vec<Option<f64>>,
    pub background_color: Paint,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_color: Option<Paint>,
    pub border_width: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub point_radius: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tension: Option<f64>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub span_gaps: bool,
}

/// 레이블과 데이터셋.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartData {
    pub labels: Vec<String>,
    pub datasets: Vec<Dataset>,
}

/// 범례 위치.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LegendPlacement {
    #[default]
    Top,
    Right,
    Bottom,
    Left,
    /// 범례를 표시하지 않음
    Hidden,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LegendFont {
    pub size: u32,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LegendLabels {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub box_width: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub padding: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font: Option<LegendFont>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Legend {
    pub display: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<LegendPlacement>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub labels: Option<LegendLabels>,
}

impl Legend {
    /// 배치에 맞는 범례 설정을 만듭니다.
    ///
    /// 오른쪽 범례는 작은 상자와 글꼴을, 아래쪽 범례는 여백을 사용합니다.
    pub fn placed(placement: LegendPlacement) -> Self {
        let labels = match placement {
            LegendPlacement::Right => Some(LegendLabels {
                box_width: Some(15),
                font: Some(LegendFont { size: 10 }),
                ..Default::default()
            }),
            LegendPlacement::Bottom => Some(LegendLabels {
                padding: Some(20),
                ..Default::default()
            }),
            _ => None,
        };

        match placement {
            LegendPlacement::Hidden => Self {
                display: false,
                position: None,
                labels: None,
            },
            _ => Self {
                display: true,
                position: Some(placement),
                labels,
            },
        }
    }
}

/// 차트/축 제목.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Title {
    pub display: bool,
    pub text: String,
}

impl Title {
    pub fn shown(text: impl Into<String>) -> Self {
        Self {
            display: true,
            text: text.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Plugins {
    pub legend: Legend,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<Title>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Axis {
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub begin_at_zero: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<Title>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Scales {
    pub x: Axis,
    pub y: Axis,
}

/// 차트 옵션.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartOptions {
    pub responsive: bool,
    pub maintain_aspect_ratio: bool,
    pub plugins: Plugins,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scales: Option<Scales>,
}

impl ChartOptions {
    /// 컨테이너 크기를 따르는 기본 옵션.
    pub fn responsive(legend: Legend) -> Self {
        Self {
            responsive: true,
            maintain_aspect_ratio: false,
            plugins: Plugins {
                legend,
                title: None,
            },
            scales: None,
        }
    }
}

/// 툴팁/눈금에 쓰는 퍼센트 표기.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValueFormat {
    /// 표시 전에 곱하는 값
    pub multiplier: f64,
    /// 소수 자릿수. `None`이면 값을 있는 그대로 표시
    pub decimals: Option<usize>,
}

impl ValueFormat {
    pub fn percent(multiplier: f64, decimals: usize) -> Self {
        Self {
            multiplier,
            decimals: Some(decimals),
        }
    }

    /// 값을 그대로 `%`와 함께 표시.
    pub fn raw_percent() -> Self {
        Self {
            multiplier: 1.0,
            decimals: None,
        }
    }

    pub fn format(&self, value: f64) -> String {
        let scaled = value * self.multiplier;
        match self.decimals {
            Some(decimals) => format!("{:.*}%", decimals, scaled),
            None => format!("{}%", scaled),
        }
    }
}

/// 차트 하나의 전체 설정.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSpec {
    #[serde(rename = "type")]
    pub kind: ChartKind,
    pub data: ChartData,
    pub options: ChartOptions,
    #[serde(skip)]
    pub tooltip: ValueFormat,
    #[serde(skip)]
    pub ticks: Option<ValueFormat>,
}

impl ChartSpec {
    /// 툴팁 한 줄.
    ///
    /// 원형 차트는 카테고리 레이블을, 나머지는 데이터셋 레이블을 앞에 붙입니다.
    pub fn tooltip_text(&self, dataset_label: &str, category_label: &str, raw: f64) -> String {
        let subject = if self.kind.is_categorical() {
            category_label
        } else {
            dataset_label
        };
        format!("{}: {}", subject, self.tooltip.format(raw))
    }

    /// y축 눈금 텍스트. 눈금 형식이 없으면 `None`.
    pub fn tick_text(&self, value: f64) -> Option<String> {
        self.ticks.map(|f| f.format(value))
    }

    /// JSON 값으로 변환합니다.
    pub fn to_json(&self) -> ReportResult<serde_json::Value> {
        Ok(serde_json::to_value(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pie() -> ChartSpec {
        ChartSpec {
            kind: ChartKind::Pie,
            data: ChartData {
                labels: vec!["Financeiro".to_string()],
                datasets: vec![Dataset {
                    label: None,
                    data: vec![Some(22.5)],
                    background_color: Paint::PerPoint(vec!["#1a365d".to_string()]),
                    border_color: None,
                    border_width: 1,
                    point_radius: None,
                    tension: None,
                    span_gaps: false,
                }],
            },
            options: ChartOptions::responsive(Legend::placed(LegendPlacement::Right)),
            tooltip: ValueFormat::raw_percent(),
            ticks: None,
        }
    }

    #[test]
    fn test_value_format() {
        assert_eq!(ValueFormat::percent(100.0, 2).format(0.1234), "12.34%");
        assert_eq!(ValueFormat::percent(1.0, 1).format(58.5), "58.5%");
        assert_eq!(ValueFormat::raw_percent().format(68.0), "68%");
        assert_eq!(ValueFormat::raw_percent().format(22.5), "22.5%");
    }

    #[test]
    fn test_tooltip_subject_by_kind() {
        let mut spec = pie();
        assert_eq!(spec.tooltip_text("", "Financeiro", 22.5), "Financeiro: 22.5%");

        spec.kind = ChartKind::Line;
        spec.tooltip = ValueFormat::percent(100.0, 2);
        assert_eq!(
            spec.tooltip_text("Harris Fund", "01/2011", 0.05),
            "Harris Fund: 5.00%"
        );
    }

    #[test]
    fn test_serialized_shape() {
        let json = pie().to_json().unwrap();

        assert_eq!(json["type"], "pie");
        assert_eq!(json["data"]["labels"][0], "Financeiro");
        assert_eq!(json["data"]["datasets"][0]["backgroundColor"][0], "#1a365d");
        assert_eq!(json["data"]["datasets"][0]["borderWidth"], 1);
        assert!(json["data"]["datasets"][0].get("spanGaps").is_none());
        assert_eq!(json["options"]["maintainAspectRatio"], false);
        assert_eq!(json["options"]["plugins"]["legend"]["position"], "right");
        assert_eq!(json["options"]["plugins"]["legend"]["labels"]["boxWidth"], 15);
        assert!(json.get("tooltip").is_none());
    }

    #[test]
    fn test_hidden_legend() {
        let legend = Legend::placed(LegendPlacement::Hidden);
        assert!(!legend.display);
        let json = serde_json::to_value(&legend).unwrap();
        assert_eq!(json, serde_json::json!({ "display": false }));
    }
}
