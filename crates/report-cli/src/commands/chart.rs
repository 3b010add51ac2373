//! 차트 설정 JSON 출력.

use std::collections::BTreeMap;

use anyhow::{Context, Result};
use report_core::ProductPage;
use serde_json::{json, Value};

/// 차트 출력 설정.
#[derive(Debug)]
pub struct ChartConfig {
    pub start: Option<String>,
    pub index: Option<usize>,
    /// 정적 차트 포함 여부
    pub include_static: bool,
    pub output: Option<String>,
}

/// 성과 차트(및 정적 차트)의 라이브러리 설정 JSON.
pub fn chart_json(page: &ProductPage, config: &ChartConfig) -> Result<Value> {
    let normalized = super::rebase::rebased(page, config.start.as_deref(), config.index)?;
    let performance = page
        .performance_spec(&normalized)
        .to_json()
        .context("Failed to serialize performance chart")?;

    let mut document = json!({
        "product": page.key,
        "target": page.performance.target,
        "performance": performance,
    });

    if config.include_static {
        let charts = page
            .static_specs()
            .into_iter()
            .map(|(target, spec)| Ok((target.to_string(), spec.to_json()?)))
            .collect::<Result<BTreeMap<String, Value>>>()
            .context("Failed to serialize static charts")?;
        document["static"] = json!(charts);
    }

    Ok(document)
}

pub fn print_chart(page: &ProductPage, config: ChartConfig) -> Result<()> {
    let document = chart_json(page, &config)?;
    let content = serde_json::to_string_pretty(&document).context("Failed to serialize to JSON")?;
    super::write_output(&content, config.output.as_deref())
}
