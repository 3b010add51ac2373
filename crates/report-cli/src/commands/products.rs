//! 상품 목록 조회.

use anyhow::{Context, Result};
use report_core::ProductCatalog;
use serde::Serialize;

use super::OutputFormat;

/// 상품 요약.
#[derive(Debug, Clone, Serialize)]
pub struct ProductSummary {
    pub key: String,
    pub title: String,
    pub series: usize,
    pub charts: usize,
    pub export: String,
}

pub fn summarize(catalog: &ProductCatalog) -> Vec<ProductSummary> {
    catalog
        .iter()
        .map(|p| ProductSummary {
            key: p.key.clone(),
            title: p.title.clone(),
            series: p.series.len(),
            charts: p.charts.len(),
            export: p.export.file_name.clone(),
        })
        .collect()
}

/// 상품 목록 출력. 상품 수를 반환합니다.
pub fn list_products(catalog: &ProductCatalog, format: OutputFormat) -> Result<usize> {
    let products = summarize(catalog);

    let content = match format {
        OutputFormat::Table => format_table(&products),
        OutputFormat::Csv => format_csv(&products)?,
        OutputFormat::Json => {
            serde_json::to_string_pretty(&products).context("Failed to serialize to JSON")?
        }
    };
    super::write_output(&content, None)?;

    Ok(products.len())
}

fn format_table(products: &[ProductSummary]) -> String {
    let mut output = String::new();

    output.push_str(&format!(
        "{:<12} {:<24} {:>6} {:>6}  {}\n",
        "KEY", "TITLE", "SERIES", "CHARTS", "EXPORT"
    ));
    output.push_str(&"-".repeat(80));
    output.push('\n');

    for p in products {
        output.push_str(&format!(
            "{:<12} {:<24} {:>6} {:>6}  {}\n",
            p.key, p.title, p.series, p.charts, p.export
        ));
    }

    output.push('\n');
    output.push_str(&format!("Total: {} products", products.len()));
    output
}

fn format_csv(products: &[ProductSummary]) -> Result<String> {
    let mut wtr = csv::Writer::from_writer(Vec::new());
    for p in products {
        wtr.serialize(p).context("Failed to write CSV record")?;
    }
    let bytes = wtr.into_inner().context("Failed to flush CSV writer")?;
    String::from_utf8(bytes).context("CSV output is not UTF-8")
}
