//! 날짜 선택기 옵션 출력.

use anyhow::{Context, Result};
use report_core::{ProductPage, RebaseSelector, SelectorOption};

use super::OutputFormat;

/// 상품의 선택기 옵션.
pub fn selector_options(page: &ProductPage) -> Result<Vec<SelectorOption>> {
    let set = page
        .aligned_series()
        .with_context(|| format!("Failed to align series for {}", page.key))?;
    Ok(RebaseSelector::new(set.labels()).options())
}

pub fn print_labels(page: &ProductPage, format: OutputFormat) -> Result<usize> {
    let options = selector_options(page)?;

    let content = match format {
        OutputFormat::Table => options
            .iter()
            .map(|o| format!("{:>4}  {}", o.value, o.text))
            .collect::<Vec<_>>()
            .join("\n"),
        OutputFormat::Csv => {
            let mut wtr = csv::Writer::from_writer(Vec::new());
            for option in &options {
                wtr.serialize(option).context("Failed to write CSV record")?;
            }
            let bytes = wtr.into_inner().context("Failed to flush CSV writer")?;
            String::from_utf8(bytes).context("CSV output is not UTF-8")?
        }
        OutputFormat::Json => {
            serde_json::to_string_pretty(&options).context("Failed to serialize to JSON")?
        }
    };
    super::write_output(&content, None)?;

    Ok(options.len())
}
