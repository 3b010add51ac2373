//! CLI 명령어 구현 모듈.

pub mod chart;
pub mod export;
pub mod labels;
pub mod navigate;
pub mod products;
pub mod rebase;

use std::fs::File;
use std::io::Write;

use anyhow::{Context, Result};
use report_core::{AlignedSeriesSet, PeriodLabel};
use tracing::info;

/// 출력 형식.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Table,
    Csv,
    Json,
}

impl OutputFormat {
    pub fn parse(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "table" => Ok(Self::Table),
            "csv" => Ok(Self::Csv),
            "json" => Ok(Self::Json),
            _ => Err(anyhow::anyhow!(
                "Invalid format: {}. Use: table, csv, json",
                s
            )),
        }
    }
}

/// 파일 또는 stdout에 출력.
pub fn write_output(content: &str, output_path: Option<&str>) -> Result<()> {
    if let Some(path) = output_path {
        let mut file = File::create(path)
            .with_context(|| format!("Failed to create output file: {}", path))?;
        file.write_all(content.as_bytes())
            .context("Failed to write to file")?;
        info!("Output written to: {}", path);
    } else {
        println!("{}", content);
    }
    Ok(())
}

/// `--start MM/YYYY` 또는 `--index N`을 레이블 인덱스로 바꿉니다. 둘 다 없으면 0.
pub fn resolve_start(
    set: &AlignedSeriesSet,
    start: Option<&str>,
    index: Option<usize>,
) -> Result<usize> {
    match (start, index) {
        (Some(_), Some(_)) => Err(anyhow::anyhow!("Use either --start or --index, not both")),
        (Some(label), None) => {
            let label = label
                .parse::<PeriodLabel>()
                .with_context(|| format!("Invalid start label: {}", label))?;
            set.index_of(label)
                .ok_or_else(|| anyhow::anyhow!("Label {} is not in the series range", label))
        }
        (None, Some(index)) => Ok(index),
        (None, None) => Ok(0),
    }
}
