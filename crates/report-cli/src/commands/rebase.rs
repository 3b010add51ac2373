//! 리베이스된 시리즈 출력.

use anyhow::{Context, Result};
use report_core::{normalize_scaled, NormalizedSeriesSet, ProductPage};
use tracing::info;

use super::OutputFormat;

/// 리베이스 설정.
#[derive(Debug)]
pub struct RebaseConfig {
    /// 시작 레이블 (MM/YYYY)
    pub start: Option<String>,
    /// 시작 인덱스
    pub index: Option<usize>,
    /// 출력 형식
    pub format: OutputFormat,
    /// 출력 파일 경로
    pub output: Option<String>,
}

/// 정렬 후 선택한 지점으로 리베이스합니다.
pub fn rebased(
    page: &ProductPage,
    start: Option<&str>,
    index: Option<usize>,
) -> Result<NormalizedSeriesSet> {
    let set = page
        .aligned_series()
        .with_context(|| format!("Failed to align series for {}", page.key))?;
    let start_index = super::resolve_start(&set, start, index)?;

    normalize_scaled(&set, start_index, page.scale)
        .with_context(|| format!("Failed to rebase {} at index {}", page.key, start_index))
}

/// 리베이스 결과 출력. 출력한 행 수를 반환합니다.
pub fn run_rebase(page: &ProductPage, config: RebaseConfig) -> Result<usize> {
    let normalized = rebased(page, config.start.as_deref(), config.index)?;

    info!(
        product = %page.key,
        start = ?normalized.start_label().map(|l| l.to_string()),
        rows = normalized.len(),
        "Series rebased"
    );

    let content = match config.format {
        OutputFormat::Table => format_table(&normalized),
        OutputFormat::Csv => format_csv(&normalized)?,
        OutputFormat::Json => {
            serde_json::to_string_pretty(&normalized).context("Failed to serialize to JSON")?
        }
    };
    super::write_output(&content, config.output.as_deref())?;

    Ok(normalized.len())
}

fn format_table(set: &NormalizedSeriesSet) -> String {
    let mut output = String::new();

    output.push_str(&format!("{:<8}", "LABEL"));
    for series in &set.series {
        output.push_str(&format!(" {:>12}", truncate(&series.key, 12)));
    }
    output.push('\n');
    output.push_str(&"-".repeat(8 + 13 * set.series.len()));
    output.push('\n');

    for (i, label) in set.labels.iter().enumerate() {
        output.push_str(&format!("{:<8}", label.to_string()));
        for series in &set.series {
            match series.values[i] {
                Some(v) => output.push_str(&format!(" {:>12.6}", v)),
                None => output.push_str(&format!(" {:>12}", "-")),
            }
        }
        output.push('\n');
    }

    output.push('\n');
    output.push_str(&format!(
        "Series: {}",
        set.series
            .iter()
            .map(|s| format!("{} ({})", s.key, s.name))
            .collect::<Vec<_>>()
            .join(", ")
    ));
    output
}

/// 레이블 열과 시리즈별 열. 값이 없으면 빈 칸.
fn format_csv(set: &NormalizedSeriesSet) -> Result<String> {
    let mut wtr = csv::Writer::from_writer(Vec::new());

    let mut header = vec!["label".to_string()];
    header.extend(set.series.iter().map(|s| s.key.clone()));
    wtr.write_record(&header).context("Failed to write CSV header")?;

    for (i, label) in set.labels.iter().enumerate() {
        let mut record = vec![label.to_string()];
        record.extend(
            set.series
                .iter()
                .map(|s| s.values[i].map(|v| v.to_string()).unwrap_or_default()),
        );
        wtr.write_record(&record).context("Failed to write CSV record")?;
    }

    let bytes = wtr.into_inner().context("Failed to flush CSV writer")?;
    String::from_utf8(bytes).context("CSV output is not UTF-8")
}

/// 문자열 자르기 (UTF-8 안전).
fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let truncated: String = s.chars().take(max_len - 3).collect();
        format!("{}...", truncated)
    }
}
