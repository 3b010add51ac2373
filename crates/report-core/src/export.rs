//! 비교표 CSV 내보내기.
//!
//! 각 상품 페이지의 "데이터 다운로드" 버튼이 내려주는 비교표입니다. 헤더와 행은
//! 상품 설정에 그대로 적힌 문자열이며, 줄 끝은 `\n`입니다.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{ReportError, ReportResult};

/// 브라우저 다운로드 링크에 쓰는 data URI 접두어.
pub const CSV_DATA_URI_PREFIX: &str = "data:text/csv;charset=utf-8,";

/// 상품별 CSV 비교표.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CsvExport {
    /// 다운로드 파일 이름
    pub file_name: String,
    pub header: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl CsvExport {
    /// 파일 이름과 모든 행의 열 수를 검증합니다.
    pub fn validate(&self) -> ReportResult<()> {
        if self.file_name.is_empty()
            || self.file_name.contains('/')
            || self.file_name.contains('\\')
        {
            return Err(ReportError::Config(format!(
                "잘못된 CSV 파일 이름: '{}'",
                self.file_name
            )));
        }

        if let Some((i, row)) = self
            .rows
            .iter()
            .enumerate()
            .find(|(_, row)| row.len() != self.header.len())
        {
            return Err(ReportError::Config(format!(
                "CSV {}번째 행의 열 수 {}이(가) 헤더 열 수 {}와 다릅니다",
                i + 1,
                row.len(),
                self.header.len()
            )));
        }
        Ok(())
    }

    /// 임의의 writer에 CSV를 씁니다.
    pub fn write_to<W: std::io::Write>(&self, writer: W) -> ReportResult<()> {
        let mut wtr = csv::WriterBuilder::new()
            .terminator(csv::Terminator::Any(b'\n'))
            .from_writer(writer);

        wtr.write_record(&self.header)?;
        for row in &self.rows {
            wtr.write_record(row)?;
        }
        wtr.flush()?;
        Ok(())
    }

    /// CSV 문자열.
    pub fn to_csv_string(&self) -> ReportResult<String> {
        let mut buf = Vec::new();
        self.write_to(&mut buf)?;
        String::from_utf8(buf).map_err(|e| ReportError::Serialization(e.to_string()))
    }

    /// 인코딩 전 data URI. 브라우저 어댑터가 URI 인코딩을 적용합니다.
    pub fn data_uri(&self) -> ReportResult<String> {
        Ok(format!("{}{}", CSV_DATA_URI_PREFIX, self.to_csv_string()?))
    }

    /// 디렉토리에 파일로 씁니다. 디렉토리가 없으면 만듭니다.
    pub fn write_file(&self, dir: impl AsRef<Path>) -> ReportResult<PathBuf> {
        let dir = dir.as_ref();
        std::fs::create_dir_all(dir)?;

        let path = dir.join(&self.file_name);
        let file = std::fs::File::create(&path)?;
        self.write_to(std::io::BufWriter::new(file))?;

        info!(path = %path.display(), rows = self.rows.len(), "CSV exported");
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> CsvExport {
        CsvExport {
            file_name: "comparativo.csv".to_string(),
            header: vec!["Fundo".to_string(), "Taxa (%)".to_string()],
            rows: vec![
                vec!["Dodge & Cox US Stock".to_string(), "0.52".to_string()],
                vec!["Harris US Value".to_string(), "1.58".to_string()],
            ],
        }
    }

    #[test]
    fn test_csv_bytes() {
        assert_eq!(
            sample().to_csv_string().unwrap(),
            "Fundo,Taxa (%)\nDodge & Cox US Stock,0.52\nHarris US Value,1.58\n"
        );
    }

    #[test]
    fn test_data_uri_prefix() {
        let uri = sample().data_uri().unwrap();
        assert!(uri.starts_with("data:text/csv;charset=utf-8,Fundo,"));
    }

    #[test]
    fn test_fields_with_commas_are_quoted() {
        let mut export = sample();
        export.rows[0][0] = "Dodge, Cox".to_string();
        let csv = export.to_csv_string().unwrap();
        assert!(csv.contains("\"Dodge, Cox\",0.52\n"));
    }

    #[test]
    fn test_validate_row_width() {
        let mut export = sample();
        export.rows[1].pop();
        assert!(export.validate().is_err());

        let mut export = sample();
        export.file_name = "../x.csv".to_string();
        assert!(export.validate().is_err());
    }

    #[test]
    fn test_write_file() {
        let dir = std::env::temp_dir().join(format!("report-export-{}", std::process::id()));
        let path = sample().write_file(&dir).unwrap();

        assert_eq!(path.file_name().unwrap(), "comparativo.csv");
        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.starts_with("Fundo,Taxa (%)\n"));
        std::fs::remove_dir_all(&dir).unwrap();
    }
}
