//! 비교표 CSV 파일 내보내기.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use report_core::ProductPage;

/// 상품 비교표를 디렉토리에 씁니다. 쓴 파일 경로를 반환합니다.
pub fn export_csv(page: &ProductPage, dir: &Path) -> Result<PathBuf> {
    page.export
        .write_file(dir)
        .with_context(|| format!("Failed to export {} to {}", page.export.file_name, dir.display()))
}
