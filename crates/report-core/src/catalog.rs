//! 상품 카탈로그.
//!
//! 라이브러리에 내장된 상품 파일에 설정된 디렉토리의 파일을 더합니다.
//! 같은 키의 파일은 내장 상품을 대체합니다.

use std::collections::BTreeMap;
use std::ffi::OsStr;
use std::path::Path;

use tracing::{debug, info};

use crate::config::AppConfig;
use crate::error::{ReportError, ReportResult};
use crate::product::ProductPage;

const BUILTIN_PRODUCTS: &[(&str, &str)] = &[
    ("harris.toml", include_str!("../data/products/harris.toml")),
    ("vuaa.toml", include_str!("../data/products/vuaa.toml")),
];

/// 키로 정렬된 상품 설정 모음.
#[derive(Debug, Clone, Default)]
pub struct ProductCatalog {
    products: BTreeMap<String, ProductPage>,
}

impl ProductCatalog {
    /// 내장 상품만 담은 카탈로그.
    pub fn builtin() -> ReportResult<Self> {
        let mut catalog = Self::default();
        for (file, content) in BUILTIN_PRODUCTS {
            let page = ProductPage::from_toml_str(content)
                .map_err(|e| ReportError::Config(format!("{}: {}", file, e)))?;
            catalog.insert(page);
        }
        Ok(catalog)
    }

    /// 내장 상품에 설정의 `data.products_dir`을 더한 카탈로그.
    pub fn from_config(config: &AppConfig) -> ReportResult<Self> {
        let mut catalog = Self::builtin()?;
        if let Some(dir) = &config.data.products_dir {
            catalog.load_dir(dir)?;
        }
        Ok(catalog)
    }

    /// 디렉토리의 `*.toml` 파일을 읽어 추가합니다.
    ///
    /// 파일 하나라도 잘못되면 실패합니다. 반환값은 읽은 파일 수입니다.
    pub fn load_dir(&mut self, dir: impl AsRef<Path>) -> ReportResult<usize> {
        let dir = dir.as_ref();
        let mut loaded = 0;

        for entry in std::fs::read_dir(dir)? {
            let path = entry?.path();
            if !path.is_file() || path.extension() != Some(OsStr::new("toml")) {
                continue;
            }

            let content = std::fs::read_to_string(&path)?;
            let page = ProductPage::from_toml_str(&content)
                .map_err(|e| ReportError::Config(format!("{}: {}", path.display(), e)))?;

            info!(product = %page.key, path = %path.display(), "Loaded product file");
            self.insert(page);
            loaded += 1;
        }

        Ok(loaded)
    }

    /// 상품을 추가하거나 대체합니다.
    pub fn insert(&mut self, page: ProductPage) {
        if self.products.contains_key(&page.key) {
            debug!(product = %page.key, "Replacing product");
        }
        self.products.insert(page.key.clone(), page);
    }

    pub fn get(&self, key: &str) -> ReportResult<&ProductPage> {
        self.products
            .get(key)
            .ok_or_else(|| ReportError::NotFound(format!("상품 '{}'", key)))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.products.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ProductPage> {
        self.products.values()
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_products() {
        let catalog = ProductCatalog::builtin().unwrap();
        assert_eq!(catalog.keys().collect::<Vec<_>>(), vec!["harris", "vuaa"]);
        assert!(matches!(catalog.get("vontobel"), Err(ReportError::NotFound(_))));
    }

    #[test]
    fn test_load_dir_overrides_builtin() {
        let dir = std::env::temp_dir().join(format!("report-catalog-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();

        let content = BUILTIN_PRODUCTS[1]
            .1
            .replacen("title = \"VUAA ETF\"", "title = \"VUAA (override)\"", 1);
        std::fs::write(dir.join("vuaa.toml"), content).unwrap();
        std::fs::write(dir.join("notes.txt"), "ignored").unwrap();

        let mut catalog = ProductCatalog::builtin().unwrap();
        let loaded = catalog.load_dir(&dir).unwrap();
        std::fs::remove_dir_all(&dir).unwrap();

        assert_eq!(loaded, 1);
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.get("vuaa").unwrap().title, "VUAA (override)");
    }
}
