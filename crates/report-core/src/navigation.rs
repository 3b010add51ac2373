//! 상품 페이지 간 이동과 섹션 스크롤 추적.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// 이동 설정.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NavigationConfig {
    /// 기준 경로를 자를 경로 세그먼트
    pub root_marker: String,
    /// 홈 이동 키
    pub sentinel: String,
    /// 홈 페이지 경로
    pub home_path: String,
    /// 상품 페이지가 있는 디렉토리
    pub products_dir: String,
    /// 섹션 상단에서 이 픽셀만큼 위부터 활성화
    pub scroll_offset: f64,
    /// 상품 키 → 페이지 파일
    pub pages: BTreeMap<String, String>,
}

impl Default for NavigationConfig {
    fn default() -> Self {
        let pages = ["vuaa", "harris", "vontobel", "private-equity", "hedge-funds"]
            .into_iter()
            .map(|key| (key.to_string(), format!("{}.html", key)))
            .collect();

        Self {
            root_marker: "poc_report".to_string(),
            sentinel: "inicio".to_string(),
            home_path: "../../index.html".to_string(),
            products_dir: "produtos".to_string(),
            scroll_offset: 100.0,
            pages,
        }
    }
}

/// 이동 대상.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum NavTarget {
    /// 홈 페이지
    Home { path: String },
    /// 상품 페이지
    Product { key: String, path: String },
}

impl NavTarget {
    pub fn path(&self) -> &str {
        match self {
            NavTarget::Home { path } | NavTarget::Product { path, .. } => path,
        }
    }
}

/// 페이지 섹션의 위치.
#[derive(Debug, Clone, PartialEq)]
pub struct SectionOffset {
    pub id: String,
    pub offset_top: f64,
}

/// 상품 선택기와 스크롤 추적 규칙.
#[derive(Debug, Clone, Default)]
pub struct Navigator {
    config: NavigationConfig,
}

impl Navigator {
    pub fn new(config: NavigationConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &NavigationConfig {
        &self.config
    }

    /// 현재 경로에서 기준 경로를 구합니다.
    ///
    /// 마커 세그먼트까지 포함하여 자르며, 마커가 없으면 빈 문자열입니다.
    pub fn base_path(&self, current_path: &str) -> String {
        let parts: Vec<&str> = current_path.split('/').collect();
        match parts.iter().position(|p| *p == self.config.root_marker) {
            Some(index) => parts[..=index].join("/"),
            None => String::new(),
        }
    }

    /// 선택한 키를 이동 대상으로 바꿉니다.
    ///
    /// 빈 키나 알 수 없는 키는 `None` (이동하지 않음).
    pub fn resolve(&self, key: &str, current_path: &str) -> Option<NavTarget> {
        if key.is_empty() {
            return None;
        }

        if key == self.config.sentinel {
            return Some(NavTarget::Home {
                path: self.config.home_path.clone(),
            });
        }

        let page = self.config.pages.get(key)?;
        Some(NavTarget::Product {
            key: key.to_string(),
            path: format!(
                "{}/{}/{}/{}",
                self.base_path(current_path),
                self.config.products_dir,
                key,
                page
            ),
        })
    }

    /// 스크롤 위치에서 활성 섹션을 찾습니다.
    ///
    /// 문서 순서상 `offset_top - scroll_offset <= scroll_y`인 마지막 섹션입니다.
    pub fn active_section<'a>(
        &self,
        sections: &'a [SectionOffset],
        scroll_y: f64,
    ) -> Option<&'a str> {
        sections
            .iter()
            .filter(|s| scroll_y >= s.offset_top - self.config.scroll_offset)
            .last()
            .map(|s| s.id.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_known_key() {
        let nav = Navigator::default();
        let target = nav
            .resolve("harris", "/site/poc_report/produtos/vuaa/vuaa.html")
            .unwrap();
        assert_eq!(
            target,
            NavTarget::Product {
                key: "harris".to_string(),
                path: "/site/poc_report/produtos/harris/harris.html".to_string(),
            }
        );
    }

    #[test]
    fn test_resolve_sentinel_and_noops() {
        let nav = Navigator::default();
        assert_eq!(
            nav.resolve("inicio", "/poc_report/produtos/vuaa/vuaa.html")
                .unwrap()
                .path(),
            "../../index.html"
        );
        assert!(nav.resolve("", "/poc_report/x.html").is_none());
        assert!(nav.resolve("unknown", "/poc_report/x.html").is_none());
    }

    #[test]
    fn test_base_path_without_marker() {
        let nav = Navigator::default();
        assert_eq!(nav.base_path("/other/page.html"), "");
        assert_eq!(
            nav.resolve("private-equity", "/other/page.html").unwrap().path(),
            "/produtos/private-equity/private-equity.html"
        );
    }

    #[test]
    fn test_active_section() {
        let nav = Navigator::default();
        let sections = vec![
            SectionOffset {
                id: "resumo".to_string(),
                offset_top: 0.0,
            },
            SectionOffset {
                id: "desempenho".to_string(),
                offset_top: 600.0,
            },
            SectionOffset {
                id: "custos".to_string(),
                offset_top: 1200.0,
            },
        ];

        assert_eq!(nav.active_section(&sections, 0.0), Some("resumo"));
        assert_eq!(nav.active_section(&sections, 499.0), Some("resumo"));
        assert_eq!(nav.active_section(&sections, 500.0), Some("desempenho"));
        assert_eq!(nav.active_section(&sections, 5000.0), Some("custos"));
        assert_eq!(nav.active_section(&sections[1..], 10.0), None);
    }
}
