//! 상품 선택기 이동 대상 확인.

use anyhow::{Context, Result};
use report_core::{NavTarget, Navigator, SectionOffset};

/// `id:offset` 형식의 섹션 목록을 읽습니다.
pub fn parse_sections(spec: &str) -> Result<Vec<SectionOffset>> {
    spec.split(',')
        .filter(|s| !s.trim().is_empty())
        .map(|item| {
            let (id, offset) = item
                .split_once(':')
                .ok_or_else(|| anyhow::anyhow!("Invalid section '{}'. Use id:offset", item))?;
            let offset_top = offset
                .trim()
                .parse::<f64>()
                .with_context(|| format!("Invalid section offset: {}", offset))?;
            Ok(SectionOffset {
                id: id.trim().to_string(),
                offset_top,
            })
        })
        .collect()
}

/// 이동 결과 한 줄.
pub fn describe(target: Option<&NavTarget>) -> String {
    match target {
        Some(NavTarget::Home { path }) => format!("home -> {}", path),
        Some(NavTarget::Product { key, path }) => format!("{} -> {}", key, path),
        None => "no-op".to_string(),
    }
}

pub fn run_navigate(
    navigator: &Navigator,
    key: &str,
    from: &str,
    sections: Option<&str>,
    scroll_y: f64,
) -> Result<()> {
    let target = navigator.resolve(key, from);
    println!("{}", describe(target.as_ref()));

    if let Some(sections) = sections {
        let sections = parse_sections(sections)?;
        let active = navigator.active_section(&sections, scroll_y);
        println!("active section: {}", active.unwrap_or("-"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_describe() {
        let nav = Navigator::default();
        let from = "/poc_report/produtos/harris/harris.html";

        assert_eq!(
            describe(nav.resolve("vuaa", from).as_ref()),
            "vuaa -> /poc_report/produtos/vuaa/vuaa.html"
        );
        assert_eq!(
            describe(nav.resolve("inicio", from).as_ref()),
            "home -> ../../index.html"
        );
        assert_eq!(describe(nav.resolve("", from).as_ref()), "no-op");
    }

    #[test]
    fn test_parse_sections() {
        let sections = parse_sections("resumo:0, desempenho:640.5").unwrap();
        assert_eq!(sections.len(), 2);
        assert_eq!(sections[1].id, "desempenho");
        assert_eq!(sections[1].offset_top, 640.5);

        assert!(parse_sections("resumo").is_err());
        assert!(parse_sections("resumo:abc").is_err());
    }
}
