//! # Report Web
//!
//! 상품 페이지 하나를 브라우저 DOM에 연결합니다.
//!
//! ```js
//! import init, { mount_report } from "./pkg/report_web.js";
//!
//! await init();
//! const page = mount_report("harris");
//! // 페이지를 떠날 때
//! page.destroy();
//! ```
//!
//! 요소가 없으면 해당 기능만 건너뜁니다. 차트 라이브러리는 전역 `Chart`로
//! 먼저 로드되어 있어야 합니다.

mod dom;
mod renderer;

use std::cell::RefCell;
use std::rc::Rc;

use report_core::{
    render_static_charts, Navigator, PerformanceChart, ProductCatalog, ProductPage, ReportError,
    SectionOffset, SelectorOption, StaticCharts,
};
use tracing::{debug, error, info, warn};
use wasm_bindgen::prelude::*;
use web_sys::{
    Document, Element, HtmlAnchorElement, HtmlElement, HtmlOptionElement, HtmlSelectElement,
};

use dom::Listener;
pub use renderer::{ChartJsHandle, ChartJsRenderer};

type SharedChart = Rc<RefCell<PerformanceChart<ChartJsRenderer>>>;

fn to_js(err: ReportError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    // 다른 모듈이 이미 구독자를 설치했으면 그대로 둔다
    let _ = tracing_wasm::try_set_as_global_default();
}

/// 선택기 값 문자열을 레이블 인덱스로 바꿉니다.
fn parse_selection(value: &str) -> Option<usize> {
    value.trim().parse().ok()
}

/// 스크롤 추적에서 링크가 섹션을 가리키는지 확인합니다.
fn links_to(href: Option<&str>, section: &str) -> bool {
    href.and_then(|h| h.strip_prefix('#'))
        .is_some_and(|id| id == section)
}

/// 성과 차트 초기화 실패 중 노출할 메시지. 캔버스가 없는 페이지는 `None`.
fn performance_failure(err: &ReportError) -> Option<String> {
    match err {
        ReportError::NotFound(_) => None,
        other => Some(other.to_string()),
    }
}

/// 브라우저에 연결된 상품 페이지.
#[wasm_bindgen]
pub struct ReportPage {
    product: String,
    performance: Option<SharedChart>,
    performance_error: Option<String>,
    static_charts: StaticCharts<ChartJsHandle>,
    listeners: Vec<Listener>,
}

#[wasm_bindgen]
impl ReportPage {
    /// 상품 키.
    #[wasm_bindgen(getter)]
    pub fn product(&self) -> String {
        self.product.clone()
    }

    /// 성과 차트 초기화 실패 메시지. 정상이면 `undefined`.
    #[wasm_bindgen(getter, js_name = performanceError)]
    pub fn performance_error(&self) -> Option<String> {
        self.performance_error.clone()
    }

    /// 정적 차트별 결과 (`[target, {status, reason}]` 배열).
    #[wasm_bindgen(js_name = staticOutcomes)]
    pub fn static_outcomes(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(self.static_charts.outcomes())
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// 현재 선택기 인덱스로 다시 그린 횟수.
    #[wasm_bindgen(js_name = renderCount)]
    pub fn render_count(&self) -> u32 {
        self.performance
            .as_ref()
            .map_or(0, |c| c.borrow().render_count() as u32)
    }

    /// 리스너를 해제하고 모든 차트를 파기합니다.
    pub fn destroy(&mut self) {
        for listener in self.listeners.drain(..) {
            listener.detach();
        }
        self.static_charts.clear();
        self.performance = None;
        info!(product = %self.product, "Report page destroyed");
    }
}

/// 상품 페이지를 DOM에 연결합니다.
///
/// 알 수 없는 상품 키나 잘못된 상품 데이터는 에러입니다. 성과 차트 정렬 실패는
/// 다른 기능을 막지 않고 `performanceError`로 노출됩니다. 렌더러 실패도 마찬가지이며
/// 캔버스가 없는 경우만 조용히 건너뜁니다.
#[wasm_bindgen]
pub fn mount_report(product_key: &str) -> Result<ReportPage, JsValue> {
    let catalog = ProductCatalog::builtin().map_err(to_js)?;
    let page = catalog.get(product_key).map_err(to_js)?.clone();
    let document = dom::document()?;
    let renderer = ChartJsRenderer::new(document.clone());

    let static_charts = render_static_charts(&page, &mut renderer.clone());
    let mut listeners = Vec::new();

    let (performance, performance_error) = match PerformanceChart::load(&page, renderer) {
        Ok(chart) => {
            let chart = Rc::new(RefCell::new(chart));
            wire_selector(&document, &page, &chart, &mut listeners)?;
            (Some(chart), None)
        }
        Err(e) => match performance_failure(&e) {
            Some(message) => {
                error!(product = %page.key, error = %e, "Performance chart initialization failed");
                (None, Some(message))
            }
            None => {
                debug!(error = %e, "Performance chart skipped");
                (None, None)
            }
        },
    };

    wire_print(&document, &mut listeners)?;
    wire_download(&document, &page, &mut listeners)?;
    wire_product_selector(&document, &mut listeners)?;
    wire_scroll_spy(&document, &mut listeners)?;

    info!(product = %page.key, listeners = listeners.len(), "Report page mounted");

    Ok(ReportPage {
        product: page.key,
        performance,
        performance_error,
        static_charts,
        listeners,
    })
}

fn fill_selector(
    document: &Document,
    select: &HtmlSelectElement,
    options: &[SelectorOption],
) -> Result<(), JsValue> {
    select.set_inner_html("");
    for option in options {
        let element: HtmlOptionElement = document.create_element("option")?.dyn_into()?;
        element.set_value(&option.value.to_string());
        element.set_text(&option.text);
        select.append_child(&element)?;
    }
    select.set_value("0");
    Ok(())
}

fn wire_selector(
    document: &Document,
    page: &ProductPage,
    chart: &SharedChart,
    listeners: &mut Vec<Listener>,
) -> Result<(), JsValue> {
    let layout = &page.performance;

    let select = dom::element_by_id::<HtmlSelectElement>(document, &layout.selector);
    match &select {
        Some(select) => {
            fill_selector(document, select, &chart.borrow().options())?;

            let chart = chart.clone();
            let source = select.clone();
            listeners.push(Listener::attach(select, "change", move |_| {
                let Some(index) = parse_selection(&source.value()) else {
                    warn!(value = %source.value(), "Ignoring unparsable selection");
                    return;
                };
                if let Err(e) = chart.borrow_mut().on_pick(index) {
                    warn!(error = %e, "Rebase failed");
                }
            })?);
        }
        None => debug!(id = %layout.selector, "Start date selector missing"),
    }

    match dom::element_by_id::<HtmlElement>(document, &layout.reset) {
        Some(button) => {
            let chart = chart.clone();
            listeners.push(Listener::attach(&button, "click", move |_| {
                if let Some(select) = &select {
                    select.set_value("0");
                }
                if let Err(e) = chart.borrow_mut().on_reset() {
                    warn!(error = %e, "Reset failed");
                }
            })?);
        }
        None => debug!(id = %layout.reset, "Reset button missing"),
    }

    Ok(())
}

fn wire_print(document: &Document, listeners: &mut Vec<Listener>) -> Result<(), JsValue> {
    let Some(button) = dom::element_by_id::<HtmlElement>(document, "printBtn") else {
        debug!("Print button missing");
        return Ok(());
    };

    listeners.push(Listener::attach(&button, "click", |_| {
        if let Err(e) = dom::window().and_then(|w| w.print()) {
            warn!(error = ?e, "Print failed");
        }
    })?);
    Ok(())
}

fn download(document: &Document, page: &ProductPage) -> Result<(), JsValue> {
    let uri = page.export.data_uri().map_err(to_js)?;
    let encoded = String::from(js_sys::encode_uri(&uri));

    let link: HtmlAnchorElement = document.create_element("a")?.dyn_into()?;
    link.set_href(&encoded);
    link.set_download(&page.export.file_name);

    let body = document
        .body()
        .ok_or_else(|| JsValue::from_str("document has no body"))?;
    body.append_child(&link)?;
    link.click();
    body.remove_child(&link)?;

    info!(file = %page.export.file_name, "CSV download started");
    Ok(())
}

fn wire_download(
    document: &Document,
    page: &ProductPage,
    listeners: &mut Vec<Listener>,
) -> Result<(), JsValue> {
    let Some(button) = dom::element_by_id::<HtmlElement>(document, "downloadBtn") else {
        debug!("Download button missing");
        return Ok(());
    };

    let doc = document.clone();
    let page = page.clone();
    listeners.push(Listener::attach(&button, "click", move |_| {
        if let Err(e) = download(&doc, &page) {
            error!(error = ?e, "CSV download failed");
        }
    })?);
    Ok(())
}

fn wire_product_selector(
    document: &Document,
    listeners: &mut Vec<Listener>,
) -> Result<(), JsValue> {
    let Some(select) = dom::element_by_id::<HtmlSelectElement>(document, "productSelector") else {
        debug!("Product selector missing");
        return Ok(());
    };

    let navigator = Navigator::default();
    let source = select.clone();
    listeners.push(Listener::attach(&select, "change", move |_| {
        let result = dom::window().and_then(|window| {
            let location = window.location();
            let current = location.pathname()?;
            match navigator.resolve(&source.value(), &current) {
                Some(target) => location.set_href(target.path()),
                None => Ok(()),
            }
        });
        if let Err(e) = result {
            warn!(error = ?e, "Navigation failed");
        }
    })?);
    Ok(())
}

fn collect_sections(document: &Document) -> Result<Vec<SectionOffset>, JsValue> {
    let nodes = document.query_selector_all("section")?;
    let mut sections = Vec::with_capacity(nodes.length() as usize);
    for i in 0..nodes.length() {
        if let Some(section) = nodes.item(i).and_then(|n| n.dyn_into::<HtmlElement>().ok()) {
            sections.push(SectionOffset {
                id: section.id(),
                offset_top: f64::from(section.offset_top()),
            });
        }
    }
    Ok(sections)
}

fn highlight_active(document: &Document, navigator: &Navigator) -> Result<(), JsValue> {
    let scroll_y = dom::window()?.scroll_y()?;
    let sections = collect_sections(document)?;
    let active = navigator.active_section(&sections, scroll_y).unwrap_or("");

    let links = document.query_selector_all(".nav-link")?;
    for i in 0..links.length() {
        if let Some(link) = links.item(i).and_then(|n| n.dyn_into::<Element>().ok()) {
            let classes = link.class_list();
            classes.remove_1("active")?;
            if links_to(link.get_attribute("href").as_deref(), active) {
                classes.add_1("active")?;
            }
        }
    }
    Ok(())
}

fn wire_scroll_spy(document: &Document, listeners: &mut Vec<Listener>) -> Result<(), JsValue> {
    let navigator = Navigator::default();
    highlight_active(document, &navigator)?;

    let window = dom::window()?;
    let doc = document.clone();
    listeners.push(Listener::attach(&window, "scroll", move |_| {
        if let Err(e) = highlight_active(&doc, &navigator) {
            warn!(error = ?e, "Scroll tracking failed");
        }
    })?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_selection() {
        assert_eq!(parse_selection("45"), Some(45));
        assert_eq!(parse_selection(" 0 "), Some(0));
        assert_eq!(parse_selection(""), None);
        assert_eq!(parse_selection("-1"), None);
    }

    #[test]
    fn test_links_to() {
        assert!(links_to(Some("#desempenho"), "desempenho"));
        assert!(!links_to(Some("desempenho"), "desempenho"));
        assert!(!links_to(Some("#custos"), "desempenho"));
        assert!(!links_to(None, ""));
    }

    #[test]
    fn test_performance_failure_exposes_render_errors() {
        let missing = ReportError::NotFound("렌더링 대상 'performanceChart'".to_string());
        assert_eq!(performance_failure(&missing), None);

        let render = ReportError::Render("new Chart: canvas context lost".to_string());
        let message = performance_failure(&render).unwrap();
        assert!(message.contains("canvas context lost"));

        let alignment = ReportError::Alignment {
            series: "IWVL".to_string(),
            label: "01/2030".to_string(),
        };
        assert!(performance_failure(&alignment).unwrap().contains("01/2030"));
    }
}
