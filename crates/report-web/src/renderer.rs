//! 전역 `Chart` 생성자를 사용하는 렌더러.

use js_sys::{Array, Function, Object, Reflect};
use report_core::{ChartHandle, ChartRenderer, ChartSpec, ReportError, ReportResult};
use serde::Serialize;
use tracing::warn;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, HtmlCanvasElement};

type Callback = Closure<dyn FnMut(JsValue) -> JsValue>;

fn js_error(context: &str, err: JsValue) -> ReportError {
    let detail = err
        .as_string()
        .or_else(|| {
            err.dyn_ref::<js_sys::Error>()
                .map(|e| String::from(e.message()))
        })
        .unwrap_or_else(|| format!("{:?}", err));
    ReportError::Render(format!("{}: {}", context, detail))
}

/// `parent[key]`가 객체가 아니면 새 객체를 넣고 반환합니다.
fn child_object(parent: &JsValue, key: &str) -> Result<JsValue, JsValue> {
    let key = JsValue::from_str(key);
    let existing = Reflect::get(parent, &key)?;
    if existing.is_object() {
        return Ok(existing);
    }
    let created: JsValue = Object::new().into();
    Reflect::set(parent, &key, &created)?;
    Ok(created)
}

fn string_field(value: &JsValue, key: &str) -> String {
    Reflect::get(value, &JsValue::from_str(key))
        .ok()
        .and_then(|v| v.as_string())
        .unwrap_or_default()
}

/// Chart.js 인스턴스.
pub struct ChartJsHandle {
    instance: JsValue,
    // 차트가 살아 있는 동안 콜백이 유지되어야 한다
    _callbacks: Vec<Callback>,
}

impl ChartHandle for ChartJsHandle {
    fn destroy(&mut self) {
        let destroy = Reflect::get(&self.instance, &JsValue::from_str("destroy"))
            .ok()
            .and_then(|f| f.dyn_into::<Function>().ok());
        match destroy {
            Some(f) => {
                if let Err(e) = f.call0(&self.instance) {
                    warn!(error = ?e, "Chart destroy failed");
                }
            }
            None => warn!("Chart instance has no destroy method"),
        }
    }
}

/// 문서의 캔버스 위에 Chart.js 차트를 만드는 렌더러.
#[derive(Clone)]
pub struct ChartJsRenderer {
    document: Document,
}

impl ChartJsRenderer {
    pub fn new(document: Document) -> Self {
        Self { document }
    }

    fn context(&self, target: &str) -> ReportResult<JsValue> {
        let canvas = self
            .document
            .get_element_by_id(target)
            .ok_or_else(|| ReportError::NotFound(format!("렌더링 대상 '{}'", target)))?
            .dyn_into::<HtmlCanvasElement>()
            .map_err(|_| ReportError::Render(format!("'{}'은(는) canvas가 아닙니다", target)))?;

        canvas
            .get_context("2d")
            .map_err(|e| js_error("getContext", e))?
            .map(JsValue::from)
            .ok_or_else(|| ReportError::Render(format!("'{}'의 2d 컨텍스트가 없습니다", target)))
    }

    /// 툴팁/눈금 콜백을 설정 객체에 연결합니다.
    fn attach_callbacks(config: &JsValue, spec: &ChartSpec) -> Result<Vec<Callback>, JsValue> {
        let mut callbacks = Vec::new();
        let options = child_object(config, "options")?;

        let tooltip_spec = spec.clone();
        let label: Callback = Closure::wrap(Box::new(move |context: JsValue| {
            let dataset = Reflect::get(&context, &JsValue::from_str("dataset"))
                .unwrap_or(JsValue::UNDEFINED);
            let raw = Reflect::get(&context, &JsValue::from_str("raw"))
                .ok()
                .and_then(|v| v.as_f64())
                .unwrap_or(f64::NAN);
            let text = tooltip_spec.tooltip_text(
                &string_field(&dataset, "label"),
                &string_field(&context, "label"),
                raw,
            );
            JsValue::from_str(&text)
        }) as Box<dyn FnMut(JsValue) -> JsValue>);

        let plugins = child_object(&options, "plugins")?;
        let tooltip = child_object(&plugins, "tooltip")?;
        let tooltip_callbacks = child_object(&tooltip, "callbacks")?;
        Reflect::set(&tooltip_callbacks, &JsValue::from_str("label"), label.as_ref())?;
        callbacks.push(label);

        if spec.ticks.is_some() {
            let tick_spec = spec.clone();
            let tick: Callback = Closure::wrap(Box::new(move |value: JsValue| {
                let text = value
                    .as_f64()
                    .and_then(|v| tick_spec.tick_text(v))
                    .unwrap_or_default();
                JsValue::from_str(&text)
            }) as Box<dyn FnMut(JsValue) -> JsValue>);

            let scales = child_object(&options, "scales")?;
            let y = child_object(&scales, "y")?;
            let ticks = child_object(&y, "ticks")?;
            Reflect::set(&ticks, &JsValue::from_str("callback"), tick.as_ref())?;
            callbacks.push(tick);
        }

        Ok(callbacks)
    }
}

impl ChartRenderer for ChartJsRenderer {
    type Handle = ChartJsHandle;

    fn has_target(&self, target: &str) -> bool {
        self.document.get_element_by_id(target).is_some()
    }

    fn create(&mut self, target: &str, spec: &ChartSpec) -> ReportResult<ChartJsHandle> {
        let ctx = self.context(target)?;

        let serializer = serde_wasm_bindgen::Serializer::json_compatible();
        let config = spec
            .serialize(&serializer)
            .map_err(|e| ReportError::Serialization(e.to_string()))?;
        let callbacks =
            Self::attach_callbacks(&config, spec).map_err(|e| js_error("chart callbacks", e))?;

        let constructor = Reflect::get(&js_sys::global(), &JsValue::from_str("Chart"))
            .ok()
            .and_then(|c| c.dyn_into::<Function>().ok())
            .ok_or_else(|| ReportError::Render("Chart 생성자를 찾을 수 없습니다".to_string()))?;

        let instance = Reflect::construct(&constructor, &Array::of2(&ctx, &config))
            .map_err(|e| js_error("new Chart", e))?;

        Ok(ChartJsHandle {
            instance,
            _callbacks: callbacks,
        })
    }
}
