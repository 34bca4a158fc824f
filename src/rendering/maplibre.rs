//! MapLibre GL JS bindings
//!
//! Expects `maplibregl` on the page. Only the handful of calls the point map
//! needs are bound.

use crate::{
    core::{config::MapConfig, geo::LatLng, geo::Point, map::MapClient, view::MapView},
    data::feature::Feature,
    input::events::{ClickEvent, EventKind, MapEvent},
    layers::base::LayerTrait,
    prelude::HashMap,
    rendering::surface::MapSurface,
    tiles::source::TileSource,
    traits::StyleSpec,
    ui::{cursor::Cursor, popup::Popup},
    MapError, Result,
};
use js_sys::{Array, Reflect, JSON};
use std::{cell::RefCell, rc::Rc};
use wasm_bindgen::prelude::*;

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = maplibregl, js_name = Map)]
    #[derive(Clone, Debug)]
    pub type JsMap;

    #[wasm_bindgen(constructor, js_namespace = maplibregl, js_class = "Map")]
    fn new(options: &JsValue) -> JsMap;

    #[wasm_bindgen(method, catch, js_name = addSource)]
    fn add_source(this: &JsMap, id: &str, spec: &JsValue) -> std::result::Result<(), JsValue>;

    #[wasm_bindgen(method, catch, js_name = addLayer)]
    fn add_layer(this: &JsMap, spec: &JsValue) -> std::result::Result<(), JsValue>;

    #[wasm_bindgen(method, js_name = on)]
    fn on(this: &JsMap, event: &str, handler: &Closure<dyn FnMut(JsValue)>);

    #[wasm_bindgen(method, js_name = on)]
    fn on_layer(this: &JsMap, event: &str, layer_id: &str, handler: &Closure<dyn FnMut(JsValue)>);

    #[wasm_bindgen(method, js_name = getCanvas)]
    fn get_canvas(this: &JsMap) -> web_sys::HtmlCanvasElement;

    #[wasm_bindgen(js_namespace = maplibregl, js_name = Popup)]
    #[derive(Clone, Debug)]
    pub type JsPopup;

    #[wasm_bindgen(constructor, js_namespace = maplibregl, js_class = "Popup")]
    fn new() -> JsPopup;

    #[wasm_bindgen(method, js_name = setLngLat)]
    fn set_lng_lat(this: &JsPopup, lng_lat: &JsValue) -> JsPopup;

    #[wasm_bindgen(method, js_name = setHTML)]
    fn set_html(this: &JsPopup, html: &str) -> JsPopup;

    #[wasm_bindgen(method, js_name = addTo)]
    fn add_to(this: &JsPopup, map: &JsMap) -> JsPopup;

    #[wasm_bindgen(method)]
    fn remove(this: &JsPopup);
}

/// [`MapSurface`] backed by a live `maplibregl.Map`
#[derive(Debug, Default)]
pub struct MapLibreSurface {
    map: Option<JsMap>,
    popup: Option<JsPopup>,
}

impl MapLibreSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// The underlying map, once the view exists
    pub fn map(&self) -> Option<&JsMap> {
        self.map.as_ref()
    }

    fn live_map(&self) -> Result<&JsMap> {
        self.map
            .as_ref()
            .ok_or_else(|| MapError::Surface("map view not created".to_string()))
    }
}

impl MapSurface for MapLibreSurface {
    fn create_view(&mut self, view: &MapView) -> Result<()> {
        let options = to_js(&view.to_spec())?;
        self.map = Some(JsMap::new(&options));
        Ok(())
    }

    fn add_source(&mut self, source: &dyn TileSource) -> Result<()> {
        let spec = to_js(&source.to_spec())?;
        self.live_map()?
            .add_source(source.id(), &spec)
            .map_err(js_error)
    }

    fn add_layer(&mut self, layer: &dyn LayerTrait) -> Result<()> {
        let spec = to_js(&layer.to_spec())?;
        self.live_map()?.add_layer(&spec).map_err(js_error)
    }

    fn show_popup(&mut self, popup: &Popup) -> Result<()> {
        let map = self.live_map()?.clone();
        if let Some(previous) = self.popup.take() {
            previous.remove();
        }

        let lng_lat = to_js(&serde_json::json!(popup.position.to_lng_lat_array()))?;
        let shown = JsPopup::new()
            .set_lng_lat(&lng_lat)
            .set_html(&popup.html)
            .add_to(&map);
        self.popup = Some(shown);
        Ok(())
    }

    fn set_cursor(&mut self, cursor: Cursor) -> Result<()> {
        self.live_map()?
            .get_canvas()
            .style()
            .set_property("cursor", cursor.as_css())
            .map_err(js_error)
    }
}

fn to_js(value: &serde_json::Value) -> Result<JsValue> {
    JSON::parse(&value.to_string()).map_err(js_error)
}

fn js_error(err: JsValue) -> MapError {
    MapError::Surface(err.as_string().unwrap_or_else(|| format!("{:?}", err)))
}

fn get(target: &JsValue, key: &str) -> JsValue {
    Reflect::get(target, &JsValue::from_str(key)).unwrap_or(JsValue::UNDEFINED)
}

fn get_f64(target: &JsValue, key: &str) -> f64 {
    get(target, key).as_f64().unwrap_or_default()
}

/// Reads `lngLat`, `point` and `features` off a MapLibre mouse event
fn click_event(e: &JsValue) -> ClickEvent {
    let lng_lat = get(e, "lngLat");
    let point = get(e, "point");

    let features = get(e, "features");
    let features = if Array::is_array(&features) {
        Array::from(&features).iter().map(|f| feature(&f)).collect()
    } else {
        Vec::new()
    };

    ClickEvent::new(
        LatLng::new(get_f64(&lng_lat, "lat"), get_f64(&lng_lat, "lng")),
        features,
    )
    .at_point(Point::new(get_f64(&point, "x"), get_f64(&point, "y")))
}

fn feature(value: &JsValue) -> Feature {
    // Only the plain properties object is serialized; the feature itself
    // carries cyclic references back into the map.
    let properties = JSON::stringify(&get(value, "properties"))
        .ok()
        .and_then(|s| s.as_string())
        .and_then(|s| serde_json::from_str::<HashMap<String, serde_json::Value>>(&s).ok())
        .unwrap_or_default();

    let id = get(value, "id");
    let mut feature = Feature::new(properties);
    feature.id = if let Some(n) = id.as_f64() {
        serde_json::Number::from_f64(n).map(serde_json::Value::Number)
    } else {
        id.as_string().map(serde_json::Value::String)
    };
    feature
}

type SharedClient = Rc<RefCell<MapClient<MapLibreSurface>>>;

fn listen<F>(map: &JsMap, kind: EventKind, layer_id: Option<&str>, client: &SharedClient, to_event: F)
where
    F: Fn(&JsValue) -> MapEvent + 'static,
{
    let client = Rc::clone(client);
    let handler = Closure::wrap(Box::new(move |e: JsValue| {
        let event = to_event(&e);
        match client.try_borrow_mut() {
            Ok(mut client) => {
                if let Err(err) = client.handle_event(event) {
                    log::error!("{} handler failed: {}", kind, err);
                }
            }
            Err(_) => log::warn!("dropped re-entrant {} event", kind),
        }
    }) as Box<dyn FnMut(JsValue)>);

    match layer_id {
        Some(layer_id) => map.on_layer(kind.as_str(), layer_id, &handler),
        None => map.on(kind.as_str(), &handler),
    }
    // Listeners live as long as the page
    handler.forget();
}

struct ConsoleLogger;

impl log::Log for ConsoleLogger {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &log::Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let line = JsValue::from_str(&format!("[{}] {}", record.target(), record.args()));
        match record.level() {
            log::Level::Error => web_sys::console::error_1(&line),
            log::Level::Warn => web_sys::console::warn_1(&line),
            log::Level::Info => web_sys::console::info_1(&line),
            _ => web_sys::console::debug_1(&line),
        }
    }

    fn flush(&self) {}
}

static LOGGER: ConsoleLogger = ConsoleLogger;

/// Browser entry point: create the map and wire its events.
///
/// `config_json` is a [`MapConfig`] as JSON; the defaults are used when it
/// is absent.
#[wasm_bindgen]
pub fn start(config_json: Option<String>) -> std::result::Result<(), JsValue> {
    console_error_panic_hook::set_once();
    if log::set_logger(&LOGGER).is_ok() {
        log::set_max_level(log::LevelFilter::Info);
    }

    let config = match config_json {
        Some(json) => MapConfig::from_json_str(&json),
        None => Ok(MapConfig::default()),
    }
    .map_err(|e| JsValue::from_str(&e.to_string()))?;

    let layer_id = config.layer.id.clone();
    let client = MapClient::initialize(config, MapLibreSurface::new())
        .map_err(|e| JsValue::from_str(&e.to_string()))?;
    let map = client
        .surface()
        .map()
        .cloned()
        .ok_or_else(|| JsValue::from_str("map view not created"))?;
    let client: SharedClient = Rc::new(RefCell::new(client));

    listen(&map, EventKind::Load, None, &client, |_| MapEvent::Load);

    let id = layer_id.clone();
    listen(&map, EventKind::Click, Some(&layer_id), &client, move |e| MapEvent::Click {
        layer_id: id.clone(),
        event: click_event(e),
    });

    let id = layer_id.clone();
    listen(&map, EventKind::MouseEnter, Some(&layer_id), &client, move |_| {
        MapEvent::MouseEnter { layer_id: id.clone() }
    });

    let id = layer_id.clone();
    listen(&map, EventKind::MouseLeave, Some(&layer_id), &client, move |_| {
        MapEvent::MouseLeave { layer_id: id.clone() }
    });

    Ok(())
}
