use crate::{
    core::{config::MapConfig, view::MapView},
    input::{
        events::{ClickEvent, EventKind, MapEvent},
        handler::{listeners, Action, EventManager},
    },
    layers::{base::LayerTrait, circle::CircleLayer, manager::LayerManager},
    rendering::surface::MapSurface,
    tiles::{
        registry::SourceRegistry,
        source::{TileSource, VectorTileSource},
    },
    traits::StyleSpec,
    ui::{
        cursor::Cursor,
        popup::{Popup, PopupManager},
    },
    MapError, Result,
};

/// Lifecycle of a map client
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadState {
    /// View created, style still loading
    #[default]
    NotLoaded,
    /// Source and layer registered
    Loaded,
}

/// Client for the point map.
///
/// Owns the declarative state (sources, layers, listeners) and pushes it to
/// a [`MapSurface`]. Events from the surface come back in through
/// [`MapClient::handle_event`].
pub struct MapClient<S: MapSurface> {
    config: MapConfig,
    view: MapView,
    surface: S,
    sources: SourceRegistry,
    layers: LayerManager,
    events: EventManager,
    popups: PopupManager,
    cursor: Cursor,
    state: LoadState,
}

impl<S: MapSurface> MapClient<S> {
    /// Create the map view on `surface` and wire the point layer's
    /// listeners. Nothing is registered until [`MapClient::on_load`].
    pub fn initialize(config: MapConfig, mut surface: S) -> Result<Self> {
        config.validate()?;

        let view = MapView::from_config(&config);
        surface.create_view(&view)?;
        log::info!(
            "created map in '{}' at {:?}, zoom {}",
            view.container,
            view.center,
            view.zoom
        );

        let mut events = EventManager::new();
        let layer_id = config.layer.id.as_str();
        events.on_layer(EventKind::Click, layer_id, listeners::feature_click);
        events.on_layer(EventKind::MouseEnter, layer_id, listeners::hover_enter);
        events.on_layer(EventKind::MouseLeave, layer_id, listeners::hover_leave);

        Ok(Self {
            config,
            view,
            surface,
            sources: SourceRegistry::new(),
            layers: LayerManager::new(),
            events,
            popups: PopupManager::new(),
            cursor: Cursor::Default,
            state: LoadState::NotLoaded,
        })
    }

    /// Register the point source, then the circle layer that reads it.
    ///
    /// Runs once; a second call fails with [`MapError::AlreadyLoaded`] and
    /// leaves the map unchanged. After a failed attempt it can be called
    /// again; a source that already made it through is not re-added.
    pub fn on_load(&mut self) -> Result<()> {
        if self.state == LoadState::Loaded {
            return Err(MapError::AlreadyLoaded);
        }

        let source = VectorTileSource::from_config(&self.config.source)?;
        let layer = CircleLayer::from_config(&self.config.layer, &self.config.source.id)?;

        // A load that failed at the layer step left the source on both sides
        let source_done = self
            .sources
            .get(source.id())
            .map_or(false, |registered| registered.to_spec() == source.to_spec());
        if source_done {
            log::debug!("source '{}' already registered, resuming load", source.id());
        } else {
            self.register_source(Box::new(source))?;
        }
        self.register_layer(Box::new(layer))?;

        self.state = LoadState::Loaded;
        log::info!(
            "map loaded: {} source(s), {} layer(s)",
            self.sources.len(),
            self.layers.len()
        );
        Ok(())
    }

    /// Show a popup for the first feature under the click. A click with no
    /// features is a no-op.
    pub fn on_feature_click(&mut self, event: &ClickEvent) -> Result<()> {
        match Popup::for_click(event) {
            Some(popup) => self.apply(vec![Action::ShowPopup(popup)]),
            None => {
                log::trace!("click at {:?} hit no features", event.lat_lng);
                Ok(())
            }
        }
    }

    pub fn on_hover_enter(&mut self) -> Result<()> {
        self.apply(vec![Action::SetCursor(Cursor::Pointer)])
    }

    pub fn on_hover_leave(&mut self) -> Result<()> {
        self.apply(vec![Action::SetCursor(Cursor::Default)])
    }

    /// Entry point for events delivered by the surface
    pub fn handle_event(&mut self, event: MapEvent) -> Result<()> {
        if event == MapEvent::Load {
            self.on_load()?;
        }

        if let Some(layer_id) = event.layer_id() {
            if !self.layers.contains(layer_id) {
                log::debug!("ignoring {} on unregistered layer '{}'", event.kind(), layer_id);
                return Ok(());
            }
        }

        let actions = self.events.dispatch(&event);
        self.apply(actions)
    }

    /// Add another listener for events on `layer_id`
    pub fn on_layer<F>(&mut self, kind: EventKind, layer_id: &str, callback: F)
    where
        F: Fn(&MapEvent) -> Vec<Action> + Send + Sync + 'static,
    {
        self.events.on_layer(kind, layer_id, callback);
    }

    /// Add a map-wide listener
    pub fn on<F>(&mut self, kind: EventKind, callback: F)
    where
        F: Fn(&MapEvent) -> Vec<Action> + Send + Sync + 'static,
    {
        self.events.on(kind, callback);
    }

    /// Register an extra source once the style is loaded
    pub fn add_source(&mut self, source: Box<dyn TileSource>) -> Result<()> {
        self.ensure_loaded()?;
        self.register_source(source)
    }

    /// Register an extra layer once the style is loaded. Its source must
    /// already be registered.
    pub fn add_layer(&mut self, layer: Box<dyn LayerTrait>) -> Result<()> {
        self.ensure_loaded()?;
        self.register_layer(layer)
    }

    fn ensure_loaded(&self) -> Result<()> {
        match self.state {
            LoadState::Loaded => Ok(()),
            LoadState::NotLoaded => Err(MapError::NotLoaded),
        }
    }

    // Checks run before the surface sees anything, so a rejected source or
    // layer leaves both sides untouched.
    fn register_source(&mut self, source: Box<dyn TileSource>) -> Result<()> {
        self.sources.check(source.as_ref())?;
        self.surface.add_source(source.as_ref())?;
        self.sources.register(source)
    }

    fn register_layer(&mut self, layer: Box<dyn LayerTrait>) -> Result<()> {
        self.layers.check(layer.as_ref(), &self.sources)?;
        self.surface.add_layer(layer.as_ref())?;
        self.layers.add_layer(layer, &self.sources)
    }

    fn apply(&mut self, actions: Vec<Action>) -> Result<()> {
        for action in actions {
            match action {
                Action::ShowPopup(popup) => {
                    self.surface.show_popup(&popup)?;
                    self.popups.show(popup);
                }
                Action::SetCursor(cursor) => {
                    if cursor != self.cursor {
                        self.surface.set_cursor(cursor)?;
                        self.cursor = cursor;
                    }
                }
            }
        }
        Ok(())
    }

    pub fn state(&self) -> LoadState {
        self.state
    }

    pub fn is_loaded(&self) -> bool {
        self.state == LoadState::Loaded
    }

    pub fn config(&self) -> &MapConfig {
        &self.config
    }

    pub fn view(&self) -> &MapView {
        &self.view
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    /// Popup currently open, if any
    pub fn popup(&self) -> Option<&Popup> {
        self.popups.current()
    }

    pub fn popups(&self) -> &PopupManager {
        &self.popups
    }

    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    pub fn sources(&self) -> &SourceRegistry {
        &self.sources
    }

    pub fn layers(&self) -> &LayerManager {
        &self.layers
    }

    pub fn into_surface(self) -> S {
        self.surface
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        core::geo::LatLng,
        data::feature::Feature,
        rendering::surface::{RecordingSurface, SurfaceCall},
    };

    fn client() -> MapClient<RecordingSurface> {
        MapClient::initialize(MapConfig::default(), RecordingSurface::new()).unwrap()
    }

    fn loaded_client() -> MapClient<RecordingSurface> {
        let mut client = client();
        client.on_load().unwrap();
        client
    }

    /// Surface that refuses the first `failures` layers
    struct NoLayers {
        inner: RecordingSurface,
        failures: usize,
    }

    impl NoLayers {
        fn failing(failures: usize) -> Self {
            Self {
                inner: RecordingSurface::new(),
                failures,
            }
        }
    }

    impl MapSurface for NoLayers {
        fn create_view(&mut self, view: &MapView) -> Result<()> {
            self.inner.create_view(view)
        }
        fn add_source(&mut self, source: &dyn TileSource) -> Result<()> {
            self.inner.add_source(source)
        }
        fn add_layer(&mut self, layer: &dyn LayerTrait) -> Result<()> {
            if self.failures > 0 {
                self.failures -= 1;
                return Err(MapError::Surface("layers disabled".to_string()));
            }
            self.inner.add_layer(layer)
        }
        fn show_popup(&mut self, popup: &Popup) -> Result<()> {
            self.inner.show_popup(popup)
        }
        fn set_cursor(&mut self, cursor: Cursor) -> Result<()> {
            self.inner.set_cursor(cursor)
        }
    }

    #[test]
    fn test_initialize_creates_view_only() {
        let client = client();
        assert_eq!(client.state(), LoadState::NotLoaded);
        assert_eq!(client.surface().calls().len(), 1);
        assert!(matches!(client.surface().calls()[0], SurfaceCall::CreateView(_)));
        assert!(client.sources().is_empty());
        assert!(client.layers().is_empty());
    }

    #[test]
    fn test_initialize_rejects_invalid_config() {
        let config = MapConfig {
            container: String::new(),
            ..Default::default()
        };
        let result = MapClient::initialize(config, RecordingSurface::new());
        assert!(matches!(result, Err(MapError::InvalidConfig(_))));
    }

    #[test]
    fn test_on_load_registers_source_then_layer() {
        let client = loaded_client();
        let calls = client.surface().calls();

        assert_eq!(calls.len(), 3);
        assert!(matches!(&calls[1], SurfaceCall::AddSource { id, .. } if id == "points"));
        assert!(matches!(&calls[2], SurfaceCall::AddLayer { id, .. } if id == "points-layer"));
        assert!(client.is_loaded());
    }

    #[test]
    fn test_second_load_is_rejected() {
        let mut client = loaded_client();
        assert!(matches!(client.on_load(), Err(MapError::AlreadyLoaded)));
        assert_eq!(client.surface().calls().len(), 3);
        assert_eq!(client.sources().len(), 1);
    }

    #[test]
    fn test_surface_failure_leaves_map_unloaded() {
        let mut client = MapClient::initialize(MapConfig::default(), NoLayers::failing(usize::MAX)).unwrap();
        assert!(matches!(client.on_load(), Err(MapError::Surface(_))));
        assert_eq!(client.state(), LoadState::NotLoaded);
        assert!(client.layers().is_empty());
    }

    #[test]
    fn test_load_resumes_after_layer_failure() {
        let mut client = MapClient::initialize(MapConfig::default(), NoLayers::failing(1)).unwrap();
        assert!(matches!(client.on_load(), Err(MapError::Surface(_))));
        assert_eq!(client.sources().len(), 1);

        client.on_load().unwrap();
        assert!(client.is_loaded());
        assert_eq!(client.sources().len(), 1);
        assert_eq!(client.layers().len(), 1);

        let calls = client.surface().inner.calls();
        let source_calls = calls
            .iter()
            .filter(|c| matches!(c, SurfaceCall::AddSource { .. }))
            .count();
        assert_eq!(source_calls, 1);
        assert!(matches!(calls.last(), Some(SurfaceCall::AddLayer { .. })));
    }

    #[test]
    fn test_changed_source_is_not_reused() {
        let mut client = MapClient::initialize(MapConfig::default(), NoLayers::failing(1)).unwrap();
        assert!(client.on_load().is_err());

        client.config.source.max_zoom = 10;
        assert!(matches!(client.on_load(), Err(MapError::DuplicateSource(_))));
        assert!(!client.is_loaded());
    }

    #[test]
    fn test_add_layer_requires_load() {
        let mut client = client();
        let layer = CircleLayer::from_config(&Default::default(), "points").unwrap();
        assert!(matches!(
            client.add_layer(Box::new(layer)),
            Err(MapError::NotLoaded)
        ));
    }

    #[test]
    fn test_add_layer_on_unknown_source_fails_fast() {
        let mut client = loaded_client();
        let config = crate::core::config::PointLayerConfig {
            id: "other".to_string(),
            ..Default::default()
        };
        let layer = CircleLayer::from_config(&config, "missing").unwrap();

        assert!(matches!(
            client.add_layer(Box::new(layer)),
            Err(MapError::UnknownSource { .. })
        ));
        assert_eq!(client.surface().calls().len(), 3);
    }

    #[test]
    fn test_click_replaces_popup() {
        let mut client = loaded_client();
        let at = LatLng::new(10.0, 20.0);

        let first = ClickEvent::new(at, vec![Feature::default().with_property("id", "1")]);
        let second = ClickEvent::new(at, vec![Feature::default().with_property("id", "2")]);
        client.on_feature_click(&first).unwrap();
        client.on_feature_click(&second).unwrap();

        assert_eq!(client.surface().popups().len(), 2);
        assert!(client.popup().map_or(false, |p| p.html.contains("<strong>ID:</strong> 2")));
    }

    #[test]
    fn test_click_without_features_is_noop() {
        let mut client = loaded_client();
        client
            .on_feature_click(&ClickEvent::new(LatLng::default(), vec![]))
            .unwrap();
        assert!(client.popup().is_none());
        assert!(client.surface().popups().is_empty());
    }

    #[test]
    fn test_hover_sets_cursor_once() {
        let mut client = loaded_client();
        client.on_hover_enter().unwrap();
        client.on_hover_enter().unwrap();
        assert_eq!(client.cursor(), Cursor::Pointer);

        client.on_hover_leave().unwrap();
        assert_eq!(client.cursor(), Cursor::Default);
        assert_eq!(client.surface().cursor(), Cursor::Default);

        let cursor_calls = client
            .surface()
            .calls()
            .iter()
            .filter(|c| matches!(c, SurfaceCall::SetCursor(_)))
            .count();
        assert_eq!(cursor_calls, 2);
    }

    #[test]
    fn test_events_before_load_are_ignored() {
        let mut client = client();
        client
            .handle_event(MapEvent::MouseEnter {
                layer_id: "points-layer".to_string(),
            })
            .unwrap();
        assert_eq!(client.cursor(), Cursor::Default);
    }

    #[test]
    fn test_handle_event_routes_to_listeners() {
        let mut client = client();
        client.handle_event(MapEvent::Load).unwrap();
        assert!(client.is_loaded());

        client
            .handle_event(MapEvent::MouseEnter {
                layer_id: "points-layer".to_string(),
            })
            .unwrap();
        assert_eq!(client.cursor(), Cursor::Pointer);

        client
            .handle_event(MapEvent::MouseLeave {
                layer_id: "roads".to_string(),
            })
            .unwrap();
        assert_eq!(client.cursor(), Cursor::Pointer);
    }

    #[test]
    fn test_custom_layer_listener() {
        let mut client = loaded_client();
        client.on_layer(EventKind::MouseLeave, "points-layer", |_| {
            vec![Action::SetCursor(Cursor::Pointer)]
        });

        client.on_hover_enter().unwrap();
        client
            .handle_event(MapEvent::MouseLeave {
                layer_id: "points-layer".to_string(),
            })
            .unwrap();
        // built-in listener resets, the custom one runs after it
        assert_eq!(client.cursor(), Cursor::Pointer);
    }
}
