use crate::{
    input::events::{EventKind, MapEvent},
    prelude::HashMap,
    ui::{cursor::Cursor, popup::Popup},
};

/// What a listener asks the map to do
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    ShowPopup(Popup),
    SetCursor(Cursor),
}

/// Event listener callback type. Listeners hold no state of their own; they
/// turn an event into actions.
pub type EventCallback = Box<dyn Fn(&MapEvent) -> Vec<Action> + Send + Sync>;

/// (event kind, layer) a listener is bound to; `None` means map-wide
type ListenerKey = (EventKind, Option<String>);

/// Event management system for the map
#[derive(Default)]
pub struct EventManager {
    /// Event listeners by kind and layer
    listeners: HashMap<ListenerKey, Vec<EventCallback>>,
}

impl EventManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a map-wide listener
    pub fn on<F>(&mut self, kind: EventKind, callback: F)
    where
        F: Fn(&MapEvent) -> Vec<Action> + Send + Sync + 'static,
    {
        self.listeners
            .entry((kind, None))
            .or_default()
            .push(Box::new(callback));
    }

    /// Register a listener for events on one layer
    pub fn on_layer<F>(&mut self, kind: EventKind, layer_id: &str, callback: F)
    where
        F: Fn(&MapEvent) -> Vec<Action> + Send + Sync + 'static,
    {
        self.listeners
            .entry((kind, Some(layer_id.to_string())))
            .or_default()
            .push(Box::new(callback));
    }

    /// Run every listener matching the event; map-wide listeners first,
    /// then those bound to the event's layer.
    pub fn dispatch(&self, event: &MapEvent) -> Vec<Action> {
        let kind = event.kind();
        let mut actions = Vec::new();

        let mut keys = vec![(kind, None)];
        if let Some(layer_id) = event.layer_id() {
            keys.push((kind, Some(layer_id.to_string())));
        }

        for key in &keys {
            if let Some(callbacks) = self.listeners.get(key) {
                for callback in callbacks {
                    actions.extend(callback(event));
                }
            }
        }

        actions
    }
}

/// Listeners the point layer is wired with
pub mod listeners {
    use super::Action;
    use crate::{
        input::events::MapEvent,
        ui::{cursor::Cursor, popup::Popup},
    };

    /// Click: popup for the first feature, nothing when no feature was hit
    pub fn feature_click(event: &MapEvent) -> Vec<Action> {
        match event {
            MapEvent::Click { event, .. } => Popup::for_click(event)
                .map(Action::ShowPopup)
                .into_iter()
                .collect(),
            _ => Vec::new(),
        }
    }

    pub fn hover_enter(_event: &MapEvent) -> Vec<Action> {
        vec![Action::SetCursor(Cursor::Pointer)]
    }

    pub fn hover_leave(_event: &MapEvent) -> Vec<Action> {
        vec![Action::SetCursor(Cursor::Default)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{core::geo::LatLng, data::feature::Feature, input::events::ClickEvent};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn click(layer_id: &str, features: Vec<Feature>) -> MapEvent {
        MapEvent::Click {
            layer_id: layer_id.to_string(),
            event: ClickEvent::new(LatLng::new(51.5, -0.13), features),
        }
    }

    #[test]
    fn test_layer_scoped_dispatch() {
        let mut events = EventManager::new();
        events.on_layer(EventKind::MouseEnter, "points-layer", listeners::hover_enter);

        let on_layer = events.dispatch(&MapEvent::MouseEnter {
            layer_id: "points-layer".to_string(),
        });
        assert_eq!(on_layer, vec![Action::SetCursor(Cursor::Pointer)]);

        let elsewhere = events.dispatch(&MapEvent::MouseEnter {
            layer_id: "roads".to_string(),
        });
        assert!(elsewhere.is_empty());
    }

    #[test]
    fn test_map_wide_listener_sees_all_layers() {
        let seen = Arc::new(AtomicUsize::new(0));
        let counter = seen.clone();

        let mut events = EventManager::new();
        events.on(EventKind::Click, move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
            Vec::new()
        });

        events.dispatch(&click("a", vec![]));
        events.dispatch(&click("b", vec![]));
        events.dispatch(&MapEvent::Load);
        assert_eq!(seen.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_feature_click_listener() {
        assert!(listeners::feature_click(&click("points-layer", vec![])).is_empty());

        let feature = Feature::default()
            .with_property("id", "42")
            .with_property("dist_m", 1234);
        let actions = listeners::feature_click(&click("points-layer", vec![feature]));
        match actions.as_slice() {
            [Action::ShowPopup(popup)] => assert!(popup.html.contains("1.23 km")),
            other => panic!("unexpected actions {:?}", other),
        }
    }

    #[test]
    fn test_hover_listeners() {
        let event = MapEvent::MouseLeave {
            layer_id: "points-layer".to_string(),
        };
        assert_eq!(listeners::hover_leave(&event), vec![Action::SetCursor(Cursor::Default)]);
        assert_eq!(listeners::hover_enter(&event), vec![Action::SetCursor(Cursor::Pointer)]);
    }
}
