use crate::core::geo::{LatLng, Point};
use crate::data::feature::Feature;
use serde::{Deserialize, Serialize};

/// Event kinds a listener can subscribe to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventKind {
    Load,
    Click,
    MouseEnter,
    MouseLeave,
}

impl EventKind {
    /// Name used by the rendering library
    pub fn as_str(&self) -> &'static str {
        match self {
            EventKind::Load => "load",
            EventKind::Click => "click",
            EventKind::MouseEnter => "mouseenter",
            EventKind::MouseLeave => "mouseleave",
        }
    }
}

impl std::fmt::Display for EventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Pointer click on a layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClickEvent {
    /// Geographic position of the click
    pub lat_lng: LatLng,
    /// Screen position of the click
    pub point: Point,
    /// Features under the pointer, topmost first
    pub features: Vec<Feature>,
}

impl ClickEvent {
    pub fn new(lat_lng: LatLng, features: Vec<Feature>) -> Self {
        Self {
            lat_lng,
            point: Point::default(),
            features,
        }
    }

    pub fn at_point(mut self, point: Point) -> Self {
        self.point = point;
        self
    }

    pub fn first_feature(&self) -> Option<&Feature> {
        self.features.first()
    }
}

/// Events the rendering library delivers to the client
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum MapEvent {
    /// Style and assets resolved; fired once
    Load,
    /// Click on a layer
    Click { layer_id: String, event: ClickEvent },
    /// Pointer entered a feature of a layer
    MouseEnter { layer_id: String },
    /// Pointer left a feature of a layer
    MouseLeave { layer_id: String },
}

impl MapEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            MapEvent::Load => EventKind::Load,
            MapEvent::Click { .. } => EventKind::Click,
            MapEvent::MouseEnter { .. } => EventKind::MouseEnter,
            MapEvent::MouseLeave { .. } => EventKind::MouseLeave,
        }
    }

    /// Layer the event is scoped to, if any
    pub fn layer_id(&self) -> Option<&str> {
        match self {
            MapEvent::Load => None,
            MapEvent::Click { layer_id, .. }
            | MapEvent::MouseEnter { layer_id }
            | MapEvent::MouseLeave { layer_id } => Some(layer_id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_kind_names() {
        assert_eq!(EventKind::Load.to_string(), "load");
        assert_eq!(EventKind::Click.to_string(), "click");
        assert_eq!(EventKind::MouseEnter.to_string(), "mouseenter");
        assert_eq!(EventKind::MouseLeave.to_string(), "mouseleave");
    }

    #[test]
    fn test_event_scope() {
        let click = MapEvent::Click {
            layer_id: "points-layer".to_string(),
            event: ClickEvent::new(LatLng::new(1.0, 2.0), vec![]),
        };
        assert_eq!(click.kind(), EventKind::Click);
        assert_eq!(click.layer_id(), Some("points-layer"));

        assert_eq!(MapEvent::Load.layer_id(), None);
        assert_eq!(
            MapEvent::MouseLeave {
                layer_id: "x".to_string()
            }
            .kind(),
            EventKind::MouseLeave
        );
    }

    #[test]
    fn test_first_feature() {
        let empty = ClickEvent::new(LatLng::default(), vec![]);
        assert!(empty.first_feature().is_none());

        let event = ClickEvent::new(
            LatLng::default(),
            vec![
                Feature::default().with_property("id", "top"),
                Feature::default().with_property("id", "below"),
            ],
        )
        .at_point(Point::new(10.0, 20.0));
        assert_eq!(event.first_feature().and_then(|f| f.display_id()).as_deref(), Some("top"));
        assert_eq!(event.point, Point::new(10.0, 20.0));
    }
}
