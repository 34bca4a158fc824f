//! The rendering library as seen by the client
//!
//! A surface receives style-spec objects and UI commands; it never calls back
//! into the client directly. Events travel the other way through
//! [`MapClient::handle_event`](crate::core::map::MapClient::handle_event).

use crate::{
    core::view::MapView,
    layers::base::LayerTrait,
    tiles::source::TileSource,
    traits::StyleSpec,
    ui::{cursor::Cursor, popup::Popup},
    Result,
};

pub trait MapSurface {
    /// Create the map canvas
    fn create_view(&mut self, view: &MapView) -> Result<()>;

    /// Register a data source
    fn add_source(&mut self, source: &dyn TileSource) -> Result<()>;

    /// Register a rendering layer; its source is already registered
    fn add_layer(&mut self, layer: &dyn LayerTrait) -> Result<()>;

    /// Show `popup`, replacing any popup already open
    fn show_popup(&mut self, popup: &Popup) -> Result<()>;

    /// Set the canvas cursor
    fn set_cursor(&mut self, cursor: Cursor) -> Result<()>;
}

/// One call made on a [`RecordingSurface`]
#[derive(Debug, Clone, PartialEq)]
pub enum SurfaceCall {
    CreateView(serde_json::Value),
    AddSource { id: String, spec: serde_json::Value },
    AddLayer { id: String, spec: serde_json::Value },
    ShowPopup(Popup),
    SetCursor(Cursor),
}

/// Headless surface that records every call in order
#[derive(Debug, Default)]
pub struct RecordingSurface {
    calls: Vec<SurfaceCall>,
    cursor: Cursor,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> &[SurfaceCall] {
        &self.calls
    }

    /// Current cursor style
    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    /// Popups shown so far, oldest first
    pub fn popups(&self) -> Vec<&Popup> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                SurfaceCall::ShowPopup(popup) => Some(popup),
                _ => None,
            })
            .collect()
    }

    /// Position of the first call matching `predicate`
    pub fn position_of<F>(&self, predicate: F) -> Option<usize>
    where
        F: Fn(&SurfaceCall) -> bool,
    {
        self.calls.iter().position(predicate)
    }
}

impl MapSurface for RecordingSurface {
    fn create_view(&mut self, view: &MapView) -> Result<()> {
        self.calls.push(SurfaceCall::CreateView(view.to_spec()));
        Ok(())
    }

    fn add_source(&mut self, source: &dyn TileSource) -> Result<()> {
        self.calls.push(SurfaceCall::AddSource {
            id: source.id().to_string(),
            spec: source.to_spec(),
        });
        Ok(())
    }

    fn add_layer(&mut self, layer: &dyn LayerTrait) -> Result<()> {
        self.calls.push(SurfaceCall::AddLayer {
            id: layer.id().to_string(),
            spec: layer.to_spec(),
        });
        Ok(())
    }

    fn show_popup(&mut self, popup: &Popup) -> Result<()> {
        self.calls.push(SurfaceCall::ShowPopup(popup.clone()));
        Ok(())
    }

    fn set_cursor(&mut self, cursor: Cursor) -> Result<()> {
        self.cursor = cursor;
        self.calls.push(SurfaceCall::SetCursor(cursor));
        Ok(())
    }
}
