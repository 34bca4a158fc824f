use crate::{
    core::geo::LatLng,
    data::feature::{Distance, Feature},
    input::events::ClickEvent,
};

/// Transient overlay anchored at a map coordinate
#[derive(Debug, Clone, PartialEq)]
pub struct Popup {
    pub position: LatLng,
    /// HTML fragment; every interpolated value is already escaped
    pub html: String,
}

impl Popup {
    pub fn new(position: LatLng, html: String) -> Self {
        Self { position, html }
    }

    /// Popup for a click on the point layer, or `None` when nothing was hit.
    ///
    /// The content depends only on the first feature's properties and the
    /// click coordinate.
    pub fn for_click(event: &ClickEvent) -> Option<Self> {
        let feature = event.first_feature()?;
        Some(Self::new(event.lat_lng, feature_html(feature, event.lat_lng)))
    }
}

fn feature_html(feature: &Feature, at: LatLng) -> String {
    let distance = match feature.distance() {
        Distance::Meters(m) => format!("{} km", format_distance_km(m)),
        other => {
            log::warn!(
                "feature {:?} has unusable distance ({:?})",
                feature.display_id(),
                other
            );
            "n/a".to_string()
        }
    };
    let id = feature.display_id().unwrap_or_default();

    format!(
        "<strong>Distance:</strong> {}<br/>\
         <strong>ID:</strong> {}<br/>\
         <strong>Lat:</strong> {}<br/>\
         <strong>Lon:</strong> {}",
        escape_html(&distance),
        escape_html(&id),
        format_coordinate(at.lat),
        format_coordinate(at.lng),
    )
}

/// Meters to kilometers with two decimals, rounding halves up.
///
/// Works in hundredths of a kilometer (`m / 10`) so that decimal halves such
/// as 1005 m are not lost to binary representation of `1.005`.
pub fn format_distance_km(meters: f64) -> String {
    let hundredths = (meters / 10.0).round();
    if !hundredths.is_finite() || hundredths.abs() >= u64::MAX as f64 {
        return format!("{:.2}", meters / 1000.0);
    }
    let sign = if hundredths < 0.0 { "-" } else { "" };
    let hundredths = hundredths.abs() as u64;
    format!("{}{}.{:02}", sign, hundredths / 100, hundredths % 100)
}

/// Fixed-point with exactly six fractional digits
pub fn format_coordinate(degrees: f64) -> String {
    format!("{:.6}", degrees)
}

/// Escape text for interpolation into HTML
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#x27;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Holds the single live popup; showing a new one replaces it
#[derive(Debug, Default)]
pub struct PopupManager {
    current: Option<Popup>,
}

impl PopupManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Show `popup`, returning the one it replaced
    pub fn show(&mut self, popup: Popup) -> Option<Popup> {
        self.current.replace(popup)
    }

    pub fn current(&self) -> Option<&Popup> {
        self.current.as_ref()
    }
}
