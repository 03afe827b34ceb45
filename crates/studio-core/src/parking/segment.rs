//! Street segments read from a GeoJSON `FeatureCollection`.

use serde::{Deserialize, Serialize};

use super::availability::{SegmentStyle, probability};
use crate::error::{Result, StudioError};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SegmentProperties {
    pub segment_id: String,
    pub street_name: String,
    #[serde(default)]
    pub from_cross: Option<String>,
    #[serde(default)]
    pub to_cross: Option<String>,
    #[serde(default)]
    pub side: Option<String>,
    #[serde(default)]
    pub rule_type: Option<String>,
    #[serde(default)]
    pub total_spots: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Geometry {
    /// Positions are `[lon, lat]` pairs.
    LineString { coordinates: Vec<[f64; 2]> },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SegmentFeature {
    pub properties: SegmentProperties,
    pub geometry: Geometry,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
struct FeatureCollection {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    features: Vec<serde_json::Value>,
}

impl SegmentFeature {
    /// Path as `[lat, lon]` pairs.
    pub fn lat_lngs(&self) -> Vec<[f64; 2]> {
        match &self.geometry {
            Geometry::LineString { coordinates } => {
                coordinates.iter().map(|[lon, lat]| [*lat, *lon]).collect()
            }
        }
    }

    /// Human label like `Walther (Haeberl → Tumblinger)`.
    pub fn label(&self) -> String {
        let p = &self.properties;
        match (&p.from_cross, &p.to_cross) {
            (Some(from), Some(to)) => format!("{} ({from} → {to})", p.street_name),
            _ => p.street_name.clone(),
        }
    }
}

/// Parses a GeoJSON document. Features that are not line strings are skipped.
pub fn parse_segments(json: &str) -> Result<Vec<SegmentFeature>> {
    let collection: FeatureCollection = serde_json::from_str(json)?;
    if collection.kind != "FeatureCollection" {
        return Err(StudioError::validation(format!(
            "expected a FeatureCollection, got {}",
            collection.kind
        )));
    }
    let total = collection.features.len();
    let segments: Vec<SegmentFeature> = collection
        .features
        .into_iter()
        .filter_map(|f| serde_json::from_value(f).ok())
        .collect();
    if segments.len() < total {
        tracing::debug!(skipped = total - segments.len(), "ignored non-segment features");
    }
    Ok(segments)
}

/// A segment with its forecast for one hour.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StyledSegment {
    pub segment_id: String,
    pub label: String,
    pub probability: f64,
    pub style: SegmentStyle,
    pub path: Vec<[f64; 2]>,
}

/// Styles every segment for `hour`, keeping input order.
pub fn style_segments(segments: &[SegmentFeature], hour: u8) -> Vec<StyledSegment> {
    segments
        .iter()
        .map(|segment| {
            let p = probability(&segment.properties.segment_id, hour);
            StyledSegment {
                segment_id: segment.properties.segment_id.clone(),
                label: segment.label(),
                probability: p,
                style: SegmentStyle::for_probability(p),
                path: segment.lat_lngs(),
            }
        })
        .collect()
}
