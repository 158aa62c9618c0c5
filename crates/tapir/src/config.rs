//! Layout configuration.

use crate::error::Result;
use crate::geometry::{Point, point};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoutingStyle {
    /// Straight segments through the dummy-vertex waypoints.
    #[default]
    Direct,
    /// Axis-aligned segments bending halfway between layers.
    Orthogonal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Minimum horizontal distance between neighbouring vertices of a layer.
    pub horizontal_gap: f64,
    /// Distance between the bottom of a layer and the top of the next one.
    pub vertical_gap: f64,
    /// Distance between stacked nodes in vertical-stack groups.
    pub stack_gap: f64,
    /// Inset of a container's children from the container's top-left corner.
    pub container_padding: f64,
    /// Top-left corner of the laid out group.
    pub origin: Point,
    pub routing: RoutingStyle,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            horizontal_gap: 20.0,
            vertical_gap: 40.0,
            stack_gap: 10.0,
            container_padding: 10.0,
            origin: point(0.0, 0.0),
            routing: RoutingStyle::Direct,
        }
    }
}

impl LayoutConfig {
    /// Parses a JSON document; missing fields keep their defaults.
    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
