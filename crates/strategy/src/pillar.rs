use serde::{Deserialize, Serialize};

use stratboard_core::PillarId;

/// Thematic grouping of KPIs under the strategic plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pillar {
    pub id: PillarId,
    pub name: String,
    pub code: String,
    /// Display color (hex string, e.g. `#1f77b4`).
    pub color: String,
    pub weight: f64,
    pub order_index: i32,
    pub description: Option<String>,
}

impl Pillar {
    pub fn new(name: impl Into<String>, code: impl Into<String>, order_index: i32) -> Self {
        Self {
            id: PillarId::new(),
            name: name.into(),
            code: code.into(),
            color: "#6b7280".to_string(),
            weight: 1.0,
            order_index,
            description: None,
        }
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = color.into();
        self
    }

    pub fn with_weight(mut self, weight: f64) -> Self {
        self.weight = weight;
        self
    }
}
