//! User node model.
//!
//! # Responsibility
//! - Define the node record received from `GET /api/graph`.
//! - Carry the view-only grid position assigned by the layout pass.
//!
//! # Invariants
//! - `id` is stable across refetches and is the only identity of a node.
//! - `position` is never read from the wire and never takes part in equality.
//! - `data.hobbies` holds no duplicates after a hobby merge.

use serde::{Deserialize, Deserializer, Serialize};

/// Opaque node identifier assigned by the remote graph store.
pub type UserId = String;

/// 2-D coordinate in flow space (the space node positions and sizes live in).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub const ORIGIN: Position = Position { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Visual node template picked by the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeTier {
    /// Popularity score at or below the high-score threshold.
    Low,
    /// Popularity score above the high-score threshold.
    High,
    /// Only assigned by the remote store.
    VeryHigh,
}

impl NodeTier {
    /// Scores strictly above this value render as `High`.
    pub const HIGH_SCORE_THRESHOLD: f64 = 5.0;

    pub fn from_score(score: f64) -> Self {
        if score > Self::HIGH_SCORE_THRESHOLD {
            Self::High
        } else {
            Self::Low
        }
    }

    /// Maps a wire `type` value back to a tier.
    pub fn from_template_name(name: &str) -> Option<Self> {
        match name {
            "LowScoreNode" => Some(Self::Low),
            "HighScoreNode" => Some(Self::High),
            "VeryHighScoreNode" => Some(Self::VeryHigh),
            _ => None,
        }
    }

    pub fn template_name(self) -> &'static str {
        match self {
            Self::Low => "LowScoreNode",
            Self::High => "HighScoreNode",
            Self::VeryHigh => "VeryHighScoreNode",
        }
    }
}

/// Domain attributes of one user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserData {
    /// Display name (`username` on write paths).
    pub label: String,
    pub age: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub hobbies: Vec<String>,
    /// Derived by the remote store; read-only for clients.
    #[serde(default, deserialize_with = "null_as_default")]
    pub popularity_score: f64,
    /// Server timestamp, kept opaque.
    #[serde(default, deserialize_with = "null_as_default")]
    pub created_at: String,
}

impl UserData {
    pub fn new(label: impl Into<String>, age: u32, hobbies: Vec<String>) -> Self {
        Self {
            label: label.into(),
            age,
            hobbies,
            popularity_score: 0.0,
            created_at: String::new(),
        }
    }
}

// Server-owned fields may arrive as `null`.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// One rendered user node.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserNode {
    pub id: UserId,
    /// Server-chosen node template name, if any.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub node_type: Option<String>,
    pub data: UserData,
    /// Grid slot assigned by `view::layout`. Wire positions are discarded.
    #[serde(skip_deserializing, default)]
    pub position: Position,
}

impl UserNode {
    pub fn new(id: impl Into<UserId>, data: UserData) -> Self {
        Self {
            id: id.into(),
            node_type: None,
            data,
            position: Position::ORIGIN,
        }
    }

    /// Returns a copy placed at `position`.
    pub fn with_position(mut self, position: Position) -> Self {
        self.position = position;
        self
    }

    /// Server `type` wins; otherwise the tier follows the popularity score.
    pub fn tier(&self) -> NodeTier {
        self.node_type
            .as_deref()
            .and_then(NodeTier::from_template_name)
            .unwrap_or_else(|| NodeTier::from_score(self.data.popularity_score))
    }
}

impl PartialEq for UserNode {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id && self.node_type == other.node_type && self.data == other.data
    }
}

#[cfg(test)]
mod tests {
    use super::{NodeTier, Position, UserData, UserNode};

    fn node(score: f64) -> UserNode {
        let mut data = UserData::new("ada", 30, vec!["chess".to_string()]);
        data.popularity_score = score;
        UserNode::new("u1", data)
    }

    #[test]
    fn equality_ignores_position() {
        let a = node(1.0);
        let b = node(1.0).with_position(Position::new(250.0, 150.0));
        assert_eq!(a, b);
    }

    #[test]
    fn tier_follows_score_threshold() {
        assert_eq!(node(5.0).tier(), NodeTier::Low);
        assert_eq!(node(5.5).tier(), NodeTier::High);
    }

    #[test]
    fn server_type_overrides_score_tier() {
        let mut user = node(0.0);
        user.node_type = Some("VeryHighScoreNode".to_string());
        assert_eq!(user.tier(), NodeTier::VeryHigh);

        user.node_type = Some("custom".to_string());
        assert_eq!(user.tier(), NodeTier::Low);
    }

    #[test]
    fn deserialize_discards_wire_position() {
        let value = serde_json::json!({
            "id": "u9",
            "type": "HighScoreNode",
            "position": { "x": 999.0, "y": -3.0 },
            "data": {
                "label": "Grace",
                "age": 41,
                "hobbies": ["go"],
                "popularityScore": 7.5,
                "createdAt": "2025-01-01T00:00:00.000Z"
            }
        });

        let user: UserNode = serde_json::from_value(value).unwrap();
        assert_eq!(user.position, Position::ORIGIN);
        assert_eq!(user.data.label, "Grace");
        assert_eq!(user.data.popularity_score, 7.5);
        assert_eq!(user.tier(), NodeTier::High);
    }

    #[test]
    fn null_server_fields_fall_back_to_defaults() {
        let value = serde_json::json!({
            "id": "u3",
            "data": {
                "label": "Linus",
                "age": 28,
                "hobbies": null,
                "popularityScore": null,
                "createdAt": null
            }
        });

        let user: UserNode = serde_json::from_value(value).unwrap();
        assert!(user.data.hobbies.is_empty());
        assert_eq!(user.data.popularity_score, 0.0);
        assert_eq!(user.data.created_at, "");
        assert_eq!(user.tier(), NodeTier::Low);
    }
}
