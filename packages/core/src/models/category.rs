//! Category model and quiz category constraint

use serde::{Deserialize, Serialize};

/// Category identifier. Category linkage is numeric everywhere.
pub type CategoryId = i64;

/// A flat, read-only category
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,

    /// Display name, e.g. "Science"
    #[serde(rename = "type")]
    pub kind: String,
}

/// Category constraint for quiz selection.
///
/// The wildcard is encoded as id `0` by clients, so `QuizCategory::from_id(0)`
/// yields [`QuizCategory::Any`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QuizCategory {
    /// Draw from every category
    Any,
    /// Draw only from this category
    Only(CategoryId),
}

impl QuizCategory {
    /// Reserved id meaning "any category"
    pub const WILDCARD_ID: CategoryId = 0;

    pub fn from_id(id: CategoryId) -> Self {
        if id == Self::WILDCARD_ID {
            Self::Any
        } else {
            Self::Only(id)
        }
    }

    /// Whether a question in `category` satisfies this constraint
    pub fn admits(&self, category: CategoryId) -> bool {
        match self {
            Self::Any => true,
            Self::Only(id) => *id == category,
        }
    }
}
