use crate::EditorError;

use animation_document::consts::{DEFAULT_FRAME_DURATION_MS, DEFAULT_MAX_UNDO_HISTORY_LEN};
use animation_document::Document;
use serde::{Deserialize, Serialize};

/// User preferences that affect documents and their history. Missing fields fall back to their defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorPreferences {
	pub max_undo_history_len: usize,
	pub default_frame_duration_ms: u32,
}

impl Default for EditorPreferences {
	fn default() -> Self {
		Self {
			max_undo_history_len: DEFAULT_MAX_UNDO_HISTORY_LEN,
			default_frame_duration_ms: DEFAULT_FRAME_DURATION_MS,
		}
	}
}

impl EditorPreferences {
	pub fn from_json(serialized: &str) -> Result<Self, EditorError> {
		serde_json::from_str(serialized).map_err(|e| EditorError::PreferencesDeserialization(e.to_string()))
	}

	pub fn new_document(&self, frame_count: usize) -> Document {
		Document::with_frame_duration(frame_count, self.default_frame_duration_ms)
	}
}

#[cfg(test)]
mod test {
	use super::*;

	use animation_document::FrameIndex;

	#[test]
	fn missing_fields_use_defaults() {
		let preferences = EditorPreferences::from_json(r#"{ "max_undo_history_len": 12 }"#).unwrap();

		assert_eq!(preferences.max_undo_history_len, 12);
		assert_eq!(preferences.default_frame_duration_ms, DEFAULT_FRAME_DURATION_MS);
	}

	#[test]
	fn malformed_preferences_are_rejected() {
		let result = EditorPreferences::from_json("{ max_undo_history_len: 12 }");

		assert!(matches!(result, Err(EditorError::PreferencesDeserialization(_))));
	}

	#[test]
	fn new_documents_use_the_default_frame_duration() {
		let preferences = EditorPreferences {
			default_frame_duration_ms: 80,
			..Default::default()
		};
		let document = preferences.new_document(3);

		assert_eq!(document.frame_count(), 3);
		assert_eq!(document.frame_duration(FrameIndex(2)), Ok(80));
	}
}
