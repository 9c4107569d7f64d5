use crate::preferences::EditorPreferences;
use crate::EditorError;

use animation_document::{Document, DocumentApi, DocumentHistory};

/// A document together with its undo history. Every range operation receives it explicitly.
#[derive(Debug, Clone, Default)]
pub struct DocumentContext {
	pub document: Document,
	pub history: DocumentHistory,
}

impl DocumentContext {
	pub fn new(document: Document) -> Self {
		Self {
			document,
			history: DocumentHistory::default(),
		}
	}

	pub fn with_preferences(document: Document, preferences: &EditorPreferences) -> Self {
		Self {
			document,
			history: DocumentHistory::with_max_len(preferences.max_undo_history_len),
		}
	}

	pub fn apply_preferences(&mut self, preferences: &EditorPreferences) {
		self.history.set_max_len(preferences.max_undo_history_len);
	}

	/// Mutation primitives that record into the currently open transaction.
	pub fn api(&mut self) -> DocumentApi<'_> {
		DocumentApi::new(&mut self.document, &mut self.history)
	}

	pub fn undo(&mut self) -> Result<(), EditorError> {
		self.history.undo(&mut self.document).inspect_err(|e| warn!("{e}"))?;
		Ok(())
	}

	pub fn redo(&mut self) -> Result<(), EditorError> {
		self.history.redo(&mut self.document).inspect_err(|e| warn!("{e}"))?;
		Ok(())
	}
}

#[cfg(test)]
mod test {
	use super::*;
	use crate::range::{DocumentRange, RangePlace};
	use crate::range_ops::move_range;
	use crate::test_utils::{context_from_rows, first_row};

	use pretty_assertions::assert_eq;

	fn swap_first_frames(context: &mut DocumentContext) {
		move_range(context, DocumentRange::of_frames(0, 0), DocumentRange::of_frames(1, 1), RangePlace::After).unwrap();
	}

	#[test]
	fn preferences_limit_the_undo_history() {
		let preferences = EditorPreferences {
			max_undo_history_len: 1,
			..Default::default()
		};
		let document = context_from_rows(&["ABC"]).document;
		let mut context = DocumentContext::with_preferences(document, &preferences);

		swap_first_frames(&mut context);
		swap_first_frames(&mut context);

		assert_eq!(context.history.undo_len(), 1);
		context.undo().unwrap();
		assert_eq!(first_row(&context.document), "BAC");
		assert_eq!(context.undo(), Err(EditorError::Document(animation_document::DocumentError::NothingToUndo)));
	}

	#[test]
	fn applying_preferences_drops_the_oldest_entries() {
		let mut context = context_from_rows(&["ABC"]);
		for _ in 0..3 {
			swap_first_frames(&mut context);
		}
		assert_eq!(context.history.undo_len(), 3);

		let preferences = EditorPreferences::from_json(r#"{ "max_undo_history_len": 2 }"#).unwrap();
		context.apply_preferences(&preferences);

		assert_eq!(context.history.max_len(), 2);
		assert_eq!(context.history.undo_len(), 2);
	}

	#[test]
	fn preferred_frame_duration_reaches_new_documents() {
		let preferences = EditorPreferences::from_json(r#"{ "default_frame_duration_ms": 40 }"#).unwrap();
		let context = DocumentContext::with_preferences(preferences.new_document(2), &preferences);

		assert_eq!(context.document.frame_durations(), &[40, 40]);
		assert_eq!(context.history.max_len(), preferences.max_undo_history_len);
	}
}
