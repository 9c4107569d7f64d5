use crate::DocumentContext;

use animation_document::{Cel, Document, FrameIndex, GridIndex};

/// Marks a background layer in the rows given to [`context_from_rows`].
pub const BACKGROUND_MARKER: char = '#';
/// An empty cel in the rows given to [`context_from_rows`].
pub const EMPTY_CEL: char = '.';

pub fn init_logger() {
	let _ = env_logger::builder().is_test(true).try_init();
}

/// Builds a document with one layer per row, bottom of the stack first.
/// Every character of a row is a cel showing the image with that character's code, or an empty cel for `.`.
/// A row starting with `#` is the background layer.
pub fn context_from_rows(rows: &[&str]) -> DocumentContext {
	init_logger();

	let frame_count = rows.iter().map(|row| row.trim_start_matches(BACKGROUND_MARKER).chars().count()).max().unwrap_or(0);
	let mut document = Document::new(frame_count);

	for (index, row) in rows.iter().enumerate() {
		let (layer, cels) = match row.strip_prefix(BACKGROUND_MARKER) {
			Some(cels) => (document.add_background_layer("Background"), cels),
			None => (document.add_layer(format!("Layer {index}")), *row),
		};

		for (frame, symbol) in cels.chars().enumerate() {
			let cel = (symbol != EMPTY_CEL).then(|| Cel::new(u64::from(symbol)));
			document.set_cel(layer, FrameIndex::from_usize(frame), cel).unwrap();
		}
	}

	DocumentContext::new(document)
}

/// Renders the document in the format accepted by [`context_from_rows`].
pub fn rows(document: &Document) -> Vec<String> {
	document
		.layers()
		.iter()
		.map(|layer| {
			let marker = layer.background.then_some(BACKGROUND_MARKER);
			let cels = layer.cels().iter().map(|cel| match cel {
				Some(cel) => u32::try_from(cel.image).ok().and_then(char::from_u32).unwrap_or('?'),
				None => EMPTY_CEL,
			});
			marker.into_iter().chain(cels).collect()
		})
		.collect()
}

/// Renders the first layer only, which is all that frame tests on a single layer need.
pub fn first_row(document: &Document) -> String {
	rows(document).into_iter().next().unwrap_or_default()
}
