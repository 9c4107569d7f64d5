//! Iteration orders that let a transfer read every source index before anything is written over it.

use crate::range::Span;

use animation_document::GridIndex;

/// A walk along one axis that pairs each source index with the destination index it is written to.
///
/// Both cursors start at their `begin` and advance by their own step after each pair, for `count` pairs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AxisTraversal<T> {
	pub src_begin: T,
	pub src_step: i32,
	pub dst_begin: T,
	pub dst_step: i32,
	pub count: i32,
}

impl<T: GridIndex> AxisTraversal<T> {
	/// Walks `src` from its first index up, writing upward from `dst_begin`.
	pub fn forward(src: Span<T>, dst_begin: T) -> Self {
		Self {
			src_begin: src.begin(),
			src_step: 1,
			dst_begin,
			dst_step: 1,
			count: src.size(),
		}
	}

	/// Walks `src` from its last index down, writing downward from `dst_begin`.
	pub fn backward(src: Span<T>, dst_begin: T) -> Self {
		Self {
			src_begin: src.end(),
			src_step: -1,
			dst_begin,
			dst_step: -1,
			count: src.size(),
		}
	}

	#[must_use]
	pub fn with_src_step(self, src_step: i32) -> Self {
		Self { src_step, ..self }
	}

	#[must_use]
	pub fn with_dst_step(self, dst_step: i32) -> Self {
		Self { dst_step, ..self }
	}

	pub fn is_forward(&self) -> bool {
		self.src_step > 0
	}
}

impl<T: GridIndex> IntoIterator for AxisTraversal<T> {
	type Item = (T, T);
	type IntoIter = AxisCursor<T>;

	fn into_iter(self) -> AxisCursor<T> {
		AxisCursor {
			src: self.src_begin,
			dst: self.dst_begin,
			src_step: self.src_step,
			dst_step: self.dst_step,
			remaining: self.count,
		}
	}
}

pub struct AxisCursor<T> {
	src: T,
	dst: T,
	src_step: i32,
	dst_step: i32,
	remaining: i32,
}

impl<T: GridIndex> Iterator for AxisCursor<T> {
	type Item = (T, T);

	fn next(&mut self) -> Option<(T, T)> {
		if self.remaining <= 0 {
			return None;
		}

		let pair = (self.src, self.dst);
		self.src = self.src + self.src_step;
		self.dst = self.dst + self.dst_step;
		self.remaining -= 1;
		Some(pair)
	}

	fn size_hint(&self) -> (usize, Option<usize>) {
		let remaining = usize::try_from(self.remaining).unwrap_or(0);
		(remaining, Some(remaining))
	}
}

/// Picks the direction that never overwrites a source index before it has been read.
///
/// A destination starting at or before the source trails the read cursor, so the walk goes forward.
/// A destination starting after the source is written from its far end while the source is read backward.
pub fn choose_direction<T: GridIndex>(src: Span<T>, dst: Span<T>) -> AxisTraversal<T> {
	if dst.begin() <= src.begin() {
		AxisTraversal::forward(src, dst.begin())
	} else {
		AxisTraversal::backward(src, dst.end())
	}
}
