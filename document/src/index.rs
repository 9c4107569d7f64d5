use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Sub};

/// Shared arithmetic of the two grid axes, so traversal code can be written once for frames and layers.
///
/// Indices are signed: a scan running backward past the first row or column ends on `-1`.
pub trait GridIndex: Copy + Ord + fmt::Debug + Add<i32, Output = Self> + Sub<Self, Output = i32> {
	fn new(index: i32) -> Self;

	fn get(self) -> i32;

	fn next(self) -> Self {
		self + 1
	}

	fn previous(self) -> Self {
		self + -1
	}

	fn next_by(self, count: i32) -> Self {
		self + count
	}

	/// Converts to a vector index, or `None` for negative sentinels.
	fn to_usize(self) -> Option<usize> {
		usize::try_from(self.get()).ok()
	}

	fn from_usize(index: usize) -> Self {
		Self::new(i32::try_from(index).unwrap_or(i32::MAX))
	}
}

macro_rules! grid_index {
	($(#[$meta:meta])* $name:ident) => {
		$(#[$meta])*
		#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
		#[serde(transparent)]
		pub struct $name(pub i32);

		impl GridIndex for $name {
			fn new(index: i32) -> Self {
				Self(index)
			}

			fn get(self) -> i32 {
				self.0
			}
		}

		impl Add<i32> for $name {
			type Output = Self;

			fn add(self, delta: i32) -> Self {
				Self(self.0 + delta)
			}
		}

		impl AddAssign<i32> for $name {
			fn add_assign(&mut self, delta: i32) {
				self.0 += delta;
			}
		}

		impl Sub for $name {
			type Output = i32;

			fn sub(self, other: Self) -> i32 {
				self.0 - other.0
			}
		}

		impl From<i32> for $name {
			fn from(index: i32) -> Self {
				Self(index)
			}
		}

		impl fmt::Display for $name {
			fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
				write!(f, "{}", self.0)
			}
		}
	};
}

grid_index!(
	/// A temporal position shared by every layer of the document.
	FrameIndex
);

grid_index!(
	/// A position in the layer stack, where 0 is the bottom of the stack.
	LayerIndex
);

#[cfg(test)]
mod test {
	use super::*;

	#[test]
	fn frame_arithmetic() {
		let frame = FrameIndex(3);
		assert_eq!(frame.next(), FrameIndex(4));
		assert_eq!(frame.previous(), FrameIndex(2));
		assert_eq!(frame.next_by(4), FrameIndex(7));
		assert_eq!(FrameIndex(7) - frame, 4);

		let mut cursor = frame;
		cursor += -2;
		assert_eq!(cursor, FrameIndex(1));
	}

	#[test]
	fn negative_sentinels_have_no_vector_index() {
		assert_eq!(LayerIndex(0).previous().to_usize(), None);
		assert_eq!(LayerIndex(2).to_usize(), Some(2));
		assert_eq!(LayerIndex::from_usize(5), LayerIndex(5));
	}
}
