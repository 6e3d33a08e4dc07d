//! Viewport geometry for lasso selection.
//!
//! Coordinates are CSS pixels relative to the viewport's top-left corner,
//! matching `MouseEvent.clientX/Y` and `getBoundingClientRect()`.

/// A point in viewport coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
	pub x: f64,
	pub y: f64,
}

impl Point {
	pub const fn new(x: f64, y: f64) -> Self {
		Self { x, y }
	}
}

/// Axis-aligned rectangle in viewport coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
	pub left: f64,
	pub top: f64,
	pub right: f64,
	pub bottom: f64,
}

impl Rect {
	pub const fn new(left: f64, top: f64, right: f64, bottom: f64) -> Self {
		Self { left, top, right, bottom }
	}

	/// Rectangle with origin and size, as returned by a DOM bounding box.
	pub fn from_origin_size(x: f64, y: f64, width: f64, height: f64) -> Self {
		Self::new(x, y, x + width, y + height)
	}

	/// Normalized rectangle spanned by two opposite corners, in any order.
	pub fn from_corners(a: Point, b: Point) -> Self {
		Self::new(a.x.min(b.x), a.y.min(b.y), a.x.max(b.x), a.y.max(b.y))
	}

	pub fn width(&self) -> f64 {
		self.right - self.left
	}

	pub fn height(&self) -> f64 {
		self.bottom - self.top
	}

	/// True when both dimensions are strictly positive.
	pub fn has_area(&self) -> bool {
		self.width() > 0.0 && self.height() > 0.0
	}

	/// Edge-inclusive overlap test: rectangles that merely touch intersect.
	pub fn intersects(&self, other: &Rect) -> bool {
		!(other.right < self.left || other.left > self.right || other.bottom < self.top || other.top > self.bottom)
	}
}

/// Layout and style queries the page answers for an element.
///
/// Implemented over `getBoundingClientRect()` and `getComputedStyle()` in the
/// browser, and over fixed tables in tests.
pub trait GeometryOracle<E> {
	/// Bounding box of `element` in viewport coordinates.
	fn bounding_box(&self, element: &E) -> Rect;

	/// True when computed style hides the element (`visibility: hidden` or
	/// `display: none`).
	fn is_hidden_by_style(&self, element: &E) -> bool;
}

/// Whether an element can be picked up by a lasso: it has a non-empty box and
/// its style does not hide it. Stacking order is not considered.
pub fn is_visible<E, G>(oracle: &G, element: &E) -> bool
where
	G: GeometryOracle<E> + ?Sized,
{
	oracle.bounding_box(element).has_area() && !oracle.is_hidden_by_style(element)
}

/// Whether `element` is visible and overlaps `area`.
pub fn is_lasso_hit<E, G>(oracle: &G, area: &Rect, element: &E) -> bool
where
	G: GeometryOracle<E> + ?Sized,
{
	area.intersects(&oracle.bounding_box(element)) && is_visible(oracle, element)
}
