/// Axis-aligned bounding box in source-frame pixel coordinates.
///
/// Stored as TLWH: top-left x, top-left y, width, height.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Rect {
    /// Top-left x coordinate
    pub x: f32,
    /// Top-left y coordinate
    pub y: f32,
    /// Width of the bounding box
    pub width: f32,
    /// Height of the bounding box
    pub height: f32,
}

impl Rect {
    /// Create a new Rect from top-left coordinates and dimensions (TLWH format).
    #[inline]
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Create a Rect from TLBR format (top-left x, top-left y, bottom-right x, bottom-right y).
    #[inline]
    pub fn from_tlbr(x1: f32, y1: f32, x2: f32, y2: f32) -> Self {
        Self {
            x: x1,
            y: y1,
            width: x2 - x1,
            height: y2 - y1,
        }
    }

    /// Convert to TLBR format: (x1, y1, x2, y2).
    #[inline]
    pub fn to_tlbr(&self) -> [f32; 4] {
        [self.x, self.y, self.x + self.width, self.y + self.height]
    }

    /// Convert to TLWH format: (x, y, width, height).
    #[inline]
    pub fn to_tlwh(&self) -> [f32; 4] {
        [self.x, self.y, self.width, self.height]
    }

    #[inline]
    pub fn area(&self) -> f32 {
        self.width * self.height
    }

    /// Whether every coordinate is a finite number.
    #[inline]
    pub fn is_finite(&self) -> bool {
        self.x.is_finite()
            && self.y.is_finite()
            && self.width.is_finite()
            && self.height.is_finite()
    }

    /// Same box with negative extents clamped to zero.
    #[inline]
    pub fn clamped(self) -> Self {
        Self {
            width: self.width.max(0.0),
            height: self.height.max(0.0),
            ..self
        }
    }

    /// Overlap ratio with another box: intersection area over
    /// `area(self) + area(other) - intersection`.
    ///
    /// Symmetric in its arguments, 1 for identical non-empty boxes and 0 for
    /// disjoint ones. Degenerate (zero-area) pairs yield 0.
    pub fn overlap(&self, other: &Rect) -> f32 {
        let [ax1, ay1, ax2, ay2] = self.to_tlbr();
        let [bx1, by1, bx2, by2] = other.to_tlbr();

        let inter_width = (ax2.min(bx2) - ax1.max(bx1)).max(0.0);
        let inter_height = (ay2.min(by2) - ay1.max(by1)).max(0.0);
        let inter_area = inter_width * inter_height;

        let union_area = self.area() + other.area() - inter_area;

        if union_area > 0.0 {
            (inter_area / union_area).clamp(0.0, 1.0)
        } else {
            0.0
        }
    }
}

use ndarray::Array2;

/// Calculate the overlap matrix between two sets of bounding boxes.
///
/// Returns a matrix of shape (M, N) where M is the length of `boxes_a`
/// and N is the length of `boxes_b`.
pub fn overlap_batch(boxes_a: &[Rect], boxes_b: &[Rect]) -> Array2<f32> {
    let mut overlaps = Array2::zeros((boxes_a.len(), boxes_b.len()));
    for (i, a) in boxes_a.iter().enumerate() {
        for (j, b) in boxes_b.iter().enumerate() {
            overlaps[[i, j]] = a.overlap(b);
        }
    }
    overlaps
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_conversions() {
        let rect = Rect::new(10.0, 20.0, 30.0, 40.0);
        assert_eq!(rect.to_tlwh(), [10.0, 20.0, 30.0, 40.0]);
        assert_eq!(rect.to_tlbr(), [10.0, 20.0, 40.0, 60.0]);
        assert_eq!(Rect::from_tlbr(10.0, 20.0, 40.0, 60.0), rect);
    }

    #[test]
    fn test_overlap_partial() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(5.0, 5.0, 10.0, 10.0);

        // Intersection: 5x5 = 25
        // Union: 100 + 100 - 25 = 175
        assert!((a.overlap(&b) - 25.0 / 175.0).abs() < 1e-6);
    }

    #[test]
    fn test_overlap_shifted_by_one() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(1.0, 1.0, 10.0, 10.0);

        // 81 / (100 + 100 - 81)
        let overlap = a.overlap(&b);
        assert!((overlap - 81.0 / 119.0).abs() < 1e-6);
        assert!(overlap > 0.6);
    }

    #[test]
    fn test_overlap_no_overlap() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(20.0, 20.0, 10.0, 10.0);
        assert_eq!(a.overlap(&b), 0.0);
    }

    #[test]
    fn test_overlap_touching_edges() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(10.0, 0.0, 10.0, 10.0);
        assert_eq!(a.overlap(&b), 0.0);
    }

    #[test]
    fn test_overlap_same_box() {
        let a = Rect::new(3.0, 4.0, 10.0, 12.0);
        assert!((a.overlap(&a) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_overlap_symmetric() {
        let a = Rect::new(0.0, 0.0, 20.0, 40.0);
        let b = Rect::new(2.0, 1.0, 20.0, 40.0);
        assert_eq!(a.overlap(&b), b.overlap(&a));
    }

    #[test]
    fn test_overlap_degenerate() {
        let a = Rect::new(0.0, 0.0, 0.0, 0.0);
        assert_eq!(a.overlap(&a), 0.0);
    }

    #[test]
    fn test_clamped() {
        let r = Rect::new(1.0, 2.0, -3.0, 4.0).clamped();
        assert_eq!(r, Rect::new(1.0, 2.0, 0.0, 4.0));
    }

    #[test]
    fn test_overlap_batch_shape() {
        let a = [Rect::new(0.0, 0.0, 10.0, 10.0), Rect::new(50.0, 50.0, 10.0, 10.0)];
        let b = [Rect::new(0.0, 0.0, 10.0, 10.0)];
        let m = overlap_batch(&a, &b);
        assert_eq!(m.dim(), (2, 1));
        assert!((m[[0, 0]] - 1.0).abs() < 1e-6);
        assert_eq!(m[[1, 0]], 0.0);
    }
}
