use crate::shared::constants::CLASS_LABELS;

/// Axis-aligned box in frame pixel coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoundingBox {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl BoundingBox {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn area(&self) -> f32 {
        self.width.max(0.0) * self.height.max(0.0)
    }

    pub fn iou(&self, other: &BoundingBox) -> f32 {
        let ix1 = self.x.max(other.x);
        let iy1 = self.y.max(other.y);
        let ix2 = (self.x + self.width).min(other.x + other.width);
        let iy2 = (self.y + self.height).min(other.y + other.height);

        let inter = (ix2 - ix1).max(0.0) * (iy2 - iy1).max(0.0);
        if inter == 0.0 {
            return 0.0;
        }
        inter / (self.area() + other.area() - inter)
    }
}

/// One detected object: class id, confidence score, and pixel box.
///
/// A `Vec<Detection>` is the unit the gate stores between detection
/// passes and reuses on skipped frames.
#[derive(Clone, Debug, PartialEq)]
pub struct Detection {
    pub class_id: usize,
    pub score: f32,
    pub bbox: BoundingBox,
}

impl Detection {
    pub fn new(class_id: usize, score: f32, bbox: BoundingBox) -> Self {
        Self {
            class_id,
            score,
            bbox,
        }
    }

    /// Human-readable class label; falls back for ids outside the table.
    pub fn label(&self) -> &'static str {
        CLASS_LABELS.get(self.class_id).copied().unwrap_or("object")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rstest::rstest;

    fn bbox(x: f32, y: f32, w: f32, h: f32) -> BoundingBox {
        BoundingBox::new(x, y, w, h)
    }

    #[rstest]
    #[case(bbox(0.0, 0.0, 10.0, 10.0), bbox(20.0, 20.0, 10.0, 10.0), 0.0)]
    #[case(bbox(0.0, 0.0, 10.0, 10.0), bbox(0.0, 0.0, 10.0, 10.0), 1.0)]
    #[case(bbox(0.0, 0.0, 10.0, 10.0), bbox(5.0, 0.0, 10.0, 10.0), 1.0 / 3.0)]
    fn test_iou(#[case] a: BoundingBox, #[case] b: BoundingBox, #[case] expected: f32) {
        assert_relative_eq!(a.iou(&b), expected, epsilon = 1e-6);
    }

    #[test]
    fn test_iou_touching_boxes_is_zero() {
        let a = bbox(0.0, 0.0, 10.0, 10.0);
        let b = bbox(10.0, 0.0, 10.0, 10.0);
        assert_eq!(a.iou(&b), 0.0);
    }

    #[test]
    fn test_label_lookup() {
        let det = Detection::new(0, 0.9, bbox(0.0, 0.0, 1.0, 1.0));
        assert_eq!(det.label(), "person");
    }

    #[test]
    fn test_label_out_of_table_falls_back() {
        let det = Detection::new(999, 0.9, bbox(0.0, 0.0, 1.0, 1.0));
        assert_eq!(det.label(), "object");
    }
}
