pub use kurbo::{Point, Size};

/// Display color of a node body in the graph editor, channels in [0,1].
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct NodeColor {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

impl NodeColor {
    pub const fn new(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b }
    }

    pub fn is_displayable(self) -> bool {
        let in_unit = |c: f64| (0.0..=1.0).contains(&c);
        in_unit(self.r) && in_unit(self.g) && in_unit(self.b)
    }
}

impl Default for NodeColor {
    fn default() -> Self {
        // Neutral gray used by utility nodes.
        Self::new(0.7, 0.7, 0.7)
    }
}
