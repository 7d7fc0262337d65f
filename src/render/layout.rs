use crate::flow::Node;
use crate::geometry::Point;

/// Below this viewport width the node circles shrink to their mobile
/// radius.
pub const MOBILE_BREAKPOINT_PX: f64 = 768.0;

const NODE_RADIUS_MOBILE: f64 = 40.0;
const NODE_RADIUS_DESKTOP: f64 = 60.0;

/// Node centers and circle radius for one viewport.
///
/// Geometry is the only thing a viewport change affects; activation
/// and periods come from the reading alone.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Layout {
    pub width: f64,
    pub height: f64,
    pub node_radius: f64,
}

impl Layout {
    pub fn for_viewport(width: f64, height: f64) -> Self {
        let node_radius = if width < MOBILE_BREAKPOINT_PX {
            NODE_RADIUS_MOBILE
        } else {
            NODE_RADIUS_DESKTOP
        };
        Self { width, height, node_radius }
    }

    /// Producers sit on top, consumers below: solar and grid in the
    /// upper corners, battery and house in the lower ones.
    pub fn center(&self, node: Node) -> Point {
        let (fx, fy) = match node {
            Node::Solar => (0.25, 0.25),
            Node::Grid => (0.75, 0.25),
            Node::Battery => (0.25, 0.75),
            Node::House => (0.75, 0.75),
        };
        Point::new(self.width * fx, self.height * fy)
    }

    /// A zero-sized viewport has nothing to draw on; the scene for
    /// that cycle is skipped rather than erroring.
    pub fn is_degenerate(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_radius_switches_at_breakpoint() {
        assert_eq!(Layout::for_viewport(767.0, 600.0).node_radius, 40.0);
        assert_eq!(Layout::for_viewport(768.0, 600.0).node_radius, 60.0);
        assert_eq!(Layout::for_viewport(1920.0, 1080.0).node_radius, 60.0);
    }

    #[test]
    fn test_node_corners() {
        let layout = Layout::for_viewport(1000.0, 800.0);
        assert_eq!(layout.center(Node::Solar), Point::new(250.0, 200.0));
        assert_eq!(layout.center(Node::Grid), Point::new(750.0, 200.0));
        assert_eq!(layout.center(Node::Battery), Point::new(250.0, 600.0));
        assert_eq!(layout.center(Node::House), Point::new(750.0, 600.0));
    }

    #[test]
    fn test_degenerate_viewports() {
        assert!(Layout::for_viewport(0.0, 600.0).is_degenerate());
        assert!(Layout::for_viewport(800.0, 0.0).is_degenerate());
        assert!(Layout::for_viewport(-1.0, 600.0).is_degenerate());
        assert!(!Layout::for_viewport(800.0, 600.0).is_degenerate());
    }
}
