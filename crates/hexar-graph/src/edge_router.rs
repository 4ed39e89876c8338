use crate::tree::TreeModel;
use hexar_core::{Node, NodeId, Vec2};

/// A cubic bezier curve segment defined by four control points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CubicBezier {
    pub start: Vec2,
    pub control1: Vec2,
    pub control2: Vec2,
    pub end: Vec2,
}

impl CubicBezier {
    /// Vertical S-curve: both control points sit on the midpoint height,
    /// each aligned with its own end.
    pub fn vertical_s_curve(start: Vec2, end: Vec2) -> Self {
        let mid_y = (start.y + end.y) * 0.5;
        Self {
            start,
            control1: Vec2::new(start.x, mid_y),
            control2: Vec2::new(end.x, mid_y),
            end,
        }
    }

    /// Sample the curve at parameter t [0, 1]
    pub fn sample(&self, t: f32) -> Vec2 {
        let t2 = t * t;
        let t3 = t2 * t;
        let mt = 1.0 - t;
        let mt2 = mt * mt;
        let mt3 = mt2 * mt;

        let x = self.start.x * mt3
            + 3.0 * self.control1.x * mt2 * t
            + 3.0 * self.control2.x * mt * t2
            + self.end.x * t3;
        let y = self.start.y * mt3
            + 3.0 * self.control1.y * mt2 * t
            + 3.0 * self.control2.y * mt * t2
            + self.end.y * t3;

        Vec2::new(x, y)
    }

    /// `segments + 1` evenly spaced points along the curve, ends included.
    pub fn flatten(&self, segments: usize) -> Vec<Vec2> {
        let segments = segments.max(1);
        (0..=segments)
            .map(|i| self.sample(i as f32 / segments as f32))
            .collect()
    }

    /// Minimum distance from `point` to the curve, by uniform sampling.
    pub fn point_distance(&self, point: Vec2, num_samples: usize) -> f32 {
        self.flatten(num_samples.max(2))
            .into_iter()
            .map(|p| (p - point).length())
            .fold(f32::INFINITY, f32::min)
    }

    /// SVG path data, `M sx sy C c1x c1y, c2x c2y, ex ey`.
    pub fn to_svg_path(&self) -> String {
        format!(
            "M {} {} C {} {}, {} {}, {} {}",
            self.start.x,
            self.start.y,
            self.control1.x,
            self.control1.y,
            self.control2.x,
            self.control2.y,
            self.end.x,
            self.end.y
        )
    }
}

/// Parent-to-child edge, derived from the tree on every frame.
#[derive(Debug, Clone, PartialEq)]
pub struct Connection {
    pub parent: NodeId,
    pub child: NodeId,
    pub curve: CubicBezier,
}

/// Edge from the parent's bottom-center to the child's top-center.
pub fn route_connection(parent: &Node, child: &Node) -> Connection {
    Connection {
        parent: parent.id.clone(),
        child: child.id.clone(),
        curve: CubicBezier::vertical_s_curve(parent.bottom_anchor(), child.top_anchor()),
    }
}

/// One connection for every node whose parent is present, in paint order.
pub fn route_connections(tree: &TreeModel) -> Vec<Connection> {
    tree.nodes()
        .filter_map(|child| {
            let parent = tree.get(child.parent.as_ref()?)?;
            Some(route_connection(parent, child))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use hexar_core::{ComponentType, NODE_HEIGHT, NODE_WIDTH};

    #[test]
    fn test_demo_tree_has_one_edge_per_child() {
        let tree = TreeModel::demo();
        let edges = route_connections(&tree);
        let pairs: Vec<_> = edges
            .iter()
            .map(|e| (e.parent.as_str(), e.child.as_str()))
            .collect();
        assert_eq!(
            pairs,
            vec![("root", "motor"), ("root", "sensor"), ("motor", "encoder")]
        );
    }

    #[test]
    fn test_curve_anchors_and_control_points() {
        let tree = TreeModel::demo();
        let parent = tree.get(&NodeId::from("root")).unwrap();
        let child = tree.get(&NodeId::from("motor")).unwrap();
        let connection = route_connection(parent, child);
        let curve = connection.curve;

        assert_eq!(curve.start, Vec2::new(400.0 + NODE_WIDTH / 2.0, 100.0 + NODE_HEIGHT));
        assert_eq!(curve.end, Vec2::new(250.0 + NODE_WIDTH / 2.0, 250.0));
        assert_eq!(curve.control1, Vec2::new(480.0, 195.0));
        assert_eq!(curve.control2, Vec2::new(330.0, 195.0));
        assert_eq!(curve.to_svg_path(), "M 480 140 C 480 195, 330 195, 330 250");
    }

    #[test]
    fn test_edges_follow_moves_and_deletes() {
        let mut tree = TreeModel::demo();
        tree.move_node(&NodeId::from("sensor"), 700.0, 300.0);
        let edges = route_connections(&tree);
        let sensor_edge = edges
            .iter()
            .find(|e| e.child == NodeId::from("sensor"))
            .unwrap();
        assert_eq!(sensor_edge.curve.end, Vec2::new(780.0, 300.0));

        tree.delete_node(&NodeId::from("motor"));
        assert_eq!(route_connections(&tree).len(), 1);
    }

    #[test]
    fn test_unparented_nodes_produce_no_edges() {
        let mut tree = TreeModel::with_seed(5);
        tree.add_node(ComponentType::System, None);
        tree.add_node(ComponentType::Software, None);
        assert!(route_connections(&tree).is_empty());
    }

    #[test]
    fn test_flatten_hits_endpoints() {
        let curve = CubicBezier::vertical_s_curve(Vec2::new(0.0, 0.0), Vec2::new(100.0, 200.0));
        let points = curve.flatten(16);
        assert_eq!(points.len(), 17);
        assert_eq!(points[0], curve.start);
        assert_eq!(points[16], curve.end);
        assert!(curve.point_distance(Vec2::new(50.0, 100.0), 32) < 1.0);
    }
}
