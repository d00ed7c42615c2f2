//! Dense distance matrix.

use crate::models::Node;

/// A dense n×n distance matrix stored in row-major order.
///
/// # Examples
///
/// ```
/// use u_cvrp::models::Node;
/// use u_cvrp::distance::DistanceMatrix;
///
/// let nodes = vec![
///     Node::depot(0.0, 0.0),
///     Node::new(3.0, 4.0, 10),
///     Node::new(6.0, 8.0, 20),
/// ];
/// let dm = DistanceMatrix::from_nodes(&nodes);
/// assert!((dm.get(0, 1) - 5.0).abs() < 1e-10);
/// assert_eq!(dm.size(), 3);
/// ```
#[derive(Debug, Clone)]
pub struct DistanceMatrix {
    data: Vec<f64>,
    size: usize,
}

impl DistanceMatrix {
    /// Creates a distance matrix of the given size, initialized to zero.
    pub fn new(size: usize) -> Self {
        Self {
            data: vec![0.0; size * size],
            size,
        }
    }

    /// Computes a Euclidean distance matrix from node coordinates.
    pub fn from_nodes(nodes: &[Node]) -> Self {
        let n = nodes.len();
        let mut dm = Self::new(n);
        for i in 0..n {
            for j in (i + 1)..n {
                let d = nodes[i].distance_to(&nodes[j]);
                dm.set(i, j, d);
                dm.set(j, i, d);
            }
        }
        dm
    }

    /// Returns the distance from location `from` to location `to`.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of bounds.
    pub fn get(&self, from: usize, to: usize) -> f64 {
        self.data[from * self.size + to]
    }

    fn set(&mut self, from: usize, to: usize, distance: f64) {
        self.data[from * self.size + to] = distance;
    }

    /// Number of locations in this matrix.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Returns the candidate closest to `from` along with its distance.
    ///
    /// Ties go to the candidate yielded first. Returns `None` if
    /// `candidates` is empty.
    pub fn nearest(
        &self,
        from: usize,
        candidates: impl IntoIterator<Item = usize>,
    ) -> Option<(usize, f64)> {
        let mut best: Option<(usize, f64)> = None;
        for c in candidates {
            let d = self.get(from, c);
            match best {
                Some((_, best_d)) if d >= best_d => {}
                _ => best = Some((c, d)),
            }
        }
        best
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_nodes() -> Vec<Node> {
        vec![
            Node::depot(0.0, 0.0),
            Node::new(3.0, 4.0, 10),
            Node::new(0.0, 8.0, 20),
        ]
    }

    #[test]
    fn test_from_nodes() {
        let dm = DistanceMatrix::from_nodes(&sample_nodes());
        assert_eq!(dm.size(), 3);
        assert!((dm.get(0, 1) - 5.0).abs() < 1e-10);
        assert!((dm.get(0, 2) - 8.0).abs() < 1e-10);
        assert!((dm.get(0, 0)).abs() < 1e-10);
    }

    #[test]
    fn test_symmetric() {
        let dm = DistanceMatrix::from_nodes(&sample_nodes());
        for i in 0..dm.size() {
            for j in 0..dm.size() {
                assert_eq!(dm.get(i, j), dm.get(j, i));
            }
        }
    }

    #[test]
    fn test_nearest() {
        let dm = DistanceMatrix::from_nodes(&sample_nodes());
        // From depot (0,0): node 1 at (3,4) is dist 5, node 2 at (0,8) is dist 8
        assert_eq!(dm.nearest(0, [1, 2]).map(|(i, _)| i), Some(1));
        assert_eq!(dm.nearest(0, [2]).map(|(i, _)| i), Some(2));
        assert_eq!(dm.nearest(0, std::iter::empty()), None);
    }

    #[test]
    fn test_nearest_tie_keeps_first() {
        let nodes = vec![
            Node::depot(0.0, 0.0),
            Node::new(0.0, 5.0, 1),
            Node::new(5.0, 0.0, 1),
        ];
        let dm = DistanceMatrix::from_nodes(&nodes);
        assert_eq!(dm.nearest(0, [2, 1]), Some((2, 5.0)));
        assert_eq!(dm.nearest(0, [1, 2]), Some((1, 5.0)));
    }
}
