use super::{EdgeId, edge::Edge, union_find::UnionFind};
use crate::error::MazeError;

/// The edges of a spanning tree over the grid, plus an O(1) membership lookup
/// indexed by [`EdgeId`]. Read-only once built.
#[derive(Debug, Clone)]
pub struct SpanningTree {
    edges: Vec<EdgeId>,
    membership: Box<[bool]>,
}

impl SpanningTree {
    /// Tree edges in the order Kruskal selected them.
    pub fn edges(&self) -> &[EdgeId] {
        &self.edges
    }

    pub fn contains(&self, edge: EdgeId) -> bool {
        self.membership.get(edge).copied().unwrap_or(false)
    }

    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }
}

/// Build a minimum spanning tree over `cell_count` cells from the weighted
/// candidate `edges`.
///
/// Edges are visited in ascending weight; the sort is stable so equal weights
/// keep their creation order. An edge joining two different components is
/// taken and the components merged. Stops as soon as the tree holds
/// `cell_count - 1` edges.
pub fn randomized_kruskal(cell_count: usize, edges: &[Edge]) -> Result<SpanningTree, MazeError> {
    let expected = cell_count.saturating_sub(1);
    let mut membership = vec![false; edges.len()].into_boxed_slice();
    let mut tree = Vec::with_capacity(expected);

    let mut order: Vec<EdgeId> = (0..edges.len()).collect();
    order.sort_by_key(|&id| edges[id].weight);

    let mut uf = UnionFind::new(cell_count);
    for id in order {
        if tree.len() == expected {
            break;
        }
        let edge = &edges[id];
        let root_from = uf.find(edge.from);
        let root_to = uf.find(edge.to);
        if root_from != root_to {
            uf.union(root_from, root_to);
            membership[id] = true;
            tree.push(id);
        }
    }

    if tree.len() != expected {
        return Err(MazeError::DisconnectedGrid {
            selected: tree.len(),
            expected,
        });
    }

    tracing::trace!(
        "[kruskal] selected {} of {} candidate edges",
        tree.len(),
        edges.len()
    );
    Ok(SpanningTree {
        edges: tree,
        membership,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn edge(from: usize, to: usize, weight: u32) -> Edge {
        Edge { from, to, weight }
    }

    #[test]
    fn test_picks_lightest_edges_without_cycles() {
        // 2x2 grid: 0-1 on top, 2-3 below
        let edges = [edge(0, 2, 20), edge(0, 1, 1), edge(1, 3, 2), edge(2, 3, 5)];
        let tree = randomized_kruskal(4, &edges).unwrap();
        assert_eq!(tree.edges(), &[1, 2, 3]);
        assert!(!tree.contains(0));
        assert!(tree.contains(3));
    }

    #[test]
    fn test_ties_keep_creation_order() {
        let edges = [edge(0, 1, 4), edge(1, 2, 4), edge(0, 2, 4)];
        let tree = randomized_kruskal(3, &edges).unwrap();
        assert_eq!(tree.edges(), &[0, 1]);
    }

    #[test]
    fn test_single_cell_has_empty_tree() {
        let tree = randomized_kruskal(1, &[]).unwrap();
        assert!(tree.is_empty());
        assert!(!tree.contains(0));
    }

    #[test]
    fn test_disconnected_candidates_are_reported() {
        let edges = [edge(0, 1, 3)];
        let err = randomized_kruskal(3, &edges).unwrap_err();
        assert_eq!(
            err,
            MazeError::DisconnectedGrid {
                selected: 1,
                expected: 2
            }
        );
    }
}
