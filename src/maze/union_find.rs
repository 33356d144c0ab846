//! Disjoint-set forest keyed by cell index, used while building the spanning
//! tree and discarded once the tree is fixed.

use super::CellId;

#[derive(Debug, Clone)]
pub struct UnionFind {
    parent: Vec<CellId>,
    components: usize,
}

impl UnionFind {
    /// A forest where every cell is its own representative.
    pub fn new(size: usize) -> Self {
        UnionFind {
            parent: (0..size).collect(),
            components: size,
        }
    }

    /// Representative of `key`'s component.
    ///
    /// Halves paths on the way up; the root found is the same as without
    /// compression.
    ///
    /// # Panics
    /// If `key` is not a cell of this forest.
    pub fn find(&mut self, mut key: CellId) -> CellId {
        while self.parent[key] != key {
            let grandparent = self.parent[self.parent[key]];
            self.parent[key] = grandparent;
            key = grandparent;
        }
        key
    }

    /// Merge the components of `x` and `y`. `y`'s representative survives as
    /// the representative of the merged component.
    ///
    /// Returns `false` if both were already in the same component.
    pub fn union(&mut self, x: CellId, y: CellId) -> bool {
        let root_x = self.find(x);
        let root_y = self.find(y);
        if root_x == root_y {
            return false;
        }
        self.parent[root_x] = root_y;
        self.components -= 1;
        true
    }

    /// Number of disjoint components left.
    pub fn components(&self) -> usize {
        self.components
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_forest_is_all_singletons() {
        let mut uf = UnionFind::new(4);
        assert_eq!(uf.components(), 4);
        (0..4).for_each(|i| assert_eq!(uf.find(i), i));
    }

    #[test]
    fn test_union_keeps_second_representative() {
        let mut uf = UnionFind::new(4);
        assert!(uf.union(0, 1));
        assert_eq!(uf.find(0), 1);
        assert!(uf.union(2, 0));
        assert_eq!(uf.find(2), 1);
        assert_eq!(uf.find(0), 1);
        assert_eq!(uf.components(), 2);
    }

    #[test]
    fn test_union_of_connected_cells_is_rejected() {
        let mut uf = UnionFind::new(3);
        assert!(uf.union(0, 1));
        assert!(uf.union(1, 2));
        assert!(!uf.union(0, 2));
        assert_eq!(uf.find(2), uf.find(0));
        assert_eq!(uf.components(), 1);
    }

    #[test]
    fn test_find_is_stable_after_long_chain() {
        let mut uf = UnionFind::new(100);
        (0..99).for_each(|i| {
            uf.union(i, i + 1);
        });
        let root = uf.find(0);
        assert_eq!(root, 99);
        assert!((0..100).all(|i| uf.find(i) == root));
    }
}
