pub type Node = u32;

pub type Edge = [Node; 2];

/// Per-vertex degree counters of one instance. Vertex `v` (zero-indexed) lives at `degrees[v]`.
#[derive(Clone, PartialEq, Eq, Default)]
pub struct DegreeTable {
    degrees: Vec<usize>,
}

impl std::fmt::Debug for DegreeTable {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        return write!(f, "A degree table with {} nodes and the following degrees: {:?}", self.nnodes(), self.degrees);
    }
}

impl DegreeTable {
    pub fn new_disconnected(nnodes: usize) -> Self {
        return DegreeTable { degrees: vec![0; nnodes] };
    }

    pub fn nnodes(&self) -> usize {
        return self.degrees.len();
    }

    fn contains(&self, v: Node) -> bool {
        return (v as usize) < self.degrees.len();
    }

    fn degree_mut(&mut self, v: Node) -> &mut usize {
        if !self.contains(v) {
            panic!("node out of bounds");
        }
        return &mut self.degrees[v as usize];
    }

    /// Counts one undirected edge. A self loop adds two to its vertex.
    pub fn add_edge(&mut self, from: Node, to: Node) {
        *self.degree_mut(from) += 1;
        *self.degree_mut(to) += 1;
    }

    pub fn degrees(&self) -> &[usize] {
        return &self.degrees;
    }

    pub fn degree_sum(&self) -> usize {
        return self.degrees.iter().sum();
    }

    /// 0 for a table without edges (and for an empty table).
    pub fn max_degree(&self) -> usize {
        return self.degrees.iter().copied().max().unwrap_or(0);
    }

    /// 0 for an empty table.
    pub fn min_degree(&self) -> usize {
        return self.degrees.iter().copied().min().unwrap_or(0);
    }

    /// lowest numbered vertex attaining the maximum degree
    pub fn max_vertex(&self) -> Option<Node> {
        return self.first_vertex_where(|d, best| d > best);
    }

    /// lowest numbered vertex attaining the minimum degree
    pub fn min_vertex(&self) -> Option<Node> {
        return self.first_vertex_where(|d, best| d < best);
    }

    // first vertex whose degree beats every earlier one according to `better`
    fn first_vertex_where<F: Fn(usize, usize) -> bool>(&self, better: F) -> Option<Node> {
        let mut best: Option<(Node, usize)> = None;
        for (v, &d) in (0..).zip(&self.degrees) {
            match best {
                Some((_, bd)) if !better(d, bd) => {}
                _ => best = Some((v, d)),
            }
        }
        return best.map(|(v, _)| v);
    }
}

impl Extend<Edge> for DegreeTable {
    fn extend<I: IntoIterator<Item = Edge>>(&mut self, edges: I) {
        for [a, b] in edges {
            self.add_edge(a, b);
        }
    }
}

#[test]
fn test_degrees() {
    // nodes 5, edges (1,2),(2,3),(2,4) one-indexed
    let mut t = DegreeTable::new_disconnected(5);
    t.extend([[0, 1], [1, 2], [1, 3]]);
    assert_eq!(t.degrees(), &[1, 3, 1, 1, 0]);
    assert_eq!(t.max_degree(), 3);
    assert_eq!(t.max_vertex(), Some(1));
    assert_eq!(t.min_degree(), 0);
    assert_eq!(t.min_vertex(), Some(4));
    assert_eq!(t.degree_sum(), 6);

    let t = DegreeTable::new_disconnected(4);
    assert_eq!(t.max_degree(), 0);
    assert_eq!(t.max_vertex(), Some(0));
    assert_eq!(t.min_vertex(), Some(0));

    let t = DegreeTable::default();
    assert_eq!(t.max_degree(), 0);
    assert_eq!(t.min_degree(), 0);
    assert_eq!(t.max_vertex(), None);
    assert_eq!(t.min_vertex(), None);
}

#[test]
fn test_min_degree_ties() {
    // path 1-2-3-4: the ends have degree 1, the lowest one wins
    let mut t = DegreeTable::new_disconnected(4);
    t.extend([[0, 1], [1, 2], [2, 3]]);
    assert_eq!(t.degrees(), &[1, 2, 2, 1]);
    assert_eq!(t.min_degree(), 1);
    assert_eq!(t.min_vertex(), Some(0));
    assert_eq!(t.max_degree(), 2);
    assert_eq!(t.max_vertex(), Some(1));
}

#[test]
fn test_self_loop_and_parallel() {
    let mut t = DegreeTable::new_disconnected(3);
    t.add_edge(2, 2);
    assert_eq!(t.degrees()[2], 2);
    t.add_edge(0, 1);
    t.add_edge(1, 0);
    assert_eq!(t.degrees(), &[2, 2, 2]);
    assert_eq!(t.max_vertex(), Some(0));
    assert!(t.contains(2));
    assert!(!t.contains(3));
}

#[test]
#[should_panic(expected = "node out of bounds")]
fn test_out_of_bounds() {
    let mut t = DegreeTable::new_disconnected(2);
    t.add_edge(0, 2);
}
