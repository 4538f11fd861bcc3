//! Representation of simple undirected graphs
//! as adjacency lists, together with colorings
//! over them and the independent coloring
//! verifier.

pub type VertexIndex = usize;
pub type Color = i32;

/// Marker for a vertex that has not been assigned a color yet.
pub const UNCOLORED: Color = -1;

/// A (possibly partial) color assignment, indexed by vertex.
pub type Assignment = Vec<Color>;

#[derive(Debug, PartialEq, Eq)]
pub struct GraphError(pub i64);

/// Fixed size undirected graph. Immutable once all edges are added.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct Graph {
    adjacency: Vec<Vec<VertexIndex>>,
    edge_number: usize,
}

impl Graph {
    pub fn new(n: usize) -> Self {
        Graph {
            adjacency: vec![Vec::new(); n],
            edge_number: 0,
        }
    }

    pub fn size(&self) -> usize {
        self.adjacency.len()
    }

    pub fn number_edges(&self) -> usize {
        self.edge_number
    }

    /// Add the undirected edge {start, end}. Self-loops are
    /// dropped silently; parallel edges are kept as-is.
    pub fn add_edge(&mut self, start: VertexIndex, end: VertexIndex) -> Result<(), GraphError> {
        let n = self.size();
        if start >= n {
            return Err(GraphError(start as i64));
        }
        if end >= n {
            return Err(GraphError(end as i64));
        }
        if start == end {
            return Ok(());
        }

        self.adjacency[start].push(end);
        self.adjacency[end].push(start);
        self.edge_number += 1;
        Ok(())
    }

    pub fn neighbors(&self, vertex: VertexIndex) -> &[VertexIndex] {
        &self.adjacency[vertex]
    }

    /// Original degree of every vertex, derived once per solve.
    pub fn degrees(&self) -> Vec<usize> {
        self.adjacency.iter().map(Vec::len).collect()
    }

    pub fn iterate_edges(&self) -> impl Iterator<Item = (VertexIndex, VertexIndex)> + '_ {
        self.adjacency
            .iter()
            .enumerate()
            .flat_map(|(start, ends)| ends.iter().map(move |end| (start, *end)))
    }
}

/// Decide whether `color` is a proper k-coloring of `graph`:
/// complete, within the palette and with no monochromatic edge.
pub fn verify_coloring(graph: &Graph, color: &[Color], k: usize) -> bool {
    if color.len() != graph.size() {
        return false;
    }

    for u in 0..graph.size() {
        if color[u] < 0 || color[u] >= k as Color {
            return false;
        }
        for &v in graph.neighbors(u) {
            if u < v && color[u] == color[v] {
                return false;
            }
        }
    }

    true
}
