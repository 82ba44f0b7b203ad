//! Single-source shortest paths with Dijkstra's algorithm.
//!
//! Graphs are adjacency lists: entry `u` holds the outgoing edges of node `u`
//! as `(neighbor, weight)` pairs. Every weight must be non-negative; the
//! whole adjacency list is checked before traversal, so a negative edge is
//! reported even when it is unreachable from the source.
//!
//! # Algorithm
//!
//! Lazy-deletion Dijkstra: an improved tentative distance pushes a fresh
//! queue entry, and entries for already-settled nodes are discarded when
//! popped.
//!
//! Reference: Cormen et al. (2009), *Introduction to Algorithms*, §24.3.
//!
//! # Complexity
//! O((n + E) log n) with the binary-heap [`MinQueue`].
//!
//! # Examples
//!
//! ```
//! use u_numkit::shortest_path::dijkstra;
//!
//! let adj = vec![
//!     vec![(1, 1.0), (2, 4.0)],
//!     vec![(2, 2.0), (3, 5.0)],
//!     vec![(3, 1.0)],
//!     vec![],
//! ];
//! assert_eq!(dijkstra(4, &adj, 0).unwrap(), vec![0.0, 1.0, 3.0, 4.0]);
//! ```

use log::trace;

use crate::collections::MinQueue;
use crate::error::{NumError, Result};

/// Owned adjacency list: `adjacency[u]` lists `(v, weight)` for each edge `u → v`.
pub type AdjacencyList = Vec<Vec<(usize, f64)>>;

/// Shortest-path tree from a single source.
#[derive(Debug, Clone, PartialEq)]
pub struct ShortestPaths {
    source: usize,
    distances: Vec<f64>,
    predecessors: Vec<Option<usize>>,
}

impl ShortestPaths {
    /// Source node.
    pub fn source(&self) -> usize {
        self.source
    }

    /// Distance from the source to every node; unreachable nodes hold `f64::INFINITY`.
    pub fn distances(&self) -> &[f64] {
        &self.distances
    }

    /// Predecessor of each node on a shortest path, `None` for the source
    /// and for unreachable nodes.
    pub fn predecessors(&self) -> &[Option<usize>] {
        &self.predecessors
    }

    /// Distance to `node`, or `None` if it is out of range.
    pub fn distance(&self, node: usize) -> Option<f64> {
        self.distances.get(node).copied()
    }

    /// Returns true if `node` is reachable from the source.
    pub fn is_reachable(&self, node: usize) -> bool {
        self.distance(node).is_some_and(f64::is_finite)
    }

    /// Node sequence of a shortest path from the source to `target`, both
    /// ends included. `None` if `target` is unreachable or out of range.
    ///
    /// # Examples
    /// ```
    /// use u_numkit::shortest_path::dijkstra_with_predecessors;
    ///
    /// let adj = vec![vec![(1, 1.0), (2, 5.0)], vec![(2, 1.0)], vec![]];
    /// let sp = dijkstra_with_predecessors(3, &adj, 0).unwrap();
    /// assert_eq!(sp.path_to(2), Some(vec![0, 1, 2]));
    /// ```
    pub fn path_to(&self, target: usize) -> Option<Vec<usize>> {
        if !self.is_reachable(target) {
            return None;
        }
        let mut path = vec![target];
        let mut node = target;
        while let Some(prev) = self.predecessors[node] {
            path.push(prev);
            node = prev;
        }
        path.reverse();
        Some(path)
    }

    /// Consumes the tree, returning the distance vector.
    pub fn into_distances(self) -> Vec<f64> {
        self.distances
    }
}

/// Shortest distances from `source` to every node of an `n`-node graph.
///
/// # Errors
/// - `InvalidDimensions` if `adjacency.len() != n`
/// - `NodeOutOfRange` if `source` or any edge endpoint is `>= n`
/// - `NegativeWeight` if any edge weight is negative or NaN
pub fn dijkstra(n: usize, adjacency: &[Vec<(usize, f64)>], source: usize) -> Result<Vec<f64>> {
    dijkstra_with_predecessors(n, adjacency, source).map(ShortestPaths::into_distances)
}

/// Like [`dijkstra`], additionally recording predecessors for path
/// reconstruction.
pub fn dijkstra_with_predecessors(
    n: usize,
    adjacency: &[Vec<(usize, f64)>],
    source: usize,
) -> Result<ShortestPaths> {
    validate(n, adjacency, source)?;

    let mut distances = vec![f64::INFINITY; n];
    let mut predecessors = vec![None; n];
    let mut visited = vec![false; n];
    distances[source] = 0.0;

    let mut queue = MinQueue::with_capacity(n);
    queue.push(0.0, source);

    while let Some((d, u)) = queue.pop() {
        if visited[u] {
            trace!("dijkstra: stale entry ({d}, {u})");
            continue;
        }
        visited[u] = true;
        for &(v, w) in &adjacency[u] {
            let alt = d + w;
            if alt < distances[v] {
                distances[v] = alt;
                predecessors[v] = Some(u);
                queue.push(alt, v);
            }
        }
    }

    Ok(ShortestPaths {
        source,
        distances,
        predecessors,
    })
}

fn validate(n: usize, adjacency: &[Vec<(usize, f64)>], source: usize) -> Result<()> {
    if adjacency.len() != n {
        return Err(NumError::InvalidDimensions {
            expected: (n, 1),
            got: (adjacency.len(), 1),
        });
    }
    if source >= n {
        return Err(NumError::NodeOutOfRange { node: source, n });
    }
    for (from, edges) in adjacency.iter().enumerate() {
        for &(to, weight) in edges {
            if to >= n {
                return Err(NumError::NodeOutOfRange { node: to, n });
            }
            // NaN also fails this comparison
            if !(weight >= 0.0) {
                return Err(NumError::NegativeWeight { from, to, weight });
            }
        }
    }
    Ok(())
}
