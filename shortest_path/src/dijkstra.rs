use indexed_heap::{Comparator, HeapError, IndexedHeap};
use ordered_float::OrderedFloat;

use crate::read_graph::Graph;

/// Orders vertices by their tentative distance from the source.
#[derive(Clone, Debug)]
struct ByDistance {
    distance: Vec<OrderedFloat<f64>>,
}

impl Comparator<usize> for ByDistance {
    #[inline(always)]
    fn less(&self, a: &usize, b: &usize) -> bool {
        self.distance[*a] < self.distance[*b]
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum ShortestPathError {
    /// The source is not a vertex of the graph.
    InvalidSource {
        source: usize,
        number_of_vertices: usize,
    },
    Heap(HeapError),
}

impl From<HeapError> for ShortestPathError {
    fn from(error: HeapError) -> Self {
        ShortestPathError::Heap(error)
    }
}

impl std::fmt::Display for ShortestPathError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ShortestPathError::InvalidSource {
                source,
                number_of_vertices,
            } => write!(
                f,
                "source vertex {} is out of range for graph with {} vertices",
                source, number_of_vertices
            ),
            ShortestPathError::Heap(error) => write!(f, "{}", error),
        }
    }
}

impl std::error::Error for ShortestPathError {}

#[derive(Clone, Debug)]
pub struct ShortestPaths {
    /// Infinite for vertices that cannot be reached.
    pub distance: Vec<OrderedFloat<f64>>,
    pub number_of_settled_vertices: usize,
    pub number_of_decrease_keys: usize,
}

pub fn dijkstra(graph: &Graph, source: usize) -> Result<ShortestPaths, ShortestPathError> {
    let number_of_vertices = graph.number_of_vertices;
    if source >= number_of_vertices {
        return Err(ShortestPathError::InvalidSource {
            source,
            number_of_vertices,
        });
    }

    let mut adjacency: Vec<Vec<(usize, OrderedFloat<f64>)>> = vec![Vec::default(); number_of_vertices];
    for arc in graph.arcs.iter() {
        adjacency[arc.from].push((arc.to, arc.weight));
    }

    let mut heap = IndexedHeap::with_capacity(
        ByDistance {
            distance: vec![OrderedFloat(f64::INFINITY); number_of_vertices],
        },
        number_of_vertices,
    );
    let mut settled = vec![false; number_of_vertices];
    let mut number_of_settled_vertices = 0;
    let mut number_of_decrease_keys = 0;

    heap.comparator_mut().distance[source] = OrderedFloat(0.0);
    heap.push(source)?;

    while !heap.is_empty() {
        let vertex = heap.pop()?;
        settled[vertex] = true;
        number_of_settled_vertices += 1;

        let base = heap.comparator().distance[vertex];
        for &(to, weight) in adjacency[vertex].iter() {
            if settled[to] {
                continue;
            }
            let candidate = base + weight;
            if candidate >= heap.comparator().distance[to] {
                continue;
            }
            heap.comparator_mut().distance[to] = candidate;
            match heap.index_of(&to) {
                Some(slot) => {
                    // only `to` got smaller, so it can only move up
                    heap.fix(slot)?;
                    number_of_decrease_keys += 1;
                }
                None => heap.push(to)?,
            }
        }
    }

    return Ok(ShortestPaths {
        distance: std::mem::take(&mut heap.comparator_mut().distance),
        number_of_settled_vertices,
        number_of_decrease_keys,
    });
}
