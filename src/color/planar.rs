use std::{cmp::Reverse, collections::{BinaryHeap, VecDeque}};

use anyhow::Result;
use geo::MultiPolygon;
use log::{debug, info};
use smallvec::SmallVec;

use crate::color::golden_angle_color;
use crate::geom::PlanarPartition;

/// Assigns each region an opaque color token such that regions sharing a
/// boundary never share a token.
pub trait ColoringService {
    fn assign(&self, shapes: &[&MultiPolygon<f64>]) -> Result<Vec<String>>;
}

/// Colors detected from geometry: rook adjacency via an R-tree, then a
/// smallest-last greedy coloring repaired with Kempe-chain swaps. Uses at most
/// five colors on planar subdivisions. Tokens are CSS `hsl(...)` fills.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlanarColoring;

/// Palette size guaranteed for planar maps.
const PLANAR_COLORS: u8 = 5;

impl ColoringService for PlanarColoring {
    fn assign(&self, shapes: &[&MultiPolygon<f64>]) -> Result<Vec<String>> {
        let mut partition = PlanarPartition::new(shapes.to_vec());
        partition.compute_adjacencies()?;

        let colors = color_graph(partition.adjacency());
        let used = colors.iter().copied().max().map_or(0, |c| c as usize + 1);
        info!("[color] {} regions colored with {} colors", partition.len(), used);

        Ok(colors.into_iter().map(|c| golden_angle_color(c as usize).to_string()).collect())
    }
}

/// Order vertices so that each has at most `degeneracy` neighbors later in the
/// sequence: repeatedly remove a vertex of minimum remaining degree.
fn smallest_last_order(adj: &[Vec<u32>]) -> Vec<usize> {
    let mut degree: Vec<usize> = adj.iter().map(Vec::len).collect();
    let mut removed = vec![false; adj.len()];
    let mut heap: BinaryHeap<Reverse<(usize, usize)>> = degree.iter().enumerate()
        .map(|(v, &d)| Reverse((d, v)))
        .collect();

    let mut order = Vec::with_capacity(adj.len());
    while let Some(Reverse((d, v))) = heap.pop() {
        if removed[v] || d != degree[v] { continue } // stale entry
        removed[v] = true;
        order.push(v);
        for &u in &adj[v] {
            let u = u as usize;
            if !removed[u] {
                degree[u] -= 1;
                heap.push(Reverse((degree[u], u)));
            }
        }
    }
    order
}

/// Color an undirected graph given as adjacency lists.
pub(crate) fn color_graph(adj: &[Vec<u32>]) -> Vec<u8> {
    let mut colors: Vec<Option<u8>> = vec![None; adj.len()];

    for v in smallest_last_order(adj).into_iter().rev() {
        let taken = neighbor_colors(adj, &colors, v);
        let color = match (0..PLANAR_COLORS).find(|c| !taken.contains(c)) {
            Some(c) => c,
            None => kempe_free_color(adj, &mut colors, v).unwrap_or_else(|| {
                let extra = (PLANAR_COLORS..).find(|c| !taken.contains(c)).unwrap_or(u8::MAX);
                debug!("[color] region {v}: no Kempe swap available, using extra color {extra}");
                extra
            }),
        };
        colors[v] = Some(color);
    }

    colors.into_iter().map(|c| c.unwrap_or(0)).collect()
}

fn neighbor_colors(adj: &[Vec<u32>], colors: &[Option<u8>], v: usize) -> SmallVec<[u8; 8]> {
    adj[v].iter().filter_map(|&u| colors[u as usize]).collect()
}

/// Try to free a palette color around `v` by swapping one Kempe chain.
///
/// For a pair (a, b), the a/b-colored component reachable from `v`'s a-colored
/// neighbors is swapped when it contains none of `v`'s b-colored neighbors;
/// afterwards no neighbor of `v` has color a.
fn kempe_free_color(adj: &[Vec<u32>], colors: &mut [Option<u8>], v: usize) -> Option<u8> {
    for a in 0..PLANAR_COLORS {
        for b in 0..PLANAR_COLORS {
            if a == b { continue }

            let starts: Vec<usize> = adj[v].iter().map(|&u| u as usize)
                .filter(|&u| colors[u] == Some(a))
                .collect();
            let chain = kempe_chain(adj, colors, &starts, a, b, v);

            let blocked = adj[v].iter().any(|&u| colors[u as usize] == Some(b) && chain[u as usize]);
            if blocked { continue }

            for (u, inside) in chain.iter().enumerate() {
                if *inside {
                    colors[u] = if colors[u] == Some(a) { Some(b) } else { Some(a) };
                }
            }
            return Some(a);
        }
    }
    None
}

/// Vertices reachable from `starts` through vertices colored `a` or `b`, never entering `skip`.
fn kempe_chain(adj: &[Vec<u32>], colors: &[Option<u8>], starts: &[usize], a: u8, b: u8, skip: usize) -> Vec<bool> {
    let mut seen = vec![false; adj.len()];
    let mut queue: VecDeque<usize> = VecDeque::new();
    for &s in starts {
        seen[s] = true;
        queue.push_back(s);
    }

    while let Some(u) = queue.pop_front() {
        for &w in &adj[u] {
            let w = w as usize;
            if w == skip || seen[w] { continue }
            if colors[w] == Some(a) || colors[w] == Some(b) {
                seen[w] = true;
                queue.push_back(w);
            }
        }
    }
    seen
}
