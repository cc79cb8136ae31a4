use anyhow::Result;
use geo::{BoundingRect, MultiPolygon, Relate};
use rstar::{RTree, AABB};

use crate::geom::bbox::BoundingBox;

/// A set of regions indexed for spatial queries, with their rook adjacency.
#[derive(Debug, Clone)]
pub(crate) struct PlanarPartition<'a> {
    shapes: Vec<&'a MultiPolygon<f64>>,
    rtree: RTree<BoundingBox>,
    adj_list: Vec<Vec<u32>>,
}

impl<'a> PlanarPartition<'a> {
    /// Index the given shapes. Empty shapes are kept (so indices line up) but never adjacent.
    pub(crate) fn new(shapes: Vec<&'a MultiPolygon<f64>>) -> Self {
        Self {
            rtree: RTree::bulk_load(shapes.iter().enumerate()
                .filter_map(|(i, shape)| shape.bounding_rect().map(|rect| BoundingBox::new(i, rect)))
                .collect()),
            adj_list: vec![Vec::new(); shapes.len()],
            shapes,
        }
    }

    #[inline] pub(crate) fn len(&self) -> usize { self.shapes.len() }

    /// Sorted neighbor lists, one per region.
    #[inline] pub(crate) fn adjacency(&self) -> &[Vec<u32>] { &self.adj_list }

    /// Populate the adjacency lists with rook contiguity (shared boundary of positive length).
    /// Uses the DE-9IM boundary/boundary entry (index 4) having dimension 1.
    pub(crate) fn compute_adjacencies(&mut self) -> Result<()> {
        for nbrs in &mut self.adj_list {
            nbrs.clear();
        }

        for i in 0..self.shapes.len() {
            let Some(rect) = self.shapes[i].bounding_rect() else { continue };
            let search = AABB::from_corners(rect.min().into(), rect.max().into());

            for cand in self.rtree.locate_in_envelope_intersecting(&search) {
                let j = cand.idx();
                if j <= i { continue } // check each unordered pair once

                // Boxes that only meet at a corner cannot share an edge.
                let overlap = cand.bbox();
                if overlap.min().x.max(rect.min().x) == overlap.max().x.min(rect.max().x)
                    && overlap.min().y.max(rect.min().y) == overlap.max().y.min(rect.max().y) {
                    continue;
                }

                let im = self.shapes[i].relate(self.shapes[j]);
                if im.matches("****1****")? {
                    self.adj_list[i].push(j as u32);
                    self.adj_list[j].push(i as u32);
                }
            }
        }

        for nbrs in &mut self.adj_list {
            nbrs.sort_unstable();
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::polygon;

    fn square(x: f64, y: f64) -> MultiPolygon<f64> {
        MultiPolygon(vec![polygon![
            (x: x, y: y), (x: x + 1.0, y: y), (x: x + 1.0, y: y + 1.0), (x: x, y: y + 1.0)
        ]])
    }

    #[test]
    fn shared_edge_is_adjacent_corner_is_not() {
        // 0 | 1
        // --+--
        //   | 2   (2 touches 0 only at a corner)
        let shapes = [square(0.0, 1.0), square(1.0, 1.0), square(1.0, 0.0), square(5.0, 5.0)];
        let mut partition = PlanarPartition::new(shapes.iter().collect());
        partition.compute_adjacencies().unwrap();

        assert_eq!(partition.len(), 4);
        assert_eq!(partition.adjacency()[0], vec![1]);
        assert_eq!(partition.adjacency()[1], vec![0, 2]);
        assert_eq!(partition.adjacency()[2], vec![1]);
        assert!(partition.adjacency()[3].is_empty());
    }

    #[test]
    fn empty_shape_has_no_neighbors() {
        let shapes = [square(0.0, 0.0), MultiPolygon(vec![]), square(1.0, 0.0)];
        let mut partition = PlanarPartition::new(shapes.iter().collect());
        partition.compute_adjacencies().unwrap();
        assert!(partition.adjacency()[1].is_empty());
        assert_eq!(partition.adjacency()[0], vec![2]);
    }
}
