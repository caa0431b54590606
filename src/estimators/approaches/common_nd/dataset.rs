// SPDX-FileCopyrightText: 2025-2026 Carlson Büth <code@cbueth.de>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

use std::cmp::Ordering;
use std::num::NonZeroUsize;

use kiddo::{ImmutableKdTree, SquaredEuclidean};
use ndarray::{Array2, ArrayView2};

/// Samples below this count are always searched by brute force.
const MIN_TREE_SAMPLES: usize = 64;

/// Chebyshev distance (L-infinity norm) between two points.
pub fn chebyshev(a: &[f64], b: &[f64]) -> f64 {
    let mut max = 0.0;
    for (x, y) in a.iter().zip(b.iter()) {
        let diff = (x - y).abs();
        if diff > max {
            max = diff;
        }
    }
    max
}

/// Order by distance, then by sample index.
fn by_distance(a: &(f64, usize), b: &(f64, usize)) -> Ordering {
    a.0.total_cmp(&b.0).then(a.1.cmp(&b.1))
}

/// KD-tree over fixed-width copies of the samples.
///
/// The tree is searched with the Euclidean metric. A max-norm box of half
/// width `r` lies inside the Euclidean ball of radius `r * sqrt(K)`, so ball
/// queries return a superset that the caller filters with [`chebyshev`].
struct KdTree<const K: usize> {
    points: Vec<[f64; K]>,
    tree: ImmutableKdTree<f64, K>,
}

impl<const K: usize> KdTree<K> {
    fn new(rows: &[Vec<f64>]) -> Self {
        let points: Vec<[f64; K]> = rows
            .iter()
            .map(|row| {
                let mut p = [0.0; K];
                p.copy_from_slice(row);
                p
            })
            .collect();
        let tree = ImmutableKdTree::new_from_slice(&points);
        Self { points, tree }
    }

    /// Samples that may lie within max-norm `radius` of sample `i`, self included.
    fn candidates(&self, i: usize, radius: f64) -> Vec<usize> {
        let squared = K as f64 * radius * radius;
        let slack = squared * 1e-9 + 1e-12;
        self.tree
            .within_unsorted::<SquaredEuclidean>(&self.points[i], squared + slack)
            .into_iter()
            .map(|nn| nn.item as usize)
            .collect()
    }

    /// Euclidean radius holding at least `k` samples other than `i`.
    ///
    /// The max-norm never exceeds the Euclidean norm, so the k-th max-norm
    /// neighbour lies within the same radius.
    fn cover_radius(&self, i: usize, k: usize) -> f64 {
        self.tree
            .nearest_n::<SquaredEuclidean>(&self.points[i], NonZeroUsize::MIN.saturating_add(k))
            .into_iter()
            .map(|nn| nn.distance)
            .fold(0.0, f64::max)
            .sqrt()
    }
}

/// Const-generic trees for the widths the k-NN estimators meet most.
enum KdIndex {
    D1(KdTree<1>),
    D2(KdTree<2>),
    D3(KdTree<3>),
    D4(KdTree<4>),
}

impl KdIndex {
    fn build(points: &[Vec<f64>], dims: usize) -> Option<Self> {
        if points.len() < MIN_TREE_SAMPLES {
            return None;
        }
        match dims {
            1 => Some(KdIndex::D1(KdTree::new(points))),
            2 => Some(KdIndex::D2(KdTree::new(points))),
            3 => Some(KdIndex::D3(KdTree::new(points))),
            4 => Some(KdIndex::D4(KdTree::new(points))),
            _ => None,
        }
    }

    fn candidates(&self, i: usize, radius: f64) -> Vec<usize> {
        match self {
            KdIndex::D1(t) => t.candidates(i, radius),
            KdIndex::D2(t) => t.candidates(i, radius),
            KdIndex::D3(t) => t.candidates(i, radius),
            KdIndex::D4(t) => t.candidates(i, radius),
        }
    }

    fn cover_radius(&self, i: usize, k: usize) -> f64 {
        match self {
            KdIndex::D1(t) => t.cover_radius(i, k),
            KdIndex::D2(t) => t.cover_radius(i, k),
            KdIndex::D3(t) => t.cover_radius(i, k),
            KdIndex::D4(t) => t.cover_radius(i, k),
        }
    }
}

/// Shared N-D dataset container for neighbour queries under the max-norm.
///
/// The dimensionality is a runtime value, since lagged joint spaces are
/// assembled from channels of arbitrary width. Spaces of one to four columns
/// are indexed by a KD-tree; wider ones and small sample counts fall back to
/// brute force. Both paths return the same neighbours.
pub struct NdDataset {
    pub points: Vec<Vec<f64>>,
    pub n: usize,
    pub dims: usize,
    index: Option<KdIndex>,
}

impl NdDataset {
    fn from_points(points: Vec<Vec<f64>>, dims: usize) -> Self {
        let index = KdIndex::build(&points, dims);
        Self {
            n: points.len(),
            dims,
            points,
            index,
        }
    }

    /// Dataset that always answers by brute force.
    pub fn brute_force(data: ArrayView2<'_, f64>) -> Self {
        let mut ds = Self::from_view(data);
        ds.index = None;
        ds
    }

    pub fn from_view(data: ArrayView2<'_, f64>) -> Self {
        let points = data.rows().into_iter().map(|row| row.to_vec()).collect();
        Self::from_points(points, data.ncols())
    }

    pub fn from_array2(data: Array2<f64>) -> Self {
        Self::from_view(data.view())
    }

    /// Joint space of several datasets over the same samples, coordinates side by side.
    pub fn join(parts: &[&NdDataset]) -> Self {
        let n = parts.first().map_or(0, |p| p.n);
        assert!(parts.iter().all(|p| p.n == n), "joined datasets must share samples");
        let points = (0..n)
            .map(|i| parts.iter().flat_map(|p| p.points[i].iter().copied()).collect())
            .collect();
        Self::from_points(points, parts.iter().map(|p| p.dims).sum())
    }

    pub fn is_indexed(&self) -> bool {
        self.index.is_some()
    }

    /// Max-norm distance between two samples.
    pub fn distance(&self, i: usize, j: usize) -> f64 {
        chebyshev(&self.points[i], &self.points[j])
    }

    /// Distances from sample `i` to the other samples that may lie within
    /// `radius`; without an index, or with an unbounded radius, all of them.
    fn distances_near(&self, i: usize, radius: f64) -> Vec<(f64, usize)> {
        let others: Box<dyn Iterator<Item = usize>> = match &self.index {
            Some(index) if radius.is_finite() => {
                Box::new(index.candidates(i, radius).into_iter())
            }
            _ => Box::new(0..self.n),
        };
        others
            .filter(|&j| j != i)
            .map(|j| (self.distance(i, j), j))
            .collect()
    }

    /// Candidate neighbours of sample `i` that include its `k` nearest.
    fn neighbourhood(&self, i: usize, k: usize) -> Vec<(f64, usize)> {
        let radius = match &self.index {
            Some(index) => index.cover_radius(i, k),
            None => f64::INFINITY,
        };
        self.distances_near(i, radius)
    }

    /// Indices of the `k` nearest neighbours of sample `i` (self excluded),
    /// closest first with ties broken by index.
    pub fn k_nearest(&self, i: usize, k: usize) -> Vec<usize> {
        assert!(k >= 1);
        assert!(k < self.n, "k must be <= N-1 for self-queries");
        let mut dists = self.neighbourhood(i, k);
        dists.select_nth_unstable_by(k - 1, by_distance);
        dists.truncate(k);
        dists.sort_by(by_distance);
        dists.into_iter().map(|(_, j)| j).collect()
    }

    /// Distance to the k-th neighbour per point (self excluded).
    pub fn kth_neighbor_radii(&self, k: usize) -> Vec<f64> {
        assert!(k >= 1);
        if self.n == 0 {
            return Vec::new();
        }
        assert!(k < self.n, "k must be <= N-1 for self-queries");
        (0..self.n)
            .map(|i| {
                let mut dists = self.neighbourhood(i, k);
                dists.select_nth_unstable_by(k - 1, by_distance);
                dists[k - 1].0
            })
            .collect()
    }

    /// Number of other samples strictly closer than `radius` to sample `i`.
    pub fn count_within(&self, i: usize, radius: f64) -> usize {
        self.distances_near(i, radius)
            .into_iter()
            .filter(|&(d, _)| d < radius)
            .count()
    }

    /// Number of other samples at most `radius` away from sample `i`.
    pub fn count_within_closed(&self, i: usize, radius: f64) -> usize {
        self.distances_near(i, radius)
            .into_iter()
            .filter(|&(d, _)| d <= radius)
            .count()
    }
}
