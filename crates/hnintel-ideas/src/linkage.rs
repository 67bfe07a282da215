//! Average-linkage agglomerative clustering over a dense distance matrix.
//!
//! Builds the full dendrogram once, then cuts it at a distance threshold.
//! Cluster ids follow the usual convention: leaves are `0..n`, the cluster
//! created by merge `k` is `n + k`.

/// Symmetric `n x n` distance matrix stored row-major.
#[derive(Debug, Clone, PartialEq)]
pub struct DistanceMatrix {
    n: usize,
    data: Vec<f64>,
}

impl DistanceMatrix {
    /// Cosine distances between rows, `max(0, 1 - similarity)`.
    ///
    /// Rows are expected to be L2-normalized; all-zero rows have similarity 0
    /// with everything.
    #[must_use]
    pub fn cosine(rows: &[Vec<f64>]) -> Self {
        let n = rows.len();
        let norms: Vec<f64> = rows
            .iter()
            .map(|r| r.iter().map(|v| v * v).sum::<f64>().sqrt())
            .collect();
        let mut data = vec![0.0; n * n];
        for i in 0..n {
            for j in (i + 1)..n {
                let dot: f64 = rows[i].iter().zip(&rows[j]).map(|(a, b)| a * b).sum();
                let denom = norms[i] * norms[j];
                let sim = if denom > 0.0 { dot / denom } else { 0.0 };
                let dist = (1.0 - sim).max(0.0);
                data[i * n + j] = dist;
                data[j * n + i] = dist;
            }
        }
        Self { n, data }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.n
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.n == 0
    }

    #[must_use]
    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.data[i * self.n + j]
    }

    fn set(&mut self, i: usize, j: usize, value: f64) {
        self.data[i * self.n + j] = value;
        self.data[j * self.n + i] = value;
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Merge {
    pub left: usize,
    pub right: usize,
    pub distance: f64,
    pub size: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Dendrogram {
    n_leaves: usize,
    merges: Vec<Merge>,
}

impl Dendrogram {
    #[must_use]
    pub fn merges(&self) -> &[Merge] {
        &self.merges
    }

    #[must_use]
    pub fn n_leaves(&self) -> usize {
        self.n_leaves
    }

    /// Flat cluster label for each leaf after applying every merge whose
    /// distance is `<= threshold`.
    ///
    /// Labels are dense and numbered by the lowest leaf index in each
    /// cluster, so leaf 0 is always in cluster 0.
    #[must_use]
    pub fn cut(&self, threshold: f64) -> Vec<usize> {
        let n = self.n_leaves;
        let mut parent: Vec<usize> = (0..n + self.merges.len()).collect();

        for (k, merge) in self.merges.iter().enumerate() {
            if merge.distance <= threshold {
                parent[merge.left] = n + k;
                parent[merge.right] = n + k;
            }
        }

        let mut root_label: Vec<Option<usize>> = vec![None; parent.len()];
        let mut next = 0;
        (0..n)
            .map(|leaf| {
                let mut node = leaf;
                while parent[node] != node {
                    node = parent[node];
                }
                *root_label[node].get_or_insert_with(|| {
                    next += 1;
                    next - 1
                })
            })
            .collect()
    }
}

/// Build an average-linkage (UPGMA) dendrogram.
///
/// Each step merges the closest pair of active clusters; equal distances go
/// to the pair with the lowest ids. Distances to the merged cluster follow
/// the size-weighted Lance-Williams update, written into `matrix` in place.
///
/// Every active cluster caches its nearest neighbour, so a step only rescans
/// the rows whose neighbour was one of the two merged clusters.
#[must_use]
pub fn average_linkage(mut matrix: DistanceMatrix) -> Dendrogram {
    let n = matrix.len();
    let mut clusters: Vec<Option<Cluster>> = (0..n)
        .map(|i| Some(Cluster { id: i, size: 1 }))
        .collect();
    let mut nearest: Vec<Option<Neighbour>> = (0..n)
        .map(|slot| nearest_neighbour(&matrix, &clusters, slot))
        .collect();
    let mut merges = Vec::with_capacity(n.saturating_sub(1));

    for step in 0..n.saturating_sub(1) {
        let Some((a, b, distance)) = closest_pair(&clusters, &nearest) else {
            break;
        };
        let (Some(ca), Some(cb)) = (clusters[a], clusters[b]) else {
            break;
        };
        let size = ca.size + cb.size;

        #[allow(clippy::cast_precision_loss)]
        let (wa, wb) = (ca.size as f64 / size as f64, cb.size as f64 / size as f64);
        for k in 0..n {
            if k == a || k == b || clusters[k].is_none() {
                continue;
            }
            let updated = wa * matrix.get(a, k) + wb * matrix.get(b, k);
            matrix.set(a, k, updated);
        }

        merges.push(Merge {
            left: ca.id.min(cb.id),
            right: ca.id.max(cb.id),
            distance,
            size,
        });
        clusters[a] = Some(Cluster { id: n + step, size });
        clusters[b] = None;
        nearest[b] = None;

        nearest[a] = nearest_neighbour(&matrix, &clusters, a);
        for k in 0..n {
            if k == a || clusters[k].is_none() {
                continue;
            }
            match nearest[k] {
                Some(nb) if nb.slot != a && nb.slot != b => {
                    // The merged cluster has the highest id, so it only
                    // displaces a cached neighbour when strictly closer.
                    let d = matrix.get(k, a);
                    if d < nb.distance {
                        nearest[k] = Some(Neighbour { slot: a, distance: d });
                    }
                }
                _ => nearest[k] = nearest_neighbour(&matrix, &clusters, k),
            }
        }
    }

    Dendrogram {
        n_leaves: n,
        merges,
    }
}

#[derive(Debug, Clone, Copy)]
struct Cluster {
    id: usize,
    size: usize,
}

#[derive(Debug, Clone, Copy)]
struct Neighbour {
    slot: usize,
    distance: f64,
}

/// Closest active cluster to `slot`; ties go to the lowest cluster id.
fn nearest_neighbour(
    matrix: &DistanceMatrix,
    clusters: &[Option<Cluster>],
    slot: usize,
) -> Option<Neighbour> {
    let mut best: Option<(Neighbour, usize)> = None;
    for (other, cluster) in clusters.iter().enumerate() {
        let Some(cluster) = cluster else { continue };
        if other == slot {
            continue;
        }
        let d = matrix.get(slot, other);
        let better = best.map_or(true, |(nb, id)| {
            d < nb.distance || (d == nb.distance && cluster.id < id)
        });
        if better {
            best = Some((Neighbour { slot: other, distance: d }, cluster.id));
        }
    }
    best.map(|(nb, _)| nb)
}

/// Globally closest pair of slots, lowest `(min id, max id)` on ties.
fn closest_pair(
    clusters: &[Option<Cluster>],
    nearest: &[Option<Neighbour>],
) -> Option<(usize, usize, f64)> {
    let mut best: Option<(usize, usize, f64, (usize, usize))> = None;
    for (slot, nb) in nearest.iter().enumerate() {
        let (Some(nb), Some(cluster)) = (nb, clusters[slot]) else {
            continue;
        };
        let Some(other) = clusters[nb.slot] else { continue };
        let ids = (cluster.id.min(other.id), cluster.id.max(other.id));
        let better = best.map_or(true, |(_, _, d, best_ids)| {
            nb.distance < d || (nb.distance == d && ids < best_ids)
        });
        if better {
            best = Some((slot.min(nb.slot), slot.max(nb.slot), nb.distance, ids));
        }
    }
    best.map(|(a, b, d, _)| (a, b, d))
}
