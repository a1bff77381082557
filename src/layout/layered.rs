use super::{LayoutDirection, LayoutRequest, LayoutResponse, LayoutSolver};
use crate::error::LayoutError;
use crate::graph::XYPosition;
use ahash::{AHashMap, AHashSet};
use itertools::Itertools;
use std::collections::VecDeque;
use std::future::{Future, ready};

/// Built-in solver: longest-path ranking, each rank centred on the main axis.
///
/// Strategy graphs are shallow trees, so a single barycenter pass is enough to keep
/// children under their parents.
#[derive(Debug, Clone, Copy, Default)]
pub struct LayeredSolver;

impl LayoutSolver for LayeredSolver {
    fn solve(
        &self,
        request: LayoutRequest,
    ) -> impl Future<Output = Result<LayoutResponse, LayoutError>> + Send {
        ready(Ok(compute(&request)))
    }
}

fn compute(request: &LayoutRequest) -> LayoutResponse {
    let params = &request.params;
    let ranks = compute_ranks(request);
    let max_rank = ranks.values().copied().max().unwrap_or(0);

    // Buckets keep the request's node order; that order is the tie breaker below.
    let mut buckets: Vec<Vec<usize>> = vec![Vec::new(); max_rank + 1];
    for (index, node) in request.nodes.iter().enumerate() {
        let rank = ranks.get(node.id.as_str()).copied().unwrap_or(0);
        buckets[rank].push(index);
    }

    if params.center_parents {
        order_by_parents(&mut buckets, request);
    }

    let horizontal = params.direction == LayoutDirection::LeftRight;
    let extent = |index: usize| {
        let node = &request.nodes[index];
        if horizontal {
            (node.height, node.width)
        } else {
            (node.width, node.height)
        }
    };

    let mut positions = AHashMap::with_capacity(request.nodes.len());
    let mut main_cursor = 0.0;
    for bucket in &buckets {
        let cross_total: f64 = bucket.iter().map(|&i| extent(i).0).sum::<f64>()
            + params.node_spacing * bucket.len().saturating_sub(1) as f64;
        let mut cross_cursor = -cross_total / 2.0;
        let mut max_main: f64 = 0.0;

        for &index in bucket {
            let (cross, main) = extent(index);
            let position = if horizontal {
                XYPosition::new(main_cursor, cross_cursor)
            } else {
                XYPosition::new(cross_cursor, main_cursor)
            };
            positions.insert(request.nodes[index].id.clone(), position);
            cross_cursor += cross + params.node_spacing;
            max_main = max_main.max(main);
        }

        main_cursor += max_main + params.rank_spacing;
    }

    LayoutResponse { positions }
}

/// Longest-path rank of every node. Nodes caught in a cycle keep the rank reached so far.
fn compute_ranks(request: &LayoutRequest) -> AHashMap<&str, usize> {
    let known: AHashSet<&str> = request.nodes.iter().map(|n| n.id.as_str()).collect();
    let mut indegree: AHashMap<&str, usize> = known.iter().map(|id| (*id, 0)).collect();
    let mut outgoing: AHashMap<&str, Vec<&str>> = AHashMap::new();

    for edge in &request.edges {
        let (source, target) = (edge.source.as_str(), edge.target.as_str());
        if !known.contains(source) || !known.contains(target) {
            continue;
        }
        outgoing.entry(source).or_default().push(target);
        *indegree.entry(target).or_insert(0) += 1;
    }

    let mut queue: VecDeque<&str> = request
        .nodes
        .iter()
        .map(|n| n.id.as_str())
        .filter(|id| indegree.get(id).copied() == Some(0))
        .collect();

    let mut ranks: AHashMap<&str, usize> = AHashMap::new();
    while let Some(node) = queue.pop_front() {
        let rank = *ranks.entry(node).or_insert(0);
        for &next in outgoing.get(node).into_iter().flatten() {
            let entry = ranks.entry(next).or_insert(0);
            *entry = (*entry).max(rank + 1);
            if let Some(degree) = indegree.get_mut(next) {
                *degree -= 1;
                if *degree == 0 {
                    queue.push_back(next);
                }
            }
        }
    }

    for node in &request.nodes {
        ranks.entry(node.id.as_str()).or_insert(0);
    }
    ranks
}

/// Sorts every rank below the first by the mean slot of its parents in the rank above.
fn order_by_parents(buckets: &mut [Vec<usize>], request: &LayoutRequest) {
    let parents = request
        .edges
        .iter()
        .map(|e| (e.target.as_str(), e.source.as_str()))
        .into_group_map();

    for rank in 1..buckets.len() {
        let slots: AHashMap<&str, usize> = buckets[rank - 1]
            .iter()
            .enumerate()
            .map(|(slot, &index)| (request.nodes[index].id.as_str(), slot))
            .collect();

        let score = |index: usize| -> f64 {
            let own = &request.nodes[index].id;
            let placed: Vec<usize> = parents
                .get(own.as_str())
                .into_iter()
                .flatten()
                .filter_map(|p| slots.get(p).copied())
                .collect();
            if placed.is_empty() {
                f64::MAX
            } else {
                placed.iter().sum::<usize>() as f64 / placed.len() as f64
            }
        };

        // Stable sort: equal scores keep request order.
        buckets[rank].sort_by(|&a, &b| score(a).total_cmp(&score(b)));
    }
}
