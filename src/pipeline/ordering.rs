// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Resolution of before/after constraints into a total step order.
//!
//! # Validation
//!
//! 1. **Uniqueness**: every step and anchor id appears once
//! 2. **References**: every constraint names a known id
//! 3. **Acyclicity**: Kahn's algorithm consumes every node
//!
//! Uniqueness and reference errors are accumulated and reported together;
//! ordering is only attempted on a structurally valid graph.
//!
//! # Algorithm
//!
//! Each constraint becomes an edge `earlier → later`. Kahn's algorithm then
//! repeatedly emits the ready node (in-degree zero) with the lowest
//! registration index, so unconstrained steps keep their registration order
//! and the result is deterministic.
//!
//! **Time Complexity**: O((V + E) log V)

use std::collections::{BTreeSet, HashMap, HashSet};

use crate::errors::OrderingError;

/// One node in the ordering graph, borrowed from a registration or anchor.
pub(crate) struct OrderingNode<'a> {
    pub id: &'a str,
    pub insert_before: &'a [String],
    pub insert_after: &'a [String],
}

/// Returns node indices in execution order.
pub(crate) fn resolve_order(nodes: &[OrderingNode<'_>]) -> Result<Vec<usize>, Vec<OrderingError>> {
    let mut errors = Vec::new();
    let mut index_of: HashMap<&str, usize> = HashMap::with_capacity(nodes.len());

    for (index, node) in nodes.iter().enumerate() {
        if index_of.insert(node.id, index).is_some() {
            errors.push(OrderingError::DuplicateStepId {
                step_id: node.id.to_string(),
            });
        }
    }

    for node in nodes {
        for reference in node.insert_before.iter().chain(node.insert_after) {
            if !index_of.contains_key(reference.as_str()) {
                errors.push(OrderingError::UnresolvedStepReference {
                    step_id: node.id.to_string(),
                    missing_step: reference.clone(),
                });
            }
        }
    }

    if !errors.is_empty() {
        return Err(errors);
    }

    let mut successors: Vec<Vec<usize>> = vec![Vec::new(); nodes.len()];
    let mut in_degree = vec![0usize; nodes.len()];
    let mut add_edge = |from: usize, to: usize| {
        successors[from].push(to);
        in_degree[to] += 1;
    };

    for (index, node) in nodes.iter().enumerate() {
        for later in node.insert_before {
            add_edge(index, index_of[later.as_str()]);
        }
        for earlier in node.insert_after {
            add_edge(index_of[earlier.as_str()], index);
        }
    }

    let mut ready: BTreeSet<usize> = (0..nodes.len()).filter(|&i| in_degree[i] == 0).collect();
    let mut order = Vec::with_capacity(nodes.len());

    while let Some(index) = ready.pop_first() {
        order.push(index);
        for &successor in &successors[index] {
            in_degree[successor] -= 1;
            if in_degree[successor] == 0 {
                ready.insert(successor);
            }
        }
    }

    if order.len() != nodes.len() {
        let placed: HashSet<usize> = order.iter().copied().collect();
        let cycle = extract_cycle(nodes, &successors, &placed);
        return Err(vec![OrderingError::CyclicOrdering { cycle }]);
    }

    Ok(order)
}

/// Finds one cycle among the nodes Kahn's algorithm could not place.
///
/// Every unplaced node has at least one unplaced predecessor, so walking
/// predecessors from any unplaced node must revisit a node. The revisited
/// segment, reversed and prefixed with the repeated node, is the cycle in
/// edge direction.
fn extract_cycle(
    nodes: &[OrderingNode<'_>],
    successors: &[Vec<usize>],
    placed: &HashSet<usize>,
) -> Vec<String> {
    let mut predecessors: Vec<Vec<usize>> = vec![Vec::new(); nodes.len()];
    for (from, targets) in successors.iter().enumerate() {
        for &to in targets {
            predecessors[to].push(from);
        }
    }

    let Some(start) = (0..nodes.len()).find(|i| !placed.contains(i)) else {
        return Vec::new();
    };

    let mut path = Vec::new();
    let mut position: HashMap<usize, usize> = HashMap::new();
    let mut current = start;

    loop {
        if let Some(&cycle_start) = position.get(&current) {
            return std::iter::once(current)
                .chain(path[cycle_start..].iter().rev().copied())
                .map(|i| nodes[i].id.to_string())
                .collect();
        }
        position.insert(current, path.len());
        path.push(current);

        match predecessors[current].iter().find(|&&p| !placed.contains(&p)) {
            Some(&predecessor) => current = predecessor,
            None => return path.iter().map(|&i| nodes[i].id.to_string()).collect(),
        }
    }
}
