//! Family marker: tags the dependency closure of a target entity.
//!
//! Starting from a named target, two independent depth-first traversals
//! follow the resolved `parents` and `children` edges, tagging every
//! visited entity with its relation and traversal depth. The target itself
//! is tagged `target`. Traversals carry a visited set, so a cyclic
//! parent/child graph terminates with partial marking instead of looping.

use std::collections::{HashMap, HashSet};

use log::debug;

use lamina_core::{FamilyRelation, Relatable, Relation, path};

/// Which edge list a traversal follows.
#[derive(Debug, Clone, Copy)]
enum Direction {
    Parents,
    Children,
}

/// Mark the family of `target_name` across `nodes`.
///
/// With `target_layer` given, the target is located by exact path match
/// (split-suffix-insensitive, so deep-mode clones are found through their
/// original path). Both searches scan the list in reverse: split clones
/// are appended after their original, so a clone wins over the record it
/// was split from. Without a layer, nodes are searched by name from the
/// lowest layer backward: layers are ordered high → low in the input, so
/// the scan runs over the flattened list in reverse and the first hit wins.
///
/// Returns `false` (and marks nothing) when no node matches.
pub fn mark_family<N: Relatable>(
    nodes: &mut [N],
    target_name: &str,
    target_layer: Option<&str>,
) -> bool {
    let Some(target_index) = find_target(nodes, target_name, target_layer) else {
        debug!(target = target_name; "Family target not found");
        return false;
    };

    let index: HashMap<String, usize> = nodes
        .iter()
        .enumerate()
        .map(|(i, node)| (node.path().to_string(), i))
        .collect();

    nodes[target_index].set_family(FamilyRelation::target());
    mark_direction(nodes, &index, target_index, Direction::Parents);
    mark_direction(nodes, &index, target_index, Direction::Children);

    true
}

fn find_target<N: Relatable>(
    nodes: &[N],
    target_name: &str,
    target_layer: Option<&str>,
) -> Option<usize> {
    match target_layer {
        Some(layer) => {
            let target_path = path::join(layer, target_name);
            nodes
                .iter()
                .rposition(|node| path::base_path(node.path()) == target_path)
        }
        None => nodes
            .iter()
            .rposition(|node| node.name() == target_name),
    }
}

fn mark_direction<N: Relatable>(
    nodes: &mut [N],
    index: &HashMap<String, usize>,
    target_index: usize,
    direction: Direction,
) {
    let neighbors = |node: &N| -> Vec<usize> {
        let paths = match direction {
            Direction::Parents => node.parents(),
            Direction::Children => node.children(),
        };
        // A path that resolves to nothing is skipped, same as the
        // assembler's back-reference pass.
        paths.iter().filter_map(|p| index.get(p).copied()).collect()
    };

    let mut visited: HashSet<usize> = HashSet::from([target_index]);
    let mut stack: Vec<(usize, u32)> = neighbors(&nodes[target_index])
        .into_iter()
        .map(|i| (i, 1))
        .collect();

    while let Some((current, degree)) = stack.pop() {
        if !visited.insert(current) {
            continue;
        }

        let relation = match direction {
            Direction::Parents => FamilyRelation {
                relation: Relation::Parents,
                degree,
            },
            Direction::Children => FamilyRelation {
                relation: Relation::Children,
                degree,
            },
        };
        nodes[current].set_family(relation);

        for next in neighbors(&nodes[current]) {
            if !visited.contains(&next) {
                stack.push((next, degree + 1));
            }
        }
    }
}
