//! Connected components of the closed consistency relation.

use crate::matrix::RelationMatrix;

/// Partitions the universe into the components of `relation`.
///
/// Components are discovered from the lowest unvisited index with an explicit
/// stack, so emission order follows each component's smallest member.  Member
/// lists are sorted ascending.
pub fn connected_components(relation: &RelationMatrix) -> Vec<Vec<usize>> {
    let n = relation.size();
    let mut visited = vec![false; n];
    let mut components = Vec::new();
    let mut stack = Vec::new();
    for start in 0..n {
        if visited[start] {
            continue;
        }
        visited[start] = true;
        stack.push(start);
        let mut members = Vec::new();
        while let Some(node) = stack.pop() {
            members.push(node);
            for (next, &linked) in relation.row(node).iter().enumerate() {
                if linked && !visited[next] {
                    visited[next] = true;
                    stack.push(next);
                }
            }
        }
        members.sort_unstable();
        components.push(members);
    }
    components
}
