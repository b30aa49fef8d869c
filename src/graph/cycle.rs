//! Cycle check for new dependency edges.

use std::collections::HashSet;

use crate::graph::derive;
use crate::graph::model::Task;

/// Would making `target` depend on `source` close a cycle?
///
/// True iff `source` already depends on `target`, directly or through other
/// tasks. Unknown ids are dead ends, and pre-existing self references or
/// cycles still terminate.
pub fn would_create_cycle(tasks: &[Task], source: &str, target: &str) -> bool {
    let by_id = derive::tasks_by_id(tasks);

    let mut visited: HashSet<&str> = HashSet::new();
    let mut stack = vec![source];
    while let Some(id) = stack.pop() {
        if id == target {
            return true;
        }
        if !visited.insert(id) {
            continue;
        }
        if let Some(task) = by_id.get(id) {
            stack.extend(
                task.dependencies
                    .iter()
                    .map(String::as_str)
                    .filter(|dep| !visited.contains(dep)),
            );
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::model::tests::task;
    use proptest::prelude::*;

    #[test]
    fn no_cycle_on_empty_graph() {
        let tasks = vec![task("a", &[]), task("b", &[])];
        assert!(!would_create_cycle(&tasks, "a", "b"));
    }

    #[test]
    fn direct_back_edge_is_cycle() {
        // b depends on a; making a depend on b closes the loop
        let tasks = vec![task("a", &[]), task("b", &["a"])];
        assert!(would_create_cycle(&tasks, "b", "a"));
        assert!(!would_create_cycle(&tasks, "a", "b"));
    }

    #[test]
    fn self_edge_counts_as_cycle() {
        let tasks = vec![task("a", &[])];
        assert!(would_create_cycle(&tasks, "a", "a"));
    }

    #[test]
    fn diamond_is_not_a_cycle() {
        let tasks = vec![
            task("a", &[]),
            task("b", &["a"]),
            task("c", &["a"]),
            task("d", &["b"]),
        ];
        assert!(!would_create_cycle(&tasks, "c", "d"));
        assert!(would_create_cycle(&tasks, "d", "a"));
    }

    #[test]
    fn dangling_and_self_referencing_ids_terminate() {
        let tasks = vec![
            task("a", &["a", "ghost"]),
            task("b", &["a", "b"]),
            task("c", &["missing"]),
        ];
        assert!(!would_create_cycle(&tasks, "c", "b"));
        assert!(would_create_cycle(&tasks, "b", "a"));
        assert!(!would_create_cycle(&tasks, "a", "b"));
        assert!(!would_create_cycle(&tasks, "ghost2", "c"));
    }

    #[test]
    fn long_chain_back_edge_is_cycle() {
        // d -> c -> b -> a; making a depend on d closes the loop
        let tasks = vec![
            task("a", &[]),
            task("b", &["a"]),
            task("c", &["b"]),
            task("d", &["c"]),
        ];
        assert!(would_create_cycle(&tasks, "d", "a"));
        assert!(!would_create_cycle(&tasks, "a", "d"));
    }

    #[test]
    fn existing_cycle_terminates() {
        let tasks = vec![task("a", &["b"]), task("b", &["a"]), task("c", &[])];
        assert!(!would_create_cycle(&tasks, "c", "a"));
        assert!(would_create_cycle(&tasks, "a", "b"));
    }

    /// Random DAG where task `i` may only depend on tasks with a lower index.
    fn dag(n: usize, bits: &[bool]) -> Vec<Task> {
        let mut k = 0;
        (0..n)
            .map(|i| {
                let mut t = task(&format!("t{i}"), &[]);
                for j in 0..i {
                    if bits[k % bits.len()] {
                        t.dependencies.push(format!("t{j}"));
                    }
                    k += 1;
                }
                t
            })
            .collect()
    }

    fn reachable(tasks: &[Task], from: usize, to: usize) -> bool {
        let n = tasks.len();
        let mut reach = vec![vec![false; n]; n];
        for (i, t) in tasks.iter().enumerate() {
            reach[i][i] = true;
            for dep in &t.dependencies {
                let j: usize = dep[1..].parse().unwrap();
                reach[i][j] = true;
            }
        }
        for k in 0..n {
            for i in 0..n {
                for j in 0..n {
                    if reach[i][k] && reach[k][j] {
                        reach[i][j] = true;
                    }
                }
            }
        }
        reach[from][to]
    }

    proptest! {
        #[test]
        fn cycle_iff_source_already_depends_on_target(
            n in 2usize..9,
            bits in proptest::collection::vec(any::<bool>(), 1..40),
            s in 0usize..9,
            t in 0usize..9,
        ) {
            let s = s % n;
            let t = t % n;
            prop_assume!(s != t);
            let tasks = dag(n, &bits);
            let expected = reachable(&tasks, s, t);
            prop_assert_eq!(
                would_create_cycle(&tasks, &format!("t{s}"), &format!("t{t}")),
                expected
            );
        }
    }
}
