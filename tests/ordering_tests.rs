//! Ordering policy tests
//!
//! Exhaustive small-list checks of reorder and insert planning.

use openlink::links::ordering::{InsertPlan, ReorderPlan, plan_insert, plan_reorder};

fn list(n: usize) -> Vec<(String, i32)> {
    (0..n).map(|i| (format!("link-{}", i), i as i32)).collect()
}

/// Apply a plan's arrangement and return ids sorted by the new order
fn sorted_after(current: &[(String, i32)], plan: &ReorderPlan) -> Vec<String> {
    let mut rows: Vec<(String, i32)> = match plan {
        ReorderPlan::Unchanged => current.to_vec(),
        ReorderPlan::Renumbered { arrangement, .. } => arrangement
            .iter()
            .map(|a| (a.id.clone(), a.order))
            .collect(),
    };
    rows.sort_by_key(|(_, order)| *order);
    rows.into_iter().map(|(id, _)| id).collect()
}

#[test]
fn test_reorder_yields_target_permutation() {
    for n in 0..=50usize {
        let current = list(n);
        for from in 0..n {
            for to in 0..n {
                let plan = plan_reorder(&current, from, to).unwrap();

                let mut expected: Vec<String> = current.iter().map(|(id, _)| id.clone()).collect();
                let moved = expected.remove(from);
                expected.insert(to, moved);

                assert_eq!(sorted_after(&current, &plan), expected, "n={} {}->{}", n, from, to);
            }
        }
    }
}

#[test]
fn test_reorder_reports_only_changed_values() {
    let current = list(5);
    let plan = plan_reorder(&current, 1, 3).unwrap();
    let changed: Vec<&str> = plan.changed().iter().map(|a| a.id.as_str()).collect();

    // 0 and 4 keep their positions
    assert_eq!(changed, vec!["link-2", "link-3", "link-1"]);
}

#[test]
fn test_reorder_to_same_position_is_unchanged() {
    let current = vec![
        ("a".to_string(), -3),
        ("b".to_string(), 7),
        ("c".to_string(), 12),
    ];
    for i in 0..current.len() {
        assert_eq!(plan_reorder(&current, i, i).unwrap(), ReorderPlan::Unchanged);
    }
}

#[test]
fn test_reorder_out_of_bounds() {
    assert!(plan_reorder(&list(3), 3, 0).is_err());
    assert!(plan_reorder(&list(3), 0, 3).is_err());
    assert!(plan_reorder(&[], 0, 0).is_err());
}

#[test]
fn test_reorder_normalizes_sparse_orders() {
    let current = vec![
        ("a".to_string(), -5),
        ("b".to_string(), 10),
        ("c".to_string(), 40),
    ];
    let plan = plan_reorder(&current, 2, 0).unwrap();
    let ReorderPlan::Renumbered { arrangement, .. } = plan else {
        panic!("expected a renumbered plan");
    };
    let orders: Vec<(&str, i32)> = arrangement.iter().map(|a| (a.id.as_str(), a.order)).collect();
    assert_eq!(orders, vec![("c", 0), ("a", 1), ("b", 2)]);
}

#[test]
fn test_insert_always_sorts_first() {
    let cases: Vec<Vec<i32>> = vec![
        vec![],
        vec![0, 1, 2],
        vec![-7, -3, 5],
        vec![10, 100, 4],
        vec![3, 3, 3],
        vec![i32::MIN + 1],
    ];

    for orders in cases {
        let current: Vec<(String, i32)> = orders
            .iter()
            .enumerate()
            .map(|(i, o)| (format!("link-{}", i), *o))
            .collect();

        match plan_insert(&current) {
            InsertPlan::Front(order) => {
                assert!(current.iter().all(|(_, o)| order < *o), "orders {:?}", orders);
            }
            InsertPlan::RenumberThenFront { .. } => panic!("unexpected renumber for {:?}", orders),
        }
    }
}

#[test]
fn test_insert_renumbers_when_minimum_exhausted() {
    let current = vec![("a".to_string(), i32::MIN), ("b".to_string(), 5)];

    let InsertPlan::RenumberThenFront { renumbered, order } = plan_insert(&current) else {
        panic!("expected renumbering");
    };
    assert_eq!(order, 0);

    let mut after: Vec<(String, i32)> = current.clone();
    for assignment in &renumbered {
        if let Some(row) = after.iter_mut().find(|(id, _)| *id == assignment.id) {
            row.1 = assignment.order;
        }
    }
    assert!(after.iter().all(|(_, o)| *o > order));
}
