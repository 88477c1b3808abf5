//! Order-value policy for a user's link list
//!
//! Every reorder re-derives the whole list as consecutive integers `0..N`
//! ("remove at `from`, insert at `to`"), and only entries whose value
//! changed are reported. New links go in front with `min - 1`.

use std::fmt;

use crate::errors::OpenLinkError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderingError {
    IndexOutOfBounds { index: usize, len: usize },
}

impl fmt::Display for OrderingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OrderingError::IndexOutOfBounds { index, len } => {
                write!(f, "index {} is out of bounds for a list of {} links", index, len)
            }
        }
    }
}

impl std::error::Error for OrderingError {}

impl From<OrderingError> for OpenLinkError {
    fn from(err: OrderingError) -> Self {
        OpenLinkError::validation(err.to_string())
    }
}

/// A new order value for one link
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderAssignment {
    pub id: String,
    pub order: i32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReorderPlan {
    /// Nothing moved, nothing to write
    Unchanged,
    Renumbered {
        /// The full target arrangement with its order values
        arrangement: Vec<OrderAssignment>,
        /// Subset of `arrangement` whose value differs from the current one
        changed: Vec<OrderAssignment>,
    },
}

impl ReorderPlan {
    pub fn changed(&self) -> &[OrderAssignment] {
        match self {
            ReorderPlan::Unchanged => &[],
            ReorderPlan::Renumbered { changed, .. } => changed,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InsertPlan {
    /// Insert with this order value, nothing else changes
    Front(i32),
    /// `min - 1` would underflow: renumber the existing links first
    RenumberThenFront {
        renumbered: Vec<OrderAssignment>,
        order: i32,
    },
}

fn position_order(position: usize) -> i32 {
    i32::try_from(position).unwrap_or(i32::MAX)
}

fn check_bounds(index: usize, len: usize) -> Result<(), OrderingError> {
    if index >= len {
        return Err(OrderingError::IndexOutOfBounds { index, len });
    }
    Ok(())
}

/// Remove the item at `from` and insert it at `to`
pub fn move_index<T>(items: &mut Vec<T>, from: usize, to: usize) -> Result<(), OrderingError> {
    check_bounds(from, items.len())?;
    check_bounds(to, items.len())?;
    if from != to {
        let item = items.remove(from);
        items.insert(to, item);
    }
    Ok(())
}

/// Plan moving the link at `from` to `to`
///
/// `current` is the list as displayed, each id paired with the order value
/// the store holds for it. Any link whose stored value differs from its new
/// position is reported as changed.
pub fn plan_reorder(
    current: &[(String, i32)],
    from: usize,
    to: usize,
) -> Result<ReorderPlan, OrderingError> {
    check_bounds(from, current.len())?;
    check_bounds(to, current.len())?;
    if from == to {
        return Ok(ReorderPlan::Unchanged);
    }

    let mut moved: Vec<&(String, i32)> = current.iter().collect();
    move_index(&mut moved, from, to)?;

    let mut arrangement = Vec::with_capacity(moved.len());
    let mut changed = Vec::new();
    for (position, (id, old_order)) in moved.into_iter().enumerate() {
        let assignment = OrderAssignment {
            id: id.clone(),
            order: position_order(position),
        };
        if assignment.order != *old_order {
            changed.push(assignment.clone());
        }
        arrangement.push(assignment);
    }

    Ok(ReorderPlan::Renumbered {
        arrangement,
        changed,
    })
}

/// Plan the order value of a new link so it sorts before every existing one
pub fn plan_insert(current: &[(String, i32)]) -> InsertPlan {
    let Some(min) = current.iter().map(|(_, order)| *order).min() else {
        return InsertPlan::Front(0);
    };

    match min.checked_sub(1) {
        Some(order) => InsertPlan::Front(order),
        None => {
            let mut sorted: Vec<&(String, i32)> = current.iter().collect();
            sorted.sort_by_key(|(_, order)| *order);
            let renumbered = sorted
                .into_iter()
                .enumerate()
                .filter_map(|(position, (id, old_order))| {
                    let order = position_order(position + 1);
                    (order != *old_order).then(|| OrderAssignment {
                        id: id.clone(),
                        order,
                    })
                })
                .collect();
            InsertPlan::RenumberThenFront {
                renumbered,
                order: 0,
            }
        }
    }
}
