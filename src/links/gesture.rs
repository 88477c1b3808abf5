//! Gesture to reorder-intent translation
//!
//! Pure functions over the displayed id sequence; they never touch order
//! values. A gesture that would not move anything yields `None`.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReorderIntent {
    pub moved_id: String,
    pub from_index: usize,
    pub to_index: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KeyDirection {
    Up,
    Down,
}

fn index_of<S: AsRef<str>>(ids: &[S], id: &str) -> Option<usize> {
    ids.iter().position(|candidate| candidate.as_ref() == id)
}

/// Drag `active_id` and drop it over `over_id`
///
/// Dropping outside any item (`over_id` is `None`), onto itself, or with
/// unknown ids does nothing.
pub fn from_drag<S: AsRef<str>>(
    ids: &[S],
    active_id: &str,
    over_id: Option<&str>,
) -> Option<ReorderIntent> {
    let over_id = over_id?;
    if active_id == over_id {
        return None;
    }

    let from_index = index_of(ids, active_id)?;
    let to_index = index_of(ids, over_id)?;
    Some(ReorderIntent {
        moved_id: active_id.to_string(),
        from_index,
        to_index,
    })
}

/// Move `id` one slot up or down; no-op at the list edges
pub fn from_keyboard<S: AsRef<str>>(
    ids: &[S],
    id: &str,
    direction: KeyDirection,
) -> Option<ReorderIntent> {
    let from_index = index_of(ids, id)?;
    let to_index = match direction {
        KeyDirection::Up => from_index.checked_sub(1)?,
        KeyDirection::Down => {
            let next = from_index + 1;
            if next >= ids.len() {
                return None;
            }
            next
        }
    };

    Some(ReorderIntent {
        moved_id: id.to_string(),
        from_index,
        to_index,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const IDS: [&str; 4] = ["a", "b", "c", "d"];

    #[test]
    fn test_drag_over_other_item() {
        assert_eq!(
            from_drag(&IDS, "a", Some("c")),
            Some(ReorderIntent {
                moved_id: "a".to_string(),
                from_index: 0,
                to_index: 2,
            })
        );
        assert_eq!(from_drag(&IDS, "d", Some("b")).map(|i| i.to_index), Some(1));
    }

    #[test]
    fn test_drag_without_target_or_onto_self() {
        assert_eq!(from_drag(&IDS, "a", None), None);
        assert_eq!(from_drag(&IDS, "b", Some("b")), None);
        assert_eq!(from_drag(&IDS, "x", Some("b")), None);
    }

    #[test]
    fn test_keyboard_edges() {
        assert_eq!(from_keyboard(&IDS, "a", KeyDirection::Up), None);
        assert_eq!(from_keyboard(&IDS, "d", KeyDirection::Down), None);
        let intent = from_keyboard(&IDS, "b", KeyDirection::Down).unwrap();
        assert_eq!((intent.from_index, intent.to_index), (1, 2));
        let intent = from_keyboard(&IDS, "b", KeyDirection::Up).unwrap();
        assert_eq!((intent.from_index, intent.to_index), (1, 0));
    }
}
