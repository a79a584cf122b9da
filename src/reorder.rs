//! Ordered habit checklist: unchecked items first, checked items last.
//!
//! The boundary between the two groups is derived from the counters alone, so
//! a toggle never scans or re-sorts the sequence. Every mutation has to keep
//! the unchecked-prefix / checked-suffix split intact for the next toggle to
//! land in the right place.

use crate::models::{HabitId, HabitListItem};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ReorderError {
    #[error("habit {0} is not on the list")]
    UnknownHabit(HabitId),
}

/// What a mutation changed, enough to put it back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Undo {
    Noop,
    Moved {
        id: HabitId,
        from_index: usize,
        was_checked: bool,
    },
    Removed {
        item: HabitListItem,
        from_index: usize,
    },
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HabitList {
    items: Vec<HabitListItem>,
    total: usize,
    checked_count: usize,
}

impl HabitList {
    /// Stable partition: unchecked items keep their relative order, then checked ones.
    pub fn initialize(items: Vec<HabitListItem>) -> Self {
        let (mut ordered, checked): (Vec<_>, Vec<_>) =
            items.into_iter().partition(|item| !item.checked);
        let checked_count = checked.len();
        ordered.extend(checked);

        Self {
            total: ordered.len(),
            items: ordered,
            checked_count,
        }
    }

    pub fn items(&self) -> &[HabitListItem] {
        &self.items
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn checked_count(&self) -> usize {
        self.checked_count
    }

    pub fn get(&self, id: HabitId) -> Option<&HabitListItem> {
        self.items.iter().find(|item| item.id == id)
    }

    pub fn toggle(&mut self, id: HabitId, new_checked: bool) -> Result<Undo, ReorderError> {
        let index = self.index_of(id)?;
        let was_checked = self.items[index].checked;
        if was_checked == new_checked {
            return Ok(Undo::Noop);
        }

        let mut item = self.items.remove(index);
        item.checked = new_checked;

        if new_checked {
            self.items.push(item);
            self.checked_count += 1;
        } else {
            self.checked_count = self.checked_count.saturating_sub(1);
            let target = self.unchecked_boundary();
            self.insert_at(target, item);
        }

        Ok(Undo::Moved {
            id,
            from_index: index,
            was_checked,
        })
    }

    pub fn remove_item(&mut self, id: HabitId) -> Result<Undo, ReorderError> {
        let index = self.index_of(id)?;
        let item = self.items.remove(index);
        self.total = self.total.saturating_sub(1);
        if item.checked {
            self.checked_count = self.checked_count.saturating_sub(1);
        }
        Ok(Undo::Removed {
            item,
            from_index: index,
        })
    }

    /// Puts an item back where a previous mutation found it.
    pub fn revert(&mut self, undo: Undo) {
        match undo {
            Undo::Noop => {}
            Undo::Moved {
                id,
                from_index,
                was_checked,
            } => {
                let Ok(index) = self.index_of(id) else {
                    return;
                };
                let mut item = self.items.remove(index);
                if item.checked != was_checked {
                    if was_checked {
                        self.checked_count += 1;
                    } else {
                        self.checked_count = self.checked_count.saturating_sub(1);
                    }
                }
                item.checked = was_checked;
                let at = from_index.min(self.items.len());
                self.items.insert(at, item);
            }
            Undo::Removed { item, from_index } => {
                if item.checked {
                    self.checked_count += 1;
                }
                self.total += 1;
                let at = from_index.min(self.items.len());
                self.items.insert(at, item);
            }
        }
    }

    /// Index of the last unchecked slot, clamped to the list bounds.
    fn unchecked_boundary(&self) -> usize {
        let target = self.total as isize - self.checked_count as isize - 1;
        target.clamp(0, self.total.saturating_sub(1) as isize) as usize
    }

    fn insert_at(&mut self, target: usize, item: HabitListItem) {
        if target == 0 {
            self.items.insert(0, item);
        } else if target + 1 >= self.total || target >= self.items.len() {
            self.items.push(item);
        } else {
            self.items.insert(target, item);
        }
    }

    fn index_of(&self, id: HabitId) -> Result<usize, ReorderError> {
        self.items
            .iter()
            .position(|item| item.id == id)
            .ok_or(ReorderError::UnknownHabit(id))
    }
}
