use crate::models::{BoardItemView, BoardSnapshot, BoardView, HabitId, HabitListItem, StreakEntry};
use crate::reorder::{HabitList, ReorderError, Undo};
use std::collections::BTreeMap;

/// The live checklist: list order plus the streak counts the backend reported.
#[derive(Debug, Clone, Default)]
pub struct HabitBoard {
    list: HabitList,
    streaks: BTreeMap<HabitId, u32>,
}

impl HabitBoard {
    pub fn new(items: Vec<HabitListItem>) -> Self {
        Self {
            list: HabitList::initialize(items),
            streaks: BTreeMap::new(),
        }
    }

    pub fn from_snapshot(snapshot: BoardSnapshot) -> Self {
        Self {
            list: HabitList::initialize(snapshot.items),
            streaks: snapshot.streaks,
        }
    }

    pub fn snapshot(&self) -> BoardSnapshot {
        BoardSnapshot {
            items: self.list.items().to_vec(),
            streaks: self.streaks.clone(),
        }
    }

    pub fn list(&self) -> &HabitList {
        &self.list
    }

    pub fn habit_ids(&self) -> Vec<HabitId> {
        self.list.items().iter().map(|item| item.id).collect()
    }

    /// Unchecking a checked negative habit drops it from the list; everything else reorders.
    pub fn apply_toggle(&mut self, id: HabitId, checked: bool) -> Result<Undo, ReorderError> {
        let item = self.list.get(id).ok_or(ReorderError::UnknownHabit(id))?;
        if item.is_default_made && item.checked && !checked {
            return self.list.remove_item(id);
        }
        self.list.toggle(id, checked)
    }

    pub fn remove(&mut self, id: HabitId) -> Result<Undo, ReorderError> {
        let undo = self.list.remove_item(id)?;
        self.streaks.remove(&id);
        Ok(undo)
    }

    pub fn revert(&mut self, undo: Undo) {
        self.list.revert(undo);
    }

    pub fn set_streaks(&mut self, entries: &[StreakEntry]) {
        for entry in entries {
            self.streaks.insert(entry.key, entry.value);
        }
    }

    pub fn streak_label(&self, item: &HabitListItem) -> String {
        let base = self.streaks.get(&item.id).copied().unwrap_or(0);
        let days = if item.checked { base.saturating_add(1) } else { base };
        format!("{days} day streak")
    }

    pub fn view(&self) -> BoardView {
        let items = self
            .list
            .items()
            .iter()
            .enumerate()
            .map(|(position, item)| BoardItemView {
                id: item.id,
                name: item.name.clone(),
                checked: item.checked,
                is_default_made: item.is_default_made,
                position,
                streak: self.streak_label(item),
            })
            .collect();

        BoardView {
            total: self.list.total(),
            checked_count: self.list.checked_count(),
            items,
        }
    }
}
