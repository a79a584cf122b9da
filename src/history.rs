//! Date-by-habit completion table built from the backend's history rows.

use crate::models::{HabitId, HabitStatus, HistoryRow};
use chrono::NaiveDate;
use regex::Regex;
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::OnceLock;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HistoryColumn {
    pub id: HabitId,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HistoryCell {
    pub habit_id: Option<HabitId>,
    pub name: String,
    pub checked: bool,
    pub status: HabitStatus,
    /// Inactive days and habits the row does not know about are read-only.
    pub editable: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HistoryRowView {
    pub date: NaiveDate,
    pub cells: Vec<HistoryCell>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Default)]
pub struct HistoryTable {
    pub columns: Vec<HistoryColumn>,
    pub rows: Vec<HistoryRowView>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateDecision {
    Forward,
    /// Inactive on that date: the box goes back to unchecked and nothing is sent.
    ForceUnchecked,
}

fn pair_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^Pair\(key=(.*), value=(-?\d+)\)$").expect("static pair key pattern")
    })
}

/// Splits a `Pair(key=<name>, value=<id>)` map key into name and id.
pub fn parse_pair_key(key: &str) -> Option<(String, Option<HabitId>)> {
    let captures = pair_pattern().captures(key)?;
    let name = captures.get(1)?.as_str().to_string();
    let id = captures.get(2).and_then(|id| id.as_str().parse().ok());
    Some((name, id))
}

struct Entry {
    id: Option<HabitId>,
    checked: bool,
    status: Option<HabitStatus>,
}

fn row_entries(row: &HistoryRow) -> BTreeMap<String, Entry> {
    let statuses = row.habit_statuses.as_ref();
    row.habits
        .iter()
        .flatten()
        .filter_map(|(key, checked)| {
            let (name, id) = parse_pair_key(key)?;
            let status = statuses.and_then(|statuses| statuses.get(key)).copied();
            Some((
                name,
                Entry {
                    id,
                    checked: *checked,
                    status,
                },
            ))
        })
        .collect()
}

pub fn build_table(rows: &[HistoryRow]) -> HistoryTable {
    let entries: Vec<_> = rows.iter().map(row_entries).collect();

    let mut by_id: BTreeMap<HabitId, String> = BTreeMap::new();
    for (name, entry) in entries.iter().flatten() {
        if let Some(id) = entry.id {
            by_id.entry(id).or_insert_with(|| name.clone());
        }
    }
    let columns: Vec<HistoryColumn> = by_id
        .into_iter()
        .map(|(id, name)| HistoryColumn { id, name })
        .collect();

    let rows = rows
        .iter()
        .zip(&entries)
        .map(|(row, entries)| HistoryRowView {
            date: row.date,
            cells: columns
                .iter()
                .map(|column| match entries.get(&column.name) {
                    Some(entry) => {
                        let status = entry.status.unwrap_or(if entry.checked {
                            HabitStatus::ActiveCompleted
                        } else {
                            HabitStatus::ActiveIncomplete
                        });
                        HistoryCell {
                            habit_id: entry.id,
                            name: column.name.clone(),
                            checked: entry.checked,
                            status,
                            editable: entry.id.is_some() && status != HabitStatus::Inactive,
                        }
                    }
                    None => HistoryCell {
                        habit_id: None,
                        name: column.name.clone(),
                        checked: false,
                        status: HabitStatus::ActiveIncomplete,
                        editable: false,
                    },
                })
                .collect(),
        })
        .collect();

    HistoryTable { columns, rows }
}

impl HistoryTable {
    pub fn status_of(&self, date: NaiveDate, id: HabitId) -> Option<HabitStatus> {
        self.rows
            .iter()
            .find(|row| row.date == date)?
            .cells
            .iter()
            .find(|cell| cell.habit_id == Some(id))
            .map(|cell| cell.status)
    }
}

pub fn guard_update(status: Option<HabitStatus>) -> UpdateDecision {
    match status {
        Some(HabitStatus::Inactive) => UpdateDecision::ForceUnchecked,
        _ => UpdateDecision::Forward,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, day).unwrap()
    }

    fn row(day: u32, habits: &[(&str, u64, bool)], inactive: &[&str]) -> HistoryRow {
        let key = |name: &str, id: u64| format!("Pair(key={name}, value={id})");
        HistoryRow {
            date: date(day),
            habits: Some(
                habits
                    .iter()
                    .map(|(name, id, done)| (key(name, *id), *done))
                    .collect(),
            ),
            habit_statuses: Some(
                habits
                    .iter()
                    .filter(|(name, _, _)| inactive.contains(name))
                    .map(|(name, id, _)| (key(name, *id), HabitStatus::Inactive))
                    .collect(),
            ),
        }
    }

    #[test]
    fn parses_pair_keys_including_commas_in_names() {
        assert_eq!(
            parse_pair_key("Pair(key=Read, write, value=7)"),
            Some(("Read, write".to_string(), Some(7)))
        );
        assert_eq!(
            parse_pair_key("Pair(key=Legacy, value=-1)"),
            Some(("Legacy".to_string(), None))
        );
        assert_eq!(parse_pair_key("Read"), None);
    }

    #[test]
    fn columns_follow_habit_ids_and_missing_cells_are_read_only() {
        let rows = vec![
            row(18, &[("Walk", 3, true), ("Read", 1, false)], &[]),
            row(19, &[("Read", 1, true)], &[]),
        ];
        let table = build_table(&rows);

        let names: Vec<_> = table.columns.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Read", "Walk"]);

        let first = &table.rows[0].cells;
        assert!(!first[0].checked);
        assert_eq!(first[0].status, HabitStatus::ActiveIncomplete);
        assert!(first[1].checked);
        assert_eq!(first[1].status, HabitStatus::ActiveCompleted);

        let missing = &table.rows[1].cells[1];
        assert_eq!(missing.habit_id, None);
        assert!(!missing.checked);
        assert!(!missing.editable);
    }

    #[test]
    fn inactive_cells_are_locked_and_guarded() {
        let rows = vec![row(18, &[("Read", 1, false), ("Gym", 2, false)], &["Gym"])];
        let table = build_table(&rows);

        let gym = &table.rows[0].cells[1];
        assert_eq!(gym.status, HabitStatus::Inactive);
        assert!(!gym.editable);

        assert_eq!(
            guard_update(table.status_of(date(18), 2)),
            UpdateDecision::ForceUnchecked
        );
        assert_eq!(guard_update(table.status_of(date(18), 1)), UpdateDecision::Forward);
        assert_eq!(guard_update(table.status_of(date(20), 1)), UpdateDecision::Forward);
    }

    #[test]
    fn backend_json_shape_deserializes() {
        let raw = r#"[{"date":"2026-10-18","habits":{"Pair(key=Read, value=1)":true},"habitStatuses":{"Pair(key=Read, value=1)":"ACTIVE_COMPLETED"}},{"date":"2026-10-19","habits":null,"habitStatuses":null}]"#;
        let rows: Vec<HistoryRow> = serde_json::from_str(raw).unwrap();
        let table = build_table(&rows);
        assert_eq!(table.columns.len(), 1);
        assert_eq!(table.rows.len(), 2);
        assert!(table.rows[0].cells[0].editable);
        assert!(!table.rows[1].cells[0].editable);
    }
}
