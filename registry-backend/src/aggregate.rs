//! Dashboard read models derived from repository records.

use registry_types::{columns, AssignmentCount, DashboardSummary, EntityKind, Status, StatusTally};

use crate::store::Record;

/// Number of non-blank items in a semicolon-delimited assignments field
pub fn count_assignments(field: Option<&str>) -> usize {
    field
        .map(|s| s.split(';').filter(|item| !item.trim().is_empty()).count())
        .unwrap_or(0)
}

pub fn status_tally(records: &[Record]) -> StatusTally {
    records
        .iter()
        .fold(StatusTally::default(), |mut tally, record| {
            match Status::parse(record.value(columns::STATUS)) {
                Some(Status::Active) => tally.active += 1,
                Some(Status::Inactive) => tally.inactive += 1,
                None => {}
            }
            tally
        })
}

/// Per-record assignment counts, in file order
pub fn assignment_counts(records: &[Record]) -> Vec<AssignmentCount> {
    records
        .iter()
        .enumerate()
        .map(|(i, record)| AssignmentCount {
            index: record.position().unwrap_or(i),
            name: record.value(columns::NAME).to_string(),
            count: count_assignments(record.get(columns::ASSIGNMENTS)),
            status: record.value(columns::STATUS).to_string(),
        })
        .collect()
}

/// Distinct raw status values with their counts, in order of first appearance.
/// Blank statuses are left out.
pub fn status_groups(records: &[Record]) -> Vec<(String, usize)> {
    let mut groups: Vec<(String, usize)> = Vec::new();
    for record in records {
        let status = record.value(columns::STATUS).trim();
        if status.is_empty() {
            continue;
        }
        match groups.iter_mut().find(|(s, _)| *s == status) {
            Some((_, count)) => *count += 1,
            None => groups.push((status.to_string(), 1)),
        }
    }
    groups
}

pub fn dashboard_summary(kind: EntityKind, records: &[Record]) -> DashboardSummary {
    DashboardSummary {
        kind,
        total: records.len(),
        tally: status_tally(records),
        assignments: match kind {
            EntityKind::Employees => Some(assignment_counts(records)),
            EntityKind::Clients => None,
        },
    }
}
