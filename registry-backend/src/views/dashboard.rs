use registry_types::{DashboardSummary, EntityKind};

use super::page;
use crate::aggregate::{dashboard_summary, status_groups};
use crate::charts::{self, Datum};
use crate::store::Record;

/// Totals, status split and the kind's chart
pub fn dashboard_page(kind: EntityKind, records: &[Record]) -> String {
    let summary = dashboard_summary(kind, records);
    let body = format!(
        "<div class=\"stats\"><span>Total {}: <strong>{}</strong></span>\
         <span>Active: <strong>{}</strong></span>\
         <span>Inactive: <strong>{}</strong></span></div>\
         <div class=\"chart-box\">{}</div>",
        kind.plural().to_lowercase(),
        summary.total,
        summary.tally.active,
        summary.tally.inactive,
        chart(kind, records, &summary),
    );
    page(&format!("{} dashboard", kind.singular()), None, &body)
}

fn chart(kind: EntityKind, records: &[Record], summary: &DashboardSummary) -> String {
    if summary.total == 0 {
        return charts::NO_DATA.to_string();
    }

    match kind {
        EntityKind::Clients => {
            let slices: Vec<Datum> = status_groups(records)
                .into_iter()
                .map(|(raw, count)| Datum::for_status(charts::status_label(&raw), count, &raw))
                .collect();
            charts::pie_chart("Active vs inactive clients", &slices)
        }
        EntityKind::Employees => {
            let bars: Vec<Datum> = summary
                .assignments
                .iter()
                .flatten()
                .map(|a| {
                    let label = if a.name.is_empty() { "(unnamed)" } else { a.name.as_str() };
                    Datum::for_status(label, a.count, &a.status)
                })
                .collect();
            charts::bar_chart("Assignments per employee", &bars)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::Table;
    use registry_types::columns;

    fn table(kind: EntityKind, rows: &[&[(&str, &str)]]) -> Vec<Record> {
        let mut table = Table::empty(kind.columns());
        for pairs in rows {
            table.push(&Record::from_pairs(pairs.iter().copied()));
        }
        table.records().collect()
    }

    #[test]
    fn test_empty_dashboard_shows_placeholder() {
        let html = dashboard_page(EntityKind::Clients, &[]);
        assert!(html.contains(charts::NO_DATA));
        assert!(!html.contains("<svg"));
        assert!(html.contains("Total clients: <strong>0</strong>"));
    }

    #[test]
    fn test_client_dashboard_pie() {
        let records = table(
            EntityKind::Clients,
            &[
                &[(columns::NAME, "Ana"), (columns::STATUS, "Ativo")],
                &[(columns::NAME, "Bia"), (columns::STATUS, "Inativo")],
                &[(columns::NAME, "Caio"), (columns::STATUS, "Ativo")],
            ],
        );
        let html = dashboard_page(EntityKind::Clients, &records);
        assert!(html.contains("class=\"chart pie\""));
        assert!(html.contains("Active: <strong>2</strong>"));
        assert!(html.contains("Inactive: <strong>1</strong>"));
    }

    #[test]
    fn test_employee_dashboard_bars() {
        let records = table(
            EntityKind::Employees,
            &[
                &[(columns::NAME, "Bia"), (columns::ASSIGNMENTS, "a;b"), (columns::STATUS, "Ativo")],
                &[(columns::NAME, ""), (columns::ASSIGNMENTS, ""), (columns::STATUS, "Inativo")],
            ],
        );
        let html = dashboard_page(EntityKind::Employees, &records);
        assert!(html.contains("class=\"chart bar\""));
        assert!(html.contains("(unnamed)"));
        assert!(html.contains("<title>Bia: 2</title>"));
        // Status split is shown as numbers only; no pie on this page
        assert!(!html.contains("class=\"chart pie\""));
        assert!(html.contains("Active: <strong>1</strong>"));
        assert!(html.contains("Inactive: <strong>1</strong>"));
    }
}
