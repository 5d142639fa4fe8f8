use std::fmt::Write;

use registry_types::{columns, EntityKind, Status};

use super::{escape, page};
use crate::routes::paths;
use crate::store::Record;

#[derive(Clone, Copy)]
enum Input {
    Text,
    Email,
    TextArea,
    StatusSelect,
}

struct FieldSpec {
    column: &'static str,
    input: Input,
    required: bool,
    hint: Option<&'static str>,
}

const fn field(column: &'static str, input: Input) -> FieldSpec {
    FieldSpec {
        column,
        input,
        required: true,
        hint: None,
    }
}

const NOTES: FieldSpec = FieldSpec {
    column: columns::NOTES,
    input: Input::TextArea,
    required: false,
    hint: None,
};

static CLIENT_FIELDS: [FieldSpec; 6] = [
    field(columns::NAME, Input::Text),
    field(columns::PHONE, Input::Text),
    field(columns::EMAIL, Input::Email),
    field(columns::COMPANY, Input::Text),
    NOTES,
    field(columns::STATUS, Input::StatusSelect),
];

static EMPLOYEE_FIELDS: [FieldSpec; 7] = [
    field(columns::NAME, Input::Text),
    field(columns::ROLE, Input::Text),
    field(columns::EMAIL, Input::Email),
    field(columns::PHONE, Input::Text),
    FieldSpec {
        column: columns::ASSIGNMENTS,
        input: Input::TextArea,
        required: true,
        hint: Some("Separate items with ;"),
    },
    NOTES,
    field(columns::STATUS, Input::StatusSelect),
];

fn fields_for(kind: EntityKind) -> &'static [FieldSpec] {
    match kind {
        EntityKind::Clients => &CLIENT_FIELDS,
        EntityKind::Employees => &EMPLOYEE_FIELDS,
    }
}

/// Create form, or edit form pre-filled from `existing` when it is `Some`
pub fn form_page(kind: EntityKind, existing: Option<&Record>) -> String {
    let index = existing.and_then(Record::position);
    let action = match index {
        Some(i) => format!("{}?id={}", paths::form(kind), i),
        None => paths::form(kind).to_string(),
    };

    let mut body = String::new();
    let _ = write!(body, "<form method=\"post\" action=\"{}\">", escape(&action));

    for entry in fields_for(kind) {
        let value = existing.map(|r| r.value(entry.column)).unwrap_or("");
        let required = if entry.required { " required" } else { "" };
        let _ = write!(body, "<label for=\"{c}\">{c}</label>", c = entry.column);

        match entry.input {
            Input::Text | Input::Email => {
                let input_type = if matches!(entry.input, Input::Email) { "email" } else { "text" };
                let _ = write!(
                    body,
                    "<input type=\"{input_type}\" id=\"{c}\" name=\"{c}\" value=\"{}\"{required}>",
                    escape(value),
                    c = entry.column,
                );
            }
            Input::TextArea => {
                let placeholder = entry
                    .hint
                    .map(|h| format!(" placeholder=\"{}\"", escape(h)))
                    .unwrap_or_default();
                let _ = write!(
                    body,
                    "<textarea id=\"{c}\" name=\"{c}\"{placeholder}{required}>{}</textarea>",
                    escape(value),
                    c = entry.column,
                );
            }
            Input::StatusSelect => {
                body.push_str(&status_select(entry.column, value));
            }
        }
    }

    let _ = write!(
        body,
        "<p><button type=\"submit\">Save</button> <a href=\"{}\">Cancel</a></p></form>",
        paths::list(kind)
    );

    let title = match index {
        Some(_) => format!("Edit {}", kind.singular().to_lowercase()),
        None => format!("New {}", kind.singular().to_lowercase()),
    };
    page(&title, None, &body)
}

fn status_select(column: &str, current: &str) -> String {
    let selected = Status::parse(current);
    let mut html = format!("<select id=\"{column}\" name=\"{column}\" required>");

    for status in [Status::Active, Status::Inactive] {
        let mark = if selected == Some(status) { " selected" } else { "" };
        let _ = write!(
            html,
            "<option value=\"{}\"{mark}>{}</option>",
            status.stored_label(),
            status.display_label()
        );
    }
    // Keep an unrecognized stored value selectable so saving does not silently change it
    if selected.is_none() && !current.trim().is_empty() {
        let _ = write!(
            html,
            "<option value=\"{v}\" selected>{v}</option>",
            v = escape(current)
        );
    }

    html.push_str("</select>");
    html
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::Table;

    #[test]
    fn test_new_client_form() {
        let html = form_page(EntityKind::Clients, None);
        assert!(html.contains("<title>New client</title>"));
        assert!(html.contains("action=\"/form_cliente\""));
        assert!(html.contains("name=\"Company\""));
        assert!(!html.contains("name=\"RegisteredDate\""));
        assert!(html.contains("<textarea id=\"Notes\" name=\"Notes\"></textarea>"));
    }

    #[test]
    fn test_edit_employee_form_prefills() {
        let mut table = Table::empty(EntityKind::Employees.columns());
        table.push(&Record::from_pairs([
            (columns::NAME, "Bia \"B\""),
            (columns::ASSIGNMENTS, "payroll;audit"),
            (columns::STATUS, "Inativo"),
        ]));
        let record = table.record(0).unwrap();

        let html = form_page(EntityKind::Employees, Some(&record));
        assert!(html.contains("<title>Edit employee</title>"));
        assert!(html.contains("action=\"/form_funcionario?id=0\""));
        assert!(html.contains("value=\"Bia &quot;B&quot;\""));
        assert!(html.contains(">payroll;audit</textarea>"));
        assert!(html.contains("<option value=\"Inativo\" selected>Inactive</option>"));
        assert!(html.contains("placeholder=\"Separate items with ;\""));
    }

    #[test]
    fn test_unknown_status_kept_selectable() {
        let html = status_select("Status", "On leave");
        assert!(html.contains("<option value=\"On leave\" selected>On leave</option>"));
        assert!(!html.contains("Ativo\" selected"));
    }
}
