use std::fmt::Write;

use registry_types::EntityKind;

use super::{escape, page, Notice};
use crate::routes::paths;
use crate::store::Record;

/// Record table with a name search box and per-row edit/delete links
pub fn list_page(
    kind: EntityKind,
    records: &[Record],
    search: &str,
    notice: Option<Notice>,
) -> String {
    let list_path = paths::list(kind);
    let mut body = String::new();

    let _ = write!(
        body,
        "<form method=\"get\" action=\"{list_path}\">\
         <input type=\"text\" name=\"search\" placeholder=\"Search by name\" value=\"{}\">\
         <button type=\"submit\">Search</button> <a href=\"{list_path}\">Clear</a></form>\
         <p><a href=\"{}\">New {}</a></p>",
        escape(search),
        paths::form(kind),
        kind.singular().to_lowercase(),
    );

    if records.is_empty() {
        let message = if search.is_empty() {
            format!("No {} registered yet.", kind.plural().to_lowercase())
        } else {
            format!("No {} match \"{}\".", kind.plural().to_lowercase(), escape(search))
        };
        let _ = write!(body, "<p>{message}</p>");
    } else {
        body.push_str("<table><thead><tr>");
        for column in kind.columns() {
            let _ = write!(body, "<th>{}</th>", escape(column));
        }
        body.push_str("<th>Actions</th></tr></thead><tbody>");

        for record in records {
            body.push_str("<tr>");
            for column in kind.columns() {
                let _ = write!(body, "<td>{}</td>", escape(record.value(column)));
            }
            match record.position() {
                Some(index) => {
                    let _ = write!(
                        body,
                        "<td><a href=\"{}?id={index}\">Edit</a> \
                         <a href=\"{}\" onclick=\"return confirm('Delete this record?')\">Delete</a></td>",
                        paths::form(kind),
                        paths::delete(kind, index),
                    );
                }
                None => body.push_str("<td></td>"),
            }
            body.push_str("</tr>");
        }
        body.push_str("</tbody></table>");
    }

    let message = notice.map(|n| n.message(kind));
    page(kind.plural(), message.as_deref(), &body)
}
