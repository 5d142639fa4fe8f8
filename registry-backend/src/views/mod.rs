//! Server-rendered HTML pages.
//!
//! Every user-supplied value goes through `escape` before reaching markup.

pub mod dashboard;
pub mod form;
pub mod list;

use registry_types::EntityKind;

use crate::routes::paths;

pub use dashboard::dashboard_page;
pub use form::form_page;
pub use list::list_page;

/// One-shot status message shown after a redirect
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    Created,
    Updated,
    Deleted,
}

impl Notice {
    pub fn from_query(value: &str) -> Option<Self> {
        match value {
            "created" => Some(Notice::Created),
            "updated" => Some(Notice::Updated),
            "deleted" => Some(Notice::Deleted),
            _ => None,
        }
    }

    pub fn as_query(self) -> &'static str {
        match self {
            Notice::Created => "created",
            Notice::Updated => "updated",
            Notice::Deleted => "deleted",
        }
    }

    pub fn message(self, kind: EntityKind) -> String {
        let verb = match self {
            Notice::Created => "created",
            Notice::Updated => "updated",
            Notice::Deleted => "deleted",
        };
        format!("{} {} successfully!", kind.singular(), verb)
    }
}

pub fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

const STYLE: &str = "body{font-family:sans-serif;margin:2rem;color:#222}\
nav a{margin-right:1rem}\
table{border-collapse:collapse;margin-top:1rem}\
th,td{border:1px solid #ccc;padding:.3rem .6rem;text-align:left;vertical-align:top}\
.notice{background:#e3f5e6;border:1px solid #2e9e44;padding:.5rem;margin:1rem 0}\
label{display:block;margin-top:.6rem}\
.stats span{margin-right:1.5rem}";

/// Wrap a body in the shared page layout
pub fn page(title: &str, notice: Option<&str>, body: &str) -> String {
    let notice = notice
        .map(|msg| format!("<div class=\"notice\">{}</div>", escape(msg)))
        .unwrap_or_default();

    let nav: String = EntityKind::ALL
        .into_iter()
        .map(|kind| {
            format!(
                "<a href=\"{}\">{}</a><a href=\"{}\">{} dashboard</a>",
                paths::list(kind),
                kind.plural(),
                paths::dashboard(kind),
                kind.singular(),
            )
        })
        .collect();

    format!(
        "<!DOCTYPE html>\n<html lang=\"en\"><head><meta charset=\"utf-8\">\
         <title>{title}</title><style>{STYLE}</style></head>\
         <body><nav>{nav}</nav><h1>{title}</h1>{notice}{body}</body></html>\n",
        title = escape(title),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape() {
        assert_eq!(escape("a & b"), "a &amp; b");
        assert_eq!(escape("<script>\"x\"</script>"), "&lt;script&gt;&quot;x&quot;&lt;/script&gt;");
        assert_eq!(escape("O'Neil"), "O&#39;Neil");
        assert_eq!(escape("plain"), "plain");
    }

    #[test]
    fn test_notice_round_trip() {
        for notice in [Notice::Created, Notice::Updated, Notice::Deleted] {
            assert_eq!(Notice::from_query(notice.as_query()), Some(notice));
        }
        assert_eq!(Notice::from_query("bogus"), None);
        assert_eq!(
            Notice::Deleted.message(EntityKind::Employees),
            "Employee deleted successfully!"
        );
    }

    #[test]
    fn test_page_layout() {
        let html = page("Clients", Some("Saved <ok>"), "<p>body</p>");
        assert!(html.contains("<title>Clients</title>"));
        assert!(html.contains("<div class=\"notice\">Saved &lt;ok&gt;</div>"));
        assert!(html.contains("<p>body</p>"));
        assert!(html.contains("href=\"/funcionarios\""));
    }
}
