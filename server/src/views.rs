//! Thin HTML views. Rendering is deliberately minimal string assembly;
//! the interesting logic lives in the handlers and queries that feed it.
//! Every user-supplied string goes through `escape` on the way out.

use crate::auth::Principal;
use crate::dashboard::{EntryRow, ProgressSummary};
use crate::flash::Flash;
use crate::models::MessierObject;
use crate::uploads::StoredFile;

/// Minimal HTML escaping for text and attribute positions.
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

fn layout(title: &str, nav: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n\
         <title>{title} - Messier Journal</title>\n\
         <style>\n\
         body {{ font-family: system-ui, sans-serif; max-width: 56rem; margin: 0 auto; padding: 1rem; }}\n\
         nav {{ display: flex; gap: 1rem; border-bottom: 1px solid #ccc; padding-bottom: .5rem; }}\n\
         .notice-success {{ background: #e6f4ea; padding: .5rem 1rem; }}\n\
         .notice-error {{ background: #fce8e6; padding: .5rem 1rem; }}\n\
         .entry {{ border-bottom: 1px solid #eee; padding: 1rem 0; }}\n\
         .entry img {{ max-width: 16rem; display: block; }}\n\
         form.stacked label {{ display: block; margin-top: .5rem; }}\n\
         </style>\n</head>\n<body>\n<nav>{nav}</nav>\n{body}\n</body>\n</html>\n",
        title = escape(title),
    )
}

fn authed_nav(principal: &Principal) -> String {
    format!(
        "<a href=\"/\">Dashboard</a><a href=\"/profile\">Profile</a>\
         <a href=\"/logout\">Log out</a><span>{}</span>",
        escape(&principal.display_name)
    )
}

const ANON_NAV: &str = "<a href=\"/login\">Log in</a><a href=\"/register\">Register</a>";

fn flash_banner(flash: Option<&Flash>) -> String {
    match flash {
        Some(f) => format!(
            "<p class=\"{}\">{}</p>",
            f.level.css_class(),
            escape(&f.message)
        ),
        None => String::new(),
    }
}

fn error_banner(error: Option<&str>) -> String {
    match error {
        Some(msg) => format!("<p class=\"notice-error\">{}</p>", escape(msg)),
        None => String::new(),
    }
}

/// Fallback page for server-side failures; never exposes internal detail.
pub fn error_page(message: &str) -> String {
    let body = format!(
        "<h1>Messier Journal</h1>\n<p class=\"notice-error\">{}</p>\n\
         <p><a href=\"/\">Back to dashboard</a></p>",
        escape(message)
    );
    layout("Error", ANON_NAV, &body)
}

pub fn login_page(error: Option<&str>, email: &str) -> String {
    let body = format!(
        "<h1>Log in</h1>\n{error}\n\
         <form class=\"stacked\" method=\"post\" action=\"/login\">\n\
         <label>Email <input type=\"email\" name=\"email\" value=\"{email}\" required></label>\n\
         <label>Password <input type=\"password\" name=\"password\" required></label>\n\
         <label><input type=\"checkbox\" name=\"remember\" value=\"on\"> Remember me</label>\n\
         <button type=\"submit\">Log in</button>\n</form>\n\
         <p>No account? <a href=\"/register\">Register</a></p>",
        error = error_banner(error),
        email = escape(email),
    );
    layout("Log in", ANON_NAV, &body)
}

pub fn register_page(error: Option<&str>, email: &str, user_name: &str) -> String {
    let body = format!(
        "<h1>Register</h1>\n{error}\n\
         <form class=\"stacked\" method=\"post\" action=\"/register\">\n\
         <label>Email <input type=\"email\" name=\"email\" value=\"{email}\" required></label>\n\
         <label>Display name <input type=\"text\" name=\"user_name\" value=\"{user_name}\" required></label>\n\
         <label>Password <input type=\"password\" name=\"password\" required></label>\n\
         <label>Confirm password <input type=\"password\" name=\"confirm\" required></label>\n\
         <button type=\"submit\">Create account</button>\n</form>\n\
         <p>Already registered? <a href=\"/login\">Log in</a></p>",
        error = error_banner(error),
        email = escape(email),
        user_name = escape(user_name),
    );
    layout("Register", ANON_NAV, &body)
}

fn progress_section(summary: &ProgressSummary) -> String {
    let mut out = format!(
        "<section>\n<h2>Progress</h2>\n<p>{} of 110 objects observed</p>\n",
        summary.total
    );
    if !summary.per_type.is_empty() {
        out.push_str("<ul>\n");
        for (object_type, count) in &summary.per_type {
            out.push_str(&format!("<li>{}: {count}</li>\n", escape(object_type)));
        }
        out.push_str("</ul>\n");
    }
    out.push_str("</section>\n");
    out
}

fn new_entry_form(catalog: &[MessierObject]) -> String {
    let mut options = String::new();
    for object in catalog {
        options.push_str(&format!(
            "<option value=\"{}\">M{} - {}</option>\n",
            object.id,
            object.messier_number,
            escape(&object.name)
        ));
    }
    format!(
        "<section>\n<h2>New observation</h2>\n\
         <form class=\"stacked\" method=\"post\" action=\"/journal/new\" enctype=\"multipart/form-data\">\n\
         <label>Object <select name=\"messier_id\" required>\n{options}</select></label>\n\
         <label>Observed date <input type=\"date\" name=\"observed_date\" required></label>\n\
         <label>Notes <textarea name=\"journal_text\" rows=\"4\"></textarea></label>\n\
         <label>Image <input type=\"file\" name=\"image\" accept=\".jpg,.jpeg,.png,.webp\" required></label>\n\
         <button type=\"submit\">Save entry</button>\n</form>\n</section>\n"
    )
}

fn entries_section(entries: &[EntryRow]) -> String {
    if entries.is_empty() {
        return "<section>\n<h2>Journal</h2>\n<p>No observations recorded yet.</p>\n</section>\n"
            .to_string();
    }
    let mut out = String::from("<section>\n<h2>Journal</h2>\n");
    for entry in entries {
        out.push_str(&format!(
            "<article class=\"entry\">\n\
             <h3>M{number} - {name} <small>({object_type})</small></h3>\n\
             <p><time>{date}</time></p>\n\
             <img src=\"{src}\" alt=\"Observation of M{number}\">\n\
             <p>{text}</p>\n</article>\n",
            number = entry.messier_number,
            name = escape(&entry.object_name),
            object_type = escape(&entry.object_type),
            date = entry.observed_date,
            src = StoredFile::public_url(&entry.image_path),
            text = escape(&entry.journal_text),
        ));
    }
    out.push_str("</section>\n");
    out
}

pub fn dashboard_page(
    principal: &Principal,
    flash: Option<&Flash>,
    catalog: &[MessierObject],
    entries: &[EntryRow],
    summary: &ProgressSummary,
) -> String {
    let body = format!(
        "{flash}\n<h1>Observation dashboard</h1>\n{progress}{form}{entries}",
        flash = flash_banner(flash),
        progress = progress_section(summary),
        form = new_entry_form(catalog),
        entries = entries_section(entries),
    );
    layout("Dashboard", &authed_nav(principal), &body)
}

pub fn profile_page(principal: &Principal, summary: &ProgressSummary) -> String {
    let body = format!(
        "<h1>Profile</h1>\n\
         <p>Display name: {name}</p>\n<p>Email: {email}</p>\n{progress}",
        name = escape(&principal.display_name),
        email = escape(&principal.email),
        progress = progress_section(summary),
    );
    layout("Profile", &authed_nav(principal), &body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn principal() -> Principal {
        Principal {
            id: uuid::Uuid::nil(),
            email: "user@example.com".to_string(),
            display_name: "Test <User>".to_string(),
        }
    }

    #[test]
    fn escape_covers_html_metacharacters() {
        assert_eq!(
            escape("<img src=\"x\" onerror='y'> & more"),
            "&lt;img src=&quot;x&quot; onerror=&#39;y&#39;&gt; &amp; more"
        );
        assert_eq!(escape("plain"), "plain");
    }

    #[test]
    fn user_text_is_escaped_in_dashboard() {
        let entry = EntryRow {
            messier_number: 31,
            object_name: "Andromeda Galaxy".to_string(),
            object_type: "Galaxy".to_string(),
            image_path: "abc.jpg".to_string(),
            journal_text: "<script>alert(1)</script>".to_string(),
            observed_date: chrono::NaiveDate::from_ymd_opt(2025, 8, 21).unwrap(),
            updated_at: chrono::Utc::now(),
        };
        let summary = ProgressSummary {
            total: 1,
            per_type: BTreeMap::from([("Galaxy".to_string(), 1)]),
        };

        let html = dashboard_page(&principal(), None, &[], &[entry], &summary);
        assert!(!html.contains("<script>alert(1)</script>"));
        assert!(html.contains("&lt;script&gt;alert(1)&lt;/script&gt;"));
        assert!(html.contains("/uploads/abc.jpg"));
        assert!(html.contains("Test &lt;User&gt;"));
    }

    #[test]
    fn login_page_posts_back_to_login() {
        let html = login_page(Some("Invalid email or password"), "a@b.c");
        assert!(html.contains("action=\"/login\""));
        assert!(html.contains("Invalid email or password"));
        assert!(html.contains("value=\"a@b.c\""));
    }

    #[test]
    fn dashboard_form_lists_catalog_options() {
        let object = MessierObject {
            id: uuid::Uuid::nil(),
            messier_number: 42,
            name: "Orion Nebula".to_string(),
            object_type: "Nebula".to_string(),
        };
        let html = dashboard_page(
            &principal(),
            None,
            &[object],
            &[],
            &ProgressSummary::default(),
        );
        assert!(html.contains("M42 - Orion Nebula"));
        assert!(html.contains("enctype=\"multipart/form-data\""));
    }
}
