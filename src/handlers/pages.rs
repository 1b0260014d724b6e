use axum::{
    extract::State,
    http::header,
    response::{Html, IntoResponse},
};
use std::fmt::Write;

use crate::db::NameEntry;
use crate::middleware::auth::AdminSession;
use crate::{WheelError, router::WheelState};

const INDEX_HTML: &str = include_str!("../../assets/index.html");
const WHEEL_JS: &str = include_str!("../../assets/wheel.js");
pub(crate) const LOGIN_HTML: &str = include_str!("../../assets/login.html");

pub async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

pub async fn wheel_js() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "text/javascript; charset=utf-8")],
        WHEEL_JS,
    )
}

/// GET /admin -> every entry plus the pending locked result.
pub async fn admin(
    _session: AdminSession,
    State(state): State<WheelState>,
) -> Result<Html<String>, WheelError> {
    let entries = state.storage.list_entries().await?;
    let config = state.storage.wheel_config().await?;
    let locked = config.as_ref().and_then(|c| c.pending_lock());
    Ok(Html(render_admin(&entries, locked)))
}

fn render_admin(entries: &[NameEntry], locked: Option<&str>) -> String {
    let mut rows = String::new();
    for entry in entries {
        let _ = writeln!(
            rows,
            r#"<tr data-id="{id}"><td>{id}</td><td><input class="name" value="{name}"></td><td><button onclick="renameEntry({id}, this)">Save</button> <button onclick="deleteEntry({id})">Delete</button></td></tr>"#,
            id = entry.id,
            name = escape_html(&entry.name),
        );
    }
    let locked = locked.map(escape_html).unwrap_or_else(|| "none".to_string());

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <title>Wheel admin</title>
  <style>
    body {{ font-family: Arial, sans-serif; margin: 2rem; }}
    table {{ border-collapse: collapse; }}
    td {{ padding: 0.25rem 0.5rem; border-bottom: 1px solid #ddd; }}
    section {{ margin-bottom: 1.5rem; }}
  </style>
</head>
<body>
  <h1>Wheel admin</h1>
  <p><a href="/">Wheel</a> | <a href="/logout">Log out</a></p>
  <section>
    <h2>Locked result</h2>
    <p>Pending: <strong id="locked">{locked}</strong></p>
    <input id="lock-value" placeholder="Next result"> <button onclick="lockResult()">Lock</button>
  </section>
  <section>
    <h2>Names ({count})</h2>
    <input id="new-name" placeholder="Name"> <button onclick="addEntry()">Add</button>
    <table>{rows}</table>
  </section>
  <section>
    <h2>Import</h2>
    <form id="upload" enctype="multipart/form-data">
      <input type="file" name="file" accept=".csv,.xlsx,.xls"> <button type="submit">Upload</button>
    </form>
    <p id="upload-status"></p>
  </section>
  <script>
    async function call(method, url, body) {{
      await fetch(url, {{ method, headers: {{ 'Content-Type': 'application/json' }}, body: JSON.stringify(body) }});
      location.reload();
    }}
    function addEntry() {{ call('POST', '/api/admin/names', {{ name: document.getElementById('new-name').value }}); }}
    function deleteEntry(id) {{ call('DELETE', '/api/admin/names', {{ id }}); }}
    function renameEntry(id, btn) {{
      const name = btn.closest('tr').querySelector('.name').value;
      call('PUT', '/api/admin/names', {{ id, name }});
    }}
    function lockResult() {{ call('POST', '/api/admin/lock-result', {{ result: document.getElementById('lock-value').value }}); }}
    document.getElementById('upload').addEventListener('submit', async (ev) => {{
      ev.preventDefault();
      const resp = await fetch('/upload', {{ method: 'POST', body: new FormData(ev.target) }});
      const body = await resp.json();
      document.getElementById('upload-status').textContent = body.message || body.error;
      if (resp.ok) setTimeout(() => location.reload(), 800);
    }});
  </script>
</body>
</html>
"#,
        count = entries.len(),
    )
}

pub(crate) fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    out
}
