use base64::{Engine, engine::general_purpose::STANDARD};

use crate::types::FormattedTable;

const STYLE: &str = r#"
    body { font-family: 'Segoe UI', Tahoma, Geneva, Verdana, sans-serif; margin: 2rem auto; max-width: 70rem; color: #222; }
    h1 { color: #1db954; }
    input[type=text] { width: 40rem; padding: 0.4rem; }
    button, .button { padding: 0.5rem 1rem; background: #1db954; color: white; border: none; border-radius: 4px; text-decoration: none; margin-right: 0.5rem; }
    .info { background: #e8f4fd; padding: 0.6rem 1rem; border-radius: 4px; }
    .success { background: #e6f7ea; padding: 0.6rem 1rem; border-radius: 4px; }
    .warning { background: #fff4e0; padding: 0.6rem 1rem; border-radius: 4px; }
    table { border-collapse: collapse; margin: 1rem 0; }
    th, td { border: 1px solid #ddd; padding: 0.3rem 0.6rem; text-align: left; }
    th { background: #f4f4f4; }
    progress { width: 30rem; }
"#;

/// Wraps `body` in the shared page layout.
///
/// `refresh_secs` adds a meta refresh, used while a job is running.
pub fn layout(title: &str, body: &str, refresh_secs: Option<u32>) -> String {
    let refresh = refresh_secs
        .map(|s| format!(r#"<meta http-equiv="refresh" content="{}">"#, s))
        .unwrap_or_default();

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    {refresh}
    <title>{title}</title>
    <style>{style}</style>
</head>
<body>
    <h1>Spotify Playlist Credits Analyzer</h1>
    {body}
</body>
</html>"#,
        refresh = refresh,
        title = escape(title),
        style = STYLE,
        body = body
    )
}

pub fn warning(message: &str) -> String {
    format!(r#"<p class="warning">{}</p>"#, escape(message))
}

pub fn escape(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

pub fn table_html(table: &FormattedTable) -> String {
    let header: String = table
        .headers()
        .iter()
        .map(|h| format!("<th>{}</th>", escape(h)))
        .collect();

    let body: String = table
        .records()
        .map(|record| {
            let cells: String = record
                .iter()
                .map(|c| format!("<td>{}</td>", escape(c)))
                .collect();
            format!("<tr>{}</tr>", cells)
        })
        .collect();

    format!(
        "<table><thead><tr>{}</tr></thead><tbody>{}</tbody></table>",
        header, body
    )
}

/// A download link that carries the CSV inline, so it keeps working after the
/// server has started another job.
pub fn csv_data_link(csv: &[u8], file_name: &str) -> String {
    format!(
        r#"<a class="button" href="data:text/csv;base64,{data}" download="{name}">Download {name}</a>"#,
        data = STANDARD.encode(csv),
        name = escape(file_name)
    )
}
