//! Email templates.
//!
//! Plain `format!` rendering with inline styles, which is what mail clients
//! handle best. Every value that originates outside the service (names,
//! headlines, urls) is HTML-escaped.

use std::fmt::Write as _;

use chrono::{DateTime, Utc};

use crate::domain::{Article, StockSnapshot, format_change, format_currency};

const HEADER_CELL_STYLE: &str = "padding:8px 0; color:#FDD458; font-size:12px; font-weight:600;";
const BODY_CELL_STYLE: &str = "padding:8px 0; color:#CCDADC; font-size:14px;";
const ALERT_COLUMNS: [&str; 7] = ["Symbol", "Price", "Change", "Open", "High", "Low", "Prev Close"];

/// Escape text for inclusion in HTML element content or attribute values.
#[must_use]
pub fn escape_html(value: &str) -> String {
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

/// Label used in hourly alert subjects, e.g. `Oct 18, 2026, 3:05 PM`.
#[must_use]
pub fn alert_date_label(now: DateTime<Utc>) -> String {
    now.format("%b %-d, %Y, %-I:%M %p").to_string()
}

/// Label used in news digest subjects, e.g. `Sunday, October 18, 2026`.
#[must_use]
pub fn digest_date_label(now: DateTime<Utc>) -> String {
    now.format("%A, %B %-d, %Y").to_string()
}

/// Table of snapshots with one row per symbol.
#[must_use]
pub fn alert_table(snapshots: &[StockSnapshot]) -> String {
    let mut html = String::from(
        r#"<table role="presentation" cellspacing="0" cellpadding="0" border="0" width="100%" style="border-collapse: collapse;"><tr>"#,
    );
    for column in ALERT_COLUMNS {
        let _ = write!(html, r#"<th align="left" style="{HEADER_CELL_STYLE}">{column}</th>"#);
    }
    html.push_str("</tr>");

    for snapshot in snapshots {
        let cells = [
            escape_html(snapshot.symbol.as_str()),
            format_currency(snapshot.price),
            format_change(snapshot.change_percent),
            format_currency(snapshot.open),
            format_currency(snapshot.high),
            format_currency(snapshot.low),
            format_currency(snapshot.previous_close),
        ];
        html.push_str("<tr>");
        for cell in cells {
            let _ = write!(html, r#"<td style="{BODY_CELL_STYLE}">{cell}</td>"#);
        }
        html.push_str("</tr>");
    }

    html.push_str("</table>");
    html
}

/// Full hourly alert email.
#[must_use]
pub fn alert_email(name: &str, date_label: &str, table: &str) -> String {
    layout(&format!(
        r#"<h1 style="color:#FDD458; font-size:22px; margin:0 0 16px;">Hourly Stock Alert</h1>
<p style="color:#CCDADC; font-size:14px;">Hi {name}, here is your update for {date}.</p>
{table}"#,
        name = escape_html(name),
        date = escape_html(date_label),
    ))
}

/// Full daily news digest email.
#[must_use]
pub fn news_digest_email(date_label: &str, articles: &[Article]) -> String {
    let mut items = String::new();
    for article in articles {
        let _ = write!(
            items,
            r#"<div style="margin:0 0 20px;">
<h3 style="color:#FFFFFF; font-size:16px; margin:0 0 6px;">{headline}</h3>
<p style="{BODY_CELL_STYLE} margin:0 0 6px;">{summary}</p>
<p style="color:#9095A1; font-size:12px; margin:0;">{source} · <a href="{url}" style="color:#FDD458;">Read more</a></p>
</div>"#,
            headline = escape_html(&article.headline),
            summary = escape_html(&article.summary),
            source = escape_html(&article.source),
            url = escape_html(&article.url),
        );
    }

    layout(&format!(
        r#"<h1 style="color:#FDD458; font-size:22px; margin:0 0 16px;">Market News Summary</h1>
<p style="color:#CCDADC; font-size:14px;">{date}</p>
{items}"#,
        date = escape_html(date_label),
    ))
}

fn layout(body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head><meta charset="UTF-8"><title>Signalist</title></head>
<body style="margin:0; padding:24px; background-color:#050505; font-family:Arial, sans-serif;">
<div style="max-width:600px; margin:0 auto; background-color:#141414; padding:32px; border-radius:8px;">
{body}
</div>
</body>
</html>"#
    )
}
