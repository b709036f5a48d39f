//! HTML renderer: standalone HTML page with semantic markup.

use crate::model::*;
use crate::render::Renderer;
use anyhow::Result;
use html_escape::{encode_double_quoted_attribute as attr, encode_text as text};
use std::collections::HashSet;

pub struct HtmlRenderer;

impl Renderer for HtmlRenderer {
    fn render(&self, doc: &Document) -> Result<String> {
        let mut out = String::new();

        out.push_str("<!DOCTYPE html>\n<html>\n<head>\n");
        out.push_str("<meta charset=\"utf-8\">\n");
        if let Some(ref title) = doc.title {
            out.push_str(&format!("<title>{}</title>\n", text(title)));
        }
        out.push_str("<style>\n");
        out.push_str("body { font-family: system-ui, sans-serif; max-width: 48em; margin: 2em auto; padding: 0 1em; }\n");
        out.push_str("code { background: #f4f4f4; padding: 0.15em 0.3em; border-radius: 3px; }\n");
        out.push_str("table { border-collapse: collapse; }\n");
        out.push_str("th, td { text-align: left; padding: 0.25em 0.75em 0.25em 0; vertical-align: top; }\n");
        out.push_str(".tag { display: inline-block; font-size: 0.75em; padding: 0.1em 0.4em; border-radius: 3px; margin-left: 0.5em; background: #e8eefc; }\n");
        out.push_str("</style>\n");
        out.push_str("</head>\n<body>\n");

        if let Some(ref title) = doc.title {
            out.push_str(&format!("<h1>{}</h1>\n", text(title)));
        }
        if let Some(ref source) = doc.source_file {
            out.push_str(&format!("<p><code>{}</code></p>\n", text(source)));
        }

        let anchors = anchors(&doc.records);

        // Index
        if doc.records.iter().any(|r| r.name.is_some()) {
            out.push_str("<h2>Index</h2>\n<ul>\n");
            for (record, id) in doc.records.iter().zip(&anchors) {
                if record.name.is_none() {
                    continue;
                }
                out.push_str(&format!(
                    "  <li><a href=\"#{}\">{}</a></li>\n",
                    attr(id),
                    text(record.display_name())
                ));
            }
            out.push_str("</ul>\n");
        }

        for (record, id) in doc.records.iter().zip(&anchors) {
            out.push_str(&render_record_html(record, id));
        }

        out.push_str("</body>\n</html>\n");
        Ok(out)
    }

    fn file_extension(&self) -> &str {
        "html"
    }
}

fn render_record_html(record: &DocRecord, id: &str) -> String {
    let mut out = String::new();
    let name = record.display_name();

    // Heading with feature tags
    out.push_str(&format!("<h3 id=\"{}\"><code>{}</code>", attr(id), text(name)));
    for feature in &record.features {
        out.push_str(&format!(" <span class=\"tag\">{}</span>", text(feature)));
    }
    out.push_str("</h3>\n");

    if let Some(ref ty) = record.ty {
        out.push_str(&format!("<p>Type: <code>{}</code></p>\n", text(ty)));
    }

    if let Some(brief) = record.brief.as_deref().filter(|b| !b.is_empty()) {
        out.push_str(&format!("<p>{}</p>\n", text(brief)));
    }

    if let Some(ref desc) = record.description {
        for para in desc.lines() {
            out.push_str(&format!("<p>{}</p>\n", text(para)));
        }
    }

    if !record.params.is_empty() {
        out.push_str("<h4>Parameters</h4>\n<table>\n");
        out.push_str("  <tr><th>Name</th><th>Type</th><th>Description</th></tr>\n");
        for param in &record.params {
            out.push_str(&format!(
                "  <tr><td><code>{}</code></td><td>{}</td><td>{}</td></tr>\n",
                text(param.name.as_deref().unwrap_or("")),
                param
                    .ty
                    .as_deref()
                    .map(|ty| format!("<code>{}</code>", text(ty)))
                    .unwrap_or_default(),
                text(&param.brief)
            ));
        }
        out.push_str("</table>\n");
    }

    if let Some(ref ret) = record.returns {
        out.push_str("<h4>Returns</h4>\n<p>");
        if let Some(ref ty) = ret.ty {
            out.push_str(&format!("<code>{}</code>", text(ty)));
            if !ret.brief.is_empty() {
                out.push(' ');
            }
        }
        out.push_str(&text(&ret.brief));
        out.push_str("</p>\n");
    }

    out
}

/// One unique id per record. Records whose name gives an empty or
/// already used anchor fall back to `record-N`, N being the 1-based
/// position in the document.
fn anchors(records: &[DocRecord]) -> Vec<String> {
    let mut used = HashSet::new();
    records
        .iter()
        .enumerate()
        .map(|(i, record)| {
            let id = anchor(record.display_name());
            let id = if id.is_empty() || used.contains(&id) {
                format!("record-{}", i + 1)
            } else {
                id
            };
            used.insert(id.clone());
            id
        })
        .collect()
}

/// Anchor id for a record name: lowercase, alphanumerics and `-` only,
/// dots become dashes so member paths stay readable.
fn anchor(name: &str) -> String {
    name.to_lowercase()
        .replace('.', "-")
        .replace(|c: char| !c.is_alphanumeric() && c != '-', "")
}
