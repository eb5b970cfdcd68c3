//! Line-oriented lightweight markup used by plain-text files and the dashboard intro.

use serde::Deserialize;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MarkupLine {
    Heading { level: u8, text: String },
    Bold(String),
    LabelledBullet { label: String, text: String },
    Bullet(String),
    Numbered { number: u32, text: String },
    Rule,
    CodeFence(String),
    InlineCode(String),
    Spacer,
    Paragraph(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Inline {
    Text(String),
    Strong(String),
    Code(String),
}

impl Inline {
    pub fn text(&self) -> &str {
        match self {
            Self::Text(text) | Self::Strong(text) | Self::Code(text) => text,
        }
    }
}

/// First matching rule wins; order matters (`# ` would otherwise swallow `## `).
pub fn classify_line(line: &str) -> MarkupLine {
    for (prefix, level) in [("#### ", 4), ("### ", 3), ("## ", 2), ("# ", 1)] {
        if let Some(text) = line.strip_prefix(prefix) {
            return MarkupLine::Heading {
                level,
                text: text.to_string(),
            };
        }
    }

    if let Some(inner) = line
        .strip_prefix("**")
        .and_then(|rest| rest.strip_suffix("**"))
    {
        if !inner.is_empty() && !inner.contains("**") {
            return MarkupLine::Bold(inner.to_string());
        }
    }

    if let Some(rest) = line
        .strip_prefix("- **")
        .or_else(|| line.strip_prefix("* **"))
    {
        if let Some((label, text)) = rest.split_once("**") {
            return MarkupLine::LabelledBullet {
                label: label.to_string(),
                text: text.trim_start_matches(':').trim().to_string(),
            };
        }
    }

    if let Some(text) = line.strip_prefix("- ").or_else(|| line.strip_prefix("* ")) {
        return MarkupLine::Bullet(text.to_string());
    }

    if let Some(numbered) = numbered_item(line) {
        return numbered;
    }

    if line.starts_with("---") {
        return MarkupLine::Rule;
    }

    if let Some(lang) = line.strip_prefix("```") {
        return MarkupLine::CodeFence(lang.trim().to_string());
    }

    if line.contains('`') && !line.starts_with('`') {
        return MarkupLine::InlineCode(line.to_string());
    }

    if line.trim().is_empty() {
        return MarkupLine::Spacer;
    }

    MarkupLine::Paragraph(line.to_string())
}

fn numbered_item(line: &str) -> Option<MarkupLine> {
    let digits = line.chars().take_while(char::is_ascii_digit).count();
    if digits == 0 {
        return None;
    }
    let rest = line[digits..].strip_prefix('.')?;
    let number = line[..digits].parse().ok()?;
    Some(MarkupLine::Numbered {
        number,
        text: rest.trim().to_string(),
    })
}

/// Splits a line into plain, `**strong**` and `` `code` `` spans.
///
/// Backticks take precedence: text inside a code span is never treated as
/// strong. An unterminated marker is kept as literal text.
pub fn parse_inline(text: &str) -> Vec<Inline> {
    let mut spans = Vec::new();
    for (index, segment) in text.split('`').enumerate() {
        if index % 2 == 1 {
            spans.push(Inline::Code(segment.to_string()));
        } else {
            push_strong_runs(&mut spans, segment);
        }
    }
    if text.matches('`').count() % 2 == 1 {
        // Odd backtick count: the last "code" span was never closed.
        if let Some(Inline::Code(open)) = spans.pop() {
            push_text(&mut spans, format!("`{open}"));
        }
    }
    spans
}

fn push_strong_runs(spans: &mut Vec<Inline>, segment: &str) {
    let mut rest = segment;
    while let Some(start) = rest.find("**") {
        let after = &rest[start + 2..];
        let Some(end) = after.find("**") else {
            break;
        };
        push_text(spans, rest[..start].to_string());
        spans.push(Inline::Strong(after[..end].to_string()));
        rest = &after[end + 2..];
    }
    push_text(spans, rest.to_string());
}

fn push_text(spans: &mut Vec<Inline>, text: String) {
    if text.is_empty() {
        return;
    }
    if let Some(Inline::Text(previous)) = spans.last_mut() {
        previous.push_str(&text);
        return;
    }
    spans.push(Inline::Text(text));
}
