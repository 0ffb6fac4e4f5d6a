//! Normalization of rich-text acceptance criteria into plain Given/When/Then text.

use std::sync::OnceLock;

use regex::{NoExpand, Regex};

/// Markup that ends a visual line, replaced by `\n` before tags are stripped.
const LINE_BREAK_MARKUP: &[&str] = &["<br>", "<br/>", "<br />", "</p>", "</div>"];

/// Entities decoded after tag stripping, applied in this order.
const ENTITIES: &[(&str, &str)] = &[
    ("&nbsp;", " "),
    ("&lt;", "<"),
    ("&gt;", ">"),
    ("&amp;", "&"),
    ("&quot;", "\""),
];

/// Clause keywords that must start their own line, applied in this order.
const CLAUSE_KEYWORDS: [&str; 3] = ["Given ", "When ", "Then "];

const SCENARIO_PREFIX: &str = "Scenario ";

static TAG_RE: OnceLock<Regex> = OnceLock::new();
static BLANK_RUN_RE: OnceLock<Regex> = OnceLock::new();
static CLAUSE_RES: OnceLock<[Regex; 3]> = OnceLock::new();

fn tag_re() -> &'static Regex {
    TAG_RE.get_or_init(|| Regex::new(r"<[^>]+>").unwrap())
}

fn blank_run_re() -> &'static Regex {
    BLANK_RUN_RE.get_or_init(|| Regex::new(r"\n\s*\n").unwrap())
}

fn clause_res() -> &'static [Regex; 3] {
    CLAUSE_RES.get_or_init(|| {
        CLAUSE_KEYWORDS.map(|kw| Regex::new(&format!(r"\s+{}", regex::escape(kw))).unwrap())
    })
}

/// Convert a raw acceptance criteria field into canonical plain text.
///
/// Line-break markup becomes newlines, remaining tags are dropped and a
/// fixed set of entities is decoded. Blank lines are collapsed, every
/// `Given`/`When`/`Then` clause is moved onto its own line, and each
/// `Scenario` after the first line is separated by exactly one blank line.
///
/// Entities are decoded after tags are stripped, so `&lt;br&gt;` survives
/// as the literal text `<br>`.
pub fn normalize_criteria(raw: &str) -> String {
    let mut text = raw.to_string();

    for markup in LINE_BREAK_MARKUP {
        text = text.replace(markup, "\n");
    }

    let mut text = tag_re().replace_all(&text, "").into_owned();

    for (entity, decoded) in ENTITIES {
        text = text.replace(entity, decoded);
    }

    let text = blank_run_re().replace_all(&text, "\n");
    let mut text = text.trim().to_string();

    for (re, kw) in clause_res().iter().zip(CLAUSE_KEYWORDS) {
        let replacement = format!("\n{kw}");
        text = re.replace_all(&text, NoExpand(&replacement)).into_owned();
    }

    layout_scenarios(&text)
}

/// Trim every line, drop empty ones, and put one blank line before each
/// `Scenario` line that is not the first line of the text.
fn layout_scenarios(text: &str) -> String {
    let mut lines: Vec<&str> = Vec::new();
    for (i, line) in text.split('\n').enumerate() {
        let line = line.trim();
        if i > 0 && line.starts_with(SCENARIO_PREFIX) {
            lines.push("");
        }
        if !line.is_empty() {
            lines.push(line);
        }
    }
    lines.join("\n")
}
