use std::sync::LazyLock;

use html_escape::{encode_double_quoted_attribute as attr, encode_text as text};
use regex::Regex;

use crate::session::{History, Outcome, SummaryRecord};

const TITLE: &str = "YouTube Video Content Summarizer";

const STYLE: &str = r#"
body { font-family: system-ui, sans-serif; max-width: 60rem; margin: 2rem auto; padding: 0 1rem; color: #222; }
form { display: flex; gap: .5rem; margin-bottom: 1.5rem; }
form input[type=text] { flex: 1; padding: .5rem; font-size: 1rem; }
form button { padding: .5rem 1rem; font-size: 1rem; }
.msg { padding: .75rem 1rem; border-radius: .25rem; margin-bottom: 1rem; }
.msg.success { background: #e6f4ea; }
.msg.warning { background: #fff4e5; }
.msg.error { background: #fdecea; }
.tabs > input { display: none; }
.tabs > label { display: inline-block; padding: .4rem .9rem; cursor: pointer; border-bottom: 2px solid transparent; }
.tabs > input:checked + label { border-bottom-color: #c00; }
.tabs > .panel { display: none; padding: 1rem 0; }
.tabs > input:nth-of-type(1):checked ~ .panel.summary,
.tabs > input:nth-of-type(2):checked ~ .panel.transcript { display: block; }
.summary li { margin: .2rem 0; }
.transcript pre { white-space: pre-wrap; font-family: ui-monospace, monospace; }
"#;

/// Render the whole page: input form, result of the latest submission, history
pub fn render_page(url_input: &str, outcome: Option<&Outcome>, history: &History) -> String {
    let mut body = String::new();

    body.push_str(&format!(
        r#"<form method="post" action="/summarize">
<input type="text" name="url" value="{}" placeholder="https://youtube.com/watch?v=..." aria-label="Paste YouTube URL">
<button type="submit">Generate Summary</button>
</form>
"#,
        attr(url_input)
    ));

    if let Some(outcome) = outcome {
        body.push_str(&render_outcome(outcome));
    }

    if !history.is_empty() {
        body.push_str("<section class=\"history\">\n<h3>Previous Summaries</h3>\n");
        for (i, record) in history.recent_first().enumerate() {
            body.push_str(&render_history_entry(i, record));
        }
        body.push_str("</section>\n");
    }

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>{TITLE}</title>
<style>{STYLE}</style>
</head>
<body>
<h1>{TITLE}</h1>
{body}</body>
</html>
"#
    )
}

fn render_outcome(outcome: &Outcome) -> String {
    match outcome {
        Outcome::EmptyInput => message("warning", "Please enter a YouTube URL!"),
        Outcome::Failed(e) => {
            format!(
                "<div class=\"msg error\" data-kind=\"{}\">{}</div>\n",
                e.kind(),
                text(&e.to_string())
            )
        }
        Outcome::Summarized { record, notice } => {
            let mut out = message("success", "Summary generated successfully!");
            if let Some(notice) = notice {
                out.push_str(&message("warning", &notice.to_string()));
            }
            out.push_str(&format!(
                r#"<section class="result">
<h3>Content Summary</h3>
<p><strong>Title:</strong> {}<br><strong>Author:</strong> {}<br><strong>URL:</strong> <a href="{}">Open in YouTube</a></p>
{}</section>
"#,
                text(&record.title),
                text(&record.author),
                attr(&record.url),
                tabs("result", "Full Transcript", record)
            ));
            out
        }
    }
}

fn render_history_entry(index: usize, record: &SummaryRecord) -> String {
    format!(
        r#"<article>
<h4>Summary {}: {} (by {})</h4>
<p><a href="{}">Watch on YouTube</a></p>
{}<hr>
</article>
"#,
        index + 1,
        text(&record.title),
        text(&record.author),
        attr(&record.url),
        tabs(&format!("history-{index}"), "Transcript", record)
    )
}

/// Two-way Summary / Transcript view; `key` must be unique on the page
fn tabs(key: &str, transcript_label: &str, record: &SummaryRecord) -> String {
    format!(
        r#"<div class="tabs">
<input type="radio" name="tabs-{key}" id="{key}-summary" checked><label for="{key}-summary">Summary</label>
<input type="radio" name="tabs-{key}" id="{key}-transcript"><label for="{key}-transcript">{transcript_label}</label>
<div class="panel summary">{}</div>
<div class="panel transcript"><pre>{}</pre></div>
</div>
"#,
        render_markdown(&record.summary),
        text(&record.transcript)
    )
}

static ORDERED_ITEM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+[.)]\s+(.*)$").expect("ordered item pattern must compile"));
static HEADING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(#{1,6})\s+(.*)$").expect("heading pattern must compile"));
static BOLD: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\*\*(.+?)\*\*").expect("bold pattern must compile"));

#[derive(Clone, Copy, PartialEq, Eq)]
enum List {
    Unordered,
    Ordered,
}

impl List {
    fn tag(self) -> &'static str {
        match self {
            List::Unordered => "ul",
            List::Ordered => "ol",
        }
    }
}

/// Render the markdown subset models answer with: headings, bullet and
/// numbered lists, paragraphs and `**bold**`. Nested lists are flattened.
fn render_markdown(src: &str) -> String {
    let mut out = String::new();
    let mut list: Option<List> = None;
    let mut paragraph: Vec<String> = Vec::new();

    fn flush_paragraph(out: &mut String, paragraph: &mut Vec<String>) {
        if !paragraph.is_empty() {
            out.push_str(&format!("<p>{}</p>\n", paragraph.join("<br>")));
            paragraph.clear();
        }
    }

    fn set_list(out: &mut String, list: &mut Option<List>, want: Option<List>) {
        if *list != want {
            if let Some(open) = *list {
                out.push_str(&format!("</{}>\n", open.tag()));
            }
            if let Some(next) = want {
                out.push_str(&format!("<{}>\n", next.tag()));
            }
            *list = want;
        }
    }

    for line in src.lines() {
        let line = line.trim();

        if line.is_empty() {
            flush_paragraph(&mut out, &mut paragraph);
            set_list(&mut out, &mut list, None);
        } else if let Some(caps) = HEADING.captures(line) {
            flush_paragraph(&mut out, &mut paragraph);
            set_list(&mut out, &mut list, None);
            let level = (caps[1].len() + 3).min(6);
            out.push_str(&format!("<h{level}>{}</h{level}>\n", inline(&caps[2])));
        } else if let Some(item) = ["- ", "* ", "• "].iter().find_map(|b| line.strip_prefix(b)) {
            flush_paragraph(&mut out, &mut paragraph);
            set_list(&mut out, &mut list, Some(List::Unordered));
            out.push_str(&format!("<li>{}</li>\n", inline(item.trim())));
        } else if let Some(caps) = ORDERED_ITEM.captures(line) {
            flush_paragraph(&mut out, &mut paragraph);
            set_list(&mut out, &mut list, Some(List::Ordered));
            out.push_str(&format!("<li>{}</li>\n", inline(&caps[1])));
        } else {
            set_list(&mut out, &mut list, None);
            paragraph.push(inline(line));
        }
    }

    flush_paragraph(&mut out, &mut paragraph);
    set_list(&mut out, &mut list, None);
    out
}

fn inline(s: &str) -> String {
    BOLD.replace_all(&text(s), "<strong>$1</strong>").into_owned()
}

fn message(class: &str, msg: &str) -> String {
    format!("<div class=\"msg {class}\">{}</div>\n", text(msg))
}
