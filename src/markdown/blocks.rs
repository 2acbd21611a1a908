//! Line and block level passes: headings, flat lists and paragraphs.

use regex::{Captures, Regex};
use std::sync::LazyLock;

use super::classes::{ClassMap, class_attr};
use super::code::starts_with_placeholder;
use super::inline::format_inline;

static HEADING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^(#{1,6}) (.*)$").expect("heading pattern is valid"));

static ORDERED_ITEM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d+)\.\s+(.+)$").expect("ordered item pattern is valid"));

static UNORDERED_ITEM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\*\s+(.+)$").expect("unordered item pattern is valid"));

/// Lines emitted by earlier passes that must interrupt a list.
static BLOCK_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^<(h[1-6]|table|pre|th|td|tr|thead|tbody)").expect("block line pattern is valid")
});

/// Blocks that are already HTML and skip paragraph wrapping.
static BLOCK_ELEMENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^<(h[1-6]|ul|ol|table|pre|li)").expect("block element pattern is valid")
});

/// One or more blank or whitespace-only lines.
static BLANK_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n(?:[ \t]*\n)+").expect("blank run pattern is valid"));

/// Converts `#` through `######` lines into heading elements.
///
/// The marker must be followed by a single space; the pattern matches the
/// exact run of `#` characters, so `###` is never read as a shorter level
/// and seven or more `#` stay literal. Heading text is inserted verbatim.
pub(super) fn render_headings(text: &str, classes: &ClassMap) -> String {
    HEADING
        .replace_all(text, |caps: &Captures| {
            let level = caps[1].len();
            format!(
                "<h{level}{}>{}</h{level}>",
                class_attr(classes.heading(level)),
                &caps[2]
            )
        })
        .into_owned()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ListKind {
    Ordered,
    Unordered,
}

/// Items collected for the list currently open.
#[derive(Debug)]
struct ListAccumulator {
    kind: ListKind,
    items: Vec<String>,
}

impl ListAccumulator {
    fn render(self, classes: &ClassMap) -> String {
        let (tag, class) = match self.kind {
            ListKind::Ordered => ("ol", &classes.ordered_list),
            ListKind::Unordered => ("ul", &classes.unordered_list),
        };
        format!("<{tag}{}>{}</{tag}>", class_attr(class), self.items.concat())
    }
}

/// Groups consecutive `1. item` and `* item` lines into list elements.
///
/// A list closes on any non-item line, on an item of the other kind, on a
/// line already rendered as block HTML and at end of input. Each closed
/// list is emitted as a single line. Nesting is not recognised.
pub(super) fn render_lists(text: &str, classes: &ClassMap) -> String {
    let mut output: Vec<String> = Vec::new();
    let mut current: Option<ListAccumulator> = None;

    for line in text.split('\n') {
        let item = if BLOCK_LINE.is_match(line) || starts_with_placeholder(line) {
            None
        } else if let Some(caps) = ORDERED_ITEM.captures(line) {
            Some((ListKind::Ordered, caps.get(2).map_or("", |m| m.as_str())))
        } else if let Some(caps) = UNORDERED_ITEM.captures(line) {
            Some((ListKind::Unordered, caps.get(1).map_or("", |m| m.as_str())))
        } else {
            None
        };

        let Some((kind, content)) = item else {
            if let Some(list) = current.take() {
                output.push(list.render(classes));
            }
            output.push(line.to_string());
            continue;
        };

        let rendered = format!(
            "<li{}>{}</li>",
            class_attr(&classes.list_item),
            format_inline(content, classes)
        );

        if let Some(list) = current.as_mut()
            && list.kind == kind
        {
            list.items.push(rendered);
            continue;
        }

        let opened = ListAccumulator {
            kind,
            items: vec![rendered],
        };
        if let Some(list) = current.replace(opened) {
            output.push(list.render(classes));
        }
    }

    if let Some(list) = current.take() {
        output.push(list.render(classes));
    }

    output.join("\n")
}

/// Wraps plain text blocks in paragraphs.
///
/// Blocks are separated by blank lines. Blocks that already start with a
/// block element or a code placeholder pass through trimmed; empty blocks
/// are dropped. Inside a wrapped block only the plain text lines are
/// inline formatted, so spans never cross rendered list or table HTML.
pub(super) fn wrap_paragraphs(text: &str, classes: &ClassMap) -> String {
    BLANK_RUN
        .split(text)
        .map(str::trim)
        .filter(|block| !block.is_empty())
        .map(|block| {
            if BLOCK_ELEMENT.is_match(block) || starts_with_placeholder(block) {
                block.to_string()
            } else {
                format!(
                    "<p{}>{}</p>",
                    class_attr(&classes.paragraph),
                    format_plain_runs(block, classes)
                )
            }
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// True for a line an earlier pass already rendered as block HTML.
fn is_rendered_line(line: &str) -> bool {
    BLOCK_LINE.is_match(line) || BLOCK_ELEMENT.is_match(line) || starts_with_placeholder(line)
}

/// Inline formats each run of plain lines, leaving rendered lines as is.
fn format_plain_runs(block: &str, classes: &ClassMap) -> String {
    let mut output: Vec<String> = Vec::new();
    let mut run: Vec<&str> = Vec::new();

    for line in block.split('\n') {
        if is_rendered_line(line) {
            if !run.is_empty() {
                output.push(format_inline(&run.join("\n"), classes));
                run.clear();
            }
            output.push(line.to_string());
        } else {
            run.push(line);
        }
    }

    if !run.is_empty() {
        output.push(format_inline(&run.join("\n"), classes));
    }

    output.join("\n")
}
