//! Post templating: front-matter, body scaffold, wrapping, and file paths

use anyhow::Result;
use serde_yaml::Value;
use std::path::{Path, PathBuf};

/// Placeholder author used when $USER is unavailable
const FALLBACK_AUTHOR: &str = "author";

/// Assemble a complete post: YAML front-matter followed by the body
/// scaffold. When `textwrap` is set, body paragraphs are wrapped to that
/// width; the front-matter is never rewrapped.
pub fn build_post(
    date: &str,
    title: &str,
    categories: &[String],
    tags: &[String],
    textwrap: Option<usize>,
) -> Result<String> {
    tracing::debug!("Assembling post");
    let front_matter = front_matter(date, categories, tags)?;

    let mut body = body(title);
    if let Some(width) = textwrap {
        tracing::debug!("Wrapping post to {} characters", width);
        body = wrap_paragraphs(&body, width);
    }

    Ok(format!("---\n{}\n---\n\n{}", front_matter, body))
}

/// Render the front-matter mapping in insertion order, without the document
/// delimiters. Empty tag/category lists are omitted entirely.
fn front_matter(date: &str, categories: &[String], tags: &[String]) -> Result<String> {
    let mut metadata = serde_yaml::Mapping::new();
    metadata.insert("date".into(), date.into());
    metadata.insert(
        "authors".into(),
        Value::Sequence(vec![post_author().into()]),
    );
    metadata.insert("comments".into(), true.into());
    if !tags.is_empty() {
        metadata.insert("tags".into(), string_sequence(tags));
    }
    if !categories.is_empty() {
        metadata.insert("categories".into(), string_sequence(categories));
    }

    let rendered = serde_yaml::to_string(&metadata)?;
    Ok(rendered.trim_end().to_string())
}

fn string_sequence(items: &[String]) -> Value {
    Value::Sequence(items.iter().map(|s| Value::from(s.as_str())).collect())
}

fn post_author() -> String {
    std::env::var("USER").unwrap_or_else(|_| FALLBACK_AUTHOR.to_string())
}

/// The body scaffold: title heading, TLDR admonition, summary and body
/// placeholders, and the excerpt separator.
fn body(title: &str) -> String {
    format!(
        "# {title}\n\
         \n\
         !!! tip \"TLDR\"\n    ...tldr...\n\
         \n\
         ...summary...\n\
         \n\
         <!-- more -->\n\
         \n\
         ...body...\n\
         \n\
         Thanks for reading!"
    )
}

/// Greedily fill each blank-line-separated paragraph to `width` characters.
/// Paragraphs containing indented lines (admonitions, code) are left alone.
pub fn wrap_paragraphs(text: &str, width: usize) -> String {
    text.split("\n\n")
        .map(|paragraph| {
            if paragraph
                .lines()
                .any(|line| line.starts_with(' ') || line.starts_with('\t'))
            {
                paragraph.to_string()
            } else {
                fill(paragraph, width)
            }
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

fn fill(paragraph: &str, width: usize) -> String {
    let mut lines: Vec<String> = Vec::new();
    let mut current = String::new();
    for word in paragraph.split_whitespace() {
        if current.is_empty() {
            current.push_str(word);
        } else if current.len() + 1 + word.len() <= width {
            current.push(' ');
            current.push_str(word);
        } else {
            lines.push(std::mem::take(&mut current));
            current.push_str(word);
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines.join("\n")
}

/// Turn a title into a filename slug: lowercase alphanumerics with runs of
/// anything else collapsed to single hyphens.
pub fn slugify(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    for c in title.chars() {
        if c.is_alphanumeric() {
            slug.extend(c.to_lowercase());
        } else if !slug.is_empty() && !slug.ends_with('-') {
            slug.push('-');
        }
    }
    slug.trim_end_matches('-').to_string()
}

/// Path of a new post: `<root>/<date>--<slug>.md`
pub fn post_path(root: &Path, date: &str, title: &str) -> PathBuf {
    root.join(format!("{}--{}.md", date, slugify(title)))
}
