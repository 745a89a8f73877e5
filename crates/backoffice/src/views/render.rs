//! Template rendering for text output modes.
//!
//! Templates mark text with the `style` filter. In styled mode the filter
//! applies the theme's ANSI style; in plain mode it returns the text as is,
//! so both modes share one set of templates.

use console::{pad_str, Alignment, Color, Style};
use minijinja::Environment;
use serde::Serialize;

use super::{DetailView, ListView};
use crate::config::Theme;
use crate::output::SerializeError;

const LIST_TEMPLATE: &str = r#"{% if intro %}
{{ intro | style("title") }}
{% endif %}
{% if filter_summary %}
{{ filter_summary | style("muted") }}
{% endif %}

{% if rows %}
{{ headers | row(widths) | style("header") }}
{% for row in rows %}
{{ row | row(widths) }}
{% endfor %}
{% else %}
{{ empty_message }}
{% endif %}
{% if ending %}

{{ ending | style("muted") }}
{% endif %}
{% if pages %}
Pages: {% for page in pages %}{% if page.current %}{{ ("[" ~ page.label ~ "]") | style("current") }}{% else %}{{ page.label }}{% endif %}{% if not loop.last %} {% endif %}{% endfor %}

{% endif %}
{% if messages %}

{% endif %}
{% for msg in messages %}
{{ msg.text | style(msg.level) }}
{% endfor %}
"#;

const DETAIL_TEMPLATE: &str = r#"{% if title %}
{{ title | style("title") }}

{% endif %}
{% for field in fields %}
{{ field.label | pad(label_width) | style("header") }}  {{ field.value }}
{% endfor %}
{% if messages and fields %}

{% endif %}
{% for msg in messages %}
{{ msg.text | style(msg.level) }}
{% endfor %}
"#;

/// Renders views to text.
pub struct Renderer {
    env: Environment<'static>,
}

impl std::fmt::Debug for Renderer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Renderer").finish_non_exhaustive()
    }
}

impl Renderer {
    /// `styled` turns ANSI styling on regardless of terminal detection.
    pub fn new(styled: bool, theme: Theme) -> Result<Self, SerializeError> {
        let mut env = Environment::new();
        env.set_trim_blocks(true);
        env.set_lstrip_blocks(true);

        env.add_filter("style", move |value: String, name: String| -> String {
            if !styled {
                return value;
            }
            match style_for(&name, theme) {
                Some(style) => style.force_styling(true).apply_to(value).to_string(),
                None => value,
            }
        });
        env.add_filter("pad", |value: String, width: usize| -> String {
            pad_str(&value, width, Alignment::Left, None).into_owned()
        });
        env.add_filter("row", |cells: Vec<String>, widths: Vec<usize>| -> String {
            format_row(&cells, &widths)
        });

        env.add_template("list", LIST_TEMPLATE)?;
        env.add_template("detail", DETAIL_TEMPLATE)?;
        Ok(Renderer { env })
    }

    /// Unstyled output.
    pub fn plain() -> Result<Self, SerializeError> {
        Renderer::new(false, Theme::default())
    }

    pub fn render_list(&self, view: &ListView) -> Result<String, SerializeError> {
        self.render("list", view)
    }

    pub fn render_detail(&self, view: &DetailView) -> Result<String, SerializeError> {
        self.render("detail", view)
    }

    fn render<S: Serialize>(&self, name: &str, context: &S) -> Result<String, SerializeError> {
        let output = self.env.get_template(name)?.render(context)?;
        Ok(tidy(&output))
    }
}

/// Pads every cell but the last to its column width.
fn format_row(cells: &[String], widths: &[usize]) -> String {
    let last = cells.len().saturating_sub(1);
    cells
        .iter()
        .enumerate()
        .map(|(i, cell)| match widths.get(i) {
            Some(&width) if i < last => pad_str(cell, width, Alignment::Left, None).into_owned(),
            _ => cell.clone(),
        })
        .collect::<Vec<_>>()
        .join("  ")
}

/// Strips trailing whitespace and surrounding blank lines.
fn tidy(output: &str) -> String {
    let lines: Vec<&str> = output.lines().map(str::trim_end).collect();
    let start = lines.iter().position(|l| !l.is_empty()).unwrap_or(lines.len());
    let end = lines.iter().rposition(|l| !l.is_empty()).map_or(start, |i| i + 1);
    lines[start..end].join("\n")
}

fn style_for(name: &str, theme: Theme) -> Option<Style> {
    let accent = match theme {
        Theme::Light => Color::Blue,
        Theme::Dark => Color::Cyan,
    };
    let style = match name {
        "title" => Style::new().bold().fg(accent),
        "header" => Style::new().bold(),
        "muted" => Style::new().dim(),
        "current" => Style::new().bold().fg(accent),
        "info" => Style::new().fg(accent),
        "success" => Style::new().green(),
        "warning" => Style::new().yellow(),
        "error" => Style::new().red().bold(),
        _ => return None,
    };
    Some(style)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::views::{DetailView, ListViewBuilder, Message};
    use backoffice_query::PaginationState;

    fn sample() -> ListViewBuilder {
        ListViewBuilder::new(
            vec!["ID".into(), "Name".into(), "Price".into()],
            vec![
                vec!["1".into(), "Wireless Headphones Pro".into(), "$299.99".into()],
                vec!["3".into(), "Premium Coffee Beans".into(), "$24.99".into()],
            ],
        )
        .intro("Products")
    }

    #[test]
    fn plain_list() {
        let mut pagination = PaginationState::new(2).with_page(1);
        pagination.total = 6;
        pagination.total_pages = 3;
        let view = sample().paginated(&pagination).build();

        let out = Renderer::plain().unwrap().render_list(&view).unwrap();
        insta::assert_snapshot!(out, @r###"
        Products

        ID  Name                     Price
        1   Wireless Headphones Pro  $299.99
        3   Premium Coffee Beans     $24.99

        Showing 1 to 2 of 6 results
        Pages: [1] 2 3
        "###);
    }

    #[test]
    fn empty_list_with_filter_and_message() {
        let view = ListViewBuilder::new(vec!["ID".into()], Vec::new())
            .intro("Users")
            .filter(&backoffice_query::FilterState::new().search("zz"))
            .empty_message("No users found.")
            .warning("Try a shorter search.")
            .build();

        let out = Renderer::plain().unwrap().render_list(&view).unwrap();
        insta::assert_snapshot!(out, @r###"
        Users
        Filtered by: matching "zz"

        No users found.

        Try a shorter search.
        "###);
    }

    #[test]
    fn detail() {
        let view = DetailView {
            title: Some("Product 3".into()),
            fields: vec![
                crate::views::DetailField {
                    label: "Name".into(),
                    value: "Premium Coffee Beans".into(),
                },
                crate::views::DetailField {
                    label: "Category".into(),
                    value: "Food & Beverage".into(),
                },
            ],
            label_width: 8,
            messages: vec![Message::success("Product updated.")],
        };

        let out = Renderer::plain().unwrap().render_detail(&view).unwrap();
        insta::assert_snapshot!(out, @r###"
        Product 3

        Name      Premium Coffee Beans
        Category  Food & Beverage

        Product updated.
        "###);
    }

    #[test]
    fn messages_only() {
        let view = DetailView::messages_only(vec![Message::success("User 3 deleted.")]);
        let out = Renderer::plain().unwrap().render_detail(&view).unwrap();
        assert_eq!(out, "User 3 deleted.");
    }

    #[test]
    fn styled_output_carries_ansi() {
        let renderer = Renderer::new(true, Theme::Dark).unwrap();
        let out = renderer.render_list(&sample().build()).unwrap();
        assert!(out.contains("\u{1b}["));
        assert_eq!(console::strip_ansi_codes(&out).lines().next(), Some("Products"));
    }
}
