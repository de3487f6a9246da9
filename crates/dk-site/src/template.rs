//! HTML rendering.
//!
//! Text and attribute values are escaped; body HTML from the backend is
//! inserted as is.

use std::fmt::Write;

use crate::dispatch::{ContentProps, ImageProps};
use crate::listing::{PAGE_LIST_ALIAS, summary_href};
use crate::locale::HrefLang;
use crate::menu::{MenuItem, top_level};
use crate::routes::{AliasPage, PageList, SiteSettings};

/// Shared page chrome.
struct Layout<'a> {
    settings: &'a SiteSettings,
    lang: &'a str,
    href_lang: &'a [HrefLang],
    footer_menu: &'a [MenuItem],
    preview: bool,
}

impl Layout<'_> {
    fn render(&self, content: &str) -> String {
        let mut html = String::with_capacity(4096 + content.len());

        let _ = writeln!(html, "<!DOCTYPE html>\n<html lang=\"{}\">", escape(self.lang));
        html.push_str("<head>\n<meta charset=\"utf-8\">\n");
        html.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
        let _ = writeln!(html, "<title>{}</title>", escape(&self.settings.title));
        let _ = writeln!(
            html,
            "<meta name=\"description\" content=\"{}\">",
            escape(&self.settings.description)
        );
        for alternate in self.href_lang {
            let _ = writeln!(
                html,
                "<link rel=\"alternate\" hreflang=\"{}\" href=\"{}\">",
                escape(&alternate.href_lang),
                escape(&alternate.href)
            );
        }
        html.push_str("</head>\n<body>\n");

        if self.preview {
            html.push_str("<div class=\"preview-banner\">Preview mode</div>\n");
        }

        html.push_str("<main>\n");
        html.push_str(content);
        html.push_str("</main>\n");

        render_footer(&mut html, self.footer_menu);

        html.push_str("</body>\n</html>\n");
        html
    }
}

fn render_footer(html: &mut String, menu: &[MenuItem]) {
    let items = top_level(menu);
    if items.is_empty() {
        return;
    }
    html.push_str("<footer>\n<nav>\n<ul>\n");
    for item in items {
        let _ = writeln!(
            html,
            "<li><a href=\"{}\">{}</a></li>",
            escape(&item.url),
            escape(&item.title)
        );
    }
    html.push_str("</ul>\n</nav>\n</footer>\n");
}

/// Render a page reached through a path alias.
#[must_use]
pub fn render_alias_page(settings: &SiteSettings, page: &AliasPage) -> String {
    let mut content = String::with_capacity(4096);
    render_content(&mut content, &page.props, &page.locale.prefix());

    Layout {
        settings,
        lang: &page.locale.locale,
        href_lang: &page.href_lang,
        footer_menu: &page.footer_menu,
        preview: page.preview,
    }
    .render(&content)
}

fn render_content(html: &mut String, props: &ContentProps, prefix: &str) {
    match props {
        ContentProps::Page { title, content } => {
            html.push_str("<article class=\"page\">\n");
            let _ = writeln!(html, "<h1>{}</h1>", escape(title));
            let _ = writeln!(
                html,
                "<a href=\"{}/{PAGE_LIST_ALIAS}\">Pages &rarr;</a>",
                escape(prefix)
            );
            let _ = writeln!(html, "<div class=\"body\">{content}</div>");
            html.push_str("</article>\n");
        }
        ContentProps::Article {
            title,
            content,
            image,
        } => {
            html.push_str("<article class=\"article\">\n");
            let _ = writeln!(html, "<h1>{}</h1>", escape(title));
            render_image(html, image.as_ref());
            let _ = writeln!(html, "<div class=\"body\">{content}</div>");
            html.push_str("</article>\n");
        }
        ContentProps::Recipe {
            title,
            category,
            image,
            ingredients,
            instructions,
        } => {
            html.push_str("<article class=\"recipe\">\n");
            let _ = writeln!(html, "<h1>{}</h1>", escape(title));
            if let Some(category) = category {
                let _ = writeln!(html, "<p class=\"category\">{}</p>", escape(category));
            }
            render_image(html, image.as_ref());
            if !ingredients.is_empty() {
                html.push_str("<h2>Ingredients</h2>\n<ul class=\"ingredients\">\n");
                for ingredient in ingredients {
                    let _ = writeln!(html, "<li>{}</li>", escape(ingredient));
                }
                html.push_str("</ul>\n");
            }
            html.push_str("<h2>Instructions</h2>\n");
            let _ = writeln!(html, "<div class=\"instructions\">{instructions}</div>");
            html.push_str("</article>\n");
        }
        ContentProps::Empty => html.push_str("<h2 class=\"empty\">No content found</h2>\n"),
    }
}

fn render_image(html: &mut String, image: Option<&ImageProps>) {
    let Some(image) = image else {
        return;
    };
    let _ = writeln!(
        html,
        "<img src=\"{}\" alt=\"{}\">",
        escape(&image.src),
        escape(image.alt.as_deref().unwrap_or_default())
    );
}

/// Render the page listing.
#[must_use]
pub fn render_page_list(settings: &SiteSettings, list: &PageList) -> String {
    let mut html = String::with_capacity(4096);
    html.push_str("<h1>Pages</h1>\n");

    if list.pages.is_empty() {
        html.push_str("<h2 class=\"empty\">No pages found</h2>\n");
    } else {
        html.push_str("<ul class=\"pages\">\n");
        for page in &list.pages {
            html.push_str("<li>\n");
            let _ = writeln!(html, "<h2>{}</h2>", escape(&page.title));
            if let Some(summary) = &page.summary {
                let _ = writeln!(html, "<div class=\"summary\">{summary}</div>");
            }
            if let Some(href) = summary_href(page, list.multi_language, &list.locale.locale) {
                let _ = writeln!(html, "<a href=\"{}\">Read more &rarr;</a>", escape(&href));
            }
            html.push_str("</li>\n");
        }
        html.push_str("</ul>\n");
    }

    Layout {
        settings,
        lang: &list.locale.locale,
        href_lang: &list.href_lang,
        footer_menu: &list.footer_menu,
        preview: false,
    }
    .render(&html)
}

/// Render the not-found page.
#[must_use]
pub fn render_not_found(settings: &SiteSettings, lang: &str) -> String {
    Layout {
        settings,
        lang,
        href_lang: &[],
        footer_menu: &[],
        preview: false,
    }
    .render("<h1>Page not found</h1>\n")
}

/// Escape HTML special characters.
fn escape(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' => result.push_str("&quot;"),
            '\'' => result.push_str("&#x27;"),
            _ => result.push(c),
        }
    }
    result
}
