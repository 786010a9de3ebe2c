//! Content page emitter
//!
//! One HTML artifact per markdown item at `{slug}.html`. The shell is
//! intentionally minimal: layout and templating live outside the build core.

use crate::build::BuildContext;
use crate::error::VellumResult;
use crate::models::MarkdownContent;

use super::helpers::write_output;
use super::{EmitStream, Emitter, StaticResources};

pub struct ContentPage;

impl Emitter for ContentPage {
    fn name(&self) -> &'static str {
        "ContentPage"
    }

    fn emit_all<'a>(
        &'a self,
        ctx: &'a BuildContext,
        content: &'a [MarkdownContent],
        resources: &'a StaticResources,
    ) -> VellumResult<EmitStream<'a>> {
        Ok(Box::new(content.iter().map(move |item| {
            let rel = format!("{}.html", item.record.slug);
            let html = render_page(ctx, resources, item);
            write_output(&ctx.output_dir, &rel, html.as_bytes())
        })))
    }
}

fn render_page(ctx: &BuildContext, resources: &StaticResources, item: &MarkdownContent) -> String {
    let mut head = String::new();
    for css in &resources.css {
        head.push_str(&format!("<link rel=\"stylesheet\" href=\"{css}\">\n"));
    }
    for js in &resources.js {
        head.push_str(&format!("<script src=\"{js}\"></script>\n"));
    }

    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <title>{title} - {site}</title>\n{head}</head>\n<body>\n\
         <h1>{title}</h1>\n<main>\n{body}\n</main>\n</body>\n</html>\n",
        title = item.record.title(),
        site = ctx.config.site.title,
        head = head,
        body = item.body,
    )
}
