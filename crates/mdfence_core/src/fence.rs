//! Fenced code block extraction.
//!
//! Uses the `markdown` crate (mdast output) so fence recognition matches the
//! CommonMark/GFM rules the preview renders with.

use markdown::mdast::Node;
use markdown::{ParseOptions, to_mdast};

use mdfence_plugin::CodeFence;

use crate::CoreError;

/// Extracts every fenced (or indented) code block from a markdown source.
///
/// Blocks are returned in document order. The info string is rebuilt from
/// the mdast `lang` and `meta` fields verbatim; indented code blocks have an
/// empty info string.
pub fn extract_fences(source: &str) -> Result<Vec<CodeFence>, CoreError> {
    let options = ParseOptions::gfm();
    let tree = to_mdast(source, &options).map_err(|e| CoreError::parse(e.to_string()))?;

    let mut fences = Vec::new();
    collect_code_nodes(&tree, &mut fences);
    Ok(fences)
}

fn collect_code_nodes(node: &Node, fences: &mut Vec<CodeFence>) {
    if let Node::Code(code) = node {
        let info_string = match (&code.lang, &code.meta) {
            (Some(lang), Some(meta)) => format!("{} {}", lang, meta),
            (Some(lang), None) => lang.clone(),
            (None, _) => String::new(),
        };

        let mut fence = CodeFence::new(info_string, code.value.clone());
        fence.line = code.position.as_ref().map(|pos| pos.start.line);
        fences.push(fence);
        return;
    }

    if let Some(children) = node.children() {
        for child in children {
            collect_code_nodes(child, fences);
        }
    }
}
