use crate::error::RenderError;
use crate::node::TreeNode;
use serde_json::error::Category;
use std::fs;
use std::path::Path;

/// Reads an octree file.
///
/// A file containing `null` is an empty tree and yields `Ok(None)`.
/// Structurally valid JSON that does not match the node shape is reported as
/// [`RenderError::MalformedNode`]; anything that is not JSON at all as
/// [`RenderError::Parse`].
pub fn load_tree(path: &Path) -> Result<Option<TreeNode>, RenderError> {
    let text = fs::read_to_string(path).map_err(|source| RenderError::File {
        path: path.to_path_buf(),
        source,
    })?;

    let tree = parse_tree(&text).map_err(|err| match err {
        RenderError::Parse { source, .. } => RenderError::Parse {
            path: path.to_path_buf(),
            source,
        },
        RenderError::MalformedNode { path: at, reason } => RenderError::MalformedNode {
            path: format!("{}:{}", path.display(), at),
            reason,
        },
        other => other,
    })?;

    match &tree {
        Some(root) => log::info!(
            "loaded octree from {} ({} points at root level, divided: {})",
            path.display(),
            root.points.len(),
            root.divided
        ),
        None => log::info!("loaded empty octree from {}", path.display()),
    }
    Ok(tree)
}

/// Parses an octree document from a string.
pub fn parse_tree(text: &str) -> Result<Option<TreeNode>, RenderError> {
    serde_json::from_str::<Option<TreeNode>>(text).map_err(|source| match source.classify() {
        Category::Data => RenderError::malformed(
            format!("{}:{}", source.line(), source.column()),
            source.to_string(),
        ),
        _ => RenderError::Parse {
            path: "<string>".into(),
            source,
        },
    })
}
