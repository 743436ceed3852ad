// file: src/prune.rs
// description: pure removal of release.branches from a package.json document
// reference: https://github.com/semantic-release/semantic-release

use crate::error::{PruneError, Result};
use serde_json::Value;

/// Removes `release.branches` from the document, dropping the `release`
/// object entirely when the deletion leaves it empty. Returns whether the
/// document changed. The top level must be a JSON object.
pub fn prune_release_branches(doc: &mut Value) -> Result<bool> {
    let root = doc.as_object_mut().ok_or_else(|| {
        PruneError::InvalidInput("package.json root must be a JSON object".to_string())
    })?;

    let Some(release) = root.get_mut("release").and_then(Value::as_object_mut) else {
        return Ok(false);
    };

    if release.shift_remove("branches").is_none() {
        return Ok(false);
    }

    if release.is_empty() {
        root.shift_remove("release");
    }

    Ok(true)
}

/// Serializes with the formatting the original files carry: two-space
/// indentation and a single trailing newline, key order as parsed.
pub fn to_pretty_text(doc: &Value) -> Result<String> {
    let mut text = serde_json::to_string_pretty(doc)?;
    text.push('\n');
    Ok(text)
}

/// Parses, prunes, and reserializes. `None` means the document needs no
/// rewrite; parse failures propagate verbatim.
pub fn prune_text(text: &str) -> Result<Option<String>> {
    let mut doc: Value = serde_json::from_str(text)?;

    if prune_release_branches(&mut doc)? {
        Ok(Some(to_pretty_text(&doc)?))
    } else {
        Ok(None)
    }
}
