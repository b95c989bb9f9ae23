use serde_yaml_ng::Value as YamlValue;

use crate::error::{Result, SlicesError};

/// Split `---` fenced YAML frontmatter from the body.
///
/// The opening fence must be the first line and the closing fence a later line
/// on its own (surrounding whitespace allowed). Without a closing fence the
/// whole content is body. A single blank line after the closing fence is
/// dropped from the body.
pub fn split_frontmatter(content: &str) -> (Option<&str>, &str) {
    let mut lines = content.split_inclusive('\n');

    let Some(first) = lines.next() else {
        return (None, content);
    };
    if first.trim() != "---" {
        return (None, content);
    }

    let start = first.len();
    let mut offset = start;
    for line in lines {
        if line.trim() == "---" {
            let yaml = &content[start..offset];
            let mut body = &content[offset + line.len()..];
            if let Some(rest) = body.strip_prefix('\n') {
                body = rest;
            } else if let Some(rest) = body.strip_prefix("\r\n") {
                body = rest;
            }
            return (Some(yaml), body);
        }
        offset += line.len();
    }

    (None, content)
}

/// Parse the frontmatter of `content` into a YAML value.
///
/// Absent or empty frontmatter yields an empty mapping. `path` is only used
/// for error context.
pub fn parse_frontmatter<'a>(content: &'a str, path: &str) -> Result<(YamlValue, &'a str)> {
    let (yaml, body) = split_frontmatter(content);
    let empty = || YamlValue::Mapping(Default::default());

    let value = match yaml {
        Some(yaml) if !yaml.trim().is_empty() => {
            let value: YamlValue = serde_yaml_ng::from_str(yaml).map_err(|e| {
                SlicesError::Parse(format!("YAML frontmatter parse error in {}: {}", path, e))
            })?;
            match value {
                YamlValue::Mapping(_) => value,
                YamlValue::Null => empty(),
                _ => {
                    return Err(SlicesError::Parse(format!(
                        "Frontmatter in {} is not a mapping",
                        path
                    )))
                }
            }
        }
        _ => empty(),
    };

    Ok((value, body))
}

/// Get a nested field using dot notation, e.g. `tt.links`.
pub fn get_field<'a>(value: &'a YamlValue, path: &str) -> Option<&'a YamlValue> {
    path.split('.')
        .try_fold(value, |current, part| current.as_mapping()?.get(part))
}

/// Render a scalar as a string. Numbers and booleans are rendered so that
/// ids such as `123` survive YAML's type guessing.
pub fn scalar_to_string(value: &YamlValue) -> Option<String> {
    match value {
        YamlValue::String(s) => Some(s.clone()),
        YamlValue::Number(n) => Some(n.to_string()),
        YamlValue::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Read a scalar field as a string, see [`scalar_to_string`].
pub fn get_str(value: &YamlValue, path: &str) -> Option<String> {
    get_field(value, path).and_then(scalar_to_string)
}

/// The slice id from `tt.id`, or `fallback` when absent or blank.
pub fn slice_id(frontmatter: &YamlValue, fallback: &str) -> String {
    get_str(frontmatter, "tt.id")
        .filter(|id| !id.trim().is_empty())
        .unwrap_or_else(|| fallback.to_string())
}

/// The slice title from `tt.title`, or `fallback`.
pub fn slice_title(frontmatter: &YamlValue, fallback: &str) -> String {
    get_str(frontmatter, "tt.title")
        .filter(|title| !title.trim().is_empty())
        .unwrap_or_else(|| fallback.to_string())
}
