use serde_json::Value;

use crate::scanning::domain::Component;

/// Extracts the flat component list from a raw AI-BOM document.
///
/// Two payload shapes exist in the wild: the JSON:API envelope
/// (`data.attributes.components`) and the bare document (`components`).
/// Every lookup has a defined fallback; a document missing the expected
/// structure yields zero components, never an error, since a target may
/// legitimately contain no AI components.
pub fn extract_components(document: &Value) -> Vec<Component> {
    let components = document
        .pointer("/data/attributes/components")
        .or_else(|| document.get("components"))
        .and_then(Value::as_array);

    let Some(components) = components else {
        return Vec::new();
    };

    components
        .iter()
        .filter_map(component_from_entry)
        .collect()
}

fn component_from_entry(entry: &Value) -> Option<Component> {
    let name = entry.get("name").and_then(Value::as_str)?;
    let kind = entry.get("type").and_then(Value::as_str);

    // The generator emits a synthetic "Root" application component that
    // anchors the document; it is not a real AI component.
    if name == "Root" && kind == Some("application") {
        return None;
    }

    let version = entry
        .get("version")
        .and_then(Value::as_str)
        .map(str::to_string);

    Some(
        Component::new(name.to_string(), kind.map(str::to_string), version)
            .with_locations(locations_from_entry(entry)),
    )
}

/// Reads `evidence.occurrences` into `path` / `path:line` strings.
///
/// Occurrences without a location are dropped; a missing line number just
/// omits the suffix.
fn locations_from_entry(entry: &Value) -> Vec<String> {
    let Some(occurrences) = entry
        .pointer("/evidence/occurrences")
        .and_then(Value::as_array)
    else {
        return Vec::new();
    };

    occurrences
        .iter()
        .filter_map(|occurrence| {
            let location = occurrence.get("location").and_then(Value::as_str)?;
            if location.is_empty() {
                return None;
            }
            match line_number(occurrence.get("line")) {
                Some(line) => Some(format!("{}:{}", location, line)),
                None => Some(location.to_string()),
            }
        })
        .collect()
}

// Line numbers appear as both integers and strings in the wild.
fn line_number(value: Option<&Value>) -> Option<String> {
    let value = value?;
    if let Some(n) = value.as_u64() {
        return Some(n.to_string());
    }
    value
        .as_str()
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}
