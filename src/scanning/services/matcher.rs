use std::collections::BTreeSet;

use serde_json::Value;

use crate::scanning::domain::Component;

/// Keyword matching over the serialized document.
///
/// Case-insensitive substring match, OR semantics across terms: the
/// returned set holds every supplied term that appears anywhere in the
/// document representation. Substring matching trades precision for
/// recall, which fits the "search for a framework by name" use case.
/// Pure function: same document and terms always yield the same set.
pub fn match_keywords(document: &Value, terms: &[String]) -> BTreeSet<String> {
    let haystack = document.to_string().to_lowercase();

    terms
        .iter()
        .map(|term| term.trim().to_lowercase())
        .filter(|term| !term.is_empty() && haystack.contains(term.as_str()))
        .collect()
}

/// Policy matching over extracted components.
///
/// Exact name identity (case-insensitive, trimmed) between
/// machine-learning-model components and the reject set; no substring
/// matching here, so `gpt-4-turbo` never trips a `gpt-4` reject entry.
/// The reject set is expected in normalized (lowercased, trimmed) form,
/// as produced by the policy loader.
pub fn match_policy(components: &[Component], rejected_models: &BTreeSet<String>) -> BTreeSet<String> {
    components
        .iter()
        .filter(|component| component.is_ml_model())
        .filter(|component| {
            rejected_models.contains(&component.name().trim().to_lowercase())
        })
        .map(|component| component.name().to_string())
        .collect()
}
