use std::collections::{BTreeMap, BTreeSet};

use crate::scanning::domain::ScanResult;

/// Grouping choice for match reports.
///
/// Both groupings are projections of the same `(target, matched item)`
/// pair set; selecting one is a pure reshape, never a re-scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupBy {
    Component,
    Repo,
}

impl std::str::FromStr for GroupBy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "component" => Ok(GroupBy::Component),
            "repo" => Ok(GroupBy::Repo),
            _ => Err(format!(
                "Invalid grouping: {}. Please specify 'component' or 'repo'",
                s
            )),
        }
    }
}

/// Ordered grouping of matches: key to the sorted list of matched items.
pub type GroupedMatches = Vec<(String, Vec<String>)>;

/// Expands results into the underlying `(target, matched item)` pair set.
///
/// Results without matches contribute nothing; this is the shared
/// intermediate both groupings project from.
pub fn match_pairs(results: &[ScanResult]) -> BTreeSet<(String, String)> {
    results
        .iter()
        .filter(|result| result.has_matches())
        .flat_map(|result| {
            result
                .matched_terms()
                .iter()
                .map(|term| (result.target_name().to_string(), term.clone()))
        })
        .collect()
}

/// Groups matches by component/term name: item to sorted target names.
pub fn group_by_component(results: &[ScanResult]) -> GroupedMatches {
    let mut groups: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();
    for (target, item) in match_pairs(results) {
        groups.entry(item).or_default().insert(target);
    }
    into_sorted_groups(groups)
}

/// Groups matches by repository: target name to sorted matched items.
pub fn group_by_repo(results: &[ScanResult]) -> GroupedMatches {
    let mut groups: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();
    for (target, item) in match_pairs(results) {
        groups.entry(target).or_default().insert(item);
    }
    into_sorted_groups(groups)
}

/// Applies the requested grouping.
pub fn grouped_matches(results: &[ScanResult], group_by: GroupBy) -> GroupedMatches {
    match group_by {
        GroupBy::Component => group_by_component(results),
        GroupBy::Repo => group_by_repo(results),
    }
}

/// Sorts group keys and member lists case-insensitively, with the exact
/// string as tie-breaker so ordering stays total and reproducible.
fn into_sorted_groups(groups: BTreeMap<String, BTreeSet<String>>) -> GroupedMatches {
    let mut out: GroupedMatches = groups
        .into_iter()
        .map(|(key, members)| {
            let mut members: Vec<String> = members.into_iter().collect();
            members.sort_by(|a, b| sort_key(a).cmp(&sort_key(b)));
            (key, members)
        })
        .collect();
    out.sort_by(|(a, _), (b, _)| sort_key(a).cmp(&sort_key(b)));
    out
}

fn sort_key(s: &str) -> (String, String) {
    (s.to_lowercase(), s.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::str::FromStr;

    fn result(target: &str, terms: &[&str]) -> ScanResult {
        ScanResult::new(
            target.to_string(),
            terms.iter().map(|t| t.to_string()).collect(),
            json!({}),
        )
    }

    #[test]
    fn test_group_by_from_str() {
        assert_eq!(GroupBy::from_str("component").unwrap(), GroupBy::Component);
        assert_eq!(GroupBy::from_str("COMPONENT").unwrap(), GroupBy::Component);
        assert_eq!(GroupBy::from_str("repo").unwrap(), GroupBy::Repo);
        assert_eq!(GroupBy::from_str("Repo").unwrap(), GroupBy::Repo);
        assert!(GroupBy::from_str("target").is_err());
        assert!(GroupBy::from_str("").is_err());
    }

    #[test]
    fn test_group_by_component() {
        let results = vec![
            result("org/b", &["deepseek"]),
            result("org/a", &["deepseek", "mistral"]),
        ];

        let groups = group_by_component(&results);
        assert_eq!(
            groups,
            vec![
                (
                    "deepseek".to_string(),
                    vec!["org/a".to_string(), "org/b".to_string()]
                ),
                ("mistral".to_string(), vec!["org/a".to_string()]),
            ]
        );
    }

    #[test]
    fn test_group_by_repo() {
        let results = vec![
            result("org/b", &["deepseek"]),
            result("org/a", &["mistral", "deepseek"]),
        ];

        let groups = group_by_repo(&results);
        assert_eq!(
            groups,
            vec![
                (
                    "org/a".to_string(),
                    vec!["deepseek".to_string(), "mistral".to_string()]
                ),
                ("org/b".to_string(), vec!["deepseek".to_string()]),
            ]
        );
    }

    #[test]
    fn test_empty_match_results_are_dropped() {
        let results = vec![result("org/a", &[]), result("org/b", &["deepseek"])];
        let groups = group_by_repo(&results);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].0, "org/b");
    }

    #[test]
    fn test_grouping_equivalence_via_pair_expansion() {
        // Both groupings, expanded back to pairs, are the same set.
        let results = vec![
            result("org/a", &["deepseek", "mistral"]),
            result("org/b", &["deepseek"]),
            result("org/c", &[]),
        ];

        let by_component: BTreeSet<(String, String)> = group_by_component(&results)
            .into_iter()
            .flat_map(|(item, targets)| {
                targets
                    .into_iter()
                    .map(move |target| (target, item.clone()))
            })
            .collect();

        let by_repo: BTreeSet<(String, String)> = group_by_repo(&results)
            .into_iter()
            .flat_map(|(target, items)| {
                items.into_iter().map(move |item| (target.clone(), item))
            })
            .collect();

        assert_eq!(by_component, by_repo);
        assert_eq!(by_component, match_pairs(&results));
    }

    #[test]
    fn test_ordering_is_case_insensitive_and_deterministic() {
        let results = vec![
            result("Zeta/repo", &["alpha"]),
            result("alpha/repo", &["alpha"]),
            result("Beta/repo", &["alpha"]),
        ];

        let groups = group_by_component(&results);
        assert_eq!(
            groups[0].1,
            vec![
                "alpha/repo".to_string(),
                "Beta/repo".to_string(),
                "Zeta/repo".to_string()
            ]
        );
    }
}
