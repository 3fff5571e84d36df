use offerbot_types::{ItemSpec, ReconciliationResult};
use std::collections::HashMap;

/// Reconcile a requested item list against an inventory snapshot.
///
/// Matching is multiset containment under full four-field equality: a
/// request listing the same item twice needs two distinct snapshot
/// entries, and an `assetid` or `amount` drift makes an entry unusable
/// even when the class and instance still agree. The matched output
/// preserves snapshot order, and an empty request matches trivially.
pub fn reconcile(requested: &[ItemSpec], snapshot: &[ItemSpec]) -> ReconciliationResult {
    if requested.is_empty() {
        return ReconciliationResult::Matched(Vec::new());
    }

    let mut needs: HashMap<&ItemSpec, usize> = HashMap::new();
    for item in requested {
        *needs.entry(item).or_insert(0) += 1;
    }

    let mut matched = Vec::with_capacity(requested.len());
    for entry in snapshot {
        if let Some(count) = needs.get_mut(entry) {
            if *count > 0 {
                *count -= 1;
                matched.push(entry.clone());
            }
        }
        if matched.len() == requested.len() {
            break;
        }
    }

    if matched.len() == requested.len() {
        ReconciliationResult::Matched(matched)
    } else {
        ReconciliationResult::Unmatched
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(classid: &str, assetid: &str, amount: u32) -> ItemSpec {
        ItemSpec::new(classid, "0", assetid, amount)
    }

    #[test]
    fn empty_request_matches_any_snapshot() {
        let snapshot = vec![item("101", "a1", 1)];
        assert_eq!(reconcile(&[], &snapshot), ReconciliationResult::Matched(vec![]));
        assert_eq!(reconcile(&[], &[]), ReconciliationResult::Matched(vec![]));
    }

    #[test]
    fn full_coverage_matches_in_snapshot_order() {
        let requested = vec![item("102", "a2", 1), item("101", "a1", 1)];
        let snapshot = vec![
            item("101", "a1", 1),
            item("103", "a3", 1),
            item("102", "a2", 1),
        ];

        match reconcile(&requested, &snapshot) {
            ReconciliationResult::Matched(matched) => {
                assert_eq!(matched, vec![item("101", "a1", 1), item("102", "a2", 1)]);
            }
            ReconciliationResult::Unmatched => panic!("expected a match"),
        }
    }

    #[test]
    fn missing_item_is_unmatched() {
        let requested = vec![item("101", "a1", 1), item("104", "a4", 1)];
        let snapshot = vec![item("101", "a1", 1)];
        assert_eq!(reconcile(&requested, &snapshot), ReconciliationResult::Unmatched);
    }

    #[test]
    fn duplicate_request_needs_distinct_snapshot_entries() {
        let requested = vec![item("101", "a1", 1), item("101", "a1", 1)];
        let single = vec![item("101", "a1", 1)];
        assert_eq!(reconcile(&requested, &single), ReconciliationResult::Unmatched);

        let double = vec![item("101", "a1", 1), item("101", "a1", 1)];
        match reconcile(&requested, &double) {
            ReconciliationResult::Matched(matched) => assert_eq!(matched.len(), 2),
            ReconciliationResult::Unmatched => panic!("expected a match"),
        }
    }

    #[test]
    fn amount_drift_is_unmatched() {
        let requested = vec![item("101", "a1", 5)];
        let snapshot = vec![item("101", "a1", 4)];
        assert_eq!(reconcile(&requested, &snapshot), ReconciliationResult::Unmatched);
    }

    #[test]
    fn assetid_drift_is_unmatched() {
        let requested = vec![item("101", "a1", 1)];
        let snapshot = vec![item("101", "a9", 1)];
        assert_eq!(reconcile(&requested, &snapshot), ReconciliationResult::Unmatched);
    }

    #[test]
    fn surplus_snapshot_entries_are_ignored() {
        let requested = vec![item("101", "a1", 1)];
        let snapshot = vec![
            item("200", "b1", 1),
            item("101", "a1", 1),
            item("201", "b2", 1),
        ];
        match reconcile(&requested, &snapshot) {
            ReconciliationResult::Matched(matched) => {
                assert_eq!(matched, vec![item("101", "a1", 1)]);
            }
            ReconciliationResult::Unmatched => panic!("expected a match"),
        }
    }
}
