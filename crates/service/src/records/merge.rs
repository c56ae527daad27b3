use configs::MergePolicy;
use models::RecordCollection;

/// Counts reported by a merge; all values are key counts.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MergeOutcome {
    pub submitted: usize,
    pub collisions: usize,
    pub total: usize,
}

/// Combine the stored document with a submitted one, key by key.
///
/// Under `ExistingWins` every stored value is laid over the submitted
/// document, so a PUT can add keys but never change one that already exists.
pub fn merge(
    existing: RecordCollection,
    incoming: RecordCollection,
    policy: MergePolicy,
) -> (RecordCollection, MergeOutcome) {
    let submitted = incoming.len();
    let (mut base, overlay) = match policy {
        MergePolicy::ExistingWins => (incoming, existing),
        MergePolicy::IncomingWins => (existing, incoming),
    };
    let mut collisions = 0;
    for (key, value) in overlay {
        if base.insert(key, value).is_some() {
            collisions += 1;
        }
    }
    let total = base.len();
    (base, MergeOutcome { submitted, collisions, total })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn col(v: serde_json::Value) -> RecordCollection {
        RecordCollection::from_value(v).expect("object")
    }

    #[test]
    fn existing_value_survives_collision() {
        let existing = col(json!({"city0": {"name": "Kyoto"}, "city1": {"name": "Lima"}}));
        let incoming = col(json!({"city0": {"name": "Osaka"}, "city2": {"name": "Oslo"}}));
        let (merged, outcome) = merge(existing, incoming, MergePolicy::ExistingWins);

        assert_eq!(merged.get("city0"), Some(&json!({"name": "Kyoto"})));
        assert!(merged.contains_key("city1"));
        assert!(merged.contains_key("city2"));
        assert_eq!(outcome, MergeOutcome { submitted: 2, collisions: 1, total: 3 });
    }

    #[test]
    fn incoming_wins_overwrites() {
        let existing = col(json!({"city0": {"name": "Kyoto"}}));
        let incoming = col(json!({"city0": {"name": "Osaka"}}));
        let (merged, outcome) = merge(existing, incoming, MergePolicy::IncomingWins);

        assert_eq!(merged.get("city0"), Some(&json!({"name": "Osaka"})));
        assert_eq!(outcome.collisions, 1);
        assert_eq!(outcome.total, 1);
    }

    #[test]
    fn empty_submission_keeps_document() {
        let existing = col(json!({"a": 1, "b": 2}));
        let (merged, outcome) = merge(existing.clone(), RecordCollection::new(), MergePolicy::ExistingWins);
        assert_eq!(merged, existing);
        assert_eq!(outcome, MergeOutcome { submitted: 0, collisions: 0, total: 2 });
    }
}
