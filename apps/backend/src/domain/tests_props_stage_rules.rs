//! Property tests for manual stage activation (pure domain, no DB).

use proptest::prelude::*;

use crate::domain::stage_rules::{check_manual_activation, is_adjacent};
use crate::domain::test_prelude;
use crate::entities::stages::StageType;
use crate::errors::domain::{ConflictKind, DomainError};

fn stage_type() -> impl Strategy<Value = StageType> {
    proptest::sample::select(StageType::ALL.to_vec())
}

proptest! {
    #![proptest_config(test_prelude::proptest_config())]

    /// Property: activation succeeds iff the target is adjacent and not RegistrationClosed.
    #[test]
    fn prop_manual_activation_matches_adjacency(
        current in stage_type(),
        target in stage_type(),
    ) {
        let result = check_manual_activation(current.ordinal(), target, target.ordinal());
        let diff = (current.ordinal() - target.ordinal()).abs();

        if diff != 1 {
            prop_assert!(matches!(
                result,
                Err(DomainError::Conflict(ConflictKind::NonAdjacentStage, _))
            ));
        } else if target == StageType::RegistrationClosed {
            prop_assert!(matches!(
                result,
                Err(DomainError::Conflict(ConflictKind::AutomaticStage, _))
            ));
        } else {
            prop_assert!(result.is_ok());
        }
    }

    /// Property: adjacency is symmetric.
    #[test]
    fn prop_adjacency_is_symmetric(a in 1i32..=8, b in 1i32..=8) {
        prop_assert_eq!(is_adjacent(a, b), is_adjacent(b, a));
    }
}
