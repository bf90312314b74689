use bestiary_types::{EnemyRecord, FieldSet, ValidationError};

/// Whether an update's trigger flags keep the cloak switched on
///
/// `current_*` come from the stored record (`None` when it has no cloak),
/// `new_*` from the payload (`None` when not supplied). Refused transitions:
///
/// - the payload turns both triggers off
/// - the record relies on the timer alone and the payload turns it off without
///   turning proximity on
/// - the same for a record relying on proximity alone
///
/// Everything else is accepted, including a record and payload with no cloak at all.
pub fn validate_cloak_transition(
    current_timer_based: Option<bool>,
    current_proximity_based: Option<bool>,
    new_timer_based: Option<bool>,
    new_proximity_based: Option<bool>,
) -> bool {
    if new_timer_based == Some(false) && new_proximity_based == Some(false) {
        return false;
    }

    let timer_on = current_timer_based == Some(true);
    let proximity_on = current_proximity_based == Some(true);

    if timer_on
        && !proximity_on
        && new_timer_based == Some(false)
        && new_proximity_based != Some(true)
    {
        return false;
    }
    if proximity_on
        && !timer_on
        && new_proximity_based == Some(false)
        && new_timer_based != Some(true)
    {
        return false;
    }
    true
}

/// Transition check against a stored record; non-boolean flags are left to the
/// field-level cloak rules
pub fn check_cloak_transition(
    existing: &EnemyRecord,
    patch: &FieldSet,
) -> Result<(), ValidationError> {
    let (timer, proximity) = existing
        .capabilities
        .cloak
        .as_ref()
        .map_or((None, None), |c| {
            (Some(c.timer_based), Some(c.proximity_based))
        });

    if validate_cloak_transition(
        timer,
        proximity,
        patch.boolean("timer_based"),
        patch.boolean("proximity_based"),
    ) {
        Ok(())
    } else {
        Err(ValidationError::invalid_cloak_transition(
            "Invalid cloak mechanism: at least one of timer_based or proximity_based must remain true",
        ))
    }
}
