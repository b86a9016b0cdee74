//! Read/write helpers for the value + presence-flag encoding of optional
//! scalars. Generated accessors proxy through these so the raw member and
//! its flag always change together.

/// The value, if the presence flag is set.
pub fn get<T>(value: &T, specified: bool) -> Option<&T> {
    specified.then_some(value)
}

/// Writes `Some(v)` into the raw member and sets the flag; writes `None` by
/// clearing the flag only. The stale raw value is left in place, it is never
/// observed while the flag is clear.
pub fn set<T>(slot: &mut T, specified: &mut bool, value: Option<T>) {
    match value {
        Some(value) => {
            *slot = value;
            *specified = true;
        }
        None => *specified = false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn present_value_round_trips_and_sets_flag() {
        let mut slot = 0i32;
        let mut specified = false;
        set(&mut slot, &mut specified, Some(7));
        assert!(specified);
        assert_eq!(get(&slot, specified), Some(&7));
    }

    #[test]
    fn clearing_hides_stale_raw_value() {
        let mut slot = 42i32;
        let mut specified = true;
        set(&mut slot, &mut specified, None);
        assert_eq!(get(&slot, specified), None);
        assert_eq!(slot, 42);
    }
}
