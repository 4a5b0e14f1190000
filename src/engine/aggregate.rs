//! Specialist aggregation across activated conditions.

use std::collections::HashSet;

/// Union of the specialist lists, duplicates removed.
///
/// Order is first-seen: conditions in the order given, then each condition's
/// own list in table order. Callers pass conditions in declared rule order, so
/// the output is stable across runs.
pub fn aggregate<'a, I>(specialist_lists: I) -> Vec<&'static str>
where
    I: IntoIterator<Item = &'a [&'static str]>,
{
    let mut seen = HashSet::new();
    let mut doctors = Vec::new();
    for list in specialist_lists {
        for doctor in list {
            if seen.insert(*doctor) {
                doctors.push(*doctor);
            }
        }
    }
    doctors
}
