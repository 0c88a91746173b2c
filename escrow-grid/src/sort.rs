//! Single-key sort state and the row comparator.

use std::cmp::Ordering;

use escrow_lib::model::Value;

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    /// Ascending order (A-Z, 0-9).
    Asc,
    /// Descending order (Z-A, 9-0).
    Desc,
}

impl SortDirection {
    /// Returns the opposite direction.
    pub fn flipped(self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }
}

/// The active sort key and direction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortState {
    pub key: String,
    pub direction: SortDirection,
}

impl SortState {
    /// Creates an ascending sort on `key`.
    pub fn asc(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            direction: SortDirection::Asc,
        }
    }

    /// Creates a descending sort on `key`.
    pub fn desc(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            direction: SortDirection::Desc,
        }
    }

    /// Returns the state after a header click on `key`.
    ///
    /// Clicking the sorted key flips its direction; any other key starts
    /// ascending.
    pub fn toggled(current: Option<&SortState>, key: &str) -> SortState {
        match current {
            Some(sort) if sort.key == key => SortState {
                key: sort.key.clone(),
                direction: sort.direction.flipped(),
            },
            _ => SortState::asc(key),
        }
    }
}

/// Compares two field values for sorting.
///
/// Null and missing values sort last in both directions. Everything else
/// compares by its text, case-insensitively first and then exactly, so
/// numbers order as strings (`"10"` before `"9"`).
pub fn compare_values(a: Option<&Value>, b: Option<&Value>, direction: SortDirection) -> Ordering {
    let a = a.filter(|v| !v.is_null());
    let b = b.filter(|v| !v.is_null());

    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Greater,
        (Some(_), None) => Ordering::Less,
        (Some(a), Some(b)) => {
            let ordering = compare_present(a, b);
            match direction {
                SortDirection::Asc => ordering,
                SortDirection::Desc => ordering.reverse(),
            }
        }
    }
}

fn compare_present(a: &Value, b: &Value) -> Ordering {
    let a = a.search_text();
    let b = b.search_text();
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(&b))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_cycle() {
        let first = SortState::toggled(None, "amount");
        assert_eq!(first, SortState::asc("amount"));

        let second = SortState::toggled(Some(&first), "amount");
        assert_eq!(second, SortState::desc("amount"));

        let other = SortState::toggled(Some(&second), "name");
        assert_eq!(other, SortState::asc("name"));
    }

    #[test]
    fn test_numbers_compare_as_text() {
        let ten = Value::Long(10);
        let nine = Value::Long(9);
        assert_eq!(
            compare_values(Some(&ten), Some(&nine), SortDirection::Asc),
            Ordering::Less
        );
        assert_eq!(
            compare_values(Some(&Value::Float(9.0)), Some(&nine), SortDirection::Asc),
            Ordering::Equal
        );
    }

    #[test]
    fn test_null_last_in_both_directions() {
        let one = Value::Long(1);
        for direction in [SortDirection::Asc, SortDirection::Desc] {
            assert_eq!(
                compare_values(None, Some(&one), direction),
                Ordering::Greater
            );
            assert_eq!(
                compare_values(Some(&Value::Null), Some(&one), direction),
                Ordering::Greater
            );
        }
    }
}
