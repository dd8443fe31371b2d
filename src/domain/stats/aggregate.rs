//! Period partitioning and commutative reductions over record sets.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use super::window::MonthWindows;
use crate::domain::order::Order;
use crate::domain::product::Product;

/// A record with a creation timestamp.
pub trait Dated {
    /// Creation instant, `None` when unknown.
    fn created_at(&self) -> Option<DateTime<Utc>>;
}

impl Dated for Product {
    fn created_at(&self) -> Option<DateTime<Utc>> {
        self.created_at
    }
}

impl Dated for Order {
    fn created_at(&self) -> Option<DateTime<Utc>> {
        self.created_at
    }
}

/// Records bucketed into the current and previous month windows.
///
/// Undated records belong to neither bucket but still count in `total`.
#[derive(Debug)]
pub struct Partition<'a, T> {
    pub current: Vec<&'a T>,
    pub previous: Vec<&'a T>,
    pub undated: usize,
    pub total: usize,
}

impl<'a, T: Dated> Partition<'a, T> {
    /// Single linear scan against both half-open windows.
    pub fn of(records: &'a [T], windows: &MonthWindows) -> Self {
        let current_window = windows.current();
        let previous_window = windows.previous();

        let mut partition = Self {
            current: Vec::new(),
            previous: Vec::new(),
            undated: 0,
            total: records.len(),
        };

        for record in records {
            match record.created_at() {
                None => partition.undated += 1,
                Some(at) if current_window.contains(at) => partition.current.push(record),
                Some(at) if previous_window.contains(at) => partition.previous.push(record),
                Some(_) => {}
            }
        }

        partition
    }
}

/// Distinct values of `key` over `records`.
pub fn distinct<'a, T: 'a, I, F>(records: I, key: F) -> BTreeSet<String>
where
    I: IntoIterator<Item = &'a T>,
    F: Fn(&T) -> String,
{
    records.into_iter().map(key).collect()
}

/// Arithmetic mean of `value` over `records`, zero for an empty set.
///
/// When the exact sum would exceed the `Decimal` range the mean is taken
/// over pre-divided terms and saturates at the range bounds.
pub fn mean<'a, T: 'a, I, F>(records: I, value: F) -> Decimal
where
    I: IntoIterator<Item = &'a T>,
    F: Fn(&T) -> Decimal,
{
    let values: Vec<Decimal> = records.into_iter().map(value).collect();
    if values.is_empty() {
        return Decimal::ZERO;
    }
    let count = Decimal::from(values.len());

    match values
        .iter()
        .try_fold(Decimal::ZERO, |sum, value| sum.checked_add(*value))
    {
        Some(sum) => sum / count,
        None => values
            .iter()
            .fold(Decimal::ZERO, |mean, value| mean.saturating_add(*value / count)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rust_decimal_macros::dec;

    struct Row {
        at: Option<DateTime<Utc>>,
        value: Decimal,
        tag: &'static str,
    }

    impl Dated for Row {
        fn created_at(&self) -> Option<DateTime<Utc>> {
            self.at
        }
    }

    fn at(m: u32, d: u32) -> Option<DateTime<Utc>> {
        Some(Utc.with_ymd_and_hms(2024, m, d, 10, 0, 0).unwrap())
    }

    fn windows() -> MonthWindows {
        MonthWindows::for_instant(&Utc.with_ymd_and_hms(2024, 3, 20, 0, 0, 0).unwrap())
    }

    fn rows() -> Vec<Row> {
        vec![
            Row { at: at(3, 2), value: dec!(10), tag: "a" },
            Row { at: at(2, 28), value: dec!(20), tag: "b" },
            Row { at: at(1, 5), value: dec!(30), tag: "c" },
            Row { at: None, value: dec!(40), tag: "d" },
            Row { at: at(3, 25), value: dec!(50), tag: "e" },
        ]
    }

    #[test]
    fn partitions_by_half_open_windows() {
        let rows = rows();
        let partition = Partition::of(&rows, &windows());

        assert_eq!(partition.total, 5);
        assert_eq!(partition.undated, 1);
        assert_eq!(
            partition.current.iter().map(|r| r.tag).collect::<Vec<_>>(),
            vec!["a"]
        );
        assert_eq!(
            partition.previous.iter().map(|r| r.tag).collect::<Vec<_>>(),
            vec!["b"]
        );
    }

    #[test]
    fn buckets_are_disjoint() {
        let rows = rows();
        let partition = Partition::of(&rows, &windows());
        for current in &partition.current {
            assert!(!partition
                .previous
                .iter()
                .any(|previous| std::ptr::eq(*previous, *current)));
        }
    }

    #[test]
    fn mean_of_empty_set_is_zero() {
        let empty: Vec<Row> = Vec::new();
        assert_eq!(mean(&empty, |r| r.value), Decimal::ZERO);
        assert_eq!(mean(&rows(), |r| r.value), dec!(30));
    }

    #[test]
    fn mean_of_huge_values_does_not_overflow() {
        let huge = [dec!(5e28), dec!(5e28)];
        assert_eq!(mean(&huge, |v| *v), dec!(5e28));

        let mixed = [Decimal::MAX, Decimal::MAX, dec!(0)];
        let avg = mean(&mixed, |v| *v);
        assert!(avg > dec!(5e28) && avg <= Decimal::MAX);
    }

    #[test]
    fn record_created_at_now_is_not_yet_current() {
        let now = Utc.with_ymd_and_hms(2024, 3, 20, 0, 0, 0).unwrap();
        let earlier = Some(now - chrono::Duration::seconds(1));
        let rows = vec![
            Row { at: Some(now), value: dec!(1), tag: "now" },
            Row { at: earlier, value: dec!(1), tag: "earlier" },
        ];
        let partition = Partition::of(&rows, &MonthWindows::for_instant(&now));

        assert_eq!(
            partition.current.iter().map(|r| r.tag).collect::<Vec<_>>(),
            vec!["earlier"]
        );
        assert!(partition.previous.is_empty());
        assert_eq!(partition.total, 2);
    }

    #[test]
    fn distinct_collects_unique_keys() {
        let rows = rows();
        let tags = distinct(rows.iter().chain(rows.iter()), |r| r.tag.to_string());
        assert_eq!(tags.len(), 5);
    }
}
