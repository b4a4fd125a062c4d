//! Due-date rules for habits.
//!
//! A habit is due on a date when the date lies inside its inclusive active
//! range and satisfies its frequency rule. Dates are `NaiveDate`, so there is
//! no time of day to strip and no clock is read here; callers pass the day
//! they are asking about.

mod calendar;

pub use calendar::{month_view, shift_month, DayCell, MonthView};

use chrono::NaiveDate;

use crate::habit::{DayOfWeek, Frequency, Habit};

/// Whether `habit` is due on `date`.
pub fn is_due(habit: &Habit, date: NaiveDate) -> bool {
    if !habit.in_active_range(date) {
        return false;
    }
    match habit.frequency() {
        Frequency::Everyday => true,
        Frequency::Weekly => habit.days_of_week().contains(&DayOfWeek::of(date)),
    }
}

/// Every date in the active range on which `habit` is due, in order.
pub fn due_dates(habit: &Habit) -> impl Iterator<Item = NaiveDate> + '_ {
    habit
        .start_date()
        .iter_days()
        .take_while(move |d| *d <= habit.end_date())
        .filter(move |d| is_due(habit, *d))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::habit::HabitDuration;
    use std::collections::BTreeSet;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn habit(frequency: Frequency, days: &[DayOfWeek], start: NaiveDate, end: NaiveDate) -> Habit {
        Habit::restore(
            "h".into(),
            "Habit".into(),
            frequency,
            days.iter().copied().collect::<BTreeSet<_>>(),
            HabitDuration::new(0, 15).unwrap(),
            start,
            end,
        )
        .unwrap()
    }

    #[test]
    fn everyday_due_on_range_boundaries_only_inside() {
        let h = habit(Frequency::Everyday, &[], date(2024, 1, 10), date(2024, 1, 20));
        assert!(!is_due(&h, date(2024, 1, 9)));
        assert!(is_due(&h, date(2024, 1, 10)));
        assert!(is_due(&h, date(2024, 1, 15)));
        assert!(is_due(&h, date(2024, 1, 20)));
        assert!(!is_due(&h, date(2024, 1, 21)));
    }

    #[test]
    fn weekly_due_only_on_selected_days() {
        // 2024-01-15 is a Monday
        let h = habit(
            Frequency::Weekly,
            &[DayOfWeek::Monday],
            date(2024, 1, 14),
            date(2024, 1, 31),
        );
        assert!(is_due(&h, date(2024, 1, 15)));
        assert!(is_due(&h, date(2024, 1, 22)));
        for day in 16..=21 {
            assert!(!is_due(&h, date(2024, 1, day)), "day {day} should not be due");
        }
        // Monday outside the range
        assert!(!is_due(&h, date(2024, 2, 5)));
        assert!(!is_due(&h, date(2024, 1, 8)));
    }

    #[test]
    fn due_dates_lists_weekly_occurrences() {
        let h = habit(
            Frequency::Weekly,
            &[DayOfWeek::Saturday, DayOfWeek::Sunday],
            date(2024, 1, 1),
            date(2024, 1, 14),
        );
        let dates: Vec<_> = due_dates(&h).collect();
        assert_eq!(
            dates,
            vec![
                date(2024, 1, 6),
                date(2024, 1, 7),
                date(2024, 1, 13),
                date(2024, 1, 14),
            ]
        );
    }

    #[test]
    fn due_dates_single_day_range() {
        let h = habit(Frequency::Everyday, &[], date(2024, 3, 1), date(2024, 3, 1));
        assert_eq!(due_dates(&h).count(), 1);
    }
}
