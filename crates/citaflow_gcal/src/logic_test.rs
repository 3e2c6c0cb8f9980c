#[cfg(test)]
mod tests {
    use crate::logic::{
        busy_slot_label, candidate_slots, compute_availability, free_slots, local_day_bounds,
        weekday_window, CreateEventRequest,
    };
    use chrono::NaiveDate;
    use chrono_tz::Tz;
    use std::collections::HashSet;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn busy(labels: &[&str]) -> HashSet<String> {
        labels.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn candidate_slots_cover_nine_to_five() {
        let slots = candidate_slots(9, 18);
        assert_eq!(slots.len(), 9);
        assert_eq!(slots.first().map(String::as_str), Some("09:00"));
        assert_eq!(slots.last().map(String::as_str), Some("17:00"));
    }

    #[test]
    fn candidate_slots_zero_pad_single_digit_hours() {
        let slots = candidate_slots(8, 11);
        assert_eq!(slots, vec!["08:00", "09:00", "10:00"]);
    }

    #[test]
    fn busy_slot_label_truncates_to_hour_and_minute() {
        assert_eq!(
            busy_slot_label("2025-05-05T09:00:00-04:00").as_deref(),
            Some("09:00")
        );
        assert_eq!(
            busy_slot_label("2025-05-05T14:30:00Z").as_deref(),
            Some("14:30")
        );
    }

    #[test]
    fn busy_slot_label_rejects_bare_dates() {
        // all-day events report a date without a time component
        assert_eq!(busy_slot_label("2025-05-05"), None);
        assert_eq!(busy_slot_label("not a timestamp"), None);
    }

    #[test]
    fn free_slots_removes_busy_hours_in_order() {
        let candidates = candidate_slots(9, 18);
        let free = free_slots(&candidates, &busy(&["09:00", "10:00"]));
        assert_eq!(
            free,
            vec!["11:00", "12:00", "13:00", "14:00", "15:00", "16:00", "17:00"]
        );
    }

    #[test]
    fn free_slots_with_no_busy_hours_returns_all_candidates() {
        let candidates = candidate_slots(9, 18);
        assert_eq!(free_slots(&candidates, &HashSet::new()), candidates);
    }

    #[test]
    fn off_hour_event_does_not_block_the_hour_slot() {
        // An event at 09:30 leaves 09:00 bookable; matching is exact.
        let candidates = candidate_slots(9, 18);
        let free = free_slots(&candidates, &busy(&["09:30"]));
        assert!(free.contains(&"09:00".to_string()));
        assert_eq!(free.len(), candidates.len());
    }

    #[test]
    fn weekday_window_skips_saturday_and_sunday() {
        // 2025-05-05 is a Monday, so a 7-day window spans one weekend.
        let days = weekday_window(date(2025, 5, 5), 7);
        assert_eq!(
            days,
            vec![
                date(2025, 5, 5),
                date(2025, 5, 6),
                date(2025, 5, 7),
                date(2025, 5, 8),
                date(2025, 5, 9),
            ]
        );
    }

    #[test]
    fn weekday_window_starting_on_saturday_begins_monday() {
        let days = weekday_window(date(2025, 5, 10), 3);
        assert_eq!(days, vec![date(2025, 5, 12)]);
    }

    #[test]
    fn availability_keys_fully_booked_days_with_empty_lists() {
        let candidates = candidate_slots(9, 18);
        let monday = date(2025, 5, 5);
        let all_booked: HashSet<String> = candidates.iter().cloned().collect();

        let availability = compute_availability(monday, 2, &candidates, |d| {
            if d == monday {
                all_booked.clone()
            } else {
                HashSet::new()
            }
        });

        // Fully booked Monday still appears, with nothing free.
        assert_eq!(availability.get(&monday).map(Vec::len), Some(0));
        assert_eq!(
            availability.get(&date(2025, 5, 6)).map(Vec::len),
            Some(candidates.len())
        );
    }

    #[test]
    fn availability_window_has_no_weekend_entries() {
        let candidates = candidate_slots(9, 18);
        let availability =
            compute_availability(date(2025, 5, 5), 7, &candidates, |_| HashSet::new());
        assert_eq!(availability.len(), 5);
        assert!(!availability.contains_key(&date(2025, 5, 10)));
        assert!(!availability.contains_key(&date(2025, 5, 11)));
    }

    #[test]
    fn local_day_bounds_span_the_whole_day() {
        let (start, end) = local_day_bounds(date(2025, 5, 5), Tz::America__Santiago).unwrap();
        assert_eq!(start.to_rfc3339(), "2025-05-05T00:00:00-04:00");
        assert_eq!(end.to_rfc3339(), "2025-05-05T23:59:59-04:00");
    }

    #[test]
    fn local_day_bounds_survive_the_midnight_spring_forward() {
        // Chile enters DST at local midnight: on 2025-09-07 the clock jumps
        // from 23:59:59 -04 straight to 01:00:00 -03, so midnight does not
        // exist. The day must start at the first valid instant, not error.
        let (start, end) = local_day_bounds(date(2025, 9, 7), Tz::America__Santiago).unwrap();
        assert_eq!(start.to_rfc3339(), "2025-09-07T01:00:00-03:00");
        assert_eq!(end.to_rfc3339(), "2025-09-07T23:59:59-03:00");
    }

    #[test]
    fn create_event_validation_reports_every_missing_field() {
        let request = CreateEventRequest {
            nombres: Some("Ana".to_string()),
            apellidos: None,
            correo: Some("  ".to_string()),
            motivo: Some("Consulta".to_string()),
            fecha: None,
            hora: Some("10:00".to_string()),
            usar_token_admin: false,
            access_token: None,
        };
        let missing = request.validate().unwrap_err();
        assert_eq!(missing, vec!["apellidos", "correo", "fecha", "access_token"]);
    }

    #[test]
    fn create_event_validation_skips_token_for_admin_bookings() {
        let request = CreateEventRequest {
            nombres: Some("Ana".to_string()),
            apellidos: Some("Rojas".to_string()),
            correo: Some("ana@example.cl".to_string()),
            motivo: Some("Consulta".to_string()),
            fecha: Some("2025-05-05".to_string()),
            hora: Some("10:00".to_string()),
            usar_token_admin: true,
            access_token: None,
        };
        let appointment = request.validate().expect("admin booking needs no token");
        assert!(appointment.usar_token_admin);
        assert_eq!(appointment.nombres, "Ana");
    }
}
