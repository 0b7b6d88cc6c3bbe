use chrono::{Datelike, Duration, Months, NaiveDate, NaiveTime};
use std::collections::BTreeMap;
use uuid::Uuid;

use crate::{
    api::{AttendancePayload, AttendanceRecord, Employee, StatusField},
    utils::{csv_document, lookup::LookupMap, time::parse_date_input},
};

/// Statuses that count a record as attended.
pub const ATTENDED_STATUSES: [&str; 4] = ["in-time", "present", "late", "early-departure"];

/// Statuses offered in the filter and the record form.
pub const KNOWN_STATUSES: [&str; 6] = [
    "in-time",
    "present",
    "late",
    "early-departure",
    "absent",
    "leave",
];

pub const NO_STATUS_LABEL: &str = "none";

/// Trims, lower-cases and maps `_` and spaces to `-`.
pub fn normalize_status(raw: &str) -> String {
    raw.trim()
        .to_lowercase()
        .chars()
        .map(|c| if c == '_' || c == ' ' { '-' } else { c })
        .collect()
}

pub fn primary_status(record: &AttendanceRecord) -> Option<String> {
    record.status.primary().map(normalize_status)
}

pub fn is_attended(record: &AttendanceRecord) -> bool {
    primary_status(record)
        .map(|status| ATTENDED_STATUSES.contains(&status.as_str()))
        .unwrap_or(false)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusColor {
    Green,
    Yellow,
    Orange,
    Red,
    Blue,
    Gray,
}

impl StatusColor {
    pub fn as_str(&self) -> &'static str {
        match self {
            StatusColor::Green => "green",
            StatusColor::Yellow => "yellow",
            StatusColor::Orange => "orange",
            StatusColor::Red => "red",
            StatusColor::Blue => "blue",
            StatusColor::Gray => "gray",
        }
    }
}

pub fn status_color(primary: Option<&str>) -> StatusColor {
    match primary.map(normalize_status).as_deref() {
        Some("in-time") | Some("present") => StatusColor::Green,
        Some("late") => StatusColor::Yellow,
        Some("early-departure") => StatusColor::Orange,
        Some("absent") => StatusColor::Red,
        Some("leave") => StatusColor::Blue,
        _ => StatusColor::Gray,
    }
}

pub fn record_color(record: &AttendanceRecord) -> StatusColor {
    status_color(primary_status(record).as_deref())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tier {
    High,
    Medium,
    Low,
    None,
}

impl Tier {
    pub fn from_percentage(percentage: u32) -> Self {
        match percentage {
            80.. => Tier::High,
            50..=79 => Tier::Medium,
            1..=49 => Tier::Low,
            0 => Tier::None,
        }
    }

    pub fn color(&self) -> StatusColor {
        match self {
            Tier::High => StatusColor::Green,
            Tier::Medium => StatusColor::Yellow,
            Tier::Low => StatusColor::Red,
            Tier::None => StatusColor::Gray,
        }
    }
}

/// Attendance figures for one calendar day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayStats {
    pub date: NaiveDate,
    pub total: usize,
    pub attended: usize,
}

impl DayStats {
    pub fn has_data(&self) -> bool {
        self.total > 0
    }

    /// Rounded half-up; `None` for days without records.
    pub fn percentage(&self) -> Option<u32> {
        if self.total == 0 {
            return None;
        }
        let rounded = (self.attended * 200 + self.total) / (self.total * 2);
        Some(rounded as u32)
    }

    /// Any attendance at all lands in at least `Low`, even when the
    /// label rounds down to 0%.
    pub fn tier(&self) -> Option<Tier> {
        self.percentage().map(|value| match Tier::from_percentage(value) {
            Tier::None if self.attended > 0 => Tier::Low,
            tier => tier,
        })
    }

    pub fn label(&self) -> String {
        match self.percentage() {
            Some(value) => format!("{}%", value),
            None => "N/A".to_string(),
        }
    }

    pub fn color(&self) -> StatusColor {
        self.tier()
            .map(|tier| tier.color())
            .unwrap_or(StatusColor::Gray)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CalendarCell {
    Blank,
    Day(DayStats),
}

/// Monday-first month grid, padded to whole weeks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthCalendar {
    pub year: i32,
    pub month: u32,
    pub cells: Vec<CalendarCell>,
}

impl MonthCalendar {
    pub fn weeks(&self) -> Vec<Vec<CalendarCell>> {
        self.cells.chunks(7).map(|week| week.to_vec()).collect()
    }

    pub fn days(&self) -> impl Iterator<Item = &DayStats> {
        self.cells.iter().filter_map(|cell| match cell {
            CalendarCell::Day(day) => Some(day),
            CalendarCell::Blank => None,
        })
    }

    pub fn day(&self, day: u32) -> Option<&DayStats> {
        self.days().find(|stats| stats.date.day() == day)
    }
}

pub fn month_bounds(year: i32, month: u32) -> Option<(NaiveDate, NaiveDate)> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let last = first
        .checked_add_months(Months::new(1))?
        .checked_sub_signed(Duration::days(1))?;
    Some((first, last))
}

pub fn shift_month(year: i32, month: u32, delta: i32) -> (i32, u32) {
    let index = year * 12 + month as i32 - 1 + delta;
    (index.div_euclid(12), index.rem_euclid(12) as u32 + 1)
}

pub fn month_label(year: i32, month: u32) -> String {
    NaiveDate::from_ymd_opt(year, month, 1)
        .map(|date| date.format("%B %Y").to_string())
        .unwrap_or_else(|| format!("{}-{:02}", year, month))
}

/// Builds the calendar for `year`/`month`; records dated outside the
/// month are ignored.
pub fn month_calendar(records: &[AttendanceRecord], year: i32, month: u32) -> Option<MonthCalendar> {
    let (first, last) = month_bounds(year, month)?;
    let mut per_day: BTreeMap<u32, (usize, usize)> = BTreeMap::new();
    for record in records {
        if record.date < first || record.date > last {
            continue;
        }
        let entry = per_day.entry(record.date.day()).or_default();
        entry.0 += 1;
        if is_attended(record) {
            entry.1 += 1;
        }
    }

    let leading = first.weekday().num_days_from_monday() as usize;
    let mut cells = vec![CalendarCell::Blank; leading];
    for date in first.iter_days().take_while(|date| *date <= last) {
        let (total, attended) = per_day.get(&date.day()).copied().unwrap_or_default();
        cells.push(CalendarCell::Day(DayStats {
            date,
            total,
            attended,
        }));
    }
    while cells.len() % 7 != 0 {
        cells.push(CalendarCell::Blank);
    }
    Some(MonthCalendar { year, month, cells })
}

pub const WEEKDAY_HEADERS: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];

/// Client-side filters applied to the fetched records.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttendanceFilter {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
    pub status: Option<String>,
}

impl AttendanceFilter {
    pub fn from_inputs(from: &str, to: &str, status: &str) -> Result<Self, String> {
        let from = parse_date_input(from)?;
        let to = parse_date_input(to)?;
        if let (Some(f), Some(t)) = (from, to) {
            if f > t {
                return Err("Start date must be on or before the end date".into());
            }
        }
        let status = normalize_status(status);
        Ok(Self {
            from,
            to,
            status: (!status.is_empty()).then_some(status),
        })
    }

    pub fn matches(&self, record: &AttendanceRecord) -> bool {
        if self.from.is_some_and(|from| record.date < from) {
            return false;
        }
        if self.to.is_some_and(|to| record.date > to) {
            return false;
        }
        match &self.status {
            Some(wanted) if wanted == NO_STATUS_LABEL => primary_status(record).is_none(),
            Some(wanted) => primary_status(record).as_deref() == Some(wanted.as_str()),
            None => true,
        }
    }

    pub fn apply(&self, records: &[AttendanceRecord]) -> Vec<AttendanceRecord> {
        let mut rows: Vec<AttendanceRecord> = records
            .iter()
            .filter(|record| self.matches(record))
            .cloned()
            .collect();
        rows.sort_by(|a, b| b.date.cmp(&a.date));
        rows
    }
}

/// Number of records per primary status, known statuses first.
pub fn status_counts(records: &[AttendanceRecord]) -> Vec<(String, usize)> {
    let mut counts: BTreeMap<String, usize> = BTreeMap::new();
    for record in records {
        let key = primary_status(record).unwrap_or_else(|| NO_STATUS_LABEL.to_string());
        *counts.entry(key).or_default() += 1;
    }
    let mut ordered: Vec<(String, usize)> = KNOWN_STATUSES
        .iter()
        .filter_map(|status| counts.remove(*status).map(|n| (status.to_string(), n)))
        .collect();
    ordered.extend(counts);
    ordered
}

pub fn employee_label(employee: &Employee) -> String {
    format!("{} ({})", employee.full_name, employee.employee_code)
}

fn format_time(time: Option<NaiveTime>) -> String {
    time.map(|t| t.format("%H:%M").to_string())
        .unwrap_or_default()
}

pub fn status_text(status: &StatusField) -> String {
    status.tags().join(", ")
}

pub const CSV_HEADERS: [&str; 7] = [
    "Date",
    "Employee Code",
    "Employee",
    "Status",
    "Check In",
    "Check Out",
    "Note",
];

pub fn records_csv(records: &[AttendanceRecord], employees: &LookupMap<Uuid, Employee>) -> String {
    let rows: Vec<Vec<String>> = records
        .iter()
        .map(|record| {
            vec![
                record.date.format("%Y-%m-%d").to_string(),
                employees.label(&record.employee_id, |e| e.employee_code.clone()),
                employees.label(&record.employee_id, |e| e.full_name.clone()),
                status_text(&record.status),
                format_time(record.check_in),
                format_time(record.check_out),
                record.note.clone().unwrap_or_default(),
            ]
        })
        .collect();
    csv_document(&CSV_HEADERS, &rows)
}

pub fn export_filename(filter: &AttendanceFilter) -> String {
    match (filter.from, filter.to) {
        (Some(from), Some(to)) => format!("attendance-{}-{}.csv", from, to),
        (Some(from), None) => format!("attendance-from-{}.csv", from),
        (None, Some(to)) => format!("attendance-until-{}.csv", to),
        (None, None) => "attendance.csv".to_string(),
    }
}

/// Editable fields of the record modal. Status tags are entered comma
/// separated; a single tag is sent as a plain string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttendanceFormState {
    pub employee_id: String,
    pub date: String,
    pub check_in: String,
    pub check_out: String,
    pub status: String,
    pub note: String,
}

impl AttendanceFormState {
    pub fn for_date(date: NaiveDate) -> Self {
        Self {
            date: date.format("%Y-%m-%d").to_string(),
            status: "present".to_string(),
            ..Self::default()
        }
    }

    pub fn from_record(record: &AttendanceRecord) -> Self {
        Self {
            employee_id: record.employee_id.to_string(),
            date: record.date.format("%Y-%m-%d").to_string(),
            check_in: format_time(record.check_in),
            check_out: format_time(record.check_out),
            status: status_text(&record.status),
            note: record.note.clone().unwrap_or_default(),
        }
    }

    pub fn to_payload(&self) -> Result<AttendancePayload, String> {
        let employee_id =
            Uuid::parse_str(self.employee_id.trim()).map_err(|_| "Select an employee".to_string())?;
        let date = parse_date_input(&self.date)?.ok_or_else(|| "Date is required".to_string())?;
        let check_in = parse_time_input(&self.check_in)?;
        let check_out = parse_time_input(&self.check_out)?;
        if let (Some(start), Some(end)) = (check_in, check_out) {
            if end < start {
                return Err("Check-out must not be before check-in".into());
            }
        }
        let mut tags: Vec<String> = self
            .status
            .split(',')
            .map(normalize_status)
            .filter(|tag| !tag.is_empty())
            .collect();
        let status = if tags.len() == 1 {
            StatusField::One(tags.remove(0))
        } else {
            StatusField::Many(tags)
        };
        let note = self.note.trim();
        Ok(AttendancePayload {
            employee_id,
            date,
            check_in,
            check_out,
            status,
            note: (!note.is_empty()).then(|| note.to_string()),
        })
    }
}

fn parse_time_input(raw: &str) -> Result<Option<NaiveTime>, String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    NaiveTime::parse_from_str(trimmed, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(trimmed, "%H:%M:%S"))
        .map(Some)
        .map_err(|_| format!("Invalid time {:?}, expected HH:MM", trimmed))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::fixtures::{attendance, date, employee, id};

    fn one(tag: &str) -> StatusField {
        StatusField::One(tag.to_string())
    }

    fn many(tags: &[&str]) -> StatusField {
        StatusField::Many(tags.iter().map(|t| t.to_string()).collect())
    }

    #[test]
    fn normalize_status_unifies_case_and_separators() {
        assert_eq!(normalize_status(" In_Time "), "in-time");
        assert_eq!(normalize_status("Early Departure"), "early-departure");
        assert_eq!(normalize_status(""), "");
    }

    #[test]
    fn status_color_maps_primary_status_only() {
        assert_eq!(status_color(Some("in-time")), StatusColor::Green);
        assert_eq!(status_color(Some("PRESENT")), StatusColor::Green);
        assert_eq!(status_color(Some("late")), StatusColor::Yellow);
        assert_eq!(status_color(Some("early_departure")), StatusColor::Orange);
        assert_eq!(status_color(Some("absent")), StatusColor::Red);
        assert_eq!(status_color(Some("leave")), StatusColor::Blue);
        assert_eq!(status_color(Some("remote")), StatusColor::Gray);
        assert_eq!(status_color(None), StatusColor::Gray);
    }

    #[test]
    fn record_color_ignores_note_and_times() {
        let mut a = attendance(1, 10, date(2025, 3, 4), many(&["late", "absent"]));
        let b = a.clone();
        a.note = Some("absent all afternoon".into());
        a.check_in = NaiveTime::from_hms_opt(11, 0, 0);
        assert_eq!(record_color(&a), record_color(&b));
        assert_eq!(record_color(&a), StatusColor::Yellow);
    }

    #[test]
    fn calendar_reports_eighty_percent_as_high() {
        let on = date(2025, 3, 4);
        let records = vec![
            attendance(1, 10, on, one("in-time")),
            attendance(2, 11, on, one("present")),
            attendance(3, 12, on, one("late")),
            attendance(4, 13, on, many(&["early-departure"])),
            attendance(5, 14, on, one("absent")),
        ];
        let calendar = month_calendar(&records, 2025, 3).unwrap();
        let day = calendar.day(4).unwrap();
        assert_eq!((day.total, day.attended), (5, 4));
        assert_eq!(day.label(), "80%");
        assert_eq!(day.tier(), Some(Tier::High));
        assert_eq!(day.color(), StatusColor::Green);
    }

    #[test]
    fn days_without_records_render_not_available() {
        let records = vec![attendance(1, 10, date(2025, 3, 4), one("absent"))];
        let calendar = month_calendar(&records, 2025, 3).unwrap();
        let empty = calendar.day(5).unwrap();
        assert!(!empty.has_data());
        assert_eq!(empty.label(), "N/A");
        assert_eq!(empty.tier(), None);

        let absent_only = calendar.day(4).unwrap();
        assert_eq!(absent_only.label(), "0%");
        assert_eq!(absent_only.tier(), Some(Tier::None));
    }

    #[test]
    fn empty_status_counts_as_not_attended() {
        let on = date(2025, 3, 10);
        let records = vec![
            attendance(1, 10, on, many(&[])),
            attendance(2, 11, on, one("  ")),
            attendance(3, 12, on, one("Present")),
        ];
        let calendar = month_calendar(&records, 2025, 3).unwrap();
        let day = calendar.day(10).unwrap();
        assert_eq!((day.total, day.attended), (3, 1));
        assert_eq!(day.percentage(), Some(33));
        assert_eq!(day.tier(), Some(Tier::Low));
    }

    #[test]
    fn percentage_rounds_half_up_and_tier_follows_rounded_value() {
        let on = date(2025, 3, 1);
        let stats = DayStats { date: on, total: 8, attended: 1 };
        assert_eq!(stats.percentage(), Some(13));
        let stats = DayStats { date: on, total: 2, attended: 1 };
        assert_eq!(stats.percentage(), Some(50));
        assert_eq!(stats.tier(), Some(Tier::Medium));
        let stats = DayStats { date: on, total: 1000, attended: 795 };
        assert_eq!(stats.percentage(), Some(80));
        assert_eq!(stats.tier(), Some(Tier::High));
    }

    #[test]
    fn single_attendee_in_a_large_day_is_low_not_none() {
        let stats = DayStats { date: date(2025, 3, 1), total: 201, attended: 1 };
        assert_eq!(stats.percentage(), Some(0));
        assert_eq!(stats.label(), "0%");
        assert_eq!(stats.tier(), Some(Tier::Low));
        assert_eq!(stats.color(), StatusColor::Red);

        let empty = DayStats { date: date(2025, 3, 1), total: 201, attended: 0 };
        assert_eq!(empty.tier(), Some(Tier::None));
        assert_eq!(empty.color(), StatusColor::Gray);
    }

    #[test]
    fn records_outside_the_month_are_ignored() {
        let records = vec![
            attendance(1, 10, date(2025, 2, 28), one("present")),
            attendance(2, 10, date(2025, 4, 1), one("present")),
        ];
        let calendar = month_calendar(&records, 2025, 3).unwrap();
        assert!(calendar.days().all(|day| !day.has_data()));
    }

    #[test]
    fn grid_is_monday_first_with_leading_blanks() {
        // 2025-03-01 is a Saturday.
        let calendar = month_calendar(&[], 2025, 3).unwrap();
        let weeks = calendar.weeks();
        assert!(weeks.iter().all(|week| week.len() == 7));
        assert_eq!(&weeks[0][..5], &[CalendarCell::Blank; 5]);
        assert!(matches!(weeks[0][5], CalendarCell::Day(d) if d.date == date(2025, 3, 1)));
        assert_eq!(calendar.days().count(), 31);
    }

    #[test]
    fn shift_month_wraps_years() {
        assert_eq!(shift_month(2025, 1, -1), (2024, 12));
        assert_eq!(shift_month(2024, 12, 1), (2025, 1));
        assert_eq!(shift_month(2025, 3, 0), (2025, 3));
        assert_eq!(month_label(2025, 3), "March 2025");
    }

    #[test]
    fn filter_applies_range_and_status() {
        let records = vec![
            attendance(1, 10, date(2025, 3, 1), one("late")),
            attendance(2, 10, date(2025, 3, 5), one("Late")),
            attendance(3, 10, date(2025, 3, 6), one("present")),
            attendance(4, 10, date(2025, 3, 20), one("late")),
        ];
        let filter = AttendanceFilter::from_inputs("2025-03-02", "2025-03-10", "LATE").unwrap();
        let rows = filter.apply(&records);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].id, id(2));

        let all = AttendanceFilter::default().apply(&records);
        assert_eq!(all[0].date, date(2025, 3, 20));
    }

    #[test]
    fn filter_rejects_reversed_range() {
        assert!(AttendanceFilter::from_inputs("2025-03-10", "2025-03-01", "").is_err());
        assert!(AttendanceFilter::from_inputs("03/01/2025", "", "").is_err());
    }

    #[test]
    fn status_counts_put_known_statuses_first() {
        let on = date(2025, 3, 1);
        let records = vec![
            attendance(1, 10, on, one("remote")),
            attendance(2, 10, on, one("late")),
            attendance(3, 10, on, one("in_time")),
            attendance(4, 10, on, many(&[])),
            attendance(5, 10, on, one("late")),
        ];
        assert_eq!(
            status_counts(&records),
            vec![
                ("in-time".to_string(), 1),
                ("late".to_string(), 2),
                ("none".to_string(), 1),
                ("remote".to_string(), 1),
            ]
        );
    }

    #[test]
    fn csv_export_joins_employee_and_escapes_fields() {
        let staff = vec![employee(10, "Alice Example", "Engineering", "active")];
        let lookup = LookupMap::build(&staff, |e| e.id);
        let mut record = attendance(1, 10, date(2025, 3, 4), many(&["late", "early-departure"]));
        record.check_in = NaiveTime::from_hms_opt(9, 15, 0);
        record.note = Some("traffic, rain".into());
        let orphan = attendance(2, 99, date(2025, 3, 5), one("absent"));

        let csv = records_csv(&[record, orphan], &lookup);
        let lines: Vec<&str> = csv.split("\r\n").collect();
        assert_eq!(lines[0], "Date,Employee Code,Employee,Status,Check In,Check Out,Note");
        assert_eq!(
            lines[1],
            "2025-03-04,EMP-010,Alice Example,\"late, early-departure\",09:15,,\"traffic, rain\""
        );
        assert_eq!(lines[2], "2025-03-05,Unknown,Unknown,absent,,,");
    }

    #[test]
    fn export_filename_reflects_range() {
        let filter = AttendanceFilter::from_inputs("2025-03-01", "2025-03-31", "").unwrap();
        assert_eq!(export_filename(&filter), "attendance-2025-03-01-2025-03-31.csv");
        assert_eq!(export_filename(&AttendanceFilter::default()), "attendance.csv");
    }

    #[test]
    fn form_builds_single_or_multi_tag_payloads() {
        let mut form = AttendanceFormState::for_date(date(2025, 3, 4));
        form.employee_id = id(10).to_string();
        form.check_in = "09:00".into();
        form.check_out = "18:00".into();
        let payload = form.to_payload().unwrap();
        assert_eq!(payload.status, one("present"));
        assert!(payload.note.is_none());

        form.status = "Late, early departure".into();
        let payload = form.to_payload().unwrap();
        assert_eq!(payload.status, many(&["late", "early-departure"]));
    }

    #[test]
    fn form_validation_reports_first_problem() {
        let mut form = AttendanceFormState::for_date(date(2025, 3, 4));
        assert_eq!(form.to_payload().unwrap_err(), "Select an employee");
        form.employee_id = id(10).to_string();
        form.check_in = "18:00".into();
        form.check_out = "09:00".into();
        assert!(form.to_payload().unwrap_err().contains("Check-out"));
        form.check_out = "9am".into();
        assert!(form.to_payload().unwrap_err().contains("HH:MM"));
    }

    #[test]
    fn form_round_trips_existing_record() {
        let mut record = attendance(1, 10, date(2025, 3, 4), many(&["late", "leave"]));
        record.check_in = NaiveTime::from_hms_opt(9, 30, 0);
        let form = AttendanceFormState::from_record(&record);
        assert_eq!(form.status, "late, leave");
        assert_eq!(form.check_in, "09:30");
        let payload = form.to_payload().unwrap();
        assert_eq!(payload.employee_id, record.employee_id);
        assert_eq!(payload.status, record.status);
    }
}
