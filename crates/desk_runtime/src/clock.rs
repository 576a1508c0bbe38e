//! Wall-clock snapshots and the date formats used by the chrome surfaces.

const WEEKDAYS_SHORT: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];
const WEEKDAYS_LONG: [&str; 7] = [
    "Sunday",
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
];
const MONTHS_SHORT: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];
const MONTHS_LONG: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// One local-time reading of the wall clock.
pub struct ClockSnapshot {
    /// Day of week, 0 = Sunday.
    pub weekday: u32,
    /// Month, 1 = January.
    pub month: u32,
    /// Day of month.
    pub day: u32,
    /// Hour, 0..=23.
    pub hour: u32,
    /// Minute.
    pub minute: u32,
}

impl ClockSnapshot {
    /// Reads the host clock. Non-browser targets report the epoch; tests
    /// build snapshots directly instead.
    pub fn now() -> Self {
        #[cfg(target_arch = "wasm32")]
        {
            let date = js_sys::Date::new_0();
            return Self {
                weekday: date.get_day(),
                month: date.get_month() + 1,
                day: date.get_date(),
                hour: date.get_hours(),
                minute: date.get_minutes(),
            };
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            Self {
                weekday: 4,
                month: 1,
                day: 1,
                hour: 0,
                minute: 0,
            }
        }
    }

    /// Status strip format: `Wed Aug 21 3:45 PM`.
    pub fn format_status_strip(&self) -> String {
        let weekday = WEEKDAYS_SHORT[self.weekday as usize % 7];
        let month = MONTHS_SHORT[(self.month as usize).clamp(1, 12) - 1];
        let (hour, meridiem) = twelve_hour(self.hour);
        format!(
            "{weekday} {month} {day} {hour}:{minute:02} {meridiem}",
            day = self.day,
            minute = self.minute,
        )
    }

    /// Login screen date line: `Thursday, 21 August`.
    pub fn format_login_date(&self) -> String {
        let weekday = WEEKDAYS_LONG[self.weekday as usize % 7];
        let month = MONTHS_LONG[(self.month as usize).clamp(1, 12) - 1];
        format!("{weekday}, {day} {month}", day = self.day)
    }

    /// Login screen clock: 24-hour `15:45`.
    pub fn format_login_time(&self) -> String {
        format!("{:02}:{:02}", self.hour, self.minute)
    }
}

fn twelve_hour(hour: u32) -> (u32, &'static str) {
    let meridiem = if hour < 12 { "AM" } else { "PM" };
    let display = match hour % 12 {
        0 => 12,
        h => h,
    };
    (display, meridiem)
}
