//! Brazilian-Portuguese display formatting for prices and dates.

#[cfg(test)]
#[path = "format_test.rs"]
mod format_test;

const WEEKDAYS: [&str; 7] = ["Domingo", "Segunda", "Terça", "Quarta", "Quinta", "Sexta", "Sábado"];

/// Format a decimal price string as BRL, e.g. `"1234.5"` -> `"R$ 1.234,50"`.
///
/// Values that do not parse as a finite number are returned unchanged.
#[must_use]
pub fn format_brl(raw: &str) -> String {
    let Ok(value) = raw.trim().parse::<f64>() else {
        return raw.to_owned();
    };
    if !value.is_finite() {
        return raw.to_owned();
    }

    let fixed = format!("{:.2}", value.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));
    let negative = value < 0.0 && fixed.bytes().any(|b| b.is_ascii_digit() && b != b'0');
    let sign = if negative { "-" } else { "" };
    format!("{sign}R$\u{a0}{},{frac_part}", group_thousands(int_part))
}

fn group_thousands(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push('.');
        }
        out.push(ch);
    }
    out
}

/// Header date label, e.g. `"Quarta, 23/09/2020"`.
///
/// `weekday` counts from Sunday = 0; `month` is 1-based.
#[must_use]
pub fn format_date_label(weekday: u32, day: u32, month: u32, year: i32) -> String {
    let name = WEEKDAYS[(weekday % 7) as usize];
    format!("{name}, {day:02}/{month:02}/{year}")
}

/// Today's label from the browser clock; `None` outside the browser.
#[must_use]
pub fn today_label() -> Option<String> {
    #[cfg(feature = "hydrate")]
    {
        let now = js_sys::Date::new_0();
        #[allow(clippy::cast_possible_wrap)]
        let year = now.get_full_year() as i32;
        Some(format_date_label(now.get_day(), now.get_date(), now.get_month() + 1, year))
    }
    #[cfg(not(feature = "hydrate"))]
    {
        None
    }
}
