//! Pure display formatters for prices and relative timestamps.

use chrono::{DateTime, Datelike, Utc};

use crate::models::Language;

/// Format a price with thousands grouping and the per-language currency
/// suffix, e.g. `14 500 000 so'm`.
pub fn format_price(price: u64, lang: Language) -> String {
    let formatted = group_thousands(price);
    match lang {
        Language::Uz => format!("{formatted} so'm"),
        Language::Ru => format!("{formatted} сум"),
        Language::En => format!("{formatted} UZS"),
    }
}

fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(' ');
        }
        out.push(ch);
    }
    out
}

/// Relative "posted N ago" text; falls back to `dd.mm.yyyy` past 30 days.
/// `now` is passed in so callers (and tests) control the clock.
pub fn format_time_ago(ts: DateTime<Utc>, now: DateTime<Utc>, lang: Language) -> String {
    let diff = now.signed_duration_since(ts);
    let minutes = diff.num_minutes().max(0);
    let hours = diff.num_hours().max(0);
    let days = diff.num_days().max(0);

    if minutes < 60 {
        match lang {
            Language::Uz => format!("{minutes} daqiqa oldin"),
            Language::Ru => format!("{minutes} минут назад"),
            Language::En => format!("{minutes} min ago"),
        }
    } else if hours < 24 {
        match lang {
            Language::Uz => format!("{hours} soat oldin"),
            Language::Ru => format!("{hours} часов назад"),
            Language::En => format!("{hours} hours ago"),
        }
    } else if days < 30 {
        match lang {
            Language::Uz => format!("{days} kun oldin"),
            Language::Ru => format!("{days} дней назад"),
            Language::En => format!("{days} days ago"),
        }
    } else {
        format!("{:02}.{:02}.{}", ts.day(), ts.month(), ts.year())
    }
}
