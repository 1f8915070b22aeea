//! HTML pages served by the calendar web service.

use chrono::{Datelike, NaiveDate};

use crate::calendar::{CalendarSource, MAX_YEAR, MIN_YEAR};
use crate::models::{CalendarDay, SyncSummary};

const MONTH_TITLES: [&str; 12] = [
    "Январь",
    "Февраль",
    "Март",
    "Апрель",
    "Май",
    "Июнь",
    "Июль",
    "Август",
    "Сентябрь",
    "Октябрь",
    "Ноябрь",
    "Декабрь",
];

/// Escape text for use inside HTML element content or quoted attributes.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

fn layout(title: &str, content: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="ru">
<head>
    <meta charset="utf-8">
    <title>{title}</title>
</head>
<body>
    <nav><a href="/">Главная</a> | <a href="/calendar">Календарь</a></nav>
    <main>
{content}
    </main>
</body>
</html>
"#,
        title = escape_html(title),
        content = content
    )
}

fn request_form(year: i32) -> String {
    let options: String = CalendarSource::ALL
        .iter()
        .map(|source| {
            format!(
                r#"<option value="{}">{}</option>"#,
                source.name(),
                escape_html(source.label())
            )
        })
        .collect();

    format!(
        r#"        <form method="post" action="/calendar">
            <label>Источник <select name="source">{options}</select></label>
            <label>Год <input type="number" name="year" min="{MIN_YEAR}" max="{MAX_YEAR}" value="{year}"></label>
            <button type="submit">Загрузить календарь</button>
        </form>"#
    )
}

/// Landing page with the calendar request form.
pub fn index_page(current_year: i32) -> String {
    let content = format!(
        "        <h1>Производственный календарь</h1>\n\
        <p>Загрузите календарь рабочих и выходных дней за выбранный год.</p>\n{}",
        request_form(current_year)
    );
    layout("Производственный календарь", &content)
}

/// Stored days of `year`, one table per month.
pub fn calendar_page(year: i32, days: &[CalendarDay]) -> String {
    let mut content = format!("        <h1>Календарь на {} год</h1>\n", year);

    if days.is_empty() {
        content.push_str("        <p>Данных за этот год пока нет.</p>\n");
        content.push_str(&request_form(year));
        return layout(&format!("Календарь {}", year), &content);
    }

    let working = days.iter().filter(|d| d.is_working).count();
    content.push_str(&format!(
        "        <p>Рабочих дней: {}, нерабочих: {}</p>\n",
        working,
        days.len() - working
    ));

    for (index, title) in MONTH_TITLES.iter().enumerate() {
        let month = index as u32 + 1;
        let rows: String = days
            .iter()
            .filter(|d| d.date.month() == month)
            .map(day_row)
            .collect();
        if rows.is_empty() {
            continue;
        }
        content.push_str(&format!(
            "        <h2>{}</h2>\n        <table class=\"month\">\n{}        </table>\n",
            title, rows
        ));
    }

    layout(&format!("Календарь {}", year), &content)
}

fn day_row(day: &CalendarDay) -> String {
    let (class, label) = if day.is_working {
        ("working", "рабочий")
    } else {
        ("weekend", "выходной")
    };
    let holiday = day
        .holiday_name
        .as_deref()
        .map(escape_html)
        .unwrap_or_default();

    format!(
        "            <tr class=\"{}\"><td>{}</td><td>{}</td><td>{}</td></tr>\n",
        class,
        format_date(day.date),
        label,
        holiday
    )
}

fn format_date(date: NaiveDate) -> String {
    date.format("%d.%m.%Y").to_string()
}

/// A single stored day.
pub fn day_page(day: &CalendarDay) -> String {
    let status = if day.is_working {
        "Рабочий день"
    } else {
        "Нерабочий день"
    };
    let mut content = format!(
        "        <h1>{}</h1>\n        <p>{}</p>\n",
        format_date(day.date),
        status
    );
    if let Some(name) = &day.holiday_name {
        content.push_str(&format!("        <p>Праздник: {}</p>\n", escape_html(name)));
    }
    content.push_str(&format!(
        "        <p><a href=\"/calendar?year={}\">Весь год</a></p>\n",
        day.date.year()
    ));
    layout(&format_date(day.date), &content)
}

/// Result of a sync triggered from the request form.
pub fn sync_result_page(summary: &SyncSummary) -> String {
    let content = format!(
        "        <h1>Календарь на {year} год загружен</h1>\n\
        <p>Источник: {source}</p>\n\
        <p>Всего дней: {total}, рабочих: {working}, нерабочих: {non_working}</p>\n\
        <p><a href=\"/calendar?year={year}\">Открыть календарь</a></p>\n",
        year = summary.year,
        source = escape_html(&summary.source),
        total = summary.days_total,
        working = summary.working,
        non_working = summary.non_working,
    );
    layout("Календарь загружен", &content)
}

/// Error page shown for failed requests.
pub fn error_page(status: u16, message: &str) -> String {
    let content = format!(
        "        <h1>Ошибка {}</h1>\n        <p>{}</p>\n",
        status,
        escape_html(message)
    );
    layout(&format!("Ошибка {}", status), &content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use uuid::Uuid;

    fn day(y: i32, m: u32, d: u32, is_working: bool, holiday: Option<&str>) -> CalendarDay {
        CalendarDay {
            id: Uuid::new_v4(),
            date: NaiveDate::from_ymd_opt(y, m, d).unwrap(),
            is_working,
            holiday_name: holiday.map(str::to_string),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"<b>"Tom" & 'Jerry'</b>"#),
            "&lt;b&gt;&quot;Tom&quot; &amp; &#39;Jerry&#39;&lt;/b&gt;"
        );
    }

    #[test]
    fn test_index_page_has_form() {
        let html = index_page(2025);
        assert!(html.contains(r#"<form method="post" action="/calendar">"#));
        assert!(html.contains(r#"<option value="consultant">"#));
        assert!(html.contains(r#"value="2025""#));
    }

    #[test]
    fn test_calendar_page_groups_by_month() {
        let days = vec![
            day(2025, 1, 1, false, Some("Новый год <1>")),
            day(2025, 1, 9, true, None),
            day(2025, 3, 7, true, None),
        ];
        let html = calendar_page(2025, &days);
        assert!(html.contains("<h2>Январь</h2>"));
        assert!(html.contains("<h2>Март</h2>"));
        assert!(!html.contains("<h2>Февраль</h2>"));
        assert!(html.contains("01.01.2025"));
        assert!(html.contains("Новый год &lt;1&gt;"));
        assert!(html.contains("Рабочих дней: 2, нерабочих: 1"));
    }

    #[test]
    fn test_empty_calendar_page_offers_form() {
        let html = calendar_page(2026, &[]);
        assert!(html.contains("Данных за этот год пока нет."));
        assert!(html.contains(r#"value="2026""#));
    }

    #[test]
    fn test_day_page() {
        let html = day_page(&day(2025, 5, 9, false, Some("День Победы")));
        assert!(html.contains("<h1>09.05.2025</h1>"));
        assert!(html.contains("Нерабочий день"));
        assert!(html.contains("Праздник: День Победы"));
        assert!(html.contains("/calendar?year=2025"));
    }

    #[test]
    fn test_error_page_escapes_message() {
        let html = error_page(400, "Year <script>");
        assert!(html.contains("Ошибка 400"));
        assert!(html.contains("Year &lt;script&gt;"));
    }
}
