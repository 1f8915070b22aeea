//! Turns a calendar page into per-day records.
//!
//! The page carries one `table.cal` per month inside `div#content`. Each
//! table has a `th.month` header with the Russian month name and one `td`
//! per day. The CSS classes of a `td` tell the day type:
//!
//! | classes           | meaning                              |
//! |-------------------|--------------------------------------|
//! | (none)            | working day                          |
//! | `weekend`         | weekend or public holiday            |
//! | `preholiday`      | shortened working day before holiday |
//! | `inactively`      | day of an adjacent month, skipped    |

use scraper::{ElementRef, Html, Selector};
use tracing::{debug, info};

use super::ScrapeError;
use crate::models::{CalendarDayRecord, DayType};

/// Class marking a cell that belongs to an adjacent month.
pub const INACTIVE_CLASS: &str = "inactively";
/// Class marking a weekend or holiday.
pub const WEEKEND_CLASS: &str = "weekend";
/// Class marking a shortened pre-holiday working day.
pub const PREHOLIDAY_CLASS: &str = "preholiday";

const MONTHS: [(&str, u32); 12] = [
    ("январь", 1),
    ("февраль", 2),
    ("март", 3),
    ("апрель", 4),
    ("май", 5),
    ("июнь", 6),
    ("июль", 7),
    ("август", 8),
    ("сентябрь", 9),
    ("октябрь", 10),
    ("ноябрь", 11),
    ("декабрь", 12),
];

/// CSS selectors used to walk the calendar page.
#[derive(Debug, Clone)]
pub struct ExtractorConfig {
    pub container: String,
    pub month_table: String,
    pub month_header: String,
    pub day_cell: String,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            container: "div#content".to_string(),
            month_table: "table.cal".to_string(),
            month_header: "th.month".to_string(),
            day_cell: "td".to_string(),
        }
    }
}

/// How a single day cell reads once its classes are inspected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellKind {
    /// Belongs to the previous or next month.
    Inactive,
    /// Belongs to the table's own month.
    Active(DayType),
}

/// One month table, resolved to its month number.
struct MonthTable<'a> {
    month: u32,
    cells: Vec<ElementRef<'a>>,
}

/// Parses calendar pages with a fixed set of compiled selectors.
#[derive(Debug, Clone)]
pub struct Extractor {
    container_css: String,
    container: Selector,
    month_table: Selector,
    month_header: Selector,
    day_cell: Selector,
}

impl Extractor {
    pub fn new(config: &ExtractorConfig) -> Result<Self, ScrapeError> {
        Ok(Self {
            container_css: config.container.clone(),
            container: compile(&config.container)?,
            month_table: compile(&config.month_table)?,
            month_header: compile(&config.month_header)?,
            day_cell: compile(&config.day_cell)?,
        })
    }

    /// Extract every active day of the document, in document order.
    ///
    /// `year` is stamped onto each record as given; the document is never
    /// consulted for it.
    pub fn extract(&self, markup: &str, year: i32) -> Result<Vec<CalendarDayRecord>, ScrapeError> {
        let document = Html::parse_document(markup);

        let container = document.select(&self.container).next().ok_or_else(|| {
            ScrapeError::DocumentStructure(format!(
                "content container '{}' not found",
                self.container_css
            ))
        })?;

        let mut records = Vec::new();
        for table in self.month_tables(container) {
            let table = table?;
            for cell in table.cells {
                let classes: Vec<&str> = cell.value().classes().collect();
                let day_type = match classify_cell(&classes)? {
                    CellKind::Inactive => continue,
                    CellKind::Active(day_type) => day_type,
                };

                let text: String = cell.text().collect();
                let day = parse_day_number(&text)?;

                records.push(CalendarDayRecord {
                    year,
                    month: table.month,
                    day,
                    day_type,
                });
            }
        }

        info!("Extracted {} calendar days for {}", records.len(), year);
        Ok(records)
    }

    /// Month tables of the container, resolved lazily so a table's header is
    /// only read once every earlier table has been walked.
    fn month_tables<'s, 'a: 's>(
        &'s self,
        container: ElementRef<'a>,
    ) -> impl Iterator<Item = Result<MonthTable<'a>, ScrapeError>> + 's {
        container.select(&self.month_table).filter_map(move |table| {
            let Some(header) = table.select(&self.month_header).next() else {
                debug!("Skipping table without a month header");
                return None;
            };

            let header_text: String = header.text().collect();
            let table = resolve_month(&header_text).map(|month| MonthTable {
                month,
                cells: table.select(&self.day_cell).collect(),
            });
            Some(table)
        })
    }
}

fn compile(css: &str) -> Result<Selector, ScrapeError> {
    Selector::parse(css).map_err(|e| ScrapeError::InvalidSelector {
        selector: css.to_string(),
        reason: e.to_string(),
    })
}

/// Map a Russian month name to its number, ignoring case and surrounding whitespace.
pub fn resolve_month(name: &str) -> Result<u32, ScrapeError> {
    let normalized = name.trim().to_lowercase();

    MONTHS
        .iter()
        .find(|(month_name, _)| *month_name == normalized)
        .map(|(_, number)| *number)
        .ok_or_else(|| ScrapeError::UnrecognizedMonth {
            text: name.to_string(),
        })
}

/// Build the day number from every decimal digit in the cell text.
///
/// Only ASCII digits `0`-`9` count. Other Unicode decimal digits, such as
/// fullwidth `１５` or Arabic-Indic `٣`, are treated like any other
/// non-digit character.
pub fn parse_day_number(cell_text: &str) -> Result<u32, ScrapeError> {
    let digits: String = cell_text.chars().filter(char::is_ascii_digit).collect();

    digits.parse().map_err(|_| ScrapeError::DayNumberParse {
        cell_text: cell_text.trim().to_string(),
    })
}

/// Read a cell's class list.
///
/// The inactive marker wins over everything else. An active cell must have
/// either no classes at all or one of the known day-type markers.
pub fn classify_cell<S: AsRef<str>>(classes: &[S]) -> Result<CellKind, ScrapeError> {
    let has = |marker: &str| classes.iter().any(|c| c.as_ref() == marker);

    if has(INACTIVE_CLASS) {
        return Ok(CellKind::Inactive);
    }

    let day_type = if classes.is_empty() {
        DayType::Working
    } else if has(WEEKEND_CLASS) {
        DayType::Weekend
    } else if has(PREHOLIDAY_CLASS) {
        DayType::PreHoliday
    } else {
        return Err(ScrapeError::UnclassifiedDay {
            classes: classes.iter().map(|c| c.as_ref().to_string()).collect(),
        });
    };

    Ok(CellKind::Active(day_type))
}
