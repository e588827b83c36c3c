use rust_decimal::Decimal;
use tabled::{settings::Style, Table, Tabled};

use crate::dte::DocumentType;
use crate::session::Session;
use crate::view::{tooltip_label, ChartData, Paginator};

pub const EMPTY_MESSAGE: &str = "No data to display.";

const BAR_WIDTH: f64 = 40.0;

// Table row structs for tabled
#[derive(Tabled)]
struct FileRow {
    #[tabled(rename = "#")]
    index: usize,
    #[tabled(rename = "FILE")]
    name: String,
}

#[derive(Tabled)]
struct TypeRow {
    #[tabled(rename = "CODE")]
    code: String,
    #[tabled(rename = "NAME")]
    name: String,
    #[tabled(rename = "DOCUMENTS")]
    documents: usize,
}

#[derive(Tabled)]
struct MonthRow {
    #[tabled(rename = "MONTH")]
    month: String,
    #[tabled(rename = "SELECTED")]
    selected: String,
}

#[derive(Tabled)]
struct ReceiptRow {
    #[tabled(rename = "NIT")]
    nit: String,
    #[tabled(rename = "ISSUER")]
    issuer: String,
    #[tabled(rename = "RECEIVER")]
    receiver: String,
    #[tabled(rename = "EMISSION DATE")]
    date: String,
    #[tabled(rename = "TOTAL PAYABLE")]
    total: String,
}

/// Format a money amount with two decimal places and thousands separators
pub fn format_money(value: Decimal) -> String {
    let rounded = format!("{:.2}", value.round_dp(2));
    let (whole, frac) = rounded.split_once('.').unwrap_or((rounded.as_str(), "00"));
    let negative = whole.starts_with('-');
    let digits = whole.trim_start_matches('-');

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    format!("{}${}.{}", if negative { "-" } else { "" }, grouped, frac)
}

/// One-line page indicator with the available navigation moves
pub fn nav_line(pager: &Paginator, total: usize) -> String {
    let count = pager.page_count(total);
    if count == 0 {
        return "Page 0 of 0".to_string();
    }
    let current = pager.current();
    let pages: Vec<String> = (1..=count)
        .map(|p| {
            if p == current {
                format!("[{p}]")
            } else {
                p.to_string()
            }
        })
        .collect();
    let prev = if pager.has_prev() {
        (current - 1).to_string()
    } else {
        "-".to_string()
    };
    let next = if pager.has_next(total) {
        (current + 1).to_string()
    } else {
        "-".to_string()
    };
    format!(
        "Page {current} of {count} | pages: {} | prev: {prev} | next: {next}",
        pages.join(" ")
    )
}

/// Paginated list of admitted files
pub fn render_files(session: &Session) -> String {
    let files = session.store().files();
    if files.is_empty() {
        return "No files loaded.".to_string();
    }
    let pager = session.files_pager();
    let offset = (pager.current() - 1) * pager.page_size();
    let rows: Vec<FileRow> = session
        .files_page()
        .iter()
        .enumerate()
        .map(|(i, f)| FileRow {
            index: offset + i + 1,
            name: f.name.clone(),
        })
        .collect();

    let table = Table::new(rows).with(Style::rounded()).to_string();
    format!("{table}\n{}", nav_line(pager, files.len()))
}

pub fn render_types(session: &Session) -> String {
    let types = session.available_types();
    if types.is_empty() {
        return EMPTY_MESSAGE.to_string();
    }
    let receipts = session.store().receipts();
    let rows: Vec<TypeRow> = types
        .iter()
        .map(|t: &DocumentType| TypeRow {
            code: t.code().to_string(),
            name: t.name().to_string(),
            documents: receipts.iter().filter(|r| r.document_type == *t).count(),
        })
        .collect();
    Table::new(rows).with(Style::rounded()).to_string()
}

pub fn render_months(session: &Session) -> String {
    let months = session.available_months();
    if months.is_empty() {
        return EMPTY_MESSAGE.to_string();
    }
    let selected = &session.filter().selected_months;
    let rows: Vec<MonthRow> = months
        .iter()
        .map(|m| MonthRow {
            month: m.to_string(),
            selected: (if selected.contains(m) { "yes" } else { "" }).to_string(),
        })
        .collect();
    Table::new(rows).with(Style::rounded()).to_string()
}

/// Current data page with totals and page navigation
pub fn render_table(session: &Session) -> String {
    let views = session.views();
    if views.filtered.is_empty() {
        return EMPTY_MESSAGE.to_string();
    }

    let page = session.data_page();
    let rows: Vec<ReceiptRow> = page
        .iter()
        .map(|r| ReceiptRow {
            nit: r.nit.clone(),
            issuer: r.issuer_name.clone(),
            receiver: r.receiver_name.clone(),
            date: r.emission_date.to_string(),
            total: format_money(r.total_payable),
        })
        .collect();

    let page_total: Decimal = page.iter().map(|r| r.total_payable).sum();
    let filtered_total: Decimal = views.filtered.iter().map(|r| r.total_payable).sum();

    let table = Table::new(rows).with(Style::rounded()).to_string();
    format!(
        "{table}\nPage total: {} | Filtered total: {} ({} documents)\n{}",
        format_money(page_total),
        format_money(filtered_total),
        views.filtered.len(),
        nav_line(session.data_pager(), views.filtered.len())
    )
}

/// Horizontal bar rendering of the chart series
pub fn render_chart_text(chart: &ChartData) -> String {
    if chart.is_empty() {
        return EMPTY_MESSAGE.to_string();
    }
    let max = chart
        .points()
        .map(|(_, v)| v)
        .fold(0.0_f64, f64::max);
    let label_width = chart.labels.iter().map(String::len).max().unwrap_or(0);

    chart
        .points()
        .map(|(label, value)| {
            let width = if max > 0.0 {
                ((value / max) * BAR_WIDTH).round() as usize
            } else {
                0
            };
            format!(
                "{label:<label_width$} | {:<bar$} {}",
                "#".repeat(width),
                tooltip_label(value),
                bar = BAR_WIDTH as usize
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}
