use super::ui;
use crate::store::HistoryStore;
use anyhow::Result;
use chrono::Local;
use comfy_table::Cell;

/// Renders the conversion history, or clears it.
pub fn run(history: &HistoryStore, clear: bool) -> Result<()> {
    if clear {
        history.clear();
        println!("History cleared.");
        return Ok(());
    }

    let entries = history.entries();
    if entries.is_empty() {
        println!(
            "{}",
            ui::style_text("No conversions yet.", ui::StyleType::Subtle)
        );
        return Ok(());
    }

    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell("When"),
        ui::header_cell("From"),
        ui::header_cell("To"),
        ui::header_cell("Amount"),
        ui::header_cell("Result"),
        ui::header_cell("Rate"),
    ]);
    for entry in &entries {
        table.add_row(vec![
            Cell::new(entry.at.with_timezone(&Local).format("%Y-%m-%d %H:%M")),
            Cell::new(&entry.from),
            Cell::new(&entry.to),
            ui::amount_cell(entry.amount),
            ui::amount_cell(entry.result),
            ui::rate_cell(entry.rate),
        ]);
    }
    println!("{table}");

    Ok(())
}
