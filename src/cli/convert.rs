use super::ui;
use crate::core::catalog::CatalogLoader;
use crate::core::convert::{ConvertOutcome, Converter};
use anyhow::Result;
use comfy_table::Cell;

/// Loads the catalog, submits the conversion and renders the outcome.
pub async fn run(
    loader: &CatalogLoader,
    converter: &Converter,
    amount: &str,
    from: &str,
    to: &str,
) -> Result<()> {
    let from = from.to_ascii_uppercase();
    let to = to.to_ascii_uppercase();

    let spinner = ui::new_spinner("Fetching currencies...");
    loader.load().await;
    spinner.finish_and_clear();

    // A code outside a loaded catalog cannot be submitted. When the catalog
    // failed to load we stay degraded but not blocked and submit anyway.
    let catalog = loader.catalog();
    if !catalog.is_empty() {
        for code in [&from, &to] {
            if !catalog.contains_key(code.as_str()) {
                println!(
                    "{}",
                    ui::style_text(&format!("Unknown currency: {code}"), ui::StyleType::Error)
                );
                return Ok(());
            }
        }
    }

    let spinner = ui::new_spinner("Converting...");
    let outcome = converter.convert(&from, &to, amount).await;
    spinner.finish_and_clear();

    match outcome {
        ConvertOutcome::Rejected => {
            println!(
                "{}",
                ui::style_text("Amount must be a number.", ui::StyleType::Subtle)
            );
        }
        ConvertOutcome::Failed(notice) => {
            println!("{}", ui::style_text(&notice, ui::StyleType::Error));
        }
        ConvertOutcome::Converted(conversion) => {
            let mut table = ui::new_styled_table();
            table.set_header(vec![
                ui::header_cell("From"),
                ui::header_cell("To"),
                ui::header_cell("Amount"),
                ui::header_cell("Result"),
                ui::header_cell("Rate"),
            ]);
            table.add_row(vec![
                Cell::new(&from),
                Cell::new(&to),
                Cell::new(amount.trim()),
                Cell::new(ui::style_text(
                    &format!("{:.2}", conversion.result),
                    ui::StyleType::ResultValue,
                )),
                ui::rate_cell(conversion.rate),
            ]);
            println!("{table}");
            println!(
                "{}",
                ui::style_text(
                    &format!("Rate fetched at {}", conversion.fetched_at.to_rfc3339()),
                    ui::StyleType::Subtle
                )
            );
        }
        // A one-shot command never has overlapping submissions.
        ConvertOutcome::Superseded => {}
    }

    Ok(())
}
