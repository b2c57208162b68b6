use super::ui;
use crate::core::catalog::CatalogLoader;
use anyhow::Result;
use comfy_table::Cell;

/// Fetches the catalog and renders it sorted by code.
pub async fn run(loader: &CatalogLoader) -> Result<()> {
    let spinner = ui::new_spinner("Fetching currencies...");
    loader.load().await;
    spinner.finish_and_clear();

    let options = loader.options();
    if options.is_empty() {
        println!(
            "{}",
            ui::style_text("Currency list is unavailable.", ui::StyleType::Error)
        );
        return Ok(());
    }

    let mut table = ui::new_styled_table();
    table.set_header(vec![ui::header_cell("Code"), ui::header_cell("Name")]);
    for option in &options {
        table.add_row(vec![Cell::new(&option.code), Cell::new(&option.name)]);
    }
    println!("{table}");

    Ok(())
}
