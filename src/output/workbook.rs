//! XLSX workbook export
//!
//! Layout matches the crate contract: row 0 carries the query summary,
//! row 1 the column headers, and rows 2..N one shop each. The shop-name cell
//! is a hyperlink to the shop's absolute URL.

use crate::shop::Shop;
use crate::Result;
use rust_xlsxwriter::{Color, Format, FormatUnderline, Url, Workbook};
use std::path::Path;

/// Column headers for the data rows
const HEADERS: [&str; 6] = [
    "Shop name",
    "Address",
    "ZipCode",
    "District",
    "Phone",
    "Categories",
];

/// Writes the final shop list to an XLSX workbook
///
/// # Arguments
///
/// * `shops` - Accepted shops, exported in collection order
/// * `summary` - Query-summary line written to row 0
/// * `base_url` - Site origin prepended to each shop's relative URL
/// * `path` - Destination file path
///
/// # Returns
///
/// * `Ok(())` - Workbook written
/// * `Err(ScrapError::Export)` - The XLSX writer failed
pub fn export_workbook(shops: &[Shop], summary: &str, base_url: &str, path: &Path) -> Result<()> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();

    // Metadata: query summary then column headers
    worksheet.write_string(0, 0, summary)?;
    for (col, head) in HEADERS.iter().enumerate() {
        worksheet.write_string(1, col as u16, *head)?;
    }

    let url_format = Format::new()
        .set_font_color(Color::Blue)
        .set_underline(FormatUnderline::Single);

    let origin = base_url.trim_end_matches('/');
    for (i, shop) in shops.iter().enumerate() {
        let row = (i + 2) as u32;
        let link = Url::new(format!("{}{}", origin, shop.url)).set_text(shop.name.clone());

        worksheet.write_url_with_format(row, 0, link, &url_format)?;
        worksheet.write_string(row, 1, &shop.address)?;
        worksheet.write_string(row, 2, &shop.zip_code)?;
        worksheet.write_string(row, 3, &shop.district)?;
        worksheet.write_string(row, 4, &shop.phone)?;
        worksheet.write_string(row, 5, shop.categories.join(";"))?;
    }

    workbook.save(path)?;
    Ok(())
}
