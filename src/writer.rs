use csv::{ReaderBuilder, WriterBuilder};
use rust_xlsxwriter::{Format, Workbook, Worksheet, XlsxError};
use std::error::Error;
use std::path::Path;

/// Name of the consolidated sheet holding every profile's rows.
pub const ALL_PROFILES_SHEET: &str = "All Profiles";

/// Extra display width added on top of the longest cell in a column.
const COLUMN_PADDING: usize = 2;

/// XLSX caps sheet names at 31 characters.
const SHEET_NAME_MAX: usize = 31;

const FORBIDDEN_SHEET_CHARS: [char; 7] = ['[', ']', ':', '*', '?', '/', '\\'];

pub fn write_csv(
    path: &Path,
    header: &[&str],
    rows: &[Vec<String>],
) -> Result<(), Box<dyn Error>> {
    let mut wtr = WriterBuilder::new().from_path(path)?;

    wtr.write_record(header)?;
    for row in rows {
        wtr.write_record(row)?;
    }
    wtr.flush()?;

    Ok(())
}

/// Reload a CSV as raw text rows, header included. No type inference:
/// instance ids and addresses stay exactly as written.
pub fn read_csv_rows(path: &Path) -> Result<Vec<Vec<String>>, Box<dyn Error>> {
    let mut rdr = ReaderBuilder::new().has_headers(false).from_path(path)?;

    let mut rows = Vec::new();
    for record in rdr.records() {
        let record = record?;
        rows.push(record.iter().map(|field| field.to_string()).collect());
    }

    Ok(rows)
}

/// Write the report rows (header first) into a workbook: one sheet per
/// distinct profile plus a consolidated sheet, every cell text-wrapped and
/// text-formatted, column widths auto-fitted per sheet.
pub fn write_workbook(
    path: &Path,
    rows: &[Vec<String>],
    profile_column: usize,
) -> Result<(), Box<dyn Error>> {
    let (header, data) = rows
        .split_first()
        .ok_or("Cannot build a workbook from an empty CSV")?;

    let mut workbook = Workbook::new();
    let cell_format = Format::new().set_text_wrap().set_num_format("@");

    let mut used_names: Vec<String> = Vec::new();
    for (profile, group) in group_by_profile(data, profile_column) {
        let name = sheet_name(&profile, &used_names);
        let sheet = workbook.add_worksheet();
        sheet.set_name(&name)?;
        write_sheet(sheet, header, &group, &cell_format)?;
        used_names.push(name);
    }

    let all_rows: Vec<&Vec<String>> = data.iter().collect();
    let all_sheet = workbook.add_worksheet();
    all_sheet.set_name(sheet_name(ALL_PROFILES_SHEET, &used_names))?;
    write_sheet(all_sheet, header, &all_rows, &cell_format)?;

    workbook.save(path)?;
    Ok(())
}

/// Partition rows by the value of the profile column, preserving first-seen
/// profile order and row order within each group.
pub fn group_by_profile<'a>(
    rows: &'a [Vec<String>],
    profile_column: usize,
) -> Vec<(String, Vec<&'a Vec<String>>)> {
    let mut groups: Vec<(String, Vec<&Vec<String>>)> = Vec::new();

    for row in rows {
        let profile = row.get(profile_column).cloned().unwrap_or_default();
        match groups.iter_mut().find(|(name, _)| *name == profile) {
            Some((_, group)) => group.push(row),
            None => groups.push((profile, vec![row])),
        }
    }

    groups
}

fn write_sheet(
    sheet: &mut Worksheet,
    header: &[String],
    rows: &[&Vec<String>],
    format: &Format,
) -> Result<(), XlsxError> {
    for (col, value) in header.iter().enumerate() {
        sheet.write_string_with_format(0, col as u16, value, format)?;
    }

    for (r, row) in rows.iter().enumerate() {
        for (c, value) in row.iter().enumerate() {
            sheet.write_string_with_format((r + 1) as u32, c as u16, value, format)?;
        }
    }

    for (col, width) in column_widths(header, rows).iter().enumerate() {
        sheet.set_column_width(col as u16, *width as f64)?;
    }

    Ok(())
}

/// Per-column display width: longest cell in the column, header included,
/// plus a fixed padding of 2.
pub fn column_widths(header: &[String], rows: &[&Vec<String>]) -> Vec<usize> {
    let mut widths: Vec<usize> = header.iter().map(|h| h.chars().count()).collect();

    for row in rows {
        for (c, value) in row.iter().enumerate() {
            if c >= widths.len() {
                widths.resize(c + 1, 0);
            }
            widths[c] = widths[c].max(value.chars().count());
        }
    }

    widths.iter().map(|w| w + COLUMN_PADDING).collect()
}

/// Make a profile name usable as a sheet name: replace forbidden characters,
/// truncate to the 31-char cap, and resolve collisions (sheet names compare
/// case-insensitively) with a ~N suffix.
pub fn sheet_name(profile: &str, used: &[String]) -> String {
    let mut name: String = profile
        .chars()
        .map(|c| {
            if FORBIDDEN_SHEET_CHARS.contains(&c) {
                '_'
            } else {
                c
            }
        })
        .take(SHEET_NAME_MAX)
        .collect();

    if name.is_empty() {
        name = "Sheet".to_string();
    }

    let collides =
        |candidate: &str, used: &[String]| used.iter().any(|u| u.eq_ignore_ascii_case(candidate));

    if !collides(&name, used) {
        return name;
    }

    let mut n = 2;
    loop {
        let suffix = format!("~{}", n);
        let base: String = name
            .chars()
            .take(SHEET_NAME_MAX - suffix.chars().count())
            .collect();
        let candidate = format!("{}{}", base, suffix);
        if !collides(&candidate, used) {
            return candidate;
        }
        n += 1;
    }
}
