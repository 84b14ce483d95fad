//! Markdown report: one table per origin, sorted by path then method.

use std::fmt::Write;

use crate::record::{ApiRecord, Origin};
use crate::scan::ScanReport;

struct Section {
    origin: Origin,
    title: &'static str,
    empty: &'static str,
}

const SECTIONS: &[Section] = &[
    Section {
        origin: Origin::SpecDeclaration,
        title: "Spec declarations",
        empty: "_No spec declarations found._",
    },
    Section {
        origin: Origin::ServerEndpoint,
        title: "Backend endpoints",
        empty: "_No backend endpoints found._",
    },
    Section {
        origin: Origin::ClientCall,
        title: "Frontend calls",
        empty: "_No frontend calls found._",
    },
];

pub fn render_markdown(report: &ScanReport) -> String {
    let mut out = String::new();
    // Writing into a String cannot fail.
    let _ = write_report(&mut out, report);
    out
}

fn write_report(out: &mut String, report: &ScanReport) -> std::fmt::Result {
    writeln!(out, "# API Inventory")?;
    writeln!(out)?;
    writeln!(out, "Root: `{}`", report.root.display())?;
    writeln!(out)?;
    writeln!(out, "| Category | Count |")?;
    writeln!(out, "|---|---|")?;
    for section in SECTIONS {
        let count = report.records.iter().filter(|r| r.origin == section.origin).count();
        writeln!(out, "| {} | {} |", section.title, count)?;
    }
    writeln!(out, "| **Total** | {} |", report.records.len())?;

    for section in SECTIONS {
        let mut rows: Vec<&ApiRecord> =
            report.records.iter().filter(|r| r.origin == section.origin).collect();
        rows.sort_by(|a, b| (a.path.as_str(), a.method.as_str()).cmp(&(b.path.as_str(), b.method.as_str())));

        writeln!(out)?;
        writeln!(out, "## {} ({})", section.title, rows.len())?;
        writeln!(out)?;
        if rows.is_empty() {
            writeln!(out, "{}", section.empty)?;
            continue;
        }
        write_table(out, section.origin, &rows)?;
    }

    let s = &report.stats;
    writeln!(out)?;
    writeln!(out, "---")?;
    writeln!(
        out,
        "_Scanned {} files ({} visited, {} skipped, {} unreadable, {} directories pruned, {} duplicates removed) in {} ms._",
        s.files_scanned, s.files_visited, s.files_skipped, s.read_errors, s.dirs_pruned, s.duplicates_removed, s.elapsed_ms
    )
}

fn write_table(out: &mut String, origin: Origin, rows: &[&ApiRecord]) -> std::fmt::Result {
    match origin {
        Origin::SpecDeclaration => {
            writeln!(out, "| Method | Path | Library | Source | Description |")?;
            writeln!(out, "|---|---|---|---|---|")?;
            for r in rows {
                writeln!(
                    out,
                    "| {} | `{}` | {} | `{}` | {} |",
                    r.method,
                    cell(&r.path),
                    r.library,
                    cell(&r.source_file),
                    cell(r.description.as_deref().unwrap_or(""))
                )?;
            }
        }
        Origin::ServerEndpoint => {
            writeln!(out, "| Method | Path | Library | Source |")?;
            writeln!(out, "|---|---|---|---|")?;
            for r in rows {
                writeln!(
                    out,
                    "| {} | `{}` | {} | `{}:{}` |",
                    r.method,
                    cell(&r.path),
                    r.library,
                    cell(&r.source_file),
                    r.source_line
                )?;
            }
        }
        Origin::ClientCall => {
            writeln!(out, "| Method | Path | Library | Alias | Source |")?;
            writeln!(out, "|---|---|---|---|---|")?;
            for r in rows {
                writeln!(
                    out,
                    "| {} | `{}` | {} | {} | `{}:{}` |",
                    r.method,
                    cell(&r.path),
                    r.library,
                    r.instance_alias.as_deref().map(cell).unwrap_or_default(),
                    cell(&r.source_file),
                    r.source_line
                )?;
            }
        }
    }
    Ok(())
}

fn cell(text: &str) -> String {
    text.replace('|', "\\|").replace('\n', " ")
}
