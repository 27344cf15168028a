//! Text rendering of a [`MappingReport`]

use super::{CompleteReport, MappingReport, PreviewRow};
use std::fmt::Write;

/// Render the report as the human-readable text printed on stdout
///
/// Status lines are prefixed: `✓` success, `⚠` empty or anomalous.
pub fn render_report(report: &MappingReport) -> String {
    match report {
        MappingReport::NoMappingData => "⚠ Mapping table is empty: no mapping data\n".to_string(),
        MappingReport::Complete(report) => render_complete(report),
    }
}

fn render_complete(report: &CompleteReport) -> String {
    // Writing to a String cannot fail
    let mut out = String::new();

    let _ = writeln!(
        out,
        "✓ Mapping table has {} rows ({} valid)",
        report.mapping_rows, report.valid_mappings
    );

    let _ = writeln!(out, "\nFirst {} rows:", report.preview.len());
    for (i, row) in report.preview.iter().enumerate() {
        match row {
            PreviewRow::Valid(m) => {
                let _ = writeln!(out, "   {}. ID: {}", i + 1, m.id);
                let _ = writeln!(out, "      Chapter: {}", m.chapter);
                let _ = writeln!(out, "      Combination: {}", m.combination);
                let _ = writeln!(out, "      Poem title: {}", m.poem_title);
                let _ = writeln!(out, "      Universe: {}", m.universe_id);
            }
            PreviewRow::Malformed(bad) => {
                let _ = writeln!(
                    out,
                    "   {}. ID: {} (malformed, missing {})",
                    i + 1,
                    bad.id.as_deref().unwrap_or("<no id>"),
                    bad.missing_fields.join(", ")
                );
            }
        }
        out.push('\n');
    }

    let _ = writeln!(out, "Chapter statistics:");
    for group in &report.chapters {
        let _ = writeln!(out, "   - {}: {}", group.key, group.count);
    }

    let _ = writeln!(out, "\nUniverse statistics:");
    for group in &report.universes {
        let _ = writeln!(out, "   - {}: {}", group.key, group.count);
    }

    let poems = &report.poems;
    let _ = writeln!(
        out,
        "\nPoem table has {} rows ({} without body)",
        poems.total, poems.without_body
    );
    for (i, p) in poems.sample.iter().enumerate() {
        let _ = writeln!(out, "   {}. ID: {}", i + 1, p.id);
        let _ = writeln!(out, "      Title: {}", p.title);
        let _ = writeln!(out, "      Body: {} (length {})", p.body, p.body_length);
        if let Some(preview) = &p.preview {
            let _ = writeln!(out, "      Preview: {}...", preview);
        }
    }

    if report.anomalies.is_empty() {
        let _ = writeln!(out, "\n✓ No anomalies");
    } else {
        let _ = writeln!(out, "\n⚠ {} anomalies:", report.anomalies.len());
        for anomaly in &report.anomalies {
            let _ = writeln!(out, "   - {}", anomaly);
        }
    }

    out
}
