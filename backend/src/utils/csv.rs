use anyhow::Context;

fn needs_formula_guard(value: &str) -> bool {
    matches!(value.chars().next(), Some('=' | '+' | '-' | '@'))
}

/// Prefixes values that a spreadsheet would evaluate as a formula.
pub fn guard_cell(value: &str) -> String {
    if needs_formula_guard(value) {
        format!("'{}", value)
    } else {
        value.to_string()
    }
}

/// Renders a header row plus data rows into a CSV document.
pub fn render_csv(headers: &[&str], rows: &[Vec<String>]) -> anyhow::Result<String> {
    let mut writer = csv::WriterBuilder::new()
        .quote_style(csv::QuoteStyle::Always)
        .from_writer(Vec::new());
    writer.write_record(headers).context("write csv header")?;
    for row in rows {
        let guarded: Vec<String> = row.iter().map(|cell| guard_cell(cell)).collect();
        writer.write_record(&guarded).context("write csv row")?;
    }
    let bytes = writer.into_inner().context("flush csv writer")?;
    String::from_utf8(bytes).context("csv output is not utf-8")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_csv_quotes_and_guards_formulas() {
        let csv = render_csv(
            &["name", "note"],
            &[vec!["Alice".into(), "=SUM(A1)".into()]],
        )
        .unwrap();
        assert_eq!(csv, "\"name\",\"note\"\n\"Alice\",\"'=SUM(A1)\"\n");
    }

    #[test]
    fn render_csv_escapes_quotes() {
        let csv = render_csv(&["v"], &[vec!["say \"hi\"".into()]]).unwrap();
        assert!(csv.contains("\"say \"\"hi\"\"\""));
    }
}
