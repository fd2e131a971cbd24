use maiden_analysis::payload::{Cell, TablePayload};

fn cell_text(cell: &Cell) -> String {
    match cell {
        Cell::Bool(value) => if *value { "yes" } else { "no" }.to_owned(),
        Cell::Int(value) => value.to_string(),
        Cell::Float(value) => format!("{value:.2}"),
        Cell::Text(value) => value.clone(),
    }
}

/// Renders a chart payload as an aligned text table.
pub(crate) fn render_table(payload: &TablePayload) -> String {
    let mut widths = payload
        .columns()
        .iter()
        .map(String::len)
        .collect::<Vec<_>>();
    let rows = payload
        .rows()
        .iter()
        .map(|row| row.iter().map(cell_text).collect::<Vec<_>>())
        .collect::<Vec<_>>();
    for row in &rows {
        for (width, text) in widths.iter_mut().zip(row) {
            *width = (*width).max(text.len());
        }
    }

    let mut out = String::new();
    let push_line = |out: &mut String, texts: &[String]| {
        let line = texts
            .iter()
            .zip(&widths)
            .map(|(text, &width)| format!("{text:<width$}"))
            .collect::<Vec<_>>()
            .join("  ");
        out.push_str(line.trim_end());
        out.push('\n');
    };

    push_line(&mut out, payload.columns());
    let separator = widths
        .iter()
        .map(|width| "-".repeat(*width))
        .collect::<Vec<_>>()
        .join("  ");
    out.push_str(&separator);
    out.push('\n');
    for row in &rows {
        push_line(&mut out, row);
    }
    out
}
