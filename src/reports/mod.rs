use comfy_table::presets::ASCII_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use m209::attack::AttackSummary;
use m209::key::Key;
use m209::machine::{BARS, WHEELS};
use m209::reporter::BestEntry;
use m209::rules::{LugCountSequence, LugRules};

const PLAINTEXT_PREVIEW: usize = 80;

pub fn print_summary(summary: &AttackSummary) {
    let secs = summary.elapsed.as_secs_f64();
    let rate = if secs > 0.0 {
        summary.evaluations as f64 / secs / 1000.0
    } else {
        0.0
    };
    println!("\n=== 🏆 {} ATTACK ===", summary.mode.to_string().to_uppercase());
    println!(
        "Workers: {} | Evaluations: {} | {:.1}s | {:.0}K/s{}",
        summary.workers,
        summary.evaluations,
        secs,
        rate,
        if summary.success { " | ✅ key found" } else { "" }
    );
}

pub fn print_best_list(entries: &[BestEntry]) {
    if entries.is_empty() {
        println!("No candidate keys were reported.");
        return;
    }

    let mut table = Table::new();
    table
        .load_preset(ASCII_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table.add_row(vec![
        Cell::new("#").add_attribute(Attribute::Bold),
        Cell::new("Score").fg(Color::Cyan),
        Cell::new("Found by"),
        Cell::new("Plaintext"),
    ]);
    if let Some(col) = table.column_mut(1) {
        col.set_cell_alignment(CellAlignment::Right);
    }

    for (rank, e) in entries.iter().enumerate() {
        let preview: String = e.plaintext.chars().take(PLAINTEXT_PREVIEW).collect();
        table.add_row(vec![
            Cell::new(rank + 1),
            Cell::new(e.score).fg(Color::Cyan),
            Cell::new(&e.comment),
            Cell::new(preview),
        ]);
    }
    println!("\n{}", table);

    if let Some(top) = entries.first() {
        println!("Best key: {}", top.key);
    }
}

/// Lugs on one line, then one row per wheel with the active pin letters.
pub fn print_key(name: &str, key: &Key) {
    println!("\nKey: {}", name);
    println!("Lugs: {}", key.lugs_string());
    println!("Slide: {}", key.slide());

    let indicator = key.pins().indicator();
    let ones = key.pins().absolute_01_strings();
    let letters = key.pins_strings();

    let mut table = Table::new();
    table.load_preset(ASCII_FULL);
    table.add_row(vec![
        Cell::new("Wheel").add_attribute(Attribute::Bold),
        Cell::new("Ind"),
        Cell::new("Active pins"),
        Cell::new("Pattern"),
    ]);
    for w in 0..WHEELS {
        table.add_row(vec![
            Cell::new(w + 1).set_alignment(CellAlignment::Center),
            Cell::new(indicator.chars().nth(w).unwrap_or('?')).set_alignment(CellAlignment::Center),
            Cell::new(&letters[w]).fg(Color::Green),
            Cell::new(format!("{:<26}", ones[w])),
        ]);
    }
    println!("{}", table);
}

pub fn print_sequences(rules: &LugRules, sequences: &[LugCountSequence]) {
    let config = rules.config();
    println!(
        "\n{} lug-count sequences for {} (overlaps {}..={})",
        sequences.len(),
        config.version,
        config.min_overlap,
        config.max_overlap
    );
    if sequences.is_empty() {
        println!("This rule set accepts any lug counts adding up to {} bars.", BARS);
        return;
    }

    let mut table = Table::new();
    table
        .load_preset(ASCII_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);

    let mut header = vec![Cell::new("#").add_attribute(Attribute::Bold)];
    header.extend((0..WHEELS).map(|w| Cell::new(format!("W{}", w + 1))));
    header.push(Cell::new("Sum").fg(Color::Cyan));
    header.push(Cell::new("Overlaps").fg(Color::Yellow));
    table.add_row(header);
    for i in 1..=WHEELS + 2 {
        if let Some(col) = table.column_mut(i) {
            col.set_cell_alignment(CellAlignment::Right);
        }
    }

    for (i, seq) in sequences.iter().enumerate() {
        let sum: usize = seq.iter().map(|&c| c as usize).sum();
        let overlaps = sum.saturating_sub(BARS);
        let mut row = vec![Cell::new(i + 1)];
        row.extend(seq.iter().map(|&c| Cell::new(c)));
        row.push(Cell::new(sum).fg(Color::Cyan));
        row.push(Cell::new(overlaps).fg(Color::Yellow));
        table.add_row(row);
    }
    println!("{}", table);
}
