use colored::Colorize;
use comfy_table::{ContentArrangement, Table};

use sd_mechanics::{BrawlingTable, GRAPPLING, PUNCHING};

pub fn run(name: Option<&str>) -> Result<(), String> {
    let tables: Vec<&BrawlingTable> = match name.map(str::to_lowercase).as_deref() {
        None => vec![&PUNCHING, &GRAPPLING],
        Some("punching" | "punch") => vec![&PUNCHING],
        Some("grappling" | "grapple") => vec![&GRAPPLING],
        Some(other) => {
            return Err(format!(
                "unknown table '{other}' (expected punching or grappling)"
            ));
        }
    };

    for t in tables {
        print_table(t);
    }
    Ok(())
}

fn print_table(t: &BrawlingTable) {
    println!("  {}", t.name().to_uppercase().bold().underline());
    println!();

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Roll", "Result", "Damage", "Location", "Next Roll"]);
    for (roll, row) in t.rows() {
        let modifier = match row.next_round_modifier {
            0 => "-".to_string(),
            m if m > 0 => format!("+{m}"),
            m => m.to_string(),
        };
        table.add_row(vec![
            roll.to_string(),
            row.descriptor.to_string(),
            row.damage.to_string(),
            row.location.to_string(),
            modifier,
        ]);
    }

    for line in table.to_string().lines() {
        println!("  {line}");
    }
    println!();
}
