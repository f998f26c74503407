use colored::Colorize;

use sd_mechanics::{DiceRoll, RollMode, SeededRandom};

pub fn run(
    expr: &str,
    advantage: bool,
    disadvantage: bool,
    seed: Option<u64>,
) -> Result<(), String> {
    let mode = if advantage {
        RollMode::Advantage
    } else if disadvantage {
        RollMode::Disadvantage
    } else {
        RollMode::Normal
    };
    let roll = DiceRoll::parse(expr)
        .map_err(|e| e.to_string())?
        .with_mode(mode);

    let seed = seed.unwrap_or_else(SeededRandom::random_seed);
    let mut source = SeededRandom::new(seed);
    let result = roll.roll(&mut source);

    let label = match mode {
        RollMode::Normal => String::new(),
        RollMode::Advantage => " with advantage".to_string(),
        RollMode::Disadvantage => " with disadvantage".to_string(),
    };
    println!("  {}{label}: {result}", roll.to_string().bold());
    if !result.discarded.is_empty() {
        let dropped: Vec<String> = result.discarded.iter().map(|v| v.to_string()).collect();
        println!("  {}", format!("discarded [{}]", dropped.join(", ")).dimmed());
    }
    println!(
        "  {} {}",
        format!("Total: {}", result.total()).green().bold(),
        format!("(seed={seed})").dimmed()
    );
    Ok(())
}

