use std::path::PathBuf;
use std::time::Duration;

use colored::Colorize;
use comfy_table::{ContentArrangement, Table};

use sd_core::Character;
use sd_mechanics::{
    AttackKind, BrawlConfig, CombatEnd, CombatSink, Encounter, GameUpdate, LogEntry, LogKind,
    SeededRandom, Side,
};

pub struct BrawlOptions {
    pub player: Option<PathBuf>,
    pub opponent: Option<PathBuf>,
    pub seed: u64,
    pub grapple: bool,
    pub opponent_first: bool,
    pub max_rounds: u32,
    pub delay_ms: u64,
    pub punch_chance: Option<f64>,
    pub json: bool,
    pub export: Option<PathBuf>,
}

/// Prints log entries as they land, unless quiet.
struct ConsoleSink {
    quiet: bool,
    printed: usize,
    character_updates: usize,
}

impl CombatSink for ConsoleSink {
    fn emit(&mut self, update: GameUpdate) {
        match update {
            GameUpdate::Character(_) => self.character_updates += 1,
            GameUpdate::CombatState(state) => {
                if !self.quiet {
                    for entry in state.round_log.iter().skip(self.printed) {
                        print_entry(entry);
                    }
                }
                self.printed = state.round_log.len();
            }
        }
    }

    fn combat_ended(&mut self, end: &CombatEnd) {
        tracing::debug!(winner = %end.winner, "combat ended");
    }
}

fn print_entry(entry: &LogEntry) {
    match entry.kind {
        LogKind::Hit => println!("  {}  {}", "HIT".red().bold(), entry.text),
        LogKind::Miss => println!("  {} {}", "MISS".dimmed(), entry.text.dimmed()),
        LogKind::Info => {
            println!("  {}", entry.text.bold());
            println!();
        }
    }
}

pub async fn run(opts: BrawlOptions) -> Result<(), String> {
    let player = match &opts.player {
        Some(path) => super::load_character(path)?,
        None => super::default_player(),
    };
    let opponent = match &opts.opponent {
        Some(path) => super::load_character(path)?,
        None => super::default_opponent(),
    };
    if player.id == opponent.id {
        return Err("player and opponent are the same character".into());
    }

    let mut config = BrawlConfig::default()
        .with_seed(opts.seed)
        .with_pacing_delay(Duration::from_millis(opts.delay_ms));
    if let Some(chance) = opts.punch_chance {
        config = config.with_punch_chance(chance);
    }

    let kind = if opts.grapple {
        AttackKind::Grapple
    } else {
        AttackKind::Punch
    };
    let initiator = if opts.opponent_first {
        Side::Opponent
    } else {
        Side::Player
    };

    if !opts.json {
        println!(
            "  {} {} vs {} {}",
            "Brawl".bold(),
            player.name.cyan(),
            opponent.name.yellow(),
            format!("(seed={}, opening with a {kind})", opts.seed).dimmed()
        );
        println!();
    }

    let sink = ConsoleSink {
        quiet: opts.json,
        printed: 0,
        character_updates: 0,
    };
    let mut encounter = Encounter::new(player, opponent, config, sink);
    let end = encounter
        .run_from(initiator, kind, opts.max_rounds)
        .await
        .map_err(|e| format!("brawl failed: {e}"))?;

    if let Some(path) = &opts.export {
        let state = encounter.state();
        let content = if path.extension().is_some_and(|ext| ext == "md") {
            state.export_markdown()
        } else {
            state.export_text()
        };
        std::fs::write(path, content)
            .map_err(|e| format!("failed to write {}: {e}", path.display()))?;
    }

    if opts.json {
        return print_json(&encounter, end.as_ref());
    }

    match &end {
        Some(end) => println!("  {}", end.summary.green().bold()),
        None => println!(
            "  {}",
            format!("No knockout after {} rounds.", opts.max_rounds).yellow()
        ),
    }
    println!();
    print_status(encounter.player(), encounter.opponent());
    println!(
        "  {}",
        format!(
            "{} log entries, {} character updates",
            encounter.state().round_log.len(),
            encounter.sink().character_updates
        )
        .dimmed()
    );
    Ok(())
}

fn print_json(
    encounter: &Encounter<SeededRandom, ConsoleSink>,
    end: Option<&CombatEnd>,
) -> Result<(), String> {
    let output = serde_json::json!({
        "winner": end.map(|e| e.winner),
        "summary": end.map(|e| e.summary.as_str()),
        "player": encounter.player(),
        "opponent": encounter.opponent(),
        "state": encounter.state(),
    });
    let json = serde_json::to_string_pretty(&output)
        .map_err(|e| format!("JSON serialization failed: {e}"))?;
    println!("{json}");
    Ok(())
}

fn print_status(player: &Character, opponent: &Character) {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Fighter", "Strength", "Wounds", "Status"]);

    for c in [player, opponent] {
        let wounds = if c.wounds.is_empty() {
            "-".to_string()
        } else {
            c.wounds
                .iter()
                .map(|w| format!("{} ({})", w.location, w.damage))
                .collect::<Vec<_>>()
                .join(", ")
        };
        let status = if c.is_unconscious {
            "out cold"
        } else {
            "standing"
        };
        table.add_row(vec![
            c.name.clone(),
            format!("{}/{}", c.current_strength(), c.attributes.base_strength),
            wounds,
            status.to_string(),
        ]);
    }

    for line in table.to_string().lines() {
        println!("  {line}");
    }
    println!();
}
