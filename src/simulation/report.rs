use crate::simulation::deck::DeckConfig;
use crate::simulation::engine::CurveTable;
use crate::simulation::sweep::SweepPoint;
use chrono::Utc;
use serde::Serialize;
use std::fmt::Write;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReportError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

/// Deck summary written alongside a table
#[derive(Debug, Clone, Serialize)]
pub struct DeckSummary {
    pub deck_size: u32,
    pub commanders: u32,
    pub lands: u32,
    pub other_cards: u32,
    pub producers: Vec<String>,
}

impl From<&DeckConfig> for DeckSummary {
    fn from(config: &DeckConfig) -> Self {
        DeckSummary {
            deck_size: config.deck_size,
            commanders: config.commanders,
            lands: config.lands,
            other_cards: config.other_cards(),
            producers: config.producers.iter().map(|p| p.name.clone()).collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CurveReport<'a> {
    pub generated_at: String,
    pub deck: DeckSummary,
    pub expected_mana: Vec<f64>,
    pub table: &'a CurveTable,
}

impl<'a> CurveReport<'a> {
    pub fn new(config: &DeckConfig, table: &'a CurveTable) -> Self {
        CurveReport {
            generated_at: Utc::now().to_rfc3339(),
            deck: DeckSummary::from(config),
            expected_mana: (1..=table.max_turns())
                .map(|turn| table.expected_mana(turn))
                .collect(),
            table,
        }
    }

    pub fn write_json(&self, path: &str) -> Result<(), ReportError> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }
}

/// Percentage grid, one row per turn. The last column is "this much or more".
pub fn render_table(table: &CurveTable) -> String {
    let max_mana = table.max_mana();
    let mut out = String::new();

    let _ = write!(out, "{:<8}", "");
    for mana in 0..=max_mana {
        let header = if mana == max_mana {
            format!("Mana {}+", mana)
        } else {
            format!("Mana {}", mana)
        };
        let _ = write!(out, " {:>8}", header);
    }
    let _ = writeln!(out, " {:>8}", "Avg");
    let _ = writeln!(out, "{}", "-".repeat(8 + 9 * (max_mana as usize + 2)));

    for turn in 1..=table.max_turns() {
        let _ = write!(out, "{:<8}", format!("Turn {}", turn));
        for mana in 0..=max_mana {
            let _ = write!(out, " {:>7.2}%", table.get(turn, mana) * 100.0);
        }
        let _ = writeln!(out, " {:>8.2}", table.expected_mana(turn));
    }

    out
}

/// One line per land count: expected mana on `turn` and the chance of
/// reaching `target` mana by then.
pub fn render_sweep(points: &[SweepPoint], turn: u32, target: u32) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<6} {:>10} {:>12}",
        "Lands",
        format!("Avg T{}", turn),
        format!("P(>={})", target)
    );
    let _ = writeln!(out, "{}", "-".repeat(30));
    for point in points {
        let _ = writeln!(
            out,
            "{:<6} {:>10.3} {:>11.1}%",
            point.lands,
            point.table.expected_mana(turn),
            point.table.probability_at_least(turn, target) * 100.0
        );
    }
    out
}
