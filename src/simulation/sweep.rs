use crate::simulation::deck::{ConfigError, DeckConfig};
use crate::simulation::engine::{calculate_curve, CurveTable};
use indicatif::{ProgressBar, ProgressStyle};
use log::info;
use rayon::prelude::*;
use std::ops::RangeInclusive;

/// Curve for one land count of a sweep
#[derive(Debug, Clone)]
pub struct SweepPoint {
    pub lands: u32,
    pub table: CurveTable,
}

/// Compute the curve for every land count in `lands`, keeping the rest of
/// `base` fixed. Land counts run in parallel.
pub fn sweep_lands(
    base: &DeckConfig,
    lands: RangeInclusive<u32>,
    show_progress: bool,
) -> Result<Vec<SweepPoint>, ConfigError> {
    let configs: Vec<DeckConfig> = lands
        .map(|count| DeckConfig {
            lands: count,
            ..base.clone()
        })
        .collect();
    for config in &configs {
        config.validate()?;
    }

    let progress = if show_progress {
        let bar = ProgressBar::new(configs.len() as u64);
        if let Ok(style) = ProgressStyle::with_template("{bar:40} {pos}/{len} land counts [{elapsed}]") {
            bar.set_style(style);
        }
        bar
    } else {
        ProgressBar::hidden()
    };

    let points = configs
        .par_iter()
        .map(|config| {
            let table = calculate_curve(config)?;
            progress.inc(1);
            Ok(SweepPoint {
                lands: config.lands,
                table,
            })
        })
        .collect::<Result<Vec<_>, ConfigError>>()?;
    progress.finish_and_clear();

    info!("swept {} land counts", points.len());
    Ok(points)
}

/// The sweep point with the highest expected mana on `turn`
pub fn best_for_turn(points: &[SweepPoint], turn: u32) -> Option<&SweepPoint> {
    points.iter().max_by(|a, b| {
        a.table
            .expected_mana(turn)
            .total_cmp(&b.table.expected_mana(turn))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sweep_covers_range() {
        let base = DeckConfig::new(1, 0, vec![]).with_limits(3, 5);
        let points = sweep_lands(&base, 30..=34, false).unwrap();
        let lands: Vec<u32> = points.iter().map(|p| p.lands).collect();
        assert_eq!(lands, vec![30, 31, 32, 33, 34]);
    }

    #[test]
    fn test_more_lands_more_mana() {
        let base = DeckConfig::new(1, 0, vec![]).with_limits(4, 10);
        let points = sweep_lands(&base, 30..=40, false).unwrap();
        for pair in points.windows(2) {
            assert!(pair[1].table.expected_mana(4) > pair[0].table.expected_mana(4));
        }
        assert_eq!(best_for_turn(&points, 4).unwrap().lands, 40);
    }

    #[test]
    fn test_invalid_land_count_fails() {
        let base = DeckConfig::new(1, 0, vec![]).with_limits(3, 5);
        assert!(sweep_lands(&base, 98..=100, false).is_err());
    }
}
