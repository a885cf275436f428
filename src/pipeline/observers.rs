//! Observer implementations for game sessions and experiments

use std::{
    fs::File,
    io::{BufWriter, Write},
    path::Path,
};

use indicatif::{ProgressBar, ProgressStyle};
use serde::{Deserialize, Serialize};

use crate::{
    Error, Result,
    game::{Diagnostic, History, Increment, Rules},
    ports::Observer,
    types::Round,
};

/// Progress bar over games in an experiment, or over rounds when watching a
/// single game.
pub struct ProgressObserver {
    progress_bar: Option<ProgressBar>,
    per_round: bool,
    invalid_actions: usize,
}

impl ProgressObserver {
    pub fn new() -> Self {
        Self {
            progress_bar: None,
            per_round: false,
            invalid_actions: 0,
        }
    }

    fn bar(len: usize, unit: &str) -> Result<ProgressBar> {
        let pb = ProgressBar::new(len as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template(&format!(
                    "[{{elapsed_precise}}] {{bar:40.cyan/blue}} {{pos}}/{{len}} {unit} ({{msg}})"
                ))
                .map_err(|e| Error::ProgressBarTemplate {
                    message: e.to_string(),
                })?
                .progress_chars("=>-"),
        );
        Ok(pb)
    }
}

impl Default for ProgressObserver {
    fn default() -> Self {
        Self::new()
    }
}

impl Observer for ProgressObserver {
    fn on_experiment_start(&mut self, total_games: usize) -> Result<()> {
        self.progress_bar = Some(Self::bar(total_games, "games")?);
        self.per_round = false;
        Ok(())
    }

    fn on_game_start(&mut self, _game_num: usize, rules: &Rules, _seed: &Increment) -> Result<()> {
        if self.progress_bar.is_none() {
            self.progress_bar = Some(Self::bar(rules.nb_time_steps, "rounds")?);
            self.per_round = true;
        }
        Ok(())
    }

    fn on_invalid_action(
        &mut self,
        _game_num: usize,
        _round: Round,
        _diagnostic: &Diagnostic,
    ) -> Result<()> {
        self.invalid_actions += 1;
        Ok(())
    }

    fn on_round(&mut self, _game_num: usize, increment: &Increment) -> Result<()> {
        if self.per_round
            && let Some(pb) = &self.progress_bar
        {
            pb.set_position(increment.round as u64);
            pb.set_message(format!("edges: {}", increment.graph.edge_count()));
        }
        Ok(())
    }

    fn on_game_end(&mut self, game_num: usize, _history: &History) -> Result<()> {
        if let Some(pb) = &self.progress_bar {
            if self.per_round {
                pb.finish_with_message(format!("invalid: {}", self.invalid_actions));
            } else {
                pb.set_position(game_num as u64 + 1);
                pb.set_message(format!("invalid: {}", self.invalid_actions));
            }
        }
        Ok(())
    }

    fn on_experiment_end(&mut self) -> Result<()> {
        if let Some(pb) = &self.progress_bar {
            pb.finish_with_message(format!("invalid: {}", self.invalid_actions));
        }
        Ok(())
    }
}

/// Metrics observer - edge counts per round and invalid actions.
#[derive(Debug, Default)]
pub struct MetricsObserver {
    total_games: usize,
    invalid_actions: usize,
    /// Edge counts of every round of every game, round 0 included.
    edge_counts: Vec<Vec<usize>>,
}

/// Summary of what a [`MetricsObserver`] saw.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricsSummary {
    pub total_games: usize,
    pub total_rounds: usize,
    pub invalid_actions: usize,
    pub mean_final_edge_count: f64,
    pub max_edge_count: usize,
}

impl MetricsObserver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn edge_counts(&self) -> &[Vec<usize>] {
        &self.edge_counts
    }

    pub fn invalid_actions(&self) -> usize {
        self.invalid_actions
    }

    pub fn mean_final_edge_count(&self) -> f64 {
        let finals: Vec<usize> = self
            .edge_counts
            .iter()
            .filter_map(|game| game.last().copied())
            .collect();
        if finals.is_empty() {
            0.0
        } else {
            finals.iter().sum::<usize>() as f64 / finals.len() as f64
        }
    }

    pub fn summary(&self) -> MetricsSummary {
        MetricsSummary {
            total_games: self.total_games,
            total_rounds: self
                .edge_counts
                .iter()
                .map(|game| game.len().saturating_sub(1))
                .sum(),
            invalid_actions: self.invalid_actions,
            mean_final_edge_count: self.mean_final_edge_count(),
            max_edge_count: self.edge_counts.iter().flatten().copied().max().unwrap_or(0),
        }
    }
}

impl Observer for MetricsObserver {
    fn on_game_start(&mut self, _game_num: usize, _rules: &Rules, seed: &Increment) -> Result<()> {
        self.edge_counts.push(vec![seed.graph.edge_count()]);
        Ok(())
    }

    fn on_invalid_action(
        &mut self,
        _game_num: usize,
        _round: Round,
        _diagnostic: &Diagnostic,
    ) -> Result<()> {
        self.invalid_actions += 1;
        Ok(())
    }

    fn on_round(&mut self, _game_num: usize, increment: &Increment) -> Result<()> {
        if let Some(game) = self.edge_counts.last_mut() {
            game.push(increment.graph.edge_count());
        }
        Ok(())
    }

    fn on_game_end(&mut self, _game_num: usize, _history: &History) -> Result<()> {
        self.total_games += 1;
        Ok(())
    }
}

/// One line of a [`JsonlObserver`] export.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoundObservation {
    pub game_num: usize,
    pub increment: Increment,
}

/// JSONL observer - writes every increment, round 0 included, as one JSON
/// object per line.
pub struct JsonlObserver {
    writer: BufWriter<File>,
}

impl JsonlObserver {
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::create(path)?;
        Ok(Self {
            writer: BufWriter::new(file),
        })
    }

    fn write(&mut self, game_num: usize, increment: &Increment) -> Result<()> {
        let observation = RoundObservation {
            game_num,
            increment: increment.clone(),
        };
        serde_json::to_writer(&mut self.writer, &observation)?;
        writeln!(&mut self.writer)?;
        Ok(())
    }
}

impl Observer for JsonlObserver {
    fn on_game_start(&mut self, game_num: usize, _rules: &Rules, seed: &Increment) -> Result<()> {
        self.write(game_num, seed)
    }

    fn on_round(&mut self, game_num: usize, increment: &Increment) -> Result<()> {
        self.write(game_num, increment)
    }

    fn on_game_end(&mut self, _game_num: usize, _history: &History) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::io::{BufRead, BufReader};

    use tempfile::TempDir;

    use super::*;
    use crate::{game::Game, pipeline::GameSession};

    fn played_with(observer: &mut dyn Observer) -> Game {
        let mut game = Game::new(Rules::new(4, 3)).unwrap().with_seed(4);
        GameSession::new()
            .with_observer(observer)
            .play(&mut game)
            .unwrap();
        game
    }

    #[test]
    fn test_metrics_observer() {
        let mut observer = MetricsObserver::new();
        assert_eq!(observer.mean_final_edge_count(), 0.0);

        played_with(&mut observer);
        let summary = observer.summary();
        assert_eq!(summary.total_games, 1);
        assert_eq!(summary.total_rounds, 3);
        assert_eq!(observer.edge_counts()[0], vec![0, 0, 0, 0]);
        assert_eq!(summary.invalid_actions, 0);
    }

    #[test]
    fn test_jsonl_observer_writes_every_increment() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("rounds.jsonl");
        let mut observer = JsonlObserver::new(&path).unwrap();
        let game = played_with(&mut observer);
        drop(observer);

        let lines: Vec<String> = BufReader::new(File::open(&path).unwrap())
            .lines()
            .collect::<std::io::Result<_>>()
            .unwrap();
        assert_eq!(lines.len(), game.history().len());

        let last: RoundObservation = serde_json::from_str(&lines[3]).unwrap();
        assert_eq!(last.game_num, 0);
        assert_eq!(&last.increment, game.history().latest().unwrap());
    }
}
