use std::io::{BufRead, Write};

use animatch_core::*;
use anyhow::{Context, Result};

use crate::args::{SwapCommand, parse_direction};

/// A board plus the animator and frame step that drive its swaps.
pub struct Session {
    board: Board,
    animator: LinearAnimator,
    dt: f32,
    json: bool,
}

impl Session {
    pub fn new(board: Board, dt: f32, json: bool) -> Self {
        let animator = LinearAnimator::new(board.config().swap_speed);
        Self {
            board,
            animator,
            dt,
            json,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Requests one swap and ticks it to the end. Rejections are reported, not fatal.
    pub fn play(&mut self, command: SwapCommand) -> Result<Option<SwapOutcome>> {
        let request = match self.board.request_swap(command.index, command.direction) {
            Ok(request) => request,
            Err(err) => {
                log::info!("Swap {:?} rejected: {}", command, err);
                return Ok(None);
            }
        };

        let mut frames = 0u32;
        let outcome = loop {
            frames += 1;
            match self.board.tick(&mut self.animator, self.dt)? {
                SwapProgress::Committed(r) => log::debug!("Swap {:?} landed", r),
                SwapProgress::Finished(outcome) => break outcome,
                SwapProgress::Moving(_) | SwapProgress::Idle => {}
            }
        };
        log::info!(
            "Swap {} <-> {} finished after {} frames: {:?}",
            request.index,
            request.target,
            frames,
            outcome
        );
        Ok(Some(outcome))
    }

    pub fn regenerate(&mut self, seed: u64) -> Result<()> {
        self.board
            .generate_seeded(seed)
            .with_context(|| format!("could not generate board with seed {}", seed))
    }

    pub fn render(&self, out: &mut impl Write) -> Result<()> {
        if self.json {
            serde_json::to_writer(&mut *out, &self.board.tile_views()?)?;
        } else {
            write!(out, "{}", self.board)?;
        }
        writeln!(out)?;
        Ok(())
    }

    /// Line based control: `INDEX DIRECTION`, `regen SEED`, `show`, `quit`.
    pub fn run_commands(&mut self, input: impl BufRead, out: &mut impl Write) -> Result<()> {
        self.render(out)?;
        for line in input.lines() {
            let line = line?;
            let words: Vec<&str> = line.split_whitespace().collect();
            match words.as_slice() {
                [] => continue,
                ["quit"] | ["q"] => break,
                ["show"] => {}
                ["regen", seed] => match seed.parse() {
                    Ok(seed) => self.regenerate(seed)?,
                    Err(_) => {
                        writeln!(out, "bad seed {:?}", seed)?;
                        continue;
                    }
                },
                [index, direction] => {
                    let command = index
                        .parse()
                        .ok()
                        .zip(parse_direction(direction).ok())
                        .map(|(index, direction)| SwapCommand { index, direction });
                    match command {
                        Some(command) => {
                            let outcome = self.play(command)?;
                            writeln!(out, "{}", describe(outcome.as_ref()))?;
                        }
                        None => {
                            writeln!(out, "expected INDEX DIRECTION, got {:?}", line)?;
                            continue;
                        }
                    }
                }
                _ => {
                    writeln!(out, "unknown command {:?}", line)?;
                    continue;
                }
            }
            self.render(out)?;
        }
        Ok(())
    }
}

pub fn describe(outcome: Option<&SwapOutcome>) -> String {
    match outcome {
        None => "rejected".to_string(),
        Some(SwapOutcome::Reverted) => "no match, swapped back".to_string(),
        Some(SwapOutcome::Kept { runs }) => {
            let tiles: usize = runs.iter().map(Run::len).sum();
            format!("kept, {} run(s) covering {} tiles", runs.len(), tiles)
        }
    }
}
