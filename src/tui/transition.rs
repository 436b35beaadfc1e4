//! Host side of drawer transitions.
//!
//! The tree component only describes transitions. This tracker remembers,
//! per drawer key, whether the drawer was mounted on the previous frame and
//! turns mount/unmount changes into timed enter/leave animations.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use ratatui::style::{Modifier, Style};
use ratatui::text::Line;

use crate::tree::{TransitionEffect, TransitionSpec};

use super::rows::{DrawerSpan, Row};

/// A row as it appears on screen.
#[derive(Debug, Clone)]
pub struct DisplayRow {
    pub line: Line<'static>,
    /// Index into the interactive rows; `None` for leaving ghosts.
    pub row: Option<usize>,
}

#[derive(Debug, Clone)]
enum Phase {
    Entering { start: Instant, spec: TransitionSpec },
    Leaving { start: Instant, spec: TransitionSpec, ghosts: Vec<Line<'static>> },
}

#[derive(Debug, Clone, Default)]
struct DrawerState {
    mounted: bool,
    phase: Option<Phase>,
    last_rows: Vec<Line<'static>>,
}

/// Tracks drawer transitions across frames.
#[derive(Debug, Default)]
pub struct TransitionTracker {
    drawers: HashMap<String, DrawerState>,
}

impl TransitionTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// True while any drawer is mid-transition.
    pub fn is_animating(&self) -> bool {
        self.drawers.values().any(|state| state.phase.is_some())
    }

    /// Record this frame's drawers and lay the rows out for display.
    pub fn layout(&mut self, rows: &[Row<'_>], drawers: &[DrawerSpan], now: Instant) -> Vec<DisplayRow> {
        self.observe(rows, drawers, now);

        let mut hidden = vec![false; rows.len()];
        let mut dimmed = vec![false; rows.len()];
        let mut ghosts: HashMap<usize, Vec<Line<'static>>> = HashMap::new();

        for span in drawers {
            let Some(state) = self.drawers.get(&span.key) else {
                continue;
            };
            match &state.phase {
                Some(Phase::Entering { start, spec }) => {
                    let progress = spec.progress(now.saturating_duration_since(*start));
                    let len = span.end - span.start;
                    match spec.effect {
                        TransitionEffect::Fade => {
                            dimmed[span.start..span.end].fill(progress < 0.5);
                        }
                        TransitionEffect::SlideDown | TransitionEffect::SlideUp => {
                            let shown = visible_count(len, progress);
                            hidden[span.start + shown..span.end].fill(true);
                        }
                    }
                }
                Some(Phase::Leaving { start, spec, ghosts: lines }) => {
                    let progress = spec.progress(now.saturating_duration_since(*start));
                    let lines: Vec<_> = match spec.effect {
                        TransitionEffect::Fade => lines.iter().map(dim).collect(),
                        TransitionEffect::SlideDown | TransitionEffect::SlideUp => {
                            let shown = visible_count(lines.len(), 1.0 - progress);
                            lines[..shown].to_vec()
                        }
                    };
                    ghosts.entry(span.start).or_default().extend(lines);
                }
                None => {}
            }
        }

        let mut display = Vec::with_capacity(rows.len());
        for (index, row) in rows.iter().enumerate() {
            if let Some(lines) = ghosts.remove(&index) {
                display.extend(lines.into_iter().map(|line| DisplayRow { line, row: None }));
            }
            if hidden[index] {
                continue;
            }
            let line = if dimmed[index] { dim(&row.line) } else { row.line.clone() };
            display.push(DisplayRow {
                line,
                row: Some(index),
            });
        }
        if let Some(lines) = ghosts.remove(&rows.len()) {
            display.extend(lines.into_iter().map(|line| DisplayRow { line, row: None }));
        }

        display
    }

    fn observe(&mut self, rows: &[Row<'_>], drawers: &[DrawerSpan], now: Instant) {
        let mut next = HashMap::with_capacity(drawers.len());

        for span in drawers {
            let current: Vec<Line<'static>> = rows[span.start..span.end]
                .iter()
                .map(|row| row.line.clone())
                .collect();

            let mut state = match self.drawers.remove(&span.key) {
                Some(mut previous) => {
                    if span.mounted && !previous.mounted {
                        previous.phase = span
                            .props
                            .enter
                            .map(|spec| Phase::Entering { start: now, spec });
                    } else if !span.mounted && previous.mounted {
                        previous.phase = span.props.leave.map(|spec| Phase::Leaving {
                            start: now,
                            spec,
                            ghosts: std::mem::take(&mut previous.last_rows),
                        });
                    }
                    previous
                }
                None => DrawerState {
                    mounted: span.mounted,
                    phase: span
                        .props
                        .enter
                        .filter(|_| span.mounted && span.props.run_on_mount)
                        .map(|spec| Phase::Entering { start: now, spec }),
                    last_rows: Vec::new(),
                },
            };

            if phase_finished(&state.phase, now) {
                state.phase = None;
            }
            state.mounted = span.mounted;
            if span.mounted {
                state.last_rows = current;
            }
            next.insert(span.key.clone(), state);
        }

        // Drawers that were not rendered this frame are forgotten.
        self.drawers = next;
    }
}

fn phase_finished(phase: &Option<Phase>, now: Instant) -> bool {
    let (start, duration) = match phase {
        Some(Phase::Entering { start, spec }) | Some(Phase::Leaving { start, spec, .. }) => {
            (*start, spec.duration)
        }
        None => return false,
    };
    now.saturating_duration_since(start) >= duration.max(Duration::from_millis(1))
}

fn visible_count(len: usize, progress: f32) -> usize {
    ((len as f32 * progress.clamp(0.0, 1.0)).ceil() as usize).min(len)
}

fn dim(line: &Line<'static>) -> Line<'static> {
    line.clone()
        .patch_style(Style::default().add_modifier(Modifier::DIM))
}
