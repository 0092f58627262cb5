//! Per-tick collision and scoring checks.
//!
//! Both passes only read the pipe sequence (scoring flips `passed` flags in
//! place); pruning happens earlier in the tick so neither pass ever sees a
//! sequence that is being shrunk underneath it.

use crate::geometry::Rect;
use crate::pipe::Pipe;

/// What ended a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Crash {
    Pipe,
    Floor,
}

/// Returns the cause of a crash, if any. Pipe contact and reaching the floor
/// are independent conditions; the first one found is reported.
pub fn detect_crash(player: &Rect, pipes: &[Pipe], floor: f64) -> Option<Crash> {
    let hit_pipe = pipes
        .iter()
        .any(|pipe| pipe.segments().iter().any(|seg| player.intersects(seg)));
    if hit_pipe {
        Some(Crash::Pipe)
    } else if player.bottom() >= floor {
        Some(Crash::Floor)
    } else {
        None
    }
}

/// Marks every pipe whose right edge is now left of the player as passed and
/// returns how many were newly passed this call.
pub fn award_passes(player: &Rect, pipes: &mut [Pipe]) -> u32 {
    let mut gained = 0;
    for pipe in pipes.iter_mut().filter(|p| !p.passed) {
        if pipe.right() < player.left() {
            pipe.passed = true;
            gained += 1;
        }
    }
    gained
}
