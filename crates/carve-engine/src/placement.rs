//! Placement strategy scans over the free-block candidates.
//!
//! Each strategy takes the free spans in offset order and the requested
//! size, and returns the chosen span or `None` when no block fits.
//! Selection never mutates anything — the engine applies the carve
//! afterwards.

use carve_core::PlacementStrategy;

use crate::blocks::FreeSpan;

/// Select a free span for `requested` units under `strategy`.
///
/// `cursor` is the next-fit resume point: the offset just past the
/// previous successful allocation. Only next-fit reads it; the other
/// strategies scan the whole list every time.
pub fn choose(
    strategy: PlacementStrategy,
    spans: &[FreeSpan],
    requested: u32,
    cursor: Option<u32>,
) -> Option<FreeSpan> {
    match strategy {
        PlacementStrategy::FirstFit => first_fit(spans, requested),
        PlacementStrategy::BestFit => best_fit(spans, requested),
        PlacementStrategy::WorstFit => worst_fit(spans, requested),
        PlacementStrategy::NextFit => next_fit(spans, requested, cursor),
    }
}

/// First span with sufficient size, in offset order.
fn first_fit(spans: &[FreeSpan], requested: u32) -> Option<FreeSpan> {
    spans.iter().find(|span| span.size >= requested).copied()
}

/// Span minimizing leftover space. Strict `<` keeps the lowest offset
/// among equal minima, since spans arrive in offset order.
fn best_fit(spans: &[FreeSpan], requested: u32) -> Option<FreeSpan> {
    let mut best: Option<FreeSpan> = None;
    for span in spans.iter().filter(|s| s.size >= requested) {
        match best {
            Some(b) if span.size >= b.size => {}
            _ => best = Some(*span),
        }
    }
    best
}

/// Span maximizing leftover space. Strict `>` keeps the lowest offset
/// among equal maxima.
fn worst_fit(spans: &[FreeSpan], requested: u32) -> Option<FreeSpan> {
    let mut worst: Option<FreeSpan> = None;
    for span in spans.iter().filter(|s| s.size >= requested) {
        match worst {
            Some(w) if span.size <= w.size => {}
            _ => worst = Some(*span),
        }
    }
    worst
}

/// First-fit resuming from `cursor`, wrapping around the arena.
///
/// Blocks at or past the cursor are scanned first; if none fits, the
/// scan wraps to the start of the arena. The resume point is tracked at
/// block granularity: a free block that merely straddles the cursor is
/// considered on the wrapped pass.
fn next_fit(spans: &[FreeSpan], requested: u32, cursor: Option<u32>) -> Option<FreeSpan> {
    let Some(cursor) = cursor else {
        return first_fit(spans, requested);
    };
    let tail = spans
        .iter()
        .filter(|span| span.offset >= cursor)
        .find(|span| span.size >= requested);
    match tail {
        Some(span) => Some(*span),
        None => first_fit(spans, requested),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn span(index: usize, offset: u32, size: u32) -> FreeSpan {
        FreeSpan {
            index,
            offset,
            size,
        }
    }

    // Free layout used across the strategy tests:
    //   [100 @0] [200 @110] [50 @320] [300 @380] [374 @690]
    fn mixed_spans() -> Vec<FreeSpan> {
        vec![
            span(0, 0, 100),
            span(2, 110, 200),
            span(4, 320, 50),
            span(6, 380, 300),
            span(8, 690, 374),
        ]
    }

    #[test]
    fn first_fit_takes_the_first_that_fits() {
        let chosen = choose(PlacementStrategy::FirstFit, &mixed_spans(), 60, None).unwrap();
        assert_eq!(chosen.size, 100);
        let chosen = choose(PlacementStrategy::FirstFit, &mixed_spans(), 150, None).unwrap();
        assert_eq!(chosen.size, 200);
    }

    #[test]
    fn best_fit_minimizes_leftover() {
        let chosen = choose(PlacementStrategy::BestFit, &mixed_spans(), 60, None).unwrap();
        assert_eq!(chosen.size, 100);
        let chosen = choose(PlacementStrategy::BestFit, &mixed_spans(), 40, None).unwrap();
        assert_eq!(chosen.size, 50);
    }

    #[test]
    fn best_fit_breaks_ties_toward_lowest_offset() {
        let spans = vec![span(0, 0, 80), span(2, 100, 80)];
        let chosen = choose(PlacementStrategy::BestFit, &spans, 60, None).unwrap();
        assert_eq!(chosen.offset, 0);
    }

    #[test]
    fn worst_fit_maximizes_leftover() {
        let chosen = choose(PlacementStrategy::WorstFit, &mixed_spans(), 60, None).unwrap();
        assert_eq!(chosen.size, 374);
    }

    #[test]
    fn worst_fit_breaks_ties_toward_lowest_offset() {
        let spans = vec![span(0, 0, 300), span(2, 400, 300)];
        let chosen = choose(PlacementStrategy::WorstFit, &spans, 10, None).unwrap();
        assert_eq!(chosen.offset, 0);
    }

    #[test]
    fn next_fit_resumes_from_cursor() {
        // Cursor past the 100-block: the 50-block is too small, so the
        // 300-block at offset 380 wins.
        let chosen = choose(PlacementStrategy::NextFit, &mixed_spans(), 60, Some(150)).unwrap();
        assert_eq!(chosen.offset, 380);
        assert_eq!(chosen.size, 300);
    }

    #[test]
    fn next_fit_wraps_when_tail_has_no_fit() {
        let chosen = choose(PlacementStrategy::NextFit, &mixed_spans(), 90, Some(700)).unwrap();
        assert_eq!(chosen.offset, 0);
        assert_eq!(chosen.size, 100);
    }

    #[test]
    fn next_fit_without_cursor_is_first_fit() {
        let chosen = choose(PlacementStrategy::NextFit, &mixed_spans(), 60, None).unwrap();
        assert_eq!(chosen.size, 100);
    }

    #[test]
    fn no_strategy_finds_an_oversized_fit() {
        for strategy in PlacementStrategy::ALL {
            assert!(choose(strategy, &mixed_spans(), 400, Some(0)).is_none());
        }
    }
}
