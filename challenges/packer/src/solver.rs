use log::debug;

use crate::board::CostBoard;
use crate::item::{Instance, Item};
use crate::selection::Selection;

/// Pick the most valuable set of items that fits in the instance's capacity. Among equally
/// valuable sets the lightest one wins.
///
/// Items are considered lightest first (stable on equal weights, so input order breaks ties),
/// the board is built for this call only and dropped before returning.
pub fn solve(instance: &Instance) -> Selection {
    if instance.is_degenerate() {
        return Selection::empty();
    }

    let mut sorted: Vec<&Item> = instance.items.iter().collect();
    sorted.sort_by(|a, b| a.weight.total_cmp(&b.weight));

    let mut board = CostBoard::new(&sorted, instance.capacity);
    let best = board.best();
    let picked = board.back_trace();

    debug!(
        "solved capacity={} items={} cost={} weight={} cells={}",
        instance.capacity,
        sorted.len(),
        best.cost,
        best.weight,
        board.evaluations()
    );

    Selection::new(picked, best.cost, best.weight)
}
