use std::cmp::Ordering;

use crate::item::Item;

/// The best packing known for one board cell: the highest cost, and among packings of that cost
/// the lowest real weight.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Cell {
    pub(crate) cost: f64,
    pub(crate) weight: f64,
}

impl Cell {
    pub(crate) const EMPTY: Cell = Cell { cost: 0.0, weight: 0.0 };

    fn beats(&self, other: &Cell) -> bool {
        match self.cost.total_cmp(&other.cost) {
            Ordering::Greater => true,
            Ordering::Less => false,
            Ordering::Equal => self.weight.total_cmp(&other.weight) == Ordering::Less,
        }
    }
}

/// Memo table over (items considered, remaining capacity).
///
/// Row `k` stands for the first `k` items of the slice the board was built over, so
/// `items[k - 1]` is the item decided on row `k`. Row 0 is never stored: with no items the
/// answer is always `Cell::EMPTY`. Column 0 is stored like any other, items lighter than half
/// a unit still fit in an exhausted budget.
///
/// Cells are filled on demand and each one is evaluated at most once. The board allocates
/// `items × (capacity + 1)` slots up front, callers bound that product (see `Limits`).
pub(crate) struct CostBoard<'a> {
    items: &'a [&'a Item],
    capacity: usize,
    cells: Vec<Option<Cell>>,
    evaluations: usize,
}

impl<'a> CostBoard<'a> {
    pub(crate) fn new(items: &'a [&'a Item], capacity: usize) -> CostBoard<'a> {
        CostBoard {
            items,
            capacity,
            cells: vec![None; items.len() * (capacity + 1)],
            evaluations: 0,
        }
    }

    /// Number of cells computed so far.
    pub(crate) fn evaluations(&self) -> usize {
        self.evaluations
    }

    /// Best cell for the whole instance.
    pub(crate) fn best(&mut self) -> Cell {
        self.cost(self.items.len(), self.capacity)
    }

    #[inline]
    fn slot(&self, k: usize, w: usize) -> usize {
        (k - 1) * (self.capacity + 1) + w
    }

    #[inline]
    fn get(&self, k: usize, w: usize) -> Option<Cell> {
        if k == 0 {
            return Some(Cell::EMPTY);
        }
        self.cells[self.slot(k, w)]
    }

    /// Best cost reachable with the first `k` items under a budget of `w` units.
    ///
    /// The recurrence is the classic one: either item `k` is left out, and the answer is the one
    /// for `(k - 1, w)`, or it fits and is taken, adding its cost to the answer for the budget it
    /// leaves behind. On equal cost the lighter of the two wins.
    ///
    /// Evaluation order is driven by an explicit work stack instead of recursion: a cell is only
    /// computed once both of the cells it depends on are known.
    pub(crate) fn cost(&mut self, k: usize, w: usize) -> Cell {
        debug_assert!(k <= self.items.len() && w <= self.capacity);

        let mut last = Cell::EMPTY;
        let mut stack = vec![(k, w)];
        while let Some(&(k, w)) = stack.last() {
            if let Some(known) = self.get(k, w) {
                last = known;
                stack.pop();
                continue;
            }

            let item = self.items[k - 1];
            let units = item.units();

            let exclude = self.get(k - 1, w);
            let include = if units <= w { Some(self.get(k - 1, w - units)) } else { None };

            let mut blocked = false;
            if exclude.is_none() {
                stack.push((k - 1, w));
                blocked = true;
            }
            if let Some(None) = include {
                stack.push((k - 1, w - units));
                blocked = true;
            }
            if blocked {
                continue;
            }

            let mut best = exclude.unwrap_or(Cell::EMPTY);
            if let Some(Some(rest)) = include {
                let taken = Cell {
                    cost: rest.cost + item.cost,
                    weight: rest.weight + item.weight,
                };
                if taken.beats(&best) {
                    best = taken;
                }
            }

            let slot = self.slot(k, w);
            self.cells[slot] = Some(best);
            self.evaluations += 1;
            last = best;
            stack.pop();
        }
        last
    }

    /// Walk the board back from the top cell and collect the original indices of the items
    /// that make up the best packing, in board order (heaviest first).
    ///
    /// Item `k` was taken exactly when its cell differs from the one right above it. Every cell
    /// on that path has already been computed by `best()`, so this only reads the memo.
    pub(crate) fn back_trace(&mut self) -> Vec<u32> {
        let mut selected = Vec::new();
        let mut w = self.capacity;
        for k in (1..=self.items.len()).rev() {
            let here = self.cost(k, w);
            // zero cost items only add weight, they are never part of a best cell
            if here.cost == 0.0 {
                break;
            }
            if here != self.cost(k - 1, w) {
                let item = self.items[k - 1];
                selected.push(item.index);
                w -= item.units();
            }
        }
        selected
    }
}
