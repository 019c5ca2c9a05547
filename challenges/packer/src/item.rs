/// A candidate item. `index` is what the user sees in the output; it has no relation to the
/// position of the item in its line.
#[derive(Debug, Clone, PartialEq)]
pub struct Item {
    pub index: u32,
    pub weight: f64,
    pub cost: f64,
}

impl Item {
    pub fn new(index: u32, weight: f64, cost: f64) -> Item {
        Item { index, weight, cost }
    }

    /// Weight expressed in whole capacity units, rounded half away from zero.
    #[inline]
    pub fn units(&self) -> usize {
        self.weight.round() as usize
    }
}

/// One packing problem: a capacity in whole units and the items offered for it.
#[derive(Debug, Clone, PartialEq)]
pub struct Instance {
    pub capacity: usize,
    pub items: Vec<Item>,
}

impl Instance {
    pub fn new(capacity: usize, items: Vec<Item>) -> Instance {
        Instance { capacity, items }
    }

    /// Nothing can ever be selected: no room or nothing to choose from.
    pub fn is_degenerate(&self) -> bool {
        self.capacity == 0 || self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_units_round_half_away_from_zero() {
        assert_eq!(Item::new(1, 14.55, 0.0).units(), 15);
        assert_eq!(Item::new(1, 14.49, 0.0).units(), 14);
        assert_eq!(Item::new(1, 0.4, 0.0).units(), 0);
        assert_eq!(Item::new(1, 2.5, 0.0).units(), 3);
    }

    #[test]
    fn test_degenerate() {
        assert!(Instance::new(0, vec![Item::new(1, 1.0, 1.0)]).is_degenerate());
        assert!(Instance::new(10, vec![]).is_degenerate());
        assert!(!Instance::new(10, vec![Item::new(1, 1.0, 1.0)]).is_degenerate());
    }
}
