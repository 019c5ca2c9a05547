use std::fmt;

/// Rendered in place of an index list when nothing goes in the package.
pub const EMPTY_SELECTION: &str = "-";

/// The items chosen for one package, by their user-facing index, in ascending order.
#[derive(Debug, Clone, PartialEq)]
pub struct Selection {
    indices: Vec<u32>,
    cost: f64,
    weight: f64,
}

impl Selection {
    pub fn empty() -> Selection {
        Selection {
            indices: Vec::new(),
            cost: 0.0,
            weight: 0.0,
        }
    }

    /// `indices` may come in any order; they are sorted here.
    pub fn new(mut indices: Vec<u32>, cost: f64, weight: f64) -> Selection {
        indices.sort_unstable();
        Selection { indices, cost, weight }
    }

    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Total cost of the selected items.
    pub fn cost(&self) -> f64 {
        self.cost
    }

    /// Total weight of the selected items, as given in the input (not rounded).
    pub fn weight(&self) -> f64 {
        self.weight
    }
}

impl fmt::Display for Selection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Some((first, rest)) = self.indices.split_first() else {
            return f.write_str(EMPTY_SELECTION);
        };
        write!(f, "{}", first)?;
        for index in rest {
            write!(f, ",{}", index)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_empty() {
        assert_eq!(Selection::empty().to_string(), "-");
        assert_eq!(Selection::new(vec![], 0.0, 0.0).to_string(), "-");
    }

    #[test]
    fn test_render_sorted() {
        let selection = Selection::new(vec![7, 2], 148.0, 74.57);
        assert_eq!(selection.indices(), &[2, 7]);
        assert_eq!(selection.to_string(), "2,7");
        assert_eq!(Selection::new(vec![4], 76.0, 72.3).to_string(), "4");
    }

    #[test]
    fn test_render_is_idempotent() {
        let selection = Selection::new(vec![9, 8, 1], 10.0, 3.0);
        assert_eq!(selection.to_string(), selection.to_string());
        assert_eq!(format!("{}", selection), "1,8,9");
    }
}
