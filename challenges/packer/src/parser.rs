use log::{debug, warn};
use thiserror::Error;

use crate::item::{Instance, Item};

pub const DEFAULT_MAX_CAPACITY: usize = 10_000;
pub const DEFAULT_MAX_ITEMS: usize = 1_000;
/// 24 bytes per cell, about 48 MB per board.
pub const DEFAULT_MAX_CELLS: usize = 2_000_000;

/// Bounds on a single instance. The cost board takes `items × (capacity + 1)` cells, these keep
/// a single bad line from eating all the memory. Every concurrent solve holds its own board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limits {
    pub max_capacity: usize,
    pub max_items: usize,
    pub max_cells: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Limits {
            max_capacity: DEFAULT_MAX_CAPACITY,
            max_items: DEFAULT_MAX_ITEMS,
            max_cells: DEFAULT_MAX_CELLS,
        }
    }
}

/// Why a whole line was thrown away.
#[derive(Debug, Error, PartialEq)]
pub enum LineError {
    #[error("missing ':' between capacity and items")]
    MissingSeparator,
    #[error("capacity {capacity} is above the limit of {max}")]
    CapacityTooLarge { capacity: usize, max: usize },
    #[error("{count} items is above the limit of {max}")]
    TooManyItems { count: usize, max: usize },
    #[error("{items} items with capacity {capacity} need more than {max} board cells")]
    BoardTooLarge { items: usize, capacity: usize, max: usize },
}

/// Why a single item was dropped from its line.
#[derive(Debug, Error, PartialEq)]
pub enum ItemError {
    #[error("expected 3 fields, found {0}")]
    FieldCount(usize),
    #[error("invalid index {0:?}")]
    Index(String),
    #[error("invalid weight {0:?}")]
    Weight(String),
    #[error("invalid cost {0:?}")]
    Cost(String),
    #[error("unclosed item {0:?}")]
    Unclosed(String),
}

/// Parse one line of the form `81 : (1,53.38,€45) (2,88.62,€98)`.
///
/// Blank lines yield `Ok(None)`. Items that fail to parse are dropped with a warning, the rest
/// of the line is kept. A capacity that is not a number, or is below 1, makes a degenerate
/// instance with capacity 0.
pub fn parse_line(line: &str, limits: &Limits) -> Result<Option<Instance>, LineError> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }

    let (capacity, items) = line.split_once(':').ok_or(LineError::MissingSeparator)?;

    let capacity = parse_capacity(capacity.trim());
    if capacity > limits.max_capacity {
        return Err(LineError::CapacityTooLarge { capacity, max: limits.max_capacity });
    }

    let items = parse_items(items);
    if items.len() > limits.max_items {
        return Err(LineError::TooManyItems { count: items.len(), max: limits.max_items });
    }

    // without items no board is ever built
    let cells = capacity.checked_add(1).and_then(|columns| items.len().checked_mul(columns));
    if !items.is_empty() && cells.is_none_or(|cells| cells > limits.max_cells) {
        return Err(LineError::BoardTooLarge {
            items: items.len(),
            capacity,
            max: limits.max_cells,
        });
    }

    Ok(Some(Instance::new(capacity, items)))
}

/// `parse_line`, with rejected lines logged and turned into `None`.
pub fn parse_logged(line_no: usize, line: &str, limits: &Limits) -> Option<Instance> {
    match parse_line(line, limits) {
        Ok(instance) => instance,
        Err(err) => {
            warn!("line {}: skipped: {}", line_no, err);
            None
        }
    }
}

fn parse_capacity(text: &str) -> usize {
    match text.parse::<f64>() {
        Ok(value) if value.is_finite() && value >= 1.0 => value.round() as usize,
        _ => {
            debug!("capacity {:?} is not usable, nothing will be packed", text);
            0
        }
    }
}

fn parse_items(mut rest: &str) -> Vec<Item> {
    let mut items = Vec::new();
    loop {
        rest = rest.trim_start();
        if rest.is_empty() {
            break;
        }
        let Some(open) = rest.find('(') else {
            warn!("ignoring trailing text {:?}", rest);
            break;
        };
        if open > 0 {
            warn!("ignoring stray text {:?}", &rest[..open]);
        }

        let body = &rest[open + 1..];
        let Some(close) = body.find(')') else {
            warn!("dropping item: {}", ItemError::Unclosed(body.to_string()));
            break;
        };
        // another item starts before this one is closed: drop this one, resume at the next
        if let Some(inner) = body[..close].find('(') {
            warn!("dropping item: {}", ItemError::Unclosed(body[..inner].to_string()));
            rest = &body[inner..];
            continue;
        }

        match parse_item(&body[..close]) {
            Ok(item) => items.push(item),
            Err(err) => warn!("dropping item ({}): {}", &body[..close], err),
        }
        rest = &body[close + 1..];
    }
    items
}

fn parse_item(body: &str) -> Result<Item, ItemError> {
    let fields: Vec<&str> = body.split(',').map(str::trim).collect();
    let [index, weight, cost] = fields[..] else {
        return Err(ItemError::FieldCount(fields.len()));
    };

    let index = match index.parse::<u32>() {
        Ok(index) if index > 0 => index,
        _ => return Err(ItemError::Index(index.to_string())),
    };
    let weight = parse_magnitude(weight).ok_or_else(|| ItemError::Weight(weight.to_string()))?;

    // costs usually carry a currency symbol, e.g. `€45`
    let amount = cost.trim_start_matches(|c: char| !(c.is_ascii_digit() || c == '.' || c == '-' || c == '+'));
    let cost = parse_magnitude(amount).ok_or_else(|| ItemError::Cost(cost.to_string()))?;

    Ok(Item::new(index, weight, cost))
}

fn parse_magnitude(text: &str) -> Option<f64> {
    text.parse::<f64>().ok().filter(|v| v.is_finite() && *v >= 0.0)
}
