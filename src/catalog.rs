use serde::{Deserialize, Serialize};

use crate::error::LoadError;
use crate::types::{PackingRequest, Rect, deserialize_u32_from_number};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CatalogEntry {
    pub name: &'static str,
    pub rect: Rect,
}

pub static CATALOG: [CatalogEntry; 5] = [
    CatalogEntry { name: "Frame", rect: Rect { length: 229, width: 108 } },
    CatalogEntry { name: "Stillage", rect: Rect { length: 102, width: 79 } },
    CatalogEntry { name: "Travel Cage", rect: Rect { length: 141, width: 103 } },
    CatalogEntry { name: "Row (15kg)", rect: Rect { length: 222, width: 29 } },
    CatalogEntry { name: "Row (18kg)", rect: Rect { length: 231, width: 33 } },
];

pub const DEFAULT_TRUCK: Rect = Rect {
    length: 600,
    width: 235,
};

/// Most units of one item type a single load line may request.
pub const MAX_QUANTITY: u32 = 10_000;

pub const FITS_MESSAGE: &str = "All containers can fit in the truck!";
pub const OVERFLOW_MESSAGE: &str = "Containers won't fit in the truck.";

pub fn lookup(name: &str) -> Option<&'static CatalogEntry> {
    let name = name.trim();
    CATALOG.iter().find(|e| e.name.eq_ignore_ascii_case(name))
}

pub fn message(fits: bool) -> &'static str {
    if fits { FITS_MESSAGE } else { OVERFLOW_MESSAGE }
}

/// Parses `LxW`, e.g. `600x235`. Zero is allowed.
pub fn parse_dimensions(s: &str) -> Result<Rect, LoadError> {
    let (length, width) = s
        .trim()
        .split_once(['x', 'X'])
        .ok_or_else(|| LoadError::InvalidDimensions(s.to_string()))?;
    let length = length
        .trim()
        .parse::<u32>()
        .map_err(|_| LoadError::InvalidDimensions(s.to_string()))?;
    let width = width
        .trim()
        .parse::<u32>()
        .map_err(|_| LoadError::InvalidDimensions(s.to_string()))?;
    Ok(Rect::new(length, width))
}

/// What a load line refers to: a catalog item or an ad-hoc rectangle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ItemKind {
    Named { name: String },
    Custom { rect: Rect },
}

impl std::fmt::Display for ItemKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ItemKind::Named { name } => write!(f, "{name}"),
            ItemKind::Custom { rect } => write!(f, "{rect}"),
        }
    }
}

impl ItemKind {
    pub fn resolve(&self) -> Result<Rect, LoadError> {
        match self {
            ItemKind::Named { name } => lookup(name)
                .map(|e| e.rect)
                .ok_or_else(|| LoadError::UnknownItem(name.clone())),
            ItemKind::Custom { rect } => Ok(*rect),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadLine {
    #[serde(flatten)]
    pub kind: ItemKind,
    #[serde(deserialize_with = "deserialize_u32_from_number")]
    pub qty: u32,
}

impl LoadLine {
    /// Parses `NAME:qty` or `LxW:qty`. The quantity is split off the last
    /// colon so names may contain spaces and parentheses.
    pub fn parse(s: &str) -> Result<Self, LoadError> {
        let (item, qty) = s
            .rsplit_once(':')
            .ok_or_else(|| LoadError::InvalidLine(s.to_string()))?;
        let qty = qty
            .trim()
            .parse::<u32>()
            .ok()
            .filter(|&q| q <= MAX_QUANTITY)
            .ok_or_else(|| LoadError::InvalidQuantity(s.to_string()))?;
        let item = item.trim();
        if item.is_empty() {
            return Err(LoadError::InvalidLine(s.to_string()));
        }

        let kind = if lookup(item).is_some() {
            ItemKind::Named {
                name: item.to_string(),
            }
        } else if item.starts_with(|c: char| c.is_ascii_digit()) {
            ItemKind::Custom {
                rect: parse_dimensions(item)?,
            }
        } else {
            return Err(LoadError::UnknownItem(item.to_string()));
        };
        Ok(Self { kind, qty })
    }
}

/// Truck bound and per-type quantities as a host collects them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadRequest {
    pub truck: Rect,
    pub lines: Vec<LoadLine>,
}

impl Default for LoadRequest {
    /// Default truck with zero of every catalog item.
    fn default() -> Self {
        Self {
            truck: DEFAULT_TRUCK,
            lines: CATALOG
                .iter()
                .map(|e| LoadLine {
                    kind: ItemKind::Named {
                        name: e.name.to_string(),
                    },
                    qty: 0,
                })
                .collect(),
        }
    }
}

impl LoadRequest {
    pub fn new(truck: Rect, lines: Vec<LoadLine>) -> Self {
        Self { truck, lines }
    }

    /// One rectangle per requested unit, in line order.
    pub fn into_packing_request(self) -> Result<PackingRequest, LoadError> {
        let mut items = Vec::new();
        for line in &self.lines {
            if line.qty > MAX_QUANTITY {
                return Err(LoadError::InvalidQuantity(format!("{}:{}", line.kind, line.qty)));
            }
            let rect = line.kind.resolve()?;
            items.extend(std::iter::repeat_n(rect, line.qty as usize));
        }
        Ok(PackingRequest::new(items, self.truck))
    }
}
