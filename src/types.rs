use serde::{Deserialize, Deserializer, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rect {
    #[serde(deserialize_with = "deserialize_u32_from_number")]
    pub length: u32,
    #[serde(deserialize_with = "deserialize_u32_from_number")]
    pub width: u32,
}

impl Rect {
    pub fn new(length: u32, width: u32) -> Self {
        Self { length, width }
    }

    pub fn area(&self) -> u64 {
        self.length as u64 * self.width as u64
    }

    pub fn rotated(&self) -> Self {
        Self {
            length: self.width,
            width: self.length,
        }
    }

    /// Smaller side, the extent an item takes up along a shelf.
    pub fn short_side(&self) -> u32 {
        self.length.min(self.width)
    }

    /// Larger side, the extent an item takes up across a shelf.
    pub fn long_side(&self) -> u32 {
        self.length.max(self.width)
    }

    /// Axis-aligned containment without rotation.
    pub fn fits_in(&self, other: &Rect) -> bool {
        self.length <= other.length && self.width <= other.width
    }

    pub fn fits_in_any_orientation(&self, other: &Rect) -> bool {
        self.fits_in(other) || self.rotated().fits_in(other)
    }
}

impl std::fmt::Display for Rect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.length, self.width)
    }
}

/// One row opened along the truck's length axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Shelf {
    pub occupied_length: u32,
    pub row_width: u32,
}

impl Shelf {
    pub fn open(item: Rect) -> Self {
        Self {
            occupied_length: item.short_side(),
            row_width: item.long_side(),
        }
    }

    /// Space left at the end of this row, bounded by the row's current width.
    pub fn remaining(&self, bound: Rect) -> Rect {
        Rect::new(
            bound.length.saturating_sub(self.occupied_length),
            self.row_width,
        )
    }

    pub fn push(&mut self, item: Rect) {
        self.occupied_length += item.short_side();
        self.row_width = self.row_width.max(item.long_side());
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackingRequest {
    pub items: Vec<Rect>,
    pub bound: Rect,
}

impl PackingRequest {
    pub fn new(items: Vec<Rect>, bound: Rect) -> Self {
        Self { items, bound }
    }

    pub fn can_pack(&self) -> bool {
        crate::packer::can_pack(&self.items, self.bound)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PackReport {
    pub fits: bool,
    pub placed: usize,
    pub total: usize,
    pub shelves: Vec<Shelf>,
}

impl PackReport {
    pub fn row_count(&self) -> usize {
        self.shelves.len()
    }

    /// Sum of every row's width. Can exceed the truck width when a row
    /// grew after the budget check that opened a later row.
    pub fn used_width(&self) -> u64 {
        self.shelves.iter().map(|s| s.row_width as u64).sum()
    }
}

/// Accepts integral JSON numbers written as floats (`2.0`), which some
/// form clients send for numeric inputs.
pub fn deserialize_u32_from_number<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Number::deserialize(deserializer)?;
    if let Some(n) = value.as_u64() {
        return u32::try_from(n).map_err(|_| serde::de::Error::custom("number out of range"));
    }
    match value.as_f64() {
        Some(f) if f >= 0.0 && f.fract() == 0.0 && f <= u32::MAX as f64 => Ok(f as u32),
        _ => Err(serde::de::Error::custom(format!(
            "expected a non-negative whole number, got {value}"
        ))),
    }
}
