//! Screen buffer
//!
//! A fixed-size grid of character cells with a parallel grid of
//! attributes. Both are allocated once at construction and never resized.
//! Cells are addressed by a single linear index (`row * width + col`).

use super::attribute::Attribute;

/// Largest number of cells a screen may hold
pub const MAX_CAPACITY: usize = 8192;

/// The character a blank cell holds
pub const BLANK: u8 = b' ';

/// Errors raised when building a screen with illegal dimensions
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TerminalError {
    #[error("screen dimensions must be non-zero (got {width}x{height})")]
    ZeroDimension { width: usize, height: usize },
    #[error("screen of {width}x{height} exceeds the maximum of {max} cells")]
    CapacityExceeded {
        width: usize,
        height: usize,
        max: usize,
    },
}

/// A single cell: one character code unit and its attribute
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub character: u8,
    pub attribute: Attribute,
}

impl Default for Cell {
    fn default() -> Self {
        Self {
            character: BLANK,
            attribute: Attribute::default(),
        }
    }
}

/// Fixed-capacity character and attribute grid
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScreenBuffer {
    width: usize,
    height: usize,
    characters: Vec<u8>,
    attributes: Vec<Attribute>,
}

impl ScreenBuffer {
    /// Create a blank buffer of `width` x `height` cells
    pub fn new(width: usize, height: usize) -> Result<Self, TerminalError> {
        if width == 0 || height == 0 {
            return Err(TerminalError::ZeroDimension { width, height });
        }
        let size = width
            .checked_mul(height)
            .filter(|&size| size <= MAX_CAPACITY)
            .ok_or(TerminalError::CapacityExceeded {
                width,
                height,
                max: MAX_CAPACITY,
            })?;

        Ok(Self {
            width,
            height,
            characters: vec![BLANK; size],
            attributes: vec![Attribute::default(); size],
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Total number of cells (`width * height`)
    pub fn size(&self) -> usize {
        self.characters.len()
    }

    /// Store a character and its attribute.
    ///
    /// # Panics
    ///
    /// Panics if `index >= size`.
    pub fn write(&mut self, index: usize, character: u8, attribute: Attribute) {
        self.characters[index] = character;
        self.attributes[index] = attribute;
    }

    /// Replace only the character at `index`, keeping its attribute
    pub fn set_character(&mut self, index: usize, character: u8) {
        self.characters[index] = character;
    }

    /// Replace only the attribute at `index`, keeping its character
    pub fn set_attribute(&mut self, index: usize, attribute: Attribute) {
        self.attributes[index] = attribute;
    }

    /// Blank the first `n` cells (character and attribute)
    ///
    /// # Panics
    ///
    /// Panics if `n > size`.
    pub fn clear_range(&mut self, n: usize) {
        self.characters[..n].fill(BLANK);
        self.attributes[..n].fill(Attribute::default());
    }

    /// Blank every cell
    pub fn clear(&mut self) {
        self.clear_range(self.size());
    }

    /// The character at `index`, if in range
    pub fn character(&self, index: usize) -> Option<u8> {
        self.characters.get(index).copied()
    }

    /// The attribute at `index`, if in range
    pub fn attribute(&self, index: usize) -> Option<Attribute> {
        self.attributes.get(index).copied()
    }

    /// The cell at `index`, if in range
    pub fn cell(&self, index: usize) -> Option<Cell> {
        Some(Cell {
            character: self.character(index)?,
            attribute: self.attribute(index)?,
        })
    }

    /// All characters of row `y`
    pub fn row_characters(&self, y: usize) -> Option<&[u8]> {
        let start = y.checked_mul(self.width)?;
        self.characters.get(start..start + self.width)
    }

    /// All attributes of row `y`
    pub fn row_attributes(&self, y: usize) -> Option<&[Attribute]> {
        let start = y.checked_mul(self.width)?;
        self.attributes.get(start..start + self.width)
    }

    /// The whole character grid, row-major
    pub fn characters(&self) -> &[u8] {
        &self.characters
    }

    /// The whole attribute grid, row-major
    pub fn attributes(&self) -> &[Attribute] {
        &self.attributes
    }
}
