//! Cursor state and navigation
//!
//! The cursor is a single linear index into the screen buffer. Moves are
//! expressed in (x, y) and linearised under one of two policies: clamp to
//! the screen edges, or wrap around them.

/// Screen geometry used to convert between (x, y) and linear indices
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dimensions {
    pub width: usize,
    pub height: usize,
}

impl Dimensions {
    pub fn size(&self) -> usize {
        self.width * self.height
    }

    /// Linearise (x, y) under the given policy
    pub fn index_of(&self, x: usize, y: usize, addressing: Addressing) -> usize {
        let (x, y) = match addressing {
            Addressing::Clamp => (x.min(self.width - 1), y.min(self.height - 1)),
            Addressing::Wrap => (x % self.width, y % self.height),
        };
        y * self.width + x
    }

    /// Split a linear index into (x, y)
    pub fn position_of(&self, index: usize) -> (usize, usize) {
        (index % self.width, index / self.width)
    }
}

/// How out-of-range coordinates are brought back onto the screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Addressing {
    /// Pin each axis to `[0, len - 1]`
    Clamp,
    /// Reduce each axis modulo its length
    Wrap,
}

/// Cursor position, the single save slot, and display flags
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cursor {
    /// Linear index into the screen buffer
    pub index: usize,
    /// Saved position (CSI s / CSI n)
    pub saved: usize,
    /// Whether the cursor is drawn (DECTCEM)
    pub visible: bool,
    /// Whether the renderer should blink it
    pub blinks: bool,
}

impl Default for Cursor {
    fn default() -> Self {
        Self {
            index: 0,
            saved: 0,
            visible: true,
            blinks: false,
        }
    }
}

impl Cursor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current column
    pub fn x(&self, dims: Dimensions) -> usize {
        dims.position_of(self.index).0
    }

    /// Current row
    pub fn y(&self, dims: Dimensions) -> usize {
        dims.position_of(self.index).1
    }

    /// Move to an absolute (x, y)
    pub fn move_to(&mut self, dims: Dimensions, x: usize, y: usize, addressing: Addressing) {
        self.index = dims.index_of(x, y, addressing);
    }

    /// Move by a signed offset. Each axis is floored at zero before the
    /// addressing policy is applied, so moves never go negative.
    pub fn move_by(&mut self, dims: Dimensions, dx: i64, dy: i64, addressing: Addressing) {
        let (x, y) = dims.position_of(self.index);
        let x = offset(x, dx);
        let y = offset(y, dy);
        self.move_to(dims, x, y, addressing);
    }

    /// Move to column 0 of the row `dy` rows away, wrapping at the edges
    pub fn move_to_line_start(&mut self, dims: Dimensions, dy: i64) {
        let y = offset(self.y(dims), dy);
        self.move_to(dims, 0, y, Addressing::Wrap);
    }

    pub fn save(&mut self) {
        self.saved = self.index;
    }

    pub fn restore(&mut self) {
        self.index = self.saved;
    }
}

/// `base + delta`, floored at zero
fn offset(base: usize, delta: i64) -> usize {
    let base = i64::try_from(base).unwrap_or(i64::MAX);
    usize::try_from(base.saturating_add(delta).max(0)).unwrap_or(usize::MAX)
}
