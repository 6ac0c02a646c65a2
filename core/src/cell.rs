use serde::{Deserialize, Serialize};

/// Player-driven state stored by the engine for every cell.
///
/// Only `Hidden -> Revealed` and `Hidden <-> Flagged` are legal transitions.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellState {
    Hidden,
    Revealed,
    Flagged,
}

impl CellState {
    pub const fn is_hidden(self) -> bool {
        matches!(self, Self::Hidden)
    }

    pub const fn is_revealed(self) -> bool {
        matches!(self, Self::Revealed)
    }
}

impl Default for CellState {
    fn default() -> Self {
        Self::Hidden
    }
}

/// What a renderer is allowed to know about a cell.
///
/// Mine identity and adjacency counts only leak out once the cell is revealed.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellView {
    Hidden,
    Flagged,
    /// Revealed safe cell with its adjacent mine count.
    Open(u8),
    /// Revealed mine, shown after a loss.
    Mine,
    /// The mine that ended the game.
    Exploded,
}

impl CellView {
    // whether the cell is visually closed
    pub const fn is_closed(self) -> bool {
        matches!(self, Self::Hidden | Self::Flagged)
    }
}
