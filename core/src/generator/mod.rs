use crate::*;
pub use random::*;

mod random;

/// Strategy for turning a configuration into a concrete mine layout.
pub trait LayoutGenerator {
    fn generate(self, config: GameConfig) -> Result<MineLayout>;
}
