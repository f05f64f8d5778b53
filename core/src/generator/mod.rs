use crate::*;
pub use random::*;

mod random;

/// Source of mine layouts for a [`Board`].
///
/// A board asks its generator for a fresh layout on creation and on every reset.
pub trait MineGenerator {
    fn generate(&mut self, config: GameConfig) -> Result<MineLayout>;
}

/// Replays one hand-built layout on every generation.
#[derive(Clone, Debug, PartialEq)]
pub struct FixedMineGenerator {
    layout: MineLayout,
}

impl FixedMineGenerator {
    pub fn new(layout: MineLayout) -> Self {
        Self { layout }
    }

    pub fn layout(&self) -> &MineLayout {
        &self.layout
    }
}

impl MineGenerator for FixedMineGenerator {
    fn generate(&mut self, config: GameConfig) -> Result<MineLayout> {
        if self.layout.game_config() != config {
            log::warn!(
                "Fixed layout {:?} cannot serve requested config {:?}",
                self.layout.game_config(),
                config
            );
            return Err(GameError::LayoutMismatch);
        }
        Ok(self.layout.clone())
    }
}

impl From<MineLayout> for FixedMineGenerator {
    fn from(layout: MineLayout) -> Self {
        Self::new(layout)
    }
}
