//! Tower module - the stack of committed blocks plus the block in flight

use crate::block::Block;
use crate::types::BlockState;

/// Committed blocks in index order, and the current (newest) block.
///
/// The base block is always present, so the tower is never empty.
#[derive(Debug, Clone)]
pub struct Tower {
    base: Block,
    placed: Vec<Block>,
    current: Option<Block>,
}

impl Tower {
    pub fn new(base: Block) -> Self {
        Self {
            base,
            placed: Vec::new(),
            current: None,
        }
    }

    pub fn base(&self) -> &Block {
        &self.base
    }

    /// Highest committed block; the target of the next placement.
    pub fn top(&self) -> &Block {
        self.placed.last().unwrap_or(&self.base)
    }

    /// Committed blocks, base first.
    pub fn blocks(&self) -> impl Iterator<Item = &Block> + '_ {
        std::iter::once(&self.base).chain(self.placed.iter())
    }

    /// Number of committed blocks, base included.
    pub fn len(&self) -> usize {
        1 + self.placed.len()
    }

    /// Block in flight (`Active`), or the block that just missed.
    pub fn current(&self) -> Option<&Block> {
        self.current.as_ref()
    }

    pub fn current_mut(&mut self) -> Option<&mut Block> {
        self.current.as_mut()
    }

    pub fn set_current(&mut self, block: Block) {
        self.current = Some(block);
    }

    pub fn take_current(&mut self) -> Option<Block> {
        self.current.take()
    }

    /// Whether the newest block was lost.
    pub fn has_missed(&self) -> bool {
        self.current
            .as_ref()
            .is_some_and(|b| b.state() == BlockState::Missed)
    }

    /// Append a committed block.
    pub fn push(&mut self, block: Block) {
        debug_assert_eq!(block.state(), BlockState::Stopped);
        debug_assert_eq!(block.index() as usize, self.len());
        self.placed.push(block);
    }

    /// Successfully placed blocks, base excluded.
    pub fn score(&self) -> u32 {
        self.placed.len() as u32
    }

    /// Drop everything except the base and return the removed blocks in
    /// index order.
    pub fn truncate_to_base(&mut self) -> Vec<Block> {
        self.current = None;
        std::mem::take(&mut self.placed)
    }

    /// Height the camera should follow: the upper face of the newest block.
    ///
    /// With no block in flight this is the top of the tower, which after a
    /// reset is the top of the base.
    pub fn camera_target(&self) -> f64 {
        let newest = self.current.as_ref().unwrap_or_else(|| self.top());
        newest.position().y + newest.dimension().height
    }
}
