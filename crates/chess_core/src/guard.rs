//! Scoped make/unmake.

use std::ops::{Deref, DerefMut};

use cozy_chess::Move;

use crate::Position;

/// Applies a move on construction and takes it back when dropped.
///
/// Every exit path out of a search node (normal return, a pruning `break`,
/// or unwinding) therefore leaves the position exactly as it was found.
///
/// ```
/// use chess_core::{Game, MoveGuard, Position};
///
/// let mut game = Game::startpos();
/// let before = game.position_id();
/// let mv = game.legal_moves()[0];
/// {
///     let child = MoveGuard::new(&mut game, mv);
///     assert_ne!(child.position_id(), before);
/// }
/// assert_eq!(game.position_id(), before);
/// ```
pub struct MoveGuard<'a, P: Position + ?Sized> {
    pos: &'a mut P,
}

impl<'a, P: Position + ?Sized> MoveGuard<'a, P> {
    pub fn new(pos: &'a mut P, mv: Move) -> Self {
        pos.make_move(mv);
        Self { pos }
    }
}

impl<P: Position + ?Sized> Deref for MoveGuard<'_, P> {
    type Target = P;

    fn deref(&self) -> &P {
        self.pos
    }
}

impl<P: Position + ?Sized> DerefMut for MoveGuard<'_, P> {
    fn deref_mut(&mut self) -> &mut P {
        self.pos
    }
}

impl<P: Position + ?Sized> Drop for MoveGuard<'_, P> {
    fn drop(&mut self) {
        self.pos.unmake_move();
    }
}
