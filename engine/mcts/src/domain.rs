//! Domain trait supplying the game semantics to the search.
//!
//! The search never looks inside a state. Everything it needs to know about
//! a game comes from two operations: which states follow a given state, and
//! whether a final state counts as a win for the actor being optimized for.

use thiserror::Error;

/// Errors raised by domain implementations.
///
/// The search propagates these unchanged.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Domain operation failed: {0}")]
    Failed(String),

    #[error("Invalid state: {0}")]
    InvalidState(String),
}

/// Trait for game domains searched by [`MctsSearch`](crate::search::MctsSearch).
///
/// Implementations could be:
/// - a board game (see the `games-tictactoe` crate)
/// - [`FnDomain`]: a pair of closures, handy for tests and small puzzles
pub trait Domain {
    /// Position in the game. Equality is used to match committed moves
    /// against the children of the root.
    type State: Clone + PartialEq;

    /// Identity of the side whose wins are counted.
    type Actor;

    /// Generate the successors of `state`, in any order.
    ///
    /// An empty result marks `state` as terminal. Must be pure and must
    /// terminate; the search imposes no depth limit.
    fn successors(&self, state: &Self::State) -> Result<Vec<Self::State>, DomainError>;

    /// Whether the terminal `state` counts as a win for `actor`.
    fn is_win(&self, state: &Self::State, actor: &Self::Actor) -> Result<bool, DomainError>;
}

impl<D: Domain + ?Sized> Domain for &D {
    type State = D::State;
    type Actor = D::Actor;

    fn successors(&self, state: &Self::State) -> Result<Vec<Self::State>, DomainError> {
        (**self).successors(state)
    }

    fn is_win(&self, state: &Self::State, actor: &Self::Actor) -> Result<bool, DomainError> {
        (**self).is_win(state, actor)
    }
}

/// Domain built from two closures.
pub struct FnDomain<S, A, G, W> {
    successors: G,
    is_win: W,
    _marker: std::marker::PhantomData<fn(&S, &A)>,
}

impl<S, A, G, W> FnDomain<S, A, G, W>
where
    G: Fn(&S) -> Vec<S>,
    W: Fn(&S, &A) -> bool,
{
    pub fn new(successors: G, is_win: W) -> Self {
        Self {
            successors,
            is_win,
            _marker: std::marker::PhantomData,
        }
    }
}

impl<S, A, G, W> Domain for FnDomain<S, A, G, W>
where
    S: Clone + PartialEq,
    G: Fn(&S) -> Vec<S>,
    W: Fn(&S, &A) -> bool,
{
    type State = S;
    type Actor = A;

    fn successors(&self, state: &S) -> Result<Vec<S>, DomainError> {
        Ok((self.successors)(state))
    }

    fn is_win(&self, state: &S, actor: &A) -> Result<bool, DomainError> {
        Ok((self.is_win)(state, actor))
    }
}
