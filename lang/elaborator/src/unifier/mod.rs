//! The interface between the constraint store and term comparison.
//!
//! The constraint store does not compare terms itself. It hands equations to a
//! [Unifier], which may solve metavariables through [TyckState::solve] and may defer
//! comparisons it cannot decide yet through [TyckState::add_eqn].

use tessera_lang_ast::ctx::LocalCtx;
use tessera_lang_ast::Exp;
use tessera_lang_miette_util::codespan::Span;
use tessera_lang_printer::tokens::{EQ, GE, LE};

use crate::result::ElabResult;
use crate::state::{Eqn, TyckState};

mod dec;
mod unify;

pub use dec::*;
pub use unify::SyntacticUnifier;

/// The relation a comparison checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Ordering {
    Eq,
    /// `lhs <= rhs`
    Lt,
    /// `lhs >= rhs`
    Gt,
}

impl Ordering {
    /// The ordering with both sides swapped.
    pub fn flip(self) -> Self {
        match self {
            Ordering::Eq => Ordering::Eq,
            Ordering::Lt => Ordering::Gt,
            Ordering::Gt => Ordering::Lt,
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            Ordering::Eq => EQ,
            Ordering::Lt => LE,
            Ordering::Gt => GE,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareMode {
    Normal,
    /// Metavariables outside the pattern fragment may be solved with a
    /// solution which is not unique.
    Vague,
    /// Check whether an instance candidate could fit. Never solves metavariables and
    /// never defers; a comparison that depends on unsolved metavariables is [Maybe].
    InstanceFiltering,
}

/// A comparison `ctx |- lhs <ordering> rhs : typ`.
#[derive(Debug, Clone)]
pub struct Comparison<'a> {
    pub lhs: Exp,
    pub rhs: Exp,
    pub typ: Option<Exp>,
    pub ordering: Ordering,
    pub ctx: &'a LocalCtx,
    pub pos: Option<Span>,
    pub mode: CompareMode,
    /// Whether undecidable comparisons may be deferred as new equations.
    pub allow_delay: bool,
}

impl<'a> Comparison<'a> {
    pub fn new(lhs: Exp, rhs: Exp, ctx: &'a LocalCtx) -> Self {
        Comparison {
            lhs,
            rhs,
            typ: None,
            ordering: Ordering::Eq,
            ctx,
            pos: None,
            mode: CompareMode::Normal,
            allow_delay: true,
        }
    }

    pub fn with_mode(self, mode: CompareMode) -> Self {
        Comparison { mode, ..self }
    }

    pub fn with_allow_delay(self, allow_delay: bool) -> Self {
        Comparison { allow_delay, ..self }
    }
}

pub trait Unifier {
    fn compare(&mut self, state: &mut TyckState, cmp: Comparison<'_>) -> ElabResult<Decision>;

    /// Compare both sides of a queued equation.
    fn check_eqn(
        &mut self,
        state: &mut TyckState,
        eqn: &Eqn,
        mode: CompareMode,
        allow_delay: bool,
    ) -> ElabResult<Decision> {
        let cmp = Comparison {
            lhs: eqn.lhs.clone().into(),
            rhs: eqn.rhs.clone(),
            typ: eqn.typ.clone(),
            ordering: eqn.ordering,
            ctx: &eqn.ctx,
            pos: eqn.pos,
            mode,
            allow_delay,
        };
        self.compare(state, cmp)
    }
}
