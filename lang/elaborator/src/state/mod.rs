//! The constraint store of an elaboration session.
//!
//! The type checker registers the equations it cannot decide right away with
//! [TyckState::add_eqn]. Each equation is blocked by the unsolved metavariables that
//! occur in it. [TyckState::solve_metas] repeatedly re-checks the equations whose
//! blocking metavariable has been solved in the meantime, until no more progress is made.

use std::mem;
use std::rc::Rc;

use log::{debug, trace};

use tessera_lang_ast::{Exp, MetaVar, MetaVarReq, Solutions};
use tessera_lang_miette_util::codespan::Span;
use tessera_lang_printer::Print;

use crate::reporter::Reporter;
use crate::result::{ElabResult, InternalError, MetaVarError};
use crate::settings::ElabSettings;
use crate::unifier::{CompareMode, Decision, Unifier};

mod connection;
mod eqn;
mod solution;

use connection::Connections;
pub use eqn::Eqn;

/// A metavariable which blocks at least one queued equation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveMeta {
    /// Position of the equation which activated the metavariable
    pub pos: Option<Span>,
    pub meta: MetaVar,
}

#[derive(Debug, Clone)]
pub struct TyckState {
    eqns: Vec<Eqn>,
    active_metas: Vec<ActiveMeta>,
    solutions: Solutions,
    connections: Connections,
    next_meta_id: u64,
    settings: ElabSettings,
}

impl TyckState {
    pub fn new(settings: ElabSettings) -> Self {
        TyckState {
            eqns: Vec::new(),
            active_metas: Vec::new(),
            solutions: Solutions::default(),
            connections: Connections::new(),
            next_meta_id: 0,
            settings,
        }
    }

    pub fn settings(&self) -> &ElabSettings {
        &self.settings
    }

    pub fn eqns(&self) -> &[Eqn] {
        &self.eqns
    }

    pub fn active_metas(&self) -> &[ActiveMeta] {
        &self.active_metas
    }

    pub fn solutions(&self) -> &Solutions {
        &self.solutions
    }

    /// Create a metavariable with a fresh id.
    pub fn fresh_meta(
        &mut self,
        name: &str,
        ctx_size: usize,
        req: MetaVarReq,
        span: Option<Span>,
    ) -> MetaVar {
        let id = self.next_meta_id;
        self.next_meta_id += 1;
        MetaVar { span, name: name.into(), id, ctx_size, req: Rc::new(req) }
    }

    /// Record `candidate` as the solution of `meta`.
    /// The caller is responsible for `meta` not occurring in `candidate`.
    pub fn solve(&mut self, meta: MetaVar, candidate: Exp) {
        trace!("{} := {}", meta.print_trace(), candidate.print_trace());
        self.solutions.insert(meta, candidate);
    }

    /// Queue an equation. Every unsolved metavariable occurring in it becomes active.
    pub fn add_eqn(&mut self, eqn: Eqn) -> ElabResult {
        let lhs: Exp = eqn.lhs.clone().into();
        let mut blockers = Vec::new();
        for term in [&lhs, &eqn.rhs] {
            blockers = term.fold(blockers, &mut |mut acc, e| {
                if let Exp::MetaCall(call) = e {
                    if !self.solutions.contains_key(&call.meta) {
                        acc.push(call.meta.clone());
                    }
                }
                acc
            });
        }

        if blockers.is_empty() {
            return Err(InternalError::equation_without_blocker(&eqn));
        }

        trace!("add equation {}", eqn.print_trace());
        self.active_metas.extend(blockers.into_iter().map(|meta| ActiveMeta { pos: eqn.pos, meta }));
        self.eqns.push(eqn);
        Ok(())
    }

    /// Check a queued equation again. Without `allow_delay`, solutions outside the
    /// pattern fragment are accepted.
    pub fn solve_eqn<U: Unifier + ?Sized>(
        &mut self,
        unifier: &mut U,
        eqn: &Eqn,
        allow_delay: bool,
    ) -> ElabResult<Decision> {
        let mode = if allow_delay { CompareMode::Normal } else { CompareMode::Vague };
        unifier.check_eqn(self, eqn, mode, allow_delay)
    }

    /// Re-check the equations blocked on metavariables which have been solved.
    ///
    /// Returns whether any active metavariable was discharged.
    pub fn simplify<U, R>(&mut self, unifier: &mut U, reporter: &mut R) -> ElabResult<bool>
    where
        U: Unifier + ?Sized,
        R: Reporter + ?Sized,
    {
        let (discharged, active): (Vec<_>, Vec<_>) = mem::take(&mut self.active_metas)
            .into_iter()
            .partition(|active| self.solutions.contains_key(&active.meta));
        self.active_metas = active;

        for ActiveMeta { meta, .. } in &discharged {
            let (ready, waiting): (Vec<_>, Vec<_>) =
                mem::take(&mut self.eqns).into_iter().partition(|eqn| eqn.lhs.meta == *meta);
            self.eqns = waiting;

            for eqn in ready {
                trace!("recheck {}", eqn.print_trace());
                if self.solve_eqn(unifier, &eqn, true)? == Decision::No {
                    reporter.report(MetaVarError::equation_failed(&eqn));
                }
            }
        }

        Ok(!discharged.is_empty())
    }

    /// Solve the queued equations as far as possible.
    ///
    /// Stuck equations are reported as [MetaVarError::CannotSolveEquations]. Equations
    /// which could only be solved heuristically are reported as
    /// [MetaVarError::DidSomethingBad].
    pub fn solve_metas<U, R>(&mut self, unifier: &mut U, reporter: &mut R) -> ElabResult
    where
        U: Unifier + ?Sized,
        R: Reporter + ?Sized,
    {
        let mut post_simplification_size = None;
        let mut evil_eqns = Vec::new();

        while !self.eqns.is_empty() {
            while self.simplify(unifier, reporter)? {}

            let frozen_eqns = self.eqns.clone();
            debug!("{} equation(s) left after simplification", frozen_eqns.len());
            if frozen_eqns.is_empty() {
                break;
            }
            if post_simplification_size == Some(frozen_eqns.len()) || !self.settings.heuristic_fallback {
                reporter.report(MetaVarError::cannot_solve(&frozen_eqns));
                return Ok(());
            }
            post_simplification_size = Some(frozen_eqns.len());

            for eqn in frozen_eqns {
                if self.solve_eqn(unifier, &eqn, false)? == Decision::Yes {
                    evil_eqns.push(eqn);
                }
            }
        }

        if !evil_eqns.is_empty() {
            reporter.report(MetaVarError::did_something_bad(&evil_eqns));
        }
        Ok(())
    }

    /// Drop all equations, active metavariables and solutions.
    pub fn clear_tmp(&mut self) {
        self.eqns.clear();
        self.active_metas.clear();
        self.solutions.clear();
    }
}
