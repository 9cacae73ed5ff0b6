//! A syntactic unifier with dynamic pattern unification for metavariables.
//!
//! Two terms are compared structurally after replacing solved metavariables by their
//! solutions. An equation `?m(x_1, ..., x_n) = t` is solved with `?m := t[x_i := #i]`
//! if the `x_i` are distinct variables, all free variables of `t` are among them and
//! `?m` does not occur in `t`. Equations outside this fragment are deferred.
//!
//! It is based on the following references:
//!
//! * Adam Gundry and Conor McBride. "A tutorial implementation of dynamic pattern unification." (2013).
//! * András Kovács's elaboration-zoo (https://github.com/AndrasKovacs/elaboration-zoo)

use log::trace;

use tessera_lang_ast::*;
use tessera_lang_printer::Print;

use crate::result::ElabResult;
use crate::state::{Eqn, TyckState};

use super::{CompareMode, Comparison, Decision, Maybe, No, Ordering, Unifier, Yes};

/// A pending comparison of two subterms.
#[derive(Debug, Clone)]
struct Constraint {
    lhs: Exp,
    rhs: Exp,
    ordering: Ordering,
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SyntacticUnifier;

impl SyntacticUnifier {
    pub fn new() -> Self {
        SyntacticUnifier
    }
}

impl Unifier for SyntacticUnifier {
    fn compare(&mut self, state: &mut TyckState, cmp: Comparison<'_>) -> ElabResult<Decision> {
        trace!(
            "{} |- {} {} {}",
            cmp.ctx.print_trace(),
            cmp.lhs.print_trace(),
            cmp.ordering.symbol(),
            cmp.rhs.print_trace()
        );
        let Comparison { lhs, rhs, ordering, .. } = cmp.clone();
        let mut ctx = Ctx { cmp, constraints: vec![Constraint { lhs, rhs, ordering }] };
        let decision = ctx.unify(state)?;
        trace!("decision = {decision:?}");
        Ok(decision)
    }
}

struct Ctx<'a> {
    /// The comparison which is being decided
    cmp: Comparison<'a>,
    /// Constraints that have not yet been solved
    constraints: Vec<Constraint>,
}

impl Ctx<'_> {
    fn unify(&mut self, state: &mut TyckState) -> ElabResult<Decision> {
        let mut decision = Yes;
        while let Some(constraint) = self.constraints.pop() {
            decision = decision.and(self.unify_eqn(state, constraint)?);
            if decision == No {
                return Ok(No);
            }
        }
        Ok(decision)
    }

    fn add_args(&mut self, lhs: &[Exp], rhs: &[Exp]) -> Decision {
        if lhs.len() != rhs.len() {
            return No;
        }
        let constraints = lhs.iter().zip(rhs).map(|(lhs, rhs)| Constraint {
            lhs: lhs.clone(),
            rhs: rhs.clone(),
            ordering: Ordering::Eq,
        });
        self.constraints.extend(constraints);
        Yes
    }

    fn unify_eqn(&mut self, state: &mut TyckState, constraint: Constraint) -> ElabResult<Decision> {
        let Constraint { lhs, rhs, ordering } = constraint;
        let lhs = lhs.zonk(state.solutions());
        let rhs = rhs.zonk(state.solutions());

        if lhs == rhs {
            return Ok(Yes);
        }

        let decision = match (lhs, rhs) {
            (Exp::MetaCall(call), other) => self.solve_meta_call(state, call, other, ordering)?,
            (other, Exp::MetaCall(call)) => {
                self.solve_meta_call(state, call, other, ordering.flip())?
            }
            (lhs @ (Exp::Free(_) | Exp::Dim(_)), rhs @ (Exp::Free(_) | Exp::Dim(_))) => {
                state.is_connected(&lhs, &rhs).into()
            }
            (Exp::Sort(Sort { level: l }), Exp::Sort(Sort { level: r })) => match ordering {
                Ordering::Eq => (l == r).into(),
                Ordering::Lt => (l <= r).into(),
                Ordering::Gt => (l >= r).into(),
            },
            (Exp::ClassCall(l), Exp::ClassCall(r)) if l.class == r.class => {
                self.add_args(&l.args, &r.args)
            }
            (Exp::DataCall(l), Exp::DataCall(r)) if l.data == r.data => {
                self.add_args(&l.args, &r.args)
            }
            (Exp::ConCall(l), Exp::ConCall(r)) if l.data == r.data && l.name == r.name => {
                self.add_args(&l.args, &r.args)
            }
            (Exp::FnCall(l), Exp::FnCall(r)) if l.def == r.def => self.add_args(&l.args, &r.args),
            (Exp::MemberCall(l), Exp::MemberCall(r)) if l.class == r.class && l.field == r.field => {
                self.constraints.push(Constraint { lhs: *l.of, rhs: *r.of, ordering: Ordering::Eq });
                Yes
            }
            // Projections and function calls may still compute to something else.
            (Exp::MemberCall(_) | Exp::FnCall(_), _) | (_, Exp::MemberCall(_) | Exp::FnCall(_))
                if self.cmp.mode == CompareMode::InstanceFiltering =>
            {
                Maybe
            }
            _ => No,
        };
        Ok(decision)
    }

    /// Decide `call <ordering> other` where `call` is an unsolved metavariable call.
    fn solve_meta_call(
        &mut self,
        state: &mut TyckState,
        call: MetaCall,
        other: Exp,
        ordering: Ordering,
    ) -> ElabResult<Decision> {
        if self.cmp.mode == CompareMode::InstanceFiltering {
            return Ok(Maybe);
        }

        if other.occurs_meta(&call.meta) {
            trace!("{} occurs in {}", call.meta.print_trace(), other.print_trace());
            return Ok(No);
        }

        if let Some(vars) = call.pattern_vars() {
            if other.free_vars().iter().all(|var| vars.contains(var)) {
                state.solve(call.meta, other.bind_tele(&vars));
                return Ok(Yes);
            }
        }

        if self.cmp.mode == CompareMode::Vague {
            if let Some(solution) = abstract_args(other.clone(), &call.args) {
                trace!("vague solution for {}", call.meta.print_trace());
                state.solve(call.meta, solution);
                return Ok(Yes);
            }
        }

        if !self.cmp.allow_delay {
            return Ok(No);
        }

        state.add_eqn(Eqn {
            lhs: call,
            rhs: other,
            typ: self.cmp.typ.clone(),
            ordering,
            pos: self.cmp.pos,
            ctx: self.cmp.ctx.clone(),
        })?;
        Ok(Maybe)
    }
}

/// Abstract every subterm of `exp` which is syntactically equal to an argument.
/// Fails if a local variable is left over.
fn abstract_args(exp: Exp, args: &[Exp]) -> Option<Exp> {
    fn go(exp: Exp, args: &[Exp]) -> Exp {
        match args.iter().position(|arg| *arg == exp) {
            Some(idx) => Bound { idx }.into(),
            None => exp.descent(&mut |child| go(child, args)),
        }
    }

    let solution = go(exp, args);
    solution.free_vars().is_empty().then_some(solution)
}
