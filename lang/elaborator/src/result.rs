use miette::{Diagnostic, SourceSpan};
use thiserror::Error;

use tessera_lang_ast::Exp;
use tessera_lang_miette_util::ToMiette;
use tessera_lang_miette_util::codespan::Span;
use tessera_lang_printer::Print;

use crate::state::Eqn;

/// The result type specialized to internal errors.
pub type ElabResult<T = ()> = Result<T, Box<InternalError>>;

/// Diagnostics about metavariables. These are reported through a
/// [crate::reporter::Reporter]; solving continues or stops gracefully.
#[derive(Error, Diagnostic, Debug, Clone, PartialEq, Eq)]
pub enum MetaVarError {
    #[error("Cannot solve {} equation(s):\n  {}", .eqns.len(), .eqns.join("\n  "))]
    #[diagnostic(
        code("M-001"),
        help("Add type annotations to make the remaining metavariables determined.")
    )]
    CannotSolveEquations {
        eqns: Vec<String>,
        #[label]
        span: Option<SourceSpan>,
    },
    /// Equations outside the pattern fragment which were solved with a possibly
    /// non-unique solution.
    #[error("Solved {} equation(s) with a non-unique solution:\n  {}", .eqns.len(), .eqns.join("\n  "))]
    #[diagnostic(code("M-002"), severity(Warning))]
    DidSomethingBad {
        eqns: Vec<String>,
        #[label]
        span: Option<SourceSpan>,
    },
    #[error("The equation {eqn} does not hold")]
    #[diagnostic(code("M-003"))]
    EquationFailed {
        eqn: String,
        #[label]
        span: Option<SourceSpan>,
    },
}

impl MetaVarError {
    pub fn cannot_solve(eqns: &[Eqn]) -> Self {
        Self::CannotSolveEquations { eqns: print_all(eqns), span: first_pos(eqns).to_miette() }
    }

    pub fn did_something_bad(eqns: &[Eqn]) -> Self {
        Self::DidSomethingBad { eqns: print_all(eqns), span: first_pos(eqns).to_miette() }
    }

    pub fn equation_failed(eqn: &Eqn) -> Self {
        Self::EquationFailed { eqn: eqn.print_to_string(None), span: eqn.pos.to_miette() }
    }
}

fn print_all(eqns: &[Eqn]) -> Vec<String> {
    eqns.iter().map(|eqn| eqn.print_to_string(None)).collect()
}

fn first_pos(eqns: &[Eqn]) -> Option<Span> {
    eqns.iter().find_map(|eqn| eqn.pos)
}

/// Violations of invariants of the constraint store.
#[derive(Error, Diagnostic, Debug, Clone, PartialEq, Eq)]
pub enum InternalError {
    #[error("The equation {eqn} is not blocked by any unsolved metavariable")]
    #[diagnostic(code("E-001"))]
    EquationWithoutBlocker {
        eqn: String,
        #[label]
        span: Option<SourceSpan>,
    },
    #[error("Cannot connect {lhs} and {rhs}")]
    #[diagnostic(code("E-002"), help("Only interval variables and endpoints can be connected."))]
    UnsupportedConnection { lhs: String, rhs: String },
}

impl InternalError {
    pub fn equation_without_blocker(eqn: &Eqn) -> Box<Self> {
        Self::EquationWithoutBlocker { eqn: eqn.print_to_string(None), span: eqn.pos.to_miette() }
            .into()
    }

    pub fn unsupported_connection(lhs: &Exp, rhs: &Exp) -> Box<Self> {
        Self::UnsupportedConnection { lhs: lhs.print_to_string(None), rhs: rhs.print_to_string(None) }
            .into()
    }
}
