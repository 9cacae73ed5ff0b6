use pretty::DocAllocator;
use tessera_lang_ast::ctx::LocalCtx;
use tessera_lang_ast::{Exp, MetaCall};
use tessera_lang_miette_util::codespan::Span;
use tessera_lang_printer::{Alloc, Builder, Print, PrintCfg};

use crate::unifier::Ordering;

/// A deferred comparison `ctx |- lhs <ordering> rhs : typ` whose left side is an
/// unsolved metavariable call.
#[derive(Debug, Clone)]
pub struct Eqn {
    pub lhs: MetaCall,
    pub rhs: Exp,
    pub typ: Option<Exp>,
    pub ordering: Ordering,
    pub pos: Option<Span>,
    pub ctx: LocalCtx,
}

impl Print for Eqn {
    fn print<'a>(&'a self, cfg: &PrintCfg, alloc: &'a Alloc<'a>) -> Builder<'a> {
        self.lhs
            .print(cfg, alloc)
            .append(alloc.space())
            .append(self.ordering.symbol())
            .append(alloc.line())
            .append(self.rhs.print(cfg, alloc))
            .group()
    }
}
