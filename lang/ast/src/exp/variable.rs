use pretty::DocAllocator;
use tessera_lang_printer::{Alloc, Builder, Precedence, Print, PrintCfg, tokens::HASH};

use super::Exp;
use crate::LocalVar;

/// An occurrence of a variable of the local context.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Free {
    pub var: LocalVar,
}

impl Free {
    pub fn new(var: LocalVar) -> Self {
        Free { var }
    }
}

impl From<Free> for Exp {
    fn from(val: Free) -> Self {
        Exp::Free(val)
    }
}

impl Print for Free {
    fn print_prec<'a>(
        &'a self,
        cfg: &PrintCfg,
        alloc: &'a Alloc<'a>,
        _prec: Precedence,
    ) -> Builder<'a> {
        self.var.print(cfg, alloc)
    }
}

/// A reference to the `idx`-th entry of an enclosing telescope.
///
/// Bound references only occur in definitions (parameter types, instance result types)
/// and in metavariable solutions; see [crate::Substitutable].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Bound {
    pub idx: usize,
}

impl From<Bound> for Exp {
    fn from(val: Bound) -> Self {
        Exp::Bound(val)
    }
}

impl Print for Bound {
    fn print_prec<'a>(
        &'a self,
        _cfg: &PrintCfg,
        alloc: &'a Alloc<'a>,
        _prec: Precedence,
    ) -> Builder<'a> {
        alloc.text(HASH).append(alloc.text(self.idx.to_string()))
    }
}
