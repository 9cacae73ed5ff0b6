//! The local context of the definition being checked.

use pretty::DocAllocator;
use tessera_lang_printer::tokens::{COLON, COMMA};
use tessera_lang_printer::{Alloc, Builder, Print, PrintCfg};

use crate::{Exp, LocalVar};

/// Local variables together with their types, outermost first.
#[derive(Debug, Clone, Default)]
pub struct LocalCtx {
    bound: Vec<(LocalVar, Exp)>,
}

impl LocalCtx {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn push(&mut self, var: LocalVar, typ: Exp) {
        self.bound.push((var, typ));
    }

    /// The type of `var`, if it is bound in this context.
    pub fn lookup(&self, var: &LocalVar) -> Option<&Exp> {
        self.bound.iter().rev().find(|(v, _)| v == var).map(|(_, typ)| typ)
    }

    pub fn contains(&self, var: &LocalVar) -> bool {
        self.lookup(var).is_some()
    }

    pub fn len(&self) -> usize {
        self.bound.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bound.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &(LocalVar, Exp)> {
        self.bound.iter()
    }

    /// The bound variables in order. A metavariable created in this context
    /// is called with exactly these variables.
    pub fn vars(&self) -> Vec<LocalVar> {
        self.bound.iter().map(|(var, _)| var.clone()).collect()
    }
}

impl Print for LocalCtx {
    fn print<'a>(&'a self, cfg: &PrintCfg, alloc: &'a Alloc<'a>) -> Builder<'a> {
        let iter = self.bound.iter().map(|(var, typ)| {
            var.print(cfg, alloc).append(alloc.space()).append(COLON).append(alloc.space()).append(
                typ.print(cfg, alloc),
            )
        });
        alloc.intersperse(iter, alloc.text(COMMA).append(alloc.line())).group()
    }
}
