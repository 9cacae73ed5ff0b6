use tessera_lang_printer::theme::ThemeExt;
use tessera_lang_printer::tokens::{I0, I1};
use tessera_lang_printer::{Alloc, Builder, Precedence, Print, PrintCfg};

use super::Exp;

/// The endpoints of the interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dim {
    I0,
    I1,
}

impl From<Dim> for Exp {
    fn from(val: Dim) -> Self {
        Exp::Dim(val)
    }
}

impl Print for Dim {
    fn print_prec<'a>(
        &'a self,
        _cfg: &PrintCfg,
        alloc: &'a Alloc<'a>,
        _prec: Precedence,
    ) -> Builder<'a> {
        match self {
            Dim::I0 => alloc.keyword(I0),
            Dim::I1 => alloc.keyword(I1),
        }
    }
}
