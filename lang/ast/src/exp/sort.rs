use pretty::DocAllocator;
use tessera_lang_printer::theme::ThemeExt;
use tessera_lang_printer::tokens::TYPE;
use tessera_lang_printer::{Alloc, Builder, Precedence, Print, PrintCfg};

use super::Exp;

/// The universe `Type n`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Sort {
    pub level: u32,
}

impl Sort {
    pub fn zero() -> Self {
        Sort { level: 0 }
    }
}

impl From<Sort> for Exp {
    fn from(val: Sort) -> Self {
        Exp::Sort(val)
    }
}

impl Print for Sort {
    fn print_prec<'a>(
        &'a self,
        _cfg: &PrintCfg,
        alloc: &'a Alloc<'a>,
        _prec: Precedence,
    ) -> Builder<'a> {
        if self.level == 0 {
            alloc.keyword(TYPE)
        } else {
            alloc.keyword(TYPE).append(alloc.space()).append(alloc.text(self.level.to_string()))
        }
    }
}
