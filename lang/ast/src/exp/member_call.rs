use std::rc::Rc;

use pretty::DocAllocator;
use tessera_lang_printer::theme::ThemeExt;
use tessera_lang_printer::tokens::DOT;
use tessera_lang_printer::{Alloc, Builder, Precedence, Print, PrintCfg};

use super::Exp;
use crate::ClassDef;

/// Projection of the `field`-th member of `class` out of an instance.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MemberCall {
    pub of: Box<Exp>,
    pub class: Rc<ClassDef>,
    pub field: usize,
}

impl From<MemberCall> for Exp {
    fn from(val: MemberCall) -> Self {
        Exp::MemberCall(val)
    }
}

impl Print for MemberCall {
    fn print_prec<'a>(
        &'a self,
        cfg: &PrintCfg,
        alloc: &'a Alloc<'a>,
        _prec: Precedence,
    ) -> Builder<'a> {
        let field = match self.class.members.get(self.field) {
            Some(member) => alloc.member(&member.name),
            None => alloc.text(self.field.to_string()),
        };
        self.of.print(cfg, alloc).append(DOT).append(field)
    }
}
