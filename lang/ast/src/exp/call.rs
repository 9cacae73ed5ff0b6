use std::rc::Rc;

use pretty::DocAllocator;
use tessera_lang_printer::theme::ThemeExt;
use tessera_lang_printer::{Alloc, Builder, Precedence, Print, PrintCfg};

use super::Exp;
use crate::{ClassDef, DataDef, FnDef};

/// A class type `C(a_1, ..., a_n)`.
///
/// The arguments fix the values of the first `n` fields of the class; a class call
/// may supply fewer arguments than the class has fields.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ClassCall {
    pub class: Rc<ClassDef>,
    pub args: Vec<Exp>,
}

impl ClassCall {
    /// The value the `idx`-th field of the class is fixed to, if any.
    pub fn field(&self, idx: usize) -> Option<&Exp> {
        self.args.get(idx)
    }
}

impl From<ClassCall> for Exp {
    fn from(val: ClassCall) -> Self {
        Exp::ClassCall(val)
    }
}

impl Print for ClassCall {
    fn print_prec<'a>(
        &'a self,
        cfg: &PrintCfg,
        alloc: &'a Alloc<'a>,
        _prec: Precedence,
    ) -> Builder<'a> {
        alloc.typ(&self.class.name).append(self.args.print(cfg, alloc))
    }
}

/// A fully applied data type `D(a_1, ..., a_n)`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DataCall {
    pub data: Rc<DataDef>,
    pub args: Vec<Exp>,
}

impl From<DataCall> for Exp {
    fn from(val: DataCall) -> Self {
        Exp::DataCall(val)
    }
}

impl Print for DataCall {
    fn print_prec<'a>(
        &'a self,
        cfg: &PrintCfg,
        alloc: &'a Alloc<'a>,
        _prec: Precedence,
    ) -> Builder<'a> {
        alloc.typ(&self.data.name).append(self.args.print(cfg, alloc))
    }
}

/// A constructor of the data type `data` applied to arguments.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ConCall {
    pub data: Rc<DataDef>,
    pub name: String,
    pub args: Vec<Exp>,
}

impl From<ConCall> for Exp {
    fn from(val: ConCall) -> Self {
        Exp::ConCall(val)
    }
}

impl Print for ConCall {
    fn print_prec<'a>(
        &'a self,
        cfg: &PrintCfg,
        alloc: &'a Alloc<'a>,
        _prec: Precedence,
    ) -> Builder<'a> {
        alloc.ctor(&self.name).append(self.args.print(cfg, alloc))
    }
}

/// A call of a toplevel function, e.g. a global instance applied to its parameters.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FnCall {
    pub def: Rc<FnDef>,
    pub args: Vec<Exp>,
}

impl From<FnCall> for Exp {
    fn from(val: FnCall) -> Self {
        Exp::FnCall(val)
    }
}

impl Print for FnCall {
    fn print_prec<'a>(
        &'a self,
        cfg: &PrintCfg,
        alloc: &'a Alloc<'a>,
        _prec: Precedence,
    ) -> Builder<'a> {
        alloc.text(self.def.name.as_str()).append(self.args.print(cfg, alloc))
    }
}
