//! Toplevel definitions referenced from terms.
//!
//! Definitions are shared through `Rc` and compared by name: within one elaboration
//! session, names of toplevel definitions are unique.

use std::rc::Rc;

use derivative::Derivative;
use pretty::DocAllocator;
use tessera_lang_printer::{Alloc, Builder, Print, PrintCfg, theme::ThemeExt};

use crate::{ClassCall, Exp};

/// A telescope entry `name : typ`.
#[derive(Debug, Clone)]
pub struct Param {
    pub name: String,
    pub typ: Exp,
}

/// A field of a class.
#[derive(Debug, Clone)]
pub struct MemberDef {
    pub name: String,
    pub typ: Exp,
}

/// A class declaration
///
/// ```text
/// class Monoid {
///   | carrier : Type
///   | unit : carrier
/// }
/// ```
///
/// A class call `Monoid(Nat)` fixes the values of the leading fields.
#[derive(Debug, Clone, Derivative)]
#[derivative(Eq, PartialEq, Hash)]
pub struct ClassDef {
    pub name: String,
    #[derivative(PartialEq = "ignore", Hash = "ignore")]
    pub members: Vec<MemberDef>,
}

/// A data type declaration with its parameter telescope.
#[derive(Debug, Clone, Derivative)]
#[derivative(Eq, PartialEq, Hash)]
pub struct DataDef {
    pub name: String,
    #[derivative(PartialEq = "ignore", Hash = "ignore")]
    pub params: Vec<Param>,
}

/// A function declaration.
///
/// Instance declarations are functions whose result is a class call. The result type
/// refers to the parameters through [crate::Bound] references (`#0` is the first
/// parameter).
#[derive(Debug, Clone, Derivative)]
#[derivative(Eq, PartialEq, Hash)]
pub struct FnDef {
    pub name: String,
    #[derivative(PartialEq = "ignore", Hash = "ignore")]
    pub params: Vec<Param>,
    #[derivative(PartialEq = "ignore", Hash = "ignore")]
    pub result: Exp,
}

impl FnDef {
    /// The class this function is an instance of, if its result is a class call.
    pub fn result_class(&self) -> Option<&ClassCall> {
        match &self.result {
            Exp::ClassCall(call) => Some(call),
            _ => None,
        }
    }
}

/// The head of a rigid type: a reference to a class or a data type.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Head {
    Class(Rc<ClassDef>),
    Data(Rc<DataDef>),
}

impl Head {
    pub fn name(&self) -> &str {
        match self {
            Head::Class(class) => &class.name,
            Head::Data(data) => &data.name,
        }
    }
}

impl Print for Head {
    fn print<'a>(&'a self, _cfg: &PrintCfg, alloc: &'a Alloc<'a>) -> Builder<'a> {
        alloc.typ(self.name())
    }
}

impl Print for FnDef {
    fn print<'a>(&'a self, _cfg: &PrintCfg, alloc: &'a Alloc<'a>) -> Builder<'a> {
        alloc.text(self.name.as_str())
    }
}
