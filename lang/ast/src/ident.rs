use std::fmt;
use std::rc::Rc;

use derivative::Derivative;
use pretty::DocAllocator;
use tessera_lang_miette_util::codespan::Span;
use tessera_lang_printer::theme::ThemeExt;
use tessera_lang_printer::tokens::{HASH, QUESTION_MARK};
use tessera_lang_printer::{Alloc, Builder, Print, PrintCfg};

use crate::{ClassCall, Exp, Substitutable};

/// A variable bound in the local context of the definition being checked.
///
/// Two local variables are the same if they have the same `id`; the name is only
/// kept for prettyprinting.
#[derive(Debug, Clone, Derivative)]
#[derivative(Eq, PartialEq, Hash)]
pub struct LocalVar {
    #[derivative(PartialEq = "ignore", Hash = "ignore")]
    pub name: Rc<str>,
    pub id: u64,
}

impl LocalVar {
    pub fn new(name: &str, id: u64) -> Self {
        LocalVar { name: name.into(), id }
    }
}

impl fmt::Display for LocalVar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

impl Print for LocalVar {
    fn print<'a>(&'a self, cfg: &PrintCfg, alloc: &'a Alloc<'a>) -> Builder<'a> {
        if cfg.print_metavar_ids {
            alloc.text(&*self.name).append(alloc.text(format!("@{}", self.id)))
        } else {
            alloc.text(&*self.name)
        }
    }
}

/// What a solution of a metavariable is required to be.
#[derive(Debug, Clone)]
pub enum MetaVarReq {
    /// Nothing is known about the solution.
    Whatever,
    /// The solution must be a type.
    IsType,
    /// The solution must inhabit a class type.
    /// Such metavariables are solved by instance search.
    Class(ClassType),
}

/// The class type a metavariable must inhabit.
///
/// `class_call` lives in the context of the metavariable: its free variables have been
/// replaced by [crate::Bound] references to the metavariable's telescope (see
/// [ClassType::new]). Instantiating it with the arguments of a [crate::MetaCall]
/// yields the class type at the call site.
#[derive(Debug, Clone)]
pub struct ClassType {
    pub class_call: ClassCall,
}

impl ClassType {
    /// Bind the class call over the context `vars` of the metavariable.
    pub fn new(class_call: ClassCall, vars: &[LocalVar]) -> Self {
        ClassType { class_call: class_call.bind_tele(vars) }
    }

    pub fn inst_tele(&self, args: &[Exp]) -> ClassCall {
        self.class_call.clone().inst_tele(args)
    }
}

/// A metavariable which stands for an unknown term which
/// has to be determined during elaboration.
///
/// Metavariables are compared by their `id` only.
#[derive(Debug, Clone, Derivative)]
#[derivative(Eq, PartialEq, Hash)]
pub struct MetaVar {
    #[derivative(PartialEq = "ignore", Hash = "ignore")]
    pub span: Option<Span>,
    #[derivative(PartialEq = "ignore", Hash = "ignore")]
    pub name: Rc<str>,
    pub id: u64,
    /// Size of the context the metavariable was created in.
    /// Every call of the metavariable supplies this many arguments.
    #[derivative(PartialEq = "ignore", Hash = "ignore")]
    pub ctx_size: usize,
    #[derivative(PartialEq = "ignore", Hash = "ignore")]
    pub req: Rc<MetaVarReq>,
}

impl MetaVar {
    pub fn class_type(&self) -> Option<&ClassType> {
        match &*self.req {
            MetaVarReq::Class(class_type) => Some(class_type),
            MetaVarReq::Whatever | MetaVarReq::IsType => None,
        }
    }
}

impl Print for MetaVar {
    fn print<'a>(&'a self, cfg: &PrintCfg, alloc: &'a Alloc<'a>) -> Builder<'a> {
        let name = if cfg.print_metavar_ids {
            format!("{QUESTION_MARK}{}{HASH}{}", self.name, self.id)
        } else {
            format!("{QUESTION_MARK}{}", self.name)
        };
        alloc.meta(name)
    }
}
