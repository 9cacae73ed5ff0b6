use std::slice;

use tessera_lang_printer::{Alloc, Builder, Precedence, Print, PrintCfg};

use crate::{Head, LocalVar};

mod call;
mod dim;
mod member_call;
mod meta_call;
mod sort;
mod variable;

pub use call::*;
pub use dim::*;
pub use member_call::*;
pub use meta_call::*;
pub use sort::*;
pub use variable::*;

// Exp
//
//

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Exp {
    Free(Free),
    Bound(Bound),
    Dim(Dim),
    Sort(Sort),
    ClassCall(ClassCall),
    DataCall(DataCall),
    ConCall(ConCall),
    FnCall(FnCall),
    MetaCall(MetaCall),
    MemberCall(MemberCall),
}

impl Exp {
    /// The immediate subterms of this term, left to right.
    pub fn children(&self) -> &[Exp] {
        match self {
            Exp::Free(_) | Exp::Bound(_) | Exp::Dim(_) | Exp::Sort(_) => &[],
            Exp::ClassCall(e) => &e.args,
            Exp::DataCall(e) => &e.args,
            Exp::ConCall(e) => &e.args,
            Exp::FnCall(e) => &e.args,
            Exp::MetaCall(e) => &e.args,
            Exp::MemberCall(e) => slice::from_ref(&*e.of),
        }
    }

    /// Rebuild this term with `f` applied to each immediate subterm.
    pub fn descent<F>(self, f: &mut F) -> Exp
    where
        F: FnMut(Exp) -> Exp,
    {
        match self {
            e @ (Exp::Free(_) | Exp::Bound(_) | Exp::Dim(_) | Exp::Sort(_)) => e,
            Exp::ClassCall(ClassCall { class, args }) => {
                ClassCall { class, args: map_args(args, f) }.into()
            }
            Exp::DataCall(DataCall { data, args }) => DataCall { data, args: map_args(args, f) }.into(),
            Exp::ConCall(ConCall { data, name, args }) => {
                ConCall { data, name, args: map_args(args, f) }.into()
            }
            Exp::FnCall(FnCall { def, args }) => FnCall { def, args: map_args(args, f) }.into(),
            Exp::MetaCall(MetaCall { meta, args }) => MetaCall { meta, args: map_args(args, f) }.into(),
            Exp::MemberCall(MemberCall { of, class, field }) => {
                MemberCall { of: Box::new(f(*of)), class, field }.into()
            }
        }
    }

    /// Pre-order fold over this term and all of its subterms.
    pub fn fold<A, F>(&self, init: A, f: &mut F) -> A
    where
        F: FnMut(A, &Exp) -> A,
    {
        let mut acc = f(init, self);
        for child in self.children() {
            acc = child.fold(acc, f);
        }
        acc
    }

    pub fn as_free(&self) -> Option<&LocalVar> {
        match self {
            Exp::Free(Free { var }) => Some(var),
            _ => None,
        }
    }

    pub fn as_meta_call(&self) -> Option<&MetaCall> {
        match self {
            Exp::MetaCall(call) => Some(call),
            _ => None,
        }
    }

    pub fn as_class_call(&self) -> Option<&ClassCall> {
        match self {
            Exp::ClassCall(call) => Some(call),
            _ => None,
        }
    }

    /// The head of a rigid type, if this term is a class or data call.
    pub fn head(&self) -> Option<Head> {
        match self {
            Exp::ClassCall(call) => Some(Head::Class(call.class.clone())),
            Exp::DataCall(call) => Some(Head::Data(call.data.clone())),
            _ => None,
        }
    }
}

fn map_args<F>(args: Vec<Exp>, f: &mut F) -> Vec<Exp>
where
    F: FnMut(Exp) -> Exp,
{
    args.into_iter().map(f).collect()
}

impl Print for Exp {
    fn print_prec<'a>(
        &'a self,
        cfg: &PrintCfg,
        alloc: &'a Alloc<'a>,
        prec: Precedence,
    ) -> Builder<'a> {
        match self {
            Exp::Free(e) => e.print_prec(cfg, alloc, prec),
            Exp::Bound(e) => e.print_prec(cfg, alloc, prec),
            Exp::Dim(e) => e.print_prec(cfg, alloc, prec),
            Exp::Sort(e) => e.print_prec(cfg, alloc, prec),
            Exp::ClassCall(e) => e.print_prec(cfg, alloc, prec),
            Exp::DataCall(e) => e.print_prec(cfg, alloc, prec),
            Exp::ConCall(e) => e.print_prec(cfg, alloc, prec),
            Exp::FnCall(e) => e.print_prec(cfg, alloc, prec),
            Exp::MetaCall(e) => e.print_prec(cfg, alloc, prec),
            Exp::MemberCall(e) => e.print_prec(cfg, alloc, prec),
        }
    }
}

#[cfg(test)]
mod test {
    use std::rc::Rc;

    use super::*;
    use crate::{ClassDef, MemberDef};

    fn monoid() -> Rc<ClassDef> {
        Rc::new(ClassDef {
            name: "Monoid".to_owned(),
            members: vec![MemberDef { name: "carrier".to_owned(), typ: Sort::zero().into() }],
        })
    }

    #[test]
    fn fold_visits_all_subterms() {
        let x = LocalVar::new("x", 0);
        let e: Exp = ClassCall {
            class: monoid(),
            args: vec![Free::new(x).into(), Sort::zero().into()],
        }
        .into();
        let count = e.fold(0, &mut |n, _| n + 1);
        assert_eq!(count, 3);
    }

    #[test]
    fn descent_rewrites_children_only() {
        let x = LocalVar::new("x", 0);
        let e: Exp = ClassCall { class: monoid(), args: vec![Free::new(x).into()] }.into();
        let e = e.descent(&mut |_| Dim::I1.into());
        assert_eq!(e, Exp::ClassCall(ClassCall { class: monoid(), args: vec![Dim::I1.into()] }));
    }

    #[test]
    fn print_class_call() {
        let x = LocalVar::new("x", 0);
        let e: Exp = ClassCall { class: monoid(), args: vec![Free::new(x).into()] }.into();
        assert_eq!(e.print_to_string(None), "Monoid(x)");
    }
}
