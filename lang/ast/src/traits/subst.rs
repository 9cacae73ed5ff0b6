use crate::{Bound, ClassCall, Exp, Free, LocalVar, MetaCall};

/// Conversion between terms over local variables and terms over a telescope.
///
/// `bind_tele(vars)` replaces every occurrence of `vars[i]` by the bound reference
/// `#i`; `inst_tele(args)` replaces every `#i` by `args[i]`. For a telescope of
/// distinct variables, `t.bind_tele(vars).inst_tele(vars)` is `t` again.
pub trait Substitutable: Sized {
    fn bind_tele(self, vars: &[LocalVar]) -> Self;

    fn inst_tele(self, args: &[Exp]) -> Self;
}

impl Substitutable for Exp {
    fn bind_tele(self, vars: &[LocalVar]) -> Self {
        match self {
            Exp::Free(Free { var }) => match vars.iter().position(|v| *v == var) {
                Some(idx) => Bound { idx }.into(),
                None => Free { var }.into(),
            },
            e => e.descent(&mut |child| child.bind_tele(vars)),
        }
    }

    fn inst_tele(self, args: &[Exp]) -> Self {
        match self {
            Exp::Bound(Bound { idx }) => match args.get(idx) {
                Some(arg) => arg.clone(),
                None => Bound { idx }.into(),
            },
            e => e.descent(&mut |child| child.inst_tele(args)),
        }
    }
}

impl<T: Substitutable> Substitutable for Vec<T> {
    fn bind_tele(self, vars: &[LocalVar]) -> Self {
        self.into_iter().map(|x| x.bind_tele(vars)).collect()
    }

    fn inst_tele(self, args: &[Exp]) -> Self {
        self.into_iter().map(|x| x.inst_tele(args)).collect()
    }
}

impl<T: Substitutable> Substitutable for Option<T> {
    fn bind_tele(self, vars: &[LocalVar]) -> Self {
        self.map(|x| x.bind_tele(vars))
    }

    fn inst_tele(self, args: &[Exp]) -> Self {
        self.map(|x| x.inst_tele(args))
    }
}

impl<T: Substitutable> Substitutable for Box<T> {
    fn bind_tele(self, vars: &[LocalVar]) -> Self {
        Box::new((*self).bind_tele(vars))
    }

    fn inst_tele(self, args: &[Exp]) -> Self {
        Box::new((*self).inst_tele(args))
    }
}

impl Substitutable for ClassCall {
    fn bind_tele(self, vars: &[LocalVar]) -> Self {
        ClassCall { class: self.class, args: self.args.bind_tele(vars) }
    }

    fn inst_tele(self, args: &[Exp]) -> Self {
        ClassCall { class: self.class, args: self.args.inst_tele(args) }
    }
}

impl Substitutable for MetaCall {
    fn bind_tele(self, vars: &[LocalVar]) -> Self {
        MetaCall { meta: self.meta, args: self.args.bind_tele(vars) }
    }

    fn inst_tele(self, args: &[Exp]) -> Self {
        MetaCall { meta: self.meta, args: self.args.inst_tele(args) }
    }
}

#[cfg(test)]
mod test {
    use std::rc::Rc;

    use super::*;
    use crate::{DataDef, DataCall, Dim};

    fn list(arg: Exp) -> Exp {
        let data = Rc::new(DataDef { name: "List".to_owned(), params: vec![] });
        DataCall { data, args: vec![arg] }.into()
    }

    #[test]
    fn bind_then_inst_is_identity() {
        let x = LocalVar::new("x", 0);
        let y = LocalVar::new("y", 1);
        let e = list(Free::new(y.clone()).into());
        let bound = e.clone().bind_tele(&[x.clone(), y.clone()]);
        assert_eq!(bound, list(Bound { idx: 1 }.into()));
        let args: Vec<Exp> = vec![Free::new(x).into(), Free::new(y).into()];
        assert_eq!(bound.inst_tele(&args), e);
    }

    #[test]
    fn inst_replaces_bound() {
        let e = list(Bound { idx: 0 }.into());
        assert_eq!(e.inst_tele(&[Dim::I0.into()]), list(Dim::I0.into()));
    }

    #[test]
    fn unbound_variables_are_kept() {
        let z = LocalVar::new("z", 7);
        let e = list(Free::new(z.clone()).into());
        assert_eq!(e.clone().bind_tele(&[LocalVar::new("x", 0)]), e);
    }
}
