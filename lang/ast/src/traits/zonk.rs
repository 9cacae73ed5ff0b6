use crate::{ClassCall, Exp, HashMap, MetaCall, MetaVar, Substitutable};

/// Solutions of metavariables.
///
/// A solution lives in the telescope of its metavariable: argument `i` of a
/// [MetaCall] is referred to as `#i`.
pub type Solutions = HashMap<MetaVar, Exp>;

/// Replace solved metavariables by their solutions.
pub trait Zonk: Sized {
    fn zonk(self, solutions: &Solutions) -> Self;
}

impl Zonk for Exp {
    fn zonk(self, solutions: &Solutions) -> Self {
        match self {
            Exp::MetaCall(MetaCall { meta, args }) => {
                let args = args.zonk(solutions);
                match solutions.get(&meta) {
                    Some(solution) => solution.clone().inst_tele(&args).zonk(solutions),
                    None => MetaCall { meta, args }.into(),
                }
            }
            e => e.descent(&mut |child| child.zonk(solutions)),
        }
    }
}

impl<T: Zonk> Zonk for Vec<T> {
    fn zonk(self, solutions: &Solutions) -> Self {
        self.into_iter().map(|x| x.zonk(solutions)).collect()
    }
}

impl<T: Zonk> Zonk for Option<T> {
    fn zonk(self, solutions: &Solutions) -> Self {
        self.map(|x| x.zonk(solutions))
    }
}

impl Zonk for ClassCall {
    fn zonk(self, solutions: &Solutions) -> Self {
        ClassCall { class: self.class, args: self.args.zonk(solutions) }
    }
}

#[cfg(test)]
mod test {
    use std::rc::Rc;

    use super::*;
    use crate::{Bound, DataCall, DataDef, Free, LocalVar, MetaVarReq};

    #[test]
    fn zonk_instantiates_solution() {
        let meta =
            MetaVar { span: None, name: "m".into(), id: 0, ctx_size: 1, req: Rc::new(MetaVarReq::Whatever) };
        let data = Rc::new(DataDef { name: "List".to_owned(), params: vec![] });
        let mut solutions = Solutions::default();
        solutions.insert(meta.clone(), DataCall { data: data.clone(), args: vec![Bound { idx: 0 }.into()] }.into());

        let x = LocalVar::new("x", 4);
        let e: Exp = MetaCall::in_ctx(meta, &[x.clone()]).into();
        assert_eq!(e.zonk(&solutions), Exp::DataCall(DataCall { data, args: vec![Free::new(x).into()] }));
    }
}
