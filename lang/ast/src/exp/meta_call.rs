use tessera_lang_printer::{Alloc, Builder, Precedence, Print, PrintCfg};

use super::Exp;
use crate::{LocalVar, MetaVar};

/// A metavariable applied to the variables of the context it was created in.
///
/// Several calls may refer to the same [MetaVar], each with the arguments of the
/// context it occurs in.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MetaCall {
    pub meta: MetaVar,
    pub args: Vec<Exp>,
}

impl MetaCall {
    /// The call of `meta` in the context `vars`, applying it to each variable.
    pub fn in_ctx(meta: MetaVar, vars: &[LocalVar]) -> Self {
        let args = vars.iter().cloned().map(|var| super::Free::new(var).into()).collect();
        MetaCall { meta, args }
    }

    /// If every argument is a distinct local variable, those variables in order.
    ///
    /// Equations `?m(x_1, ..., x_n) = t` with such a call on the left are in the
    /// pattern fragment and have at most one solution.
    pub fn pattern_vars(&self) -> Option<Vec<LocalVar>> {
        let mut vars: Vec<LocalVar> = Vec::with_capacity(self.args.len());
        for arg in &self.args {
            let var = arg.as_free()?;
            if vars.contains(var) {
                return None;
            }
            vars.push(var.clone());
        }
        Some(vars)
    }
}

impl From<MetaCall> for Exp {
    fn from(val: MetaCall) -> Self {
        Exp::MetaCall(val)
    }
}

impl Print for MetaCall {
    fn print_prec<'a>(
        &'a self,
        cfg: &PrintCfg,
        alloc: &'a Alloc<'a>,
        _prec: Precedence,
    ) -> Builder<'a> {
        self.meta.print(cfg, alloc).append(self.args.print(cfg, alloc))
    }
}

#[cfg(test)]
mod test {
    use std::rc::Rc;

    use super::*;
    use crate::{Dim, Free, MetaVarReq};

    fn meta() -> MetaVar {
        MetaVar { span: None, name: "m".into(), id: 3, ctx_size: 2, req: Rc::new(MetaVarReq::Whatever) }
    }

    #[test]
    fn distinct_vars_are_a_pattern() {
        let vars = vec![LocalVar::new("x", 0), LocalVar::new("y", 1)];
        let call = MetaCall::in_ctx(meta(), &vars);
        assert_eq!(call.pattern_vars(), Some(vars));
    }

    #[test]
    fn repeated_vars_are_not_a_pattern() {
        let x = LocalVar::new("x", 0);
        let call = MetaCall { meta: meta(), args: vec![Free::new(x.clone()).into(), Free::new(x).into()] };
        assert_eq!(call.pattern_vars(), None);
    }

    #[test]
    fn non_variables_are_not_a_pattern() {
        let call = MetaCall { meta: meta(), args: vec![Dim::I0.into()] };
        assert_eq!(call.pattern_vars(), None);
    }

    #[test]
    fn print_with_ids() {
        let call = MetaCall::in_ctx(meta(), &[LocalVar::new("x", 0)]);
        assert_eq!(call.print_to_string(None), "?m(x)");
        assert_eq!(call.print_trace(), "?m#3(x@0)");
    }
}
