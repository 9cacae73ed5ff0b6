use crate::{Exp, LocalVar, MetaCall, MetaVar};

pub trait Occurs {
    /// Whether `meta` is called anywhere in `self`.
    fn occurs_meta(&self, meta: &MetaVar) -> bool;

    /// Whether `var` occurs free in `self`.
    fn occurs_var(&self, var: &LocalVar) -> bool;
}

impl Occurs for Exp {
    fn occurs_meta(&self, meta: &MetaVar) -> bool {
        self.fold(false, &mut |found, e| {
            found || matches!(e, Exp::MetaCall(MetaCall { meta: m, .. }) if m == meta)
        })
    }

    fn occurs_var(&self, var: &LocalVar) -> bool {
        self.fold(false, &mut |found, e| found || e.as_free() == Some(var))
    }
}

impl<T: Occurs> Occurs for [T] {
    fn occurs_meta(&self, meta: &MetaVar) -> bool {
        self.iter().any(|x| x.occurs_meta(meta))
    }

    fn occurs_var(&self, var: &LocalVar) -> bool {
        self.iter().any(|x| x.occurs_var(var))
    }
}
