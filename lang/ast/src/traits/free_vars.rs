use crate::{Exp, HashSet, LocalVar};

pub trait FreeVars {
    /// The local variables occurring in `self`.
    fn free_vars(&self) -> HashSet<LocalVar>;
}

impl FreeVars for Exp {
    fn free_vars(&self) -> HashSet<LocalVar> {
        self.fold(HashSet::default(), &mut |mut fvs, e| {
            if let Some(var) = e.as_free() {
                fvs.insert(var.clone());
            }
            fvs
        })
    }
}

#[cfg(test)]
mod test {
    use std::rc::Rc;

    use super::*;
    use crate::{ClassCall, ClassDef, Free};

    #[test]
    fn collects_nested_variables() {
        let class = Rc::new(ClassDef { name: "Eq".to_owned(), members: vec![] });
        let x = LocalVar::new("x", 0);
        let y = LocalVar::new("y", 1);
        let e: Exp = ClassCall {
            class,
            args: vec![Free::new(x.clone()).into(), Free::new(y.clone()).into(), Free::new(x.clone()).into()],
        }
        .into();
        let fvs = e.free_vars();
        assert_eq!(fvs.len(), 2);
        assert!(fvs.contains(&x) && fvs.contains(&y));
    }
}
