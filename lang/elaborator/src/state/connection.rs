//! Connections between interval variables and endpoints.

use tessera_lang_ast::{Dim, Exp, HashMap, LocalVar};

use crate::forest::{DynamicForest, Handle};
use crate::result::{ElabResult, InternalError};

use super::TyckState;

#[derive(Debug, Clone)]
pub(super) struct Connections {
    forest: DynamicForest,
    handles: HashMap<LocalVar, Handle>,
    i0: Handle,
    i1: Handle,
}

impl Connections {
    pub(super) fn new() -> Self {
        let mut forest = DynamicForest::new();
        let i0 = forest.create();
        let i1 = forest.create();
        Connections { forest, handles: HashMap::default(), i0, i1 }
    }

    /// The node standing for `term`, if `term` is a variable or an endpoint.
    fn handle(&mut self, term: &Exp, create: bool) -> Option<Handle> {
        match term {
            Exp::Free(free) => match self.handles.get(&free.var) {
                Some(handle) => Some(*handle),
                None if create => {
                    let handle = self.forest.create();
                    self.handles.insert(free.var.clone(), handle);
                    Some(handle)
                }
                None => None,
            },
            Exp::Dim(Dim::I0) => Some(self.i0),
            Exp::Dim(Dim::I1) => Some(self.i1),
            _ => None,
        }
    }
}

impl TyckState {
    pub fn is_connected(&mut self, lhs: &Exp, rhs: &Exp) -> bool {
        let conns = &mut self.connections;
        match (conns.handle(lhs, true), conns.handle(rhs, true)) {
            (Some(l), Some(r)) => conns.forest.is_connected(l, r),
            _ => false,
        }
    }

    pub fn connect(&mut self, lhs: &Exp, rhs: &Exp) -> ElabResult {
        let conns = &mut self.connections;
        match (conns.handle(lhs, true), conns.handle(rhs, true)) {
            (Some(l), Some(r)) => {
                conns.forest.connect(l, r);
                Ok(())
            }
            _ => Err(InternalError::unsupported_connection(lhs, rhs)),
        }
    }

    pub fn disconnect(&mut self, lhs: &Exp, rhs: &Exp) {
        let conns = &mut self.connections;
        if let (Some(l), Some(r)) = (conns.handle(lhs, false), conns.handle(rhs, false)) {
            conns.forest.disconnect(l, r);
        }
    }

    /// Forget the node of a variable which goes out of scope.
    ///
    /// The node itself stays in the forest together with its edges, and the forest
    /// only grows for the lifetime of the session: [TyckState::clear_tmp] keeps all
    /// connections. A later use of `var` gets a fresh node.
    pub fn remove_connection(&mut self, var: &LocalVar) {
        self.connections.handles.remove(var);
    }
}

#[cfg(test)]
mod test {
    use tessera_lang_ast::{DataCall, DataDef, Free};

    use super::*;
    use crate::settings::ElabSettings;

    fn var(name: &str, id: u64) -> Exp {
        Free::new(LocalVar::new(name, id)).into()
    }

    #[test]
    fn connectivity_is_symmetric() {
        let mut state = TyckState::new(ElabSettings::default());
        let (i, j, k) = (var("i", 0), var("j", 1), var("k", 2));
        state.connect(&i, &j).unwrap();
        state.connect(&j, &Dim::I1.into()).unwrap();

        for (a, b) in [(&i, &j), (&j, &i), (&i, &Dim::I1.into()), (&Dim::I1.into(), &i)] {
            assert!(state.is_connected(a, b));
        }
        assert!(!state.is_connected(&k, &i));
        assert!(!state.is_connected(&i, &k));
        assert!(!state.is_connected(&Dim::I0.into(), &Dim::I1.into()));
    }

    #[test]
    fn disconnect_removes_edge() {
        let mut state = TyckState::new(ElabSettings::default());
        let (i, j) = (var("i", 0), var("j", 1));
        state.connect(&i, &j).unwrap();
        state.disconnect(&j, &i);
        assert!(!state.is_connected(&i, &j));
        // Unknown variables have no node yet
        state.disconnect(&var("k", 2), &i);
    }

    #[test]
    fn unsupported_connection() {
        let mut state = TyckState::new(ElabSettings::default());
        let data = std::rc::Rc::new(DataDef { name: "Nat".to_owned(), params: vec![] });
        let nat: Exp = DataCall { data, args: vec![] }.into();
        assert!(!state.is_connected(&nat, &var("i", 0)));
        let err = state.connect(&nat, &var("i", 0)).unwrap_err();
        assert!(matches!(*err, InternalError::UnsupportedConnection { .. }));
    }

    #[test]
    fn removed_variable_starts_fresh() {
        let mut state = TyckState::new(ElabSettings::default());
        let i = LocalVar::new("i", 0);
        state.connect(&Free::new(i.clone()).into(), &Dim::I0.into()).unwrap();
        state.remove_connection(&i);
        assert!(!state.is_connected(&Free::new(i).into(), &Dim::I0.into()));
    }
}
