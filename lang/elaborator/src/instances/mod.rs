//! Instances available for instance search.
//!
//! Global instances are functions whose result type is a class call; they are
//! registered once per compilation unit. Local instances are variables of the
//! declaration being checked whose type is a class call.

use std::rc::Rc;

use derivative::Derivative;
use tessera_lang_ast::{ClassCall, ClassDef, Exp, FnDef, HashMap, LocalVar, Substitutable};
use tessera_lang_printer::{Alloc, Builder, Print, PrintCfg};

pub mod case_tree;

#[derive(Debug, Clone, Derivative)]
#[derivative(PartialEq, Eq, Hash)]
pub enum Instance {
    Global(Rc<FnDef>),
    /// A local variable together with its class type
    Local(LocalVar, #[derivative(PartialEq = "ignore", Hash = "ignore")] ClassCall),
}

impl Instance {
    /// The class type of the instance. For a global instance, it refers to the
    /// parameters of the function through bound references.
    pub fn class_type(&self) -> Option<&ClassCall> {
        match self {
            Instance::Global(def) => def.result_class(),
            Instance::Local(_, class_call) => Some(class_call),
        }
    }

    pub fn class(&self) -> Option<&Rc<ClassDef>> {
        self.class_type().map(|class_call| &class_call.class)
    }

    /// The value the `idx`-th field of this instance is known to have.
    pub fn field(&self, idx: usize) -> Option<&Exp> {
        self.class_type().and_then(|class_call| class_call.field(idx))
    }
}

impl Substitutable for Instance {
    fn bind_tele(self, vars: &[LocalVar]) -> Self {
        match self {
            Instance::Global(def) => Instance::Global(def),
            Instance::Local(var, class_call) => Instance::Local(var, class_call.bind_tele(vars)),
        }
    }

    fn inst_tele(self, args: &[Exp]) -> Self {
        match self {
            Instance::Global(def) => Instance::Global(def),
            Instance::Local(var, class_call) => Instance::Local(var, class_call.inst_tele(args)),
        }
    }
}

impl Print for Instance {
    fn print<'a>(&'a self, cfg: &PrintCfg, alloc: &'a Alloc<'a>) -> Builder<'a> {
        match self {
            Instance::Global(def) => def.print(cfg, alloc),
            Instance::Local(var, _) => var.print(cfg, alloc),
        }
    }
}

/// The instance declarations of a compilation unit, by class.
#[derive(Debug, Clone, Default)]
pub struct GlobalInstanceSet {
    instances: HashMap<Rc<ClassDef>, Vec<Rc<FnDef>>>,
}

impl GlobalInstanceSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn put(&mut self, class: Rc<ClassDef>, def: Rc<FnDef>) {
        self.instances.entry(class).or_default().push(def);
    }

    pub fn find_instance_decls(&self, class: &ClassDef) -> &[Rc<FnDef>] {
        self.instances.get(class).map(Vec::as_slice).unwrap_or_default()
    }
}

/// The local instances of the declaration being checked.
///
/// Every variable listed under a class has a type in `types`, and vice versa.
#[derive(Debug, Clone, Default)]
pub struct InstanceSet {
    members: HashMap<Rc<ClassDef>, Vec<LocalVar>>,
    types: HashMap<LocalVar, ClassCall>,
}

impl InstanceSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `var` as an instance of type `class_call`, replacing an earlier
    /// registration of `var`.
    pub fn put(&mut self, var: LocalVar, class_call: ClassCall) {
        self.remove(&var);
        self.members.entry(class_call.class.clone()).or_default().push(var.clone());
        self.types.insert(var, class_call);
    }

    pub fn remove(&mut self, var: &LocalVar) -> Option<ClassCall> {
        let class_call = self.types.remove(var)?;
        if let Some(vars) = self.members.get_mut(&class_call.class) {
            vars.retain(|v| v != var);
            if vars.is_empty() {
                self.members.remove(&class_call.class);
            }
        }
        Some(class_call)
    }

    pub fn type_of(&self, var: &LocalVar) -> Option<&ClassCall> {
        self.types.get(var)
    }

    /// The local instances of `class` in registration order.
    pub fn find<'a>(&'a self, class: &ClassDef) -> impl Iterator<Item = Instance> + 'a {
        let vars = self.members.get(class).map(Vec::as_slice).unwrap_or_default();
        vars.iter().filter_map(|var| {
            self.types.get(var).map(|class_call| Instance::Local(var.clone(), class_call.clone()))
        })
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

/// All instances visible while checking a declaration.
#[derive(Debug, Clone, Copy)]
pub struct Instances<'a> {
    pub global: &'a GlobalInstanceSet,
    pub local: &'a InstanceSet,
}

impl<'a> Instances<'a> {
    pub fn new(global: &'a GlobalInstanceSet, local: &'a InstanceSet) -> Self {
        Instances { global, local }
    }

    /// Candidates for `class`, local instances first.
    pub fn find(&self, class: &ClassDef) -> Vec<Instance> {
        let globals =
            self.global.find_instance_decls(class).iter().cloned().map(Instance::Global);
        self.local.find(class).chain(globals).collect()
    }
}

#[cfg(test)]
mod test {
    use tessera_lang_ast::{Bound, DataCall, DataDef, Free, MemberDef, Sort};

    use super::*;

    fn class(name: &str) -> Rc<ClassDef> {
        Rc::new(ClassDef {
            name: name.to_owned(),
            members: vec![MemberDef { name: "carrier".to_owned(), typ: Sort::zero().into() }],
        })
    }

    fn instance_fn(name: &str, class: &Rc<ClassDef>) -> Rc<FnDef> {
        Rc::new(FnDef {
            name: name.to_owned(),
            params: vec![],
            result: ClassCall { class: class.clone(), args: vec![] }.into(),
        })
    }

    #[test]
    fn global_lookup_is_append_only() {
        let show = class("Show");
        let eq = class("Eq");
        let mut set = GlobalInstanceSet::new();
        assert!(set.find_instance_decls(&show).is_empty());

        set.put(show.clone(), instance_fn("show_nat", &show));
        set.put(show.clone(), instance_fn("show_nat", &show));
        assert_eq!(set.find_instance_decls(&show).len(), 2);
        assert!(set.find_instance_decls(&eq).is_empty());
    }

    #[test]
    fn local_tables_stay_consistent() {
        let show = class("Show");
        let eq = class("Eq");
        let x = LocalVar::new("x", 0);
        let mut set = InstanceSet::new();

        set.put(x.clone(), ClassCall { class: show.clone(), args: vec![] });
        assert_eq!(set.find(&show).count(), 1);

        set.put(x.clone(), ClassCall { class: eq.clone(), args: vec![] });
        assert_eq!(set.find(&show).count(), 0);
        assert_eq!(set.type_of(&x).map(|class_call| &class_call.class), Some(&eq));
        assert_eq!(set.find(&eq).collect::<Vec<_>>(), vec![Instance::Local(
            x.clone(),
            ClassCall { class: eq.clone(), args: vec![] }
        )]);
        assert_eq!(set.len(), 1);

        assert!(set.remove(&x).is_some());
        assert!(set.is_empty());
        assert!(set.type_of(&x).is_none());
        assert_eq!(set.find(&eq).count(), 0);
    }

    #[test]
    fn locals_come_first() {
        let show = class("Show");
        let mut global = GlobalInstanceSet::new();
        global.put(show.clone(), instance_fn("show_nat", &show));
        let mut local = InstanceSet::new();
        let x = LocalVar::new("x", 0);
        local.put(x.clone(), ClassCall { class: show.clone(), args: vec![] });

        let found = Instances::new(&global, &local).find(&show);
        assert_eq!(found.len(), 2);
        assert!(matches!(&found[0], Instance::Local(var, _) if *var == x));
        assert!(matches!(&found[1], Instance::Global(def) if def.name == "show_nat"));
        assert_eq!(found[1].class(), Some(&show));
    }

    #[test]
    fn local_instance_type_moves_between_contexts() {
        let show = class("Show");
        let x = LocalVar::new("x", 0);
        let nat_def = Rc::new(DataDef { name: "Nat".to_owned(), params: vec![] });
        let nat: Exp = DataCall { data: nat_def, args: vec![] }.into();
        let local = Instance::Local(
            LocalVar::new("d", 1),
            ClassCall { class: show.clone(), args: vec![Free::new(x.clone()).into()] },
        );

        let bound = local.bind_tele(&[x]);
        assert_eq!(bound.field(0), Some(&Exp::Bound(Bound { idx: 0 })));
        let instantiated = bound.inst_tele(&[nat.clone()]);
        assert_eq!(instantiated.field(0), Some(&nat));
        assert_eq!(instantiated.class(), Some(&show));

        let global = Instance::Global(instance_fn("show_nat", &show));
        assert_eq!(global.clone().bind_tele(&[LocalVar::new("y", 2)]), global);
        assert_eq!(global.clone().inst_tele(&[nat]), global);
    }
}
