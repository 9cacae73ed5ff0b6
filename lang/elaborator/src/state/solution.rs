//! Instance search for metavariables which must inhabit a class type.

use log::{debug, trace};

use tessera_lang_ast::ctx::LocalCtx;
use tessera_lang_ast::*;
use tessera_lang_printer::Print;

use crate::instances::case_tree::{CaseBody, CaseTreeCompiler, Preclause};
use crate::instances::{Instance, Instances};
use crate::result::ElabResult;
use crate::unifier::{CompareMode, Comparison, Decision, Unifier};

use super::TyckState;

/// An instance whose class type has been instantiated at the call site.
struct Candidate {
    instance: Instance,
    /// Fresh metavariables for the parameters of a global instance
    params: Vec<Exp>,
    class_call: ClassCall,
}

impl Candidate {
    /// The value of the `idx`-th field: the fixed value, if the class type has one,
    /// or else the projection out of the instance.
    fn field(&self, idx: usize) -> Exp {
        if let Some(value) = self.class_call.field(idx) {
            return value.clone();
        }
        MemberCall { of: Box::new(self.term()), class: self.class_call.class.clone(), field: idx }
            .into()
    }

    fn term(&self) -> Exp {
        match &self.instance {
            Instance::Global(def) => FnCall { def: def.clone(), args: self.params.clone() }.into(),
            Instance::Local(var, _) => Free::new(var.clone()).into(),
        }
    }
}

impl TyckState {
    /// Search for the unique instance which fits `meta_call`.
    ///
    /// Returns `meta_call` itself if there is no fitting instance or more than one.
    pub fn compute_solution<U: Unifier + ?Sized>(
        &mut self,
        meta_call: &MetaCall,
        class_type: &ClassType,
        instances: &Instances<'_>,
        unifier: &mut U,
    ) -> ElabResult<Exp> {
        let required = class_type.inst_tele(&meta_call.args);
        trace!("instance search for {} : {}", meta_call.print_trace(), required.print_trace());

        let compiler = CaseTreeCompiler::new(self.settings.class_args);
        let prefiltered = prefilter(&compiler, instances.find(&required.class), &required);

        let ctx = LocalCtx::empty();
        let mut survivors = Vec::new();
        for instance in prefiltered {
            let Some(candidate) = self.instantiate(instance, meta_call) else {
                continue;
            };
            if self.fits(&candidate, &required, &ctx, unifier)? {
                survivors.push(candidate);
            }
        }

        if survivors.len() != 1 {
            debug!(
                "{} candidate(s) for {}, leaving it unsolved",
                survivors.len(),
                meta_call.print_trace()
            );
            return Ok(meta_call.clone().into());
        }
        let Some(candidate) = survivors.pop() else {
            return Ok(meta_call.clone().into());
        };

        // Determine the parameters of a global instance from the required fields.
        if let Instance::Global(_) = candidate.instance {
            for (idx, value) in required.args.iter().enumerate() {
                let cmp = Comparison::new(candidate.field(idx), value.clone(), &ctx);
                if unifier.compare(self, cmp)? == Decision::No {
                    debug!("field {idx} of {} does not fit", candidate.instance.print_trace());
                }
            }
        }

        let solution = candidate.term();
        trace!("{} resolved to {}", meta_call.print_trace(), solution.print_trace());
        Ok(solution)
    }

    /// The solution of `meta_call`, rebuilt by `rebuild`, if the metavariable is solved.
    /// Otherwise, instance search for metavariables of a class type.
    pub fn compute_solution_with<U, F>(
        &mut self,
        meta_call: &MetaCall,
        instances: &Instances<'_>,
        unifier: &mut U,
        rebuild: F,
    ) -> ElabResult<Exp>
    where
        U: Unifier + ?Sized,
        F: FnOnce(Exp) -> Exp,
    {
        if let Some(solution) = self.solutions.get(&meta_call.meta) {
            return Ok(rebuild(solution.clone().inst_tele(&meta_call.args)));
        }
        match meta_call.meta.class_type() {
            Some(class_type) => {
                let class_type = class_type.clone();
                self.compute_solution(meta_call, &class_type, instances, unifier)
            }
            None => Ok(meta_call.clone().into()),
        }
    }

    /// Instantiate the class type of `instance`. The parameters of a global instance
    /// become fresh metavariables in the context of `meta_call`.
    fn instantiate(&mut self, instance: Instance, meta_call: &MetaCall) -> Option<Candidate> {
        let class_call = instance.class_type()?.clone();
        let params: Vec<Exp> = match &instance {
            Instance::Global(def) => def
                .params
                .iter()
                .map(|param| {
                    let meta = self.fresh_meta(
                        &param.name,
                        meta_call.args.len(),
                        MetaVarReq::Whatever,
                        meta_call.meta.span,
                    );
                    MetaCall { meta, args: meta_call.args.clone() }.into()
                })
                .collect(),
            Instance::Local(..) => vec![],
        };
        let class_call = class_call.inst_tele(&params);
        Some(Candidate { instance, params, class_call })
    }

    /// Whether no field of `candidate` contradicts `required`.
    fn fits<U: Unifier + ?Sized>(
        &mut self,
        candidate: &Candidate,
        required: &ClassCall,
        ctx: &LocalCtx,
        unifier: &mut U,
    ) -> ElabResult<bool> {
        for (idx, value) in required.args.iter().enumerate() {
            let cmp = Comparison::new(value.clone(), candidate.field(idx), ctx)
                .with_mode(CompareMode::InstanceFiltering)
                .with_allow_delay(false);
            // Undecided comparisons keep the candidate
            if unifier.compare(self, cmp)? == Decision::No {
                trace!("discard {}", candidate.instance.print_trace());
                return Ok(false);
            }
        }
        Ok(true)
    }
}

/// The case tree over the fields fixed by the class types of `candidates`.
fn search_tree(compiler: &CaseTreeCompiler, candidates: Vec<Instance>) -> CaseBody {
    let preclauses = candidates
        .into_iter()
        .filter_map(|instance| {
            let fields = instance.class_type()?.args.clone();
            Some(Preclause::new(fields, instance))
        })
        .collect();
    CaseTreeCompiler::optimize(compiler.build_case_tree(0, preclauses))
}

/// The candidates whose fixed fields may match the fields of `required`.
fn prefilter(
    compiler: &CaseTreeCompiler,
    candidates: Vec<Instance>,
    required: &ClassCall,
) -> Vec<Instance> {
    let tree = search_tree(compiler, candidates);
    compiler.lookup(&tree, &required.args).into_iter().cloned().collect()
}

#[cfg(test)]
mod test {
    use std::rc::Rc;

    use super::*;
    use crate::instances::case_tree::Done;
    use crate::instances::{GlobalInstanceSet, InstanceSet};
    use crate::settings::ElabSettings;
    use crate::unifier::SyntacticUnifier;

    fn show() -> Rc<ClassDef> {
        Rc::new(ClassDef {
            name: "Show".to_owned(),
            members: vec![MemberDef { name: "A".to_owned(), typ: Sort::zero().into() }],
        })
    }

    fn data(name: &str, arity: usize) -> Rc<DataDef> {
        let params = (0..arity).map(|i| Param { name: format!("A{i}"), typ: Sort::zero().into() });
        Rc::new(DataDef { name: name.to_owned(), params: params.collect() })
    }

    fn nat() -> Exp {
        DataCall { data: data("Nat", 0), args: vec![] }.into()
    }

    fn list(arg: Exp) -> Exp {
        DataCall { data: data("List", 1), args: vec![arg] }.into()
    }

    fn show_of(arg: Exp) -> ClassCall {
        ClassCall { class: show(), args: vec![arg] }
    }

    fn instance_fn(name: &str, params: usize, result: ClassCall) -> Rc<FnDef> {
        let params = (0..params).map(|i| Param { name: format!("p{i}"), typ: Sort::zero().into() });
        Rc::new(FnDef { name: name.to_owned(), params: params.collect(), result: result.into() })
    }

    /// A metavariable of type `Show(#0)` called with `arg`
    fn show_meta(state: &mut TyckState, arg: Exp) -> MetaCall {
        let x = LocalVar::new("x", 100);
        let class_type = ClassType::new(show_of(Free::new(x.clone()).into()), &[x]);
        let meta = state.fresh_meta("inst", 1, MetaVarReq::Class(class_type), None);
        MetaCall { meta, args: vec![arg] }
    }

    fn search(state: &mut TyckState, call: &MetaCall, instances: &Instances<'_>) -> Exp {
        let class_type = call.meta.class_type().cloned().unwrap();
        state.compute_solution(call, &class_type, instances, &mut SyntacticUnifier::new()).unwrap()
    }

    #[test]
    fn unique_local_instance() {
        let mut state = TyckState::new(ElabSettings::default());
        let global = GlobalInstanceSet::new();
        let mut local = InstanceSet::new();
        let d = LocalVar::new("d", 0);
        local.put(d.clone(), show_of(nat()));
        local.put(LocalVar::new("e", 1), show_of(list(nat())));

        let call = show_meta(&mut state, nat());
        let solution = search(&mut state, &call, &Instances::new(&global, &local));
        assert_eq!(solution, Exp::Free(Free::new(d)));
    }

    #[test]
    fn ambiguous_instances_are_left_alone() {
        let mut state = TyckState::new(ElabSettings::default());
        let global = GlobalInstanceSet::new();
        let mut local = InstanceSet::new();
        local.put(LocalVar::new("d", 0), show_of(nat()));
        local.put(LocalVar::new("e", 1), show_of(nat()));

        let call = show_meta(&mut state, nat());
        let solution = search(&mut state, &call, &Instances::new(&global, &local));
        assert_eq!(solution, Exp::MetaCall(call));
    }

    #[test]
    fn no_instance_is_left_alone() {
        let mut state = TyckState::new(ElabSettings::default());
        let (global, local) = (GlobalInstanceSet::new(), InstanceSet::new());
        let call = show_meta(&mut state, nat());
        let solution = search(&mut state, &call, &Instances::new(&global, &local));
        assert_eq!(solution, Exp::MetaCall(call));
    }

    #[test]
    fn unknown_field_keeps_candidates() {
        let mut state = TyckState::new(ElabSettings::default());
        let global = GlobalInstanceSet::new();
        let mut local = InstanceSet::new();
        local.put(LocalVar::new("d", 0), show_of(nat()));
        local.put(LocalVar::new("e", 1), show_of(list(nat())));

        let unknown = state.fresh_meta("A", 0, MetaVarReq::IsType, None);
        let call = show_meta(&mut state, MetaCall { meta: unknown, args: vec![] }.into());
        let solution = search(&mut state, &call, &Instances::new(&global, &local));
        assert_eq!(solution, Exp::MetaCall(call));
        assert!(state.solutions().is_empty());
    }

    #[test]
    fn global_instance_parameters_are_solved() {
        let mut state = TyckState::new(ElabSettings::default());
        let mut global = GlobalInstanceSet::new();
        let show_list = instance_fn("show_list", 1, show_of(list(Bound { idx: 0 }.into())));
        global.put(show(), instance_fn("show_nat", 0, show_of(nat())));
        global.put(show(), show_list.clone());
        let local = InstanceSet::new();

        // The parameter metavariable is called with the variables of the context
        let y = LocalVar::new("y", 7);
        let class_type = ClassType::new(show_of(list(nat())), &[y.clone()]);
        let meta = state.fresh_meta("inst", 1, MetaVarReq::Class(class_type), None);
        let call = MetaCall::in_ctx(meta, &[y]);
        let solution = search(&mut state, &call, &Instances::new(&global, &local));

        let Exp::FnCall(FnCall { def, args }) = solution else {
            panic!("expected a call of show_list");
        };
        assert_eq!(def, show_list);
        assert_eq!(args.len(), 1);
        assert_eq!(args[0].clone().zonk(state.solutions()), nat());
    }

    #[test]
    fn solved_meta_is_rebuilt() {
        let mut state = TyckState::new(ElabSettings::default());
        let (global, local) = (GlobalInstanceSet::new(), InstanceSet::new());
        let meta = state.fresh_meta("m", 1, MetaVarReq::Whatever, None);
        state.solve(meta.clone(), list(Bound { idx: 0 }.into()));

        let call = MetaCall { meta, args: vec![nat()] };
        let solution = state
            .compute_solution_with(&call, &Instances::new(&global, &local), &mut SyntacticUnifier::new(), |e| {
                list(e)
            })
            .unwrap();
        assert_eq!(solution, list(list(nat())));
    }

    #[test]
    fn unconstrained_meta_is_returned() {
        let mut state = TyckState::new(ElabSettings::default());
        let (global, local) = (GlobalInstanceSet::new(), InstanceSet::new());
        let meta = state.fresh_meta("m", 0, MetaVarReq::Whatever, None);
        let call = MetaCall { meta, args: vec![] };
        let solution = state
            .compute_solution_with(&call, &Instances::new(&global, &local), &mut SyntacticUnifier::new(), |e| e)
            .unwrap();
        assert_eq!(solution, Exp::MetaCall(call));
    }

    #[test]
    fn fieldless_class_tree_is_a_leaf() {
        let default = Rc::new(ClassDef { name: "Default".to_owned(), members: vec![] });
        let instance =
            Instance::Global(instance_fn("default_unit", 0, ClassCall { class: default, args: vec![] }));
        let tree = search_tree(&CaseTreeCompiler::default(), vec![instance.clone()]);
        assert_eq!(tree, CaseBody::Done(vec![Done { instance }]));
    }

    #[test]
    fn prefilter_discriminates_by_fields() {
        let show_nat = Instance::Global(instance_fn("show_nat", 0, show_of(nat())));
        let show_list = Instance::Global(instance_fn("show_list", 1, show_of(list(Bound { idx: 0 }.into()))));
        let show_any = Instance::Global(instance_fn("show_any", 1, show_of(Bound { idx: 0 }.into())));
        let candidates = vec![show_nat.clone(), show_list.clone(), show_any.clone()];

        let compiler = CaseTreeCompiler::default();
        let found = prefilter(&compiler, candidates.clone(), &show_of(list(nat())));
        assert_eq!(found, vec![show_list, show_any.clone()]);

        let found = prefilter(&compiler, candidates, &show_of(nat()));
        assert_eq!(found, vec![show_nat, show_any]);
    }
}
