use std::rc::Rc;

use tessera_lang_ast::*;
use tessera_lang_elaborator::*;

fn init() {
    let _ = env_logger::builder().is_test(true).try_init();
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

fn eqn(lhs: MetaCall, rhs: Exp, ctx: &LocalCtx) -> Eqn {
    Eqn { lhs, rhs, typ: None, ordering: Ordering::Eq, pos: None, ctx: ctx.clone() }
}

/// `?b() = ?a(Nat)` is rechecked once `?b` is solved.
#[test]
fn chained_equations_are_solved() {
    init();
    let mut state = TyckState::new(ElabSettings { heuristic_fallback: false, ..Default::default() });
    let mut unifier = SyntacticUnifier::new();
    let x = LocalVar::new("x", 0);
    let mut ctx = LocalCtx::empty();
    ctx.push(x.clone(), Sort::zero().into());

    let a = state.fresh_meta("a", 1, MetaVarReq::IsType, None);
    let b = state.fresh_meta("b", 0, MetaVarReq::IsType, None);
    let b_call: Exp = MetaCall { meta: b.clone(), args: vec![] }.into();

    // ?a(x) = List(x) is in the pattern fragment
    let lhs = MetaCall::in_ctx(a.clone(), &[x.clone()]).into();
    let cmp = Comparison::new(lhs, list(Free::new(x).into()), &ctx);
    assert_eq!(unifier.compare(&mut state, cmp).unwrap(), Decision::Yes);

    // ?b() = ?a(Nat) is deferred until ?b is solved
    let rhs = MetaCall { meta: a, args: vec![nat()] }.into();
    state.add_eqn(eqn(MetaCall { meta: b.clone(), args: vec![] }, rhs, &ctx)).unwrap();
    state.solve(b, list(nat()));

    let mut errors: Vec<MetaVarError> = Vec::new();
    state.solve_metas(&mut unifier, &mut errors).unwrap();
    assert!(errors.is_empty(), "unexpected errors: {errors:?}");
    assert!(state.eqns().is_empty());
    assert_eq!(b_call.zonk(state.solutions()), list(nat()));
}

#[test]
fn contradiction_is_reported_once() {
    init();
    let mut state = TyckState::new(ElabSettings::default());
    let ctx = LocalCtx::empty();
    let a = state.fresh_meta("a", 0, MetaVarReq::Whatever, None);
    let call = MetaCall { meta: a.clone(), args: vec![] };

    state.add_eqn(eqn(call.clone(), nat(), &ctx)).unwrap();
    state.add_eqn(eqn(call, list(nat()), &ctx)).unwrap();
    state.solve(a, nat());

    let mut errors: Vec<MetaVarError> = Vec::new();
    state.solve_metas(&mut SyntacticUnifier::new(), &mut errors).unwrap();
    assert_eq!(errors.len(), 1);
    assert!(matches!(&errors[0], MetaVarError::EquationFailed { eqn, .. } if eqn.contains("List")));
    assert!(state.eqns().is_empty());
}

#[test]
fn instance_search_through_the_session() {
    init();
    let mut state = TyckState::new(ElabSettings::default());
    let show = Rc::new(ClassDef {
        name: "Show".to_owned(),
        members: vec![MemberDef { name: "A".to_owned(), typ: Sort::zero().into() }],
    });
    let show_of = |arg: Exp| ClassCall { class: show.clone(), args: vec![arg] };

    let mut global = GlobalInstanceSet::new();
    let show_nat =
        Rc::new(FnDef { name: "show_nat".to_owned(), params: vec![], result: show_of(nat()).into() });
    global.put(show.clone(), show_nat.clone());
    let mut local = InstanceSet::new();
    local.put(LocalVar::new("d", 1), show_of(list(nat())));
    let instances = Instances::new(&global, &local);

    let class_type = ClassType::new(show_of(nat()), &[]);
    let meta = state.fresh_meta("inst", 0, MetaVarReq::Class(class_type), None);
    let call = MetaCall { meta, args: vec![] };

    let solution =
        state.compute_solution_with(&call, &instances, &mut SyntacticUnifier::new(), |e| e).unwrap();
    assert_eq!(solution, Exp::FnCall(FnCall { def: show_nat, args: vec![] }));
}

#[test]
fn interval_connections_follow_the_context() {
    let mut state = TyckState::new(ElabSettings::default());
    let i = LocalVar::new("i", 0);
    let j = LocalVar::new("j", 1);
    let (i_exp, j_exp): (Exp, Exp) = (Free::new(i.clone()).into(), Free::new(j).into());

    state.connect(&i_exp, &Dim::I1.into()).unwrap();
    state.connect(&j_exp, &i_exp).unwrap();
    assert!(state.is_connected(&j_exp, &Dim::I1.into()));
    assert!(!state.is_connected(&j_exp, &Dim::I0.into()));

    // A variable which goes out of scope gets a fresh node when it is used again
    state.remove_connection(&i);
    assert!(!state.is_connected(&i_exp, &Dim::I1.into()));
    assert!(state.is_connected(&j_exp, &Dim::I1.into()));
}
