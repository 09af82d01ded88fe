use parent_reducer::{ActionOf, Effect, ParentReducerState, Reducer, StateOf, Store};

#[derive(Default)]
struct ThrusterReducer;

#[derive(Debug, Clone, Default, PartialEq)]
struct Thruster {
    power: i32,
    ignitions: u32,
}

#[derive(Debug, Clone, PartialEq)]
enum ThrusterAction {
    Throttle(i32),
    /// Answers with a follow-up `Throttle`.
    Ignite(i32),
}

impl Reducer for ThrusterReducer {
    type State = Thruster;
    type Action = ThrusterAction;

    fn reduce(&self, state: &mut Thruster, action: ThrusterAction) -> Effect<ThrusterAction> {
        match action {
            ThrusterAction::Throttle(delta) => {
                state.power += delta;
                Effect::none()
            }
            ThrusterAction::Ignite(power) => {
                state.ignitions += 1;
                Effect::send(ThrusterAction::Throttle(power))
            }
        }
    }
}

type Booster = Thruster;

#[derive(Default)]
struct FlightDeckReducer;

#[derive(Debug, Default, ParentReducerState)]
#[parent_reducer_state(of = FlightDeckReducer)]
struct FlightDeck {
    main_engine: StateOf<ThrusterReducer>,
    escape_pod: Option<StateOf<ThrusterReducer>>,
    retro: <ThrusterReducer as Reducer>::State,
    #[parent_reducer_state(init = ThrusterReducer::State::default())]
    booster: Booster,
    #[parent_reducer_state(action = Spare)]
    backup: StateOf<ThrusterReducer>,
    call_sign: String,
}

#[derive(Debug, Clone, PartialEq)]
enum FlightDeckAction {
    MainEngine(ActionOf<ThrusterReducer>),
    EscapePod(ActionOf<ThrusterReducer>),
    Retro(ActionOf<ThrusterReducer>),
    Booster(ActionOf<ThrusterReducer>),
    Spare(ActionOf<ThrusterReducer>),
}

impl Reducer for FlightDeckReducer {
    type State = FlightDeck;
    type Action = FlightDeckAction;

    fn reduce(&self, state: &mut FlightDeck, action: FlightDeckAction) -> Effect<FlightDeckAction> {
        match action {
            FlightDeckAction::MainEngine(action) => state.main_engine(action),
            FlightDeckAction::EscapePod(action) => state.escape_pod(action),
            FlightDeckAction::Retro(action) => state.retro(action),
            FlightDeckAction::Booster(action) => state.booster(action),
            FlightDeckAction::Spare(action) => state.backup(action),
        }
    }
}

#[test]
fn delegated_action_mutates_the_child_field() {
    let mut deck = FlightDeck::default();

    let effect = deck.main_engine(ThrusterAction::Throttle(7));

    assert!(effect.is_none());
    assert_eq!(deck.main_engine.power, 7);
    assert_eq!(deck.retro, Thruster::default());
}

#[test]
fn child_effects_are_lifted_into_parent_actions() {
    let mut deck = FlightDeck::default();

    let effect = deck.main_engine(ThrusterAction::Ignite(3));

    assert_eq!(deck.main_engine.ignitions, 1);
    assert_eq!(deck.main_engine.power, 0);
    assert_eq!(
        effect.actions(),
        &[FlightDeckAction::MainEngine(ThrusterAction::Throttle(3))]
    );
}

#[test]
fn absent_optional_child_is_a_no_op() {
    let mut deck = FlightDeck::default();

    let effect = deck.escape_pod(ThrusterAction::Ignite(9));

    assert!(effect.is_none());
    assert_eq!(deck.escape_pod, None);
}

#[test]
fn present_optional_child_is_reduced_and_written_back() {
    let mut deck = FlightDeck {
        escape_pod: Some(Thruster::default()),
        ..FlightDeck::default()
    };

    let effect = deck.escape_pod(ThrusterAction::Ignite(4));
    assert_eq!(
        effect.into_actions(),
        vec![FlightDeckAction::EscapePod(ThrusterAction::Throttle(4))]
    );

    let _ = deck.escape_pod(ThrusterAction::Throttle(4));
    assert_eq!(
        deck.escape_pod,
        Some(Thruster {
            power: 4,
            ignitions: 1
        })
    );
}

#[test]
fn every_state_spelling_is_delegated() {
    let mut deck = FlightDeck::default();

    let retro = deck.retro(ThrusterAction::Ignite(1));
    let booster = deck.booster(ThrusterAction::Ignite(2));

    assert_eq!(deck.retro.ignitions, 1);
    assert_eq!(deck.booster.ignitions, 1);
    assert_eq!(
        retro.merge(booster).into_actions(),
        vec![
            FlightDeckAction::Retro(ThrusterAction::Throttle(1)),
            FlightDeckAction::Booster(ThrusterAction::Throttle(2)),
        ]
    );
}

#[test]
fn action_variant_can_be_renamed() {
    let mut deck = FlightDeck::default();

    let effect = deck.backup(ThrusterAction::Ignite(6));

    assert_eq!(
        effect.actions(),
        &[FlightDeckAction::Spare(ThrusterAction::Throttle(6))]
    );
}

#[test]
fn store_feeds_lifted_effects_back_through_the_parent() {
    let mut store = Store::<FlightDeckReducer>::default();
    store.state_mut().call_sign = "Rocinante".into();
    store.state_mut().escape_pod = Some(Thruster::default());

    assert_eq!(store.send(FlightDeckAction::MainEngine(ThrusterAction::Ignite(5))), 2);
    assert_eq!(store.send(FlightDeckAction::EscapePod(ThrusterAction::Ignite(2))), 2);

    let deck = store.into_state();
    assert_eq!(deck.call_sign, "Rocinante");
    assert_eq!(
        deck.main_engine,
        Thruster {
            power: 5,
            ignitions: 1
        }
    );
    assert_eq!(
        deck.escape_pod,
        Some(Thruster {
            power: 2,
            ignitions: 1
        })
    );
}

// Generated code only needs the parent's `Action`; any state type can delegate
// into it, generics included.
#[derive(ParentReducerState)]
#[parent_reducer_state(of = FlightDeckReducer)]
struct Telemetry<T>
where
    T: Clone,
{
    main_engine: StateOf<ThrusterReducer>,
    samples: Vec<T>,
}

#[test]
fn generic_states_are_delegated() {
    let mut telemetry = Telemetry {
        main_engine: Thruster::default(),
        samples: vec![0.5_f32],
    };

    let effect = telemetry.main_engine(ThrusterAction::Ignite(8));

    assert_eq!(telemetry.samples.len(), 1);
    assert_eq!(
        effect.actions(),
        &[FlightDeckAction::MainEngine(ThrusterAction::Throttle(8))]
    );
}

#[derive(Default)]
struct FuelGaugeReducer;

impl Reducer for FuelGaugeReducer {
    type State = u8;
    type Action = u8;

    fn reduce(&self, level: &mut u8, refuel: u8) -> Effect<u8> {
        *level = level.checked_add(refuel).expect("fuel tank overflow");
        Effect::none()
    }
}

#[derive(Default)]
struct TankerReducer;

#[derive(Default, ParentReducerState)]
#[parent_reducer_state(of = TankerReducer)]
struct Tanker {
    reserve: Option<StateOf<FuelGaugeReducer>>,
}

enum TankerAction {
    Reserve(ActionOf<FuelGaugeReducer>),
}

impl Reducer for TankerReducer {
    type State = Tanker;
    type Action = TankerAction;

    fn reduce(&self, state: &mut Tanker, action: TankerAction) -> Effect<TankerAction> {
        match action {
            TankerAction::Reserve(refuel) => state.reserve(refuel),
        }
    }
}

#[test]
fn panicking_child_keeps_optional_state() {
    let mut tanker = Tanker {
        reserve: Some(250),
    };

    let outcome = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
        let _ = tanker.reserve(10);
    }));

    assert!(outcome.is_err());
    assert_eq!(tanker.reserve, Some(250));

    let mut store = Store::new(TankerReducer, tanker);
    store.send(TankerAction::Reserve(5));
    assert_eq!(store.state().reserve, Some(255));
}
