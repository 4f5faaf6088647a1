use std::time::Duration;

use arena_core::{
    Action, AvatarId, BattleEvent, BattleState, OpponentMode, Phase, ScriptedRng, SetupError,
    Side, TurnError,
};
use arena_runtime::{ActionProvider, Event, Runtime, RuntimeError, Topic, TurnEvent};
use async_trait::async_trait;
use tokio::sync::broadcast;

const THINK: Duration = Duration::from_millis(700);

async fn runtime(mode: OpponentMode, rng: ScriptedRng) -> Runtime {
    Runtime::builder()
        .mode(mode)
        .think_delay(THINK)
        .seed(7)
        .rng(rng)
        .build()
        .await
        .expect("runtime should build")
}

fn drain_battle_events(rx: &mut broadcast::Receiver<Event>) -> Vec<BattleEvent> {
    let mut events = Vec::new();
    while let Ok(event) = rx.try_recv() {
        if let Event::Battle(event) = event {
            events.push(event.event);
        }
    }
    events
}

fn turn_actions(events: &[BattleEvent]) -> Vec<Side> {
    events
        .iter()
        .filter_map(|event| match event {
            BattleEvent::AttackResolved { attacker, .. } => Some(*attacker),
            BattleEvent::HealResolved { side, .. } => Some(*side),
            _ => None,
        })
        .collect()
}

#[tokio::test(start_paused = true)]
async fn opponent_acts_after_the_think_delay() {
    // avatar draw, first turn SECOND, then 20 damage per hit
    let runtime = runtime(OpponentMode::Automated, ScriptedRng::new([0, 1]).then_repeat(20)).await;
    let handle = runtime.handle();
    let mut turns = handle.subscribe(Topic::Turn);

    handle
        .select_avatar(Side::First, AvatarId(3))
        .await
        .unwrap();
    let started = handle.start().await.unwrap();
    assert_eq!(started.first_turn, Side::Second);
    assert_eq!(started.auto_assigned, Some(AvatarId(0)));

    assert_eq!(
        turns.recv().await.unwrap(),
        Event::Turn(TurnEvent {
            side: Side::Second,
            generation: started.generation,
            automated: true,
        })
    );

    tokio::time::sleep(THINK - Duration::from_millis(1)).await;
    let state = handle.query_state().await.unwrap();
    assert_eq!(state.current_turn, Some(Side::Second));
    assert_eq!(state.combatant(Side::First).health, 100);

    tokio::time::sleep(Duration::from_millis(2)).await;
    let state = handle.query_state().await.unwrap();
    assert_eq!(state.current_turn, Some(Side::First));
    assert_eq!(state.combatant(Side::First).health, 80);

    assert_eq!(
        turns.recv().await.unwrap(),
        Event::Turn(TurnEvent {
            side: Side::First,
            generation: started.generation,
            automated: false,
        })
    );

    runtime.shutdown().await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn opponent_acts_exactly_once_per_turn() {
    let runtime = runtime(OpponentMode::Automated, ScriptedRng::new([0, 0]).then_repeat(30)).await;
    let handle = runtime.handle();
    let mut battle = handle.subscribe(Topic::Battle);

    handle
        .select_avatar(Side::First, AvatarId(1))
        .await
        .unwrap();
    assert_eq!(handle.start().await.unwrap().first_turn, Side::First);

    for _ in 0..40 {
        let state = handle.query_state().await.unwrap();
        if state.phase == Phase::Finished {
            break;
        }
        if state.is_turn_of(Side::First) {
            handle.attack(Side::First).await.unwrap();
        } else {
            tokio::time::sleep(Duration::from_secs(1)).await;
        }
    }

    let state = handle.query_state().await.unwrap();
    assert_eq!(state.phase, Phase::Finished);

    let events = drain_battle_events(&mut battle);
    let actors = turn_actions(&events);
    assert!(!actors.is_empty());
    assert_eq!(actors[0], Side::First);
    for pair in actors.windows(2) {
        assert_ne!(pair[0], pair[1], "sides must alternate: {actors:?}");
    }
    assert!(matches!(events.last(), Some(BattleEvent::Victory { .. })));

    runtime.shutdown().await.unwrap();
}

/// Asks for a heal every turn, which is illegal once the heal is spent.
struct AlwaysHealProvider;

#[async_trait]
impl ActionProvider for AlwaysHealProvider {
    async fn provide_action(
        &self,
        side: Side,
        _state: &BattleState,
    ) -> arena_runtime::Result<Action> {
        Ok(Action::heal(side))
    }
}

struct FailingProvider;

#[async_trait]
impl ActionProvider for FailingProvider {
    async fn provide_action(
        &self,
        side: Side,
        _state: &BattleState,
    ) -> arena_runtime::Result<Action> {
        Err(RuntimeError::NoActionAvailable { side })
    }
}

/// Plays FIRST by attacking until the match ends, waiting out SECOND's turns.
async fn attack_until_finished(handle: &arena_runtime::RuntimeHandle) -> BattleState {
    for _ in 0..60 {
        let state = handle.query_state().await.unwrap();
        if state.phase == Phase::Finished {
            return state;
        }
        if state.is_turn_of(Side::First) {
            handle.attack(Side::First).await.unwrap();
        } else {
            tokio::time::sleep(Duration::from_secs(1)).await;
        }
    }
    handle.query_state().await.unwrap()
}

#[tokio::test(start_paused = true)]
async fn rejected_opponent_action_falls_back_to_attack() {
    let runtime = Runtime::builder()
        .mode(OpponentMode::Automated)
        .think_delay(THINK)
        .rng(ScriptedRng::new([0, 0]).then_repeat(20))
        .opponent_provider(AlwaysHealProvider)
        .build()
        .await
        .unwrap();
    let handle = runtime.handle();
    let mut battle = handle.subscribe(Topic::Battle);

    handle
        .select_avatar(Side::First, AvatarId(4))
        .await
        .unwrap();
    assert_eq!(handle.start().await.unwrap().first_turn, Side::First);

    let state = attack_until_finished(&handle).await;
    assert_eq!(state.phase, Phase::Finished);

    let events = drain_battle_events(&mut battle);
    let heals = events
        .iter()
        .filter(|event| matches!(event, BattleEvent::HealResolved { .. }))
        .count();
    assert_eq!(heals, 1, "the spent heal must not be replayed: {events:?}");
    assert!(events.iter().any(|event| matches!(
        event,
        BattleEvent::AttackResolved {
            attacker: Side::Second,
            ..
        }
    )));

    let actors = turn_actions(&events);
    for pair in actors.windows(2) {
        assert_ne!(pair[0], pair[1], "sides must alternate: {actors:?}");
    }

    runtime.shutdown().await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn failing_opponent_provider_falls_back_to_attack() {
    let runtime = Runtime::builder()
        .mode(OpponentMode::Automated)
        .think_delay(THINK)
        .rng(ScriptedRng::new([0, 1]).then_repeat(20))
        .opponent_provider(FailingProvider)
        .build()
        .await
        .unwrap();
    let handle = runtime.handle();

    handle
        .select_avatar(Side::First, AvatarId(4))
        .await
        .unwrap();
    assert_eq!(handle.start().await.unwrap().first_turn, Side::Second);

    tokio::time::sleep(THINK + Duration::from_millis(1)).await;
    let state = handle.query_state().await.unwrap();
    assert_eq!(state.current_turn, Some(Side::First));
    assert_eq!(state.combatant(Side::First).health, 80);

    let state = attack_until_finished(&handle).await;
    assert_eq!(state.phase, Phase::Finished);

    runtime.shutdown().await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn reset_cancels_the_pending_opponent_turn() {
    let runtime = runtime(OpponentMode::Automated, ScriptedRng::new([0, 1]).then_repeat(20)).await;
    let handle = runtime.handle();

    handle
        .select_avatar(Side::First, AvatarId(2))
        .await
        .unwrap();
    assert_eq!(handle.start().await.unwrap().first_turn, Side::Second);

    let mut battle = handle.subscribe(Topic::Battle);
    handle.reset().await.unwrap();
    let after_reset = handle.query_state().await.unwrap();

    tokio::time::sleep(THINK * 5).await;

    let state = handle.query_state().await.unwrap();
    assert_eq!(state, after_reset);
    assert_eq!(state.phase, Phase::Setup);
    assert_eq!(state.combatant(Side::First).health, 100);

    let events = drain_battle_events(&mut battle);
    assert!(turn_actions(&events).is_empty());

    runtime.shutdown().await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn turn_from_an_old_match_never_acts_in_a_new_one() {
    // first match: SECOND opens; second match: FIRST opens
    let rng = ScriptedRng::new([0, 1, 0, 0]).then_repeat(20);
    let runtime = runtime(OpponentMode::Automated, rng).await;
    let handle = runtime.handle();

    handle
        .select_avatar(Side::First, AvatarId(4))
        .await
        .unwrap();
    let first = handle.start().await.unwrap();
    assert_eq!(first.first_turn, Side::Second);

    tokio::time::sleep(THINK / 2).await;
    handle.reset().await.unwrap();
    handle
        .select_avatar(Side::First, AvatarId(4))
        .await
        .unwrap();
    let second = handle.start().await.unwrap();
    assert_eq!(second.first_turn, Side::First);
    assert!(second.generation > first.generation);

    tokio::time::sleep(THINK * 5).await;

    let state = handle.query_state().await.unwrap();
    assert_eq!(state.generation, second.generation);
    assert_eq!(state.current_turn, Some(Side::First));
    assert_eq!(state.combatant(Side::First).health, 100);
    assert_eq!(state.combatant(Side::Second).health, 100);

    runtime.shutdown().await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn switching_to_local_mode_resets_and_stops_the_opponent() {
    // automated match opens on SECOND; the local one does too
    let rng = ScriptedRng::new([0, 1, 1]).then_repeat(20);
    let runtime = runtime(OpponentMode::Automated, rng).await;
    let handle = runtime.handle();

    handle
        .select_avatar(Side::First, AvatarId(5))
        .await
        .unwrap();
    handle.start().await.unwrap();

    handle.set_mode(OpponentMode::Local).await.unwrap();
    let state = handle.query_state().await.unwrap();
    assert_eq!(state.phase, Phase::Setup);
    assert_eq!(state.mode, OpponentMode::Local);

    handle
        .select_avatar(Side::First, AvatarId(5))
        .await
        .unwrap();
    handle
        .select_avatar(Side::Second, AvatarId(6))
        .await
        .unwrap();
    assert_eq!(handle.start().await.unwrap().first_turn, Side::Second);

    tokio::time::sleep(THINK * 5).await;

    let state = handle.query_state().await.unwrap();
    assert_eq!(state.current_turn, Some(Side::Second));
    assert_eq!(state.combatant(Side::First).health, 100);

    let outcome = handle.attack(Side::Second).await.unwrap();
    assert_eq!(outcome.defender_health, 80);

    runtime.shutdown().await.unwrap();
}

#[tokio::test]
async fn rejections_come_back_typed_and_change_nothing() {
    let runtime = runtime(OpponentMode::Local, ScriptedRng::new([0]).then_repeat(10)).await;
    let handle = runtime.handle();

    let error = handle.attack(Side::First).await.unwrap_err();
    assert!(matches!(
        error.turn_error(),
        Some(TurnError::MatchNotActive { .. })
    ));

    handle
        .select_avatar(Side::First, AvatarId(0))
        .await
        .unwrap();
    let error = handle.start().await.unwrap_err();
    assert!(matches!(
        error.setup_error(),
        Some(SetupError::MissingAvatar { side: Side::Second })
    ));

    let error = handle
        .select_avatar(Side::Second, AvatarId(42))
        .await
        .unwrap_err();
    assert!(matches!(
        error.setup_error(),
        Some(SetupError::UnknownAvatar { .. })
    ));

    handle
        .select_avatar(Side::Second, AvatarId(9))
        .await
        .unwrap();
    assert_eq!(handle.start().await.unwrap().first_turn, Side::First);

    let before = handle.query_state().await.unwrap();
    let error = handle.heal(Side::Second).await.unwrap_err();
    assert!(matches!(
        error.turn_error(),
        Some(TurnError::NotYourTurn {
            side: Side::Second,
            current: Side::First,
        })
    ));
    let error = handle
        .select_avatar(Side::First, AvatarId(1))
        .await
        .unwrap_err();
    assert!(matches!(
        error.setup_error(),
        Some(SetupError::AlreadyStarted { .. })
    ));
    assert_eq!(handle.query_state().await.unwrap(), before);

    runtime.shutdown().await.unwrap();
}

#[tokio::test]
async fn heal_is_available_once_per_match_through_the_handle() {
    let runtime = runtime(OpponentMode::Local, ScriptedRng::new([0]).then_repeat(30)).await;
    let handle = runtime.handle();

    handle
        .select_avatar(Side::First, AvatarId(0))
        .await
        .unwrap();
    handle
        .select_avatar(Side::Second, AvatarId(1))
        .await
        .unwrap();
    handle.start().await.unwrap();

    handle.attack(Side::First).await.unwrap();
    let healed = handle.heal(Side::Second).await.unwrap();
    assert_eq!(healed.health, 82);
    handle.attack(Side::First).await.unwrap();

    let error = handle.heal(Side::Second).await.unwrap_err();
    assert!(matches!(
        error.turn_error(),
        Some(TurnError::HealUnavailable { side: Side::Second })
    ));

    runtime.shutdown().await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn shutdown_cancels_pending_work_and_closes_handles() {
    let runtime = runtime(OpponentMode::Automated, ScriptedRng::new([0, 1]).then_repeat(20)).await;
    let handle = runtime.handle();

    handle
        .select_avatar(Side::First, AvatarId(0))
        .await
        .unwrap();
    handle.start().await.unwrap();

    runtime.shutdown().await.unwrap();
    tokio::time::sleep(THINK * 2).await;

    let error = handle.query_state().await.unwrap_err();
    assert!(matches!(error, RuntimeError::CommandChannelClosed));
}

#[tokio::test]
async fn battle_events_serialize_for_observers() {
    let runtime = runtime(OpponentMode::Local, ScriptedRng::new([1]).then_repeat(15)).await;
    let handle = runtime.handle();
    let mut battle = handle.subscribe(Topic::Battle);

    handle
        .select_avatar(Side::First, AvatarId(7))
        .await
        .unwrap();

    let event = battle.recv().await.unwrap();
    let json = serde_json::to_string(&event).unwrap();
    let back: Event = serde_json::from_str(&json).unwrap();
    assert_eq!(back, event);
    assert!(matches!(
        event,
        Event::Battle(ref notice) if notice.event == BattleEvent::AvatarSelected {
            side: Side::First,
            avatar: AvatarId(7),
        }
    ));

    runtime.shutdown().await.unwrap();
}
