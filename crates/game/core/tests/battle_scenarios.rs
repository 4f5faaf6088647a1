use arena_core::{
    Action, ArenaConfig, AutomatedOpponentPolicy, AvatarId, BattleEngine, BattleEvent,
    BattleState, OpponentMode, PcgRng, Phase, RandomSource, ScriptedRng, Side, TurnError,
};

fn config() -> ArenaConfig {
    ArenaConfig::default()
}

/// A state already in ACTIVE with `turn` to act, bypassing start.
fn active_state(mode: OpponentMode, turn: Side) -> BattleState {
    let mut state = BattleState::new(mode, &config());
    for side in Side::ALL {
        state.combatant_mut(side).avatar = Some(AvatarId(side.index() as u8));
    }
    state.phase = Phase::Active;
    state.current_turn = Some(turn);
    state.generation = 1;
    state
}

#[test]
fn max_rolls_finish_the_defender_in_four_attacks() {
    let config = config();
    let mut state = BattleState::new(OpponentMode::Local, &config);
    // first-turn draw picks FIRST, every damage roll after is 30
    let mut rng = ScriptedRng::new([0]).then_repeat(30);
    let mut engine = BattleEngine::new(&mut state, &config, &mut rng);

    engine.select_avatar(Side::First, AvatarId(0)).unwrap();
    engine.select_avatar(Side::Second, AvatarId(4)).unwrap();
    assert_eq!(engine.start().unwrap().first_turn, Side::First);

    let mut second_health = Vec::new();
    let mut first_attacks = 0;
    loop {
        let outcome = engine.attack(Side::First).unwrap();
        first_attacks += 1;
        assert_eq!(outcome.damage, 30);
        second_health.push(outcome.defender_health);
        if outcome.victory {
            break;
        }
        // SECOND answers so the turn comes back
        let reply = engine.attack(Side::Second).unwrap();
        assert!(!reply.victory);
    }

    assert_eq!(first_attacks, 4);
    assert_eq!(second_health, vec![70, 40, 10, 0]);
    assert_eq!(
        engine.events().last(),
        Some(&BattleEvent::Victory {
            winner: Side::First
        })
    );

    let state = engine.state();
    assert_eq!(state.phase, Phase::Finished);
    assert_eq!(state.winner, Some(Side::First));
    assert_eq!(state.current_turn, None);
}

#[test]
fn heal_once_then_refused() {
    let config = config();
    let mut state = active_state(OpponentMode::Local, Side::First);
    state.combatant_mut(Side::First).health = 40;
    let mut rng = ScriptedRng::constant(10);
    let mut engine = BattleEngine::new(&mut state, &config, &mut rng);

    let healed = engine.heal(Side::First).unwrap();
    assert_eq!(healed.health, 52);
    assert_eq!(healed.amount_applied, 12);
    assert!(engine.state().combatant(Side::First).heal_used);

    engine.attack(Side::Second).unwrap();

    let snapshot = engine.state().clone();
    assert_eq!(
        engine.heal(Side::First),
        Err(TurnError::HealUnavailable { side: Side::First })
    );
    assert_eq!(engine.state(), &snapshot);
}

#[test]
fn heal_is_capped_at_full_health() {
    let config = config();
    let mut state = active_state(OpponentMode::Local, Side::Second);
    state.combatant_mut(Side::Second).health = 92;
    let mut rng = ScriptedRng::new([]);
    let mut engine = BattleEngine::new(&mut state, &config, &mut rng);

    let healed = engine.heal(Side::Second).unwrap();
    assert_eq!(healed.health, 100);
    assert_eq!(healed.amount_applied, 8);
    assert_eq!(
        engine.events(),
        &[BattleEvent::HealResolved {
            side: Side::Second,
            amount_applied: 8,
            health: 100
        }]
    );
}

#[test]
fn low_automated_opponent_heals_on_a_winning_roll() {
    let config = config();
    let mut state = active_state(OpponentMode::Automated, Side::Second);
    state.combatant_mut(Side::Second).health = 40;
    let policy = AutomatedOpponentPolicy::from_config(&config);
    let mut policy_rng = ScriptedRng::new([20]);

    let action = policy.next_action(&state, &mut policy_rng).unwrap();
    assert_eq!(action, Action::heal(Side::Second));

    let mut rng = ScriptedRng::new([]);
    let mut engine = BattleEngine::new(&mut state, &config, &mut rng);
    engine.execute(&action).unwrap();
    assert_eq!(state.combatant(Side::Second).health, 52);
    assert_eq!(state.current_turn, Some(Side::First));
}

#[test]
fn finished_match_refuses_turn_actions_until_reset() {
    let config = config();
    let mut state = active_state(OpponentMode::Local, Side::First);
    state.combatant_mut(Side::Second).health = 5;
    let mut rng = ScriptedRng::constant(10);
    let mut engine = BattleEngine::new(&mut state, &config, &mut rng);

    assert!(engine.attack(Side::First).unwrap().victory);
    for side in Side::ALL {
        assert_eq!(
            engine.attack(side),
            Err(TurnError::MatchNotActive {
                phase: Phase::Finished
            })
        );
        assert_eq!(
            engine.heal(side),
            Err(TurnError::MatchNotActive {
                phase: Phase::Finished
            })
        );
    }

    engine.reset();
    assert_eq!(engine.state().phase, Phase::Setup);
    engine.select_avatar(Side::First, AvatarId(1)).unwrap();
}

/// Plays many seeded matches with both sides picking randomly between attack
/// and heal, checking the turn and health invariants after every step.
#[test]
fn random_matches_alternate_turns_and_respect_bounds() {
    let config = config();
    for seed in 0..200u64 {
        let mut state = BattleState::new(OpponentMode::Automated, &config);
        let mut rng = PcgRng::seed_from(seed);
        let mut chooser = PcgRng::seed_from(seed ^ 0xA5A5);
        let mut engine = BattleEngine::new(&mut state, &config, &mut rng);

        engine.select_avatar(Side::First, AvatarId(2)).unwrap();
        engine.start().unwrap();

        let mut last_actor = None;
        let mut steps = 0;
        while engine.state().is_active() {
            let actor = engine.state().current_turn.unwrap();
            assert_ne!(Some(actor), last_actor, "seed {seed}: same side acted twice");

            if chooser.coin_flip() {
                let prior = engine.state().combatant(actor).clone();
                match engine.heal(actor) {
                    Ok(outcome) => {
                        assert!(!prior.heal_used);
                        assert_eq!(outcome.health, (prior.health + 12).min(100));
                    }
                    Err(error) => {
                        assert!(prior.heal_used);
                        assert_eq!(error, TurnError::HealUnavailable { side: actor });
                        // Refused heal keeps the turn; attack instead.
                        engine.attack(actor).unwrap();
                    }
                }
            } else {
                let before = engine.state().combatant(actor.other()).health;
                let outcome = engine.attack(actor).unwrap();
                assert!((10..=30).contains(&outcome.damage));
                assert_eq!(
                    outcome.defender_health,
                    before.saturating_sub(outcome.damage)
                );
            }

            assert!(engine.state().is_consistent(&config));
            last_actor = Some(actor);
            steps += 1;
            assert!(steps < 200, "seed {seed}: match did not terminate");
        }

        let state = engine.state();
        assert_eq!(state.phase, Phase::Finished);
        let winner = state.winner.unwrap();
        assert!(state.combatant(winner.other()).is_defeated());
    }
}

#[cfg(feature = "serde")]
#[test]
fn state_snapshots_serialize_to_json() {
    let state = active_state(OpponentMode::Automated, Side::First);
    let json = serde_json::to_string(&state).unwrap();
    let back: BattleState = serde_json::from_str(&json).unwrap();
    assert_eq!(back, state);
    assert!(json.contains("\"automated\""));
}
