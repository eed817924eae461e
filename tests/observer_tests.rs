//! Change-notification integration tests.
//!
//! These tests verify observer ordering, the no-dirty-check behavior, error
//! propagation, and context pass-through.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use game_rules::{GameRules, RuleConfig, RuleError};

type Log<T> = Rc<RefCell<Vec<T>>>;

fn new_log<T>() -> Log<T> {
    Rc::new(RefCell::new(Vec::new()))
}

#[derive(Debug)]
struct Refused;

impl fmt::Display for Refused {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("refused by observer")
    }
}

impl std::error::Error for Refused {}

/// n observers each fire exactly once per set, in registration order,
/// and each sees the post-mutation value.
#[test]
fn test_observers_fire_once_in_order() {
    let log: Log<(usize, i32)> = new_log();
    let mut rules: GameRules = GameRules::new();
    let key = rules
        .register("spawnRadius", RuleConfig::new().with_default(10))
        .unwrap();

    for index in 0..5 {
        let log = Rc::clone(&log);
        rules
            .observe(&key, move |_, rule| {
                log.borrow_mut().push((index, rule.get()));
                Ok(())
            })
            .unwrap();
    }

    rules.set(&key, 2, None).unwrap();

    let expected: Vec<_> = (0..5).map(|i| (i, 2)).collect();
    assert_eq!(*log.borrow(), expected);
}

/// Setting the current value again still notifies every observer.
#[test]
fn test_no_dirty_check() {
    let log: Log<bool> = new_log();
    let mut rules: GameRules = GameRules::new();
    let l = Rc::clone(&log);
    let key = rules
        .register(
            "keepInventory",
            RuleConfig::new().with_default(false).on_change(move |_, rule| {
                l.borrow_mut().push(rule.get());
                Ok(())
            }),
        )
        .unwrap();

    rules.set(&key, false, None).unwrap();
    rules.set(&key, false, None).unwrap();
    rules.set(&key, false, None).unwrap();
    assert_eq!(*log.borrow(), vec![false, false, false]);
}

/// Observers added later run after earlier ones, for every later set.
#[test]
fn test_late_observer_sees_only_later_sets() {
    let log: Log<&'static str> = new_log();
    let mut rules: GameRules = GameRules::new();
    let key = rules
        .register("doInsomnia", RuleConfig::new().with_default(true))
        .unwrap();

    let l = Rc::clone(&log);
    rules
        .observe(&key, move |_, _| {
            l.borrow_mut().push("early");
            Ok(())
        })
        .unwrap();
    rules.set(&key, false, None).unwrap();

    let l = Rc::clone(&log);
    rules
        .observe(&key, move |_, _| {
            l.borrow_mut().push("late");
            Ok(())
        })
        .unwrap();
    rules.set(&key, true, None).unwrap();

    assert_eq!(*log.borrow(), vec!["early", "early", "late"]);
}

/// An observer failure surfaces from set with its source attached.
#[test]
fn test_observer_error_propagates() {
    let log: Log<&'static str> = new_log();
    let mut rules: GameRules = GameRules::new();
    let key = rules
        .register("disableRaids", RuleConfig::new().with_default(false))
        .unwrap();

    let l = Rc::clone(&log);
    rules
        .observe(&key, move |_, _| {
            l.borrow_mut().push("before");
            Ok(())
        })
        .unwrap();
    rules.observe(&key, |_, _| Err(Refused.into())).unwrap();
    let l = Rc::clone(&log);
    rules
        .observe(&key, move |_, _| {
            l.borrow_mut().push("after");
            Ok(())
        })
        .unwrap();

    let err = rules.set(&key, true, None).unwrap_err();
    match &err {
        RuleError::Observer { name, source } => {
            assert_eq!(name, "disableRaids");
            assert!(source.is::<Refused>());
        }
        other => panic!("expected observer error, got {:?}", other),
    }
    assert!(err.to_string().contains("refused by observer"));

    // The value was assigned before notification, and the pass stopped
    assert!(rules.get(&key).unwrap());
    assert_eq!(*log.borrow(), vec!["before"]);
}

/// Observers receive the context given to set, untouched.
#[test]
fn test_context_pass_through() {
    struct Session {
        tick: u64,
    }

    let log: Log<Option<u64>> = new_log();
    let mut rules: GameRules<Session> = GameRules::new();
    let key = rules
        .register("doWeatherCycle", RuleConfig::new().with_default(true))
        .unwrap();
    let l = Rc::clone(&log);
    rules
        .observe(&key, move |session, _| {
            l.borrow_mut().push(session.map(|s| s.tick));
            Ok(())
        })
        .unwrap();

    let session = Session { tick: 1200 };
    rules.set(&key, false, Some(&session)).unwrap();
    rules.set(&key, true, None).unwrap();

    assert_eq!(*log.borrow(), vec![Some(1200), None]);
}

/// Observers can be attached by name once the kind is known.
#[test]
fn test_observe_by_name() {
    let log: Log<i32> = new_log();
    let mut rules: GameRules = GameRules::new();
    rules
        .register("maxEntityCramming", RuleConfig::new().with_default(24))
        .unwrap();

    let l = Rc::clone(&log);
    rules
        .observe_by_name::<i32, _>("maxEntityCramming", move |_, rule| {
            l.borrow_mut().push(rule.get());
            Ok(())
        })
        .unwrap();

    rules.set_by_name("maxEntityCramming", 8, None).unwrap();
    assert_eq!(*log.borrow(), vec![8]);

    assert!(matches!(
        rules.observe_by_name::<bool, _>("maxEntityCramming", |_, _| Ok(())),
        Err(RuleError::TypeMismatch { .. })
    ));
}

/// Loading from strings restores values quietly.
#[test]
fn test_string_load_does_not_notify() {
    let log: Log<bool> = new_log();
    let mut rules: GameRules = GameRules::new();
    let l = Rc::clone(&log);
    let key = rules
        .register(
            "naturalRegeneration",
            RuleConfig::new().with_default(true).on_change(move |_, rule| {
                l.borrow_mut().push(rule.get());
                Ok(())
            }),
        )
        .unwrap();

    rules.set_from_string("naturalRegeneration", "false").unwrap();
    assert!(!rules.get(&key).unwrap());
    assert!(log.borrow().is_empty());
}
