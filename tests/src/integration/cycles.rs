//! Failing sorts: every cycle is reported, nothing else is.

#[cfg(test)]
mod tests {
    use crate::support::{key, numbered_builtins, stage, Builtins};
    use reload_ordering::{
        CycleReport, ListenerKey, ListenerSide, OrderingError, ReloadListenerRegistrar,
        ReloadListenerSession,
    };

    type Session = ReloadListenerSession<dyn crate::support::ReloadStage>;

    fn session_with_mods(builtins: &Builtins, mods: &[&str]) -> Session {
        let mut session = builtins.session(ListenerSide::Client);
        for path in mods {
            session.add_listener(key(&format!("mod:{path}")), stage(path)).unwrap();
        }
        session
    }

    fn depend(session: &mut Session, first: &str, second: &str) {
        session.add_dependency(&key(first), &key(second)).unwrap();
    }

    fn expect_cycles(session: &mut Session) -> CycleReport {
        match session.sort_listeners() {
            Err(OrderingError::Cycle(report)) => report,
            Err(other) => panic!("expected a cycle error, got {other}"),
            Ok(sorted) => panic!("expected a cycle error, got {:?}", sorted.keys()),
        }
    }

    fn keys(raw: &[&str]) -> Vec<ListenerKey> {
        raw.iter().map(|k| key(k)).collect()
    }

    #[test]
    fn test_three_cycle_reported() {
        let builtins = numbered_builtins(1);
        let mut session = session_with_mods(&builtins, &["a", "b", "c"]);
        depend(&mut session, "mod:a", "mod:b");
        depend(&mut session, "mod:b", "mod:c");
        depend(&mut session, "mod:c", "mod:a");

        let report = expect_cycles(&mut session);

        assert_eq!(report.cycles(), &[keys(&["mod:a", "mod:b", "mod:c"])]);
        assert_eq!(
            report.to_string(),
            "Cycles were detected during reload listener sorting:\n0: mod:a->mod:b->mod:c->mod:a\n"
        );
    }

    #[test]
    fn test_every_disjoint_cycle_reported() {
        let builtins = numbered_builtins(1);
        let mut session = session_with_mods(&builtins, &["a", "b", "c", "d", "e", "ok"]);
        depend(&mut session, "mod:a", "mod:b");
        depend(&mut session, "mod:b", "mod:a");
        depend(&mut session, "mod:c", "mod:d");
        depend(&mut session, "mod:d", "mod:e");
        depend(&mut session, "mod:e", "mod:c");
        depend(&mut session, "mod:ok", "minecraft:v0");

        let report = expect_cycles(&mut session);

        assert_eq!(report.len(), 2);
        assert_eq!(report.cycles()[0], keys(&["mod:a", "mod:b"]));
        assert_eq!(report.cycles()[1], keys(&["mod:c", "mod:d", "mod:e"]));

        let rendered = report.to_string();
        assert!(rendered.contains("0: mod:a->mod:b->mod:a\n"));
        assert!(rendered.contains("1: mod:c->mod:d->mod:e->mod:c\n"));
        assert!(!rendered.contains("mod:ok"));
    }

    #[test]
    fn test_overlapping_loops_form_one_cycle() {
        let builtins = numbered_builtins(1);
        let mut session = session_with_mods(&builtins, &["a", "b", "c"]);
        depend(&mut session, "mod:a", "mod:b");
        depend(&mut session, "mod:b", "mod:a");
        depend(&mut session, "mod:b", "mod:c");
        depend(&mut session, "mod:c", "mod:b");

        let report = expect_cycles(&mut session);

        // b is passed twice: there is no edge c -> a
        assert_eq!(report.cycles(), &[keys(&["mod:a", "mod:b", "mod:c", "mod:b"])]);
        assert!(report.to_string().contains("0: mod:a->mod:b->mod:c->mod:b->mod:a\n"));
    }

    #[test]
    fn test_cycle_against_registration_order() {
        let builtins = numbered_builtins(1);
        let mut session = session_with_mods(&builtins, &["a", "b", "c"]);
        depend(&mut session, "mod:a", "mod:c");
        depend(&mut session, "mod:c", "mod:b");
        depend(&mut session, "mod:b", "mod:a");

        let report = expect_cycles(&mut session);

        assert_eq!(
            report.to_string(),
            "Cycles were detected during reload listener sorting:\n0: mod:a->mod:c->mod:b->mod:a\n"
        );
    }

    #[test]
    fn test_cycle_through_baseline_chain() {
        let builtins = numbered_builtins(3);
        let mut session = session_with_mods(&builtins, &["x"]);
        depend(&mut session, "minecraft:v2", "mod:x");
        depend(&mut session, "mod:x", "minecraft:v0");

        let report = expect_cycles(&mut session);

        assert_eq!(
            report.cycles(),
            &[keys(&["minecraft:v0", "minecraft:v1", "minecraft:v2", "mod:x"])]
        );
        assert!(report
            .to_string()
            .contains("minecraft:v2->mod:x->minecraft:v0"));
    }

    #[test]
    fn test_error_message_is_the_report() {
        let builtins = numbered_builtins(1);
        let mut session = session_with_mods(&builtins, &["a", "b"]);
        depend(&mut session, "mod:a", "mod:b");
        depend(&mut session, "mod:b", "mod:a");

        let err = session.sort_listeners().unwrap_err();
        let OrderingError::Cycle(report) = &err else {
            panic!("expected a cycle error, got {err}");
        };

        assert_eq!(err.to_string(), report.to_string());
    }

    #[test]
    fn test_failed_sort_still_closes_session() {
        let builtins = numbered_builtins(1);
        let mut session = session_with_mods(&builtins, &["a", "b"]);
        depend(&mut session, "mod:a", "mod:b");
        depend(&mut session, "mod:b", "mod:a");

        expect_cycles(&mut session);

        assert!(session.is_finished());
        assert!(matches!(
            session.add_dependency(&key("mod:a"), &key("minecraft:v0")),
            Err(OrderingError::SessionFinished)
        ));
    }

    #[test]
    fn test_self_dependency_rejected_before_sort() {
        let builtins = numbered_builtins(1);
        let mut session = session_with_mods(&builtins, &["a"]);

        let err = session.add_dependency(&key("mod:a"), &key("mod:a")).unwrap_err();

        assert!(matches!(err, OrderingError::SelfDependency { .. }));
        assert!(session.sort_listeners().is_ok());
    }
}
