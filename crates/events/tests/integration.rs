//! Integration tests for events

#[cfg(test)]
mod tests {
    use cyget_events::*;

    #[tokio::test]
    async fn test_event_emitter() {
        let (tx, mut rx) = channel();

        tx.emit_warning("test warning");
        tx.emit_debug("test debug");

        let event1 = rx.recv().await.unwrap();
        assert!(matches!(
            event1,
            AppEvent::General(GeneralEvent::Warning { .. })
        ));
        assert_eq!(event1.level(), EventLevel::Warn);

        let event2 = rx.recv().await.unwrap();
        assert!(matches!(
            event2,
            AppEvent::General(GeneralEvent::DebugLog { .. })
        ));
    }

    #[tokio::test]
    async fn test_dropped_receiver() {
        let (tx, rx) = channel();
        drop(rx);

        // Should not panic when receiver is dropped
        tx.emit_warning("ignored");
    }

    #[test]
    fn test_absent_sender_is_silent() {
        let none: Option<EventSender> = None;
        none.emit_warning("nobody listens");
    }

    #[test]
    fn test_event_serialization() {
        let event = AppEvent::Resolver(ResolverEvent::UnknownReference {
            token: "@nope".into(),
        });
        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains(r#""domain":"resolver""#));
        assert!(json.contains(r#""type":"UnknownReference""#));
        assert_eq!(event.level(), EventLevel::Debug);
    }
}
