mod tests {
    use std::thread;

    use blinky::{AnimationSlot, Duration, Error, Slot};

    #[test]
    fn test_deposit_and_take() {
        let slot = Slot::new();
        assert!(slot.is_empty());
        assert_eq!(slot.take(), None::<u32>);

        assert_eq!(slot.deposit(1), None);
        assert!(!slot.is_empty());
        assert_eq!(slot.take(), Some(1));
        assert!(slot.is_empty());
        assert_eq!(slot.take(), None);
    }

    #[test]
    fn test_last_write_wins() {
        let slot = Slot::default();
        slot.deposit("first");
        assert_eq!(slot.deposit("second"), Some("first"));
        assert_eq!(slot.take(), Some("second"));
    }

    #[test]
    fn test_publish_parses_documents() {
        let slot = AnimationSlot::new();
        slot.publish(r#"[{"refresh": 20}, {"refresh": 30}]"#).unwrap();

        let set = slot.take().unwrap();
        assert_eq!(set.len(), 2);
        assert_eq!(set[0].refresh, Duration::from_millis(20));
    }

    #[test]
    fn test_invalid_document_leaves_slot_untouched() {
        let slot = AnimationSlot::new();
        slot.publish(r#"{"refresh": 20}"#).unwrap();

        let result = slot.publish(r#"{"controllers": [{"type": "sparkle", "flex": 1}]}"#);
        assert!(matches!(result, Err(Error::Validation(_))));

        let set = slot.take().unwrap();
        assert_eq!(set[0].refresh, Duration::from_millis(20));
    }

    static COUNTER: Slot<u64> = Slot::new();

    #[test]
    fn test_reader_sees_increasing_values() {
        let producer = thread::spawn(|| {
            for value in 1..=10_000 {
                COUNTER.deposit(value);
            }
        });

        let mut last = 0;
        while !producer.is_finished() || !COUNTER.is_empty() {
            if let Some(value) = COUNTER.take() {
                assert!(value > last, "{value} after {last}");
                last = value;
            }
        }
        producer.join().unwrap();

        // The final deposit is never lost
        if let Some(value) = COUNTER.take() {
            last = value;
        }
        assert_eq!(last, 10_000);
    }
}
