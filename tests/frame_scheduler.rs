mod tests {
    use blinky::{FramePacer, FrameTiming};
    use embassy_time::{Duration, Instant};

    #[test]
    fn test_first_frame_sets_baseline() {
        let mut pacer = FramePacer::new(Duration::from_millis(50));
        assert_eq!(pacer.refresh(), Duration::from_millis(50));
        assert_eq!(pacer.measure(Instant::from_millis(1000)), FrameTiming::Baseline);
    }

    #[test]
    fn test_early_frame_sleeps_the_remainder() {
        let mut pacer = FramePacer::new(Duration::from_millis(50));
        pacer.measure(Instant::from_millis(0));

        assert_eq!(
            pacer.measure(Instant::from_millis(10)),
            FrameTiming::Sleep(Duration::from_millis(40))
        );
        pacer.resync(Instant::from_millis(50));

        // Work done after the sleep counts against the next frame
        assert_eq!(
            pacer.measure(Instant::from_millis(70)),
            FrameTiming::Sleep(Duration::from_millis(30))
        );
    }

    #[test]
    fn test_exact_refresh_sleeps_zero() {
        let mut pacer = FramePacer::new(Duration::from_millis(50));
        pacer.measure(Instant::from_millis(0));
        assert_eq!(
            pacer.measure(Instant::from_millis(50)),
            FrameTiming::Sleep(Duration::from_millis(0))
        );
    }

    #[test]
    fn test_overrun_resets_baseline() {
        let mut pacer = FramePacer::new(Duration::from_millis(50));
        pacer.measure(Instant::from_millis(0));

        assert_eq!(
            pacer.measure(Instant::from_millis(80)),
            FrameTiming::Overrun(Duration::from_millis(30))
        );

        // The next frame is measured from the overrun, not from the old baseline
        assert_eq!(
            pacer.measure(Instant::from_millis(100)),
            FrameTiming::Sleep(Duration::from_millis(30))
        );
    }

    #[test]
    fn test_clock_going_backwards_is_not_an_overrun() {
        let mut pacer = FramePacer::new(Duration::from_millis(50));
        pacer.measure(Instant::from_millis(100));
        assert_eq!(
            pacer.measure(Instant::from_millis(90)),
            FrameTiming::Sleep(Duration::from_millis(50))
        );
    }
}
