mod tests {
    use blinky::{
        Animation, AnimationSpec, LedRange,
        layout::{Layout, NodeId, NodeKind},
    };

    fn build(document: &str, leds: usize) -> Animation {
        let spec = AnimationSpec::from_json(document).unwrap();
        Animation::build(&spec, leds, 0).unwrap()
    }

    fn child_ranges(layout: &Layout, id: NodeId) -> Vec<(usize, usize, i64)> {
        layout
            .children(id)
            .iter()
            .map(|&child| {
                let node = layout.node(child).unwrap();
                (node.leds.start, node.leds.end, node.phase)
            })
            .collect()
    }

    /// Children of every container tile the container's range exactly
    fn assert_tiled(layout: &Layout) {
        for (id, node) in layout.nodes().iter().enumerate() {
            let NodeKind::Container { children } = &node.kind else {
                continue;
            };
            if children.is_empty() {
                continue;
            }

            let mut cursor = node.leds.start;
            for &child in children {
                let range = layout.node(child).unwrap().leds;
                assert_eq!(range.start, cursor, "gap or overlap under node {id}");
                assert!(range.end > range.start);
                cursor = range.end;
            }
            assert_eq!(cursor, node.leds.end, "node {id} is not fully covered");
        }
    }

    #[test]
    fn test_width_then_flex() {
        let animation = build(
            r#"{"controllers": [{"type": "noop", "width": 3}, {"type": "noop", "flex": 1}]}"#,
            10,
        );
        let layout = animation.layout();

        assert_eq!(layout.node(Layout::ROOT).unwrap().leds, LedRange::new(0, 10));
        assert_eq!(child_ranges(layout, Layout::ROOT), vec![(0, 3, 0), (3, 10, 0)]);
        assert_tiled(layout);
    }

    #[test]
    fn test_flex_remainder_goes_to_first_flex_child() {
        let animation = build(
            r#"{"controllers": [
                {"type": "noop", "flex": 1},
                {"type": "noop", "flex": 2},
                {"type": "noop", "width": 1}
            ]}"#,
            11,
        );
        let layout = animation.layout();

        // 10 flexible LEDs over 3 units: 3 per unit, 1 left over
        assert_eq!(
            child_ranges(layout, Layout::ROOT),
            vec![(0, 4, 0), (4, 10, 0), (10, 11, 0)]
        );
        assert_eq!(animation.stats().passes, 1);
        assert_eq!(animation.stats().unassigned, 0);
    }

    #[test]
    fn test_flex_remainder_skips_zero_weights() {
        let animation = build(
            r#"{"controllers": [{"type": "noop", "flex": 0}, {"type": "noop", "flex": 3}]}"#,
            10,
        );
        let layout = animation.layout();

        let children = layout.children(Layout::ROOT);
        assert_eq!(children.len(), 1);
        let node = layout.node(children[0]).unwrap();
        assert_eq!(node.leds, LedRange::new(0, 10));
        assert_eq!(node.kind, NodeKind::Pattern(1));
        assert_eq!(animation.stats().unassigned, 0);
    }

    #[test]
    fn test_fixed_widths_wrap_with_offset_adjust() {
        let animation = build(
            r#"{"offsetAdjust": 5, "controllers": [
                {"type": "noop", "width": 2},
                {"type": "noop", "width": 3, "offset": 1}
            ]}"#,
            12,
        );
        let layout = animation.layout();

        assert_eq!(
            child_ranges(layout, Layout::ROOT),
            vec![(0, 2, 0), (2, 5, 1), (5, 7, 5), (7, 10, 6), (10, 12, 10)]
        );
        assert_eq!(animation.stats().passes, 3);
        assert_tiled(layout);
    }

    #[test]
    fn test_widths_larger_than_range_are_truncated() {
        let animation = build(
            r#"{"controllers": [
                {"type": "noop", "width": 4},
                {"type": "noop", "flex": 1},
                {"type": "noop", "width": 4}
            ]}"#,
            6,
        );
        assert_eq!(
            child_ranges(animation.layout(), Layout::ROOT),
            vec![(0, 4, 0), (4, 6, 0)]
        );
        assert_tiled(animation.layout());
    }

    #[test]
    fn test_reused_container_resolves_independently() {
        let animation = build(
            r#"{"offsetAdjust": 3, "controllers": [
                {"type": "container", "width": 4, "offset": 1, "controllers": [
                    {"type": "colors", "flex": 1, "colors": [[255, 0, 0]], "duration": 1},
                    {"type": "colors", "flex": 1, "colors": [[0, 0, 255]], "duration": 1, "offset": 2}
                ]}
            ]}"#,
            8,
        );
        let layout = animation.layout();

        let placed = layout.children(Layout::ROOT).to_vec();
        assert_eq!(child_ranges(layout, Layout::ROOT), vec![(0, 4, 1), (4, 8, 4)]);
        assert_eq!(child_ranges(layout, placed[0]), vec![(0, 2, 1), (2, 4, 3)]);
        assert_eq!(child_ranges(layout, placed[1]), vec![(4, 6, 4), (6, 8, 6)]);

        // Both placements share the two compiled patterns
        assert_eq!(animation.patterns().len(), 2);
        let stats = animation.stats();
        assert_eq!(stats.containers, 3);
        assert_eq!(stats.placements, 4);
        assert_tiled(layout);
    }

    #[test]
    fn test_tiling_holds_for_mixed_trees() {
        let documents = [
            r#"{"controllers": [{"type": "noop", "flex": 3}, {"type": "noop", "flex": 5}]}"#,
            r#"{"controllers": [{"type": "noop", "width": 7}]}"#,
            r#"{"controllers": [
                {"type": "noop", "width": 2},
                {"type": "container", "flex": 2, "controllers": [
                    {"type": "noop", "width": 1},
                    {"type": "noop", "flex": 1}
                ]},
                {"type": "noop", "flex": 1}
            ]}"#,
        ];

        for document in documents {
            for leds in [1, 5, 16, 31, 60] {
                let animation = build(document, leds);
                assert_tiled(animation.layout());
                assert_eq!(animation.stats().unassigned, 0, "{document} over {leds}");
            }
        }
    }

    #[test]
    fn test_zero_sized_children_stop_assignment() {
        let animation = build(r#"{"controllers": [{"type": "noop", "width": 0}]}"#, 5);
        assert!(animation.layout().children(Layout::ROOT).is_empty());
        assert_eq!(animation.stats().unassigned, 5);
    }

    #[test]
    fn test_empty_controller_list() {
        let animation = build(r#"{"controllers": []}"#, 8);
        let layout = animation.layout();
        assert_eq!(layout.nodes().len(), 1);
        assert!(layout.children(Layout::ROOT).is_empty());
        assert_eq!(layout.placements().count(), 0);
    }
}
