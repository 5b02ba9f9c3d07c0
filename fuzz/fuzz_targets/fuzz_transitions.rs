#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use responsive_grid::{Effect, ResponsiveConfig, initialize, live_items, on_config_change};

#[derive(Debug, Arbitrary)]
enum Step {
    Resize(u16),
    Override(Option<u8>),
    Items(Vec<u8>),
    AdoptLayouts,
}

const NAMES: [&str; 5] = ["lg", "md", "sm", "xs", "xxs"];

fuzz_target!(|steps: Vec<Step>| {
    let mut config = ResponsiveConfig::default().with_items(live_items(["a", "b", "c"]));
    let Ok(init) = initialize(&config) else {
        return;
    };
    let mut state = init.state;
    let mut layouts = init.layouts;

    for step in steps.into_iter().take(64) {
        let mut next = config.clone();
        match step {
            Step::Resize(width) => next.width = u32::from(width),
            Step::Override(bp) => {
                next.breakpoint = bp.map(|i| NAMES[usize::from(i) % NAMES.len()].to_string());
            }
            Step::Items(ids) => {
                let mut ids: Vec<String> =
                    ids.iter().take(16).map(|i| format!("n{}", i % 20)).collect();
                ids.sort();
                ids.dedup();
                next.items = live_items(ids);
            }
            Step::AdoptLayouts => next.layouts = layouts.clone(),
        }

        let t = match on_config_change(&config, &next, &state) {
            Ok(t) => t,
            Err(err) => panic!("valid config rejected: {err}"),
        };

        assert_eq!(Some(t.state.cols), next.cols.get(&t.state.breakpoint));
        let kinds: Vec<u8> = t
            .effects
            .iter()
            .map(|e| match e {
                Effect::Init(_) => 0,
                Effect::BreakpointChange { .. } => 1,
                Effect::LayoutChange { .. } => 2,
                Effect::WidthChange { .. } => 3,
            })
            .collect();
        assert!(
            matches!(kinds.as_slice(), [] | [3] | [2] | [1, 2, 3]),
            "unexpected effect order {kinds:?}"
        );

        config = next;
        state = t.state;
        layouts = t.layouts;
    }
});
