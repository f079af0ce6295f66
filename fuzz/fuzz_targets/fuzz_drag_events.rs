#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use sortables_core::{Container, DragEvent, DragState, Model, Transition, structurally_equal};

#[derive(Debug, Arbitrary)]
struct Input {
    /// Item count per container (each clamped to 0..8, at most 5 containers).
    sizes: Vec<u8>,
    ops: Vec<Op>,
}

#[derive(Debug, Arbitrary)]
enum Op {
    Start(u8),
    Over(u8, u8),
    End(u8, Option<u8>),
    Cancel,
}

fuzz_target!(|input: Input| {
    let mut containers = Vec::new();
    let mut next = 0usize;
    for (c, size) in input.sizes.iter().take(5).enumerate() {
        let items: Vec<String> = (0..usize::from(size % 8))
            .map(|_| {
                next += 1;
                format!("i{next}")
            })
            .collect();
        containers.push(Container::new(format!("c{c}"), items));
    }
    let Ok(model) = Model::new(containers) else {
        return;
    };

    // Ids to pick from: every container, every item, and one unknown id.
    let mut ids: Vec<String> = model.containers().iter().map(|c| c.id().to_owned()).collect();
    ids.extend(model.items().map(str::to_owned));
    ids.push("missing".to_owned());
    let id = |n: u8| ids[usize::from(n) % ids.len()].clone();

    let mut sorted_items: Vec<String> = model.items().map(str::to_owned).collect();
    sorted_items.sort();
    let container_ids: Vec<String> = model.containers().iter().map(|c| c.id().to_owned()).collect();

    let mut state = DragState::new(model);
    let mut snapshot = None;
    for op in input.ops.into_iter().take(64) {
        let event = match op {
            Op::Start(n) => DragEvent::Start { item: id(n) },
            Op::Over(a, o) => DragEvent::Over {
                active: id(a),
                over: id(o),
            },
            Op::End(a, o) => DragEvent::End {
                active: id(a),
                over: o.map(&id),
            },
            Op::Cancel => DragEvent::Cancel,
        };
        let before = state.model().clone();
        let was_dragging = state.is_dragging();
        match state.apply(event) {
            Transition::Started => {
                if !was_dragging {
                    snapshot = Some(before);
                }
            }
            Transition::Cancelled => {
                let restored = snapshot.take().expect("cancel without snapshot");
                assert!(structurally_equal(state.model(), &restored));
            }
            Transition::Committed(committed) => {
                let start = snapshot.take().expect("commit without snapshot");
                assert!(!structurally_equal(&committed, &start));
                assert!(structurally_equal(&committed, state.model()));
            }
            Transition::Dropped => {
                snapshot = None;
            }
            Transition::Ignored(_) => {
                assert!(structurally_equal(state.model(), &before));
            }
            Transition::Hovered { .. } => {}
        }
        assert_eq!(state.is_dragging(), snapshot.is_some());

        let mut items: Vec<String> = state.model().items().map(str::to_owned).collect();
        items.sort();
        assert_eq!(items, sorted_items, "items created or lost");
        let ids_now: Vec<&str> = state.model().containers().iter().map(|c| c.id()).collect();
        assert_eq!(ids_now, container_ids, "container order changed");
    }
});
