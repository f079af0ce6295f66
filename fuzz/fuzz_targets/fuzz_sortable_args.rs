#![no_main]

use libfuzzer_sys::fuzz_target;
use sortables_bridge::SortableArgs;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    let Ok(args) = SortableArgs::from_json_str(text) else {
        return;
    };
    // A parsed configuration either builds a model or reports why not; a
    // model always describes back to the same shape.
    if let Ok(model) = args.to_model() {
        let described = args.describe(&model);
        assert_eq!(described, args.items);
    }
});
