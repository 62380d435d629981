//! See [`mocktab::test::ballot_workload`] for documentation.

#![no_main]

use libfuzzer_sys::fuzz_target;
use mocktab::test::ballot_workload::Workload;

fuzz_target!(|data: Workload| {
    let rt = tokio::runtime::Runtime::new().unwrap();
    rt.block_on(async {
        let _ = data.run().await;
    });
});
