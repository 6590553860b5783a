#![no_main]

use libfuzzer_sys::fuzz_target;

use idreg_registry::{IdentityRegistry, RegistrySnapshot};
use idreg_types::{NullSink, SystemClock};

fuzz_target!(|data: &[u8]| {
    // Decoding arbitrary bytes must never panic.
    let _ = bincode::deserialize::<idreg_types::Principal>(data);
    let _ = bincode::deserialize::<idreg_store::Identity>(data);
    let _ = bincode::deserialize::<idreg_store::VerificationRequest>(data);

    // Anything that does decode must restore cleanly or fail with an error.
    if let Ok(snapshot) = RegistrySnapshot::from_bytes(data) {
        let _ = IdentityRegistry::restore(snapshot, SystemClock, NullSink);
    }
});
