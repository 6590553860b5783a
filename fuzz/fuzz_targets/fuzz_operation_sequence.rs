#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;

use idreg_registry::IdentityRegistry;
use idreg_types::{Clock, NullSink, Principal, Timestamp, VerificationLevel};

struct FixedClock(Timestamp);

impl Clock for FixedClock {
    fn now(&self) -> Timestamp {
        self.0
    }
}

#[derive(Arbitrary, Debug)]
enum Op {
    Register { who: u8, name: String, hash: String },
    Verify { caller: u8, user: u8, level: u8 },
    Request { who: u8, hash: String, notes: String },
    Update { who: u8, hash: String },
    Deactivate { caller: u8, target: u8 },
    Authorize { caller: u8, target: u8 },
    Revoke { caller: u8, target: u8 },
}

// Small principal space so operations collide often. principal(0) is the owner.
fn principal(b: u8) -> Principal {
    Principal::repeat(b % 8 + 1)
}

// Drive arbitrary operation sequences and check invariants after each step.
fuzz_target!(|ops: Vec<Op>| {
    let owner = principal(0);
    let Ok(mut reg) = IdentityRegistry::new(owner, FixedClock(Timestamp::new(1)), NullSink) else {
        return;
    };

    for op in ops {
        let touched = match op {
            Op::Register { who, name, hash } => {
                let _ = reg.register(&principal(who), &name, hash.into());
                principal(who)
            }
            Op::Verify { caller, user, level } => {
                let _ = reg.verify(&principal(caller), &principal(user), level);
                principal(user)
            }
            Op::Request { who, hash, notes } => {
                let _ = reg.request_verification(&principal(who), hash.into(), &notes);
                principal(who)
            }
            Op::Update { who, hash } => {
                if reg.update_document_hash(&principal(who), hash.into()).is_ok() {
                    let after = reg.identity(&principal(who)).expect("updated record exists");
                    assert_eq!(after.verification_level, VerificationLevel::Unverified);
                    assert_eq!(after.verifier, None);
                }
                principal(who)
            }
            Op::Deactivate { caller, target } => {
                let _ = reg.deactivate(&principal(caller), &principal(target));
                principal(target)
            }
            Op::Authorize { caller, target } => {
                let _ = reg.authorize_verifier(&principal(caller), &principal(target));
                principal(target)
            }
            Op::Revoke { caller, target } => {
                let _ = reg.revoke_verifier(&principal(caller), &principal(target));
                principal(target)
            }
        };

        assert!(reg.is_verifier(&owner).expect("owner lookup"));
        if let Ok(identity) = reg.identity(&touched) {
            assert!(!identity.name.is_empty());
            assert!(!identity.document_hash.is_empty());
            let verified = reg.is_verified(&touched).expect("verified lookup");
            assert_eq!(
                verified,
                identity.is_active && identity.verification_level != VerificationLevel::Unverified
            );
        }
    }
});
