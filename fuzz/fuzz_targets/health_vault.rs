//! Drives random operation sequences against the vault.
//!
//! Every call must end in `Ok` or a `ContractError`, never a host trap, and
//! a record that has gone inactive must never read as active again.

#![no_main]
use arbitrary::Arbitrary;
use health_vault::{ContractError, HealthVaultContract, HealthVaultContractClient};
use libfuzzer_sys::fuzz_target;
use soroban_sdk::testutils::{Address as _, Ledger};
use soroban_sdk::{Address, Env, String};

const USERS: usize = 4;

#[derive(Arbitrary, Debug)]
enum Op {
    Upload { user: u8, score: u32, risk: u32, age: u32, hash: Vec<u8> },
    Update { user: u8, score: u32, risk: u32, age: u32, hash: Vec<u8> },
    Grant { owner: u8, recipient: u8 },
    Revoke { owner: u8, recipient: u8 },
    Share { recipient: u8, owner: u8, field: u8 },
    Deactivate { user: u8 },
    EmergencyClear { user: u8 },
    Compare { requester: u8, user1: u8, user2: u8 },
    Tick { secs: u16 },
}

fn pick(users: &[Address], index: u8) -> &Address {
    &users[index as usize % users.len()]
}

fn hash_from(env: &Env, raw: &[u8]) -> String {
    String::from_bytes(env, &raw[..raw.len().min(300)])
}

fn settled<T>(
    result: Result<Result<T, soroban_sdk::ConversionError>, Result<ContractError, soroban_sdk::InvokeError>>,
) -> Option<T> {
    match result {
        Ok(Ok(value)) => Some(value),
        Err(Ok(_)) => None,
        _ => panic!("vault call trapped"),
    }
}

fuzz_target!(|ops: Vec<Op>| {
    let env = Env::default();
    env.mock_all_auths();
    env.ledger().with_mut(|li| li.timestamp = 1_700_000_000);

    let contract_id = env.register(HealthVaultContract, ());
    let client = HealthVaultContractClient::new(&env, &contract_id);
    let users: Vec<Address> = (0..USERS).map(|_| Address::generate(&env)).collect();
    let mut retired = [false; USERS];

    for op in ops.iter().take(64) {
        match op {
            Op::Upload { user, score, risk, age, hash } => {
                settled(client.try_upload_health_data(
                    pick(&users, *user),
                    &hash_from(&env, hash),
                    score,
                    risk,
                    age,
                ));
            }
            Op::Update { user, score, risk, age, hash } => {
                settled(client.try_update_health_data(
                    pick(&users, *user),
                    &hash_from(&env, hash),
                    score,
                    risk,
                    age,
                ));
            }
            Op::Grant { owner, recipient } => {
                settled(client.try_grant_sharing_permission(
                    pick(&users, *owner),
                    pick(&users, *recipient),
                ));
            }
            Op::Revoke { owner, recipient } => {
                settled(client.try_revoke_sharing_permission(
                    pick(&users, *owner),
                    pick(&users, *recipient),
                ));
            }
            Op::Share { recipient, owner, field } => {
                let (recipient, owner) = (pick(&users, *recipient), pick(&users, *owner));
                let value = match field % 3 {
                    0 => settled(client.try_share_health_score(recipient, owner)),
                    1 => settled(client.try_share_risk_factor(recipient, owner)),
                    _ => settled(client.try_share_age_group(recipient, owner)),
                };
                if value.is_some() {
                    assert!(client.has_sharing_permission(owner, recipient));
                    assert!(client.get_user_health_data(owner).is_active);
                }
            }
            Op::Deactivate { user } => {
                settled(client.try_deactivate_health_data(pick(&users, *user)));
            }
            Op::EmergencyClear { user } => {
                settled(client.try_emergency_clear_data(pick(&users, *user)));
            }
            Op::Compare { requester, user1, user2 } => {
                settled(client.try_compare_health_scores(
                    pick(&users, *requester),
                    pick(&users, *user1),
                    pick(&users, *user2),
                ));
            }
            Op::Tick { secs } => {
                env.ledger().with_mut(|li| li.timestamp += *secs as u64);
            }
        }

        for (index, user) in users.iter().enumerate() {
            let summary = client.get_user_health_data(user);
            let has_record = summary.timestamp != 0;
            if retired[index] {
                assert!(!summary.is_active);
            } else if has_record && !summary.is_active {
                retired[index] = true;
            }
        }
    }
});
