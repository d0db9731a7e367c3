#![allow(dead_code)]

// tests/common/mod.rs

// Logging is auto-installed for every test binary that includes this module
#[ctor::ctor]
fn init_logging() {
    backend_test_support::logging::init();
}

// Scenario tests build on committed state, so the default here is commit.
// `HACKATHON_TXN_POLICY=rollback` flips a whole binary.
#[ctor::ctor]
fn init_txn_policy() {
    let policy = match std::env::var("HACKATHON_TXN_POLICY")
        .unwrap_or_default()
        .to_lowercase()
        .as_str()
    {
        "rollback" => hackathon_backend::db::txn_policy::TxnPolicy::RollbackOnOk,
        _ => hackathon_backend::db::txn_policy::TxnPolicy::CommitOnOk,
    };

    hackathon_backend::db::txn_policy::set_txn_policy(policy);
}
