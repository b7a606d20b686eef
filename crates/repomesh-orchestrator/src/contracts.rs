//! # Consumed Contracts
//!
//! `spec.md` §6 "Consumed contracts (from excluded collaborators)": the
//! three boundaries this workspace never implements a concrete adapter
//! for, expressed as plain async traits (no `async_trait` macro needed —
//! native `async fn` in traits is stable on the workspace's `1.75` MSRV).
//! Every trait takes an explicit timeout, per `spec.md` §5's "external I/O
//! is cancellable" rule; retrying on top of a single call is
//! [`crate::retry::with_retry`]'s job, not the trait's.

use std::time::Duration;

/// *Signing key provider* (`spec.md` §6): supplies Ed25519 key material for
/// a given `keyId` at event-emission time. Never exposed to the core at
/// rest — the core only ever receives the already-signed event, never the
/// private key itself. Returns a 32-byte seed rather than a constructed
/// `Ed25519KeyPair` so implementors aren't forced to depend on
/// `repomesh-crypto`'s internal signing-key representation.
pub trait SigningKeyProvider {
    type Error: std::fmt::Display;

    /// Fetch the signing seed for `key_id`.
    async fn seed_for(&self, key_id: &str, timeout: Duration) -> Result<[u8; 32], Self::Error>;
}

/// *Evidence fetcher* (`spec.md` §6): given a URI, returns its bytes or a
/// parse failure. Used by verifier implementations (SBOM/provenance
/// document retrieval), never by the core itself.
pub trait EvidenceFetcher {
    type Error: std::fmt::Display;

    async fn fetch(&self, uri: &str, timeout: Duration) -> Result<Vec<u8>, Self::Error>;
}

/// *External-ledger client* (`spec.md` §6): submits a signed self-payment
/// carrying a hex-encoded memo and returns its transaction hash; fetches a
/// transaction by hash and returns its memo, if any. Transport failures
/// are retriable — see [`crate::retry::with_retry`].
pub trait LedgerClient {
    type Error: std::fmt::Display;

    /// Submit `memo_hex` as a self-payment memo. Returns the resulting
    /// transaction hash.
    async fn submit_memo(&self, memo_hex: &str, timeout: Duration) -> Result<String, Self::Error>;

    /// Fetch the hex-encoded memo attached to `tx_hash`, if the
    /// transaction exists and carries one.
    async fn fetch_memo(
        &self,
        tx_hash: &str,
        timeout: Duration,
    ) -> Result<Option<String>, Self::Error>;
}

#[cfg(test)]
pub mod mocks {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;

    #[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
    #[error("mock failure: {0}")]
    pub struct MockError(pub String);

    /// Deterministic in-memory signing-key provider keyed by `keyId`.
    #[derive(Default)]
    pub struct MockSigningKeyProvider {
        pub seeds: HashMap<String, [u8; 32]>,
    }

    impl SigningKeyProvider for MockSigningKeyProvider {
        type Error = MockError;
        async fn seed_for(&self, key_id: &str, _timeout: Duration) -> Result<[u8; 32], Self::Error> {
            self.seeds
                .get(key_id)
                .copied()
                .ok_or_else(|| MockError(format!("no seed for key {key_id}")))
        }
    }

    /// Deterministic in-memory evidence fetcher keyed by URI.
    #[derive(Default)]
    pub struct MockEvidenceFetcher {
        pub documents: HashMap<String, Vec<u8>>,
    }

    impl EvidenceFetcher for MockEvidenceFetcher {
        type Error = MockError;
        async fn fetch(&self, uri: &str, _timeout: Duration) -> Result<Vec<u8>, Self::Error> {
            self.documents
                .get(uri)
                .cloned()
                .ok_or_else(|| MockError(format!("no evidence at {uri}")))
        }
    }

    /// Deterministic in-memory ledger: `submit_memo` assigns a sequential
    /// `txHash`, `fetch_memo` looks it back up.
    #[derive(Default)]
    pub struct InMemoryLedger {
        memos_by_tx: Mutex<HashMap<String, String>>,
        next_tx: Mutex<u64>,
    }

    impl LedgerClient for InMemoryLedger {
        type Error = MockError;

        async fn submit_memo(&self, memo_hex: &str, _timeout: Duration) -> Result<String, Self::Error> {
            let mut next = self.next_tx.lock().expect("mock mutex poisoned");
            let tx_hash = format!("tx-{:016x}", *next);
            *next += 1;
            self.memos_by_tx
                .lock()
                .expect("mock mutex poisoned")
                .insert(tx_hash.clone(), memo_hex.to_string());
            Ok(tx_hash)
        }

        async fn fetch_memo(
            &self,
            tx_hash: &str,
            _timeout: Duration,
        ) -> Result<Option<String>, Self::Error> {
            Ok(self
                .memos_by_tx
                .lock()
                .expect("mock mutex poisoned")
                .get(tx_hash)
                .cloned())
        }
    }

    #[tokio::test]
    async fn test_in_memory_ledger_round_trips_a_memo() {
        let ledger = InMemoryLedger::default();
        let tx_hash = ledger.submit_memo("deadbeef", Duration::from_secs(1)).await.unwrap();
        let fetched = ledger.fetch_memo(&tx_hash, Duration::from_secs(1)).await.unwrap();
        assert_eq!(fetched, Some("deadbeef".to_string()));
    }

    #[tokio::test]
    async fn test_in_memory_ledger_unknown_tx_is_none() {
        let ledger = InMemoryLedger::default();
        let fetched = ledger.fetch_memo("no-such-tx", Duration::from_secs(1)).await.unwrap();
        assert_eq!(fetched, None);
    }
}
