//! # External-Ledger Memo Codec
//!
//! `spec.md` §4.3/§6 "External-ledger memo": a compact JSON object with
//! keys `{v, p, n, r, h, c, pv, rg}` mapping to `{schemaVersion,
//! partitionId, network, root, manifestHash, count, prev-or-"0",
//! "first..last"-or-"0"}`, hex-encoded as UTF-8 for transport and bounded
//! to 700 bytes.

use repomesh_core::Hex32;
use serde::{Deserialize, Serialize};

use crate::error::AnchorError;

/// Memo type/format tags (`spec.md` §6): `MemoType = "repomesh-anchor-v1"`,
/// `MemoFormat = "application/json"`.
pub const MEMO_TYPE: &str = "repomesh-anchor-v1";
pub const MEMO_FORMAT: &str = "application/json";

/// The 700-byte transport bound on the hex-encoded memo (`spec.md` §4.3).
pub const MEMO_SIZE_LIMIT: usize = 700;

/// The compact memo shape, keys exactly as named in `spec.md` §4.3/§6.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerMemo {
    pub v: u32,
    pub p: String,
    pub n: String,
    pub r: Hex32,
    pub h: Hex32,
    pub c: u64,
    /// `"0"` for a genesis partition with no previous anchor.
    pub pv: String,
    /// `"<first>..<last>"`, or `"0"` for an empty range (never emitted in
    /// practice — a materialized partition always has at least one leaf).
    pub rg: String,
}

impl LedgerMemo {
    /// Build a memo from a materialized manifest's fields.
    pub fn from_manifest_fields(
        partition_id: &str,
        network: &str,
        root: Hex32,
        manifest_hash: Hex32,
        count: u64,
        prev: Option<Hex32>,
        range: Option<[Hex32; 2]>,
    ) -> Self {
        Self {
            v: crate::manifest::MANIFEST_SCHEMA_VERSION,
            p: partition_id.to_string(),
            n: network.to_string(),
            r: root,
            h: manifest_hash,
            c: count,
            pv: prev.map(|h| h.to_hex()).unwrap_or_else(|| "0".to_string()),
            rg: range
                .map(|[first, last]| format!("{}..{}", first.to_hex(), last.to_hex()))
                .unwrap_or_else(|| "0".to_string()),
        }
    }

    /// Encode to compact (whitespace-free) JSON, then hex, for transport.
    ///
    /// Returns `MemoTooLarge` if the hex-encoded payload exceeds
    /// [`MEMO_SIZE_LIMIT`] bytes.
    pub fn encode_hex(&self) -> Result<String, AnchorError> {
        let json =
            serde_json::to_vec(self).map_err(|e| AnchorError::MemoDecodeFailed(e.to_string()))?;
        let hex = repomesh_core::hex::bytes_to_hex(&json);
        if hex.len() > MEMO_SIZE_LIMIT {
            return Err(AnchorError::MemoTooLarge {
                size: hex.len(),
                limit: MEMO_SIZE_LIMIT,
            });
        }
        Ok(hex)
    }

    /// Decode a hex-encoded memo payload back into structured fields.
    pub fn decode_hex(hex: &str) -> Result<Self, AnchorError> {
        let bytes = repomesh_core::hex::hex_to_bytes(hex)
            .map_err(|e| AnchorError::MemoDecodeFailed(e.to_string()))?;
        serde_json::from_slice(&bytes).map_err(|e| AnchorError::MemoDecodeFailed(e.to_string()))
    }

    /// Parse this memo's `rg` field back into a `(first, last)` leaf-hash
    /// pair, if the partition was non-empty.
    pub fn parsed_range(&self) -> Result<Option<(Hex32, Hex32)>, AnchorError> {
        if self.rg == "0" {
            return Ok(None);
        }
        let (first, last) = self
            .rg
            .split_once("..")
            .ok_or_else(|| AnchorError::MemoDecodeFailed(format!("malformed range {:?}", self.rg)))?;
        let first = Hex32::from_hex(first)
            .map_err(|e| AnchorError::MemoDecodeFailed(format!("bad range start: {e}")))?;
        let last = Hex32::from_hex(last)
            .map_err(|e| AnchorError::MemoDecodeFailed(format!("bad range end: {e}")))?;
        Ok(Some((first, last)))
    }

    /// Parse this memo's `pv` field back into the previous anchor root, if
    /// any.
    pub fn parsed_prev(&self) -> Result<Option<Hex32>, AnchorError> {
        if self.pv == "0" {
            return Ok(None);
        }
        Hex32::from_hex(&self.pv)
            .map(Some)
            .map_err(|e| AnchorError::MemoDecodeFailed(format!("bad prev: {e}")))
    }
}

/// The `notes` JSON tail carried by a `ledger.anchor` `AttestationPublished`
/// event (`spec.md` §4.3 "Anchor-event emission"), appended after a
/// separating newline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnchorEventNotes {
    #[serde(rename = "txHash")]
    pub tx_hash: String,
    pub network: String,
    #[serde(rename = "walletAddress")]
    pub wallet_address: String,
    #[serde(rename = "partitionId")]
    pub partition_id: String,
    #[serde(rename = "merkleRoot")]
    pub merkle_root: Hex32,
    pub algo: String,
    pub prev: Option<Hex32>,
    pub range: [Hex32; 2],
    #[serde(rename = "manifestPath")]
    pub manifest_path: String,
}

impl AnchorEventNotes {
    /// Render as `notes` text: a human-readable prefix line, a separating
    /// newline, then the compact JSON tail (`spec.md` §4.3).
    pub fn render(&self, prefix: &str) -> Result<String, AnchorError> {
        let json = serde_json::to_string(self)
            .map_err(|e| AnchorError::MemoDecodeFailed(e.to_string()))?;
        Ok(format!("{prefix}\n{json}"))
    }

    /// Parse the JSON tail out of a `notes` string, ignoring everything
    /// before the last newline.
    pub fn parse_from_notes(notes: &str) -> Result<Self, AnchorError> {
        let tail = notes
            .rsplit_once('\n')
            .map(|(_, tail)| tail)
            .unwrap_or(notes);
        serde_json::from_str(tail).map_err(|e| AnchorError::MemoDecodeFailed(e.to_string()))
    }
}
