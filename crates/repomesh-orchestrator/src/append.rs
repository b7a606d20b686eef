//! # `appendBatch`
//!
//! `spec.md` §6: the append-only-log admission predicate, exposed at the
//! orchestrator boundary as a thin, structured wrapper over
//! [`repomesh_log::AppendOnlyLog::admit_batch`] — the orchestrator never
//! reimplements the seven `spec.md` §4.2 checks, it only shapes the result.

use repomesh_core::Timestamp;
use repomesh_log::AppendOnlyLog;
use repomesh_model::ManifestSet;

use crate::error::OrchestratorError;

/// `appendBatch`'s result: how many of the proposed lines were newly
/// admitted. A failed batch never partially commits — see
/// [`AppendOnlyLog::admit_batch`]'s monotonicity guarantee — so `admitted`
/// is only ever populated on `ok: true`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AppendBatchResult {
    pub ok: bool,
    pub admitted: usize,
}

/// Admit `proposed_lines` (the full candidate log: previously committed
/// lines followed by the new lines to append) into `log`, under the
/// current `manifests` and admission clock `now` (`spec.md` §4.2).
pub fn append_batch(
    log: &mut AppendOnlyLog,
    proposed_lines: &[String],
    manifests: &ManifestSet,
    now: Timestamp,
) -> Result<AppendBatchResult, OrchestratorError> {
    let admitted = log.admit_batch(proposed_lines, manifests, now)?;
    Ok(AppendBatchResult { ok: true, admitted })
}
