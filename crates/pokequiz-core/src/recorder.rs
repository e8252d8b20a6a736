//! Round recorder.
//!
//! Hands a finished [`RoundResult`] to a [`RoundSink`]. The sink writes the
//! detail row and, for registered modes, the general leaderboard row as one
//! failure-atomic unit; this module only adds logging around it.

use pokequiz_types::{ModeId, RoundResult};
use tracing::{debug, warn};

use crate::store::{RecordAck, RoundSink, StoreError};

/// Persist one round.
///
/// # Errors
///
/// Returns [`StoreError::Write`] when the sink failed. Nothing from the
/// round is visible afterwards.
pub async fn record<K: RoundSink>(
    sink: &K,
    result: &RoundResult,
    mode_id: Option<ModeId>,
) -> Result<RecordAck, StoreError> {
    match sink.record_round(result, mode_id).await {
        Ok(ack) => {
            debug!(
                mode = %result.mode(),
                user_id = %result.user_id,
                correct = result.is_correct,
                score = result.score,
                general = ack.general_written,
                "Round recorded"
            );
            Ok(ack)
        }
        Err(e) => {
            warn!(mode = %result.mode(), user_id = %result.user_id, error = %e, "Round not recorded");
            Err(e)
        }
    }
}
