use crate::error::{GcaError, Result};
use crate::llm::message::CommitMessage;

/// Open the draft in the system editor and parse the buffer back into a
/// commit message.
///
/// Editor selection follows the `edit` crate's priority: $VISUAL > $EDITOR >
/// platform default list, falling through when the configured editor is
/// missing. Returns `Ok(None)` when the user aborted by clearing the buffer
/// (a blank buffer is an abort, not an empty draft).
pub fn edit_message(draft: &CommitMessage) -> Result<Option<CommitMessage>> {
    let buffer = edit::edit(draft.full_message())?;

    match CommitMessage::parse(&buffer) {
        Ok(edited) => Ok(Some(edited)),
        Err(GcaError::EmptyResponse) => Ok(None),
        Err(e) => Err(e),
    }
}
