//! Geometry discovery
//!
//! The adapter is asked for its row count first. There is no explicit
//! "not present" answer on this bus: an unconnected or mis-wired adapter
//! reads back whatever the data line floats to. A row count outside the
//! window of known adapters is therefore taken as "no adapter", and the
//! column query is skipped.

use embedded_hal::delay::DelayNs;
use tglcd_core::Geometry;
use tglcd_hal::Transport;
use tglcd_protocol::Command;

use super::session::Session;

/// Query the adapter's text geometry
///
/// Returns `Ok(None)` if the row count is implausible.
pub fn detect<T, D>(session: &mut Session<T, D>) -> Result<Option<Geometry>, T::Error>
where
    T: Transport,
    D: DelayNs,
{
    let rows = session.query(Command::GetLcdRow)?;
    if !Geometry::is_plausible_rows(rows) {
        return Ok(None);
    }

    let cols = session.query(Command::GetLcdCol)?;
    Ok(Some(Geometry::new(rows, cols)))
}
