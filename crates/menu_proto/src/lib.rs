//! Wire protocol for UI <-> host shell menu communication
//!
//! The UI process drives native menu item enablement in the host shell and
//! receives menu click events back. Both directions are fire-and-forget:
//! one message per transition, no acknowledgement.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::io::{Read, Write};
use thiserror::Error;

/// Commands sent from the UI process to the host shell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MenuCommand {
    /// Enable or disable the "Export Selection" menu item
    SetExportEnabled(bool),

    /// Graceful shutdown of the host shell
    Shutdown,
}

/// Events sent from the host shell to the UI process
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MenuEvent {
    /// The "Export Selection" menu item (or its accelerator) was triggered
    ExportClicked,
}

/// Protocol-level errors
#[derive(Debug, Error)]
pub enum ProtoError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("codec error: {0}")]
    Codec(#[from] bincode::Error),

    #[error("frame too large: {0} bytes")]
    Oversize(u32),
}

/// Upper bound on a single frame. Menu traffic is tiny; anything larger
/// means a desynchronized stream.
const MAX_FRAME_LEN: u32 = 4 * 1024;

/// Local-socket name shared by both ends.
///
/// Overridable via `SHUTTERDECK_MENU_SOCKET` so tests and multiple
/// instances can coexist.
pub fn socket_name() -> String {
    std::env::var("SHUTTERDECK_MENU_SOCKET").unwrap_or_else(|_| "shutterdeck.menu".to_string())
}

/// Write one length-prefixed bincode frame.
pub fn write_frame<W: Write, T: Serialize>(writer: &mut W, message: &T) -> Result<(), ProtoError> {
    let payload = bincode::serialize(message)?;
    let len = payload.len() as u32;
    if len > MAX_FRAME_LEN {
        return Err(ProtoError::Oversize(len));
    }

    writer.write_all(&len.to_le_bytes())?;
    writer.write_all(&payload)?;
    writer.flush()?;
    Ok(())
}

/// Read one length-prefixed bincode frame.
pub fn read_frame<R: Read, T: DeserializeOwned>(reader: &mut R) -> Result<T, ProtoError> {
    let mut len_buf = [0u8; 4];
    reader.read_exact(&mut len_buf)?;

    let len = u32::from_le_bytes(len_buf);
    if len > MAX_FRAME_LEN {
        return Err(ProtoError::Oversize(len));
    }

    let mut payload = vec![0u8; len as usize];
    reader.read_exact(&mut payload)?;
    Ok(bincode::deserialize(&payload)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_command_round_trip() {
        let mut buf = Vec::new();
        write_frame(&mut buf, &MenuCommand::SetExportEnabled(true)).unwrap();
        write_frame(&mut buf, &MenuCommand::Shutdown).unwrap();

        let mut cursor = Cursor::new(buf);
        let first: MenuCommand = read_frame(&mut cursor).unwrap();
        let second: MenuCommand = read_frame(&mut cursor).unwrap();

        assert_eq!(first, MenuCommand::SetExportEnabled(true));
        assert_eq!(second, MenuCommand::Shutdown);
    }

    #[test]
    fn test_event_round_trip() {
        let mut buf = Vec::new();
        write_frame(&mut buf, &MenuEvent::ExportClicked).unwrap();

        let event: MenuEvent = read_frame(&mut Cursor::new(buf)).unwrap();
        assert_eq!(event, MenuEvent::ExportClicked);
    }

    #[test]
    fn test_oversize_frame_rejected() {
        let mut buf = Vec::new();
        let big = vec![0u8; MAX_FRAME_LEN as usize + 1];
        assert!(matches!(
            write_frame(&mut buf, &big),
            Err(ProtoError::Oversize(_))
        ));

        // A corrupted length prefix must not allocate the claimed size
        let mut corrupt = Cursor::new(u32::MAX.to_le_bytes().to_vec());
        assert!(matches!(
            read_frame::<_, MenuEvent>(&mut corrupt),
            Err(ProtoError::Oversize(_))
        ));
    }

    #[test]
    fn test_truncated_frame_is_io_error() {
        let mut buf = Vec::new();
        write_frame(&mut buf, &MenuEvent::ExportClicked).unwrap();
        buf.truncate(buf.len() - 1);

        assert!(matches!(
            read_frame::<_, MenuEvent>(&mut Cursor::new(buf)),
            Err(ProtoError::Io(_))
        ));
    }
}
