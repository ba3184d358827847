use super::server_hello::{parse_server_hello, parse_sslv2, ServerFlight};
use crate::error::HelloError;
use crate::util::hex::to_hex;
use tokio::io::{AsyncRead, AsyncReadExt};

const CONTENT_ALERT: u8 = 0x15;
const CONTENT_HANDSHAKE: u8 = 0x16;
const MAX_RECORD: usize = 16384 + 2048;
const MAX_HANDSHAKE: usize = 64 * 1024;

#[derive(Debug, thiserror::Error)]
pub enum FlightError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Hello(#[from] HelloError),
}

/// Reads the server's first flight up to and including the ServerHello,
/// reassembling it when it spans several records.
#[derive(Debug, Default)]
pub struct RecordReader;

impl RecordReader {
    pub async fn read_flight<T: AsyncRead + Unpin>(
        &self,
        stream: &mut T,
    ) -> Result<ServerFlight, FlightError> {
        let mut header = [0u8; 5];
        stream.read_exact(&mut header).await?;

        if header[0] & 0x80 != 0 {
            let len = (((header[0] & 0x7f) as usize) << 8) | header[1] as usize;
            if len < 3 {
                return Err(HelloError::Truncated("SSLv2 record").into());
            }
            let mut message = header[2..].to_vec();
            message.resize(len, 0);
            stream.read_exact(&mut message[3..]).await?;
            return Ok(parse_sslv2(&message)?);
        }

        let mut handshake = Vec::new();
        loop {
            let content_type = header[0];
            if !matches!(content_type, CONTENT_ALERT | CONTENT_HANDSHAKE) || header[1] != 0x03 {
                return Err(HelloError::NotTls(to_hex(&header)).into());
            }
            let len = u16::from_be_bytes([header[3], header[4]]) as usize;
            if len > MAX_RECORD {
                return Err(HelloError::Oversized(len).into());
            }
            let mut body = vec![0u8; len];
            stream.read_exact(&mut body).await?;

            if content_type == CONTENT_ALERT {
                if body.len() < 2 {
                    return Err(HelloError::Truncated("alert").into());
                }
                return Ok(ServerFlight::Alert {
                    level: body[0],
                    description: body[1],
                });
            }

            handshake.extend_from_slice(&body);
            if handshake.len() >= 4 {
                let needed = 4 + u32::from_be_bytes([0, handshake[1], handshake[2], handshake[3]]) as usize;
                if needed > MAX_HANDSHAKE {
                    return Err(HelloError::Oversized(needed).into());
                }
                if handshake.len() >= needed {
                    return Ok(ServerFlight::Hello(parse_server_hello(&handshake[..needed])?));
                }
            }
            stream.read_exact(&mut header).await?;
        }
    }
}
