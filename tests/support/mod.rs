#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

/// How the mock server answers a ClientHello.
#[derive(Clone, Copy)]
pub enum Behaviour {
    /// TLS 1.2 only, choosing `suite` when offered.
    Tls12 { suite: u16 },
    /// Always sends a fatal handshake_failure alert.
    Alert,
    /// Accepts and never answers.
    Silent,
    /// Reads the hello and hangs up.
    Hangup,
}

pub struct MockServer {
    pub port: u16,
    pub accepted: Arc<AtomicUsize>,
}

impl MockServer {
    pub fn accepted(&self) -> usize {
        self.accepted.load(Ordering::SeqCst)
    }
}

pub async fn spawn(behaviour: Behaviour) -> MockServer {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    let accepted = Arc::new(AtomicUsize::new(0));
    let counter = accepted.clone();

    tokio::spawn(async move {
        loop {
            let Ok((socket, _)) = listener.accept().await else {
                return;
            };
            counter.fetch_add(1, Ordering::SeqCst);
            tokio::spawn(handle(socket, behaviour));
        }
    });

    MockServer { port, accepted }
}

/// A port with nothing listening on it.
pub async fn closed_port() -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    listener.local_addr().unwrap().port()
}

struct Hello {
    sslv2: bool,
    client_version: u16,
    suites: Vec<u16>,
}

async fn read_hello(socket: &mut TcpStream) -> Option<Hello> {
    let mut header = [0u8; 5];
    socket.read_exact(&mut header).await.ok()?;
    if header[0] & 0x80 != 0 {
        let len = (((header[0] & 0x7f) as usize) << 8) | header[1] as usize;
        let mut rest = vec![0u8; len.saturating_sub(3)];
        socket.read_exact(&mut rest).await.ok()?;
        return Some(Hello {
            sslv2: true,
            client_version: 0x0002,
            suites: Vec::new(),
        });
    }

    let len = u16::from_be_bytes([header[3], header[4]]) as usize;
    let mut body = vec![0u8; len];
    socket.read_exact(&mut body).await.ok()?;
    // handshake header(4) + version(2) + random(32)
    let client_version = u16::from_be_bytes([body[4], body[5]]);
    let mut at = 4 + 2 + 32;
    at += 1 + body[at] as usize;
    let suites_len = u16::from_be_bytes([body[at], body[at + 1]]) as usize;
    let suites = body[at + 2..at + 2 + suites_len]
        .chunks(2)
        .map(|c| u16::from_be_bytes([c[0], c[1]]))
        .collect();
    Some(Hello {
        sslv2: false,
        client_version,
        suites,
    })
}

fn server_hello(version: u16, suite: u16) -> Vec<u8> {
    let mut body = Vec::new();
    body.extend_from_slice(&version.to_be_bytes());
    body.extend_from_slice(&[0x42; 32]);
    body.push(0);
    body.extend_from_slice(&suite.to_be_bytes());
    body.push(0);
    let mut handshake = vec![0x02, 0, 0, body.len() as u8];
    handshake.extend_from_slice(&body);
    let mut record = vec![0x16, 0x03, 0x03];
    record.extend_from_slice(&(handshake.len() as u16).to_be_bytes());
    record.extend_from_slice(&handshake);
    record
}

fn alert(description: u8) -> Vec<u8> {
    vec![0x15, 0x03, 0x03, 0x00, 0x02, 0x02, description]
}

async fn handle(mut socket: TcpStream, behaviour: Behaviour) {
    if let Behaviour::Silent = behaviour {
        let mut sink = [0u8; 1024];
        while let Ok(n) = socket.read(&mut sink).await {
            if n == 0 {
                return;
            }
        }
        return;
    }

    let Some(hello) = read_hello(&mut socket).await else {
        return;
    };
    let reply = match behaviour {
        Behaviour::Hangup | Behaviour::Silent => return,
        Behaviour::Alert => alert(40),
        Behaviour::Tls12 { .. } if hello.sslv2 => return,
        Behaviour::Tls12 { .. } if hello.client_version != 0x0303 => alert(70),
        Behaviour::Tls12 { suite } if hello.suites.contains(&suite) => server_hello(0x0303, suite),
        Behaviour::Tls12 { .. } => alert(40),
    };
    let _ = socket.write_all(&reply).await;
    let _ = socket.shutdown().await;
}
