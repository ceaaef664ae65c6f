// Copyright 2026, The Merkle Coin Development Community
// SPDX-License-Identifier: BSD-3-Clause
//
// `TorControl` per spec.md §6/§9: the outbound commands the core issues for hidden-service
// publishing (`ADD_ONION`, `DEL_ONION`, `GETINFO onions/detached`, periodic `SIGNAL`).
// Grounded on `original_source/src/Net/Tor/TorControl.cpp`'s `AddOnion`/`DelOnion`/
// `QueryHiddenServices`/`CheckHeartbeat`, reworked from exception-based control flow to
// `Result<_, TorError>` per the teacher's/SPEC_FULL's error-handling convention.

use std::{
    io::{BufReader, Write},
    net::{SocketAddr, TcpStream},
};

use base64::encode as base64_encode;
use log::{debug, info, warn};

use crate::{
    error::TorError,
    parser::{parse_onions_detached, parse_service_id, read_reply},
};

const LOG_TARGET: &str = "c::tor::client";

/// A published hidden service's address, as returned by `ADD_ONION`/`GETINFO onions/detached`.
pub type ServiceId = String;

/// A raw line-based connection to a Tor control port. One command in flight at a time, same as
/// the control protocol itself requires.
pub struct TorControlClient {
    stream: TcpStream,
    reader: BufReader<TcpStream>,
}

impl TorControlClient {
    pub fn connect(control_addr: SocketAddr) -> Result<Self, TorError> {
        let stream = TcpStream::connect(control_addr).map_err(TorError::Connect)?;
        let reader = BufReader::new(stream.try_clone()?);
        Ok(Self { stream, reader })
    }

    /// Sends one command line and reads the full reply (collapsing any `NNN+`/`.`-terminated
    /// data block into the returned lines).
    pub fn invoke(&mut self, command: &str) -> Result<Vec<String>, TorError> {
        debug!(target: LOG_TARGET, "> {}", command);
        self.stream.write_all(command.as_bytes())?;
        self.stream.write_all(b"\r\n")?;
        let reply = read_reply(&mut self.reader)?;
        debug!(target: LOG_TARGET, "< {} line(s)", reply.len());
        Ok(reply)
    }
}

/// High-level hidden-service operations over a [`TorControlClient`].
pub struct TorControl {
    client: TorControlClient,
}

impl TorControl {
    pub fn new(client: TorControlClient) -> Self {
        Self { client }
    }

    /// `ADD_ONION` per spec.md §6, idempotent per testable property #6: if `expected_address`
    /// (the onion address the caller has already derived from `secret_scalar`) is present in
    /// `GETINFO onions/detached`, that address is returned without issuing `ADD_ONION`.
    ///
    /// Deriving an onion address from an ed25519 key is cryptography this crate does not own
    /// (the teacher's pack carries no ed25519-to-onion-address derivation); the caller supplies
    /// the address it expects, matching how the service-identity layer already knows its own
    /// public key before asking Tor to publish it.
    pub fn add_onion(
        &mut self,
        expected_address: &str,
        secret_scalar: &[u8; 32],
        prf_secret: &[u8; 32],
        external_port: u16,
        internal_port: u16,
    ) -> Result<ServiceId, TorError> {
        let existing = self.get_info_onions_detached()?;
        if existing.iter().any(|addr| addr == expected_address) {
            info!(target: LOG_TARGET, "hidden service already running for {}", expected_address);
            return Ok(expected_address.to_string());
        }

        let mut key_bytes = Vec::with_capacity(64);
        key_bytes.extend_from_slice(secret_scalar);
        key_bytes.extend_from_slice(prf_secret);
        let serialized_key = base64_encode(&key_bytes);

        let command = format!(
            "ADD_ONION ED25519-V3:{} Flags=DiscardPK,Detach Port={},{}",
            serialized_key, external_port, internal_port
        );
        let reply = self.client.invoke(&command)?;
        let service_id = parse_service_id(&reply)?;
        info!(target: LOG_TARGET, "published hidden service {}", service_id);
        Ok(service_id)
    }

    /// `DEL_ONION` per spec.md §6.
    pub fn del_onion(&mut self, service_id: &str) -> Result<(), TorError> {
        self.client.invoke(&format!("DEL_ONION {}", service_id))?;
        Ok(())
    }

    /// `GETINFO onions/detached` per spec.md §6, parsed via the explicit data-block parser.
    pub fn get_info_onions_detached(&mut self) -> Result<Vec<ServiceId>, TorError> {
        let reply = self.client.invoke("GETINFO onions/detached")?;
        Ok(parse_onions_detached(&reply))
    }

    /// Periodic `SIGNAL HEARTBEAT`/`SIGNAL DUMP` per spec.md §6. Per the resolved Open Question
    /// in §9: this reports success unconditionally once both signals round-trip — it does not
    /// consult `status/bootstrap-phase`, preserving rather than "fixing" the original behavior.
    pub fn heartbeat(&mut self) -> Result<(), TorError> {
        self.client.invoke("SIGNAL DUMP")?;
        self.client.invoke("SIGNAL HEARTBEAT")?;
        Ok(())
    }
}

impl Drop for TorControl {
    fn drop(&mut self) {
        if let Err(e) = self.client.invoke("SIGNAL DUMP") {
            warn!(target: LOG_TARGET, "failed to send final SIGNAL DUMP on shutdown: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::{
        io::{BufRead, BufReader as StdBufReader, Write},
        net::TcpListener,
        thread,
    };

    use super::*;

    /// A tiny in-process stand-in for `tor`'s control port: echoes back a canned reply per
    /// command, enough to exercise the client/parser plumbing end to end.
    fn spawn_fake_control_port(replies: Vec<(&'static str, &'static str)>) -> SocketAddr {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        thread::spawn(move || {
            let (stream, _) = listener.accept().unwrap();
            let mut writer = stream.try_clone().unwrap();
            let mut reader = StdBufReader::new(stream);
            for (expected_prefix, reply) in replies {
                let mut line = String::new();
                reader.read_line(&mut line).unwrap();
                assert!(line.starts_with(expected_prefix), "got: {}", line);
                writer.write_all(reply.as_bytes()).unwrap();
            }
        });
        addr
    }

    #[test]
    fn get_info_onions_detached_parses_the_address_list() {
        let addr = spawn_fake_control_port(vec![(
            "GETINFO onions/detached",
            "250+onions/detached=\r\nfoo.onion\r\n.\r\n250 OK\r\n",
        )]);
        let client = TorControlClient::connect(addr).unwrap();
        let mut control = TorControl::new(client);
        assert_eq!(control.get_info_onions_detached().unwrap(), vec!["foo.onion"]);
        // Drop issues a final SIGNAL DUMP the fake server isn't listening for anymore; that's
        // fine, the write simply fails and is logged, not propagated.
        std::mem::forget(control);
    }

    #[test]
    fn add_onion_is_idempotent_when_the_address_is_already_published() {
        let addr = spawn_fake_control_port(vec![(
            "GETINFO onions/detached",
            "250+onions/detached=\r\nfoo.onion\r\n.\r\n250 OK\r\n",
        )]);
        let client = TorControlClient::connect(addr).unwrap();
        let mut control = TorControl::new(client);
        let service_id = control
            .add_onion("foo.onion", &[1u8; 32], &[2u8; 32], 80, 8080)
            .unwrap();
        assert_eq!(service_id, "foo.onion");
        std::mem::forget(control);
    }

    #[test]
    fn add_onion_issues_the_command_when_not_already_published() {
        let addr = spawn_fake_control_port(vec![
            ("GETINFO onions/detached", "250-onions/detached=\r\n250 OK\r\n"),
            ("ADD_ONION", "250-ServiceID=newservice1234567\r\n250 OK\r\n"),
        ]);
        let client = TorControlClient::connect(addr).unwrap();
        let mut control = TorControl::new(client);
        let service_id = control
            .add_onion("not-yet-published.onion", &[3u8; 32], &[4u8; 32], 80, 8080)
            .unwrap();
        assert_eq!(service_id, "newservice1234567");
        std::mem::forget(control);
    }

    #[test]
    fn del_onion_sends_the_expected_command() {
        let addr = spawn_fake_control_port(vec![("DEL_ONION", "250 OK\r\n")]);
        let client = TorControlClient::connect(addr).unwrap();
        let mut control = TorControl::new(client);
        control.del_onion("someservice").unwrap();
        std::mem::forget(control);
    }
}
