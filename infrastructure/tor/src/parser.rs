// Copyright 2026, The Merkle Coin Development Community
// SPDX-License-Identifier: BSD-3-Clause
//
// Per spec.md §9's design note: "the line-based state machine (`250+onions/detached=` ...
// `.` ... `250 OK`) is idiosyncratic; implement as an explicit small parser, not ad-hoc string
// checks." This module owns exactly that: reading one Tor control-port reply off a line stream,
// and picking the `ServiceID=`/`onions/detached=` payload back out of it. Grounded on
// `original_source/src/Net/Tor/TorControl.cpp`'s `AddOnion`/`QueryHiddenServices`.

use std::io::BufRead;

use crate::error::TorError;

const SERVICE_ID_PREFIX: &str = "250-ServiceID=";
const ONIONS_DETACHED_PREFIX: &str = "250+onions/detached=";
const DATA_BLOCK_TERMINATOR: &str = ".";

/// Reads one complete reply (possibly multiple lines) from a Tor control connection.
///
/// The control protocol's line grammar: a line `NNN-text` is a non-final continuation line, a
/// line `NNN+text` introduces a multi-line data block terminated by a lone `.`, and a line
/// `NNN text` (space separator) is the final line of the reply. `NNN` is a three-digit status
/// code; `4xx`/`5xx` indicate failure.
pub fn read_reply<R: BufRead>(reader: &mut R) -> Result<Vec<String>, TorError> {
    let mut lines = Vec::new();
    loop {
        let mut line = String::new();
        let bytes_read = reader.read_line(&mut line)?;
        if bytes_read == 0 {
            return Err(TorError::UnexpectedEof);
        }
        let line = line.trim_end_matches(['\r', '\n']).to_string();

        let is_data_block = line.len() > 3 && line.as_bytes()[3] == b'+';
        let is_final_line = line.len() > 3 && line.as_bytes()[3] == b' ';
        lines.push(line);

        if is_data_block {
            read_data_block(reader, &mut lines)?;
        } else if is_final_line {
            break;
        }
    }

    let status = status_code(lines.last().expect("at least one line was pushed above"))?;
    if !(200..300).contains(&status) {
        return Err(TorError::CommandFailed(lines.join("; ")));
    }
    Ok(lines)
}

fn read_data_block<R: BufRead>(reader: &mut R, lines: &mut Vec<String>) -> Result<(), TorError> {
    loop {
        let mut line = String::new();
        let bytes_read = reader.read_line(&mut line)?;
        if bytes_read == 0 {
            return Err(TorError::UnexpectedEof);
        }
        let line = line.trim_end_matches(['\r', '\n']).to_string();
        let terminated = line == DATA_BLOCK_TERMINATOR;
        lines.push(line);
        if terminated {
            return Ok(());
        }
    }
}

fn status_code(line: &str) -> Result<u16, TorError> {
    line.get(0..3)
        .and_then(|code| code.parse().ok())
        .ok_or_else(|| TorError::MalformedReply(line.to_string()))
}

/// Extracts the `ServiceID=...` value from an `ADD_ONION` reply.
pub fn parse_service_id(lines: &[String]) -> Result<String, TorError> {
    lines
        .iter()
        .find_map(|line| line.strip_prefix(SERVICE_ID_PREFIX))
        .map(str::to_string)
        .ok_or(TorError::MissingServiceId)
}

/// Extracts the addresses out of a `GETINFO onions/detached` reply: the
/// `250+onions/detached=` ... `.` data block, one address per line (the first address may share
/// the opening line if non-empty), terminated before the final `250 OK`.
pub fn parse_onions_detached(lines: &[String]) -> Vec<String> {
    let mut addresses = Vec::new();
    let mut in_block = false;
    for line in lines {
        if let Some(rest) = line.strip_prefix(ONIONS_DETACHED_PREFIX) {
            in_block = true;
            if !rest.is_empty() {
                addresses.push(rest.to_string());
            }
            continue;
        }
        if !in_block {
            continue;
        }
        if line == DATA_BLOCK_TERMINATOR {
            break;
        }
        addresses.push(line.clone());
    }
    addresses
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reply(lines: &[&str]) -> Vec<String> {
        lines.iter().map(|l| l.to_string()).collect()
    }

    #[test]
    fn reads_a_single_line_reply() {
        let mut cursor = std::io::Cursor::new(b"250 OK\r\n".to_vec());
        let lines = read_reply(&mut cursor).unwrap();
        assert_eq!(lines, vec!["250 OK"]);
    }

    #[test]
    fn reads_a_data_block_reply_and_stops_at_the_final_line() {
        let raw = "250+onions/detached=\r\nabc123.onion\r\ndef456.onion\r\n.\r\n250 OK\r\n";
        let mut cursor = std::io::Cursor::new(raw.as_bytes().to_vec());
        let lines = read_reply(&mut cursor).unwrap();
        assert_eq!(parse_onions_detached(&lines), vec!["abc123.onion", "def456.onion"]);
    }

    #[test]
    fn a_failure_status_code_is_surfaced_as_command_failed() {
        let mut cursor = std::io::Cursor::new(b"550 Unrecognized command\r\n".to_vec());
        assert!(matches!(read_reply(&mut cursor), Err(TorError::CommandFailed(_))));
    }

    #[test]
    fn extracts_the_service_id_from_an_add_onion_reply() {
        let lines = reply(&["250-ServiceID=abc123defg456hij", "250 OK"]);
        assert_eq!(parse_service_id(&lines).unwrap(), "abc123defg456hij");
    }

    #[test]
    fn missing_service_id_is_an_error() {
        let lines = reply(&["250 OK"]);
        assert!(matches!(parse_service_id(&lines), Err(TorError::MissingServiceId)));
    }

    #[test]
    fn empty_onions_detached_block_yields_no_addresses() {
        let raw = "250+onions/detached=\r\n.\r\n250 OK\r\n";
        let mut cursor = std::io::Cursor::new(raw.as_bytes().to_vec());
        let lines = read_reply(&mut cursor).unwrap();
        assert!(parse_onions_detached(&lines).is_empty());
    }
}
