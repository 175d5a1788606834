// Copyright 2026 Open Nexus OS Contributors
// SPDX-License-Identifier: Apache-2.0

//! CONTEXT: Radio tag routing for text records
//! OWNERS: @runtime
//! STATUS: Experimental
//! API_STABILITY: Internal
//! TEST_COVERAGE: Unit tests below; property tests in `tests/routing_props.rs`
//!
//! Telephony components that still log through the generic entry points are moved
//! to the radio channel, and their tag is rewritten so readers can spot them.
//!
//! INVARIANTS:
//! - A caller that explicitly targets the radio channel keeps its tag untouched
//! - Rewritten tags never exceed `MAX_REWRITTEN_TAG_LEN` bytes

use std::borrow::Cow;

use crate::channel::LogId;
use crate::record::nul_terminated;

/// Prefix placed in front of rerouted radio tags.
pub const RADIO_TAG_PREFIX: &[u8] = b"use-Rlog/RLOG-";
/// Longest rewritten tag, excluding the NUL terminator.
pub const MAX_REWRITTEN_TAG_LEN: usize = 31;

const RADIO_EXACT: &[&[u8]] = &[b"HTC_RIL", b"AT", b"GSM", b"STK", b"CDMA", b"PHONE", b"SMS", b"KINETO"];

const RADIO_PREFIX: &[&[u8]] = &[
    b"RIL",
    b"IMS",
    b"KIPC",
    b"Kineto",
    b"QCRIL",
    b"QC-RIL",
    b"QC-QMI",
    b"QC-ONCRPC",
    b"QC-DSI",
];

// Only matched for records written without an explicit channel.
const RADIO_EXACT_DEFAULT_ONLY: &[&[u8]] = &[b"QC-NETMGR-LIB", b"QC-QDP", b"Diag_Lib"];

/// Which entry point is asking; the default-channel path knows a few extra tags.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RuleSet {
    /// `write` / `print`: no channel chosen by the caller.
    DefaultChannel,
    /// `buf_write` / `buf_print`: caller picked the channel.
    ExplicitChannel,
}

/// Routing decision: final channel plus the NUL-terminated tag to transmit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route<'a> {
    pub id: LogId,
    pub tag: Cow<'a, [u8]>,
}

impl Route<'_> {
    pub fn rerouted(&self) -> bool {
        self.tag.starts_with(RADIO_TAG_PREFIX)
    }
}

/// Returns `true` if the tag belongs to a radio/telephony component.
pub fn is_radio_tag(tag: &[u8], rules: RuleSet) -> bool {
    let tag = c_str(tag);
    if RADIO_EXACT.iter().any(|t| *t == tag) || RADIO_PREFIX.iter().any(|p| tag.starts_with(p)) {
        return true;
    }
    rules == RuleSet::DefaultChannel && RADIO_EXACT_DEFAULT_ONLY.iter().any(|t| *t == tag)
}

/// Routes a record written without an explicit channel.
pub fn route_default(tag: &[u8]) -> Route<'_> {
    route(LogId::Main, tag, RuleSet::DefaultChannel)
}

/// Routes a record written to a caller-chosen channel.
pub fn route_explicit(id: LogId, tag: &[u8]) -> Route<'_> {
    route(id, tag, RuleSet::ExplicitChannel)
}

fn route(id: LogId, tag: &[u8], rules: RuleSet) -> Route<'_> {
    if id != LogId::Radio && is_radio_tag(tag, rules) {
        return Route { id: LogId::Radio, tag: Cow::Owned(rewrite_tag(tag)) };
    }
    Route { id, tag: nul_terminated(tag) }
}

/// `use-Rlog/RLOG-<tag>`, cut to the rewrite bound, NUL-terminated.
pub fn rewrite_tag(tag: &[u8]) -> Vec<u8> {
    let tag = c_str(tag);
    let mut out = Vec::with_capacity(MAX_REWRITTEN_TAG_LEN + 1);
    out.extend_from_slice(RADIO_TAG_PREFIX);
    out.extend_from_slice(tag);
    out.truncate(MAX_REWRITTEN_TAG_LEN);
    out.push(0);
    out
}

fn c_str(bytes: &[u8]) -> &[u8] {
    match bytes.iter().position(|b| *b == 0) {
        Some(pos) => &bytes[..pos],
        None => bytes,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_tags_match_whole_tag_only() {
        assert!(is_radio_tag(b"GSM", RuleSet::ExplicitChannel));
        assert!(!is_radio_tag(b"GSMx", RuleSet::ExplicitChannel));
        assert!(!is_radio_tag(b"AT+", RuleSet::DefaultChannel));
        assert!(is_radio_tag(b"HTC_RIL", RuleSet::DefaultChannel));
    }

    #[test]
    fn prefix_tags_match_any_suffix() {
        assert!(is_radio_tag(b"RILJ", RuleSet::DefaultChannel));
        assert!(is_radio_tag(b"IMSService", RuleSet::ExplicitChannel));
        assert!(is_radio_tag(b"QC-ONCRPC-x", RuleSet::ExplicitChannel));
        assert!(!is_radio_tag(b"RI", RuleSet::DefaultChannel));
        assert!(!is_radio_tag(b"ril", RuleSet::DefaultChannel));
    }

    #[test]
    fn default_only_tags() {
        for tag in [&b"QC-NETMGR-LIB"[..], b"QC-QDP", b"Diag_Lib"] {
            assert!(is_radio_tag(tag, RuleSet::DefaultChannel));
            assert!(!is_radio_tag(tag, RuleSet::ExplicitChannel));
        }
    }

    #[test]
    fn default_route_rewrites_radio_tag() {
        let route = route_default(b"RILJ");
        assert_eq!(route.id, LogId::Radio);
        assert_eq!(&*route.tag, b"use-Rlog/RLOG-RILJ\0");
        assert!(route.rerouted());
    }

    #[test]
    fn explicit_radio_keeps_tag() {
        let route = route_explicit(LogId::Radio, b"RILJ");
        assert_eq!(route.id, LogId::Radio);
        assert_eq!(&*route.tag, b"RILJ\0");
        assert!(!route.rerouted());
    }

    #[test]
    fn explicit_system_is_rerouted() {
        let route = route_explicit(LogId::System, b"SMS");
        assert_eq!(route.id, LogId::Radio);
        assert_eq!(&*route.tag, b"use-Rlog/RLOG-SMS\0");
    }

    #[test]
    fn non_radio_tag_passes_through() {
        let route = route_default(b"ActivityManager");
        assert_eq!(route.id, LogId::Main);
        assert_eq!(&*route.tag, b"ActivityManager\0");
    }

    #[test]
    fn long_rewrite_is_truncated() {
        let tag = rewrite_tag(b"RIL-with-a-really-long-component-name");
        assert_eq!(tag.len(), MAX_REWRITTEN_TAG_LEN + 1);
        assert_eq!(&tag[..], b"use-Rlog/RLOG-RIL-with-a-really\0");
    }
}
