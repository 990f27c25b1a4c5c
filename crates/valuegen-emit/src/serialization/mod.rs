//! Serialization adapter emitters.
//!
//! Each adapter produces one artifact wiring the synthesized type into one
//! external serialization library. Keyed types serialize as their bare key;
//! complex types serialize member-wise. Every deserialization path ends in
//! `Validate`, so no adapter can smuggle an unvalidated instance into the
//! process.

pub mod message_pack;
pub mod newtonsoft_json;
pub mod protobuf_net;
pub mod system_text_json;

use crate::naming::parameter_name;
use valuegen_core::MemberDescriptor;

/// Local variable holding a member's deserialized value.
fn local_name(member: &MemberDescriptor) -> String {
    parameter_name(&member.name)
}

/// Local flag recording that a member appeared in the payload.
fn seen_flag(member: &MemberDescriptor) -> String {
    format!("{}Seen", parameter_name(&member.name))
}

/// Whether a member must appear in the payload. Nullable members are
/// optional; everything else is required.
fn is_required(member: &MemberDescriptor) -> bool {
    !member.is_nullable
}
