//! Property-based fuzz tests for the protocol codecs.
//!
//! Decoders see untrusted bytes from the wire, so malformed input must come
//! back as a `CodecError`, never a panic or an unbounded allocation.

use mdminecraft_net::{nbt, types, NetworkBuffer, ProtocolRegistries};
use mdminecraft_testkit::FixedBlockStates;
use proptest::prelude::*;

proptest! {
    /// Property: arbitrary bytes don't crash any component decoder
    #[test]
    fn component_decoders_never_panic(random_bytes in prop::collection::vec(any::<u8>(), 0..2000)) {
        let registries = ProtocolRegistries::vanilla().unwrap();
        for component in registries.components().iter() {
            let mut buf = NetworkBuffer::from_bytes(&random_bytes);
            let _ = component.read_network_any(&mut buf);
        }
    }

    /// Property: arbitrary bytes don't crash any particle decoder
    #[test]
    fn particle_decoders_never_panic(random_bytes in prop::collection::vec(any::<u8>(), 0..2000)) {
        let registries = ProtocolRegistries::vanilla().unwrap();
        let states = FixedBlockStates::new();
        for particle in registries.particles().iter() {
            let mut buf = NetworkBuffer::from_bytes(&random_bytes);
            let _ = particle.read_data(&mut buf, &states);
        }
    }

    /// Property: arbitrary bytes don't crash the tag reader
    #[test]
    fn tag_reader_never_panics(random_bytes in prop::collection::vec(any::<u8>(), 0..2000)) {
        let mut buf = NetworkBuffer::from_bytes(&random_bytes);
        let _ = nbt::read_tag(&mut buf);
    }

    /// Property: a tag type byte followed by garbage doesn't crash
    #[test]
    fn typed_tag_garbage_never_panics(
        tag_type in 0u8..16,
        random_bytes in prop::collection::vec(any::<u8>(), 0..500),
    ) {
        let mut bytes = vec![tag_type];
        bytes.extend(random_bytes);
        let mut buf = NetworkBuffer::from_bytes(&bytes);
        let _ = nbt::read_tag(&mut buf);
    }

    /// Property: var-ints decode to what was encoded, in at most five bytes
    #[test]
    fn var_int_round_trips(value in any::<i32>()) {
        let mut buf = NetworkBuffer::new();
        buf.write_var_int(value);
        prop_assert!(buf.remaining() <= 5);
        prop_assert_eq!(buf.read_var_int().unwrap(), value);
        prop_assert!(buf.is_empty());
    }

    /// Property: var-longs decode to what was encoded
    #[test]
    fn var_long_round_trips(value in any::<i64>()) {
        let mut buf = NetworkBuffer::new();
        buf.write_var_long(value);
        prop_assert!(buf.remaining() <= 10);
        prop_assert_eq!(buf.read_var_long().unwrap(), value);
    }

    /// Property: strings within the limit survive the wire
    #[test]
    fn strings_round_trip(value in "\\PC{0,200}") {
        let mut buf = NetworkBuffer::new();
        buf.write_string(&value).unwrap();
        prop_assert_eq!(buf.read_string().unwrap(), value);
    }

    /// Property: a bounded list refuses any declared length past its bound
    #[test]
    fn bounded_list_rejects_long_lengths(max in 0usize..64, extra in 1usize..1000) {
        let mut buf = NetworkBuffer::new();
        buf.write_var_int((max + extra) as i32);
        let list = types::var_int().list(max);
        prop_assert!(list.read(&mut buf).is_err());
    }

    /// Property: a bounded list refuses to write past its bound
    #[test]
    fn bounded_list_refuses_oversized_writes(max in 0usize..32, extra in 1usize..32) {
        let list = types::var_int().list(max);
        let values = vec![7; max + extra];
        let mut buf = NetworkBuffer::new();
        prop_assert!(list.write(&mut buf, &values).is_err());
    }
}
