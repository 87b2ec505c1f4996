use mdminecraft_core::Tag;
use mdminecraft_net::{NetworkBuffer, ProtocolRegistries};
use mdminecraft_testkit::{FixedBlockStates, SnapshotSink};

#[test]
fn unit_components_are_empty_on_the_wire() {
    let registries = ProtocolRegistries::vanilla().expect("vanilla registries");

    // Unit components carry no data on either channel.
    for name in ["hide_tooltip", "hide_additional_tooltip", "fire_resistant"] {
        let component = registries.components().by_name(name).unwrap();
        let value = component.read_tag_any(&Tag::empty_compound()).unwrap();
        let mut buf = NetworkBuffer::new();
        component.write_network_any(&mut buf, &*value).unwrap();
        assert!(buf.is_empty(), "{name} should not write bytes");
        assert!(component.read_network_any(&mut buf).is_ok());
    }
}

#[test]
fn particle_prototypes_survive_the_wire() {
    let registries = ProtocolRegistries::vanilla().expect("vanilla registries");
    let states = FixedBlockStates::new();
    for prototype in registries.particles().iter() {
        let mut buf = NetworkBuffer::new();
        prototype.write_data(&mut buf).unwrap();
        let decoded = prototype.read_data(&mut buf, &states).unwrap();
        assert_eq!(&decoded, prototype, "{}", prototype.key());
        assert!(buf.is_empty());
    }
}

#[test]
fn catalog_listing_can_be_snapshotted() {
    let registries = ProtocolRegistries::vanilla().expect("vanilla registries");
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("components.json");

    let mut sink = SnapshotSink::create(&path).expect("sink create");
    sink.write(&registries.component_rows()).expect("write rows");

    let rows: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(rows.as_array().unwrap().len(), 56);
    assert_eq!(rows[0]["name"], "minecraft:custom_data");
}
