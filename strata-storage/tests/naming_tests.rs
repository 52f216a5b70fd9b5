//! Pinning tests for the on-disk name patterns.

use strata_storage::naming::{
    data_file_name, generation_timestamp, index_file_name, updates_file_name,
};
use strata_types::Timestamp;

#[test]
fn index_names_are_ascii_and_positional() {
    assert_eq!(index_file_name(3, 7, 0), b"3_7_0.idx");
    assert_eq!(index_file_name(3, 7, 12), b"3_7_12.idx");
    assert_eq!(index_file_name(0, 0, 0), b"0_0_0.idx");
}

#[test]
fn generation_names_embed_the_raw_timestamp() {
    let ts = Timestamp::new(42, 7);
    let name = data_file_name(3, 7, ts);

    assert!(name.starts_with(b"3_7_"));
    assert!(name.ends_with(b".blk"));
    assert_eq!(&name[4..4 + Timestamp::LEN], &ts.to_bytes());

    let upd = updates_file_name(3, 7, ts);
    assert!(upd.ends_with(b".update"));
    assert_eq!(&upd[4..4 + Timestamp::LEN], &ts.to_bytes());
}

#[test]
fn distinct_generations_get_distinct_names() {
    let ts = Timestamp::new(42, 7);
    assert_ne!(data_file_name(3, 7, ts), data_file_name(3, 7, ts.next()));
    assert_ne!(data_file_name(3, 7, ts), updates_file_name(3, 7, ts));
}

#[test]
fn generation_timestamp_inverts_the_name_builders() {
    let ts = Timestamp::new(-5, u32::MAX);
    assert_eq!(generation_timestamp(&data_file_name(1, 2, ts)), Some(ts));
    assert_eq!(generation_timestamp(&updates_file_name(1, 2, ts)), Some(ts));

    // Index names carry no timestamp; truncated names are rejected.
    assert_eq!(generation_timestamp(&index_file_name(1, 2, 3)), None);
    assert_eq!(generation_timestamp(b".blk"), None);
    assert_eq!(generation_timestamp(b"1_2_tooshort.blk"), None);
}
