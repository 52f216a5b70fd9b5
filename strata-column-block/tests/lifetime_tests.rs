//! Reference-counting and destruction semantics.

use std::sync::Arc;
use std::thread;

use strata_column_block::{ColumnBlock, Error, OwnerBlock};
use strata_storage::MemSegmentStore;
use strata_test_utils::init_tracing_for_tests;
use strata_types::Timestamp;

const OWNER: OwnerBlock = OwnerBlock {
    id: 7,
    column_count: 16,
};

fn make_block(
    index_count: usize,
) -> (Arc<MemSegmentStore>, Arc<ColumnBlock<MemSegmentStore>>) {
    init_tracing_for_tests();
    let store = Arc::new(MemSegmentStore::new());
    let block = ColumnBlock::create(Arc::clone(&store), OWNER, index_count, 3)
        .expect("create column block");
    (store, block)
}

#[test]
fn creator_holds_the_first_reference() {
    let (store, block) = make_block(2);
    assert_eq!(block.ref_count(), 1);

    block.close();
    assert_eq!(block.ref_count(), 0);
    assert_eq!(store.file_count(), 0);
    assert_eq!(store.destroyed_count(), 2);
}

#[test]
fn opening_bumps_the_file_count_not_the_block_count() {
    let (_store, block) = make_block(0);
    block
        .bind_generation(Timestamp::new(5, 0))
        .expect("bind_generation");

    let opened = block.open_data().expect("open_data");
    assert_eq!(opened.ref_count(), 2, "block's reference plus the opener's");
    assert_eq!(block.ref_count(), 1, "the block's own count is untouched");

    opened.release();
    assert_eq!(block.ref_count(), 1);

    // Releasing the opened handle must not have destroyed anything.
    block.write_data(b"still writable").expect("write_data");
    block.close();
}

#[test]
fn close_with_outstanding_retains_does_not_destroy() {
    let (store, block) = make_block(1);
    block.retain();
    assert_eq!(block.ref_count(), 2);

    block.close();
    assert_eq!(block.ref_count(), 1);
    assert_eq!(store.destroyed_count(), 0, "a holder remains");
    block.write_index(0, b"live").expect("still usable");

    block.close();
    assert_eq!(store.file_count(), 0);
    assert_eq!(store.destroyed_count(), 1);
}

#[test]
fn destroy_tears_down_all_three_file_kinds() {
    let (store, block) = make_block(3);
    block
        .bind_generation(Timestamp::new(9, 9))
        .expect("bind_generation");
    assert_eq!(store.file_count(), 5);

    block.close();
    assert_eq!(store.file_count(), 0);
    assert_eq!(store.destroyed_count(), 5);

    // The block is unusable afterward; only the timestamp diagnostic
    // remains readable.
    assert!(matches!(block.write_data(b"x"), Err(Error::Internal(_))));
    assert!(matches!(block.open_index(0), Err(Error::Internal(_))));
    assert_eq!(block.read_ts(), Timestamp::new(9, 9));
}

#[test]
fn concurrent_duplicate_releases_destroy_exactly_once() {
    const HOLDERS: usize = 16;

    for _ in 0..50 {
        let (store, block) = make_block(2);
        block
            .bind_generation(Timestamp::new(1, 1))
            .expect("bind_generation");
        for _ in 1..HOLDERS {
            block.retain();
        }

        let mut threads = Vec::with_capacity(HOLDERS);
        for _ in 0..HOLDERS {
            let block = Arc::clone(&block);
            threads.push(thread::spawn(move || block.close()));
        }
        for t in threads {
            t.join().expect("closing thread panicked");
        }

        // 2 index files + data + updates, each torn down exactly once.
        assert_eq!(store.file_count(), 0);
        assert_eq!(store.destroyed_count(), 4);
    }
}

#[test]
fn rebinding_releases_the_previous_generation() {
    let (store, block) = make_block(0);
    let t1 = Timestamp::new(10, 0);
    block.bind_generation(t1).expect("bind t1");
    block.write_data(b"abc").expect("write_data");

    // A reader grabs the old generation before the rebind.
    let old_data = block.open_data().expect("open_data");

    block.bind_generation(t1.next()).expect("bind t2");

    // The old updates file had no other holder and is gone; the old data
    // file survives through the reader's reference.
    assert_eq!(store.destroyed_count(), 1);
    assert_eq!(store.file_count(), 3);

    let mut buf = [0u8; 3];
    old_data.read(&mut buf).expect("read retained generation");
    assert_eq!(&buf, b"abc");

    old_data.release();
    assert_eq!(store.destroyed_count(), 2);
    assert_eq!(store.file_count(), 2);

    block.close();
    assert_eq!(store.file_count(), 0);
}

#[test]
fn opened_handles_outlive_the_block() {
    let (store, block) = make_block(0);
    block
        .bind_generation(Timestamp::new(3, 0))
        .expect("bind_generation");
    block.write_data(b"survivor").expect("write_data");

    let opened = block.open_data().expect("open_data");
    block.close();

    // The block is gone, but the opener's file is not.
    assert_eq!(store.file_count(), 1);
    let mut buf = [0u8; 8];
    opened.read(&mut buf).expect("read after block close");
    assert_eq!(&buf, b"survivor");

    opened.release();
    assert_eq!(store.file_count(), 0);
}
