//! End-to-end scenarios for `ChunkList`.

use bumpline_collections::{Array, ChunkList};
use bumpline_test_utils::{read_u32, single_block_pool, small_pool};

#[test]
fn list_and_array_share_a_pool() {
    let mut pool = small_pool(128);
    let mut list = ChunkList::create(&mut pool, 4, 4).unwrap();
    let mut array = Array::create(&mut pool, 1, 4).unwrap();
    for v in 0..50u32 {
        list.push(&mut pool).unwrap().copy_from_slice(&v.to_le_bytes());
        array
            .push(&mut pool)
            .unwrap()
            .copy_from_slice(&(v + 1000).to_le_bytes());
    }

    let listed: Vec<u32> = list.iter(&pool).map(read_u32).collect();
    let arrayed: Vec<u32> = array.iter(&pool).map(read_u32).collect();
    assert_eq!(listed, (0..50).collect::<Vec<_>>());
    assert_eq!(arrayed, (1000..1050).collect::<Vec<_>>());
    assert_eq!(list.chunk_count(), 13);
}

#[test]
fn chunk_views_cover_every_element_once() {
    let mut pool = small_pool(4096);
    let mut list = ChunkList::create(&mut pool, 5, 4).unwrap();
    for v in 0..12u32 {
        list.push(&mut pool).unwrap().copy_from_slice(&v.to_le_bytes());
    }
    let total: usize = list.chunks(&pool).map(|c| c.len() / 4).sum();
    assert_eq!(total, list.len());
    let flattened: Vec<u32> = list
        .chunks(&pool)
        .flat_map(|c| c.chunks_exact(4))
        .map(read_u32)
        .collect();
    assert_eq!(flattened, (0..12).collect::<Vec<_>>());
}

#[test]
fn create_fails_cleanly_when_first_chunk_does_not_fit() {
    let mut pool = single_block_pool(16);
    assert!(ChunkList::create(&mut pool, 8, 4).is_err());
    assert_eq!(pool.used(), 0);
}
