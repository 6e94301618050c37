//! Storage Module Tests
//!
//! Validates shard placement and the bookkeeping of the shard store.
//!
//! ## Test Scopes
//! - **Partitioner**: deterministic placement and range checks across shard counts.
//! - **ShardedCollection**: coverage, ordering and key errors during `init_nodes`.
//! - **ShardStore**: round trip from dataset to flattened output.

#[cfg(test)]
mod tests {
    use crate::error::ShardError;
    use crate::ingestion::types::{Dataset, Record};
    use crate::storage::memory::{key_matches, ShardStore, ShardedCollection, PLAYLISTS, USERS};
    use crate::storage::partitioner::{KeyType, Partitioner};
    use serde_json::{json, Value};

    fn record(value: Value) -> Record {
        match value {
            Value::Object(map) => map,
            other => panic!("fixture is not an object: {other}"),
        }
    }

    fn sample_dataset() -> Dataset {
        Dataset {
            users: vec![
                record(json!({"id": "1", "name": "Albin Jaye"})),
                record(json!({"id": "2", "name": "Dipika Crescentia"})),
                record(json!({"id": "3", "name": "Ankit Sacnite"})),
            ],
            playlists: vec![
                record(json!({"id": "1", "owner_id": "2", "song_ids": ["8", "32"]})),
                record(json!({"id": "2", "owner_id": "3", "song_ids": ["6", "8", "11"]})),
                record(json!({"id": "3", "owner_id": "7", "song_ids": ["7", "12", "13"]})),
                record(json!({"id": "4", "owner_id": "1", "song_ids": []})),
            ],
            songs: (1..=10)
                .map(|i| record(json!({"id": i.to_string(), "artist": "x", "title": "y"})))
                .collect(),
        }
    }

    // ============================================================
    // PARTITIONER TESTS
    // ============================================================

    #[test]
    fn test_partition_is_within_range() {
        for n in 1..=7 {
            let partitioner = Partitioner::new(n);
            for i in 0..1000 {
                let int_shard = partitioner.assign(&i.to_string(), KeyType::Integer).unwrap();
                let str_shard = partitioner.assign(&format!("user_{i}"), KeyType::String).unwrap();
                assert!(int_shard < n, "Shard {int_shard} should be < {n}");
                assert!(str_shard < n, "Shard {str_shard} should be < {n}");
            }
        }
    }

    #[test]
    fn test_partition_is_stable_across_instances() {
        let a = Partitioner::default();
        let b = Partitioner::default();
        for i in 0..200 {
            let key = format!("{}", i * 17);
            assert_eq!(
                a.assign(&key, KeyType::Integer).unwrap(),
                b.assign(&key, KeyType::Integer).unwrap()
            );
        }
    }

    // ============================================================
    // SHARDED COLLECTION TESTS
    // ============================================================

    #[test]
    fn test_init_nodes_covers_every_record_once() {
        let mut dataset = sample_dataset();
        let records = dataset.take_collection("songs").unwrap();
        let expected = records.clone();

        let songs =
            ShardedCollection::init_nodes(crate::storage::memory::SONGS, records, Partitioner::default())
                .unwrap();

        assert_eq!(songs.buckets().len(), 3);
        assert_eq!(songs.len(), expected.len());
        for song in &expected {
            let holders = songs
                .buckets()
                .iter()
                .filter(|bucket| bucket.contains(song))
                .count();
            assert_eq!(holders, 1, "song {:?} should live in exactly one bucket", song["id"]);
        }
    }

    #[test]
    fn test_init_nodes_places_by_key_and_keeps_read_order() {
        let mut dataset = sample_dataset();
        let playlists = ShardedCollection::init_nodes(
            PLAYLISTS,
            dataset.take_collection("playlists").unwrap(),
            Partitioner::default(),
        )
        .unwrap();

        let ids = |shard: usize| -> Vec<String> {
            playlists.bucket(shard).unwrap().iter()
                .map(|p| p["id"].as_str().unwrap().to_string())
                .collect()
        };
        assert_eq!(ids(0), vec!["3"]);
        assert_eq!(ids(1), vec!["1", "4"]);
        assert_eq!(ids(2), vec!["2"]);
    }

    #[test]
    fn test_init_nodes_uses_name_for_users() {
        let mut dataset = sample_dataset();
        let partitioner = Partitioner::default();
        let users = ShardedCollection::init_nodes(
            USERS,
            dataset.take_collection("users").unwrap(),
            partitioner,
        )
        .unwrap();

        for (shard, bucket) in users.buckets().iter().enumerate() {
            for user in bucket {
                let name = user["name"].as_str().unwrap();
                assert_eq!(partitioner.assign_str(name), shard);
            }
        }
    }

    #[test]
    fn test_init_nodes_rejects_non_numeric_id() {
        let records = vec![record(json!({"id": "abc", "song_ids": []}))];
        let err = ShardedCollection::init_nodes(PLAYLISTS, records, Partitioner::default())
            .unwrap_err();
        assert!(matches!(err, ShardError::InvalidKey { .. }));
    }

    #[test]
    fn test_init_nodes_rejects_missing_key() {
        let records = vec![record(json!({"song_ids": []}))];
        let err = ShardedCollection::init_nodes(PLAYLISTS, records, Partitioner::default())
            .unwrap_err();
        assert!(matches!(err, ShardError::MissingKey { .. }));
    }

    #[test]
    fn test_init_nodes_with_other_node_count() {
        let mut dataset = sample_dataset();
        let songs = ShardedCollection::init_nodes(
            crate::storage::memory::SONGS,
            dataset.take_collection("songs").unwrap(),
            Partitioner::new(5),
        )
        .unwrap();
        assert_eq!(songs.bucket_sizes(), vec![2, 2, 2, 2, 2]);
    }

    #[test]
    fn test_key_matches_compares_integers() {
        let by_string = record(json!({"id": "7"}));
        let by_number = record(json!({"id": 7}));
        let broken = record(json!({"id": "seven"}));
        assert!(key_matches(&by_string, "id", 7));
        assert!(key_matches(&by_number, "id", 7));
        assert!(!key_matches(&by_string, "id", 8));
        assert!(!key_matches(&broken, "id", 7));
    }

    // ============================================================
    // SHARD STORE TESTS
    // ============================================================

    #[test]
    fn test_store_output_is_shard_ordered() {
        let dataset = sample_dataset();
        let total = dataset.len();
        let store = ShardStore::from_dataset(dataset, Partitioner::default()).unwrap();
        let output = store.into_output();

        assert_eq!(output.len(), total);
        let playlist_ids: Vec<&str> = output
            .playlists
            .iter()
            .map(|p| p["id"].as_str().unwrap())
            .collect();
        assert_eq!(playlist_ids, vec!["3", "1", "4", "2"]);
    }

    #[test]
    fn test_take_collection_rejects_unknown_name() {
        let mut dataset = sample_dataset();
        let err = dataset.take_collection("albums").unwrap_err();
        assert!(matches!(err, ShardError::UnknownCollection(name) if name == "albums"));
    }
}
